//! Core types for notionical.
//!
//! This crate provides the pieces shared by the server and the Notion provider:
//! - `CalendarEvent`, the normalized event every provider maps into
//! - `auth` for checking the feed access token
//! - `ics` for rendering events into an iCalendar feed

pub mod auth;
pub mod error;
pub mod event;
pub mod ics;

// Re-export event types at crate root for convenience
pub use event::*;
