//! notionical-provider-notion - Notion database provider for notionical
//!
//! Queries a Notion database and maps its pages into
//! [`notionical_core::CalendarEvent`]s.

pub mod client;
pub mod fields;
pub mod from_notion;
pub mod types;

pub use client::{NotionClient, NotionError};
pub use fields::FieldNames;
pub use from_notion::{DataErrorPolicy, EventMapping};
