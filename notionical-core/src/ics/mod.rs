//! ICS feed generation.
//!
//! This module renders events into an RFC 5545 calendar. Escaping and line
//! folding are left to the `icalendar` crate.

mod generate;

pub use generate::generate_feed;
