//! Site Builder Library
//!
//! Roster import for the tournament site: CSV signup sheet → teams
//! store. The statistics engine and the JS mirror live in `cup_core`;
//! this crate owns identity assignment and field defaulting.

pub mod roster;

pub use roster::{import_roster, parse_roster, ImportStats};
