//! # geosync-rs
//!
//! Umbrella crate for the geosync workspace. Re-exports [`geosync_core`] so
//! the demos can be written against a single crate name.
pub use geosync_core::*;
