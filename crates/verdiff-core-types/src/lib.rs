//! Core types shared across verdiff facilities
//!
//! This crate holds the canonical field keys and event names used by the
//! logging macros in `verdiff-core` and by tests asserting on captured events.

pub mod schema;
