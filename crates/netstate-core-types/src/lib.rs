//! Core types shared across netstate facilities
//!
//! This crate provides the canonical field keys and event names used by the
//! logging facility in `netstate-core` and by every caller of its macros.

pub mod schema;
