//! Common utilities for the Tinct value engine.
//!
//! This crate provides shared infrastructure used by all Tinct components:
//! - **Warning System** - deduplicated diagnostics for degraded or unsupported input

pub mod warning;
