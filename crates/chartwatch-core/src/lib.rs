//! Chartwatch Core - the pure leaf logic of the chart freshness monitor
//!
//! This crate holds the two pieces of chartwatch with no I/O at all:
//! - [`version`]: semantic-version comparison with an explicit
//!   incomparability verdict
//! - [`source`]: extraction of well-formed Helm source descriptors from
//!   loosely-typed application records

pub mod source;
pub mod version;

pub use source::{HelmSource, helm_sources};
pub use version::{Comparison, compare};
