//! Config composition: defaults, file sources, environment overlay.

pub mod merge_policy;
pub mod service;
