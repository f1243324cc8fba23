//! Feature pass: reads the feature file and links features to components.
//!
//! Runs after every listing has been merged into the [`DirectoryForest`], since item
//! paths refer into the finished directory trees.
//!
//! [`DirectoryForest`]: crate::tree::DirectoryForest

pub mod assigner;
pub mod resolve;

pub use assigner::FeatureAssigner;
pub use resolve::{resolve_path, Target};
