//! msi-tables: Windows Installer tables from directory listings
//!
//! Reads one or more `ls -R` style listings into a directory forest, assigns the
//! listed files to features from a feature file of the same format, and renders the
//! Directory, Component, File, Feature, FeatureComponents and Media tables as
//! `.idt` text.

pub mod config;
pub mod error;
pub mod feature;
pub mod files;
pub mod idt;
pub mod logging;
pub mod package;
pub mod parser;
pub mod report;
pub mod tables;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod uuids;

#[cfg(test)]
mod testing;

pub use error::{MsiError, Result};
pub use package::{BuiltPackage, PackageBuilder, PackageSettings, ProgramDirectory};
