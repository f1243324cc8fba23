//! Integration tests for msi-tables

mod cli_pipeline;
mod malformed_input;
mod multi_root;
mod support;
