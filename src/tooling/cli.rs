//! CLI Tooling
//!
//! Command-line interface for a table build. Settings come from the config
//! layers first and are then overridden by flags; the build itself runs only once
//! every input has been opened.

use crate::config::{ConfigLoader, MsiToolConfig};
use crate::error::{MsiError, Result};
use crate::files::{apply_renames, DiskFileStore};
use crate::idt::{self, OutputOptions};
use crate::logging::LoggingConfig;
use crate::package::{PackageBuilder, PackageSettings, ProgramDirectory};
use crate::report::{format_summary_text, PackageSummary};
use crate::tree::ListingOptions;
use crate::uuids::{FileUuidSource, GeneratedUuidSource, UuidSource};
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

/// msi-tables - Windows Installer tables from directory listings
#[derive(Parser, Debug, Clone)]
#[command(name = "msi-tables", version)]
#[command(about = "Generate Windows Installer .idt tables from directory listings and a feature file")]
pub struct Cli {
    /// Prefix prepended to every generated identifier
    #[arg(short = 'p', long = "prefix")]
    pub prefix: Option<String>,

    /// Rename listed files to their file ids and write cablist.txt
    #[arg(short = 'r', long = "rename")]
    pub rename: bool,

    /// Program directory under Program Files, as SHORT|Long Name
    #[arg(short = 'd', long = "program-dir")]
    pub program_dir: Option<String>,

    /// Feature file (default: features.txt)
    #[arg(long)]
    pub features: Option<PathBuf>,

    /// UUID file, one UUID per line (default: uuids.txt)
    #[arg(long)]
    pub uuids: Option<PathBuf>,

    /// Generate random UUIDs instead of reading the UUID file
    #[arg(long)]
    pub generate_uuids: bool,

    /// Directory listed paths are relative to (default: .)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Directory the .idt files are written to (default: .)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Summary format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Enable verbose logging (same as --log-level debug)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Directory listings; the first is the primary root
    #[arg(value_name = "LISTING")]
    pub listings: Vec<PathBuf>,
}

impl Cli {
    /// Fold build flags into `config`.
    pub fn apply_to(&self, config: &mut MsiToolConfig) {
        let build = &mut config.build;
        if let Some(prefix) = &self.prefix {
            build.id_prefix = prefix.clone();
        }
        if self.rename {
            build.rename_files = true;
        }
        if let Some(program_dir) = &self.program_dir {
            build.program_dir = Some(program_dir.clone());
        }
        if let Some(features) = &self.features {
            build.features_file = features.clone();
        }
        if let Some(uuids) = &self.uuids {
            build.uuids_file = uuids.clone();
        }
        if self.generate_uuids {
            build.generate_uuids = true;
        }
        if let Some(source_root) = &self.source_root {
            build.source_root = source_root.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            build.output_dir = output_dir.clone();
        }
        if !self.listings.is_empty() {
            build.listings = self.listings.clone();
        }
        self.apply_logging(&mut config.logging);
    }

    fn apply_logging(&self, logging: &mut LoggingConfig) {
        if self.verbose {
            logging.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
    }
}

/// CLI context holding the merged configuration of one run
#[derive(Debug, Clone)]
pub struct CliContext {
    config: MsiToolConfig,
    format: String,
}

impl CliContext {
    /// Load configuration (from `config_path`, or `msi-tables.toml` in `config_dir`).
    pub fn new(config_dir: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(config_dir)?,
        };
        Ok(Self::from_config(config))
    }

    /// Load configuration from the working directory, overlay the logging environment,
    /// then apply every flag of `cli`.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut context = Self::new(Path::new("."), cli.config.as_deref())?;
        context.config.logging.apply_env()?;
        cli.apply_to(&mut context.config);
        context.format = cli.format.clone();
        Ok(context)
    }

    pub fn from_config(config: MsiToolConfig) -> Self {
        Self {
            config,
            format: "text".to_string(),
        }
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }

    pub fn config(&self) -> &MsiToolConfig {
        &self.config
    }

    fn settings(&self) -> Result<PackageSettings> {
        let build = &self.config.build;
        let program_dir = build.program_dir.as_deref().ok_or_else(|| {
            MsiError::Argument(
                "missing required program directory (-d SHORT|LONG or build.program_dir)"
                    .to_string(),
            )
        })?;
        if build.listings.is_empty() {
            return Err(MsiError::Argument(
                "at least one directory listing is required".to_string(),
            ));
        }
        Ok(PackageSettings {
            id_prefix: build.id_prefix.clone(),
            program_dir: ProgramDirectory::parse(program_dir)?,
            listing: ListingOptions {
                source_root: build.source_root.clone(),
                rename_files: build.rename_files,
            },
        })
    }

    fn uuid_source(&self) -> Result<Box<dyn UuidSource>> {
        let build = &self.config.build;
        if build.generate_uuids {
            return Ok(Box::new(GeneratedUuidSource));
        }
        Ok(Box::new(FileUuidSource::open(&build.uuids_file)?))
    }

    /// Build the tables, write them, then apply planned renames. Returns the summary.
    pub fn execute(&self) -> Result<String> {
        let settings = self.settings()?;
        let build = &self.config.build;

        let uuids = self.uuid_source()?;
        let listings = build
            .listings
            .iter()
            .map(|path| open_input(path).map(|reader| (path, reader)))
            .collect::<Result<Vec<_>>>()?;
        let features = open_input(&build.features_file)?;

        let mut builder = PackageBuilder::new(settings, uuids, Box::new(DiskFileStore));
        for (path, reader) in listings {
            builder.add_listing(&path.display().to_string(), reader)?;
        }
        let package =
            builder.assign_features(&build.features_file.display().to_string(), features)?;

        let cablist_dir = match (build.rename_files, package.primary_root_name()) {
            (true, Some(root)) => Some(build.source_root.join(root)),
            _ => None,
        };
        let rendered = idt::render_package(
            &package,
            &OutputOptions {
                output_dir: build.output_dir.clone(),
                cablist_dir,
            },
        );
        idt::write_rendered(&rendered)?;
        apply_renames(&DiskFileStore, &package.renames)?;
        info!(
            files = package.tables.files.len(),
            renamed = package.renames.len(),
            "Build complete"
        );

        let summary = PackageSummary::from_package(
            &package,
            rendered.into_iter().map(|file| file.path).collect(),
        );
        match self.format.as_str() {
            "json" => serde_json::to_string_pretty(&summary).map_err(|e| {
                MsiError::Resource(format!("Failed to serialize summary: {}", e))
            }),
            _ => Ok(format_summary_text(&summary)),
        }
    }
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(|e| {
        MsiError::Resource(format!("Could not open file: {}: {}", path.display(), e))
    })
}
