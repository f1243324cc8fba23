//! Tab-separated installer table (`.idt`) rendering.
//!
//! Every table starts with three header lines: column names, column types, then
//! the table name followed by its key columns. Rows are written in table order.
//! Rendering never touches the filesystem; [`write_rendered`] does that once
//! everything rendered successfully.

use crate::error::{MsiError, Result};
use crate::package::BuiltPackage;
use crate::types::DirectoryRef;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DIRECTORY_HEADER: &str = "Directory\tDirectory_Parent\tDefaultDir\n\
s72\tS72\tl255\n\
Directory\tDirectory\n";

const COMPONENT_HEADER: &str = "Component\tComponentId\tDirectory_\tAttributes\tCondition\tKeyPath\n\
s72\tS38\ts72\ti2\tS255\tS72\n\
Component\tComponent\n";

const FILE_HEADER: &str = "File\tComponent_\tFileName\tFileSize\tVersion\tLanguage\tAttributes\tSequence\n\
s72\ts72\tl255\ti4\tS72\tS20\tI2\ti2\n\
File\tFile\n";

const FEATURE_HEADER: &str = "Feature\tFeature_Parent\tTitle\tDescription\tDisplay\tLevel\tDirectory_\tAttributes\n\
s38\tS38\tL64\tL255\tI2\ti2\tS72\ti2\n\
Feature\tFeature\n";

const FEATURE_COMPONENTS_HEADER: &str = "Feature_\tComponent_\n\
s38\ts72\n\
FeatureComponents\tFeature_\tComponent_\n";

const MEDIA_HEADER: &str = "DiskId\tLastSequence\tDiskPrompt\tCabinet\tVolumeLabel\tSource\n\
i2\ti2\tL64\tS255\tS32\tS72\n\
Media\tDiskId\n";

pub const CABLIST_FILE: &str = "cablist.txt";
pub const RENAMES_FILE: &str = "renames.txt";

/// Where rendered files go.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub output_dir: PathBuf,
    /// Directory receiving `cablist.txt`; `None` when files are not renamed
    pub cablist_dir: Option<PathBuf>,
}

/// One output file, fully rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub contents: String,
}

fn directory_id(package: &BuiltPackage, reference: DirectoryRef) -> &str {
    match reference {
        DirectoryRef::ProgramDir => &package.program_dir.id,
        DirectoryRef::Row(idx) => &package.tables.directory(idx).id,
    }
}

pub fn render_directory(package: &BuiltPackage) -> String {
    let program_dir = &package.program_dir;
    let mut out = String::from(DIRECTORY_HEADER);
    out.push_str("TARGETDIR\t\tSourceDir\n");
    out.push_str("ProgramFilesFolder\tTARGETDIR\t.\n");
    let _ = writeln!(
        out,
        "{}\tProgramFilesFolder\t{}",
        program_dir.id,
        program_dir.default_dir()
    );
    for row in &package.tables.directories {
        match row.parent {
            // The primary root is the program directory itself.
            DirectoryRef::ProgramDir => {
                let _ = writeln!(out, "{}\t{}\t.", row.id, program_dir.id);
            }
            DirectoryRef::Row(_) => {
                let _ = writeln!(
                    out,
                    "{}\t{}\t{}|{}",
                    row.id,
                    directory_id(package, row.parent),
                    row.id,
                    row.name
                );
            }
        }
    }
    out
}

pub fn render_component(package: &BuiltPackage) -> String {
    let tables = &package.tables;
    let mut out = String::from(COMPONENT_HEADER);
    for row in &tables.components {
        let key_path = row
            .key_file
            .map(|file| tables.file(file).id.as_str())
            .unwrap_or("");
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.id,
            row.uuid,
            tables.directory(row.directory).id,
            row.attributes,
            row.condition,
            key_path
        );
    }
    out
}

pub fn render_file(package: &BuiltPackage) -> String {
    let tables = &package.tables;
    let mut out = String::from(FILE_HEADER);
    for row in &tables.files {
        let _ = writeln!(
            out,
            "{}\t{}\t{}|{}\t{}\t{}\t{}\t{}\t{}",
            row.id,
            tables.component(row.component).id,
            row.id,
            row.name,
            row.size,
            row.version,
            row.language,
            row.attributes,
            row.sequence
        );
    }
    out
}

pub fn render_feature(package: &BuiltPackage) -> String {
    let tables = &package.tables;
    let mut out = String::from(FEATURE_HEADER);
    for row in &tables.features {
        let parent = row
            .parent
            .map(|parent| tables.feature(parent).id.as_str())
            .unwrap_or("");
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.id,
            parent,
            row.title,
            row.description,
            row.display,
            row.level,
            directory_id(package, row.directory),
            row.attributes
        );
    }
    out
}

pub fn render_feature_components(package: &BuiltPackage) -> String {
    let tables = &package.tables;
    let mut out = String::from(FEATURE_COMPONENTS_HEADER);
    for row in &tables.feature_components {
        let _ = writeln!(
            out,
            "{}\t{}",
            tables.feature(row.feature).id,
            tables.component(row.component).id
        );
    }
    out
}

/// Single cabinet holding every file
pub fn render_media(package: &BuiltPackage) -> String {
    let mut out = String::from(MEDIA_HEADER);
    let _ = writeln!(
        out,
        "1\t{}\t\t#{}archive.cab\t\t",
        package.tables.files.len(),
        package.id_prefix()
    );
    out
}

/// File ids in sequence order, one per line
pub fn render_cablist(package: &BuiltPackage) -> String {
    package
        .tables
        .files
        .iter()
        .map(|file| format!("{}\n", file.id))
        .collect()
}

pub fn render_renames(package: &BuiltPackage) -> String {
    package
        .renames
        .iter()
        .map(|rename| format!("{}\t{}\n", rename.from.display(), rename.to.display()))
        .collect()
}

/// Render every output file of `package` without writing anything.
pub fn render_package(package: &BuiltPackage, options: &OutputOptions) -> Vec<RenderedFile> {
    let dir = &options.output_dir;
    let mut files = vec![
        RenderedFile {
            path: dir.join("Directory.idt"),
            contents: render_directory(package),
        },
        RenderedFile {
            path: dir.join("Component.idt"),
            contents: render_component(package),
        },
        RenderedFile {
            path: dir.join("File.idt"),
            contents: render_file(package),
        },
        RenderedFile {
            path: dir.join("Feature.idt"),
            contents: render_feature(package),
        },
        RenderedFile {
            path: dir.join("FeatureComponents.idt"),
            contents: render_feature_components(package),
        },
        RenderedFile {
            path: dir.join("Media.idt"),
            contents: render_media(package),
        },
    ];
    if let Some(cablist_dir) = &options.cablist_dir {
        files.push(RenderedFile {
            path: cablist_dir.join(CABLIST_FILE),
            contents: render_cablist(package),
        });
        files.push(RenderedFile {
            path: dir.join(RENAMES_FILE),
            contents: render_renames(package),
        });
    }
    files
}

fn write_one(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                MsiError::Resource(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    fs::write(path, contents).map_err(|e| {
        MsiError::Resource(format!("Failed to write {}: {}", path.display(), e))
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.partial", name))
}

fn discard(staged: &[PathBuf]) {
    for path in staged {
        if let Err(e) = fs::remove_file(path) {
            debug!(path = %path.display(), error = %e, "Could not remove staged file");
        }
    }
}

/// Write every rendered file under a staging name next to its target, then move
/// them all into place. If any write fails, staged files are removed and no
/// target is touched.
pub fn write_rendered(files: &[RenderedFile]) -> Result<()> {
    let mut staged = Vec::with_capacity(files.len());
    for file in files {
        let partial = staging_path(&file.path);
        debug!(path = %file.path.display(), bytes = file.contents.len(), "Staging");
        if let Err(e) = write_one(&partial, &file.contents) {
            staged.push(partial);
            discard(&staged);
            return Err(e);
        }
        staged.push(partial);
    }
    for (partial, file) in staged.iter().zip(files) {
        fs::rename(partial, &file.path).map_err(|e| {
            MsiError::Resource(format!("Failed to write {}: {}", file.path.display(), e))
        })?;
    }
    info!(count = files.len(), "Tables written");
    Ok(())
}
