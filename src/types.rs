//! Core handle types shared by the tables and the directory forest.
//!
//! Rows and tree nodes refer to each other through these indices instead of
//! sharing string storage. Reassigning a reference replaces the index; the row
//! it pointed at is never touched.

/// Row index into the Directory table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectoryIdx(pub usize);

/// Row index into the Component table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentIdx(pub usize);

/// Row index into the File table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileIdx(pub usize);

/// Row index into the Feature table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureIdx(pub usize);

/// Handle of a node in the directory forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub usize);

/// A Directory column value: either a generated row or the program directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryRef {
    ProgramDir,
    Row(DirectoryIdx),
}
