//! Treeforge turns tree-style text layouts into real directory structures.
//! It parses indentation and tree-drawing glyphs into an ordered hierarchy
//! of folders and files, then materializes that hierarchy on disk with
//! per-entry failure tolerance and a timestamped action journal.

/// Command-line interface module for the Treeforge application
pub mod cli;

/// Error types and handling for the Treeforge application
pub mod error;

/// Append-only timestamped journal of materialization actions
pub mod journal;

/// Filesystem materialization of parsed hierarchies
/// Creates directories and empty files, journaling every action
pub mod materializer;

/// Tree-text parsing functionality
/// Reconstructs nesting from indentation and tree-drawing glyphs
pub mod parser;

/// User confirmation handling for overwriting existing files
pub mod prompt;

/// Hierarchy data model and its JSON representation
/// Containers are nested objects, files are null values
pub mod structure;
