//! Filesystem materialization of parsed hierarchies.
//! Walks a hierarchy and a base path, creating directories and empty
//! files. Every action and every failure becomes one journal entry;
//! no failure aborts the walk.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use crate::error::MaterializeFailure;
use crate::journal::Journal;
use crate::prompt::OverwritePrompt;
use crate::structure::{HierarchyNode, Structure};

/// Applies a hierarchy to the filesystem.
///
/// The materializer holds only its injected overwrite-confirmation
/// capability; the journal is supplied per call and owned by the
/// caller. Directory creation is idempotent and pre-existing
/// directories are left untouched; files are created empty, overwriting
/// content only on explicit confirmation.
pub struct Materializer<'a> {
    prompt: &'a dyn OverwritePrompt,
}

impl<'a> Materializer<'a> {
    pub fn new(prompt: &'a dyn OverwritePrompt) -> Self {
        Self { prompt }
    }

    /// Creates the given structure under `base_path`, which is assumed
    /// to exist, and appends a completion entry when the walk is done.
    pub fn materialize(&self, base_path: &Path, structure: &Structure, journal: &mut dyn Journal) {
        self.walk(base_path, structure, journal);
        journal.emit("Project structure creation completed.");
    }

    /// Accepts an already-decoded JSON value as hierarchy input.
    ///
    /// A value that does not decode to a structure yields a single
    /// failure entry and no filesystem access.
    pub fn materialize_value(
        &self,
        base_path: &Path,
        value: &serde_json::Value,
        journal: &mut dyn Journal,
    ) {
        match crate::structure::structure_from_value(value) {
            Ok(structure) => self.materialize(base_path, &structure, journal),
            Err(err) => {
                journal.emit(&MaterializeFailure::Structure(err.to_string()).to_string());
            }
        }
    }

    /// Materializes with root handling: when the structure has exactly
    /// one top-level container, that container is the project root. It
    /// is created directly under `base_path` first, and its children
    /// are materialized beneath it. Any other shape is materialized
    /// under `base_path` directly.
    pub fn materialize_project(
        &self,
        base_path: &Path,
        structure: &Structure,
        journal: &mut dyn Journal,
    ) {
        if structure.len() == 1 {
            if let Some((root_name, root_node)) = structure.first() {
                if let Some(children) = root_node.children() {
                    let root_path = base_path.join(root_name);
                    if !root_path.exists() {
                        match fs::create_dir_all(&root_path) {
                            Ok(()) => {
                                journal
                                    .emit(&format!("Created root folder: {}", root_path.display()));
                            }
                            Err(err) => {
                                journal.emit(
                                    &MaterializeFailure::FolderCreation {
                                        path: root_path.clone(),
                                        source: err,
                                    }
                                    .to_string(),
                                );
                            }
                        }
                    }
                    self.materialize(&root_path, children, journal);
                    return;
                }
            }
        }
        self.materialize(base_path, structure, journal);
    }

    fn walk(&self, base_path: &Path, structure: &Structure, journal: &mut dyn Journal) {
        for (name, node) in structure {
            let current_path = base_path.join(name);
            match node {
                HierarchyNode::Container(children) => {
                    if !current_path.exists() {
                        if let Err(err) = fs::create_dir_all(&current_path) {
                            journal.emit(
                                &MaterializeFailure::FolderCreation {
                                    path: current_path.clone(),
                                    source: err,
                                }
                                .to_string(),
                            );
                            // The subtree is unreachable; move on to the
                            // next sibling.
                            continue;
                        }
                        journal.emit(&format!("Created folder: {}", current_path.display()));
                    }
                    self.walk(&current_path, children, journal);
                }
                HierarchyNode::Leaf => self.create_file(&current_path, journal),
            }
        }
    }

    fn create_file(&self, path: &Path, journal: &mut dyn Journal) {
        if path.exists() && !self.prompt.confirm_overwrite(path) {
            journal.emit(&format!("Skipped existing file: {}", path.display()));
            return;
        }

        debug!("Creating empty file: {}", path.display());
        match fs::File::create(path) {
            Ok(_) => journal.emit(&format!("Created file: {}", path.display())),
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                journal.emit(
                    &MaterializeFailure::FilePermission { path: path.to_path_buf() }.to_string(),
                );
            }
            Err(err) => {
                journal.emit(
                    &MaterializeFailure::FileOs { path: path.to_path_buf(), source: err }
                        .to_string(),
                );
            }
        }
    }
}
