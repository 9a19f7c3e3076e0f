//! User confirmation handling for overwriting existing files.
//! The materializer asks through the `OverwritePrompt` trait; the
//! interactive implementation uses dialoguer, and a fixed-answer
//! implementation backs the `--force` flag and tests.

use dialoguer::Confirm;
use std::path::Path;

/// Capability for confirming the overwrite of an existing file.
///
/// Exactly one confirmation is requested per pre-existing target; the
/// boolean answer is the only value the materializer consumes.
pub trait OverwritePrompt {
    /// Returns true if the file at `path` may be overwritten.
    fn confirm_overwrite(&self, path: &Path) -> bool;
}

/// Interactive prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompt;

impl DialoguerPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl OverwritePrompt for DialoguerPrompt {
    fn confirm_overwrite(&self, path: &Path) -> bool {
        Confirm::new()
            .with_prompt(format!(
                "The file '{}' already exists. Do you want to replace it?",
                path.display()
            ))
            .default(false)
            .interact()
            // A failed prompt counts as a decline.
            .unwrap_or(false)
    }
}

/// Prompter that answers every confirmation with a fixed value.
#[derive(Debug)]
pub struct AutoConfirm(pub bool);

impl OverwritePrompt for AutoConfirm {
    fn confirm_overwrite(&self, _path: &Path) -> bool {
        self.0
    }
}
