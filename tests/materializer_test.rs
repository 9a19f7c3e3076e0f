use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;
use treeforge::journal::MaterializationLog;
use treeforge::materializer::Materializer;
use treeforge::parser::parse_tree_structure;
use treeforge::prompt::AutoConfirm;
use treeforge::structure::{decode_structure, to_pretty_json};
use walkdir::WalkDir;

/// Collects the relative paths created under `base`, directories marked
/// with a trailing slash, sorted for comparison.
fn layout(base: &Path) -> Vec<String> {
    let mut entries: Vec<String> = WalkDir::new(base)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(base)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            if entry.file_type().is_dir() {
                format!("{}/", relative)
            } else {
                relative
            }
        })
        .collect();
    entries.sort();
    entries
}

fn has_entry(journal: &MaterializationLog, needle: &str) -> bool {
    journal.entries().iter().any(|entry| entry.contains(needle))
}

#[test]
fn test_creates_example_layout() {
    let temp = TempDir::new().unwrap();
    let structure = parse_tree_structure("project/\n    src/\n        main.ext\n    readme");
    let prompt = AutoConfirm(true);
    let mut journal = MaterializationLog::new();

    Materializer::new(&prompt).materialize_project(temp.path(), &structure, &mut journal);

    assert!(temp.path().join("project").is_dir());
    assert!(temp.path().join("project/src").is_dir());

    let main_ext = temp.path().join("project/src/main.ext");
    assert!(main_ext.is_file());
    assert_eq!(fs::read_to_string(&main_ext).unwrap(), "");

    // The dotless entry was classified as a container and becomes a folder.
    assert!(temp.path().join("project/readme").is_dir());

    // Root folder, src, main.ext, readme, plus the completion entry.
    assert_eq!(journal.entries().len(), 5);
    assert!(journal
        .entries()
        .last()
        .unwrap()
        .ends_with("Project structure creation completed."));
}

#[test]
fn test_entries_are_timestamped() {
    let temp = TempDir::new().unwrap();
    let structure = parse_tree_structure("a/\n    b.txt");
    let prompt = AutoConfirm(true);
    let mut journal = MaterializationLog::new();

    Materializer::new(&prompt).materialize_project(temp.path(), &structure, &mut journal);

    for entry in journal.entries() {
        let bytes = entry.as_bytes();
        assert_eq!(bytes[0], b'[');
        assert_eq!(bytes[9], b']');
        assert_eq!(bytes[3], b':');
        assert_eq!(bytes[6], b':');
    }
}

#[test]
fn test_declined_overwrite_preserves_content() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("project/src")).unwrap();
    let main_ext = temp.path().join("project/src/main.ext");
    fs::write(&main_ext, "keep me").unwrap();

    let structure = parse_tree_structure("project/\n    src/\n        main.ext\n    readme");
    let prompt = AutoConfirm(false);
    let mut journal = MaterializationLog::new();

    Materializer::new(&prompt).materialize_project(temp.path(), &structure, &mut journal);

    assert_eq!(fs::read_to_string(&main_ext).unwrap(), "keep me");
    assert!(has_entry(&journal, "Skipped existing file:"));

    // The non-existent sibling is still created.
    assert!(temp.path().join("project/readme").is_dir());
}

#[test]
fn test_confirmed_overwrite_truncates() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("old.txt");
    fs::write(&target, "stale content").unwrap();

    let structure = decode_structure(r#"{"old.txt": null, "new.txt": null}"#).unwrap();
    let prompt = AutoConfirm(true);
    let mut journal = MaterializationLog::new();

    Materializer::new(&prompt).materialize(temp.path(), &structure, &mut journal);

    assert_eq!(fs::read_to_string(&target).unwrap(), "");
    assert!(temp.path().join("new.txt").is_file());
    assert!(has_entry(&journal, "Created file:"));
}

#[test]
fn test_existing_folders_are_not_relogged() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("a/b")).unwrap();

    let structure = decode_structure(r#"{"a": {"b": {}}}"#).unwrap();
    let prompt = AutoConfirm(true);
    let mut journal = MaterializationLog::new();

    Materializer::new(&prompt).materialize(temp.path(), &structure, &mut journal);

    // Only the completion entry; nothing was created or altered.
    assert_eq!(journal.entries().len(), 1);
}

#[test]
fn test_blocked_subtree_does_not_stop_siblings() {
    let temp = TempDir::new().unwrap();
    // A plain file occupies the container's path, so everything nested
    // beneath it fails while the rest of the tree proceeds.
    fs::write(temp.path().join("blocker"), "").unwrap();

    let text = "blocker/\n    inner/\n    deep.txt\nfree/\n    kept.txt";
    let structure = parse_tree_structure(text);
    let prompt = AutoConfirm(true);
    let mut journal = MaterializationLog::new();

    Materializer::new(&prompt).materialize(temp.path(), &structure, &mut journal);

    assert!(has_entry(&journal, "Error creating folder"));
    assert!(has_entry(&journal, "OS error while creating file"));
    assert!(temp.path().join("free/kept.txt").is_file());
    assert!(has_entry(&journal, "Project structure creation completed."));
}

#[cfg(unix)]
#[test]
fn test_permission_denied_logged_distinctly() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let locked = temp.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    // Root bypasses permission bits; nothing to observe in that case.
    if fs::File::create(locked.join("probe")).is_ok() {
        return;
    }

    let structure = decode_structure(r#"{"locked": {"file.txt": null}}"#).unwrap();
    let prompt = AutoConfirm(true);
    let mut journal = MaterializationLog::new();

    Materializer::new(&prompt).materialize(temp.path(), &structure, &mut journal);

    assert!(has_entry(&journal, "Permission denied while creating file:"));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_materialize_value_accepts_decoded_json() {
    let temp = TempDir::new().unwrap();
    let prompt = AutoConfirm(true);
    let mut journal = MaterializationLog::new();

    let value = json!({"a": {"b.txt": null}});
    Materializer::new(&prompt).materialize_value(temp.path(), &value, &mut journal);

    assert!(temp.path().join("a/b.txt").is_file());
    assert!(has_entry(&journal, "Project structure creation completed."));
}

#[test]
fn test_materialize_value_rejects_malformed_mapping() {
    let temp = TempDir::new().unwrap();
    let prompt = AutoConfirm(true);
    let mut journal = MaterializationLog::new();

    let value = json!({"a": 5});
    Materializer::new(&prompt).materialize_value(temp.path(), &value, &mut journal);

    assert_eq!(journal.entries().len(), 1);
    assert!(has_entry(&journal, "Failed to create project structure:"));
    assert!(layout(temp.path()).is_empty());
}

#[test]
fn test_root_handling_single_container_nests() {
    let temp = TempDir::new().unwrap();
    let structure = parse_tree_structure("only/\n    file.txt");
    let prompt = AutoConfirm(true);
    let mut journal = MaterializationLog::new();

    Materializer::new(&prompt).materialize_project(temp.path(), &structure, &mut journal);

    assert!(has_entry(&journal, "Created root folder:"));
    assert!(temp.path().join("only/file.txt").is_file());
}

#[test]
fn test_root_handling_multiple_top_level_keys() {
    let temp = TempDir::new().unwrap();
    let structure = parse_tree_structure("a/\nb/");
    let prompt = AutoConfirm(true);
    let mut journal = MaterializationLog::new();

    Materializer::new(&prompt).materialize_project(temp.path(), &structure, &mut journal);

    assert!(!has_entry(&journal, "Created root folder:"));
    assert!(temp.path().join("a").is_dir());
    assert!(temp.path().join("b").is_dir());
}

#[test]
fn test_root_handling_single_leaf_stays_at_base() {
    let temp = TempDir::new().unwrap();
    let structure = decode_structure(r#"{"only.txt": null}"#).unwrap();
    let prompt = AutoConfirm(true);
    let mut journal = MaterializationLog::new();

    Materializer::new(&prompt).materialize_project(temp.path(), &structure, &mut journal);

    assert!(!has_entry(&journal, "Created root folder:"));
    assert!(temp.path().join("only.txt").is_file());
}

#[test]
fn test_parse_and_round_trip_materialize_identically() {
    let text = "project/\n    src/\n        main.ext\n    assets/\n        logo.svg";
    let parsed = parse_tree_structure(text);
    let round_tripped = decode_structure(&to_pretty_json(&parsed).unwrap()).unwrap();

    let prompt = AutoConfirm(true);

    let direct = TempDir::new().unwrap();
    let mut journal = MaterializationLog::new();
    Materializer::new(&prompt).materialize_project(direct.path(), &parsed, &mut journal);

    let via_json = TempDir::new().unwrap();
    let mut journal = MaterializationLog::new();
    Materializer::new(&prompt).materialize_project(via_json.path(), &round_tripped, &mut journal);

    assert_eq!(layout(direct.path()), layout(via_json.path()));
}
