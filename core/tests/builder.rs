use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use xtree_core::{AppError, BuildOptions, build_tree, find_paths, print_tree};

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"").unwrap();
}

fn fixture() -> TempDir {
    let dir = tempfile::Builder::new().prefix("fixture").tempdir().unwrap();
    let root = dir.path();
    touch(root, "README.md");
    touch(root, "Cargo.toml");
    touch(root, "src/lib.rs");
    touch(root, "src/2_second.rs");
    touch(root, "src/1_first.rs");
    touch(root, "src/nested/deep/file.rs");
    touch(root, "target/debug/app");
    dir
}

// Global git excludes on the host must not leak into expectations.
fn local_only() -> BuildOptions {
    BuildOptions {
        use_gitignore: false,
        ..BuildOptions::default()
    }
}

fn build(dir: &TempDir, options: &BuildOptions) -> String {
    let tree = build_tree(dir.path(), options).unwrap();
    print_tree(&tree)
        .lines()
        .skip(1)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn sorts_directories_first_and_indexed_before_plain() {
    let dir = fixture();
    let text = build(&dir, &local_only());
    let expected = "\
├── src
│   ├── nested
│   │   └── deep
│   │       └── file.rs
│   ├── 1_first.rs
│   ├── 2_second.rs
│   └── lib.rs
├── target
│   └── debug
│       └── app
├── Cargo.toml
└── README.md";
    assert_eq!(text, expected);
}

#[test]
fn exclude_drops_whole_directories() {
    let dir = fixture();
    let options = BuildOptions {
        exclude: vec!["^target$".to_string()],
        ..local_only()
    };
    let text = build(&dir, &options);
    assert!(!text.contains("target"));
    assert!(text.contains("lib.rs"));
}

#[test]
fn include_keeps_matching_files_and_prunes_empty_directories() {
    let dir = fixture();
    let options = BuildOptions {
        include: vec![r"\.rs$".to_string()],
        ..local_only()
    };
    let text = build(&dir, &options);
    assert!(text.contains("file.rs"));
    assert!(!text.contains("README.md"));
    assert!(!text.contains("target"));
}

#[test]
fn depth_limit_reports_hidden_entry_counts() {
    let dir = fixture();
    let options = BuildOptions {
        max_depth: Some(1),
        ..local_only()
    };
    let text = build(&dir, &options);
    assert!(text.contains("src (...4 collapsed)"), "{text}");
    assert!(text.contains("target (...1 collapsed)"), "{text}");
    assert!(!text.contains("lib.rs"));
}

#[test]
fn expand_overrides_depth_limit() {
    let dir = fixture();
    let options = BuildOptions {
        max_depth: Some(1),
        expand: vec!["^src$".to_string()],
        ..local_only()
    };
    let text = build(&dir, &options);
    assert!(text.contains("lib.rs"), "{text}");
    assert!(text.contains("nested (...1 collapsed)"), "{text}");
    assert!(text.contains("target (...1 collapsed)"), "{text}");
}

#[test]
fn entry_cap_keeps_first_entries() {
    let dir = fixture();
    let options = BuildOptions {
        max_entries: Some(2),
        ..local_only()
    };
    let tree = build_tree(dir.path(), &options).unwrap();
    let src = &tree.children[0];
    assert_eq!(src.name, "src");
    let names: Vec<String> = src.children.iter().map(|c| c.raw_name()).collect();
    assert_eq!(names, vec!["nested", "1_first.rs"]);
    assert_eq!(src.collapsed_leaf_children, 2);
    assert_eq!(tree.children.len(), 2);
    assert_eq!(tree.collapsed_leaf_children, 2);
}

#[test]
fn gitignore_is_honoured() {
    let dir = fixture();
    fs::write(dir.path().join(".gitignore"), "target/\n").unwrap();
    let text = build(&dir, &BuildOptions::default());
    assert!(!text.contains("target"), "{text}");

    let options = BuildOptions {
        use_gitignore: false,
        show_hidden: true,
        ..local_only()
    };
    let text = build(&dir, &options);
    assert!(text.contains("target"), "{text}");
    assert!(text.contains(".gitignore"), "{text}");
}

#[test]
fn invalid_pattern_fails_before_walking() {
    let options = BuildOptions {
        include: vec!["[".to_string()],
        ..BuildOptions::default()
    };
    let err = build_tree(Path::new("/definitely/not/here"), &options).unwrap_err();
    assert!(matches!(err, AppError::InvalidPattern(_)));
}

#[test]
fn missing_root_is_an_error() {
    let err = build_tree(Path::new("/definitely/not/here"), &BuildOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[test]
fn found_paths_name_real_entries() {
    let dir = tempfile::Builder::new().prefix("fixture").tempdir().unwrap();
    touch(dir.path(), "steps/007_first.txt");
    touch(dir.path(), "steps/8_second.txt");
    let tree = build_tree(dir.path(), &local_only()).unwrap();

    let found = find_paths(&tree, &["steps", "first.txt"]);
    assert_eq!(found.len(), 1);
    let relative: Vec<&str> = found[0][1..].iter().map(String::as_str).collect();
    assert_eq!(relative, vec!["steps", "007_first.txt"]);
    assert!(dir.path().join(relative.join("/")).is_file());

    let text = print_tree(&tree);
    assert!(text.contains("├── 007_first.txt\n"), "{text}");
}
