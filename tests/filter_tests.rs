//! Pattern compilation from the files found at a source root

use blink::filter::{GITIGNORE_FILE, PKGMETA_FILE};
use blink::{BlinkError, IgnoreOptions, PatternSet};
use std::fs;
use tempfile::TempDir;

fn source_with(gitignore: &str, pkgmeta: &str) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join(GITIGNORE_FILE), gitignore).expect("write gitignore");
    fs::write(dir.path().join(PKGMETA_FILE), pkgmeta).expect("write pkgmeta");
    dir
}

const PKGMETA: &str = "\
package-as: MyAddon

ignore:
  - README.md
    - tests/
\t- *.psd

externals:
  libs/LibStub: https://example.invalid/libstub
";

#[test]
fn test_compile_unions_all_sources() {
    let dir = source_with("# build output\n*.log\n/dist/\n!keep.log\n", PKGMETA);
    let options = IgnoreOptions {
        extra: vec!["*.bak".to_string()],
        ..IgnoreOptions::default()
    };

    let set = PatternSet::compile(dir.path(), &options).expect("compile");

    assert_eq!(
        set.patterns().collect::<Vec<_>>(),
        vec![
            ".git/",
            "blink.toml",
            "*.log",
            "/dist/",
            "README.md",
            "tests/",
            "*.psd",
            "*.bak"
        ]
    );

    for ignored in [
        ".git/objects/ab",
        "blink.toml",
        "sub/blink.toml",
        "logs/keep.log",
        "dist/Addon.zip",
        "README.md",
        "tests/unit/a.lua",
        "art/icon.psd",
        "main.lua.bak",
    ] {
        assert!(set.should_ignore(ignored), "{ignored} should be ignored");
    }

    for kept in ["main.lua", "libs/LibStub/LibStub.lua", ".gitignore", ".pkgmeta", "docs/README.txt"] {
        assert!(!set.should_ignore(kept), "{kept} should be kept");
    }
}

#[test]
fn test_missing_optional_files_contribute_nothing() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let set = PatternSet::compile(dir.path(), &IgnoreOptions::default()).expect("compile");
    assert_eq!(set.len(), 2);
}

#[test]
fn test_pkgmeta_block_ends_at_next_top_level_key() {
    let dir = source_with("", PKGMETA);
    let set = PatternSet::compile(dir.path(), &IgnoreOptions::default()).expect("compile");
    assert!(!set.should_ignore("libs/LibStub"));
    assert!(!set.patterns().any(|p| p.contains("LibStub")));
}

#[test]
fn test_directory_rule_covers_everything_beneath() {
    let set = PatternSet::from_patterns(["libs/"]).unwrap();

    assert!(set.should_ignore("libs"));
    assert!(set.should_ignore("libs/a/b/c.lua"));
    assert!(set.should_ignore("nested/libs/x.lua"));
    assert!(!set.should_ignore("mylibs/x.lua"));
    assert!(!set.should_ignore("libs.lua"));
}

#[test]
fn test_multi_segment_directory_rule() {
    let set = PatternSet::from_patterns(["assets/raw/"]).unwrap();

    assert!(set.should_ignore("assets/raw"));
    assert!(set.should_ignore("assets/raw/big.tga"));
    assert!(set.should_ignore("addon/assets/raw/big.tga"));
    assert!(!set.should_ignore("assets/final/big.tga"));
    assert!(!set.should_ignore("raw/assets/x"));
}

#[test]
fn test_glob_does_not_cross_separators() {
    let set = PatternSet::from_patterns(["docs/*.md"]).unwrap();

    assert!(set.should_ignore("docs/guide.md"));
    assert!(!set.should_ignore("docs/deep/guide.md"));
    assert!(!set.should_ignore("guide.md"));
}

#[test]
fn test_backslash_paths_match_like_forward_slashes() {
    let set = PatternSet::from_patterns(["libs/", "*.tmp"]).unwrap();
    assert!(set.should_ignore("libs\\helper.lua"));
    assert!(set.should_ignore("a\\b\\c.tmp"));
    assert!(!set.should_ignore("src\\main.lua"));
}

#[test]
fn test_invalid_configured_pattern_is_reported() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let options = IgnoreOptions {
        extra: vec!["{unclosed".to_string()],
        ..IgnoreOptions::default()
    };

    let err = PatternSet::compile(dir.path(), &options).unwrap_err();
    assert!(matches!(err, BlinkError::InvalidPattern { .. }));
    assert!(err.is_startup_error());
}
