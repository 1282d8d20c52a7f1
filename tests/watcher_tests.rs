//! Watcher tests against the real OS notification source

use blink::{watch, BlinkError, ChangeEvent, PatternSet, WatchOptions};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc::Receiver;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

const WAIT: Duration = Duration::from_secs(5);

fn options() -> WatchOptions {
    WatchOptions::with_debounce(Duration::from_millis(30))
}

/// Collect changed paths until `wanted` shows up or the wait runs out
async fn wait_for(events: &mut Receiver<ChangeEvent>, wanted: &str) -> Vec<String> {
    let mut seen = Vec::new();
    let deadline = tokio::time::Instant::now() + WAIT;
    while let Ok(Some(event)) = tokio::time::timeout_at(deadline, events.recv()).await {
        if let Some(path) = event.path() {
            seen.push(path.to_string());
            if path.as_str() == wanted {
                break;
            }
        }
    }
    seen
}

#[tokio::test]
async fn test_missing_root_fails_at_startup() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = watch(
        &dir.path().join("missing"),
        Arc::new(PatternSet::default()),
        options(),
        CancellationToken::new(),
    )
    .unwrap_err();

    assert!(matches!(err, BlinkError::WatchRegistration { .. }));
}

#[tokio::test]
async fn test_file_change_is_reported_relative_to_root() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::create_dir(dir.path().join("libs")).expect("create libs");
    let cancel = CancellationToken::new();
    let mut events = watch(
        dir.path(),
        Arc::new(PatternSet::default()),
        options(),
        cancel.clone(),
    )
    .expect("watch");

    fs::write(dir.path().join("libs/helper.lua"), "return {}").expect("write helper");

    let seen = wait_for(&mut events, "libs/helper.lua").await;
    assert_eq!(seen.last().map(String::as_str), Some("libs/helper.lua"));
    cancel.cancel();
}

#[tokio::test]
async fn test_ignored_paths_produce_no_events() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::create_dir(dir.path().join(".git")).expect("create .git");
    let cancel = CancellationToken::new();
    let patterns = Arc::new(PatternSet::from_patterns(["*.bak"]).unwrap());
    let mut events = watch(dir.path(), patterns, options(), cancel.clone()).expect("watch");

    fs::write(dir.path().join("main.lua.bak"), "backup").expect("write bak");
    fs::write(dir.path().join(".git/index"), "idx").expect("write index");
    fs::write(dir.path().join("blink.toml"), "delay = 1").expect("write config");
    tokio::time::sleep(Duration::from_millis(100)).await;
    fs::write(dir.path().join("main.lua"), "print(1)").expect("write main");

    let seen = wait_for(&mut events, "main.lua").await;
    assert_eq!(seen.last().map(String::as_str), Some("main.lua"));
    assert!(seen.iter().all(|path| path == "main.lua"), "unexpected events: {seen:?}");
    cancel.cancel();
}

#[tokio::test]
async fn test_new_directory_is_watched() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let cancel = CancellationToken::new();
    let mut events = watch(
        dir.path(),
        Arc::new(PatternSet::default()),
        options(),
        cancel.clone(),
    )
    .expect("watch");

    fs::create_dir(dir.path().join("modules")).expect("create modules");
    let seen = wait_for(&mut events, "modules").await;
    assert!(seen.contains(&"modules".to_string()));

    fs::write(dir.path().join("modules/core.lua"), "core").expect("write core");
    let seen = wait_for(&mut events, "modules/core.lua").await;
    assert!(seen.contains(&"modules/core.lua".to_string()));
    cancel.cancel();
}

#[tokio::test]
async fn test_directory_moved_into_tree_is_watched() {
    let outside = TempDir::new().expect("Failed to create temp dir");
    fs::create_dir_all(outside.path().join("mods/ui")).expect("create outside dirs");
    fs::write(outside.path().join("mods/ui/frame.lua"), "frame").expect("write frame");

    let dir = TempDir::new().expect("Failed to create temp dir");
    let cancel = CancellationToken::new();
    let mut events = watch(
        dir.path(),
        Arc::new(PatternSet::default()),
        options(),
        cancel.clone(),
    )
    .expect("watch");

    fs::rename(outside.path().join("mods"), dir.path().join("mods")).expect("move in");
    let seen = wait_for(&mut events, "mods").await;
    assert!(seen.contains(&"mods".to_string()));

    fs::write(dir.path().join("mods/core.lua"), "core").expect("write core");
    let seen = wait_for(&mut events, "mods/core.lua").await;
    assert!(seen.contains(&"mods/core.lua".to_string()));

    fs::write(dir.path().join("mods/ui/frame.lua"), "frame v2").expect("write frame");
    let seen = wait_for(&mut events, "mods/ui/frame.lua").await;
    assert!(seen.contains(&"mods/ui/frame.lua".to_string()));
    cancel.cancel();
}

#[tokio::test]
async fn test_directory_renamed_inside_tree_is_watched() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::create_dir(dir.path().join("before")).expect("create before");
    let cancel = CancellationToken::new();
    let mut events = watch(
        dir.path(),
        Arc::new(PatternSet::default()),
        options(),
        cancel.clone(),
    )
    .expect("watch");

    fs::rename(dir.path().join("before"), dir.path().join("after")).expect("rename");
    let seen = wait_for(&mut events, "after").await;
    assert!(seen.contains(&"after".to_string()));

    fs::write(dir.path().join("after/x.lua"), "x").expect("write x");
    let seen = wait_for(&mut events, "after/x.lua").await;
    assert!(seen.contains(&"after/x.lua".to_string()));
    cancel.cancel();
}

#[tokio::test]
async fn test_cancel_closes_the_queue() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let cancel = CancellationToken::new();
    let mut events = watch(
        dir.path(),
        Arc::new(PatternSet::default()),
        options(),
        cancel.clone(),
    )
    .expect("watch");

    cancel.cancel();
    let closed = timeout(WAIT, events.recv()).await.expect("queue closes in time");
    assert!(closed.is_none());
}
