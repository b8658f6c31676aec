//! Tests for the tier database layout

use std::path::Path;
use tempfile::TempDir;
use typegate_core::cache::remove_database;
use typegate_core::{CacheLayout, Tier};

#[test]
fn test_shared_tiers_live_in_user_cache() {
    let layout = CacheLayout::new("/home/u/.cache/typegate", "/proj/_build/dev");
    assert_eq!(
        layout.database_path(Tier::Platform, "platform-26_build-14.2"),
        Path::new("/home/u/.cache/typegate/platform-26_build-14.2.tgdb")
    );
    assert_eq!(
        layout.database_path(Tier::LanguageCore, "k"),
        Path::new("/home/u/.cache/typegate/k.tgdb")
    );
}

#[test]
fn test_dependencies_tier_lives_in_project_output() {
    let layout = CacheLayout::new("/home/u/.cache/typegate", "/proj/_build/dev");
    assert_eq!(
        layout.database_path(Tier::ProjectDependencies, "abc_-"),
        Path::new("/proj/_build/dev/typegate/deps-abc_-.tgdb")
    );
}

#[test]
fn test_new_key_yields_new_file_and_keeps_old() {
    let tmp = TempDir::new().unwrap();
    let layout = CacheLayout::new(tmp.path(), tmp.path());
    let old = layout.database_path(Tier::Platform, "platform-25_build-13.0");
    std::fs::write(&old, b"db").unwrap();

    let new = layout.database_path(Tier::Platform, "platform-26_build-14.2");
    assert_ne!(old, new);
    assert!(old.exists());
    assert!(!new.exists());
}

#[test]
fn test_remove_database() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("x.tgdb");
    std::fs::write(&db, b"db").unwrap();

    assert!(remove_database(&db).unwrap());
    assert!(!db.exists());
    assert!(!remove_database(&db).unwrap());
}
