//! CLI integration tests
//!
//! Drive the `reelstash` binary against a temporary database file.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn reelstash(dir: &Path, args: &[&str]) -> Output {
    let db_path = dir.join("store.db");
    Command::new(env!("CARGO_BIN_EXE_reelstash"))
        .current_dir(dir)
        .arg("--db")
        .arg(&db_path)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_movies_save_then_list() {
    let temp_dir = TempDir::new().unwrap();
    let movies_path = temp_dir.path().join("top.json");
    fs::write(
        &movies_path,
        r#"[{"id":"tt0111161","title":"The Shawshank Redemption","year":"1994"},
            {"id":"tt0068646","title":"The Godfather","year":"1972"}]"#,
    )
    .unwrap();

    let save = reelstash(
        temp_dir.path(),
        &["movies", "save", movies_path.to_str().unwrap()],
    );
    assert!(
        save.status.success(),
        "save failed: {}",
        String::from_utf8_lossy(&save.stderr)
    );
    assert!(String::from_utf8_lossy(&save.stdout).contains("2 inserted"));

    let list = reelstash(temp_dir.path(), &["movies", "list"]);
    assert!(list.status.success());
    let listed: serde_json::Value = serde_json::from_slice(&list.stdout).unwrap();
    assert_eq!(listed[0]["id"], "tt0111161");
    assert_eq!(listed[1]["year"], "1972");
}

#[test]
fn test_images_save_then_get() {
    let temp_dir = TempDir::new().unwrap();
    let poster = temp_dir.path().join("poster.jpg");
    let out = temp_dir.path().join("out.jpg");
    fs::write(&poster, [0xff, 0xd8, 0xff, 0xe0]).unwrap();

    let save = reelstash(
        temp_dir.path(),
        &[
            "images",
            "save",
            "tt0111161",
            "https://img.example/tt0111161.jpg",
            poster.to_str().unwrap(),
        ],
    );
    assert!(save.status.success());

    let get = reelstash(
        temp_dir.path(),
        &["images", "get", "tt0111161", out.to_str().unwrap()],
    );
    assert!(get.status.success());
    assert_eq!(fs::read(&out).unwrap(), vec![0xff, 0xd8, 0xff, 0xe0]);
}

#[test]
fn test_missing_image_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out.jpg");

    let get = reelstash(
        temp_dir.path(),
        &["images", "get", "tt9999999", out.to_str().unwrap()],
    );

    assert!(!get.status.success());
    assert!(String::from_utf8_lossy(&get.stderr).contains("no image cached"));
    assert!(!out.exists());
}
