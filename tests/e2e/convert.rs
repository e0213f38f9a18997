//! End-to-end conversion runs: discovery through cleanup.

use std::fs;

use cubepano::convert::execute;

use crate::helpers::{list_files, temp_workdir, write_cube_set};

#[test]
fn test_single_set_produces_panorama_and_cleans_faces() {
    let temp = temp_workdir();
    write_cube_set(temp.path(), "RoomA", "jpg", 8);

    execute(32, temp.path(), "").unwrap();

    let out = temp.path().join("RoomA.jpg");
    assert!(out.is_file());
    let img = image::open(&out).unwrap();
    assert_eq!((img.width(), img.height()), (32, 16));

    // Face files are gone; only the panorama remains.
    assert_eq!(list_files(temp.path()), ["RoomA.jpg"]);
}

#[test]
fn test_failed_set_keeps_sources_and_spares_other_sets() {
    let temp = temp_workdir();
    write_cube_set(temp.path(), "RoomA", "png", 8);
    write_cube_set(temp.path(), "RoomB", "png", 8);
    fs::write(temp.path().join("RoomB4.png"), b"corrupt").unwrap();

    execute(16, temp.path(), "").unwrap();

    // RoomA converted and its faces were cleaned up.
    assert!(temp.path().join("RoomA.png").is_file());
    assert!(!temp.path().join("RoomA1.png").exists());

    // RoomB failed: no output, all six faces protected.
    assert!(!temp.path().join("RoomB.png").exists());
    for i in 1..=6 {
        assert!(temp.path().join(format!("RoomB{i}.png")).is_file());
    }
}

#[test]
fn test_sidecar_title_names_the_output() {
    let temp = temp_workdir();
    write_cube_set(temp.path(), "Scene2", "png", 8);
    fs::write(temp.path().join("Scene2.html"), "<h1>My&nbsp;Room</h1>").unwrap();

    execute(16, temp.path(), "").unwrap();

    assert!(temp.path().join("My Room.png").is_file());
    // The sidecar belongs to a successful set and is cleaned up with it.
    assert_eq!(list_files(temp.path()), ["My Room.png"]);
}

#[test]
fn test_scene_heuristic_without_sidecar() {
    let temp = temp_workdir();
    write_cube_set(temp.path(), "Scene4", "png", 8);

    execute(16, temp.path(), "").unwrap();

    assert!(temp.path().join("Scene 4.png").is_file());
}

#[test]
fn test_prefix_applies_to_outputs() {
    let temp = temp_workdir();
    write_cube_set(temp.path(), "pano9", "png", 8);

    execute(16, temp.path(), "tour_").unwrap();

    assert_eq!(list_files(temp.path()), ["tour_pano9.png"]);
}

#[test]
fn test_scripts_survive_cleanup() {
    let temp = temp_workdir();
    write_cube_set(temp.path(), "RoomA", "png", 8);
    fs::write(temp.path().join("convert.py"), "#!/usr/bin/env python\n").unwrap();
    fs::write(temp.path().join("run.bat"), "@echo off\n").unwrap();

    execute(16, temp.path(), "").unwrap();

    assert_eq!(
        list_files(temp.path()),
        ["RoomA.png", "convert.py", "run.bat"]
    );
}

#[test]
fn test_no_sets_means_no_cleanup() {
    let temp = temp_workdir();
    fs::write(temp.path().join("stray.txt"), b"untouched").unwrap();
    fs::write(temp.path().join("Lonely1.png"), b"not a set").unwrap();

    execute(16, temp.path(), "").unwrap();

    // Without a single complete set the run ends before cleanup.
    assert_eq!(list_files(temp.path()), ["Lonely1.png", "stray.txt"]);
}

#[test]
fn test_incomplete_set_is_ignored_but_cleaned() {
    let temp = temp_workdir();
    write_cube_set(temp.path(), "RoomA", "png", 8);
    // Five faces only; never a set, so never protected.
    for i in 1..=5 {
        fs::write(temp.path().join(format!("Partial{i}.png")), b"x").unwrap();
    }

    execute(16, temp.path(), "").unwrap();

    assert_eq!(list_files(temp.path()), ["RoomA.png"]);
}

#[test]
fn test_odd_width_floors_height() {
    let temp = temp_workdir();
    write_cube_set(temp.path(), "RoomA", "png", 8);

    execute(33, temp.path(), "").unwrap();

    let img = image::open(temp.path().join("RoomA.png")).unwrap();
    assert_eq!((img.width(), img.height()), (33, 16));
}
