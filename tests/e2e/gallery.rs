//! Full workflow: convert cube sets, then build the gallery from the outputs.

use std::fs;

use image::{Rgb, RgbImage};

use crate::helpers::{temp_workdir, write_cube_set};

#[test]
fn test_convert_then_build_gallery() {
    let temp = temp_workdir();
    write_cube_set(temp.path(), "Scene2", "png", 8);
    write_cube_set(temp.path(), "Scene3", "png", 8);

    cubepano::convert::execute(16, temp.path(), "").unwrap();

    // The floor plan arrives alongside the generated panoramas.
    RgbImage::from_pixel(6, 4, Rgb([200, 200, 200]))
        .save(temp.path().join("plan.png"))
        .unwrap();

    cubepano::site::execute(temp.path()).unwrap();

    let docs = temp.path().join("docs");
    assert!(docs.join("Scene 2.png").is_file());
    assert!(docs.join("Scene 3.png").is_file());
    assert!(docs.join("plan.png").is_file());
    assert!(docs.join("view_Scene_2.html").is_file());
    assert!(docs.join("view_Scene_3.html").is_file());

    let index = fs::read_to_string(docs.join("index.html")).unwrap();
    assert!(index.contains("view_Scene_2.html"));
    assert!(index.contains("view_Scene_3.html"));
    assert!(index.contains("plan.png"));

    let viewer = fs::read_to_string(docs.join("view_Scene_2.html")).unwrap();
    assert!(viewer.contains("panorama: 'Scene 2.png'"));
}

#[test]
fn test_gallery_ignores_non_images() {
    let temp = temp_workdir();
    RgbImage::from_pixel(4, 2, Rgb([1, 2, 3]))
        .save(temp.path().join("Hall.jpg"))
        .unwrap();
    fs::write(temp.path().join("notes.txt"), "not an image").unwrap();
    fs::write(temp.path().join("build.sh"), "#!/bin/sh\n").unwrap();

    cubepano::site::execute(temp.path()).unwrap();

    let docs = temp.path().join("docs");
    assert!(docs.join("Hall.jpg").is_file());
    assert!(!docs.join("notes.txt").exists());
    assert!(!docs.join("build.sh").exists());
}
