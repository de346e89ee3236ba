use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn writes_an_image() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("mandel.png");
    Command::cargo_bin("fractal")
        .unwrap()
        .args(&["-o", output.to_str().unwrap(), "-s", "64x48", "-i", "50"])
        .assert()
        .success();
    let image = image::open(&output).unwrap().to_rgba();
    assert_eq!(image.dimensions(), (64, 48));
    // Every pixel is opaque and carries no green.
    assert!(image.pixels().all(|p| p[3] == 255 && p[1] == 0));
}

#[test]
fn strategies_write_identical_images() {
    let dir = tempdir().unwrap();
    let mut images = vec![];
    for strategy in &["sequential", "parallel", "accelerator"] {
        let output = dir.path().join(format!("{}.png", strategy));
        Command::cargo_bin("fractal")
            .unwrap()
            .args(&[
                "-o",
                output.to_str().unwrap(),
                "-s",
                "50x30",
                "-z",
                "20",
                "--offset=-10,5",
                "-m",
                strategy,
            ])
            .assert()
            .success();
        images.push(image::open(&output).unwrap().to_rgba().into_raw());
    }
    assert_eq!(images[0], images[1]);
    assert_eq!(images[0], images[2]);
}

#[test]
fn rejects_zero_scale() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("never.png");
    Command::cargo_bin("fractal")
        .unwrap()
        .args(&["-o", output.to_str().unwrap(), "-z", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Scale must be finite and non-zero"));
    assert!(!output.exists());
}

#[test]
fn rejects_tiny_iteration_budget() {
    Command::cargo_bin("fractal")
        .unwrap()
        .args(&["-o", "unused.png", "-i", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Iteration count must be between 2 and 200000"));
}

#[test]
fn rejects_unknown_strategy() {
    Command::cargo_bin("fractal")
        .unwrap()
        .args(&["-o", "unused.png", "-m", "cuda"])
        .assert()
        .failure();
}

#[test]
fn requires_an_output() {
    Command::cargo_bin("fractal")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output"));
}
