//! CLI end-to-end tests
//!
//! Tests for the monobmp command-line interface.

use assert_cmd::prelude::*;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the monobmp binary
#[allow(deprecated)]
fn monobmp_cmd() -> Command {
    let mut cmd = Command::cargo_bin("monobmp").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn save_solid(path: &Path, width: u32, height: u32, value: u8) {
    RgbImage::from_pixel(width, height, Rgb([value; 3]))
        .save(path)
        .unwrap();
}

fn read_bmp(path: &Path) -> image::GrayImage {
    image::open(path).unwrap().into_luma8()
}

#[test]
fn test_cli_no_args_shows_help() {
    monobmp_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_flag() {
    monobmp_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("monobmp"));
}

#[test]
fn test_batch_converts_matching_files() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("images");
    let output = temp.path().join("bmp_images");
    fs::create_dir(&input).unwrap();

    save_solid(&input.join("white.png"), 200, 300, 255);
    save_solid(&input.join("dark.png"), 50, 50, 10);
    fs::write(input.join("notes.txt"), "not an image").unwrap();

    monobmp_cmd()
        .arg("batch")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted white.png to white.bmp"))
        .stdout(predicate::str::contains("Converted dark.png to dark.bmp"))
        .stdout(predicate::str::contains("All images converted successfully!"));

    let white = read_bmp(&output.join("white.bmp"));
    assert_eq!(white.dimensions(), (136, 136));
    assert!(white.pixels().all(|p| p.0[0] == 255));

    assert!(output.join("dark.bmp").exists());
    assert!(!output.join("notes.bmp").exists());
}

#[test]
fn test_batch_threshold_preset_accepts_jpeg() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("in");
    let output = temp.path().join("out");
    fs::create_dir(&input).unwrap();

    save_solid(&input.join("photo.JPG"), 40, 40, 255);
    save_solid(&input.join("icon.png"), 40, 40, 0);

    monobmp_cmd()
        .args(["batch", "--preset", "threshold"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    assert!(output.join("photo.bmp").exists());
    let icon = read_bmp(&output.join("icon.bmp"));
    assert!(icon.pixels().all(|p| p.0[0] == 0));
}

#[test]
fn test_batch_missing_input_dir_fails() {
    let temp = tempdir().unwrap();

    monobmp_cmd()
        .arg("batch")
        .arg(temp.path().join("missing"))
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_batch_aborts_on_corrupt_file() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("in");
    let output = temp.path().join("out");
    fs::create_dir(&input).unwrap();

    save_solid(&input.join("a.png"), 10, 10, 128);
    fs::write(input.join("b.png"), "garbage").unwrap();

    monobmp_cmd()
        .arg("batch")
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Converted a.png to a.bmp"))
        .stdout(predicate::str::contains("All images converted successfully!").not())
        .stderr(predicate::str::contains("b.png"));

    assert!(output.join("a.bmp").exists());
}

#[test]
fn test_convert_single_file_default_output() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("logo.png");
    save_solid(&input, 300, 100, 128);

    monobmp_cmd()
        .arg("convert")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted logo.png"));

    let bmp = read_bmp(&temp.path().join("logo.bmp"));
    assert_eq!(bmp.dimensions(), (136, 136));
    // Mid-gray dithers to a mix of black and white
    assert!(bmp.pixels().any(|p| p.0[0] == 0));
    assert!(bmp.pixels().any(|p| p.0[0] == 255));
}

#[test]
fn test_convert_transparent_background_is_black() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("glyph.png");
    RgbaImage::from_pixel(180, 180, Rgba([255, 255, 255, 0]))
        .save(&input)
        .unwrap();

    monobmp_cmd().arg("convert").arg(&input).assert().success();

    let bmp = read_bmp(&temp.path().join("glyph.bmp"));
    assert!(bmp.pixels().all(|p| p.0[0] == 0));
}

#[test]
fn test_convert_threshold_and_size_flags() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("gray.png");
    let output = temp.path().join("gray.bmp");
    save_solid(&input, 20, 20, 128);

    monobmp_cmd()
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .args(["--threshold", "128", "--size", "576x136"])
        .assert()
        .success();

    let bmp = read_bmp(&output);
    assert_eq!(bmp.dimensions(), (576, 136));
    assert!(bmp.pixels().all(|p| p.0[0] == 0));
}

#[test]
fn test_convert_is_byte_identical_across_runs() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("grad.png");
    RgbImage::from_fn(64, 64, |x, y| Rgb([(x * 4) as u8, (y * 4) as u8, 0]))
        .save(&input)
        .unwrap();

    let first = temp.path().join("first.bmp");
    let second = temp.path().join("second.bmp");
    for out in [&first, &second] {
        monobmp_cmd()
            .arg("convert")
            .arg(&input)
            .arg(out)
            .assert()
            .success();
    }

    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[test]
fn test_config_file_is_used() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("src");
    let output = temp.path().join("dst");
    fs::create_dir(&input).unwrap();
    save_solid(&input.join("a.gif"), 16, 16, 255);

    let config_path = temp.path().join("monobmp.toml");
    fs::write(
        &config_path,
        format!(
            "input_dir = {:?}\noutput_dir = {:?}\npreset = \"threshold\"\nwidth = 32\nheight = 16\n",
            input.to_string_lossy(),
            output.to_string_lossy()
        ),
    )
    .unwrap();

    monobmp_cmd()
        .arg("--config")
        .arg(&config_path)
        .arg("batch")
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted a.gif to a.bmp"));

    assert_eq!(read_bmp(&output.join("a.bmp")).dimensions(), (32, 16));
}

#[test]
fn test_show_config_prints_effective_settings() {
    let temp = tempdir().unwrap();

    monobmp_cmd()
        .current_dir(temp.path())
        .args(["show-config", "--preset", "threshold"])
        .assert()
        .success()
        .stdout(predicate::str::contains("level = 150"))
        .stdout(predicate::str::contains("width = 136"));
}

#[test]
fn test_invalid_size_rejected() {
    monobmp_cmd()
        .args(["batch", "--size", "0x10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-zero"));
}
