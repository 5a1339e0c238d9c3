#![cfg(feature = "image-io")]

use chromakey::io::{load_rgb_image, rgb_image_from_buffer, rgb_image_to_buffer, save_rgb_image};
use chromakey::{ChromaKeyError, Rgb, RgbImage};
use std::path::PathBuf;

fn temp_png(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("chromakey-{}-{name}.png", std::process::id()))
}

#[test]
fn png_roundtrip_preserves_pixels() {
    let raw: Vec<u8> = (0u8..36).map(|v| v.wrapping_mul(7)).collect();
    let img = RgbImage::from_raw(&raw, 4, 3).unwrap();
    let path = temp_png("roundtrip");

    save_rgb_image(&img, &path).unwrap();
    let loaded = load_rgb_image(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, img);
}

#[test]
fn buffer_conversion_keeps_layout() {
    let img = RgbImage::from_pixels(vec![Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)], 1, 2).unwrap();
    let buffer = rgb_image_to_buffer(&img).unwrap();
    assert_eq!(buffer.dimensions(), (1, 2));
    assert_eq!(buffer.get_pixel(0, 1).0, [4, 5, 6]);
    assert_eq!(rgb_image_from_buffer(&buffer).unwrap(), img);
}

#[test]
fn missing_file_reports_image_io() {
    let err = load_rgb_image("/definitely/not/here.png").unwrap_err();
    assert!(matches!(err, ChromaKeyError::ImageIo { .. }));
}
