mod common;

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cropper_core::io::spawn_load;
use cropper_core::kurbo::Size;
use cropper_core::{CropperError, ImageSource, LoadedImage};
use image::RgbaImage;

use common::png_bytes;

#[test]
fn test_parse_reference() {
    assert_eq!(
        ImageSource::parse("photos/cat.png"),
        ImageSource::Path(PathBuf::from("photos/cat.png"))
    );
    assert!(matches!(
        ImageSource::parse("data:image/png;base64,AAAA"),
        ImageSource::DataUri(_)
    ));
}

#[test]
fn test_parse_file_url_is_path() {
    assert_eq!(
        ImageSource::parse("file:///tmp/photos/cat.png"),
        ImageSource::Path(PathBuf::from("/tmp/photos/cat.png"))
    );
}

#[test]
fn test_file_url_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("url.png");
    std::fs::write(&path, png_bytes(6, 4)).unwrap();

    let source = ImageSource::parse(&format!("file://{}", path.display()));
    assert_eq!(source.decode().unwrap().size(), Size::new(6.0, 4.0));
}

#[test]
fn test_remote_url_is_unsupported_scheme() {
    let source = ImageSource::parse("https://example.com/cat.png");
    assert_eq!(source, ImageSource::Url("https://example.com/cat.png".into()));

    match source.decode().unwrap_err() {
        CropperError::ImageLoad { origin, reason } => {
            assert_eq!(origin, "https://example.com/cat.png");
            assert!(reason.contains("unsupported URL scheme `https`"), "got: {reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_decode_bytes() {
    let img = ImageSource::Bytes(png_bytes(12, 7)).decode().unwrap();
    assert_eq!(img.size(), Size::new(12.0, 7.0));
    assert_eq!(img.pixels().get_pixel(3, 4).0, [3, 4, 7, 255]);
}

#[test]
fn test_decode_data_uri() {
    let uri = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(5, 9)));
    let img = ImageSource::DataUri(uri).decode().unwrap();
    assert_eq!((img.width(), img.height()), (5, 9));
}

#[test]
fn test_data_uri_without_base64_is_rejected() {
    let err = ImageSource::DataUri("data:text/plain,hello".into())
        .decode()
        .unwrap_err();
    match err {
        CropperError::ImageLoad { reason, .. } => {
            assert!(reason.contains("base64"), "got: {reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_file_is_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.png");
    let err = ImageSource::from(path.clone()).decode().unwrap_err();
    match err {
        CropperError::ImageLoad { origin, .. } => {
            assert_eq!(origin, path.display().to_string());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_image_is_rejected() {
    assert!(matches!(
        LoadedImage::new(RgbaImage::new(0, 4), "empty"),
        Err(CropperError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_spawn_load_delivers_result() {
    let pending = spawn_load(ImageSource::Bytes(png_bytes(3, 3))).unwrap();
    assert!(pending.origin().contains("bytes in memory"));
    let img = pending.wait().unwrap();
    assert_eq!(img.size(), Size::new(3.0, 3.0));
}
