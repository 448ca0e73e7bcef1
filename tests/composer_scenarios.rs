use std::fs;

use image::{DynamicImage, ImageFormat, Pixel, Rgba, RgbaImage};
use logo_qr::raster::logo_placement;
use logo_qr::{ComposeError, Composer, LogoError, EXPORT_FILE_NAME};
use tempfile::TempDir;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

fn decode_qr(image: &RgbaImage) -> String {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(w, h, |x, y| {
        image.get_pixel(x as u32, y as u32).to_luma()[0]
    });
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one QR code");
    let (_, content) = grids[0].decode().unwrap();
    content
}

fn write_red_logo(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("logo.png");
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(100, 100, RED))
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    path
}

#[test]
fn plain_url_code_is_black_and_white_png() {
    let dir = TempDir::new().unwrap();
    let mut composer = Composer::new();

    composer.generate("https://example.com", None).unwrap();
    let path = composer.export(dir.path()).unwrap();

    assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
    assert_eq!(EXPORT_FILE_NAME, "qr_code.png");

    let saved = image::open(&path).unwrap().to_rgba8();
    assert_eq!(saved.dimensions(), (256, 256));
    assert!(saved.pixels().all(|p| *p == BLACK || *p == WHITE));
    assert!(saved.pixels().any(|p| *p == BLACK));
    assert!(saved.pixels().any(|p| *p == WHITE));
}

#[test]
fn logo_covers_center_and_leaves_the_rest_untouched() {
    let dir = TempDir::new().unwrap();
    let logo = write_red_logo(&dir);
    let mut composer = Composer::new();

    let plain = composer.generate("Hello", None).unwrap().image.clone();
    let with_logo = composer.generate("Hello", Some(logo.as_path())).unwrap().clone();

    assert!(with_logo.has_logo);
    assert_eq!(with_logo.image.dimensions(), (256, 256));

    let p = logo_placement(256, 256);
    assert_eq!((p.x, p.y, p.size), (96, 96, 64));

    for (x, y, px) in with_logo.image.enumerate_pixels() {
        let inside = (96..160).contains(&x) && (96..160).contains(&y);
        if inside {
            assert_eq!(*px, RED, "logo pixel ({x}, {y})");
        } else {
            assert_eq!(px, plain.get_pixel(x, y), "code pixel ({x}, {y})");
        }
    }
}

#[test]
fn compositing_twice_gives_identical_bytes() {
    let dir = TempDir::new().unwrap();
    let logo = write_red_logo(&dir);
    let mut composer = Composer::new();

    let first = composer.generate("Hello", Some(logo.as_path())).unwrap().png.clone();
    let second = composer.generate("Hello", Some(logo.as_path())).unwrap().png.clone();
    assert_eq!(first, second);
}

#[test]
fn export_before_generate_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let composer = Composer::new();

    assert!(matches!(
        composer.export(dir.path()),
        Err(ComposeError::NoResultAvailable)
    ));
    assert!(!dir.path().join(EXPORT_FILE_NAME).exists());
}

#[test]
fn invalid_logo_keeps_previous_result() {
    let dir = TempDir::new().unwrap();
    let bogus = dir.path().join("logo.png");
    fs::write(&bogus, b"this is not a picture").unwrap();
    let mut composer = Composer::new();

    let previous = composer.generate("first", None).unwrap().clone();

    let err = composer.generate("second", Some(bogus.as_path())).unwrap_err();
    assert!(matches!(
        err,
        ComposeError::LogoDecode {
            source: LogoError::Decode(_),
            ..
        }
    ));
    assert_eq!(err.to_string(), "Failed to load or overlay logo image.");
    assert_eq!(composer.current(), Some(&previous));

    let path = composer.export(dir.path()).unwrap();
    assert_eq!(fs::read(path).unwrap(), previous.png);
}

#[test]
fn export_overwrites_with_latest_result() {
    let dir = TempDir::new().unwrap();
    let mut composer = Composer::new();

    composer.generate("one", None).unwrap();
    composer.export(dir.path()).unwrap();
    let latest = composer.generate("two", None).unwrap().png.clone();
    let path = composer.export(dir.path()).unwrap();

    assert_eq!(fs::read(path).unwrap(), latest);
}

#[test]
fn export_into_missing_directory_is_an_export_error() {
    let dir = TempDir::new().unwrap();
    let mut composer = Composer::new();
    composer.generate("Hello", None).unwrap();

    let err = composer.export(&dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, ComposeError::Export { .. }));
}

#[test]
fn generated_codes_scan_back_to_their_text() {
    let dir = TempDir::new().unwrap();
    let logo = write_red_logo(&dir);
    let mut composer = Composer::new();

    for text in ["https://example.com", "Hello"] {
        let plain = composer.generate(text, None).unwrap().image.clone();
        assert_eq!(decode_qr(&plain), text);

        let with_logo = composer
            .generate(text, Some(logo.as_path()))
            .unwrap()
            .image
            .clone();
        assert_eq!(decode_qr(&with_logo), text);
    }
}
