use giroscan::detection::preprocessing::{PixelFormat, image_from_raw, normalize};
use image::{GrayImage, Luma};

fn gradient() -> GrayImage {
    GrayImage::from_fn(256, 4, |x, _| Luma([x as u8]))
}

#[test]
fn test_zero_amounts_are_identity() {
    let img = gradient();
    let once = normalize(&img, 0.0, 0.0);
    assert_eq!(once, img);
    assert_eq!(normalize(&once, 0.0, 0.0), img);
}

#[test]
fn test_output_stays_in_range_and_keeps_size() {
    let img = gradient();
    for &(brightness, contrast) in &[(0.3, 100.0), (-2.0, 0.0), (5.0, -3.0), (0.0, 1000.0)] {
        let out = normalize(&img, brightness, contrast);
        assert_eq!(out.dimensions(), img.dimensions());
        // Negative brightness must floor at 0 rather than wrap
        if brightness < -1.0 {
            assert!(out.pixels().all(|p| p[0] == 0));
        }
    }
}

#[test]
fn test_default_amounts_binarize_gradient() {
    let out = normalize(&gradient(), 0.3, 100.0);
    let intermediate = out.pixels().filter(|p| p[0] != 0 && p[0] != 255).count();
    // Only the couple of gray levels right at the threshold survive, per row
    assert!(intermediate <= 2 * 4, "{} intermediate pixels", intermediate);
    assert_eq!(out.get_pixel(0, 0)[0], 0);
    assert_eq!(out.get_pixel(255, 0)[0], 255);
}

#[test]
fn test_saturated_image_is_stable() {
    let img = GrayImage::from_fn(10, 10, |x, y| Luma([if (x + y) % 2 == 0 { 0 } else { 255 }]));
    let once = normalize(&img, 0.3, 100.0);
    let twice = normalize(&once, 0.3, 100.0);
    assert_eq!(once, img);
    assert_eq!(twice, once);
}

#[test]
fn test_brightness_compounds() {
    let img = GrayImage::from_pixel(1, 1, Luma([100]));
    let once = normalize(&img, 0.3, 0.0);
    let twice = normalize(&once, 0.3, 0.0);
    assert_eq!(once.get_pixel(0, 0)[0], 130);
    assert_eq!(twice.get_pixel(0, 0)[0], 169);
}

#[test]
fn test_raw_formats() {
    let luma = image_from_raw(vec![7; 6], 3, 2, PixelFormat::Luma8).unwrap();
    assert_eq!(luma.to_luma8().get_pixel(2, 1)[0], 7);

    let rgba = image_from_raw(vec![255; 3 * 2 * 4], 3, 2, PixelFormat::Rgba8).unwrap();
    assert_eq!((rgba.width(), rgba.height()), (3, 2));

    assert!(image_from_raw(vec![0; 6], 3, 2, PixelFormat::Rgb8).is_err());
}
