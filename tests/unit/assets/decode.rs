use std::io::Cursor;

use super::*;

fn png_bytes(img: RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_pixels() {
    let img = RgbaImage::from_raw(2, 1, vec![100u8, 50, 200, 128, 1, 2, 3, 255]).unwrap();
    let decoded = decode_image("a.png", &png_bytes(img)).unwrap();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.as_raw().as_slice(), &[100, 50, 200, 128, 1, 2, 3, 255]);
}

#[test]
fn decode_failure_names_the_image() {
    let err = decode_image("broken_03.jpg", b"definitely not an image").unwrap_err();
    match err {
        LenticularError::Decode { ref name, .. } => assert_eq!(name, "broken_03.jpg"),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn flatten_over_white_blends_by_alpha() {
    let mut px = vec![
        0u8, 0, 0, 0, // transparent -> white
        10, 20, 30, 255, // opaque untouched
        0, 0, 0, 128, // half black
    ];
    flatten_over_white_in_place(&mut px);
    assert_eq!(&px[0..4], &[255, 255, 255, 255]);
    assert_eq!(&px[4..8], &[10, 20, 30, 255]);
    let half = ((255u16 * 127 + 127) / 255) as u8;
    assert_eq!(&px[8..12], &[half, half, half, 255]);
}
