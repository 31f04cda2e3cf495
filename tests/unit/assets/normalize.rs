use std::io::Cursor;

use super::*;

fn solid_png(name: &str, w: u32, h: u32, px: [u8; 4]) -> SourceImage {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    SourceImage::new(name, buf)
}

fn canvas(width: u32, height: u32) -> Canvas {
    Canvas { width, height }
}

#[test]
fn stretches_every_source_to_canvas_in_order() {
    let sources = [
        solid_png("a.png", 3, 7, [255, 0, 0, 255]),
        solid_png("b.png", 50, 2, [0, 0, 255, 255]),
    ];
    let arena = normalize_sources(&sources, canvas(9, 4), &LoadOpts::default()).unwrap();
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.canvas(), canvas(9, 4));
    for s in arena.surfaces() {
        assert_eq!(s.canvas(), canvas(9, 4));
    }
    assert_eq!(arena.surfaces()[0].pixel(8, 3), Some([255, 0, 0, 255]));
    assert_eq!(arena.surfaces()[1].pixel(0, 0), Some([0, 0, 255, 255]));
}

#[test]
fn transparent_sources_become_white() {
    let sources = [solid_png("clear.png", 2, 2, [0, 0, 0, 0])];
    let arena = normalize_sources(&sources, canvas(4, 4), &LoadOpts::default()).unwrap();
    assert_eq!(arena.surfaces()[0].pixel(1, 1), Some([255, 255, 255, 255]));
}

#[test]
fn size_limit_checked_before_decoding() {
    let sources = [SourceImage::new("junk", vec![1u8, 2, 3])];
    let err = normalize_sources(&sources, canvas(16_001, 10), &LoadOpts::default()).unwrap_err();
    assert!(matches!(
        err,
        LenticularError::SizeLimit {
            width: 16_001,
            height: 10,
            ..
        }
    ));
}

#[test]
fn decode_failure_in_batch_aborts_with_name() {
    let sources = [
        solid_png("ok.png", 2, 2, [1, 2, 3, 255]),
        SourceImage::new("bad.png", vec![0u8; 16]),
        solid_png("ok2.png", 2, 2, [1, 2, 3, 255]),
    ];
    for parallel in [false, true] {
        let opts = LoadOpts {
            parallel,
            threads: Some(2),
        };
        let err = normalize_sources(&sources, canvas(4, 4), &opts).unwrap_err();
        match err {
            LenticularError::Decode { name, .. } => assert_eq!(name, "bad.png"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}

#[test]
fn parallel_matches_sequential() {
    let sources = [
        solid_png("a.png", 5, 3, [200, 10, 10, 255]),
        solid_png("b.png", 3, 5, [10, 200, 10, 100]),
        solid_png("c.png", 1, 1, [10, 10, 200, 255]),
    ];
    let seq = normalize_sources(&sources, canvas(7, 6), &LoadOpts::default()).unwrap();
    let par = normalize_sources(
        &sources,
        canvas(7, 6),
        &LoadOpts {
            parallel: true,
            threads: Some(3),
        },
    )
    .unwrap();
    assert_eq!(seq.surfaces(), par.surfaces());
}

#[test]
fn zero_threads_is_rejected() {
    let sources = [solid_png("a.png", 1, 1, [0, 0, 0, 255])];
    let err = normalize_sources(
        &sources,
        canvas(2, 2),
        &LoadOpts {
            parallel: true,
            threads: Some(0),
        },
    )
    .unwrap_err();
    assert!(matches!(err, LenticularError::Validation(_)));
}

#[test]
fn thread_pool_honours_explicit_count() {
    let opts = LoadOpts {
        parallel: true,
        threads: Some(3),
    };
    assert_eq!(opts.thread_pool().unwrap().current_num_threads(), 3);

    let zero = LoadOpts {
        parallel: true,
        threads: Some(0),
    };
    assert_eq!(zero.thread_pool().unwrap_err().kind(), crate::ErrorKind::Validation);
}
