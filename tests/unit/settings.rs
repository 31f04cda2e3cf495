use std::io::Write as _;

use super::*;

#[test]
fn defaults_match_standard_print() {
    let s = LenticularSettings::default();
    let c = s.canvas().unwrap();
    assert_eq!(
        c,
        Canvas {
            width: 1200,
            height: 1800
        }
    );
    assert_eq!(s.lens_pitch_px(), 5.0);
}

#[test]
fn canvas_rounds_up_fractional_pixels() {
    let s = LenticularSettings {
        width_inches: 1.001,
        height_inches: 0.5,
        dpi: 100.0,
        ..LenticularSettings::default()
    };
    let c = s.canvas().unwrap();
    assert_eq!(c.width, 101);
    assert_eq!(c.height, 50);
}

#[test]
fn oversized_canvas_is_size_limit_error() {
    let s = LenticularSettings {
        width_inches: 60.0,
        height_inches: 6.0,
        dpi: 300.0,
        ..LenticularSettings::default()
    };
    match s.canvas() {
        Err(LenticularError::SizeLimit { width, height, max }) => {
            assert_eq!(width, 18000);
            assert_eq!(height, 1800);
            assert_eq!(max, MAX_CANVAS_PX);
        }
        other => panic!("expected size limit error, got {other:?}"),
    }
}

#[test]
fn ceiling_itself_is_allowed() {
    let s = LenticularSettings {
        width_inches: 16000.0,
        height_inches: 1.0,
        dpi: 1.0,
        ..LenticularSettings::default()
    };
    assert_eq!(s.canvas().unwrap().width, MAX_CANVAS_PX);
}

#[test]
fn validate_rejects_non_positive_and_non_finite() {
    let bad = [
        LenticularSettings {
            lpi: 0.0,
            ..LenticularSettings::default()
        },
        LenticularSettings {
            dpi: -300.0,
            ..LenticularSettings::default()
        },
        LenticularSettings {
            width_inches: f64::NAN,
            ..LenticularSettings::default()
        },
        LenticularSettings {
            height_inches: f64::INFINITY,
            ..LenticularSettings::default()
        },
    ];
    for s in bad {
        let err = s.validate().unwrap_err();
        assert!(matches!(err, LenticularError::Validation(_)), "{err}");
    }
}

#[test]
fn json_uses_camel_case_and_defaults() {
    let s: LenticularSettings =
        serde_json::from_str(r#"{"lpi": 75, "widthInches": 5, "orientation": "horizontal"}"#)
            .unwrap();
    assert_eq!(s.lpi, 75.0);
    assert_eq!(s.width_inches, 5.0);
    assert_eq!(s.height_inches, 6.0);
    assert_eq!(s.dpi, 300.0);
    assert_eq!(s.orientation, Orientation::Horizontal);

    assert!(serde_json::from_str::<LenticularSettings>(r#"{"lines": 75}"#).is_err());
}

#[test]
fn from_path_reads_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.json");
    std::fs::File::create(&good)
        .unwrap()
        .write_all(br#"{"lpi": 40, "dpi": 600}"#)
        .unwrap();
    let s = LenticularSettings::from_path(&good).unwrap();
    assert_eq!(s.lens_pitch_px(), 15.0);

    let bad = dir.path().join("bad.json");
    std::fs::File::create(&bad)
        .unwrap()
        .write_all(br#"{"lpi": 0}"#)
        .unwrap();
    assert!(LenticularSettings::from_path(&bad).is_err());

    assert!(LenticularSettings::from_path(&dir.path().join("missing.json")).is_err());
}

#[test]
fn summary_reports_pitch_strips_and_lenses() {
    let s = LenticularSettings::default();
    let sum = s.summary(Some(3)).unwrap();
    assert_eq!(sum.lens_pitch_px, 5.0);
    assert!((sum.strip_width_px.unwrap() - 5.0 / 3.0).abs() < 1e-12);
    assert_eq!(sum.total_lenses, 240);

    let horiz = LenticularSettings {
        orientation: Orientation::Horizontal,
        lpi: 62.0,
        ..LenticularSettings::default()
    };
    let sum = horiz.summary(None).unwrap();
    assert_eq!(sum.strip_width_px, None);
    assert_eq!(sum.total_lenses, (1800.0f64 / (300.0 / 62.0)).ceil() as u64);
}
