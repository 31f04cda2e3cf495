use super::*;

fn checker() -> Surface {
    let mut data = Vec::new();
    for y in 0..3u32 {
        for x in 0..5u32 {
            let v = if (x + y) % 2 == 0 { 250 } else { 3 };
            data.extend_from_slice(&[v, x as u8, y as u8, 255]);
        }
    }
    Surface::from_raw(5, 3, data).unwrap()
}

#[test]
fn encoded_png_decodes_to_identical_pixels() {
    let s = checker();
    let bytes = encode_png(&s).unwrap();
    let back = image::load_from_memory(&bytes).unwrap().into_rgba8();
    assert_eq!(back.dimensions(), (5, 3));
    assert_eq!(back.as_raw().as_slice(), s.as_bytes());
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("out.png");
    write_png(&path, &checker()).unwrap();
    let back = image::open(&path).unwrap().into_rgba8();
    assert_eq!(back.as_raw().as_slice(), checker().as_bytes());
}

#[test]
fn suggested_name_carries_size_and_lpi() {
    assert_eq!(
        suggested_file_name(&LenticularSettings::default()),
        "lenticular_4x6_60lpi.png"
    );
    let s = LenticularSettings {
        lpi: 62.5,
        width_inches: 5.5,
        ..LenticularSettings::default()
    };
    assert_eq!(suggested_file_name(&s), "lenticular_5.5x6_62.5lpi.png");
}
