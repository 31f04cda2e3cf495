use super::*;

fn names(seq: &ImageSequence) -> Vec<&str> {
    seq.iter().map(|i| i.name.as_str()).collect()
}

#[test]
fn natural_cmp_orders_numbers_by_value() {
    assert_eq!(natural_cmp("img2", "img10"), Ordering::Less);
    assert_eq!(natural_cmp("img10", "img9"), Ordering::Greater);
    assert_eq!(natural_cmp("img007", "img7"), Ordering::Equal);
    assert_eq!(natural_cmp("frame1_b", "frame1_a"), Ordering::Greater);
}

#[test]
fn natural_cmp_ignores_case() {
    assert_eq!(natural_cmp("Frame", "frame"), Ordering::Equal);
    assert_eq!(natural_cmp("B.png", "a.png"), Ordering::Greater);
    assert_eq!(natural_cmp("abc", "ABCD"), Ordering::Less);
}

#[test]
fn sequence_sorts_on_insert() {
    let mut seq: ImageSequence = ["img10.png", "IMG2.png", "img1.png"]
        .into_iter()
        .map(|n| SourceImage::new(n, vec![0u8]))
        .collect();
    assert_eq!(names(&seq), ["img1.png", "IMG2.png", "img10.png"]);

    seq.push(SourceImage::new("img3.png", vec![0u8]));
    assert_eq!(names(&seq), ["img1.png", "IMG2.png", "img3.png", "img10.png"]);
}

#[test]
fn remove_and_clear_release_frames() {
    let a = SourceImage::new("a.png", vec![1u8, 2, 3]);
    let b = SourceImage::new("b.png", vec![4u8]);
    let a_id = a.id;
    let bytes = std::sync::Arc::downgrade(&a.bytes);

    let mut seq: ImageSequence = [a, b].into_iter().collect();
    assert_eq!(seq.len(), 2);

    let removed = seq.remove(a_id).unwrap();
    assert_eq!(removed.name, "a.png");
    drop(removed);
    assert!(bytes.upgrade().is_none());
    assert!(seq.remove(a_id).is_none());

    seq.clear();
    assert!(seq.is_empty());
}

#[test]
fn ids_are_unique() {
    let a = SourceImage::new("same.png", vec![0u8]);
    let b = SourceImage::new("same.png", vec![0u8]);
    assert_ne!(a.id, b.id);
}
