use likeness_core::cosine_similarity;

const EPS: f64 = 1e-6;

#[test]
fn similarity_is_symmetric() {
    let pairs: [(&[f32], &[f32]); 3] = [
        (&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]),
        (&[0.5, -0.5], &[-1.0, 0.25]),
        (&[0.1, 0.0, 0.9, 0.3], &[0.2, 0.7, 0.0, 0.1]),
    ];
    for (a, b) in pairs {
        assert!((cosine_similarity(a, b) - cosine_similarity(b, a)).abs() < EPS);
    }
}

#[test]
fn self_similarity_is_one() {
    for v in [vec![1.0_f32, 0.0], vec![0.3, 0.4, 0.5], vec![-2.0, 7.5, 0.01]] {
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < EPS);
    }
}

#[test]
fn unequal_lengths_score_zero() {
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
    assert_eq!(cosine_similarity(&[], &[1.0]), 0.0);
}

#[test]
fn zero_vectors_score_zero() {
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    assert_eq!(cosine_similarity(&[1.0, 1.0], &[0.0, 0.0]), 0.0);
    assert_eq!(cosine_similarity(&[], &[]), 0.0);
}

#[test]
fn orthogonal_vectors_score_zero() {
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < EPS);
}

#[test]
fn opposite_vectors_are_not_clamped() {
    assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]) + 1.0).abs() < EPS);
}
