//! Cosine similarity scoring.

/// Cosine similarity between two embedding vectors.
///
/// The raw formula is returned without clamping, so anti-correlated vectors
/// score below zero. Vectors of unequal length and zero-magnitude vectors
/// both score `0.0` rather than failing.
///
/// # Examples
///
/// ```
/// use likeness_core::cosine_similarity;
///
/// assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
/// assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
/// assert!((cosine_similarity(&[0.3, 0.4], &[0.3, 0.4]) - 1.0).abs() < 1e-9);
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let (dot, norm_a, norm_b) = a.iter().zip(b).fold(
        (0.0_f64, 0.0_f64, 0.0_f64),
        |(dot, na, nb), (&x, &y)| {
            let (x, y) = (f64::from(x), f64::from(y));
            (dot + x * y, na + x * x, nb + y * y)
        },
    );

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}
