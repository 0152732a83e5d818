//! Dense vector primitives.

/// Dot product of two equal-length vectors.
///
/// Callers guarantee equal lengths; extra trailing elements of the longer
/// slice are ignored.
#[must_use]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Scale `v` to unit L2 norm in place.
///
/// Returns `false` and leaves `v` untouched when its norm is zero or not finite.
pub fn l2_normalize(v: &mut [f32]) -> bool {
    let norm = dot(v, v).sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return false;
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
    true
}
