//! Interpolation helpers:
//! - lerp_f32 (scalar)
//! - lerp_vec3 (positions)
//! - lerp_slice (variable-length rotation/torque components)

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

/// Component-wise lerp of two equally sized slices. `None` if the lengths differ.
#[inline]
pub fn lerp_slice(a: &[f32], b: &[f32], t: f32) -> Option<Vec<f32>> {
    if a.len() != b.len() {
        return None;
    }
    Some(
        a.iter()
            .zip(b)
            .map(|(x, y)| lerp_f32(*x, *y, t))
            .collect(),
    )
}

/// Lerp two optional component vectors; present only when both sides are.
#[inline]
pub fn lerp_optional(a: Option<&[f32]>, b: Option<&[f32]>, t: f32) -> Option<Vec<f32>> {
    match (a, b) {
        (Some(a), Some(b)) => lerp_slice(a, b, t),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(lerp_f32(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp_f32(2.0, 4.0, 1.0), 4.0);
        assert_eq!(lerp_vec3([0.0, 2.0, -2.0], [2.0, 4.0, 2.0], 0.5), [1.0, 3.0, 0.0]);
    }

    #[test]
    fn slice_lerp_requires_equal_lengths() {
        assert_eq!(lerp_slice(&[0.0, 1.0], &[1.0, 3.0], 0.5), Some(vec![0.5, 2.0]));
        assert_eq!(lerp_slice(&[0.0], &[1.0, 3.0], 0.5), None);
    }

    #[test]
    fn optional_lerp_needs_both_sides() {
        assert_eq!(lerp_optional(Some(&[0.0]), None, 0.5), None);
        assert_eq!(lerp_optional(None, Some(&[1.0]), 0.5), None);
        assert_eq!(lerp_optional(Some(&[0.0]), Some(&[1.0]), 0.25), Some(vec![0.25]));
    }
}
