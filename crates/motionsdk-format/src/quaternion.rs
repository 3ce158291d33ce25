/// Row-major 4x4 identity matrix.
pub const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// Squared norms at or below this are treated as a zero quaternion.
const MIN_SQUARED_NORM: f32 = 1e-6;

/// Convert a quaternion `[w, x, y, z]` into a row-major 4x4 rotation matrix.
///
/// The quaternion need not be unit length; the result is normalized by its
/// squared norm. Returns [`IDENTITY`] if `q` does not have exactly four
/// components or is (numerically) zero. The translation column is zero and
/// the homogeneous row is `[0, 0, 0, 1]`.
pub fn quaternion_to_matrix(q: &[f32]) -> [f32; 16] {
    let mut m = IDENTITY;

    let &[a, b, c, d] = q else {
        return m;
    };

    let aa = a * a;
    let ab = a * b;
    let ac = a * c;
    let ad = a * d;
    let bb = b * b;
    let bc = b * c;
    let bd = b * d;
    let cc = c * c;
    let cd = c * d;
    let dd = d * d;

    let norm = aa + bb + cc + dd;
    if norm <= MIN_SQUARED_NORM {
        return m;
    }

    m[0] = (aa + bb - cc - dd) / norm;
    m[1] = 2.0 * (-ad + bc) / norm;
    m[2] = 2.0 * (ac + bd) / norm;
    m[4] = 2.0 * (ad + bc) / norm;
    m[5] = (aa - bb + cc - dd) / norm;
    m[6] = 2.0 * (-ab + cd) / norm;
    m[8] = 2.0 * (-ac + bd) / norm;
    m[9] = 2.0 * (ab + cd) / norm;
    m[10] = (aa - bb - cc + dd) / norm;

    m
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_1_SQRT_2;

    use super::*;

    fn assert_close(actual: [f32; 16], expected: [f32; 16]) {
        for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
            assert!((a - e).abs() < 1e-6, "index {i}: {a} != {e}");
        }
    }

    #[test]
    fn unit_quaternion_is_identity() {
        assert_eq!(quaternion_to_matrix(&[1.0, 0.0, 0.0, 0.0]), IDENTITY);
    }

    #[test]
    fn wrong_length_is_identity() {
        assert_eq!(quaternion_to_matrix(&[1.0, 0.0, 0.0]), IDENTITY);
        assert_eq!(quaternion_to_matrix(&[]), IDENTITY);
        assert_eq!(quaternion_to_matrix(&[0.0, 1.0, 0.0, 0.0, 0.0]), IDENTITY);
    }

    #[test]
    fn zero_quaternion_is_identity() {
        assert_eq!(quaternion_to_matrix(&[0.0; 4]), IDENTITY);
        assert_eq!(quaternion_to_matrix(&[1e-4, 0.0, 0.0, 0.0]), IDENTITY);
    }

    #[test]
    fn quarter_turn_about_z() {
        let m = quaternion_to_matrix(&[FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2]);
        assert_close(
            m,
            [
                0.0, -1.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        );
    }

    #[test]
    fn half_turn_about_x() {
        let m = quaternion_to_matrix(&[0.0, 1.0, 0.0, 0.0]);
        assert_close(
            m,
            [
                1.0, 0.0, 0.0, 0.0, //
                0.0, -1.0, 0.0, 0.0, //
                0.0, 0.0, -1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        );
    }

    #[test]
    fn non_unit_input_is_normalized() {
        let unit = quaternion_to_matrix(&[FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0]);
        let scaled = quaternion_to_matrix(&[3.0, 3.0, 0.0, 0.0]);
        assert_close(scaled, unit);
        assert_eq!(scaled[15], 1.0);
        assert_eq!(&scaled[12..15], &[0.0, 0.0, 0.0]);
    }
}
