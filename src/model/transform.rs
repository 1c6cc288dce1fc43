pub type Vec3 = [f64; 3];
pub type Mat3 = [[f64; 3]; 3];

const IDENTITY: Mat3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// A TR card reduced to an origin and an orthonormal rotation.
///
/// `rotation[i]` is the i-th row of the matrix as written on the card
/// (`xx' yx' zx'`, `xy' yy' zy'`, `xz' yz' zz'`); its columns are the
/// orthonormalized axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub origin: Vec3,
    pub rotation: Mat3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            origin: [0.0; 3],
            rotation: IDENTITY,
        }
    }

    pub fn translation(origin: Vec3) -> Self {
        Self {
            origin,
            rotation: IDENTITY,
        }
    }

    /// Builds a transform from raw card rows, orthonormalizing them first.
    ///
    /// Only the first two columns of `rows` drive the result; the third axis is
    /// always recomputed as their cross product.
    pub fn from_rows(origin: Vec3, rows: Mat3) -> Self {
        Self {
            origin,
            rotation: orthonormalize(rows),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.origin == [0.0; 3] && self.rotation == IDENTITY
    }

    /// Re-expresses an origin given in the rotated frame in the global frame.
    pub fn with_local_origin(mut self) -> Self {
        self.origin = mul_transposed(&self.rotation, self.origin);
        self
    }

    /// The 4×3 layout used by downstream tooling: origin row, then rotation rows.
    pub fn to_matrix(&self) -> [[f64; 3]; 4] {
        [
            self.origin,
            self.rotation[0],
            self.rotation[1],
            self.rotation[2],
        ]
    }

    pub fn column(&self, j: usize) -> Vec3 {
        [self.rotation[0][j], self.rotation[1][j], self.rotation[2][j]]
    }
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn norm(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

pub fn normalized(a: Vec3) -> Vec3 {
    let n = norm(a);
    if n == 0.0 {
        return a;
    }
    [a[0] / n, a[1] / n, a[2] / n]
}

/// `Rᵀ · v`, the inverse rotation for an orthonormal `R`.
pub fn mul_transposed(r: &Mat3, v: Vec3) -> Vec3 {
    let mut out = [0.0; 3];
    for (j, slot) in out.iter_mut().enumerate() {
        *slot = r[0][j] * v[0] + r[1][j] * v[1] + r[2][j] * v[2];
    }
    out
}

/// Gram–Schmidt over the columns of `rows`.
///
/// The first column is normalized, the second has its projection on the first
/// removed, and the third is their cross product, giving a right-handed basis.
pub fn orthonormalize(rows: Mat3) -> Mat3 {
    let c0 = [rows[0][0], rows[1][0], rows[2][0]];
    let c1 = [rows[0][1], rows[1][1], rows[2][1]];

    let xx = dot(c0, c0);
    let xy = dot(c0, c1);
    let x = normalized(c0);
    let y = normalized([
        c1[0] * xx - c0[0] * xy,
        c1[1] * xx - c0[1] * xy,
        c1[2] * xx - c0[2] * xy,
    ]);
    let z = cross(x, y);

    [[x[0], y[0], z[0]], [x[1], y[1], z[1]], [x[2], y[2], z[2]]]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn assert_orthonormal(t: &Transform) {
        for i in 0..3 {
            assert!(approx_eq(norm(t.column(i)), 1.0, 1e-9));
            for j in (i + 1)..3 {
                assert!(approx_eq(dot(t.column(i), t.column(j)), 0.0, 1e-9));
            }
        }
    }

    #[test]
    fn identity_matrix_layout() {
        let m = Transform::identity().to_matrix();
        assert_eq!(m[0], [0.0, 0.0, 0.0]);
        assert_eq!(m[1], [1.0, 0.0, 0.0]);
        assert_eq!(m[3], [0.0, 0.0, 1.0]);
        assert!(Transform::default().is_identity());
    }

    #[test]
    fn orthonormalize_fixes_skewed_basis() {
        let t = Transform::from_rows(
            [0.0; 3],
            [[1.0, 0.1, 0.0], [0.02, 1.0, 0.0], [0.0, 0.0, 0.9]],
        );
        assert_orthonormal(&t);
        assert!(approx_eq(dot(cross(t.column(0), t.column(1)), t.column(2)), 1.0, 1e-9));
    }

    #[test]
    fn orthonormalize_ignores_given_third_axis() {
        let a = orthonormalize([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        let b = orthonormalize([[0.0, -1.0, 5.0], [1.0, 0.0, 5.0], [0.0, 0.0, -3.0]]);
        for (ra, rb) in a.iter().zip(b.iter()) {
            for (x, y) in ra.iter().zip(rb.iter()) {
                assert!(approx_eq(*x, *y, 1e-12));
            }
        }
    }

    #[test]
    fn local_origin_uses_inverse_rotation() {
        let quarter_turn = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let t = Transform::from_rows([1.0, 2.0, 3.0], quarter_turn).with_local_origin();
        assert!(approx_eq(t.origin[0], 2.0, 1e-12));
        assert!(approx_eq(t.origin[1], -1.0, 1e-12));
        assert!(approx_eq(t.origin[2], 3.0, 1e-12));
    }
}
