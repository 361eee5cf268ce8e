//! 4x4 matrix utilities for 3D affine transforms
//!
//! Matrices are stored column-major as `[[f32; 4]; 4]`, i.e. `m[col][row]`,
//! which is the layout WGSL expects for `mat4x4<f32>` uniforms.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two matrices: `a * b` (applies `b` first, then `a`)
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            result[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    result
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            result[col][row] = m[row][col];
        }
    }
    result
}

/// Translation matrix
pub fn from_translation(t: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = t.x;
    m[3][1] = t.y;
    m[3][2] = t.z;
    m
}

/// Rotation matrix from Euler angles (radians) applied in XYZ order.
///
/// Equivalent to `Rx * Ry * Rz`, so a point is rotated about Z first,
/// then Y, then X.
pub fn from_euler_xyz(euler: Vec3) -> Mat4 {
    let (a, b) = (euler.x.cos(), euler.x.sin());
    let (c, d) = (euler.y.cos(), euler.y.sin());
    let (e, f) = (euler.z.cos(), euler.z.sin());

    let ae = a * e;
    let af = a * f;
    let be = b * e;
    let bf = b * f;

    [
        [c * e, af + be * d, bf - ae * d, 0.0],
        [-c * f, ae - bf * d, be + af * d, 0.0],
        [d, -b * c, a * c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Compose translation, Euler XYZ rotation and per-axis scale: `T * R * S`
pub fn from_trs(translation: Vec3, euler: Vec3, scale: Vec3) -> Mat4 {
    let mut m = from_euler_xyz(euler);
    for row in 0..3 {
        m[0][row] *= scale.x;
        m[1][row] *= scale.y;
        m[2][row] *= scale.z;
    }
    m[3][0] = translation.x;
    m[3][1] = translation.y;
    m[3][2] = translation.z;
    m
}

/// Transform a point (w = 1)
pub fn transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Translation part of an affine matrix
pub fn translation_of(m: &Mat4) -> Vec3 {
    Vec3::new(m[3][0], m[3][1], m[3][2])
}

/// Orientation for an object at `eye` facing `target`.
///
/// Uses the camera convention: the local -Z axis points at the target.
/// If `up` is parallel to the view direction the forward axis is nudged
/// slightly so the basis stays well defined.
pub fn look_at_rotation(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let mut z = eye - target;
    if z.length_squared() == 0.0 {
        z.z = 1.0;
    }
    z = z.normalized();

    let mut x = up.cross(z);
    if x.length_squared() == 0.0 {
        if up.z.abs() == 1.0 {
            z.x += 0.0001;
        } else {
            z.z += 0.0001;
        }
        z = z.normalized();
        x = up.cross(z);
    }
    x = x.normalized();
    let y = z.cross(x);

    [
        [x.x, x.y, x.z, 0.0],
        [y.x, y.y, y.z, 0.0],
        [z.x, z.y, z.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Inverse of a rotation + translation matrix (no scale)
pub fn rigid_inverse(m: &Mat4) -> Mat4 {
    let mut r = IDENTITY;
    for col in 0..3 {
        for row in 0..3 {
            r[col][row] = m[row][col];
        }
    }
    let t = translation_of(m);
    let inv_t = transform_point(&r, -t);
    r[3][0] = inv_t.x;
    r[3][1] = inv_t.y;
    r[3][2] = inv_t.z;
    r
}

/// Right-handed perspective projection with depth mapped to `[0, 1]`
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, near * far * nf, 0.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_identity_mul() {
        let t = from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mul(IDENTITY, t), t);
        assert_eq!(mul(t, IDENTITY), t);
    }

    #[test]
    fn test_translation() {
        let t = from_translation(Vec3::new(1.0, 2.0, 3.0));
        let p = transform_point(&t, Vec3::ZERO);
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_euler_z_rotates_x_to_y() {
        let r = from_euler_xyz(Vec3::new(0.0, 0.0, FRAC_PI_2));
        let p = transform_point(&r, Vec3::X);
        assert!(vec_approx_eq(p, Vec3::Y), "got {:?}", p);
    }

    #[test]
    fn test_euler_x_rotates_y_to_z() {
        let r = from_euler_xyz(Vec3::new(FRAC_PI_2, 0.0, 0.0));
        let p = transform_point(&r, Vec3::Y);
        assert!(vec_approx_eq(p, Vec3::Z), "got {:?}", p);
    }

    #[test]
    fn test_euler_order_is_xyz() {
        let euler = Vec3::new(0.3, -0.7, 1.1);
        let rx = from_euler_xyz(Vec3::new(euler.x, 0.0, 0.0));
        let ry = from_euler_xyz(Vec3::new(0.0, euler.y, 0.0));
        let rz = from_euler_xyz(Vec3::new(0.0, 0.0, euler.z));
        let expected = mul(rx, mul(ry, rz));
        let actual = from_euler_xyz(euler);

        let p = Vec3::new(0.4, -1.2, 2.0);
        assert!(vec_approx_eq(
            transform_point(&actual, p),
            transform_point(&expected, p)
        ));
    }

    #[test]
    fn test_trs_order() {
        // Scale 2, rotate 90 degrees about Z, then translate by 10 on X
        let m = from_trs(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, FRAC_PI_2),
            Vec3::splat(2.0),
        );
        let p = transform_point(&m, Vec3::X);
        assert!(vec_approx_eq(p, Vec3::new(10.0, 2.0, 0.0)), "got {:?}", p);
    }

    #[test]
    fn test_look_at_points_negative_z_at_target() {
        let eye = Vec3::new(0.0, 5.0, 5.0);
        let r = look_at_rotation(eye, Vec3::ZERO, Vec3::Y);
        let forward = transform_point(&r, -Vec3::Z);
        assert!(vec_approx_eq(forward, (Vec3::ZERO - eye).normalized()));
    }

    #[test]
    fn test_look_at_straight_down_is_finite() {
        let r = look_at_rotation(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, Vec3::Y);
        for col in r.iter() {
            for v in col.iter() {
                assert!(v.is_finite());
            }
        }
    }

    #[test]
    fn test_rigid_inverse() {
        let rotation = from_euler_xyz(Vec3::new(0.2, 0.4, -0.9));
        let m = mul(from_translation(Vec3::new(3.0, -1.0, 2.0)), rotation);
        let inv = rigid_inverse(&m);

        let p = Vec3::new(1.0, 2.0, 3.0);
        let back = transform_point(&inv, transform_point(&m, p));
        assert!(vec_approx_eq(p, back), "got {:?}", back);
    }

    #[test]
    fn test_perspective_depth_range() {
        let proj = perspective(FRAC_PI_2, 1.0, 0.1, 100.0);
        // A point on the near plane maps to depth 0
        let clip_z = proj[2][2] * -0.1 + proj[3][2];
        let clip_w = proj[2][3] * -0.1;
        assert!((clip_z / clip_w).abs() < EPSILON);
    }

    #[test]
    fn test_transpose() {
        let m = from_translation(Vec3::new(1.0, 2.0, 3.0));
        let t = transpose(m);
        assert_eq!(t[0][3], 1.0);
        assert_eq!(transpose(t), m);
    }
}
