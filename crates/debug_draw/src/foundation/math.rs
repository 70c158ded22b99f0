//! Math utilities and types
//!
//! Provides the fundamental math types used throughout the debug-draw
//! pipeline. All vector and matrix types are thin aliases over `nalgebra`.

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// RGBA color, each channel normalized to `[0, 1]`
pub type Color = Vector4<f32>;

/// Named color constants used by the axis primitives and demos
pub mod colors {
    use super::Color;

    /// Opaque red
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

    /// Opaque green
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);

    /// Opaque blue
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

    /// Opaque white
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    /// Opaque yellow
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);

    /// Opaque cyan
    pub const CYAN: Color = Color::new(0.0, 1.0, 1.0, 1.0);

    /// Opaque magenta
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0, 1.0);

    /// Mid gray, handy for ground grids
    pub const GRAY: Color = Color::new(0.5, 0.5, 0.5, 1.0);
}

/// Transform a point by a homogeneous 4x4 matrix, performing the
/// perspective divide when `w` is meaningful.
///
/// Used by the frustum tessellator to unproject NDC-cube corners and by
/// the axis triad to place its endpoints in world space.
pub fn transform_point(matrix: &Mat4, point: Vec3) -> Vec3 {
    let h = matrix * Vec4::new(point.x, point.y, point.z, 1.0);
    if h.w.abs() > f32::EPSILON {
        Vec3::new(h.x / h.w, h.y / h.w, h.z / h.w)
    } else {
        Vec3::new(h.x, h.y, h.z)
    }
}

/// Build an arbitrary orthonormal basis perpendicular to `axis`.
///
/// Returns two unit vectors spanning the plane whose normal is `axis`.
/// The choice of basis is deterministic for a given input.
pub fn perpendicular_basis(axis: Vec3) -> (Vec3, Vec3) {
    let n = axis.normalize();
    // Pick the world axis least aligned with the input to avoid degeneracy.
    let helper = if n.x.abs() < 0.9 {
        Vec3::new(1.0, 0.0, 0.0)
    } else {
        Vec3::new(0.0, 1.0, 0.0)
    };
    let u = n.cross(&helper).normalize();
    let v = n.cross(&u);
    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_point_translation() {
        let m = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        let p = transform_point(&m, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 2.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, 3.0);
    }

    #[test]
    fn test_perpendicular_basis_is_orthonormal() {
        for axis in [
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.3, -0.7, 0.2),
        ] {
            let (u, v) = perpendicular_basis(axis);
            assert_relative_eq!(u.norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(u.dot(&v), 0.0, epsilon = 1e-5);
            assert_relative_eq!(u.dot(&axis.normalize()), 0.0, epsilon = 1e-5);
        }
    }
}
