//! Geometry tessellation
//!
//! Pure, stateless conversion of shape descriptors into line-segment
//! vertex runs. Every function is deterministic: identical inputs yield
//! byte-identical vertex sequences, so golden-output tests are valid.
//! Invalid parameters report [`DrawError::InvalidShape`] and produce no
//! geometry, never a degenerate vertex run.
//!
//! Output vertices come in endpoint pairs: vertices `2i` and `2i + 1`
//! form segment `i`.

use crate::context::{DrawError, DrawResult};
use crate::foundation::math::{colors, perpendicular_basis, transform_point, Color, Mat4, Vec3};
use crate::vertex::DrawVertex;

/// Push one line segment as an endpoint pair.
fn push_segment(out: &mut Vec<DrawVertex>, from: Vec3, to: Vec3, color: Color) {
    out.push(DrawVertex::line(from, color));
    out.push(DrawVertex::line(to, color));
}

/// Push a closed polyline approximating a circle.
///
/// The circle lies in the plane spanned by `axis_u`/`axis_v` around
/// `center`, sampled at `segments` evenly spaced angles starting at
/// `axis_u`.
fn push_circle(
    out: &mut Vec<DrawVertex>,
    center: Vec3,
    axis_u: Vec3,
    axis_v: Vec3,
    radius: f32,
    segments: u32,
    color: Color,
) {
    let step = std::f32::consts::TAU / segments as f32;
    let mut prev = center + axis_u * radius;
    for i in 1..=segments {
        let angle = step * i as f32;
        let next = center + axis_u * (radius * angle.cos()) + axis_v * (radius * angle.sin());
        push_segment(out, prev, next, color);
        prev = next;
    }
}

/// Sample point `i` of `segments` on the circle spanned by `axis_u`/`axis_v`.
fn circle_point(center: Vec3, axis_u: Vec3, axis_v: Vec3, radius: f32, i: u32, segments: u32) -> Vec3 {
    let angle = std::f32::consts::TAU * i as f32 / segments as f32;
    center + axis_u * (radius * angle.cos()) + axis_v * (radius * angle.sin())
}

pub(crate) fn check_box(half_extents: Vec3) -> DrawResult<()> {
    if half_extents.x <= 0.0 || half_extents.y <= 0.0 || half_extents.z <= 0.0 {
        return Err(DrawError::InvalidShape(format!(
            "box half extents must be positive, got ({}, {}, {})",
            half_extents.x, half_extents.y, half_extents.z
        )));
    }
    Ok(())
}

/// The 12 edges of an axis-aligned cuboid centered at `center`.
pub fn box_wireframe(center: Vec3, half_extents: Vec3, color: Color) -> DrawResult<Vec<DrawVertex>> {
    check_box(half_extents)?;

    let corner = |sx: f32, sy: f32, sz: f32| {
        center + Vec3::new(half_extents.x * sx, half_extents.y * sy, half_extents.z * sz)
    };
    let c = [
        corner(-1.0, -1.0, -1.0),
        corner(1.0, -1.0, -1.0),
        corner(1.0, 1.0, -1.0),
        corner(-1.0, 1.0, -1.0),
        corner(-1.0, -1.0, 1.0),
        corner(1.0, -1.0, 1.0),
        corner(1.0, 1.0, 1.0),
        corner(-1.0, 1.0, 1.0),
    ];

    let mut out = Vec::with_capacity(24);
    // Bottom face, top face, then vertical edges.
    for (a, b) in [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ] {
        push_segment(&mut out, c[a], c[b], color);
    }
    Ok(out)
}

/// Wireframe sphere as latitude rings plus meridian circles.
///
/// `subdivisions` controls detail: `subdivisions - 1` latitude rings
/// and `subdivisions` meridian circles, each sampled at
/// `2 * subdivisions` segments. Output size depends only on
/// `subdivisions`, never on `radius`.
pub(crate) fn check_sphere(radius: f32, subdivisions: u32) -> DrawResult<()> {
    if radius <= 0.0 {
        return Err(DrawError::InvalidShape(format!(
            "sphere radius must be positive, got {radius}"
        )));
    }
    if subdivisions < 3 {
        return Err(DrawError::InvalidShape(format!(
            "sphere subdivisions must be at least 3, got {subdivisions}"
        )));
    }
    Ok(())
}

pub fn sphere(
    center: Vec3,
    color: Color,
    radius: f32,
    subdivisions: u32,
) -> DrawResult<Vec<DrawVertex>> {
    check_sphere(radius, subdivisions)?;

    let n = subdivisions;
    let ring_segments = n * 2;
    let mut out = Vec::with_capacity(((n - 1 + n) * ring_segments * 2) as usize);

    let x_axis = Vec3::new(1.0, 0.0, 0.0);
    let z_axis = Vec3::new(0.0, 0.0, 1.0);

    // Latitude rings, pole to pole, excluding the degenerate poles.
    for ring in 1..n {
        let polar = std::f32::consts::PI * ring as f32 / n as f32;
        let ring_center = center + Vec3::new(0.0, radius * polar.cos(), 0.0);
        push_circle(
            &mut out,
            ring_center,
            x_axis,
            z_axis,
            radius * polar.sin(),
            ring_segments,
            color,
        );
    }

    // Meridians: full circles through both poles, rotated about Y.
    for meridian in 0..n {
        let azimuth = std::f32::consts::PI * meridian as f32 / n as f32;
        let axis_u = Vec3::new(azimuth.cos(), 0.0, azimuth.sin());
        let axis_v = Vec3::new(0.0, 1.0, 0.0);
        push_circle(&mut out, center, axis_u, axis_v, radius, ring_segments, color);
    }

    Ok(out)
}

/// Wireframe cone: base circle plus radial lines from the apex to each
/// base sample point.
pub(crate) fn check_cone(
    direction: Vec3,
    length: f32,
    base_radius: f32,
    segments: u32,
) -> DrawResult<()> {
    if length <= 0.0 || base_radius <= 0.0 {
        return Err(DrawError::InvalidShape(format!(
            "cone length and radius must be positive, got length {length}, radius {base_radius}"
        )));
    }
    if direction.norm_squared() <= f32::EPSILON {
        return Err(DrawError::InvalidShape(
            "cone direction must be non-zero".to_string(),
        ));
    }
    if segments < 3 {
        return Err(DrawError::InvalidShape(format!(
            "cone segments must be at least 3, got {segments}"
        )));
    }
    Ok(())
}

pub fn cone(
    apex: Vec3,
    direction: Vec3,
    color: Color,
    length: f32,
    base_radius: f32,
    segments: u32,
) -> DrawResult<Vec<DrawVertex>> {
    check_cone(direction, length, base_radius, segments)?;

    let dir = direction.normalize();
    let base_center = apex + dir * length;
    let (axis_u, axis_v) = perpendicular_basis(dir);

    let mut out = Vec::with_capacity((segments * 4) as usize);
    push_circle(&mut out, base_center, axis_u, axis_v, base_radius, segments, color);
    for i in 0..segments {
        let rim = circle_point(base_center, axis_u, axis_v, base_radius, i, segments);
        push_segment(&mut out, apex, rim, color);
    }
    Ok(out)
}

/// Arrow from `from` to `to`: a shaft segment plus a cone head.
///
/// `head_size` is the head length; the head radius is half of it.
pub(crate) fn check_arrow(from: Vec3, to: Vec3, head_size: f32) -> DrawResult<()> {
    if (to - from).norm_squared() <= f32::EPSILON {
        return Err(DrawError::InvalidShape(
            "arrow endpoints must be distinct".to_string(),
        ));
    }
    if head_size <= 0.0 {
        return Err(DrawError::InvalidShape(format!(
            "arrow head size must be positive, got {head_size}"
        )));
    }
    Ok(())
}

pub fn arrow(
    from: Vec3,
    to: Vec3,
    color: Color,
    head_size: f32,
    segments: u32,
) -> DrawResult<Vec<DrawVertex>> {
    check_arrow(from, to, head_size)?;

    let dir = (to - from).normalize();
    let head_apex = to;
    let mut out = Vec::with_capacity(2 + (segments * 4) as usize);
    push_segment(&mut out, from, to, color);
    // Head cone points back toward the shaft so its base sits behind the tip.
    out.extend(cone(head_apex, -dir, color, head_size, head_size * 0.5, segments)?);
    Ok(out)
}

/// Three axis-colored segments crossing at `center`, each `length` long.
///
/// X is red, Y is green, Z is blue.
pub(crate) fn check_cross(length: f32) -> DrawResult<()> {
    if length <= 0.0 {
        return Err(DrawError::InvalidShape(format!(
            "cross length must be positive, got {length}"
        )));
    }
    Ok(())
}

pub fn cross(center: Vec3, length: f32) -> DrawResult<Vec<DrawVertex>> {
    check_cross(length)?;
    let half = length * 0.5;
    let mut out = Vec::with_capacity(6);
    push_segment(
        &mut out,
        center - Vec3::new(half, 0.0, 0.0),
        center + Vec3::new(half, 0.0, 0.0),
        colors::RED,
    );
    push_segment(
        &mut out,
        center - Vec3::new(0.0, half, 0.0),
        center + Vec3::new(0.0, half, 0.0),
        colors::GREEN,
    );
    push_segment(
        &mut out,
        center - Vec3::new(0.0, 0.0, half),
        center + Vec3::new(0.0, 0.0, half),
        colors::BLUE,
    );
    Ok(out)
}

/// Axis triad: arrows along +X/+Y/+Z of `transform` in red/green/blue.
///
/// `length` scales the axes, `head_size` the arrow heads.
pub(crate) fn check_axis_triad(head_size: f32, length: f32) -> DrawResult<()> {
    if length <= 0.0 || head_size <= 0.0 {
        return Err(DrawError::InvalidShape(format!(
            "axis triad length and head size must be positive, got length {length}, head {head_size}"
        )));
    }
    Ok(())
}

pub fn axis_triad(
    transform: &Mat4,
    head_size: f32,
    length: f32,
    segments: u32,
) -> DrawResult<Vec<DrawVertex>> {
    check_axis_triad(head_size, length)?;

    let origin = transform_point(transform, Vec3::zeros());
    let axes = [
        (Vec3::new(length, 0.0, 0.0), colors::RED),
        (Vec3::new(0.0, length, 0.0), colors::GREEN),
        (Vec3::new(0.0, 0.0, length), colors::BLUE),
    ];

    let mut out = Vec::new();
    for (axis, color) in axes {
        let tip = transform_point(transform, axis);
        out.extend(arrow(origin, tip, color, head_size, segments)?);
    }
    Ok(out)
}

/// Wireframe view frustum: the NDC cube corners unprojected through
/// `inv_clip` (the inverse of a view-projection matrix).
///
/// NDC depth follows the GL convention, `z` in `[-1, 1]`.
pub fn frustum(inv_clip: &Mat4, color: Color) -> DrawResult<Vec<DrawVertex>> {
    let ndc = [
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
    ];
    let c: Vec<Vec3> = ndc.iter().map(|p| transform_point(inv_clip, *p)).collect();

    let mut out = Vec::with_capacity(24);
    // Near face, far face, then connecting edges.
    for (a, b) in [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ] {
        push_segment(&mut out, c[a], c[b], color);
    }
    Ok(out)
}

/// Ground grid on the XZ plane at height `y_level`.
///
/// Produces `floor((maxs - mins) / step) + 1` parallel lines along each
/// of X and Z, spaced `step` apart between `mins` and `maxs`.
pub(crate) fn check_xz_square_grid(mins: f32, maxs: f32, step: f32) -> DrawResult<()> {
    if step <= 0.0 {
        return Err(DrawError::InvalidShape(format!(
            "grid step must be positive, got {step}"
        )));
    }
    if mins >= maxs {
        return Err(DrawError::InvalidShape(format!(
            "grid range must satisfy mins < maxs, got [{mins}, {maxs}]"
        )));
    }
    Ok(())
}

pub fn xz_square_grid(
    mins: f32,
    maxs: f32,
    y_level: f32,
    step: f32,
    color: Color,
) -> DrawResult<Vec<DrawVertex>> {
    check_xz_square_grid(mins, maxs, step)?;

    // Integer line count avoids accumulated float drift across spans.
    let lines = ((maxs - mins) / step).floor() as u32 + 1;
    let mut out = Vec::with_capacity((lines * 4) as usize);
    for i in 0..lines {
        let coord = mins + step * i as f32;
        // Lines along Z at fixed X, then along X at fixed Z.
        push_segment(
            &mut out,
            Vec3::new(coord, y_level, mins),
            Vec3::new(coord, y_level, maxs),
            color,
        );
        push_segment(
            &mut out,
            Vec3::new(mins, y_level, coord),
            Vec3::new(maxs, y_level, coord),
            color,
        );
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::colors::WHITE;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_has_twelve_edges() {
        let verts = box_wireframe(Vec3::zeros(), Vec3::new(1.0, 2.0, 3.0), WHITE).unwrap();
        assert_eq!(verts.len(), 24);
    }

    #[test]
    fn test_box_rejects_flat_extents() {
        assert!(box_wireframe(Vec3::zeros(), Vec3::new(1.0, 0.0, 1.0), WHITE).is_err());
    }

    #[test]
    fn test_tessellation_is_deterministic() {
        let a = sphere(Vec3::new(1.0, 2.0, 3.0), WHITE, 2.5, 12).unwrap();
        let b = sphere(Vec3::new(1.0, 2.0, 3.0), WHITE, 2.5, 12).unwrap();
        assert_eq!(a, b);

        let a = cone(Vec3::zeros(), Vec3::new(0.0, -1.0, 0.0), WHITE, 2.0, 0.5, 16).unwrap();
        let b = cone(Vec3::zeros(), Vec3::new(0.0, -1.0, 0.0), WHITE, 2.0, 0.5, 16).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sphere_size_depends_only_on_subdivisions() {
        let small = sphere(Vec3::zeros(), WHITE, 0.1, 8).unwrap();
        let large = sphere(Vec3::zeros(), WHITE, 100.0, 8).unwrap();
        assert_eq!(small.len(), large.len());
        // n-1 latitude rings + n meridians, 2n segments each, 2 verts per segment.
        assert_eq!(small.len(), (7 + 8) * 16 * 2);
    }

    #[test]
    fn test_sphere_rejects_zero_radius() {
        assert!(sphere(Vec3::zeros(), WHITE, 0.0, 12).is_err());
    }

    #[test]
    fn test_sphere_points_lie_on_surface() {
        let center = Vec3::new(5.0, -2.0, 1.0);
        for v in sphere(center, WHITE, 3.0, 6).unwrap() {
            let p = Vec3::new(v.position[0], v.position[1], v.position[2]);
            assert_relative_eq!((p - center).norm(), 3.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_cone_segments_and_radials() {
        let verts = cone(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0), WHITE, 1.0, 0.5, 16).unwrap();
        // 16 base-circle segments + 16 radial lines.
        assert_eq!(verts.len(), 16 * 2 + 16 * 2);
    }

    #[test]
    fn test_cone_rejects_zero_direction() {
        assert!(cone(Vec3::zeros(), Vec3::zeros(), WHITE, 1.0, 0.5, 16).is_err());
    }

    #[test]
    fn test_cross_uses_axis_colors() {
        let verts = cross(Vec3::zeros(), 2.0).unwrap();
        assert_eq!(verts.len(), 6);
        assert_eq!(verts[0].color, <[f32; 4]>::from(colors::RED));
        assert_eq!(verts[2].color, <[f32; 4]>::from(colors::GREEN));
        assert_eq!(verts[4].color, <[f32; 4]>::from(colors::BLUE));
        // X endpoints straddle the center.
        assert_relative_eq!(verts[0].position[0], -1.0);
        assert_relative_eq!(verts[1].position[0], 1.0);
    }

    #[test]
    fn test_axis_triad_identity_origin() {
        let verts = axis_triad(&Mat4::identity(), 0.2, 1.0, 8).unwrap();
        // First segment is the X shaft from the origin.
        assert_eq!(verts[0].position, [0.0, 0.0, 0.0]);
        assert_relative_eq!(verts[1].position[0], 1.0);
        assert_eq!(verts[0].color, <[f32; 4]>::from(colors::RED));
    }

    #[test]
    fn test_frustum_identity_is_ndc_cube() {
        let verts = frustum(&Mat4::identity(), WHITE).unwrap();
        assert_eq!(verts.len(), 24);
        for v in &verts {
            for c in v.position {
                assert!(c.abs() <= 1.0 + 1e-6);
            }
        }
    }

    #[test]
    fn test_grid_line_count() {
        // floor((10 - -10) / 2.5) + 1 = 9 lines per axis, 2 verts per line.
        let verts = xz_square_grid(-10.0, 10.0, 0.0, 2.5, WHITE).unwrap();
        assert_eq!(verts.len(), 9 * 2 * 2);
    }

    #[test]
    fn test_grid_rejects_bad_parameters() {
        assert!(xz_square_grid(-10.0, 10.0, 0.0, 0.0, WHITE).is_err());
        assert!(xz_square_grid(-10.0, 10.0, 0.0, -1.0, WHITE).is_err());
        assert!(xz_square_grid(5.0, 5.0, 0.0, 1.0, WHITE).is_err());
        assert!(xz_square_grid(6.0, 5.0, 0.0, 1.0, WHITE).is_err());
    }

    #[test]
    fn test_grid_lines_sit_at_y_level() {
        for v in xz_square_grid(-2.0, 2.0, 1.5, 1.0, WHITE).unwrap() {
            assert_relative_eq!(v.position[1], 1.5);
        }
    }
}
