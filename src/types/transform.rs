//! Affine transforms for quads and element rotations.

use super::Axis;
use glam::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// An affine 4x4 transform applied to quad positions and normals.
///
/// `Transform::default()` is the identity, so an absent transform
/// (`Option<Transform>::None`) behaves as identity via `unwrap_or_default`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        matrix: Mat4::IDENTITY,
    };

    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Build from a row-major 4x4 array, the layout model matrices are usually written in.
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self {
            matrix: Mat4::from_cols_array_2d(&rows).transpose(),
        }
    }

    pub fn from_translation(offset: [f32; 3]) -> Self {
        Self {
            matrix: Mat4::from_translation(Vec3::from(offset)),
        }
    }

    pub fn from_scale(scale: [f32; 3]) -> Self {
        Self {
            matrix: Mat4::from_scale(Vec3::from(scale)),
        }
    }

    /// Counter-clockwise rotation (right-hand rule) around X.
    pub fn from_rotation_x_degrees(degrees: f32) -> Self {
        Self {
            matrix: Mat4::from_rotation_x(degrees.to_radians()),
        }
    }

    /// Counter-clockwise rotation (right-hand rule) around Y.
    pub fn from_rotation_y_degrees(degrees: f32) -> Self {
        Self {
            matrix: Mat4::from_rotation_y(degrees.to_radians()),
        }
    }

    /// Counter-clockwise rotation (right-hand rule) around Z.
    pub fn from_rotation_z_degrees(degrees: f32) -> Self {
        Self {
            matrix: Mat4::from_rotation_z(degrees.to_radians()),
        }
    }

    /// Rotation around an axis passing through `pivot`.
    pub fn rotation_about(pivot: [f32; 3], axis: Axis, degrees: f32) -> Self {
        let pivot = Vec3::from(pivot);
        let rotation = Mat4::from_axis_angle(Vec3::from(axis.unit_vector()), degrees.to_radians());
        Self {
            matrix: Mat4::from_translation(pivot) * rotation * Mat4::from_translation(-pivot),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Compose `self * other`: `other` is applied first, then `self`.
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            matrix: self.matrix * other.matrix,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.matrix == Mat4::IDENTITY
    }

    /// Whether the transform flips handedness (negative determinant).
    ///
    /// Quads transformed by a mirroring matrix need their winding reversed.
    pub fn is_mirroring(&self) -> bool {
        self.matrix.determinant() < 0.0
    }

    pub fn transform_point(&self, point: [f32; 3]) -> [f32; 3] {
        self.matrix.transform_point3(Vec3::from(point)).to_array()
    }

    /// Transform a normal by the inverse-transpose of the linear part and re-normalise.
    pub fn transform_normal(&self, normal: [f32; 3]) -> [f32; 3] {
        let linear = Mat3::from_mat4(self.matrix);
        // Only a singular matrix has no inverse; small scales still do.
        let normal_matrix = if linear.determinant() != 0.0 {
            linear.inverse().transpose()
        } else {
            linear
        };
        (normal_matrix * Vec3::from(normal))
            .normalize_or_zero()
            .to_array()
    }
}

impl From<Mat4> for Transform {
    fn from(matrix: Mat4) -> Self {
        Self::from_matrix(matrix)
    }
}

impl std::ops::Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.then(&rhs)
    }
}

/// Element-level rotation from model element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRotation {
    /// Origin point for rotation (in 0-16 model coordinates).
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],
    /// Axis to rotate around.
    pub axis: Axis,
    /// Rotation angle in degrees (-45 to 45, in 22.5 increments).
    pub angle: f32,
    /// Whether to rescale the element after rotation.
    #[serde(default)]
    pub rescale: bool,
}

fn default_origin() -> [f32; 3] {
    [8.0, 8.0, 8.0]
}

impl ElementRotation {
    /// Convert origin from model coordinates (0-16) to block space (0-1).
    pub fn block_origin(&self) -> [f32; 3] {
        [
            self.origin[0] / 16.0,
            self.origin[1] / 16.0,
            self.origin[2] / 16.0,
        ]
    }

    /// Get the angle in radians.
    pub fn angle_radians(&self) -> f32 {
        self.angle.to_radians()
    }

    /// Get the rescale factor for this rotation.
    /// When rescale is true, the element is scaled to maintain its original size.
    pub fn rescale_factor(&self) -> f32 {
        if self.rescale {
            1.0 / self.angle_radians().cos()
        } else {
            1.0
        }
    }

    /// The full element transform: rotate about the origin, then rescale the two
    /// axes perpendicular to the rotation axis.
    pub fn to_transform(&self) -> Transform {
        let origin = Vec3::from(self.block_origin());
        let rotation = match self.axis {
            Axis::X => Mat4::from_rotation_x(self.angle_radians()),
            Axis::Y => Mat4::from_rotation_y(self.angle_radians()),
            Axis::Z => Mat4::from_rotation_z(self.angle_radians()),
        };
        let factor = self.rescale_factor();
        let scale = match self.axis {
            Axis::X => Vec3::new(1.0, factor, factor),
            Axis::Y => Vec3::new(factor, 1.0, factor),
            Axis::Z => Vec3::new(factor, factor, 1.0),
        };
        Transform::from_matrix(
            Mat4::from_translation(origin)
                * Mat4::from_scale(scale)
                * rotation
                * Mat4::from_translation(-origin),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: [f32; 3], b: [f32; 3]) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-5, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_default_is_identity() {
        assert!(Transform::default().is_identity());
        let absent: Option<Transform> = None;
        assert_eq!(absent.unwrap_or_default(), Transform::IDENTITY);
    }

    #[test]
    fn test_composition_applies_right_operand_first() {
        let translate = Transform::from_translation([1.0, 0.0, 0.0]);
        let rotate = Transform::from_rotation_y_degrees(90.0);

        // Rotate (1,0,0) -> (0,0,-1), then translate by +X.
        let composed = translate.then(&rotate);
        assert_close(composed.transform_point([1.0, 0.0, 0.0]), [1.0, 0.0, -1.0]);
        assert_eq!(composed, translate * rotate);
    }

    #[test]
    fn test_rows_are_transposed_into_columns() {
        let t = Transform::from_rows([
            [1.0, 0.0, 0.0, 5.0],
            [0.0, 1.0, 0.0, 6.0],
            [0.0, 0.0, 1.0, 7.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert_close(t.transform_point([0.0, 0.0, 0.0]), [5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_mirroring_and_normals() {
        let flip = Transform::from_scale([1.0, -1.0, 1.0]);
        assert!(flip.is_mirroring());
        assert_close(flip.transform_normal([0.0, 1.0, 0.0]), [0.0, -1.0, 0.0]);

        let stretch = Transform::from_scale([2.0, 1.0, 1.0]);
        assert!(!stretch.is_mirroring());
        assert_close(stretch.transform_normal([1.0, 0.0, 0.0]), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normals_under_small_non_uniform_scale() {
        let s = 1.0 / 300.0;
        let t = Transform::from_scale([s, 2.0 * s, s]);
        let half = std::f32::consts::FRAC_1_SQRT_2;
        let normal = t.transform_normal([half, half, 0.0]);

        let expected = 1.0 / 1.25f32.sqrt();
        assert_close(normal, [expected, expected / 2.0, 0.0]);
    }

    #[test]
    fn test_rotation_about_pivot() {
        let t = Transform::rotation_about([0.5, 0.5, 0.5], Axis::Y, 180.0);
        assert_close(t.transform_point([0.0, 0.0, 0.0]), [1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_element_rotation_keeps_origin_fixed() {
        let rotation = ElementRotation {
            origin: [8.0, 8.0, 8.0],
            axis: Axis::Y,
            angle: 45.0,
            rescale: true,
        };
        let t = rotation.to_transform();
        assert_close(t.transform_point([0.5, 0.5, 0.5]), [0.5, 0.5, 0.5]);
        assert!((rotation.rescale_factor() - std::f32::consts::SQRT_2).abs() < 1e-5);
    }
}
