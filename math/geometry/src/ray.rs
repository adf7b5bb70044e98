use crate::*;

/// Half-line with a unit direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray<T: Scalar = f32> {
  pub origin: Vec3<T>,
  pub direction: NormalizedVec3<T>,
}

impl<T: Scalar> Ray<T> {
  pub fn new(origin: Vec3<T>, direction: NormalizedVec3<T>) -> Self {
    Self { origin, direction }
  }

  pub fn from_origin_to_target(origin: Vec3<T>, target: Vec3<T>) -> Self {
    Self::new(origin, (target - origin).into_normalized())
  }

  pub fn at(&self, distance: T) -> Vec3<T> {
    self.origin + self.direction * distance
  }

  /// Transforms origin and a second point on the ray, then renormalizes the
  /// direction between them. Works for any affine matrix including
  /// nonuniform scale.
  #[must_use]
  pub fn apply_matrix(&self, mat: Mat4<T>) -> Self {
    let origin = self.origin.apply_mat4(mat);
    let tip = self.at(T::one()).apply_mat4(mat);
    Self::new(origin, (tip - origin).into_normalized())
  }
}

#[test]
fn point_along_ray() {
  let r = Ray::new(Vec3::new(1., 0., 0.), Vec3::new(0., 1., 0.).into_normalized());
  assert_eq!(r.at(3.), Vec3::new(1., 3., 0.));
}

#[test]
fn matrix_application_renormalizes_direction() {
  let r = Ray::from_origin_to_target(Vec3::new(0., 0., 0.), Vec3::new(1., 0., 0.));
  let m = Mat4::<f32>::translate((0., 5., 0.)) * Mat4::scale((4., 1., 1.));
  let r2 = r.apply_matrix(m);
  assert!((r2.origin - Vec3::new(0., 5., 0.)).length() < 1e-6);
  assert!((r2.direction.value - Vec3::new(1., 0., 0.)).length() < 1e-6);
  assert!((r2.direction.value.length() - 1.).abs() < 1e-6);
}
