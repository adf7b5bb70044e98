use crate::*;

/// A truncated rectangular pyramid bounding the viewable region.
///
/// Built from the inverse of a combined projection-view matrix by projecting
/// the eight canonical clip space corners back into world space. Callers are
/// expected to rebuild it with [`Frustum::update`] whenever the camera
/// changes, typically once per frame before running visibility queries.
#[derive(Debug, Copy, Clone)]
pub struct Frustum<T: Scalar = f32> {
  /// near, far, left, right, top, bottom
  pub planes: [Plane<T>; 6],
  /// world space corners, counter clockwise starting at bottom left, near
  /// rectangle first
  pub corners: [Vec3<T>; 8],
}

fn clip_space_corners<T: Scalar>() -> [Vec3<T>; 8] {
  let o = T::one();
  let n = -T::one();
  [
    Vec3::new(n, n, n),
    Vec3::new(o, n, n),
    Vec3::new(o, o, n),
    Vec3::new(n, o, n),
    Vec3::new(n, n, o),
    Vec3::new(o, n, o),
    Vec3::new(o, o, o),
    Vec3::new(n, o, o),
  ]
}

impl<T: Scalar> Default for Frustum<T> {
  /// Clips against the [-1, 1] cube until the first [`Frustum::update`].
  fn default() -> Self {
    let unit_cube = Mat4::orthographic(
      -T::one(),
      T::one(),
      -T::one(),
      T::one(),
      -T::one(),
      T::one(),
    );
    Self::from_matrix(unit_cube.inverse_or_identity())
  }
}

impl<T: Scalar> Frustum<T> {
  pub fn from_matrix(inverse_projection_view: Mat4<T>) -> Self {
    let mut corners = clip_space_corners::<T>();
    for c in corners.iter_mut() {
      *c = c.apply_mat4(inverse_projection_view);
    }

    let planes = [
      Plane::from_points(corners[1], corners[0], corners[2]),
      Plane::from_points(corners[4], corners[5], corners[7]),
      Plane::from_points(corners[0], corners[4], corners[3]),
      Plane::from_points(corners[5], corners[1], corners[6]),
      Plane::from_points(corners[2], corners[3], corners[6]),
      Plane::from_points(corners[4], corners[0], corners[1]),
    ];

    Self { planes, corners }
  }

  pub fn update(&mut self, inverse_projection_view: Mat4<T>) {
    *self = Self::from_matrix(inverse_projection_view);
  }

  pub fn contains_point(&self, point: Vec3<T>) -> bool {
    for p in &self.planes {
      if p.test_point(point) == PlaneSide::Back {
        return false;
      }
    }
    true
  }

  /// Conservative sphere test, true when the sphere is at least partially
  /// inside.
  pub fn intersects_sphere(&self, center: Vec3<T>, radius: T) -> bool {
    for p in &self.planes {
      if p.normal.value.dot(center) < -radius - p.d {
        return false;
      }
    }
    true
  }

  /// Sphere test skipping the near and far planes.
  pub fn intersects_sphere_without_near_far(&self, center: Vec3<T>, radius: T) -> bool {
    for p in &self.planes[2..6] {
      if p.normal.value.dot(center) < -radius - p.d {
        return false;
      }
    }
    true
  }

  /// Conservative AABB test. The box is rejected only when some plane has
  /// all eight box corners behind it.
  pub fn intersects_bounds(&self, min: Vec3<T>, max: Vec3<T>) -> bool {
    let box_corners = [
      Vec3::new(min.x, min.y, min.z),
      Vec3::new(max.x, min.y, min.z),
      Vec3::new(min.x, max.y, min.z),
      Vec3::new(max.x, max.y, min.z),
      Vec3::new(min.x, min.y, max.z),
      Vec3::new(max.x, min.y, max.z),
      Vec3::new(min.x, max.y, max.z),
      Vec3::new(max.x, max.y, max.z),
    ];

    for p in &self.planes {
      let all_behind = box_corners
        .iter()
        .all(|c| p.test_point(*c) == PlaneSide::Back);
      if all_behind {
        return false;
      }
    }
    true
  }
}

// The plane winding relies on the handedness flip every GL projection
// matrix carries (negative determinant), so even the unit cube goes through
// an orthographic matrix here.
#[cfg(test)]
fn unit_cube_frustum() -> Frustum<f32> {
  let projection = Mat4::<f32>::orthographic(-1., 1., -1., 1., -1., 1.);
  Frustum::from_matrix(projection.inverse().unwrap())
}

#[test]
fn point_queries_against_unit_cube() {
  let f = unit_cube_frustum();
  assert!(f.contains_point(Vec3::new(0., 0., 0.)));
  assert!(f.contains_point(Vec3::new(0.9, -0.9, 0.5)));
  assert!(!f.contains_point(Vec3::new(2., 0., 0.)));
  assert!(!f.contains_point(Vec3::new(0., -1.5, 0.)));
}

#[test]
fn sphere_queries_against_unit_cube() {
  let f = unit_cube_frustum();
  assert!(f.intersects_sphere(Vec3::new(0., 0., 0.), 0.5));
  assert!(f.intersects_sphere(Vec3::new(1.4, 0., 0.), 0.5));
  assert!(!f.intersects_sphere(Vec3::new(3., 0., 0.), 0.5));

  // outside only through the far plane
  assert!(!f.intersects_sphere(Vec3::new(0., 0., 5.), 0.5));
  assert!(f.intersects_sphere_without_near_far(Vec3::new(0., 0., 5.), 0.5));
}

#[test]
fn bounds_queries_against_unit_cube() {
  let f = unit_cube_frustum();
  assert!(f.intersects_bounds(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.5, 0.5)));
  assert!(f.intersects_bounds(Vec3::new(0.5, 0.5, 0.5), Vec3::new(2., 2., 2.)));
  assert!(!f.intersects_bounds(Vec3::new(2., 2., 2.), Vec3::new(3., 3., 3.)));
}

#[test]
fn perspective_frustum_looks_down_negative_z() {
  let projection = Mat4::<f32>::perspective(0.1, 100., Deg::by(60.), 1.);
  let view = Mat4::look_at_from(
    Vec3::new(0., 0., 0.),
    Vec3::new(0., 0., -1.),
    Vec3::new(0., 1., 0.),
  );
  let f = Frustum::from_matrix((projection * view).inverse().unwrap());

  assert!(f.contains_point(Vec3::new(0., 0., -10.)));
  assert!(!f.contains_point(Vec3::new(0., 0., 10.)));
  assert!(!f.contains_point(Vec3::new(0., 0., -200.)));
}
