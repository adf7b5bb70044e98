use crate::*;

/// Which side of a plane a point lies on. `Front` is the side the normal
/// points to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlaneSide {
  Front,
  Back,
  OnPlane,
}

/// A plane in Hessian normal form: a unit normal plus the signed distance
/// `d` to the origin, satisfying `normal . p + d == 0` for points on the
/// plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane<T: Scalar = f32> {
  pub normal: NormalizedVec3<T>,
  pub d: T,
}

impl<T: Scalar> Plane<T> {
  pub fn new(normal: NormalizedVec3<T>, d: T) -> Self {
    Self { normal, d }
  }

  /// The normal is renormalized, so `normal` may be any non-zero vector.
  pub fn from_point_and_normal(point: Vec3<T>, normal: Vec3<T>) -> Self {
    let normal = normal.into_normalized();
    let d = -normal.value.dot(point);
    Self::new(normal, d)
  }

  /// Plane through three points, with the normal derived from the cross
  /// product `(p1 - p2) x (p2 - p3)`.
  pub fn from_points(p1: Vec3<T>, p2: Vec3<T>, p3: Vec3<T>) -> Self {
    let normal = (p1 - p2).cross(p2 - p3).into_normalized();
    let d = -p1.dot(normal.value);
    Self::new(normal, d)
  }

  /// Shortest signed distance to the point. Positive in front of the plane,
  /// negative behind it.
  pub fn distance(&self, point: Vec3<T>) -> T {
    self.normal.value.dot(point) + self.d
  }

  /// Classifies the point against the plane. The `OnPlane` branch compares
  /// against exact zero, not a tolerance, so it is rarely taken for
  /// computed points.
  pub fn test_point(&self, point: Vec3<T>) -> PlaneSide {
    let dist = self.distance(point);
    if dist == T::zero() {
      PlaneSide::OnPlane
    } else if dist < T::zero() {
      PlaneSide::Back
    } else {
      PlaneSide::Front
    }
  }

  /// Whether the front side of the plane faces against the given view
  /// direction.
  pub fn is_front_facing(&self, direction: Vec3<T>) -> bool {
    self.normal.value.dot(direction) <= T::zero()
  }

  /// Intersection point of the ray's supporting line with the plane, None
  /// when the ray is parallel to it.
  pub fn intersect_ray(&self, ray: &Ray<T>) -> Option<Vec3<T>> {
    let denom = ray.direction.value.dot(self.normal.value);
    if denom == T::zero() {
      return None;
    }
    let t = self.distance(ray.origin) / denom;
    Some(ray.origin - ray.direction.value * t)
  }

  pub fn flip(&self) -> Self {
    Self::new(self.normal.reverse(), -self.d)
  }
}

#[test]
fn signed_distance_convention() {
  let p = Plane::from_point_and_normal(Vec3::new(0., 5., 0.), Vec3::new(0., 1., 0.));
  assert_eq!(p.distance(Vec3::new(0., 10., 0.)), 5.);
  assert_eq!(p.distance(Vec3::new(0., 0., 0.)), -5.);
  assert_eq!(p.test_point(Vec3::new(0., 10., 0.)), PlaneSide::Front);
  assert_eq!(p.test_point(Vec3::new(0., 0., 0.)), PlaneSide::Back);
  assert_eq!(p.test_point(Vec3::new(3., 5., -2.)), PlaneSide::OnPlane);
}

#[test]
fn three_point_construction_matches_point_normal() {
  let a = Plane::from_points(
    Vec3::new(0., 1., 0.),
    Vec3::new(1., 1., 0.),
    Vec3::new(1., 1., 1.),
  );
  let b = Plane::<f32>::from_point_and_normal(Vec3::new(0., 1., 0.), Vec3::new(0., 1., 0.));
  assert!((a.normal.value - b.normal.value).length() < 1e-6 || (a.normal.value + b.normal.value).length() < 1e-6);
  assert!((a.d.abs() - b.d.abs()).abs() < 1e-6);
}

#[test]
fn ray_intersection() {
  let plane = Plane::from_point_and_normal(Vec3::new(0., 2., 0.), Vec3::new(0., 1., 0.));
  let ray = Ray::new(
    Vec3::new(1., 10., 3.),
    Vec3::new(0., -1., 0.).into_normalized(),
  );
  let hit = plane.intersect_ray(&ray).unwrap();
  assert!((hit - Vec3::new(1., 2., 3.)).length() < 1e-5);

  let parallel = Ray::new(
    Vec3::new(0., 10., 0.),
    Vec3::new(1., 0., 0.).into_normalized(),
  );
  assert!(plane.intersect_ray(&parallel).is_none());
}

#[test]
fn front_facing_test() {
  let plane = Plane::<f32>::from_point_and_normal(Vec3::new(0., 0., 0.), Vec3::new(0., 0., 1.));
  assert!(plane.is_front_facing(Vec3::new(0., 0., -1.)));
  assert!(!plane.is_front_facing(Vec3::new(0., 0., 1.)));
}
