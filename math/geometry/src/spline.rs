use crate::*;

/// Piecewise Catmull-Rom interpolation over a borrowed control point
/// sequence. Works for any vector arity through the vector trait stack.
///
/// An open curve treats the first and last control points as phantom
/// neighbors only, so the curve runs from the second point to the
/// second-to-last. A continuous spline wraps around and uses every point as
/// a span start.
pub struct CatmullRomSpline<'a, T, V> {
  pub points: &'a [V],
  pub continuous: bool,
  span_count: usize,
  phantom: std::marker::PhantomData<T>,
}

impl<'a, T, V> CatmullRomSpline<'a, T, V>
where
  T: Scalar,
  V: VectorImpl + InnerProductSpace<T>,
{
  pub fn new(points: &'a [V], continuous: bool) -> Self {
    if continuous {
      assert!(
        !points.is_empty(),
        "continuous catmull-rom spline needs at least 1 control point"
      );
    } else {
      assert!(
        points.len() >= 4,
        "open catmull-rom spline needs at least 4 control points"
      );
    }
    let span_count = if continuous {
      points.len()
    } else {
      points.len() - 3
    };
    Self {
      points,
      continuous,
      span_count,
      phantom: std::marker::PhantomData,
    }
  }

  pub fn span_count(&self) -> usize {
    self.span_count
  }

  fn locate_span(&self, t: T) -> (usize, T) {
    let n = self.span_count;
    let u = t * T::by(n as f32);
    let i = if t >= T::one() {
      n - 1
    } else {
      u.floor().to_usize().unwrap_or(0)
    };
    (i, u - T::by(i as f32))
  }

  pub fn value_at(&self, t: T) -> V {
    let (span, u) = self.locate_span(t);
    self.value_at_span(span, u)
  }

  /// Spline position at `u` in [0, 1] within the given span.
  pub fn value_at_span(&self, span: usize, u: T) -> V {
    let points = self.points;
    let n = points.len();
    let i = if self.continuous { span } else { span + 1 };
    let u2 = u * u;
    let u3 = u2 * u;

    let mut out = points[i] * (T::by(1.5) * u3 - T::by(2.5) * u2 + T::one());
    if self.continuous || i > 0 {
      out = out + points[(n + i - 1) % n] * (T::by(-0.5) * u3 + u2 - T::half() * u);
    }
    if self.continuous || i < n - 1 {
      out = out + points[(i + 1) % n] * (T::by(-1.5) * u3 + T::two() * u2 + T::half() * u);
    }
    if self.continuous || i < n - 2 {
      out = out + points[(i + 2) % n] * (T::half() * u3 - T::half() * u2);
    }
    out
  }

  pub fn derivative_at(&self, t: T) -> V {
    let (span, u) = self.locate_span(t);
    self.derivative_at_span(span, u)
  }

  /// Tangent (not normalized) at `u` in [0, 1] within the given span.
  pub fn derivative_at_span(&self, span: usize, u: T) -> V {
    let points = self.points;
    let n = points.len();
    let i = if self.continuous { span } else { span + 1 };
    let u2 = u * u;

    let mut out = points[i] * (-u * T::by(5.) + u2 * T::by(4.5));
    if self.continuous || i > 0 {
      out = out + points[(n + i - 1) % n] * (T::by(-0.5) + u * T::two() - u2 * T::by(1.5));
    }
    if self.continuous || i < n - 1 {
      out = out + points[(i + 1) % n] * (T::half() + u * T::by(4.) - u2 * T::by(4.5));
    }
    if self.continuous || i < n - 2 {
      out = out + points[(i + 2) % n] * (-u + u2 * T::by(1.5));
    }
    out
  }

  /// Index of the control point closest to `target`, over the span range
  /// starting at `start` wrapping across `count` spans.
  pub fn nearest_in(&self, target: V, start: isize, count: usize) -> usize {
    let n = self.span_count as isize;
    let mut start = start;
    while start < 0 {
      start += n;
    }
    let mut result = (start % n) as usize;
    let mut best = target.distance2(self.points[result]);
    for i in 1..count {
      let idx = ((start as usize) + i) % self.span_count;
      let d = target.distance2(self.points[idx]);
      if d < best {
        best = d;
        result = idx;
      }
    }
    result
  }

  pub fn nearest(&self, target: V) -> usize {
    self.nearest_in(target, 0, self.span_count)
  }

  /// Approximate curve parameter closest to `target`, by projecting onto
  /// the chord between the two nearest control points.
  pub fn approximate(&self, target: V) -> T {
    self.approximate_near(target, self.nearest(target))
  }

  fn approximate_near(&self, target: V, near: usize) -> T {
    let mut n = near;
    let nearest = self.points[n];
    let previous = self.points[if n > 0 { n - 1 } else { self.span_count - 1 }];
    let next = self.points[(n + 1) % self.span_count];
    let dst_prev2 = target.distance2(previous);
    let dst_next2 = target.distance2(next);

    let (p1, p2) = if dst_next2 < dst_prev2 {
      (nearest, next)
    } else {
      n = if n > 0 { n - 1 } else { self.span_count - 1 };
      (previous, nearest)
    };

    // law of cosines projection of the target onto the chord
    let l1_sqr = p1.distance2(p2);
    let l2_sqr = target.distance2(p2);
    let l3_sqr = target.distance2(p1);
    let l1 = l1_sqr.sqrt();
    let s = (l2_sqr + l1_sqr - l3_sqr) / (T::two() * l1);
    let u = ((l1 - s) / l1).max(T::zero()).min(T::one());
    (T::by(n as f32) + u) / T::by(self.span_count as f32)
  }

  pub fn locate(&self, target: V) -> T {
    self.approximate(target)
  }

  /// Polyline length over the given number of samples.
  pub fn approx_length(&self, samples: usize) -> T {
    let mut length = T::zero();
    let mut prev = self.value_at(T::zero());
    for i in 1..samples {
      let cur = self.value_at(T::by(i as f32) / T::by((samples - 1) as f32));
      length += cur.distance(prev);
      prev = cur;
    }
    length
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn open_points() -> Vec<Vec3<f32>> {
    vec![
      Vec3::new(-1., 0., 0.),
      Vec3::new(0., 0., 0.),
      Vec3::new(1., 1., 0.),
      Vec3::new(2., 0., 0.),
      Vec3::new(3., 0., 0.),
    ]
  }

  #[test]
  fn open_spline_endpoints() {
    let points = open_points();
    let spline = CatmullRomSpline::new(&points, false);
    assert_eq!(spline.span_count(), 2);

    // the first and last control points are neighbors only
    let start = spline.value_at(0.);
    let end = spline.value_at(1.);
    assert!((start - points[1]).length() < 1e-5);
    assert!((end - points[3]).length() < 1e-5);
  }

  #[test]
  fn open_spline_passes_through_interior_points() {
    let points = open_points();
    let spline = CatmullRomSpline::new(&points, false);
    let mid = spline.value_at(0.5);
    assert!((mid - points[2]).length() < 1e-5);
  }

  #[test]
  fn continuous_spline_wraps() {
    let points = vec![
      Vec3::<f32>::new(1., 0., 0.),
      Vec3::new(0., 1., 0.),
      Vec3::new(-1., 0., 0.),
      Vec3::new(0., -1., 0.),
    ];
    let spline = CatmullRomSpline::new(&points, true);
    assert_eq!(spline.span_count(), 4);
    let a = spline.value_at(0.);
    assert!((a - points[0]).length() < 1e-5);
    // wrap around ends where it starts
    let b = spline.value_at(1.);
    assert!((b - points[0]).length() < 1e-5);
  }

  #[test]
  fn derivative_points_along_travel_direction() {
    let points = open_points();
    let spline = CatmullRomSpline::new(&points, false);
    let d = spline.derivative_at(0.25);
    assert!(d.x > 0.);
  }

  #[test]
  fn approximate_recovers_parameter_near_control_point() {
    let points = open_points();
    let spline = CatmullRomSpline::new(&points, false);
    let target = Vec3::new(1., 1.05, 0.);
    let t = spline.approximate(target);
    let p = spline.value_at(t);
    assert!((p - Vec3::new(1., 1., 0.)).length() < 0.3);
  }

  #[test]
  fn approx_length_of_straight_segments() {
    let points = vec![
      Vec3::<f32>::new(-1., 0., 0.),
      Vec3::new(0., 0., 0.),
      Vec3::new(1., 0., 0.),
      Vec3::new(2., 0., 0.),
    ];
    let spline = CatmullRomSpline::new(&points, false);
    let len = spline.approx_length(50);
    assert!((len - 1.).abs() < 1e-3);
  }

  #[test]
  #[should_panic(expected = "open catmull-rom spline needs at least 4 control points")]
  fn open_spline_rejects_too_few_points() {
    let points = vec![
      Vec3::<f32>::new(0., 0., 0.),
      Vec3::new(1., 0., 0.),
      Vec3::new(2., 0., 0.),
    ];
    CatmullRomSpline::new(&points, false);
  }

  #[test]
  #[should_panic(expected = "continuous catmull-rom spline needs at least 1 control point")]
  fn continuous_spline_rejects_empty_input() {
    let points: Vec<Vec3<f32>> = vec![];
    CatmullRomSpline::new(&points, true);
  }
}
