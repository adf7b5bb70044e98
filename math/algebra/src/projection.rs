use crate::*;

/// Projection constructors targeting the OpenGL clip space convention:
/// right-handed view space looking down -z, and a post-divide z range of
/// [-1, 1].
impl<T: Scalar> Mat4<T> {
  #[rustfmt::skip]
  pub fn perspective(near: T, far: T, fovy: Deg<T>, aspect: T) -> Self {
    let fd = T::one() / (fovy.to_rad() * T::half()).tan();
    let c3 = (far + near) / (near - far);
    let d3 = T::two() * far * near / (near - far);

    Mat4::new(
      fd / aspect, T::zero(), T::zero(),  T::zero(),
      T::zero(),   fd,        T::zero(),  T::zero(),
      T::zero(),   T::zero(), c3,         d3,
      T::zero(),   T::zero(), -T::one(),  T::zero(),
    )
  }

  /// Off-center perspective projection. `left`/`right`/`bottom`/`top` are
  /// the near plane points mapped to the viewport corners.
  #[rustfmt::skip]
  pub fn frustum(left: T, right: T, bottom: T, top: T, near: T, far: T) -> Self {
    let x = T::two() * near / (right - left);
    let y = T::two() * near / (top - bottom);
    let a = (right + left) / (right - left);
    let b = (top + bottom) / (top - bottom);
    let c3 = (far + near) / (near - far);
    let d3 = T::two() * far * near / (near - far);

    Mat4::new(
      x,         T::zero(), a,         T::zero(),
      T::zero(), y,         b,         T::zero(),
      T::zero(), T::zero(), c3,        d3,
      T::zero(), T::zero(), -T::one(), T::zero(),
    )
  }

  #[rustfmt::skip]
  pub fn orthographic(left: T, right: T, bottom: T, top: T, near: T, far: T) -> Self {
    let x = T::two() / (right - left);
    let y = T::two() / (top - bottom);
    let z = -T::two() / (far - near);
    let tx = -(right + left) / (right - left);
    let ty = -(top + bottom) / (top - bottom);
    let tz = -(far + near) / (far - near);

    Mat4::new(
      x,         T::zero(), T::zero(), tx,
      T::zero(), y,         T::zero(), ty,
      T::zero(), T::zero(), z,         tz,
      T::zero(), T::zero(), T::zero(), T::one(),
    )
  }
}

#[test]
fn perspective_matches_cgmath() {
  let m: [f32; 16] = Mat4::<f32>::perspective(0.1, 100., Deg::by(60.), 16. / 9.).into();
  let c = cgmath::perspective(cgmath::Deg(60.0f32), 16. / 9., 0.1, 100.);
  let c: &[f32; 16] = c.as_ref();
  for (a, b) in m.iter().zip(c.iter()) {
    assert!((a - b).abs() < 1e-5);
  }
}

#[test]
fn orthographic_matches_cgmath() {
  let m: [f32; 16] = Mat4::<f32>::orthographic(-2., 3., -1., 4., 0.1, 50.).into();
  let c = cgmath::ortho(-2.0f32, 3., -1., 4., 0.1, 50.);
  let c: &[f32; 16] = c.as_ref();
  for (a, b) in m.iter().zip(c.iter()) {
    assert!((a - b).abs() < 1e-5);
  }
}

#[test]
fn unit_cube_orthographic_is_scale_only() {
  let m: [f32; 16] = Mat4::<f32>::orthographic(-1., 1., -1., 1., -1., 1.).into();
  let expect: [f32; 16] = Mat4::<f32>::scale((1., 1., -1.)).into();
  assert_eq!(m, expect);
}

#[test]
fn frustum_agrees_with_symmetric_perspective() {
  let near = 0.5f32;
  let far = 200.;
  let fovy = 45.0f32;
  let aspect = 2.0;
  let top = near * (fovy.to_radians() * 0.5).tan();
  let right = top * aspect;

  let p: [f32; 16] = Mat4::<f32>::perspective(near, far, Deg::by(fovy), aspect).into();
  let f: [f32; 16] = Mat4::<f32>::frustum(-right, right, -top, top, near, far).into();
  for (a, b) in p.iter().zip(f.iter()) {
    assert!((a - b).abs() < 1e-5);
  }
}
