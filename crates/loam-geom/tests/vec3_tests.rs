use loam_geom::{BlockPos, Vec3, round_half_up};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_constants() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::UP, Vec3::new(0.0, 1.0, 0.0), 1e-6));
}

#[test]
fn vec3_add_sub_neg() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq(c - a, b, 1e-6));
    assert!(vec3_approx_eq(-a, Vec3::new(-1.0, -2.0, -3.0), 1e-6));
}

#[test]
fn vec3_add_assign_sub_assign() {
    let mut v = Vec3::new(1.0, 1.0, 1.0);
    v += Vec3::new(2.0, 3.0, 4.0);
    assert!(vec3_approx_eq(v, Vec3::new(3.0, 4.0, 5.0), 1e-6));
    v -= Vec3::new(1.0, 2.0, 3.0);
    assert!(vec3_approx_eq(v, Vec3::new(2.0, 2.0, 2.0), 1e-6));
}

#[test]
fn vec3_normalized() {
    let n = Vec3::new(3.0, 0.0, 4.0).normalized();
    assert!(approx_eq(n.length(), 1.0, 1e-6));
    assert!(vec3_approx_eq(n, Vec3::new(0.6, 0.0, 0.8), 1e-6));
    // zero stays zero instead of turning into NaN
    assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
}

#[test]
fn point_on_face_rounds_into_adjacent_blocks() {
    // +X face of block (2, 3, -1) sits at x = 2.5
    let hit = Vec3::new(2.5, 3.2, -1.3);
    let normal = Vec3::new(1.0, 0.0, 0.0);
    assert_eq!(BlockPos::from_rounded(hit - normal * 0.5), BlockPos::new(2, 3, -1));
    assert_eq!(BlockPos::from_rounded(hit + normal * 0.5), BlockPos::new(3, 3, -1));
}

#[test]
fn rounding_is_sign_independent() {
    assert_eq!(round_half_up(-3.5), -3);
    assert_eq!(round_half_up(3.5), 4);
    assert_eq!(BlockPos::from_rounded(Vec3::new(-0.5, 0.5, -0.49)), BlockPos::new(0, 1, 0));
}
