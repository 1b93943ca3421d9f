//! Voxel traversal over unit cubes centred on integer coordinates, so block
//! `(x, y, z)` spans `[x - 0.5, x + 0.5]` on each axis.
use loam_geom::{BlockPos, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// First solid block entered.
    pub block: BlockPos,
    /// Empty block traversed just before it.
    pub prev: BlockPos,
    /// Outward normal of the face that was crossed; zero if the ray
    /// started inside `block`.
    pub normal: (i32, i32, i32),
    /// Distance along the normalized direction to the face.
    pub t: f32,
}

#[inline]
fn inv_or_max(v: f32) -> f32 {
    if v.abs() < 1e-8 { f32::MAX } else { 1.0 / v.abs() }
}

#[inline]
fn step_of(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

pub fn raycast_first_hit_with_face<F>(
    origin: Vec3,
    dir: Vec3,
    max_dist: f32,
    mut is_solid: F,
) -> Option<RayHit>
where
    F: FnMut(BlockPos) -> bool,
{
    let len = dir.length();
    if len < 1e-6 || !origin.is_finite() || !dir.is_finite() {
        return None;
    }
    let d = dir / len;
    // shift so that voxel boundaries fall on integers
    let o = origin + Vec3::new(0.5, 0.5, 0.5);

    let mut v = BlockPos::new(o.x.floor() as i32, o.y.floor() as i32, o.z.floor() as i32);
    let (stepx, stepy, stepz) = (step_of(d.x), step_of(d.y), step_of(d.z));

    let invx = inv_or_max(d.x);
    let invy = inv_or_max(d.y);
    let invz = inv_or_max(d.z);
    let tdx = if stepx == 0 { f32::MAX } else { invx };
    let tdy = if stepy == 0 { f32::MAX } else { invy };
    let tdz = if stepz == 0 { f32::MAX } else { invz };

    let fx = o.x - o.x.floor();
    let fy = o.y - o.y.floor();
    let fz = o.z - o.z.floor();
    let first = |step: i32, f: f32, inv: f32| match step {
        1 => (1.0 - f) * inv,
        -1 => f * inv,
        _ => f32::MAX,
    };
    let mut tmx = first(stepx, fx, invx);
    let mut tmy = first(stepy, fy, invy);
    let mut tmz = first(stepz, fz, invz);

    let mut prev = v;
    let mut t = 0.0f32;
    let max_steps = (max_dist.max(0.0).ceil() as usize).saturating_mul(3) + 3;

    for _ in 0..max_steps {
        if t > max_dist {
            break;
        }
        if is_solid(v) {
            let (dx, dy, dz) = (v.x - prev.x, v.y - prev.y, v.z - prev.z);
            let normal = (-dx, -dy, -dz);
            return Some(RayHit {
                block: v,
                prev,
                normal,
                t,
            });
        }
        prev = v;
        // Step through smallest tMax
        if tmx < tmy {
            if tmx < tmz {
                v.x += stepx;
                t = tmx;
                tmx += tdx;
            } else {
                v.z += stepz;
                t = tmz;
                tmz += tdz;
            }
        } else if tmy < tmz {
            v.y += stepy;
            t = tmy;
            tmy += tdy;
        } else {
            v.z += stepz;
            t = tmz;
            tmz += tdz;
        }
    }
    None
}
