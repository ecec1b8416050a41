//! World-to-pixel regression test
//!
//! Run with:
//! ```
//! cargo test -p spotseg-transform --test world2px_reg
//! ```
//!
//! Generate golden files:
//! ```
//! REGTEST_MODE=generate cargo test -p spotseg-transform --test world2px_reg
//! ```

use spotseg_core::{PixelCoord, Transform};
use spotseg_test::RegParams;
use spotseg_transform::{PIXEL_ORIGIN, PixelMapping, TransformError, world_to_pixel};

const N: u32 = 8;
const PITCH: f64 = 20.0;
const ANGLE: f64 = 0.3;

fn rotated_raster() -> Transform {
    let (s, c) = ANGLE.sin_cos();
    Transform::from_linear(PITCH * c, -PITCH * s, PITCH * s, PITCH * c, 0.0, 0.0)
}

/// World positions of an N x N lattice whose pixel estimates carry a
/// common 0.45 offset plus a small per-spot jitter
fn jittered_lattice(transform: &Transform) -> (Vec<(f64, f64)>, Vec<PixelCoord>) {
    let [[a, b], [c, d]] = transform.linear_part();
    let mut world = Vec::new();
    let mut expected = Vec::new();
    for j in 0..N {
        for i in 0..N {
            let k = f64::from(j * N + i);
            let u = f64::from(i) + 0.45 + 0.08 * (0.7 * k).sin();
            let v = f64::from(j) + 0.45 + 0.08 * (1.3 * k).cos();
            world.push((a * u + b * v, c * u + d * v));
            expected.push(PixelCoord::new(i + PIXEL_ORIGIN, j + PIXEL_ORIGIN));
        }
    }
    (world, expected)
}

#[test]
fn world2px_reg() {
    let mut rp = RegParams::new("world2px");

    let transform = rotated_raster();
    let (world, expected) = jittered_lattice(&transform);

    let pixels = world_to_pixel(&transform, &world).expect("world_to_pixel");
    assert_eq!(pixels.len(), world.len());

    // Index 1, 2: batch minimum is the origin on both axes
    let min_x = pixels.iter().map(|p| p.x).min().unwrap_or(0);
    let min_y = pixels.iter().map(|p| p.y).min().unwrap_or(0);
    rp.compare_values(f64::from(PIXEL_ORIGIN), f64::from(min_x), 0.0);
    rp.compare_values(f64::from(PIXEL_ORIGIN), f64::from(min_y), 0.0);

    // Index 3: bias correction recovers the lattice exactly
    let mismatches = pixels.iter().zip(&expected).filter(|(p, e)| p != e).count();
    eprintln!("lattice mismatches after bias correction: {}", mismatches);
    rp.compare_values(0.0, mismatches as f64, 0.0);

    // Plain rounding of the same estimates does not
    let raw = PixelMapping::new(&transform)
        .expect("mapping")
        .raw_indices(&world);
    let plain = raw
        .iter()
        .zip(&expected)
        .filter(|((x, _), e)| x.round_ties_even() as u32 + PIXEL_ORIGIN != e.x)
        .count();
    eprintln!("lattice mismatches with plain rounding: {}", plain);
    assert!(plain > 0);

    // Index 4: distinct lattice points stay distinct
    let mut unique = pixels.clone();
    unique.sort();
    unique.dedup();
    rp.compare_values(world.len() as f64, unique.len() as f64, 0.0);

    // Index 5: golden dump
    let dump: String = pixels.iter().map(|p| format!("{} {}\n", p.x, p.y)).collect();
    rp.write_data_and_check(dump.as_bytes(), "txt")
        .expect("write pixel dump");

    assert!(rp.cleanup(), "world2px regression test failed");
}

#[test]
fn world2px_single_point_reg() {
    let mut rp = RegParams::new("world2px_single");

    let pixels = world_to_pixel(&rotated_raster(), &[(1234.5, -987.25)]).expect("single point");
    rp.compare_values(1.0, pixels.len() as f64, 0.0);
    rp.compare_values(f64::from(PIXEL_ORIGIN), f64::from(pixels[0].x), 0.0);
    rp.compare_values(f64::from(PIXEL_ORIGIN), f64::from(pixels[0].y), 0.0);

    let empty = world_to_pixel(&rotated_raster(), &[]).expect("empty batch");
    rp.compare_values(0.0, empty.len() as f64, 0.0);

    assert!(rp.cleanup(), "world2px_single regression test failed");
}

#[test]
fn world2px_singular_reg() {
    let mut rp = RegParams::new("world2px_singular");

    let singular = [
        Transform::from_linear(1.0, 2.0, 2.0, 4.0, 0.0, 0.0),
        Transform::from_linear(0.0, 0.0, 0.0, 0.0, 5.0, 5.0),
        Transform::from_linear(f64::NAN, 0.0, 0.0, 1.0, 0.0, 0.0),
    ];
    let mut failures = 0;
    for t in &singular {
        match world_to_pixel(t, &[(0.0, 0.0), (1.0, 1.0)]) {
            Err(TransformError::SingularTransform { raster: None, .. }) => failures += 1,
            other => eprintln!("unexpected result: {:?}", other),
        }
    }
    rp.compare_values(singular.len() as f64, f64::from(failures), 0.0);

    assert!(rp.cleanup(), "world2px_singular regression test failed");
}
