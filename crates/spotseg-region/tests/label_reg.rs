//! Labeling regression test
//!
//! Checks labeling invariants on seeded random occupancy grids.
//!
//! Run with:
//! ```
//! cargo test -p spotseg-region --test label_reg
//! ```

use spotseg_region::{
    ConnectivityType, count_components, get_component_sizes, get_component_stats,
    is_same_partition, label_by_floodfill, label_connected_components,
};
use spotseg_test::{RegParams, random_occupancy_grid};

const SEEDS: [u64; 4] = [1, 7, 42, 1234];
const DENSITIES: [f64; 3] = [0.2, 0.45, 0.7];

#[test]
fn label_reg() {
    let mut rp = RegParams::new("label");

    for &seed in &SEEDS {
        for &density in &DENSITIES {
            let grid = random_occupancy_grid(48, 32, density, seed).expect("random grid");

            for conn in [ConnectivityType::FourWay, ConnectivityType::EightWay] {
                let labels = label_connected_components(&grid, conn).expect("labels");
                let filled = label_by_floodfill(&grid, conn).expect("floodfill");

                // Both labelers agree exactly
                rp.compare_grids(&labels, &filled);

                // Background is preserved
                rp.compare_grids(&grid, &labels.occupancy_mask());

                // Relabeling the mask reproduces the partition
                let again =
                    label_connected_components(&labels.occupancy_mask(), conn).expect("relabel");
                if !is_same_partition(&labels, &again) {
                    panic!("relabel changed partition (seed {seed}, density {density}, {conn:?})");
                }

                // Labels are dense and sizes cover every occupied cell
                let sizes = get_component_sizes(&labels);
                assert!(sizes.iter().all(|&s| s > 0));
                let total: u32 = sizes.iter().sum();
                rp.compare_values(grid.count_nonzero() as f64, f64::from(total), 0.0);
                rp.compare_values(
                    f64::from(labels.max_label()),
                    f64::from(count_components(&grid, conn).expect("count")),
                    0.0,
                );
            }

            let n4 = label_connected_components(&grid, ConnectivityType::FourWay)
                .expect("4-way")
                .max_label();
            let n8 = label_connected_components(&grid, ConnectivityType::EightWay)
                .expect("8-way")
                .max_label();
            eprintln!("seed {seed} density {density}: {n4} 4-cc, {n8} 8-cc");
            assert!(n8 <= n4);
        }
    }

    assert!(rp.cleanup(), "label regression test failed");
}

#[test]
fn label_stats_reg() {
    let mut rp = RegParams::new("label_stats");

    let grid = random_occupancy_grid(40, 40, 0.35, 99).expect("random grid");
    let labels = label_connected_components(&grid, ConnectivityType::EightWay).expect("labels");
    let stats = get_component_stats(&labels);

    rp.compare_values(f64::from(labels.max_label()), stats.len() as f64, 0.0);

    for (i, s) in stats.iter().enumerate() {
        assert_eq!(s.label as usize, i + 1);
        let b = s.bounds;
        assert!(u64::from(s.pixel_count) <= b.area());
        assert!(s.centroid_x >= f64::from(b.x) && s.centroid_x <= f64::from(b.x + b.w - 1));
        assert!(s.centroid_y >= f64::from(b.y) && s.centroid_y <= f64::from(b.y + b.h - 1));
    }

    // Index 2: golden dump of the statistics
    let dump: String = stats
        .iter()
        .map(|s| {
            format!(
                "{} {} {} {} {} {} {:.4} {:.4}\n",
                s.label,
                s.pixel_count,
                s.bounds.x,
                s.bounds.y,
                s.bounds.w,
                s.bounds.h,
                s.centroid_x,
                s.centroid_y
            )
        })
        .collect();
    rp.write_data_and_check(dump.as_bytes(), "txt")
        .expect("write stats dump");

    assert!(rp.cleanup(), "label_stats regression test failed");
}
