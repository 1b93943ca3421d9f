use loam_world::{World, WorldGenConfig};
use proptest::prelude::*;

fn world(seed: i32) -> World {
    World::new(&WorldGenConfig {
        seed,
        ..WorldGenConfig::default()
    })
}

fn coord() -> impl Strategy<Value = i32> {
    -100_000i32..=100_000
}

proptest! {
    // Heights stay inside the bounded vertical range.
    #[test]
    fn height_is_bounded(seed in any::<i32>(), x in coord(), z in coord()) {
        let w = world(seed);
        let h = w.height_at(x, z);
        prop_assert!(h >= 0 && h < w.max_height());
    }

    // Two worlds with the same seed generate identical columns.
    #[test]
    fn generation_is_deterministic(seed in any::<i32>(), x in coord(), z in coord()) {
        prop_assert_eq!(world(seed).column(x, z), world(seed).column(x, z));
    }
}
