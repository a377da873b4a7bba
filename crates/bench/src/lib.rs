use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::SeedableRng;
use rand::rngs::StdRng;

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const LARGE_RUNTIME_SAMPLE_SIZE: usize = 10;
const LARGE_RUNTIME_WARM_UP_MS: u64 = 800;
const LARGE_RUNTIME_MEASURE_MS: u64 = 1500;
const LARGE_INPUT_THRESHOLD: usize = 100_000;
const RNG_SEED: u64 = 0x5EED_2026;
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

pub fn apply_large_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(LARGE_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(LARGE_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(LARGE_RUNTIME_MEASURE_MS));
}

/// Picks the small or large runtime profile from the input size.
pub fn apply_runtime_config_for_size<M: Measurement>(
    size: usize,
    group: &mut BenchmarkGroup<'_, M>,
) {
    if size >= LARGE_INPUT_THRESHOLD {
        apply_large_runtime_config(group);
    } else {
        apply_small_runtime_config(group);
    }
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

/// splitmix64 finalizer.
pub fn mix_seed(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

pub fn seed_for(base: u64, salt: u64) -> u64 {
    mix_seed(base ^ salt.wrapping_mul(SEED_MIX))
}
