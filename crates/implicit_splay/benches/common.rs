use std::hint::black_box;
use std::time::{Duration, Instant};

use bench::{apply_runtime_config_for_size, default_rng, mix_seed, seed_for};
use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use implicit_splay::{SequenceBase, SequenceReverse, SequenceSplitMerge, SplayTree};

const SIZES: [usize; 4] = [1_000, 16_000, 64_000, 256_000];
const OPS_PER_SIZE: usize = 100;
const VALUE_RANGE: std::ops::RangeInclusive<i64> = -1_000_000_000..=1_000_000_000;
const WORKLOAD_WEIGHTS: &[(OpKind, u32)] = &[
    (OpKind::Get, 30),
    (OpKind::Insert, 20),
    (OpKind::Remove, 20),
    (OpKind::Reverse, 15),
    (OpKind::SplitMerge, 15),
];

#[derive(Clone, Copy, Debug)]
pub enum FeatureSet {
    Core,
    Reverse,
    Full,
}

#[derive(Clone, Copy)]
enum OpKind {
    Get,
    Insert,
    Remove,
    Reverse,
    SplitMerge,
}

#[derive(Clone)]
enum Op {
    Get { index: usize },
    Insert { index: usize, value: i64 },
    Remove { index: usize },
    Reverse { start: usize, end: usize },
    SplitMerge { at: usize },
}

trait BenchSeq: SequenceSplitMerge<Key = i64> + SequenceReverse {
    fn from_values(values: &[i64]) -> Self;
}

impl BenchSeq for SplayTree<i64> {
    fn from_values(values: &[i64]) -> Self {
        SplayTree::from(values.to_vec())
    }
}

impl BenchSeq for Vec<i64> {
    fn from_values(values: &[i64]) -> Self {
        values.to_vec()
    }
}

pub fn bench_workload(c: &mut Criterion, feature: FeatureSet) {
    let group_name = format!("implicit_splay/{}", feature_label(feature));
    let mut group = c.benchmark_group(group_name);

    for &size in &SIZES {
        apply_runtime_config_for_size(size, &mut group);
        let base_seed = seed_base(feature, size as u64);
        let mut init_rng = StdRng::seed_from_u64(base_seed);
        let initial = generate_initial(size, &mut init_rng);

        bench_seq::<SplayTree<i64>, _>(&mut group, "splay", size, feature, base_seed, &initial);
        bench_seq::<Vec<i64>, _>(&mut group, "vec", size, feature, base_seed, &initial);
    }

    group.finish();
}

/// Walks the sequence front to back through splaying access, the pattern
/// the splay tree amortizes to near constant time per step.
pub fn bench_sequential_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("implicit_splay/sequential_at");
    for &size in &SIZES {
        apply_runtime_config_for_size(size, &mut group);
        let initial = generate_initial(size, &mut default_rng());
        let mut tree = SplayTree::from(initial);
        group.bench_function(BenchmarkId::new("splay", size), |bencher| {
            bencher.iter(|| {
                let mut acc = 0_i64;
                for index in 0..size {
                    if let Ok(value) = tree.at(index) {
                        acc = acc.wrapping_add(*value);
                    }
                }
                black_box(acc)
            })
        });
    }
    group.finish();
}

/// Splits at the middle and joins the halves back. Subtrees are relinked,
/// so the cost per round stays logarithmic in the size.
pub fn bench_split_merge_halves(c: &mut Criterion) {
    let mut group = c.benchmark_group("implicit_splay/split_merge_halves");
    for &size in &SIZES {
        apply_runtime_config_for_size(size, &mut group);
        let initial = generate_initial(size, &mut default_rng());
        let mut tree = SplayTree::from(initial);
        group.bench_function(BenchmarkId::new("splay", size), |bencher| {
            bencher.iter(|| {
                if let Ok(right) = tree.split(black_box(size / 2)) {
                    tree.merge(right);
                }
                black_box(tree.len())
            })
        });
    }
    group.finish();
}

fn feature_supports(feature: FeatureSet, kind: OpKind) -> bool {
    match feature {
        FeatureSet::Core => matches!(kind, OpKind::Get | OpKind::Insert | OpKind::Remove),
        FeatureSet::Reverse => matches!(
            kind,
            OpKind::Get | OpKind::Insert | OpKind::Remove | OpKind::Reverse
        ),
        FeatureSet::Full => true,
    }
}

fn choose_kind<R: Rng + ?Sized>(rng: &mut R, feature: FeatureSet) -> OpKind {
    let total: u32 = WORKLOAD_WEIGHTS
        .iter()
        .filter(|(kind, _)| feature_supports(feature, *kind))
        .map(|(_, weight)| weight)
        .sum();

    let mut roll = rng.random_range(0..total);
    for (kind, weight) in WORKLOAD_WEIGHTS {
        if !feature_supports(feature, *kind) {
            continue;
        }
        if roll < *weight {
            return *kind;
        }
        roll -= *weight;
    }

    OpKind::Insert
}

fn random_range<R: Rng + ?Sized>(rng: &mut R, len: usize) -> (usize, usize) {
    let start = rng.random_range(0..len);
    let end = rng.random_range((start + 1)..=len);
    (start, end)
}

fn generate_initial<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<i64> {
    (0..size).map(|_| rng.random_range(VALUE_RANGE)).collect()
}

fn generate_ops(feature: FeatureSet, size: usize, rng: &mut impl Rng) -> Vec<Op> {
    let mut len = size;
    let mut ops = Vec::with_capacity(OPS_PER_SIZE);

    for step in 0..OPS_PER_SIZE {
        let remaining = OPS_PER_SIZE - step;
        let mut kind = choose_kind(rng, feature);
        let delta = len as isize - size as isize;
        if delta > remaining as isize {
            kind = OpKind::Remove;
        } else if delta < -(remaining as isize) {
            kind = OpKind::Insert;
        }
        if len == 0 {
            kind = OpKind::Insert;
        }

        match kind {
            OpKind::Get => {
                let index = rng.random_range(0..len);
                ops.push(Op::Get { index });
            }
            OpKind::Insert => {
                let index = rng.random_range(0..=len);
                let value = rng.random_range(VALUE_RANGE);
                ops.push(Op::Insert { index, value });
                len += 1;
            }
            OpKind::Remove => {
                let index = rng.random_range(0..len);
                ops.push(Op::Remove { index });
                len -= 1;
            }
            OpKind::Reverse => {
                let (start, end) = random_range(rng, len);
                ops.push(Op::Reverse { start, end });
            }
            OpKind::SplitMerge => {
                let at = rng.random_range(0..=len);
                ops.push(Op::SplitMerge { at });
            }
        }
    }

    ops
}

fn seed_base(feature: FeatureSet, size: u64) -> u64 {
    mix_seed(seed_for(0x5EED_2026 ^ size, feature_id(feature)))
}

fn feature_id(feature: FeatureSet) -> u64 {
    match feature {
        FeatureSet::Core => 1,
        FeatureSet::Reverse => 2,
        FeatureSet::Full => 3,
    }
}

fn bench_seq<S, M>(
    group: &mut BenchmarkGroup<'_, M>,
    label: &str,
    size: usize,
    feature: FeatureSet,
    base_seed: u64,
    initial: &[i64],
) where
    M: Measurement<Value = Duration>,
    S: BenchSeq,
{
    let mut seq = S::from_values(initial);

    group.bench_function(BenchmarkId::new(label, size), |bencher| {
        bencher.iter_custom(|iters| {
            let mut total = Duration::ZERO;
            // Reuse the same sequence; regenerate ops per iteration from a fixed seed.
            for iter in 0..iters {
                let mut op_rng = StdRng::seed_from_u64(seed_for(base_seed, iter));
                let ops = generate_ops(feature, seq.len(), &mut op_rng);
                let start = Instant::now();
                run_ops(&mut seq, &ops);
                black_box(seq.len());
                total += start.elapsed();
            }
            total
        })
    });
}

fn run_ops<S: BenchSeq>(seq: &mut S, ops: &[Op]) {
    for op in ops {
        match op {
            Op::Get { index } => {
                if let Ok(value) = seq.get(*index) {
                    black_box(*value);
                }
            }
            Op::Insert { index, value } => {
                black_box(seq.insert(*index, *value).is_ok());
            }
            Op::Remove { index } => {
                black_box(seq.remove(*index).ok());
            }
            Op::Reverse { start, end } => {
                black_box(seq.reverse(*start..*end).is_ok());
            }
            Op::SplitMerge { at } => {
                if let Ok(right) = seq.split_at(*at) {
                    seq.merge(right);
                }
            }
        }
    }
}

fn feature_label(feature: FeatureSet) -> &'static str {
    match feature {
        FeatureSet::Core => "core",
        FeatureSet::Reverse => "reverse",
        FeatureSet::Full => "full",
    }
}
