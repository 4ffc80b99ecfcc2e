use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use g7221_core::g7221::allocation::allocate;
use g7221_core::g7221::numeric::{fixed_tables, float_tables};
use g7221_core::g7221::power::estimate_block;
use g7221_core::g7221::tables::REGION_SIZE;
use g7221_core::{ArithmeticMode, BlockDecoder, BlockEncoder, FixedTables, FloatTables, QuantizerConfig};

// --- Common benchmark configuration ---
const BLOCK_COUNT: usize = 64;
const BIT_BUDGETS: [u32; 3] = [320, 480, 640];

fn float_block(seed: usize, len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let phase = (seed * 31 + i) as f64 * 0.37;
            phase.sin() * 800.0 / (1.0 + (i / REGION_SIZE) as f64)
        })
        .collect()
}

fn fixed_block(seed: usize, len: usize) -> Vec<i16> {
    float_block(seed, len).iter().map(|&c| c as i16).collect()
}

fn bench_estimate_and_allocate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate_allocate");
    let block = float_block(0, 280);
    let fixed = fixed_block(0, 280);

    group.bench_function("float_estimate", |b| {
        b.iter(|| estimate_block(float_tables(), black_box(&block), REGION_SIZE))
    });
    group.bench_function("fixed_estimate", |b| {
        b.iter(|| estimate_block(fixed_tables(), black_box(&fixed), REGION_SIZE))
    });

    let buckets: Vec<usize> = estimate_block(float_tables(), &block, REGION_SIZE)
        .iter()
        .map(|p| p.bucket)
        .collect();
    for budget in BIT_BUDGETS {
        group.bench_with_input(BenchmarkId::new("allocate", budget), &budget, |b, &budget| {
            b.iter(|| allocate(black_box(&buckets), budget))
        });
    }
    group.finish();
}

fn bench_block_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_round_trip");
    group.throughput(Throughput::Elements(280));

    let float_config = QuantizerConfig::g722_1().with_arithmetic(ArithmeticMode::FloatingPoint);
    let float_encoder = BlockEncoder::<FloatTables>::new(float_config.clone()).unwrap();
    let float_decoder = BlockDecoder::<FloatTables>::new(float_config).unwrap();
    let block = float_block(1, 280);

    let fixed_config = QuantizerConfig::g722_1().with_arithmetic(ArithmeticMode::FixedPoint);
    let fixed_encoder = BlockEncoder::<FixedTables>::new(fixed_config.clone()).unwrap();
    let fixed_decoder = BlockDecoder::<FixedTables>::new(fixed_config).unwrap();
    let fixed = fixed_block(1, 280);

    for budget in BIT_BUDGETS {
        group.bench_with_input(BenchmarkId::new("float", budget), &budget, |b, &budget| {
            b.iter(|| {
                let encoded = float_encoder.encode(black_box(&block), budget).unwrap();
                float_decoder.decode(&encoded).unwrap()
            })
        });
        group.bench_with_input(BenchmarkId::new("fixed", budget), &budget, |b, &budget| {
            b.iter(|| {
                let encoded = fixed_encoder.encode(black_box(&fixed), budget).unwrap();
                fixed_decoder.decode(&encoded).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_parallel_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_batch");
    group.throughput(Throughput::Elements((BLOCK_COUNT * 280) as u64));

    let config = QuantizerConfig::g722_1().with_arithmetic(ArithmeticMode::FloatingPoint);
    let encoder = BlockEncoder::<FloatTables>::new(config).unwrap();
    let blocks: Vec<Vec<f64>> = (0..BLOCK_COUNT).map(|i| float_block(i, 280)).collect();

    group.bench_function("sequential", |b| {
        b.iter(|| {
            blocks
                .iter()
                .map(|block| encoder.encode(black_box(block), 480).unwrap())
                .collect::<Vec<_>>()
        })
    });
    group.bench_function("rayon", |b| {
        b.iter(|| encoder.encode_blocks(black_box(&blocks), 480).unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_estimate_and_allocate,
    bench_block_round_trip,
    bench_parallel_batch
);
criterion_main!(benches);
