// Ordering throughput per strategy at typical label batch sizes
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use partsort::prelude::*;
use partsort::{DistanceModel, FeatureEmbedder, TokenExtractor, DEFAULT_MAX_MATRIX_SIZE};
use rand::prelude::*;

const FAMILIES: [&str; 5] = ["Socket Head Screw", "Hex Nut", "Flat Washer", "Dowel Pin", "Standoff"];
const SIZES: [&str; 6] = ["M3", "M4", "M6", "#8-32", "1/4\"-20", "5/16\"-18"];
const MATERIALS: [&str; 4] = ["316 Stainless Steel", "18-8 Stainless Steel", "Brass", "Zinc-Plated Steel"];

fn generate_catalog(n: usize) -> Vec<PartRecord> {
    let mut rng = StdRng::seed_from_u64(1234);
    (0..n)
        .map(|i| {
            let fingerprint: Vec<f32> = (0..32).map(|_| rng.random_range(0.0f32..1.0)).collect();
            PartRecord::new(
                format!("P{:06}", i),
                FAMILIES[rng.random_range(0..FAMILIES.len())],
                format!(
                    "{} x {}mm, {}",
                    SIZES[rng.random_range(0..SIZES.len())],
                    rng.random_range(4..80),
                    MATERIALS[rng.random_range(0..MATERIALS.len())]
                ),
            )
            .with_fingerprint(fingerprint)
        })
        .collect()
}

fn benchmark_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("order");

    for size in [10, 100, 300].iter() {
        let records = generate_catalog(*size);
        for strategy in Strategy::ALL {
            let engine = OrderingEngine::new(OrderingConfig::new(strategy)).unwrap();
            group.bench_with_input(BenchmarkId::new(strategy.as_str(), size), &records, |b, records| {
                b.iter(|| {
                    let outcome = engine.order(black_box(records)).unwrap();
                    black_box(outcome);
                });
            });
        }
    }

    group.finish();
}

fn benchmark_spectral_at_cap(c: &mut Criterion) {
    let mut group = c.benchmark_group("spectral_at_cap");
    group.sample_size(10);

    let size = DEFAULT_MAX_MATRIX_SIZE;
    let records = generate_catalog(size);
    let engine = OrderingEngine::new(OrderingConfig::new(Strategy::Spectral)).unwrap();
    group.bench_with_input(BenchmarkId::new("spectral", size), &records, |b, records| {
        b.iter(|| black_box(engine.order(black_box(records)).unwrap()));
    });

    group.finish();
}

fn benchmark_distance_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_matrix");
    let extractor = TokenExtractor::new().unwrap();
    let embedder = FeatureEmbedder::default();
    let model = DistanceModel::default();

    for size in [100, 300].iter() {
        let records = generate_catalog(*size);
        let tokens = extractor.extract_all(&records);
        let vectors = embedder.embed_batch(&records, &tokens).unwrap();
        group.bench_with_input(BenchmarkId::new("euclidean", size), &vectors, |b, vectors| {
            b.iter(|| black_box(model.matrix(black_box(vectors)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_strategies, benchmark_spectral_at_cap, benchmark_distance_matrix);
criterion_main!(benches);
