use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use seres_rust::resample::{generate_random_walk, resample};
use seres_rust::util::matrix::CharMatrix;
use seres_rust::walk::RandomWalk;

fn make_alignment(taxa: usize, len: usize) -> CharMatrix {
    let bases = [b'A', b'C', b'G', b'T', b'-'];
    let mut x: u32 = 42;
    let rows: Vec<Vec<u8>> = (0..taxa)
        .map(|_| {
            (0..len)
                .map(|_| {
                    x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                    bases[(x >> 16) as usize % bases.len()]
                })
                .collect()
        })
        .collect();
    CharMatrix::from_rows(&rows).unwrap()
}

fn bench_generate(c: &mut Criterion) {
    c.bench_function("generate_walk_10k", |b| {
        b.iter(|| {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
            black_box(generate_random_walk(black_box(10_000), 10_000, 0.01, &mut rng).unwrap());
        })
    });
}

fn bench_resample(c: &mut Criterion) {
    let input = make_alignment(50, 10_000);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    let walk = generate_random_walk(input.length(), input.length(), 0.01, &mut rng).unwrap();

    c.bench_function("resample_50x10k", |b| {
        b.iter(|| {
            black_box(resample(black_box(&input), black_box(&walk)).unwrap());
        })
    });
}

fn bench_parse_walk(c: &mut Criterion) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    let walk = generate_random_walk(10_000, 100_000, 0.05, &mut rng).unwrap();
    let text = walk.to_string();

    c.bench_function("parse_walk_100k", |b| {
        b.iter(|| {
            black_box(black_box(text.as_str()).parse::<RandomWalk>().unwrap());
        })
    });
}

criterion_group!(benches, bench_generate, bench_resample, bench_parse_walk);
criterion_main!(benches);
