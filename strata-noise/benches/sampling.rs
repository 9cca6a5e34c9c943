#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use strata_noise::fractal::{Billow, RidgedMultiFractal, SumFractal};
use strata_noise::noise::{ImprovedPerlin, NoiseQuality, SimplexPerlin, ValueNoise};
use strata_noise::{GraphDescription, Node, NodeId, NoiseGraph, Point};

const SIDE: usize = 32;

/// Samples a `SIDE`² slice of 3D space at a fixed height.
fn sample_slice<P: Point>(graph: &NoiseGraph, root: NodeId, lift: impl Fn(f32, f32) -> P) -> f32 {
    let sampler = graph.sampler::<P>(root).expect("bench graph should validate");
    let mut sum = 0.0;
    for x in 0..SIDE {
        for z in 0..SIDE {
            sum += sampler.get(lift(x as f32 * 0.071, z as f32 * 0.059));
        }
    }
    sum
}

fn single(node: impl Into<Node>) -> (NoiseGraph, NodeId) {
    let mut graph = NoiseGraph::new();
    let id = graph.add(node).expect("node sources exist");
    (graph, id)
}

// ── Primitives ──────────────────────────────────────────────────────────────

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitive_3d");
    for quality in [NoiseQuality::Fast, NoiseQuality::Standard, NoiseQuality::Best] {
        let (value, value_root) = single(ValueNoise::new(0).with_quality(quality));
        let (perlin, perlin_root) = single(ImprovedPerlin::new(0).with_quality(quality));

        group.bench_with_input(BenchmarkId::new("value", format!("{quality:?}")), &quality, |b, _| {
            b.iter(|| black_box(sample_slice(&value, value_root, |x, z| [x, 0.5, z])));
        });
        group.bench_with_input(BenchmarkId::new("perlin", format!("{quality:?}")), &quality, |b, _| {
            b.iter(|| black_box(sample_slice(&perlin, perlin_root, |x, z| [x, 0.5, z])));
        });
    }
    group.finish();

    let (simplex, root) = single(SimplexPerlin::new(0));
    c.bench_function("simplex_4d", |b| {
        b.iter(|| black_box(sample_slice(&simplex, root, |x, z| [x, 0.5, z, x - z])));
    });
}

// ── Fractals ────────────────────────────────────────────────────────────────

fn bench_fractals(c: &mut Criterion) {
    let mut group = c.benchmark_group("fractal_3d");
    for octaves in [1.0, 4.5, 8.0] {
        let mut graph = NoiseGraph::new();
        let perlin = graph.add(ImprovedPerlin::new(0)).expect("node sources exist");

        let mut fbm = SumFractal::new(perlin);
        fbm.params_mut().set_octave_count(octaves);
        let fbm = graph.add(fbm).expect("node sources exist");

        let mut billow = Billow::new(perlin);
        billow.params_mut().set_octave_count(octaves);
        let billow = graph.add(billow).expect("node sources exist");

        let mut ridged = RidgedMultiFractal::new(perlin);
        ridged.params_mut().set_octave_count(octaves);
        let ridged = graph.add(ridged).expect("node sources exist");

        for (name, root) in [("sum", fbm), ("billow", billow), ("ridged", ridged)] {
            group.bench_with_input(BenchmarkId::new(name, octaves), &root, |b, &root| {
                b.iter(|| black_box(sample_slice(&graph, root, |x, z| [x, 0.5, z])));
            });
        }
    }
    group.finish();
}

// ── Described graph ─────────────────────────────────────────────────────────

const TERRAIN: &str = r#"{
  root: "terrain",
  nodes: {
    base: { type: "perlin", seed: 7, quality: "best" },
    hills: { type: "billow", source: "base", frequency: 2.0, octave_count: 4.5 },
    warped: { type: "turbulence", source: "hills", x: "base", y: "base", z: "base", power: 0.1 },
    terrain: { type: "select", control: "base", left: "warped", right: 0.25, lower: -0.2, upper: 0.2, edge_falloff: 0.1 },
  },
}"#;

fn bench_description(c: &mut Criterion) {
    let description: GraphDescription =
        serde_json5::from_str(TERRAIN).expect("Failed to parse terrain description");

    c.bench_function("description_build", |b| {
        b.iter(|| black_box(description.build().expect("terrain description builds")));
    });

    let (graph, root) = description.build().expect("terrain description builds");
    c.bench_function("description_terrain_slice", |b| {
        b.iter(|| black_box(sample_slice(&graph, root, |x, z| [x, 0.5, z])));
    });
}

criterion_group!(benches, bench_primitives, bench_fractals, bench_description);
criterion_main!(benches);
