//! Graph descriptions loaded from JSON and JSON5.

use serde_json::json;
use strata_noise::fractal::{Billow, RidgedMultiFractal};
use strata_noise::noise::{ImprovedPerlin, NoiseQuality};
use strata_noise::selector::Select;
use strata_noise::transform::Turbulence;
use strata_noise::{GraphDescription, NoiseError, NoiseGraph};

const TERRAIN: &str = r#"{
  root: "terrain",
  nodes: {
    base: { type: "perlin", seed: 7, quality: "best" },
    hills: { type: "billow", source: "base", frequency: 2.0, octave_count: 4.5 },
    terrain: { type: "select", control: "base", left: "hills", right: 0.25, lower: -0.2, upper: 0.2, edge_falloff: 0.1 },
  },
}"#;

fn from_json(value: serde_json::Value) -> GraphDescription {
    serde_json::from_value(value).unwrap()
}

#[test]
fn terrain_example_builds_and_samples() {
    let description: GraphDescription = serde_json5::from_str(TERRAIN).unwrap();
    let (graph, root) = description.build().unwrap();

    // base, hills, terrain and the inline constant
    assert_eq!(graph.len(), 4);

    let select = graph.node::<Select>(root).unwrap();
    assert!((select.edge_falloff() - 0.1).abs() < f32::EPSILON);
    let hills = graph.node::<Billow>(select.left()).unwrap();
    assert!((hills.params().octave_count() - 4.5).abs() < f32::EPSILON);
    let base = graph.node::<ImprovedPerlin>(hills.source()).unwrap();
    assert_eq!(base.quality(), NoiseQuality::Best);
    assert_eq!(select.control(), hills.source());

    let sampler = graph.sampler::<[f32; 3]>(root).unwrap();
    for i in 0..64 {
        let t = i as f32 * 0.37;
        assert!(sampler.get([t, -t, t * 0.5]).is_finite());
    }
}

#[test]
fn description_matches_hand_built_graph() {
    let description = from_json(json!({
        "root": {
            "type": "turbulence",
            "source": { "type": "ridged_multi_fractal", "source": "perlin", "octave_count": 3.0 },
            "x": "perlin",
            "y": "perlin",
            "z": "perlin",
            "power": 0.125
        },
        "nodes": { "perlin": { "type": "perlin", "seed": 4 } }
    }));
    let (built, built_root) = description.build().unwrap();

    let mut graph = NoiseGraph::new();
    let perlin = graph.add(ImprovedPerlin::new(4)).unwrap();
    let mut ridged = RidgedMultiFractal::new(perlin);
    ridged.params_mut().set_octave_count(3.0);
    let ridged = graph.add(ridged).unwrap();
    let mut turbulence = Turbulence::new(ridged, perlin, perlin, perlin);
    turbulence.set_power(0.125);
    let root = graph.add(turbulence).unwrap();

    let built = built.sampler::<[f32; 3]>(built_root).unwrap();
    let by_hand = graph.sampler::<[f32; 3]>(root).unwrap();
    for i in 0..32 {
        let p = [i as f32 * 0.21, 1.5 - i as f32 * 0.13, i as f32 * 0.05];
        assert_eq!(built.get(p).to_bits(), by_hand.get(p).to_bits());
    }
}

#[test]
fn every_node_type_parses() {
    let description = from_json(json!({
        "root": "out",
        "nodes": {
            "v": { "type": "value", "seed": 1, "quality": "fast" },
            "s": { "type": "simplex" },
            "p": { "type": "perlin" },
            "shapes": { "type": "combine", "op": "add",
                "left": { "type": "spheres", "frequency": 2.0 },
                "right": { "type": "combine", "op": "min", "left": { "type": "cylinders" }, "right": { "type": "checkerboard" } } },
            "sum": { "type": "sum_fractal", "source": "p", "lacunarity": 2.2 },
            "sin": { "type": "sin_fractal", "source": "p" },
            "multi": { "type": "multi_fractal", "source": "s" },
            "hetero": { "type": "heterogeneous_multi_fractal", "source": "s" },
            "hybrid": { "type": "hybrid_multi_fractal", "source": "s", "gain": 0.8 },
            "pipe": { "type": "pipe", "source": "v", "frequency": 0.5 },
            "cells": { "type": "voronoi", "source": "v", "distance": true },
            "clamped": { "type": "clamp", "source": "sum", "lower": -0.5, "upper": 0.5 },
            "inverted": { "type": "invert", "source": "sin" },
            "biased": { "type": "scale_bias", "source": "multi", "scale": 0.5, "bias": 0.1 },
            "exp": { "type": "exponent", "source": "hetero", "exponent": 2.0 },
            "curved": { "type": "curve", "source": "hybrid", "points": [[-1.0, -1.0], [-0.2, 0.1], [0.4, 0.3], [1.0, 1.0]] },
            "stepped": { "type": "terrace", "source": "pipe", "points": [-1.0, 0.0, 1.0], "invert": true },
            "blend": { "type": "blend", "control": "clamped", "left": "inverted", "right": "biased" },
            "powered": { "type": "combine", "op": "power", "left": "exp", "right": 1.0 },
            "scaled": { "type": "scale_point", "source": "curved", "x": 2.0, "z": 0.5 },
            "moved": { "type": "translate_point", "source": "stepped", "y": -3.0 },
            "rotated": { "type": "rotate_point", "source": "cells", "x": 30.0, "y": 45.0 },
            "displaced": { "type": "displace", "source": "shapes", "x": "v", "y": 0.0, "z": "p" },
            "mixed": { "type": "combine", "op": "max", "left": "blend",
                "right": { "type": "combine", "op": "multiply", "left": "powered", "right": "scaled" } },
            "out": { "type": "select", "control": "moved", "left": "mixed",
                "right": { "type": "combine", "op": "add", "left": "rotated", "right": "displaced" } }
        }
    }));

    let (graph, root) = description.build().unwrap();
    // every named node plus the inline ones
    assert_eq!(graph.len(), 33);
    assert!(graph.sampler::<[f32; 3]>(root).is_ok());
    assert!(graph.sampler::<[f32; 2]>(root).is_err());
}

#[test]
fn unknown_node_type_is_a_parse_error() {
    let parsed: Result<GraphDescription, _> =
        serde_json::from_value(json!({ "root": { "type": "wobble" } }));
    assert!(parsed.is_err());
}

#[test]
fn reference_errors_surface_from_build() {
    let missing = from_json(json!({ "root": "nowhere" }));
    assert_eq!(
        missing.build().unwrap_err(),
        NoiseError::UnknownReference("nowhere".to_owned())
    );

    let looped = from_json(json!({
        "root": "a",
        "nodes": { "a": { "type": "invert", "source": "a" } }
    }));
    assert_eq!(
        looped.build().unwrap_err(),
        NoiseError::ReferenceCycle("a".to_owned())
    );
}
