//! Serde-readable graph descriptions.
//!
//! A description names nodes and wires them together by name, so a graph can be
//! written as JSON or JSON5:
//!
//! ```json5
//! {
//!   root: "terrain",
//!   nodes: {
//!     base: { type: "perlin", seed: 7, quality: "best" },
//!     hills: { type: "billow", source: "base", frequency: 2.0, octave_count: 4.5 },
//!     terrain: { type: "select", control: "base", left: "hills", right: 0.25, lower: -0.2, upper: 0.2 },
//!   },
//! }
//! ```
//!
//! Every place that takes a node accepts the same three forms:
//! - Bare number -> [`Constant`]
//! - Bare string -> reference to a named node
//! - Object with a `"type"` field -> inline node
//!
//! A named node is built once no matter how many nodes refer to it.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;

use crate::combiner::{Combine, CombineOp};
use crate::error::NoiseError;
use crate::fractal::{
    Billow, FractalParams, HeterogeneousMultiFractal, HybridMultiFractal, MultiFractal, Pipe,
    RidgedMultiFractal, SinFractal, SumFractal, Voronoi,
};
use crate::graph::{Node, NodeId, NoiseGraph};
use crate::modifier::{Clamp, Curve, Exponent, Invert, ScaleBias, Terrace};
use crate::noise::{
    Checkerboard, Constant, Cylinders, ImprovedPerlin, NoiseQuality, SimplexPerlin, Spheres,
    ValueNoise,
};
use crate::selector::{Blend, Select};
use crate::transform::{Displace, RotatePoint, ScalePoint, TranslatePoint, Turbulence};

/// A whole graph: named nodes plus the node to sample.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphDescription {
    /// Node to sample; usually the name of one of `nodes`.
    pub root: NodeDescription,
    /// Named nodes.
    #[serde(default)]
    pub nodes: FxHashMap<String, NodeDescription>,
}

/// A node given by value, by name, or inline.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NodeDescription {
    /// Constant value.
    Constant(f32),
    /// Name of a node in [`GraphDescription::nodes`].
    Reference(String),
    /// Inline node.
    Typed(Box<TypedNode>),
}

/// Fractal settings. Anything left out keeps the node's own default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FractalDescription {
    /// Base frequency.
    pub frequency: Option<f32>,
    /// Frequency multiplier per octave.
    pub lacunarity: Option<f32>,
    /// Octave count, clamped to `[1, 30]`.
    pub octave_count: Option<f32>,
    /// Offset.
    pub offset: Option<f32>,
    /// Gain.
    pub gain: Option<f32>,
    /// Spectral exponent.
    pub spectral_exponent: Option<f32>,
}

impl FractalDescription {
    fn apply(&self, params: &mut FractalParams) {
        if let Some(frequency) = self.frequency {
            params.set_frequency(frequency);
        }
        if let Some(lacunarity) = self.lacunarity {
            params.set_lacunarity(lacunarity);
        }
        if let Some(octave_count) = self.octave_count {
            params.set_octave_count(octave_count);
        }
        if let Some(offset) = self.offset {
            params.set_offset(offset);
        }
        if let Some(gain) = self.gain {
            params.set_gain(gain);
        }
        if let Some(spectral_exponent) = self.spectral_exponent {
            params.set_spectral_exponent(spectral_exponent);
        }
    }
}

/// Inline node, tagged by its `"type"` field.
///
/// Optional fields default to the matching node's builder defaults.
#[allow(missing_docs, reason = "fields mirror the node builders")]
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypedNode {
    // ── Primitives ──────────────────────────────────────────────────────────
    Constant {
        value: f32,
    },
    Checkerboard,
    Spheres {
        frequency: Option<f32>,
    },
    Cylinders {
        frequency: Option<f32>,
    },
    #[serde(alias = "value_noise")]
    Value {
        #[serde(default)]
        seed: i32,
        quality: Option<NoiseQuality>,
    },
    #[serde(alias = "improved_perlin")]
    Perlin {
        #[serde(default)]
        seed: i32,
        quality: Option<NoiseQuality>,
    },
    #[serde(alias = "simplex_perlin")]
    Simplex {
        #[serde(default)]
        seed: i32,
        quality: Option<NoiseQuality>,
    },

    // ── Fractals ────────────────────────────────────────────────────────────
    SumFractal {
        source: NodeDescription,
        #[serde(flatten)]
        fractal: FractalDescription,
    },
    SinFractal {
        source: NodeDescription,
        #[serde(flatten)]
        fractal: FractalDescription,
    },
    Billow {
        source: NodeDescription,
        #[serde(flatten)]
        fractal: FractalDescription,
        scale: Option<f32>,
        bias: Option<f32>,
    },
    MultiFractal {
        source: NodeDescription,
        #[serde(flatten)]
        fractal: FractalDescription,
    },
    HeterogeneousMultiFractal {
        source: NodeDescription,
        #[serde(flatten)]
        fractal: FractalDescription,
    },
    HybridMultiFractal {
        source: NodeDescription,
        #[serde(flatten)]
        fractal: FractalDescription,
    },
    RidgedMultiFractal {
        source: NodeDescription,
        #[serde(flatten)]
        fractal: FractalDescription,
    },
    Pipe {
        source: NodeDescription,
        frequency: Option<f32>,
    },
    Voronoi {
        source: NodeDescription,
        frequency: Option<f32>,
        displacement: Option<f32>,
        #[serde(default)]
        distance: bool,
    },

    // ── Modifiers ───────────────────────────────────────────────────────────
    Clamp {
        source: NodeDescription,
        lower: Option<f32>,
        upper: Option<f32>,
    },
    Invert {
        source: NodeDescription,
    },
    ScaleBias {
        source: NodeDescription,
        scale: Option<f32>,
        bias: Option<f32>,
    },
    Exponent {
        source: NodeDescription,
        exponent: Option<f32>,
    },
    Curve {
        source: NodeDescription,
        /// `[input, output]` pairs.
        #[serde(default)]
        points: Vec<(f32, f32)>,
    },
    Terrace {
        source: NodeDescription,
        #[serde(default)]
        points: Vec<f32>,
        /// Evenly spaced points over `[-1, 1]`; replaces `points`.
        steps: Option<usize>,
        #[serde(default)]
        invert: bool,
    },

    // ── Combiners and selectors ─────────────────────────────────────────────
    Combine {
        op: CombineOp,
        left: NodeDescription,
        right: NodeDescription,
    },
    Select {
        control: NodeDescription,
        left: NodeDescription,
        right: NodeDescription,
        lower: Option<f32>,
        upper: Option<f32>,
        edge_falloff: Option<f32>,
    },
    Blend {
        control: NodeDescription,
        left: NodeDescription,
        right: NodeDescription,
    },

    // ── Transformers ────────────────────────────────────────────────────────
    ScalePoint {
        source: NodeDescription,
        #[serde(flatten)]
        axes: AxisDescription,
    },
    TranslatePoint {
        source: NodeDescription,
        #[serde(flatten)]
        axes: AxisDescription,
    },
    RotatePoint {
        source: NodeDescription,
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
        #[serde(default)]
        z: f32,
    },
    Displace {
        source: NodeDescription,
        x: NodeDescription,
        y: NodeDescription,
        z: NodeDescription,
    },
    Turbulence {
        source: NodeDescription,
        x: NodeDescription,
        y: NodeDescription,
        z: NodeDescription,
        power: Option<f32>,
    },
}

/// Per-axis factors or offsets; missing axes keep the node default.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct AxisDescription {
    /// x axis.
    pub x: Option<f32>,
    /// y axis.
    pub y: Option<f32>,
    /// z axis.
    pub z: Option<f32>,
    /// w axis.
    pub w: Option<f32>,
}

impl AxisDescription {
    fn resolve(self, default: f32) -> [f32; 4] {
        [self.x, self.y, self.z, self.w].map(|axis| axis.unwrap_or(default))
    }
}

impl GraphDescription {
    /// Builds the graph with seed offset 0 and [`NoiseQuality::Standard`] as the
    /// default quality.
    pub fn build(&self) -> Result<(NoiseGraph, NodeId), NoiseError> {
        self.build_with(0, NoiseQuality::default())
    }

    /// Builds the graph, adding `seed` to every primitive's seed and using `quality`
    /// wherever a primitive does not set one.
    ///
    /// Returns the graph and the handle of the root node.
    pub fn build_with(
        &self,
        seed: i32,
        quality: NoiseQuality,
    ) -> Result<(NoiseGraph, NodeId), NoiseError> {
        let mut builder = Builder {
            nodes: &self.nodes,
            graph: NoiseGraph::with_capacity(self.nodes.len()),
            named: FxHashMap::default(),
            in_progress: FxHashSet::default(),
            seed,
            quality,
        };
        let root = builder.node(&self.root)?;
        tracing::debug!(nodes = builder.graph.len(), %root, "built noise graph from description");
        Ok((builder.graph, root))
    }
}

struct Builder<'a> {
    nodes: &'a FxHashMap<String, NodeDescription>,
    graph: NoiseGraph,
    named: FxHashMap<&'a str, NodeId>,
    in_progress: FxHashSet<&'a str>,
    seed: i32,
    quality: NoiseQuality,
}

impl<'a> Builder<'a> {
    fn node(&mut self, description: &'a NodeDescription) -> Result<NodeId, NoiseError> {
        match description {
            NodeDescription::Constant(value) => self.graph.add(Constant::new(*value)),
            NodeDescription::Reference(name) => self.reference(name),
            NodeDescription::Typed(typed) => self.typed(typed),
        }
    }

    fn reference(&mut self, name: &str) -> Result<NodeId, NoiseError> {
        if let Some(&id) = self.named.get(name) {
            return Ok(id);
        }

        let nodes = self.nodes;
        let (name, description) = nodes
            .get_key_value(name)
            .ok_or_else(|| NoiseError::UnknownReference(name.to_owned()))?;
        if !self.in_progress.insert(name) {
            return Err(NoiseError::ReferenceCycle(name.clone()));
        }

        let id = self.node(description)?;
        self.in_progress.remove(name.as_str());
        self.named.insert(name, id);
        tracing::trace!(%name, %id, "resolved named node");
        Ok(id)
    }

    fn quality(&self, quality: Option<NoiseQuality>) -> NoiseQuality {
        quality.unwrap_or(self.quality)
    }

    fn typed(&mut self, typed: &'a TypedNode) -> Result<NodeId, NoiseError> {
        let node: Node = match typed {
            TypedNode::Constant { value } => Constant::new(*value).into(),
            TypedNode::Checkerboard => Checkerboard.into(),
            TypedNode::Spheres { frequency } => {
                Spheres::new(frequency.unwrap_or(Spheres::DEFAULT_FREQUENCY)).into()
            }
            TypedNode::Cylinders { frequency } => {
                Cylinders::new(frequency.unwrap_or(Cylinders::DEFAULT_FREQUENCY)).into()
            }
            TypedNode::Value { seed, quality } => ValueNoise::new(self.seed.wrapping_add(*seed))
                .with_quality(self.quality(*quality))
                .into(),
            TypedNode::Perlin { seed, quality } => {
                ImprovedPerlin::new(self.seed.wrapping_add(*seed))
                    .with_quality(self.quality(*quality))
                    .into()
            }
            TypedNode::Simplex { seed, quality } => {
                SimplexPerlin::new(self.seed.wrapping_add(*seed))
                    .with_quality(self.quality(*quality))
                    .into()
            }

            TypedNode::SumFractal { source, fractal } => {
                let mut node = SumFractal::new(self.node(source)?);
                fractal.apply(node.params_mut());
                node.into()
            }
            TypedNode::SinFractal { source, fractal } => {
                let mut node = SinFractal::new(self.node(source)?);
                fractal.apply(node.params_mut());
                node.into()
            }
            TypedNode::Billow {
                source,
                fractal,
                scale,
                bias,
            } => {
                let mut node = Billow::new(self.node(source)?);
                fractal.apply(node.params_mut());
                node.set_scale(scale.unwrap_or(Billow::DEFAULT_SCALE));
                node.set_bias(bias.unwrap_or(Billow::DEFAULT_BIAS));
                node.into()
            }
            TypedNode::MultiFractal { source, fractal } => {
                let mut node = MultiFractal::new(self.node(source)?);
                fractal.apply(node.params_mut());
                node.into()
            }
            TypedNode::HeterogeneousMultiFractal { source, fractal } => {
                let mut node = HeterogeneousMultiFractal::new(self.node(source)?);
                fractal.apply(node.params_mut());
                node.into()
            }
            TypedNode::HybridMultiFractal { source, fractal } => {
                let mut node = HybridMultiFractal::new(self.node(source)?);
                fractal.apply(node.params_mut());
                node.into()
            }
            TypedNode::RidgedMultiFractal { source, fractal } => {
                let mut node = RidgedMultiFractal::new(self.node(source)?);
                fractal.apply(node.params_mut());
                node.into()
            }
            TypedNode::Pipe { source, frequency } => {
                Pipe::with_frequency(self.node(source)?, frequency.unwrap_or(Pipe::DEFAULT_FREQUENCY)).into()
            }
            TypedNode::Voronoi {
                source,
                frequency,
                displacement,
                distance,
            } => {
                let mut node = Voronoi::new(self.node(source)?);
                if let Some(frequency) = frequency {
                    node.set_frequency(*frequency);
                }
                if let Some(displacement) = displacement {
                    node.set_displacement(*displacement);
                }
                node.set_distance(*distance);
                node.into()
            }

            TypedNode::Clamp {
                source,
                lower,
                upper,
            } => Clamp::with_bounds(
                self.node(source)?,
                lower.unwrap_or(Clamp::DEFAULT_LOWER_BOUND),
                upper.unwrap_or(Clamp::DEFAULT_UPPER_BOUND),
            )?
            .into(),
            TypedNode::Invert { source } => Invert::new(self.node(source)?).into(),
            TypedNode::ScaleBias {
                source,
                scale,
                bias,
            } => ScaleBias::new(
                self.node(source)?,
                scale.unwrap_or(ScaleBias::DEFAULT_SCALE),
                bias.unwrap_or(ScaleBias::DEFAULT_BIAS),
            )
            .into(),
            TypedNode::Exponent { source, exponent } => Exponent::with_exponent(
                self.node(source)?,
                exponent.unwrap_or(Exponent::DEFAULT_EXPONENT),
            )
            .into(),
            TypedNode::Curve { source, points } => {
                let mut node = Curve::new(self.node(source)?);
                for &(input, output) in points {
                    node.add_control_point(input, output)?;
                }
                node.into()
            }
            TypedNode::Terrace {
                source,
                points,
                steps,
                invert,
            } => {
                let mut node = Terrace::new(self.node(source)?);
                if let Some(steps) = steps {
                    node.make_control_points(*steps)?;
                } else {
                    for &point in points {
                        node.add_control_point(point)?;
                    }
                }
                node.set_invert(*invert);
                node.into()
            }

            TypedNode::Combine { op, left, right } => {
                Combine::new(*op, self.node(left)?, self.node(right)?).into()
            }
            TypedNode::Select {
                control,
                left,
                right,
                lower,
                upper,
                edge_falloff,
            } => {
                let mut node = Select::new(self.node(control)?, self.node(left)?, self.node(right)?);
                node.set_bounds(
                    lower.unwrap_or(Select::DEFAULT_LOWER_BOUND),
                    upper.unwrap_or(Select::DEFAULT_UPPER_BOUND),
                )?;
                node.set_edge_falloff(edge_falloff.unwrap_or(Select::DEFAULT_EDGE_FALLOFF));
                node.into()
            }
            TypedNode::Blend {
                control,
                left,
                right,
            } => Blend::new(self.node(control)?, self.node(left)?, self.node(right)?).into(),

            TypedNode::ScalePoint { source, axes } => ScalePoint::with_scale(
                self.node(source)?,
                axes.resolve(ScalePoint::DEFAULT_SCALE),
            )
            .into(),
            TypedNode::TranslatePoint { source, axes } => TranslatePoint::with_translation(
                self.node(source)?,
                axes.resolve(TranslatePoint::DEFAULT_TRANSLATION),
            )
            .into(),
            TypedNode::RotatePoint { source, x, y, z } => {
                RotatePoint::with_angles(self.node(source)?, *x, *y, *z).into()
            }
            TypedNode::Displace { source, x, y, z } => Displace::new(
                self.node(source)?,
                self.node(x)?,
                self.node(y)?,
                self.node(z)?,
            )
            .into(),
            TypedNode::Turbulence {
                source,
                x,
                y,
                z,
                power,
            } => {
                let mut node = Turbulence::new(
                    self.node(source)?,
                    self.node(x)?,
                    self.node(y)?,
                    self.node(z)?,
                );
                node.set_power(power.unwrap_or(Turbulence::DEFAULT_POWER));
                node.into()
            }
        };

        self.graph.add(node)
    }
}
