//! Frequency-only pass-through.

use smallvec::smallvec;

use crate::graph::{Dimensions, Module, NodeId, NoiseGraph, Point, Sources, sample_every_dimension};

/// Scales incoming coordinates by a frequency and returns the source's value there.
#[derive(Debug, Clone)]
pub struct Pipe {
    source: NodeId,
    frequency: f32,
}

impl Pipe {
    /// Default frequency.
    pub const DEFAULT_FREQUENCY: f32 = 1.0;

    /// Creates a pipe over `source` with frequency 1.
    #[must_use]
    pub const fn new(source: NodeId) -> Self {
        Self::with_frequency(source, Self::DEFAULT_FREQUENCY)
    }

    /// Creates a pipe over `source` with an explicit frequency.
    #[must_use]
    pub const fn with_frequency(source: NodeId, frequency: f32) -> Self {
        Self { source, frequency }
    }

    /// Source node.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Frequency.
    #[must_use]
    pub const fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Sets the frequency.
    pub const fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
    }

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        point.scale(self.frequency).evaluate(graph, self.source)
    }
}

impl Module for Pipe {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    sample_every_dimension!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::ValueNoise;

    #[test]
    #[allow(clippy::float_cmp, reason = "same lattice point")]
    fn pipe_rescales_input() {
        let mut graph = NoiseGraph::new();
        let value = graph.add(ValueNoise::new(8)).unwrap();
        let pipe = graph.add(Pipe::with_frequency(value, 4.0)).unwrap();

        let piped = graph.sampler::<[f32; 2]>(pipe).unwrap().get([0.25, 0.5]);
        let direct = graph.sampler::<[f32; 2]>(value).unwrap().get([1.0, 2.0]);
        assert_eq!(piped, direct);
    }
}
