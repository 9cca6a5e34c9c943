//! Typed sample points and the validated [`Sampler`].

use std::array;
use std::fmt;
use std::marker::PhantomData;

use super::{Module, NodeId, NoiseGraph};

mod sealed {
    pub trait Sealed {}
    impl Sealed for [f32; 1] {}
    impl Sealed for [f32; 2] {}
    impl Sealed for [f32; 3] {}
    impl Sealed for [f32; 4] {}
}

/// A sample coordinate: `[f32; 1]` through `[f32; 4]`.
///
/// The point type picks which `get_value_*` method of [`Module`] is dispatched, so
/// the dimension is fixed once per [`Sampler`] rather than checked per call.
pub trait Point: Copy + Send + Sync + fmt::Debug + sealed::Sealed + 'static {
    /// Number of axes.
    const DIMENSION: usize;

    /// Evaluates node `id` of `graph` at this point.
    fn evaluate(self, graph: &NoiseGraph, id: NodeId) -> f32;

    /// First axis.
    fn x(self) -> f32;

    /// Applies `f` to every axis.
    #[must_use]
    fn map(self, f: impl Fn(f32) -> f32) -> Self;

    /// Combines every axis with the matching entry of `other`.
    #[must_use]
    fn zip(self, other: [f32; 4], f: impl Fn(f32, f32) -> f32) -> Self;

    /// Multiplies every axis by `factor`.
    #[inline]
    #[must_use]
    fn scale(self, factor: f32) -> Self {
        self.map(|v| v * factor)
    }
}

macro_rules! impl_point {
    ($n:literal, $method:ident, $($axis:literal),+) => {
        impl Point for [f32; $n] {
            const DIMENSION: usize = $n;

            #[inline]
            fn evaluate(self, graph: &NoiseGraph, id: NodeId) -> f32 {
                graph.at(id).$method(graph, $(self[$axis]),+)
            }

            #[inline]
            fn x(self) -> f32 {
                self[0]
            }

            #[inline]
            fn map(self, f: impl Fn(f32) -> f32) -> Self {
                <[f32; $n]>::map(self, f)
            }

            #[inline]
            fn zip(self, other: [f32; 4], f: impl Fn(f32, f32) -> f32) -> Self {
                array::from_fn(|i| f(self[i], other[i]))
            }
        }
    };
}

impl_point!(1, get_value_1d, 0);
impl_point!(2, get_value_2d, 0, 1);
impl_point!(3, get_value_3d, 0, 1, 2);
impl_point!(4, get_value_4d, 0, 1, 2, 3);

/// Evaluates a validated subgraph at points of type `P`.
///
/// Obtained from [`NoiseGraph::sampler`]. Holds a shared borrow of the graph, so
/// the graph cannot be reconfigured while any sampler is alive. Samplers are
/// `Copy` and can be shared freely across threads.
pub struct Sampler<'a, P: Point> {
    graph: &'a NoiseGraph,
    root: NodeId,
    _point: PhantomData<fn(P) -> f32>,
}

impl<'a, P: Point> Sampler<'a, P> {
    pub(super) const fn new(graph: &'a NoiseGraph, root: NodeId) -> Self {
        Self {
            graph,
            root,
            _point: PhantomData,
        }
    }

    /// Value of the root node at `point`.
    #[inline]
    #[must_use]
    pub fn get(&self, point: P) -> f32 {
        point.evaluate(self.graph, self.root)
    }

    /// Root node handle.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The graph being sampled.
    #[must_use]
    pub const fn graph(&self) -> &'a NoiseGraph {
        self.graph
    }
}

impl<P: Point> Clone for Sampler<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Point> Copy for Sampler<'_, P> {}

impl<P: Point> fmt::Debug for Sampler<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sampler")
            .field("root", &self.root)
            .field("dimension", &P::DIMENSION)
            .finish_non_exhaustive()
    }
}
