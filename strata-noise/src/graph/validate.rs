//! Subgraph validation: handle existence, cycles, dimension support and node-local rules.

use rustc_hash::FxHashSet;

use super::{Dimensions, Module, NodeId, NoiseGraph};
use crate::error::NoiseError;

/// DFS colouring. Nodes absent from both sets are unvisited.
#[derive(Default)]
struct Walk {
    in_progress: FxHashSet<NodeId>,
    done: FxHashSet<NodeId>,
}

impl NoiseGraph {
    /// Checks that the subgraph under `root` can be sampled in `required` dimensions.
    pub(super) fn validate(&self, root: NodeId, required: Dimensions) -> Result<(), NoiseError> {
        let mut walk = Walk::default();
        self.visit(root, &mut walk, &mut |id, node| {
            if node.dimensions().contains(required) {
                Ok(())
            } else {
                Err(NoiseError::UnsupportedDimension {
                    node: id,
                    kind: node.kind(),
                    dimension: required.bits().trailing_zeros() as usize + 1,
                })
            }
        })
    }

    /// Intersection of the dimensions supported by every node under `root`.
    pub(super) fn subgraph_dimensions(&self, root: NodeId) -> Result<Dimensions, NoiseError> {
        let mut walk = Walk::default();
        let mut dims = Dimensions::all();
        self.visit(root, &mut walk, &mut |_, node| {
            dims &= node.dimensions();
            Ok(())
        })?;
        Ok(dims)
    }

    fn visit(
        &self,
        id: NodeId,
        walk: &mut Walk,
        check: &mut impl FnMut(NodeId, &super::Node) -> Result<(), NoiseError>,
    ) -> Result<(), NoiseError> {
        if walk.done.contains(&id) {
            return Ok(());
        }
        if !walk.in_progress.insert(id) {
            return Err(NoiseError::Cycle(id));
        }

        let node = self.get(id).ok_or(NoiseError::UnknownNode(id))?;
        node.validate()?;
        check(id, node)?;
        for source in node.sources() {
            self.visit(source, walk, check)?;
        }

        walk.in_progress.remove(&id);
        walk.done.insert(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combiner::Combine;
    use crate::modifier::{Curve, Invert};
    use crate::noise::Constant;

    #[test]
    fn diamond_is_not_a_cycle() {
        let mut graph = NoiseGraph::new();
        let c = graph.add(Constant::new(1.0)).unwrap();
        let a = graph.add(Invert::new(c)).unwrap();
        let b = graph.add(Invert::new(c)).unwrap();
        let top = graph.add(Combine::add(a, b)).unwrap();

        assert!(graph.validate(top, Dimensions::THREE).is_ok());
    }

    #[test]
    fn curve_without_points_fails_validation() {
        let mut graph = NoiseGraph::new();
        let c = graph.add(Constant::new(1.0)).unwrap();
        let curve = graph.add(Curve::new(c)).unwrap();

        assert_eq!(
            graph.validate(curve, Dimensions::TWO),
            Err(NoiseError::NotEnoughControlPoints {
                kind: "Curve",
                required: 4,
                actual: 0,
            })
        );
    }

    #[test]
    fn unknown_root() {
        let graph = NoiseGraph::new();
        assert_eq!(
            graph.validate(NodeId(0), Dimensions::ONE),
            Err(NoiseError::UnknownNode(NodeId(0)))
        );
    }
}
