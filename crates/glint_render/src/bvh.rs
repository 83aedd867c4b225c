//! Bounding volume hierarchy.
//!
//! Nodes live in a flat arena addressed by index instead of boxed
//! children, which keeps traversal a tight loop over an explicit stack.
//! The tree is strictly binary: leaves hold exactly one primitive and
//! internal nodes exactly two children. Construction is a median split
//! on the longest axis of the node's bounds, ordering primitives by the
//! lower edge of their boxes.

use std::sync::Arc;

use glint_math::{Aabb, Interval, Ray};

use crate::intersection::Intersection;
use crate::primitive::Primitive;

enum Node {
    Internal {
        bounds: Aabb,
        left: usize,
        right: usize,
    },
    Leaf {
        bounds: Aabb,
        /// Index into the shared primitive collection
        primitive: usize,
    },
}

impl Node {
    fn bounds(&self) -> Aabb {
        match self {
            Node::Internal { bounds, .. } => *bounds,
            Node::Leaf { bounds, .. } => *bounds,
        }
    }
}

/// A BVH over a shared set of primitives.
pub struct Bvh {
    nodes: Vec<Node>,
    primitives: Arc<[Primitive]>,
    root: usize,
}

impl Bvh {
    /// Build a hierarchy over the primitives.
    ///
    /// The collection itself is never reordered; construction permutes
    /// an index array, so the same `Arc` can back other containers.
    pub fn new(primitives: Arc<[Primitive]>) -> Self {
        let mut nodes = Vec::new();
        let root = if primitives.is_empty() {
            0
        } else {
            let mut indices: Vec<usize> = (0..primitives.len()).collect();
            build(&mut nodes, &primitives, &mut indices)
        };

        log::debug!(
            "Built BVH: {} primitives, {} nodes",
            primitives.len(),
            nodes.len()
        );

        Self {
            nodes,
            primitives,
            root,
        }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn bounds(&self) -> Aabb {
        if self.nodes.is_empty() {
            Aabb::EMPTY
        } else {
            self.nodes[self.root].bounds()
        }
    }

    /// Find the nearest intersection inside the window, if any.
    ///
    /// Depth-first traversal with an explicit stack. The window max is
    /// tightened to the nearest hit so far, so whole subtrees beyond it
    /// are culled by their bounds test.
    pub fn intersect(&self, ray: &Ray, window: Interval) -> Option<Intersection> {
        if self.nodes.is_empty() {
            return None;
        }

        let mut nearest: Option<Intersection> = None;
        let mut window = window;
        let mut stack = vec![self.root];

        while let Some(index) = stack.pop() {
            match &self.nodes[index] {
                Node::Internal {
                    bounds,
                    left,
                    right,
                } => {
                    if bounds.hit(ray, window) {
                        stack.push(*right);
                        stack.push(*left);
                    }
                }
                Node::Leaf { bounds, primitive } => {
                    if !bounds.hit(ray, window) {
                        continue;
                    }
                    if let Some(hit) = self.primitives[*primitive].intersect(ray, window) {
                        window = window.shrunk_to(hit.t);
                        nearest = Some(hit);
                    }
                }
            }
        }

        nearest
    }
}

/// Build the subtree for the given primitive indices, returning the
/// index of its root node.
fn build(nodes: &mut Vec<Node>, primitives: &[Primitive], indices: &mut [usize]) -> usize {
    let bounds = indices.iter().fold(Aabb::EMPTY, |acc, &i| {
        Aabb::union(&acc, &primitives[i].bounds())
    });

    if let [primitive] = *indices {
        nodes.push(Node::Leaf { bounds, primitive });
        return nodes.len() - 1;
    }

    let axis = bounds.longest_axis();
    indices.sort_unstable_by(|&a, &b| {
        primitives[a]
            .bounds()
            .min_on_axis(axis)
            .partial_cmp(&primitives[b].bounds().min_on_axis(axis))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mid = indices.len() / 2;
    let (left_half, right_half) = indices.split_at_mut(mid);
    let left = build(nodes, primitives, left_half);
    let right = build(nodes, primitives, right_half);

    nodes.push(Node::Internal {
        bounds,
        left,
        right,
    });
    nodes.len() - 1
}
