//! # BSP Tree
//!
//! Binary Space Partitioning tree for CSG boolean operations.
//! Based on the csg.js algorithm by Evan Wallace.
//!
//! ## Algorithm
//!
//! Each BSP node contains:
//! - A dividing plane (taken from the first polygon inserted)
//! - Polygons coplanar with the plane, either orientation
//! - Front subtree (polygons in front of plane)
//! - Back subtree (polygons behind plane)
//!
//! ## Stack Safety
//!
//! Tree depth grows with polygon count on badly balanced input. Recursive
//! walks go through `stacker::maybe_grow` and `Drop` unlinks children
//! iteratively.

use super::plane::Plane;
use super::polygon::{Polygon, SplitResult};
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use stacker::maybe_grow;

#[derive(Debug, Clone)]
pub struct BspNode {
    plane: Option<Plane>,
    polygons: Vec<Polygon>,
    front: Option<Box<BspNode>>,
    back: Option<Box<BspNode>>,
    epsilon: f64,
}

impl BspNode {
    /// Creates a tree from polygons using `epsilon` as the plane thickness.
    pub fn new(polygons: Vec<Polygon>, epsilon: f64) -> Self {
        let mut node = Self::empty(epsilon);
        node.build(polygons);
        node
    }

    fn empty(epsilon: f64) -> Self {
        Self {
            plane: None,
            polygons: Vec::new(),
            front: None,
            back: None,
            epsilon,
        }
    }

    /// Inserts polygons into the tree, creating nodes as needed.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        if polygons.is_empty() {
            return;
        }
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            let plane = *self.plane.get_or_insert(*polygons[0].plane());

            let mut out = SplitResult::default();
            for poly in polygons {
                poly.split(&plane, self.epsilon, &mut out);
            }
            self.polygons.append(&mut out.coplanar_front);
            self.polygons.append(&mut out.coplanar_back);

            let epsilon = self.epsilon;
            if !out.front.is_empty() {
                self.front
                    .get_or_insert_with(|| Box::new(BspNode::empty(epsilon)))
                    .build(out.front);
            }
            if !out.back.is_empty() {
                self.back
                    .get_or_insert_with(|| Box::new(BspNode::empty(epsilon)))
                    .build(out.back);
            }
        })
    }

    /// Converts solid space to empty space and vice versa.
    pub fn invert(&mut self) {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            for poly in &mut self.polygons {
                poly.flip();
            }
            if let Some(plane) = self.plane.as_mut() {
                *plane = plane.flip();
            }
            if let Some(front) = self.front.as_mut() {
                front.invert();
            }
            if let Some(back) = self.back.as_mut() {
                back.invert();
            }
            std::mem::swap(&mut self.front, &mut self.back);
        })
    }

    /// Removes the parts of `polygons` that lie inside this tree's solid.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let Some(plane) = self.plane else {
            return polygons;
        };
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            let mut out = SplitResult::default();
            for poly in polygons {
                poly.split(&plane, self.epsilon, &mut out);
            }
            let mut front = out.front;
            front.append(&mut out.coplanar_front);
            let mut back = out.back;
            back.append(&mut out.coplanar_back);

            let mut result = match &self.front {
                Some(node) => node.clip_polygons(front),
                None => front,
            };
            // Without a back subtree the back side is solid
            if let Some(node) = &self.back {
                result.extend(node.clip_polygons(back));
            }
            result
        })
    }

    /// Removes all polygons in this tree that are inside `other`.
    pub fn clip_to(&mut self, other: &BspNode) {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.polygons = other.clip_polygons(std::mem::take(&mut self.polygons));
            if let Some(front) = self.front.as_mut() {
                front.clip_to(other);
            }
            if let Some(back) = self.back.as_mut() {
                back.clip_to(other);
            }
        })
    }

    /// Collects every polygon in the tree.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<&BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            result.extend(node.polygons.iter().cloned());
            if let Some(front) = &node.front {
                stack.push(front);
            }
            if let Some(back) = &node.back {
                stack.push(back);
            }
        }

        result
    }

    #[cfg(test)]
    fn polygon_count(&self) -> usize {
        self.all_polygons().len()
    }
}

impl Drop for BspNode {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        stack.extend(self.front.take());
        stack.extend(self.back.take());

        while let Some(mut node) = stack.pop() {
            stack.extend(node.front.take());
            stack.extend(node.back.take());
        }
    }
}
