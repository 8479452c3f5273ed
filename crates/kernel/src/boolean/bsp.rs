//! Binary space partitioning of polygon sets.
//!
//! Nodes live in a `SlotMap` arena and every traversal uses an explicit work
//! stack, so tree depth (which reaches the polygon count for convex solids) is
//! never bounded by the thread's stack size.

use slotmap::{new_key_type, SlotMap};

use crate::solid::{Plane, Polygon};

new_key_type! {
    pub struct NodeId;
}

#[derive(Debug, Clone, Default)]
struct BspNode {
    plane: Option<Plane>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    polygons: Vec<Polygon>,
}

/// Where a polygon sits relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Coplanar = 0,
    Front = 1,
    Back = 2,
    Spanning = 3,
}

impl Side {
    fn of(distance: f64, epsilon: f64) -> Side {
        if distance < -epsilon {
            Side::Back
        } else if distance > epsilon {
            Side::Front
        } else {
            Side::Coplanar
        }
    }

    fn combine(self, other: Side) -> Side {
        match (self as u8) | (other as u8) {
            0 => Side::Coplanar,
            1 => Side::Front,
            2 => Side::Back,
            _ => Side::Spanning,
        }
    }
}

/// Output buckets of [`split_polygon`].
#[derive(Default)]
struct Split {
    coplanar_front: Vec<Polygon>,
    coplanar_back: Vec<Polygon>,
    front: Vec<Polygon>,
    back: Vec<Polygon>,
}

/// Split `polygon` by `plane` into the four buckets. Spanning polygons are cut
/// along the plane; both halves keep the parent's plane.
fn split_polygon(plane: &Plane, polygon: Polygon, epsilon: f64, out: &mut Split) {
    let sides: Vec<Side> = polygon
        .vertices
        .iter()
        .map(|v| Side::of(plane.signed_distance(v), epsilon))
        .collect();
    let overall = sides.iter().fold(Side::Coplanar, |acc, s| acc.combine(*s));

    match overall {
        Side::Coplanar => {
            if plane.normal.dot(&polygon.plane.normal) > 0.0 {
                out.coplanar_front.push(polygon);
            } else {
                out.coplanar_back.push(polygon);
            }
        }
        Side::Front => out.front.push(polygon),
        Side::Back => out.back.push(polygon),
        Side::Spanning => {
            let n = polygon.vertices.len();
            let mut f = Vec::with_capacity(n + 1);
            let mut b = Vec::with_capacity(n + 1);
            for i in 0..n {
                let j = (i + 1) % n;
                let (si, sj) = (sides[i], sides[j]);
                let (vi, vj) = (polygon.vertices[i], polygon.vertices[j]);
                if si != Side::Back {
                    f.push(vi);
                }
                if si != Side::Front {
                    b.push(vi);
                }
                if si.combine(sj) == Side::Spanning {
                    let t = (plane.w - plane.normal.dot(&vi.coords))
                        / plane.normal.dot(&(vj - vi));
                    let v = vi + (vj - vi) * t;
                    f.push(v);
                    b.push(v);
                }
            }
            if f.len() >= 3 {
                out.front.push(Polygon {
                    vertices: f,
                    plane: polygon.plane,
                });
            }
            if b.len() >= 3 {
                out.back.push(Polygon {
                    vertices: b,
                    plane: polygon.plane,
                });
            }
        }
    }
}

/// A BSP tree over a set of polygons.
pub struct BspTree {
    nodes: SlotMap<NodeId, BspNode>,
    root: NodeId,
    epsilon: f64,
}

impl BspTree {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(BspNode::default());
        let mut tree = Self {
            nodes,
            root,
            epsilon: crate::default_tolerance().plane,
        };
        tree.build(polygons);
        tree
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert polygons, extending the tree where they fall outside existing
    /// leaves. The first polygon reaching an empty node donates its plane.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        let mut work = vec![(self.root, polygons)];
        while let Some((id, polygons)) = work.pop() {
            if polygons.is_empty() {
                continue;
            }
            let plane = *self.nodes[id].plane.get_or_insert(polygons[0].plane);

            let mut split = Split::default();
            for polygon in polygons {
                split_polygon(&plane, polygon, self.epsilon, &mut split);
            }

            let node = &mut self.nodes[id];
            node.polygons.append(&mut split.coplanar_front);
            node.polygons.append(&mut split.coplanar_back);
            let (front, back) = (node.front, node.back);

            if !split.front.is_empty() {
                let child = front.unwrap_or_else(|| {
                    let child = self.nodes.insert(BspNode::default());
                    self.nodes[id].front = Some(child);
                    child
                });
                work.push((child, split.front));
            }
            if !split.back.is_empty() {
                let child = back.unwrap_or_else(|| {
                    let child = self.nodes.insert(BspNode::default());
                    self.nodes[id].back = Some(child);
                    child
                });
                work.push((child, split.back));
            }
        }
    }

    /// Convert solid space to empty space and vice versa.
    pub fn invert(&mut self) {
        for node in self.nodes.values_mut() {
            node.polygons.iter_mut().for_each(Polygon::flip);
            if let Some(plane) = node.plane.as_mut() {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);
        }
    }

    /// Remove the parts of `polygons` that lie inside the solid this tree
    /// bounds.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut kept = Vec::new();
        let mut work = vec![(self.root, polygons)];
        while let Some((id, polygons)) = work.pop() {
            let node = &self.nodes[id];
            let Some(plane) = node.plane else {
                kept.extend(polygons);
                continue;
            };

            let mut split = Split::default();
            for polygon in polygons {
                split_polygon(&plane, polygon, self.epsilon, &mut split);
            }
            let mut front = split.front;
            front.append(&mut split.coplanar_front);
            let mut back = split.back;
            back.append(&mut split.coplanar_back);

            match node.front {
                Some(child) => work.push((child, front)),
                None => kept.extend(front),
            }
            // Back of a leaf is inside the solid: drop.
            if let Some(child) = node.back {
                work.push((child, back));
            }
        }
        kept
    }

    /// Remove every polygon in this tree that lies inside `other`.
    pub fn clip_to(&mut self, other: &BspTree) {
        for node in self.nodes.values_mut() {
            let polygons = std::mem::take(&mut node.polygons);
            node.polygons = other.clip_polygons(polygons);
        }
    }

    pub fn all_polygons(&self) -> Vec<Polygon> {
        self.nodes
            .values()
            .flat_map(|node| node.polygons.iter().cloned())
            .collect()
    }
}
