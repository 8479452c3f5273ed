//! Polygon-soup solids, the representation the boolean engine works on.
//!
//! A [`Solid`] is a set of convex planar polygons that together bound a
//! volume. It converts losslessly from a [`Mesh`] and back (polygons are fan
//! triangulated and corners welded on the tolerance grid).

use std::collections::HashMap;

use nalgebra::{Isometry3, Point3, Vector3};

use crate::bounds::BoundingBox;
use crate::mesh::Mesh;
use crate::repair::repair_t_junctions;
use crate::Tolerance;

/// Oriented plane `normal · p = w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub w: f64,
}

impl Plane {
    /// Plane through a point with the given (not necessarily unit) normal.
    pub fn from_point_normal(point: &Point3<f64>, normal: &Vector3<f64>) -> Option<Self> {
        let len = normal.norm();
        if !(len > 1e-12) {
            return None;
        }
        let normal = normal / len;
        Some(Self {
            normal,
            w: normal.dot(&point.coords),
        })
    }

    pub fn signed_distance(&self, p: &Point3<f64>) -> f64 {
        self.normal.dot(&p.coords) - self.w
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }
}

/// Convex planar polygon with counter-clockwise outward winding.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Point3<f64>>,
    pub plane: Plane,
}

impl Polygon {
    /// Build a polygon, deriving its plane with Newell's method. Returns `None`
    /// for fewer than three corners or a zero-area outline.
    pub fn new(vertices: Vec<Point3<f64>>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let mut normal = Vector3::zeros();
        let mut centroid = Vector3::zeros();
        for (i, a) in vertices.iter().enumerate() {
            let b = &vertices[(i + 1) % vertices.len()];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
            centroid += a.coords;
        }
        centroid /= vertices.len() as f64;
        let plane = Plane::from_point_normal(&Point3::from(centroid), &normal)?;
        Some(Self { vertices, plane })
    }

    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    pub fn area(&self) -> f64 {
        let first = self.vertices[0];
        self.vertices
            .windows(2)
            .skip(1)
            .map(|w| 0.5 * (w[0] - first).cross(&(w[1] - first)).dot(&self.plane.normal))
            .sum()
    }

    pub fn transformed(&self, pose: &Isometry3<f64>) -> Polygon {
        let vertices: Vec<Point3<f64>> = self.vertices.iter().map(|v| pose * v).collect();
        let normal = pose.rotation * self.plane.normal;
        Polygon {
            plane: Plane {
                normal,
                w: normal.dot(&vertices[0].coords),
            },
            vertices,
        }
    }
}

/// A closed solid as a soup of convex polygons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
    polygons: Vec<Polygon>,
}

impl Solid {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Each mesh triangle becomes one polygon; zero-area triangles are dropped.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let polygons = mesh
            .triangles()
            .filter_map(|tri| Polygon::new(tri.to_vec()))
            .collect();
        Self { polygons }
    }

    /// Fan-triangulate every polygon and weld coincident corners so that
    /// neighbouring polygons share vertices. T-junctions left by clipping are
    /// closed afterwards.
    pub fn to_mesh(&self) -> Mesh {
        let tol = crate::default_tolerance();
        let mut welder = VertexWelder::new(&tol);
        let mut mesh = Mesh::new();

        for polygon in &self.polygons {
            let mut ring: Vec<u32> = Vec::with_capacity(polygon.vertices.len());
            for v in &polygon.vertices {
                let idx = welder.index_of(v, &mut mesh.vertices);
                if ring.last() != Some(&idx) {
                    ring.push(idx);
                }
            }
            while ring.len() > 1 && ring.first() == ring.last() {
                ring.pop();
            }
            for i in 1..ring.len().saturating_sub(1) {
                let tri = [ring[0], ring[i], ring[i + 1]];
                if tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2] {
                    mesh.faces.push(tri);
                }
            }
        }

        repair_t_junctions(&mut mesh, &tol);
        mesh
    }

    pub fn transformed(&self, pose: &Isometry3<f64>) -> Solid {
        Solid {
            polygons: self.polygons.iter().map(|p| p.transformed(pose)).collect(),
        }
    }

    pub fn translated(&self, offset: Vector3<f64>) -> Solid {
        self.transformed(&Isometry3::translation(offset.x, offset.y, offset.z))
    }

    /// Swap inside and outside.
    pub fn inverted(&self) -> Solid {
        let mut polygons = self.polygons.clone();
        polygons.iter_mut().for_each(Polygon::flip);
        Solid { polygons }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.polygons.iter().flat_map(|p| p.vertices.iter()))
    }

    /// Concatenate two polygon sets without any clipping.
    pub fn combined(&self, other: &Solid) -> Solid {
        let mut polygons = self.polygons.clone();
        polygons.extend_from_slice(&other.polygons);
        Solid { polygons }
    }
}

/// Maps positions to vertex indices on a quantised grid.
struct VertexWelder {
    inv_cell: f64,
    lookup: HashMap<(i64, i64, i64), u32>,
}

impl VertexWelder {
    fn new(tol: &Tolerance) -> Self {
        Self {
            inv_cell: 1.0 / tol.weld,
            lookup: HashMap::new(),
        }
    }

    fn index_of(&mut self, p: &Point3<f64>, vertices: &mut Vec<Point3<f64>>) -> u32 {
        let key = (
            (p.x * self.inv_cell).round() as i64,
            (p.y * self.inv_cell).round() as i64,
            (p.z * self.inv_cell).round() as i64,
        );
        *self.lookup.entry(key).or_insert_with(|| {
            vertices.push(*p);
            (vertices.len() - 1) as u32
        })
    }
}
