use std::f64::consts::{PI, TAU};

use nalgebra::Point3;
use tracing::{info, instrument};

use crate::solid::{Polygon, Solid};

fn push(polygons: &mut Vec<Polygon>, vertices: Vec<Point3<f64>>) {
    if let Some(p) = Polygon::new(vertices) {
        polygons.push(p);
    }
}

/// Build an axis-aligned box between two opposite corners.
#[instrument]
pub fn make_box(min: Point3<f64>, max: Point3<f64>) -> Solid {
    info!("creating box primitive");
    let (x0, y0, z0) = (min.x, min.y, min.z);
    let (x1, y1, z1) = (max.x, max.y, max.z);
    let p = Point3::new;

    let mut polygons = Vec::with_capacity(6);
    // -X, +X
    push(&mut polygons, vec![p(x0, y0, z0), p(x0, y0, z1), p(x0, y1, z1), p(x0, y1, z0)]);
    push(&mut polygons, vec![p(x1, y0, z0), p(x1, y1, z0), p(x1, y1, z1), p(x1, y0, z1)]);
    // -Y, +Y
    push(&mut polygons, vec![p(x0, y0, z0), p(x1, y0, z0), p(x1, y0, z1), p(x0, y0, z1)]);
    push(&mut polygons, vec![p(x0, y1, z0), p(x0, y1, z1), p(x1, y1, z1), p(x1, y1, z0)]);
    // -Z, +Z
    push(&mut polygons, vec![p(x0, y0, z0), p(x0, y1, z0), p(x1, y1, z0), p(x1, y0, z0)]);
    push(&mut polygons, vec![p(x0, y0, z1), p(x1, y0, z1), p(x1, y1, z1), p(x0, y1, z1)]);

    Solid::new(polygons)
}

/// Build a cylinder along the Z axis, centred on the origin (it spans
/// `-height/2 ..= height/2`).
#[instrument]
pub fn make_cylinder(radius: f64, height: f64, num_segments: usize) -> Solid {
    info!(radius, height, num_segments, "creating cylinder primitive");
    let n = num_segments.max(3);
    let half = height * 0.5;

    let ring = |z: f64| -> Vec<Point3<f64>> {
        (0..n)
            .map(|i| {
                let angle = TAU * (i as f64) / (n as f64);
                Point3::new(radius * angle.cos(), radius * angle.sin(), z)
            })
            .collect()
    };
    let bottom = ring(-half);
    let top = ring(half);

    let mut polygons = Vec::with_capacity(n + 2);

    // Top cap counter-clockwise seen from +Z, bottom cap reversed.
    push(&mut polygons, top.clone());
    push(&mut polygons, bottom.iter().rev().copied().collect());

    for i in 0..n {
        let next = (i + 1) % n;
        push(&mut polygons, vec![bottom[i], bottom[next], top[next], top[i]]);
    }

    Solid::new(polygons)
}

/// Build a UV sphere centred on the origin: triangle fans at the poles and
/// planar quads in between.
#[instrument]
pub fn make_sphere(radius: f64, num_meridians: usize, num_parallels: usize) -> Solid {
    info!(radius, num_meridians, num_parallels, "creating sphere primitive");
    let meridians = num_meridians.max(3);
    let parallels = num_parallels.max(2);

    let north = Point3::new(0.0, 0.0, radius);
    let south = Point3::new(0.0, 0.0, -radius);

    let rings: Vec<Vec<Point3<f64>>> = (1..parallels)
        .map(|j| {
            let phi = PI * (j as f64) / (parallels as f64);
            (0..meridians)
                .map(|i| {
                    let theta = TAU * (i as f64) / (meridians as f64);
                    Point3::new(
                        radius * phi.sin() * theta.cos(),
                        radius * phi.sin() * theta.sin(),
                        radius * phi.cos(),
                    )
                })
                .collect()
        })
        .collect();

    let mut polygons = Vec::with_capacity(meridians * parallels);

    // North cap triangles
    let first = &rings[0];
    for i in 0..meridians {
        let next = (i + 1) % meridians;
        push(&mut polygons, vec![north, first[i], first[next]]);
    }

    // Middle quad strips
    for band in rings.windows(2) {
        let (upper, lower) = (&band[0], &band[1]);
        for i in 0..meridians {
            let next = (i + 1) % meridians;
            push(&mut polygons, vec![upper[i], lower[i], lower[next], upper[next]]);
        }
    }

    // South cap triangles
    let last = &rings[rings.len() - 1];
    for i in 0..meridians {
        let next = (i + 1) % meridians;
        push(&mut polygons, vec![south, last[next], last[i]]);
    }

    Solid::new(polygons)
}
