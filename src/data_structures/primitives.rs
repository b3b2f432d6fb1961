//! Tessellation of the canonical solids the scene is built from.
//!
//! Every function here is pure: the same parameters always produce the same
//! batch, byte for byte. Surfaces are generated as a `(u, v)` grid whose
//! partial derivatives `du x dv` point outwards, so every emitted triangle is
//! counter-clockwise seen from outside. The seam column of closed surfaces is
//! repeated with texture coordinate `1.0`, and degenerate parameters (zero
//! radius cones, single-slice disks) are legal.

use std::f32::consts::{PI, TAU};

use cgmath::{InnerSpace, Vector3};

use crate::data_structures::{
    batch::{Batch, BatchBuilder, Topology},
    model::ModelVertex,
};

fn angle(step: u32, steps: u32, full_turn: f32) -> f32 {
    if step == steps {
        0.0
    } else {
        full_turn * step as f32 / steps as f32
    }
}

fn grid(u_steps: u32, v_steps: u32, builder: &mut BatchBuilder, at: impl Fn(u32, u32) -> ModelVertex) {
    for v in 0..v_steps {
        for u in 0..u_steps {
            builder.quad(at(u, v), at(u + 1, v), at(u + 1, v + 1), at(u, v + 1));
        }
    }
}

/// A (truncated) cone along +Z from `z = 0` with `base_radius` to
/// `z = length` with `top_radius`. Neither end is capped.
pub fn make_cylinder(base_radius: f32, top_radius: f32, length: f32, slices: u32, stacks: u32) -> Batch {
    let slices = slices.max(1);
    let stacks = stacks.max(1);
    let mut builder = BatchBuilder::new();
    grid(slices, stacks, &mut builder, |j, i| {
        let theta = angle(j, slices, TAU);
        let t = i as f32 / stacks as f32;
        let radius = base_radius + (top_radius - base_radius) * t;
        let (sin, cos) = theta.sin_cos();
        let slope = Vector3::new(cos * length, sin * length, base_radius - top_radius);
        let normal = if slope.magnitude2() > f32::EPSILON {
            slope.normalize()
        } else {
            Vector3::new(cos, sin, 0.0)
        };
        ModelVertex::new(
            [radius * cos, radius * sin, length * t],
            normal.into(),
            [j as f32 / slices as f32, t],
        )
    });
    builder.build(format!(
        "cylinder({base_radius},{top_radius},{length},{slices},{stacks})"
    ))
}

pub fn make_sphere(radius: f32, slices: u32, stacks: u32) -> Batch {
    let slices = slices.max(1);
    let stacks = stacks.max(1);
    let mut builder = BatchBuilder::new();
    grid(stacks, slices, &mut builder, |i, j| {
        let rho = PI * i as f32 / stacks as f32;
        let theta = angle(j, slices, TAU);
        let (sin_rho, cos_rho) = rho.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        let normal = [-sin_theta * sin_rho, cos_theta * sin_rho, cos_rho];
        ModelVertex::new(
            [normal[0] * radius, normal[1] * radius, normal[2] * radius],
            normal,
            [j as f32 / slices as f32, 1.0 - i as f32 / stacks as f32],
        )
    });
    builder.build(format!("sphere({radius},{slices},{stacks})"))
}

/// A torus in the XY plane around the origin.
pub fn make_torus(major_radius: f32, minor_radius: f32, major_slices: u32, minor_slices: u32) -> Batch {
    let major_slices = major_slices.max(1);
    let minor_slices = minor_slices.max(1);
    let mut builder = BatchBuilder::new();
    grid(major_slices, minor_slices, &mut builder, |i, j| {
        let (sin_a, cos_a) = angle(i, major_slices, TAU).sin_cos();
        let (sin_b, cos_b) = angle(j, minor_slices, TAU).sin_cos();
        let ring = major_radius + minor_radius * cos_b;
        ModelVertex::new(
            [cos_a * ring, sin_a * ring, minor_radius * sin_b],
            [cos_a * cos_b, sin_a * cos_b, sin_b],
            [
                i as f32 / major_slices as f32,
                j as f32 / minor_slices as f32,
            ],
        )
    });
    builder.build(format!(
        "torus({major_radius},{minor_radius},{major_slices},{minor_slices})"
    ))
}

/// A flat annulus in the XY plane facing +Z.
pub fn make_disk(inner_radius: f32, outer_radius: f32, slices: u32, stacks: u32) -> Batch {
    let slices = slices.max(1);
    let stacks = stacks.max(1);
    let mut builder = BatchBuilder::new();
    let tex = |c: f32| {
        if outer_radius > 0.0 {
            (c / outer_radius + 1.0) * 0.5
        } else {
            0.5
        }
    };
    grid(stacks, slices, &mut builder, |i, j| {
        let radius = inner_radius + (outer_radius - inner_radius) * i as f32 / stacks as f32;
        let (sin, cos) = angle(j, slices, TAU).sin_cos();
        let (x, y) = (radius * cos, radius * sin);
        ModelVertex::new([x, y, 0.0], [0.0, 0.0, 1.0], [tex(x), tex(y)])
    });
    builder.build(format!(
        "disk({inner_radius},{outer_radius},{slices},{stacks})"
    ))
}

/// An axis aligned cube centred on the origin with the given half extent.
pub fn make_cube(half_extent: f32) -> Batch {
    let x = Vector3::unit_x();
    let y = Vector3::unit_y();
    let z = Vector3::unit_z();
    // (normal, u, v) with u x v == normal
    let faces = [(x, y, z), (-x, z, y), (y, z, x), (-y, x, z), (z, x, y), (-z, y, x)];
    let mut builder = BatchBuilder::new();
    for (normal, u, v) in faces {
        let corner = |a: f32, b: f32| {
            let p = (normal + u * (2.0 * a - 1.0) + v * (2.0 * b - 1.0)) * half_extent;
            ModelVertex::new(p.into(), normal.into(), [a, b])
        };
        builder.quad(corner(0.0, 0.0), corner(1.0, 0.0), corner(1.0, 1.0), corner(0.0, 1.0));
    }
    builder.build(format!("cube({half_extent})"))
}

/// A convex polygon drawn as a triangle fan around its first vertex.
pub fn make_fan(name: impl Into<String>, vertices: Vec<ModelVertex>) -> Batch {
    let indices = (0..vertices.len() as u32).collect();
    Batch::new(name, Topology::TriangleFan, vertices, indices)
}

/// A closed polyline through `points`.
pub fn make_line_loop(name: impl Into<String>, points: &[[f32; 3]]) -> Batch {
    let vertices = points
        .iter()
        .map(|p| ModelVertex::new(*p, [0.0, 1.0, 0.0], [0.0, 0.0]))
        .collect::<Vec<_>>();
    let indices = (0..vertices.len() as u32).collect();
    Batch::new(name, Topology::LineLoop, vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    fn centroid(batch: &Batch, tri: &[u32]) -> Vector3<f32> {
        let p = |i: u32| Vector3::from(batch.vertices()[i as usize].position);
        (p(tri[0]) + p(tri[1]) + p(tri[2])) / 3.0
    }

    fn face_normal(batch: &Batch, tri: &[u32]) -> Vector3<f32> {
        let p = |i: u32| Vector3::from(batch.vertices()[i as usize].position);
        (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]))
    }

    #[test]
    fn sphere_triangles_face_outwards() {
        let sphere = make_sphere(1.0, 12, 8);
        for tri in sphere.indices().chunks(3) {
            assert!(face_normal(&sphere, tri).dot(centroid(&sphere, tri)) > 0.0);
        }
    }

    #[test]
    fn cylinder_triangles_face_outwards() {
        let cylinder = make_cylinder(0.5, 0.5, 2.0, 10, 4);
        for tri in cylinder.indices().chunks(3) {
            let mut radial = centroid(&cylinder, tri);
            radial.z = 0.0;
            assert!(face_normal(&cylinder, tri).dot(radial) > 0.0);
        }
    }

    #[test]
    fn disk_faces_positive_z() {
        let disk = make_disk(0.0, 1.0, 16, 3);
        assert!(!disk.is_empty());
        for tri in disk.indices().chunks(3) {
            assert!(face_normal(&disk, tri).z > 0.0);
        }
    }

    #[test]
    fn torus_triangles_face_away_from_the_tube_centre() {
        let torus = make_torus(1.0, 0.25, 16, 8);
        for tri in torus.indices().chunks(3) {
            let c = centroid(&torus, tri);
            let core = Vector3::new(c.x, c.y, 0.0).normalize();
            assert!(face_normal(&torus, tri).dot(c - core) > 0.0);
        }
    }

    #[test]
    fn cube_has_six_quads() {
        let cube = make_cube(0.5);
        assert_eq!(cube.indices().len(), 36);
        assert_eq!(cube.vertices().len(), 24);
        for v in cube.vertices() {
            assert!(v.position.iter().all(|c| (c.abs() - 0.5).abs() < 1e-6));
        }
    }

    #[test]
    fn fan_keeps_its_vertex_order() {
        let quad = make_fan("quad", vec![ModelVertex::default(); 4]);
        assert_eq!(quad.topology(), Topology::TriangleFan);
        assert_eq!(quad.indices(), &[0, 1, 2, 3]);
    }
}
