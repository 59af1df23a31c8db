// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Geometric primitives generator

use super::{Face, PolyMesh};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Geometric primitives
pub enum Primitive {
    Quad { width: f64, height: f64 },
    Cube { size: Vector3<f64>, center: bool },
    Cylinder { h: f64, r: f64, fn_: u32 },
    Sphere { r: f64, fn_: u32 },
}

impl Primitive {
    pub fn quad(width: f64, height: f64) -> Self {
        Self::Quad { width, height }
    }

    pub fn cube(size: Vector3<f64>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    pub fn cylinder(h: f64, r: f64, fn_: u32) -> Self {
        let segments = if fn_ >= 3 { fn_ } else { 32 };
        Self::Cylinder {
            h,
            r,
            fn_: segments,
        }
    }

    pub fn sphere(r: f64, fn_: u32) -> Self {
        let segments = if fn_ >= 3 { fn_ } else { 32 };
        Self::Sphere { r, fn_: segments }
    }

    pub fn to_mesh(&self) -> PolyMesh {
        match self {
            Self::Quad { width, height } => generate_quad_mesh(*width, *height),
            Self::Cube { size, center } => generate_cube_mesh(*size, *center),
            Self::Cylinder { h, r, fn_ } => generate_cylinder_mesh(*h, *r, *fn_),
            Self::Sphere { r, fn_ } => generate_sphere_mesh(*r, *fn_),
        }
    }
}

/// Single quad in the XY plane, centred on the origin
fn generate_quad_mesh(width: f64, height: f64) -> PolyMesh {
    let (hw, hh) = (width / 2.0, height / 2.0);
    PolyMesh::from_parts(
        vec![
            Point3::new(-hw, -hh, 0.0),
            Point3::new(hw, -hh, 0.0),
            Point3::new(hw, hh, 0.0),
            Point3::new(-hw, hh, 0.0),
        ],
        vec![Face::quad(0, 1, 2, 3)],
    )
}

fn generate_cube_mesh(size: Vector3<f64>, center: bool) -> PolyMesh {
    let (min, max) = if center {
        (-size / 2.0, size / 2.0)
    } else {
        (Vector3::zeros(), size)
    };

    // 8 shared corners
    let vertices = vec![
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(min.x, max.y, max.z),
    ];

    let faces = vec![
        Face::quad(4, 5, 6, 7), // z+
        Face::quad(1, 0, 3, 2), // z-
        Face::quad(5, 1, 2, 6), // x+
        Face::quad(0, 4, 7, 3), // x-
        Face::quad(7, 6, 2, 3), // y+
        Face::quad(0, 1, 5, 4), // y-
    ];

    PolyMesh::from_parts(vertices, faces)
}

/// Closed cylinder along Z from z=0 to z=h with n-gon caps
fn generate_cylinder_mesh(height: f64, radius: f64, segments: u32) -> PolyMesh {
    let n = segments as usize;
    let mut mesh = PolyMesh::with_capacity(2 * n, n + 2);

    for i in 0..n {
        let angle = 2.0 * PI * i as f64 / n as f64;
        mesh.add_vertex(Point3::new(radius * angle.cos(), radius * angle.sin(), 0.0));
    }
    for i in 0..n {
        let angle = 2.0 * PI * i as f64 / n as f64;
        mesh.add_vertex(Point3::new(radius * angle.cos(), radius * angle.sin(), height));
    }

    mesh.add_face(Face::new((0..n).rev().collect()));
    mesh.add_face(Face::new((n..2 * n).collect()));

    for i in 0..n {
        let next = (i + 1) % n;
        mesh.add_face(Face::quad(i, next, n + next, n + i));
    }

    mesh
}

/// UV sphere with shared pole vertices
fn generate_sphere_mesh(radius: f64, segments: u32) -> PolyMesh {
    let slices = segments as usize;
    let stacks = (segments as usize / 2).max(2);
    let mut mesh = PolyMesh::new();

    let north = mesh.add_vertex(Point3::new(0.0, radius, 0.0));
    for i in 1..stacks {
        let phi = PI * i as f64 / stacks as f64;
        let y = radius * phi.cos();
        let r = radius * phi.sin();
        for j in 0..slices {
            let theta = 2.0 * PI * j as f64 / slices as f64;
            mesh.add_vertex(Point3::new(r * theta.cos(), y, r * theta.sin()));
        }
    }
    let south = mesh.add_vertex(Point3::new(0.0, -radius, 0.0));

    let ring = |stack: usize, slice: usize| 1 + (stack - 1) * slices + slice % slices;

    for j in 0..slices {
        mesh.add_face(Face::triangle(north, ring(1, j + 1), ring(1, j)));
    }
    for i in 1..stacks - 1 {
        for j in 0..slices {
            mesh.add_face(Face::quad(ring(i, j), ring(i, j + 1), ring(i + 1, j + 1), ring(i + 1, j)));
        }
    }
    for j in 0..slices {
        mesh.add_face(Face::triangle(south, ring(stacks - 1, j), ring(stacks - 1, j + 1)));
    }

    mesh
}
