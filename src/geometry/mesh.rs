// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Polygon mesh representation and utilities

use super::{Axis, BoundingBox};
use ahash::AHashSet;
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Polygon defined by an ordered loop of vertex indices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn triangle(a: usize, b: usize, c: usize) -> Self {
        Self::new(vec![a, b, c])
    }

    pub fn quad(a: usize, b: usize, c: usize, d: usize) -> Self {
        Self::new(vec![a, b, c, d])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Undirected edges of the face loop, smaller index first
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| {
            let a = self.indices[i];
            let b = self.indices[(i + 1) % n];
            if a < b {
                (a, b)
            } else {
                (b, a)
            }
        })
    }
}

/// Polygon mesh as a scene would hand it over: shared vertices, n-gon faces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolyMesh {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<Face>,
}

impl PolyMesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new()
    }

    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    pub fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        let index = self.vertices.len();
        self.vertices.push(position);
        index
    }

    /// Add a face
    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of distinct undirected edges shared by the faces
    pub fn edge_count(&self) -> usize {
        let mut edges: AHashSet<(usize, usize)> = AHashSet::new();
        for face in &self.faces {
            edges.extend(face.edges());
        }
        edges.len()
    }

    /// Check that every face references existing vertices and has at least three corners
    pub fn has_valid_faces(&self) -> bool {
        self.faces
            .iter()
            .all(|f| f.len() >= 3 && f.indices.iter().all(|&i| i < self.vertices.len()))
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }

    /// Pivot: centre of the axis-aligned bounding box
    pub fn pivot(&self) -> Point3<f64> {
        self.bounding_box().center()
    }

    /// Total area of all faces, each fan-triangulated from its first corner
    pub fn surface_area(&self) -> f64 {
        let mut area = 0.0;

        for face in &self.faces {
            if face.len() < 3 {
                continue;
            }
            let Some(v0) = self.vertices.get(face.indices[0]) else {
                continue;
            };
            for pair in face.indices[1..].windows(2) {
                let (Some(v1), Some(v2)) = (self.vertices.get(pair[0]), self.vertices.get(pair[1]))
                else {
                    continue;
                };
                let edge1 = v1 - v0;
                let edge2 = v2 - v0;
                area += edge1.cross(&edge2).norm() / 2.0;
            }
        }

        area
    }

    /// Transform all vertices by a matrix
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for vertex in &mut self.vertices {
            *vertex = matrix.transform_point(vertex);
        }
    }

    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            *vertex += offset;
        }
    }

    /// Copy of this mesh mirrored across the world plane perpendicular to `axis`.
    ///
    /// Vertex order is preserved so vertex `i` of the copy is the mirror of vertex `i`.
    /// Face winding is reversed to keep normals pointing outward; each face keeps
    /// its first corner so fan triangulation (and area) is unchanged.
    pub fn mirrored(&self, axis: Axis) -> PolyMesh {
        let vertices = self
            .vertices
            .iter()
            .map(|p| {
                let mut q = *p;
                q[axis.index()] = -q[axis.index()];
                q
            })
            .collect();

        let faces = self
            .faces
            .iter()
            .map(|f| match f.indices.split_first() {
                Some((first, rest)) => {
                    Face::new(std::iter::once(*first).chain(rest.iter().rev().copied()).collect())
                }
                None => f.clone(),
            })
            .collect();

        PolyMesh { vertices, faces }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_quad() -> PolyMesh {
        let mut mesh = PolyMesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.add_face(Face::quad(0, 1, 2, 3));
        mesh
    }

    #[test]
    fn test_quad_topology() {
        let mesh = unit_quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.edge_count(), 4);
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.has_valid_faces());
    }

    #[test]
    fn test_shared_edges_counted_once() {
        let mut mesh = unit_quad();
        mesh.faces = vec![Face::triangle(0, 1, 2), Face::triangle(0, 2, 3)];
        assert_eq!(mesh.edge_count(), 5);
    }

    #[test]
    fn test_surface_area() {
        assert_relative_eq!(unit_quad().surface_area(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mirrored_keeps_vertex_order() {
        let mut mesh = unit_quad();
        mesh.translate(Vector3::new(3.0, 0.0, 0.0));
        let mirror = mesh.mirrored(Axis::X);

        for (a, b) in mesh.vertices.iter().zip(&mirror.vertices) {
            assert_eq!(a.x, -b.x);
            assert_eq!(a.y, b.y);
        }
        assert_relative_eq!(mirror.surface_area(), mesh.surface_area(), epsilon = 1e-12);
        assert_eq!(mirror.pivot().x, -mesh.pivot().x);
    }

    #[test]
    fn test_transform_moves_and_scales() {
        let mut mesh = unit_quad();
        let matrix = Matrix4::new_translation(&Vector3::new(4.0, -1.0, 2.0))
            * Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 3.0, 1.0));
        mesh.transform(&matrix);

        assert_eq!(mesh.vertices[0], Point3::new(4.0, -1.0, 2.0));
        assert_eq!(mesh.vertices[2], Point3::new(6.0, 2.0, 2.0));
        assert_relative_eq!(mesh.surface_area(), 6.0, epsilon = 1e-12);
        assert_eq!(mesh.pivot(), Point3::new(5.0, 0.5, 2.0));
    }

    #[test]
    fn test_invalid_face_detected() {
        let mut mesh = unit_quad();
        mesh.add_face(Face::triangle(0, 1, 9));
        assert!(!mesh.has_valid_faces());
    }
}
