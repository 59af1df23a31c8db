// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! Geometry module - mesh representation and measurements

mod axis;
mod bbox;
mod mesh;
mod primitives;

pub use axis::{Axis, ParseAxisError};
pub use bbox::BoundingBox;
pub use mesh::{Face, PolyMesh};
pub use primitives::Primitive;
