//! Loader for the classic vertex/triangle text model format:
//!
//! ```text
//! VertexCount: 31076
//! TriangleCount: 60339
//! VertexList (pos, normal)
//! {
//!     x y z nx ny nz
//!     ...
//! }
//! TriangleList
//! {
//!     i0 i1 i2
//!     ...
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::Vec3;

/// Mesh loaded from a model file.
#[derive(Debug, Clone)]
pub struct ModelData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl ModelData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Read and parse a model file.
pub fn load(path: &Path) -> Result<ModelData> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read model file {}", path.display()))?;
    parse(&text).with_context(|| format!("malformed model file {}", path.display()))
}

fn parse(text: &str) -> Result<ModelData> {
    let mut tokens = text.split_whitespace();

    let vertex_count = expect_count(&mut tokens, "VertexCount:")?;
    let triangle_count = expect_count(&mut tokens, "TriangleCount:")?;

    // The rest is labels, braces and numbers; only the numbers matter, and
    // their count is fully determined by the header.
    let numbers: Vec<&str> = tokens.filter(|t| t.parse::<f64>().is_ok()).collect();
    let expected = vertex_count * 6 + triangle_count * 3;
    if numbers.len() != expected {
        bail!(
            "expected {} numeric fields ({} vertices, {} triangles), found {}",
            expected,
            vertex_count,
            triangle_count,
            numbers.len()
        );
    }

    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    for chunk in numbers[..vertex_count * 6].chunks_exact(6) {
        let f: Vec<f32> = chunk.iter().map(|t| t.parse().unwrap_or(0.0)).collect();
        positions.push(Vec3::new(f[0], f[1], f[2]));
        normals.push(Vec3::new(f[3], f[4], f[5]));
    }

    let mut indices = Vec::with_capacity(triangle_count * 3);
    for token in &numbers[vertex_count * 6..] {
        let index: u32 = token
            .parse()
            .with_context(|| format!("triangle index {:?} is not a non-negative integer", token))?;
        if index as usize >= vertex_count {
            bail!(
                "triangle index {} out of range for {} vertices",
                index,
                vertex_count
            );
        }
        indices.push(index);
    }

    Ok(ModelData {
        positions,
        normals,
        indices,
    })
}

fn expect_count<'a>(tokens: &mut impl Iterator<Item = &'a str>, label: &str) -> Result<usize> {
    match tokens.next() {
        Some(token) if token == label => {}
        other => bail!("expected {:?}, found {:?}", label, other),
    }
    let value = tokens
        .next()
        .with_context(|| format!("missing value after {:?}", label))?;
    value
        .parse()
        .with_context(|| format!("bad value {:?} after {:?}", value, label))
}
