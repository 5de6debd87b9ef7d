//! The skull demo: a wireframe view of a mesh loaded from the classic
//! vertex/triangle text format.

use std::path::Path;

use anyhow::Result;
use glam::{Mat4, Vec3};

use crate::camera::OrbitCamera;
use crate::model;
use crate::params::OrbitParams;
use crate::scene::{DrawCall, SceneParts, SceneVertex, CLEAR_STEEL_BLUE};

const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

pub fn build(path: &Path) -> Result<SceneParts> {
    let mesh = model::load(path)?;
    log::info!(
        "loaded {}: {} vertices, {} triangles",
        path.display(),
        mesh.positions.len(),
        mesh.triangle_count()
    );

    let vertices = mesh
        .positions
        .iter()
        .map(|p| SceneVertex {
            position: p.to_array(),
            color: BLACK,
        })
        .collect();

    Ok(SceneParts {
        draws: vec![DrawCall {
            index_offset: 0,
            index_count: mesh.indices.len() as u32,
            base_vertex: 0,
            world: Mat4::from_translation(Vec3::new(0.0, -2.0, 0.0)),
            wireframe: true,
        }],
        vertices,
        indices: mesh.indices,
        camera: OrbitCamera::new(OrbitParams::model()),
        clear_color: CLEAR_STEEL_BLUE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_file_is_an_error() {
        let err = build(Path::new("no/such/model.txt")).unwrap_err();
        assert!(err.to_string().contains("no/such/model.txt"));
    }
}
