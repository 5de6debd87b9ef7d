//! The hills demo: a static terrain grid with a height function and
//! height-banded vertex colors.

use glam::Mat4;

use crate::camera::OrbitCamera;
use crate::geometry;
use crate::params::OrbitParams;
use crate::scene::{DrawCall, SceneParts, SceneVertex, CLEAR_STEEL_BLUE};

/// Rolling-hills height function applied to the flat grid.
pub(super) fn hill_height(x: f32, z: f32) -> f32 {
    0.3 * (z * (0.1 * x).sin() + x * (0.1 * z).cos())
}

/// Color the terrain by height: sandy beaches up to snowy peaks.
pub(super) fn hill_color(y: f32) -> [f32; 4] {
    if y < -10.0 {
        [1.0, 0.96, 0.62, 1.0]
    } else if y < 5.0 {
        [0.48, 0.77, 0.46, 1.0]
    } else if y < 12.0 {
        [0.1, 0.48, 0.19, 1.0]
    } else if y < 20.0 {
        [0.45, 0.39, 0.34, 1.0]
    } else {
        [1.0, 1.0, 1.0, 1.0]
    }
}

/// Build the terrain vertex list from the shared grid generator.
pub(super) fn land_vertices(width: f32, depth: f32, m: usize, n: usize) -> (Vec<SceneVertex>, Vec<u32>) {
    let mesh = geometry::grid(width, depth, m, n);
    let vertices = mesh
        .vertices
        .iter()
        .map(|v| {
            let y = hill_height(v.position.x, v.position.z);
            SceneVertex {
                position: [v.position.x, y, v.position.z],
                color: hill_color(y),
            }
        })
        .collect();
    (vertices, mesh.indices)
}

pub fn build() -> SceneParts {
    let (vertices, indices) = land_vertices(160.0, 160.0, 50, 50);

    SceneParts {
        draws: vec![DrawCall {
            index_offset: 0,
            index_count: indices.len() as u32,
            base_vertex: 0,
            world: Mat4::IDENTITY,
            wireframe: false,
        }],
        vertices,
        indices,
        camera: OrbitCamera::new(OrbitParams::terrain()),
        clear_color: CLEAR_STEEL_BLUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hills_scene_shape() {
        let parts = build();
        assert_eq!(parts.vertices.len(), 2500);
        assert_eq!(parts.indices.len(), 49 * 49 * 6);

        // Heights follow the height function, colors follow the bands.
        for v in &parts.vertices {
            let [x, y, z] = v.position;
            assert_eq!(y, hill_height(x, z));
            assert_eq!(v.color, hill_color(y));
        }
    }

    #[test]
    fn test_hill_color_bands() {
        assert_eq!(hill_color(-15.0), [1.0, 0.96, 0.62, 1.0]);
        assert_eq!(hill_color(0.0), [0.48, 0.77, 0.46, 1.0]);
        assert_eq!(hill_color(25.0), [1.0, 1.0, 1.0, 1.0]);
    }
}
