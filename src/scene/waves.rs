//! The waves demo: the hills terrain with an animated water surface on
//! top, its vertex buffer rewritten from the wave solver every frame.

use anyhow::Result;
use glam::Mat4;

use crate::camera::OrbitCamera;
use crate::params::{OrbitParams, RippleConfig, WaveConfig};
use crate::scene::hills;
use crate::scene::{DrawCall, SceneParts, SceneVertex, CLEAR_STEEL_BLUE};
use crate::waves::{Ripples, WaveField};

const WATER: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Waves demo state: static land plus the simulated water grid.
pub struct WavesScene {
    pub parts: SceneParts,
    field: WaveField,
    ripples: Ripples,
    /// First water vertex in the shared vertex buffer.
    water_base: usize,
}

impl WavesScene {
    pub fn new(seed: u64) -> Result<Self> {
        let (mut vertices, mut indices) = hills::land_vertices(160.0, 160.0, 50, 50);
        let land_index_count = indices.len() as u32;
        let water_base = vertices.len();

        let field = WaveField::new(&WaveConfig::default())?;
        let ripples = Ripples::new(RippleConfig::default(), seed);
        log::info!(
            "water grid: {}x{} ({} vertices, {} triangles), seed {}",
            field.row_count(),
            field.column_count(),
            field.vertex_count(),
            field.triangle_count(),
            seed
        );

        for k in 0..field.vertex_count() {
            vertices.push(SceneVertex {
                position: field.position(k).to_array(),
                color: WATER,
            });
        }

        // Fixed two-triangles-per-quad topology over the water grid; only
        // the vertex heights change after this.
        let rows = field.row_count() as u32;
        let columns = field.column_count() as u32;
        for i in 0..rows - 1 {
            for j in 0..columns - 1 {
                let k = i * columns + j;
                indices.extend_from_slice(&[
                    k,
                    k + columns,
                    k + 1,
                    k + 1,
                    k + columns,
                    k + columns + 1,
                ]);
            }
        }

        let draws = vec![
            DrawCall {
                index_offset: 0,
                index_count: land_index_count,
                base_vertex: 0,
                world: Mat4::IDENTITY,
                wireframe: false,
            },
            DrawCall {
                index_offset: land_index_count,
                index_count: field.triangle_count() as u32 * 3,
                base_vertex: water_base as i32,
                world: Mat4::IDENTITY,
                wireframe: true,
            },
        ];

        Ok(Self {
            parts: SceneParts {
                vertices,
                indices,
                draws,
                camera: OrbitCamera::new(OrbitParams::terrain()),
                clear_color: CLEAR_STEEL_BLUE,
            },
            field,
            ripples,
            water_base,
        })
    }

    /// Rain, integrate, then refresh the water span of the vertex buffer.
    pub fn update(&mut self, delta_time: f32) {
        self.ripples.tick(delta_time, &mut self.field);
        self.field.update(delta_time);

        for k in 0..self.field.vertex_count() {
            self.parts.vertices[self.water_base + k].position = self.field.position(k).to_array();
        }
    }

    /// The water span of the vertex buffer, rewritten each update.
    pub fn dynamic_vertices(&self) -> (usize, &[SceneVertex]) {
        (self.water_base, &self.parts.vertices[self.water_base..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waves_scene_shape() {
        let scene = WavesScene::new(1).unwrap();
        // 50x50 land grid plus 200x200 water grid.
        assert_eq!(scene.parts.vertices.len(), 2500 + 40_000);
        assert_eq!(
            scene.parts.indices.len(),
            49 * 49 * 6 + 79_202 * 3
        );
        assert_eq!(scene.parts.draws.len(), 2);
        assert_eq!(scene.water_base, 2500);

        let water = &scene.parts.draws[1];
        assert!(water.wireframe);
        assert_eq!(water.index_count, 79_202 * 3);
    }

    #[test]
    fn test_update_moves_only_water() {
        let mut scene = WavesScene::new(42).unwrap();
        let land_before: Vec<_> = scene.parts.vertices[..scene.water_base]
            .iter()
            .map(|v| v.position)
            .collect();

        // Long enough for several raindrops to land.
        for _ in 0..40 {
            scene.update(0.03);
        }

        let land_after: Vec<_> = scene.parts.vertices[..scene.water_base]
            .iter()
            .map(|v| v.position)
            .collect();
        assert_eq!(land_before, land_after);

        let moved = scene.parts.vertices[scene.water_base..]
            .iter()
            .any(|v| v.position[1] != 0.0);
        assert!(moved, "water surface never moved");
    }
}
