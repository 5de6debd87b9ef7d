//! The box demo: a single colored cube, one vertex per corner.

use glam::Mat4;

use crate::camera::OrbitCamera;
use crate::params::OrbitParams;
use crate::scene::{DrawCall, SceneParts, SceneVertex};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
const CYAN: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];

pub fn build() -> SceneParts {
    let corners = [
        ([-1.0, -1.0, -1.0], WHITE),
        ([-1.0, 1.0, -1.0], BLACK),
        ([1.0, 1.0, -1.0], RED),
        ([1.0, -1.0, -1.0], GREEN),
        ([-1.0, -1.0, 1.0], BLUE),
        ([-1.0, 1.0, 1.0], YELLOW),
        ([1.0, 1.0, 1.0], CYAN),
        ([1.0, -1.0, 1.0], MAGENTA),
    ];
    let vertices = corners
        .iter()
        .map(|&(position, color)| SceneVertex { position, color })
        .collect();

    let indices = vec![
        // front
        0, 1, 2, 0, 2, 3,
        // back
        4, 6, 5, 4, 7, 6,
        // left
        4, 5, 1, 4, 1, 0,
        // right
        3, 2, 6, 3, 6, 7,
        // top
        1, 5, 6, 1, 6, 2,
        // bottom
        4, 0, 3, 4, 3, 7,
    ];

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
        camera: OrbitCamera::new(OrbitParams::object()),
        clear_color: [0.0, 0.0, 1.0],
    }
}
