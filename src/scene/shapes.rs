//! The shapes demo: primitive meshes packed into one vertex/index buffer
//! pair, drawn wireframe with per-object world transforms.

use glam::{Mat4, Vec3};

use crate::camera::OrbitCamera;
use crate::geometry::{self, MeshData};
use crate::params::OrbitParams;
use crate::scene::{DrawCall, SceneParts, SceneVertex, CLEAR_STEEL_BLUE};

const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

pub fn build() -> SceneParts {
    let box_mesh = geometry::box_mesh(1.0, 1.0, 1.0);
    let grid = geometry::grid(20.0, 30.0, 60, 40);
    let sphere = geometry::sphere(0.5, 20, 20);
    let cylinder = geometry::cylinder(0.5, 0.3, 3.0, 20, 20);

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut draws = Vec::new();

    // Concatenate the meshes, remembering where each one starts.
    let mut append = |mesh: &MeshData| -> (i32, u32, u32) {
        let base_vertex = vertices.len() as i32;
        let index_offset = indices.len() as u32;
        vertices.extend(mesh.vertices.iter().map(|v| SceneVertex {
            position: v.position.to_array(),
            color: BLACK,
        }));
        indices.extend_from_slice(&mesh.indices);
        (base_vertex, index_offset, mesh.indices.len() as u32)
    };

    let box_span = append(&box_mesh);
    let grid_span = append(&grid);
    let sphere_span = append(&sphere);
    let cylinder_span = append(&cylinder);

    let mut draw = |span: (i32, u32, u32), world: Mat4| {
        draws.push(DrawCall {
            index_offset: span.1,
            index_count: span.2,
            base_vertex: span.0,
            world,
            wireframe: true,
        });
    };

    draw(grid_span, Mat4::IDENTITY);
    draw(
        box_span,
        Mat4::from_translation(Vec3::new(0.0, 0.5, 0.0)) * Mat4::from_scale(Vec3::new(2.0, 1.0, 2.0)),
    );
    draw(
        sphere_span,
        Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)) * Mat4::from_scale(Vec3::splat(2.0)),
    );

    // Two columns of cylinders with spheres perched on top.
    for i in 0..5 {
        let z = -10.0 + i as f32 * 5.0;
        for x in [-5.0, 5.0] {
            draw(cylinder_span, Mat4::from_translation(Vec3::new(x, 1.5, z)));
            draw(sphere_span, Mat4::from_translation(Vec3::new(x, 3.5, z)));
        }
    }

    SceneParts {
        vertices,
        indices,
        draws,
        camera: OrbitCamera::new(OrbitParams::shapes()),
        clear_color: CLEAR_STEEL_BLUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_scene_shape() {
        let parts = build();

        // Grid, box, center sphere, 10 cylinders, 10 spheres.
        assert_eq!(parts.draws.len(), 23);

        for draw in &parts.draws {
            assert!(draw.wireframe);
            let end = draw.index_offset + draw.index_count;
            assert!(end as usize <= parts.indices.len());

            // Every index resolves inside the shared vertex buffer.
            for &index in
                &parts.indices[draw.index_offset as usize..end as usize]
            {
                let resolved = draw.base_vertex as i64 + index as i64;
                assert!(resolved >= 0 && (resolved as usize) < parts.vertices.len());
            }
        }
    }
}
