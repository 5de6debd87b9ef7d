//! Demo scenes.
//!
//! The demos form a small closed set, so they are modeled as tagged
//! variants sharing one capability surface: build geometry up front, update
//! per frame, expose a draw list and an orbit camera.

mod box_demo;
mod hills;
mod shapes;
mod skull;
mod waves;

use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::camera::OrbitCamera;
use crate::cli::Args;

pub use waves::WavesScene;

/// Which demo to run, selected on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SceneKind {
    Box,
    Hills,
    Shapes,
    Skull,
    Waves,
}

/// Vertex format shared by every demo (position + color)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// One indexed draw with its own world transform
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub index_offset: u32,
    pub index_count: u32,
    pub base_vertex: i32,
    pub world: Mat4,
    pub wireframe: bool,
}

/// Geometry and view state every scene carries
#[derive(Debug)]
pub struct SceneParts {
    pub vertices: Vec<SceneVertex>,
    pub indices: Vec<u32>,
    pub draws: Vec<DrawCall>,
    pub camera: OrbitCamera,
    /// Background clear color (linear RGB)
    pub clear_color: [f64; 3],
}

/// A demo scene ready to render.
pub enum Scene {
    Box(SceneParts),
    Hills(SceneParts),
    Shapes(SceneParts),
    Skull(SceneParts),
    Waves(WavesScene),
}

impl Scene {
    /// Build the selected demo's geometry and camera.
    pub fn build(kind: SceneKind, args: &Args) -> Result<Scene> {
        Ok(match kind {
            SceneKind::Box => Scene::Box(box_demo::build()),
            SceneKind::Hills => Scene::Hills(hills::build()),
            SceneKind::Shapes => Scene::Shapes(shapes::build()),
            SceneKind::Skull => Scene::Skull(skull::build(&args.model)?),
            SceneKind::Waves => Scene::Waves(WavesScene::new(args.seed)?),
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Scene::Box(_) => "Box Demo",
            Scene::Hills(_) => "Hills Demo",
            Scene::Shapes(_) => "Shapes Demo",
            Scene::Skull(_) => "Skull Demo",
            Scene::Waves(_) => "Waves Demo",
        }
    }

    fn parts(&self) -> &SceneParts {
        match self {
            Scene::Box(parts)
            | Scene::Hills(parts)
            | Scene::Shapes(parts)
            | Scene::Skull(parts) => parts,
            Scene::Waves(waves) => &waves.parts,
        }
    }

    fn parts_mut(&mut self) -> &mut SceneParts {
        match self {
            Scene::Box(parts)
            | Scene::Hills(parts)
            | Scene::Shapes(parts)
            | Scene::Skull(parts) => parts,
            Scene::Waves(waves) => &mut waves.parts,
        }
    }

    /// Advance per-frame state. Only the waves demo animates.
    pub fn update(&mut self, delta_time: f32) {
        if let Scene::Waves(waves) = self {
            waves.update(delta_time);
        }
    }

    pub fn vertices(&self) -> &[SceneVertex] {
        &self.parts().vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.parts().indices
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.parts().draws
    }

    pub fn clear_color(&self) -> [f64; 3] {
        self.parts().clear_color
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.parts().camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.parts_mut().camera
    }

    /// Vertex span rewritten by `update` this frame, as (first vertex
    /// index, vertices), if the scene has one.
    pub fn dynamic_vertices(&self) -> Option<(usize, &[SceneVertex])> {
        match self {
            Scene::Waves(waves) => Some(waves.dynamic_vertices()),
            _ => None,
        }
    }
}

/// LightSteelBlue backdrop shared by most of the demos.
pub(crate) const CLEAR_STEEL_BLUE: [f64; 3] = [0.69, 0.77, 0.87];
