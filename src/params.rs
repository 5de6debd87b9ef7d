//! Parameter definitions with physical units and documented semantics.
//!
//! Every tunable the demos use lives here with its unit and the default
//! value the classic demos shipped with.

mod camera;
mod render;
mod waves;

// Re-export all types
pub use camera::OrbitParams;
pub use render::RenderConfig;
pub use waves::{RippleConfig, WaveConfig};
