//! Wave simulation and disturbance parameters.

use anyhow::{bail, Result};

/// Wave height-field grid and integration parameters
#[derive(Debug, Clone)]
pub struct WaveConfig {
    /// Grid rows (>= 3)
    pub rows: usize,

    /// Grid columns (>= 3)
    pub columns: usize,

    /// Distance between adjacent grid points (world units)
    pub spatial_step: f32,

    /// Fixed simulation tick (seconds)
    pub time_step: f32,

    /// Wave propagation speed (world units per second)
    pub wave_speed: f32,

    /// Energy loss per tick, in [0, 1)
    pub damping: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            rows: 200,
            columns: 200,
            spatial_step: 0.8,
            time_step: 0.03,
            wave_speed: 3.25,
            damping: 0.4,
        }
    }
}

impl WaveConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rows < 3 || self.columns < 3 {
            bail!(
                "wave grid must be at least 3x3 (got {}x{})",
                self.rows,
                self.columns
            );
        }
        if self.spatial_step <= 0.0 || self.time_step <= 0.0 {
            bail!(
                "wave steps must be positive (dx = {}, dt = {})",
                self.spatial_step,
                self.time_step
            );
        }
        if !(0.0..1.0).contains(&self.damping) {
            bail!("damping must be in [0, 1) (got {})", self.damping);
        }
        Ok(())
    }
}

/// Random raindrop disturbance parameters
#[derive(Debug, Clone)]
pub struct RippleConfig {
    /// Simulated seconds between disturbances
    pub interval_s: f32,

    /// Cells kept clear of every grid edge when picking a target
    pub margin: usize,

    /// Impulse magnitude range (world units), uniform
    pub min_magnitude: f32,
    pub max_magnitude: f32,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            interval_s: 0.25,
            margin: 5,
            min_magnitude: 1.0,
            max_magnitude: 2.0,
        }
    }
}
