//! Water surface simulation: an explicit finite-difference wave solver
//! over a regular 2D height grid.
//!
//! Heights live in three same-shaped buffers whose previous/current/next
//! roles rotate each tick (a triple-buffer ring), so no buffer is ever
//! reallocated after construction.

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::params::{RippleConfig, WaveConfig};

/// Discrete wave-equation solver over a rows x columns height grid.
///
/// Only interior cells are ever written by the integration stencil; the
/// boundary ring keeps whatever value it was initialized with (zero).
pub struct WaveField {
    rows: usize,
    columns: usize,
    time_step: f32,

    // Stencil coefficients precomputed from dt, dx, damping and wave speed.
    k1: f32,
    k2: f32,
    k3: f32,

    /// Height buffers. Roles are assigned by `base`: previous = base,
    /// current = base + 1, next = base + 2 (mod 3).
    buffers: [Vec<f32>; 3],
    base: usize,

    /// Cached (x, z) for every cell; y is read from the live heights.
    positions: Vec<Vec2>,

    /// Simulation time not yet consumed by full ticks.
    accumulated: f32,
}

impl WaveField {
    /// Build a wave field from validated grid parameters.
    pub fn new(config: &WaveConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let WaveConfig {
            rows,
            columns,
            spatial_step,
            time_step,
            wave_speed,
            damping,
        } = config.clone();

        let d = damping * time_step + 2.0;
        let e = (wave_speed * wave_speed) * (time_step * time_step)
            / (spatial_step * spatial_step);
        let k1 = (damping * time_step - 2.0) / d;
        let k2 = (4.0 - 8.0 * e) / d;
        let k3 = (2.0 * e) / d;

        let cell_count = rows * columns;

        let width = (columns - 1) as f32 * spatial_step;
        let depth = (rows - 1) as f32 * spatial_step;
        let mut positions = Vec::with_capacity(cell_count);
        for i in 0..rows {
            for j in 0..columns {
                let x = j as f32 * spatial_step - 0.5 * width;
                let z = i as f32 * spatial_step - 0.5 * depth;
                positions.push(Vec2::new(x, z));
            }
        }

        Ok(Self {
            rows,
            columns,
            time_step,
            k1,
            k2,
            k3,
            buffers: [
                vec![0.0; cell_count],
                vec![0.0; cell_count],
                vec![0.0; cell_count],
            ],
            base: 0,
            positions,
            accumulated: 0.0,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn vertex_count(&self) -> usize {
        self.rows * self.columns
    }

    pub fn triangle_count(&self) -> usize {
        (self.rows - 1) * (self.columns - 1) * 2
    }

    /// Position of grid cell `index` (row-major `i * columns + j`), with the
    /// current simulated height as y.
    pub fn position(&self, index: usize) -> Vec3 {
        let p = self.positions[index];
        Vec3::new(p.x, self.current()[index], p.y)
    }

    /// Advance the simulation by `delta_time` seconds.
    ///
    /// Accumulates elapsed time and runs one stencil step per full
    /// `time_step`, so numerical stability is independent of frame rate.
    pub fn update(&mut self, delta_time: f32) {
        self.accumulated += delta_time;
        while self.accumulated >= self.time_step {
            self.accumulated -= self.time_step;
            self.step();
        }
    }

    /// Add a localized impulse at cell (i, j), spreading half the magnitude
    /// to the four axis neighbors.
    ///
    /// The target is clamped into the interior margin `[2, rows - 3] x
    /// [2, columns - 3]` so the neighbor spread can never write out of
    /// bounds. Grids smaller than 5x5 have no such interior and the call is
    /// ignored.
    pub fn disturb(&mut self, i: usize, j: usize, magnitude: f32) {
        if self.rows < 5 || self.columns < 5 {
            log::warn!(
                "grid {}x{} too small to disturb, ignoring",
                self.rows,
                self.columns
            );
            return;
        }

        let i = i.clamp(2, self.rows - 3);
        let j = j.clamp(2, self.columns - 3);
        let k = i * self.columns + j;
        let half = 0.5 * magnitude;

        let columns = self.columns;
        let current = self.current_mut();
        current[k] += magnitude;
        current[k - 1] += half;
        current[k + 1] += half;
        current[k - columns] += half;
        current[k + columns] += half;
    }

    /// One discrete integration tick: stencil over every interior cell, then
    /// rotate buffer roles (previous <- current, current <- next).
    fn step(&mut self) {
        let (k1, k2, k3) = (self.k1, self.k2, self.k3);
        let columns = self.columns;

        let [b0, b1, b2] = &mut self.buffers;
        let (previous, current, next) = match self.base {
            0 => (b0.as_slice(), b1.as_slice(), b2.as_mut_slice()),
            1 => (b1.as_slice(), b2.as_slice(), b0.as_mut_slice()),
            _ => (b2.as_slice(), b0.as_slice(), b1.as_mut_slice()),
        };

        for i in 1..self.rows - 1 {
            for j in 1..columns - 1 {
                let k = i * columns + j;
                next[k] = k1 * previous[k]
                    + k2 * current[k]
                    + k3 * (current[k + columns]
                        + current[k - columns]
                        + current[k + 1]
                        + current[k - 1]);
            }
        }

        // The old previous buffer becomes the scratch next for the
        // following tick.
        self.base = (self.base + 1) % 3;
    }

    fn current(&self) -> &[f32] {
        &self.buffers[(self.base + 1) % 3]
    }

    fn current_mut(&mut self) -> &mut [f32] {
        &mut self.buffers[(self.base + 1) % 3]
    }
}

/// Drives random raindrop disturbances at a fixed simulated-time interval.
///
/// Owns its RNG, seeded explicitly by the caller so a given seed always
/// produces the same rain.
pub struct Ripples {
    config: RippleConfig,
    rng: StdRng,
    since_last: f32,
}

impl Ripples {
    pub fn new(config: RippleConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            since_last: 0.0,
        }
    }

    /// Accumulate `delta_time` and fire one disturbance per elapsed
    /// interval, at a uniformly random interior cell with a uniformly
    /// random magnitude.
    pub fn tick(&mut self, delta_time: f32, field: &mut WaveField) {
        let margin = self.config.margin;
        if field.row_count() <= 2 * margin || field.column_count() <= 2 * margin {
            log::warn!(
                "grid {}x{} leaves no interior for margin {}, skipping disturbances",
                field.row_count(),
                field.column_count(),
                margin
            );
            return;
        }

        self.since_last += delta_time;
        while self.since_last >= self.config.interval_s {
            self.since_last -= self.config.interval_s;

            let i = self.rng.gen_range(margin..field.row_count() - margin);
            let j = self.rng.gen_range(margin..field.column_count() - margin);
            let magnitude = self
                .rng
                .gen_range(self.config.min_magnitude..self.config.max_magnitude);

            field.disturb(i, j, magnitude);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: usize, columns: usize) -> WaveConfig {
        WaveConfig {
            rows,
            columns,
            spatial_step: 0.8,
            time_step: 0.03,
            wave_speed: 3.25,
            damping: 0.4,
        }
    }

    fn heights(field: &WaveField) -> Vec<f32> {
        (0..field.vertex_count())
            .map(|k| field.position(k).y)
            .collect()
    }

    fn max_abs_height(field: &WaveField) -> f32 {
        heights(field).iter().fold(0.0f32, |m, h| m.max(h.abs()))
    }

    #[test]
    fn test_counts_match_grid_size() {
        let field = WaveField::new(&config(200, 200)).unwrap();
        assert_eq!(field.vertex_count(), 40_000);
        assert_eq!(field.triangle_count(), 79_202);
        assert_eq!(field.row_count(), 200);
        assert_eq!(field.column_count(), 200);

        let field = WaveField::new(&config(3, 7)).unwrap();
        assert_eq!(field.vertex_count(), 21);
        assert_eq!(field.triangle_count(), 24);
    }

    #[test]
    fn test_rejects_degenerate_parameters() {
        assert!(WaveField::new(&config(2, 200)).is_err());
        assert!(WaveField::new(&config(200, 2)).is_err());

        let mut bad = config(10, 10);
        bad.spatial_step = 0.0;
        assert!(WaveField::new(&bad).is_err());

        let mut bad = config(10, 10);
        bad.time_step = -0.01;
        assert!(WaveField::new(&bad).is_err());

        let mut bad = config(10, 10);
        bad.damping = 1.0;
        assert!(WaveField::new(&bad).is_err());
    }

    #[test]
    fn test_positions_are_centered() {
        let field = WaveField::new(&config(5, 9)).unwrap();

        let first = field.position(0);
        let last = field.position(field.vertex_count() - 1);
        assert_eq!(first.x, -last.x);
        assert_eq!(first.z, -last.z);
        assert_eq!(last.x, 0.5 * 8.0 * 0.8);
        assert_eq!(last.z, 0.5 * 4.0 * 0.8);

        // Flat at rest.
        assert!(heights(&field).iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_disturb_is_local() {
        let mut field = WaveField::new(&config(20, 20)).unwrap();
        field.disturb(10, 10, 2.0);

        let h = heights(&field);
        for i in 0..20 {
            for j in 0..20 {
                let expected = match (i, j) {
                    (10, 10) => 2.0,
                    (9, 10) | (11, 10) | (10, 9) | (10, 11) => 1.0,
                    _ => 0.0,
                };
                assert_eq!(h[i * 20 + j], expected, "cell ({}, {})", i, j);
            }
        }
    }

    #[test]
    fn test_disturb_clamps_to_interior() {
        let mut field = WaveField::new(&config(20, 20)).unwrap();
        field.disturb(0, 0, 2.0);

        // Impulse lands at the nearest safe interior cell (2, 2); the
        // boundary ring stays untouched.
        let h = heights(&field);
        assert_eq!(h[2 * 20 + 2], 2.0);
        assert_eq!(h[1 * 20 + 2], 1.0);
        assert_eq!(h[0], 0.0);

        let mut field = WaveField::new(&config(20, 20)).unwrap();
        field.disturb(500, 500, 2.0);
        let h = heights(&field);
        assert_eq!(h[17 * 20 + 17], 2.0);
    }

    #[test]
    fn test_disturb_ignored_on_tiny_grid() {
        let mut field = WaveField::new(&config(3, 3)).unwrap();
        field.disturb(1, 1, 2.0);
        assert!(heights(&field).iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_boundary_never_changes() {
        let mut field = WaveField::new(&config(30, 30)).unwrap();
        field.disturb(15, 15, 2.0);
        for _ in 0..500 {
            field.update(0.03);
        }

        let h = heights(&field);
        for i in 0..30 {
            for j in 0..30 {
                if i == 0 || i == 29 || j == 0 || j == 29 {
                    assert_eq!(h[i * 30 + j], 0.0, "boundary cell ({}, {})", i, j);
                }
            }
        }
    }

    #[test]
    fn test_single_step_matches_stencil() {
        let cfg = config(10, 10);
        let mut field = WaveField::new(&cfg).unwrap();
        field.disturb(5, 5, 2.0);
        let before = heights(&field);
        field.update(cfg.time_step);
        let after = heights(&field);

        let d = cfg.damping * cfg.time_step + 2.0;
        let e = cfg.wave_speed * cfg.wave_speed * cfg.time_step * cfg.time_step
            / (cfg.spatial_step * cfg.spatial_step);
        let k1 = (cfg.damping * cfg.time_step - 2.0) / d;
        let k2 = (4.0 - 8.0 * e) / d;
        let k3 = 2.0 * e / d;

        for i in 1..9 {
            for j in 1..9 {
                let k = i * 10 + j;
                // previous was all zero, so the k1 term drops out.
                let expected = k1 * 0.0
                    + k2 * before[k]
                    + k3 * (before[k + 10] + before[k - 10] + before[k + 1] + before[k - 1]);
                assert_eq!(after[k], expected, "cell ({}, {})", i, j);
            }
        }
    }

    #[test]
    fn test_two_steps_match_reference_convolution() {
        // Independent two-step reference with damping = 0, computed with
        // plain swap-free arrays rather than the ring.
        let cfg = WaveConfig {
            rows: 12,
            columns: 12,
            spatial_step: 1.0,
            time_step: 0.05,
            wave_speed: 2.0,
            damping: 0.0,
        };
        let mut field = WaveField::new(&cfg).unwrap();
        field.disturb(6, 6, 1.5);

        let e = cfg.wave_speed * cfg.wave_speed * cfg.time_step * cfg.time_step
            / (cfg.spatial_step * cfg.spatial_step);
        let k1 = -1.0f32;
        let k2 = (4.0 - 8.0 * e) / 2.0;
        let k3 = e;

        let n = 12usize;
        let mut prev = vec![0.0f32; n * n];
        let mut curr = heights(&field);
        for _ in 0..2 {
            let mut next = vec![0.0f32; n * n];
            for i in 1..n - 1 {
                for j in 1..n - 1 {
                    let k = i * n + j;
                    next[k] = k1 * prev[k]
                        + k2 * curr[k]
                        + k3 * (curr[k + n] + curr[k - n] + curr[k + 1] + curr[k - 1]);
                }
            }
            prev = curr;
            curr = next;
        }

        field.update(cfg.time_step);
        field.update(cfg.time_step);
        assert_eq!(heights(&field), curr);
    }

    #[test]
    fn test_heights_stay_bounded_in_stable_regime() {
        let mut field = WaveField::new(&config(50, 50)).unwrap();
        field.disturb(25, 25, 2.0);
        for _ in 0..1000 {
            field.update(0.03);
            assert!(max_abs_height(&field) < 10.0);
        }
    }

    #[test]
    fn test_diverges_outside_stable_regime() {
        // c * dt / dx far beyond the CFL limit.
        let cfg = WaveConfig {
            rows: 30,
            columns: 30,
            spatial_step: 1.0,
            time_step: 0.5,
            wave_speed: 4.0,
            damping: 0.0,
        };
        let mut field = WaveField::new(&cfg).unwrap();
        field.disturb(15, 15, 1.0);
        for _ in 0..100 {
            field.update(cfg.time_step);
        }

        let diverged = heights(&field)
            .iter()
            .any(|h| !h.is_finite() || h.abs() > 1e6);
        assert!(diverged, "heights unexpectedly stayed bounded");
    }

    #[test]
    fn test_energy_decays_with_damping() {
        let mut field = WaveField::new(&config(50, 50)).unwrap();
        field.disturb(25, 25, 2.0);
        let initial: f32 = heights(&field).iter().map(|h| h.abs()).sum();

        for _ in 0..2000 {
            field.update(0.03);
        }
        let residual: f32 = heights(&field).iter().map(|h| h.abs()).sum();

        assert!(residual < initial);
        assert!(
            residual < 0.05 * initial,
            "energy barely decayed: {} -> {}",
            initial,
            residual
        );
    }

    #[test]
    fn test_update_accumulates_fixed_steps() {
        let cfg = config(20, 20);
        let mut stepped = WaveField::new(&cfg).unwrap();
        let mut accumulated = WaveField::new(&cfg).unwrap();
        stepped.disturb(10, 10, 2.0);
        accumulated.disturb(10, 10, 2.0);

        // Two half-ticks add up to exactly one stencil step.
        stepped.update(cfg.time_step);
        accumulated.update(cfg.time_step * 0.5);
        accumulated.update(cfg.time_step * 0.5);
        assert_eq!(heights(&stepped), heights(&accumulated));

        // A sub-tick delta alone performs no step.
        let before = heights(&accumulated);
        accumulated.update(cfg.time_step * 0.25);
        assert_eq!(heights(&accumulated), before);
    }

    #[test]
    fn test_ripples_are_reproducible() {
        let cfg = config(60, 60);
        let mut a = WaveField::new(&cfg).unwrap();
        let mut b = WaveField::new(&cfg).unwrap();
        let mut rain_a = Ripples::new(RippleConfig::default(), 7);
        let mut rain_b = Ripples::new(RippleConfig::default(), 7);

        for _ in 0..120 {
            rain_a.tick(0.03, &mut a);
            rain_b.tick(0.03, &mut b);
            a.update(0.03);
            b.update(0.03);
        }

        assert_ne!(max_abs_height(&a), 0.0);
        assert_eq!(heights(&a), heights(&b));
    }
}
