//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::scene::SceneKind;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "wavetank")]
#[command(about = "Classic rendering demos around a wave height-field simulator", long_about = None)]
pub struct Args {
    /// Demo scene to run
    #[arg(value_enum, default_value = "waves")]
    pub demo: SceneKind,

    /// Seed for the raindrop disturbance generator
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Model file for the skull demo
    #[arg(long, value_name = "PATH", default_value = "demos/skull.txt")]
    pub model: PathBuf,

    /// Window width (pixels)
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, default_value_t = 720)]
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_select_waves() {
        let args = Args::parse_from(["wavetank"]);
        assert_eq!(args.demo, SceneKind::Waves);
        assert_eq!(args.seed, 1);
    }

    #[test]
    fn test_selects_demo_and_seed() {
        let args = Args::parse_from(["wavetank", "skull", "--seed", "9", "--model", "m.txt"]);
        assert_eq!(args.demo, SceneKind::Skull);
        assert_eq!(args.seed, 9);
        assert_eq!(args.model, PathBuf::from("m.txt"));
    }
}
