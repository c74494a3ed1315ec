use anyhow::{Context, Result};
use clap::Args;
use robot_arm::config::Config;
use robot_arm_core::Point3;
use std::path::PathBuf;

#[derive(Args)]
pub struct SolveArgs {
    #[arg(allow_negative_numbers = true)]
    pub x: f64,
    #[arg(allow_negative_numbers = true)]
    pub y: f64,
    #[arg(allow_negative_numbers = true)]
    pub z: f64,

    /// Path to the configuration file (TOML or JSON).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the angles as JSON.
    #[arg(long)]
    pub json: bool,
}

impl SolveArgs {
    pub fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let target =
            Point3::new(self.x, self.y, self.z).with_clamped_x(config.animation.x_epsilon);

        let angles = config
            .arm
            .solve(target)
            .with_context(|| format!("cannot reach {target}"))?;
        tracing::debug!("Solved {} -> {}", target, angles);

        if self.json {
            println!("{}", serde_json::to_string(&angles)?);
        } else {
            println!("{angles}");
        }

        Ok(())
    }
}
