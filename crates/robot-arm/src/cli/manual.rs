use anyhow::Result;
use clap::Args;
use robot_arm::{config::Config, console};
use robot_arm_core::{ArmController, ManualControl};
use std::{io, path::PathBuf};

#[derive(Args)]
pub struct ManualArgs {
    /// Path to the configuration file (TOML or JSON).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ManualArgs {
    pub fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let mut controller = ArmController::new(config.arm)
            .with_manual_control(ManualControl::new(config.manual.step_degrees));

        tracing::info!("Manual control, {}° per nudge", config.manual.step_degrees);
        console::run(&mut controller, io::stdin().lock(), io::stdout().lock())
    }
}
