use anyhow::Result;
use clap::Args;
use robot_arm::{
    config::Config,
    playback::{self, FrameFormat, FrameWriter},
};
use robot_arm_core::{ArmController, Point3, ViewMode};
use std::{io, path::PathBuf, time::Duration};

#[derive(Args)]
pub struct AnimateArgs {
    #[arg(allow_negative_numbers = true)]
    pub old_x: f64,
    #[arg(allow_negative_numbers = true)]
    pub old_y: f64,
    #[arg(allow_negative_numbers = true)]
    pub old_z: f64,
    #[arg(allow_negative_numbers = true)]
    pub new_x: f64,
    #[arg(allow_negative_numbers = true)]
    pub new_y: f64,
    #[arg(allow_negative_numbers = true)]
    pub new_z: f64,

    /// `-tv` for the top view, `-sv` for the side view.
    #[arg(allow_hyphen_values = true)]
    pub view: Option<String>,

    /// Path to the configuration file (TOML or JSON).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print frames as JSON lines.
    #[arg(long)]
    pub json: bool,

    /// Sample frames at tick spacing without waiting on the clock.
    #[arg(long)]
    pub simulate: bool,
}

impl AnimateArgs {
    pub fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;

        let view = match self.view.as_deref() {
            None => ViewMode::default(),
            Some(flag) => ViewMode::from_flag(flag).unwrap_or_else(|| {
                tracing::warn!("Ignoring unknown view flag {:?}", flag);
                ViewMode::default()
            }),
        };

        let old = Point3::new(self.old_x, self.old_y, self.old_z);
        let new = Point3::new(self.new_x, self.new_y, self.new_z);
        let mut controller = playback::plan(&config, old, new, view)?;

        tracing::info!("Moving object from {} to {} ({:?} view)", old, new, view);

        let format = if self.json {
            FrameFormat::Json
        } else {
            FrameFormat::Text
        };
        let mut out = FrameWriter::new(io::stdout().lock(), format);

        let frames = if self.simulate {
            playback::simulate(&mut controller, config.animation.tick(), &mut out)?
        } else {
            play(&mut controller, config.animation.tick(), &mut out)?
        };

        tracing::info!("Animation finished after {} frames", frames);
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn play(
    controller: &mut ArmController,
    tick: Duration,
    out: &mut FrameWriter<io::StdoutLock<'static>>,
) -> Result<usize> {
    playback::play(controller, tick, out).await
}
