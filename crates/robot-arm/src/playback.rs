//! Frame loop for a pick-and-place run.
//!
//! [`plan`] turns two user points into an [`ArmController`], [`play`] drives
//! it against the wall clock and [`simulate`] samples the same frames without
//! waiting.

use crate::config::Config;
use anyhow::{Context, Result};
use robot_arm_core::{
    AnimationPhase, ArmController, Frame, ManualControl, Point3, ViewMode,
};
use std::{io::Write, time::Duration};
use tokio::time::{Instant, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameFormat {
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Writes frames to an output stream
pub struct FrameWriter<W> {
    out: W,
    format: FrameFormat,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(out: W, format: FrameFormat) -> Self {
        Self { out, format }
    }

    pub fn write(&mut self, frame: &Frame) -> Result<()> {
        match self.format {
            FrameFormat::Json => {
                serde_json::to_writer(&mut self.out, frame).context("failed to encode frame")?;
                writeln!(self.out)?;
            }
            FrameFormat::Text => {
                let phase = frame
                    .phase
                    .map(|p| format!("{p:?}"))
                    .unwrap_or_else(|| "Manual".to_string());
                write!(
                    self.out,
                    "{:>6}ms {:<18} {}",
                    frame.elapsed_millis, phase, frame.angles
                )?;
                if let Some(object) = frame.object {
                    write!(self.out, " object={object}")?;
                }
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Clamp, solve and schedule both targets.
///
/// Nothing is scheduled if either point is out of reach.
pub fn plan(config: &Config, old: Point3, new: Point3, view: ViewMode) -> Result<ArmController> {
    let epsilon = config.animation.x_epsilon;
    let old = old.with_clamped_x(epsilon);
    let new = new.with_clamped_x(epsilon);

    let controller = ArmController::new(config.arm)
        .with_manual_control(ManualControl::new(config.manual.step_degrees))
        .with_view(view)
        .with_pick_and_place(old, new, config.animation.step())
        .with_context(|| format!("cannot move object from {old} to {new}"))?;

    if let Some(timeline) = controller.timeline() {
        tracing::debug!("Old pose: {}", timeline.old_angles());
        tracing::debug!("New pose: {}", timeline.new_angles());
    }

    Ok(controller)
}

fn log_transition(last: &mut Option<AnimationPhase>, frame: &Frame) {
    if frame.phase != *last {
        if let Some(phase) = frame.phase {
            tracing::debug!(elapsed_ms = frame.elapsed_millis, "Entering {:?}", phase);
        }
        *last = frame.phase;
    }
}

fn is_done(frame: &Frame) -> bool {
    frame.phase.is_none_or(|p| p.is_finished())
}

/// Emit frames `tick` apart until the run is finished, without sleeping.
///
/// Returns the number of frames written.
pub fn simulate<W: Write>(
    controller: &mut ArmController,
    tick: Duration,
    out: &mut FrameWriter<W>,
) -> Result<usize> {
    let tick_millis = (tick.as_millis() as u64).max(1);
    let mut last = None;
    let mut frames = 0;
    let mut elapsed = 0u64;

    loop {
        let frame = controller.tick(elapsed);
        log_transition(&mut last, &frame);
        out.write(&frame)?;
        frames += 1;
        if is_done(&frame) {
            break;
        }
        elapsed += tick_millis;
    }

    Ok(frames)
}

/// Emit a frame on every `tick` of the wall clock until the run is
/// finished or the process is interrupted.
///
/// Returns the number of frames written.
pub async fn play<W: Write>(
    controller: &mut ArmController,
    tick: Duration,
    out: &mut FrameWriter<W>,
) -> Result<usize> {
    let mut interval = tokio::time::interval(tick.max(Duration::from_millis(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let start = Instant::now();
    let mut last = None;
    let mut frames = 0;

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted after {} frames", frames);
                break;
            }
        }

        let elapsed = start.elapsed().as_millis() as u64;
        let frame = controller.tick(elapsed);
        log_transition(&mut last, &frame);
        out.write(&frame)?;
        frames += 1;
        if is_done(&frame) {
            break;
        }
    }

    Ok(frames)
}
