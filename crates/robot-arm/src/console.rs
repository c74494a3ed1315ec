//! Line-oriented manual control.
//!
//! Stands in for the menu and mouse buttons of a windowed front end: select
//! a joint, nudge it either way, toggle the view, quit.

use anyhow::Result;
use robot_arm_core::{ArmController, Direction, Joint};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Select(Joint),
    Nudge(Direction),
    ToggleView,
    Show,
    Quit,
}

impl ConsoleCommand {
    /// Parse one input line (case-insensitive, surrounding whitespace ignored)
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if let Some(joint) = Joint::parse(line) {
            return Some(ConsoleCommand::Select(joint));
        }
        match line.to_lowercase().as_str() {
            "+" | "inc" | "left" => Some(ConsoleCommand::Nudge(Direction::Increase)),
            "-" | "dec" | "right" => Some(ConsoleCommand::Nudge(Direction::Decrease)),
            "view" => Some(ConsoleCommand::ToggleView),
            "" | "show" => Some(ConsoleCommand::Show),
            "q" | "quit" | "exit" => Some(ConsoleCommand::Quit),
            _ => None,
        }
    }
}

/// Apply commands from `input` until it ends or `quit` is read.
pub fn run<R: BufRead, W: Write>(
    controller: &mut ArmController,
    input: R,
    mut out: W,
) -> Result<()> {
    writeln!(
        out,
        "joint: {} | {}",
        controller.manual().selected(),
        controller.manual().angles()
    )?;

    for line in input.lines() {
        let line = line?;
        let Some(command) = ConsoleCommand::parse(&line) else {
            tracing::warn!("Unknown command {:?}", line.trim());
            writeln!(out, "commands: base, lower, upper, +, -, view, show, quit")?;
            continue;
        };

        match command {
            ConsoleCommand::Select(joint) => {
                controller.select(joint);
                tracing::debug!("Selected {}", joint);
            }
            ConsoleCommand::Nudge(direction) => {
                if let Err(err) = controller.nudge(direction) {
                    tracing::warn!("{}", err);
                    writeln!(out, "{err}")?;
                    continue;
                }
            }
            ConsoleCommand::ToggleView => {
                let view = controller.toggle_view();
                writeln!(out, "view: {view:?}")?;
            }
            ConsoleCommand::Show => {}
            ConsoleCommand::Quit => break,
        }

        writeln!(
            out,
            "joint: {} | {}",
            controller.manual().selected(),
            controller.manual().angles()
        )?;
    }

    Ok(())
}
