use anyhow::Result;
use clap::{Args, Subcommand};
use xshell::Shell;

use super::common;

#[derive(Args)]
pub struct Ci {
    #[command(subcommand)]
    command: Option<CiCommand>,
}

#[derive(Subcommand)]
pub enum CiCommand {
    /// Run cargo fmt check
    Fmt,
    /// Run cargo clippy
    Clippy,
    /// Run cargo test
    Test,
}

impl Ci {
    pub fn run(&self, sh: &Shell) -> Result<()> {
        match &self.command {
            Some(cmd) => cmd.run(sh),
            None => {
                for cmd in [CiCommand::Fmt, CiCommand::Clippy, CiCommand::Test] {
                    cmd.run(sh)?;
                }
                Ok(())
            }
        }
    }
}

impl CiCommand {
    pub fn run(&self, sh: &Shell) -> Result<()> {
        match self {
            CiCommand::Fmt => common::run_fmt_check(sh),
            CiCommand::Clippy => common::run_clippy(sh),
            CiCommand::Test => common::run_tests(sh, "dev", &[]),
        }
    }
}
