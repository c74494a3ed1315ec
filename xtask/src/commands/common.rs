use anyhow::Result;
use xshell::{Shell, cmd};

/// Check formatting without touching files
pub fn run_fmt_check(sh: &Shell) -> Result<()> {
    eprintln!("Checking formatting...");
    cmd!(sh, "cargo fmt --all -- --check").run()?;
    Ok(())
}

/// Format every crate in the workspace
pub fn run_fmt(sh: &Shell) -> Result<()> {
    eprintln!("Formatting workspace...");
    cmd!(sh, "cargo fmt --all").run()?;
    Ok(())
}

/// Lint every target, warnings are errors
pub fn run_clippy(sh: &Shell) -> Result<()> {
    eprintln!("Running cargo clippy...");
    cmd!(sh, "cargo clippy --all-targets --workspace -- -D warnings").run()?;
    Ok(())
}

/// Run the tests of every crate
pub fn run_tests(sh: &Shell, profile: &str, args: &[String]) -> Result<()> {
    eprintln!("Running cargo test ({profile})...");
    cmd!(sh, "cargo test --workspace --profile {profile} {args...}").run()?;
    Ok(())
}
