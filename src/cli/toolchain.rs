//! External toolchain invocation.
//!
//! The generated Go file is handed to the `go` tool for execution and native
//! builds, and to `tinygo` for WebAssembly. All three inherit the driver's
//! stdio so the translated program talks to the user directly.

use std::path::Path;
use std::process::{Command, Stdio};

use super::CliError;

/// `go run <gen>` with inherited stdio.
///
/// A failing script already printed its own error; the driver only forwards
/// the exit code.
pub fn run(gen_file: &Path) -> Result<(), CliError> {
    let status = Command::new("go")
        .arg("run")
        .arg(gen_file)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        return Err(CliError::ScriptFailed(status.code().unwrap_or(1)));
    }

    Ok(())
}

/// `go build -o <stem> <gen>`.
pub fn build(gen_file: &Path, stem: &str) -> Result<(), CliError> {
    let status = Command::new("go")
        .args(["build", "-o", stem])
        .arg(gen_file)
        .status()?;

    if !status.success() {
        return Err(CliError::Toolchain {
            tool: "Build",
            status,
        });
    }

    Ok(())
}

/// `tinygo build` targeting wasm: size-optimized, no panic handler, no
/// scheduler, leaking GC.
pub fn wasm(gen_file: &Path, stem: &str) -> Result<(), CliError> {
    let output = format!("{}.wasm", stem);
    let status = Command::new("tinygo")
        .args([
            "build", "-o", &output, "-target", "wasm", "-opt", "z", "-no-debug", "-panic",
            "trap", "-scheduler", "none", "-gc", "leaking",
        ])
        .arg(gen_file)
        .status()?;

    if !status.success() {
        return Err(CliError::Toolchain {
            tool: "TinyGo",
            status,
        });
    }

    Ok(())
}
