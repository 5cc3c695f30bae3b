//! CLI support for simplescript
//!
//! Provides the driver behind the `run`, `build`, and `wasm` subcommands:
//! source file in, generated Go artifact out, external toolchain invoked on
//! the result. The language pipeline itself lives in [`compile`]; everything
//! here is file plumbing and sub-process orchestration.

mod compile;
mod toolchain;

pub use compile::compile_source;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use crate::diagnostics::Diagnostic;

/// What to do with the generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Transpile and execute immediately
    Run,
    /// Compile to a native executable
    Build,
    /// Compile to WebAssembly
    Wasm,
}

/// Errors that can occur while driving the pipeline
#[derive(Debug)]
pub enum CliError {
    /// Input file does not end in `.ss`
    InvalidExtension(String),
    /// Source file could not be read
    Read { path: String, source: io::Error },
    /// IO error (writing the artifact, spawning a tool)
    Io(io::Error),
    /// The pipeline rejected the program
    Compile(Vec<Diagnostic>),
    /// An external tool exited unsuccessfully
    Toolchain {
        tool: &'static str,
        status: ExitStatus,
    },
    /// The translated program itself failed under `run`; the child already
    /// reported, the driver only forwards the exit code
    ScriptFailed(i32),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::InvalidExtension(path) => {
                write!(f, "Error: File '{}' must have .ss extension", path)
            }
            CliError::Read { path, source } => {
                write!(f, "Error: Cannot read file '{}': {}", path, source)
            }
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Compile(diagnostics) => {
                write!(f, "compilation failed with {} error(s)", diagnostics.len())
            }
            CliError::Toolchain { tool, status } => write!(f, "{} error: {}", tool, status),
            CliError::ScriptFailed(code) => write!(f, "script exited with status {}", code),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Read { source, .. } => Some(source),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

/// Deletes the generated `.gen.go` file when the driver finishes, however
/// it finishes.
struct TempArtifact(PathBuf);

impl Drop for TempArtifact {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

/// Runs the full driver for one subcommand: read, compile, write the
/// artifact, hand it to the external toolchain.
pub fn execute(command: Command, filename: &str) -> Result<(), CliError> {
    if !filename.ends_with(".ss") {
        return Err(CliError::InvalidExtension(filename.to_string()));
    }

    let source = fs::read_to_string(filename).map_err(|e| CliError::Read {
        path: filename.to_string(),
        source: e,
    })?;

    let base = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);
    let stem = base.strip_suffix(".ss").unwrap_or(base);

    let generated = compile_source(&source).map_err(CliError::Compile)?;

    let gen_path = PathBuf::from(format!("{}.gen.go", stem));
    fs::write(&gen_path, generated)?;
    let _artifact = TempArtifact(gen_path.clone());

    match command {
        Command::Run => toolchain::run(&gen_path),
        Command::Build => {
            toolchain::build(&gen_path, stem)?;
            println!("✓ Build successful: ./{}", stem);
            Ok(())
        }
        Command::Wasm => {
            toolchain::wasm(&gen_path, stem)?;
            println!("✓ Wasm successful: ./{}.wasm", stem);
            Ok(())
        }
    }
}
