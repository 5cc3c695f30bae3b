use clap::{CommandFactory, Parser as ClapParser, Subcommand};
use simplescript::cli::{self, CliError, Command};

#[derive(ClapParser)]
#[command(name = "simplescript")]
#[command(about = "SimpleScript - a modern transpiler for the web")]
#[command(
    long_about = "A fast and easy-to-use language that transpiles to Go and WebAssembly. Built with love for the modern web."
)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version")]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transpile and execute immediately
    Run {
        /// The SimpleScript source file
        file: String,
    },

    /// Compile to a native executable (via Go)
    Build {
        /// The SimpleScript source file
        file: String,
    },

    /// Compile to WebAssembly (via TinyGo)
    Wasm {
        /// The SimpleScript source file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return;
    };

    let result = match command {
        Commands::Run { file } => cli::execute(Command::Run, &file),
        Commands::Build { file } => cli::execute(Command::Build, &file),
        Commands::Wasm { file } => cli::execute(Command::Wasm, &file),
    };

    if let Err(e) = result {
        match e {
            CliError::Compile(diagnostics) => {
                let color = atty::is(atty::Stream::Stderr);
                for diagnostic in &diagnostics {
                    eprintln!("{}", diagnostic.render(color));
                }
            }
            CliError::ScriptFailed(code) => std::process::exit(code),
            other => eprintln!("{}", other),
        }
        std::process::exit(1);
    }
}
