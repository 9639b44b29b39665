use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use elang::{
    ast::display::TreePrinter,
    config::CompilerConfig,
    driver::{compile, load, Input},
    errors::diagnostics::DEFAULT_ERROR_LIMIT,
    render_error,
    session::Session,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "elang")]
#[command(about = "Parses and type checks E programs", long_about = None)]
struct Cli {
    /// Source file, or `-` (the default) for standard input
    input: Option<PathBuf>,

    /// Stop after this many errors
    #[arg(long, default_value_t = DEFAULT_ERROR_LIMIT)]
    error_limit: usize,

    /// Print the program back as source
    #[arg(long)]
    dump_tree: bool,

    /// Annotate the printed program with types and implicit conversions
    #[arg(long)]
    show_types: bool,

    /// Skip semantic analysis
    #[arg(long)]
    parse_only: bool,
}

fn main() -> ExitCode {
    // RUST_LOG=elang=debug shows what each phase is doing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let start = Instant::now();

    let mut session = Session::new(CompilerConfig::default().with_error_limit(cli.error_limit));
    let input = match &cli.input {
        Some(path) if path != Path::new("-") => Input::File(path),
        _ => Input::Stdin,
    };

    let result = if cli.parse_only {
        load(&mut session, input)
    } else {
        compile(&mut session, input)
    };

    for error in session.diagnostics.errors() {
        eprint!("{}", render_error(error, &session.sources));
    }

    let module = match result {
        Ok(module) => module,
        Err(abort) => {
            eprint!("{}", render_error(&abort, &session.sources));
            return ExitCode::FAILURE;
        }
    };

    if cli.dump_tree || cli.show_types {
        let printer = if cli.show_types {
            TreePrinter::annotated(&session.types)
        } else {
            TreePrinter::new(&session.types)
        };
        print!("{}", printer.print_program(&module));
    }

    tracing::info!(elapsed = ?start.elapsed(), "finished");

    if session.diagnostics.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
