/**
 * Block Compiler CLI - blockc
 *
 * Compiles saved block workspaces into Rust source files
 */
use anyhow::Context;
use block_compiler_cli::logging::{init_logging, LogLevel};
use block_compiler_cli::perform_compile::perform_project_compilation;
use clap::{Arg, ArgAction, Command};
use std::path::{Path, PathBuf};
use std::process;

fn cli() -> Command {
    Command::new("blockc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Block workspace to Rust compiler")
        .arg(
            Arg::new("project")
                .short('p')
                .long("project")
                .value_name("PATH")
                .default_value(".")
                .help("Path to blocks.json or the directory containing it"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .help("Directory for generated files (overrides outDir)"),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .value_name("SPACES")
                .value_parser(clap::value_parser!(usize))
                .help("Indent generated code by this many spaces"),
        )
        .arg(
            Arg::new("one-based-index")
                .long("one-based-index")
                .action(ArgAction::SetTrue)
                .help("Treat list and text positions as starting from 1"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .value_parser(LogLevel::NAMES)
                .default_value("info")
                .help("Log level when RUST_LOG is not set"),
        )
        .arg(
            Arg::new("inputs")
                .value_name("FILE")
                .num_args(0..)
                .help("Workspace files to compile instead of the project inputs"),
        )
}

fn run() -> anyhow::Result<bool> {
    let matches = cli().get_matches();

    let level: LogLevel = matches
        .get_one::<String>("log-level")
        .map(|s| s.parse())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();
    init_logging(level).context("failed to install logger")?;

    let project = matches
        .get_one::<String>("project")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let inputs: Vec<PathBuf> = matches
        .get_many::<String>("inputs")
        .map(|values| values.map(PathBuf::from).collect())
        .unwrap_or_default();
    let out_dir = matches.get_one::<String>("out-dir").map(Path::new);
    let indent = matches.get_one::<usize>("indent").copied();
    let one_based_index = matches.get_flag("one-based-index");

    let result = perform_project_compilation(&project, &inputs, out_dir, |config| {
        if let Some(spaces) = indent {
            config.generator.indent = " ".repeat(spaces);
        }
        if one_based_index {
            config.generator.one_based_index = Some(true);
        }
    })?;

    for output in &result.written {
        tracing::info!("wrote {}", output.display());
    }
    for failure in &result.failures {
        eprintln!("Error: {}: {:#}", failure.input.display(), failure.error);
    }
    Ok(result.is_success())
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
