mod commands;
mod compile;
mod core;
mod publish;
mod release;

use crate::core::error::{print_error, ReleaseError};
use clap::{Parser, Subcommand};

/// Compile Quatt firmware variants with ESPHome and publish release artifacts
#[derive(Parser)]
#[command(name = "quatt-release")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compile variants and publish binaries, checksums, and release descriptors
  Build {
    /// Build a single variant instead of the full table
    #[arg(long, value_name = "VARIANT_ID")]
    only: Option<String>,
    /// Output per-variant results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Show the version and project name extracted from the base configuration
  Metadata {
    /// Output metadata in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Build { only, json } => commands::run_build(only, json),
    Commands::Metadata { json } => commands::run_metadata(json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
