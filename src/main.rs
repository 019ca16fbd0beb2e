mod commands;

use clap::{Parser, Subcommand};
use release_ledger::LedgerContext;
use release_ledger::core::error::{LedgerError, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Load, validate and query per-release changelog records
#[derive(Parser)]
#[command(name = "release-ledger")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Increase log verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Validation
  // ============================================================================
  /// Load every release file under a directory and report errors and warnings
  Validate {
    /// Directory holding one TOML or JSON file per release
    dir: PathBuf,
    /// Output the report in JSON format
    #[arg(long)]
    json: bool,
    /// Fail on warnings as well as errors
    #[arg(long)]
    strict: bool,
  },

  // ============================================================================
  // Queries
  // ============================================================================
  /// Show one release
  Show {
    dir: PathBuf,
    /// Exact version, e.g. 0.24.1
    #[arg(value_name = "VERSION")]
    release: String,
    #[arg(long)]
    json: bool,
  },

  /// List breaking changes in a half-open version range (upgrade prerequisites)
  Breaking {
    dir: PathBuf,
    /// First version included
    #[arg(long)]
    from: String,
    /// First version excluded
    #[arg(long)]
    to: String,
    #[arg(long)]
    json: bool,
  },

  /// List changelog entries tagged with a scope, newest first
  Scope {
    dir: PathBuf,
    scope: String,
    #[arg(long)]
    json: bool,
  },

  /// List commits and credited entries for an author or contributor handle
  Author {
    dir: PathBuf,
    who: String,
    #[arg(long)]
    json: bool,
  },

  /// List all versions with per-release counts
  Versions {
    dir: PathBuf,
    #[arg(long)]
    json: bool,
  },

  // ============================================================================
  // Export
  // ============================================================================
  /// Write the loaded ledger back out, one file per release
  Export {
    dir: PathBuf,
    /// Output directory
    #[arg(long)]
    out: PathBuf,
    /// Output format: toml (default), json
    #[arg(long, default_value = "toml")]
    format: String,
  },
}

impl Commands {
  fn dir(&self) -> &PathBuf {
    match self {
      Commands::Validate { dir, .. }
      | Commands::Show { dir, .. }
      | Commands::Breaking { dir, .. }
      | Commands::Scope { dir, .. }
      | Commands::Author { dir, .. }
      | Commands::Versions { dir, .. }
      | Commands::Export { dir, .. } => dir,
    }
  }
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
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Diagnostics go to stderr; `RUST_LOG` overrides `-v`
fn init_tracing(verbose: u8) {
  let level = match verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  // Config is loaded once; every command reads the same directory
  let ctx = match LedgerContext::build(cli.command.dir()) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Validate { json, strict, .. } => commands::run_validate(&ctx, json, strict),
    Commands::Show { release, json, .. } => commands::run_show(&ctx, &release, json),
    Commands::Breaking { from, to, json, .. } => commands::run_breaking(&ctx, &from, &to, json),
    Commands::Scope { scope, json, .. } => commands::run_scope(&ctx, &scope, json),
    Commands::Author { who, json, .. } => commands::run_author(&ctx, &who, json),
    Commands::Versions { json, .. } => commands::run_versions(&ctx, json),
    Commands::Export { out, format, .. } => commands::run_export(&ctx, &out, &format),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: LedgerError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
