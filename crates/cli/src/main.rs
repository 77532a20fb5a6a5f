mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{cmd_assemble, cmd_synth, cmd_update};
use output::{OutputFormat, print_error};

/// touchpack - click packaging metadata and www assembly
#[derive(Parser)]
#[command(name = "touchpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Regenerate metadata and rebuild www/
  Update {
    /// Platform directory (e.g. platforms/ubuntu)
    #[arg(default_value = ".")]
    platform_dir: PathBuf,

    /// JSON application descriptor
    #[arg(short, long)]
    descriptor: PathBuf,

    /// CPU family to package for (arm, ia32, x64) instead of the host's
    #[arg(long)]
    arch: Option<String>,
  },

  /// Regenerate manifest.json, cordova.desktop and apparmor.json only
  Synth {
    /// Platform directory (e.g. platforms/ubuntu)
    #[arg(default_value = ".")]
    platform_dir: PathBuf,

    /// JSON application descriptor
    #[arg(short, long)]
    descriptor: PathBuf,

    /// CPU family to package for (arm, ia32, x64) instead of the host's
    #[arg(long)]
    arch: Option<String>,
  },

  /// Rebuild www/ from the project's asset layers only
  Assemble {
    /// Platform directory (e.g. platforms/ubuntu)
    #[arg(default_value = ".")]
    platform_dir: PathBuf,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Update {
      platform_dir,
      descriptor,
      arch,
    } => cmd_update(&platform_dir, &descriptor, arch, cli.output),
    Commands::Synth {
      platform_dir,
      descriptor,
      arch,
    } => cmd_synth(&platform_dir, &descriptor, arch, cli.output),
    Commands::Assemble { platform_dir } => cmd_assemble(&platform_dir, cli.output),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
