//! Content Library API
//!
//! Prints, writes, or installs the CustomResourceDefinitions for the
//! content library kinds.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use content_library_api::{
    register_all, render_crds, write_crds, CrdInstaller, InstallerConfig, Result, TypeRegistry,
    STORAGE_VERSION,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Content Library API - CRDs for mirrored content libraries
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print merged CRD manifests, or write one file per CRD
    Crds {
        /// Directory to write `<crd-name>.yaml` files into
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// List registered kinds
    Kinds,
    /// Apply CRDs to the cluster of the current kube context
    Install {
        /// Validate on the server without persisting
        #[arg(long)]
        dry_run: bool,

        /// Field manager for server-side apply
        #[arg(long, env = "FIELD_MANAGER", default_value = content_library_api::NAME)]
        field_manager: String,

        /// Seconds to wait for each CRD to become Established
        #[arg(long, default_value = "60")]
        timeout_secs: u64,
    },
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args);

    let mut registry = TypeRegistry::new();
    register_all(&mut registry)?;
    info!(
        version = content_library_api::VERSION,
        kinds = registry.len(),
        "Registered content library kinds"
    );

    match args.command {
        Command::Crds { output_dir } => {
            let crds = registry.crds(STORAGE_VERSION)?;
            match output_dir {
                Some(dir) => {
                    let written = write_crds(&dir, &crds)?;
                    info!(count = written.len(), dir = %dir.display(), "CRD manifests written");
                }
                None => print!("{}", render_crds(&crds)?),
            }
        }
        Command::Kinds => {
            println!("{:<28} {:<10} {:<12} {}", "KIND", "VERSION", "SCOPE", "SHORTNAMES");
            for kind in registry.kinds() {
                println!(
                    "{:<28} {:<10} {:<12} {}",
                    kind.kind,
                    kind.version,
                    kind.scope,
                    kind.short_names.join(",")
                );
            }
        }
        Command::Install {
            dry_run,
            field_manager,
            timeout_secs,
        } => {
            let crds = registry.crds(STORAGE_VERSION)?;
            let client = kube::Client::try_default().await?;
            info!(count = crds.len(), dry_run, "Installing CRDs");

            let installer = CrdInstaller::new(
                client,
                InstallerConfig {
                    field_manager,
                    dry_run,
                    establish_timeout: Duration::from_secs(timeout_secs),
                },
            );
            installer.install_all(&crds).await?;
        }
    }

    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let mut filter = EnvFilter::from_default_env().add_directive(level.into());
    for directive in ["hyper=warn", "kube=info", "tower=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    // Logs go to stderr so `crds` output stays pipeable
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
