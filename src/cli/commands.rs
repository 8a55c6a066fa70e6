//! CLI commands implementation.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{load_settings, Settings};
use crate::server;
use crate::stars::{populate, Starfield};

#[derive(Parser)]
#[command(name = "starfield")]
#[command(about = "Decorative starfield generation and page serving")]
#[command(version)]
pub struct Cli {
    /// Config file path (default: starfield.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default: from settings)
        bind: Option<String>,
    },

    /// Render a starfield page to a file or stdout
    Render {
        /// Number of stars (default: from settings)
        #[arg(short, long)]
        count: Option<usize>,
        /// Seed for a reproducible layout
        #[arg(long)]
        seed: Option<u64>,
        /// Emit only the star markup instead of a full page
        #[arg(long)]
        fragment: bool,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { bind } => cmd_serve(settings, bind.as_deref()).await,
        Commands::Render {
            count,
            seed,
            fragment,
            output,
        } => cmd_render(settings, count, seed, fragment, output.as_deref()),
    }
}

async fn cmd_serve(settings: Settings, bind: Option<&str>) -> anyhow::Result<()> {
    let (host, port) = match bind {
        Some(bind) => parse_bind_address(bind, settings.server.port),
        None => (settings.server.host.clone(), settings.server.port),
    };

    server::serve(settings, &host, port).await
}

/// Parse a bind address in PORT, HOST, or HOST:PORT form.
fn parse_bind_address(bind: &str, default_port: u16) -> (String, u16) {
    // Try parsing as just a port number
    if let Ok(port) = bind.parse::<u16>() {
        return ("127.0.0.1".to_string(), port);
    }

    // Try parsing as host:port
    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return (host.to_string(), port);
        }
    }

    // Must be just a host, use the default port
    (bind.to_string(), default_port)
}

fn cmd_render(
    settings: Settings,
    count: Option<usize>,
    seed: Option<u64>,
    fragment: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let mut stars = settings.stars.clone();
    if let Some(count) = count {
        stars.count = count;
    }
    let seed = seed.or(stars.seed);

    let rendered = if fragment {
        match seed {
            Some(seed) => Starfield::generate(&stars, &mut StdRng::seed_from_u64(seed)).render(),
            None => Starfield::generate(&stars, &mut rand::rng()).render(),
        }
    } else {
        let page = server::standalone_page(&settings.site);
        match seed {
            Some(seed) => populate(&page, &stars, &mut StdRng::seed_from_u64(seed)),
            None => populate(&page, &stars, &mut rand::rng()),
        }
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
