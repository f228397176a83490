//! # Lienzo CLI
//!
//! Command-line interface for rendering token artwork.
//!
//! ## Usage
//!
//! ```bash
//! # Composite a token and save it as PNG
//! lienzo render --team 2 --serial 000123 --revealed true --base ./metadata --out token.png
//!
//! # Same parameters as a query string
//! lienzo render --query "team=2&serial=000123&revealed=true" --out token.png
//!
//! # Show which image resources a token resolves to
//! lienzo plan --team 1 --variant 3 --revealed 1 --json
//!
//! # Generate the token's metadata JSON
//! lienzo metadata --team 3 --serial 000007 --revealed true
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use lienzo::{
    LienzoError,
    assets::{AssetCatalog, DEFAULT_BASE_PATH},
    metadata::token_metadata,
    render::{RenderContext, SerialFont, render_token},
    reveal::RevealSchedule,
    source::DefaultSource,
    token::RawTokenParams,
};

/// Lienzo - token artwork rendering utility
#[derive(Parser, Debug)]
#[command(name = "lienzo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Token selection, either as individual flags or one query string.
#[derive(Args, Debug)]
struct TokenArgs {
    /// All parameters as a query string ("team=2&serial=000123")
    #[arg(long, conflicts_with_all = ["team", "variant", "serial", "revealed"])]
    query: Option<String>,

    /// Team id (0-3)
    #[arg(long)]
    team: Option<String>,

    /// Artwork variant (0-3, team 1 only)
    #[arg(long)]
    variant: Option<String>,

    /// 6-digit serial (required for teams 2 and 3)
    #[arg(long)]
    serial: Option<String>,

    /// Reveal override: "true"/"1" forces revealed, any other value unrevealed
    #[arg(long)]
    revealed: Option<String>,

    /// Base path or URL of the asset tree
    #[arg(long, default_value = DEFAULT_BASE_PATH)]
    base: String,

    /// Reveal instant as a Unix timestamp (defaults to the built-in schedule)
    #[arg(long)]
    reveal_at: Option<i64>,
}

impl TokenArgs {
    fn raw_params(&self) -> RawTokenParams {
        match &self.query {
            Some(query) => RawTokenParams::from_query(query),
            None => RawTokenParams {
                team: self.team.clone(),
                variant: self.variant.clone(),
                serial: self.serial.clone(),
                revealed: self.revealed.clone(),
            },
        }
    }

    fn catalog(&self) -> AssetCatalog {
        AssetCatalog::new(self.base.clone())
    }

    fn schedule(&self) -> Result<RevealSchedule, LienzoError> {
        match self.reveal_at {
            None => Ok(RevealSchedule::default()),
            Some(secs) => RevealSchedule::from_timestamp(secs).ok_or_else(|| {
                LienzoError::InvalidArgument(format!("reveal timestamp out of range: {}", secs))
            }),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch, composite and save a token image
    Render {
        #[command(flatten)]
        token: TokenArgs,

        /// Output PNG path
        #[arg(long, default_value = "token.png")]
        out: PathBuf,

        /// TrueType font for serial text (defaults to the embedded bitmap font)
        #[arg(long)]
        font: Option<PathBuf>,
    },

    /// Print the ordered image resources a token resolves to
    Plan {
        #[command(flatten)]
        token: TokenArgs,

        /// Emit the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate token metadata JSON
    Metadata {
        #[command(flatten)]
        token: TokenArgs,

        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), LienzoError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { token, out, font } => {
            let descriptor = token.raw_params().validate()?;
            let mut ctx = RenderContext::new(token.catalog(), Box::new(DefaultSource::new()?))
                .with_schedule(token.schedule()?);
            if let Some(path) = font {
                ctx = ctx.with_font(SerialFont::from_file(&path)?);
            }

            let canvas = render_token(&descriptor, &ctx, chrono::Utc::now()).await?;
            canvas.save(&out)?;
            println!("Saved {}x{} image to {}", canvas.width(), canvas.height(), out.display());
        }

        Commands::Plan { token, json } => {
            let descriptor = token.raw_params().validate()?;
            let ctx = RenderContext::new(token.catalog(), Box::new(DefaultSource::new()?))
                .with_schedule(token.schedule()?);
            let plan = ctx.plan(&descriptor, chrono::Utc::now());

            if json {
                println!("{}", serde_json::to_string_pretty(&plan).expect("plan serializes"));
            } else {
                for resource in plan.resources() {
                    println!("{}", resource);
                }
            }
        }

        Commands::Metadata { token, out } => {
            let descriptor = token.raw_params().validate()?;
            let catalog = token.catalog();
            let schedule = token.schedule()?;
            let revealed = descriptor.is_revealed(&schedule, chrono::Utc::now());

            let meta = token_metadata(&descriptor, &catalog, revealed);
            let json = serde_json::to_string_pretty(&meta).expect("metadata serializes");

            match out {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Wrote metadata to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}
