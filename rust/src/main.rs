use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use dotenv::dotenv;
use rust_facade::facade::scanner::{DEFAULT_ASYNC_PREFIX, DEFAULT_IMPL_TARGET};
use rust_facade::{generate_all, scan_project, write_json, GenerateConfig, Variant};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "rust-facade",
    version,
    about = "Generate a trait and a forwarding impl from a crate's public functions"
)]
struct Cli {
    /// Crate root containing the `src` directory to scan
    #[arg(value_name = "dir")]
    root: PathBuf,

    /// Base name of the generated trait
    #[arg(value_name = "name")]
    trait_name: String,

    /// Type the forwarding impl is written for
    #[arg(long, value_name = "type", env = "FACADE_IMPL_TARGET", default_value = DEFAULT_IMPL_TARGET)]
    target: String,

    /// Prefix of the asynchronous trait's name
    #[arg(long, value_name = "prefix", default_value = DEFAULT_ASYNC_PREFIX)]
    async_prefix: String,

    /// Which trait/impl pairs to emit
    #[arg(long, value_enum, default_value_t = VariantArg::Both)]
    variant: VariantArg,

    /// Output file (default stdout)
    #[arg(long, value_name = "file")]
    out: Option<PathBuf>,

    /// Print the extracted signatures as JSON instead of code
    #[arg(long)]
    json: bool,

    /// Do not report each parsed file
    #[arg(short, long)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum VariantArg {
    Both,
    Sync,
    Async,
}

impl VariantArg {
    fn variants(self) -> &'static [Variant] {
        match self {
            VariantArg::Both => &Variant::ALL,
            VariantArg::Sync => &[Variant::Sync],
            VariantArg::Async => &[Variant::Async],
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let cfg = GenerateConfig {
        root: cli.root.clone(),
        trait_name: cli.trait_name.clone(),
        impl_target: cli.target.clone(),
        async_prefix: cli.async_prefix.clone(),
    };
    cfg.validate()?;

    let quiet = cli.quiet;
    let progress = |path: &Path| {
        if !quiet {
            eprintln!("{} {}", "Parsing".cyan(), path.display());
        }
    };
    let modules = scan_project(&cfg, &progress)?;

    let mut out: Box<dyn Write> = match &cli.out {
        Some(p) => {
            let f = File::create(p).with_context(|| format!("Failed to create {}", p.display()))?;
            Box::new(BufWriter::new(f))
        }
        None => Box::new(io::stdout().lock()),
    };

    if cli.json {
        write_json(&modules, &mut out)?;
    } else {
        for artifact in generate_all(&cfg, &modules, cli.variant.variants()) {
            writeln!(out, "{}", artifact.render())?;
        }
    }
    out.flush()?;

    if let (Some(p), false) = (&cli.out, quiet) {
        eprintln!(
            "{}",
            format!("Output written to: {}", p.display()).green()
        );
    }
    Ok(())
}
