use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use vcf_flatten::writer::write_path;
use vcf_flatten::{FlagPolicy, FlattenOptions, Flattener, MalformedPolicy};

/// Flatten a VCF file into a CSV table with one column per INFO key and the genotype call of
/// every sample.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input VCF, optionally gzip/bgzip compressed.
    input: PathBuf,

    /// Output CSV path.
    output: PathBuf,

    /// What to do with INFO flags that have no value: drop or retain.
    #[arg(long, default_value_t = FlagPolicy::Drop)]
    flags: FlagPolicy,

    /// What to do with data lines that have fewer than 8 columns: abort or skip.
    #[arg(long, default_value_t = MalformedPolicy::Abort)]
    on_malformed: MalformedPolicy,

    /// Do not split INFO, only emit the fixed columns before FORMAT.
    #[arg(long)]
    fixed_only: bool,
}

fn run(cli: Cli) -> Result<()> {
    if !cli.input.is_file() {
        anyhow::bail!(
            "the input path '{}' is not a readable file, please provide a valid path to the input VCF",
            cli.input.display()
        );
    }

    let options = FlattenOptions {
        flags: cli.flags,
        on_malformed: cli.on_malformed,
        fixed_only: cli.fixed_only,
    };
    let table = Flattener::new(options)
        .flatten_path(&cli.input)
        .with_context(|| format!("failed to flatten {}", cli.input.display()))?;
    write_path(&table, &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!(
        "wrote {} rows and {} columns to {}",
        table.len(),
        table.columns().len() + 1,
        cli.output.display()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
