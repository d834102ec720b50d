use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hwp_extract::batch::{discover_files, run_batch};
use hwp_extract::serializer::to_yaml;
use hwp_extract::{extract_file, ExtractOptions};

/// Extract structured text from HWP 5.x, HWPX, and legacy HWP 3.x documents.
#[derive(Parser, Debug)]
#[command(name = "hwp-extract", version, about)]
struct Cli {
    /// File or directory to extract.
    input: PathBuf,

    /// Walk `input` recursively, extracting every file found.
    #[arg(long)]
    recursive: bool,

    /// Write output to this path instead of stdout (single-file mode only).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum allowed decompression expansion ratio.
    #[arg(long, default_value_t = hwp_extract::utils::compression::DEFAULT_MAX_EXPANSION_RATIO)]
    max_expansion_ratio: u32,

    /// Parallel worker count for batch mode (defaults to rayon's own choice).
    #[arg(short, long)]
    jobs: Option<usize>,

    /// External converter binary used for legacy HWP 3.x documents.
    #[arg(long, default_value = "hwp2text")]
    converter: String,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = ExtractOptions {
        max_expansion_ratio: cli.max_expansion_ratio,
        converter_bin: cli.converter.clone(),
    };

    if let Some(jobs) = cli.jobs {
        let _ = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global();
    }

    if cli.recursive {
        run_recursive(&cli.input, &options)
    } else {
        run_single(&cli.input, cli.output.as_deref(), &options)
    }
}

fn run_single(path: &std::path::Path, output: Option<&std::path::Path>, options: &ExtractOptions) -> ExitCode {
    let document = match extract_file(path, options) {
        Ok(document) => document,
        Err(err) => {
            eprintln!("{}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let yaml = match to_yaml(&document, &path.display().to_string(), "auto") {
        Ok(yaml) => yaml,
        Err(err) => {
            eprintln!("{}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };

    match output {
        Some(path) => {
            if let Err(err) = std::fs::write(path, yaml) {
                eprintln!("{}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        }
        None => println!("{yaml}"),
    }

    ExitCode::SUCCESS
}

fn run_recursive(root: &std::path::Path, options: &ExtractOptions) -> ExitCode {
    let files = discover_files(root, true);
    let results = run_batch(&files, options);

    let mut failures = 0;
    for result in results {
        match result.outcome {
            Ok(document) => match to_yaml(&document, &result.path.display().to_string(), "auto") {
                Ok(yaml) => println!("---\n{yaml}"),
                Err(err) => {
                    failures += 1;
                    eprintln!("{}: {err}", result.path.display());
                }
            },
            Err(err) => {
                failures += 1;
                eprintln!("{}: {err}", result.path.display());
            }
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
