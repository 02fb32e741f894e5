//! Page Table Simulator - fixed demonstration run
//!
//! Builds a page table for a 5 MB program on an 18-bit machine (23-bit
//! virtual addresses, 2 KB pages) and translates one address through it.
//!
//! Usage: page-table-sim [OPTIONS]
//!
//! Options:
//!   -v, --verbose      Trace the build and print the table summary
//!   -s, --seed <n>     Seed the frame assignment for a reproducible run
//!   -h, --help         Print help information

use std::env;
use std::io::{self, Write};
use std::process;

use anyhow::{anyhow, Context};
use log::LevelFilter;

use page_table_sim::io::{write_summary, write_translation, write_translation_verbose};
use page_table_sim::{logger, FrameSource, RandomFrames, VmManager, DEMO_ADDRESS, DEMO_CONFIG};

/// Command-line configuration
struct Config {
    verbose: bool,
    seed: Option<u64>,
}

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn print_help(program: &str) {
    eprintln!("Page Table Simulator - single-level virtual to physical translation");
    eprintln!();
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v, --verbose      Trace the build and print the table summary");
    eprintln!("  -s, --seed <n>     Seed the frame assignment for a reproducible run");
    eprintln!("  -h, --help         Print this help message");
}

fn parse_args() -> anyhow::Result<Config> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("page-table-sim");

    let mut verbose = false;
    let mut seed = None;
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help(program);
                process::exit(0);
            }
            "-v" | "--verbose" => {
                verbose = true;
            }
            "-s" | "--seed" => {
                let value = rest
                    .next()
                    .ok_or_else(|| anyhow!("{} needs a value", arg))?;
                seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid seed: {}", value))?,
                );
            }
            _ => {
                return Err(anyhow!(
                    "Unknown option: {}\nUse --help for usage information.",
                    arg
                ));
            }
        }
    }

    Ok(Config { verbose, seed })
}

fn run(config: &Config) -> anyhow::Result<()> {
    let level = if config.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Warn
    };
    logger::init(level).map_err(|e| anyhow!("failed to install logger: {}", e))?;

    let vm = match config.seed {
        Some(seed) => build(&mut RandomFrames::seeded(seed))?,
        None => build(&mut RandomFrames::from_entropy())?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.verbose {
        write_summary(&mut out, vm.config(), vm.page_table())?;
        writeln!(out)?;
    }

    let translation = vm.translate(DEMO_ADDRESS)?;
    if config.verbose {
        write_translation_verbose(&mut out, DEMO_ADDRESS, &translation)?;
    } else {
        write_translation(&mut out, &translation)?;
    }
    Ok(())
}

fn build(source: &mut impl FrameSource) -> anyhow::Result<VmManager> {
    VmManager::new(DEMO_CONFIG, source).context("page table initialisation failed")
}
