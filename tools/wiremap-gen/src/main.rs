// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

mod codegen;
mod contract_file;
mod proxy_generator;

use proxy_generator::ProxyGenerator;
use std::env;
use std::path::PathBuf;

fn main() {
    // Initialize tracing for diagnostics
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "generate" => {
            if args.len() < 3 {
                eprintln!("generate requires a contract file");
                print_help();
                std::process::exit(1);
            }
            let contract_path = PathBuf::from(&args[2]);
            let out_dir = args
                .get(3)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("generated"));
            if let Err(e) = run_generate(contract_path, out_dir) {
                eprintln!("[ERROR] {e:#}");
                std::process::exit(1);
            }
        }
        "--help" | "-h" | "help" => {
            print_help();
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_help();
            std::process::exit(1);
        }
    }
}

fn run_generate(contract_path: PathBuf, out_dir: PathBuf) -> anyhow::Result<()> {
    tracing::info!("Initializing proxy generator");
    let generator = ProxyGenerator::new(contract_path, out_dir)?;

    tracing::info!("Starting generation");
    let report = generator.generate()?;

    report.summary();

    Ok(())
}

fn print_help() {
    println!("wiremap-gen");
    println!();
    println!("USAGE:");
    println!("    wiremap-gen <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    generate <contracts.yaml> [out_dir]  Render proxy source + mapping manifest");
    println!("    help                                 Print this help message");
    println!();
    println!("EXAMPLES:");
    println!("    wiremap-gen generate contracts/orders.yaml src/generated");
    println!();
}
