use clap::Parser;
use metaf_decoder::MetafError;
use metaf_decoder::cli::{self, Args};
use std::process;

fn main() {
    let args = Args::parse();

    if let Err(e) = cli::setup_logging(&args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = cli::run(args) => result,
            _ = cli::interrupt_requested(tokio::signal::ctrl_c()) => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(MetafError::Interrupted {
                    reason: "interrupted by user".to_string(),
                }
                .into())
            }
        }
    });

    match result {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
