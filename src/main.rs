mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_batch, run_generate};

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();

    match args.command {
        Commands::Generate {
            input,
            input_type,
            name,
            output,
            test_output,
            generation,
            format,
        } => {
            run_generate(
                args.config,
                args.verbose,
                input,
                input_type,
                name,
                output,
                test_output,
                generation,
                format,
            )
            .await
        }
        Commands::Batch {
            input,
            output_dir,
            concurrency,
            delay_ms,
            generation,
            format,
        } => {
            run_batch(
                &raw_args,
                args.config,
                args.verbose,
                input,
                output_dir,
                concurrency,
                delay_ms,
                generation,
                format,
            )
            .await
        }
    }
}
