use parley::{
    cli::{Cli, CliHandler},
    error::ParleyError,
};
use std::process;

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("❌ Argument parsing failed: {}", e);
            process::exit(2);
        }
    };

    // Create and run the CLI handler
    let handler = CliHandler::new(cli);

    let exit_code = match handler.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {}", e);
            match e {
                ParleyError::InsufficientBackends { .. } => 3, // Not enough backends to compare
                ParleyError::Cancelled => 4,                   // Run cancelled before settling
                ParleyError::NoInput => 5,                     // Nothing to compare
                ParleyError::InvalidArguments(_) | ParleyError::ConfigError(_) => 2,
                _ => 1, // General error
            }
        }
    };

    process::exit(exit_code);
}
