//! scenegen - compile design documents into Lit web components.

mod cli;
mod error;

use std::process;

pub const NAME: &str = "scenegen";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Compile design scene graphs into Lit web components";

#[tokio::main]
async fn main() {
    let mut cli = cli::SceneCli::new();
    if let Err(e) = cli.run().await {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
