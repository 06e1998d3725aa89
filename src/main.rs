//! address-book CLI entry point
//!
//! Postal address API with radius search - CLI + web server

use address_book::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
