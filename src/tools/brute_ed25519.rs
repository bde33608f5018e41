//! Brute-forces Ed25519 (signing) keys for a high yggdrasil address.
//!
//! The secret column is `seed ‖ public`, the 64-byte private key form a node
//! config takes.

use clap::Parser;
use yggdrasil_brute::cli::{run, Args};
use yggdrasil_brute::generator::Ed25519Generator;
use yggdrasil_brute::search::ED25519_BATCH;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run(&args, ED25519_BATCH, Ed25519Generator::new)
}
