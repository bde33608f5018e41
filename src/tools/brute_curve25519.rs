//! Brute-forces Curve25519 (encryption) keys for a high yggdrasil address.
//!
//! Usage: `brute-curve25519 <seconds>`. The best keys are printed on stdout,
//! best first, as `<address> <secret> <public>`.

use clap::Parser;
use yggdrasil_brute::cli::{run, Args};
use yggdrasil_brute::generator::Curve25519Generator;
use yggdrasil_brute::search::CURVE25519_BATCH;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run(&args, CURVE25519_BATCH, Curve25519Generator::new)
}
