//! Operating-system randomness used to seed every search trajectory.

use anyhow::Context;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

/// Checks once that the OS random source works and hands it out.
///
/// Must succeed before any generator is built; after this, `OsRng` is
/// assumed to keep working for the lifetime of the process.
pub fn init() -> anyhow::Result<OsRng> {
    let mut sample = [0_u8; 32];
    OsRng
        .try_fill_bytes(&mut sample)
        .context("Failed to initialize the OS random source")?;
    sample.zeroize();
    Ok(OsRng)
}
