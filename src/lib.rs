pub mod address;
pub mod cli;
pub mod generator;
pub mod ranked;
pub mod report;
pub mod rng;
pub mod search;

use sha2::{Digest, Sha512};
use std::io;
use std::path::Path;

/// SHA-512 of a public key. Compared as a big-endian unsigned integer, larger is better.
pub type Score = [u8; 64];

/// How many keys are kept and printed when not told otherwise.
pub const DEFAULT_KEYS: usize = 10;

#[inline]
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut out = [0_u8; 64];
    out.copy_from_slice(&Sha512::digest(data));
    out
}

pub trait EncodeHex {
    fn hex(&self) -> String;
}

impl<A> EncodeHex for A
where
    A: AsRef<[u8]>,
{
    fn hex(&self) -> String {
        hex::encode(self)
    }
}

/// Logs go to stderr (stdout carries the keys), and to `file` if given.
pub fn set_up_logging(level: log::LevelFilter, file: Option<&Path>) -> anyhow::Result<()> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339(std::time::SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr());
    if let Some(file) = file {
        dispatch = dispatch.chain(fern::log_file(file)?);
    }
    dispatch.apply()?;
    Ok(())
}
