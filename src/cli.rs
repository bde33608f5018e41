//! Command line shared by the `brute-*` binaries.

use crate::generator::{CandidateGenerator, KeyPayload};
use crate::report::{header, write_results};
use crate::search::{search_parallel, SearchOptions};
use crate::{rng, set_up_logging, DEFAULT_KEYS};
use clap::Parser;
use log::{debug, info};
use rand::rngs::OsRng;
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
pub struct Args {
    /// Search for at least this many seconds. Negative values count as zero.
    #[arg(allow_negative_numbers = true)]
    pub seconds: i64,
    /// Number of keys to keep and print.
    #[arg(short, long, default_value_t = DEFAULT_KEYS, value_parser = parse_keys)]
    pub keys: usize,
    /// Search threads. Defaults to the number of CPUs.
    #[arg(short, long)]
    pub jobs: Option<usize>,
    /// Candidates between two clock checks.
    #[arg(long)]
    pub batch: Option<usize>,
    /// Print addresses in IPv6 notation instead of hex.
    #[arg(long)]
    pub ipv6: bool,
    #[arg(short, long)]
    pub verbose: bool,
    /// Also append logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn parse_keys(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err(String::from("must keep at least one key")),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Args {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.seconds.max(0) as u64)
    }
}

pub fn run<G, F>(args: &Args, default_batch: usize, new_generator: F) -> anyhow::Result<()>
where
    G: CandidateGenerator,
    F: Fn(OsRng) -> G + Sync,
{
    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    set_up_logging(level, args.log_file.as_deref())?;

    let rng = rng::init()?;
    let options = SearchOptions {
        duration: args.duration(),
        batch_size: args.batch.unwrap_or(default_batch),
    };
    let jobs = args.jobs.unwrap_or_else(num_cpus::get);
    let scheme = <G::Payload as KeyPayload>::SCHEME;

    info!(
        "Searching for yggdrasil {} keys (this will take slightly longer than {} seconds)",
        scheme,
        options.duration.as_secs()
    );
    debug!(
        "jobs: {}, keys: {}, batch size: {}",
        jobs, args.keys, options.batch_size
    );

    let (set, stats) = search_parallel(jobs, || new_generator(rng), args.keys, &options)?;
    info!(
        "Tried {} keys in {}, {} accepted",
        stats.runs,
        humantime::format_duration(Duration::from_millis(stats.elapsed.as_millis() as u64)),
        stats.accepted
    );

    eprintln!("{}", header::<G::Payload>(args.ipv6));
    write_results(&mut stdout().lock(), &set, args.ipv6)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use crate::cli::Args;
    use clap::Parser;
    use std::time::Duration;

    #[test]
    fn seconds() {
        let args = Args::try_parse_from(["brute", "30"]).unwrap();
        assert_eq!(args.duration(), Duration::from_secs(30));
        assert_eq!(args.keys, 10);
        assert_eq!(args.jobs, None);

        let args = Args::try_parse_from(["brute", "-5"]).unwrap();
        assert_eq!(args.duration(), Duration::ZERO);

        let args = Args::try_parse_from(["brute", "0"]).unwrap();
        assert_eq!(args.duration(), Duration::ZERO);
    }

    #[test]
    fn usage_errors() {
        assert!(Args::try_parse_from(["brute"]).is_err());
        assert!(Args::try_parse_from(["brute", "ten"]).is_err());
        assert!(Args::try_parse_from(["brute", "1.5"]).is_err());
        assert!(Args::try_parse_from(["brute", "10", "--keys", "0"]).is_err());
    }

    #[test]
    fn options() {
        let args =
            Args::try_parse_from(["brute", "3", "-k", "4", "-j", "2", "--ipv6", "--batch", "100"])
                .unwrap();
        assert_eq!(args.keys, 4);
        assert_eq!(args.jobs, Some(2));
        assert_eq!(args.batch, Some(100));
        assert!(args.ipv6);
        assert!(!args.verbose);
    }
}
