extern crate clap;
#[macro_use]
extern crate log;
extern crate pretty_env_logger;
extern crate pubx;

use clap::Parser as _;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use pubx::{Commit, Config, Dispatch, Fix, Parser};

/// Longest sentence NMEA 0183 allows, plus room for the terminator.
const SENTENCE_BUFFER: usize = 83;

/// Decodes PUBX/NMEA sentences from a receiver log and prints each fix.
#[derive(clap::Parser, Debug)]
#[command(version)]
struct Cli {
    /// Input file, stdin if omitted
    input: Option<PathBuf>,
    /// Decode only PUBX sentences automatically
    #[arg(long)]
    vendor_only: bool,
    /// Drop every field of a sentence that fails to decode
    #[arg(long)]
    atomic: bool,
    /// Sentence buffer size in bytes
    #[arg(long, default_value_t = SENTENCE_BUFFER)]
    buffer: usize,
}

fn print_fix(fix: &Fix) {
    let time = fix
        .time()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "--:--:--".to_string());
    println!(
        "{} lat={} lon={} alt={}mm sats={} hdop={} valid={}",
        time,
        fix.latitude(),
        fix.longitude(),
        fix.altitude(),
        fix.satellites(),
        fix.hdop(),
        fix.is_valid(),
    );
}

fn run(cli: Cli) -> io::Result<()> {
    let input: Box<dyn Read> = match cli.input {
        Some(ref path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let config = Config::default()
        .dispatch(if cli.vendor_only {
            Dispatch::VendorOnly
        } else {
            Dispatch::All
        })
        .commit(if cli.atomic {
            Commit::Atomic
        } else {
            Commit::Partial
        });

    let mut buf = vec![0u8; cli.buffer];
    let mut parser = Parser::with_buffer(&mut buf).with_config(config);

    for byte in input.bytes() {
        match parser.process(byte?) {
            Some(Ok(kind)) => {
                info!("decoded {:?}", kind);
                print_fix(parser.fix());
            }
            Some(Err(e)) => warn!("{}", e),
            None => (),
        }
    }
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    if let Err(e) = run(Cli::parse()) {
        error!("{}", e);
        std::process::exit(1);
    }
}
