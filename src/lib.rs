//! Decoder for u-blox `PUBX,00` and NMEA 0183 GGA, RMC, GLL, GNS and GSA
//! sentences.
//!
//! Sentences are assembled one byte at a time into a caller-supplied buffer
//! and decoded into a [`Fix`](fix/struct.Fix.html) without allocating and
//! without floating-point arithmetic: coordinates are millionths of a degree,
//! altitude is millimetres and dilutions of precision are tenths.
//!
//! ```
//! use pubx::{Parser, SentenceKind};
//!
//! let mut buf = [0u8; 128];
//! let mut parser = Parser::with_buffer(&mut buf);
//! let input = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
//! for &b in input.iter() {
//!     if let Some(res) = parser.process(b) {
//!         assert_eq!(res, Ok(SentenceKind::Gga));
//!     }
//! }
//! assert_eq!(parser.fix().latitude(), 48_117_300);
//! ```

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
extern crate arrayvec;
extern crate chrono;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;

pub mod err;
#[macro_use]
mod macros;
pub mod checksum;
pub mod cursor;
pub mod fix;
pub mod parser;
pub mod sentence;

pub use err::ParseError;
pub use fix::{Fix, FixUpdate};
pub use parser::{Commit, Config, Dispatch, Parser};
pub use sentence::SentenceKind;
