#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate pubx;

use pubx::{Commit, Config, Parser, SentenceKind};

fuzz_target!(|data: &[u8]| {
    let mut buf = [0u8; 83];
    let mut parser = Parser::with_buffer(&mut buf);
    for &b in data {
        parser.process(b);
    }

    let mut parser = Parser::new().with_config(Config::default().commit(Commit::Atomic));
    for &kind in &[
        SentenceKind::Pubx,
        SentenceKind::Gga,
        SentenceKind::Rmc,
        SentenceKind::Gll,
        SentenceKind::Gns,
        SentenceKind::Gsa,
    ] {
        let _ = parser.decode_sentence(kind, data);
    }
});
