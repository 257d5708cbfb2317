//! This module provides the byte-at-a-time sentence assembler that feeds
//! completed sentences to the decoders and keeps the resulting
//! [`Fix`](../fix/struct.Fix.html).

use checksum;
use cursor::FieldCursor;
use err::ParseError;
use fix::{Fix, FixUpdate};
use sentence::{self, SentenceKind};

/// Which sentence types are decoded automatically on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// All supported sentence types.
    All,
    /// Only `PUBX`. Standard sentences are reported as
    /// `ParseError::NotDispatched` and can be decoded with
    /// [`Parser::decode_sentence`](struct.Parser.html#method.decode_sentence).
    VendorOnly,
}

/// What happens to fields decoded before a decoder fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// They are merged into the fix, even though the sentence was not
    /// decoded completely.
    Partial,
    /// Nothing is merged unless the whole sentence decoded.
    Atomic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub dispatch: Dispatch,
    pub commit: Commit,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dispatch: Dispatch::All,
            commit: Commit::Partial,
        }
    }
}

impl Config {
    pub fn dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn commit(mut self, commit: Commit) -> Self {
        self.commit = commit;
        self
    }
}

/// Assembles sentences from single bytes into a caller-supplied buffer and
/// decodes them into a [`Fix`](../fix/struct.Fix.html).
///
/// The last byte of the buffer is reserved for the NUL terminator, so a
/// buffer of `n` bytes holds sentences of up to `n - 1` bytes. Longer
/// sentences are truncated.
#[derive(Debug)]
pub struct Parser<'a> {
    buffer: Option<&'a mut [u8]>,
    pos: usize,
    fix: Fix,
    config: Config,
}

impl<'a> Default for Parser<'a> {
    fn default() -> Self {
        Parser::new()
    }
}

impl<'a> Parser<'a> {
    /// Create a parser without a buffer. Nothing is decoded until
    /// [`set_buffer`](#method.set_buffer) is called.
    pub fn new() -> Self {
        Parser {
            buffer: None,
            pos: 0,
            fix: Fix::new(),
            config: Config::default(),
        }
    }

    /// Create a parser assembling sentences in `buffer`.
    pub fn with_buffer(buffer: &'a mut [u8]) -> Self {
        let mut parser = Parser::new();
        parser.set_buffer(buffer);
        parser
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Bind a new buffer. Any partially assembled sentence is dropped.
    pub fn set_buffer(&mut self, buffer: &'a mut [u8]) {
        if let Some(first) = buffer.first_mut() {
            *first = 0;
        }
        self.buffer = Some(buffer);
        self.pos = 0;
    }

    /// Reset the fix to its sentinel values. The buffer is left untouched.
    pub fn clear(&mut self) {
        self.fix.clear();
    }

    pub fn fix(&self) -> &Fix {
        &self.fix
    }

    /// The most recently completed sentence, or the bytes assembled so far if
    /// a sentence is in progress over a previous one.
    pub fn last_sentence(&self) -> &[u8] {
        match self.buffer {
            Some(ref buf) => {
                let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
                &buf[..end]
            }
            None => &[],
        }
    }

    /// Feed one byte.
    ///
    /// Returns `None` while a sentence is being assembled, for empty
    /// sentences, and if no buffer is bound. When a terminator (`\0`, `\n`
    /// or `\r`) completes a non-empty sentence, the sentence is checked and
    /// decoded before returning `Some` with the outcome.
    pub fn process(&mut self, byte: u8) -> Option<Result<SentenceKind, ParseError>> {
        let buf = match self.buffer {
            Some(ref mut buf) if !buf.is_empty() => buf,
            _ => return None,
        };

        match byte {
            0 | b'\n' | b'\r' => {
                let end = self.pos;
                if end == 0 {
                    return None;
                }
                buf[end] = 0;
                self.pos = 0;
                Some(complete(&self.config, &mut self.fix, &buf[..end]))
            }
            _ => {
                if self.pos < buf.len() - 1 {
                    buf[self.pos] = byte;
                    self.pos += 1;
                }
                None
            }
        }
    }

    /// Decode a sentence of a known type directly, bypassing the checksum
    /// and the dispatch configuration. Fields are committed according to the
    /// configured [`Commit`](enum.Commit.html) mode.
    pub fn decode_sentence(&mut self, kind: SentenceKind, sentence: &[u8]) -> Result<(), ParseError> {
        let mut update = FixUpdate::default();
        let res = sentence::decode_sentence(kind, sentence, &mut update);
        commit(self.config.commit, &mut self.fix, &update, res.is_ok());
        res
    }
}

fn commit(mode: Commit, fix: &mut Fix, update: &FixUpdate, complete: bool) {
    if complete || mode == Commit::Partial {
        fix.merge(update);
    }
}

/// Checks, identifies and decodes one completed sentence.
fn complete(config: &Config, fix: &mut Fix, sentence: &[u8]) -> Result<SentenceKind, ParseError> {
    trace!("sentence: {}", String::from_utf8_lossy(sentence));

    if sentence[0] != b'$' {
        debug!("dropping sentence without '$'");
        return Err(ParseError::MissingStart);
    }
    if let Err(e) = checksum::verify_checksum(sentence) {
        debug!("{}", e);
        return Err(e);
    }

    let mut cursor = FieldCursor::new(&sentence[1..]);
    let kind = match sentence::identify(&mut cursor) {
        Ok(kind) => kind,
        Err(e) => {
            debug!("{}", e);
            return Err(e);
        }
    };
    if config.dispatch == Dispatch::VendorOnly && !kind.is_vendor() {
        return Err(ParseError::NotDispatched(kind));
    }

    let mut update = FixUpdate::default();
    let res = sentence::decode(kind, &mut cursor, &mut update);
    if let Err(ref e) = res {
        debug!("{:?} at offset {}: {}", kind, cursor.position() + 1, e);
    }
    commit(config.commit, fix, &update, res.is_ok());
    res.map(|_| kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fix::{UNSET_COORDINATE, UNSET_SCALED, UNSET_TIME};

    const PUBX: &[u8] = b"$PUBX,00,081350.00,4717.113210,N,00833.915187,E,546.589,G3,2.1,2.0,0.007,77.52,0.007,,0.92,1.19,0.77,9,0,0*5F\r\n";
    const GGA: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
    const RMC: &[u8] = b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";
    const TRUNCATED_PUBX: &[u8] = b"$PUBX,00,081350.00,4717.113210,N,00833.915187,E,546.589*0A\n";

    /// Feeds `input` and collects the outcome of every completed sentence.
    fn feed(parser: &mut Parser, input: &[u8]) -> Vec<Result<SentenceKind, ParseError>> {
        input.iter().filter_map(|&b| parser.process(b)).collect()
    }

    #[test]
    fn unconfigured_parser_never_completes() {
        let mut parser = Parser::new();
        assert!(feed(&mut parser, GGA).is_empty());

        let mut empty: [u8; 0] = [];
        let mut parser = Parser::with_buffer(&mut empty);
        assert!(feed(&mut parser, GGA).is_empty());
        assert_eq!(parser.fix(), &Fix::new());
    }

    #[test]
    fn crlf_completes_once() {
        let mut buf = [0u8; 128];
        let mut parser = Parser::with_buffer(&mut buf);
        let results = feed(&mut parser, GGA);
        assert_eq!(results.len(), 1);
        assert_matches!(results[0], Ok(SentenceKind::Gga));
        assert_eq!(parser.process(b'\n'), None);
        assert_eq!(parser.process(0), None);
    }

    #[test]
    fn pubx_end_to_end() {
        let mut buf = [0u8; 128];
        let mut parser = Parser::with_buffer(&mut buf);
        assert_eq!(feed(&mut parser, PUBX), vec![Ok(SentenceKind::Pubx)]);

        let fix = parser.fix();
        assert_eq!((fix.hour(), fix.minute(), fix.second(), fix.hundredths()), (8, 13, 50, 0));
        assert_eq!(fix.latitude(), 47_285_220);
        assert_eq!(fix.longitude(), 8_565_253);
        assert_eq!(fix.altitude(), 546_589);
        assert_eq!(fix.nav_status(), b"G3");
        assert_eq!(fix.horizontal_accuracy(), 2_100);
        assert_eq!(fix.vertical_accuracy(), 2_000);
        assert_eq!(fix.satellites(), 9);
        assert_eq!((fix.hdop(), fix.vdop(), fix.tdop()), (9, 11, 7));
        assert_eq!((fix.day(), fix.month(), fix.year()), (0, 0, 0));
    }

    #[test]
    fn sentences_accumulate_into_one_fix() {
        let mut buf = [0u8; 128];
        let mut parser = Parser::with_buffer(&mut buf);
        let mut input = Vec::new();
        input.extend_from_slice(PUBX);
        input.extend_from_slice(RMC);
        let results = feed(&mut parser, &input);
        assert_eq!(results, vec![Ok(SentenceKind::Pubx), Ok(SentenceKind::Rmc)]);

        let fix = parser.fix();
        // RMC overwrote position and time, PUBX-only fields survive
        assert_eq!(fix.latitude(), 48_117_300);
        assert_eq!(fix.hour(), 12);
        assert_eq!(fix.year(), 2094);
        assert_eq!(fix.satellites(), 9);
        assert_eq!(fix.nav_status(), b"G3");
        assert!(fix.is_valid());
    }

    #[test]
    fn checksum_mismatch_still_completes() {
        let mut buf = [0u8; 128];
        let mut parser = Parser::with_buffer(&mut buf);
        let results = feed(
            &mut parser,
            b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*48\n",
        );
        assert_matches!(results[..], [Err(ParseError::InvalidChecksum(0x47, _))]);
        assert_eq!(parser.fix(), &Fix::new());
    }

    #[test]
    fn missing_dollar() {
        let mut buf = [0u8; 128];
        let mut parser = Parser::with_buffer(&mut buf);
        assert_eq!(feed(&mut parser, &GGA[1..]), vec![Err(ParseError::MissingStart)]);
    }

    #[test]
    fn unknown_sentence() {
        let mut buf = [0u8; 128];
        let mut parser = Parser::with_buffer(&mut buf);
        let results = feed(&mut parser, b"$GPZDA,201530.00,04,07,2002,00,00*60\n");
        assert_matches!(results[..], [Err(ParseError::UnknownSentence(_))]);
    }

    #[test]
    fn vendor_only_dispatch() {
        let mut buf = [0u8; 128];
        let mut parser =
            Parser::with_buffer(&mut buf).with_config(Config::default().dispatch(Dispatch::VendorOnly));
        assert_eq!(
            feed(&mut parser, GGA),
            vec![Err(ParseError::NotDispatched(SentenceKind::Gga))]
        );
        assert_eq!(parser.fix().latitude(), UNSET_COORDINATE);

        // the caller decodes it explicitly instead
        let sentence = parser.last_sentence().to_vec();
        assert_matches!(parser.decode_sentence(SentenceKind::Gga, &sentence), Ok(()));
        assert_eq!(parser.fix().latitude(), 48_117_300);

        assert_eq!(feed(&mut parser, PUBX), vec![Ok(SentenceKind::Pubx)]);
    }

    #[test]
    fn partial_decode_persists() {
        let mut buf = [0u8; 128];
        let mut parser = Parser::with_buffer(&mut buf);
        assert_eq!(
            feed(&mut parser, TRUNCATED_PUBX),
            vec![Err(ParseError::MalformedField("altitude"))]
        );
        let fix = parser.fix();
        assert_eq!(fix.hour(), 8);
        assert_eq!(fix.latitude(), 47_285_220);
        assert_eq!(fix.longitude(), 8_565_253);
        // read from the field the sentence ended on
        assert_eq!(fix.altitude(), 546_589);
        assert_eq!(fix.hdop(), 0);
    }

    #[test]
    fn atomic_commit_discards_failed_decode() {
        let mut buf = [0u8; 128];
        let mut parser =
            Parser::with_buffer(&mut buf).with_config(Config::default().commit(Commit::Atomic));
        assert_eq!(
            feed(&mut parser, TRUNCATED_PUBX),
            vec![Err(ParseError::MalformedField("altitude"))]
        );
        assert_eq!(parser.fix(), &Fix::new());
    }

    #[test]
    fn overflow_is_truncated() {
        let mut buf = [0xffu8; 16];
        {
            let mut parser = Parser::with_buffer(&mut buf);
            let results = feed(&mut parser, b"$ABCDEFGHIJKLMNOPQRSTUVWXYZ\n");
            assert_matches!(results[..], [Err(ParseError::MissingChecksum)]);
            assert_eq!(parser.last_sentence(), b"$ABCDEFGHIJKLMN");
        }
        assert_eq!(buf[15], 0);
    }

    #[test]
    fn clear_resets_fix_but_keeps_buffer() {
        let mut buf = [0u8; 128];
        let mut parser = Parser::with_buffer(&mut buf);
        feed(&mut parser, GGA);
        assert_eq!(parser.fix().latitude(), 48_117_300);

        parser.clear();
        assert_eq!(parser.fix(), &Fix::new());
        assert_eq!(parser.fix().hour(), UNSET_TIME);
        parser.clear();
        assert_eq!(parser.fix(), &Fix::new());

        assert_eq!(feed(&mut parser, GGA), vec![Ok(SentenceKind::Gga)]);
        assert_eq!(parser.fix().latitude(), 48_117_300);
    }

    #[test]
    fn buffer_can_be_rebound() {
        let mut first = [0u8; 128];
        let mut second = [0u8; 128];
        let mut parser = Parser::with_buffer(&mut first);
        feed(&mut parser, b"$GPGGA,1235");
        parser.set_buffer(&mut second);
        assert_eq!(parser.last_sentence(), b"");
        assert_eq!(feed(&mut parser, RMC), vec![Ok(SentenceKind::Rmc)]);
    }
}
