use sentence::{Identifier, SentenceKind};

quick_error! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ParseError {
        MissingStart {
            display("Sentence does not start with '$'")
        }
        MissingChecksum {
            display("Sentence has no '*' checksum delimiter")
        }
        InvalidChecksum(expected: u8, found: [u8; 2]) {
            display("Expected checksum \"{:02X}\", found \"{}{}\"",
                    expected, found[0] as char, found[1] as char)
        }
        UnknownSentence(identifier: Identifier) {
            display("Encountered unknown sentence identifier \"{}\"",
                    String::from_utf8_lossy(identifier))
        }
        NotDispatched(kind: SentenceKind) {
            display("Sentence type {:?} is not dispatched automatically", kind)
        }
        UnsupportedPubx(sub_id: u32) {
            display("PUBX message {:02} is not supported", sub_id)
        }
        MalformedField(field: &'static str) {
            display("Decoding stopped at field \"{}\"", field)
        }
    }
}
