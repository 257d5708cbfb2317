//! XOR checksum over the sentence body, between `$` and `*`.

use err::ParseError;

#[inline]
fn to_hex(nibble: u8) -> u8 {
    if nibble >= 10 {
        nibble - 10 + b'A'
    } else {
        nibble + b'0'
    }
}

/// Renders a checksum as two uppercase hexadecimal digits.
pub fn to_digits(checksum: u8) -> [u8; 2] {
    [to_hex(checksum >> 4), to_hex(checksum & 0x0f)]
}

/// Computes the checksum of `sentence`.
///
/// A leading `$` is skipped; the running XOR stops at `*`, NUL or the end of
/// the slice. Returns the checksum and the offset it stopped at.
pub fn generate_checksum(sentence: &[u8]) -> (u8, usize) {
    let start = if sentence.first() == Some(&b'$') { 1 } else { 0 };
    let mut checksum = 0u8;
    let mut end = start;
    for &b in &sentence[start..] {
        if b == b'*' || b == 0 {
            break;
        }
        checksum ^= b;
        end += 1;
    }
    (checksum, end)
}

/// Checks that `sentence` ends in `*` followed by exactly the two checksum
/// digits of its body.
pub fn verify_checksum(sentence: &[u8]) -> Result<(), ParseError> {
    let (checksum, end) = generate_checksum(sentence);
    if sentence.get(end) != Some(&b'*') {
        return Err(ParseError::MissingChecksum);
    }
    let expected = to_digits(checksum);
    match &sentence[end + 1..] {
        found if found == expected => Ok(()),
        found => {
            let mut digits = [b' '; 2];
            for (d, &b) in digits.iter_mut().zip(found) {
                *d = b;
            }
            Err(ParseError::InvalidChecksum(checksum, digits))
        }
    }
}

/// Boolean form of [`verify_checksum`](fn.verify_checksum.html).
pub fn test_checksum(sentence: &[u8]) -> bool {
    verify_checksum(sentence).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GGA: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";

    #[test]
    fn hex_digits() {
        assert_eq!(&to_digits(0x47), b"47");
        assert_eq!(&to_digits(0x5f), b"5F");
        assert_eq!(&to_digits(0x0a), b"0A");
    }

    #[test]
    fn generate_skips_dollar() {
        let (with, end) = generate_checksum(GGA);
        let (without, _) = generate_checksum(&GGA[1..]);
        assert_eq!(with, 0x47);
        assert_eq!(with, without);
        assert_eq!(GGA[end], b'*');
    }

    #[test]
    fn valid_sentence() {
        assert!(test_checksum(GGA));
        assert!(test_checksum(b"$GPGLL,4916.45,N,12311.12,W,225444,A,*1D"));
    }

    #[test]
    fn appended_checksum_verifies() {
        let body = b"$PUBX,00,081350.00,4717.113210,N";
        let (checksum, _) = generate_checksum(body);
        let mut sentence = body.to_vec();
        sentence.push(b'*');
        sentence.extend_from_slice(&to_digits(checksum));
        assert!(test_checksum(&sentence));

        for i in 1..body.len() {
            let mut flipped = sentence.clone();
            flipped[i] ^= 0x01;
            assert!(!test_checksum(&flipped), "flip at {} not detected", i);
        }
    }

    #[test]
    fn wrong_digits() {
        let mut s = GGA.to_vec();
        let n = s.len();
        s[n - 1] = b'8';
        assert_matches!(
            verify_checksum(&s),
            Err(ParseError::InvalidChecksum(0x47, [b'4', b'8']))
        );
    }

    #[test]
    fn lowercase_digits_rejected() {
        assert!(test_checksum(b"$GPGLL,4916.45,N,12311.12,W,225444,A,*1D"));
        assert!(!test_checksum(b"$GPGLL,4916.45,N,12311.12,W,225444,A,*1d"));
    }

    #[test]
    fn missing_or_truncated_checksum() {
        assert_matches!(
            verify_checksum(b"$GPGGA,123519"),
            Err(ParseError::MissingChecksum)
        );
        assert_matches!(
            verify_checksum(&GGA[..GGA.len() - 1]),
            Err(ParseError::InvalidChecksum(0x47, [b'4', b' ']))
        );
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut s = GGA.to_vec();
        s.push(b'X');
        assert!(!test_checksum(&s));
    }
}
