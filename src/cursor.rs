//! Primitives walking the comma-delimited fields of a single sentence.
//!
//! A `FieldCursor` is an index into the sentence body. Every primitive is
//! bounds-checked and never reads past the slice. Primitives that decode a
//! field and then move to the next one report both steps as a [`Field`](enum.Field.html),
//! so a value in the last field of a sentence is not lost.

use arrayvec::ArrayVec;
use std::convert::TryFrom;

use fix::{UtcDate, UtcTime};

/// Bytes terminating the last field of a sentence.
#[inline]
fn is_end_of_field(b: Option<u8>) -> bool {
    match b {
        None | Some(0) | Some(b'\n') | Some(b'\r') | Some(b'*') => true,
        Some(_) => false,
    }
}

#[inline]
fn exp10(exp: u32) -> i64 {
    10i64.saturating_pow(exp)
}

/// Outcome of decoding the field under the cursor and moving past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<T> {
    /// Decoded; the cursor is on the following field.
    Next(T),
    /// Decoded, but the sentence ends after this field.
    Last(T),
    /// The field could not be decoded.
    Invalid,
}

impl<T> Field<T> {
    /// The value, if the cursor moved on to the following field.
    pub fn next(self) -> Option<T> {
        match self {
            Field::Next(v) => Some(v),
            _ => None,
        }
    }

    /// The decoded value, whether or not another field follows.
    pub fn value(self) -> Option<T> {
        match self {
            Field::Next(v) | Field::Last(v) => Some(v),
            Field::Invalid => None,
        }
    }

    pub fn and_then<U, F: FnOnce(T) -> Option<U>>(self, f: F) -> Field<U> {
        match self {
            Field::Next(v) => f(v).map_or(Field::Invalid, Field::Next),
            Field::Last(v) => f(v).map_or(Field::Invalid, Field::Last),
            Field::Invalid => Field::Invalid,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldCursor<'a> {
    /// Creates a cursor at the first byte of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        FieldCursor { buf, pos: 0 }
    }

    /// Current offset into the sentence body.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unconsumed part of the sentence body.
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.buf.get(self.pos + offset).cloned()
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Length of the current field, up to the next comma or end of sentence.
    fn field_len(&self) -> usize {
        self.remaining()
            .iter()
            .take_while(|&&b| b != b',' && !is_end_of_field(Some(b)))
            .count()
    }

    /// Whether the cursor sits on an empty field.
    #[inline]
    pub fn at_empty_field(&self) -> bool {
        self.peek() == Some(b',')
    }

    /// Advances to the first byte of the following field.
    ///
    /// Fails if the sentence ends before a comma, or if the comma is directly
    /// followed by the end of the sentence.
    pub fn skip_field(&mut self) -> Option<()> {
        let mut pos = self.pos;
        while !is_end_of_field(self.buf.get(pos).cloned()) {
            if self.buf[pos] == b',' {
                if is_end_of_field(self.buf.get(pos + 1).cloned()) {
                    return None;
                }
                self.pos = pos + 1;
                return Some(());
            }
            pos += 1;
        }
        None
    }

    /// Interprets exactly `width` bytes at the cursor as base-10 digits.
    ///
    /// The bytes are trusted to be digits; anything else yields a meaningless
    /// number. Does not advance the cursor.
    pub fn parse_unsigned_int(&self, width: usize) -> Option<u32> {
        self.parse_unsigned_int_at(0, width)
    }

    fn parse_unsigned_int_at(&self, offset: usize, width: usize) -> Option<u32> {
        let start = self.pos + offset;
        let digits = self.buf.get(start..start + width)?;
        Some(digits.iter().fold(0u32, |r, &d| {
            r.wrapping_mul(10).wrapping_add(u32::from(d.wrapping_sub(b'0')))
        }))
    }

    /// Tags `value` with whether the cursor could move to the next field.
    fn advance<T>(&mut self, value: T) -> Field<T> {
        match self.skip_field() {
            Some(()) => Field::Next(value),
            None => Field::Last(value),
        }
    }

    /// Decodes a decimal number scaled by `10^scale` and advances to the next
    /// field.
    ///
    /// Leading whitespace and a sign are accepted. Surplus fractional digits
    /// are truncated, missing ones are zero-extended. An empty field decodes
    /// as `0`. A value outside `i32` is `Field::Invalid`.
    pub fn parse_fixed_point(&mut self, scale: u32) -> Field<i32> {
        while self.peek().map_or(false, |b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }

        let neg = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        let mut r: i64 = 0;
        while let Some(d) = self.peek().filter(u8::is_ascii_digit) {
            r = r.saturating_mul(10).saturating_add(i64::from(d - b'0'));
            self.pos += 1;
        }
        r = r.saturating_mul(exp10(scale));

        if self.peek() == Some(b'.') {
            self.pos += 1;
            let mut remaining = scale;
            let mut frac: i64 = 0;
            while remaining > 0 {
                match self.peek().filter(u8::is_ascii_digit) {
                    Some(d) => {
                        frac = frac * 10 + i64::from(d - b'0');
                        self.pos += 1;
                        remaining -= 1;
                    }
                    None => break,
                }
            }
            r = r.saturating_add(frac.saturating_mul(exp10(remaining)));
        }

        if neg {
            r = -r;
        }

        match i32::try_from(r) {
            Ok(v) => self.advance(v),
            Err(_) => Field::Invalid,
        }
    }

    /// Decodes a `degree_digits`-wide whole-degree prefix followed by decimal
    /// minutes, in millionths of a degree. An empty field decodes as `0`.
    pub fn parse_degree_minutes(&mut self, degree_digits: usize) -> Field<i32> {
        if self.at_empty_field() {
            return self.advance(0);
        }
        let degrees = match self.parse_unsigned_int(degree_digits) {
            Some(d) => d as i32,
            None => return Field::Invalid,
        };
        self.pos += degree_digits;
        self.parse_fixed_point(6).and_then(|minutes| {
            degrees.checked_mul(1_000_000)?.checked_add(minutes / 60)
        })
    }

    /// Copies the current field into a buffer of capacity `N`, dropping bytes
    /// beyond the capacity, and moves past the following comma.
    ///
    /// `Field::Last` if the sentence ends before a comma.
    pub fn parse_text<const N: usize>(&mut self) -> Field<ArrayVec<u8, N>> {
        let mut out = ArrayVec::new();
        let len = self.field_len();
        for &b in &self.buf[self.pos..self.pos + len] {
            if out.try_push(b).is_err() {
                break;
            }
        }
        self.pos += len;
        if self.peek() == Some(b',') {
            self.pos += 1;
            Field::Next(out)
        } else {
            Field::Last(out)
        }
    }

    /// Reads a hemisphere field, yielding `true` if it carries `negative`
    /// (`b'S'` or `b'W'`). An empty field is positive.
    pub fn parse_hemisphere(&mut self, negative: u8) -> Field<bool> {
        self.parse_text::<1>()
            .and_then(|letter| Some(letter.first() == Some(&negative)))
    }

    /// Reads a `HHMMSS[.hh]` time field.
    ///
    /// An empty field yields `None`. One fractional digit is zero-extended
    /// to hundredths, further digits are ignored. The separator before the
    /// fraction is not checked.
    pub fn parse_time(&mut self) -> Field<Option<UtcTime>> {
        if self.at_empty_field() {
            return self.advance(None);
        }
        let len = self.field_len();
        if len < 6 {
            return Field::Invalid;
        }
        let frac_digits = len.saturating_sub(7).min(2);
        let hundredths = if frac_digits == 0 {
            0
        } else {
            // in bounds, field_len covers the fraction
            let frac = self.parse_unsigned_int_at(7, frac_digits).unwrap_or(0);
            frac * 10u32.pow(2 - frac_digits as u32)
        };
        let time = match (
            self.parse_unsigned_int_at(0, 2),
            self.parse_unsigned_int_at(2, 2),
            self.parse_unsigned_int_at(4, 2),
        ) {
            (Some(hour), Some(minute), Some(second)) => UtcTime {
                hour: hour as u8,
                minute: minute as u8,
                second: second as u8,
                hundredths: hundredths as u8,
            },
            _ => return Field::Invalid,
        };
        self.advance(Some(time))
    }

    /// Reads a `DDMMYY` date field. The year is always taken as `2000 + YY`.
    ///
    /// An empty field yields `None`.
    pub fn parse_date(&mut self) -> Field<Option<UtcDate>> {
        if self.at_empty_field() {
            return self.advance(None);
        }
        if self.field_len() < 6 {
            return Field::Invalid;
        }
        let date = match (
            self.parse_unsigned_int_at(0, 2),
            self.parse_unsigned_int_at(2, 2),
            self.parse_unsigned_int_at(4, 2),
        ) {
            (Some(day), Some(month), Some(year)) => UtcDate {
                day: day as u8,
                month: month as u8,
                year: (year as u16).wrapping_add(2000),
            },
            _ => return Field::Invalid,
        };
        self.advance(Some(date))
    }
}
