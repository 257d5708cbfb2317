//! Identification and field decoding of the supported sentence types.
//!
//! Every decoder starts at the first field after the identifier and consumes
//! a fixed sequence of fields into a [`FixUpdate`](../fix/struct.FixUpdate.html).
//! Decoding stops at the first field that cannot be consumed. Whatever was
//! decoded before that point stays in the update, including a value read
//! from a last field the sentence ended on early.

use arrayvec::ArrayVec;

use cursor::FieldCursor;
use err::ParseError;
use fix::FixUpdate;

/// Maximum length of the identifier token following `$`.
pub const IDENTIFIER_LENGTH: usize = 6;
/// The identifier token, e.g. `GPGGA`.
pub type Identifier = ArrayVec<u8, IDENTIFIER_LENGTH>;
/// Identifier of the u-blox proprietary sentence.
pub const PUBX_IDENTIFIER: &[u8] = b"PUBX";
/// PUBX sub-id of the position message.
pub const PUBX_POSITION: u32 = 0;

const LAT_DEGREE_DIGITS: usize = 2;
const LONG_DEGREE_DIGITS: usize = 3;
const GSA_SATELLITE_SLOTS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceKind {
    /// `PUBX,00`, u-blox position data.
    Pubx,
    /// Global positioning system fix data.
    Gga,
    /// Recommended minimum data.
    Rmc,
    /// Geographic position.
    Gll,
    /// GNSS fix data.
    Gns,
    /// DOP and active satellites.
    Gsa,
}

impl SentenceKind {
    /// Maps an identifier token to a sentence type. Standard sentences are
    /// matched on their type regardless of the two-letter talker id.
    pub fn from_identifier(identifier: &[u8]) -> Option<Self> {
        if identifier == PUBX_IDENTIFIER {
            return Some(SentenceKind::Pubx);
        }
        if identifier.len() != 5 {
            return None;
        }
        match &identifier[2..] {
            b"GGA" => Some(SentenceKind::Gga),
            b"RMC" => Some(SentenceKind::Rmc),
            b"GLL" => Some(SentenceKind::Gll),
            b"GNS" => Some(SentenceKind::Gns),
            b"GSA" => Some(SentenceKind::Gsa),
            _ => None,
        }
    }

    #[inline]
    pub fn is_vendor(self) -> bool {
        self == SentenceKind::Pubx
    }
}

/// Reads the identifier token at `cursor`, which must sit right after `$`,
/// and leaves the cursor on the first data field.
pub fn identify(cursor: &mut FieldCursor) -> Result<SentenceKind, ParseError> {
    let identifier: Identifier = expect!(cursor.parse_text().next(), "identifier");
    SentenceKind::from_identifier(&identifier).ok_or(ParseError::UnknownSentence(identifier))
}

/// Runs the decoder for `kind`.
pub fn decode(
    kind: SentenceKind,
    cursor: &mut FieldCursor,
    update: &mut FixUpdate,
) -> Result<(), ParseError> {
    match kind {
        SentenceKind::Pubx => decode_pubx(cursor, update),
        SentenceKind::Gga => decode_gga(cursor, update),
        SentenceKind::Rmc => decode_rmc(cursor, update),
        SentenceKind::Gll => decode_gll(cursor, update),
        SentenceKind::Gns => decode_gns(cursor, update),
        SentenceKind::Gsa => decode_gsa(cursor, update),
    }
}

/// Decodes a complete sentence whose type the caller already knows.
///
/// The identifier is skipped without being checked against `kind`, and the
/// checksum is not verified.
pub fn decode_sentence(
    kind: SentenceKind,
    sentence: &[u8],
    update: &mut FixUpdate,
) -> Result<(), ParseError> {
    let body = match sentence.first() {
        Some(&b'$') => &sentence[1..],
        _ => sentence,
    };
    let mut cursor = FieldCursor::new(body);
    let _: Identifier = expect!(cursor.parse_text().next(), "identifier");
    decode(kind, &mut cursor, update)
}

/// Latitude and longitude, each followed by its hemisphere field.
fn decode_position(c: &mut FieldCursor, u: &mut FixUpdate) -> Result<(), ParseError> {
    field!(c.parse_degree_minutes(LAT_DEGREE_DIGITS), "latitude", |lat| u.latitude = Some(lat));
    field!(c.parse_hemisphere(b'S'), "latitude hemisphere", |south| if south {
        u.latitude = u.latitude.map(|lat| -lat)
    });

    field!(c.parse_degree_minutes(LONG_DEGREE_DIGITS), "longitude", |long| u.longitude = Some(long));
    field!(c.parse_hemisphere(b'W'), "longitude hemisphere", |west| if west {
        u.longitude = u.longitude.map(|long| -long)
    });
    Ok(())
}

/// Altitude in millimetres, flagged valid once the field has been consumed.
fn decode_altitude(c: &mut FieldCursor, u: &mut FixUpdate) -> Result<(), ParseError> {
    field!(c.parse_fixed_point(3), "altitude", |alt| u.altitude = Some(alt));
    u.altitude_valid = Some(true);
    Ok(())
}

/// `$PUBX,00`: time, position, altitude, status, accuracies, velocity,
/// dilutions of precision and the number of satellites used.
pub fn decode_pubx(c: &mut FieldCursor, u: &mut FixUpdate) -> Result<(), ParseError> {
    let sub_id = expect!(c.parse_unsigned_int(2), "message id");
    if sub_id != PUBX_POSITION {
        return Err(ParseError::UnsupportedPubx(sub_id));
    }
    expect!(c.skip_field(), "message id");

    field!(c.parse_time(), "time", |t| u.time = t);
    decode_position(c, u)?;
    field!(c.parse_fixed_point(3), "altitude", |alt| u.altitude = Some(alt));
    field!(c.parse_text(), "navigation status", |s| u.nav_status = Some(s));
    field!(c.parse_fixed_point(3), "horizontal accuracy", |v| {
        u.horizontal_accuracy = Some(narrow!(v, u32, "horizontal accuracy"))
    });
    field!(c.parse_fixed_point(3), "vertical accuracy", |v| {
        u.vertical_accuracy = Some(narrow!(v, u32, "vertical accuracy"))
    });
    field!(c.parse_fixed_point(3), "speed", |v| u.speed = Some(v));
    field!(c.parse_fixed_point(3), "course", |v| u.course = Some(v));

    // vertical velocity, age of corrections
    expect!(c.skip_field(), "vertical velocity");
    expect!(c.skip_field(), "age of corrections");

    field!(c.parse_fixed_point(1), "hdop", |v| u.hdop = Some(narrow!(v, u16, "hdop")));
    field!(c.parse_fixed_point(1), "vdop", |v| u.vdop = Some(narrow!(v, u16, "vdop")));
    field!(c.parse_fixed_point(1), "tdop", |v| u.tdop = Some(narrow!(v, u16, "tdop")));
    field!(c.parse_fixed_point(0), "satellites", |v| {
        u.satellites = Some(narrow!(v, u8, "satellites"))
    });
    Ok(())
}

pub fn decode_gga(c: &mut FieldCursor, u: &mut FixUpdate) -> Result<(), ParseError> {
    field!(c.parse_time(), "time", |t| u.time = t);
    decode_position(c, u)?;

    field!(c.parse_text::<1>(), "fix quality", |quality| {
        u.valid = Some(quality.first().map_or(false, |q| (b'1'..=b'5').contains(q)))
    });

    field!(c.parse_fixed_point(0), "satellites", |v| {
        u.satellites = Some(narrow!(v, u8, "satellites"))
    });
    field!(c.parse_fixed_point(1), "hdop", |v| u.hdop = Some(narrow!(v, u16, "hdop")));
    decode_altitude(c, u)
}

pub fn decode_rmc(c: &mut FieldCursor, u: &mut FixUpdate) -> Result<(), ParseError> {
    field!(c.parse_time(), "time", |t| u.time = t);

    field!(c.parse_text::<1>(), "status", |status| {
        u.valid = Some(status.first() == Some(&b'A'))
    });

    decode_position(c, u)?;
    field!(c.parse_fixed_point(3), "speed", |v| u.speed = Some(v));
    field!(c.parse_fixed_point(3), "course", |v| u.course = Some(v));
    field!(c.parse_date(), "date", |d| u.date = d);
    Ok(())
}

pub fn decode_gll(c: &mut FieldCursor, u: &mut FixUpdate) -> Result<(), ParseError> {
    decode_position(c, u)?;
    field!(c.parse_time(), "time", |t| u.time = t);
    Ok(())
}

pub fn decode_gns(c: &mut FieldCursor, u: &mut FixUpdate) -> Result<(), ParseError> {
    field!(c.parse_time(), "time", |t| u.time = t);
    decode_position(c, u)?;
    expect!(c.skip_field(), "mode");
    field!(c.parse_fixed_point(0), "satellites", |v| {
        u.satellites = Some(narrow!(v, u8, "satellites"))
    });
    field!(c.parse_fixed_point(1), "hdop", |v| u.hdop = Some(narrow!(v, u16, "hdop")));
    decode_altitude(c, u)
}

/// Only the dilutions of precision are kept; the satellite ids are skipped.
pub fn decode_gsa(c: &mut FieldCursor, u: &mut FixUpdate) -> Result<(), ParseError> {
    expect!(c.skip_field(), "selection mode");
    expect!(c.skip_field(), "fix mode");
    for _ in 0..GSA_SATELLITE_SLOTS {
        expect!(c.skip_field(), "satellite id");
    }
    field!(c.parse_fixed_point(1), "pdop", |v| u.pdop = Some(narrow!(v, u16, "pdop")));
    field!(c.parse_fixed_point(1), "hdop", |v| u.hdop = Some(narrow!(v, u16, "hdop")));
    field!(c.parse_fixed_point(1), "vdop", |v| u.vdop = Some(narrow!(v, u16, "vdop")));
    Ok(())
}
