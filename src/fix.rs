//! The navigation fix assembled from decoded sentences.
//!
//! Decoders never touch a [`Fix`](struct.Fix.html) directly. They fill a
//! [`FixUpdate`](struct.FixUpdate.html) with the fields their sentence type
//! carries, which is then committed with [`Fix::merge`](struct.Fix.html#method.merge).

use arrayvec::ArrayVec;
use chrono::{NaiveDate, NaiveTime};

/// Latitude/longitude sentinel, in millionths of a degree.
pub const UNSET_COORDINATE: i32 = 999_000_000;
/// Sentinel for altitude, speed and course.
pub const UNSET_SCALED: i32 = i32::MIN;
/// Sentinel for hour, minute and second.
pub const UNSET_TIME: u8 = 99;
/// Capacity of the navigation status token, e.g. `G3`.
pub const NAV_STATUS_LENGTH: usize = 2;

/// UTC time of day as carried by a time field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub hundredths: u8,
}

/// Calendar date as carried by a `DDMMYY` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcDate {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

/// The fields decoded from one sentence. `None` means the sentence did not
/// carry (or did not get as far as) that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixUpdate {
    pub latitude: Option<i32>,
    pub longitude: Option<i32>,
    pub altitude: Option<i32>,
    pub speed: Option<i32>,
    pub course: Option<i32>,
    pub time: Option<UtcTime>,
    pub date: Option<UtcDate>,
    pub satellites: Option<u8>,
    pub hdop: Option<u16>,
    pub vdop: Option<u16>,
    pub pdop: Option<u16>,
    pub tdop: Option<u16>,
    pub horizontal_accuracy: Option<u32>,
    pub vertical_accuracy: Option<u32>,
    pub valid: Option<bool>,
    pub altitude_valid: Option<bool>,
    pub nav_status: Option<ArrayVec<u8, NAV_STATUS_LENGTH>>,
}

impl FixUpdate {
    /// True if no field was decoded.
    pub fn is_empty(&self) -> bool {
        *self == FixUpdate::default()
    }
}

/// Latest decoded navigation data.
///
/// All decimal quantities are integers scaled by a power of ten; see the
/// individual getters for units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    latitude: i32,
    longitude: i32,
    altitude: i32,
    speed: i32,
    course: i32,
    hour: u8,
    minute: u8,
    second: u8,
    hundredths: u8,
    day: u8,
    month: u8,
    year: u16,
    satellites: u8,
    hdop: u16,
    vdop: u16,
    pdop: u16,
    tdop: u16,
    horizontal_accuracy: u32,
    vertical_accuracy: u32,
    valid: bool,
    altitude_valid: bool,
    nav_status: ArrayVec<u8, NAV_STATUS_LENGTH>,
}

impl Default for Fix {
    fn default() -> Self {
        Fix {
            latitude: UNSET_COORDINATE,
            longitude: UNSET_COORDINATE,
            altitude: UNSET_SCALED,
            speed: UNSET_SCALED,
            course: UNSET_SCALED,
            hour: UNSET_TIME,
            minute: UNSET_TIME,
            second: UNSET_TIME,
            hundredths: 0,
            day: 0,
            month: 0,
            year: 0,
            satellites: 0,
            hdop: 0,
            vdop: 0,
            pdop: 0,
            tdop: 0,
            horizontal_accuracy: 0,
            vertical_accuracy: 0,
            valid: false,
            altitude_valid: false,
            nav_status: ArrayVec::new(),
        }
    }
}

impl Fix {
    pub fn new() -> Self {
        Fix::default()
    }

    /// Resets every field to its "never decoded" sentinel.
    pub fn clear(&mut self) {
        *self = Fix::default();
    }

    /// Commits the decoded fields of `update`. Fields the update does not
    /// carry keep their current value.
    pub fn merge(&mut self, update: &FixUpdate) {
        if let Some(v) = update.latitude {
            self.latitude = v;
        }
        if let Some(v) = update.longitude {
            self.longitude = v;
        }
        if let Some(v) = update.altitude {
            self.altitude = v;
        }
        if let Some(v) = update.speed {
            self.speed = v;
        }
        if let Some(v) = update.course {
            self.course = v;
        }
        if let Some(t) = update.time {
            self.hour = t.hour;
            self.minute = t.minute;
            self.second = t.second;
            self.hundredths = t.hundredths;
        }
        if let Some(d) = update.date {
            self.day = d.day;
            self.month = d.month;
            self.year = d.year;
        }
        if let Some(v) = update.satellites {
            self.satellites = v;
        }
        if let Some(v) = update.hdop {
            self.hdop = v;
        }
        if let Some(v) = update.vdop {
            self.vdop = v;
        }
        if let Some(v) = update.pdop {
            self.pdop = v;
        }
        if let Some(v) = update.tdop {
            self.tdop = v;
        }
        if let Some(v) = update.horizontal_accuracy {
            self.horizontal_accuracy = v;
        }
        if let Some(v) = update.vertical_accuracy {
            self.vertical_accuracy = v;
        }
        if let Some(v) = update.valid {
            self.valid = v;
        }
        if let Some(v) = update.altitude_valid {
            self.altitude_valid = v;
        }
        if let Some(ref v) = update.nav_status {
            self.nav_status = v.clone();
        }
    }

    /// Latitude in millionths of a degree, negative in the southern hemisphere.
    pub fn latitude(&self) -> i32 {
        self.latitude
    }

    /// Longitude in millionths of a degree, negative in the western hemisphere.
    pub fn longitude(&self) -> i32 {
        self.longitude
    }

    /// Altitude in millimetres.
    pub fn altitude(&self) -> i32 {
        self.altitude
    }

    /// Speed over ground in thousandths of the sentence's unit (knots for
    /// RMC, km/h for PUBX).
    pub fn speed(&self) -> i32 {
        self.speed
    }

    /// Course over ground in thousandths of a degree.
    pub fn course(&self) -> i32 {
        self.course
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn hundredths(&self) -> u8 {
        self.hundredths
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// Number of satellites used for the fix.
    pub fn satellites(&self) -> u8 {
        self.satellites
    }

    /// Horizontal dilution of precision in tenths: `11` means 1.1.
    pub fn hdop(&self) -> u16 {
        self.hdop
    }

    /// Vertical dilution of precision in tenths.
    pub fn vdop(&self) -> u16 {
        self.vdop
    }

    /// Position dilution of precision in tenths.
    pub fn pdop(&self) -> u16 {
        self.pdop
    }

    /// Time dilution of precision in tenths.
    pub fn tdop(&self) -> u16 {
        self.tdop
    }

    /// Horizontal accuracy estimate in millimetres.
    pub fn horizontal_accuracy(&self) -> u32 {
        self.horizontal_accuracy
    }

    /// Vertical accuracy estimate in millimetres.
    pub fn vertical_accuracy(&self) -> u32 {
        self.vertical_accuracy
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_altitude_valid(&self) -> bool {
        self.altitude_valid
    }

    /// Navigation status token, e.g. `b"G3"` for a 3D fix.
    pub fn nav_status(&self) -> &[u8] {
        &self.nav_status
    }

    /// Time of day, or `None` while unset or out of range.
    pub fn time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_milli_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
            u32::from(self.hundredths) * 10,
        )
    }

    /// Calendar date, or `None` while unset or out of range.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
    }
}
