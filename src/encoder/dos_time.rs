//! MS-DOS packed date/time used in ZIP local and central headers

use chrono::{Datelike, NaiveDateTime, Timelike};

/// First year representable in the 7-bit DOS year field
const DOS_EPOCH_YEAR: i32 = 1980;
/// Last year representable in the 7-bit DOS year field
const DOS_MAX_YEAR: i32 = DOS_EPOCH_YEAR + 127;

/// Packed `(date, time)` pair as stored in ZIP headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZipDateTime {
    pub date: u16,
    pub time: u16,
}

impl ZipDateTime {
    /// Pack a calendar timestamp. Years outside 1980..=2107 are clamped.
    pub fn from_datetime(dt: &NaiveDateTime) -> Self {
        let year = dt.year().clamp(DOS_EPOCH_YEAR, DOS_MAX_YEAR) - DOS_EPOCH_YEAR;
        // All components are range-bounded by chrono, so the casts cannot truncate
        let date = ((year as u16) << 9) | ((dt.month() as u16) << 5) | dt.day() as u16;
        let time =
            ((dt.hour() as u16) << 11) | ((dt.minute() as u16) << 5) | (dt.second() / 2) as u16;
        ZipDateTime { date, time }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_packing() {
        let packed = ZipDateTime::from_datetime(&at(2024, 5, 17, 13, 45, 31));
        assert_eq!(packed.date, (44 << 9) | (5 << 5) | 17);
        assert_eq!(packed.time, (13 << 11) | (45 << 5) | 15);
    }

    #[test]
    fn test_dos_epoch() {
        let packed = ZipDateTime::from_datetime(&at(1980, 1, 1, 0, 0, 0));
        assert_eq!(packed, ZipDateTime { date: 0x0021, time: 0 });
    }

    #[test]
    fn test_year_clamping() {
        let early = ZipDateTime::from_datetime(&at(1970, 6, 2, 0, 0, 0));
        assert_eq!(early.date >> 9, 0);
        assert_eq!((early.date >> 5) & 0x0F, 6);

        let late = ZipDateTime::from_datetime(&at(2200, 1, 1, 0, 0, 0));
        assert_eq!(late.date >> 9, 127);
    }

    #[test]
    fn test_end_of_day() {
        let packed = ZipDateTime::from_datetime(&at(2023, 12, 31, 23, 59, 59));
        assert_eq!(packed.time, (23 << 11) | (59 << 5) | 29);
        assert_eq!(packed.date & 0x1F, 31);
    }
}
