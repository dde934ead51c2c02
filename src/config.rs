//! Encoder configuration

use crate::error::{ExcelError, Result};
use chrono::{DateTime, Local, NaiveDateTime};

/// Environment variable pinning the archive timestamp (seconds since the Unix epoch, UTC)
pub const SOURCE_DATE_EPOCH: &str = "SOURCE_DATE_EPOCH";

/// Options controlling a single encode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Modification time stamped on every ZIP entry. `None` means "now" in local time.
    pub modified: Option<NaiveDateTime>,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the entry timestamp, making output byte-for-byte reproducible
    pub fn with_modified(mut self, modified: NaiveDateTime) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Read options from the environment
    ///
    /// `SOURCE_DATE_EPOCH` fixes the timestamp. Unset means "now".
    pub fn from_env() -> Result<Self> {
        match std::env::var(SOURCE_DATE_EPOCH) {
            Ok(raw) => Self::from_epoch_str(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    fn from_epoch_str(raw: &str) -> Result<Self> {
        let secs: i64 = raw.trim().parse().map_err(|_| {
            ExcelError::InvalidInput(format!("{SOURCE_DATE_EPOCH} is not an integer: '{raw}'"))
        })?;
        let modified = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| {
                ExcelError::InvalidInput(format!("{SOURCE_DATE_EPOCH} out of range: {secs}"))
            })?
            .naive_utc();
        Ok(Self::new().with_modified(modified))
    }

    /// Timestamp to use for this encode
    pub(crate) fn resolve_modified(&self) -> NaiveDateTime {
        self.modified.unwrap_or_else(|| Local::now().naive_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_epoch_parsing() {
        let opts = EncodeOptions::from_epoch_str("1700000000").unwrap();
        let expected = NaiveDate::from_ymd_opt(2023, 11, 14)
            .unwrap()
            .and_hms_opt(22, 13, 20)
            .unwrap();
        assert_eq!(opts.modified, Some(expected));
    }

    #[test]
    fn test_epoch_rejects_garbage() {
        let err = EncodeOptions::from_epoch_str("yesterday").unwrap_err();
        assert!(matches!(err, ExcelError::InvalidInput(_)));
    }

    #[test]
    fn test_pinned_timestamp_wins() {
        let fixed = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        assert_eq!(
            EncodeOptions::new().with_modified(fixed).resolve_modified(),
            fixed
        );
    }
}
