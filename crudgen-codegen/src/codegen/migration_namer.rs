//! Migration file naming
//!
//! Stamps are compact UTC timestamps (`YYYYMMDDHHMMSS`) read from the clock
//! at call time. Within one namer they are strictly increasing: when the
//! clock has not advanced past the previous stamp, the previous stamp plus
//! one second is used instead, so lexical file order always matches naming
//! order and every stamp is a real calendar time.

use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, Timelike, Utc};

/// Sub-directory of the output directory holding migrations
pub const MIGRATIONS_DIR: &str = "migrations";

const STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

type Clock = Box<dyn FnMut() -> NaiveDateTime>;

/// Hands out monotonically increasing migration file names
pub struct MigrationNamer {
    clock: Clock,
    last: Option<NaiveDateTime>,
}

impl Default for MigrationNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationNamer {
    /// Namer reading the system clock
    pub fn new() -> Self {
        Self::with_clock(|| Utc::now().naive_utc())
    }

    /// Namer reading an arbitrary clock
    pub fn with_clock(clock: impl FnMut() -> NaiveDateTime + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            last: None,
        }
    }

    /// Next stamp, never lower than or equal to a previous one
    pub fn next_stamp(&mut self) -> String {
        let read = (self.clock)();
        // stamps have second resolution
        let now = read.with_nanosecond(0).unwrap_or(read);
        let time = match self.last {
            Some(last) if now <= last => last + chrono::Duration::seconds(1),
            _ => now,
        };
        self.last = Some(time);
        compact_timestamp(&time)
    }

    /// `<output_dir>/migrations/<stamp>-<discriminator>.js`
    pub fn next_path(&mut self, output_dir: &Path, discriminator: &str) -> PathBuf {
        let stamp = self.next_stamp();
        output_dir
            .join(MIGRATIONS_DIR)
            .join(format!("{}-{}.js", stamp, discriminator))
    }
}

/// `2026-10-15T09:04:05` -> `20261015090405`
pub fn compact_timestamp(time: &NaiveDateTime) -> String {
    time.format(STAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn on(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        on(15, h, m, s)
    }

    #[test]
    fn test_compact_timestamp() {
        assert_eq!(compact_timestamp(&at(9, 4, 5)), "20261015090405");
    }

    #[test]
    fn test_frozen_clock_still_increases() {
        let mut namer = MigrationNamer::with_clock(|| at(12, 0, 0));
        assert_eq!(namer.next_stamp(), "20261015120000");
        assert_eq!(namer.next_stamp(), "20261015120001");
        assert_eq!(namer.next_stamp(), "20261015120002");
    }

    #[test]
    fn test_advancing_clock_used_as_is() {
        let mut ticks = vec![at(12, 0, 5), at(12, 0, 0), at(12, 0, 0)].into_iter();
        let mut namer = MigrationNamer::with_clock(move || ticks.next().unwrap_or(at(13, 0, 0)));
        assert_eq!(namer.next_stamp(), "20261015120005");
        // clock went backwards: keep increasing from the last stamp
        assert_eq!(namer.next_stamp(), "20261015120006");
        assert_eq!(namer.next_stamp(), "20261015120007");
        assert_eq!(namer.next_stamp(), "20261015130000");
    }

    #[test]
    fn test_frozen_clock_rolls_over_minute() {
        let mut namer = MigrationNamer::with_clock(|| at(12, 0, 59));
        assert_eq!(namer.next_stamp(), "20261015120059");
        assert_eq!(namer.next_stamp(), "20261015120100");
        assert_eq!(namer.next_stamp(), "20261015120101");
    }

    #[test]
    fn test_frozen_clock_rolls_over_day() {
        let mut namer = MigrationNamer::with_clock(|| on(15, 23, 59, 59));
        assert_eq!(namer.next_stamp(), "20261015235959");
        assert_eq!(namer.next_stamp(), "20261016000000");
    }

    #[test]
    fn test_subsecond_reads_share_a_stamp_slot() {
        let mut ticks = vec![
            at(12, 0, 0).with_nanosecond(100_000_000).unwrap(),
            at(12, 0, 0).with_nanosecond(900_000_000).unwrap(),
        ]
        .into_iter();
        let mut namer = MigrationNamer::with_clock(move || ticks.next().unwrap_or(at(13, 0, 0)));
        assert_eq!(namer.next_stamp(), "20261015120000");
        assert_eq!(namer.next_stamp(), "20261015120001");
    }

    #[test]
    fn test_next_path() {
        let mut namer = MigrationNamer::with_clock(|| at(8, 30, 0));
        let path = namer.next_path(Path::new("/out"), "book");
        assert_eq!(path, PathBuf::from("/out/migrations/20261015083000-book.js"));
        let path = namer.next_path(Path::new("/out"), "z-column-publisherId-to-books");
        assert_eq!(
            path,
            PathBuf::from("/out/migrations/20261015083001-z-column-publisherId-to-books.js")
        );
    }
}
