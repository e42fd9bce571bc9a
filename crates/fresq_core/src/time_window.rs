use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Serialize, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    start: Timestamp,
    end: Timestamp,
}

impl TimeWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        TimeWindow { start, end }
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Whole minutes left before the window closes. Negative once the
    /// window has already closed.
    pub fn minutes_until_close(&self, now: Timestamp) -> i64 {
        (self.end.as_second() - now.as_second()) / 60
    }
}

#[derive(Default)]
pub struct TimeWindowBuilder {
    start: Option<Timestamp>,
    end: Option<Timestamp>,
}

impl TimeWindowBuilder {
    pub fn with_start(mut self, start: Timestamp) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_iso_start(mut self, start: &str) -> Self {
        self.start = Some(start.parse().expect("Error parsing ISO"));
        self
    }

    pub fn with_end(mut self, end: Timestamp) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_iso_end(mut self, end: &str) -> Self {
        self.end = Some(end.parse().expect("Error parsing ISO"));
        self
    }

    pub fn build(self) -> TimeWindow {
        TimeWindow {
            start: self.start.expect("time window requires a start"),
            end: self.end.expect("time window requires an end"),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_builder() {
        let start: Timestamp = "2026-08-29T08:00:00+05:30".parse().unwrap();
        let end: Timestamp = "2026-08-29T12:00:00+05:30".parse().unwrap();
        let time_window = TimeWindowBuilder::default()
            .with_start(start)
            .with_end(end)
            .build();

        assert_eq!(time_window.start(), start);
        assert_eq!(time_window.end(), end);
    }

    #[test]
    fn test_minutes_until_close() {
        let time_window = TimeWindowBuilder::default()
            .with_iso_start("2026-08-29T08:00:00+05:30")
            .with_iso_end("2026-08-29T12:00:00+05:30")
            .build();

        let now: Timestamp = "2026-08-29T10:00:00+05:30".parse().unwrap();
        assert_eq!(time_window.minutes_until_close(now), 120);

        let late: Timestamp = "2026-08-29T13:00:00+05:30".parse().unwrap();
        assert!(time_window.minutes_until_close(late) < 0);
    }
}
