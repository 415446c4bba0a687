//! Measurement attributes.
//!
//! Values that render a rate or a duration at the moment the record is
//! built. All of them serialize as JSON strings.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};

/// Time elapsed since a start instant.
#[derive(Debug, Clone, Copy)]
pub struct Since(pub Instant);

impl Since {
    pub fn now() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

impl fmt::Display for Since {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.elapsed())
    }
}

impl Serialize for Since {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Rate of accumulated events per second since a start instant.
#[derive(Debug, Clone, Copy)]
pub struct PerSecond {
    pub start: Instant,
    pub acc: u64,
}

impl PerSecond {
    pub fn now() -> Self {
        Self { start: Instant::now(), acc: 0 }
    }

    pub fn add(&mut self, n: u64) {
        self.acc += n;
    }

    pub fn rate(&self) -> f64 {
        let secs = self.start.elapsed().as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.acc as f64 / secs
    }
}

impl fmt::Display for PerSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.rate())
    }
}

impl Serialize for PerSecond {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Milliseconds spent per accumulated operation since a start instant.
#[derive(Debug, Clone, Copy)]
pub struct MillisecondOp {
    pub start: Instant,
    pub acc: u64,
}

impl MillisecondOp {
    pub fn now() -> Self {
        Self { start: Instant::now(), acc: 0 }
    }

    pub fn add(&mut self, n: u64) {
        self.acc += n;
    }

    pub fn per_op(&self) -> u128 {
        match self.acc {
            0 => 0,
            acc => self.start.elapsed().as_millis() / u128::from(acc),
        }
    }
}

impl fmt::Display for MillisecondOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.per_op())
    }
}

impl Serialize for MillisecondOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_as_strings() {
        let since = serde_json::to_value(Since::now()).unwrap();
        assert!(since.is_string());

        let mut rate = PerSecond::now();
        rate.add(10);
        let value = serde_json::to_value(rate).unwrap();
        let text = value.as_str().unwrap();
        assert_eq!(text.split('.').nth(1).map(str::len), Some(4));
    }

    #[test]
    fn test_millisecond_op_without_ops() {
        let op = MillisecondOp::now();
        assert_eq!(op.per_op(), 0);
        assert_eq!(op.to_string(), "0");
    }
}
