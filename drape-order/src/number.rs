use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use serde::{Deserialize, Serialize};
use chrono::Utc;

/// Customer-facing order reference, `ORD-<epoch millis>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub fn from_token(token: i64) -> Self {
        Self(format!("ORD-{}", token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Millisecond-clock order numbers that never repeat within one process.
///
/// Two orders in the same millisecond get consecutive tokens instead of equal ones.
#[derive(Debug, Default)]
pub struct OrderNumberGenerator {
    last: AtomicI64,
}

impl OrderNumberGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> OrderNumber {
        self.next_at(Utc::now().timestamp_millis())
    }

    fn next_at(&self, now_millis: i64) -> OrderNumber {
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_millis.max(last + 1);
            match self.last.compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed) {
                Ok(_) => return OrderNumber::from_token(candidate),
                Err(current) => last = current,
            }
        }
    }
}
