use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct StartedAt(OffsetDateTime);

impl StartedAt {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct EndedAt(OffsetDateTime);

impl EndedAt {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }

    /// Whole minutes elapsed since `started_at`, truncated toward zero.
    pub fn minutes_since(&self, started_at: &StartedAt) -> i64 {
        (self.0 - started_at.0).whole_minutes()
    }
}
