/// Largest id handed out; ids are millisecond timestamps.
pub const MAX_ID: u64 = i64::MAX as u64;

/// Hands out record ids derived from the wall clock.
///
/// Ids never repeat: if the clock has not moved past the last id issued,
/// the next id is `last + 1`.
#[derive(Debug, Clone, Default)]
pub struct IdSource {
    last: u64,
}

impl IdSource {
    /// Start issuing ids strictly greater than `last`.
    /// Seeds past `MAX_ID` are clamped to it.
    pub fn starting_after(last: u64) -> Self {
        Self {
            last: last.min(MAX_ID),
        }
    }

    /// `None` once the id range is used up.
    pub fn next_id(&mut self) -> Option<u64> {
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last.checked_add(1)?);
        if id > MAX_ID {
            return None;
        }
        self.last = id;
        Some(id)
    }
}
