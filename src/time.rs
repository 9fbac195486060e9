use chrono::{DateTime, FixedOffset, Local};

/// Wall clock of one log call, in local time with its offset preserved.
pub struct Timer(DateTime<FixedOffset>);

impl std::ops::Deref for Timer {
    type Target = DateTime<FixedOffset>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Timer {
    pub(crate) fn new() -> Self {
        return Self(Local::now().fixed_offset());
    }

    #[inline]
    pub(crate) fn get(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
