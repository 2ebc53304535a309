use chrono::{Local, Timelike};
use std::fmt;

/// A named time-of-day interval. Each bucket owns one subfolder of the base directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeBucket {
    Forenoon,
    Noon,
    Afternoon,
    Dusk,
    Night,
}

// Exclusive upper bounds in `100 * hour + minute` form, checked in order.
const NIGHT_UNTIL: u32 = 600;
const FORENOON_UNTIL: u32 = 1120;
const NOON_UNTIL: u32 = 1330;
const AFTERNOON_UNTIL: u32 = 1700;
const DUSK_UNTIL: u32 = 1930;

impl TimeBucket {
    /// Every bucket, in the order their folders are validated.
    pub const ALL: [TimeBucket; 5] = [
        TimeBucket::Forenoon,
        TimeBucket::Noon,
        TimeBucket::Afternoon,
        TimeBucket::Dusk,
        TimeBucket::Night,
    ];

    /// Maps a clock value such as `1405` (14:05) to its bucket.
    ///
    /// Every `u32` maps to exactly one bucket; anything at or past 19:30 is night again.
    pub fn from_clock_value(clock_value: u32) -> Self {
        if clock_value < NIGHT_UNTIL {
            TimeBucket::Night
        } else if clock_value < FORENOON_UNTIL {
            TimeBucket::Forenoon
        } else if clock_value < NOON_UNTIL {
            TimeBucket::Noon
        } else if clock_value < AFTERNOON_UNTIL {
            TimeBucket::Afternoon
        } else if clock_value < DUSK_UNTIL {
            TimeBucket::Dusk
        } else {
            TimeBucket::Night
        }
    }

    pub fn from_hour_minute(hour: u32, minute: u32) -> Self {
        Self::from_clock_value(clock_value(hour, minute))
    }

    /// Name of the subfolder under the base directory holding this bucket's images.
    pub const fn folder_name(self) -> &'static str {
        match self {
            TimeBucket::Forenoon => "forenoon",
            TimeBucket::Noon => "noon",
            TimeBucket::Afternoon => "afternoon",
            TimeBucket::Dusk => "dusk",
            TimeBucket::Night => "night",
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder_name())
    }
}

pub fn clock_value(hour: u32, minute: u32) -> u32 {
    100 * hour + minute
}

/// Source of the current wall-clock hour and minute.
pub trait Clock {
    fn hour_minute(&self) -> (u32, u32);
}

/// Local time as reported by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn hour_minute(&self) -> (u32, u32) {
        let now = Local::now();
        (now.hour(), now.minute())
    }
}

/// Always reports the same time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub hour: u32,
    pub minute: u32,
}

impl FixedClock {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }
}

impl Clock for FixedClock {
    fn hour_minute(&self) -> (u32, u32) {
        (self.hour, self.minute)
    }
}
