//! Lighting periods and hour classification.

/// The lighting classification of an hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Day,
    Night,
    Sunrise,
    Sunset,
}

impl Period {
    /// All periods, in classification priority order (Night is the fallback).
    pub const ALL: [Period; 4] = [Period::Day, Period::Sunrise, Period::Sunset, Period::Night];

    /// Classify an hour in `[0, 24]`.
    ///
    /// Ranges overlap at 6-7 and 17-18. They are checked in a fixed order:
    /// Day `[6, 18]`, then Sunrise `[5, 7]`, then Sunset `[17, 19]`, so the
    /// overlaps resolve to Day. Everything else is Night.
    pub fn classify(hour: f32) -> Self {
        if (6.0..=18.0).contains(&hour) {
            Period::Day
        } else if (5.0..=7.0).contains(&hour) {
            Period::Sunrise
        } else if (17.0..=19.0).contains(&hour) {
            Period::Sunset
        } else {
            Period::Night
        }
    }

    /// Whether this period counts as daytime for Dawn/Dusk signalling.
    pub fn is_day(self) -> bool {
        self == Period::Day
    }

    /// Capitalized display name.
    pub fn label(self) -> &'static str {
        match self {
            Period::Day => "Day",
            Period::Night => "Night",
            Period::Sunrise => "Sunrise",
            Period::Sunset => "Sunset",
        }
    }

    /// HUD text tint for this period, as `0xRRGGBB`.
    pub fn display_color(self) -> u32 {
        match self {
            Period::Day => 0x00ff88,
            Period::Night => 0x4d9de0,
            Period::Sunrise => 0xff6b6b,
            Period::Sunset => 0xffa500,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
