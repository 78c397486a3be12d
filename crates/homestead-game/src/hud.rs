//! Clock HUD: formatted time plus a tinted period label.
//!
//! Refreshed from the day/night clock whenever it reports a time update, an
//! hour change, or a new day.

use homestead_daynight::{Period, TimeEvent, TimeSimulation};

/// HUD text and tint shown each frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudState {
    /// Clock reading, `"HH:MM"`.
    pub time_text: String,
    /// Upper-case period name, e.g. `"SUNRISE"`.
    pub period_text: String,
    /// Period label color, `0xRRGGBB`.
    pub tint: u32,
    pub day_number: u32,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            time_text: "00:00".to_string(),
            period_text: "DAY".to_string(),
            tint: Period::Day.display_color(),
            day_number: 1,
        }
    }
}

impl HudState {
    pub fn refresh(&mut self, sim: &TimeSimulation) {
        let period = sim.period();
        self.time_text = sim.formatted_time();
        self.period_text = period.label().to_uppercase();
        self.tint = period.display_color();
        self.day_number = sim.day_number();
    }

    /// Refresh if `event` is one the HUD listens to. Returns whether it did.
    pub fn handle_event(&mut self, event: &TimeEvent, sim: &TimeSimulation) -> bool {
        match event {
            TimeEvent::TimeUpdate { .. }
            | TimeEvent::HourChanged { .. }
            | TimeEvent::DayRollover { .. } => {
                self.refresh(sim);
                true
            }
            TimeEvent::Dawn { .. } | TimeEvent::Dusk { .. } => false,
        }
    }
}

/// One-line HUD summary, e.g. `06:00 | DAY | Day 1`.
pub fn format_hud(hud: &HudState) -> String {
    format!(
        "{} | {} | Day {}",
        hud.time_text, hud.period_text, hud.day_number
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use homestead_config::DayNightConfig;

    fn sim_at(hour: f32) -> TimeSimulation {
        let mut sim = TimeSimulation::new(DayNightConfig::default());
        sim.set_time(hour);
        sim
    }

    #[test]
    fn test_refresh_reads_clock() {
        let mut hud = HudState::default();
        hud.refresh(&sim_at(5.5));
        assert_eq!(hud.time_text, "05:30");
        assert_eq!(hud.period_text, "SUNRISE");
        assert_eq!(hud.tint, 0xff6b6b);
    }

    #[test]
    fn test_period_tints() {
        let mut hud = HudState::default();
        for (hour, label, tint) in [
            (12.0, "DAY", 0x00ff88),
            (2.0, "NIGHT", 0x4d9de0),
            (18.5, "SUNSET", 0xffa500),
        ] {
            hud.refresh(&sim_at(hour));
            assert_eq!(hud.period_text, label);
            assert_eq!(hud.tint, tint);
        }
    }

    #[test]
    fn test_only_clock_events_refresh() {
        let sim = sim_at(12.0);
        let mut hud = HudState::default();
        assert!(!hud.handle_event(&TimeEvent::Dawn { hour: 6.0 }, &sim));
        assert_eq!(hud.time_text, "00:00");
        assert!(hud.handle_event(&TimeEvent::DayRollover { day_number: 2 }, &sim));
        assert_eq!(hud.time_text, "12:00");
    }

    #[test]
    fn test_format_hud_output() {
        let hud = HudState {
            time_text: "06:00".into(),
            period_text: "DAY".into(),
            tint: 0x00ff88,
            day_number: 3,
        };
        assert_eq!(format_hud(&hud), "06:00 | DAY | Day 3");
    }
}
