//! The day/night clock.
//!
//! [`TimeSimulation`] owns the in-game hour and day counter. Each
//! [`advance`](TimeSimulation::advance) moves the clock by scaled real time,
//! re-derives the lighting period from the hour, eases lighting toward the
//! period targets, repositions the sun, and reports what happened through an
//! [`EventSink`].

use homestead_config::{DayNightConfig, hex_from_rgb};

use crate::events::{EventSink, TimeEvent};
use crate::lighting::{LightingState, LightingTargets, smoothing_factor};
use crate::period::Period;
use crate::sun::{DirectionalLight, SceneLightingUniform, SunLight};

const HOURS_PER_DAY: f32 = 24.0;
/// Days of `DayRollover` and `HourChanged` events reported by one tick.
const MAX_REPORTED_DAYS: u32 = 1;

/// Continuous time-of-day state driving scene lighting.
#[derive(Debug, Clone)]
pub struct TimeSimulation {
    config: DayNightConfig,
    /// Hours in `[0, 24]`. Reaches 24 only through [`set_time`](Self::set_time).
    current_hour: f32,
    day_number: u32,
    time_scale: f32,
    lighting: LightingState,
    sun: SunLight,
}

impl TimeSimulation {
    /// Start the clock at `config.start_hour` on day 1 with lighting already
    /// at the starting period's targets.
    pub fn new(config: DayNightConfig) -> Self {
        let current_hour = clamp_hour(config.start_hour).unwrap_or(0.0);
        let time_scale = sanitize_scale(config.time_scale);
        let period = Period::classify(current_hour);
        let lighting = LightingState::at(LightingTargets::for_period(period, &config));
        let sun = SunLight::at_hour(current_hour, &config);
        Self {
            config,
            current_hour,
            day_number: 1,
            time_scale,
            lighting,
            sun,
        }
    }

    /// Advance the clock by `delta_secs` of real time.
    ///
    /// Event order within a tick: `DayRollover` for the day entered, then
    /// `Dawn`/`Dusk` if the Day edge was crossed, then one `HourChanged` per
    /// integer hour entered, then `TimeUpdate`. Steps longer than a day
    /// advance the counter fully but report only the final day's events.
    pub fn advance(&mut self, delta_secs: f32, sink: &mut dyn EventSink) {
        let dt = if delta_secs.is_finite() && delta_secs > 0.0 {
            delta_secs
        } else {
            0.0
        };
        let previous_hour = self.current_hour;
        let previous_period = Period::classify(previous_hour);

        let unwrapped = previous_hour + self.hours_for(dt);
        let wraps = (unwrapped / HOURS_PER_DAY).floor() as u32;
        self.current_hour = unwrapped.rem_euclid(HOURS_PER_DAY);
        self.day_number = self.day_number.saturating_add(wraps);
        if wraps > 0 {
            log::debug!("Day {} begins", self.day_number);
            // Only the last day's rollover is reported for huge steps.
            let reported = wraps.min(MAX_REPORTED_DAYS);
            for day_number in (self.day_number - reported + 1)..=self.day_number {
                sink.emit(TimeEvent::DayRollover { day_number });
            }
        }

        let period = self.period();
        let factor = smoothing_factor(self.config.smoothing, dt);
        self.lighting
            .approach(&LightingTargets::for_period(period, &self.config), factor);
        self.sun = SunLight::at_hour(self.current_hour, &self.config);

        if previous_period.is_day() != period.is_day() {
            let hour = self.current_hour;
            if period.is_day() {
                log::debug!("Dawn at {}", self.formatted_time());
                sink.emit(TimeEvent::Dawn { hour });
            } else {
                log::debug!("Dusk at {}", self.formatted_time());
                sink.emit(TimeEvent::Dusk { hour });
            }
        }

        let is_day = period.is_day();
        // A clock parked at 24:00 has not yet entered hour 0.
        let start = if previous_hour >= HOURS_PER_DAY {
            HOURS_PER_DAY as i64 - 1
        } else {
            previous_hour.floor() as i64
        };
        let crossed = unwrapped.floor() as i64 - start;
        // Only the last full day of boundaries is reported for huge steps.
        let first = (crossed - (HOURS_PER_DAY as i64 * MAX_REPORTED_DAYS as i64 - 1)).max(1);
        for k in first..=crossed {
            sink.emit(TimeEvent::HourChanged {
                hour: (start + k).rem_euclid(HOURS_PER_DAY as i64) as u32,
                time: self.current_hour,
                is_day,
            });
        }

        sink.emit(TimeEvent::TimeUpdate {
            hour: self.current_hour,
            day_progress: self.day_progress(),
            is_day,
        });
    }

    /// Set the clock directly, clamped to `[0, 24]`.
    ///
    /// Lighting snaps to the new period's targets and the sun moves at once.
    /// No events are emitted, and the day counter is unchanged.
    pub fn set_time(&mut self, hour: f32) {
        let Some(hour) = clamp_hour(hour) else {
            return;
        };
        self.current_hour = hour;
        self.lighting = LightingState::at(LightingTargets::for_period(self.period(), &self.config));
        self.sun = SunLight::at_hour(self.current_hour, &self.config);
    }

    /// Set the clock multiplier. Negative and non-finite values clamp to 0
    /// (paused).
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = sanitize_scale(scale);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn current_hour(&self) -> f32 {
        self.current_hour
    }

    /// Day counter, starting at 1.
    pub fn day_number(&self) -> u32 {
        self.day_number
    }

    /// Period of the current hour, derived on every call.
    pub fn period(&self) -> Period {
        Period::classify(self.current_hour)
    }

    pub fn period_label(&self) -> &'static str {
        self.period().label()
    }

    pub fn is_day(&self) -> bool {
        self.period().is_day()
    }

    /// Fraction of the day elapsed, `current_hour / 24`.
    pub fn day_progress(&self) -> f32 {
        self.current_hour / HOURS_PER_DAY
    }

    /// Clock as zero-padded 24-hour `HH:MM`.
    pub fn formatted_time(&self) -> String {
        let hours = self.current_hour.floor() as u32;
        let minutes = (self.current_hour.fract() * 60.0).floor() as u32;
        format!("{hours:02}:{minutes:02}")
    }

    pub fn lighting(&self) -> &LightingState {
        &self.lighting
    }

    pub fn sky_color_hex(&self) -> u32 {
        hex_from_rgb(self.lighting.sky_color)
    }

    pub fn sun(&self) -> &SunLight {
        &self.sun
    }

    pub fn directional_light(&self) -> DirectionalLight {
        DirectionalLight::from_sun(&self.sun, self.lighting.directional_intensity)
    }

    pub fn lighting_uniform(&self) -> SceneLightingUniform {
        SceneLightingUniform::new(&self.directional_light(), &self.lighting)
    }

    pub fn config(&self) -> &DayNightConfig {
        &self.config
    }

    /// Swap in new targets and timing. The clock, day counter, time scale and
    /// current lighting values are kept and ease toward the new targets.
    pub fn update_config(&mut self, config: DayNightConfig) {
        self.config = config;
        self.sun = SunLight::at_hour(self.current_hour, &self.config);
    }

    fn hours_for(&self, dt: f32) -> f32 {
        let duration = self.config.day_duration_secs;
        if duration > 0.0 {
            let hours = dt * self.time_scale / duration * HOURS_PER_DAY;
            if hours.is_finite() { hours } else { 0.0 }
        } else {
            0.0
        }
    }
}

fn sanitize_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        0.0
    }
}

fn clamp_hour(hour: f32) -> Option<f32> {
    if hour.is_nan() {
        None
    } else {
        Some(hour.clamp(0.0, HOURS_PER_DAY))
    }
}
