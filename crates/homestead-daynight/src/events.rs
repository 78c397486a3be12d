//! Time events raised by the simulation and the sinks that collect them.

/// A discrete event raised while the clock advances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeEvent {
    /// The clock wrapped past 24:00. `day_number` is the new day.
    DayRollover { day_number: u32 },
    /// The clock entered the Day period.
    Dawn { hour: f32 },
    /// The clock left the Day period.
    Dusk { hour: f32 },
    /// An integer hour boundary was crossed. `hour` is the hour entered,
    /// `time` the clock value after the tick.
    HourChanged { hour: u32, time: f32, is_day: bool },
    /// Emitted at the end of every tick.
    TimeUpdate {
        hour: f32,
        day_progress: f32,
        is_day: bool,
    },
}

/// Receiver for [`TimeEvent`]s.
pub trait EventSink {
    fn emit(&mut self, event: TimeEvent);
}

impl EventSink for Vec<TimeEvent> {
    fn emit(&mut self, event: TimeEvent) {
        self.push(event);
    }
}

/// Buffered sink drained once per frame by consumers.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<TimeEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all pending events in emission order.
    pub fn drain(&mut self) -> impl Iterator<Item = TimeEvent> + '_ {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl EventSink for EventQueue {
    fn emit(&mut self, event: TimeEvent) {
        self.pending.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drains_in_order() {
        let mut queue = EventQueue::new();
        queue.emit(TimeEvent::Dawn { hour: 6.0 });
        queue.emit(TimeEvent::DayRollover { day_number: 2 });
        assert_eq!(queue.len(), 2);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained[0], TimeEvent::Dawn { hour: 6.0 });
        assert_eq!(drained[1], TimeEvent::DayRollover { day_number: 2 });
        assert!(queue.is_empty());
    }
}
