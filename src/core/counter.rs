use serde::{Deserialize, Serialize};

use crate::error::{WidgetError, WidgetResult};

pub const DEFAULT_COUNTER_DURATION_MS: f64 = 1200.0;

/// Cubic ease-out: `1 - (1 - p)^3` with `p` clamped to `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(progress: f64) -> f64 {
    if progress.is_nan() {
        return 0.0;
    }
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Displayed integer for `target` at `progress`; exactly `target` once `progress >= 1`.
#[must_use]
pub fn eased_value(target: u32, progress: f64) -> u32 {
    if progress >= 1.0 {
        return target;
    }
    let value = (f64::from(target) * ease_out_cubic(progress)).floor();
    // ease_out_cubic stays in [0, 1], so the cast cannot overflow.
    (value as u32).min(target)
}

/// Parses a `data-target` attribute the way the page authors write it: leading
/// whitespace, optional `+`, then decimal digits; trailing text is ignored.
pub fn parse_counter_target(raw: &str) -> WidgetResult<u32> {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('-') {
        return Err(WidgetError::InvalidData(format!(
            "counter target `{raw}` must not be negative"
        )));
    }
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_len = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return Err(WidgetError::InvalidData(format!(
            "counter target `{raw}` is not numeric"
        )));
    }
    unsigned[..digits_len]
        .parse::<u32>()
        .map_err(|e| WidgetError::InvalidData(format!("counter target `{raw}`: {e}")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterPhase {
    Idle,
    Running,
    Done,
}

/// One counter's run from 0 to `target`. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterAnimation {
    target: u32,
    duration_ms: f64,
    phase: CounterPhase,
    started_at_ms: Option<f64>,
    displayed: u32,
}

impl CounterAnimation {
    #[must_use]
    pub fn new(target: u32, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            phase: CounterPhase::Idle,
            started_at_ms: None,
            displayed: 0,
        }
    }

    #[must_use]
    pub fn target(self) -> u32 {
        self.target
    }

    #[must_use]
    pub fn phase(self) -> CounterPhase {
        self.phase
    }

    #[must_use]
    pub fn displayed(self) -> u32 {
        self.displayed
    }

    #[must_use]
    pub fn has_animated(self) -> bool {
        self.phase != CounterPhase::Idle
    }

    /// Idle → Running. Returns `false` for any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != CounterPhase::Idle {
            return false;
        }
        self.phase = CounterPhase::Running;
        true
    }

    /// Advances a running counter to the frame at `now_ms`.
    ///
    /// Elapsed time counts from the first frame after `start`. Returns the value
    /// to display, or `None` when the counter is not running.
    pub fn step(&mut self, now_ms: f64) -> Option<u32> {
        if self.phase != CounterPhase::Running {
            return None;
        }
        let started_at = *self.started_at_ms.get_or_insert(now_ms);
        let elapsed = (now_ms - started_at).max(0.0);
        let progress = if self.duration_ms > 0.0 {
            (elapsed / self.duration_ms).min(1.0)
        } else {
            1.0
        };

        if progress >= 1.0 {
            self.phase = CounterPhase::Done;
            self.displayed = self.target;
        } else {
            self.displayed = eased_value(self.target, progress).max(self.displayed);
        }
        Some(self.displayed)
    }
}

/// Trigger shared by every counter of one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerPhase {
    Armed,
    Fired,
}

/// Counters started together by a one-shot trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterGroup {
    counters: Vec<CounterAnimation>,
    trigger: TriggerPhase,
}

impl CounterGroup {
    #[must_use]
    pub fn new(targets: &[u32], duration_ms: f64) -> Self {
        Self {
            counters: targets
                .iter()
                .map(|&target| CounterAnimation::new(target, duration_ms))
                .collect(),
            trigger: TriggerPhase::Armed,
        }
    }

    #[must_use]
    pub fn counters(&self) -> &[CounterAnimation] {
        &self.counters
    }

    #[must_use]
    pub fn trigger(&self) -> TriggerPhase {
        self.trigger
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.counters
            .iter()
            .any(|counter| counter.phase() == CounterPhase::Running)
    }

    /// Starts every counter the first time it is called; later calls are no-ops.
    pub fn fire(&mut self) -> bool {
        if self.trigger == TriggerPhase::Fired {
            return false;
        }
        self.trigger = TriggerPhase::Fired;
        for counter in &mut self.counters {
            counter.start();
        }
        true
    }

    /// Steps every running counter and returns `(index, value)` updates.
    pub fn step(&mut self, now_ms: f64) -> Vec<(usize, u32)> {
        self.counters
            .iter_mut()
            .enumerate()
            .filter_map(|(index, counter)| counter.step(now_ms).map(|value| (index, value)))
            .collect()
    }
}
