//! Mock hardware adapter for integration tests.
//!
//! Records every port call so tests can assert on the full command
//! history without touching real GPIO/PWM/UART registers.

use std::collections::VecDeque;

use homesentry::app::events::AppEvent;
use homesentry::app::ports::{DisplayPort, EventSink, PanelPort, SensorPort};
use homesentry::drivers::buzzer::Note;
use homesentry::error::SensorError;

// ── Hardware call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    BeginRanging,
    SetLeds(bool),
    PlayTone(Note, u16),
    BuzzerOff,
    Clear,
    WriteLine(u8, String),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    /// Scripted ranging outcomes, served one per completed poll cycle.
    /// While the queue is empty, an in-flight request stays pending
    /// forever (the mock never times out on its own).
    pub responses: VecDeque<Result<u16, SensorError>>,
    /// Polls an in-flight request stays pending before completing.
    pub response_delay_polls: u32,
    pub fail_begin: bool,
    pending_polls: u32,
    in_flight: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            responses: VecDeque::new(),
            response_delay_polls: 0,
            fail_begin: false,
            pending_polls: 0,
            in_flight: false,
        }
    }

    pub fn queue_reading(&mut self, distance_mm: u16) {
        self.responses.push_back(Ok(distance_mm));
    }

    pub fn queue_fault(&mut self, fault: SensorError) {
        self.responses.push_back(Err(fault));
    }

    pub fn ranging_requests(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == HwCall::BeginRanging)
            .count()
    }

    pub fn leds_on_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == HwCall::SetLeds(true))
            .count()
    }

    pub fn tones(&self) -> Vec<(Note, u16)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::PlayTone(note, ms) => Some((*note, *ms)),
                _ => None,
            })
            .collect()
    }

    /// The lines written since the most recent Clear.
    pub fn visible_lines(&self) -> Vec<(u8, String)> {
        let mut lines = Vec::new();
        for call in &self.calls {
            match call {
                HwCall::Clear => lines.clear(),
                HwCall::WriteLine(row, text) => lines.push((*row, text.clone())),
                _ => {}
            }
        }
        lines
    }

    pub fn displayed(&self, text: &str) -> bool {
        self.visible_lines().iter().any(|(_, line)| line == text)
    }

    pub fn leds_currently_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                HwCall::SetLeds(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for MockHardware {
    fn begin_ranging(&mut self) -> Result<(), SensorError> {
        self.calls.push(HwCall::BeginRanging);
        if self.fail_begin {
            return Err(SensorError::Channel);
        }
        self.in_flight = true;
        self.pending_polls = self.response_delay_polls;
        Ok(())
    }

    fn poll_ranging(&mut self, _elapsed_ms: u32) -> Option<Result<u16, SensorError>> {
        if !self.in_flight || self.responses.is_empty() {
            return None;
        }
        if self.pending_polls > 0 {
            self.pending_polls -= 1;
            return None;
        }
        self.in_flight = false;
        self.responses.pop_front()
    }
}

// ── PanelPort implementation ──────────────────────────────────

impl PanelPort for MockHardware {
    fn set_leds(&mut self, all_on: bool) {
        self.calls.push(HwCall::SetLeds(all_on));
    }

    fn play_tone(&mut self, note: Note, duration_ms: u16) {
        self.calls.push(HwCall::PlayTone(note, duration_ms));
    }

    fn buzzer_off(&mut self) {
        self.calls.push(HwCall::BuzzerOff);
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for MockHardware {
    fn clear(&mut self) {
        self.calls.push(HwCall::Clear);
    }

    fn write_line(&mut self, row: u8, text: &str) {
        self.calls.push(HwCall::WriteLine(row, text.to_string()));
    }
}

// ── Recording event sink ──────────────────────────────────────

pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }

    pub fn count_matching(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
