// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Ultrasonic range finder (HC-SR04 style).
//!
//! A 10 µs pulse on the trigger line starts a burst; the sensor answers with an echo pulse whose
//! width is the sound's round-trip time. The echo line raises an interrupt on *any* edge and the
//! handler calls [`RangeFinder::on_echo_edge`] with the line level: high starts the clock, low
//! stops it.
//!
//! [`RangeFinder::get_distance_cm`] triggers and then reads the clock straight away, so each
//! reading is the echo timed since the previous read. Edges are not debounced; noise or multiple
//! echoes restart or cut short the timing. With no echo at all the clock never starts and the
//! reading is 0.

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::timing::{ClockConfig, MicrosecondClock, TimerCounter};

/// Round-trip centimeters per microsecond of echo (343 m/s, halved).
pub const CM_PER_MICRO: f32 = 0.017;

const TRIGGER_SETTLE_US: u32 = 2;
const TRIGGER_PULSE_US: u32 = 10;

/// Anything producing a distance reading once per tick.
pub trait DistanceSensor {
    type Error: Debug;

    /// Distance to the nearest object in centimeters. 0 means no reading.
    fn distance_cm(&mut self) -> Result<u16, Self::Error>;
}

/// Convert an echo width into a distance, truncating and saturating at `u16::MAX`.
#[inline]
pub fn micros_to_cm(micros: u64) -> u16 {
    (micros as f32 * CM_PER_MICRO) as u16
}

pub struct RangeFinder<T, P, D> {
    clock: MicrosecondClock<T>,
    trigger: P,
    delay: D,
}

impl<T, P, D> RangeFinder<T, P, D>
where
    T: TimerCounter,
    P: OutputPin,
    D: DelayNs,
{
    pub fn new(timer: T, config: ClockConfig, trigger: P, delay: D) -> Self {
        Self {
            clock: MicrosecondClock::new(timer, config),
            trigger,
            delay,
        }
    }

    /// Drive the trigger line low and zero the clock.
    pub fn init(&mut self) -> Result<(), P::Error> {
        self.trigger.set_low()?;
        self.clock.reset();
        Ok(())
    }

    /// Echo line interrupt entry point; `echo_high` is the line level after the edge.
    #[inline]
    pub fn on_echo_edge(&mut self, echo_high: bool) {
        if echo_high {
            self.clock.start();
        } else {
            self.clock.stop();
        }
    }

    /// Timer overflow interrupt entry point.
    #[inline]
    pub fn on_timer_overflow(&self) {
        self.clock.on_overflow();
    }

    /// Fire the trigger, read the echo timed so far, then reset the clock.
    pub fn get_distance_cm(&mut self) -> Result<u16, P::Error> {
        self.send_trigger()?;
        let distance = micros_to_cm(self.clock.elapsed_micros());
        self.clock.reset();
        Ok(distance)
    }

    #[inline]
    pub fn clock(&self) -> &MicrosecondClock<T> {
        &self.clock
    }

    fn send_trigger(&mut self) -> Result<(), P::Error> {
        self.trigger.set_low()?;
        self.delay.delay_us(TRIGGER_SETTLE_US);
        self.trigger.set_high()?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trigger.set_low()
    }
}

impl<T, P, D> DistanceSensor for RangeFinder<T, P, D>
where
    T: TimerCounter,
    P: OutputPin,
    D: DelayNs,
{
    type Error = P::Error;

    fn distance_cm(&mut self) -> Result<u16, P::Error> {
        self.get_distance_cm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RANGING_CLOCK;
    use crate::testutil::{FakeDelay, RecordingPin};
    use crate::timing::clock::tests::FakeTimer;

    type TestFinder = RangeFinder<FakeTimer, RecordingPin, FakeDelay>;

    fn finder() -> TestFinder {
        RangeFinder::new(
            FakeTimer::default(),
            RANGING_CLOCK,
            RecordingPin::default(),
            FakeDelay::default(),
        )
    }

    #[test]
    fn converts_micros_to_cm() {
        assert_eq!(micros_to_cm(1000), 17);
        assert_eq!(micros_to_cm(0), 0);
        assert_eq!(micros_to_cm(1764), 29);
        assert_eq!(micros_to_cm(u64::MAX), u16::MAX);
    }

    #[test]
    fn trigger_pulse_shape() {
        let mut rf = finder();
        rf.init().unwrap();
        rf.trigger.levels.clear();

        rf.get_distance_cm().unwrap();

        assert_eq!(rf.trigger.levels, [false, true, false]);
        assert_eq!(rf.delay.total_ns, 12_000);
    }

    #[test]
    fn echo_edges_gate_the_clock() {
        let mut rf = finder();
        rf.on_echo_edge(true);
        assert!(rf.clock().is_running());
        rf.on_echo_edge(false);
        assert!(!rf.clock().is_running());
    }

    #[test]
    fn reading_resets_the_clock() {
        let mut rf = finder();
        rf.on_echo_edge(true);
        // 250 ticks at 4 µs = 1000 µs.
        rf.clock.timer_mut().count = 250;
        rf.on_echo_edge(false);

        assert_eq!(rf.get_distance_cm().unwrap(), 17);
        assert_eq!(rf.clock().elapsed_micros(), 0);
        assert_eq!(rf.get_distance_cm().unwrap(), 0);
    }

    #[test]
    fn long_echo_spans_overflows() {
        let mut rf = finder();
        rf.on_echo_edge(true);
        rf.on_timer_overflow();
        rf.on_echo_edge(false);
        // 65536 ticks * 4 µs = 262144 µs -> 4456 cm.
        assert_eq!(rf.distance_cm().unwrap(), 4456);
    }

    #[test]
    fn spurious_edge_restarts_timing() {
        let mut rf = finder();
        rf.on_echo_edge(true);
        rf.on_echo_edge(false);
        rf.on_echo_edge(true);
        assert!(rf.clock().is_running());
        assert_eq!(rf.clock.timer_mut().starts, 2);
    }
}
