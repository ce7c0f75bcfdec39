// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Microsecond clock built from a free-running hardware counter and a software overflow count.
//!
//! The hardware counter wraps every `counter_width` ticks. Each wrap raises an interrupt whose
//! handler calls [`MicrosecondClock::on_overflow`], so the elapsed time is unbounded even though
//! the register is only 8 or 16 bits wide:
//!
//! ```text
//! ticks   = overflows * counter_width + count
//! micros  = ticks * prescaler / clocks_per_microsecond
//! ```
//!
//! This is not the per-tick form `ticks * (prescaler / clocks_per_microsecond)`. Both agree when
//! the prescaler is a multiple of the clocks per microsecond, as for [`crate::config::RANGING_CLOCK`]
//! and [`crate::config::PWM_CLOCK`]. For finer prescalers the per-tick form rounds every tick down
//! (/8 at 16 MHz would count 0 µs per tick); dividing the total last keeps the fraction.
//!
//! Two instances exist on the robot: one times the range finder's echo pulse, the other runs the
//! motor PWM timer. They differ only in [`ClockConfig`].

use portable_atomic::{AtomicU64, Ordering};

/// Hardware timer register access needed by [`MicrosecondClock`].
pub trait TimerCounter {
    /// Begin counting at the configured prescaler.
    fn start(&mut self);

    /// Halt counting, keeping the current count.
    fn stop(&mut self);

    /// Current value of the count register.
    fn count(&self) -> u32;

    /// Zero the count register.
    fn clear(&mut self);
}

/// Timer prescaler and counter width for one clock instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    /// Input clock divider applied before the counter.
    pub prescaler: u32,
    /// Number of counts before the register wraps (256 for 8-bit, 65536 for 16-bit).
    pub counter_width: u32,
    /// Timer input clock in Hz.
    pub clock_hz: u32,
}

impl ClockConfig {
    /// Build a configuration. Invalid values fail at compile time when used in a `const`.
    pub const fn new(prescaler: u32, counter_width: u32, clock_hz: u32) -> Self {
        assert!(prescaler > 0, "prescaler must be non-zero");
        assert!(counter_width > 0, "counter width must be non-zero");
        assert!(clock_hz >= 1_000_000, "timer clock must be at least 1 MHz");
        Self {
            prescaler,
            counter_width,
            clock_hz,
        }
    }

    #[inline]
    pub const fn clocks_per_micro(&self) -> u32 {
        self.clock_hz / 1_000_000
    }

    /// Microseconds per counter tick, rounded down.
    #[inline]
    pub const fn micros_per_tick(&self) -> u32 {
        self.prescaler / self.clocks_per_micro()
    }

    /// Microseconds per full counter wrap, rounded down.
    #[inline]
    pub const fn micros_per_overflow(&self) -> u64 {
        self.prescaler as u64 * self.counter_width as u64 / self.clocks_per_micro() as u64
    }

    /// Convert a raw tick total into microseconds.
    ///
    /// The division happens last so prescalers finer than one microsecond per tick keep their
    /// resolution.
    #[inline]
    pub const fn ticks_to_micros(&self, ticks: u64) -> u64 {
        ticks * self.prescaler as u64 / self.clocks_per_micro() as u64
    }
}

/// Overflow counter shared between the timer interrupt and the main loop.
///
/// Only [`OverflowCounter::increment`] may run in interrupt context. The 64-bit value never
/// saturates in practice.
pub struct OverflowCounter {
    count: AtomicU64,
}

impl OverflowCounter {
    pub const fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn load(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn clear(&self) {
        self.count.store(0, Ordering::Relaxed);
    }
}

impl Default for OverflowCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Elapsed-time clock over a [`TimerCounter`].
pub struct MicrosecondClock<T> {
    timer: T,
    config: ClockConfig,
    overflows: OverflowCounter,
    running: bool,
}

impl<T: TimerCounter> MicrosecondClock<T> {
    /// Wrap a timer. The clock starts stopped and zeroed.
    pub fn new(mut timer: T, config: ClockConfig) -> Self {
        timer.stop();
        timer.clear();
        Self {
            timer,
            config,
            overflows: OverflowCounter::new(),
            running: false,
        }
    }

    #[inline]
    pub fn config(&self) -> ClockConfig {
        self.config
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.timer.start();
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.timer.stop();
        self.running = false;
    }

    /// Stop counting and zero both the overflow count and the count register.
    pub fn reset(&mut self) {
        self.stop();
        self.overflows.clear();
        self.timer.clear();
    }

    /// Called from the timer's overflow interrupt.
    #[inline]
    pub fn on_overflow(&self) {
        self.overflows.increment();
    }

    /// Number of counter wraps since the last reset.
    #[inline]
    pub fn overflows(&self) -> u64 {
        self.overflows.load()
    }

    /// Time counted since the last reset, in microseconds.
    pub fn elapsed_micros(&self) -> u64 {
        let ticks = self.overflows.load() * self.config.counter_width as u64
            + self.timer.count() as u64;
        self.config.ticks_to_micros(ticks)
    }

    /// Consume the clock and return the underlying timer.
    pub fn free(self) -> T {
        self.timer
    }

    #[cfg(test)]
    pub(crate) fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}
