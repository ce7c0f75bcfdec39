//! Shared fakes for unit tests.

use core::convert::Infallible;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Delay that only accumulates the requested time.
#[derive(Default)]
pub struct FakeDelay {
    pub total_ns: u64,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

/// Output pin recording every level written, `true` = high.
#[derive(Default)]
pub struct RecordingPin {
    pub levels: Vec<bool>,
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.levels.push(true);
        Ok(())
    }
}

/// Input pin replaying a script of levels; the last level repeats.
pub struct ScriptedPin {
    levels: Vec<bool>,
    next: usize,
}

impl ScriptedPin {
    pub fn new(levels: &[bool]) -> Self {
        Self {
            levels: levels.to_vec(),
            next: 0,
        }
    }

    fn sample(&mut self) -> bool {
        let level = self.levels[self.next.min(self.levels.len() - 1)];
        self.next += 1;
        level
    }
}

impl ErrorType for ScriptedPin {
    type Error = Infallible;
}

impl InputPin for ScriptedPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.sample())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.sample())
    }
}
