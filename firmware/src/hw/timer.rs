// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Free-running up-counter on TIM3 for echo timing.
//!
//! The counter runs from the 16 MHz timer clock through the prescaler in
//! [`redbot::config::RANGING_CLOCK`] and wraps at the configured width, raising the TIM3 update
//! interrupt on every wrap.

use redbot::timing::{ClockConfig, TimerCounter};
use stm32f7xx_hal::pac;

pub struct CounterTimer {
    tim: pac::TIM3,
}

impl CounterTimer {
    /// Configure TIM3 as a stopped up-counter with the update interrupt enabled.
    pub fn tim3(tim3: pac::TIM3, config: ClockConfig) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim3en().set_bit());

        let tim = tim3;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.psc.write(|w| w.psc().bits((config.prescaler - 1) as u16));
        tim.arr.write(|w| unsafe { w.bits(config.counter_width - 1) });

        // Load the prescaler now, without reporting it as an overflow
        tim.cr1.modify(|_, w| w.urs().set_bit());
        tim.egr.write(|w| w.ug().set_bit());
        tim.sr.modify(|_, w| w.uif().clear_bit());

        tim.cnt.write(|w| unsafe { w.bits(0) });
        tim.dier.modify(|_, w| w.uie().set_bit());

        Self { tim }
    }

    /// Acknowledge the update interrupt. Called from the TIM3 handler.
    #[inline]
    pub fn clear_overflow_flag() {
        let tim = unsafe { &*pac::TIM3::ptr() };
        tim.sr.modify(|_, w| w.uif().clear_bit());
    }

    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> pac::TIM3 {
        self.tim
    }
}

impl TimerCounter for CounterTimer {
    #[inline]
    fn start(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().set_bit());
    }

    #[inline]
    fn stop(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().clear_bit());
    }

    #[inline]
    fn count(&self) -> u32 {
        self.tim.cnt.read().cnt().bits() as u32
    }

    #[inline]
    fn clear(&mut self) {
        self.tim.cnt.write(|w| unsafe { w.bits(0) });
    }
}
