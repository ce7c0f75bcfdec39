// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! 8-bit dual-channel PWM on TIM4.
//!
//! CH1 (PD12) drives the left motor enable, CH2 (PD13) the right. Prescaler and period come from
//! [`redbot::config::PWM_CLOCK`]: 16 MHz / 1024 / 256 ≈ 61 Hz, which also makes the motors audible
//! for the startup jingle.

use redbot::protocol::Motor;
use redbot::timing::ClockConfig;
use stm32f7xx_hal::pac;

pub struct DualPwm {
    tim: pac::TIM4,
}

impl DualPwm {
    /// Configure TIM4 CH1/CH2 in PWM mode 1 with zero duty and start the counter.
    pub fn tim4(tim4: pac::TIM4, config: ClockConfig) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

        let tim = tim4;

        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.psc.write(|w| w.psc().bits((config.prescaler - 1) as u16));
        tim.arr.write(|w| unsafe { w.bits(config.counter_width - 1) });

        // PWM mode 1 with preload on both channels
        tim.ccmr1_output().modify(|_, w| {
            w.oc1m().pwm_mode1().oc1pe().set_bit();
            w.oc2m().pwm_mode1().oc2pe().set_bit()
        });

        tim.ccr1.write(|w| unsafe { w.bits(0) });
        tim.ccr2.write(|w| unsafe { w.bits(0) });

        tim.ccer.modify(|_, w| w.cc1e().set_bit().cc2e().set_bit());

        // Auto-reload preload, then latch everything
        tim.cr1.modify(|_, w| w.arpe().set_bit());
        tim.egr.write(|w| w.ug().set_bit());

        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    /// Set one channel's duty, 0 = off, 255 = full.
    #[inline]
    pub fn set_duty(&mut self, motor: Motor, duty: u8) {
        match motor {
            Motor::Left => self.tim.ccr1.write(|w| unsafe { w.bits(duty as u32) }),
            Motor::Right => self.tim.ccr2.write(|w| unsafe { w.bits(duty as u32) }),
        }
    }

    #[inline]
    pub fn free(self) -> pac::TIM4 {
        self.tim
    }
}
