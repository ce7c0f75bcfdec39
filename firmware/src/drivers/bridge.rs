// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Dual H-bridge (L298N-style) behind [`MotorActuator`].
//!
//! Each channel has a forward/reverse input pair and a PWM enable. Both inputs low lets the motor
//! coast; both high is never driven.

use core::convert::Infallible;

use redbot::motors::{Gear, MotorActuator};
use redbot::protocol::Motor;
use stm32f7xx_hal::gpio::{self, Output, PushPull};

use crate::hw::DualPwm;

/// One direction input pair.
pub struct DirectionPair<const P: char, const F: u8, const R: u8> {
    fwd: gpio::Pin<P, F, Output<PushPull>>,
    rev: gpio::Pin<P, R, Output<PushPull>>,
}

impl<const P: char, const F: u8, const R: u8> DirectionPair<P, F, R> {
    pub fn new(fwd: gpio::Pin<P, F, Output<PushPull>>, rev: gpio::Pin<P, R, Output<PushPull>>) -> Self {
        let mut pair = Self { fwd, rev };
        pair.set(Gear::Neutral);
        pair
    }

    pub fn set(&mut self, gear: Gear) {
        match gear {
            Gear::Forward => {
                self.rev.set_low();
                self.fwd.set_high();
            }
            Gear::Reverse => {
                self.fwd.set_low();
                self.rev.set_high();
            }
            Gear::Neutral => {
                self.fwd.set_low();
                self.rev.set_low();
            }
        }
    }
}

pub type LeftPair = DirectionPair<'E', 2, 3>;
pub type RightPair = DirectionPair<'E', 4, 5>;

/// Both drive channels of the robot.
pub struct DualBridge {
    pwm: DualPwm,
    left: LeftPair,
    right: RightPair,
}

impl DualBridge {
    /// Take ownership of the PWM timer and direction pins. Starts stopped, in neutral.
    pub fn new(pwm: DualPwm, left: LeftPair, right: RightPair) -> Self {
        let mut bridge = Self { pwm, left, right };
        bridge.pwm.set_duty(Motor::Left, 0);
        bridge.pwm.set_duty(Motor::Right, 0);
        bridge
    }

    pub fn free(self) -> (DualPwm, LeftPair, RightPair) {
        (self.pwm, self.left, self.right)
    }
}

impl MotorActuator for DualBridge {
    type Error = Infallible;

    fn set_gear(&mut self, motor: Motor, gear: Gear) -> Result<(), Infallible> {
        match motor {
            Motor::Left => self.left.set(gear),
            Motor::Right => self.right.set(gear),
        }
        Ok(())
    }

    fn set_duty(&mut self, motor: Motor, duty: u8) -> Result<(), Infallible> {
        self.pwm.set_duty(motor, duty);
        Ok(())
    }
}
