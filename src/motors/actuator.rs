// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Motor actuator seam and robot-side decoding of drive-control bytes.
//!
//! The board behind [`MotorActuator`] owns two H-bridge channels, each with a direction pair and an
//! 8-bit PWM duty. Setting a gear only changes direction pins; it never touches the duty.

use core::fmt::Debug;

use crate::protocol::{DriveControlByte, Motor};

/// Direction state of one H-bridge channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Gear {
    Forward,
    Reverse,
    /// Both direction inputs low; the motor coasts.
    Neutral,
}

/// Physical drive outputs of the robot.
pub trait MotorActuator {
    type Error: Debug;

    /// Set the direction pins of one motor.
    fn set_gear(&mut self, motor: Motor, gear: Gear) -> Result<(), Self::Error>;

    /// Set the PWM duty of one motor (0 = off, 255 = full).
    fn set_duty(&mut self, motor: Motor, duty: u8) -> Result<(), Self::Error>;

    fn set_both_gears(&mut self, gear: Gear) -> Result<(), Self::Error> {
        self.set_gear(Motor::Left, gear)?;
        self.set_gear(Motor::Right, gear)
    }

    fn set_both_duties(&mut self, duty: u8) -> Result<(), Self::Error> {
        self.set_duty(Motor::Left, duty)?;
        self.set_duty(Motor::Right, duty)
    }

    /// Zero both duties and put both motors in neutral.
    fn stop(&mut self) -> Result<(), Self::Error> {
        self.set_both_duties(0)?;
        self.set_both_gears(Gear::Neutral)
    }
}

/// A received drive-control byte, ready to be applied to the motors.
///
/// Both motors take their gear from every byte: the remote always sends the same direction in the
/// left and right bytes of one tick. Only the addressed motor's duty changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DriveCommand {
    byte: DriveControlByte,
}

impl DriveCommand {
    pub fn new(byte: DriveControlByte) -> Self {
        Self { byte }
    }

    #[inline]
    pub fn byte(&self) -> DriveControlByte {
        self.byte
    }

    /// Gear for both motors. Forward is refused while an obstacle is ahead.
    pub fn gear(&self, obstacle_ahead: bool) -> Gear {
        match (self.byte.is_forward(), obstacle_ahead) {
            (true, false) => Gear::Forward,
            (true, true) => Gear::Neutral,
            (false, _) => Gear::Reverse,
        }
    }

    pub fn apply<A: MotorActuator>(&self, actuator: &mut A, obstacle_ahead: bool) -> Result<(), A::Error> {
        actuator.set_both_gears(self.gear(obstacle_ahead))?;
        actuator.set_duty(self.byte.motor(), self.byte.magnitude())
    }
}
