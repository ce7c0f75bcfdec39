// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Single-byte messages exchanged between the remote and the robot.
//!
//! The wire carries one untagged byte per message. A drive-control byte and a fault code are told
//! apart only by protocol phase and direction:
//!
//! | Direction | Phase | Bytes |
//! | --------- | ----- | ----- |
//! | remote → robot | steady state | two [`DriveControlByte`]s per tick, left then right |
//! | remote → robot | robot awaiting ack | `'1'` = collision acknowledged |
//! | robot → remote | any | `'0'` clear, `'1'` collision, `'2'` obstacle ahead |
//!
//! [`LinkMessage`] keeps the distinction explicit inside the firmware and flattens it back to the
//! untagged byte for transmission, so the wire format stays compatible with existing nodes.
//!
//! Drive-control byte layout:
//!
//! ```text
//! bit   7     6     5     4     3     2       1          0
//!     [PWM] [PWM] [PWM] [PWM] [PWM] [PWM] [DIRECTION] [MOTOR]
//! ```
//!
//! - `MOTOR`: 1 = left, 0 = right
//! - `DIRECTION`: 1 = forward, 0 = reverse
//! - `PWM`: duty magnitude in steps of 4

use num_enum::{IntoPrimitive, TryFromPrimitive};

pub const MOTOR_SEL_BIT: u8 = 0;
pub const GEAR_SEL_BIT: u8 = 1;

/// Bits of a control byte that hold the duty magnitude.
pub const MAGNITUDE_MASK: u8 = 0b1111_1100;

/// Largest magnitude representable in a control byte.
pub const MAGNITUDE_MAX: u8 = MAGNITUDE_MASK;

/// Byte the remote sends once the operator has confirmed a collision.
pub const COLLISION_ACK: u8 = b'1';

/// Which drive motor a control byte addresses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Motor {
    Left,
    Right,
}

impl Motor {
    /// Map a selector character. Anything other than `'R'` selects the left motor.
    pub fn from_selector(selector: u8) -> Self {
        match selector {
            b'L' => Motor::Left,
            b'R' => Motor::Right,
            _ => Motor::Left,
        }
    }

    #[inline]
    pub fn selector(self) -> u8 {
        match self {
            Motor::Left => b'L',
            Motor::Right => b'R',
        }
    }
}

/// Motor control byte: motor select, direction and quantized magnitude.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DriveControlByte(u8);

impl DriveControlByte {
    /// Assemble a control byte. The two low-order bits of `magnitude` are dropped.
    pub const fn new(motor: Motor, forward: bool, magnitude: u8) -> Self {
        let mut raw = magnitude & MAGNITUDE_MASK;
        if matches!(motor, Motor::Left) {
            raw |= 1 << MOTOR_SEL_BIT;
        }
        if forward {
            raw |= 1 << GEAR_SEL_BIT;
        }
        Self(raw)
    }

    /// Interpret a received byte.
    #[inline]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn motor(self) -> Motor {
        if self.0 & (1 << MOTOR_SEL_BIT) != 0 {
            Motor::Left
        } else {
            Motor::Right
        }
    }

    #[inline]
    pub const fn is_forward(self) -> bool {
        self.0 & (1 << GEAR_SEL_BIT) != 0
    }

    #[inline]
    pub const fn magnitude(self) -> u8 {
        self.0 & MAGNITUDE_MASK
    }
}

impl From<DriveControlByte> for u8 {
    fn from(b: DriveControlByte) -> u8 {
        b.0
    }
}

/// Status codes sent from the robot to the remote.
#[derive(Copy, Clone, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum FaultCode {
    /// `'0'`: no fault, obstacle cleared.
    Clear = 0x30,
    /// `'1'`: collision detected, robot halted until acknowledged.
    Collision = 0x31,
    /// `'2'`: obstacle inside the distance limit.
    ObstacleAhead = 0x32,
}

/// A link message with its kind made explicit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LinkMessage {
    Drive(DriveControlByte),
    Fault(FaultCode),
    CollisionAck,
}

impl LinkMessage {
    /// The untagged byte put on the wire.
    pub fn to_byte(self) -> u8 {
        match self {
            LinkMessage::Drive(b) => b.raw(),
            LinkMessage::Fault(code) => code.into(),
            LinkMessage::CollisionAck => COLLISION_ACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_byte_layout() {
        let b = DriveControlByte::new(Motor::Left, true, 176);
        assert_eq!(b.raw(), 176 | 0b11);
        assert_eq!(b.motor(), Motor::Left);
        assert!(b.is_forward());
        assert_eq!(b.magnitude(), 176);

        let b = DriveControlByte::new(Motor::Right, false, 252);
        assert_eq!(b.raw(), 252);
        assert_eq!(b.motor(), Motor::Right);
        assert!(!b.is_forward());
    }

    #[test]
    fn magnitude_low_bits_are_dropped() {
        let b = DriveControlByte::new(Motor::Right, false, 0xFF);
        assert_eq!(b.magnitude(), 252);
        assert_eq!(b.raw() & 0b11, 0);
    }

    #[test]
    fn fault_codes_are_ascii_digits() {
        assert_eq!(LinkMessage::Fault(FaultCode::Clear).to_byte(), b'0');
        assert_eq!(LinkMessage::Fault(FaultCode::Collision).to_byte(), b'1');
        assert_eq!(LinkMessage::Fault(FaultCode::ObstacleAhead).to_byte(), b'2');
        assert_eq!(LinkMessage::CollisionAck.to_byte(), b'1');
    }

    #[test]
    fn unknown_fault_byte_is_rejected() {
        assert_eq!(FaultCode::try_from(b'2').ok(), Some(FaultCode::ObstacleAhead));
        assert!(FaultCode::try_from(b'7').is_err());
        assert!(FaultCode::try_from(0xA5).is_err());
    }

    #[test]
    fn motor_selector_defaults_to_left() {
        assert_eq!(Motor::from_selector(b'L'), Motor::Left);
        assert_eq!(Motor::from_selector(b'R'), Motor::Right);
        assert_eq!(Motor::from_selector(b'?'), Motor::Left);
    }
}
