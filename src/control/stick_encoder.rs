// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Stick-to-control-byte encoder.
//!
//! Turns one X/Y stick sample into a [`DriveControlByte`] for one motor. Throttle comes from Y;
//! pushing the stick sideways takes part of the X deflection off the motor on the inside of the
//! turn.
//!
//! Every intermediate value is truncated to 8 bits before it is masked to a multiple of 4, in this
//! order:
//!
//! ```text
//! mapped_x = u8(1 + scale_x * |x - min_x|)              & 0xFC
//! mapped_y = u8(u8(1 + scale_y * |y - min_y|) * 0.7)    & 0xFC
//! x_adjust = u8(mapped_x * 0.3)                         & 0xFC
//! ```
//!
//! The direction bit is carried between calls: a sample inside the Y dead-zone leaves it as it was.

use crate::config::StickConfig;
use crate::control::calibration::{AxisSide, CalibrationError, StickCalibration};
use crate::protocol::{DriveControlByte, Motor};
use crate::protocol::messages::MAGNITUDE_MASK;

use defmt_or_log::debug;

pub struct StickEncoder {
    calibration: StickCalibration,
    steering_sensitivity: f32,
    throttle_sensitivity: f32,
    forward: bool,
}

impl StickEncoder {
    /// Build an encoder from the stick configuration. The direction starts out as reverse.
    pub fn new(config: &StickConfig) -> Result<Self, CalibrationError> {
        let calibration = StickCalibration::new(config)?;

        debug!(
            "stick: x- min {} range {}, x+ min {} range {}",
            calibration.x.negative().min,
            calibration.x.negative().range,
            calibration.x.positive().min,
            calibration.x.positive().range
        );
        debug!(
            "stick: y- min {} range {}, y+ min {} range {}",
            calibration.y.negative().min,
            calibration.y.negative().range,
            calibration.y.positive().min,
            calibration.y.positive().range
        );

        Ok(Self {
            calibration,
            steering_sensitivity: config.steering_sensitivity,
            throttle_sensitivity: config.throttle_sensitivity,
            forward: false,
        })
    }

    #[inline]
    pub fn calibration(&self) -> &StickCalibration {
        &self.calibration
    }

    /// Direction that the next neutral-Y sample will carry.
    #[inline]
    pub fn is_forward(&self) -> bool {
        self.forward
    }

    /// Encode one sample for `motor`.
    pub fn encode(&mut self, x: u8, y: u8, motor: Motor) -> DriveControlByte {
        let y_side = self.calibration.y.side(y);
        match y_side {
            AxisSide::Positive => self.forward = true,
            AxisSide::Negative => self.forward = false,
            AxisSide::Neutral => {}
        }

        let magnitude = if y_side == AxisSide::Neutral {
            0
        } else {
            let mapped_y = self.map_y(y);
            if self.steers_against(motor, x) {
                let x_adjust = ((self.map_x(x) as f32 * self.steering_sensitivity) as u8)
                    & MAGNITUDE_MASK;
                (mapped_y as i16 - x_adjust as i16).max(0) as u8
            } else {
                mapped_y
            }
        };

        DriveControlByte::new(motor, self.forward, magnitude)
    }

    /// Encode the left byte then the right byte of one tick.
    pub fn encode_pair(&mut self, x: u8, y: u8) -> [DriveControlByte; 2] {
        [
            self.encode(x, y, Motor::Left),
            self.encode(x, y, Motor::Right),
        ]
    }

    fn map_x(&self, x: u8) -> u8 {
        self.calibration.x.map(x) & MAGNITUDE_MASK
    }

    fn map_y(&self, y: u8) -> u8 {
        let mapped = self.calibration.y.map(y);
        ((mapped as f32 * self.throttle_sensitivity) as u8) & MAGNITUDE_MASK
    }

    /// Whether `motor` is on the inside of the turn the stick asks for.
    fn steers_against(&self, motor: Motor, x: u8) -> bool {
        matches!(
            (motor, self.calibration.x.side(x)),
            (Motor::Left, AxisSide::Negative) | (Motor::Right, AxisSide::Positive)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AxisOrientation;

    const X_ZERO: u8 = 133;
    const Y_ZERO: u8 = 127;

    fn encoder() -> StickEncoder {
        StickEncoder::new(&StickConfig::DEFAULT).unwrap()
    }

    #[test]
    fn magnitude_is_quantized_for_every_sample() {
        let mut enc = encoder();
        for x in 0..=255u8 {
            for y in 0..=255u8 {
                for motor in [Motor::Left, Motor::Right] {
                    let m = enc.encode(x, y, motor).magnitude();
                    assert_eq!(m % 4, 0);
                    assert!(m <= 252);
                }
            }
        }
    }

    #[test]
    fn neutral_y_gives_zero_magnitude() {
        let mut enc = encoder();
        for y in (Y_ZERO - 5)..=(Y_ZERO + 5) {
            for x in [0, 60, X_ZERO, 200, 255] {
                assert_eq!(enc.encode(x, y, Motor::Left).magnitude(), 0);
                assert_eq!(enc.encode(x, y, Motor::Right).magnitude(), 0);
            }
        }
    }

    #[test]
    fn direction_starts_reverse() {
        let mut enc = encoder();
        assert!(!enc.encode(X_ZERO, Y_ZERO, Motor::Left).is_forward());
    }

    #[test]
    fn direction_is_sticky_through_neutral() {
        let mut enc = encoder();

        assert!(enc.encode(X_ZERO, 0, Motor::Left).is_forward());
        for _ in 0..3 {
            let b = enc.encode(X_ZERO, Y_ZERO, Motor::Right);
            assert!(b.is_forward());
            assert_eq!(b.magnitude(), 0);
        }

        assert!(!enc.encode(X_ZERO, 255, Motor::Left).is_forward());
        assert!(!enc.encode(X_ZERO, Y_ZERO + 3, Motor::Left).is_forward());
    }

    #[test]
    fn full_throttle_straight_ahead() {
        let mut enc = encoder();
        // y = 0: 1 + 254/126 * 126 = 255, * 0.7 = 178, masked 176.
        let [left, right] = enc.encode_pair(X_ZERO, 0);
        assert_eq!(left.magnitude(), 176);
        assert_eq!(right.magnitude(), 176);
        assert_eq!(left.motor(), Motor::Left);
        assert_eq!(right.motor(), Motor::Right);
        assert!(left.is_forward() && right.is_forward());
    }

    #[test]
    fn full_reverse() {
        let mut enc = encoder();
        // y = 255: range 127, 1 + 2 * 127 = 255 -> 176.
        let b = enc.encode(X_ZERO, 255, Motor::Left);
        assert!(!b.is_forward());
        assert_eq!(b.magnitude(), 176);
    }

    #[test]
    fn steering_slows_inside_motor_only() {
        let mut enc = encoder();

        // Full right: mapped_x = 252, x_adjust = u8(75.6) & 0xFC = 72.
        let [left, right] = enc.encode_pair(0, 0);
        assert_eq!(left.magnitude(), 176);
        assert_eq!(right.magnitude(), 176 - 72);

        // Full left: x = 255, 1 + 254/121 * 121 = 255 -> 252, same adjust.
        let [left, right] = enc.encode_pair(255, 0);
        assert_eq!(left.magnitude(), 176 - 72);
        assert_eq!(right.magnitude(), 176);
    }

    #[test]
    fn steering_adjust_clamps_at_zero() {
        let mut enc = encoder();
        // Barely forward: y = 121 maps to 11, * 0.7 = 7 -> 4. Full right takes 72 off.
        let b = enc.encode(0, 121, Motor::Right);
        assert!(b.is_forward());
        assert_eq!(b.magnitude(), 0);
        assert_eq!(enc.encode(0, 121, Motor::Left).magnitude(), 4);
    }

    #[test]
    fn mirrored_stick_encodes_the_same() {
        let mirrored = StickConfig::DEFAULT
            .with_x(AxisOrientation::new(122, 0, 255))
            .with_y(AxisOrientation::new(128, 0, 255));
        let mut a = encoder();
        let mut b = StickEncoder::new(&mirrored).unwrap();

        // Full forward, full right on both sticks.
        assert_eq!(a.encode(0, 0, Motor::Right), b.encode(255, 255, Motor::Right));
        assert_eq!(a.encode(0, 0, Motor::Left), b.encode(255, 255, Motor::Left));
    }

    #[test]
    fn degenerate_config_is_rejected() {
        let bad = StickConfig::DEFAULT.with_y(AxisOrientation::new(127, 127, 0));
        assert_eq!(
            StickEncoder::new(&bad).err(),
            Some(CalibrationError::ExtremeAtCenter)
        );
    }
}
