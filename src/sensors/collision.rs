// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Accelerometer threshold collision detection.

use core::fmt::Debug;

use defmt_or_log::debug;

use crate::config::RobotConfig;

/// Raw three-axis accelerometer access.
pub trait Accelerometer {
    type Error: Debug;

    /// Raw `[x, y, z]` acceleration samples.
    fn read_raw_accel(&mut self) -> Result<[i16; 3], Self::Error>;
}

/// Flags a collision when any axis leaves `zero ± limit`.
///
/// The bounds are strict: a sample exactly `limit` away from zero is not a collision.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CollisionDetector {
    zero: [i16; 3],
    limit: i16,
}

impl CollisionDetector {
    pub const fn new(zero: [i16; 3], limit: i16) -> Self {
        Self { zero, limit }
    }

    pub const fn from_config(config: &RobotConfig) -> Self {
        Self::new(config.accel_zero, config.collision_limit)
    }

    pub fn is_collision(&self, sample: [i16; 3]) -> bool {
        sample.iter().zip(self.zero.iter()).any(|(&s, &z)| {
            let deviation = s as i32 - z as i32;
            deviation > self.limit as i32 || deviation < -(self.limit as i32)
        })
    }

    /// Sample `accel` once and test it.
    pub fn check<A: Accelerometer>(&self, accel: &mut A) -> Result<bool, A::Error> {
        let [x, y, z] = accel.read_raw_accel()?;
        debug!("accel: x {} y {} z {}", x, y, z);
        Ok(self.is_collision([x, y, z]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Samples(&'static [[i16; 3]], usize);

    impl Accelerometer for Samples {
        type Error = ();

        fn read_raw_accel(&mut self) -> Result<[i16; 3], ()> {
            let s = self.0.get(self.1).copied().ok_or(())?;
            self.1 += 1;
            Ok(s)
        }
    }

    fn detector() -> CollisionDetector {
        CollisionDetector::from_config(&RobotConfig::DEFAULT)
    }

    #[test]
    fn level_and_still_is_quiet() {
        assert!(!detector().is_collision([-350, -35, 1930]));
    }

    #[test]
    fn bounds_are_strict() {
        let d = detector();
        assert!(!d.is_collision([-350 + 10_000, -35, 1930]));
        assert!(d.is_collision([-350 + 10_001, -35, 1930]));
        assert!(!d.is_collision([-350, -35 - 10_000, 1930]));
        assert!(d.is_collision([-350, -35 - 10_001, 1930]));
    }

    #[test]
    fn any_single_axis_triggers() {
        let d = detector();
        assert!(d.is_collision([i16::MIN, -35, 1930]));
        assert!(d.is_collision([-350, i16::MAX, 1930]));
        assert!(d.is_collision([-350, -35, 1930 + 10_001]));
        assert!(d.is_collision([-350, -35, 1930 - 10_001]));
    }

    #[test]
    fn wide_limits_do_not_overflow() {
        let d = CollisionDetector::new([i16::MAX, i16::MIN, 0], i16::MAX);
        assert!(!d.is_collision([i16::MAX, i16::MIN, 0]));
        assert!(d.is_collision([i16::MIN, i16::MIN, 0]));
    }

    #[test]
    fn check_reads_the_sensor() {
        let mut accel = Samples(&[[0, 0, 1930], [12_000, 0, 1930]], 0);
        let d = detector();
        assert_eq!(d.check(&mut accel), Ok(false));
        assert_eq!(d.check(&mut accel), Ok(true));
        assert_eq!(d.check(&mut accel), Err(()));
    }
}
