// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Stick axis calibration.
//!
//! Each axis is split at its rest value into a negative and a positive half. For each half the
//! calibration records:
//!
//! - `min`: the raw sample one step past center toward that half's extreme
//! - `max`: the raw sample at the extreme
//! - `range`: `|max - min|`
//! - `scale`: output counts per raw count, `OUTPUT_RANGE / range`
//!
//! Which half lies numerically above center depends on how the stick is mounted. That question is
//! answered once here, so the encoder only ever asks "which side, and how far from `min`".
//!
//! ```text
//!                 Y+ (forward)
//!                  |
//!   X- (left) --- (O) --- X+ (right)
//!                  |
//!                 Y- (reverse)
//! ```

use core::fmt;

use crate::config::{AxisOrientation, StickConfig};

/// Lowest mapped output of a deflected axis.
pub const PWM_OUT_MIN: u8 = 1;
/// Highest mapped output of a deflected axis.
pub const PWM_OUT_MAX: u8 = 255;
pub const OUTPUT_RANGE: u8 = PWM_OUT_MAX - PWM_OUT_MIN;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// An extreme reads the same as the rest position.
    ExtremeAtCenter,
    /// Both extremes lie on the same side of the rest position.
    ExtremesOnSameSide,
    /// An extreme is only one count from center, leaving no usable travel.
    ZeroRange,
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationError::ExtremeAtCenter => f.write_str("axis extreme equals rest value"),
            CalibrationError::ExtremesOnSameSide => {
                f.write_str("axis extremes on the same side of rest value")
            }
            CalibrationError::ZeroRange => f.write_str("axis has zero range"),
        }
    }
}

/// Calibration of one direction of one axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisCalibration {
    pub min: u8,
    pub max: u8,
    pub range: u8,
    pub scale: f32,
}

impl AxisCalibration {
    /// Calibrate the half of an axis running from `zero` toward `extreme`.
    pub fn toward(zero: u8, extreme: u8) -> Result<Self, CalibrationError> {
        let min = if extreme > zero {
            zero + 1
        } else if extreme < zero {
            zero - 1
        } else {
            return Err(CalibrationError::ExtremeAtCenter);
        };

        let range = (extreme as i16 - min as i16).unsigned_abs() as u8;
        if range == 0 {
            return Err(CalibrationError::ZeroRange);
        }

        Ok(Self {
            min,
            max: extreme,
            range,
            scale: OUTPUT_RANGE as f32 / range as f32,
        })
    }

    /// Whether this half lies numerically above the rest value.
    #[inline]
    pub fn is_above_center(&self) -> bool {
        self.max > self.min
    }

    /// Map a sample on this half into `PWM_OUT_MIN + scale * |sample - min|`, truncated to 8 bits.
    ///
    /// Values past 255 saturate.
    pub fn map(&self, sample: u8) -> u8 {
        let offset = (sample as i16 - self.min as i16).unsigned_abs();
        (PWM_OUT_MIN as f32 + self.scale * offset as f32) as u8
    }
}

/// Compute `(negative, positive)` calibrations for one axis.
pub fn compute_ranges(
    zero: u8,
    val_negative_extreme: u8,
    val_positive_extreme: u8,
) -> Result<(AxisCalibration, AxisCalibration), CalibrationError> {
    let negative = AxisCalibration::toward(zero, val_negative_extreme)?;
    let positive = AxisCalibration::toward(zero, val_positive_extreme)?;

    if negative.is_above_center() == positive.is_above_center() {
        return Err(CalibrationError::ExtremesOnSameSide);
    }

    Ok((negative, positive))
}

/// Logical position of an axis sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AxisSide {
    Negative,
    Neutral,
    Positive,
}

/// Both halves of one axis plus its neutral band.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CalibratedAxis {
    zero: u8,
    dead_zone: u8,
    negative: AxisCalibration,
    positive: AxisCalibration,
}

impl CalibratedAxis {
    /// `dead_zone` is the half-width of the band around `zero` treated as neutral. With 0 only the
    /// rest value itself is neutral.
    pub fn new(orientation: AxisOrientation, dead_zone: u8) -> Result<Self, CalibrationError> {
        let (negative, positive) = compute_ranges(
            orientation.zero,
            orientation.negative_extreme,
            orientation.positive_extreme,
        )?;
        Ok(Self {
            zero: orientation.zero,
            dead_zone,
            negative,
            positive,
        })
    }

    #[inline]
    pub fn zero(&self) -> u8 {
        self.zero
    }

    #[inline]
    pub fn negative(&self) -> &AxisCalibration {
        &self.negative
    }

    #[inline]
    pub fn positive(&self) -> &AxisCalibration {
        &self.positive
    }

    pub fn side(&self, sample: u8) -> AxisSide {
        let s = sample as i16;
        let upper = self.zero as i16 + self.dead_zone as i16;
        let lower = self.zero as i16 - self.dead_zone as i16;

        let (above, below) = if self.positive.is_above_center() {
            (AxisSide::Positive, AxisSide::Negative)
        } else {
            (AxisSide::Negative, AxisSide::Positive)
        };

        if s > upper {
            above
        } else if s < lower {
            below
        } else {
            AxisSide::Neutral
        }
    }

    /// Map a sample into output space using the calibration of its side. Neutral maps to 0.
    pub fn map(&self, sample: u8) -> u8 {
        match self.side(sample) {
            AxisSide::Negative => self.negative.map(sample),
            AxisSide::Positive => self.positive.map(sample),
            AxisSide::Neutral => 0,
        }
    }
}

/// Calibration of both stick axes. Only the Y axis has a dead-zone.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StickCalibration {
    pub x: CalibratedAxis,
    pub y: CalibratedAxis,
}

impl StickCalibration {
    pub fn new(config: &StickConfig) -> Result<Self, CalibrationError> {
        Ok(Self {
            x: CalibratedAxis::new(config.x, 0)?,
            y: CalibratedAxis::new(config.y, config.zero_offset)?,
        })
    }
}
