// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Crate-wide error type.
//!
//! Hardware seams (serial link, actuator, sensors) each carry their own associated error type. The
//! node loops fold those into [`Error`] so a tick has a single failure type regardless of which
//! board it runs on.

use core::fmt;

use crate::control::CalibrationError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Serial transmit or receive failed.
    Link,
    /// The motor actuator rejected a gear or duty update.
    Actuator,
    /// The range finder's trigger line could not be driven.
    Ranging,
    /// The accelerometer could not be read.
    Accelerometer,
    /// The stick ADC or the confirm button could not be read.
    Input,
    /// The remote's display rejected an update.
    Display,
    /// Stick calibration constants are unusable.
    Calibration(CalibrationError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Link => f.write_str("serial link error"),
            Error::Actuator => f.write_str("motor actuator error"),
            Error::Ranging => f.write_str("range finder error"),
            Error::Accelerometer => f.write_str("accelerometer error"),
            Error::Input => f.write_str("operator input error"),
            Error::Display => f.write_str("display error"),
            Error::Calibration(e) => write!(f, "calibration error: {}", e),
        }
    }
}

impl From<CalibrationError> for Error {
    fn from(e: CalibrationError) -> Self {
        Error::Calibration(e)
    }
}

pub type Result<T> = core::result::Result<T, Error>;
