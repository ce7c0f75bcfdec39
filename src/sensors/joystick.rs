// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Two-axis analog stick with push button, as read by the remote.

use core::fmt::Debug;

use embedded_hal::digital::InputPin;

/// Single-channel ADC conversion.
pub trait AdcRead {
    type Error: Debug;

    /// Bits per converted sample.
    const RESOLUTION_BITS: u32;

    /// Convert one channel and return the right-aligned sample.
    fn read_channel(&mut self, channel: u8) -> Result<u16, Self::Error>;
}

/// Sample returned for an unknown axis selector.
pub const AXIS_ERROR_SAMPLE: u8 = 0xFF;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// `'X'` or `'Y'`; anything else is `None`.
    pub fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            b'X' => Some(Axis::X),
            b'Y' => Some(Axis::Y),
            _ => None,
        }
    }
}

pub struct Joystick<A> {
    adc: A,
    x_channel: u8,
    y_channel: u8,
}

impl<A: AdcRead> Joystick<A> {
    pub fn new(adc: A, x_channel: u8, y_channel: u8) -> Self {
        Self {
            adc,
            x_channel,
            y_channel,
        }
    }

    /// 8-bit position of one axis. Wider ADCs keep their top 8 bits.
    pub fn position(&mut self, axis: Axis) -> Result<u8, A::Error> {
        let channel = match axis {
            Axis::X => self.x_channel,
            Axis::Y => self.y_channel,
        };
        let raw = self.adc.read_channel(channel)?;
        Ok((raw >> A::RESOLUTION_BITS.saturating_sub(8)) as u8)
    }

    /// Position by selector character. An unknown selector reads [`AXIS_ERROR_SAMPLE`] without
    /// touching the ADC.
    pub fn position_of(&mut self, selector: u8) -> Result<u8, A::Error> {
        match Axis::from_selector(selector) {
            Some(axis) => self.position(axis),
            None => Ok(AXIS_ERROR_SAMPLE),
        }
    }

    pub fn free(self) -> A {
        self.adc
    }
}

/// Active-low push button on the stick.
pub struct ConfirmButton<P> {
    pin: P,
}

impl<P: InputPin> ConfirmButton<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn is_pressed(&mut self) -> Result<bool, P::Error> {
        self.pin.is_low()
    }
}
