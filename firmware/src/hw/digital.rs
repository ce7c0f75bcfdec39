// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! `embedded-hal` 1.0 digital pin wrappers over HAL GPIO pins.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use stm32f7xx_hal::gpio::{self, Input, Output, PullUp, PushPull};

/// Push-pull output.
pub struct OutPin<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> OutPin<P, N> {
    /// Take a pin, reconfigure it as push-pull output and drive it low.
    pub fn new<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        let mut pin = pin.into_push_pull_output();
        pin.set_low();
        Self { pin }
    }

    pub fn free(self) -> gpio::Pin<P, N, Output<PushPull>> {
        self.pin
    }
}

impl<const P: char, const N: u8> ErrorType for OutPin<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> OutputPin for OutPin<P, N> {
    #[inline]
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.pin.set_low();
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.pin.set_high();
        Ok(())
    }
}

/// Input with the internal pull-up enabled.
pub struct PullUpPin<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Input<PullUp>>,
}

impl<const P: char, const N: u8> PullUpPin<P, N> {
    pub fn new<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        Self {
            pin: pin.into_pull_up_input(),
        }
    }
}

impl<const P: char, const N: u8> ErrorType for PullUpPin<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> InputPin for PullUpPin<P, N> {
    #[inline]
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.pin.is_high())
    }

    #[inline]
    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.pin.is_low())
    }
}
