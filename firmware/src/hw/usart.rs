// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! - [`SerialPort`] carries the remote ↔ robot link (9600 8N1) and implements
//!   [`redbot::protocol::SerialLink`].
//! - [`Usart`] is a transmit-only debug console with a few printing helpers.
//!
//! Note: When using `writeln!`, be sure to include `\r` (CR) in the format string to ensure correct
//! line endings on the terminal.
//!
//! To access the debug terminal on the host machine, connect to the debug USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* <baud_rate>
//! ```

use core::fmt;
use nb::block;

use redbot::protocol::SerialLink;
use stm32f7xx_hal::{
    prelude::*,
    serial::{self, Instance, Pins, Rx, Serial, Tx},
};

#[derive(Debug)]
pub enum PortError {
    Transmit,
    Receive(serial::Error),
}

/// Full-duplex link port.
pub struct SerialPort<U: Instance> {
    tx: Tx<U>,
    rx: Rx<U>,
}

impl<U: Instance> SerialPort<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, rx) = serial.split();
        Self { tx, rx }
    }
}

impl<U: Instance> SerialLink for SerialPort<U> {
    type Error = PortError;

    #[inline]
    fn write(&mut self, byte: u8) -> nb::Result<(), PortError> {
        self.tx.write(byte).map_err(|e| match e {
            nb::Error::WouldBlock => nb::Error::WouldBlock,
            nb::Error::Other(_) => nb::Error::Other(PortError::Transmit),
        })
    }

    #[inline]
    fn read(&mut self) -> nb::Result<u8, PortError> {
        self.rx.read().map_err(|e| e.map(PortError::Receive))
    }
}

/// Transmit-only debug console.
pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Write string and CRLF terminator.
    #[inline]
    pub fn println(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}
