// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Byte transport between the nodes.
//!
//! [`SerialLink`] is the raw UART seam: a transmit that may report `WouldBlock` while the data
//! register is busy, and a receive that reports `WouldBlock` when nothing has arrived. [`Link`]
//! puts [`LinkMessage`]s on top of it with blocking sends and non-blocking polls. There is no
//! framing, checksum or retransmission.

use core::fmt::Debug;

use defmt_or_log::warn;

use crate::error::{Error, Result};
use crate::protocol::LinkMessage;

/// Raw UART access.
pub trait SerialLink {
    type Error: Debug;

    /// Start transmitting one byte.
    fn write(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Take one received byte, if any.
    fn read(&mut self) -> nb::Result<u8, Self::Error>;
}

impl<S: SerialLink + ?Sized> SerialLink for &mut S {
    type Error = S::Error;

    fn write(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        (**self).write(byte)
    }

    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        (**self).read()
    }
}

/// Message-level view of a [`SerialLink`].
pub struct Link<S> {
    serial: S,
}

impl<S: SerialLink> Link<S> {
    pub fn new(serial: S) -> Self {
        Self { serial }
    }

    /// Transmit one message, busy-waiting until the UART accepts it.
    pub fn send(&mut self, message: LinkMessage) -> Result<()> {
        self.send_byte(message.to_byte())
    }

    /// Transmit one raw byte, busy-waiting until the UART accepts it.
    pub fn send_byte(&mut self, byte: u8) -> Result<()> {
        nb::block!(self.serial.write(byte)).map_err(|_| {
            warn!("link: transmit of byte {} failed", byte);
            Error::Link
        })
    }

    /// Check for a received byte without waiting.
    pub fn poll(&mut self) -> Result<Option<u8>> {
        match self.serial.read() {
            Ok(byte) => Ok(Some(byte)),
            Err(nb::Error::WouldBlock) => Ok(None),
            Err(nb::Error::Other(_)) => {
                warn!("link: receive error");
                Err(Error::Link)
            }
        }
    }

    /// Access the underlying serial port.
    #[inline]
    pub fn inner(&mut self) -> &mut S {
        &mut self.serial
    }

    /// Consume the link and return the serial port.
    pub fn free(self) -> S {
        self.serial
    }
}
