// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! MPU-6050 I2C accelerometer/gyro driver.
//!
//! Only the accelerometer is used. Registers are accessed one transaction at a time over any
//! blocking I2C bus; the HAL's `BlockingI2c` fits.

use embedded_hal_02::blocking::i2c::{Write, WriteRead};
use redbot::sensors::Accelerometer;

/// 7-bit address with AD0 tied low.
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Value of WHO_AM_I on a genuine part.
pub const WHO_AM_I_VALUE: u8 = 0x68;

// Register addresses
pub mod reg {
    pub const SMPLRT_DIV: u8 = 0x19;
    pub const CONFIG: u8 = 0x1A;
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const WHO_AM_I: u8 = 0x75;
}

/// Full-scale accelerometer range (ACCEL_CONFIG.AFS_SEL).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccelRange {
    G2 = 0,
    G4 = 1,
    G8 = 2,
    G16 = 3,
}

#[derive(Debug)]
pub enum Mpu6050Error<E> {
    Bus(E),
    /// WHO_AM_I returned something else.
    UnexpectedDevice(u8),
}

impl<E> From<E> for Mpu6050Error<E> {
    fn from(e: E) -> Self {
        Mpu6050Error::Bus(e)
    }
}

pub struct Mpu6050<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, E> Mpu6050<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Check the device identity, wake it on the internal oscillator and select ±2 g.
    pub fn init(&mut self) -> Result<(), Mpu6050Error<E>> {
        let id = self.read_reg(reg::WHO_AM_I)?;
        if id != WHO_AM_I_VALUE {
            return Err(Mpu6050Error::UnexpectedDevice(id));
        }

        // Clear SLEEP, internal 8 MHz oscillator
        self.write_reg(reg::PWR_MGMT_1, 0x00)?;
        // 1 kHz / (1 + 7) = 125 Hz sample rate, 44 Hz DLPF
        self.write_reg(reg::SMPLRT_DIV, 0x07)?;
        self.write_reg(reg::CONFIG, 0x03)?;
        self.write_reg(reg::GYRO_CONFIG, 0x00)?;
        self.set_accel_range(AccelRange::G2)?;
        Ok(())
    }

    pub fn set_accel_range(&mut self, range: AccelRange) -> Result<(), E> {
        self.write_reg(reg::ACCEL_CONFIG, (range as u8) << 3)
    }

    pub fn write_reg(&mut self, addr: u8, value: u8) -> Result<(), E> {
        self.i2c.write(self.address, &[addr, value])
    }

    pub fn read_reg(&mut self, addr: u8) -> Result<u8, E> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[addr], &mut buf)?;
        Ok(buf[0])
    }

    /// Burst-read ACCEL_XOUT_H..ACCEL_ZOUT_L as three big-endian words.
    pub fn read_accel(&mut self) -> Result<[i16; 3], E> {
        let mut buf = [0u8; 6];
        self.i2c.write_read(self.address, &[reg::ACCEL_XOUT_H], &mut buf)?;
        Ok([
            i16::from_be_bytes([buf[0], buf[1]]),
            i16::from_be_bytes([buf[2], buf[3]]),
            i16::from_be_bytes([buf[4], buf[5]]),
        ])
    }

    pub fn free(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> Accelerometer for Mpu6050<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
    E: core::fmt::Debug,
{
    type Error = E;

    fn read_raw_accel(&mut self) -> Result<[i16; 3], E> {
        self.read_accel()
    }
}
