/*
Copyright (c) 2020 Todd Stellanova
LICENSE: See LICENSE file
*/

//! Driver for the E+E TEE501 digital temperature sensor.
//!
//! The sensor speaks a command protocol over I2C: every transaction starts
//! with a 16-bit opcode (high byte first), and measurement, status and
//! identification responses carry a trailing CRC-8 byte.
//!
//! The bus is injected through the [`BusTransport`] trait, and
//! [`I2cInterface`] adapts any embedded-hal blocking I2C port to it.

#![no_std]

#[macro_use]
mod macros;

pub mod builder;
pub mod command;
pub mod checksum;
pub mod interface;
mod wrapper;

pub use builder::Builder;
pub use command::{Command, Identification, Register, StatusRegister, Temperature};
pub use checksum::crc8;
pub use interface::{BusTransport, I2cInterface};
pub use wrapper::Tee501;

/// the i2c address normally used by TEE501
pub const DEFAULT_ADDRESS: u8 = 0x48;

/// All possible errors in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Bus error, typically the device did not acknowledge
    Comm(E),

    /// CRC-8 of the received payload did not match its trailing byte
    Checksum { expected: u8, received: u8 },

    /// Measurement error (reserved by the device protocol)
    Measurement,

    /// Periodic measurement interval out of range (milliseconds)
    InvalidPeriodicTime(u32),

    /// Measurement resolution out of range (bits)
    InvalidResolution(u8),
}

impl<E> Error<E> {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Comm(_) => StatusCode::NotAcknowledge,
            Error::Checksum { .. } => StatusCode::ChecksumError,
            Error::Measurement => StatusCode::MeasurementError,
            Error::InvalidPeriodicTime(_) => StatusCode::InvalidPeriodicTimeInput,
            Error::InvalidResolution(_) => StatusCode::InvalidResolutionInput,
        }
    }

    /// Human-readable description of this error
    pub fn message(&self) -> &'static str {
        status_message(self.status_code())
    }
}

/// Outcome of a sensor operation, numbered the way the vendor tooling numbers them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StatusCode {
    Success = 0,
    NotAcknowledge = 1,
    ChecksumError = 2,
    MeasurementError = 3,
    InvalidPeriodicTimeInput = 4,
    InvalidResolutionInput = 5,
    Unknown = 0xFF,
}

impl StatusCode {
    /// Any code outside 0..=5 is `Unknown`
    pub const fn from_raw(code: u8) -> Self {
        match code {
            0 => StatusCode::Success,
            1 => StatusCode::NotAcknowledge,
            2 => StatusCode::ChecksumError,
            3 => StatusCode::MeasurementError,
            4 => StatusCode::InvalidPeriodicTimeInput,
            5 => StatusCode::InvalidResolutionInput,
            _ => StatusCode::Unknown,
        }
    }
}

/// Look up the description of a status code
pub const fn status_message(code: StatusCode) -> &'static str {
    match code {
        StatusCode::Success => "Success",
        StatusCode::NotAcknowledge => "Not acknowledge error",
        StatusCode::ChecksumError => "Checksum error",
        StatusCode::MeasurementError => "Measurement error",
        StatusCode::InvalidPeriodicTimeInput => {
            "error wrong input for change_periodic_measurement_time"
        }
        StatusCode::InvalidResolutionInput => {
            "error wrong input for change_measurement_resolution"
        }
        StatusCode::Unknown => "Unknown error",
    }
}

/// Look up the description of a raw numeric status code
pub const fn status_message_raw(code: u8) -> &'static str {
    status_message(StatusCode::from_raw(code))
}
