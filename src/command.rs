//! TEE501 command set, settings registers, and the encodings of the
//! values carried in command frames.

use crate::checksum::crc8;

/// Commands understood by the TEE501.
/// Each is sent as a 16-bit opcode, high byte first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum Command {
    /// Trigger a measurement and hold the clock until it is ready
    ReadSingleShot = 0x2C1B,
    /// Fetch the latest value of a running periodic measurement
    ReadPeriodicMeasurement = 0xE000,
    /// Trigger a measurement without clock stretching
    ReadSingleShotNoStretch = 0xE016,
    /// Read or write one of the settings [`Register`]s
    ReadWriteSensorSettings = 0x72A7,
    ClearRegister1 = 0x3041,
    ReadRegister1 = 0xF32D,
    ReadRegister2 = 0xF352,
    StartPeriodicMeasurement = 0x201E,
    EndPeriodicMeasurement = 0x3093,
    SoftReset = 0x30A2,
    ReadIdentification = 0x7029,
}

impl Command {
    pub const fn opcode(self) -> u16 {
        self as u16
    }

    /// Opcode as transmitted: MSB then LSB
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.opcode().to_be_bytes()
    }
}

/// Sub-addresses used with [`Command::ReadWriteSensorSettings`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    MeasurementResolution = 0x0F,
    PeriodicMeasurementTime = 0x10,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Raw readings above this value wrap around to negative temperatures
pub const NEGATIVE_THRESHOLD: u16 = 55536;

/// Largest periodic measurement interval accepted, in milliseconds
pub const MAX_PERIODIC_INTERVAL_MS: u32 = 3_276_750;
/// Granularity of the periodic measurement interval register, in milliseconds
pub const PERIODIC_INTERVAL_STEP_MS: u32 = 50;

pub const MIN_RESOLUTION_BITS: u8 = 8;
pub const MAX_RESOLUTION_BITS: u8 = 14;

/// A temperature reading in hundredths of a degree Celsius
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Temperature(i32);

impl Temperature {
    pub const fn from_centi_celsius(centi: i32) -> Self {
        Self(centi)
    }

    /// Decode the 16-bit big-endian value the sensor transmits
    pub const fn from_raw(raw: u16) -> Self {
        if raw > NEGATIVE_THRESHOLD {
            Self(raw as i32 - 65536)
        } else {
            Self(raw as i32)
        }
    }

    pub const fn centi_celsius(&self) -> i32 {
        self.0
    }

    pub fn celsius(&self) -> f32 {
        self.0 as f32 / 100.0
    }
}

/// The 8 identification bytes reported by the sensor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Identification(pub [u8; 8]);

impl Identification {
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Identification read as one big-endian number
    pub const fn as_u64(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }
}

/// Contents of status register 1 or 2
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusRegister(pub u16);

impl StatusRegister {
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Bit 15: a measurement completed since the last read
    pub const fn new_measurement_ready(&self) -> bool {
        self.0 & 0x8000 != 0
    }
}

/// Data bytes and CRC for a periodic measurement interval write:
/// `[low, high, crc8(register, low, high)]`
pub fn encode_periodic_interval(millis: u32) -> Option<[u8; 3]> {
    if millis > MAX_PERIODIC_INTERVAL_MS {
        return None;
    }
    let value = millis / PERIODIC_INTERVAL_STEP_MS;
    let low = (value & 0xFF) as u8;
    let high = ((value >> 8) & 0xFF) as u8;
    let crc = crc8(&[Register::PeriodicMeasurementTime.addr(), low, high]);
    Some([low, high, crc])
}

/// Interval register contents as reported by the device: second byte is the
/// high byte, scaled by 0.05
pub fn decode_periodic_interval(response: &[u8; 2]) -> f32 {
    let value = response[1] as u32 * 256 + response[0] as u32;
    value as f32 * 0.05
}

/// Data byte and CRC for a resolution write: `[bits - 8, crc8(register, data)]`
pub fn encode_resolution(bits: u8) -> Option<[u8; 2]> {
    if !(MIN_RESOLUTION_BITS..=MAX_RESOLUTION_BITS).contains(&bits) {
        return None;
    }
    let data = bits - MIN_RESOLUTION_BITS;
    let crc = crc8(&[Register::MeasurementResolution.addr(), data]);
    Some([data, crc])
}

/// Only the low 3 bits of the resolution register carry the setting
pub const fn decode_resolution(response: u8) -> u8 {
    ((response << 5) >> 5) + MIN_RESOLUTION_BITS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcodes_are_big_endian() {
        assert_eq!(Command::ReadSingleShot.to_be_bytes(), [0x2C, 0x1B]);
        assert_eq!(Command::ReadIdentification.to_be_bytes(), [0x70, 0x29]);
        assert_eq!(Command::SoftReset.opcode(), 0x30A2);
    }

    #[test]
    fn temperature_decode() {
        assert_eq!(Temperature::from_raw(2500).centi_celsius(), 2500);
        assert_eq!(Temperature::from_raw(2500).celsius(), 25.0);
        assert_eq!(Temperature::from_raw(0).centi_celsius(), 0);
        assert_eq!(Temperature::from_raw(55537).centi_celsius(), -9999);
        assert_eq!(Temperature::from_raw(65535).centi_celsius(), -1);
    }

    #[test]
    fn temperature_threshold_is_exclusive() {
        assert_eq!(Temperature::from_raw(55536).centi_celsius(), 55536);
        assert!((Temperature::from_raw(55536).celsius() - 555.36).abs() < 1e-3);
        assert!((Temperature::from_raw(55537).celsius() + 99.99).abs() < 1e-3);
    }

    #[test]
    fn interval_encoding() {
        let bytes = encode_periodic_interval(1000).unwrap();
        assert_eq!(&bytes[..2], &[20, 0]);
        assert_eq!(bytes[2], crc8(&[0x10, 20, 0]));

        let bytes = encode_periodic_interval(MAX_PERIODIC_INTERVAL_MS).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xFF]);

        assert_eq!(encode_periodic_interval(MAX_PERIODIC_INTERVAL_MS + 1), None);
    }

    #[test]
    fn interval_decoding() {
        assert!((decode_periodic_interval(&[20, 0]) - 1.0).abs() < 1e-6);
        assert!((decode_periodic_interval(&[0, 1]) - 12.8).abs() < 1e-4);
    }

    #[test]
    fn resolution_encoding() {
        let bytes = encode_resolution(11).unwrap();
        assert_eq!(bytes, [3, crc8(&[0x0F, 3])]);
        assert_eq!(encode_resolution(8).unwrap()[0], 0);
        assert_eq!(encode_resolution(14).unwrap()[0], 6);
        assert_eq!(encode_resolution(7), None);
        assert_eq!(encode_resolution(15), None);
    }

    #[test]
    fn resolution_decoding_ignores_upper_bits() {
        assert_eq!(decode_resolution(0x03), 11);
        assert_eq!(decode_resolution(0xFB), 11);
        assert_eq!(decode_resolution(0x00), 8);
    }

    #[test]
    fn status_register_ready_bit() {
        assert!(StatusRegister(0x8000).new_measurement_ready());
        assert!(!StatusRegister(0x7FFF).new_measurement_ready());
    }

    #[test]
    fn identification_as_number() {
        let id = Identification([0, 0, 0, 0, 0, 0, 0x01, 0x02]);
        assert_eq!(id.as_u64(), 0x0102);
    }
}
