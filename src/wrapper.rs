use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::checksum;
use crate::command::{
    decode_periodic_interval, decode_resolution, encode_periodic_interval, encode_resolution,
    Command, Identification, Register, StatusRegister, Temperature,
};
use crate::interface::{BusTransport, I2cInterface};
use crate::Error;

/// the longest frame we send: opcode, register, two data bytes, CRC
const MAX_FRAME_LEN: usize = 6;

/// One TEE501 on the bus.
///
/// The handle keeps only the device address and the transport it was given;
/// every operation below is a single bus transaction.
pub struct Tee501<BT> {
    transport: BT,
    /// address for i2c communications with the sensor
    address: u8,
}

impl<BT> Tee501<BT> {
    pub fn new(transport: BT, address: u8) -> Self {
        Self { transport, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the transport
    pub fn release(self) -> BT {
        self.transport
    }
}

impl<I2C, CommE> Tee501<I2cInterface<I2C>>
where
    I2C: Write<Error = CommE> + WriteRead<Error = CommE>,
{
    /// Use an embedded-hal I2C port to talk to the sensor
    pub fn new_i2c(i2c: I2C, address: u8) -> Self {
        Self::new(I2cInterface::new(i2c), address)
    }
}

impl<BT, SE> Tee501<BT>
where
    BT: BusTransport<BusError = SE>,
{
    /// Trigger a measurement; the sensor stretches the clock until it is done
    pub fn read_single_shot_temperature(&mut self) -> Result<Temperature, Error<SE>> {
        self.read_temperature(Command::ReadSingleShot)
    }

    /// Trigger a measurement without clock stretching.
    /// Poll [`Self::is_new_measurement_ready`] to learn when the value is fresh.
    pub fn read_single_shot_temperature_no_stretch(&mut self) -> Result<Temperature, Error<SE>> {
        self.read_temperature(Command::ReadSingleShotNoStretch)
    }

    /// Latest value of the running periodic measurement
    pub fn read_periodic_temperature(&mut self) -> Result<Temperature, Error<SE>> {
        self.read_temperature(Command::ReadPeriodicMeasurement)
    }

    pub fn start_periodic_measurement(&mut self) -> Result<(), Error<SE>> {
        self.send_command(Command::StartPeriodicMeasurement, &[])
    }

    pub fn end_periodic_measurement(&mut self) -> Result<(), Error<SE>> {
        self.send_command(Command::EndPeriodicMeasurement, &[])
    }

    /// Set the time between periodic measurements, in 50 ms steps.
    /// Values above 3 276 750 ms are rejected without touching the bus.
    pub fn set_periodic_measurement_interval(&mut self, millis: u32) -> Result<(), Error<SE>> {
        let [low, high, crc] = encode_periodic_interval(millis).ok_or_else(|| {
            debug_println!("tee501: rejected periodic interval {} ms", millis);
            Error::<SE>::InvalidPeriodicTime(millis)
        })?;
        self.send_command(
            Command::ReadWriteSensorSettings,
            &[Register::PeriodicMeasurementTime.addr(), low, high, crc],
        )
    }

    /// Interval register contents scaled by 0.05.
    /// The register response carries no CRC.
    pub fn get_periodic_measurement_interval(&mut self) -> Result<f32, Error<SE>> {
        let mut response = [0u8; 2];
        self.query(
            Command::ReadWriteSensorSettings,
            &[Register::PeriodicMeasurementTime.addr()],
            &mut response,
        )?;
        Ok(decode_periodic_interval(&response))
    }

    /// Set the measurement resolution, 8 to 14 bits.
    /// Anything else is rejected without touching the bus.
    pub fn set_resolution(&mut self, bits: u8) -> Result<(), Error<SE>> {
        let [data, crc] = encode_resolution(bits).ok_or_else(|| {
            debug_println!("tee501: rejected resolution {} bits", bits);
            Error::<SE>::InvalidResolution(bits)
        })?;
        self.send_command(
            Command::ReadWriteSensorSettings,
            &[Register::MeasurementResolution.addr(), data, crc],
        )
    }

    /// Current measurement resolution in bits.
    /// The register response carries no CRC.
    pub fn get_resolution(&mut self) -> Result<u8, Error<SE>> {
        let mut response = [0u8; 1];
        self.query(
            Command::ReadWriteSensorSettings,
            &[Register::MeasurementResolution.addr()],
            &mut response,
        )?;
        Ok(decode_resolution(response[0]))
    }

    /// Read the 8 identification bytes
    pub fn read_identification(&mut self) -> Result<Identification, Error<SE>> {
        let mut response = [0u8; 9];
        self.query_verified(Command::ReadIdentification, &mut response)?;
        let mut id = [0u8; 8];
        id.copy_from_slice(&response[..8]);
        Ok(Identification(id))
    }

    pub fn read_status_register_1(&mut self) -> Result<StatusRegister, Error<SE>> {
        self.read_status_register(Command::ReadRegister1)
    }

    pub fn read_status_register_2(&mut self) -> Result<StatusRegister, Error<SE>> {
        self.read_status_register(Command::ReadRegister2)
    }

    /// Has a measurement completed since the last read
    pub fn is_new_measurement_ready(&mut self) -> Result<bool, Error<SE>> {
        Ok(self.read_status_register_2()?.new_measurement_ready())
    }

    pub fn reset(&mut self) -> Result<(), Error<SE>> {
        self.send_command(Command::SoftReset, &[])
    }

    /// The device clears status register 1 with the soft reset opcode
    pub fn clear_status_register_1(&mut self) -> Result<(), Error<SE>> {
        self.send_command(Command::SoftReset, &[])
    }

    fn read_temperature(&mut self, command: Command) -> Result<Temperature, Error<SE>> {
        let mut response = [0u8; 3];
        self.query_verified(command, &mut response)?;
        Ok(Temperature::from_raw(u16::from_be_bytes([response[0], response[1]])))
    }

    fn read_status_register(&mut self, command: Command) -> Result<StatusRegister, Error<SE>> {
        let mut response = [0u8; 3];
        self.query_verified(command, &mut response)?;
        Ok(StatusRegister(u16::from_be_bytes([response[0], response[1]])))
    }

    /// Opcode, high byte first, followed by `extra`
    fn prep_frame(command: Command, extra: &[u8]) -> ([u8; MAX_FRAME_LEN], usize) {
        let mut frame = [0u8; MAX_FRAME_LEN];
        let frame_len = 2 + extra.len();
        frame[..2].copy_from_slice(&command.to_be_bytes());
        frame[2..frame_len].copy_from_slice(extra);
        (frame, frame_len)
    }

    /// Write-only transaction
    fn send_command(&mut self, command: Command, extra: &[u8]) -> Result<(), Error<SE>> {
        let (frame, frame_len) = Self::prep_frame(command, extra);
        self.transport
            .write_only(self.address, &frame[..frame_len])
            .map_err(Error::Comm)
    }

    /// Combined write-then-read transaction; fills all of `response`
    fn query(&mut self, command: Command, extra: &[u8], response: &mut [u8]) -> Result<(), Error<SE>> {
        let (frame, frame_len) = Self::prep_frame(command, extra);
        self.transport
            .write_then_read(self.address, &frame[..frame_len], response)
            .map_err(Error::Comm)
    }

    /// Query whose last response byte is the CRC of the bytes before it
    fn query_verified(&mut self, command: Command, response: &mut [u8]) -> Result<(), Error<SE>> {
        self.query(command, &[], response)?;
        checksum::verify(response).map_err(|(expected, received)| {
            debug_println!("tee501: crc mismatch {:#x} != {:#x}", expected, received);
            Error::<SE>::Checksum { expected, received }
        })?;
        Ok(())
    }
}
