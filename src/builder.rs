use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::command::{encode_periodic_interval, encode_resolution};
use crate::interface::{BusTransport, I2cInterface};
use crate::{Error, Tee501, DEFAULT_ADDRESS};

/// Collects the address and start-up settings for a sensor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Builder {
    i2c_addr: u8,
    resolution_bits: Option<u8>,
    periodic_interval_ms: Option<u32>,
    start_periodic: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub const fn new() -> Self {
        Self {
            i2c_addr: DEFAULT_ADDRESS,
            resolution_bits: None,
            periodic_interval_ms: None,
            start_periodic: false,
        }
    }

    pub const fn address(mut self, addr: u8) -> Self {
        self.i2c_addr = addr;
        self
    }

    /// Measurement resolution to write during [`Builder::configure`], 8 to 14 bits
    pub const fn resolution(mut self, bits: u8) -> Self {
        self.resolution_bits = Some(bits);
        self
    }

    pub const fn periodic_interval_ms(mut self, millis: u32) -> Self {
        self.periodic_interval_ms = Some(millis);
        self
    }

    /// Start periodic measurement once the other settings are written
    pub const fn start_periodic(mut self, start: bool) -> Self {
        self.start_periodic = start;
        self
    }

    /// Finish the builder with any transport
    pub fn connect<BT: BusTransport>(&self, transport: BT) -> Tee501<BT> {
        Tee501::new(transport, self.i2c_addr)
    }

    /// Finish the builder and use I2C to communicate with the sensor
    pub fn connect_i2c<I2C, CommE>(&self, i2c: I2C) -> Tee501<I2cInterface<I2C>>
    where
        I2C: Write<Error = CommE> + WriteRead<Error = CommE>,
    {
        Tee501::new(I2cInterface::new(i2c), self.i2c_addr)
    }

    /// Write the requested settings to the sensor.
    ///
    /// Every setting is validated first, so an invalid one leaves the
    /// device untouched.
    pub fn configure<BT, SE>(&self, sensor: &mut Tee501<BT>) -> Result<(), Error<SE>>
    where
        BT: BusTransport<BusError = SE>,
    {
        if let Some(bits) = self.resolution_bits {
            if encode_resolution(bits).is_none() {
                return Err(Error::InvalidResolution(bits));
            }
        }
        if let Some(millis) = self.periodic_interval_ms {
            if encode_periodic_interval(millis).is_none() {
                return Err(Error::InvalidPeriodicTime(millis));
            }
        }

        if let Some(bits) = self.resolution_bits {
            sensor.set_resolution(bits)?;
        }
        if let Some(millis) = self.periodic_interval_ms {
            sensor.set_periodic_measurement_interval(millis)?;
        }
        if self.start_periodic {
            sensor.start_periodic_measurement()?;
        }
        debug_println!("tee501@{:#x}: configured {:?}", self.i2c_addr, self);
        Ok(())
    }

    /// [`Builder::connect`] followed by [`Builder::configure`]
    pub fn build_and_configure<BT, SE>(&self, transport: BT) -> Result<Tee501<BT>, Error<SE>>
    where
        BT: BusTransport<BusError = SE>,
    {
        let mut sensor = self.connect(transport);
        self.configure(&mut sensor)?;
        Ok(sensor)
    }
}
