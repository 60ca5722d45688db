use embedded_hal::blocking::i2c::{Write, WriteRead};

use super::BusTransport;

/// Adapts an embedded-hal blocking I2C port to [`BusTransport`]
pub struct I2cInterface<I2C> {
    /// i2c port
    i2c_port: I2C,
}

impl<I2C, CommE> I2cInterface<I2C>
where
    I2C: Write<Error = CommE> + WriteRead<Error = CommE>,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c_port: i2c }
    }

    /// Give back the underlying port
    pub fn release(self) -> I2C {
        self.i2c_port
    }
}

impl<I2C, CommE> BusTransport for I2cInterface<I2C>
where
    I2C: Write<Error = CommE> + WriteRead<Error = CommE>,
{
    type BusError = CommE;

    fn write_only(&mut self, address: u8, data: &[u8]) -> Result<(), Self::BusError> {
        self.i2c_port.write(address, data)
    }

    fn write_then_read(
        &mut self,
        address: u8,
        data: &[u8],
        read: &mut [u8],
    ) -> Result<(), Self::BusError> {
        self.i2c_port.write_read(address, data, read)
    }
}
