pub mod i2c;

#[cfg(test)]
pub mod mock_i2c_port;

/// A method of exchanging bytes with a device on the bus.
///
/// Each call is one complete bus transaction; nothing is held open between calls.
pub trait BusTransport {
    /// Transport error type, e.g. the device did not acknowledge
    type BusError;

    /// Write all of `data` to the device at `address`
    fn write_only(&mut self, address: u8, data: &[u8]) -> Result<(), Self::BusError>;

    /// Write `data`, then fill `read` from the same device within one
    /// combined transaction (no stop condition in between)
    fn write_then_read(
        &mut self,
        address: u8,
        data: &[u8],
        read: &mut [u8],
    ) -> Result<(), Self::BusError>;
}

/// Lend a transport to a driver without giving it up
impl<T: BusTransport + ?Sized> BusTransport for &mut T {
    type BusError = T::BusError;

    fn write_only(&mut self, address: u8, data: &[u8]) -> Result<(), Self::BusError> {
        (**self).write_only(address, data)
    }

    fn write_then_read(
        &mut self,
        address: u8,
        data: &[u8],
        read: &mut [u8],
    ) -> Result<(), Self::BusError> {
        (**self).write_then_read(address, data, read)
    }
}

pub use self::i2c::I2cInterface;
