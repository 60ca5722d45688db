extern crate std;

use embedded_hal::blocking::i2c::{Write, WriteRead};
use std::collections::VecDeque;
use std::vec::Vec;

/// One frame seen on the fake bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakePacket {
    pub addr: u8,
    pub bytes: Vec<u8>,
}

impl FakePacket {
    pub fn new_from_slice(addr: u8, slice: &[u8]) -> Self {
        Self {
            addr,
            bytes: slice.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeI2cError {
    /// Device did not acknowledge
    Nack,
}

/// Records everything written and serves queued responses to reads
pub struct FakeI2cPort {
    pub available_packets: VecDeque<FakePacket>,
    pub sent_packets: VecDeque<FakePacket>,
    /// when set, every transaction fails as if no device answered
    pub nack: bool,
}

impl FakeI2cPort {
    pub fn new() -> Self {
        FakeI2cPort {
            available_packets: VecDeque::with_capacity(3),
            sent_packets: VecDeque::with_capacity(3),
            nack: false,
        }
    }

    /// Enqueue a response to be read later
    pub fn add_available_packet(&mut self, bytes: &[u8]) {
        let pack = FakePacket::new_from_slice(0, bytes);
        self.available_packets.push_back(pack);
    }
}

impl Write for FakeI2cPort {
    type Error = FakeI2cError;

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.nack {
            return Err(FakeI2cError::Nack);
        }
        self.sent_packets.push_back(FakePacket::new_from_slice(addr, bytes));
        Ok(())
    }
}

impl WriteRead for FakeI2cPort {
    type Error = FakeI2cError;

    fn write_read(&mut self, address: u8, send_buf: &[u8], recv_buf: &mut [u8]) -> Result<(), Self::Error> {
        self.write(address, send_buf)?;
        match self.available_packets.pop_front() {
            Some(next_pack) => {
                let src_len = next_pack.bytes.len();
                let dest_len = recv_buf.len();
                if src_len < dest_len {
                    panic!("src_len {} dest_len {}", src_len, dest_len);
                }
                recv_buf.copy_from_slice(&next_pack.bytes[..dest_len]);
            }
            // nothing queued reads back as all zeroes
            None => recv_buf.iter_mut().for_each(|b| *b = 0),
        }
        Ok(())
    }
}
