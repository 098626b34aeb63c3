//! Byte-channel transport abstraction for the sensor link.
//!
//! Concrete implementations:
//! - UART1 on the ESP32-S3 (the US-100's serial mode, 9600 8N1)
//! - In-memory fakes for host-target tests
//!
//! The [`Us100Link`](us100::Us100Link) is generic over `Transport`, so
//! swapping the sensor onto a different bus requires zero changes to the
//! framing logic.

pub mod us100;

/// Byte-oriented, non-blocking transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns the number of bytes actually read; 0 if none are pending
    /// (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Check whether data is pending for reading.
    fn available(&self) -> bool;
}

/// A null transport that swallows writes and never produces data.
/// Useful when the firmware runs without a sensor attached — every
/// ranging request then ends in a clean timeout instead of a hang.
pub struct NullTransport;

impl Transport for NullTransport {
    type Error = core::convert::Infallible;

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        Ok(data.len())
    }

    fn available(&self) -> bool {
        false
    }
}
