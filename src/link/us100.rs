//! US-100 ultrasonic sensor link — the two-byte ranging protocol.
//!
//! Protocol (serial mode, per the US-100 datasheet): the host writes the
//! single command byte `0x55`; the sensor answers with the measured
//! distance as two bytes, high byte first, in millimetres. There is no
//! framing byte and no checksum.
//!
//! The link is a small request/response state machine driven from the
//! control loop: [`begin_request`](Us100Link::begin_request) sends the
//! command, then [`poll`](Us100Link::poll) is called each tick until the
//! reading completes or the configured timeout elapses. The original
//! bench firmware blocked indefinitely on a silent sensor; here the
//! timeout is mandatory and a dead sensor degrades to a logged,
//! recoverable [`SensorError::Timeout`].

use log::{debug, trace};

use super::Transport;
use crate::error::SensorError;

/// Command byte that requests one distance measurement.
pub const RANGE_COMMAND: u8 = 0x55;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkState {
    Idle,
    Awaiting { filled: usize, waited_ms: u32 },
}

/// Request/response driver for one US-100 on a byte channel.
pub struct Us100Link<T: Transport> {
    transport: T,
    timeout_ms: u32,
    state: LinkState,
    buf: [u8; 2],
}

impl<T: Transport> Us100Link<T> {
    pub fn new(transport: T, timeout_ms: u32) -> Self {
        Self {
            transport,
            timeout_ms,
            state: LinkState::Idle,
            buf: [0; 2],
        }
    }

    /// Send the ranging command and start waiting for the response.
    ///
    /// Any stale bytes still sitting in the channel (e.g. the tail of a
    /// response that arrived after a previous timeout) are drained first,
    /// otherwise the next response would be assembled out of sync.
    pub fn begin_request(&mut self) -> Result<(), SensorError> {
        self.drain_stale()?;

        let written = self
            .transport
            .write(&[RANGE_COMMAND])
            .map_err(|_| SensorError::Channel)?;
        if written != 1 {
            return Err(SensorError::Channel);
        }

        trace!("us100: ranging request sent");
        self.state = LinkState::Awaiting {
            filled: 0,
            waited_ms: 0,
        };
        Ok(())
    }

    /// Poll for the response. `elapsed_ms` is the time since the previous
    /// poll (or since `begin_request` on the first call).
    ///
    /// Returns `None` while the response is still pending, `Some(Ok(d))`
    /// with the big-endian-assembled distance once both bytes arrived, or
    /// `Some(Err(Timeout))` when the window closes on an incomplete frame.
    pub fn poll(&mut self, elapsed_ms: u32) -> Option<Result<u16, SensorError>> {
        let LinkState::Awaiting { filled, waited_ms } = self.state else {
            return None;
        };

        let mut filled = filled;
        match self.transport.read(&mut self.buf[filled..]) {
            Ok(n) => filled += n,
            Err(_) => {
                self.state = LinkState::Idle;
                return Some(Err(SensorError::Channel));
            }
        }

        if filled == 2 {
            let distance = (u16::from(self.buf[0]) << 8) | u16::from(self.buf[1]);
            debug!("us100: distance={distance}");
            self.state = LinkState::Idle;
            return Some(Ok(distance));
        }

        let waited_ms = waited_ms.saturating_add(elapsed_ms);
        if waited_ms >= self.timeout_ms {
            debug!("us100: timeout after {waited_ms} ms ({filled}/2 bytes)");
            self.state = LinkState::Idle;
            return Some(Err(SensorError::Timeout));
        }

        self.state = LinkState::Awaiting { filled, waited_ms };
        None
    }

    /// True while a request is in flight.
    pub fn request_open(&self) -> bool {
        matches!(self.state, LinkState::Awaiting { .. })
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn drain_stale(&mut self) -> Result<(), SensorError> {
        let mut scratch = [0u8; 8];
        while self.transport.available() {
            let n = self
                .transport
                .read(&mut scratch)
                .map_err(|_| SensorError::Channel)?;
            if n == 0 {
                break;
            }
            debug!("us100: drained {n} stale byte(s)");
        }
        Ok(())
    }
}
