//! Loopback transport
//!
//! Bytes written come back out of reads, in order. Used for bring-up
//! checks of firmware that talks through a [`Device`](periphio_core::Device)
//! without a peripheral attached, and in tests.

use heapless::Deque;
use periphio_core::{Target, TransferError, TransferKind, Transport};

/// In-memory FIFO transport holding up to `N` bytes
#[derive(Default)]
pub struct LoopbackTransport<const N: usize> {
    fifo: Deque<u8, N>,
}

impl<const N: usize> LoopbackTransport<N> {
    pub const fn new() -> Self {
        Self { fifo: Deque::new() }
    }

    /// Bytes waiting to be read
    pub fn pending(&self) -> usize {
        self.fifo.len()
    }

    pub fn clear(&mut self) {
        self.fifo.clear();
    }
}

impl<const N: usize> Transport for LoopbackTransport<N> {
    /// Drain up to `buf.len()` bytes
    fn read_ex(&mut self, _target: Target, buf: &mut [u8]) -> Result<usize, TransferError> {
        let mut n = 0;
        for slot in buf.iter_mut() {
            match self.fifo.pop_front() {
                Some(b) => *slot = b,
                None => break,
            }
            n += 1;
        }
        Ok(n)
    }

    /// Queue all of `buf`, or nothing if it does not fit
    fn write_ex(&mut self, _target: Target, buf: &[u8]) -> Result<usize, TransferError> {
        if N - self.fifo.len() < buf.len() {
            return Err(TransferError::new(TransferKind::Overrun));
        }
        for &b in buf {
            // Capacity checked above
            let _ = self.fifo.push_back(b);
        }
        Ok(buf.len())
    }

    fn on_reset(&mut self) -> Result<(), TransferError> {
        self.fifo.clear();
        Ok(())
    }

    fn on_shutdown(&mut self) {
        self.fifo.clear();
    }
}
