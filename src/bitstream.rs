//! Bit-at-a-time I/O over byte streams. Bits are packed most significant
//! first; the last byte of a stream is padded with zero bits.

use std::io::{self, ErrorKind, Read, Write};

use bitvec::prelude::*;

/// Bits in the order they are packed on the wire.
pub type Bits = BitVec<u8, Msb0>;

/// Anything the decoder can pull bits from.
pub trait BitSource {
    /// Returns `None` once the source is exhausted.
    fn read_bit(&mut self) -> io::Result<Option<bool>>;
}

#[derive(Debug)]
pub struct BitWriter<W: Write> {
    inner: Option<W>,
    pending: Bits,
    written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: Some(inner),
            pending: Bits::new(),
            written: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.pending.push(bit);
        self.written += 1;
        self.drain()
    }

    pub fn write_bits(&mut self, bits: &BitSlice<u8, Msb0>) -> io::Result<()> {
        self.pending.extend_from_bitslice(bits);
        self.written += bits.len() as u64;
        self.drain()
    }

    /// Total number of bits accepted so far, padding excluded.
    pub fn bits_written(&self) -> u64 {
        self.written
    }

    /// Pads and writes the final partial byte, flushes, and hands back the
    /// underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.flush_pending()?;
        let mut inner = self
            .inner
            .take()
            .ok_or_else(|| io::Error::new(ErrorKind::Other, "bit writer already finished"))?;
        inner.flush()?;
        Ok(inner)
    }

    // writes out every complete byte, keeping the remainder
    fn drain(&mut self) -> io::Result<()> {
        let full = self.pending.len() / 8 * 8;
        if full == 0 {
            return Ok(());
        }
        let rest = self.pending.split_off(full);
        if let Some(inner) = self.inner.as_mut() {
            inner.write_all(self.pending.as_raw_slice())?;
        }
        self.pending = rest;
        Ok(())
    }

    fn flush_pending(&mut self) -> io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let padded = (self.pending.len() + 7) / 8 * 8;
        self.pending.resize(padded, false);
        self.drain()
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        if self.inner.is_some() {
            // errors have nowhere to go from here
            let _ = self.flush_pending();
            if let Some(inner) = self.inner.as_mut() {
                let _ = inner.flush();
            }
        }
    }
}

#[derive(Debug)]
pub struct BitReader<R: Read> {
    inner: R,
    current: u8,
    // bits of `current` already handed out; 8 means a new byte is needed
    consumed: usize,
}

impl<R: Read> BitReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            current: 0,
            consumed: 8,
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> BitSource for BitReader<R> {
    fn read_bit(&mut self) -> io::Result<Option<bool>> {
        if self.consumed == 8 {
            match self.next_byte()? {
                Some(b) => {
                    self.current = b;
                    self.consumed = 0;
                }
                None => return Ok(None),
            }
        }
        let bit = self.current.view_bits::<Msb0>()[self.consumed];
        self.consumed += 1;
        Ok(Some(bit))
    }
}

/// In-memory cursor over a bit slice.
#[derive(Debug, Clone)]
pub struct SliceBits<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    pos: usize,
}

impl<'a> SliceBits<'a> {
    pub fn new(bits: &'a BitSlice<u8, Msb0>) -> Self {
        Self { bits, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl BitSource for SliceBits<'_> {
    fn read_bit(&mut self) -> io::Result<Option<bool>> {
        let bit = self.bits.get(self.pos).map(|b| *b);
        if bit.is_some() {
            self.pos += 1;
        }
        Ok(bit)
    }
}
