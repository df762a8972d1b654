use crate::errors::ProtocolError;

/// Read-only position over a request buffer.
///
/// Every read consumes the cursor and hands back the value together with a
/// cursor advanced past it, so the underlying buffer is never mutated and the
/// same buffer can be parsed any number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Bytes from the current position to the end of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        self.buf.get(self.pos..).unwrap_or_default()
    }

    pub fn read_u8(self) -> Result<(u8, Self), ProtocolError> {
        let (bytes, next) = self.read_bytes(1)?;
        Ok((bytes[0], next))
    }

    pub fn read_u16_be(self) -> Result<(u16, Self), ProtocolError> {
        let (bytes, next) = self.read_array::<2>()?;
        Ok((u16::from_be_bytes(bytes), next))
    }

    pub fn read_array<const N: usize>(self) -> Result<([u8; N], Self), ProtocolError> {
        let (bytes, next) = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok((out, next))
    }

    pub fn read_bytes(self, len: usize) -> Result<(&'a [u8], Self), ProtocolError> {
        let end = self.checked_end(len)?;
        Ok((&self.buf[self.pos..end], Self::at(self.buf, end)))
    }

    pub fn skip(self, len: usize) -> Result<Self, ProtocolError> {
        let end = self.checked_end(len)?;
        Ok(Self::at(self.buf, end))
    }

    fn checked_end(&self, len: usize) -> Result<usize, ProtocolError> {
        let end = self.pos.saturating_add(len);
        if end > self.buf.len() {
            return Err(ProtocolError::TooShort {
                needed: end,
                available: self.buf.len(),
            });
        }
        Ok(end)
    }
}
