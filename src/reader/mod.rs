#![doc = r#"
Byte level access to a single BLE-MIDI packet.

[`ByteCursor`] walks forward over the packet and knows just enough about the BLE-MIDI
framing (header and timestamp bytes) and MIDI status bytes (message lengths) to hand
out whole messages. All reads are sub-slices of the packet; nothing is copied.
"#]

mod error;
pub use error::*;

use crate::status;

/// A forward-only reader over the bytes of one packet.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Start reading at the beginning of `bytes`.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// True once every byte has been consumed.
    #[inline]
    pub const fn eof(&self) -> bool {
        self.position >= self.bytes.len()
    }

    /// Offset of the next byte to be read.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes left.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.position)
    }

    /// Returns the next byte without advancing.
    pub fn peek(&self) -> ParseResult<u8> {
        self.bytes
            .get(self.position)
            .copied()
            .ok_or(ParseError::oob(self.position))
    }

    /// Returns the next byte and advances past it.
    pub fn read_byte(&mut self) -> ParseResult<u8> {
        let byte = self.peek()?;
        self.position += 1;
        Ok(byte)
    }

    /// Reads a packet header (`10xxxxxx`), returning the upper 6 timestamp bits.
    pub fn parse_header(&mut self) -> ParseResult<u8> {
        let position = self.position;
        let byte = self.read_byte()?;
        if byte & 0xC0 != 0x80 {
            return Err(ParseError::new(
                position,
                ParseErrorKind::MalformedHeader(byte),
            ));
        }
        Ok(byte & 0x3F)
    }

    /// Reads a timestamp byte (`1xxxxxxx`), returning the lower 7 timestamp bits.
    pub fn parse_timestamp(&mut self) -> ParseResult<u8> {
        let position = self.position;
        let byte = self.read_byte()?;
        if status::is_data_byte(byte) {
            return Err(ParseError::new(
                position,
                ParseErrorKind::MalformedTimestamp(byte),
            ));
        }
        Ok(byte & 0x7F)
    }

    /// Reads a complete channel voice message, status byte included.
    pub fn parse_channel_message(&mut self) -> ParseResult<&'a [u8]> {
        let len = status::channel_message_len(self.peek()?);
        self.read_message(len)
    }

    /// Reads a complete system common or system real-time message.
    pub fn parse_system_message(&mut self) -> ParseResult<&'a [u8]> {
        let len = status::system_message_len(self.peek()?);
        self.read_message(len)
    }

    /// Reads exactly `len` bytes.
    pub fn read(&mut self, len: usize) -> ParseResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(ParseError::oob(self.position));
        }
        let bytes = &self.bytes[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }

    /// Reads exactly `len` bytes, all of which must be data bytes.
    ///
    /// Running out of bytes is reported as a truncated message.
    pub fn read_data(&mut self, len: usize) -> ParseResult<&'a [u8]> {
        let start = self.position;
        let available = self.remaining();
        let bytes = self
            .read(len)
            .map_err(|e| e.into_truncated(len, available))?;
        match bytes.iter().position(|b| !status::is_data_byte(*b)) {
            Some(offset) => Err(ParseError::new(
                start + offset,
                ParseErrorKind::UnexpectedStatus(bytes[offset]),
            )),
            None => Ok(bytes),
        }
    }

    /// A status byte followed by `len - 1` data bytes.
    fn read_message(&mut self, len: usize) -> ParseResult<&'a [u8]> {
        let start = self.position;
        let available = self.remaining();
        let bytes = self
            .read(len)
            .map_err(|e| e.into_truncated(len, available))?;
        match bytes[1..].iter().position(|b| !status::is_data_byte(*b)) {
            Some(offset) => Err(ParseError::new(
                start + 1 + offset,
                ParseErrorKind::UnexpectedStatus(bytes[1 + offset]),
            )),
            None => Ok(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_advance() {
        let cursor = ByteCursor::new(&[0x90, 60]);
        assert_eq!(cursor.peek(), Ok(0x90));
        assert_eq!(cursor.peek(), Ok(0x90));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn read_past_end_is_out_of_range() {
        let mut cursor = ByteCursor::new(&[0x01]);
        assert_eq!(cursor.read_byte(), Ok(0x01));
        assert!(cursor.eof());
        assert_eq!(cursor.peek(), Err(ParseError::oob(1)));
        assert_eq!(cursor.read_byte(), Err(ParseError::oob(1)));

        let mut cursor = ByteCursor::new(&[0x01, 0x02]);
        assert_eq!(cursor.read(3), Err(ParseError::oob(0)));
        assert_eq!(cursor.read(2), Ok(&[0x01, 0x02][..]));
    }

    #[test]
    fn header() {
        let mut cursor = ByteCursor::new(&[0xBF, 0x40]);
        assert_eq!(cursor.parse_header(), Ok(0x3F));
        let err = cursor.parse_header().unwrap_err();
        assert_eq!(err.position(), 1);
        assert_eq!(err.error_kind(), &ParseErrorKind::MalformedHeader(0x40));

        // a set second bit is not a header either
        let mut cursor = ByteCursor::new(&[0xC0]);
        assert_eq!(
            cursor.parse_header().unwrap_err().error_kind(),
            &ParseErrorKind::MalformedHeader(0xC0)
        );
    }

    #[test]
    fn timestamp() {
        let mut cursor = ByteCursor::new(&[0xFF, 0x7F]);
        assert_eq!(cursor.parse_timestamp(), Ok(0x7F));
        assert_eq!(
            cursor.parse_timestamp(),
            Err(ParseError::new(1, ParseErrorKind::MalformedTimestamp(0x7F)))
        );
    }

    #[test]
    fn channel_messages_by_length() {
        let mut cursor = ByteCursor::new(&[0xE0, 0x00, 0x40, 0xC1, 0x05, 0xD2, 0x33]);
        assert_eq!(cursor.parse_channel_message(), Ok(&[0xE0, 0x00, 0x40][..]));
        assert_eq!(cursor.parse_channel_message(), Ok(&[0xC1, 0x05][..]));
        assert_eq!(cursor.parse_channel_message(), Ok(&[0xD2, 0x33][..]));
        assert!(cursor.eof());
    }

    #[test]
    fn system_messages_by_length() {
        let mut cursor = ByteCursor::new(&[0xF2, 0x10, 0x20, 0xF6, 0xF8, 0xF1, 0x7F, 0xF3, 0x02]);
        assert_eq!(cursor.parse_system_message(), Ok(&[0xF2, 0x10, 0x20][..]));
        assert_eq!(cursor.parse_system_message(), Ok(&[0xF6][..]));
        assert_eq!(cursor.parse_system_message(), Ok(&[0xF8][..]));
        assert_eq!(cursor.parse_system_message(), Ok(&[0xF1, 0x7F][..]));
        assert_eq!(cursor.parse_system_message(), Ok(&[0xF3, 0x02][..]));
    }

    #[test]
    fn short_message_is_truncated() {
        let mut cursor = ByteCursor::new(&[0x80, 0x80, 0x90, 60]);
        cursor.read(2).unwrap();
        assert_eq!(
            cursor.parse_channel_message(),
            Err(ParseError::truncated(2, 3, 2))
        );
    }

    #[test]
    fn status_inside_message_is_rejected() {
        let mut cursor = ByteCursor::new(&[0x90, 60, 0x81]);
        assert_eq!(
            cursor.parse_channel_message(),
            Err(ParseError::new(2, ParseErrorKind::UnexpectedStatus(0x81)))
        );

        let mut cursor = ByteCursor::new(&[60, 0xF8]);
        assert_eq!(
            cursor.read_data(2),
            Err(ParseError::new(1, ParseErrorKind::UnexpectedStatus(0xF8)))
        );
    }
}
