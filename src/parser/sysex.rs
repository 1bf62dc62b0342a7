use alloc::vec::Vec;

use super::ParserOptions;
use crate::{MidiMessage, ParseError, ParseErrorKind, ParseResult, Timestamp};

/// Payload of the System Exclusive block that has been opened with `0xF0` but not
/// closed yet.
///
/// Owned by the parser rather than by the parse state, so a continuation packet appends
/// to it in place and a failed packet can be rolled back by length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SysExBuffer {
    data: Vec<u8>,
}

impl SysExBuffer {
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn push(
        &mut self,
        byte: u8,
        position: usize,
        options: &ParserOptions,
    ) -> ParseResult<()> {
        if let Some(limit) = options.max_sysex_len {
            if self.data.len() >= limit {
                return Err(ParseError::new(
                    position,
                    ParseErrorKind::SysExOverflow { limit },
                ));
            }
        }
        self.data.push(byte);
        Ok(())
    }

    /// Drop whatever was appended after the first `len` bytes.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    pub(crate) fn clear(&mut self) {
        self.data.clear();
    }

    /// Closes the block, producing `[0xF0, ..data, 0xF7]`. The buffer is left empty.
    pub(crate) fn finish(&mut self, timestamp: Timestamp) -> MidiMessage<'static> {
        let message = MidiMessage::sysex(timestamp, &self.data);
        self.data.clear();
        message
    }
}
