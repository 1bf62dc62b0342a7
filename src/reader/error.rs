use thiserror::Error;

#[doc = r#"
An error raised while parsing a single BLE-MIDI packet.

Carries the offset inside the packet where parsing stopped.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Parsing packet at position {position}, {kind}")]
pub struct ParseError {
    position: usize,
    pub(crate) kind: ParseErrorKind,
}

/// A kind of error that parsing a packet can produce
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The packet header did not match `10xxxxxx`.
    #[error("expected a header byte (10xxxxxx), got {0:#04x}")]
    MalformedHeader(u8),
    /// A timestamp byte did not have its high bit set.
    #[error("expected a timestamp byte (1xxxxxxx), got {0:#04x}")]
    MalformedTimestamp(u8),
    /// `0xF7` without an open SysEx.
    #[error("SysEx end without a matching SysEx start")]
    UnbalancedSysEx,
    /// The packet ended in the middle of a message.
    #[error("message needs {requested} more byte(s), only {available} left")]
    TruncatedMessage {
        /// Bytes the message still needed.
        requested: usize,
        /// Bytes that were left in the packet.
        available: usize,
    },
    /// Reading out of bounds.
    #[error("Read out of bounds!")]
    OutOfRange,
    /// A data byte where a status byte was required and no running status applies.
    #[error("data byte {0:#04x} without a running status")]
    UnexpectedDataByte(u8),
    /// A status byte where a data byte (or, inside SysEx, a real-time byte) was required.
    #[error("unexpected status byte {0:#04x}")]
    UnexpectedStatus(u8),
    /// The SysEx payload grew past [`ParserOptions::max_sysex_len`](crate::ParserOptions).
    #[error("SysEx payload exceeds {limit} bytes")]
    SysExOverflow {
        /// The configured limit.
        limit: usize,
    },
}

impl ParseError {
    /// Create a parse error from a position and kind
    pub const fn new(position: usize, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }

    /// Returns the error kind.
    pub fn error_kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Returns the position inside the packet where the error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// True if the packet was too short for what it announced
    pub const fn is_truncated(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::TruncatedMessage { .. } | ParseErrorKind::OutOfRange
        )
    }

    /// Create a new out of bounds error
    pub const fn oob(position: usize) -> Self {
        Self {
            position,
            kind: ParseErrorKind::OutOfRange,
        }
    }

    /// Create a new truncated message error
    pub const fn truncated(position: usize, requested: usize, available: usize) -> Self {
        Self {
            position,
            kind: ParseErrorKind::TruncatedMessage {
                requested,
                available,
            },
        }
    }

    /// Turns an out of bounds read into a truncated message, leaving other kinds alone.
    pub(crate) fn into_truncated(self, requested: usize, available: usize) -> Self {
        match self.kind {
            ParseErrorKind::OutOfRange => Self::truncated(self.position, requested, available),
            _ => self,
        }
    }
}

/// The Parse Result type (see [`ParseError`])
pub type ParseResult<T> = Result<T, ParseError>;
