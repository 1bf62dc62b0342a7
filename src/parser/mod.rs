#![doc = r#"
The BLE-MIDI stream parser.

# Packet layout
```text
header    timestamp  message      timestamp  message ...
10hhhhhh  1lllllll   status data  1lllllll   [status] data ...
```

The header carries the upper 6 bits of a 13-bit millisecond timestamp, every timestamp
byte the lower 7. A message without status byte reuses the running status of the
previous channel voice message. A SysEx block may be spread over several packets; a
packet continuing one starts with its header followed directly by payload.
"#]

mod sysex;
use sysex::SysExBuffer;

mod state;
use state::{State, Transition};

use crate::{MessageKind, MidiMessage, ParseResult, Timestamp};

/// Knobs for [`BleMidiParser`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserOptions {
    /// Upper bound for the SysEx payload (delimiters excluded). Unbounded if `None`.
    pub max_sysex_len: Option<usize>,
}

impl ParserOptions {
    /// Limit the SysEx payload to `len` bytes.
    pub fn with_max_sysex_len(mut self, len: usize) -> Self {
        self.max_sysex_len = Some(len);
        self
    }
}

#[doc = r#"
Turns BLE-MIDI packets into [`MidiMessage`]s.

One parser handles the packets of one device. Packets must be pushed in the order
the transport delivered them: timestamps and SysEx blocks are reconstructed across
packet boundaries.

# Errors
A malformed packet fails its [`push`](Self::push) call. Messages handed to the sink
before the failure stay delivered. A SysEx block pending from earlier packets is kept
exactly as it was, so the next well-formed packet picks it up again, unless the failed
packet had already closed it and handed it to the sink.

# Example
```rust
# use ble_midi_parser::prelude::*;
let mut parser = BleMidiParser::default();
let mut messages = Vec::new();

parser.push(&[0x80, 0x80, 0xF0, 67, 18, 0], |m| messages.push(m.into_owned())).unwrap();
assert!(messages.is_empty());
assert!(parser.has_pending_sysex());

parser.push(&[0x80, 67, 18, 0, 0x81, 0xF7], |m| messages.push(m.into_owned())).unwrap();
assert_eq!(messages, [MidiMessage::new(1, vec![0xF0, 67, 18, 0, 67, 18, 0, 0xF7])]);
```
"#]
#[derive(Debug, Clone, Default)]
pub struct BleMidiParser {
    options: ParserOptions,
    /// Timestamp of the SysEx block left open by the last packet.
    sysex: Option<Timestamp>,
    sysex_data: SysExBuffer,
}

impl BleMidiParser {
    /// Create a parser with the given options
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            sysex: None,
            sysex_data: SysExBuffer::default(),
        }
    }

    /// The options this parser was created with.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// True while a SysEx block is open, waiting for more packets.
    pub fn has_pending_sysex(&self) -> bool {
        self.sysex.is_some()
    }

    /// Forget any SysEx block left open by earlier packets.
    pub fn reset(&mut self) {
        self.sysex = None;
        self.sysex_data.clear();
    }

    /// Parse one packet, calling `sink` for every complete message in order.
    ///
    /// Packets shorter than two bytes are ignored.
    pub fn push<'p, F>(&mut self, packet: &'p [u8], mut sink: F) -> ParseResult<()>
    where
        F: FnMut(MidiMessage<'p>),
    {
        if packet.len() < 2 {
            #[cfg(feature = "tracing")]
            tracing::trace!("ignoring {} byte packet", packet.len());
            return Ok(());
        }

        let mut cursor = crate::reader::ByteCursor::new(packet);
        let resumed = self.sysex.take();
        let checkpoint = self.sysex_data.len();
        let mut resumed_open = resumed.is_some();
        let mut state = match resumed {
            Some(timestamp) => State::SysExHeader(timestamp),
            None => State::Header,
        };

        let outcome = loop {
            if cursor.eof() {
                break Ok(state.into_sysex());
            }
            match state.step(&mut cursor, &mut self.sysex_data, &self.options) {
                Ok(Transition::Continue(next)) => state = next,
                Ok(Transition::Emit(message, next)) => {
                    // the first SysEx this packet completes is the resumed block
                    if message.kind() == MessageKind::SystemExclusive {
                        resumed_open = false;
                    }
                    sink(message);
                    match next {
                        Some(next) => state = next,
                        None => break Ok(None),
                    }
                }
                Ok(Transition::Suspend(timestamp)) => break Ok(Some(timestamp)),
                Err(e) => break Err(e),
            }
        };

        match outcome {
            Ok(pending) => {
                #[cfg(feature = "tracing")]
                {
                    if pending.is_some() {
                        tracing::trace!(
                            "SysEx continues in next packet, {} byte(s) so far",
                            self.sysex_data.len()
                        );
                    }
                }
                self.sysex = pending;
                Ok(())
            }
            Err(e) => {
                if resumed_open {
                    // the block from earlier packets was neither closed nor delivered
                    self.sysex_data.truncate(checkpoint);
                    self.sysex = resumed;
                } else {
                    self.sysex_data.clear();
                }
                Err(e)
            }
        }
    }
}
