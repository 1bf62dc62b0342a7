#![doc = r#"
Decode BLE-MIDI notification packets into timestamped MIDI messages.

A BLE-MIDI peripheral sends its MIDI stream as a series of small GATT notifications.
Each packet starts with a header byte carrying the high bits of a 13-bit millisecond
timestamp, and every message inside is preceded by a timestamp byte carrying the low
bits. Messages may use running status, and a System Exclusive block may be spread over
any number of packets with real-time messages interleaved.

[`BleMidiParser`] takes care of all of that. Push packets in the order they arrived and
receive complete [`MidiMessage`]s through a closure:

```rust
use ble_midi_parser::prelude::*;

let mut parser = BleMidiParser::default();
let mut messages = Vec::new();

// header, timestamp, note on, timestamp, note off
parser
    .push(&[0x80, 0x80, 0x90, 60, 100, 0x81, 0x80, 60, 90], |message| {
        messages.push(message.into_owned())
    })
    .unwrap();

assert_eq!(messages[0], MidiMessage::new(0, vec![0x90, 60, 100]));
assert_eq!(messages[1], MidiMessage::new(1, vec![0x80, 60, 90]));
```
"#]
#![warn(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "device")]
pub mod device;
pub mod gatt;
mod message;
pub mod parser;
pub mod reader;
pub mod status;
mod timestamp;

pub use message::*;
pub use parser::{BleMidiParser, ParserOptions};
pub use reader::{ParseError, ParseErrorKind, ParseResult};
pub use timestamp::*;

/// Commonly used types
pub mod prelude {
    #[cfg(feature = "device")]
    pub use crate::device::{DeviceEvent, MidiDevice};
    pub use crate::{
        BleMidiParser, MessageKind, MidiMessage, ParseError, ParseErrorKind, ParseResult,
        ParserOptions, Timestamp,
        status::{ChannelVoiceKind, SystemCommonKind, SystemRealTimeKind},
    };
}
