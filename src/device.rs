#![doc = r#"
Glue between a BLE-MIDI notification source and the parser.

Whatever Bluetooth stack is in use, it only has to do two things: hand every
notification payload of the MIDI characteristic to [`MidiDevice::handle_notification`]
and report a lost connection through [`MidiDevice::handle_disconnect`]. Parsed
messages come out of the receiver as [`DeviceEvent`]s, on whichever thread reads it.

```rust
# use ble_midi_parser::prelude::*;
let (mut device, events) = MidiDevice::new(ParserOptions::default());

device.handle_notification(&[0x80, 0x80, 0xE0, 0x00, 0x40]).unwrap();
device.handle_disconnect();

assert_eq!(
    events.try_iter().collect::<Vec<_>>(),
    [
        DeviceEvent::Message(MidiMessage::new(0, vec![0xE0, 0x00, 0x40])),
        DeviceEvent::Disconnect,
    ]
);
```
"#]

use crossbeam_channel::{Receiver, Sender};

use crate::{BleMidiParser, MidiMessage, ParseResult, ParserOptions};

/// Something that happened on a [`MidiDevice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    /// A complete MIDI message.
    Message(MidiMessage<'static>),
    /// The connection was lost.
    Disconnect,
}

/// One connected BLE-MIDI peripheral.
#[derive(Debug)]
pub struct MidiDevice {
    parser: BleMidiParser,
    events: Sender<DeviceEvent>,
    connected: bool,
}

impl MidiDevice {
    /// Create a device and the receiving end of its events.
    pub fn new(options: ParserOptions) -> (Self, Receiver<DeviceEvent>) {
        let (events, receiver) = crossbeam_channel::unbounded();
        let device = Self {
            parser: BleMidiParser::new(options),
            events,
            connected: true,
        };
        (device, receiver)
    }

    /// False after [`handle_disconnect`](Self::handle_disconnect) until the next
    /// notification arrives.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Parse the payload of one characteristic notification.
    ///
    /// Messages decoded before an error are still forwarded. Whether a malformed packet
    /// should end the connection is up to the caller.
    pub fn handle_notification(&mut self, payload: &[u8]) -> ParseResult<()> {
        self.connected = true;
        let events = &self.events;
        let result = self.parser.push(payload, |message| {
            // a dropped receiver just means nobody is listening anymore
            let _ = events.send(DeviceEvent::Message(message.into_owned()));
        });

        #[cfg(feature = "tracing")]
        {
            if let Err(e) = &result {
                tracing::warn!("dropping BLE-MIDI packet: {e}");
            }
        }

        result
    }

    /// The transport reported the connection as gone.
    ///
    /// Drops any half received SysEx block. Sends [`DeviceEvent::Disconnect`] once,
    /// repeated calls are ignored.
    pub fn handle_disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.connected = false;
        self.parser.reset();
        let _ = self.events.send(DeviceEvent::Disconnect);
    }
}
