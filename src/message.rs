use alloc::{borrow::Cow, vec::Vec};

use crate::{
    Timestamp,
    status::{self, ChannelVoiceKind, SystemCommonKind, SystemRealTimeKind},
};

#[doc = r#"
One complete MIDI message together with its reconstructed BLE-MIDI timestamp.

The bytes are borrowed from the packet whenever the message appears there in one piece.
Messages the parser has to assemble (running status, SysEx) own their bytes.

# Example
```rust
# use ble_midi_parser::prelude::*;
let message = MidiMessage::new(42, vec![0x90, 60, 100]);

assert_eq!(message.timestamp_ms(), 42);
assert_eq!(message.kind(), MessageKind::ChannelVoice(ChannelVoiceKind::NoteOn));
```
"#]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiMessage<'a> {
    timestamp: Timestamp,
    bytes: Cow<'a, [u8]>,
}

impl<'a> MidiMessage<'a> {
    /// Create a message stamped with `timestamp_ms` (reduced to 13 bits).
    pub fn new<B>(timestamp_ms: u16, bytes: B) -> Self
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Self::with_timestamp(Timestamp::new(timestamp_ms), bytes)
    }

    pub(crate) fn with_timestamp<B>(timestamp: Timestamp, bytes: B) -> Self
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Self {
            timestamp,
            bytes: bytes.into(),
        }
    }

    /// The reconstructed timestamp
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The reconstructed timestamp in milliseconds, `0..=8191`.
    pub const fn timestamp_ms(&self) -> u16 {
        self.timestamp.ms()
    }

    /// The raw message, status byte first.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The status byte.
    pub fn status(&self) -> u8 {
        self.bytes.first().copied().unwrap_or_default()
    }

    /// What kind of message this is, judged by its status byte.
    pub fn kind(&self) -> MessageKind {
        MessageKind::from_status(self.status())
    }

    /// Detach the message from the packet it was parsed from.
    pub fn into_owned(self) -> MidiMessage<'static> {
        MidiMessage {
            timestamp: self.timestamp,
            bytes: Cow::Owned(self.bytes.into_owned()),
        }
    }

    /// Consume the message, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes.into_owned()
    }
}

impl MidiMessage<'static> {
    /// Builds `[0xF0, ..data, 0xF7]`.
    pub(crate) fn sysex(timestamp: Timestamp, data: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(data.len() + 2);
        bytes.push(status::SYSEX_START);
        bytes.extend_from_slice(data);
        bytes.push(status::SYSEX_END);
        Self::with_timestamp(timestamp, bytes)
    }
}

/// The broad category of a [`MidiMessage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageKind {
    /// `0x80..=0xEF`
    ChannelVoice(ChannelVoiceKind),
    /// `0xF0 .. 0xF7`
    SystemExclusive,
    /// `0xF1..=0xF6`
    SystemCommon(SystemCommonKind),
    /// `0xF8..=0xFF`
    SystemRealTime(SystemRealTimeKind),
    /// A data byte or a stray `0xF7` in status position.
    Unknown(u8),
}

impl MessageKind {
    /// Classify a status byte.
    pub fn from_status(status: u8) -> Self {
        if let Some(kind) = ChannelVoiceKind::from_status(status) {
            return Self::ChannelVoice(kind);
        }
        if status == status::SYSEX_START {
            return Self::SystemExclusive;
        }
        if let Ok(kind) = SystemCommonKind::try_from(status) {
            return Self::SystemCommon(kind);
        }
        match SystemRealTimeKind::try_from(status) {
            Ok(kind) => Self::SystemRealTime(kind),
            Err(_) => Self::Unknown(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrowed_and_owned_compare_equal() {
        let packet: [u8; 5] = [0x80, 0x80, 0xE0, 0x00, 0x40];
        let borrowed = MidiMessage::new(0, &packet[2..]);
        let owned = MidiMessage::new(0, alloc::vec![0xE0, 0x00, 0x40]);
        assert_eq!(borrowed, owned);
        assert_eq!(borrowed.into_owned(), owned);
    }

    #[test]
    fn sysex_is_delimited() {
        let message = MidiMessage::sysex(Timestamp::new(1), &[67, 18, 0]);
        assert_eq!(message.bytes(), &[0xF0, 67, 18, 0, 0xF7]);
        assert_eq!(message.kind(), MessageKind::SystemExclusive);
    }

    #[test]
    fn kinds() {
        assert_eq!(
            MessageKind::from_status(0xC3),
            MessageKind::ChannelVoice(ChannelVoiceKind::ProgramChange)
        );
        assert_eq!(
            MessageKind::from_status(0xF2),
            MessageKind::SystemCommon(SystemCommonKind::SongPosition)
        );
        assert_eq!(
            MessageKind::from_status(0xFE),
            MessageKind::SystemRealTime(SystemRealTimeKind::ActiveSensing)
        );
        assert_eq!(MessageKind::from_status(0xF7), MessageKind::Unknown(0xF7));
        assert_eq!(MessageKind::from_status(0x10), MessageKind::Unknown(0x10));
    }

    #[test]
    fn timestamp_is_reduced_to_13_bits() {
        assert_eq!(MidiMessage::new(8192 + 5, alloc::vec![0xF8]).timestamp_ms(), 5);
    }
}
