#![doc = r#"
Classification of MIDI status bytes.

The parser only looks at status bytes to find out where a message ends. These tables
answer that question and nothing more: no channel numbers, no note names.

# Layout
```text
0x00..=0x7F  data byte
0x80..=0xEF  channel voice (high nibble = kind, low nibble = channel)
0xF0         SysEx start
0xF1..=0xF6  system common
0xF7         SysEx end
0xF8..=0xFF  system real-time
```
"#]

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Start of a System Exclusive block.
pub const SYSEX_START: u8 = 0xF0;
/// End of a System Exclusive block.
pub const SYSEX_END: u8 = 0xF7;

/// Returns true if the high bit is clear.
#[inline]
pub const fn is_data_byte(byte: u8) -> bool {
    byte & 0x80 == 0
}

/// Returns true for the single byte System Real-Time range.
#[inline]
pub const fn is_real_time(byte: u8) -> bool {
    byte >= 0xF8
}

/// The kind of a channel voice message, taken from the high nibble of its status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ChannelVoiceKind {
    /// `0x8n`
    NoteOff = 0x8,
    /// `0x9n`
    NoteOn = 0x9,
    /// `0xAn`
    PolyPressure = 0xA,
    /// `0xBn`
    ControlChange = 0xB,
    /// `0xCn`
    ProgramChange = 0xC,
    /// `0xDn`
    ChannelPressure = 0xD,
    /// `0xEn`
    PitchBend = 0xE,
}

impl ChannelVoiceKind {
    /// Classify a status byte. `None` for anything outside `0x80..=0xEF`.
    pub fn from_status(status: u8) -> Option<Self> {
        Self::try_from(status >> 4).ok()
    }

    /// Length of the complete message, status byte included.
    pub const fn message_len(self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 2,
            _ => 3,
        }
    }
}

/// Length of a channel voice message starting with `status`.
///
/// Anything that is not one of the 3 byte kinds is treated as a 2 byte message.
pub fn channel_message_len(status: u8) -> usize {
    ChannelVoiceKind::from_status(status)
        .map(ChannelVoiceKind::message_len)
        .unwrap_or(2)
}

/// System common messages, `0xF1..=0xF6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SystemCommonKind {
    /// MIDI Time Code quarter frame, one data byte.
    TimeCodeQuarterFrame = 0xF1,
    /// Song position pointer, two data bytes.
    SongPosition = 0xF2,
    /// Song select, one data byte.
    SongSelect = 0xF3,
    /// Undefined.
    UndefinedF4 = 0xF4,
    /// Undefined.
    UndefinedF5 = 0xF5,
    /// Tune request, no data.
    TuneRequest = 0xF6,
}

impl SystemCommonKind {
    /// Length of the complete message, status byte included.
    pub const fn message_len(self) -> usize {
        match self {
            Self::TimeCodeQuarterFrame | Self::SongSelect => 2,
            Self::SongPosition => 3,
            Self::UndefinedF4 | Self::UndefinedF5 | Self::TuneRequest => 1,
        }
    }
}

/// Single byte System Real-Time messages, `0xF8..=0xFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SystemRealTimeKind {
    /// Sent 24 times per quarter note.
    TimingClock = 0xF8,
    /// Undefined.
    UndefinedF9 = 0xF9,
    /// Start the current sequence.
    Start = 0xFA,
    /// Continue from where the sequence stopped.
    Continue = 0xFB,
    /// Stop the current sequence.
    Stop = 0xFC,
    /// Undefined.
    UndefinedFD = 0xFD,
    /// Keep-alive, expected every 300ms once started.
    ActiveSensing = 0xFE,
    /// Reset all receivers.
    Reset = 0xFF,
}

/// Length of a system message (common or real-time) starting with `status`.
pub fn system_message_len(status: u8) -> usize {
    SystemCommonKind::try_from(status)
        .map(SystemCommonKind::message_len)
        .unwrap_or(1)
}
