use alloc::vec::Vec;

use super::{ParserOptions, SysExBuffer};
use crate::{
    MidiMessage, ParseError, ParseErrorKind, ParseResult, Timestamp, reader::ByteCursor,
    status,
};

/// The last channel voice status byte and the length of its messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunningStatus {
    status: u8,
    len: usize,
}

impl RunningStatus {
    fn from_message(message: &[u8]) -> Self {
        Self {
            status: message[0],
            len: message.len(),
        }
    }
}

/// Where the parser is inside a packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum State {
    /// First byte of a packet.
    Header,
    /// The timestamp following the header.
    FirstTimestamp { high: u8 },
    /// A channel voice message with its status byte.
    FullMessage { timestamp: Timestamp },
    /// A timestamp byte in the middle of the packet.
    Timestamp {
        last: Timestamp,
        running: Option<RunningStatus>,
    },
    /// Data bytes reusing the running status.
    RunningStatus {
        timestamp: Timestamp,
        running: RunningStatus,
    },
    /// A system common or real-time message.
    SystemMessage {
        timestamp: Timestamp,
        running: Option<RunningStatus>,
    },
    /// The `0xF0` opening a SysEx block.
    SysExStart { timestamp: Timestamp },
    /// SysEx payload bytes. The SysEx states carry the timestamp of the block, its
    /// payload lives in the parser's [`SysExBuffer`].
    SysExData(Timestamp),
    /// A real-time message interleaved with SysEx payload.
    SysExSystemMessage(Timestamp),
    /// A timestamp byte inside a SysEx block.
    SysExTimestamp(Timestamp),
    /// The `0xF7` closing a SysEx block.
    SysExEnd(Timestamp),
    /// Header of a packet continuing a SysEx block from an earlier packet.
    SysExHeader(Timestamp),
}

/// The outcome of one step of the state machine.
#[derive(Debug)]
pub(crate) enum Transition<'a> {
    /// Nothing to report yet.
    Continue(State),
    /// A complete message. `None` when the packet is exhausted.
    Emit(MidiMessage<'a>, Option<State>),
    /// The packet ended inside a SysEx block.
    Suspend(Timestamp),
}

impl State {
    /// Timestamp of the SysEx block this state is inside of, if any.
    pub(crate) fn into_sysex(self) -> Option<Timestamp> {
        match self {
            State::SysExData(timestamp)
            | State::SysExSystemMessage(timestamp)
            | State::SysExTimestamp(timestamp)
            | State::SysExEnd(timestamp)
            | State::SysExHeader(timestamp) => Some(timestamp),
            _ => None,
        }
    }

    /// Consume the bytes belonging to this state and decide what comes next.
    pub(crate) fn step<'a>(
        self,
        cursor: &mut ByteCursor<'a>,
        sysex: &mut SysExBuffer,
        options: &ParserOptions,
    ) -> ParseResult<Transition<'a>> {
        match self {
            State::Header => {
                let high = cursor.parse_header()?;
                Ok(Transition::Continue(State::FirstTimestamp { high }))
            }
            State::FirstTimestamp { high } => {
                let low = cursor.parse_timestamp()?;
                let timestamp = Timestamp::from_parts(high, low);
                after_timestamp(cursor, timestamp, None).map(Transition::Continue)
            }
            State::Timestamp { last, running } => {
                let low = cursor.parse_timestamp()?;
                after_timestamp(cursor, last.advance(low), running).map(Transition::Continue)
            }
            State::FullMessage { timestamp } => {
                let bytes = cursor.parse_channel_message()?;
                let running = RunningStatus::from_message(bytes);
                let next = after_message(cursor, timestamp, running)?;
                Ok(Transition::Emit(
                    MidiMessage::with_timestamp(timestamp, bytes),
                    next,
                ))
            }
            State::RunningStatus { timestamp, running } => {
                let data = cursor.read_data(running.len - 1)?;
                let mut bytes = Vec::with_capacity(running.len);
                bytes.push(running.status);
                bytes.extend_from_slice(data);
                let next = after_message(cursor, timestamp, running)?;
                Ok(Transition::Emit(
                    MidiMessage::with_timestamp(timestamp, bytes),
                    next,
                ))
            }
            State::SystemMessage { timestamp, running } => {
                let bytes = cursor.parse_system_message()?;
                // Unlike channel messages, data may not follow without a new timestamp.
                let next = (!cursor.eof()).then_some(State::Timestamp {
                    last: timestamp,
                    running,
                });
                Ok(Transition::Emit(
                    MidiMessage::with_timestamp(timestamp, bytes),
                    next,
                ))
            }
            State::SysExStart { timestamp } => {
                cursor.read_byte()?;
                Ok(Transition::Continue(State::SysExData(timestamp)))
            }
            State::SysExData(timestamp) => {
                while !cursor.eof() {
                    let next = cursor.peek()?;
                    if status::is_data_byte(next) {
                        sysex.push(next, cursor.position(), options)?;
                        cursor.read_byte()?;
                    } else if next == status::SYSEX_END {
                        return Ok(Transition::Continue(State::SysExEnd(timestamp)));
                    } else {
                        return Ok(Transition::Continue(State::SysExTimestamp(timestamp)));
                    }
                }
                Ok(Transition::Suspend(timestamp))
            }
            State::SysExTimestamp(last) => {
                let low = cursor.parse_timestamp()?;
                after_sysex_timestamp(cursor, last.advance(low))
            }
            State::SysExHeader(timestamp) => {
                // Only validated, the timestamp carries on from the earlier packet.
                cursor.parse_header()?;
                if cursor.eof() {
                    return Ok(Transition::Suspend(timestamp));
                }
                let next = cursor.peek()?;
                Ok(Transition::Continue(if status::is_data_byte(next) {
                    State::SysExData(timestamp)
                } else if next == status::SYSEX_END {
                    State::SysExEnd(timestamp)
                } else {
                    State::SysExTimestamp(timestamp)
                }))
            }
            State::SysExSystemMessage(timestamp) => {
                let position = cursor.position();
                let byte = cursor.peek()?;
                if !status::is_real_time(byte) {
                    return Err(ParseError::new(
                        position,
                        ParseErrorKind::UnexpectedStatus(byte),
                    ));
                }
                let bytes = cursor.parse_system_message()?;
                let message = MidiMessage::with_timestamp(timestamp, bytes);
                if cursor.eof() {
                    return Ok(Transition::Emit(message, Some(State::SysExData(timestamp))));
                }
                let next = if status::is_data_byte(cursor.peek()?) {
                    State::SysExData(timestamp)
                } else {
                    State::SysExTimestamp(timestamp)
                };
                Ok(Transition::Emit(message, Some(next)))
            }
            State::SysExEnd(timestamp) => {
                cursor.read_byte()?;
                let message = sysex.finish(timestamp);
                let next = (!cursor.eof()).then_some(State::Timestamp {
                    last: timestamp,
                    running: None,
                });
                Ok(Transition::Emit(message, next))
            }
        }
    }
}

/// Picks the state for the byte following a timestamp outside of SysEx.
fn after_timestamp(
    cursor: &ByteCursor<'_>,
    timestamp: Timestamp,
    running: Option<RunningStatus>,
) -> ParseResult<State> {
    let position = cursor.position();
    let next = cursor
        .peek()
        .map_err(|e| e.into_truncated(1, cursor.remaining()))?;
    Ok(match next {
        status::SYSEX_START => State::SysExStart { timestamp },
        status::SYSEX_END => {
            return Err(ParseError::new(position, ParseErrorKind::UnbalancedSysEx));
        }
        0xF1..=0xFF => State::SystemMessage { timestamp, running },
        0x80..=0xEF => State::FullMessage { timestamp },
        _ => match running {
            Some(running) => State::RunningStatus { timestamp, running },
            None => {
                return Err(ParseError::new(
                    position,
                    ParseErrorKind::UnexpectedDataByte(next),
                ));
            }
        },
    })
}

/// Picks the state following a channel voice message.
fn after_message(
    cursor: &ByteCursor<'_>,
    timestamp: Timestamp,
    running: RunningStatus,
) -> ParseResult<Option<State>> {
    if cursor.eof() {
        return Ok(None);
    }
    let next = cursor.peek()?;
    Ok(Some(if status::is_data_byte(next) {
        State::RunningStatus { timestamp, running }
    } else {
        State::Timestamp {
            last: timestamp,
            running: Some(running),
        }
    }))
}

/// Picks the state for the byte following a timestamp inside SysEx.
fn after_sysex_timestamp<'a>(
    cursor: &ByteCursor<'a>,
    timestamp: Timestamp,
) -> ParseResult<Transition<'a>> {
    if cursor.eof() {
        return Ok(Transition::Suspend(timestamp));
    }
    let next = cursor.peek()?;
    Ok(Transition::Continue(if next == status::SYSEX_END {
        State::SysExEnd(timestamp)
    } else if status::is_data_byte(next) {
        State::SysExData(timestamp)
    } else {
        State::SysExSystemMessage(timestamp)
    }))
}
