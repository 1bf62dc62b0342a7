#![allow(dead_code)]

use ble_midi_parser::prelude::*;

/// Push every packet in order, collecting the messages.
///
/// Panics if any packet fails to parse.
pub fn parse_packets(packets: &[&[u8]]) -> Vec<MidiMessage<'static>> {
    let mut parser = BleMidiParser::default();
    parse_with(&mut parser, packets)
}

pub fn parse_with(parser: &mut BleMidiParser, packets: &[&[u8]]) -> Vec<MidiMessage<'static>> {
    let mut messages = Vec::new();
    for (i, packet) in packets.iter().enumerate() {
        if let Err(e) = parser.push(packet, |m| messages.push(m.into_owned())) {
            panic!("packet {i} {packet:02x?} failed: {e}");
        }
    }
    messages
}

pub fn msg(timestamp_ms: u16, bytes: &[u8]) -> MidiMessage<'static> {
    MidiMessage::new(timestamp_ms, bytes.to_vec())
}
