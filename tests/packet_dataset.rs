//! Packets from the BLE-MIDI packet data set
//! (https://github.com/trueroad/BLE_MIDI_packet_data_set).

mod common;

use common::{msg, parse_packets};
use pretty_assertions::assert_eq;

const SYSEX: &[u8] = &[0xF0, 67, 18, 0, 67, 18, 0, 67, 18, 0, 0xF7];

#[test]
fn p3_1_one_midi_message() {
    let messages = parse_packets(&[&[128, 128, 224, 0, 64]]);
    assert_eq!(messages, vec![msg(0, &[0xE0, 0, 64])]);
}

#[test]
fn p3_2_two_midi_messages() {
    let messages = parse_packets(&[&[128, 128, 144, 60, 100, 129, 128, 60, 90]]);
    assert_eq!(
        messages,
        vec![msg(0, &[0x90, 60, 100]), msg(1, &[0x80, 60, 90])]
    );
}

#[test]
fn p3_3_running_status() {
    let messages = parse_packets(&[&[128, 128, 144, 60, 100, 60, 0]]);
    assert_eq!(
        messages,
        vec![msg(0, &[0x90, 60, 100]), msg(0, &[0x90, 60, 0])]
    );
}

#[test]
fn p4_1_mixed_messages() {
    let messages = parse_packets(&[&[
        128, 128, 144, 60, 100, 129, 144, 60, 0, 61, 90, 130, 61, 0, 131, 224, 0, 64,
    ]]);
    assert_eq!(
        messages,
        vec![
            msg(0, &[0x90, 60, 100]),
            msg(1, &[0x90, 60, 0]),
            msg(1, &[0x90, 61, 90]),
            msg(2, &[0x90, 61, 0]),
            msg(3, &[0xE0, 0, 64]),
        ]
    );
}

#[test]
fn p4_2_system_messages_keep_running_status() {
    let messages = parse_packets(&[&[128, 128, 224, 0, 0, 127, 127, 129, 254, 129, 0, 64]]);
    assert_eq!(
        messages,
        vec![
            msg(0, &[0xE0, 0, 0]),
            msg(0, &[0xE0, 127, 127]),
            msg(1, &[0xFE]),
            msg(1, &[0xE0, 0, 64]),
        ]
    );
}

#[test]
fn p5_1_real_time_after_message() {
    let messages = parse_packets(&[&[128, 128, 224, 0, 64, 129, 254]]);
    assert_eq!(messages, vec![msg(0, &[0xE0, 0, 64]), msg(1, &[0xFE])]);
}

#[test]
fn p6_1_sysex_in_one_packet() {
    let messages = parse_packets(&[&[
        128, 128, 240, 67, 18, 0, 67, 18, 0, 67, 18, 0, 129, 247,
    ]]);
    // stamped with the timestamp preceding F7
    assert_eq!(messages, vec![msg(1, SYSEX)]);
}

#[test]
fn p6_2_sysex_across_two_packets() {
    let messages = parse_packets(&[
        &[128, 128, 240, 67, 18, 0],
        &[128, 67, 18, 0, 67, 18, 0, 129, 247],
    ]);
    assert_eq!(messages, vec![msg(1, SYSEX)]);
}

#[test]
fn p6_3_sysex_across_three_packets() {
    let messages = parse_packets(&[
        &[128, 128, 240, 67, 18, 0],
        &[128, 67, 18, 0],
        &[128, 67, 18, 0, 129, 247],
    ]);
    assert_eq!(messages, vec![msg(1, SYSEX)]);
}

#[test]
fn p6_e1_sysex_with_real_time() {
    let messages = parse_packets(&[&[
        128, 128, 240, 67, 18, 0, 129, 254, 67, 18, 0, 67, 18, 0, 130, 247,
    ]]);
    assert_eq!(messages, vec![msg(1, &[0xFE]), msg(2, SYSEX)]);
}

#[test]
fn p6_e2_sysex_across_two_packets_with_real_time() {
    let messages = parse_packets(&[
        &[128, 128, 240, 67, 129, 254, 18, 0],
        &[128, 67, 18, 0, 130, 254, 67, 18, 0, 131, 247],
    ]);
    assert_eq!(
        messages,
        vec![msg(1, &[0xFE]), msg(2, &[0xFE]), msg(3, SYSEX)]
    );
}

#[test]
fn p6_e3_sysex_across_three_packets_with_real_time() {
    let messages = parse_packets(&[
        &[128, 128, 240, 67, 129, 254, 18, 0],
        &[128, 67, 18, 130, 254, 0],
        &[128, 67, 131, 254, 18, 0, 132, 247],
    ]);
    assert_eq!(
        messages,
        vec![
            msg(1, &[0xFE]),
            msg(2, &[0xFE]),
            msg(3, &[0xFE]),
            msg(4, SYSEX),
        ]
    );
}

#[test]
fn timestamp_overflow() {
    let messages = parse_packets(&[&[
        0b1000_1000, // high = 8
        0b1000_0100, // low = 4
        0x90,
        0x3C,
        0x7F,
        0b1000_0010, // low = 2, went backwards
        0x80,
        0x3C,
        0x00,
    ]]);
    assert_eq!(
        messages,
        vec![
            msg((8 << 7) | 4, &[0x90, 0x3C, 0x7F]),
            msg((9 << 7) | 2, &[0x80, 0x3C, 0x00]),
        ]
    );
}
