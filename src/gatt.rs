//! Identifiers of the Bluetooth LE MIDI GATT profile.
//!
//! A peripheral speaking BLE-MIDI advertises [`MIDI_SERVICE_UUID`]. Its
//! [`MIDI_CHARACTERISTIC_UUID`] characteristic is subscribed to for notifications, and
//! each notification payload is one packet for [`BleMidiParser::push`](crate::BleMidiParser::push).

use uuid::Uuid;

/// The BLE-MIDI service.
pub const MIDI_SERVICE_UUID: Uuid = Uuid::from_u128(0x03b80e5a_ede8_4b33_a751_6ce34ec4c700);

/// The BLE-MIDI I/O characteristic.
pub const MIDI_CHARACTERISTIC_UUID: Uuid = Uuid::from_u128(0x7772e5db_3868_4112_a1a9_f2669d106bf3);

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn canonical_forms() {
        assert_eq!(
            MIDI_SERVICE_UUID.to_string(),
            "03b80e5a-ede8-4b33-a751-6ce34ec4c700"
        );
        assert_eq!(
            MIDI_CHARACTERISTIC_UUID.to_string(),
            "7772e5db-3868-4112-a1a9-f2669d106bf3"
        );
    }
}
