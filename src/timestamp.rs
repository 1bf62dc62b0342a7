use core::fmt;

/// The 13-bit millisecond counter carried by BLE-MIDI packets.
///
/// The packet header holds the upper 6 bits and every timestamp byte the lower 7 bits.
/// After the first timestamp of a packet only the lower bits are sent again, so the
/// upper bits have to be inferred: a low value smaller than the previous one means the
/// 7-bit counter wrapped. See [`Timestamp::advance`].
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(u16);

impl Timestamp {
    /// Zero.
    pub const ZERO: Self = Self(0);
    /// The largest representable value, 8191ms.
    pub const MAX: Self = Self(Self::MASK);

    const MASK: u16 = 0x1FFF;
    const LOW_MASK: u16 = 0x7F;

    /// Creates a timestamp from milliseconds, keeping only the lower 13 bits.
    pub const fn new(ms: u16) -> Self {
        Self(ms & Self::MASK)
    }

    /// Combine the 6 bits of a header byte with the 7 bits of a timestamp byte.
    pub const fn from_parts(high: u8, low: u8) -> Self {
        Self((((high & 0x3F) as u16) << 7) | (low as u16 & Self::LOW_MASK))
    }

    /// Milliseconds, `0..=8191`.
    #[inline]
    pub const fn ms(&self) -> u16 {
        self.0
    }

    /// The 6 bits carried by a header byte.
    #[inline]
    pub const fn high(&self) -> u8 {
        (self.0 >> 7) as u8
    }

    /// The 7 bits carried by a timestamp byte.
    #[inline]
    pub const fn low(&self) -> u8 {
        (self.0 & Self::LOW_MASK) as u8
    }

    /// The timestamp that follows `self` once a new low part has been read.
    ///
    /// The high part is kept unless the result would go backwards, in which case the
    /// 7-bit counter overflowed and the high part is incremented. The 13-bit counter
    /// itself wraps back to zero after 8191.
    pub const fn advance(self, low: u8) -> Self {
        let low = low as u16 & Self::LOW_MASK;
        let fixed = (self.0 & !Self::LOW_MASK) | low;
        if fixed < self.0 {
            Self(((((self.0 >> 7) + 1) << 7) | low) & Self::MASK)
        } else {
            Self(fixed)
        }
    }
}

impl From<Timestamp> for u16 {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[test]
fn from_parts_combines_header_and_timestamp() {
    assert_eq!(Timestamp::from_parts(0, 0).ms(), 0);
    assert_eq!(Timestamp::from_parts(1, 1).ms(), 129);
    assert_eq!(Timestamp::from_parts(0x3F, 0x7F), Timestamp::MAX);
    // header and timestamp marker bits are ignored
    assert_eq!(Timestamp::from_parts(0x88, 0x84).ms(), (8 << 7) | 4);
}

#[test]
fn advance_keeps_high_part() {
    let ts = Timestamp::from_parts(1, 1);
    assert_eq!(ts.advance(5).ms(), 133);
    assert_eq!(ts.advance(1), ts);
}

#[test]
fn advance_detects_low_overflow() {
    let ts = Timestamp::from_parts(8, 4);
    assert_eq!(ts.advance(2).ms(), (9 << 7) | 2);
}

#[test]
fn advance_wraps_the_whole_counter() {
    assert_eq!(Timestamp::MAX.advance(3).ms(), 3);
    assert_eq!(Timestamp::new(8190).advance(0x7F).ms(), 8191);
}

#[test]
fn halves_round_trip() {
    let ts = Timestamp::new(1154);
    assert_eq!(Timestamp::from_parts(ts.high(), ts.low()), ts);
}
