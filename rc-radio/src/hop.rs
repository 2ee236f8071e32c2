//! The frequency-hopping schedule.
//!
//! This is a pure data table: five transmitter identities, each a 10-entry
//! permutation of RF channels plus a 5-byte address, looked up by
//! `(identity, hop index)`. There is no mutable state and no failure mode.

use core::convert::TryFrom;

/// Number of entries in a single identity's channel hop map.
pub const CHANNEL_MAP_LEN: usize = 10;

/// Length in bytes of a radio address (4-byte base + 1-byte prefix).
pub const ADDR_LEN: usize = 5;

/// RF channel used by both sides while unbound.
pub const BIND_CHANNEL: u8 = 10;

/// Address used by both sides while unbound.
pub const BIND_ADDRESS: [u8; ADDR_LEN] = [0xAA, 0xBB, 0x55, 0xAA, 0x5A];

/// The literal payload the receiver preloads as its ACK during the bind
/// handshake, so the transmitter can recognize a reply from a real receiver.
pub const BIND_ACK_TOKEN: &[u8; 8] = b"RC_RADIO";

/// One of five transmitter presets, each a distinct (address, channel hop
/// map) pair. Lets multiple transmitter/receiver pairs coexist in the same
/// space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Identity {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
}

/// Number of defined identities.
pub const IDENTITY_COUNT: u8 = 5;

impl Identity {
    /// Looks up an identity by its wire value (0..4). Returns `None` for any
    /// other value, matching the receiver's bind-frame validation.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Identity::A),
            1 => Some(Identity::B),
            2 => Some(Identity::C),
            3 => Some(Identity::D),
            4 => Some(Identity::E),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Identity {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Identity::from_u8(value).ok_or(())
    }
}

const CHANNEL_MAP: [[u8; CHANNEL_MAP_LEN]; IDENTITY_COUNT as usize] = [
    [0, 32, 62, 92, 22, 52, 82, 12, 42, 72],
    [2, 34, 64, 94, 24, 54, 84, 14, 44, 74],
    [4, 36, 66, 96, 26, 56, 86, 16, 46, 76],
    [6, 38, 68, 98, 28, 58, 88, 18, 48, 78],
    [8, 40, 70, 100, 30, 60, 90, 20, 50, 80],
];

const ADDRESSES: [[u8; ADDR_LEN]; IDENTITY_COUNT as usize] = [
    [0xAA, 0xBB, 0xD5, 0x95, 0x55],
    [0xAA, 0xBB, 0x6A, 0x4A, 0xAA],
    [0xAA, 0xBB, 0xB5, 0x52, 0x5A],
    [0xAA, 0xBB, 0xAD, 0xA9, 0xA5],
    [0xAA, 0xBB, 0x56, 0x54, 0x2A],
];

/// Looks up the RF channel used by `identity` at hop index `index`.
///
/// # Panics
///
/// Panics if `index >= CHANNEL_MAP_LEN`. The link state machine never
/// produces an out-of-range index, since it is always advanced modulo
/// `CHANNEL_MAP_LEN`.
pub fn channel(identity: Identity, index: u8) -> u8 {
    CHANNEL_MAP[identity as usize][index as usize]
}

/// Looks up the 5-byte operating address for `identity`. The last byte is
/// the radio's pipe prefix; the first four are the base address.
pub fn address(identity: Identity) -> [u8; ADDR_LEN] {
    ADDRESSES[identity as usize]
}
