//! On-air frame layouts.
//!
//! Fixed little-endian layouts for the two payloads exchanged over the link,
//! matching byte order on the target MCU family. No state, no failure modes
//! beyond the length/range checks callers perform before decoding.

use crate::hop::Identity;
use byteorder::{ByteOrder, LittleEndian};

/// Minimum accepted transmit rate, in Hz.
pub const MIN_RATE_HZ: u16 = 10;

/// Maximum accepted transmit rate, in Hz.
pub const MAX_RATE_HZ: u16 = 500;

/// The control-data record: throttle and three signed attitude axes.
///
/// Four bytes on air: `throttle: u8, pitch: i8, roll: i8, yaw: i8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlData {
    pub throttle: u8,
    pub pitch: i8,
    pub roll: i8,
    pub yaw: i8,
}

impl ControlData {
    /// Size of the on-air encoding, in bytes.
    pub const ENCODED_LEN: usize = 4;

    pub fn encode(&self, buf: &mut [u8]) {
        debug_assert!(buf.len() >= Self::ENCODED_LEN);
        buf[0] = self.throttle;
        buf[1] = self.pitch as u8;
        buf[2] = self.roll as u8;
        buf[3] = self.yaw as u8;
    }

    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() != Self::ENCODED_LEN {
            return None;
        }
        Some(ControlData {
            throttle: buf[0],
            pitch: buf[1] as i8,
            roll: buf[2] as i8,
            yaw: buf[3] as i8,
        })
    }
}

/// The bind-info descriptor: a transmitter's identity and update rate.
///
/// Three bytes on air: `transmitter_channel: u8, transmit_rate_hz: u16 (LE)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindInfo {
    pub identity: Identity,
    pub rate_hz: u16,
}

impl BindInfo {
    /// Size of the on-air encoding, in bytes.
    pub const ENCODED_LEN: usize = 3;

    /// Validates and constructs a `BindInfo`. Used both when the transmitter
    /// is initialized (eager validation) and when the receiver parses an
    /// incoming bind frame (silent-drop validation); both paths share the
    /// same range check.
    pub fn new(identity: Identity, rate_hz: u16) -> Option<Self> {
        if rate_hz < MIN_RATE_HZ || rate_hz > MAX_RATE_HZ {
            return None;
        }
        Some(BindInfo { identity, rate_hz })
    }

    pub fn encode(&self, buf: &mut [u8]) {
        debug_assert!(buf.len() >= Self::ENCODED_LEN);
        buf[0] = self.identity.as_u8();
        LittleEndian::write_u16(&mut buf[1..3], self.rate_hz);
    }

    /// Decodes and validates a bind-info frame. Returns `None` on wrong
    /// length, unknown identity, or out-of-range rate — the caller's cue to
    /// drop the frame silently and keep its ACK token armed.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() != Self::ENCODED_LEN {
            return None;
        }
        let identity = Identity::from_u8(buf[0])?;
        let rate_hz = LittleEndian::read_u16(&buf[1..3]);
        BindInfo::new(identity, rate_hz)
    }

    /// Interval between transmissions, in microseconds, at this rate.
    pub fn interval_us(&self) -> u32 {
        1_000_000 / u32::from(self.rate_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_data_round_trip() {
        let data = ControlData { throttle: 0x80, pitch: -5, roll: 3, yaw: -128 };
        let mut buf = [0u8; ControlData::ENCODED_LEN];
        data.encode(&mut buf);
        assert_eq!(ControlData::decode(&buf), Some(data));
    }

    #[test]
    fn control_data_rejects_wrong_length() {
        assert_eq!(ControlData::decode(&[1, 2, 3]), None);
        assert_eq!(ControlData::decode(&[1, 2, 3, 4, 5]), None);
    }

    #[test]
    fn bind_info_round_trip() {
        let info = BindInfo::new(Identity::C, 250).unwrap();
        let mut buf = [0u8; BindInfo::ENCODED_LEN];
        info.encode(&mut buf);
        assert_eq!(BindInfo::decode(&buf), Some(info));
    }

    #[test]
    fn bind_info_boundary_rates() {
        assert!(BindInfo::new(Identity::A, 10).is_some());
        assert!(BindInfo::new(Identity::A, 500).is_some());
        assert!(BindInfo::new(Identity::A, 9).is_none());
        assert!(BindInfo::new(Identity::A, 501).is_none());
    }

    #[test]
    fn bind_info_decode_rejects_unknown_identity() {
        let mut buf = [0u8; BindInfo::ENCODED_LEN];
        buf[0] = 5;
        LittleEndian::write_u16(&mut buf[1..3], 100);
        assert_eq!(BindInfo::decode(&buf), None);
    }

    #[test]
    fn bind_info_decode_rejects_out_of_range_rate() {
        let mut buf = [0u8; BindInfo::ENCODED_LEN];
        buf[0] = Identity::A.as_u8();
        LittleEndian::write_u16(&mut buf[1..3], 501);
        assert_eq!(BindInfo::decode(&buf), None);
    }

    #[test]
    fn interval_matches_rate() {
        let info = BindInfo::new(Identity::A, 100).unwrap();
        assert_eq!(info.interval_us(), 10_000);
    }
}
