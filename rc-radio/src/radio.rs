//! Radio driver port.
//!
//! Abstraction over the underlying shockburst-style radio: configure
//! address/channel/power, load a single TX payload, start/stop receive
//! mode, and deliver completion events. Implemented against real hardware
//! by `rc-radio-nrf5x`'s `EsbRadio`, and by a mock in this crate's test
//! suite.

/// Largest payload ever placed on air by this link: the 8-byte bind ACK
/// token. Control-data (4 bytes) and bind-info (3 bytes) frames are
/// smaller.
pub const MAX_PAYLOAD_LEN: usize = 8;

/// Transmit power level. The binding level is deliberately low and
/// short-range; the operating level is the application's configured power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxPower {
    /// -12 dBm, used only while unbound.
    Binding,
    /// The hardware-configured operating power (+4 or +8 dBm depending on
    /// MCU family).
    Operating,
}

/// Returned by `RadioPort::write_payload` when the radio has no buffer
/// space to queue another TX payload. The idiomatic replacement for the
/// original driver's `NRF_ERROR_NO_MEM` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoMemory;

/// Returned by `RadioPort::stop_rx` while the radio is still completing an
/// ACK transmission. Callers must spin on this until it clears (see
/// `RadioPort::stop_rx` docs) — the idiomatic replacement for the original
/// driver's `NRF_ESB_ERROR_NOT_IN_RX_MODE` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotInRxMode;

/// Hardware port for the shockburst-style radio the link state machine
/// drives.
///
/// The radio interrupt this port's hardware implementation raises must run
/// at a strictly higher priority than the timer interrupt (see
/// `TimerPort`), so that radio event handling can safely reprogram the
/// timer without being preempted by a stale timer fire.
pub trait RadioPort {
    /// Initializes the radio for 1 Mbps operation with a fixed 4-byte
    /// control-data payload length, selective auto-ack enabled, and zero
    /// retransmits. Returns an error if the underlying hardware fails to
    /// initialize; this propagates transparently out of the link's
    /// `init`/`enable`.
    fn init(&mut self) -> Result<(), ()>;

    /// Sets the 4-byte base address (logical pipe 0).
    fn set_base_address(&mut self, base: [u8; 4]);

    /// Sets the 1-byte pipe prefix appended to the base address.
    fn set_prefix(&mut self, prefix: u8);

    /// Sets the RF channel (0..100).
    fn set_rf_channel(&mut self, channel: u8);

    /// Sets the TX power level.
    fn set_tx_power(&mut self, power: TxPower);

    /// Queues one frame for transmission on pipe 0. Transmission begins
    /// immediately if the radio is idle. `noack` requests that no
    /// acknowledgement be expected for this frame (used for control-data
    /// frames in the operating phase; bind-info frames request an ACK).
    fn write_payload(&mut self, payload: &[u8], noack: bool) -> Result<(), NoMemory>;

    /// Enters receive mode.
    fn start_rx(&mut self);

    /// Leaves receive mode.
    ///
    /// Returns `Err(NotInRxMode)` while the radio is still completing an
    /// ACK transmission in flight; callers must spin on this until it
    /// clears. This is a genuine hardware requirement bounded by one on-air
    /// frame time (hundreds of microseconds), not an open-ended wait.
    fn stop_rx(&mut self) -> Result<(), NotInRxMode>;

    /// Drops any queued TX payloads. Called after a TX failure or a
    /// no-memory write.
    fn flush_tx(&mut self);

    /// Fully powers down the radio.
    fn disable(&mut self);
}
