//! Timer engine port.
//!
//! Abstraction over a free-running microsecond counter with (at least) three
//! independently programmable compare channels, offered to the link state
//! machine. Implemented against real hardware by `rc-radio-nrf5x`, and by a
//! mock in this crate's test suite.

/// One of the timer's compare channels.
///
/// Only three are used: `Cc0` and `Cc1` drive the primary rendezvous cycle,
/// `Cc2` is reserved for widened retry windows and is not touched by the
/// current state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareChannel {
    Cc0,
    Cc1,
    Cc2,
}

/// Whether a compare channel clears the counter when it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoClear {
    /// Leave the counter running after a match (used for `Cc0`'s "enter RX"
    /// edge and for `Cc2`'s widened retry window).
    Keep,
    /// Clear the counter back to zero on a match (used for `Cc1`'s
    /// rendezvous deadline and the transmitter's TX cadence).
    Clear,
}

/// Hardware port for the 32-bit microsecond timer the link state machine
/// drives.
///
/// The timer interrupt this port's hardware implementation raises must run
/// at a strictly lower priority than the radio interrupt (see
/// `RadioPort`), since radio event handlers reprogram timer compares and
/// must not be preempted by a stale timer fire.
pub trait TimerPort {
    /// Configures the timer to count microseconds, starting from zero, but
    /// does not start it running. Called once, before `enable`.
    fn configure(&mut self);

    /// Starts the timer counting.
    fn enable(&mut self);

    /// Stops the timer counting. Pending compare events are left as-is.
    fn disable(&mut self);

    /// Resets the counter to zero without stopping it. Used to resynchronize
    /// the rendezvous cycle to an actual packet arrival.
    fn clear(&mut self);

    /// Programs `channel` to match at `ticks` microseconds (relative to the
    /// last `clear`), with the given auto-clear behavior, and enables its
    /// interrupt.
    fn compare_set(&mut self, channel: CompareChannel, ticks: u32, auto_clear: AutoClear);

    /// Atomically rewrites `channel`'s compare value to `ticks`, without
    /// otherwise disturbing the running counter or pending events.
    fn compare_write(&mut self, channel: CompareChannel, ticks: u32);

    /// Reads `channel`'s current compare register value.
    fn capture_get(&self, channel: CompareChannel) -> u32;

    /// Clears a pending match event on `channel` without acting on it.
    fn event_clear(&mut self, channel: CompareChannel);
}
