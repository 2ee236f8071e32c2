//! High-frequency clock source port.
//!
//! The radio requires an accurate high-frequency clock to run. Spinning it
//! up and down is scoped to the link's enabled lifetime: `enable` starts it
//! only if it wasn't already running, and `disable` stops it only if
//! `enable` was the one that started it. Grounded on the original
//! `m_clocks_start`/`m_clocks_stop` pair, which read/write `NRF_CLOCK`
//! directly; promoted here to a named port so the core crate stays
//! hardware-agnostic.
pub trait ClockPort {
    /// Returns whether the high-accuracy high-frequency clock is currently
    /// running.
    fn is_running(&self) -> bool;

    /// Starts the high-frequency clock and blocks until it has stabilized.
    fn start(&mut self);

    /// Stops the high-frequency clock.
    fn stop(&mut self);
}
