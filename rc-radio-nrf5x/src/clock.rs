//! High-frequency clock port, backed by the `CLOCK` peripheral.
//!
//! Grounded on the firmware's own startup sequence for the radio's crystal
//! clock: select the external crystal, request `HFCLKSTART`, and spin until
//! `HFCLKSTARTED` fires.

use rc_radio::clock::ClockPort;

/// Drives the chip's high-frequency clock source.
pub struct HfClock {
    clock: crate::pac::CLOCK,
}

impl HfClock {
    pub fn new(clock: crate::pac::CLOCK) -> Self {
        Self { clock }
    }
}

impl ClockPort for HfClock {
    fn is_running(&self) -> bool {
        self.clock.hfclkstat.read().state().is_running()
    }

    fn start(&mut self) {
        self.clock.events_hfclkstarted.reset();
        self.clock.tasks_hfclkstart.write(|w| unsafe { w.bits(1) });
        while self.clock.events_hfclkstarted.read().bits() == 0 {}
    }

    fn stop(&mut self) {
        self.clock.tasks_hfclkstop.write(|w| unsafe { w.bits(1) });
    }
}
