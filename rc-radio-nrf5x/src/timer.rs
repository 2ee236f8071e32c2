//! Timer port backed by one of the chip's general-purpose `TIMERn`
//! peripherals.
//!
//! Extends `rubble`'s single-compare-channel timer driver (`CC[0]` for
//! reading the clock, `CC[1]` for one scheduled interrupt) to the three
//! independent channels `rc-radio`'s rendezvous cycle needs.

use rc_radio::timer::{AutoClear, CompareChannel, TimerPort};

/// A timer port driving one of `TIMER0`, `TIMER1`, `TIMER2`.
pub struct EsbTimer<T: NrfEsbTimerExt> {
    inner: T,
}

impl<T: NrfEsbTimerExt> EsbTimer<T> {
    pub fn new(peripheral: T) -> Self {
        Self { inner: peripheral }
    }
}

impl<T: NrfEsbTimerExt> TimerPort for EsbTimer<T> {
    fn configure(&mut self) {
        self.inner.configure();
    }

    fn enable(&mut self) {
        self.inner.start();
    }

    fn disable(&mut self) {
        self.inner.stop();
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn compare_set(&mut self, channel: CompareChannel, ticks: u32, auto_clear: AutoClear) {
        self.inner.compare_set(index(channel), ticks, auto_clear);
    }

    fn compare_write(&mut self, channel: CompareChannel, ticks: u32) {
        self.inner.compare_write(index(channel), ticks);
    }

    fn capture_get(&self, channel: CompareChannel) -> u32 {
        self.inner.compare_get(index(channel))
    }

    fn event_clear(&mut self, channel: CompareChannel) {
        self.inner.event_clear(index(channel));
    }
}

fn index(channel: CompareChannel) -> usize {
    match channel {
        CompareChannel::Cc0 => 0,
        CompareChannel::Cc1 => 1,
        CompareChannel::Cc2 => 2,
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Gives a `TIMERn` peripheral a 1 MHz, 32-bit, 3-compare-channel
/// personality.
pub trait NrfEsbTimerExt: sealed::Sealed {
    fn configure(&mut self);
    fn start(&mut self);
    fn stop(&mut self);
    fn clear(&mut self);
    fn compare_set(&mut self, index: usize, ticks: u32, auto_clear: AutoClear);
    fn compare_write(&mut self, index: usize, ticks: u32);
    fn compare_get(&self, index: usize) -> u32;
    fn event_clear(&mut self, index: usize);
}

macro_rules! impl_timer {
    ($ty:ident) => {
        impl NrfEsbTimerExt for crate::pac::$ty {
            fn configure(&mut self) {
                self.bitmode.write(|w| w.bitmode()._32bit());
                // 2^4 = 16; 16 MHz / 16 = 1 MHz = µs resolution.
                self.prescaler.write(|w| unsafe { w.prescaler().bits(4) });
            }

            fn start(&mut self) {
                self.tasks_start.write(|w| unsafe { w.bits(1) });
            }

            fn stop(&mut self) {
                self.tasks_stop.write(|w| unsafe { w.bits(1) });
            }

            fn clear(&mut self) {
                self.tasks_clear.write(|w| unsafe { w.bits(1) });
            }

            fn compare_set(&mut self, index: usize, ticks: u32, auto_clear: AutoClear) {
                self.cc[index].write(|w| unsafe { w.bits(ticks) });
                self.events_compare[index].reset();
                self.shorts.modify(|_, w| match (index, auto_clear) {
                    (0, AutoClear::Clear) => w.compare0_clear().enabled(),
                    (0, AutoClear::Keep) => w.compare0_clear().disabled(),
                    (1, AutoClear::Clear) => w.compare1_clear().enabled(),
                    (1, AutoClear::Keep) => w.compare1_clear().disabled(),
                    (_, AutoClear::Clear) => w.compare2_clear().enabled(),
                    (_, AutoClear::Keep) => w.compare2_clear().disabled(),
                });
                self.intenset.write(|w| match index {
                    0 => w.compare0().set(),
                    1 => w.compare1().set(),
                    _ => w.compare2().set(),
                });
            }

            fn compare_write(&mut self, index: usize, ticks: u32) {
                self.cc[index].write(|w| unsafe { w.bits(ticks) });
            }

            fn compare_get(&self, index: usize) -> u32 {
                self.cc[index].read().bits()
            }

            fn event_clear(&mut self, index: usize) {
                self.events_compare[index].reset();
            }
        }

        impl sealed::Sealed for crate::pac::$ty {}
    };
}

impl_timer!(TIMER0);
impl_timer!(TIMER1);
impl_timer!(TIMER2);
