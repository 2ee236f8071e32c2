//! An `rc-radio` driver for the nRF51/nRF52-series radio and timer
//! peripherals, operating the radio in its proprietary Enhanced ShockBurst
//! mode rather than BLE mode.

#![no_std]
#![warn(rust_2018_idioms)]

#[cfg(feature = "51")]
pub(crate) use nrf51_hal::pac;

#[cfg(feature = "52810")]
pub(crate) use nrf52810_hal::pac;

#[cfg(feature = "52832")]
pub(crate) use nrf52832_hal::pac;

#[cfg(feature = "52840")]
pub(crate) use nrf52840_hal::pac;

pub mod clock;
pub mod radio;
pub mod timer;

pub use crate::clock::HfClock;
pub use crate::radio::EsbRadio;
pub use crate::timer::EsbTimer;
