//! Hardware-agnostic real-time link layer for a one-way RC control radio.
//!
//! `rc-radio` drives a shockburst-style 2.4 GHz radio through a bind
//! handshake and a frequency-hopping rendezvous schedule, one side acting as
//! transmitter and the other as receiver. It owns no hardware itself; an
//! application supplies [`timer::TimerPort`], [`radio::RadioPort`] and
//! [`clock::ClockPort`] implementations (bundled together via [`Config`])
//! and calls into [`RcRadio`] from its timer and radio interrupt handlers.
//!
//! See `rc-radio-nrf5x` for a concrete port to the nRF51/nRF52 family.

#![no_std]

#[macro_use]
mod log;

pub mod clock;
mod error;
pub mod frame;
pub mod hop;
mod link;
pub mod radio;
pub mod timer;

pub use crate::error::Error;
pub use crate::link::{Config, Event, Handler, NoopHandler, RcRadio, State, MISSED_PACKET_TOLERANCE};
