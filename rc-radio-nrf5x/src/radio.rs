//! Enhanced ShockBurst radio port.
//!
//! Reconfigures the chip's `RADIO` peripheral out of BLE mode and into its
//! proprietary shockburst mode: a short fixed-length payload, a 5-byte
//! address (4-byte base + 1-byte prefix), and CRC16 instead of `rubble`'s
//! 37-byte BLE PDU / CRC24 layout.
//!
//! The same static buffer backs both directions. `write_payload` loads it
//! for transmission (a control-data frame, or a bind-info/ACK-token frame);
//! `start_rx` points the peripheral at the same buffer so the next received
//! frame, or the preloaded auto-ack payload in PRX mode, lands there too.
//! The application's radio interrupt handler reads it back out through
//! [`EsbRadio::payload`] before calling into the link layer.

use rc_radio::radio::{NoMemory, NotInRxMode, RadioPort, TxPower, MAX_PAYLOAD_LEN};

// CRC16-CCITT, matching the polynomial and seed the original ESB driver
// configures the radio with.
const CRC_POLY: u32 = 0x0001_1021;
const CRC_INIT: u32 = 0xFFFF;

/// Enhanced ShockBurst driver for the chip's `RADIO` peripheral.
pub struct EsbRadio {
    radio: crate::pac::RADIO,
    buf: [u8; MAX_PAYLOAD_LEN],
    tx_pending: bool,
}

impl EsbRadio {
    /// Takes ownership of the peripheral. Leaves it disabled; call
    /// [`RadioPort::init`] before use.
    pub fn new(radio: crate::pac::RADIO) -> Self {
        Self {
            radio,
            buf: [0; MAX_PAYLOAD_LEN],
            tx_pending: false,
        }
    }

    fn is_disabled(&self) -> bool {
        self.radio.state.read().state().is_disabled()
    }

    /// Disables the radio if it isn't already, and waits for the
    /// acknowledging event.
    fn wait_disabled(&mut self) {
        if !self.is_disabled() {
            self.radio.tasks_disable.write(|w| unsafe { w.bits(1) });
            while self.radio.events_disabled.read().bits() == 0 {}
        }
        self.radio.events_disabled.reset();
    }

    fn set_packetptr(&mut self) {
        let addr = self.buf.as_mut_ptr() as u32;
        unsafe {
            self.radio.packetptr.write(|w| w.bits(addr));
        }
    }

    /// Whether the frame just completing had a valid CRC. Read by the
    /// application's radio interrupt handler on `EVENTS_END`.
    pub fn crc_ok(&self) -> bool {
        self.radio.crcstatus.read().crcstatus().is_crcok()
    }

    /// Acknowledges `EVENTS_END`. Must be called once per radio interrupt
    /// before re-arming.
    pub fn event_end_clear(&mut self) {
        self.radio.events_end.reset();
    }

    /// The bytes the peripheral last landed in the shared buffer: either a
    /// just-received frame, or (harmlessly) the frame this side just sent.
    /// The caller is expected to already know which applies from the
    /// direction of the just-completed radio operation.
    pub fn payload(&self) -> &[u8] {
        &self.buf
    }
}

impl RadioPort for EsbRadio {
    fn init(&mut self) -> Result<(), ()> {
        self.wait_disabled();

        self.radio.mode.write(|w| w.mode().nrf_1mbit());
        self.radio.txpower.write(|w| w.txpower().pos4d_bm());

        unsafe {
            self.radio
                .pcnf0
                .write(|w| w.s0len().bit(false).lflen().bits(6).s1len().bits(0));
            self.radio.pcnf1.write(|w| {
                w.maxlen()
                    .bits(MAX_PAYLOAD_LEN as u8)
                    .statlen()
                    .bits(0)
                    .balen()
                    .bits(4)
                    .whiteen()
                    .clear_bit()
            });
            self.radio.crccnf.write(|w| w.skipaddr().clear_bit().len().two());
            self.radio.crcpoly.write(|w| w.crcpoly().bits(CRC_POLY));
            self.radio.crcinit.write(|w| w.crcinit().bits(CRC_INIT));
        }

        // Ramp straight into TX/RX and disable on completion; the
        // application drives each transition explicitly from there.
        self.radio
            .shorts
            .write(|w| w.ready_start().enabled().end_disable().enabled());
        self.radio.rxaddresses.write(|w| w.addr0().enabled());

        self.tx_pending = false;
        Ok(())
    }

    fn set_base_address(&mut self, base: [u8; 4]) {
        let word = u32::from_le_bytes(base);
        self.radio.base0.write(|w| unsafe { w.bits(word) });
    }

    fn set_prefix(&mut self, prefix: u8) {
        self.radio.prefix0.write(|w| unsafe { w.ap0().bits(prefix) });
    }

    fn set_rf_channel(&mut self, channel: u8) {
        self.radio
            .frequency
            .write(|w| unsafe { w.frequency().bits(channel) });
    }

    fn set_tx_power(&mut self, power: TxPower) {
        match power {
            TxPower::Binding => self.radio.txpower.write(|w| w.txpower().neg12d_bm()),
            TxPower::Operating => self.radio.txpower.write(|w| w.txpower().pos4d_bm()),
        }
    }

    fn write_payload(&mut self, payload: &[u8], noack: bool) -> Result<(), NoMemory> {
        if self.tx_pending {
            return Err(NoMemory);
        }
        self.buf[..payload.len()].copy_from_slice(payload);

        self.wait_disabled();
        self.set_packetptr();
        self.radio.txaddress.write(|w| unsafe { w.txaddress().bits(0) });

        // A no-ack frame doesn't wait in RX for an acknowledgement; drop
        // straight back to disabled once the transmission ends.
        self.radio.shorts.modify(|_, w| {
            if noack {
                w.disabled_rxen().disabled()
            } else {
                w.disabled_rxen().enabled()
            }
        });

        self.radio.tasks_txen.write(|w| unsafe { w.bits(1) });
        self.tx_pending = true;
        Ok(())
    }

    fn start_rx(&mut self) {
        self.wait_disabled();
        self.set_packetptr();
        self.radio.tasks_rxen.write(|w| unsafe { w.bits(1) });
    }

    fn stop_rx(&mut self) -> Result<(), NotInRxMode> {
        let state = self.radio.state.read().state();
        if state.is_txru() || state.is_tx() || state.is_txdisable() {
            return Err(NotInRxMode);
        }
        self.wait_disabled();
        Ok(())
    }

    fn flush_tx(&mut self) {
        self.tx_pending = false;
        self.wait_disabled();
    }

    fn disable(&mut self) {
        self.tx_pending = false;
        self.wait_disabled();
    }
}
