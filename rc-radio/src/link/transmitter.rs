//! Transmitter-side link-layer logic.
//!
//! Bind phase: repeatedly sends a bind-info frame on the bind address/channel
//! at low power, waiting for the receiver's ACK token. Operating phase:
//! sends the latest control-data record every period, advancing the hop
//! index on every successful transmission (never on a failed one, so the
//! schedule never desyncs from a dropped frame).

use super::{Event, RcRadio, Role, State, TxRole};
use crate::{
    hop,
    radio::TxPower,
    timer::{AutoClear, CompareChannel},
    Config, Error,
};

impl<C: Config> RcRadio<C> {
    fn tx_role(&self) -> &TxRole<C> {
        match &self.role {
            Role::Transmitter(tx) => tx,
            Role::Receiver(_) => unreachable!("tx handler invoked on a receiver link"),
        }
    }

    fn tx_emit(&mut self, event: Event<'_>) {
        if let Role::Transmitter(tx) = &mut self.role {
            if let Some(handler) = &mut tx.handler {
                handler.on_event(event);
            }
        }
    }

    /// Writes the current bind-info descriptor as an ACK-requested frame.
    /// On no-memory, flushes the TX queue (the next period retries).
    fn tx_write_bind_info(&mut self) {
        let bind_info = self.tx_role().bind_info;
        let mut buf = [0u8; crate::frame::BindInfo::ENCODED_LEN];
        bind_info.encode(&mut buf);
        if self.radio.write_payload(&buf, false).is_err() {
            self.radio.flush_tx();
        }
    }

    /// Writes the latest published control-data record as an ACK-less
    /// frame.
    fn tx_write_data(&mut self) {
        let data = self.tx_role().buffer.latest();
        let mut buf = [0u8; crate::frame::ControlData::ENCODED_LEN];
        data.encode(&mut buf);
        if self.radio.write_payload(&buf, true).is_err() {
            self.radio.flush_tx();
        }
    }

    /// Starts the bind procedure: first `set_data` after `enable`.
    pub(super) fn tx_start_binding(&mut self) -> Result<(), Error> {
        self.radio.init().map_err(|()| Error::PortFailure)?;
        self.radio.set_base_address(base4(hop::BIND_ADDRESS));
        self.radio.set_prefix(hop::BIND_ADDRESS[hop::ADDR_LEN - 1]);
        self.radio.set_rf_channel(hop::BIND_CHANNEL);
        self.radio.set_tx_power(TxPower::Binding);

        let interval_us = self.tx_role().bind_info.interval_us();
        self.timer.compare_set(CompareChannel::Cc0, interval_us, AutoClear::Clear);
        self.timer.enable();

        self.tx_write_bind_info();
        self.tx_emit(Event::Binding);
        Ok(())
    }

    /// Compare-0 fired: while binding, (re)send the bind-info frame; once
    /// started, send the latest control-data record.
    pub(super) fn tx_on_compare0(&mut self) {
        if self.state == State::Binding {
            self.tx_write_bind_info();
        } else {
            self.tx_write_data();
        }
    }

    /// A frame was received. Only meaningful while binding: check whether
    /// it is the receiver's ACK token, and if so, switch to the bound
    /// identity's address/channel and move to `STARTED`.
    pub(super) fn tx_on_rx_received(&mut self, payload: &[u8]) {
        if self.state != State::Binding {
            return;
        }
        if payload != hop::BIND_ACK_TOKEN.as_slice() {
            return;
        }

        let bind_info = self.tx_role().bind_info;
        let addr = hop::address(bind_info.identity);

        self.radio.set_base_address(base4(addr));
        self.radio.set_prefix(addr[hop::ADDR_LEN - 1]);
        self.radio.set_tx_power(TxPower::Operating);

        if let Role::Transmitter(tx) = &mut self.role {
            tx.hop_index = 0;
        }
        self.radio.set_rf_channel(hop::channel(bind_info.identity, 0));

        self.state = State::Started;
        self.tx_emit(Event::Bound(bind_info));
    }

    /// A frame was successfully transmitted. Only meaningful once started:
    /// advance the hop schedule and notify the application.
    pub(super) fn tx_on_tx_success(&mut self) {
        if self.state != State::Started {
            return;
        }

        let bind_info = self.tx_role().bind_info;
        let next_index = if let Role::Transmitter(tx) = &mut self.role {
            tx.hop_index = (tx.hop_index + 1) % hop::CHANNEL_MAP_LEN as u8;
            tx.hop_index
        } else {
            unreachable!()
        };
        self.radio.set_rf_channel(hop::channel(bind_info.identity, next_index));

        self.tx_emit(Event::DataSent);
    }
}

fn base4(addr: [u8; hop::ADDR_LEN]) -> [u8; 4] {
    [addr[0], addr[1], addr[2], addr[3]]
}
