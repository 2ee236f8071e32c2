//! Receiver-side link-layer logic.
//!
//! Bind phase: sits in continuous receive on the bind address/channel with
//! the ACK token preloaded, so any transmitter's bind-info frame is
//! auto-acknowledged by hardware the instant it arrives. Operating phase:
//! duty-cycles receive around the expected arrival of each hop, widening the
//! window for one cycle after a miss and narrowing it back after the next
//! success, and falling back to binding once too many consecutive packets
//! are missed.

use super::{
    Event, RcRadio, RxRole, Role, State, MISSED_PACKET_TOLERANCE, OVERHEAD_US, PACKET_ON_AIR_US,
    RX_SAFETY_US, RX_WIDENING_US,
};
use crate::{
    frame::{BindInfo, ControlData},
    hop,
    radio::TxPower,
    timer::{AutoClear, CompareChannel},
    Config,
};

impl<C: Config> RcRadio<C> {
    fn rx_role(&self) -> &RxRole<C> {
        match &self.role {
            Role::Receiver(rx) => rx,
            Role::Transmitter(_) => unreachable!("rx handler invoked on a transmitter link"),
        }
    }

    fn rx_emit(&mut self, event: Event<'_>) {
        if let Role::Receiver(rx) = &mut self.role {
            rx.handler.on_event(event);
        }
    }

    /// Leaves receive mode, spinning until the in-flight ACK (if any) has
    /// finished transmitting.
    fn rx_stop(&mut self) {
        while self.radio.stop_rx().is_err() {}
    }

    /// Arms the timer for one rendezvous cycle of `interval_us`: `Cc0` opens
    /// the receive window ahead of the expected arrival, `Cc1` marks the
    /// deadline past which the packet is declared missed. The window widens
    /// for the cycle immediately following a miss and narrows back as soon
    /// as a packet is received again — it never grows past one step
    /// regardless of how many consecutive packets are missed.
    fn rx_arm_cycle(&mut self, interval_us: u32) {
        let widen = self.rx_role().missed_packets > 0;
        let margin = if widen { RX_WIDENING_US * 2 } else { RX_WIDENING_US };
        let open_at = interval_us.saturating_sub(OVERHEAD_US + PACKET_ON_AIR_US + margin);
        let deadline = if widen { interval_us } else { interval_us + RX_SAFETY_US };

        self.timer.clear();
        self.timer.compare_set(CompareChannel::Cc0, open_at, AutoClear::Keep);
        self.timer.compare_set(CompareChannel::Cc1, deadline, AutoClear::Clear);
        self.timer.enable();
    }

    /// Enters (or re-enters) the bind phase. Shared by the initial `enable`
    /// path, where the radio was just freshly initialized by the caller, and
    /// by the loss-of-sync path in [`rx_on_compare1`](Self::rx_on_compare1),
    /// which deliberately does not re-run `radio.init()`.
    pub(super) fn rx_start_binding(&mut self) {
        self.timer.disable();

        self.radio.set_base_address(base4(hop::BIND_ADDRESS));
        self.radio.set_prefix(hop::BIND_ADDRESS[hop::ADDR_LEN - 1]);
        self.radio.set_rf_channel(hop::BIND_CHANNEL);
        self.radio.set_tx_power(TxPower::Binding);

        if self.radio.write_payload(hop::BIND_ACK_TOKEN.as_slice(), false).is_err() {
            self.radio.flush_tx();
        }
        self.radio.start_rx();

        if let Role::Receiver(rx) = &mut self.role {
            rx.bind_info = None;
            rx.hop_index = 0;
            rx.missed_packets = 0;
        }

        self.rx_emit(Event::Binding);
    }

    /// A frame arrived while binding. Anything that doesn't decode as a
    /// valid bind-info record is silently dropped — the ACK token stays
    /// preloaded and binding keeps listening.
    pub(super) fn rx_on_bind_frame(&mut self, payload: &[u8]) {
        let info = match BindInfo::decode(payload) {
            Some(info) => info,
            None => return,
        };

        self.rx_stop();

        let addr = hop::address(info.identity);
        self.radio.set_base_address(base4(addr));
        self.radio.set_prefix(addr[hop::ADDR_LEN - 1]);
        self.radio.set_tx_power(TxPower::Operating);
        self.radio.set_rf_channel(hop::channel(info.identity, 0));

        if let Role::Receiver(rx) = &mut self.role {
            rx.bind_info = Some(info);
            rx.hop_index = 0;
            rx.missed_packets = 0;
        }

        self.state = State::Started;
        self.rx_arm_cycle(info.interval_us());
        self.radio.start_rx();
        self.rx_emit(Event::Bound(info));
    }

    /// Compare-0 fired: open the receive window ahead of the expected
    /// arrival.
    pub(super) fn rx_on_compare0(&mut self) {
        if self.state == State::Started {
            self.radio.start_rx();
        }
    }

    /// Compare-1 fired: the deadline for this hop passed with nothing
    /// received. Counts the miss, hops anyway to stay on the predicted
    /// schedule, and falls back to binding once the consecutive-miss count
    /// reaches the tolerance.
    pub(super) fn rx_on_compare1(&mut self) {
        if self.state != State::Started {
            return;
        }
        self.rx_stop();

        let bind_info = self.rx_role().bind_info.expect("STARTED implies bound");
        let missed = self.rx_role().missed_packets + 1;

        if missed >= MISSED_PACKET_TOLERANCE {
            self.state = State::Binding;
            self.rx_start_binding();
            return;
        }

        let hop_index = if let Role::Receiver(rx) = &mut self.role {
            rx.missed_packets = missed;
            rx.hop_index = (rx.hop_index + 1) % hop::CHANNEL_MAP_LEN as u8;
            rx.hop_index
        } else {
            unreachable!()
        };
        self.radio.set_rf_channel(hop::channel(bind_info.identity, hop_index));
        self.rx_arm_cycle(bind_info.interval_us());
        self.rx_emit(Event::PacketDropped);
    }

    /// A frame arrived once started. Anything that doesn't decode as a
    /// valid control-data record is ignored; the slot is left to expire
    /// normally into [`rx_on_compare1`](Self::rx_on_compare1).
    pub(super) fn rx_on_data_frame(&mut self, payload: &[u8]) {
        let data = match ControlData::decode(payload) {
            Some(data) => data,
            None => return,
        };

        self.rx_stop();

        let bind_info = self.rx_role().bind_info.expect("STARTED implies bound");
        let hop_index = if let Role::Receiver(rx) = &mut self.role {
            rx.missed_packets = 0;
            rx.hop_index = (rx.hop_index + 1) % hop::CHANNEL_MAP_LEN as u8;
            rx.hop_index
        } else {
            unreachable!()
        };
        self.radio.set_rf_channel(hop::channel(bind_info.identity, hop_index));
        self.rx_arm_cycle(bind_info.interval_us());
        self.rx_emit(Event::DataReceived(&data));
    }
}

fn base4(addr: [u8; hop::ADDR_LEN]) -> [u8; 4] {
    [addr[0], addr[1], addr[2], addr[3]]
}
