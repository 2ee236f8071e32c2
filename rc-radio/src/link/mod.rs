//! Link-Layer.
//!
//! The heart of the core: owns the mode (transmitter vs receiver), the
//! current protocol state, the bound identity, the hop index, the
//! missed-packet counter, and the double-buffered latest control record.
//! Drives the timer engine and radio driver in response to timer interrupts
//! and radio completion events to maintain a synchronous rendezvous on
//! hopping channels.
//!
//! Users of this struct must provide an interface to the platform's
//! hardware by implementing [`Config`]. The two interrupt sources (radio,
//! timer) call into the `on_*` methods below; everything else runs in
//! thread mode.

mod receiver;
mod transmitter;

use crate::{
    clock::ClockPort,
    frame::{BindInfo, ControlData},
    hop::Identity,
    radio::RadioPort,
    timer::TimerPort,
    Error,
};
use core::sync::atomic::{AtomicU8, Ordering};

/// The number of consecutive missed packets before the receiver concludes
/// that the transmitter has gone away and returns to binding.
pub const MISSED_PACKET_TOLERANCE: u32 = 50;

/// Empirical fixed overhead (radio ramp-up etc.) subtracted from the
/// receiver's "enter RX" deadline.
const OVERHEAD_US: u32 = 300;

/// Margin added before the expected arrival when entering RX.
const RX_WIDENING_US: u32 = 100;

/// Margin added after the expected arrival before declaring a miss.
const RX_SAFETY_US: u32 = 100;

/// 1 Mbps on-air bitrate.
const BITRATE_MBPS: u32 = 1;

const PREAMBLE_BITS: u32 = 8;
const PCF_BITS: u32 = 11;
const CRC_BITS: u32 = 16;
const ADDR_BITS: u32 = (crate::hop::ADDR_LEN as u32) * 8;
const DATA_BITS: u32 = (ControlData::ENCODED_LEN as u32) * 8;

/// On-air time of one control-data packet, in microseconds, at `BITRATE_MBPS`.
const fn packet_on_air_us() -> u32 {
    let total_bits = PREAMBLE_BITS + PCF_BITS + CRC_BITS + ADDR_BITS + DATA_BITS;
    // ceil(total_bits / BITRATE_MBPS)
    (total_bits + BITRATE_MBPS - 1) / BITRATE_MBPS
}

const PACKET_ON_AIR_US: u32 = packet_on_air_us();

/// Number of buffered control-data slots. The writer (thread mode) always
/// writes to the non-current slot, then atomically publishes its index so
/// the timer ISR reader always observes a fully-initialized record.
const DATA_BUFF_COUNT: u8 = 2;

/// Sentinel index meaning "nothing has been published yet". Only valid
/// before the transmitter's first `set_data`; the link never reads the
/// buffer before that point (see `enable`'s documented inertness).
const UNWRITTEN: u8 = DATA_BUFF_COUNT;

/// Link protocol state, shared between transmitter and receiver roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Not initialized for use, or shut down.
    Disabled,
    /// Initialized and enabled, but not yet transmitting/listening.
    ///
    /// The transmitter lingers here until the first `set_data` call; the
    /// receiver passes through this state only momentarily, on its way to
    /// `Binding`.
    Enabled,
    /// Exchanging (or, for the receiver, listening for) the bind handshake.
    Binding,
    /// Bound and exchanging control data on the hopping schedule.
    Started,
}

/// Events delivered to the application via the registered [`Handler`].
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// The link has begun (or resumed) the bind handshake.
    Binding,
    /// The bind handshake completed successfully.
    Bound(BindInfo),
    /// A control-data frame was handed to the radio (transmitter only).
    DataSent,
    /// A control-data frame was received (receiver only).
    DataReceived(&'a ControlData),
    /// A rendezvous slot passed with no frame received (receiver only).
    PacketDropped,
}

/// Receives [`Event`]s from a [`RcRadio`].
///
/// Required for a receiver (there would be no way to deliver data
/// otherwise); optional for a transmitter, which can pass `None` / a
/// [`NoopHandler`] if it doesn't care about lifecycle events.
pub trait Handler {
    fn on_event(&mut self, event: Event<'_>);
}

/// A [`Handler`] that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl Handler for NoopHandler {
    fn on_event(&mut self, _event: Event<'_>) {}
}

/// Bundles the hardware port types used by a [`RcRadio`] instance.
///
/// Every application must define a type implementing this trait and supply
/// it (indirectly, through the port instances it names) when constructing
/// the link.
pub trait Config {
    /// A microsecond-resolution timer with at least 3 compare channels.
    type Timer: TimerPort;
    /// The shockburst-style radio.
    type Radio: RadioPort;
    /// The high-frequency clock source gating the radio.
    type Clock: ClockPort;
    /// The application's event sink.
    type Handler: Handler;
}

/// The double-buffered latest control record shared between thread-mode
/// `set_data` and interrupt-mode timer handling.
///
/// No locks: the writer always targets the non-current slot and then
/// performs a single atomic store of the new index; the reader loads the
/// index once and then copies out that slot, so it always observes a
/// fully-initialized record.
struct DoubleBuffer {
    slots: [ControlData; 2],
    index: AtomicU8,
}

impl DoubleBuffer {
    const fn new() -> Self {
        DoubleBuffer {
            slots: [ControlData { throttle: 0, pitch: 0, roll: 0, yaw: 0 }; 2],
            index: AtomicU8::new(UNWRITTEN),
        }
    }

    /// Writes `data` into the non-current slot and publishes it. Returns
    /// the previous index (`UNWRITTEN` on the very first call).
    fn publish(&mut self, data: ControlData) -> u8 {
        let current = self.index.load(Ordering::Relaxed);
        let next = current.wrapping_add(1) % DATA_BUFF_COUNT;
        self.slots[next as usize] = data;
        self.index.store(next, Ordering::Release);
        current
    }

    /// Reads out the most recently published slot. Must only be called
    /// after at least one `publish`.
    fn latest(&self) -> ControlData {
        let idx = self.index.load(Ordering::Acquire) % DATA_BUFF_COUNT;
        self.slots[idx as usize]
    }
}

/// Per-role state for a transmitter link.
struct TxRole<C: Config> {
    bind_info: BindInfo,
    handler: Option<C::Handler>,
    hop_index: u8,
    buffer: DoubleBuffer,
}

/// Per-role state for a receiver link.
struct RxRole<C: Config> {
    /// Learned during the bind handshake; `None` until then.
    bind_info: Option<BindInfo>,
    handler: C::Handler,
    hop_index: u8,
    missed_packets: u32,
}

enum Role<C: Config> {
    Transmitter(TxRole<C>),
    Receiver(RxRole<C>),
}

/// Real-time link-layer state machine.
///
/// Owns a timer port, a radio port and a clock port, and drives them in
/// response to the interrupt entry points (`on_timer_compare*`,
/// `on_radio_*`) to maintain a synchronous, frequency-hopping rendezvous
/// between one transmitter and one receiver.
pub struct RcRadio<C: Config> {
    timer: C::Timer,
    radio: C::Radio,
    clock: C::Clock,
    state: State,
    hfclk_was_running: bool,
    role: Role<C>,
}

impl<C: Config> RcRadio<C> {
    /// Initializes the link as a transmitter for `identity`, sending at
    /// `rate_hz` (must be in `[10, 500]`).
    ///
    /// No radio activity happens yet; the transmitter stays inert (not even
    /// `ENABLED`'s timer runs) until [`enable`](Self::enable) is called and
    /// then [`set_data`](Self::set_data) is called for the first time. This
    /// avoids ever transmitting a zeroed control-data payload.
    pub fn init_transmitter(
        timer: C::Timer,
        radio: C::Radio,
        clock: C::Clock,
        rate_hz: u16,
        identity: Identity,
        handler: Option<C::Handler>,
    ) -> Result<Self, Error> {
        let bind_info = BindInfo::new(identity, rate_hz).ok_or(Error::InvalidParam)?;

        let mut timer = timer;
        timer.configure();

        trace!("rc-radio: init transmitter, identity={:?} rate={}", identity, rate_hz);

        Ok(RcRadio {
            timer,
            radio,
            clock,
            state: State::Disabled,
            hfclk_was_running: false,
            role: Role::Transmitter(TxRole {
                bind_info,
                handler,
                hop_index: 0,
                buffer: DoubleBuffer::new(),
            }),
        })
    }

    /// Initializes the link as a receiver. `handler` is required: a
    /// receiver with no way to deliver data would be useless, so this is
    /// enforced at the type level rather than with a runtime null check.
    pub fn init_receiver(
        timer: C::Timer,
        radio: C::Radio,
        clock: C::Clock,
        handler: C::Handler,
    ) -> Result<Self, Error> {
        let mut timer = timer;
        timer.configure();

        trace!("rc-radio: init receiver");

        Ok(RcRadio {
            timer,
            radio,
            clock,
            state: State::Disabled,
            hfclk_was_running: false,
            role: Role::Receiver(RxRole {
                bind_info: None,
                handler,
                hop_index: 0,
                missed_packets: 0,
            }),
        })
    }

    /// Returns the current protocol state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Starts the high-frequency clock (if not already running) and begins
    /// the bind procedure.
    ///
    /// For the receiver, binding starts immediately. For the transmitter,
    /// binding starts on the first subsequent [`set_data`](Self::set_data)
    /// call; calling `enable` alone only marks the link `ENABLED`.
    ///
    /// Returns `Err(InvalidParam)` (interpreted as "already enabled") if the
    /// link is not currently `DISABLED`.
    pub fn enable(&mut self) -> Result<(), Error> {
        if self.state != State::Disabled {
            return Err(Error::InvalidParam);
        }

        self.hfclk_was_running = self.clock.is_running();
        if !self.hfclk_was_running {
            self.clock.start();
        }

        if matches!(self.role, Role::Transmitter(_)) {
            self.state = State::Enabled;
            Ok(())
        } else {
            self.radio.init().map_err(|()| Error::PortFailure)?;
            self.state = State::Binding;
            self.rx_start_binding();
            Ok(())
        }
    }

    /// Shuts the link down. Idempotent: calling `disable` from any state
    /// (including `DISABLED`) leaves the link `DISABLED` without error and
    /// without delivering any further events.
    pub fn disable(&mut self) {
        match self.state {
            State::Disabled => return,
            State::Binding | State::Started => {
                self.timer.disable();
                self.radio.disable();
                if !self.hfclk_was_running {
                    self.clock.stop();
                }
            }
            State::Enabled => {
                if !self.hfclk_was_running {
                    self.clock.stop();
                }
            }
        }
        self.state = State::Disabled;
        trace!("rc-radio: disabled");
    }

    /// Sets the latest control data to transmit. Transmitter only.
    ///
    /// Copies `data` into the non-current double-buffer slot and publishes
    /// it atomically; the timer ISR will pick it up on its next compare-0
    /// fire. If this is the first call after `enable`, also starts the bind
    /// procedure.
    ///
    /// Returns `Err(InvalidState)` if the link is a receiver or is
    /// `DISABLED`; in either case the double-buffer is left untouched.
    pub fn set_data(&mut self, data: ControlData) -> Result<(), Error> {
        if self.state == State::Disabled {
            return Err(Error::InvalidState);
        }
        if !matches!(self.role, Role::Transmitter(_)) {
            return Err(Error::InvalidState);
        }

        let was_enabled = self.state == State::Enabled;
        if let Role::Transmitter(tx) = &mut self.role {
            tx.buffer.publish(data);
        }
        if was_enabled {
            self.state = State::Binding;
            self.tx_start_binding()?;
        }
        Ok(())
    }

    /// Timer compare-0 fired.
    pub fn on_timer_compare0(&mut self) {
        if matches!(self.role, Role::Transmitter(_)) {
            self.tx_on_compare0();
        } else {
            self.rx_on_compare0();
        }
    }

    /// Timer compare-1 fired. Unused by the transmitter.
    pub fn on_timer_compare1(&mut self) {
        if matches!(self.role, Role::Receiver(_)) {
            self.rx_on_compare1();
        }
    }

    /// Timer compare-2 fired. Reserved for widened retry windows; not used
    /// by the current state machine.
    pub fn on_timer_compare2(&mut self) {}

    /// The radio finished transmitting a frame successfully.
    pub fn on_radio_tx_success(&mut self) {
        if matches!(self.role, Role::Transmitter(_)) {
            self.tx_on_tx_success();
        }
    }

    /// The radio failed to transmit a frame (retries exhausted).
    pub fn on_radio_tx_failed(&mut self) {
        self.radio.flush_tx();
    }

    /// The radio received a frame; `payload` is the frame's bytes.
    pub fn on_radio_rx_received(&mut self, payload: &[u8]) {
        if matches!(self.role, Role::Transmitter(_)) {
            self.tx_on_rx_received(payload);
        } else {
            match self.state {
                State::Binding => self.rx_on_bind_frame(payload),
                State::Started => self.rx_on_data_frame(payload),
                _ => {}
            }
        }
    }

    /// Provides access to the underlying radio port. Intended for the
    /// application's radio interrupt handler, which must inspect hardware
    /// state (CRC status, the bytes just landed by the peripheral) to
    /// decide which `on_radio_*` method above to call and with what
    /// payload; the port itself has no way to make that decision.
    pub fn radio_mut(&mut self) -> &mut C::Radio {
        &mut self.radio
    }

    #[cfg(test)]
    pub(crate) fn radio(&self) -> &C::Radio {
        &self.radio
    }

    #[cfg(test)]
    pub(crate) fn timer(&self) -> &C::Timer {
        &self.timer
    }

    #[cfg(test)]
    pub(crate) fn handler(&self) -> Option<&C::Handler> {
        match &self.role {
            Role::Transmitter(tx) => tx.handler.as_ref(),
            Role::Receiver(rx) => Some(&rx.handler),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::ClockPort,
        hop::{self, Identity},
        radio::{NoMemory, NotInRxMode, RadioPort, TxPower, MAX_PAYLOAD_LEN},
        timer::{AutoClear, CompareChannel, TimerPort},
    };

    #[derive(Debug, Default)]
    struct MockTimer {
        running: bool,
        compares: [u32; 3],
    }

    impl TimerPort for MockTimer {
        fn configure(&mut self) {}
        fn enable(&mut self) {
            self.running = true;
        }
        fn disable(&mut self) {
            self.running = false;
        }
        fn clear(&mut self) {}
        fn compare_set(&mut self, channel: CompareChannel, ticks: u32, _auto_clear: AutoClear) {
            self.compares[channel as usize] = ticks;
        }
        fn compare_write(&mut self, channel: CompareChannel, ticks: u32) {
            self.compares[channel as usize] = ticks;
        }
        fn capture_get(&self, channel: CompareChannel) -> u32 {
            self.compares[channel as usize]
        }
        fn event_clear(&mut self, _channel: CompareChannel) {}
    }

    #[derive(Debug, Default)]
    struct MockClock {
        running: bool,
    }

    impl ClockPort for MockClock {
        fn is_running(&self) -> bool {
            self.running
        }
        fn start(&mut self) {
            self.running = true;
        }
        fn stop(&mut self) {
            self.running = false;
        }
    }

    #[derive(Debug)]
    struct MockRadio {
        base_address: [u8; 4],
        prefix: u8,
        channel: u8,
        power: Option<TxPower>,
        in_rx: bool,
        last_written: Option<([u8; MAX_PAYLOAD_LEN], usize)>,
    }

    impl Default for MockRadio {
        fn default() -> Self {
            MockRadio {
                base_address: [0; 4],
                prefix: 0,
                channel: 0,
                power: None,
                in_rx: false,
                last_written: None,
            }
        }
    }

    impl MockRadio {
        fn last_payload(&self) -> &[u8] {
            let (buf, len) = self.last_written.as_ref().expect("nothing written yet");
            &buf[..*len]
        }
    }

    impl RadioPort for MockRadio {
        fn init(&mut self) -> Result<(), ()> {
            Ok(())
        }
        fn set_base_address(&mut self, base: [u8; 4]) {
            self.base_address = base;
        }
        fn set_prefix(&mut self, prefix: u8) {
            self.prefix = prefix;
        }
        fn set_rf_channel(&mut self, channel: u8) {
            self.channel = channel;
        }
        fn set_tx_power(&mut self, power: TxPower) {
            self.power = Some(power);
        }
        fn write_payload(&mut self, payload: &[u8], _noack: bool) -> Result<(), NoMemory> {
            let mut buf = [0u8; MAX_PAYLOAD_LEN];
            buf[..payload.len()].copy_from_slice(payload);
            self.last_written = Some((buf, payload.len()));
            Ok(())
        }
        fn start_rx(&mut self) {
            self.in_rx = true;
        }
        fn stop_rx(&mut self) -> Result<(), NotInRxMode> {
            self.in_rx = false;
            Ok(())
        }
        fn flush_tx(&mut self) {
            self.last_written = None;
        }
        fn disable(&mut self) {
            self.in_rx = false;
        }
    }

    #[derive(Debug, Default)]
    struct RecordingHandler {
        binding_count: u32,
        bound: Option<BindInfo>,
        data_sent: u32,
        last_received: Option<ControlData>,
        dropped: u32,
    }

    impl Handler for RecordingHandler {
        fn on_event(&mut self, event: Event<'_>) {
            match event {
                Event::Binding => self.binding_count += 1,
                Event::Bound(info) => self.bound = Some(info),
                Event::DataSent => self.data_sent += 1,
                Event::DataReceived(data) => self.last_received = Some(*data),
                Event::PacketDropped => self.dropped += 1,
            }
        }
    }

    struct MockConfig;

    impl Config for MockConfig {
        type Timer = MockTimer;
        type Radio = MockRadio;
        type Clock = MockClock;
        type Handler = RecordingHandler;
    }

    fn new_transmitter(
        identity: Identity,
        rate_hz: u16,
        handler: Option<RecordingHandler>,
    ) -> RcRadio<MockConfig> {
        RcRadio::<MockConfig>::init_transmitter(
            MockTimer::default(),
            MockRadio::default(),
            MockClock::default(),
            rate_hz,
            identity,
            handler,
        )
        .unwrap()
    }

    fn new_receiver() -> RcRadio<MockConfig> {
        RcRadio::<MockConfig>::init_receiver(
            MockTimer::default(),
            MockRadio::default(),
            MockClock::default(),
            RecordingHandler::default(),
        )
        .unwrap()
    }

    #[test]
    fn invalid_rate_is_rejected_at_init() {
        let result = RcRadio::<MockConfig>::init_transmitter(
            MockTimer::default(),
            MockRadio::default(),
            MockClock::default(),
            1_000,
            Identity::A,
            None,
        );
        assert_eq!(result.err(), Some(Error::InvalidParam));
    }

    #[test]
    fn transmitter_stays_inert_until_first_set_data() {
        let mut tx = new_transmitter(Identity::A, 100, None);
        tx.enable().unwrap();
        assert_eq!(tx.state(), State::Enabled);
        assert!(!tx.timer().running);

        tx.set_data(ControlData::default()).unwrap();
        assert_eq!(tx.state(), State::Binding);
        assert!(tx.timer().running);
        assert_eq!(tx.radio().channel, hop::BIND_CHANNEL);
    }

    #[test]
    fn enable_twice_is_rejected() {
        let mut tx = new_transmitter(Identity::A, 100, None);
        tx.enable().unwrap();
        assert_eq!(tx.enable().err(), Some(Error::InvalidParam));
    }

    #[test]
    fn receiver_enable_starts_binding_immediately() {
        let mut rx = new_receiver();
        rx.enable().unwrap();
        assert_eq!(rx.state(), State::Binding);
        assert!(rx.radio().in_rx);
        assert_eq!(rx.radio().channel, hop::BIND_CHANNEL);
        assert_eq!(rx.radio().last_payload(), hop::BIND_ACK_TOKEN.as_slice());
    }

    #[test]
    fn set_data_on_receiver_is_rejected() {
        let mut rx = new_receiver();
        rx.enable().unwrap();
        assert_eq!(rx.set_data(ControlData::default()).err(), Some(Error::InvalidState));
    }

    #[test]
    fn set_data_while_disabled_is_rejected() {
        let mut tx = new_transmitter(Identity::A, 100, None);
        assert_eq!(tx.set_data(ControlData::default()).err(), Some(Error::InvalidState));
    }

    #[test]
    fn disable_is_idempotent_and_clears_state() {
        let mut tx = new_transmitter(Identity::A, 100, None);
        tx.disable();
        assert_eq!(tx.state(), State::Disabled);

        tx.enable().unwrap();
        tx.set_data(ControlData::default()).unwrap();
        tx.disable();
        assert_eq!(tx.state(), State::Disabled);
        assert!(!tx.timer().running);
    }

    /// Drives a full bind handshake by hand-delivering each side's on-air
    /// frame to the other, exactly as the radio interrupt would.
    fn bind(tx: &mut RcRadio<MockConfig>, rx: &mut RcRadio<MockConfig>) {
        rx.enable().unwrap();
        tx.enable().unwrap();
        tx.set_data(ControlData::default()).unwrap();

        let bind_frame = *tx.radio().last_written.as_ref().unwrap();
        let (buf, len) = bind_frame;
        rx.on_radio_rx_received(&buf[..len]);

        let ack = *rx.radio().last_written.as_ref().unwrap();
        let (buf, len) = ack;
        tx.on_radio_rx_received(&buf[..len]);
    }

    #[test]
    fn bind_handshake_completes_end_to_end() {
        let mut tx = new_transmitter(Identity::C, 100, Some(RecordingHandler::default()));
        let mut rx = new_receiver();

        bind(&mut tx, &mut rx);

        assert_eq!(tx.state(), State::Started);
        assert_eq!(rx.state(), State::Started);
        assert_eq!(tx.radio().power, Some(TxPower::Operating));
        assert_eq!(rx.radio().power, Some(TxPower::Operating));
        assert_eq!(tx.radio().channel, hop::channel(Identity::C, 0));
        assert_eq!(rx.radio().channel, hop::channel(Identity::C, 0));

        let bound = BindInfo::new(Identity::C, 100).unwrap();
        assert_eq!(tx.handler().unwrap().bound, Some(bound));
        assert_eq!(rx.handler().unwrap().bound, Some(bound));
    }

    #[test]
    fn bind_frame_with_bad_identity_is_dropped_silently() {
        let mut rx = new_receiver();
        rx.enable().unwrap();

        let mut garbage = [0u8; BindInfo::ENCODED_LEN];
        garbage[0] = 0xFF; // no such identity
        rx.on_radio_rx_received(&garbage);

        assert_eq!(rx.state(), State::Binding);
    }

    #[test]
    fn data_exchange_advances_hop_schedule_on_success_only() {
        let mut tx = new_transmitter(Identity::A, 100, Some(RecordingHandler::default()));
        let mut rx = new_receiver();
        bind(&mut tx, &mut rx);

        // Successful delivery advances both sides' channel.
        tx.on_timer_compare0();
        let data_frame = *tx.radio().last_written.as_ref().unwrap();
        tx.on_radio_tx_success();
        assert_eq!(tx.radio().channel, hop::channel(Identity::A, 1));

        let (buf, len) = data_frame;
        rx.on_radio_rx_received(&buf[..len]);
        assert_eq!(rx.radio().channel, hop::channel(Identity::A, 1));
        assert_eq!(rx.handler().unwrap().last_received, Some(ControlData::default()));

        // A failed transmission does not advance the transmitter's channel.
        tx.on_radio_tx_failed();
        assert_eq!(tx.radio().channel, hop::channel(Identity::A, 1));
        assert_eq!(tx.handler().unwrap().data_sent, 1);
    }

    #[test]
    fn missed_packets_fall_back_to_binding_after_tolerance() {
        let mut tx = new_transmitter(Identity::B, 100, None);
        let mut rx = new_receiver();
        bind(&mut tx, &mut rx);

        for _ in 0..MISSED_PACKET_TOLERANCE {
            assert_eq!(rx.state(), State::Started);
            rx.on_timer_compare1();
        }

        assert_eq!(rx.state(), State::Binding);
        assert_eq!(rx.radio().channel, hop::BIND_CHANNEL);
        assert_eq!(rx.handler().unwrap().dropped, MISSED_PACKET_TOLERANCE - 1);
        // once for the initial `enable`, once for falling back out of `STARTED`
        assert_eq!(rx.handler().unwrap().binding_count, 2);
    }

    #[test]
    fn a_single_miss_does_not_reset_the_hop_schedule() {
        let mut tx = new_transmitter(Identity::D, 100, None);
        let mut rx = new_receiver();
        bind(&mut tx, &mut rx);

        rx.on_timer_compare1();
        assert_eq!(rx.state(), State::Started);
        assert_eq!(rx.radio().channel, hop::channel(Identity::D, 1));
    }

    #[test]
    fn rx_arm_cycle_programs_exact_compare_values() {
        let mut tx = new_transmitter(Identity::E, 100, None);
        let mut rx = new_receiver();
        bind(&mut tx, &mut rx);

        // 100 Hz -> 10_000us interval. Normal cycle: overhead + on-air time +
        // one rx_widening margin subtracted from Cc0; Cc1 at interval + rx_safety.
        assert_eq!(rx.timer().compares[0], 10_000 - (300 + 107 + 100));
        assert_eq!(rx.timer().compares[1], 10_000 + 100);

        // First miss: Cc0's margin doubles, Cc1 shrinks back to the bare
        // interval (its "first-miss window-shrink").
        rx.on_timer_compare1();
        assert_eq!(rx.timer().compares[0], 10_000 - (300 + 107 + 200));
        assert_eq!(rx.timer().compares[1], 10_000);
    }
}
