//! Sub-MAC callbacks, routes radio events to the full MAC or raw link layer
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

use ieee802154::mac::ExtendedAddress;
use strum::IntoStaticStr;

use crate::log::trace;

use crate::{Channel, RetryCount, Rssi, error::Outcome, frame::Frame};
use crate::{mac::MacHandler, link_raw::LinkRawHandler};

#[cfg(feature = "header-ie")]
use crate::frame::FrameMut;

/// Stack mode, fixed when the stack is composed
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[strum(serialize_all = "snake_case")]
pub enum Mode {
    /// Full MAC present, raw link optional and runtime switchable
    FullStack,
    /// No full MAC, all events go to the raw link
    RadioOnly,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Collaborators available to the router
#[derive(Debug)]
pub enum Stack<M, L> {
    Full {
        mac: M,
        link_raw: Option<L>,
    },
    RadioOnly {
        link_raw: L,
    },
}

/// Placeholder for a collaborator that is not part of the stack.
///
/// Uninhabited, so it can never be constructed or called.
#[derive(Debug)]
pub enum Absent {}

/// Sub-MAC event router.
///
/// Each event is delivered synchronously to exactly one consumer (or dropped
/// where the mode has none). In full-stack mode the raw link enabled flag is
/// read once per event, so toggling it takes effect on the next call.
#[derive(Debug)]
pub struct Callbacks<M, L> {
    stack: Stack<M, L>,
}

enum Target<'a, M, L> {
    Mac(&'a mut M),
    LinkRaw(&'a mut L),
}

impl<'a, M, L> Target<'a, M, L> {
    fn name(&self) -> &'static str {
        match self {
            Target::Mac(_) => "mac",
            Target::LinkRaw(_) => "link_raw",
        }
    }
}

impl<M: MacHandler> Callbacks<M, Absent> {
    /// Create a full-stack router without a raw link
    pub fn full(mac: M) -> Self {
        Self::new(Stack::Full { mac, link_raw: None })
    }
}

impl<L: LinkRawHandler> Callbacks<Absent, L> {
    /// Create a radio-only router
    pub fn radio_only(link_raw: L) -> Self {
        Self::new(Stack::RadioOnly { link_raw })
    }
}

impl<M, L> Callbacks<M, L>
where
    M: MacHandler,
    L: LinkRawHandler,
{
    pub fn new(stack: Stack<M, L>) -> Self {
        Self { stack }
    }

    /// Create a full-stack router with a runtime switchable raw link
    pub fn full_with_link_raw(mac: M, link_raw: L) -> Self {
        Self::new(Stack::Full { mac, link_raw: Some(link_raw) })
    }

    pub fn mode(&self) -> Mode {
        match self.stack {
            Stack::Full { .. } => Mode::FullStack,
            Stack::RadioOnly { .. } => Mode::RadioOnly,
        }
    }

    pub fn mac(&self) -> Option<&M> {
        match &self.stack {
            Stack::Full { mac, .. } => Some(mac),
            Stack::RadioOnly { .. } => None,
        }
    }

    pub fn mac_mut(&mut self) -> Option<&mut M> {
        match &mut self.stack {
            Stack::Full { mac, .. } => Some(mac),
            Stack::RadioOnly { .. } => None,
        }
    }

    pub fn link_raw(&self) -> Option<&L> {
        match &self.stack {
            Stack::Full { link_raw, .. } => link_raw.as_ref(),
            Stack::RadioOnly { link_raw } => Some(link_raw),
        }
    }

    pub fn link_raw_mut(&mut self) -> Option<&mut L> {
        match &mut self.stack {
            Stack::Full { link_raw, .. } => link_raw.as_mut(),
            Stack::RadioOnly { link_raw } => Some(link_raw),
        }
    }

    pub fn into_stack(self) -> Stack<M, L> {
        self.stack
    }

    /// Select the consumer for data events (receive, transmit done, energy scan)
    fn target(&mut self) -> Target<'_, M, L> {
        match &mut self.stack {
            Stack::Full { link_raw: Some(link_raw), .. } if link_raw.is_enabled() => Target::LinkRaw(link_raw),
            Stack::Full { mac, .. } => Target::Mac(mac),
            Stack::RadioOnly { link_raw } => Target::LinkRaw(link_raw),
        }
    }

    /// Frame reception complete, `frame` may be `None` on failure
    pub fn receive_done(&mut self, frame: Option<&mut Frame>, outcome: Outcome) {
        let target = self.target();

        trace!("Receive done ({}) -> {}", outcome.as_str(), target.name());

        match target {
            Target::Mac(mac) => mac.handle_received_frame(frame, outcome),
            Target::LinkRaw(link_raw) => link_raw.invoke_receive_done(frame, outcome),
        }
    }

    /// Record a single CCA result, only the full MAC consumes these
    pub fn record_cca_status(&mut self, success: bool, channel: Channel) {
        match &mut self.stack {
            Stack::Full { mac, .. } => {
                trace!("CCA status {} on channel {} -> mac", success, channel);
                mac.record_cca_status(success, channel);
            },
            Stack::RadioOnly { .. } => {
                trace!("CCA status {} on channel {} dropped (radio only)", success, channel);
            },
        }
    }

    /// Record the status of a transmit attempt.
    ///
    /// Goes to the full MAC whenever one is present, regardless of raw link state.
    pub fn record_frame_transmit_status(
        &mut self,
        frame: &Frame,
        ack: Option<&Frame>,
        outcome: Outcome,
        retry_count: RetryCount,
        will_retransmit: bool,
    ) {
        match &mut self.stack {
            Stack::Full { mac, .. } => {
                trace!("Transmit status ({}, retries: {}, retx: {}) -> mac",
                    outcome.as_str(), retry_count, will_retransmit);
                mac.record_frame_transmit_status(frame, ack, outcome, retry_count, will_retransmit);
            },
            Stack::RadioOnly { link_raw } => {
                trace!("Transmit status ({}, retries: {}, retx: {}) -> link_raw",
                    outcome.as_str(), retry_count, will_retransmit);
                link_raw.record_frame_transmit_status(frame, ack, outcome, retry_count, will_retransmit);
            },
        }
    }

    /// Transmission sequence complete
    pub fn transmit_done(&mut self, frame: &mut Frame, ack: Option<&mut Frame>, outcome: Outcome) {
        let target = self.target();

        trace!("Transmit done for {} ({}) -> {}", frame.header.seq, outcome.as_str(), target.name());

        match target {
            Target::Mac(mac) => mac.handle_transmit_done(frame, ack, outcome),
            Target::LinkRaw(link_raw) => link_raw.invoke_transmit_done(frame, ack, outcome),
        }
    }

    /// Energy scan complete, `max_rssi` is `RSSI_INVALID` if the scan failed
    pub fn energy_scan_done(&mut self, max_rssi: Rssi) {
        let target = self.target();

        trace!("Energy scan done (max rssi: {}) -> {}", max_rssi, target.name());

        match target {
            Target::Mac(mac) => mac.energy_scan_done(max_rssi),
            Target::LinkRaw(link_raw) => link_raw.invoke_energy_scan_done(max_rssi),
        }
    }

    /// Frame is about to be transmitted, apply pending security processing.
    ///
    /// Called from interrupt context: only the provided frame may be read or
    /// written. This performs no logging, locking or allocation.
    #[cfg(feature = "header-ie")]
    pub fn frame_updated(&self, frame: &mut Frame) {
        match &self.stack {
            Stack::Full { mac, .. } => {
                if frame.security_enabled() {
                    let ext_address = mac.ext_address();
                    mac.process_transmit_aes_ccm(FrameMut::new(frame), &ext_address);
                }
            },
            // Not supported without a full MAC
            Stack::RadioOnly { .. } => (),
        }
    }
}

impl MacHandler for Absent {
    fn handle_received_frame(&mut self, _frame: Option<&mut Frame>, _outcome: Outcome) {
        match *self {}
    }

    fn record_cca_status(&mut self, _success: bool, _channel: Channel) {
        match *self {}
    }

    fn record_frame_transmit_status(
        &mut self,
        _frame: &Frame,
        _ack: Option<&Frame>,
        _outcome: Outcome,
        _retry_count: RetryCount,
        _will_retransmit: bool,
    ) {
        match *self {}
    }

    fn handle_transmit_done(&mut self, _frame: &mut Frame, _ack: Option<&mut Frame>, _outcome: Outcome) {
        match *self {}
    }

    fn energy_scan_done(&mut self, _max_rssi: Rssi) {
        match *self {}
    }

    fn ext_address(&self) -> ExtendedAddress {
        match *self {}
    }

    #[cfg(feature = "header-ie")]
    fn process_transmit_aes_ccm(&self, _frame: FrameMut<'_>, _ext_address: &ExtendedAddress) {
        match *self {}
    }
}

impl LinkRawHandler for Absent {
    fn is_enabled(&self) -> bool {
        match *self {}
    }

    fn invoke_receive_done(&mut self, _frame: Option<&mut Frame>, _outcome: Outcome) {
        match *self {}
    }

    fn invoke_transmit_done(&mut self, _frame: &mut Frame, _ack: Option<&mut Frame>, _outcome: Outcome) {
        match *self {}
    }

    fn invoke_energy_scan_done(&mut self, _max_rssi: Rssi) {
        match *self {}
    }

    fn record_frame_transmit_status(
        &mut self,
        _frame: &Frame,
        _ack: Option<&Frame>,
        _outcome: Outcome,
        _retry_count: RetryCount,
        _will_retransmit: bool,
    ) {
        match *self {}
    }
}
