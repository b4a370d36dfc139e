//! Raw link interface, passes radio events directly through to an application
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

use crate::{RetryCount, Rssi, error::Outcome, frame::Frame};

/// Raw link trait, implemented by the pass-through layer used when the device
/// is driven directly as a radio.
///
/// There is no CCA status consumer on the raw link.
pub trait LinkRawHandler {
    /// Whether raw link mode is currently enabled.
    ///
    /// Only the raw link writes this state, routing reads it once per event.
    fn is_enabled(&self) -> bool;

    fn invoke_receive_done(&mut self, frame: Option<&mut Frame>, outcome: Outcome);

    fn invoke_transmit_done(&mut self, frame: &mut Frame, ack: Option<&mut Frame>, outcome: Outcome);

    fn invoke_energy_scan_done(&mut self, max_rssi: Rssi);

    /// Transmit attempt statistics, only delivered in radio-only builds
    fn record_frame_transmit_status(
        &mut self,
        frame: &Frame,
        ack: Option<&Frame>,
        outcome: Outcome,
        retry_count: RetryCount,
        will_retransmit: bool,
    );
}

impl<T: LinkRawHandler + ?Sized> LinkRawHandler for &mut T {
    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }

    fn invoke_receive_done(&mut self, frame: Option<&mut Frame>, outcome: Outcome) {
        (**self).invoke_receive_done(frame, outcome)
    }

    fn invoke_transmit_done(&mut self, frame: &mut Frame, ack: Option<&mut Frame>, outcome: Outcome) {
        (**self).invoke_transmit_done(frame, ack, outcome)
    }

    fn invoke_energy_scan_done(&mut self, max_rssi: Rssi) {
        (**self).invoke_energy_scan_done(max_rssi)
    }

    fn record_frame_transmit_status(
        &mut self,
        frame: &Frame,
        ack: Option<&Frame>,
        outcome: Outcome,
        retry_count: RetryCount,
        will_retransmit: bool,
    ) {
        (**self).record_frame_transmit_status(frame, ack, outcome, retry_count, will_retransmit)
    }
}
