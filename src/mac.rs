//! Full MAC layer interface, the consumer of sub-MAC events in full-stack builds
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

use ieee802154::mac::ExtendedAddress;

use crate::{Channel, RetryCount, Rssi, error::Outcome, frame::Frame};

#[cfg(feature = "header-ie")]
use crate::frame::FrameMut;

/// Full MAC trait, implemented by the mesh MAC layer to receive sub-MAC events
pub trait MacHandler {
    /// Handle a completed (or failed) frame reception.
    ///
    /// `frame` may be `None` when reception failed.
    fn handle_received_frame(&mut self, frame: Option<&mut Frame>, outcome: Outcome);

    /// Record the result of a single clear channel assessment
    fn record_cca_status(&mut self, success: bool, channel: Channel);

    /// Record the status of a single transmit attempt.
    ///
    /// Called once per attempt, `will_retransmit` is set when the sub-MAC is going to retry.
    fn record_frame_transmit_status(
        &mut self,
        frame: &Frame,
        ack: Option<&Frame>,
        outcome: Outcome,
        retry_count: RetryCount,
        will_retransmit: bool,
    );

    /// Handle the final outcome of a transmission
    fn handle_transmit_done(&mut self, frame: &mut Frame, ack: Option<&mut Frame>, outcome: Outcome);

    /// Handle energy scan completion, `max_rssi` is `RSSI_INVALID` if the scan failed
    fn energy_scan_done(&mut self, max_rssi: Rssi);

    /// Fetch the device's own extended address
    fn ext_address(&self) -> ExtendedAddress;

    /// Apply in-place AES-CCM processing to a frame prior to transmission.
    ///
    /// Called from interrupt context, implementations must only touch the provided
    /// frame and read-only key material: no locks, no allocation, no logging.
    #[cfg(feature = "header-ie")]
    fn process_transmit_aes_ccm(&self, frame: FrameMut<'_>, ext_address: &ExtendedAddress);
}

impl<T: MacHandler + ?Sized> MacHandler for &mut T {
    fn handle_received_frame(&mut self, frame: Option<&mut Frame>, outcome: Outcome) {
        (**self).handle_received_frame(frame, outcome)
    }

    fn record_cca_status(&mut self, success: bool, channel: Channel) {
        (**self).record_cca_status(success, channel)
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

    fn handle_transmit_done(&mut self, frame: &mut Frame, ack: Option<&mut Frame>, outcome: Outcome) {
        (**self).handle_transmit_done(frame, ack, outcome)
    }

    fn energy_scan_done(&mut self, max_rssi: Rssi) {
        (**self).energy_scan_done(max_rssi)
    }

    fn ext_address(&self) -> ExtendedAddress {
        (**self).ext_address()
    }

    #[cfg(feature = "header-ie")]
    fn process_transmit_aes_ccm(&self, frame: FrameMut<'_>, ext_address: &ExtendedAddress) {
        (**self).process_transmit_aes_ccm(frame, ext_address)
    }
}
