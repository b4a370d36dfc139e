//! Mock MAC and raw link implementations to assist with testing
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::vec::Vec;

use ieee802154::mac::ExtendedAddress;

use crate::{Channel, RetryCount, Rssi, error::Outcome, frame::Frame};
use crate::{mac::MacHandler, link_raw::LinkRawHandler};

#[cfg(feature = "header-ie")]
use crate::frame::{FrameMut, TxFlags};

/// Event delivered to a mock consumer
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ReceiveDone {
        frame: Option<Frame>,
        outcome: Outcome,
    },
    CcaStatus {
        success: bool,
        channel: Channel,
    },
    TransmitStatus {
        frame: Frame,
        ack: Option<Frame>,
        outcome: Outcome,
        retry_count: RetryCount,
        will_retransmit: bool,
    },
    TransmitDone {
        frame: Frame,
        ack: Option<Frame>,
        outcome: Outcome,
    },
    EnergyScanDone {
        max_rssi: Rssi,
    },
    AesCcm {
        seq: u8,
        ext_address: ExtendedAddress,
    },
}

/// Shared, cloneable event log
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    /// Remove and return all recorded events
    pub fn take(&self) -> Vec<Event> {
        core::mem::take(&mut *self.0.lock().unwrap())
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mock full MAC, records delivered events
#[derive(Debug, Clone)]
pub struct MockMac {
    ext_address: ExtendedAddress,
    journal: Journal,
}

impl MockMac {
    pub fn new(ext_address: ExtendedAddress) -> Self {
        Self {
            ext_address,
            journal: Journal::new(),
        }
    }

    /// Remove and return events delivered so far
    pub fn events(&self) -> Vec<Event> {
        self.journal.take()
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }
}

impl MacHandler for MockMac {
    fn handle_received_frame(&mut self, frame: Option<&mut Frame>, outcome: Outcome) {
        self.journal.push(Event::ReceiveDone {
            frame: frame.as_deref().cloned(),
            outcome,
        });
    }

    fn record_cca_status(&mut self, success: bool, channel: Channel) {
        self.journal.push(Event::CcaStatus { success, channel });
    }

    fn record_frame_transmit_status(
        &mut self,
        frame: &Frame,
        ack: Option<&Frame>,
        outcome: Outcome,
        retry_count: RetryCount,
        will_retransmit: bool,
    ) {
        self.journal.push(Event::TransmitStatus {
            frame: frame.clone(),
            ack: ack.cloned(),
            outcome,
            retry_count,
            will_retransmit,
        });
    }

    fn handle_transmit_done(&mut self, frame: &mut Frame, ack: Option<&mut Frame>, outcome: Outcome) {
        self.journal.push(Event::TransmitDone {
            frame: frame.clone(),
            ack: ack.as_deref().cloned(),
            outcome,
        });
    }

    fn energy_scan_done(&mut self, max_rssi: Rssi) {
        self.journal.push(Event::EnergyScanDone { max_rssi });
    }

    fn ext_address(&self) -> ExtendedAddress {
        self.ext_address.clone()
    }

    #[cfg(feature = "header-ie")]
    fn process_transmit_aes_ccm(&self, mut frame: FrameMut<'_>, ext_address: &ExtendedAddress) {
        self.journal.push(Event::AesCcm {
            seq: frame.header().seq,
            ext_address: ext_address.clone(),
        });

        frame.insert_tx_flags(TxFlags::SECURITY_PROCESSED);
    }
}

/// Mock raw link, records delivered events.
///
/// The enabled flag is shared between clones so it can be toggled while
/// another clone is owned by the router.
#[derive(Debug, Clone)]
pub struct MockLinkRaw {
    enabled: Arc<AtomicBool>,
    journal: Journal,
}

impl MockLinkRaw {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(enabled)),
            journal: Journal::new(),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Remove and return events delivered so far
    pub fn events(&self) -> Vec<Event> {
        self.journal.take()
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }
}

impl LinkRawHandler for MockLinkRaw {
    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn invoke_receive_done(&mut self, frame: Option<&mut Frame>, outcome: Outcome) {
        self.journal.push(Event::ReceiveDone {
            frame: frame.as_deref().cloned(),
            outcome,
        });
    }

    fn invoke_transmit_done(&mut self, frame: &mut Frame, ack: Option<&mut Frame>, outcome: Outcome) {
        self.journal.push(Event::TransmitDone {
            frame: frame.clone(),
            ack: ack.as_deref().cloned(),
            outcome,
        });
    }

    fn invoke_energy_scan_done(&mut self, max_rssi: Rssi) {
        self.journal.push(Event::EnergyScanDone { max_rssi });
    }

    fn record_frame_transmit_status(
        &mut self,
        frame: &Frame,
        ack: Option<&Frame>,
        outcome: Outcome,
        retry_count: RetryCount,
        will_retransmit: bool,
    ) {
        self.journal.push(Event::TransmitStatus {
            frame: frame.clone(),
            ack: ack.cloned(),
            outcome,
            retry_count,
            will_retransmit,
        });
    }
}
