//! Sub-MAC routing simulation
//!
//! Replays a fixed sequence of sub-MAC events against mock MAC / raw link
//! consumers and reports which consumer received each event.
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

use log::{debug, info};

use structopt::StructOpt;

use submac_router::prelude::*;
use submac_router::mock::{MockLinkRaw, MockMac};

#[derive(Debug, StructOpt)]
struct Options {
    #[structopt(long)]
    /// Compose a radio-only stack (no full MAC)
    pub radio_only: bool,

    #[structopt(long, conflicts_with = "radio-only")]
    /// Compose a full stack without a raw link
    pub no_link_raw: bool,

    #[structopt(long)]
    /// Start with raw link mode enabled
    pub link_raw_enabled: bool,

    #[structopt(long, default_value = "43981")]
    /// Device extended address
    pub ext_address: u64,

    #[structopt(long, default_value = "info")]
    /// Configure log level
    pub log_level: simplelog::LevelFilter,
}

fn data_frame(seq: u8, secured: bool) -> anyhow::Result<Frame> {
    let mut f = Frame::data(
        MacAddress::Short(PanId(1), ShortAddress(2)),
        MacAddress::Short(PanId(1), ShortAddress(3)),
        seq,
        &[0xaa, 0xbb, 0xcc],
        true,
    ).map_err(|e| anyhow::anyhow!("Frame error: {:?}", e))?;

    if secured {
        f.header.security = ieee802154::mac::Security::Enabled;
    }

    f.channel = 15;
    Ok(f)
}

/// Issue one event of each category
fn replay<M: MacHandler, L: LinkRawHandler>(callbacks: &mut Callbacks<M, L>, seq: u8) -> anyhow::Result<()> {
    debug!("Replaying events in {} mode", callbacks.mode().as_str());

    let mut rx = data_frame(seq, false)?;
    callbacks.receive_done(Some(&mut rx), Outcome::Success);
    callbacks.receive_done(None, Outcome::Fcs);

    callbacks.record_cca_status(true, 15);

    let mut tx = data_frame(seq.wrapping_add(1), true)?;
    #[cfg(feature = "header-ie")]
    callbacks.frame_updated(&mut tx);

    callbacks.record_frame_transmit_status(&tx, None, Outcome::NoAck, 0, true);

    let mut ack = Frame::ack(&tx);
    callbacks.record_frame_transmit_status(&tx, Some(&ack), Outcome::Success, 1, false);
    callbacks.transmit_done(&mut tx, Some(&mut ack), Outcome::Success);

    callbacks.energy_scan_done(-72);
    callbacks.energy_scan_done(RSSI_INVALID);

    Ok(())
}

fn report(mac: Option<&MockMac>, link_raw: Option<&MockLinkRaw>) {
    if let Some(mac) = mac {
        for e in mac.events() {
            info!("mac      <- {:?}", e);
        }
    }
    if let Some(link_raw) = link_raw {
        for e in link_raw.events() {
            info!("link_raw <- {:?}", e);
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Load options
    let opts = Options::from_args();

    // Initialise logging
    let _ = simplelog::SimpleLogger::init(opts.log_level, simplelog::Config::default());

    let mac = MockMac::new(ExtendedAddress(opts.ext_address));
    let link_raw = MockLinkRaw::new(opts.link_raw_enabled);

    if opts.radio_only {
        info!("Composing radio-only stack");

        let mut callbacks = Callbacks::radio_only(link_raw.clone());
        replay(&mut callbacks, 0)?;
        report(None, Some(&link_raw));

    } else if opts.no_link_raw {
        info!("Composing full stack without raw link");

        let mut callbacks = Callbacks::full(mac.clone());
        replay(&mut callbacks, 0)?;
        report(Some(&mac), None);

    } else {
        info!("Composing full stack (raw link enabled: {})", opts.link_raw_enabled);

        let mut callbacks = Callbacks::full_with_link_raw(mac.clone(), link_raw.clone());
        replay(&mut callbacks, 0)?;
        report(Some(&mac), Some(&link_raw));

        // Flip raw link mode, routing follows on the next event
        link_raw.set_enabled(!opts.link_raw_enabled);
        info!("Raw link enabled: {}", !opts.link_raw_enabled);

        replay(&mut callbacks, 10)?;
        report(Some(&mac), Some(&link_raw));
    }

    debug!("Simulation complete");

    Ok(())
}
