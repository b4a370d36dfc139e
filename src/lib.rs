//! Sub-MAC event routing for 802.15.4 radio stacks.
//!
//! The sub-MAC drives the radio and reports receive, transmit, CCA and energy
//! scan outcomes through a fixed set of callbacks. [`Callbacks`] decides, per
//! event, whether the full MAC layer or the raw link layer receives it, based
//! on how the stack was composed ([`Mode`]) and whether raw link mode is
//! currently enabled.
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

#![no_std]

#[cfg(any(test, feature="std"))]
extern crate std;

mod log;

pub mod error;

pub mod frame;

pub mod mac;

pub mod link_raw;

pub mod callbacks;

#[cfg(any(test, feature="mocks"))]
pub mod mock;

pub mod prelude;

pub use callbacks::{Absent, Callbacks, Mode, Stack};

/// Channel index
pub type Channel = u8;

/// Received signal strength in dBm
pub type Rssi = i8;

/// Number of transmit attempts so far
pub type RetryCount = u8;

/// Sentinel RSSI value indicating no valid reading (ie. failed / aborted energy scan)
pub const RSSI_INVALID: Rssi = 127;
