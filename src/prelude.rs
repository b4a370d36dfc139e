//! Sub-MAC router crate prelude
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

pub use crate::{Channel, Rssi, RetryCount, RSSI_INVALID};

pub use crate::callbacks::{Absent, Callbacks, Mode, Stack};

pub use crate::error::{Outcome, FrameError};

pub use crate::frame::{Frame, FrameMut, RxInfo, TxFlags};

pub use crate::mac::MacHandler;
pub use crate::link_raw::LinkRawHandler;

pub use ieee802154::mac::{Address as MacAddress, PanId, AddressMode, ShortAddress, ExtendedAddress};
