//! Logging facade, selects between `log` and `defmt` backends
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

#[cfg(not(feature = "log-defmt"))]
#[allow(unused_imports)]
pub use ::log::{trace, debug, info, warn, error};

#[cfg(feature = "log-defmt")]
#[allow(unused_imports)]
pub use defmt::{trace, debug, info, warn, error};
