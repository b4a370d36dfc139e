
use ieee802154::mac::DecodeError;
use strum::{Display, EnumIter, IntoStaticStr};

/// Outcome of a sub-MAC operation, reported alongside receive and transmit events.
///
/// Outcomes are produced by the sub-MAC and passed through to the consumer unexamined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// Operation completed
    Success,

    /// No acknowledgement received for an ack-requested frame
    NoAck,

    /// CSMA/CA could not find a clear channel
    ChannelAccessFailure,

    /// Operation aborted (ie. by a state change)
    Abort,

    /// No receive buffer available
    NoBufs,

    /// Frame check sequence mismatch
    Fcs,

    /// Security processing failed
    Security,

    /// Duplicate frame received
    Duplicated,

    /// Radio was not in a state to perform the operation
    InvalidState,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        *self == Outcome::Success
    }

    /// Static name of the outcome for logging
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Frame encode / decode errors
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Header, payload and FCS exceed the maximum PSDU length
    PayloadTooLong,

    /// Output buffer cannot hold the encoded frame
    BufferTooSmall,

    /// Header decoding error
    Decode(DecodeError),
}

impl From<DecodeError> for FrameError {
    fn from(e: DecodeError) -> Self {
        FrameError::Decode(e)
    }
}

#[cfg(test)]
mod test {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn outcome_names() {
        assert_eq!(Outcome::Success.as_str(), "success");
        assert_eq!(Outcome::ChannelAccessFailure.as_str(), "channel_access_failure");

        let failures = Outcome::iter().filter(|o| !o.is_success()).count();
        assert_eq!(failures, Outcome::iter().count() - 1);
    }
}
