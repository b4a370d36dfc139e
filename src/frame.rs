//! Radio frame representation shared between the sub-MAC and its consumers
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

use bitflags::bitflags;
use heapless::Vec;

use ieee802154::mac::*;

use crate::{Channel, Rssi, RSSI_INVALID, error::FrameError};

/// Maximum PHY service data unit length for 802.15.4
pub const MAX_PSDU_LEN: usize = 127;

/// Frame check sequence length
pub const FCS_LEN: usize = 2;

bitflags! {
    /// Transmit-side frame state, set by the sub-MAC and MAC during TX preparation
    #[derive(Default)]
    pub struct TxFlags: u8 {
        /// In-place authenticated encryption has been applied
        const SECURITY_PROCESSED = 0b0000_0001;
        /// Header IEs have been rewritten for this transmission
        const HEADER_UPDATED     = 0b0000_0010;
    }
}

/// Receive metadata captured by the sub-MAC
#[derive(Debug, Clone, PartialEq)]
pub struct RxInfo {
    pub rssi: Rssi,
    pub lqi: u8,
    /// Receive timestamp in microseconds
    pub timestamp_us: u64,
    /// Set when the ACK we sent for this frame had frame-pending set
    pub acked_with_frame_pending: bool,
}

impl Default for RxInfo {
    fn default() -> Self {
        Self {
            rssi: RSSI_INVALID,
            lqi: 0,
            timestamp_us: 0,
            acked_with_frame_pending: false,
        }
    }
}

/// Frame object holds an IEEE 802.15.4 header with owned, bounded payload storage.
///
/// The payload is everything following the MAC header (command / beacon content,
/// data and any security MIC), the FCS is not stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub header: Header,

    payload: Vec<u8, MAX_PSDU_LEN>,

    /// Channel the frame was received on / is to be sent on
    pub channel: Channel,

    pub rx_info: RxInfo,

    pub tx_flags: TxFlags,
}

impl Frame {
    pub fn data(dest: Address, source: Address, seq: u8, data: &[u8], ack: bool) -> Result<Frame, FrameError> {
        let mut frame = Frame {
            header: Header {
                frame_type: FrameType::Data,
                frame_pending: false,
                security: Security::None,
                ack_request: ack,
                pan_id_compress: false,
                version: FrameVersion::Ieee802154_2006,
                destination: dest,
                source: source,
                seq: seq,
                seq_no_suppress: false,
                ie_present: false,
            },
            payload: Vec::new(),
            channel: 0,
            rx_info: RxInfo::default(),
            tx_flags: TxFlags::empty(),
        };

        frame.set_payload(data)?;

        Ok(frame)
    }

    /// Generate an ACK for the provided frame
    pub fn ack(request: &Frame) -> Frame {
        Frame {
            header: Header {
                frame_type: FrameType::Acknowledgement,
                frame_pending: false,
                security: Security::None,
                ack_request: false,
                pan_id_compress: false,
                version: FrameVersion::Ieee802154_2006,
                destination: request.header.source,
                source: request.header.destination,
                seq: request.header.seq,
                seq_no_suppress: false,
                ie_present: false,
            },
            payload: Vec::new(),
            channel: request.channel,
            rx_info: RxInfo::default(),
            tx_flags: TxFlags::empty(),
        }
    }

    /// Decode a raw PSDU, optionally stripping a trailing FCS
    pub fn decode(psdu: &[u8], contains_fcs: bool) -> Result<Self, FrameError> {
        let (header, header_len) = Header::decode(psdu)?;

        let mut end = psdu.len();
        if contains_fcs {
            if end < header_len + FCS_LEN {
                return Err(FrameError::Decode(DecodeError::NotEnoughBytes));
            }
            end -= FCS_LEN;
        }

        if end + FCS_LEN > MAX_PSDU_LEN {
            return Err(FrameError::PayloadTooLong);
        }

        let payload = Vec::from_slice(&psdu[header_len..end])
            .map_err(|_| FrameError::PayloadTooLong)?;

        Ok(Frame {
            header,
            payload,
            channel: 0,
            rx_info: RxInfo::default(),
            tx_flags: TxFlags::empty(),
        })
    }

    /// Encode header and payload into the provided buffer, returning the encoded length.
    ///
    /// The FCS is not written, `buf` needs at least `encoded_len()` bytes.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, FrameError> {
        let header_len = self.header_len();
        let len = header_len + self.payload.len();

        if buf.len() < len {
            return Err(FrameError::BufferTooSmall);
        }

        self.header.encode(&mut buf[..header_len]);
        buf[header_len..len].copy_from_slice(&self.payload);

        Ok(len)
    }

    /// Encoded MAC header length
    pub fn header_len(&self) -> usize {
        let mut scratch = [0u8; MAX_PSDU_LEN];
        self.header.encode(&mut scratch)
    }

    /// Encoded header and payload length, excluding the FCS
    pub fn encoded_len(&self) -> usize {
        self.header_len() + self.payload.len()
    }

    /// Largest payload that fits in a PSDU with the current header and FCS
    pub fn max_payload_len(&self) -> usize {
        MAX_PSDU_LEN.saturating_sub(self.header_len() + FCS_LEN)
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn set_payload(&mut self, body: &[u8]) -> Result<(), FrameError> {
        if body.len() > self.max_payload_len() {
            return Err(FrameError::PayloadTooLong);
        }

        self.payload = Vec::from_slice(body).map_err(|_| FrameError::PayloadTooLong)?;

        Ok(())
    }

    /// Check whether the security enabled bit is set in the header
    pub fn security_enabled(&self) -> bool {
        self.header.security == Security::Enabled
    }
}

/// In-place view of a frame handed to last-moment security processing.
///
/// Header fields, payload bytes and transmit flags may be rewritten but the
/// frame cannot be resized or replaced.
pub struct FrameMut<'a> {
    frame: &'a mut Frame,
}

impl<'a> FrameMut<'a> {
    pub(crate) fn new(frame: &'a mut Frame) -> Self {
        Self { frame }
    }

    pub fn header(&self) -> &Header {
        &self.frame.header
    }

    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.frame.header
    }

    pub fn payload(&self) -> &[u8] {
        &self.frame.payload
    }

    /// Fixed length payload slice
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.frame.payload
    }

    pub fn tx_flags(&self) -> TxFlags {
        self.frame.tx_flags
    }

    pub fn insert_tx_flags(&mut self, flags: TxFlags) {
        self.frame.tx_flags.insert(flags);
    }

    pub fn security_enabled(&self) -> bool {
        self.frame.security_enabled()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn data_frame() -> Frame {
        Frame::data(
            Address::Short(PanId(1), ShortAddress(2)),
            Address::Short(PanId(1), ShortAddress(3)),
            4,
            &[0, 1, 2, 3, 4, 5],
            true,
        ).unwrap()
    }

    #[test]
    fn decode_encoded_frame() {
        let frame = data_frame();

        let mut buff = [0u8; MAX_PSDU_LEN];
        let n = frame.encode(&mut buff).unwrap();

        let decoded = Frame::decode(&buff[..n], false).unwrap();
        assert_eq!(decoded.header, frame.header);
        assert_eq!(decoded.payload(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn decode_strips_fcs() {
        let frame = data_frame();

        let mut buff = [0u8; MAX_PSDU_LEN];
        let n = frame.encode(&mut buff).unwrap();
        buff[n] = 0xaa;
        buff[n + 1] = 0xbb;

        let decoded = Frame::decode(&buff[..n + FCS_LEN], true).unwrap();
        assert_eq!(decoded.payload(), frame.payload());
    }

    #[test]
    fn decode_short_frame() {
        assert!(Frame::decode(&[0x41], false).is_err());
    }

    #[test]
    fn payload_bounded() {
        let mut frame = data_frame();
        let big = [0u8; MAX_PSDU_LEN + 1];

        assert_eq!(frame.set_payload(&big), Err(FrameError::PayloadTooLong));
        assert_eq!(frame.payload(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn max_length_payload() {
        let mut frame = data_frame();
        let max = frame.max_payload_len();
        assert_eq!(frame.header_len() + max + FCS_LEN, MAX_PSDU_LEN);

        let body = [0x5au8; MAX_PSDU_LEN];
        frame.set_payload(&body[..max]).unwrap();
        assert_eq!(frame.set_payload(&body[..max + 1]), Err(FrameError::PayloadTooLong));

        let mut buff = [0u8; MAX_PSDU_LEN];
        let n = frame.encode(&mut buff).unwrap();
        assert_eq!(n, MAX_PSDU_LEN - FCS_LEN);

        let data = Frame::data(
            Address::Short(PanId(1), ShortAddress(2)),
            Address::Short(PanId(1), ShortAddress(3)),
            0,
            &body,
            true,
        );
        assert_eq!(data, Err(FrameError::PayloadTooLong));
    }

    #[test]
    fn encode_undersized_buffer() {
        let frame = data_frame();

        let mut buff = [0u8; 8];
        assert_eq!(frame.encode(&mut buff), Err(FrameError::BufferTooSmall));

        let mut exact = [0u8; MAX_PSDU_LEN];
        let n = frame.encoded_len();
        assert_eq!(frame.encode(&mut exact[..n]), Ok(n));
    }

    #[test]
    fn decode_oversized_psdu() {
        let frame = data_frame();

        let mut buff = [0u8; MAX_PSDU_LEN + FCS_LEN];
        let n = frame.encode(&mut buff).unwrap();

        // Header plus payload filling the whole PSDU leaves no room for the FCS
        let len = MAX_PSDU_LEN;
        assert!(n < len);
        assert_eq!(Frame::decode(&buff[..len], false), Err(FrameError::PayloadTooLong));
        assert!(Frame::decode(&buff[..len], true).is_ok());
    }

    #[test]
    fn ack_matches_request() {
        let frame = data_frame();
        let ack = Frame::ack(&frame);

        assert_eq!(ack.header.frame_type, FrameType::Acknowledgement);
        assert_eq!(ack.header.seq, frame.header.seq);
        assert_eq!(ack.header.destination, frame.header.source);
        assert!(!ack.security_enabled());
    }

    #[test]
    fn frame_mut_in_place() {
        let mut frame = data_frame();
        frame.header.security = Security::Enabled;

        let mut view = FrameMut::new(&mut frame);
        assert!(view.security_enabled());
        assert_eq!(view.payload(), &[0, 1, 2, 3, 4, 5]);
        assert!(view.tx_flags().is_empty());

        view.payload_mut()[0] = 0xff;
        view.header_mut().frame_pending = true;
        view.insert_tx_flags(TxFlags::SECURITY_PROCESSED);

        assert_eq!(frame.payload().len(), 6);
        assert_eq!(frame.payload()[0], 0xff);
        assert!(frame.header.frame_pending);
        assert!(frame.tx_flags.contains(TxFlags::SECURITY_PROCESSED));
    }
}
