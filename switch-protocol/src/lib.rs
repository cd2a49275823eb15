//! Frames exchanged with the switch controller over its serial link.
//!
//! ```text
//! AA 55 <len> <payload: len bytes of UTF-8> <checksum>
//! ```
//!
//! The checksum is the sum of the payload bytes modulo 256.

pub const HEADER: [u8; 2] = [0xAA, 0x55];
pub const MIN_FRAME_LEN: usize = HEADER.len() + 2;
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    payload: String,
    checksum: u8,
}

impl Frame {
    pub fn new(command: impl Into<String>) -> Result<Self, EncodeError> {
        let payload = command.into();
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(EncodeError::PayloadTooLarge { len: payload.len() });
        }
        Ok(Self::from_valid_payload(payload))
    }

    pub(crate) fn from_valid_payload(payload: String) -> Self {
        debug_assert!(payload.len() <= MAX_PAYLOAD_LEN);
        let checksum = utils::checksum(payload.as_bytes());
        Self { payload, checksum }
    }

    /// Decodes the frame at the start of `bytes`; anything after its checksum byte is ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let (_, frame) = parser::parse_frame(bytes)?;
        Ok(frame)
    }

    /// Like [`Frame::from_bytes`], but also reports how many bytes the frame occupied.
    pub fn try_parse(bytes: &[u8]) -> Result<(usize, Self), DecodeError> {
        let (rest, frame) = parser::parse_frame(bytes)?;
        Ok((bytes.len() - rest.len(), frame))
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn payload_bytes(&self) -> &[u8] {
        self.payload.as_bytes()
    }

    pub fn length(&self) -> u8 {
        self.payload.len() as u8
    }

    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Size of the frame on the wire.
    pub fn encoded_len(&self) -> usize {
        MIN_FRAME_LEN + self.payload.len()
    }

    pub fn iter_bytes(&self) -> iterator::FrameIterator<'_> {
        iterator::FrameIterator::new(self)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.iter_bytes().collect::<Vec<u8>>()
    }

    pub fn into_payload(self) -> String {
        self.payload
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = DecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Frame::from_bytes(bytes)
    }
}

impl TryFrom<&str> for Frame {
    type Error = EncodeError;

    fn try_from(command: &str) -> Result<Self, Self::Error> {
        Frame::new(command)
    }
}

pub fn encode_frame(command: &str) -> Result<Vec<u8>, EncodeError> {
    Ok(Frame::new(command)?.to_bytes())
}

pub fn decode_frame(bytes: &[u8]) -> Result<String, DecodeError> {
    Ok(Frame::from_bytes(bytes)?.into_payload())
}

pub use error::{DecodeError, EncodeError, HexError};
pub use format::{format_escaped, format_hex, format_mapping, format_payload_hex, parse_hex};
pub use table::CommandTable;
pub use utils::checksum;

mod error;
mod format;
mod iterator;
mod parser;
mod table;
mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_frame() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(encode_frame("")?, [0xAA, 0x55, 0x00, 0x00]);

        let bytes = encode_frame("RELAY_ON")?;
        assert_eq!(bytes[..3], [0xAA, 0x55, 0x08]);
        assert_eq!(&bytes[3..11], "RELAY_ON".as_bytes());
        assert_eq!(bytes[11], checksum(b"RELAY_ON"));
        assert_eq!(bytes[11], 0x79);

        // multi-byte characters count as bytes, not chars
        assert_eq!(encode_frame("é")?, [0xAA, 0x55, 0x02, 0xC3, 0xA9, 0x6C]);

        Ok(())
    }

    #[test]
    fn test_payload_too_large() {
        assert!(encode_frame(&"A".repeat(MAX_PAYLOAD_LEN)).is_ok());
        assert_eq!(
            encode_frame(&"A".repeat(256)),
            Err(EncodeError::PayloadTooLarge { len: 256 })
        );
        // 128 two-byte characters
        assert_eq!(
            Frame::new("é".repeat(128)),
            Err(EncodeError::PayloadTooLarge { len: 256 })
        );
    }

    #[test]
    fn test_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let commands = [
            String::new(),
            "RELAY_ON".to_owned(),
            "ENABLE_ALARM=0,DISABLE".to_owned(),
            "开灯".to_owned(),
            "Z".repeat(MAX_PAYLOAD_LEN),
        ];
        for command in commands {
            assert_eq!(decode_frame(&encode_frame(&command)?)?, command);
        }
        Ok(())
    }

    #[test]
    fn test_try_parse_reports_consumed() -> Result<(), Box<dyn std::error::Error>> {
        let mut bytes = encode_frame("GET_TIME")?;
        bytes.extend_from_slice(b"\xAA\x55\x03GE");

        let (consumed, frame) = Frame::try_parse(&bytes)?;
        assert_eq!(consumed, 12);
        assert_eq!(consumed, frame.encoded_len());
        assert_eq!(frame.payload(), "GET_TIME");
        assert_eq!(frame.length(), 8);
        assert_eq!(frame.checksum(), 0x6E);

        assert_eq!(
            Frame::try_parse(&bytes[consumed..]).map_err(|err| err.bytes_needed()),
            Err(Some(7))
        );
        Ok(())
    }

    #[test]
    fn test_bytes_needed() {
        assert_eq!(
            DecodeError::BufferTooShort { len: 1 }.bytes_needed(),
            Some(MIN_FRAME_LEN)
        );
        assert_eq!(
            DecodeError::LengthMismatch {
                declared: 10,
                available: 2
            }
            .bytes_needed(),
            Some(14)
        );
        assert_eq!(
            DecodeError::ChecksumMismatch {
                expected: 1,
                found: 2
            }
            .bytes_needed(),
            None
        );
    }
}
