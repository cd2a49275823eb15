use std::str::Utf8Error;

use thiserror::Error;

use crate::{MAX_PAYLOAD_LEN, MIN_FRAME_LEN};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("payload is {len} bytes long, a frame carries at most {max}", max = MAX_PAYLOAD_LEN)]
    PayloadTooLarge { len: usize },
}

/// Reasons a byte buffer is not a valid frame, in the order they are checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("buffer holds {len} bytes, a frame is at least {min}", min = MIN_FRAME_LEN)]
    BufferTooShort { len: usize },

    #[error("frame starts with {found:02X?} instead of [AA, 55]")]
    BadHeader { found: [u8; 2] },

    #[error("length byte announces {declared} payload bytes but only {available} follow")]
    LengthMismatch { declared: usize, available: usize },

    #[error("checksum byte is 0x{found:02X}, payload sums to 0x{expected:02X}")]
    ChecksumMismatch { expected: u8, found: u8 },

    #[error("payload is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] Utf8Error),
}

impl DecodeError {
    /// Total buffer size required before the frame can be parsed, if the error only means
    /// that more bytes have yet to arrive.
    pub fn bytes_needed(&self) -> Option<usize> {
        match self {
            DecodeError::BufferTooShort { .. } => Some(MIN_FRAME_LEN),
            DecodeError::LengthMismatch { declared, .. } => Some(MIN_FRAME_LEN + declared),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("'{0}' is not a hex digit")]
    InvalidDigit(char),

    #[error("{0} hex digits cannot be split into whole bytes")]
    OddLength(usize),

    #[error("malformed \\x escape near '{0}', expected exactly two hex digits")]
    MalformedEscape(String),
}
