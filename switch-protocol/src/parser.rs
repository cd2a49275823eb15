use nom::{
    bytes::streaming::tag, multi::length_data, number::streaming::be_u8, IResult, Parser,
};

use crate::error::DecodeError;
use crate::utils::checksum;
use crate::{Frame, HEADER, MIN_FRAME_LEN};

fn frame_header(i: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(&HEADER[..]).parse(i)
}

fn length_prefixed_payload(i: &[u8]) -> IResult<&[u8], &[u8]> {
    length_data(be_u8).parse(i)
}

fn checksum_byte(i: &[u8]) -> IResult<&[u8], u8> {
    be_u8(i)
}

/// Parses the frame at the start of `i`, returning the unconsumed tail.
pub(crate) fn parse_frame(i: &[u8]) -> Result<(&[u8], Frame), DecodeError> {
    if i.len() < MIN_FRAME_LEN {
        return Err(DecodeError::BufferTooShort { len: i.len() });
    }

    let (body, _) = frame_header(i).map_err(|_| DecodeError::BadHeader {
        found: [i[0], i[1]],
    })?;

    // length_data and be_u8 only fail with Incomplete
    let (rest, (payload, found)) = (length_prefixed_payload, checksum_byte)
        .parse(body)
        .map_err(|_| DecodeError::LengthMismatch {
            declared: i[2] as usize,
            available: i.len() - MIN_FRAME_LEN,
        })?;

    let expected = checksum(payload);
    if expected != found {
        return Err(DecodeError::ChecksumMismatch { expected, found });
    }

    let payload = std::str::from_utf8(payload)?;

    Ok((rest, Frame::from_valid_payload(payload.to_owned())))
}
