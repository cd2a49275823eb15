use bytes::{Buf, BufMut, BytesMut};
use std::io::{Error, ErrorKind};
use switch_protocol::{Frame, HEADER};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{trace, warn};

#[derive(Default)]
pub struct SwitchCodec {
    needed_bytes: usize,
}

/// Drops everything before the next frame header. Returns false if no header is buffered yet.
fn skip_to_header(src: &mut BytesMut) -> bool {
    match src.windows(HEADER.len()).position(|w| w == HEADER) {
        Some(0) => true,
        Some(offset) => {
            warn!("Skipping {} bytes before frame header", offset);
            src.advance(offset);
            true
        }
        None => {
            // a trailing first header byte may be completed by the next read
            let keep = usize::from(src.last() == Some(&HEADER[0]));
            let skipped = src.len() - keep;
            if skipped > 0 {
                warn!("Skipping {} bytes without a frame header", skipped);
                src.advance(skipped);
            }
            false
        }
    }
}

impl Decoder for SwitchCodec {
    type Item = Frame;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < self.needed_bytes {
            return Ok(None);
        }

        if !skip_to_header(src) {
            self.needed_bytes = 0;
            return Ok(None);
        }

        match Frame::try_parse(src.chunk()) {
            Ok((bytes_read, frame)) => {
                trace!("Decoded frame {:?}", frame);

                src.advance(bytes_read);
                self.needed_bytes = 0;
                Ok(Some(frame))
            }
            Err(err) => match err.bytes_needed() {
                Some(needed) => {
                    self.needed_bytes = needed;
                    Ok(None)
                }
                None => {
                    // the length byte may be the corrupted one, resync on the next header
                    src.advance(HEADER.len());
                    self.needed_bytes = 0;
                    Err(Error::new(ErrorKind::InvalidData, err))
                }
            },
        }
    }
}

impl Encoder<Frame> for SwitchCodec {
    type Error = Error;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        trace!("Encoding frame {:?}", item);

        dst.reserve(item.encoded_len());
        for byte in item.iter_bytes() {
            dst.put_u8(byte);
        }

        Ok(())
    }
}

impl Encoder<&str> for SwitchCodec {
    type Error = Error;

    fn encode(&mut self, item: &str, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let frame = Frame::new(item).map_err(|err| Error::new(ErrorKind::InvalidInput, err))?;
        self.encode(frame, dst)
    }
}
