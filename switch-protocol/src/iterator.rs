use crate::{Frame, HEADER};

/// Yields the wire bytes of a frame one at a time.
pub struct FrameIterator<'a> {
    frame: &'a Frame,
    index: usize,
}

impl<'a> FrameIterator<'a> {
    pub(crate) fn new(frame: &'a Frame) -> Self {
        Self { frame, index: 0 }
    }
}

impl Iterator for FrameIterator<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let payload = self.frame.payload_bytes();
        let b = match self.index {
            0 => HEADER[0],
            1 => HEADER[1],
            2 => self.frame.length(),
            i if i < 3 + payload.len() => payload[i - 3],
            i if i == 3 + payload.len() => self.frame.checksum(),
            _ => return None,
        };
        self.index += 1;
        Some(b)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frame.encoded_len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameIterator<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterator() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(Frame::new("")?.to_bytes(), b"\xAA\x55\x00\x00");
        assert_eq!(
            Frame::new("RELAY_ON")?.to_bytes(),
            b"\xAA\x55\x08\x52\x45\x4C\x41\x59\x5F\x4F\x4E\x79",
        );
        assert_eq!(
            Frame::new("SET_TIME=03,07,00")?.to_bytes(),
            b"\xAA\x55\x11SET_TIME=03,07,00\x39",
        );
        Ok(())
    }

    #[test]
    fn test_iterator_len() -> Result<(), Box<dyn std::error::Error>> {
        let frame = Frame::new("GET_TIME")?;
        let mut iter = frame.iter_bytes();
        assert_eq!(iter.len(), 12);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 10);
        assert_eq!(iter.count(), 10);
        Ok(())
    }
}
