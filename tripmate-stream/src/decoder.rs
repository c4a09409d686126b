//! Stateful UTF-8 decoding across chunk boundaries.
//!
//! A multi-byte character can be split between two network reads. Decoding
//! each chunk on its own would corrupt it, so the decoder keeps the incomplete
//! trailing sequence and prepends it to the next chunk.

/// Incremental UTF-8 decoder.
///
/// Invalid sequences are replaced with U+FFFD. Incomplete trailing sequences
/// are held back until the next call to [`decode`](Self::decode) or
/// [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Bytes of a sequence cut off at the end of the previous chunk (at most 3).
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Create a decoder with no carried-over bytes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `chunk`, carrying any incomplete trailing sequence forward.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        if self.pending.is_empty() {
            return self.decode_from(chunk);
        }
        let mut joined = std::mem::take(&mut self.pending);
        joined.extend_from_slice(chunk);
        self.decode_from(&joined)
    }

    /// Flush the decoder at end of input.
    ///
    /// A sequence still incomplete at this point can never be completed and
    /// decodes to a single U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }

    /// Number of bytes held back from the previous chunk.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn decode_from(&mut self, mut bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len());
        loop {
            match std::str::from_utf8(bytes) {
                Ok(valid) => {
                    out.push_str(valid);
                    return out;
                }
                Err(err) => {
                    let (valid, rest) = bytes.split_at(err.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            bytes = &rest[len..];
                        }
                        None => {
                            self.pending.extend_from_slice(rest);
                            return out;
                        }
                    }
                }
            }
        }
    }
}
