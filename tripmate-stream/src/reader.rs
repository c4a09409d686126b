//! The incremental line reader.

use crate::decoder::Utf8Decoder;
use crate::line::{Line, classify, decode_delta};

/// Whether the reader wants more input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Keep feeding chunks.
    Continue,
    /// `[DONE]` was seen; further input is ignored.
    Finished,
}

impl Progress {
    /// Whether the sentinel has been seen.
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

/// Synchronous core of the stream reader.
///
/// Feed transport chunks with [`push`](Self::push) until it reports
/// [`Progress::Finished`] or the transport ends, then call
/// [`flush`](Self::flush) in the latter case.
///
/// ```
/// use tripmate_stream::{DeltaReader, Progress};
///
/// let mut reader = DeltaReader::new();
/// let mut out = Vec::new();
/// let progress = reader.push(
///     b"data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\ndata: [DONE]\n",
///     &mut |t: &str| out.push(t.to_owned()),
/// );
/// assert_eq!(progress, Progress::Finished);
/// assert_eq!(out, ["Hi"]);
/// ```
#[derive(Debug, Default)]
pub struct DeltaReader {
    decoder: Utf8Decoder,
    /// Decoded text not yet consumed as a complete line.
    buffer: String,
    finished: bool,
}

impl DeltaReader {
    /// Create a reader with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `chunk`, append it to the buffer and emit the delta of every
    /// complete data line.
    ///
    /// A data line whose JSON fails to decode is put back at the front of the
    /// buffer, newline included, and extraction stops until the next chunk.
    pub fn push<F>(&mut self, chunk: &[u8], on_delta: &mut F) -> Progress
    where
        F: FnMut(&str) + ?Sized,
    {
        if self.finished {
            return Progress::Finished;
        }
        let text = self.decoder.decode(chunk);
        self.buffer.push_str(&text);

        while let Some(newline) = self.buffer.find('\n') {
            let rest = self.buffer.split_off(newline + 1);
            let raw = std::mem::replace(&mut self.buffer, rest);
            let line = strip_cr(&raw[..newline]);

            match classify(line) {
                Line::Blank | Line::Comment | Line::Ignored => {}
                Line::Sentinel => {
                    tracing::trace!(buffered = self.buffer.len(), "stream sentinel received");
                    self.finished = true;
                    return Progress::Finished;
                }
                Line::Data(payload) => match decode_delta(payload) {
                    Ok(Some(delta)) => on_delta(&delta),
                    Ok(None) => {}
                    Err(err) => {
                        tracing::trace!(error = %err, "incomplete data line, waiting for more input");
                        self.buffer.insert_str(0, &raw);
                        break;
                    }
                },
            }
        }
        Progress::Continue
    }

    /// Process whatever is left once the transport has closed.
    ///
    /// The residue is split on newlines and every line is handled as in
    /// [`push`](Self::push), except that undecodable payloads are dropped
    /// since no more data can complete them. Does nothing after the sentinel.
    pub fn flush<F>(mut self, on_delta: &mut F)
    where
        F: FnMut(&str) + ?Sized,
    {
        if self.finished {
            return;
        }
        let tail = self.decoder.finish();
        self.buffer.push_str(&tail);
        if self.buffer.trim().is_empty() {
            return;
        }

        for raw in self.buffer.split('\n') {
            match classify(strip_cr(raw)) {
                Line::Blank | Line::Comment | Line::Ignored => {}
                Line::Sentinel => break,
                Line::Data(payload) => match decode_delta(payload) {
                    Ok(Some(delta)) => on_delta(&delta),
                    Ok(None) => {}
                    Err(err) => {
                        tracing::warn!(error = %err, "dropping undecodable data line at end of stream");
                    }
                },
            }
        }
    }

    /// Text buffered but not yet consumed as a complete line.
    #[must_use]
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Whether `[DONE]` has been seen.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(content: &str) -> String {
        format!("data: {{\"choices\":[{{\"delta\":{{\"content\":\"{content}\"}}}}]}}\n")
    }

    fn feed(reader: &mut DeltaReader, chunks: &[&[u8]]) -> (Vec<String>, Progress) {
        let mut out = Vec::new();
        let mut progress = Progress::Continue;
        for chunk in chunks {
            progress = reader.push(chunk, &mut |t: &str| out.push(t.to_owned()));
        }
        (out, progress)
    }

    #[test]
    fn hello_example() {
        let input = format!("{}{}data: [DONE]\n", data("Hel"), data("lo"));
        let mut reader = DeltaReader::new();
        let (out, progress) = feed(&mut reader, &[input.as_bytes()]);
        assert_eq!(out, ["Hel", "lo"]);
        assert_eq!(progress, Progress::Finished);
        assert!(reader.is_finished());
    }

    #[test]
    fn partial_line_stays_buffered() {
        let line = data("Hello");
        let (head, tail) = line.split_at(20);
        let mut reader = DeltaReader::new();

        let (out, _) = feed(&mut reader, &[head.as_bytes()]);
        assert!(out.is_empty());
        assert_eq!(reader.buffered(), head);

        let (out, _) = feed(&mut reader, &[tail.as_bytes()]);
        assert_eq!(out, ["Hello"]);
        assert_eq!(reader.buffered(), "");
    }

    #[test]
    fn sentinel_discards_following_lines() {
        let input = format!("{}data: [DONE]\n{}", data("a"), data("b"));
        let mut reader = DeltaReader::new();
        let (out, progress) = feed(&mut reader, &[input.as_bytes()]);
        assert_eq!(out, ["a"]);
        assert!(progress.is_finished());

        let (out, progress) = feed(&mut reader, &[data("c").as_bytes()]);
        assert!(out.is_empty());
        assert!(progress.is_finished());
    }

    #[test]
    fn crlf_lines_are_accepted() {
        let input = "data: {\"choices\":[{\"delta\":{\"content\":\"x\"}}]}\r\n\r\n";
        let mut reader = DeltaReader::new();
        let (out, _) = feed(&mut reader, &[input.as_bytes()]);
        assert_eq!(out, ["x"]);
    }

    #[test]
    fn comments_blank_and_other_fields_are_inert() {
        let input = format!(": keep-alive\n\n   \nevent: message\nid: 7\n{}", data("ok"));
        let mut reader = DeltaReader::new();
        let (out, progress) = feed(&mut reader, &[input.as_bytes()]);
        assert_eq!(out, ["ok"]);
        assert_eq!(progress, Progress::Continue);
        assert_eq!(reader.buffered(), "");
    }

    #[test]
    fn undecodable_line_is_restored_to_buffer() {
        let input = format!("data: {{\"choices\":\n{}", data("later"));
        let mut reader = DeltaReader::new();
        let (out, progress) = feed(&mut reader, &[input.as_bytes()]);
        assert!(out.is_empty());
        assert_eq!(progress, Progress::Continue);
        assert_eq!(reader.buffered(), input);
    }

    #[test]
    fn restored_line_keeps_its_carriage_return() {
        let input = "data: nope\r\n";
        let mut reader = DeltaReader::new();
        feed(&mut reader, &[input.as_bytes()]);
        assert_eq!(reader.buffered(), input);
    }

    #[test]
    fn flush_emits_trailing_line_without_newline() {
        let line = data("tail");
        let mut reader = DeltaReader::new();
        let (out, _) = feed(&mut reader, &[line.trim_end().as_bytes()]);
        assert!(out.is_empty());

        let mut flushed = Vec::new();
        reader.flush(&mut |t: &str| flushed.push(t.to_owned()));
        assert_eq!(flushed, ["tail"]);
    }

    #[test]
    fn flush_drops_bad_line_and_keeps_later_ones() {
        let input = format!("data: {{broken\n{}", data("after"));
        let mut reader = DeltaReader::new();
        let (out, _) = feed(&mut reader, &[input.as_bytes()]);
        assert!(out.is_empty());

        let mut flushed = Vec::new();
        reader.flush(&mut |t: &str| flushed.push(t.to_owned()));
        assert_eq!(flushed, ["after"]);
    }

    #[test]
    fn flush_stops_at_sentinel() {
        let input = format!("data: {{broken\ndata: [DONE]\n{}", data("never"));
        let mut reader = DeltaReader::new();
        feed(&mut reader, &[input.as_bytes()]);

        let mut flushed = Vec::new();
        reader.flush(&mut |t: &str| flushed.push(t.to_owned()));
        assert!(flushed.is_empty());
    }

    #[test]
    fn flush_after_sentinel_is_noop() {
        let input = format!("data: [DONE]\n{}", data("x").trim_end());
        let mut reader = DeltaReader::new();
        feed(&mut reader, &[input.as_bytes()]);

        let mut flushed = Vec::new();
        reader.flush(&mut |t: &str| flushed.push(t.to_owned()));
        assert!(flushed.is_empty());
    }

    #[test]
    fn multibyte_content_split_across_chunks() {
        let line = data("चाय ☕");
        let bytes = line.as_bytes();
        let cut = line.find('☕').unwrap() + 1;
        let mut reader = DeltaReader::new();
        let (out, _) = feed(&mut reader, &[&bytes[..cut], &bytes[cut..]]);
        assert_eq!(out, ["चाय ☕"]);
    }
}
