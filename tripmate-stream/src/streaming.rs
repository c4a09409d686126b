//! Async drivers that run a [`DeltaReader`] over a transport body.
//!
//! Both drivers are transport-agnostic: any `Stream` of byte chunks works,
//! e.g. `reqwest::Response::bytes_stream()`. The transport's error type is
//! passed through untouched.

use futures::{Stream, StreamExt};

use crate::reader::DeltaReader;

/// Why the read loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// `data: [DONE]` was received. Remaining input was not read.
    Sentinel,
    /// The transport ended; the residual buffer was flushed.
    EndOfStream,
}

/// Read `body` to completion, calling `on_delta` for every text fragment.
///
/// Returns how the stream ended, or the first transport error. Fragments
/// delivered before an error stand.
pub async fn read_deltas<S, B, E, F>(body: S, mut on_delta: F) -> Result<Termination, E>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    F: FnMut(&str),
{
    let mut body = std::pin::pin!(body);
    let mut reader = DeltaReader::new();
    let mut chunks = 0usize;

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        chunks += 1;
        if reader.push(chunk.as_ref(), &mut on_delta).is_finished() {
            tracing::debug!(chunks, "stream finished at sentinel");
            return Ok(Termination::Sentinel);
        }
    }

    tracing::debug!(chunks, residual = reader.buffered().len(), "transport closed, flushing");
    reader.flush(&mut on_delta);
    Ok(Termination::EndOfStream)
}

/// Adapt `body` into a stream of text fragments.
///
/// The stream ends after the sentinel, at transport end (after the residual
/// flush), or right after yielding the first transport error.
pub fn delta_stream<S, B, E>(body: S) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    async_stream::stream! {
        let mut body = std::pin::pin!(body);
        let mut reader = DeltaReader::new();
        let mut ready: Vec<String> = Vec::new();

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(c) => c,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            let progress = reader.push(chunk.as_ref(), &mut |t: &str| ready.push(t.to_owned()));
            for delta in ready.drain(..) {
                yield Ok(delta);
            }
            if progress.is_finished() {
                return;
            }
        }

        reader.flush(&mut |t: &str| ready.push(t.to_owned()));
        for delta in ready.drain(..) {
            yield Ok(delta);
        }
    }
}
