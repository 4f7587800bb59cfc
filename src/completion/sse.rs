//! Incremental Server-Sent Events decoder for streamed completion bodies.

use crate::completion::BoxStream;
use crate::error::UpstreamError;
use bytes::Bytes;
use futures::{stream, Stream, StreamExt};
use serde_json::Value;

const DONE_SIGNAL: &str = "[DONE]";

/// Payload of one SSE frame: the joined `data:` lines, or `None` for frames
/// that carry no data (comments, `event:`-only frames, keep-alives).
fn frame_data(frame: &str) -> Option<String> {
    let lines: Vec<&str> = frame
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| data.strip_prefix(' ').unwrap_or(data))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

enum Frame {
    Json(Value),
    Done,
    Skip,
    Invalid(String),
}

fn parse_frame(frame: &str) -> Frame {
    let Some(data) = frame_data(frame) else {
        return Frame::Skip;
    };
    let data = data.trim();
    if data.is_empty() {
        return Frame::Skip;
    }
    if data == DONE_SIGNAL {
        return Frame::Done;
    }
    match serde_json::from_str(data) {
        Ok(value) => Frame::Json(value),
        Err(e) => Frame::Invalid(format!("{}: {}", e, data)),
    }
}

/// Decode a byte stream into the JSON payloads of its SSE frames.
///
/// Frames are split on blank lines; bytes may arrive cut at any point,
/// including inside a multi-byte character. The stream ends at `[DONE]` or
/// at end of input, and a frame that is not valid JSON ends it with
/// [`UpstreamError::Protocol`].
pub fn decode<S>(input: S) -> BoxStream<'static, Result<Value, UpstreamError>>
where
    S: Stream<Item = Result<Bytes, UpstreamError>> + Send + 'static,
{
    let input: BoxStream<'static, Result<Bytes, UpstreamError>> = Box::pin(input);

    let stream = stream::unfold(
        (Some(input), Vec::<u8>::new()),
        |(mut input, mut buf)| async move {
            loop {
                let Some(source) = input.as_mut() else {
                    return None;
                };

                if let Some((end, skip)) = find_frame_end(&buf) {
                    let frame = String::from_utf8_lossy(&buf[..end]).into_owned();
                    buf.drain(..end + skip);

                    match parse_frame(&frame) {
                        Frame::Json(value) => return Some((Ok(value), (input, buf))),
                        Frame::Done => return None,
                        Frame::Skip => continue,
                        Frame::Invalid(msg) => {
                            return Some((Err(UpstreamError::Protocol(msg)), (None, buf)))
                        }
                    }
                }

                match source.next().await {
                    Some(Ok(bytes)) => buf.extend_from_slice(&bytes),
                    Some(Err(e)) => return Some((Err(e), (None, buf))),
                    None => {
                        // EOF: a trailing frame without its blank line still counts.
                        let rest = String::from_utf8_lossy(&buf).into_owned();
                        return match parse_frame(&rest) {
                            Frame::Json(value) => Some((Ok(value), (None, Vec::new()))),
                            Frame::Invalid(msg) => {
                                Some((Err(UpstreamError::Protocol(msg)), (None, Vec::new())))
                            }
                            Frame::Done | Frame::Skip => None,
                        };
                    }
                }
            }
        },
    );

    Box::pin(stream)
}

/// Position of the first blank-line delimiter and its length, accepting
/// both `\n\n` and `\r\n\r\n`.
fn find_frame_end(buf: &[u8]) -> Option<(usize, usize)> {
    let lf = buf.windows(2).position(|w| w == b"\n\n").map(|i| (i, 2));
    let crlf = buf.windows(4).position(|w| w == b"\r\n\r\n").map(|i| (i, 4));
    match (lf, crlf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chunks(parts: &[&[u8]]) -> impl Stream<Item = Result<Bytes, UpstreamError>> + Send + 'static {
        let owned: Vec<Result<Bytes, UpstreamError>> =
            parts.iter().map(|p| Ok(Bytes::copy_from_slice(p))).collect();
        stream::iter(owned)
    }

    async fn collect(parts: &[&[u8]]) -> Vec<Result<Value, UpstreamError>> {
        decode(chunks(parts)).collect().await
    }

    #[tokio::test]
    async fn test_frames_split_across_chunks() {
        let out = collect(&[
            "data: {\"a\":".as_bytes(),
            "1}\n".as_bytes(),
            "\ndata: {\"a\":2}\n\n".as_bytes(),
            "data: [DONE]\n\n".as_bytes(),
        ]).await;
        let values: Vec<Value> = out.into_iter().map(Result::unwrap).collect();
        assert_eq!(values, vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[tokio::test]
    async fn test_multibyte_character_cut_between_chunks() {
        let body = "data: {\"t\":\"café\"}\n\n".as_bytes();
        let cut = body.iter().position(|b| *b == 0xC3).unwrap() + 1;
        let out = collect(&[&body[..cut], &body[cut..]]).await;
        assert_eq!(out, vec![Ok(json!({"t": "café"}))]);
    }

    #[tokio::test]
    async fn test_comments_and_crlf_are_tolerated() {
        let out = collect(&[": keep-alive\r\n\r\nevent: message\r\ndata: {\"ok\":true}\r\n\r\n".as_bytes()]).await;
        assert_eq!(out, vec![Ok(json!({"ok": true}))]);
    }

    #[tokio::test]
    async fn test_done_stops_the_stream() {
        let out = collect(&["data: [DONE]\n\ndata: {\"late\":1}\n\n".as_bytes()]).await;
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_protocol_error() {
        let out = collect(&["data: {not json}\n\ndata: {\"a\":1}\n\n".as_bytes()]).await;
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Err(UpstreamError::Protocol(_))));
    }

    #[tokio::test]
    async fn test_trailing_frame_without_delimiter() {
        let out = collect(&["data: {\"a\":1}".as_bytes()]).await;
        assert_eq!(out, vec![Ok(json!({"a": 1}))]);
    }
}
