use serde_json::Value;

use crate::codec::{escape_tags, restore_tags};

const DATA_PREFIX: &str = "data: ";
const DONE_LINE: &str = "data: [DONE]";

/// Longest partial line held while waiting for its newline.
pub const MAX_LINE_BYTES: usize = 1 << 20;

/// What a single event-stream line contributes to the response text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedLine {
    /// Blank, end marker, foreign line, or a payload without text.
    Skip,
    Fragment(String),
    /// Payload that failed to decode; carries the reason for logging.
    Malformed(String),
}

/// Decodes one line (without its terminating newline).
pub fn decode_line(line: &str) -> DecodedLine {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.trim().is_empty() || line == DONE_LINE {
        return DecodedLine::Skip;
    }
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return DecodedLine::Skip;
    };

    let data: Value = match serde_json::from_str(&escape_tags(payload)) {
        Ok(data) => data,
        Err(e) => return DecodedLine::Malformed(e.to_string()),
    };

    match data.get("response") {
        None | Some(Value::Null) => DecodedLine::Skip,
        Some(Value::String(text)) if text.is_empty() => DecodedLine::Skip,
        Some(Value::String(text)) => DecodedLine::Fragment(restore_tags(text)),
        Some(other) => DecodedLine::Malformed(format!("`response` is not a string: {other}")),
    }
}

/// Reassembles event-stream lines from arbitrarily split byte chunks.
///
/// Bytes are held until a newline arrives, so a JSON object or a multi-byte
/// character split across two reads is decoded once, whole. A line that
/// outgrows [`MAX_LINE_BYTES`] is dropped up to its newline.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    pending: Vec<u8>,
    /// Prefix of `pending` already known to hold no newline.
    scanned: usize,
    discarding: bool,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk and returns the text fragments of every line it
    /// completed, in order.
    pub fn push(&mut self, mut chunk: &[u8]) -> Vec<String> {
        let mut fragments = Vec::new();

        if self.discarding {
            match chunk.iter().position(|b| *b == b'\n') {
                Some(end) => {
                    self.discarding = false;
                    chunk = &chunk[end + 1..];
                }
                None => return fragments,
            }
        }

        self.pending.extend_from_slice(chunk);
        while let Some(offset) = self.pending[self.scanned..].iter().position(|b| *b == b'\n') {
            let end = self.scanned + offset;
            let line: Vec<u8> = self.pending.drain(..=end).collect();
            self.scanned = 0;
            accept(&line[..end], &mut fragments);
        }
        self.scanned = self.pending.len();

        if self.pending.len() > MAX_LINE_BYTES {
            log::warn!(
                "Dropping stream line longer than {MAX_LINE_BYTES} bytes ({} buffered)",
                self.pending.len()
            );
            self.pending.clear();
            self.scanned = 0;
            self.discarding = true;
        }
        fragments
    }

    /// Decodes whatever is left once the stream has ended.
    pub fn finish(&mut self) -> Vec<String> {
        let rest = std::mem::take(&mut self.pending);
        self.scanned = 0;
        let mut fragments = Vec::new();
        if !std::mem::take(&mut self.discarding) {
            accept(&rest, &mut fragments);
        }
        fragments
    }
}

fn accept(line: &[u8], fragments: &mut Vec<String>) {
    match decode_line(&String::from_utf8_lossy(line)) {
        DecodedLine::Skip => {}
        DecodedLine::Fragment(text) => fragments.push(text),
        DecodedLine::Malformed(reason) => {
            log::warn!("Skipping malformed stream line: {reason}");
        }
    }
}
