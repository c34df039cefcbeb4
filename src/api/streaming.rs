//! Streaming Support
//!
//! Line framing for the server-sent-events response body and accumulation
//! of streamed deltas into a final message.
//!
//! The wire format is a sequence of text lines, each either blank, a
//! `data: `-prefixed JSON event, or the `data: [DONE]` sentinel, terminated
//! by stream closure.

use crate::api::response::{Response, ResponseMessage, ToolCall, Usage};
use crate::error::{Error, Result};
use bytes::{Bytes, BytesMut};

/// Sentinel payload marking the logical end of the event sequence
pub const DONE_SENTINEL: &str = "[DONE]";

/// SSE event prefix, including the trailing space
pub const DATA_PREFIX: &str = "data: ";

/// Upper bound on distinct tool calls folded from one stream. Fragments
/// whose `index` is at or beyond this bound are ignored rather than letting
/// a server-supplied index size the allocation.
const MAX_TOOL_CALLS: usize = 128;

/// Strip a leading `data: ` prefix from a line.
///
/// The check is positional on the first six bytes; a line of six or fewer
/// bytes is never treated as prefixed and passes through unchanged.
pub fn strip_data_prefix(line: &str) -> &str {
    if line.len() > DATA_PREFIX.len() && line.as_bytes().starts_with(DATA_PREFIX.as_bytes()) {
        &line[DATA_PREFIX.len()..]
    } else {
        line
    }
}

/// Decode one line of the stream into an event.
///
/// Returns `Ok(None)` for blank lines and the `[DONE]` sentinel; any other
/// line must be a JSON-encoded [`Response`] or the whole call fails.
pub fn parse_event_line(line: &str) -> Result<Option<Response>> {
    if line.is_empty() {
        return Ok(None);
    }

    let payload = strip_data_prefix(line);

    if payload == DONE_SENTINEL {
        return Ok(None);
    }

    match serde_json::from_str(payload) {
        Ok(response) => Ok(Some(response)),
        Err(e) => Err(Error::deserialize(e, payload)),
    }
}

/// Reassembles text lines from arbitrary byte chunks.
///
/// Splits on `\n`, strips one trailing `\r`, and holds partial lines across
/// chunk boundaries. A final unterminated line is surfaced by [`Self::flush`]
/// when the stream ends.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: BytesMut,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and drain the complete lines it finished.
    pub fn push(&mut self, chunk: &Bytes) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line = self.pending.split_to(pos + 1);
            line.truncate(pos);
            if line.last() == Some(&b'\r') {
                line.truncate(line.len() - 1);
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Take the trailing unterminated line, if any, at end of stream.
    pub fn flush(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            let line = String::from_utf8_lossy(&self.pending).into_owned();
            self.pending.clear();
            Some(line)
        }
    }
}

/// Folds streamed chunks into a final message.
///
/// Content fragments are concatenated in arrival order; tool-call fragments
/// are merged by their `index` field.
#[derive(Debug, Default)]
pub struct DeltaAccumulator {
    content: String,
    tool_calls: Vec<ToolCall>,
    role: Option<String>,
    finish_reason: Option<String>,
    id: Option<String>,
    model: Option<String>,
    created: Option<u64>,
    usage: Option<Usage>,
}

impl DeltaAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one streamed chunk into the accumulated state.
    pub fn push(&mut self, chunk: &Response) {
        if self.id.is_none() && !chunk.id.is_empty() {
            self.id = Some(chunk.id.clone());
            self.model = Some(chunk.model.clone());
            self.created = Some(chunk.created);
        }

        if chunk.usage.is_some() {
            self.usage = chunk.usage.clone();
        }

        for choice in &chunk.choices {
            let Some(delta) = &choice.delta else {
                continue;
            };

            if self.role.is_none() {
                if let Some(role) = &delta.role {
                    self.role = Some(role.clone());
                }
            }

            if let Some(content) = &delta.content {
                self.content.push_str(content);
            }

            if let Some(fragments) = &delta.tool_calls {
                for fragment in fragments {
                    self.merge_tool_call(fragment);
                }
            }

            if let Some(reason) = &choice.finish_reason {
                self.finish_reason = Some(reason.clone());
            }
        }
    }

    fn merge_tool_call(&mut self, fragment: &ToolCall) {
        let idx = fragment.index.unwrap_or(0) as usize;
        if idx >= MAX_TOOL_CALLS {
            return;
        }
        while self.tool_calls.len() <= idx {
            self.tool_calls.push(ToolCall::default());
        }

        let call = &mut self.tool_calls[idx];
        if fragment.id.is_some() {
            call.id = fragment.id.clone();
        }
        if fragment.call_type.is_some() {
            call.call_type = fragment.call_type.clone();
        }
        if let Some(name) = &fragment.function.name {
            match &mut call.function.name {
                Some(existing) => existing.push_str(name),
                None => call.function.name = Some(name.clone()),
            }
        }
        call.function.arguments.push_str(&fragment.function.arguments);
    }

    /// Finish reason from the last chunk that carried one
    pub fn finish_reason(&self) -> Option<&str> {
        self.finish_reason.as_deref()
    }

    /// Usage from the final chunk, when the provider attaches it
    pub fn usage(&self) -> Option<&Usage> {
        self.usage.as_ref()
    }

    /// Consume the accumulator and produce the assembled message
    pub fn into_message(self) -> ResponseMessage {
        let tool_calls = if self.tool_calls.is_empty() {
            None
        } else {
            Some(self.tool_calls)
        };

        ResponseMessage {
            role: self.role.unwrap_or_else(|| "assistant".to_string()),
            content: Some(self.content),
            tool_calls,
        }
    }
}
