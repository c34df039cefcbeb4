//! API Module
//!
//! Wire-level request/response types and streaming support.

pub mod request;
pub mod response;
pub mod streaming;

pub use request::{
    ContentPart, FunctionDefinition, ImageUrl, Message, MessageContent, Request, ResponseFormat,
    Stop, Tool, ToolChoice, ToolChoiceFunction,
};
pub use response::{
    ApiError, Choice, Delta, FunctionCall, Response, ResponseMessage, ToolCall, Usage,
};
pub use streaming::{parse_event_line, strip_data_prefix, DeltaAccumulator, LineBuffer};
