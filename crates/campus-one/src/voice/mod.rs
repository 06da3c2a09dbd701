//! # Voice Assistant Tool Boundary
//!
//! The audio side of the assistant (microphone capture, streaming, the
//! third-party live session) is an external service; what the core owns
//! is the small set of tool calls that service is allowed to make. Each
//! tool resolves names with a case-insensitive substring match, goes
//! through exactly the same validation as the equivalent direct action,
//! and answers with a single `{"result": ...}` or `{"error": ...}`
//! payload.

pub mod tools;

pub use tools::{AssistantSignal, ToolBroker, ToolReply};
