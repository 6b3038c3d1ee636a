//! Tool framework for finagent
//!
//! Tools are named async functions offered to a language model. The model
//! answers with tool calls whose arguments arrive as serialized text; each
//! tool binds that text to a typed parameter struct through
//! [`parse_arguments`] before doing any work.

pub mod error;
pub mod registry;
pub mod tool;

pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use tool::{Tool, parse_arguments};
