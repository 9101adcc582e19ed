//! Tool infrastructure — schema validation, argument building, quoting,
//! response envelopes, registry and dispatch.
//!
//! No tool is ever executed. A call is validated against the tool's schema,
//! turned into an ordered token list, quoted, and handed back as a command
//! line the caller can run on their own machine.

pub mod args;
mod builtin;
pub mod catalog;
pub mod dispatch;
pub mod quote;
pub mod response;
pub mod schema;
pub mod tags;

pub use args::ArgList;
pub use catalog::{CommandSpec, SynthesizedCommand, ToolAction, ToolCatalog, ToolEntry};
pub use dispatch::Dispatcher;
pub use quote::{quote, synthesize};
pub use response::{ContentBlock, ToolResponse};
pub use schema::{ParamDef, ParamType, ParamValue, Schema, ValidatedParams};
pub use tags::{HttpTagSource, TagSource};
