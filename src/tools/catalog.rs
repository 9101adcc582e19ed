//! Tool catalog — registrations, validation, and command synthesis.
//!
//! The catalog is built once at startup and never mutated afterwards; share
//! it behind an `Arc`. Each entry pairs a parameter schema with an action:
//! either a pure argument builder plus binary name, or the remote tag fetch.

use serde_json::{json, Value};
use std::collections::HashMap;

use crate::tools::builtin;
use crate::tools::quote::synthesize;
use crate::tools::schema::{ParamDef, Schema, ValidatedParams};
use crate::types::{Error, Result};

// =============================================================================
// Command specification
// =============================================================================

/// Pure argument builder: validated parameters → ordered tokens.
pub type BuildFn = fn(&ValidatedParams) -> Result<Vec<String>>;

/// How a command-synthesizing tool renders its invocation.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Executable as typed by the user; never quoted.
    pub binary: String,
    /// Display name used in the advisory text.
    pub title: String,
    pub build: BuildFn,
    pub notes: Vec<String>,
}

impl CommandSpec {
    /// Spec carrying the standard advisory notes for `binary`.
    pub fn new(binary: &str, title: &str, build: BuildFn) -> Self {
        Self {
            binary: binary.to_string(),
            title: title.to_string(),
            build,
            notes: standard_notes(binary),
        }
    }

    /// Replace the standard notes entirely.
    pub fn with_notes(mut self, notes: &[&str]) -> Self {
        self.notes = notes.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.notes.push(note.to_string());
        self
    }

    /// Build tokens and join them into the final command line.
    pub fn synthesize(&self, params: &ValidatedParams) -> Result<SynthesizedCommand> {
        let tokens = (self.build)(params)?;
        let command = synthesize(&self.binary, &tokens);
        Ok(SynthesizedCommand {
            binary: self.binary.clone(),
            tokens,
            command,
        })
    }
}

/// Notes attached to every synthesized command.
pub fn standard_notes(binary: &str) -> Vec<String> {
    vec![
        format!("Make sure `{}` is installed and available on your PATH.", binary),
        "Arguments are passed through as provided.".to_string(),
        "Review the output locally for findings.".to_string(),
    ]
}

/// A fully rendered invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedCommand {
    pub binary: String,
    pub tokens: Vec<String>,
    pub command: String,
}

// =============================================================================
// Tool entry
// =============================================================================

/// What a tool does once its parameters validate.
#[derive(Debug, Clone)]
pub enum ToolAction {
    /// Synthesize a command line.
    Command(CommandSpec),
    /// Fetch a remote tag list (the only tool doing real I/O).
    FetchTags,
}

/// Complete tool registration.
#[derive(Debug, Clone)]
pub struct ToolEntry {
    pub name: String,
    pub description: String,
    pub schema: Schema,
    pub action: ToolAction,
}

impl ToolEntry {
    pub fn command(name: &str, description: &str, params: Vec<ParamDef>, spec: CommandSpec) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            schema: Schema::new(params),
            action: ToolAction::Command(spec),
        }
    }

    pub fn fetch_tags(name: &str, description: &str, params: Vec<ParamDef>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            schema: Schema::new(params),
            action: ToolAction::FetchTags,
        }
    }

    pub fn validate(&self, args: &Value) -> Result<ValidatedParams> {
        self.schema.validate(&self.name, args)
    }

    /// MCP discovery descriptor: `{name, description, inputSchema}`.
    pub fn to_descriptor(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.schema.json_schema(),
        })
    }

    /// One-line signature.
    ///
    /// Format: `- tool(param1: type, param2?: type): description`
    pub fn to_signature_line(&self) -> String {
        let params: Vec<String> = self
            .schema
            .params()
            .iter()
            .map(|p| {
                let optional = if p.required { "" } else { "?" };
                format!("{}{}: {}", p.name, optional, p.param_type.display_name())
            })
            .collect();

        format!("- {}({}): {}", self.name, params.join(", "), self.description)
    }
}

// =============================================================================
// Tool catalog
// =============================================================================

/// In-memory tool registry keyed by tool name.
#[derive(Debug, Default)]
pub struct ToolCatalog {
    entries: HashMap<String, ToolEntry>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Catalog holding every built-in tool.
    pub fn builtin() -> Result<Self> {
        let mut catalog = Self::new();
        for entry in builtin::entries() {
            catalog.register(entry)?;
        }
        Ok(catalog)
    }

    /// Register a tool entry, checking its schema invariants.
    pub fn register(&mut self, entry: ToolEntry) -> Result<()> {
        if entry.name.is_empty() {
            return Err(Error::config("Tool name cannot be empty"));
        }
        if self.entries.contains_key(&entry.name) {
            return Err(Error::config(format!("Tool '{}' registered twice", entry.name)));
        }
        entry.schema.check(&entry.name)?;
        self.entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    /// Get a tool entry by name.
    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        self.entries.get(name)
    }

    /// Check if a tool exists.
    pub fn has_tool(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// List all tool names, sorted.
    pub fn list_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// List all tool entries, sorted by name.
    pub fn list_entries(&self) -> Vec<&ToolEntry> {
        let mut entries: Vec<&ToolEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    /// Discovery descriptors for every tool, sorted by name.
    pub fn descriptors(&self) -> Vec<Value> {
        self.list_entries()
            .into_iter()
            .map(ToolEntry::to_descriptor)
            .collect()
    }

    /// Validate `args` and synthesize the command for a command tool.
    pub fn synthesize(&self, name: &str, args: &Value) -> Result<SynthesizedCommand> {
        let entry = self.get(name).ok_or_else(|| Error::unknown_tool(name))?;
        let params = entry.validate(args)?;
        match &entry.action {
            ToolAction::Command(spec) => spec.synthesize(&params),
            ToolAction::FetchTags => Err(Error::synthesis(format!(
                "tool '{}' fetches data and has no command line",
                name
            ))),
        }
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
