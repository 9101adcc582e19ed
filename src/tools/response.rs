//! Response envelope — the uniform result returned for every tool call.

use serde::{Deserialize, Serialize};

use crate::types::Error;

/// One block of response content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
}

/// `{content: [...], isError: bool}` as returned over MCP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub content: Vec<ContentBlock>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl ToolResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: true,
        }
    }

    /// Advisory response for a synthesized command.
    pub fn command(title: &str, command: &str, notes: &[String]) -> Self {
        let mut text = format!(
            "{} cannot be executed in this environment.\n\nRun it locally with:\n\n{}",
            title, command
        );
        if !notes.is_empty() {
            text.push_str("\n\nNotes:");
            for note in notes {
                text.push_str("\n- ");
                text.push_str(note);
            }
        }
        Self::text(text)
    }

    /// Error envelope for a failed call.
    pub fn from_error(err: &Error) -> Self {
        let text = match err {
            Error::Validation { tool, violations } => {
                let mut text = format!("Invalid arguments for tool '{}':", tool);
                for violation in violations {
                    text.push_str("\n- ");
                    text.push_str(violation);
                }
                text
            }
            Error::Synthesis(msg) => format!("Error: {}", msg),
            Error::Fetch(msg) => format!("Failed to fetch tag list: {}", msg),
            other => other.to_string(),
        };
        Self::error(text)
    }

    /// Concatenated text of all blocks.
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .map(|block| match block {
                ContentBlock::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_command_envelope_layout() {
        let notes = vec![
            "Make sure `nmap` is installed and on your PATH.".to_string(),
            "Arguments are passed through as provided.".to_string(),
        ];
        let resp = ToolResponse::command("Nmap", "nmap -sV 10.0.0.1", &notes);

        assert!(!resp.is_error);
        assert_eq!(resp.content.len(), 1);
        assert_eq!(
            resp.joined_text(),
            "Nmap cannot be executed in this environment.\n\n\
             Run it locally with:\n\n\
             nmap -sV 10.0.0.1\n\n\
             Notes:\n\
             - Make sure `nmap` is installed and on your PATH.\n\
             - Arguments are passed through as provided."
        );
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(ToolResponse::text("hi")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "content": [{"type": "text", "text": "hi"}],
                "isError": false,
            })
        );
    }

    #[test]
    fn test_validation_error_lists_violations() {
        let err = Error::validation(
            "arjun",
            vec![
                "missing required parameter 'url' for tool 'arjun'".to_string(),
                "parameter 'threads': expected integer, got \"x\"".to_string(),
            ],
        );
        let resp = ToolResponse::from_error(&err);
        assert!(resp.is_error);
        assert_eq!(
            resp.joined_text(),
            "Invalid arguments for tool 'arjun':\n\
             - missing required parameter 'url' for tool 'arjun'\n\
             - parameter 'threads': expected integer, got \"x\""
        );
    }

    #[test]
    fn test_error_kinds_have_distinct_text() {
        let unknown = ToolResponse::from_error(&Error::unknown_tool("nope"));
        let synth = ToolResponse::from_error(&Error::synthesis("bad combo"));
        let fetch = ToolResponse::from_error(&Error::fetch("HTTP 500"));

        assert_eq!(unknown.joined_text(), "Unknown tool: 'nope' is not registered");
        assert_eq!(synth.joined_text(), "Error: bad combo");
        assert_eq!(fetch.joined_text(), "Failed to fetch tag list: HTTP 500");
        assert!(unknown.is_error && synth.is_error && fetch.is_error);
    }
}
