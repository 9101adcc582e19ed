//! Argument list builder shared by every tool's build function.

use std::fmt::Display;

/// Ordered command-line tokens, before quoting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgList {
    tokens: Vec<String>,
}

impl ArgList {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Positional token or bare flag.
    pub fn arg(&mut self, token: impl Into<String>) -> &mut Self {
        self.tokens.push(token.into());
        self
    }

    /// Flag followed by its value, as two tokens.
    pub fn value(&mut self, flag: &str, value: impl Display) -> &mut Self {
        self.tokens.push(flag.to_string());
        self.tokens.push(value.to_string());
        self
    }

    /// Flag and value when the value is present.
    pub fn opt<T: Display>(&mut self, flag: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.value(flag, value);
        }
        self
    }

    /// Bare flag when `on`.
    pub fn switch(&mut self, flag: &str, on: bool) -> &mut Self {
        if on {
            self.tokens.push(flag.to_string());
        }
        self
    }

    /// Flag followed by one comma-joined token; skipped for empty lists.
    pub fn joined(&mut self, flag: &str, values: &[String]) -> &mut Self {
        if !values.is_empty() {
            self.value(flag, values.join(","));
        }
        self
    }

    /// Flag with its value glued on, e.g. `-p0-65535`.
    pub fn attached(&mut self, prefix: &str, value: impl Display) -> &mut Self {
        self.tokens.push(format!("{}{}", prefix, value));
        self
    }

    /// Pass-through raw arguments, each kept as its own token.
    pub fn extend(&mut self, raw: &[String]) -> &mut Self {
        self.tokens.extend(raw.iter().cloned());
        self
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_value_flags_emit_two_tokens() {
        let mut args = ArgList::new();
        args.value("--rate-limit", 1000).opt("-m", Some("GET"));
        assert_eq!(args.tokens(), strings(&["--rate-limit", "1000", "-m", "GET"]));
    }

    #[test]
    fn test_absent_options_are_skipped() {
        let mut args = ArgList::new();
        args.opt::<i64>("-t", None).switch("--stable", false);
        assert!(args.tokens().is_empty());
    }

    #[test]
    fn test_switch_emits_bare_flag_once() {
        let mut args = ArgList::new();
        args.switch("-sV", true);
        assert_eq!(args.into_tokens(), strings(&["-sV"]));
    }

    #[test]
    fn test_joined_list() {
        let mut args = ArgList::new();
        args.joined("-tags", &strings(&["cve", "rce"])).joined("-e", &[]);
        assert_eq!(args.tokens(), strings(&["-tags", "cve,rce"]));
    }

    #[test]
    fn test_attached_and_extend() {
        let mut args = ArgList::new();
        args.attached("-p", "0-65535")
            .arg("1.1.1.1")
            .extend(&strings(&["--max-rate", "1000"]));
        assert_eq!(
            args.into_tokens(),
            strings(&["-p0-65535", "1.1.1.1", "--max-rate", "1000"])
        );
    }

    #[test]
    fn test_negative_numbers_are_base_ten() {
        let mut args = ArgList::new();
        args.value("-d", -5).value("-n", 1_000_000);
        assert_eq!(args.tokens(), strings(&["-d", "-5", "-n", "1000000"]));
    }
}
