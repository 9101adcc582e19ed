//! Parameter schema — typed parameter declarations and validation.
//!
//! Turns an untyped JSON argument object into [`ValidatedParams`], collecting
//! every violated constraint instead of stopping at the first one.

use reqwest::Url;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashSet};

use crate::types::{Error, Result};

// =============================================================================
// Parameter types
// =============================================================================

/// Parameter type for tool inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    String,
    /// Absolute URL (scheme + host).
    Url,
    /// Integer with optional inclusive bounds.
    Int { min: Option<i64>, max: Option<i64> },
    Bool,
    /// Case-sensitive set of allowed values.
    Enum(Vec<String>),
    /// List of strings, empty when missing.
    StringList,
    /// List of strings that must contain at least one item.
    NonEmptyList,
}

impl ParamType {
    /// Unbounded integer.
    pub fn int() -> Self {
        ParamType::Int {
            min: None,
            max: None,
        }
    }

    /// Integer bounded to `min..=max`.
    pub fn int_range(min: i64, max: i64) -> Self {
        ParamType::Int {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Integer with a lower bound only.
    pub fn int_min(min: i64) -> Self {
        ParamType::Int {
            min: Some(min),
            max: None,
        }
    }

    pub fn one_of(values: &[&str]) -> Self {
        ParamType::Enum(values.iter().map(|v| v.to_string()).collect())
    }

    /// Validate a JSON value against this parameter type and convert it.
    pub fn coerce(&self, value: &Value) -> std::result::Result<ParamValue, String> {
        match self {
            ParamType::String => value
                .as_str()
                .map(|s| ParamValue::Str(s.to_string()))
                .ok_or_else(|| format!("expected string, got {}", value)),
            ParamType::Url => {
                let s = value
                    .as_str()
                    .ok_or_else(|| format!("expected absolute URL, got {}", value))?;
                match Url::parse(s) {
                    Ok(url) if url.has_host() => Ok(ParamValue::Str(s.to_string())),
                    _ => Err(format!("expected absolute URL, got {}", value)),
                }
            }
            ParamType::Int { min, max } => {
                let n = value
                    .as_i64()
                    .ok_or_else(|| format!("expected integer, got {}", value))?;
                match (min, max) {
                    (Some(lo), Some(hi)) if n < *lo || n > *hi => Err(format!(
                        "expected integer between {} and {}, got {}",
                        lo, hi, n
                    )),
                    (Some(lo), None) if n < *lo => {
                        Err(format!("expected integer >= {}, got {}", lo, n))
                    }
                    (None, Some(hi)) if n > *hi => {
                        Err(format!("expected integer <= {}, got {}", hi, n))
                    }
                    _ => Ok(ParamValue::Int(n)),
                }
            }
            ParamType::Bool => value
                .as_bool()
                .map(ParamValue::Bool)
                .ok_or_else(|| format!("expected boolean, got {}", value)),
            ParamType::Enum(variants) => {
                let s = value
                    .as_str()
                    .ok_or_else(|| format!("expected string for enum, got {}", value))?;
                if variants.iter().any(|v| v == s) {
                    Ok(ParamValue::Str(s.to_string()))
                } else {
                    Err(format!(
                        "invalid value {}, expected one of: {}",
                        value,
                        variants.join(", ")
                    ))
                }
            }
            ParamType::StringList | ParamType::NonEmptyList => {
                let arr = value
                    .as_array()
                    .ok_or_else(|| format!("expected array of strings, got {}", value))?;
                let mut items = Vec::with_capacity(arr.len());
                for (i, item) in arr.iter().enumerate() {
                    match item.as_str() {
                        Some(s) => items.push(s.to_string()),
                        None => {
                            return Err(format!("expected string at index {}, got {}", i, item))
                        }
                    }
                }
                if items.is_empty() && matches!(self, ParamType::NonEmptyList) {
                    return Err("expected at least one item".to_string());
                }
                Ok(ParamValue::List(items))
            }
        }
    }

    /// Human-readable type name.
    pub fn display_name(&self) -> String {
        match self {
            ParamType::String => "string".to_string(),
            ParamType::Url => "url".to_string(),
            ParamType::Int { .. } => "integer".to_string(),
            ParamType::Bool => "boolean".to_string(),
            ParamType::Enum(variants) => format!("enum({})", variants.join("|")),
            ParamType::StringList => "string[]".to_string(),
            ParamType::NonEmptyList => "string[1..]".to_string(),
        }
    }

    /// JSON Schema fragment advertised through `tools/list`.
    pub fn json_schema(&self) -> Value {
        match self {
            ParamType::String => json!({"type": "string"}),
            ParamType::Url => json!({"type": "string", "format": "uri"}),
            ParamType::Int { min, max } => {
                let mut schema = json!({"type": "integer"});
                if let Some(lo) = min {
                    schema["minimum"] = json!(lo);
                }
                if let Some(hi) = max {
                    schema["maximum"] = json!(hi);
                }
                schema
            }
            ParamType::Bool => json!({"type": "boolean"}),
            ParamType::Enum(variants) => json!({"type": "string", "enum": variants}),
            ParamType::StringList => json!({"type": "array", "items": {"type": "string"}}),
            ParamType::NonEmptyList => {
                json!({"type": "array", "items": {"type": "string"}, "minItems": 1})
            }
        }
    }
}

// =============================================================================
// Parameter definition
// =============================================================================

/// A single parameter definition for a tool.
#[derive(Debug, Clone)]
pub struct ParamDef {
    pub name: String,
    pub param_type: ParamType,
    pub description: String,
    pub required: bool,
    pub default: Option<Value>,
}

impl ParamDef {
    pub fn required(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            description: description.to_string(),
            required: true,
            default: None,
        }
    }

    pub fn optional(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            required: false,
            ..Self::required(name, param_type, description)
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Resolve the value used when the caller omitted this parameter.
    fn resolve_missing(&self, tool: &str) -> std::result::Result<Option<ParamValue>, String> {
        if self.required {
            return Err(format!(
                "missing required parameter '{}' for tool '{}'",
                self.name, tool
            ));
        }
        if let Some(default) = &self.default {
            return self
                .param_type
                .coerce(default)
                .map(Some)
                .map_err(|e| format!("parameter '{}': {}", self.name, e));
        }
        match self.param_type {
            ParamType::StringList => Ok(Some(ParamValue::List(Vec::new()))),
            ParamType::NonEmptyList => {
                Err(format!("parameter '{}': expected at least one item", self.name))
            }
            _ => Ok(None),
        }
    }
}

// =============================================================================
// Schema
// =============================================================================

/// Ordered parameter declarations for one tool.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    params: Vec<ParamDef>,
}

impl Schema {
    pub fn new(params: Vec<ParamDef>) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &[ParamDef] {
        &self.params
    }

    /// Check the schema's own invariants: unique names, well-typed defaults.
    pub fn check(&self, tool: &str) -> Result<()> {
        let mut seen = HashSet::new();
        for param in &self.params {
            if !seen.insert(param.name.as_str()) {
                return Err(Error::config(format!(
                    "tool '{}' declares parameter '{}' twice",
                    tool, param.name
                )));
            }
            if let Some(default) = &param.default {
                param.param_type.coerce(default).map_err(|e| {
                    Error::config(format!(
                        "tool '{}' parameter '{}' has an invalid default: {}",
                        tool, param.name, e
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// Validate raw arguments, reporting every violation.
    pub fn validate(&self, tool: &str, args: &Value) -> Result<ValidatedParams> {
        let empty = Map::new();
        let arg_map = match args {
            Value::Null => &empty,
            Value::Object(map) => map,
            _ => {
                return Err(Error::validation(
                    tool,
                    vec!["arguments must be a JSON object".to_string()],
                ))
            }
        };

        let mut values = BTreeMap::new();
        let mut violations = Vec::new();

        for param in &self.params {
            let resolved = match arg_map.get(&param.name) {
                None | Some(Value::Null) => param.resolve_missing(tool),
                Some(value) => param
                    .param_type
                    .coerce(value)
                    .map(Some)
                    .map_err(|e| format!("parameter '{}': {}", param.name, e)),
            };
            match resolved {
                Ok(Some(value)) => {
                    values.insert(param.name.clone(), value);
                }
                Ok(None) => {}
                Err(violation) => violations.push(violation),
            }
        }

        for key in arg_map.keys() {
            if !self.params.iter().any(|p| &p.name == key) {
                tracing::debug!(tool, parameter = %key, "ignoring unknown parameter");
            }
        }

        if violations.is_empty() {
            Ok(ValidatedParams { values })
        } else {
            Err(Error::validation(tool, violations))
        }
    }

    /// JSON Schema object for the whole argument record.
    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in &self.params {
            let mut prop = param.param_type.json_schema();
            prop["description"] = json!(param.description);
            if let Some(default) = &param.default {
                prop["default"] = default.clone();
            }
            properties.insert(param.name.clone(), prop);
            if param.required {
                required.push(json!(param.name));
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

// =============================================================================
// Validated values
// =============================================================================

/// A single type-checked parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<String>),
}

/// Parameters after validation; absent optionals have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedParams {
    values: BTreeMap<String, ParamValue>,
}

impl ValidatedParams {
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParamValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// String value a builder cannot do without.
    pub fn require_str(&self, name: &str) -> Result<&str> {
        self.str(name)
            .ok_or_else(|| Error::synthesis(format!("parameter '{}' is required", name)))
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ParamValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    /// True only when the parameter is present and `true`.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(ParamValue::Bool(true)))
    }

    pub fn list(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(ParamValue::List(items)) => items,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        Schema::new(vec![
            ParamDef::required("url", ParamType::Url, "Target URL"),
            ParamDef::optional("method", ParamType::one_of(&["GET", "POST"]), "HTTP method"),
            ParamDef::optional("threads", ParamType::int_range(1, 100), "Threads")
                .with_default(json!(10)),
            ParamDef::optional("stable", ParamType::Bool, "Stable mode"),
            ParamDef::optional("extra", ParamType::StringList, "Extra args"),
        ])
    }

    fn violations(err: Error) -> Vec<String> {
        match err {
            Error::Validation { violations, .. } => violations,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_params_with_defaults() {
        let params = sample_schema()
            .validate("probe", &json!({"url": "http://x.test/a"}))
            .unwrap();

        assert_eq!(params.str("url"), Some("http://x.test/a"));
        assert_eq!(params.int("threads"), Some(10));
        assert_eq!(params.str("method"), None);
        assert!(!params.flag("stable"));
        assert!(params.list("extra").is_empty());
        assert_eq!(params.get("extra"), Some(&ParamValue::List(vec![])));
    }

    #[test]
    fn test_missing_required_names_param_and_tool() {
        let errs = violations(sample_schema().validate("probe", &json!({})).unwrap_err());
        assert_eq!(errs, vec!["missing required parameter 'url' for tool 'probe'"]);
    }

    #[test]
    fn test_reports_every_violation() {
        let args = json!({
            "url": "not a url",
            "method": "PUT",
            "threads": "ten",
            "stable": "yes",
            "extra": [1],
        });
        let errs = violations(sample_schema().validate("probe", &args).unwrap_err());
        assert_eq!(errs.len(), 5, "{errs:?}");
        assert!(errs[0].contains("expected absolute URL, got \"not a url\""));
        assert!(errs[1].contains("invalid value \"PUT\", expected one of: GET, POST"));
        assert!(errs[2].contains("expected integer, got \"ten\""));
        assert!(errs[3].contains("expected boolean"));
        assert!(errs[4].contains("expected string at index 0"));
    }

    #[test]
    fn test_url_requires_scheme_and_host() {
        let pt = ParamType::Url;
        assert!(pt.coerce(&json!("https://example.com/path?q=1")).is_ok());
        assert!(pt.coerce(&json!("example.com")).is_err());
        assert!(pt.coerce(&json!("mailto:someone@example.com")).is_err());
        assert!(pt.coerce(&json!("http://")).is_err());
    }

    #[test]
    fn test_enum_is_case_sensitive() {
        let pt = ParamType::one_of(&["GET", "POST"]);
        assert!(pt.coerce(&json!("GET")).is_ok());
        let err = pt.coerce(&json!("get")).unwrap_err();
        assert_eq!(err, "invalid value \"get\", expected one of: GET, POST");
    }

    #[test]
    fn test_int_bounds() {
        let pt = ParamType::int_range(1, 5);
        assert_eq!(pt.coerce(&json!(3)).unwrap(), ParamValue::Int(3));
        assert_eq!(
            pt.coerce(&json!(9)).unwrap_err(),
            "expected integer between 1 and 5, got 9"
        );
        assert!(ParamType::int_min(1).coerce(&json!(0)).is_err());
        assert!(ParamType::int().coerce(&json!(1.5)).is_err());
        assert!(ParamType::int().coerce(&json!("7")).is_err());
    }

    #[test]
    fn test_non_empty_list() {
        let schema = Schema::new(vec![ParamDef::optional(
            "targets",
            ParamType::NonEmptyList,
            "Targets",
        )]);
        let missing = violations(schema.validate("t", &json!({})).unwrap_err());
        assert_eq!(missing, vec!["parameter 'targets': expected at least one item"]);

        let empty = violations(schema.validate("t", &json!({"targets": []})).unwrap_err());
        assert_eq!(empty, vec!["parameter 'targets': expected at least one item"]);

        let ok = schema.validate("t", &json!({"targets": ["a"]})).unwrap();
        assert_eq!(ok.list("targets"), ["a".to_string()]);
    }

    #[test]
    fn test_null_is_absent() {
        let params = sample_schema()
            .validate("probe", &json!({"url": "http://x.test", "method": null}))
            .unwrap();
        assert_eq!(params.str("method"), None);

        let errs = violations(sample_schema().validate("probe", &json!({"url": null})).unwrap_err());
        assert!(errs[0].starts_with("missing required parameter 'url'"));
    }

    #[test]
    fn test_unknown_params_ignored() {
        let params = sample_schema()
            .validate("probe", &json!({"url": "http://x.test", "bogus": true}))
            .unwrap();
        assert!(params.get("bogus").is_none());
    }

    #[test]
    fn test_non_object_arguments() {
        let errs = violations(sample_schema().validate("probe", &json!([1, 2])).unwrap_err());
        assert_eq!(errs, vec!["arguments must be a JSON object"]);
    }

    #[test]
    fn test_check_rejects_duplicate_names() {
        let schema = Schema::new(vec![
            ParamDef::optional("a", ParamType::String, ""),
            ParamDef::optional("a", ParamType::Bool, ""),
        ]);
        assert!(matches!(schema.check("dup"), Err(Error::Config(_))));
    }

    #[test]
    fn test_check_rejects_enum_default_outside_set() {
        let schema = Schema::new(vec![ParamDef::optional(
            "mode",
            ParamType::one_of(&["fast", "slow"]),
            "",
        )
        .with_default(json!("medium"))]);
        let err = schema.check("bad").unwrap_err();
        assert!(err.to_string().contains("invalid default"));
    }

    #[test]
    fn test_json_schema() {
        let schema = sample_schema().json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["url"]));
        assert_eq!(schema["properties"]["url"]["format"], "uri");
        assert_eq!(schema["properties"]["threads"]["minimum"], 1);
        assert_eq!(schema["properties"]["threads"]["default"], 10);
        assert_eq!(schema["properties"]["method"]["enum"], json!(["GET", "POST"]));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ParamType::int().display_name(), "integer");
        assert_eq!(ParamType::one_of(&["a", "b"]).display_name(), "enum(a|b)");
        assert_eq!(ParamType::NonEmptyList.display_name(), "string[1..]");
    }
}
