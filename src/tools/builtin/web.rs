//! Web application testing tools: request smuggling, parameter discovery,
//! content fuzzing, SQL injection.

use serde_json::json;

use crate::tools::args::ArgList;
use crate::tools::catalog::{CommandSpec, ToolEntry};
use crate::tools::schema::{ParamDef, ParamType, ValidatedParams};
use crate::types::{Error, Result};

const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];

pub(crate) fn entries() -> Vec<ToolEntry> {
    vec![smuggler(), arjun(), ffuf(), sqlmap()]
}

// =============================================================================
// Smuggler
// =============================================================================

fn smuggler() -> ToolEntry {
    ToolEntry::command(
        "do-smuggler",
        "Run Smuggler to detect HTTP Request Smuggling vulnerabilities",
        vec![
            ParamDef::required(
                "url",
                ParamType::Url,
                "Target URL to detect HTTP Request Smuggling",
            ),
            ParamDef::optional(
                "smuggler_args",
                ParamType::StringList,
                "Additional smuggler.py arguments (passed as-is, e.g., -m GET, -v example.com, \
                 -l, -c config.txt, -x, -t 10, -verify quick)",
            ),
        ],
        CommandSpec::new("python smuggler.py", "Smuggler", build_smuggler).with_notes(&[
            "Provide the correct python interpreter and smuggler.py path.",
            "Arguments are passed through as provided.",
            "Review the output locally for findings.",
        ]),
    )
}

fn build_smuggler(p: &ValidatedParams) -> Result<Vec<String>> {
    let mut args = ArgList::new();
    args.value("-u", p.require_str("url")?)
        .extend(p.list("smuggler_args"));
    Ok(args.into_tokens())
}

// =============================================================================
// Arjun
// =============================================================================

fn arjun() -> ToolEntry {
    ToolEntry::command(
        "arjun",
        "Discover hidden HTTP parameters of a URL with Arjun",
        vec![
            ParamDef::required("url", ParamType::Url, "Target URL to scan for parameters"),
            ParamDef::optional(
                "method",
                ParamType::one_of(&["GET", "POST", "JSON", "XML"]),
                "Request method used while probing",
            ),
            ParamDef::optional("wordlist", ParamType::String, "Path to a custom parameter wordlist"),
            ParamDef::optional("threads", ParamType::int_min(1), "Number of concurrent threads"),
            ParamDef::optional("delay", ParamType::int_min(0), "Delay between requests in seconds"),
            ParamDef::optional("timeout", ParamType::int_min(1), "HTTP request timeout in seconds"),
            ParamDef::optional("rate_limit", ParamType::int_min(1), "Maximum requests per second"),
            ParamDef::optional("chunk_size", ParamType::int_min(1), "Parameters sent per request"),
            ParamDef::optional("stable", ParamType::Bool, "Prefer stability over speed"),
            ParamDef::optional("output", ParamType::String, "Write results to this JSON file"),
            ParamDef::optional(
                "arjun_args",
                ParamType::StringList,
                "Additional arjun arguments (passed as-is)",
            ),
        ],
        CommandSpec::new("arjun", "Arjun", build_arjun),
    )
}

fn build_arjun(p: &ValidatedParams) -> Result<Vec<String>> {
    let mut args = ArgList::new();
    args.value("-u", p.require_str("url")?)
        .opt("-m", p.str("method"))
        .opt("-w", p.str("wordlist"))
        .opt("-t", p.int("threads"))
        .opt("-d", p.int("delay"))
        .opt("-T", p.int("timeout"))
        .opt("--rate-limit", p.int("rate_limit"))
        .opt("-c", p.int("chunk_size"))
        .switch("--stable", p.flag("stable"))
        .opt("-oJ", p.str("output"))
        .extend(p.list("arjun_args"));
    Ok(args.into_tokens())
}

// =============================================================================
// ffuf
// =============================================================================

fn ffuf() -> ToolEntry {
    ToolEntry::command(
        "ffuf",
        "Fast web fuzzer for directories, virtual hosts and parameters",
        vec![
            ParamDef::required(
                "url",
                ParamType::Url,
                "Target URL; place the FUZZ keyword where wordlist entries go",
            ),
            ParamDef::required("wordlist", ParamType::String, "Path to the wordlist file"),
            ParamDef::optional("method", ParamType::one_of(HTTP_METHODS), "HTTP method"),
            ParamDef::optional(
                "extensions",
                ParamType::StringList,
                "File extensions appended to each word (e.g. .php, .bak)",
            ),
            ParamDef::optional(
                "match_codes",
                ParamType::StringList,
                "Match these HTTP status codes",
            ),
            ParamDef::optional(
                "filter_codes",
                ParamType::StringList,
                "Filter out these HTTP status codes",
            ),
            ParamDef::optional("threads", ParamType::int_min(1), "Number of concurrent threads"),
            ParamDef::optional("rate", ParamType::int_min(1), "Requests per second"),
            ParamDef::optional("recursion", ParamType::Bool, "Scan discovered directories recursively"),
            ParamDef::optional("output", ParamType::String, "Write results to this file"),
            ParamDef::optional(
                "ffuf_args",
                ParamType::StringList,
                "Additional ffuf arguments (passed as-is, e.g. -H \"Host: FUZZ.example.com\")",
            ),
        ],
        CommandSpec::new("ffuf", "ffuf", build_ffuf),
    )
}

fn build_ffuf(p: &ValidatedParams) -> Result<Vec<String>> {
    let url = p.require_str("url")?;
    let extra = p.list("ffuf_args");
    if !url.contains("FUZZ") && !extra.iter().any(|a| a.contains("FUZZ")) {
        return Err(Error::synthesis(
            "The FUZZ keyword must appear in the url or in ffuf_args",
        ));
    }

    let mut args = ArgList::new();
    args.value("-u", url)
        .value("-w", p.require_str("wordlist")?)
        .opt("-X", p.str("method"))
        .joined("-e", p.list("extensions"))
        .joined("-mc", p.list("match_codes"))
        .joined("-fc", p.list("filter_codes"))
        .opt("-t", p.int("threads"))
        .opt("-rate", p.int("rate"))
        .switch("-recursion", p.flag("recursion"))
        .opt("-o", p.str("output"))
        .extend(extra);
    Ok(args.into_tokens())
}

// =============================================================================
// sqlmap
// =============================================================================

fn sqlmap() -> ToolEntry {
    ToolEntry::command(
        "sqlmap",
        "Automatic SQL injection detection and exploitation",
        vec![
            ParamDef::required("url", ParamType::Url, "Target URL with injectable parameters"),
            ParamDef::optional("data", ParamType::String, "POST body to test (e.g. id=1&name=a)"),
            ParamDef::optional(
                "method",
                ParamType::one_of(&["GET", "POST", "PUT"]),
                "Force the HTTP method",
            ),
            ParamDef::optional("level", ParamType::int_range(1, 5), "Level of tests to perform"),
            ParamDef::optional("risk", ParamType::int_range(1, 3), "Risk of tests to perform"),
            ParamDef::optional("batch", ParamType::Bool, "Never ask for user input")
                .with_default(json!(true)),
            ParamDef::optional("dbs", ParamType::Bool, "Enumerate databases"),
            ParamDef::optional(
                "sqlmap_args",
                ParamType::StringList,
                "Additional sqlmap arguments (passed as-is)",
            ),
        ],
        CommandSpec::new("sqlmap", "sqlmap", build_sqlmap),
    )
}

fn build_sqlmap(p: &ValidatedParams) -> Result<Vec<String>> {
    let mut args = ArgList::new();
    args.value("-u", p.require_str("url")?)
        .switch("--batch", p.flag("batch"))
        .opt("--data", p.str("data"))
        .opt("--method", p.str("method"))
        .opt("--level", p.int("level"))
        .opt("--risk", p.int("risk"))
        .switch("--dbs", p.flag("dbs"))
        .extend(p.list("sqlmap_args"));
    Ok(args.into_tokens())
}
