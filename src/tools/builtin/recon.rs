//! Reconnaissance tools: subdomain enumeration, probing, crawling, archives.

use serde_json::json;

use crate::tools::args::ArgList;
use crate::tools::catalog::{CommandSpec, ToolEntry};
use crate::tools::schema::{ParamDef, ParamType, ValidatedParams};
use crate::types::{Error, Result};

pub(crate) fn entries() -> Vec<ToolEntry> {
    vec![amass(), subfinder(), httpx(), katana(), waybackurls()]
}

// =============================================================================
// Amass
// =============================================================================

fn amass() -> ToolEntry {
    ToolEntry::command(
        "amass",
        "Advanced subdomain enumeration and reconnaissance tool",
        vec![
            ParamDef::required(
                "subcommand",
                ParamType::one_of(&["enum", "intel"]),
                "Amass operation mode: intel gathers intelligence about target domains from \
                 various sources; enum performs subdomain enumeration and network mapping",
            ),
            ParamDef::optional(
                "domain",
                ParamType::String,
                "Target domain to perform reconnaissance against (e.g., example.com)",
            ),
            ParamDef::optional(
                "intel_whois",
                ParamType::Bool,
                "Whether to include WHOIS data in intelligence gathering",
            ),
            ParamDef::optional(
                "intel_organization",
                ParamType::String,
                "Organization name to search for during intelligence gathering (e.g., 'Example Corp')",
            ),
            ParamDef::optional(
                "enum_type",
                ParamType::one_of(&["active", "passive"]),
                "Enumeration approach: active includes DNS resolution and direct interaction; \
                 passive only uses third-party sources",
            ),
            ParamDef::optional(
                "enum_brute",
                ParamType::Bool,
                "Whether to perform brute force subdomain discovery",
            ),
            ParamDef::optional(
                "enum_brute_wordlist",
                ParamType::String,
                "Path to custom wordlist file for brute force operations",
            ),
        ],
        CommandSpec::new("amass", "Amass", build_amass)
            .with_note("Install it from https://github.com/owasp-amass/amass"),
    )
}

fn build_amass(p: &ValidatedParams) -> Result<Vec<String>> {
    let subcommand = p.require_str("subcommand")?;
    let domain = p.str("domain");
    let mut args = ArgList::new();
    args.arg(subcommand);

    match subcommand {
        "enum" => {
            let domain = domain.ok_or_else(|| {
                Error::synthesis("Domain parameter is required for 'enum' subcommand")
            })?;
            args.value("-d", domain)
                .switch("-passive", p.str("enum_type") == Some("passive"));
            if p.flag("enum_brute") {
                args.arg("-brute").opt("-w", p.str("enum_brute_wordlist"));
            }
        }
        "intel" => {
            let organization = p.str("intel_organization");
            if domain.is_none() && organization.is_none() {
                return Err(Error::synthesis(
                    "Either domain or organization parameter is required for 'intel' subcommand",
                ));
            }
            if let Some(domain) = domain {
                args.value("-d", domain).switch("-whois", p.flag("intel_whois"));
            }
            args.opt("-org", organization);
            if domain.is_none() {
                args.switch("-whois", p.flag("intel_whois"));
            }
        }
        other => {
            return Err(Error::synthesis(format!("Unsupported amass subcommand '{}'", other)));
        }
    }
    Ok(args.into_tokens())
}

// =============================================================================
// subfinder
// =============================================================================

fn subfinder() -> ToolEntry {
    ToolEntry::command(
        "subfinder",
        "Passive subdomain discovery with subfinder",
        vec![
            ParamDef::required("domain", ParamType::String, "Domain to enumerate"),
            ParamDef::optional("all", ParamType::Bool, "Use all sources (slower)"),
            ParamDef::optional("recursive", ParamType::Bool, "Use only recursive-capable sources"),
            ParamDef::optional("threads", ParamType::int_min(1), "Concurrent resolver goroutines"),
            ParamDef::optional("timeout", ParamType::int_min(1), "Seconds to wait per source"),
            ParamDef::optional("output", ParamType::String, "Write results to this file"),
            ParamDef::optional(
                "subfinder_args",
                ParamType::StringList,
                "Additional subfinder arguments (passed as-is)",
            ),
        ],
        CommandSpec::new("subfinder", "subfinder", build_subfinder),
    )
}

fn build_subfinder(p: &ValidatedParams) -> Result<Vec<String>> {
    let mut args = ArgList::new();
    args.value("-d", p.require_str("domain")?)
        .arg("-silent")
        .switch("-all", p.flag("all"))
        .switch("-recursive", p.flag("recursive"))
        .opt("-t", p.int("threads"))
        .opt("-timeout", p.int("timeout"))
        .opt("-o", p.str("output"))
        .extend(p.list("subfinder_args"));
    Ok(args.into_tokens())
}

// =============================================================================
// httpx
// =============================================================================

fn httpx() -> ToolEntry {
    ToolEntry::command(
        "httpx",
        "Probe hosts for live HTTP services with httpx",
        vec![
            ParamDef::required(
                "targets",
                ParamType::NonEmptyList,
                "Hosts or URLs to probe",
            ),
            ParamDef::optional("status_code", ParamType::Bool, "Display response status codes"),
            ParamDef::optional("title", ParamType::Bool, "Display page titles"),
            ParamDef::optional("tech_detect", ParamType::Bool, "Detect technologies in use"),
            ParamDef::optional("threads", ParamType::int_min(1), "Number of threads"),
            ParamDef::optional(
                "httpx_args",
                ParamType::StringList,
                "Additional httpx arguments (passed as-is)",
            ),
        ],
        CommandSpec::new("httpx", "httpx", build_httpx),
    )
}

fn build_httpx(p: &ValidatedParams) -> Result<Vec<String>> {
    let mut args = ArgList::new();
    args.joined("-u", p.list("targets"))
        .arg("-silent")
        .switch("-sc", p.flag("status_code"))
        .switch("-title", p.flag("title"))
        .switch("-td", p.flag("tech_detect"))
        .opt("-threads", p.int("threads"))
        .extend(p.list("httpx_args"));
    Ok(args.into_tokens())
}

// =============================================================================
// katana
// =============================================================================

fn katana() -> ToolEntry {
    ToolEntry::command(
        "katana",
        "Crawl web applications for endpoints with katana",
        vec![
            ParamDef::required("targets", ParamType::NonEmptyList, "URLs to crawl"),
            ParamDef::optional("depth", ParamType::int_range(1, 10), "Maximum crawl depth")
                .with_default(json!(3)),
            ParamDef::optional("js_crawl", ParamType::Bool, "Parse JavaScript files for endpoints"),
            ParamDef::optional("headless", ParamType::Bool, "Crawl with a headless browser"),
            ParamDef::optional("timeout", ParamType::int_min(1), "Request timeout in seconds"),
            ParamDef::optional(
                "katana_args",
                ParamType::StringList,
                "Additional katana arguments (passed as-is)",
            ),
        ],
        CommandSpec::new("katana", "katana", build_katana),
    )
}

fn build_katana(p: &ValidatedParams) -> Result<Vec<String>> {
    let mut args = ArgList::new();
    args.joined("-u", p.list("targets"))
        .opt("-d", p.int("depth"))
        .switch("-jc", p.flag("js_crawl"))
        .switch("-headless", p.flag("headless"))
        .opt("-timeout", p.int("timeout"))
        .extend(p.list("katana_args"));
    Ok(args.into_tokens())
}

// =============================================================================
// waybackurls
// =============================================================================

fn waybackurls() -> ToolEntry {
    ToolEntry::command(
        "waybackurls",
        "Fetch URLs known to the Wayback Machine for a domain",
        vec![
            ParamDef::required("domain", ParamType::String, "Domain to look up"),
            ParamDef::optional("no_subs", ParamType::Bool, "Exclude subdomains"),
            ParamDef::optional("dates", ParamType::Bool, "Show capture dates"),
        ],
        CommandSpec::new("waybackurls", "waybackurls", build_waybackurls),
    )
}

fn build_waybackurls(p: &ValidatedParams) -> Result<Vec<String>> {
    let mut args = ArgList::new();
    args.switch("-no-subs", p.flag("no_subs"))
        .switch("-dates", p.flag("dates"))
        .arg(p.require_str("domain")?);
    Ok(args.into_tokens())
}
