//! Network and vulnerability scanners: nmap, masscan, nuclei.

use crate::tools::args::ArgList;
use crate::tools::catalog::{CommandSpec, ToolEntry};
use crate::tools::schema::{ParamDef, ParamType, ValidatedParams};
use crate::types::Result;

pub(crate) fn entries() -> Vec<ToolEntry> {
    vec![nmap(), masscan(), nuclei()]
}

fn nmap() -> ToolEntry {
    ToolEntry::command(
        "nmap",
        "Network exploration and port scanning with Nmap",
        vec![
            ParamDef::required("target", ParamType::String, "Host, IP range or CIDR to scan"),
            ParamDef::optional("ports", ParamType::String, "Ports to scan (e.g. 22,80,443 or 1-1024)"),
            ParamDef::optional(
                "timing",
                ParamType::one_of(&["T0", "T1", "T2", "T3", "T4", "T5"]),
                "Timing template (T0 paranoid .. T5 insane)",
            ),
            ParamDef::optional("service_version", ParamType::Bool, "Probe open ports for service versions"),
            ParamDef::optional("os_detection", ParamType::Bool, "Enable OS detection"),
            ParamDef::optional("skip_discovery", ParamType::Bool, "Treat all hosts as online"),
            ParamDef::optional("scripts", ParamType::StringList, "NSE scripts or categories to run"),
            ParamDef::optional(
                "nmap_args",
                ParamType::StringList,
                "Additional nmap arguments (passed as-is, placed before the target)",
            ),
        ],
        CommandSpec::new("nmap", "Nmap", build_nmap)
            .with_note("OS detection and SYN scans need root privileges."),
    )
}

fn build_nmap(p: &ValidatedParams) -> Result<Vec<String>> {
    let target = p.require_str("target")?;
    let mut args = ArgList::new();
    args.opt("-p", p.str("ports"));
    if let Some(timing) = p.str("timing") {
        args.attached("-", timing);
    }
    args.switch("-sV", p.flag("service_version"))
        .switch("-O", p.flag("os_detection"))
        .switch("-Pn", p.flag("skip_discovery"))
        .joined("--script", p.list("scripts"))
        .extend(p.list("nmap_args"))
        .arg(target);
    Ok(args.into_tokens())
}

fn masscan() -> ToolEntry {
    ToolEntry::command(
        "masscan",
        "Fast TCP port scanner for large address ranges",
        vec![
            ParamDef::required("target", ParamType::String, "IP address or CIDR range to scan"),
            ParamDef::required("port", ParamType::String, "Port or port range (e.g. 80 or 0-65535)"),
            ParamDef::optional(
                "masscan_args",
                ParamType::StringList,
                "Additional masscan arguments (passed as-is, e.g. --max-rate 1000)",
            ),
        ],
        CommandSpec::new("masscan", "Masscan", build_masscan)
            .with_note("masscan sends raw packets and usually needs root privileges."),
    )
}

fn build_masscan(p: &ValidatedParams) -> Result<Vec<String>> {
    let mut args = ArgList::new();
    args.attached("-p", p.require_str("port")?)
        .arg(p.require_str("target")?)
        .extend(p.list("masscan_args"));
    Ok(args.into_tokens())
}

fn nuclei() -> ToolEntry {
    ToolEntry::command(
        "nuclei",
        "Template-based vulnerability scanning with Nuclei",
        vec![
            ParamDef::required("url", ParamType::Url, "Target URL to scan"),
            ParamDef::optional("tags", ParamType::StringList, "Only run templates with these tags"),
            ParamDef::optional(
                "severity",
                ParamType::StringList,
                "Only run templates of these severities (info, low, medium, high, critical)",
            ),
            ParamDef::optional("templates", ParamType::String, "Template file or directory"),
            ParamDef::optional("rate_limit", ParamType::int_min(1), "Maximum requests per second"),
            ParamDef::optional("concurrency", ParamType::int_min(1), "Templates run in parallel"),
            ParamDef::optional("output", ParamType::String, "Write findings to this file"),
            ParamDef::optional(
                "nuclei_args",
                ParamType::StringList,
                "Additional nuclei arguments (passed as-is)",
            ),
        ],
        CommandSpec::new("nuclei", "Nuclei", build_nuclei)
            .with_note("Install it from https://github.com/projectdiscovery/nuclei"),
    )
}

fn build_nuclei(p: &ValidatedParams) -> Result<Vec<String>> {
    let mut args = ArgList::new();
    args.value("-u", p.require_str("url")?)
        .arg("-silent")
        .joined("-tags", p.list("tags"))
        .joined("-severity", p.list("severity"))
        .opt("-t", p.str("templates"))
        .opt("-rl", p.int("rate_limit"))
        .opt("-c", p.int("concurrency"))
        .opt("-o", p.str("output"))
        .extend(p.list("nuclei_args"));
    Ok(args.into_tokens())
}
