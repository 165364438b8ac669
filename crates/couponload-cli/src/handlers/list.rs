//! Handler for `couponload list`.

use crate::commands::{ListArgs, ReportFormat};
use crate::error::CliResult;
use console::style;
use couponload::{ScenarioRegistry, Timeouts};
use serde::Serialize;

/// Serializable view of a registered scenario.
#[derive(Debug, Serialize)]
pub struct ScenarioInfo {
    /// Registry key
    pub name: String,
    /// HTTP method
    pub method: String,
    /// Target path
    pub path: String,
    /// Connection timeout (s)
    pub connect_timeout_secs: u64,
    /// Network timeout (s)
    pub network_timeout_secs: u64,
}

/// Describe every scenario in the registry.
pub fn describe(registry: &ScenarioRegistry) -> Vec<ScenarioInfo> {
    registry
        .iter()
        .map(|s| ScenarioInfo {
            name: s.name.clone(),
            method: s.method.to_string(),
            path: s.path.clone(),
            connect_timeout_secs: s.timeouts.connect_secs,
            network_timeout_secs: s.timeouts.network_secs,
        })
        .collect()
}

/// Render scenario descriptions in the requested format.
pub fn render(infos: &[ScenarioInfo], format: ReportFormat) -> String {
    match format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(infos).unwrap_or_else(|_| "[]".to_string())
        }
        ReportFormat::Markdown => {
            let mut out = String::from(
                "| Scenario | Method | Path | Connect (s) | Network (s) |\n|----------|--------|------|-------------|-------------|\n",
            );
            for i in infos {
                out.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    i.name, i.method, i.path, i.connect_timeout_secs, i.network_timeout_secs
                ));
            }
            out
        }
        ReportFormat::Text => {
            let mut out = String::new();
            for i in infos {
                out.push_str(&format!(
                    "{:<20} {:<5} {:<18} timeouts {}s/{}s\n",
                    style(&i.name).bold(),
                    i.method,
                    i.path,
                    i.connect_timeout_secs,
                    i.network_timeout_secs
                ));
            }
            out
        }
    }
}

/// Execute `couponload list`.
pub fn execute_list(args: &ListArgs) -> CliResult<()> {
    let registry = ScenarioRegistry::builtin(Timeouts::default());
    print!("{}", render(&describe(&registry), args.format));
    Ok(())
}
