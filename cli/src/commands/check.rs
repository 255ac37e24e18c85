//! `botstrap check`: readiness report without side effects.

use std::collections::HashMap;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::preflight::run_preflight;
use crate::domain::{CheckStatus, EnvLayout, PreflightReport};
use crate::output::OutputContext;

/// Run `botstrap check`.
///
/// # Errors
///
/// Returns an error if settings cannot be resolved or any required check fails.
pub async fn run(app: &AppContext) -> Result<()> {
    let settings = app.settings(false, false)?;
    let inherited: HashMap<String, String> = std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect();
    let report =
        run_preflight(&app.fs, &app.runner, &settings, EnvLayout::host(), &inherited).await;

    print_report(&report, &app.output);

    if !report.is_ready() {
        anyhow::bail!("project is not ready to launch; fix the failed checks above");
    }
    app.output.success("ready to launch");
    Ok(())
}

fn print_report(report: &PreflightReport, ctx: &OutputContext) {
    ctx.header("Preflight");
    for item in &report.checks {
        let line = format!("{}: {}", item.name, item.detail);
        match item.status {
            CheckStatus::Pass => ctx.success(&line),
            CheckStatus::Warn => ctx.warn(&line),
            CheckStatus::Fail => ctx.error(&line),
        }
    }
}
