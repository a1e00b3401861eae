use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{debug, info};

use cardio_cli::config::{AppConfig, config_path};
use cardio_cli::flow::{FlowError, PredictionFlow};
use cardio_cli::form::build_form;
use cardio_cli::summary::{config_table, fields_table};
use cardio_cli::surface::{HtmlFileTarget, TerminalSurface};
use cardio_client::{ApiConfig, PredictionClient};

use crate::cli::PredictArgs;

/// Run one submit. Returns `false` when the prediction failed; the failure
/// has already been shown to the user.
pub async fn run_predict(args: &PredictArgs, config: &AppConfig) -> Result<bool> {
    let api = resolve_api(args, &config.api);
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.report.output_dir.clone());
    let form = build_form(args.form.as_deref(), &args.fields)?;
    debug!(fields = form.len(), "form loaded");

    let client = PredictionClient::new(&api).context("create prediction client")?;
    info!(endpoint = client.endpoint(), "using predictor");

    let surface = TerminalSurface::new(io::stdout(), &output_dir);
    let mut flow = PredictionFlow::new(client, surface);
    if let Err(error) = flow.submit(&form).await {
        if let FlowError::Predict(predict) = &error {
            eprintln!("{}", predict.user_message());
        }
        return Ok(false);
    }

    if args.report {
        let generated_at = Local::now().naive_local();
        let path = report_path(&output_dir, &generated_at.format("%Y%m%d-%H%M%S").to_string());
        let mut target = HtmlFileTarget::new(path, config.report.open && !args.no_open);
        flow.print(&mut target, generated_at)
            .await
            .context("print report")?;
        println!("Report: {}", target.path().display());
    }
    Ok(true)
}

pub fn run_fields() -> Result<()> {
    println!("{}", fields_table());
    Ok(())
}

pub fn run_config(explicit: Option<&Path>, config: &AppConfig) -> Result<()> {
    let path = explicit.map(Path::to_path_buf).or_else(config_path);
    println!("{}", config_table(config, path.as_deref()));
    println!("{}", config.to_toml()?);
    Ok(())
}

/// Flags override the configuration file; `--api-url` beats `--env`.
fn resolve_api(args: &PredictArgs, file: &ApiConfig) -> ApiConfig {
    let mut api = file.clone();
    if let Some(env) = args.env {
        api = ApiConfig::for_environment(env.into());
    }
    if let Some(url) = &args.api_url {
        api.base_url = Some(url.clone());
    }
    api
}

fn report_path(output_dir: &Path, stamp: &str) -> PathBuf {
    output_dir.join(format!("heart-risk-report-{stamp}.html"))
}
