//! Doctor command - verify API keys, endpoints and configuration.

use crate::cli::Output;
use crate::config::{Settings, OPENAI_API_KEY_ENV, RAPIDAPI_KEY_ENV};
use console::style;
use std::path::Path;
use url::Url;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Tubecast Doctor");
    println!();
    println!("Checking API keys and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Keys").bold());
    let key_checks = check_api_keys(settings);
    for check in &key_checks {
        check.print();
    }
    checks.extend(key_checks);

    println!();

    println!("{}", style("Endpoints").bold());
    let endpoint_checks = check_endpoints(settings);
    for check in &endpoint_checks {
        check.print();
    }
    checks.extend(endpoint_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(config_path);
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!("{} error(s) found. Please fix them before serving.", errors));
        anyhow::bail!("doctor found {} error(s)", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Tubecast is ready to use.");
    }

    Ok(())
}

fn check_api_keys(settings: &Settings) -> Vec<CheckResult> {
    let openai = if settings.openai_api_key().is_some() {
        CheckResult::ok("OpenAI", &format!("key configured, model {}", settings.generation.model))
    } else {
        CheckResult::warning(
            "OpenAI",
            "no key, podcast copy will use the built-in template",
            &format!("Set {} or generation.api_key", OPENAI_API_KEY_ENV),
        )
    };

    let rapidapi = if settings.rapidapi_key().is_some() {
        CheckResult::ok("RapidAPI", "key configured")
    } else {
        CheckResult::warning(
            "RapidAPI",
            "no key, transcripts will use the placeholder text",
            &format!("Set {} or transcript.api_key", RAPIDAPI_KEY_ENV),
        )
    };

    vec![openai, rapidapi]
}

fn check_endpoints(settings: &Settings) -> Vec<CheckResult> {
    let mut endpoints = vec![
        ("oEmbed", settings.youtube.oembed_url.as_str()),
        ("Watch URL", settings.youtube.watch_url.as_str()),
        ("Transcript", settings.transcript.endpoint.as_str()),
    ];
    if let Some(base) = settings.generation.api_base.as_deref() {
        endpoints.push(("OpenAI base", base));
    }

    endpoints
        .into_iter()
        .map(|(name, endpoint)| check_url(name, endpoint))
        .collect()
}

fn check_url(name: &str, endpoint: &str) -> CheckResult {
    match Url::parse(endpoint) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => CheckResult::ok(name, endpoint),
        Ok(url) => CheckResult::error(
            name,
            &format!("unsupported scheme '{}'", url.scheme()),
            "Use an http:// or https:// URL",
        ),
        Err(e) => CheckResult::error(
            name,
            &format!("invalid URL '{}': {}", endpoint, e),
            "Fix the URL in your config file",
        ),
    }
}

fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: tubecast config init",
        )
    }
}
