use anyhow::{Context, Result};
use clap::Parser;
use keel_config::providers::{self, search, Activation};
use keel_config::{diagnose, ConfigLoader, EnvironmentSnapshot, ResolvedConfiguration};
use serde_json::Value as JsonValue;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{Cli, Commands, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_ref())?;

    match &cli.command {
        Some(Commands::Resolve { format, host }) => handle_resolve(&cli, *format, *host),
        Some(Commands::Check { strict }) => handle_check(&cli, *strict),
        Some(Commands::Providers) => {
            print!("{}", render_provider_table());
            Ok(())
        }
        None => {
            // If no subcommand is provided, print help
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            cmd.print_help().context("Failed to print help")?;
            println!();
            Ok(())
        }
    }
}

/// Initialize tracing on stderr so stdout only carries command output
fn init_tracing(log_level: Option<&String>) -> Result<()> {
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| {
            eprintln!("Invalid log level '{}', falling back to 'info'", level);
            EnvFilter::new("info")
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;
    debug!("Tracing initialized");
    Ok(())
}

fn loader(cli: &Cli) -> ConfigLoader {
    match &cli.prefix {
        Some(prefix) => ConfigLoader::with_prefix(prefix.clone()),
        None => ConfigLoader::new(),
    }
}

fn capture_snapshot(cli: &Cli) -> Result<EnvironmentSnapshot> {
    let snapshot = loader(cli)
        .capture(cli.env_file.as_ref())
        .context("Failed to capture deployment inputs")?;
    debug!("Captured {} inputs", snapshot.len());
    Ok(snapshot)
}

/// Handle configuration resolution
fn handle_resolve(cli: &Cli, format: OutputFormat, host: bool) -> Result<()> {
    let snapshot = capture_snapshot(cli)?;
    let config = ConfigLoader::resolve(&snapshot).context("Failed to resolve configuration")?;

    info!(
        "Resolved {} provider bindings{}",
        config.active_bindings.len(),
        if config.search_plugin.is_some() {
            " and the search plugin"
        } else {
            ""
        }
    );

    println!("{}", render_config(&config, format, host)?);
    Ok(())
}

/// Handle configuration check
fn handle_check(cli: &Cli, strict: bool) -> Result<()> {
    let snapshot = capture_snapshot(cli)?;

    let findings = diagnose(&snapshot);
    for finding in &findings {
        warn!("{}", finding);
    }

    match ConfigLoader::resolve(&snapshot) {
        Ok(config) => {
            for binding in &config.active_bindings {
                info!("{} -> {}", binding.capability, binding.provider_id);
            }
        }
        Err(e) => {
            println!("❌ Configuration is invalid: {}", e);
            error!("Configuration check failed: {}", e);
            return Err(e.into());
        }
    }

    if strict && !findings.is_empty() {
        println!("❌ {} finding(s) reported in strict mode", findings.len());
        return Err(anyhow::anyhow!(
            "{} configuration finding(s) in strict mode",
            findings.len()
        ));
    }

    println!("✅ Configuration is valid");
    Ok(())
}

/// Serialize a resolved configuration in the requested format
fn render_config(
    config: &ResolvedConfiguration,
    format: OutputFormat,
    host: bool,
) -> Result<String> {
    let value: JsonValue = if host {
        config.to_host_config()
    } else {
        serde_json::to_value(config).context("Failed to serialize config")?
    };

    match format {
        OutputFormat::Yaml => serde_yaml::to_string(&value).context("Failed to serialize to YAML"),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&value).context("Failed to serialize to JSON")
        }
    }
}

/// Tabulate the provider table in evaluation order
fn render_provider_table() -> String {
    let mut out = String::new();

    for slot in providers::slots() {
        out.push_str(&format!("{} ({:?})\n", slot.capability, slot.cardinality));
        for (priority, rule) in slot.rules.iter().enumerate() {
            out.push_str(&provider_line(priority + 1, rule.provider_id, &rule.activation));
        }
    }

    out.push_str("search plugin\n");
    out.push_str(&provider_line(1, search::PLUGIN_ID, &search::ACTIVATION));
    out
}

fn provider_line(priority: usize, provider_id: &str, activation: &Activation) -> String {
    format!(
        "  {}. {:<22} {}\n",
        priority,
        provider_id,
        describe_activation(activation)
    )
}

fn describe_activation(activation: &Activation) -> String {
    match activation {
        Activation::RequiresAll(names) => format!("requires {}", names.join(" + ")),
        Activation::Fallback => "fallback".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_config::env_keys::{
        BACKEND_URL, DATABASE_URL, S3_ACCESS_KEY_ID, S3_ENDPOINT, S3_SECRET_ACCESS_KEY,
        STRIPE_API_KEY, STRIPE_WEBHOOK_SECRET,
    };
    use keel_config::{assemble, Capability};
    use std::io::Write;
    use temp_env::with_vars;

    fn config() -> ResolvedConfiguration {
        assemble(&EnvironmentSnapshot::from_pairs([
            (DATABASE_URL, "postgres://db/shop"),
            (S3_ENDPOINT, "https://s3.test"),
            (S3_ACCESS_KEY_ID, "AKIA"),
            (S3_SECRET_ACCESS_KEY, "secret"),
        ]))
        .unwrap()
    }

    #[test]
    fn test_render_json_bindings() {
        let output = render_config(&config(), OutputFormat::Json, false).unwrap();
        let value: JsonValue = serde_json::from_str(&output).unwrap();
        assert_eq!(value["activeBindings"][0]["providerId"], "s3");
        assert_eq!(value["base"]["databaseUrl"], "postgres://db/shop");
    }

    #[test]
    fn test_render_yaml_host() {
        let output = render_config(&config(), OutputFormat::Yaml, true).unwrap();
        assert!(output.contains("projectConfig:"));
        assert!(output.contains("@medusajs/medusa/file-s3"));
    }

    #[test]
    fn test_provider_table_lists_precedence() {
        let table = render_provider_table();
        let minio = table.find("1. minio").unwrap();
        let s3 = table.find("2. s3").unwrap();
        let local = table.find("3. local").unwrap();
        assert!(minio < s3 && s3 < local);
        assert!(table.contains("fallback"));
        assert!(table.contains("requires STRIPE_API_KEY + STRIPE_WEBHOOK_SECRET"));
        assert!(table.contains("search plugin"));
    }

    #[test]
    fn test_env_file_overlaid_by_prefixed_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}: postgres://file/shop", DATABASE_URL).unwrap();
        writeln!(file, "{}: http://file.test", BACKEND_URL).unwrap();
        writeln!(file, "{}: sk_file", STRIPE_API_KEY).unwrap();
        let env_file = file.path().to_str().unwrap().to_string();

        let vars = [
            ("KEELCLI_BACKEND_URL", Some("https://env.test")),
            ("KEELCLI_STRIPE_WEBHOOK_SECRET", Some("whsec_env")),
        ];

        with_vars(vars, || {
            let cli = Cli::try_parse_from([
                "keel",
                "resolve",
                "--env-file",
                env_file.as_str(),
                "--prefix",
                "KEELCLI",
            ])
            .unwrap();

            let snapshot = capture_snapshot(&cli).unwrap();
            assert_eq!(snapshot.get(DATABASE_URL), Some("postgres://file/shop"));
            assert_eq!(snapshot.get(BACKEND_URL), Some("https://env.test"));
            assert_eq!(snapshot.get(STRIPE_WEBHOOK_SECRET), Some("whsec_env"));

            let config = ConfigLoader::resolve(&snapshot).unwrap();
            assert_eq!(config.base.network_url, "https://env.test");
            assert!(config.is_active(Capability::Payment));
        });
    }

    #[test]
    fn test_missing_env_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        let cli = Cli::try_parse_from([
            "keel",
            "check",
            "--env-file",
            missing.to_str().unwrap(),
            "--prefix",
            "KEELCLIMISSING",
        ])
        .unwrap();

        let err = capture_snapshot(&cli).unwrap_err();
        assert!(err.to_string().contains("Failed to capture deployment inputs"));
    }
}
