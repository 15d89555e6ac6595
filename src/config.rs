use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub const DEFAULT_MODELS: [&str; 3] = ["llama-3.1-8b-instant", "llama3-8b-8192", "mixtral-8x7b-32768"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Without it the server still drafts emails, but every send fails
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Left empty when unset; requests then fail with a configuration error
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model candidates, tried in order
    #[serde(default = "default_models")]
    pub models: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Falls back to `username`
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub tls: TlsMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    #[default]
    Starttls,
    Tls,
    None,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            models: default_models(),
        }
    }
}

impl SmtpConfig {
    pub fn sender(&self) -> &str {
        self.sender.as_deref().unwrap_or(&self.username)
    }
}

const fn default_server_port() -> u16 {
    5000
}

const fn default_smtp_port() -> u16 {
    587
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_models() -> Vec<String> {
    DEFAULT_MODELS.iter().map(ToString::to_string).collect()
}

/// Flat view of the environment, one field per variable
#[derive(Debug, Deserialize)]
struct EnvConfig {
    port: Option<u16>,
    groq_api_key: Option<String>,
    groq_base_url: Option<String>,
    groq_models: Option<Vec<String>>,
    email_host: Option<String>,
    email_port: Option<u16>,
    email_user: Option<String>,
    email_pass: Option<String>,
    email_from: Option<String>,
    email_tls: Option<TlsMode>,
}

impl From<EnvConfig> for Config {
    fn from(env: EnvConfig) -> Self {
        let models = env
            .groq_models
            .map(|models| {
                models
                    .into_iter()
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|models| !models.is_empty())
            .unwrap_or_else(default_models);

        let smtp = match (env.email_host, env.email_user, env.email_pass) {
            (Some(host), Some(username), Some(password)) => Some(SmtpConfig {
                host,
                port: env.email_port.unwrap_or_else(default_smtp_port),
                username,
                password,
                sender: env.email_from,
                tls: env.email_tls.unwrap_or_default(),
            }),
            _ => None,
        };

        Self {
            port: env.port.unwrap_or_else(default_server_port),
            provider: ProviderConfig {
                api_key: env.groq_api_key.unwrap_or_default(),
                base_url: env.groq_base_url.unwrap_or_else(default_base_url),
                models,
            },
            smtp,
        }
    }
}

fn parse_yaml(contents: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let config: Config = serde_yaml::from_str(contents)?;
    if config.provider.models.is_empty() {
        return Err("provider.models must list at least one model".into());
    }
    Ok(config)
}

fn load_from_env() -> Result<Config, Box<dyn std::error::Error>> {
    envy::from_env::<EnvConfig>()
        .map(Config::from)
        .map_err(|e| format!("Failed to read configuration from environment: {e}").into())
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path =
        env::var("MAIL_DRAFTER_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        let contents = fs::read_to_string(&config_path)?;
        return parse_yaml(&contents);
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        let contents = fs::read_to_string("config.example.yaml")?;
        return parse_yaml(&contents);
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Successfully loaded configuration from environment variables");
            Ok(config)
        }
        Err(e) => Err(format!(
            "Config file not found and environment variables are incomplete. \
             Tried: '{config_path}', 'config.example.yaml', and environment variables. \
             Error: {e}"
        )
        .into()),
    }
}
