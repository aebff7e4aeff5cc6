use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use url::Url;
use wisma_core::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    Http {
        base_url: Url,
        api_token: Option<String>,
        timeout: Duration,
        catalog_page_size: u32,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub backend: BackendConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parse_or(&lookup, "API_PORT", 3001_u16)?;

        let backend = match lookup("BACKEND_MODE")
            .unwrap_or_else(|| "http".to_owned())
            .as_str()
        {
            "http" => {
                let raw_base_url = required_non_empty(&lookup, "BACKEND_BASE_URL")?;
                let base_url = Url::parse(raw_base_url.as_str()).map_err(|error| {
                    AppError::Validation(format!("invalid BACKEND_BASE_URL: {error}"))
                })?;
                let timeout_secs = parse_or(&lookup, "BACKEND_TIMEOUT_SECS", 15_u64)?;
                let catalog_page_size = parse_or(&lookup, "PERMISSION_CATALOG_PAGE_SIZE", 10_000)?;

                BackendConfig::Http {
                    base_url,
                    api_token: lookup("BACKEND_API_TOKEN").filter(|value| !value.trim().is_empty()),
                    timeout: Duration::from_secs(timeout_secs.max(1)),
                    catalog_page_size,
                }
            }
            "memory" => BackendConfig::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "BACKEND_MODE must be either 'http' or 'memory', got '{other}'"
                )));
            }
        };

        Ok(Self {
            frontend_url,
            api_host,
            api_port,
            backend,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_non_empty<F>(lookup: &F, name: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name).filter(|value| !value.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        None => Ok(default),
    }
}
