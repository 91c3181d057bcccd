use crate::{cors::cors_layer, routes};
use axum::http::HeaderValue;
use rust_decimal::Decimal;
use splitbill_application::ExpenseProcessor;
use splitbill_domain::{Money, SettlementContext};
use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Server configuration read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub context: SettlementContext,
    /// `None` lets any origin call the API.
    pub allowed_origins: Option<Vec<HeaderValue>>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = parse_var(&lookup, "PORT", "a port number", DEFAULT_PORT)?;
        let bind: IpAddr = parse_var(&lookup, "BIND_ADDR", "an IP address", DEFAULT_BIND_ADDR)?;

        const EPSILON_EXPECTED: &str = "a positive decimal";
        let default_epsilon = SettlementContext::default().epsilon.as_decimal();
        let epsilon: Decimal =
            parse_var(&lookup, "SETTLEMENT_EPSILON", EPSILON_EXPECTED, default_epsilon)?;
        if epsilon <= Decimal::ZERO {
            return Err(ConfigError::Invalid {
                name: "SETTLEMENT_EPSILON",
                value: epsilon.to_string(),
                expected: EPSILON_EXPECTED,
            });
        }

        Ok(Self {
            addr: SocketAddr::new(bind, port),
            context: SettlementContext::with_epsilon(Money::from_decimal(epsilon)),
            allowed_origins: parse_origins(&lookup)?,
        })
    }
}

/// Comma-separated `CORS_ALLOWED_ORIGINS`; unset, blank or `*` means any origin.
fn parse_origins(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Option<Vec<HeaderValue>>, ConfigError> {
    const NAME: &str = "CORS_ALLOWED_ORIGINS";
    let Some(value) = lookup(NAME).filter(|value| !value.trim().is_empty()) else {
        return Ok(None);
    };
    if value.trim() == "*" {
        return Ok(None);
    }

    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
        .map_err(|_| ConfigError::Invalid {
            name: NAME,
            value: value.clone(),
            expected: "a comma-separated list of origins",
        })
}

/// Unset and blank variables fall back to `default`.
fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name).filter(|value| !value.trim().is_empty()) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name,
                value,
                expected,
            }),
    }
}

/// Initialize logging and tracing
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Run the application with proper error handling
pub async fn run() {
    init_logging();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(addr = %config.addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(
        addr = %config.addr,
        epsilon = %config.context.epsilon,
        "Server listening"
    );

    let cors = cors_layer(config.allowed_origins.as_deref());
    let app = routes::router(ExpenseProcessor::new(config.context), cors);
    if let Err(why) = axum::serve(listener, app).await {
        tracing::error!(error = %why, "Server error");
    }
}
