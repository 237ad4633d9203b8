use std::{net::SocketAddr, str::FromStr};

use thiserror::Error;

/// Deployment target for the binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(ConfigError::UnknownEnvironment {
                value: other.to_string(),
            }),
        }
    }
}

/// Minimal configuration blob compiled into the binary.
#[derive(Clone, Copy)]
pub struct AppConfig {
    pub env: Environment,
    pub listen_addr: SocketAddr,
}

impl AppConfig {
    pub fn load(env: Environment) -> Self {
        Self {
            env,
            listen_addr: listen_addr_for(env),
        }
    }

    pub fn env_label(&self) -> &'static str {
        match self.env {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

fn listen_addr_for(env: Environment) -> SocketAddr {
    match env {
        Environment::Dev => "127.0.0.1:8080".parse().expect("valid listen addr"),
        Environment::Prod => "0.0.0.0:8080".parse().expect("valid listen addr"),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown environment {value:?} (expected dev or prod)")]
    UnknownEnvironment { value: String },
}
