use std::net::SocketAddr;

use serde::Deserialize;
use aloha_core::error::{AlohaError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AlohaError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.metrics.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// How long after startup `/readyz` keeps answering 503.
    #[serde(default = "default_ready_delay_ms")]
    pub ready_delay_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            ready_delay_ms: default_ready_delay_ms(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.ready_delay_ms > 600_000 {
            return Err(AlohaError::BadConfig(
                "server.ready_delay_ms must be between 0 and 600000".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            AlohaError::BadConfig(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8090".into()
}
fn default_ready_delay_ms() -> u64 {
    10_000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Prefix for every HTTP series name (`<subsystem>_requests_total`).
    #[serde(default = "default_subsystem")]
    pub subsystem: String,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            subsystem: default_subsystem(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        let mut chars = self.subsystem.chars();
        let ok = match chars.next() {
            None => true, // no prefix
            Some(c) => {
                (c.is_ascii_alphabetic() || c == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
        };
        if !ok {
            return Err(AlohaError::BadConfig(format!(
                "metrics.subsystem {:?} is not a valid metric name prefix",
                self.subsystem
            )));
        }
        Ok(())
    }
}

fn default_subsystem() -> String {
    "aloha".into()
}
