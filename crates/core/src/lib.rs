pub mod agent;
pub mod analysis;
pub mod demo;
pub mod domain;
pub mod invest;
pub mod parse;
pub mod prompts;
pub mod session;
pub mod synth;
pub mod view;

#[cfg(test)]
mod testing;

pub mod config {
    use anyhow::Context;
    use std::time::Duration;

    const DEFAULT_AGENT_BASE_URL: &str = "http://localhost:8000";
    const DEFAULT_AGENT_TIMEOUT_SECS: u64 = 60;
    const DEFAULT_ANALYSIS_DELAY_MS: u64 = 500;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub agent_base_url: String,
        pub agent_timeout: Duration,
        pub analysis_delay: Duration,
        pub invest_api_url: Option<String>,
        pub invest_api_key: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                agent_base_url: DEFAULT_AGENT_BASE_URL.to_string(),
                agent_timeout: Duration::from_secs(DEFAULT_AGENT_TIMEOUT_SECS),
                analysis_delay: Duration::from_millis(DEFAULT_ANALYSIS_DELAY_MS),
                invest_api_url: None,
                invest_api_key: None,
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let timeout_secs =
                agent_timeout_secs(std::env::var("AGENT_TIMEOUT_SECS").ok().as_deref())?;
            let analysis_delay_ms = match std::env::var("ANALYSIS_DELAY_MS") {
                Ok(s) => s
                    .parse::<u64>()
                    .with_context(|| format!("ANALYSIS_DELAY_MS must be an integer (got {s})"))?,
                Err(_) => DEFAULT_ANALYSIS_DELAY_MS,
            };

            Ok(Self {
                agent_base_url: std::env::var("AGENT_BASE_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_AGENT_BASE_URL.to_string()),
                agent_timeout: Duration::from_secs(timeout_secs),
                analysis_delay: Duration::from_millis(analysis_delay_ms),
                invest_api_url: std::env::var("INVEST_API_URL").ok(),
                invest_api_key: std::env::var("INVEST_API_KEY").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn require_invest_api_url(&self) -> anyhow::Result<&str> {
            self.invest_api_url
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .context("INVEST_API_URL is required")
        }
    }

    /// Zero would give every agent request an already-expired deadline.
    fn agent_timeout_secs(raw: Option<&str>) -> anyhow::Result<u64> {
        let Some(raw) = raw else {
            return Ok(DEFAULT_AGENT_TIMEOUT_SECS);
        };
        let secs = raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("AGENT_TIMEOUT_SECS must be an integer (got {raw})"))?;
        anyhow::ensure!(secs > 0, "AGENT_TIMEOUT_SECS must be positive");
        Ok(secs)
    }

}
