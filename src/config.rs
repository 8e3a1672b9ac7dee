use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::cli::Args;
use crate::data::{TokenId, DEFAULT_DELAY};
use crate::ui::styles::ColorMode;

pub const ENV_LOCALE: &str = "TOKEN_DETAIL_LOCALE";
pub const ENV_DELAY_MS: &str = "TOKEN_DETAIL_DELAY_MS";
pub const ENV_COLOR_MODE: &str = "TOKEN_DETAIL_COLOR_MODE";
pub const ENV_DATA: &str = "TOKEN_DETAIL_DATA";

const DEFAULT_TOKEN: &str = "1";
const DEFAULT_LOCALE: &str = "en";

/// Effective settings: command line first, then environment, then defaults
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub token: TokenId,
    pub data: Option<PathBuf>,
    pub delay: Duration,
    pub locale: String,
    pub color_mode: ColorMode,
}

impl Config {
    pub fn load(args: Args) -> Result<Self> {
        Self::from_sources(args, |key| std::env::var(key).ok())
    }

    fn from_sources(args: Args, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let delay = match args.delay_ms {
            Some(ms) => Duration::from_millis(ms),
            None => match env(ENV_DELAY_MS) {
                Some(raw) => Duration::from_millis(
                    raw.trim()
                        .parse()
                        .with_context(|| format!("{ENV_DELAY_MS} 无效：{raw}"))?,
                ),
                None => DEFAULT_DELAY,
            },
        };

        let color_mode = match env(ENV_COLOR_MODE) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_COLOR_MODE} 无效：{raw}（可选 green-up / red-up）"))?,
            None => ColorMode::default(),
        };

        Ok(Self {
            token: args.token.unwrap_or_else(|| TokenId::new(DEFAULT_TOKEN)),
            data: args.data.or_else(|| env(ENV_DATA).map(PathBuf::from)),
            delay,
            locale: env(ENV_LOCALE).unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            color_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(args: Args, vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_sources(args, |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(Args::default(), &[]).expect("config");
        assert_eq!(config.token, TokenId::new("1"));
        assert_eq!(config.data, None);
        assert_eq!(config.delay, DEFAULT_DELAY);
        assert_eq!(config.locale, "en");
        assert_eq!(config.color_mode, ColorMode::GreenUp);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = load(
            Args::default(),
            &[
                (ENV_DELAY_MS, "20"),
                (ENV_COLOR_MODE, "red-up"),
                (ENV_LOCALE, "zh-CN"),
                (ENV_DATA, "/tmp/tokens.json"),
            ],
        )
        .expect("config");
        assert_eq!(config.delay, Duration::from_millis(20));
        assert_eq!(config.color_mode, ColorMode::RedUp);
        assert_eq!(config.locale, "zh-CN");
        assert_eq!(config.data, Some(PathBuf::from("/tmp/tokens.json")));
    }

    #[test]
    fn arguments_override_environment() {
        let args = Args {
            token: Some(TokenId::new("2")),
            data: Some(PathBuf::from("cli.json")),
            delay_ms: Some(0),
        };
        let config = load(args, &[(ENV_DELAY_MS, "20"), (ENV_DATA, "env.json")]).expect("config");
        assert_eq!(config.token, TokenId::new("2"));
        assert_eq!(config.delay, Duration::ZERO);
        assert_eq!(config.data, Some(PathBuf::from("cli.json")));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = load(Args::default(), &[(ENV_LOCALE, "  ")]).expect("config");
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn rejects_invalid_values() {
        let err = load(Args::default(), &[(ENV_DELAY_MS, "soon")]).expect_err("bad delay");
        assert!(err.to_string().contains(ENV_DELAY_MS));

        let err = load(Args::default(), &[(ENV_COLOR_MODE, "blue")]).expect_err("bad mode");
        assert!(err.to_string().contains(ENV_COLOR_MODE));
    }
}
