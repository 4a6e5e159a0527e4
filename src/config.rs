use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DAYS: u32 = 120;
/// Ten years of history is the most the generator is asked for.
pub const MAX_DAYS: u32 = 3650;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub days: u32,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("{key} must be at most {max}, got {value}")]
    TooLarge {
        key: &'static str,
        value: u32,
        max: u32,
    },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            days: DEFAULT_DAYS,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let days = match lookup("DASHBOARD_DAYS") {
            Some(value) => parse("DASHBOARD_DAYS", value)?,
            None => DEFAULT_DAYS,
        };
        if days > MAX_DAYS {
            return Err(ConfigError::TooLarge {
                key: "DASHBOARD_DAYS",
                value: days,
                max: MAX_DAYS,
            });
        }

        let seed = match lookup("DASHBOARD_SEED") {
            Some(value) => Some(parse("DASHBOARD_SEED", value)?),
            None => None,
        };

        Ok(Self { port, days, seed })
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
