use anyhow::Context;
use serde::{Deserialize, Serialize};
use serenity::all::ApplicationId;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Configuration {
    pub authentication: Authentication,
    pub discord: Discord,
    pub database: Database,
}
impl Configuration {
    const FILENAME: &str = "config.toml";

    pub fn load() -> anyhow::Result<Self> {
        let config = if let Ok(file) = std::fs::read_to_string(Self::FILENAME) {
            Self::parse(&file)?
        } else {
            Self::default()
        };
        config.save()?;

        Ok(config)
    }

    fn parse(file: &str) -> anyhow::Result<Self> {
        toml::from_str(file).context("failed to load config")
    }

    fn save(&self) -> anyhow::Result<()> {
        Ok(std::fs::write(
            Self::FILENAME,
            toml::to_string_pretty(self)?,
        )?)
    }

    /// Returns the values needed to connect, rejecting anything left unset or as a placeholder.
    pub fn credentials(&self) -> anyhow::Result<Credentials> {
        let discord_token = self
            .authentication
            .discord_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !is_placeholder(token))
            .context("Expected authentication.discord_token to be filled in config")?;

        let application_id = self
            .authentication
            .application_id
            .filter(|id| *id != 0)
            .context("Expected authentication.application_id to be filled in config")?;

        Ok(Credentials {
            discord_token: discord_token.to_string(),
            application_id: ApplicationId::new(application_id),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Authentication {
    pub discord_token: Option<String>,
    pub application_id: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Discord {
    /// Six hex digits, with or without a leading '#'
    pub accent_colour: String,
}

impl Default for Discord {
    fn default() -> Self {
        Self {
            accent_colour: "5865F2".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Database {
    pub url: String,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            url: "sqlite://memberbot.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub discord_token: String,
    pub application_id: ApplicationId,
}

fn is_placeholder(value: &str) -> bool {
    let upper = value.to_ascii_uppercase();
    value.is_empty()
        || upper.starts_with("YOUR_")
        || upper.starts_with("YOUR-")
        || upper.starts_with('<')
        || upper == "CHANGEME"
        || upper == "TOKEN"
}
