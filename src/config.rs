use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    pub http_host: String,
    pub http_port: u16,
    pub database_path: String,
    /// Register commands in this guild only instead of globally.
    pub dev_guild_id: Option<u64>,
}

pub const DEFAULT_HTTP_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_PATH: &str = "dev.db";

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::build()
    }

    fn build() -> anyhow::Result<Self> {
        Ok(Config {
            discord_token: env::var("DISCORD_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("DISCORD_TOKEN must be set"))?,
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: match env::var("PORT") {
                Ok(port) => port
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {:?}", port))?,
                Err(_) => DEFAULT_HTTP_PORT,
            },
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string()),
            dev_guild_id: env::var("DEV_GUILD_ID")
                .ok()
                .and_then(|id| id.trim().parse().ok())
                .filter(|id| *id != 0),
        })
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("discord_token", &"[REDACTED]")
            .field("http_host", &self.http_host)
            .field("http_port", &self.http_port)
            .field("database_path", &self.database_path)
            .field("dev_guild_id", &self.dev_guild_id)
            .finish()
    }
}
