pub mod bot;
pub mod commands;
pub mod config;
pub mod db;
pub mod health;
pub mod services;

/// Custom data passed to all commands
pub struct Data {
    pub guild_config: services::guild_config::GuildConfigService,
}

impl Data {
    pub fn new(db: db::Database) -> Self {
        Self {
            guild_config: services::guild_config::GuildConfigService::new(db),
        }
    }
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
