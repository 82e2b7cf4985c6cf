use crate::config::Config;
use crate::db::Database;
use crate::{commands, Data, Error};
use poise::serenity_prelude as serenity;
use tracing::info;

/// Builds the poise framework with every command and the shared [`Data`].
pub fn framework(config: Config, db: Database) -> poise::Framework<Data, Error> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(commands::on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                let commands = &framework.options().commands;
                match config.dev_guild_id {
                    Some(guild_id) => {
                        let guild_id = serenity::GuildId::new(guild_id);
                        poise::builtins::register_in_guild(ctx, commands, guild_id).await?;
                        info!("Registered {} commands in guild {}", commands.len(), guild_id);
                    }
                    None => {
                        poise::builtins::register_globally(ctx, commands).await?;
                        info!("Registered {} commands globally", commands.len());
                    }
                }

                info!("Logged in as {} and commands synced.", ready.user.name);
                Ok(Data::new(db))
            })
        })
        .build()
}
