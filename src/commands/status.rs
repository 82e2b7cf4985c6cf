use crate::commands::{send_private, GUILD_ONLY};
use crate::db::StoreResult;
use crate::services::guild_config::GuildConfigService;
use crate::{Context, Error};
use poise::serenity_prelude::{GuildId, Mentionable};

pub const NOT_CONFIGURED: &str = "No channel set. Use /setchannel.";

/// Show current bot configuration.
#[poise::command(slash_command)]
pub async fn status(ctx: Context<'_>) -> Result<(), Error> {
    let reply = status_reply(&ctx.data().guild_config, ctx.guild_id()).await?;
    send_private(ctx, reply).await
}

pub async fn status_reply(
    service: &GuildConfigService,
    guild_id: Option<GuildId>,
) -> StoreResult<String> {
    let Some(guild_id) = guild_id else {
        return Ok(GUILD_ONLY.to_string());
    };

    Ok(match service.get_channel(guild_id).await? {
        Some(channel_id) => format!(
            "✅ Pipeline bot alive bossmen!. Posting updates to {}",
            channel_id.mention()
        ),
        None => NOT_CONFIGURED.to_string(),
    })
}
