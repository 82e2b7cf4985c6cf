use crate::commands::{send_private, GUILD_ONLY, MISSING_PERMISSION};
use crate::db::StoreResult;
use crate::services::guild_config::GuildConfigService;
use crate::{Context, Error};
use poise::serenity_prelude::{self as serenity, ChannelId, GuildId, Mentionable, Permissions};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetChannelOutcome {
    Saved(ChannelId),
    NotInGuild,
    Forbidden,
}

impl SetChannelOutcome {
    pub fn reply(&self) -> String {
        match self {
            SetChannelOutcome::Saved(channel_id) => {
                format!("✅ Updates will post in {}", channel_id.mention())
            }
            SetChannelOutcome::NotInGuild => GUILD_ONLY.to_string(),
            SetChannelOutcome::Forbidden => MISSING_PERMISSION.to_string(),
        }
    }
}

/// Set the channel for GitHub updates.
#[poise::command(slash_command, default_member_permissions = "MANAGE_GUILD")]
pub async fn setchannel(
    ctx: Context<'_>,
    #[description = "Channel that receives update posts"]
    #[channel_types("Text")]
    channel: serenity::GuildChannel,
) -> Result<(), Error> {
    let permissions = ctx.author_member().await.and_then(|member| member.permissions);

    let outcome = set_channel_for(
        &ctx.data().guild_config,
        ctx.guild_id(),
        permissions,
        channel.id,
    )
    .await?;

    if let SetChannelOutcome::Saved(channel_id) = outcome {
        info!(
            "{} set the update channel to {} in guild {:?}",
            ctx.author().name,
            channel_id,
            ctx.guild_id()
        );
    }

    send_private(ctx, outcome.reply()).await
}

/// Permissions come from the interaction payload, so no cache lookup is needed.
pub fn can_manage_guild(permissions: Option<Permissions>) -> bool {
    permissions.is_some_and(|p| {
        p.contains(Permissions::MANAGE_GUILD) || p.contains(Permissions::ADMINISTRATOR)
    })
}

/// Stores the mapping only for a guild invocation by someone allowed to manage it.
pub async fn set_channel_for(
    service: &GuildConfigService,
    guild_id: Option<GuildId>,
    permissions: Option<Permissions>,
    channel_id: ChannelId,
) -> StoreResult<SetChannelOutcome> {
    let Some(guild_id) = guild_id else {
        return Ok(SetChannelOutcome::NotInGuild);
    };
    if !can_manage_guild(permissions) {
        return Ok(SetChannelOutcome::Forbidden);
    }

    service.set_channel(guild_id, channel_id).await?;
    Ok(SetChannelOutcome::Saved(channel_id))
}
