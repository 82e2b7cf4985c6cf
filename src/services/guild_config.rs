use crate::db::{Database, StoreResult};
use poise::serenity_prelude::{ChannelId, GuildId};
use tracing::warn;

/// Per-guild notification channel, backed by the `guild_config` table.
#[derive(Clone)]
pub struct GuildConfigService {
    db: Database,
}

impl GuildConfigService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn set_channel(&self, guild_id: GuildId, channel_id: ChannelId) -> StoreResult<()> {
        let guild_id = guild_id.to_string();
        let channel_id = channel_id.to_string();
        self.db
            .run_blocking(move |db| db.set_guild_channel(&guild_id, &channel_id))
            .await
    }

    /// `None` when the guild has never run `/setchannel`.
    pub async fn get_channel(&self, guild_id: GuildId) -> StoreResult<Option<ChannelId>> {
        let key = guild_id.to_string();
        let stored = self
            .db
            .run_blocking(move |db| db.get_guild_channel(&key))
            .await?;
        let Some(raw) = stored else {
            return Ok(None);
        };

        // Ids are always written from a ChannelId; anything else reads as unset
        match raw.parse::<u64>() {
            Ok(id) if id != 0 => Ok(Some(ChannelId::new(id))),
            _ => {
                warn!(
                    "Guild {} has an invalid stored channel id {:?}; treating it as unset",
                    guild_id, raw
                );
                Ok(None)
            }
        }
    }
}
