pub mod setchannel;
pub mod status;

use crate::{Context, Data, Error};
use std::sync::atomic::Ordering;
use tracing::error;

pub const GUILD_ONLY: &str = "Use this inside a server.";
pub const MISSING_PERMISSION: &str = "You need **Manage Server** permission to run this.";
pub const COMMAND_FAILED: &str = "❌ Something went wrong while running this command.";

/// Every slash command the bot registers
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![status::status(), setchannel::setchannel()]
}

/// Replies only visible to the invoking user
pub async fn send_private(ctx: Context<'_>, content: impl Into<String>) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(content)
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

fn has_responded(ctx: Context<'_>) -> bool {
    match ctx {
        poise::Context::Application(app) => app.has_sent_initial_response.load(Ordering::SeqCst),
        _ => false,
    }
}

/// Storage and reply failures. Denials and guild checks never get here; the
/// command bodies answer those themselves.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Command /{} failed: {}", ctx.command().name, error);
            if has_responded(ctx) {
                return;
            }
            if let Err(e) = send_private(ctx, COMMAND_FAILED).await {
                error!("Failed to report command error: {}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling framework error: {}", e);
            }
        }
    }
}
