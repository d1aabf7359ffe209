use std::sync::Arc;

use serenity::all::{CommandInteraction, GuildId, InteractionId, UserId};

use crate::{config::Configuration, context::BotContext};

pub mod descriptor;
pub mod membercount;

pub use descriptor::CommandDescriptor;

#[serenity::async_trait]
pub trait CommandHandler: Send + Sync {
    fn descriptor(&self) -> &CommandDescriptor;
    async fn execute(&self, ctx: &BotContext, invocation: &Invocation) -> anyhow::Result<()>;

    fn name(&self) -> &str {
        &self.descriptor().name
    }
}

/// A slash command invocation, detached from the gateway payload it arrived in.
#[derive(Clone, Debug)]
pub struct Invocation {
    pub id: InteractionId,
    pub token: String,
    pub command_name: String,
    /// None for DMs
    pub guild_id: Option<GuildId>,
    pub user_id: UserId,
}

impl Invocation {
    pub fn from_command(cmd: &CommandInteraction) -> Self {
        Self {
            id: cmd.id,
            token: cmd.token.clone(),
            command_name: cmd.data.name.clone(),
            guild_id: cmd.guild_id,
            user_id: cmd.user.id,
        }
    }
}

/// A named constructor for a command handler.
pub struct CommandSource {
    pub origin: &'static str,
    pub build: fn(&Configuration) -> anyhow::Result<Arc<dyn CommandHandler>>,
}

pub const SOURCES: &[CommandSource] = &[CommandSource {
    origin: "membercount",
    build: membercount::Handler::build,
}];
