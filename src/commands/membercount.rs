use std::sync::Arc;

use anyhow::Context as _;
use serenity::all::Timestamp;

use crate::{
    commands::{CommandDescriptor, CommandHandler, Invocation},
    config::Configuration,
    constant,
    context::BotContext,
    layout::{Component, LayoutMessage},
    platform::GuildRoster,
    util,
};

pub struct Handler {
    descriptor: CommandDescriptor,
    accent_colour: u32,
}

impl Handler {
    pub fn new(accent_colour: u32) -> Self {
        Self {
            descriptor: CommandDescriptor::new(
                constant::commands::MEMBERCOUNT,
                "Show how many members, humans and bots this server has.",
            ),
            accent_colour,
        }
    }

    pub fn build(config: &Configuration) -> anyhow::Result<Arc<dyn CommandHandler>> {
        let accent_colour = util::parse_hex_colour(&config.discord.accent_colour)
            .context("invalid discord.accent_colour")?;
        Ok(Arc::new(Self::new(accent_colour)))
    }
}

#[serenity::async_trait]
impl CommandHandler for Handler {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, ctx: &BotContext, invocation: &Invocation) -> anyhow::Result<()> {
        let guild_id = invocation
            .guild_id
            .context("/membercount can only be used in a server")?;

        // Always refetch; the gateway cache undercounts on large guilds.
        let roster = ctx.platform.fetch_roster(guild_id).await?;
        let snapshot = MemberSnapshot::from_roster(&roster);

        let reply = build_reply(&roster, snapshot, self.accent_colour, Timestamp::now());
        let body = reply.into_interaction_response()?;
        ctx.platform.reply(invocation, body).await
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberSnapshot {
    pub total: usize,
    pub bots: usize,
    pub humans: usize,
}

impl MemberSnapshot {
    pub fn from_roster(roster: &GuildRoster) -> Self {
        let total = roster.members.len();
        let bots = roster.members.iter().filter(|m| m.bot).count();
        Self {
            total,
            bots,
            humans: total - bots,
        }
    }
}

fn build_reply(
    roster: &GuildRoster,
    snapshot: MemberSnapshot,
    accent_colour: u32,
    now: Timestamp,
) -> LayoutMessage {
    LayoutMessage::new(vec![Component::Container {
        accent_colour: Some(accent_colour),
        components: vec![
            Component::text(format!("## {}", roster.name)),
            Component::divider(),
            Component::text(format!("**Total members:** {}", snapshot.total)),
            Component::text(format!("**Humans:** {}", snapshot.humans)),
            Component::text(format!("**Bots:** {}", snapshot.bots)),
            Component::divider(),
            Component::text(format!(
                "-# Guild ID: {} • {}",
                roster.id,
                util::relative_timestamp(now)
            )),
        ],
    }])
}
