use std::sync::Arc;

use serenity::all::{Command, CreateCommand, GuildId, Http};

use crate::{commands::Invocation, constant};

/// A guild's membership as fetched from Discord.
#[derive(Clone, Debug)]
pub struct GuildRoster {
    pub id: GuildId,
    pub name: String,
    pub members: Vec<RosterMember>,
}

#[derive(Clone, Copy, Debug)]
pub struct RosterMember {
    pub bot: bool,
}

/// The Discord operations the bot relies on.
#[serenity::async_trait]
pub trait Platform: Send + Sync {
    /// Replaces every global command of the application; returns the names Discord now holds.
    async fn set_commands(&self, commands: Vec<CreateCommand>) -> anyhow::Result<Vec<String>>;
    /// Fetches the guild and its complete member list, bypassing any cache.
    async fn fetch_roster(&self, guild_id: GuildId) -> anyhow::Result<GuildRoster>;
    /// Sends the initial response to an interaction.
    async fn reply(&self, invocation: &Invocation, body: serde_json::Value) -> anyhow::Result<()>;
}

pub struct DiscordPlatform {
    http: Arc<Http>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[serenity::async_trait]
impl Platform for DiscordPlatform {
    async fn set_commands(&self, commands: Vec<CreateCommand>) -> anyhow::Result<Vec<String>> {
        let registered = Command::set_global_commands(&*self.http, commands).await?;
        Ok(registered.into_iter().map(|c| c.name).collect())
    }

    async fn fetch_roster(&self, guild_id: GuildId) -> anyhow::Result<GuildRoster> {
        let guild = self.http.get_guild(guild_id).await?;

        let mut members = Vec::new();
        let mut after: Option<u64> = None;
        loop {
            let page = self
                .http
                .get_guild_members(guild_id, Some(constant::MEMBERS_PER_REQUEST), after)
                .await?;

            let fetched_count = page.len();
            after = page.last().map(|m| m.user.id.get());
            members.extend(page.iter().map(|m| RosterMember { bot: m.user.bot }));

            // A short page means we've reached the end
            if fetched_count < constant::MEMBERS_PER_REQUEST as usize {
                break;
            }
        }

        log::debug!(
            "Fetched {} members for guild {} ({guild_id})",
            members.len(),
            guild.name
        );

        Ok(GuildRoster {
            id: guild_id,
            name: guild.name,
            members,
        })
    }

    async fn reply(&self, invocation: &Invocation, body: serde_json::Value) -> anyhow::Result<()> {
        self.http
            .create_interaction_response(invocation.id, &invocation.token, &body, vec![])
            .await?;
        Ok(())
    }
}
