use std::sync::Arc;

use anyhow::Context as AnyhowContext;
use serenity::{Client, model::prelude::GatewayIntents};

mod commands;
mod config;
mod constant;
mod context;
mod dispatcher;
mod events;
mod gateway;
mod layout;
mod platform;
mod registry;
mod util;

use config::Configuration;

use crate::{
    context::BotContext, dispatcher::Dispatcher, events::Signal, gateway::Gateway,
    platform::DiscordPlatform, registry::Registry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Configuration::load()?;
    let credentials = config
        .credentials()
        .inspect_err(|err| log::error!("{err:#}"))?;

    let registry = Registry::load(&config, commands::SOURCES, events::SOURCES);

    let (signal_tx, signal_rx) = flume::unbounded::<Signal>();

    // GUILD_MEMBERS is privileged and must be enabled in the developer portal
    let mut client = Client::builder(
        &credentials.discord_token,
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS,
    )
    .application_id(credentials.application_id)
    .event_handler(Gateway::new(signal_tx))
    .await
    .context("Error creating client")?;

    let dispatcher = Dispatcher::bind(BotContext {
        registry: Arc::new(registry),
        platform: Arc::new(DiscordPlatform::new(client.http.clone())),
    });
    tokio::spawn(dispatcher.run(signal_rx));

    log::info!("Connecting to Discord...");
    client
        .start()
        .await
        .inspect_err(|why| log::error!("Client error: {why:?}"))
        .context("Client error")?;

    Ok(())
}
