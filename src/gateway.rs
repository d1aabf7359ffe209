use serenity::{
    all::{Context, EventHandler, Interaction, Ready, ResumedEvent},
    async_trait,
};

use crate::{
    commands::Invocation,
    events::{ReadyInfo, Signal},
};

/// Forwards serenity's gateway events to the dispatcher.
pub struct Gateway {
    signals: flume::Sender<Signal>,
}

impl Gateway {
    pub fn new(signals: flume::Sender<Signal>) -> Self {
        Self { signals }
    }

    fn forward(&self, signal: Signal) {
        let kind = signal.kind();
        if self.signals.send(signal).is_err() {
            log::error!("Dropping {kind}: dispatcher is no longer running");
        }
    }
}

/// Only slash commands are dispatched; components, modals and the rest are dropped.
fn interaction_signal(interaction: &Interaction) -> Option<Signal> {
    match interaction {
        Interaction::Command(cmd) => Some(Signal::InteractionCreate(Invocation::from_command(cmd))),
        other => {
            log::debug!("Ignoring {:?} interaction", other.kind());
            None
        }
    }
}

#[async_trait]
impl EventHandler for Gateway {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        self.forward(Signal::Ready(ReadyInfo {
            user_name: ready.user.name.clone(),
            guild_count: ready.guilds.len(),
        }));
    }

    async fn interaction_create(&self, _ctx: Context, interaction: Interaction) {
        if let Some(signal) = interaction_signal(&interaction) {
            self.forward(signal);
        }
    }

    async fn resume(&self, _ctx: Context, _: ResumedEvent) {
        self.forward(Signal::Resume);
    }
}
