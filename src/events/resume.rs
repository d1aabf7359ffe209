use crate::{
    context::BotContext,
    events::{EventHandler, Signal, SignalKind},
};

#[derive(Default)]
pub struct Handler;

#[serenity::async_trait]
impl EventHandler for Handler {
    fn signal(&self) -> SignalKind {
        SignalKind::Resume
    }

    async fn execute(&self, _ctx: &BotContext, _signal: &Signal) -> anyhow::Result<()> {
        log::info!("Gateway session resumed");
        Ok(())
    }
}
