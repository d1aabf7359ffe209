use crate::{
    context::BotContext,
    dispatcher,
    events::{EventHandler, Signal, SignalKind},
};

/// Routes command invocations to their handlers.
#[derive(Default)]
pub struct Handler;

#[serenity::async_trait]
impl EventHandler for Handler {
    fn signal(&self) -> SignalKind {
        SignalKind::InteractionCreate
    }

    async fn execute(&self, ctx: &BotContext, signal: &Signal) -> anyhow::Result<()> {
        match signal {
            Signal::InteractionCreate(invocation) => dispatcher::route(ctx, invocation).await,
            _ => Ok(()),
        }
    }
}
