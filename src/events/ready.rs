use crate::{
    context::BotContext,
    dispatcher,
    events::{EventHandler, Signal, SignalKind},
};

/// Publishes the command catalog once the first handshake completes.
#[derive(Default)]
pub struct Handler;

#[serenity::async_trait]
impl EventHandler for Handler {
    fn signal(&self) -> SignalKind {
        SignalKind::Ready
    }

    fn once(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &BotContext, signal: &Signal) -> anyhow::Result<()> {
        if let Signal::Ready(ready) = signal {
            log::info!(
                "{} is connected to {} guilds; registering commands...",
                ready.user_name,
                ready.guild_count
            );
        }

        if dispatcher::publish(ctx.platform.as_ref(), &ctx.registry)
            .await
            .is_some()
        {
            log::info!("Good to go!");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        commands::testing::RecordingCommand, events::testing::ready_signal,
        platform::fake::FakePlatform, registry::Registry,
    };

    #[tokio::test]
    async fn publishes_registry_on_ready() {
        let mut registry = Registry::default();
        registry
            .insert_command("test", Arc::new(RecordingCommand::new("alpha", "a")))
            .unwrap();
        let platform = Arc::new(FakePlatform::default());
        let ctx = BotContext::for_tests(registry, platform.clone());

        Handler.execute(&ctx, &ready_signal()).await.unwrap();

        let catalog = platform.catalog().unwrap();
        assert_eq!(catalog[0]["name"], "alpha");
    }

    #[tokio::test]
    async fn registration_failure_is_not_an_error() {
        let platform = Arc::new(FakePlatform {
            fail_publish: true,
            ..Default::default()
        });
        let ctx = BotContext::for_tests(Registry::default(), platform.clone());

        assert!(Handler.execute(&ctx, &ready_signal()).await.is_ok());
        assert_eq!(*platform.publish_calls.lock().unwrap(), 1);
    }
}
