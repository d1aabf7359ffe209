//! Delivers gateway signals to the event handlers bound to them.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::{
    commands::Invocation,
    context::BotContext,
    events::{EventHandler, Signal},
    platform::Platform,
    registry::Registry,
};

struct Binding {
    handler: Arc<dyn EventHandler>,
    detached: bool,
}

pub struct Dispatcher {
    ctx: BotContext,
    bindings: Vec<Binding>,
}

impl Dispatcher {
    /// Binds every event handler in the context's registry.
    pub fn bind(ctx: BotContext) -> Self {
        let bindings = ctx
            .registry
            .events()
            .iter()
            .map(|handler| Binding {
                handler: handler.clone(),
                detached: false,
            })
            .collect();
        Self { ctx, bindings }
    }

    /// Consumes signals until every sender has been dropped.
    pub async fn run(mut self, signals: flume::Receiver<Signal>) {
        while let Ok(signal) = signals.recv_async().await {
            self.dispatch(signal);
        }
        log::info!("Signal stream closed; dispatcher stopping");
    }

    /// Starts every attached handler for `signal` on its own task.
    pub fn dispatch(&mut self, signal: Signal) -> Vec<JoinHandle<()>> {
        let kind = signal.kind();
        let signal = Arc::new(signal);
        let mut tasks = vec![];

        for binding in &mut self.bindings {
            if binding.detached || binding.handler.signal() != kind {
                continue;
            }
            // Detach before spawning so a repeated signal can't slip in
            if binding.handler.once() {
                binding.detached = true;
            }

            let handler = binding.handler.clone();
            let ctx = self.ctx.clone();
            let signal = signal.clone();
            tasks.push(tokio::spawn(async move {
                if let Err(err) = handler.execute(&ctx, &signal).await {
                    log::error!("Error handling {kind}: {err:?}");
                }
            }));
        }

        if tasks.is_empty() {
            log::debug!("No handlers bound to {kind}");
        }
        tasks
    }
}

/// Replaces the application's entire command catalog with the registry's commands.
///
/// Returns the number of commands Discord accepted, or `None` if the call failed.
/// A failure is logged and otherwise ignored so the bot keeps serving events.
pub async fn publish(platform: &dyn Platform, registry: &Registry) -> Option<usize> {
    let mut descriptors: Vec<_> = registry.commands().map(|c| c.descriptor()).collect();
    descriptors.sort_by(|a, b| a.name.cmp(&b.name));
    let commands = descriptors
        .into_iter()
        .map(|d| d.to_discord_command())
        .collect();

    match platform.set_commands(commands).await {
        Ok(registered) => {
            log::info!(
                "Registered {} commands: {}",
                registered.len(),
                registered.join(", ")
            );
            Some(registered.len())
        }
        Err(err) => {
            log::error!("Failed to register commands: {err:?}");
            None
        }
    }
}

/// Runs the handler for the invoked command. Unknown commands are logged and ignored.
pub async fn route(ctx: &BotContext, invocation: &Invocation) -> anyhow::Result<()> {
    let Some(handler) = ctx.registry.command(&invocation.command_name) else {
        log::warn!(
            "No handler found for command `{}` (invoked by {})",
            invocation.command_name,
            invocation.user_id
        );
        return Ok(());
    };

    handler.execute(ctx, invocation).await
}
