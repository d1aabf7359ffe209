use std::{fmt, sync::Arc};

use crate::{commands::Invocation, config::Configuration, context::BotContext};

pub mod interaction_create;
pub mod ready;
pub mod resume;

/// Details of a completed gateway handshake
#[derive(Clone, Debug)]
pub struct ReadyInfo {
    pub user_name: String,
    pub guild_count: usize,
}

/// A gateway event, reduced to what the handlers need.
#[derive(Clone, Debug)]
pub enum Signal {
    Ready(ReadyInfo),
    InteractionCreate(Invocation),
    Resume,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Ready,
    InteractionCreate,
    Resume,
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::Ready(_) => SignalKind::Ready,
            Signal::InteractionCreate(_) => SignalKind::InteractionCreate,
            Signal::Resume => SignalKind::Resume,
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SignalKind::Ready => "ready",
            SignalKind::InteractionCreate => "interaction_create",
            SignalKind::Resume => "resume",
        })
    }
}

#[serenity::async_trait]
pub trait EventHandler: Send + Sync {
    fn signal(&self) -> SignalKind;
    async fn execute(&self, ctx: &BotContext, signal: &Signal) -> anyhow::Result<()>;

    /// Whether the binding is dropped after its first firing
    fn once(&self) -> bool {
        false
    }
}

/// A named constructor for an event handler.
pub struct EventSource {
    pub origin: &'static str,
    pub build: fn(&Configuration) -> anyhow::Result<Arc<dyn EventHandler>>,
}

pub const SOURCES: &[EventSource] = &[
    EventSource {
        origin: "ready",
        build: stateless::<ready::Handler>,
    },
    EventSource {
        origin: "interaction_create",
        build: stateless::<interaction_create::Handler>,
    },
    EventSource {
        origin: "resume",
        build: stateless::<resume::Handler>,
    },
];

fn stateless<H: EventHandler + Default + 'static>(
    _config: &Configuration,
) -> anyhow::Result<Arc<dyn EventHandler>> {
    Ok(Arc::new(H::default()))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sources_build() {
        let config = Configuration::default();
        let handlers: Vec<_> = SOURCES
            .iter()
            .map(|source| (source.build)(&config).unwrap())
            .collect();

        let ready: Vec<_> = handlers
            .iter()
            .filter(|h| h.signal() == SignalKind::Ready)
            .collect();
        assert_eq!(ready.len(), 1);
        assert!(ready[0].once());

        let interaction = handlers
            .iter()
            .find(|h| h.signal() == SignalKind::InteractionCreate)
            .unwrap();
        assert!(!interaction.once());
    }

    #[test]
    fn signal_names() {
        assert_eq!(testing::ready_signal().kind().to_string(), "ready");
        assert_eq!(Signal::Resume.kind().to_string(), "resume");
    }
}
