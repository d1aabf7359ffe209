//! The index of command and event handlers built at startup.

use std::{collections::HashMap, sync::Arc};

use crate::{
    commands::{CommandHandler, CommandSource},
    config::Configuration,
    events::{EventHandler, EventSource, SignalKind},
};

/// A source that could not be turned into a handler.
#[derive(Clone, Debug)]
pub struct Rejection {
    pub kind: &'static str,
    pub origin: String,
    pub reason: String,
}

#[derive(Default)]
pub struct Registry {
    commands: HashMap<String, Arc<dyn CommandHandler>>,
    events: Vec<Arc<dyn EventHandler>>,
    rejections: Vec<Rejection>,
}

impl Registry {
    /// Builds every source, keeping the ones that satisfy their shape contract.
    ///
    /// Never fails: a broken source is logged and skipped, and the rest still load.
    pub fn load(
        config: &Configuration,
        command_sources: &[CommandSource],
        event_sources: &[EventSource],
    ) -> Self {
        let mut registry = Self::default();

        for source in command_sources {
            let result = (source.build)(config)
                .and_then(|handler| registry.insert_command(source.origin, handler));
            registry.record("command", source.origin, result);
        }

        for source in event_sources {
            let result = (source.build)(config)
                .and_then(|handler| registry.insert_event(source.origin, handler));
            registry.record("event", source.origin, result);
        }

        log::info!(
            "Loaded {} commands and {} event handlers ({} rejected)",
            registry.commands.len(),
            registry.events.len(),
            registry.rejections.len()
        );
        for rejection in &registry.rejections {
            log::error!(
                "Skipped {} `{}`: {}",
                rejection.kind,
                rejection.origin,
                rejection.reason
            );
        }

        registry
    }

    fn record(&mut self, kind: &'static str, origin: &str, result: anyhow::Result<()>) {
        match result {
            Ok(()) => log::info!("Loaded {kind} `{origin}`"),
            Err(err) => self.rejections.push(Rejection {
                kind,
                origin: origin.to_string(),
                reason: format!("{err:#}"),
            }),
        }
    }

    /// Validates and indexes a command by name. A later command with the same
    /// name replaces the earlier one.
    pub fn insert_command(
        &mut self,
        origin: &str,
        handler: Arc<dyn CommandHandler>,
    ) -> anyhow::Result<()> {
        handler.descriptor().validate()?;

        let name = handler.name().to_string();
        if self.commands.insert(name.clone(), handler).is_some() {
            log::warn!("Command `{name}` from `{origin}` replaces an earlier definition");
        }
        Ok(())
    }

    pub fn insert_event(
        &mut self,
        origin: &str,
        handler: Arc<dyn EventHandler>,
    ) -> anyhow::Result<()> {
        // Command registration must happen exactly once per process
        if handler.signal() == SignalKind::Ready && !handler.once() {
            anyhow::bail!("once: `{origin}` binds to ready and must fire only once");
        }
        self.events.push(handler);
        Ok(())
    }

    pub fn command(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.commands.get(name).cloned()
    }

    pub fn commands(&self) -> impl Iterator<Item = &Arc<dyn CommandHandler>> {
        self.commands.values()
    }

    pub fn events(&self) -> &[Arc<dyn EventHandler>] {
        &self.events
    }

    #[cfg(test)]
    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::{self, CommandDescriptor, testing::RecordingCommand},
        events::{self, testing::CountingHandler},
    };

    fn foo(description: &str) -> anyhow::Result<Arc<dyn CommandHandler>> {
        let mut command = RecordingCommand::new("foo", "foo");
        command.descriptor.description = description.to_string();
        Ok(Arc::new(command))
    }

    fn first_foo(_: &Configuration) -> anyhow::Result<Arc<dyn CommandHandler>> {
        foo("First foo.")
    }

    fn second_foo(_: &Configuration) -> anyhow::Result<Arc<dyn CommandHandler>> {
        foo("Second foo.")
    }

    fn valid(_: &Configuration) -> anyhow::Result<Arc<dyn CommandHandler>> {
        Ok(Arc::new(RecordingCommand::new("valid", "valid")))
    }

    fn broken(_: &Configuration) -> anyhow::Result<Arc<dyn CommandHandler>> {
        anyhow::bail!("could not read source")
    }

    fn bad_name(_: &Configuration) -> anyhow::Result<Arc<dyn CommandHandler>> {
        let mut command = RecordingCommand::new("valid", "bad");
        command.descriptor = CommandDescriptor::new("Has Spaces", "Bad.");
        Ok(Arc::new(command))
    }

    fn no_description(_: &Configuration) -> anyhow::Result<Arc<dyn CommandHandler>> {
        let mut command = RecordingCommand::new("valid", "bad");
        command.descriptor = CommandDescriptor::new("nodescription", "");
        Ok(Arc::new(command))
    }

    fn repeating_ready(_: &Configuration) -> anyhow::Result<Arc<dyn EventHandler>> {
        Ok(Arc::new(CountingHandler::new(SignalKind::Ready, false)))
    }

    fn once_ready(_: &Configuration) -> anyhow::Result<Arc<dyn EventHandler>> {
        Ok(Arc::new(CountingHandler::new(SignalKind::Ready, true)))
    }

    #[test]
    fn loading_keeps_exactly_the_valid_sources() {
        let command_sources = [
            CommandSource {
                origin: "broken",
                build: broken,
            },
            CommandSource {
                origin: "valid",
                build: valid,
            },
            CommandSource {
                origin: "bad_name",
                build: bad_name,
            },
            CommandSource {
                origin: "no_description",
                build: no_description,
            },
        ];
        let event_sources = [
            EventSource {
                origin: "repeating_ready",
                build: repeating_ready,
            },
            EventSource {
                origin: "once_ready",
                build: once_ready,
            },
        ];

        let registry = Registry::load(&Configuration::default(), &command_sources, &event_sources);

        assert_eq!(registry.commands().count(), 1);
        assert!(registry.command("valid").is_some());
        assert!(registry.command("nodescription").is_none());
        assert_eq!(registry.events().len(), 1);
        assert!(registry.events()[0].once());

        let rejections = registry.rejections();
        let rejected: Vec<_> = rejections.iter().map(|r| r.origin.as_str()).collect();
        assert_eq!(
            rejected,
            vec!["broken", "bad_name", "no_description", "repeating_ready"]
        );
        assert_eq!(rejections[0].kind, "command");
        assert_eq!(rejections[3].kind, "event");
        assert!(rejections[0].reason.contains("could not read source"));
        assert!(rejections[2].reason.contains("description"));
    }

    #[test]
    fn loading_nothing_is_empty() {
        let registry = Registry::load(&Configuration::default(), &[], &[]);
        assert_eq!(registry.commands().count(), 0);
        assert!(registry.events().is_empty());
        assert!(registry.rejections().is_empty());
    }

    #[test]
    fn duplicate_command_names_last_loaded_wins() {
        let command_sources = [
            CommandSource {
                origin: "first",
                build: first_foo,
            },
            CommandSource {
                origin: "second",
                build: second_foo,
            },
        ];
        let registry = Registry::load(&Configuration::default(), &command_sources, &[]);

        assert_eq!(registry.commands().count(), 1);
        assert!(registry.rejections().is_empty());
        let survivor = registry.command("foo").unwrap();
        assert_eq!(survivor.descriptor().description, "Second foo.");
    }

    #[test]
    fn builtin_sources_load_cleanly() {
        let registry = Registry::load(
            &Configuration::default(),
            commands::SOURCES,
            events::SOURCES,
        );
        assert!(registry.rejections().is_empty());
        assert!(registry.command("membercount").is_some());
        assert_eq!(registry.events().len(), events::SOURCES.len());
    }

    #[test]
    fn invalid_accent_colour_rejects_membercount_only() {
        let mut config = Configuration::default();
        config.discord.accent_colour = "not-a-colour".to_string();

        let registry = Registry::load(&config, commands::SOURCES, events::SOURCES);
        assert!(registry.command("membercount").is_none());
        assert_eq!(registry.rejections().len(), 1);
        assert_eq!(registry.rejections()[0].origin, "membercount");
        assert_eq!(registry.events().len(), events::SOURCES.len());
    }
}
