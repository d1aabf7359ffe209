use std::sync::Arc;

use crate::{platform::Platform, registry::Registry};

/// Everything a handler can reach while it runs.
#[derive(Clone)]
pub struct BotContext {
    pub registry: Arc<Registry>,
    pub platform: Arc<dyn Platform>,
}

#[cfg(test)]
impl BotContext {
    pub fn for_tests(registry: Registry, platform: Arc<dyn Platform>) -> Self {
        Self {
            registry: Arc::new(registry),
            platform,
        }
    }
}
