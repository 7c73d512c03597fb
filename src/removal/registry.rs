//! Ordered provider list with a rotation cursor.
//!
//! The cursor remembers which provider last succeeded; the next removal
//! starts there instead of hammering a provider that just failed or ran
//! out of credits. This is deliberate affinity, not random load
//! balancing. The registry is a plain value owned by the caller — two
//! sessions (or two tests) with their own registries never interfere.

use super::provider::BackgroundProvider;

pub struct ProviderRegistry {
    providers: Vec<Box<dyn BackgroundProvider>>,
    cursor: usize,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            cursor: 0,
        }
    }

    pub fn from_providers(providers: Vec<Box<dyn BackgroundProvider>>) -> Self {
        Self {
            providers,
            cursor: 0,
        }
    }

    pub fn push(&mut self, provider: Box<dyn BackgroundProvider>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Display names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Index of the provider the next removal will try first.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Name of the provider at the cursor, if any are registered.
    pub fn current_provider(&self) -> Option<&str> {
        self.providers.get(self.cursor).map(|p| p.name())
    }

    pub(crate) fn get(&self, index: usize) -> &dyn BackgroundProvider {
        self.providers[index].as_ref()
    }

    pub(crate) fn set_cursor(&mut self, index: usize) {
        self.cursor = index;
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
