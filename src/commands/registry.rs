use super::Command;
use std::collections::HashMap;
use std::sync::Arc;

/// Fixed name → command table, built once at startup and read-only after.
pub struct CommandRegistry {
    commands: HashMap<&'static str, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.insert(command.name(), command);
    }

    /// The full built-in command set.
    pub fn with_default_commands() -> Self {
        use super::bulk::{RemoveGreaterCommand, RemoveLowerCommand};
        use super::mutate::{AddCommand, ClearCommand, RemoveByIdCommand, UpdateCommand};
        use super::persist::SaveCommand;
        use super::query::{HeadCommand, HelpCommand, HistoryCommand, InfoCommand, ShowCommand};

        let mut registry = Self::new();

        registry.register(Arc::new(AddCommand));
        registry.register(Arc::new(UpdateCommand));
        registry.register(Arc::new(RemoveByIdCommand));
        registry.register(Arc::new(ClearCommand));
        registry.register(Arc::new(RemoveGreaterCommand));
        registry.register(Arc::new(RemoveLowerCommand));
        registry.register(Arc::new(ShowCommand));
        registry.register(Arc::new(HeadCommand));
        registry.register(Arc::new(InfoCommand));
        registry.register(Arc::new(HelpCommand));
        registry.register(Arc::new(HistoryCommand));
        registry.register(Arc::new(SaveCommand));

        registry
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    /// Name → description pairs, sorted by name, for help/introspection.
    pub fn descriptions(&self) -> Vec<(&'static str, &'static str)> {
        let mut entries: Vec<_> = self
            .commands
            .values()
            .map(|c| (c.name(), c.description()))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
