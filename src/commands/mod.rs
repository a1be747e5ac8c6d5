//! Command registry for REPL commands
//!
//! Provides a clean, extensible pattern for handling REPL commands.

pub mod chorale;
pub mod general;

use anyhow::{Context, Result};
use chorale_core::{CheckerConfig, Chorale, ChoraleChecker, Report};
use std::path::{Path, PathBuf};

/// Result of executing a command
#[derive(Debug)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// Input did not match any command
    NotACommand,
    /// Error occurred
    Error(String),
    /// Watch a file for changes
    Watch(String),
}

impl From<Result<String>> for CommandResult {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(message) => CommandResult::Message(message),
            Err(e) => CommandResult::Error(format!("{:#}", e)),
        }
    }
}

/// State shared by command handlers: the chorale being edited and the
/// checker settings
pub struct CommandContext {
    pub chorale: Chorale,
    pub checker: ChoraleChecker,
    /// File the current chorale was loaded from
    pub source: Option<PathBuf>,
}

impl CommandContext {
    pub fn new() -> Self {
        Self {
            chorale: Chorale::new(),
            checker: ChoraleChecker::default(),
            source: None,
        }
    }

    pub fn config(&self) -> &CheckerConfig {
        self.checker.config()
    }

    pub fn config_mut(&mut self) -> &mut CheckerConfig {
        self.checker.config_mut()
    }

    /// Replace the current chorale with the contents of a file
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        self.chorale = read_chorale(path)?;
        self.source = Some(path.to_path_buf());
        tracing::info!(path = %path.display(), slices = self.chorale.len(), "loaded chorale");
        Ok(())
    }

    /// Run every enabled check over the current chorale
    pub fn check(&self) -> Result<Report> {
        self.checker
            .check(&self.chorale)
            .context("Nothing to check; add slices or load a file first")
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a chorale file
pub fn read_chorale(path: &Path) -> Result<Chorale> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    text.parse()
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix (e.g., "check voices")
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        // Sort by prefix length descending for longest-match-first
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = if input.len() > prefix.len() {
                    input[prefix.len()..].trim()
                } else {
                    ""
                };
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Chorale editing
    registry.register("new", chorale::cmd_new);
    registry.register("add", chorale::cmd_add);
    registry.register("load", chorale::cmd_load);
    registry.register("show", chorale::cmd_show);
    registry.register("clear", chorale::cmd_clear);

    // Analysis
    registry.register("check voices", chorale::cmd_check_voices);
    registry.register("check harmony", chorale::cmd_check_harmony);
    registry.register("check", chorale::cmd_check);
    registry.register("chords", chorale::cmd_chords);
    registry.register("key", chorale::cmd_key);

    // Rule configuration
    registry.register("rules", general::cmd_rules);
    registry.register("enable", general::cmd_enable);
    registry.register("disable", general::cmd_disable);

    // General commands
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);
    registry.register("watch", general::cmd_watch);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_prefix_wins() {
        let registry = create_registry();
        let mut ctx = CommandContext::new();
        registry.execute("add E5 G4 C4 C3", &mut ctx);

        // "check voices" must not be routed to "check" with args "voices"
        match registry.execute("check voices", &mut ctx) {
            CommandResult::Message(msg) => assert!(!msg.contains("Key:")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_unknown_input() {
        let registry = create_registry();
        let mut ctx = CommandContext::new();
        assert!(matches!(
            registry.execute("play C4", &mut ctx),
            CommandResult::NotACommand
        ));
        // Prefix must end at a word boundary
        assert!(matches!(
            registry.execute("keys", &mut ctx),
            CommandResult::NotACommand
        ));
    }

    #[test]
    fn test_list_commands() {
        let registry = create_registry();
        let commands = registry.list_commands();
        assert!(commands.contains(&"check harmony"));
        assert!(commands.contains(&"watch"));
    }
}
