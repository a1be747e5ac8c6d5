//! REPL (Read-Eval-Print Loop) for building and checking chorales

use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use crate::repl::watcher::FileWatcher;
use anyhow::Result;
use colored::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use notify::{Event, EventKind};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};
use std::path::{Path, PathBuf};
use std::thread;

pub mod watcher;

/// Types of events the REPL loop handles
enum ReplEvent {
    Input(Result<String, ReadlineError>),
}

/// Interactive chorale checker
pub struct Repl {
    editor: Option<DefaultEditor>,
    context: CommandContext,

    // Event channels
    tx_input: Sender<ReplEvent>,
    rx_input: Receiver<ReplEvent>,
    tx_watcher: Sender<notify::Result<Event>>,
    rx_watcher: Receiver<notify::Result<Event>>,

    // File watcher
    watcher: Option<FileWatcher>,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new() -> RustylineResult<Self> {
        let editor = DefaultEditor::new()?;
        let (tx_input, rx_input) = unbounded();
        let (tx_watcher, rx_watcher) = unbounded();

        Ok(Repl {
            editor: Some(editor),
            context: CommandContext::new(),
            tx_input,
            rx_input,
            tx_watcher,
            rx_watcher,
            watcher: None,
        })
    }

    /// Run one line of input. Returns false when the REPL should exit.
    fn handle_line(&mut self, registry: &CommandRegistry, line: &str) -> bool {
        match registry.execute(line, &mut self.context) {
            CommandResult::Success => {}
            CommandResult::Message(msg) => println!("{}", msg),
            CommandResult::Exit => {
                println!("{}", "Goodbye!".bright_cyan());
                return false;
            }
            CommandResult::Error(e) => {
                println!("{} {}", "Error:".bright_red().bold(), e.red());
            }
            CommandResult::Watch(path) => self.watch(PathBuf::from(path)),
            CommandResult::NotACommand => {
                println!(
                    "{} Unknown command '{}'. Type '{}' for a list of commands.",
                    "Error:".bright_red().bold(),
                    line,
                    "help".bright_green()
                );
            }
        }
        self.sync_watcher();
        true
    }

    /// Stop watching once the chorale no longer comes from the watched file
    fn sync_watcher(&mut self) {
        let Some(w) = &mut self.watcher else {
            return;
        };
        let Some(watched) = w.current() else {
            return;
        };
        if self.context.source.as_deref() == Some(watched) {
            return;
        }

        let watched = watched.display().to_string();
        match w.unwatch() {
            Ok(()) => println!("Stopped watching {}", watched),
            Err(e) => println!("{} Failed to stop watching {}: {}", "Error:".red(), watched, e),
        }
    }

    fn watch(&mut self, path: PathBuf) {
        let path = std::fs::canonicalize(&path).unwrap_or(path);

        // Initialize watcher if needed
        if self.watcher.is_none() {
            match FileWatcher::new(self.tx_watcher.clone()) {
                Ok(w) => self.watcher = Some(w),
                Err(e) => println!("{} Failed to create watcher: {}", "Error:".red(), e),
            }
        }

        if let Some(w) = &mut self.watcher {
            if let Err(e) = w.watch(&path) {
                println!("{} Failed to watch {}: {}", "Error:".red(), path.display(), e);
                return;
            }
            println!(
                "{} Watching {} for changes...",
                "👀".bright_cyan(),
                path.display().to_string().bright_green()
            );
            self.reload_and_check(&path);
        }
    }

    /// Reload a chorale file and print its report
    fn reload_and_check(&mut self, path: &Path) {
        if let Err(e) = self.context.load_file(path) {
            println!("{} {:#}", "Error:".red(), e);
            return;
        }
        match self.context.check() {
            Ok(report) => println!("{}", report),
            Err(e) => println!("{} {:#}", "Error:".red(), e),
        }
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!("{}", "Chorale Checker".bright_cyan().bold());
        println!(
            "Add slices with {}, or load a file with {}",
            "add E5 G4 C4 C3".cyan(),
            "load <file>".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        // Move editor to thread
        let mut editor = self
            .editor
            .take()
            .ok_or_else(|| anyhow::anyhow!("REPL is already running"))?;
        let tx_input = self.tx_input.clone();

        thread::spawn(move || loop {
            let prompt = format!("{} ", "chorale>".bright_magenta().bold());
            let readline = editor.readline(&prompt);

            match readline {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(ReplEvent::Input(Ok(line))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx_input.send(ReplEvent::Input(Err(err)));
                    break;
                }
            }
        });

        let registry = create_registry();

        loop {
            crossbeam_channel::select! {
                recv(self.rx_input) -> msg => match msg {
                    Ok(ReplEvent::Input(Ok(line))) => {
                        if line.is_empty() {
                            continue;
                        }
                        if !self.handle_line(&registry, &line) {
                            break;
                        }
                    }
                    Ok(ReplEvent::Input(Err(ReadlineError::Interrupted | ReadlineError::Eof))) => {
                        println!("{}", "Goodbye!".bright_cyan());
                        break;
                    }
                    Ok(ReplEvent::Input(Err(err))) => {
                        println!(
                            "{} {}",
                            "Error reading input:".bright_red().bold(),
                            err.to_string().red()
                        );
                        break;
                    }
                    Err(_) => break, // Channel closed
                },

                recv(self.rx_watcher) -> msg => match msg {
                    Ok(Ok(event)) => {
                        // Only care about modifications or creations
                        if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                            // Reload through the watched path so the chorale source keeps
                            // matching it, whatever form notify reports
                            let watched = self.watcher.as_ref().and_then(|w| w.current()).map(Path::to_path_buf);
                            if let Some(path) = watched {
                                println!("{} File changed: {}", "⚡".bright_yellow(), path.display());
                                self.reload_and_check(&path);
                            }
                        }
                    }
                    Ok(Err(e)) => println!("{} Watch error: {}", "Error:".red(), e),
                    Err(_) => break, // Channel closed
                }
            }
        }

        Ok(())
    }
}

/// Convenience function to start the REPL
pub fn start() -> Result<()> {
    let mut repl = Repl::new().map_err(|e| anyhow::anyhow!("Failed to initialize REPL: {}", e))?;
    repl.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repl_creation() {
        // Test that we can create a REPL instance
        let result = Repl::new();
        assert!(result.is_ok());
    }

    #[test]
    fn test_handle_line() {
        let mut repl = Repl::new().unwrap();
        let registry = create_registry();

        assert!(repl.handle_line(&registry, "add E5 G4 C4 C3"));
        assert_eq!(repl.context.chorale.len(), 1);
        assert!(repl.handle_line(&registry, "not a command"));
        assert!(!repl.handle_line(&registry, "quit"));
    }

    #[test]
    fn test_load_command_replaces_chorale() {
        let path = std::env::temp_dir().join(format!("chorale-repl-{}.txt", std::process::id()));
        std::fs::write(&path, "E5 D5 C5\nG4 G4 G4\nC4 B3 C4\nC3 G2 C3\n").unwrap();

        let mut repl = Repl::new().unwrap();
        let registry = create_registry();
        assert!(repl.handle_line(&registry, "add E5 G4 C4 C3"));
        assert!(repl.handle_line(&registry, &format!("load {}", path.display())));
        assert_eq!(repl.context.chorale.len(), 3);
        assert_eq!(repl.context.source.as_deref(), Some(path.as_path()));

        assert!(repl.handle_line(&registry, "clear"));
        assert!(repl.context.source.is_none());
        std::fs::remove_file(&path).unwrap();
    }
}
