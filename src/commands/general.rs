//! General REPL commands (help, quit, rules, watch)

use crate::commands::{CommandContext, CommandResult};
use chorale_core::RuleKind;
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `rules`: list every rule and whether it is enabled
pub fn cmd_rules(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let config = ctx.config();
    let lines: Vec<String> = RuleKind::ALL
        .iter()
        .map(|&rule| {
            let status = if config.is_enabled(rule) {
                "on ".bright_green()
            } else {
                "off".bright_black()
            };
            format!("  {} {}", status, rule)
        })
        .collect();
    CommandResult::Message(lines.join("\n"))
}

/// Handle `enable <rule|all>`
pub fn cmd_enable(args: &str, ctx: &mut CommandContext) -> CommandResult {
    toggle(args, ctx, true)
}

/// Handle `disable <rule|all>`
pub fn cmd_disable(args: &str, ctx: &mut CommandContext) -> CommandResult {
    toggle(args, ctx, false)
}

fn toggle(args: &str, ctx: &mut CommandContext, enable: bool) -> CommandResult {
    let verb = if enable { "enable" } else { "disable" };
    if args.is_empty() {
        return CommandResult::Error(format!("Usage: {} <rule|all>", verb));
    }

    let config = ctx.config_mut();
    if args == "all" {
        for rule in RuleKind::ALL {
            if enable {
                config.enable(rule);
            } else {
                config.disable(rule);
            }
        }
        return CommandResult::Message(format!("All rules {}d", verb));
    }

    let result = if enable {
        config.enable_by_name(args)
    } else {
        config.disable_by_name(args)
    };
    match result {
        Ok(rule) => CommandResult::Message(format!("{} {}d", rule, verb)),
        Err(e) => CommandResult::Error(format!("{} (see 'rules')", e)),
    }
}

/// Handle `watch [file]` command
pub fn cmd_watch(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: watch <file>".to_string());
    }
    CommandResult::Watch(args.to_string())
}

/// Print help information
fn print_help() {
    println!("{}", "Chorale Checker Help".bold());
    println!("{}", "====================".bold());
    println!();
    println!("{}", "Building a chorale:".green());
    println!("  {}   - Append one slice", "add <s> <a> <t> <b>".cyan());
    println!("  {}                   - Example", "add E5 G4 C4 C3".cyan());
    println!("  {}           - Load a chorale file", "load <file>".cyan());
    println!("  {}                  - Print the chorale", "show".cyan());
    println!("  {}                 - Remove all slices", "clear".cyan());
    println!("  {}                   - Start over with default settings", "new".cyan());
    println!();
    println!("{}", "Chorale files:".green());
    println!("  Four lines of pitches: soprano, alto, tenor, bass.");
    println!("  Lines starting with '#' and blank lines are ignored.");
    println!("  Pitches look like {}, {}, {} or {}.", "C4".cyan(), "F#5".cyan(), "Bb3".cyan(), "E-5".cyan());
    println!();
    println!("{}", "Checking:".green());
    println!("  {}                 - Run every enabled rule", "check".cyan());
    println!("  {}          - Voice-leading rules only", "check voices".cyan());
    println!("  {}         - Progression grammar only", "check harmony".cyan());
    println!("  {}                - Label each chord", "chords".cyan());
    println!("  {}                   - Show the key", "key".cyan());
    println!("  {}      - Fix the key (e.g. 'key g minor')", "key <key>".cyan());
    println!("  {}              - Detect the key again", "key auto".cyan());
    println!("  {}          - Check a file whenever it changes", "watch <file>".cyan());
    println!();
    println!("{}", "Rules:".green());
    println!("  {}                 - List rules", "rules".cyan());
    println!("  {}   - Turn a rule on", "enable <rule|all>".cyan());
    println!("  {}  - Turn a rule off", "disable <rule|all>".cyan());
    println!();
    println!("{}", "Other Commands:".green());
    println!("  {}              - Show this help", "help".bright_green());
    println!("  {}              - Exit the REPL", "quit".bright_red());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_disable() {
        let mut ctx = CommandContext::new();
        assert!(matches!(
            cmd_disable("parallel_fourths", &mut ctx),
            CommandResult::Message(_)
        ));
        assert!(!ctx.config().is_enabled(RuleKind::ParallelFourths));

        cmd_enable("parallel-fourths", &mut ctx);
        assert!(ctx.config().is_enabled(RuleKind::ParallelFourths));

        cmd_disable("all", &mut ctx);
        assert!(ctx.config().enabled.is_empty());

        assert!(matches!(cmd_enable("", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_enable("sevenths", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_watch_needs_path() {
        let mut ctx = CommandContext::new();
        assert!(matches!(cmd_watch("", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(
            cmd_watch("bach.txt", &mut ctx),
            CommandResult::Watch(path) if path == "bach.txt"
        ));
    }
}
