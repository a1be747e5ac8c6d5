//! Chorale editing and analysis commands

use crate::commands::{CommandContext, CommandResult};
use anyhow::{anyhow, bail, Context, Result};
use chorale_core::types::Slice;
use chorale_core::{Chorale, Key, Pitch};
use colored::*;
use std::path::Path;

/// Handle `new`: start an empty chorale with default settings
pub fn cmd_new(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    *ctx = CommandContext::new();
    CommandResult::Message("Started a new chorale".bright_green().to_string())
}

/// Handle `add <soprano> <alto> <tenor> <bass>`
pub fn cmd_add(args: &str, ctx: &mut CommandContext) -> CommandResult {
    add_slice(args, ctx).into()
}

fn add_slice(args: &str, ctx: &mut CommandContext) -> Result<String> {
    let pitches = args
        .split_whitespace()
        .map(|token| token.parse::<Pitch>())
        .collect::<chorale_core::Result<Vec<Pitch>>>()?;
    let &[soprano, alto, tenor, bass] = pitches.as_slice() else {
        bail!("Usage: add <soprano> <alto> <tenor> <bass>");
    };

    ctx.chorale.push(Slice::new(soprano, alto, tenor, bass));
    Ok(format!(
        "Added slice {}: {} {} {} {}",
        ctx.chorale.len() - 1,
        soprano,
        alto,
        tenor,
        bass
    ))
}

/// Handle `load <file>`
pub fn cmd_load(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: load <file>".to_string());
    }
    let result = ctx.load_file(Path::new(args)).map(|_| {
        format!(
            "Loaded {} slices from {}",
            ctx.chorale.len(),
            args.bright_green()
        )
    });
    result.into()
}

/// Handle `show`
pub fn cmd_show(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    if ctx.chorale.is_empty() {
        return CommandResult::Message("Chorale is empty".bright_black().to_string());
    }
    CommandResult::Message(ctx.chorale.to_string())
}

/// Handle `clear`: drop every slice but keep the settings
pub fn cmd_clear(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.chorale = Chorale::new();
    ctx.source = None;
    CommandResult::Message("Cleared".to_string())
}

/// Handle `check`
pub fn cmd_check(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.check().map(|report| report.to_string()).into()
}

/// Handle `check voices`
pub fn cmd_check_voices(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.checker
        .check_voice_leading(&ctx.chorale)
        .map(|report| report.to_string())
        .context("Nothing to check")
        .into()
}

/// Handle `check harmony`
pub fn cmd_check_harmony(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.checker
        .check_harmony(&ctx.chorale)
        .map(|report| report.to_string())
        .context("Nothing to check")
        .into()
}

/// Handle `chords`: list each slice with its label
pub fn cmd_chords(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    list_chords(ctx).into()
}

fn list_chords(ctx: &CommandContext) -> Result<String> {
    let key = ctx.checker.key(&ctx.chorale).context("Nothing to label")?;
    let labels = ctx.checker.labels(&ctx.chorale, &key);

    let mut lines = vec![format!("{} {}", "Key:".bold(), key.to_string().cyan())];
    for (index, (chord, label)) in ctx.chorale.chordify().iter().zip(&labels).enumerate() {
        lines.push(format!("  {:>3}  {:<8} {}", index, label.green(), chord));
    }
    Ok(lines.join("\n"))
}

/// Handle `key [<key>|auto]`
pub fn cmd_key(args: &str, ctx: &mut CommandContext) -> CommandResult {
    set_or_show_key(args, ctx).into()
}

fn set_or_show_key(args: &str, ctx: &mut CommandContext) -> Result<String> {
    match args {
        "" => match ctx.config().key {
            Some(key) => Ok(format!("Key: {} (fixed)", key)),
            None => {
                let key = ctx.checker.key(&ctx.chorale).context("Nothing to analyze")?;
                Ok(format!("Key: {} (detected)", key))
            }
        },
        "auto" => {
            ctx.config_mut().key = None;
            Ok("Key detection enabled".to_string())
        }
        text => {
            let key: Key = text
                .parse()
                .map_err(|e| anyhow!("Invalid key '{}': {}", text, e))?;
            ctx.config_mut().key = Some(key);
            Ok(format!("Key set to {}", key.to_string().cyan()))
        }
    }
}
