use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use rowdiff_engine::{diff_sections_with, diff_with, Changeset, DiffConfig, SectionedChangeset};
use tracing::debug;

use crate::cli::{Cli, Command, DiffArgs, OutputFormat};
use crate::input::{parse_items, parse_sections, JsonItem, JsonSection};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let base = load_config(cli.config.as_deref())?;
    let output = match cli.command {
        Command::Items(args) => cmd_items(&args, &base, &cli.format)?,
        Command::Sections(args) => cmd_sections(&args, &base, &cli.format)?,
    };
    print!("{output}");
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DiffConfig> {
    let Some(path) = path else {
        return Ok(DiffConfig::default());
    };
    debug!(path = %path.display(), "loading diff config");
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    DiffConfig::from_toml_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn effective_config(args: &DiffArgs, base: &DiffConfig) -> DiffConfig {
    let mut config = base.clone();
    if args.no_moves {
        config.detect_moves = false;
    }
    if args.no_updates {
        config.detect_updates = false;
    }
    if let Some(strategy) = args.strategy {
        config.move_strategy = strategy.into();
    }
    config
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn cmd_items(args: &DiffArgs, base: &DiffConfig, format: &OutputFormat) -> anyhow::Result<String> {
    let old = parse_items(&read(&args.old)?).with_context(|| format!("parsing {}", args.old.display()))?;
    let new = parse_items(&read(&args.new)?).with_context(|| format!("parsing {}", args.new.display()))?;
    debug!(old = old.len(), new = new.len(), "loaded item snapshots");
    let changes = diff_with(&old, &new, &effective_config(args, base));

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&changes)? + "\n"),
        OutputFormat::Text => Ok(render_items(&changes, &old, &new)),
    }
}

fn cmd_sections(args: &DiffArgs, base: &DiffConfig, format: &OutputFormat) -> anyhow::Result<String> {
    let old = parse_sections(&read(&args.old)?).with_context(|| format!("parsing {}", args.old.display()))?;
    let new = parse_sections(&read(&args.new)?).with_context(|| format!("parsing {}", args.new.display()))?;
    debug!(old = old.len(), new = new.len(), "loaded section snapshots");
    let changes = diff_sections_with(&old, &new, &effective_config(args, base));

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&changes)? + "\n"),
        OutputFormat::Text => Ok(render_sections(&changes, &old, &new)),
    }
}

// ---------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------

fn render_items(changes: &Changeset, old: &[JsonItem], new: &[JsonItem]) -> String {
    if changes.is_empty() {
        return "No changes.\n".to_string();
    }
    let mut out = String::new();
    write_changeset(&mut out, "", changes, |i| old[i].id.to_string(), |i| new[i].id.to_string());
    out.push_str(&format!("{}\n", summary(changes).bold()));
    out
}

fn render_sections(changes: &SectionedChangeset, old: &[JsonSection], new: &[JsonSection]) -> String {
    if changes.is_empty() {
        return "No changes.\n".to_string();
    }
    let mut out = String::new();
    if !changes.sections.is_empty() {
        out.push_str(&format!("{}\n", "sections:".bold()));
        write_changeset(&mut out, "  ", &changes.sections, |i| old[i].id.to_string(), |i| new[i].id.to_string());
    }
    for pair in changes.items.iter().filter(|p| !p.changes.is_empty()) {
        let source = &old[pair.from_section];
        let target = &new[pair.to_section];
        out.push_str(&format!("{} {}:\n", "section".bold(), target.id.to_string().cyan()));
        write_changeset(
            &mut out,
            "  ",
            &pair.changes,
            |i| source.items[i].id.to_string(),
            |i| target.items[i].id.to_string(),
        );
    }
    let nested: usize = changes.items.iter().map(|p| p.changes.len()).sum();
    let totals = format!("{}; {nested} item operation(s)", summary(&changes.sections));
    out.push_str(&format!("{}\n", totals.bold()));
    out
}

fn write_changeset(
    out: &mut String,
    indent: &str,
    changes: &Changeset,
    old_label: impl Fn(usize) -> String,
    new_label: impl Fn(usize) -> String,
) {
    for &from in &changes.deletes {
        out.push_str(&format!("{indent}{} {from} {}\n", "- delete".red(), old_label(from)));
    }
    for &to in &changes.inserts {
        out.push_str(&format!("{indent}{} {to} {}\n", "+ insert".green(), new_label(to)));
    }
    for m in &changes.moves {
        out.push_str(&format!(
            "{indent}{} {} -> {} {}\n",
            "~ move".yellow(),
            m.from,
            m.to,
            new_label(m.to)
        ));
    }
    for u in &changes.updates {
        out.push_str(&format!(
            "{indent}{} {} -> {} {}\n",
            "* update".cyan(),
            u.from,
            u.to,
            new_label(u.to)
        ));
    }
}

fn summary(changes: &Changeset) -> String {
    format!(
        "{} delete(s), {} insert(s), {} move(s), {} update(s)",
        changes.deletions(),
        changes.insertions(),
        changes.movements(),
        changes.modifications()
    )
}
