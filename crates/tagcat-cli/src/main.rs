use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use serde::Serialize;

use tagcat_core::config::Config;
use tagcat_core::{
    categorize_run_tag_combinations_with_separator, categorize_tags_with_separator,
    categorize_with_separator, Category, CategoryMetadata, FilterPattern, Result, RunTagItem,
    RunToTag, TagCatError, TagItem,
};

mod args;
mod logging;
use args::{CategorizeArgs, Cli, Commands, ConfigAction, RunSelectionArgs, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);

    let result = match cli.command {
        Commands::Categorize { items, options } => handle_categorize(&base_dir, items, &options),
        Commands::Tags { selection, options } => handle_tags(&base_dir, &selection, &options),
        Commands::RunTags { selection, options } => {
            handle_run_tags(&base_dir, &selection, &options)
        }
        Commands::Config { action } => handle_config(action, &base_dir),
        Commands::Completions { shell } => {
            handle_completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "tagcat", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("TAGCAT_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".tagcat"))
        .unwrap_or_else(|| PathBuf::from(".tagcat"))
}

/// Filter and separator after applying config defaults
/// Priority: CLI options > config file > defaults
struct Resolved {
    filter: String,
    separator: String,
}

fn resolve_options(base_dir: &Path, options: &CategorizeArgs) -> Result<Resolved> {
    let config = Config::load(base_dir)?;

    let filter = options
        .filter
        .clone()
        .unwrap_or(config.categorize.default_filter);
    let separator = options
        .separator
        .clone()
        .unwrap_or(config.categorize.separator);

    if options.strict {
        if let FilterPattern::Invalid(message) = FilterPattern::compile(&filter) {
            return Err(TagCatError::InvalidFilter { filter, message });
        }
    }

    tracing::debug!(%filter, %separator, "resolved categorize options");
    Ok(Resolved { filter, separator })
}

fn handle_categorize(base_dir: &Path, items: Vec<String>, options: &CategorizeArgs) -> Result<()> {
    let resolved = resolve_options(base_dir, options)?;

    let items = if items.is_empty() {
        read_stdin_items()?
    } else {
        items
    };

    let categories = categorize_with_separator(&items, &resolved.filter, &resolved.separator);
    print_categories(&categories, options.json)
}

fn handle_tags(
    base_dir: &Path,
    selection: &RunSelectionArgs,
    options: &CategorizeArgs,
) -> Result<()> {
    let resolved = resolve_options(base_dir, options)?;
    let run_to_tag = RunToTag::load(&selection.run_to_tag)?;
    let selected = selected_runs(&run_to_tag, selection);

    let categories = categorize_tags_with_separator(
        &run_to_tag,
        &selected,
        &resolved.filter,
        &resolved.separator,
    )?;
    print_categories(&categories, options.json)
}

fn handle_run_tags(
    base_dir: &Path,
    selection: &RunSelectionArgs,
    options: &CategorizeArgs,
) -> Result<()> {
    let resolved = resolve_options(base_dir, options)?;
    let run_to_tag = RunToTag::load(&selection.run_to_tag)?;
    let selected = selected_runs(&run_to_tag, selection);

    let categories = categorize_run_tag_combinations_with_separator(
        &run_to_tag,
        &selected,
        &resolved.filter,
        &resolved.separator,
    )?;
    print_categories(&categories, options.json)
}

fn selected_runs(run_to_tag: &RunToTag, selection: &RunSelectionArgs) -> Vec<String> {
    if selection.all_runs {
        run_to_tag.runs().map(str::to_string).collect()
    } else {
        selection.runs.clone()
    }
}

/// One identifier per line; blank lines are skipped
fn read_stdin_items() -> Result<Vec<String>> {
    let mut items = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            items.push(line);
        }
    }
    Ok(items)
}

/// Terminal rendering of a single category item
trait DisplayItem {
    fn display_item(&self) -> String;
}

impl DisplayItem for String {
    fn display_item(&self) -> String {
        self.clone()
    }
}

impl DisplayItem for TagItem {
    fn display_item(&self) -> String {
        if self.runs.is_empty() {
            format!("{} {}", self.tag, "(no selected runs)".dimmed())
        } else {
            format!("{} {}", self.tag, format!("[{}]", self.runs.join(", ")).dimmed())
        }
    }
}

impl DisplayItem for RunTagItem {
    fn display_item(&self) -> String {
        format!("{} {}", self.tag, format!("@ {}", self.run).dimmed())
    }
}

fn print_categories<T>(categories: &[Category<T>], json: bool) -> Result<()>
where
    T: DisplayItem + Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(categories)?);
        return Ok(());
    }

    println!();
    for category in categories {
        let count = format!("({})", category.items.len());
        match category.metadata {
            CategoryMetadata::SearchResults {
                valid_regex,
                universal_regex,
            } => {
                let marker = if !valid_regex {
                    " [invalid regex]".red().to_string()
                } else if universal_regex {
                    " [all]".yellow().to_string()
                } else {
                    String::new()
                };
                println!(
                    "{} {} {}{}",
                    "Search:".cyan().bold(),
                    format!("{:?}", category.name).yellow(),
                    count.dimmed(),
                    marker
                );
            }
            CategoryMetadata::PrefixGroup => {
                println!("{} {}", category.name.green().bold(), count.dimmed());
            }
        }

        for item in &category.items {
            println!("  {}", item.display_item());
        }
        println!();
    }

    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(TagCatError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
