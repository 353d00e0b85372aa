use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use mysli_core::config::Config;
use mysli_core::{Categorizer, MysliError, Note, NoteFilter, NoteStore, Result};

mod args;
mod render;

use args::{Cli, Commands, ConfigAction, KeywordAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let base_dir = match resolve_base_dir(cli.base_dir) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            return ExitCode::from(e.exit_code() as u8);
        }
    };
    tracing::debug!(base_dir = %base_dir.display(), "resolved base directory");

    let quiet = cli.quiet;
    let result = match cli.command {
        Some(Commands::Add { text }) => handle_add(&base_dir, &text.join(" "), quiet),
        Some(Commands::List {
            category,
            tag,
            search,
            limit,
        }) => handle_list(
            &base_dir,
            NoteFilter {
                category,
                tag,
                query: search,
            },
            limit,
        ),
        Some(Commands::Show { id }) => handle_show(&base_dir, &id),
        Some(Commands::Edit { id, text }) => handle_edit(&base_dir, &id, &text.join(" "), quiet),
        Some(Commands::Delete { id }) => handle_delete(&base_dir, &id, quiet),
        Some(Commands::Categories) => handle_categories(&base_dir),
        Some(Commands::Categorize { text, explain }) => {
            handle_categorize(&base_dir, &text.join(" "), explain)
        }
        Some(Commands::Tags { text }) => {
            handle_tags(&text.join(" "));
            Ok(())
        }
        Some(Commands::Keyword { action }) => handle_keyword(action, &base_dir, quiet),
        Some(Commands::Recategorize { dry_run }) => handle_recategorize(&base_dir, dry_run, quiet),
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
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

/// RUST_LOG wins; otherwise --verbose => debug, --quiet => error, else warn
fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "mysli=debug,mysli_core=debug"
        } else if quiet {
            "error"
        } else {
            "warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(base) = cli_base {
        return Ok(base);
    }

    if let Ok(base) = std::env::var("MYSLI_BASE") {
        return Ok(PathBuf::from(base));
    }

    Config::default_base_dir()
}

fn load_categorizer(base_dir: &Path) -> Result<(Config, Categorizer)> {
    let config = Config::load(base_dir)?;
    let categorizer = Categorizer::from_config(&config)?;
    Ok((config, categorizer))
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
    generate(shell, &mut cmd, "mysli", &mut io::stdout());
}

fn print_note_line(note: &Note, config: &Config) {
    let when = render::format_timestamp(note.touched_at(), Utc::now(), &config.display);
    println!(
        "  {} {} {} {}",
        note.short_id().dimmed(),
        note.icon,
        render::preview(&note.content),
        format!("({}, {})", note.category, when).dimmed()
    );
}

fn handle_add(base_dir: &Path, text: &str, quiet: bool) -> Result<()> {
    let (_, categorizer) = load_categorizer(base_dir)?;
    let mut store = NoteStore::load(base_dir)?;

    let note = store.add(&categorizer, text)?.clone();
    store.save()?;

    if quiet {
        println!("{}", note.id);
        return Ok(());
    }

    println!(
        "{} {} {} {}",
        "Saved:".green(),
        note.icon,
        note.category.cyan().bold(),
        format!("({} confidence)", render::format_confidence(note.confidence)).dimmed()
    );
    println!("  id: {}", note.short_id());
    if !note.tags.is_empty() {
        println!("  tags: {}", note.tags.join(", "));
    }
    Ok(())
}

fn handle_list(base_dir: &Path, filter: NoteFilter, limit: Option<usize>) -> Result<()> {
    let config = Config::load(base_dir)?;
    let store = NoteStore::load(base_dir)?;

    if let Some(category) = &filter.category {
        let categorizer = Categorizer::from_config(&config)?;
        if categorizer.get_category(category).is_none() {
            eprintln!(
                "{} Unknown category '{}'. Available: {}",
                "[WARN]".yellow().bold(),
                category,
                categorizer.category_names().join(", ")
            );
        }
    }

    let notes = store.list(&filter);
    if notes.is_empty() {
        if store.is_empty() {
            println!("No notes yet.");
            println!();
            println!("Capture one with: mysli add <text>");
        } else {
            println!("No notes match the filter.");
        }
        return Ok(());
    }

    let shown = limit.unwrap_or(notes.len()).min(notes.len());
    println!();
    for note in notes.iter().take(shown) {
        print_note_line(note, &config);
    }
    println!();
    if shown < notes.len() {
        println!("Showing {} of {} notes", shown, notes.len());
    } else {
        println!("{} notes", notes.len());
    }
    Ok(())
}

fn handle_show(base_dir: &Path, id: &str) -> Result<()> {
    let config = Config::load(base_dir)?;
    let store = NoteStore::load(base_dir)?;
    let note = store.resolve(id)?;
    let now = Utc::now();

    println!();
    println!("{} {}", note.icon, note.category.cyan().bold());
    println!();
    println!("{}", note.content);
    println!();
    println!("  {} {}", "id:".dimmed(), note.id);
    println!(
        "  {} {}",
        "created:".dimmed(),
        render::format_timestamp(note.created_at, now, &config.display)
    );
    if let Some(updated_at) = note.updated_at {
        println!(
            "  {} {}",
            "updated:".dimmed(),
            render::format_timestamp(updated_at, now, &config.display)
        );
    }
    if !note.tags.is_empty() {
        println!("  {} {}", "tags:".dimmed(), note.tags.join(", "));
    }
    println!();
    Ok(())
}

fn handle_edit(base_dir: &Path, id: &str, text: &str, quiet: bool) -> Result<()> {
    let (_, categorizer) = load_categorizer(base_dir)?;
    let mut store = NoteStore::load(base_dir)?;

    let previous = store.resolve(id)?.category.clone();
    let note = store.update(&categorizer, id, text)?.clone();
    store.save()?;

    if quiet {
        return Ok(());
    }

    println!("{} {}", "Updated:".green(), note.short_id());
    if previous != note.category {
        println!("  category: {} -> {} {}", previous, note.icon, note.category.cyan());
    } else {
        println!("  category: {} {}", note.icon, note.category);
    }
    Ok(())
}

fn handle_delete(base_dir: &Path, id: &str, quiet: bool) -> Result<()> {
    let mut store = NoteStore::load(base_dir)?;
    let removed = store.remove(id)?;
    store.save()?;

    if !quiet {
        println!(
            "{} {} {}",
            "Deleted:".green(),
            removed.short_id(),
            render::preview(&removed.content).dimmed()
        );
    }
    Ok(())
}

fn handle_categories(base_dir: &Path) -> Result<()> {
    let (_, categorizer) = load_categorizer(base_dir)?;
    let store = NoteStore::load(base_dir)?;
    let counts = store.category_counts();
    let fallback = categorizer.store().fallback().name.clone();

    println!();
    for info in categorizer.categories() {
        let count = counts.get(&info.name).copied().unwrap_or(0);
        let description = categorizer
            .get_category(&info.name)
            .map(|c| c.description.as_str())
            .unwrap_or_default();
        let marker = if info.name == fallback { " (fallback)" } else { "" };
        println!(
            "  {} {:<12} {:>4}  {}{}",
            info.icon,
            info.name.cyan().bold(),
            count,
            description.dimmed(),
            marker.dimmed()
        );
    }
    println!();
    Ok(())
}

fn handle_categorize(base_dir: &Path, text: &str, explain: bool) -> Result<()> {
    let (_, categorizer) = load_categorizer(base_dir)?;
    let result = categorizer.categorize(text);

    println!(
        "{} {} {}",
        result.icon,
        result.category.cyan().bold(),
        format!("({} confidence)", render::format_confidence(result.confidence)).dimmed()
    );

    if explain {
        println!();
        for score in categorizer.scores(text) {
            let line = format!(
                "  {} {:<12} {:>3}  keywords: {}  patterns: {}",
                score.icon, score.name, score.score, score.keyword_hits, score.pattern_hits
            );
            if score.name == result.category && score.score > 0 {
                println!("{}", line.green());
            } else if score.score == 0 {
                println!("{}", line.dimmed());
            } else {
                println!("{}", line);
            }
        }
        println!();
    }
    Ok(())
}

fn handle_tags(text: &str) {
    for tag in mysli_core::extract_tags(text) {
        println!("{}", tag);
    }
}

fn handle_keyword(action: KeywordAction, base_dir: &Path, quiet: bool) -> Result<()> {
    match action {
        KeywordAction::Add { category, keyword } => {
            let (mut config, mut categorizer) = load_categorizer(base_dir)?;
            if !categorizer.add_keyword(&category, &keyword) {
                eprintln!(
                    "{} Unknown category '{}', nothing added. Available: {}",
                    "[WARN]".yellow().bold(),
                    category,
                    categorizer.category_names().join(", ")
                );
                return Ok(());
            }
            config.add_keyword(&category, &keyword);
            config.save(base_dir)?;
            if !quiet {
                println!(
                    "{} {} -> {}",
                    "Added:".green(),
                    keyword.to_lowercase(),
                    category.cyan()
                );
            }
        }
        KeywordAction::List { category } => {
            let (_, categorizer) = load_categorizer(base_dir)?;
            match categorizer.get_category(&category) {
                Some(def) => {
                    for keyword in &def.keywords {
                        println!("{}", keyword);
                    }
                }
                None => {
                    eprintln!(
                        "{} Unknown category '{}'. Available: {}",
                        "[WARN]".yellow().bold(),
                        category,
                        categorizer.category_names().join(", ")
                    );
                }
            }
        }
    }
    Ok(())
}

fn handle_recategorize(base_dir: &Path, dry_run: bool, quiet: bool) -> Result<()> {
    let (_, categorizer) = load_categorizer(base_dir)?;
    let mut store = NoteStore::load(base_dir)?;

    if dry_run {
        for note in store.all() {
            let result = categorizer.categorize(&note.content);
            if result.category != note.category {
                println!(
                    "  {} {} -> {} {}",
                    note.short_id().dimmed(),
                    note.category,
                    result.icon,
                    result.category.cyan()
                );
            }
        }
        return Ok(());
    }

    let changed = store.recategorize_all(&categorizer);
    store.save()?;
    if !quiet {
        println!(
            "{} {} of {} notes changed category",
            "Recategorized:".green(),
            changed,
            store.len()
        );
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
                    return Err(MysliError::ConfigKeyNotFound { key });
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
