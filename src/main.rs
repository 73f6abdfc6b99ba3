mod blockmap;
mod dates;
mod gateway;
mod highlight;
mod normalize;
mod parser;
mod store;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use comiket_types::{LocationRecord, TwitterUser};
use dates::DayFilter;
use gateway::GatewayError;
use store::BoothStore;

const STORE_FILE: &str = "output/booths.json";

#[derive(Parser)]
#[command(
    name = "comiket_extract",
    about = "Extract Comiket booth locations from social-media display names"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Booth store file
    #[arg(long, global = true, default_value = STORE_FILE)]
    store: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Extract locations from the given text
    Parse {
        /// Text to analyze, e.g. a display name
        text: Vec<String>,
        /// Emit records as JSON instead of formatted lines
        #[arg(long)]
        json: bool,
    },
    /// Fetch a post's author via oEmbed and extract from the display name
    Fetch {
        /// Post URL (twitter.com or x.com)
        url: String,
        /// Save the mappable records to the booth store
        #[arg(long)]
        save: bool,
    },
    /// Parse text and save the mappable records to the booth store
    Add {
        /// Text to analyze
        text: Vec<String>,
        /// Override the extracted date with a known date token
        #[arg(long)]
        date: Option<String>,
    },
    /// List stored booths
    List {
        /// Show only one event day
        #[arg(long, value_enum, default_value = "all")]
        day: DayFilter,
    },
    /// Toggle a stored booth's visited flag
    Visit {
        /// Booth key, e.g. 南-a-42
        key: String,
    },
    /// Remove a stored booth
    Remove {
        /// Booth key, e.g. 南-a-42
        key: String,
    },
    /// Clear the booth store
    Clear {
        /// Only reset the visited flags, keep the booths
        #[arg(long)]
        visited: bool,
    },
    /// Print the block → booth-number map highlights as JSON
    Map {
        /// Show only one event day
        #[arg(long, value_enum, default_value = "all")]
        day: DayFilter,
    },
}

fn main() {
    let cli = Cli::parse();
    let store_path = cli.store;

    match cli.command {
        Command::Parse { text, json } => run_parse(&text.join(" "), json),
        Command::Fetch { url, save } => run_fetch(&store_path, &url, save),
        Command::Add { text, date } => run_add(&store_path, &text.join(" "), date.as_deref()),
        Command::List { day } => run_list(&store_path, day),
        Command::Visit { key } => run_visit(&store_path, &key),
        Command::Remove { key } => run_remove(&store_path, &key),
        Command::Clear { visited } => run_clear(&store_path, visited),
        Command::Map { day } => run_map(&store_path, day),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  STORE FILE HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn load_store(path: &Path) -> BoothStore {
    BoothStore::load(path).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {e}", path.display());
        std::process::exit(1);
    })
}

fn save_store(store: &BoothStore, path: &Path) {
    store.save(path).unwrap_or_else(|e| {
        eprintln!("Cannot write {}: {e}", path.display());
        std::process::exit(1);
    });
    eprintln!("  {} ({} booths)", path.display(), store.entries.len());
}

fn print_records(records: &[LocationRecord], json: bool) {
    if json {
        let out = serde_json::to_string_pretty(records).unwrap_or_else(|e| {
            eprintln!("JSON serialization failed: {e}");
            std::process::exit(1);
        });
        println!("{out}");
        return;
    }

    for record in records {
        let marker = if record.is_mappable() { " " } else { "?" };
        println!("{marker} {}    (from {:?})", parser::format_location(record), record.raw);
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  PARSE / FETCH / ADD
// ═══════════════════════════════════════════════════════════════════════

fn run_parse(text: &str, json: bool) {
    let records = parser::extract_location_list(text);
    if records.is_empty() {
        eprintln!("No booth location found. Use `add` for manual entry.");
        return;
    }
    print_records(&records, json);
    for record in &records {
        if !record.is_mappable() {
            eprintln!(
                "Incomplete record from {:?} (hall/block/space needed to map it)",
                record.raw
            );
        }
    }
}

fn run_fetch(store_path: &Path, url: &str, save: bool) {
    let user = match gateway::fetch_twitter_user(url) {
        Ok(user) => user,
        Err(GatewayError::InvalidUrl) => {
            eprintln!("Not a twitter.com/x.com post URL: {url}");
            std::process::exit(1);
        }
        Err(e) => {
            // The URL was valid, so keep going with a username-only user;
            // the caller can retry the fetch later.
            eprintln!("Warning: {e}");
            let username = gateway::extract_username_from_url(url).unwrap_or_default();
            gateway::fallback_user(&username)
        }
    };

    eprintln!("@{}: {}", user.username, user.display_name);

    // The display name is where booth info usually lives; fall back to
    // the post text when the name has none.
    let mut records = parser::extract_location_list(&user.display_name);
    if records.is_empty() && !user.tweet_content.is_empty() {
        records = parser::extract_location_list(&user.tweet_content);
    }

    if records.is_empty() {
        eprintln!("No booth location found in the display name or post text.");
        return;
    }
    print_records(&records, false);

    if save {
        save_records(store_path, &records, Some(&user), Some(url));
    }
}

fn run_add(store_path: &Path, text: &str, date: Option<&str>) {
    let mut records = parser::extract_location_list(text);

    if let Some(date) = date {
        if !dates::date_pattern_regex().is_match(date) {
            eprintln!("Unknown date token {date:?} (expected e.g. 1日目, 土曜, 8/16)");
            std::process::exit(1);
        }
        for record in &mut records {
            record.date = Some(date.to_string());
        }
    }

    if records.is_empty() {
        eprintln!("No booth location found in {text:?}.");
        std::process::exit(1);
    }
    save_records(store_path, &records, None, None);
}

fn save_records(
    store_path: &Path,
    records: &[LocationRecord],
    user: Option<&TwitterUser>,
    url: Option<&str>,
) {
    let mut store = load_store(store_path);
    let added = store.add_records(records, user, url);
    let skipped = records.len() - added;
    if skipped > 0 {
        eprintln!("Skipped {skipped} incomplete record(s); add them manually with hall, block and space.");
    }
    save_store(&store, store_path);
}

// ═══════════════════════════════════════════════════════════════════════
//  STORE COMMANDS
// ═══════════════════════════════════════════════════════════════════════

fn run_list(store_path: &Path, day: DayFilter) {
    let store = load_store(store_path);
    let entries = store.entries_for_day(day);
    if entries.is_empty() {
        eprintln!("No stored booths.");
        return;
    }

    for entry in entries {
        let visited = if entry.visited { "x" } else { " " };
        let who = entry
            .user
            .as_ref()
            .map(|u| format!("  @{}", u.username))
            .unwrap_or_default();
        println!(
            "[{visited}] {}  {}{who}",
            entry.key,
            parser::format_location(&entry.location)
        );
    }
}

fn run_visit(store_path: &Path, key: &str) {
    let mut store = load_store(store_path);
    match store.toggle_visited(key) {
        Some(now) => {
            println!("{key}: {}", if now { "visited" } else { "not visited" });
            save_store(&store, store_path);
        }
        None => {
            eprintln!("No booth with key {key:?}.");
            std::process::exit(1);
        }
    }
}

fn run_remove(store_path: &Path, key: &str) {
    let mut store = load_store(store_path);
    if !store.remove(key) {
        eprintln!("No booth with key {key:?}.");
        std::process::exit(1);
    }
    save_store(&store, store_path);
}

fn run_clear(store_path: &Path, visited_only: bool) {
    let mut store = load_store(store_path);
    if visited_only {
        store.clear_visited();
    } else {
        store.clear();
    }
    save_store(&store, store_path);
}

// ═══════════════════════════════════════════════════════════════════════
//  MAP HIGHLIGHTS
// ═══════════════════════════════════════════════════════════════════════

fn run_map(store_path: &Path, day: DayFilter) {
    let store = load_store(store_path);
    let records: Vec<LocationRecord> = store
        .entries_for_day(day)
        .into_iter()
        .map(|e| e.location.clone())
        .collect();

    let highlights = highlight::booths_by_block(&records);
    let out = serde_json::to_string_pretty(&highlights).unwrap_or_else(|e| {
        eprintln!("JSON serialization failed: {e}");
        std::process::exit(1);
    });
    println!("{out}");

    for (block, booths) in &highlights {
        match blockmap::get_block_info(block) {
            Some(info) => eprintln!(
                "  {} ({} booths): {:?}",
                info.block, info.booth_count, booths
            ),
            None => eprintln!(
                "  {} (not on the venue grid): {booths:?}",
                blockmap::normalize_block_name(block)
            ),
        }
    }

    // Row overview in map order, highlighted blocks bracketed
    let highlighted: std::collections::HashSet<&str> = highlights
        .keys()
        .filter_map(|b| blockmap::get_block_info(b))
        .map(|info| info.block)
        .collect();
    let row: String = blockmap::ALL_BLOCKS_ORDER
        .iter()
        .map(|b| {
            if highlighted.contains(b) {
                format!("[{b}]")
            } else {
                format!(" {b} ")
            }
        })
        .collect();
    eprintln!("{row}");

    if let Some(focus) = store.best_entry_for(day) {
        eprintln!("Focus: {}", focus.key);
    }
}
