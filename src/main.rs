//! `launchdeck` - command-line front end for the launchpad state engine
//!
//! Drives the core operations (list/search, add/edit/remove, hide/show,
//! settings, backup export/import, catalog refresh) and prints the results.
//! This binary is a presentation consumer: it renders nothing, it reports.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use launchdeck::apps::record::{CustomAppDraft, Tile};
use launchdeck::catalog::HttpCatalogSource;
use launchdeck::error::{LaunchdeckError, get_user_friendly_error};
use launchdeck::sanitize::split_tag_input;
use launchdeck::storage::FileStorage;
use launchdeck::{LaunchpadStore, utils};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// Personal launchpad: catalog + custom apps, reconciled and searchable
#[derive(Parser)]
#[command(name = "launchdeck", version, about)]
struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the app grid, optionally searched and paged
    List {
        /// Search term matched against name, description, and tags
        #[arg(short, long, default_value = "")]
        search: String,
        /// Page index (desktop layout)
        #[arg(short, long, default_value_t = 0)]
        page: usize,
        /// Use the mobile layout (single continuous page)
        #[arg(long)]
        mobile: bool,
    },
    /// Add a custom app
    Add {
        /// Launch URL
        url: String,
        /// Display name; looked up from the page title when omitted
        #[arg(short, long)]
        name: Option<String>,
        /// Tile description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Icon source (http(s), data:image/, ./ or /)
        #[arg(short, long, default_value = "")]
        icon: String,
        /// Comma-separated tags
        #[arg(short, long, default_value = "")]
        tags: String,
    },
    /// Edit an existing custom app
    Edit {
        /// Id of the custom app
        id: String,
        /// New display name
        #[arg(short, long)]
        name: String,
        /// New launch URL
        #[arg(short, long)]
        url: String,
        /// New description
        #[arg(short, long, default_value = "")]
        description: String,
        /// New icon source
        #[arg(short, long, default_value = "")]
        icon: String,
        /// New comma-separated tags
        #[arg(short, long, default_value = "")]
        tags: String,
    },
    /// Remove a custom app
    Remove {
        /// Id of the custom app
        id: String,
    },
    /// Hide an app from the grid
    Hide {
        /// Id of the app
        id: String,
    },
    /// Unhide a hidden app
    Show {
        /// Id of the app
        id: String,
    },
    /// Show current settings, or apply a partial JSON update
    Settings {
        /// Partial settings object, e.g. '{"overlayOpacity": 0.4}'
        #[arg(long)]
        set: Option<String>,
    },
    /// Set the desktop tiles-per-page
    PageSize {
        /// Requested size; clamped and rounded to a valid value
        size: u32,
    },
    /// Export a backup snapshot to a JSON file
    Export {
        /// Output path (defaults to a dated filename in the current dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a backup snapshot from a JSON file
    Import {
        /// Path to the backup file
        file: PathBuf,
    },
    /// Fetch the catalog and apply it
    Refresh {
        /// Catalog endpoint serving a JSON array of app entries
        url: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(FileStorage::default_dir);

    // Logging trouble degrades to stderr; the engine never needs it
    if let Err(e) = utils::init_logging(&data_dir) {
        eprintln!("warning: logging unavailable: {e}");
    }

    let storage = Arc::new(FileStorage::new(&data_dir));
    let store = LaunchpadStore::load(storage);

    if let Err(e) = run(&cli.command, &store) {
        match e.downcast_ref::<LaunchdeckError>() {
            Some(error) => {
                eprintln!("{}", get_user_friendly_error(error));
                std::process::exit(1);
            }
            None => return Err(e),
        }
    }
    Ok(())
}

fn run(command: &Command, store: &LaunchpadStore) -> Result<()> {
    match command {
        Command::List {
            search,
            page,
            mobile,
        } => {
            let view = store.project(search, *page, *mobile);
            let page_size = store.user_data().page_size;
            for tile in view.page_tiles(*mobile, page_size) {
                match tile {
                    Tile::App(app) => {
                        let tags = if app.tags.is_empty() {
                            String::new()
                        } else {
                            format!("  [{}]", app.tags.join(", "))
                        };
                        println!("{:<24} {:<32} {}{}", app.id, app.name, app.url, tags);
                    }
                    Tile::HiddenGroup { count } => {
                        println!("{:<24} {count} hidden app(s)", "(hidden)");
                    }
                }
            }
            println!(
                "page {}/{} — {} match(es)",
                view.page + 1,
                view.total_pages,
                view.matches
            );
        }
        Command::Add {
            url,
            name,
            description,
            icon,
            tags,
        } => {
            let name = match name {
                Some(name) => name.clone(),
                None => utils::resolve_title(url)
                    .context("Could not determine a name from the page title; pass --name")?,
            };
            let record = store.add_custom_app(&CustomAppDraft {
                name,
                description: description.clone(),
                url: url.clone(),
                icon: icon.clone(),
                tags: split_tag_input(tags),
            })?;
            println!("added {} ({})", record.id, record.name);
        }
        Command::Edit {
            id,
            name,
            url,
            description,
            icon,
            tags,
        } => {
            let record = store.update_custom_app(
                id,
                &CustomAppDraft {
                    name: name.clone(),
                    description: description.clone(),
                    url: url.clone(),
                    icon: icon.clone(),
                    tags: split_tag_input(tags),
                },
            )?;
            println!("updated {} ({})", record.id, record.name);
        }
        Command::Remove { id } => {
            if store.remove_custom_app(id) {
                println!("removed {id}");
            } else {
                println!("no custom app with id {id}");
            }
        }
        Command::Hide { id } => {
            if store.hide_app(id) {
                println!("hidden {id}");
            } else {
                println!("{id} is not a visible app");
            }
        }
        Command::Show { id } => {
            if store.show_app(id) {
                println!("visible {id}");
            } else {
                println!("{id} is not hidden");
            }
        }
        Command::Settings { set } => {
            let settings = match set {
                Some(raw) => {
                    let partial = serde_json::from_str(raw)
                        .context("--set expects a JSON object, e.g. '{\"blurStrength\": 8}'")?;
                    store.apply_settings(&partial)
                }
                None => store.settings(),
            };
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Command::PageSize { size } => {
            let applied = store.set_page_size(*size);
            println!("page size set to {applied}");
        }
        Command::Export { output } => {
            let doc = store.export_backup();
            let path = output
                .clone()
                .unwrap_or_else(|| PathBuf::from(doc.suggested_filename()));
            std::fs::write(&path, serde_json::to_string_pretty(&doc)?)
                .with_context(|| format!("Failed to write backup to {}", path.display()))?;
            println!("exported to {}", path.display());
        }
        Command::Import { file } => {
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let value = serde_json::from_str(&raw).unwrap_or(serde_json::Value::Null);
            let summary = store.import_backup(&value)?;
            println!("{summary}");
        }
        Command::Refresh { url } => {
            let source = HttpCatalogSource::new(url.clone());
            match store.refresh_catalog(&source) {
                Ok(count) => println!("catalog refreshed: {count} records"),
                Err(e) => {
                    warn!("Catalog refresh failed: {}", e);
                    return Err(e.into());
                }
            }
        }
    }
    Ok(())
}
