//! `prithu-header` - drive the header logic from the command line.
//!
//! Runs searches, manages the local search history, shows the grouped
//! notification list and filters job listings.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use prithu_header::api::{HeaderApi, HttpHeaderApi};
use prithu_header::config::{self, Config};
use prithu_header::error::ResultExt;
use prithu_header::jobs::{self, JobFilter};
use prithu_header::logging;
use prithu_header::notifications::NotificationFeed;
use prithu_header::search::{SearchHistory, SearchSession, SearchTab, SearchWorker, CONFIRM_KEY};
use prithu_header::toast::{Toast, ToastVariant};

#[derive(Parser, Debug)]
#[command(name = "prithu-header", about = "Prithu header client", version)]
struct Cli {
    /// Path to the config file (default: ~/.prithu/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search categories, people and jobs
    Search {
        query: String,
        /// Result tab used when confirming
        #[arg(long, default_value = "all", value_parser = ["all", "people", "categories", "jobs"])]
        tab: String,
        /// Confirm the query as if Enter was pressed and print the destination
        #[arg(long)]
        open: bool,
    },

    /// Recent searches
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show notifications grouped by time
    Notifications {
        #[arg(long)]
        json: bool,
        /// Mark one notification as read first
        #[arg(long, value_name = "ID")]
        mark_read: Option<String>,
        /// Delete one notification first
        #[arg(long, value_name = "ID")]
        delete: Option<String>,
        #[arg(long)]
        mark_all_read: bool,
        #[arg(long)]
        delete_all: bool,
    },

    /// Filter job listings
    Jobs {
        /// Free-text query over title, company and description
        query: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        city: Option<String>,
        /// Domain slug, e.g. ui-ux-design
        #[arg(long)]
        domain: Option<String>,
        /// JSON file of listings
        #[arg(long, default_value = "data/jobs.json")]
        listings: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    List,
    Clear,
    Add { text: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    let _log_guard = logging::init(&config.get_log_dir());
    info!(api_base_url = %config.api_base_url, "prithu-header starting");

    match cli.command {
        Commands::Search { query, tab, open } => run_search(&config, &query, &tab, open),
        Commands::History { action } => run_history(&config, action),
        Commands::Notifications {
            json,
            mark_read,
            delete,
            mark_all_read,
            delete_all,
        } => run_notifications(
            &config,
            json,
            NotificationActions {
                mark_read,
                delete,
                mark_all_read,
                delete_all,
            },
        ),
        Commands::Jobs {
            query,
            category,
            country,
            city,
            domain,
            listings,
        } => run_jobs(
            &listings,
            JobFilter {
                category,
                country,
                city,
                domain,
                query,
            },
        ),
    }
}

fn parse_tab(tab: &str) -> SearchTab {
    match tab {
        "people" => SearchTab::People,
        "categories" => SearchTab::Categories,
        "jobs" => SearchTab::Jobs,
        _ => SearchTab::All,
    }
}

fn run_search(config: &Config, query: &str, tab: &str, open: bool) -> Result<()> {
    logging::log_ui_event("search", "submit", Some(query));

    let api: Arc<dyn HeaderApi> = Arc::new(HttpHeaderApi::from_config(config));
    let worker = SearchWorker::start(api, config.search_debounce());
    let guard = worker.guard().clone();
    let mut session = SearchSession::new(SearchHistory::from_config(config), worker, guard);
    session.set_active_tab(parse_tab(tab));

    session.set_query(query);
    let response = session
        .sink()
        .responses()
        .recv_blocking()
        .context("Search dispatcher stopped before answering")?;
    session.apply_response(response);

    if let Some(message) = session.last_error() {
        bail!("Search failed: {}", message);
    }

    let ranked = session.ranked();
    print_section("Categories", ranked.categories.iter().map(|c| c.name.clone()));
    print_section(
        "People",
        ranked
            .people
            .iter()
            .map(|p| format!("{} (@{})", p.name, p.user_name)),
    );
    print_section(
        "Jobs",
        ranked
            .jobs
            .iter()
            .map(|j| format!("{} at {}", j.title, j.company_name)),
    );

    if open {
        if let Some(destination) = session.on_key(CONFIRM_KEY) {
            println!("-> {}", destination);
        }
    }
    Ok(())
}

fn print_section(title: &str, rows: impl Iterator<Item = String>) {
    let rows: Vec<String> = rows.collect();
    if rows.is_empty() {
        return;
    }
    println!("{}", title);
    for row in rows {
        println!("  {}", row);
    }
}

fn run_history(config: &Config, action: HistoryAction) -> Result<()> {
    let mut history = SearchHistory::from_config(config);
    match action {
        HistoryAction::List => {
            for entry in history.load() {
                println!("{}", entry);
            }
        }
        HistoryAction::Clear => {
            history.clear()?;
            println!("Search history cleared");
        }
        HistoryAction::Add { text } => {
            history.save(&text)?;
        }
    }
    Ok(())
}

struct NotificationActions {
    mark_read: Option<String>,
    delete: Option<String>,
    mark_all_read: bool,
    delete_all: bool,
}

fn run_notifications(config: &Config, json: bool, actions: NotificationActions) -> Result<()> {
    let api: Arc<dyn HeaderApi> = Arc::new(HttpHeaderApi::from_config(config));
    let mut feed = NotificationFeed::new(api);

    let refreshed = feed.refresh();
    print_toasts(feed.toasts_mut().drain());
    refreshed.context("Could not load notifications")?;

    // Failures are rolled back and reported as toasts
    if let Some(id) = &actions.mark_read {
        feed.mark_read(id).warn_on_err();
    }
    if let Some(id) = &actions.delete {
        feed.delete(id).warn_on_err();
    }
    if actions.mark_all_read {
        feed.mark_all_read().warn_on_err();
    }
    if actions.delete_all {
        feed.delete_all().warn_on_err();
    }
    print_toasts(feed.toasts_mut().drain());

    let now = chrono::Local::now();
    let groups = feed.grouped_views(&now);

    if json {
        let body: Vec<serde_json::Value> = groups
            .iter()
            .map(|(bucket, views)| {
                serde_json::json!({ "bucket": bucket.label(), "notifications": views })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("{} unread", feed.unread_count());
    for (bucket, views) in groups {
        println!("{}", bucket.label());
        for view in views {
            let marker = if view.is_read { ' ' } else { '*' };
            println!(
                "  {} {} {} · {}",
                marker, view.sender, view.action, view.time
            );
            if let Some(excerpt) = view.excerpt {
                println!("      {}", excerpt);
            }
        }
    }
    Ok(())
}

fn print_toasts(toasts: Vec<Toast>) {
    for toast in toasts {
        match toast.variant {
            ToastVariant::Error | ToastVariant::Warning => {
                eprintln!("{} {}", toast.variant.icon(), toast.message)
            }
            _ => println!("{} {}", toast.variant.icon(), toast.message),
        }
    }
}

fn run_jobs(listings: &std::path::Path, filter: JobFilter) -> Result<()> {
    let all = jobs::load_listings(listings)?;
    let matched = jobs::filter_jobs(&all, &filter);

    println!("{} of {} jobs", matched.len(), all.len());
    for job in matched {
        println!(
            "  [{}] {} - {} ({}) {}",
            job.domain_title(),
            job.title,
            job.company,
            job.location,
            job.destination()
        );
    }
    Ok(())
}
