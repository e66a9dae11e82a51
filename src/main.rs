use anyhow::{Context, Result};
use clap::Parser;
use quickbyte::browser::view::{self, ViewModel};
use quickbyte::browser::{Browser, BrowserEvent};
use quickbyte::config::Config;
use quickbyte::gateway::NewsGateway;
use quickbyte::session::{SessionProvider, SharedSession};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use url::Url;

/// Get the default config file path (~/.config/quickbyte/config.toml)
fn get_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("quickbyte")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "quickbyte", about = "Terminal client for the QuickByte news aggregator")]
struct Args {
    /// Path to the config file (default: ~/.config/quickbyte/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Backend base URL (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Authenticated user ID. Session management is external; pass the ID
    /// of an already-registered user to browse favorites.
    #[arg(long)]
    user_id: Option<String>,

    /// Display name for the session
    #[arg(long, default_value = "reader")]
    username: String,

    /// Articles per page (overrides the config file)
    #[arg(long)]
    page_size: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => get_config_path()?,
    };
    let config = Config::load(&config_path).context("Failed to load configuration")?;

    let base_url = args.base_url.unwrap_or_else(|| config.base_url.clone());
    let base_url =
        Url::parse(&base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;
    let page_size = args.page_size.unwrap_or(config.page_size);

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(30))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .context("Failed to build HTTP client")?;

    let gateway = Arc::new(NewsGateway::new(
        client,
        base_url,
        config.country.clone(),
        config.sort_by.clone(),
        Duration::from_secs(config.timeout_secs),
    ));

    let session = SharedSession::new();
    if let Some(user_id) = &args.user_id {
        session.login(user_id, &args.username);
        println!("Browsing as {} ({})", args.username, user_id);
    } else {
        println!("Browsing anonymously (pass --user-id to use favorites)");
    }

    let (event_tx, mut event_rx) = mpsc::channel::<BrowserEvent>(32);
    let session_capability: Arc<dyn SessionProvider> = session.clone();
    let mut browser = Browser::new(gateway, session_capability, page_size, event_tx);
    browser.start();

    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                browser.handle_event(event);
                render(&view::project(&browser));
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else { break };
                if !handle_command(&mut browser, &session, line.trim()) {
                    break;
                }
                render(&view::project(&browser));
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Dispatch one command line. Returns false when the user quits.
fn handle_command(browser: &mut Browser, session: &SharedSession, line: &str) -> bool {
    let (cmd, rest) = match line.split_once(' ') {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match cmd {
        "q" | "quit" => return false,
        "h" => browser.select_headlines(),
        "s" => browser.submit_search(rest),
        "c" => {
            if rest.is_empty() {
                println!("Usage: c <category>  (e.g. c Sports)");
            } else {
                browser.select_category(rest);
            }
        }
        "f" => browser.select_favorites(),
        "n" => browser.next_page(),
        "p" => browser.previous_page(),
        "r" => browser.refresh(),
        "t" => match article_at(browser, rest) {
            Some(article) => browser.toggle_favorite(&article),
            None => println!("Usage: t <article number>"),
        },
        "o" => match article_at(browser, rest) {
            Some(article) => {
                if let Err(e) = open::that(&article.url) {
                    println!("Could not open {}: {}", article.url, e);
                }
            }
            None => println!("Usage: o <article number>"),
        },
        "x" => {
            // Simulate the session-expiry signal from the session owner.
            session.expire();
            browser.handle_session_expired();
            println!("Session expired.");
        }
        "?" | "help" => print_help(),
        "" => {}
        _ => println!("Unknown command '{cmd}' (? for help)"),
    }
    true
}

/// Resolve a 1-based article number against the displayed list.
fn article_at(browser: &Browser, arg: &str) -> Option<quickbyte::model::Article> {
    let index: usize = arg.parse().ok()?;
    browser.articles().get(index.checked_sub(1)?).cloned()
}

fn print_help() {
    println!("Commands:");
    println!("  h              top headlines");
    println!("  s <query>      search articles");
    println!("  c <category>   browse a category");
    println!("  f              my favorites");
    println!("  n / p          next / previous page");
    println!("  t <num>        toggle favorite for article <num>");
    println!("  o <num>        open article <num> in the browser");
    println!("  r              refresh current view");
    println!("  x              simulate session expiry");
    println!("  q              quit");
}

fn render(vm: &ViewModel) {
    println!();
    println!("== {} (page {}) ==", vm.title, vm.page);

    if vm.loading {
        println!("Loading...");
    }
    if let Some(error) = &vm.error {
        println!("! {error}");
    }
    if let Some(message) = &vm.empty_message {
        println!("{message}");
    }

    for (index, card) in vm.cards.iter().enumerate() {
        let marker = if card.favorite { "*" } else { " " };
        let source = card.article.source_name.as_deref().unwrap_or("unknown");
        let date = card
            .article
            .published_at
            .as_deref()
            .map(|d| d.split('T').next().unwrap_or(d))
            .unwrap_or("");
        println!("{marker}{:>3}. {} ({source} {date})", index + 1, card.article.title);
        if let Some(description) = &card.article.description {
            println!("      {description}");
        }
    }

    if vm.show_pagination {
        let prev = if vm.can_go_previous { "p=prev" } else { "at first page" };
        let next = if vm.can_go_next { "n=next" } else { "end of results" };
        println!("-- {prev} | {next} --");
    }
}
