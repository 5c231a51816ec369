// src/main.rs
//
// Command-line front end: one subcommand per screen action

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bibliored::application::{
    AppState, BookDto, ConversationDto, ErrorResponse, MessageDto, ProfileDto, SessionDto, UiState,
};
use bibliored::config::AppConfig;
use bibliored::db::{get_connection, verify_database_integrity};
use bibliored::domain::NewUser;
use bibliored::error::AppError;
use bibliored::integrations::is_host_resolvable;

/// Catalogue your books and swap them with other readers.
#[derive(Parser)]
#[command(name = "bibliored", version, about = "Book cataloguing and exchange client")]
struct Cli {
    /// Local database file
    #[arg(long, global = true, env = "BIBLIORED_DB")]
    db: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account on the catalog backend.
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "BIBLIORED_PASSWORD")]
        password: String,
    },

    /// Log in and remember the session on this device.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BIBLIORED_PASSWORD")]
        password: String,
    },

    /// Forget the session.
    Logout,

    /// Show the logged-in user.
    Whoami,

    /// Look a book up by ISBN and add it to your catalog.
    Lookup { isbn: String },

    /// List your books.
    Library,

    /// List books offered for exchange or as gifts.
    Feed,

    /// List conversations, optionally filtered.
    Conversations {
        #[arg(long)]
        query: Option<String>,
    },

    /// Show the messages of a conversation.
    Messages { conversation_id: String },

    /// Send a message.
    Send { conversation_id: String, text: String },

    /// Contact a book's owner.
    Contact {
        user_id: String,
        user_name: String,
        title: String,
        #[arg(long)]
        cover_url: Option<String>,
    },

    /// Check database and backend reachability.
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bibliored=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env().map_err(fail)?;
    if let Some(db) = cli.db {
        config.database_path = Some(db);
    }

    let state = AppState::from_config(&config).map_err(fail)?;
    let out = Output { json: cli.json };

    match cli.command {
        Commands::Register {
            first_name,
            last_name,
            email,
            password,
        } => {
            let user = settle(
                state
                    .register
                    .create_user(NewUser {
                        first_name,
                        last_name,
                        email,
                        password,
                    })
                    .await,
            )?;
            out.line(&user, || format!("Registered {} <{}>", user.full_name(), user.email));
        }

        Commands::Login { email, password } => {
            let user = settle(state.auth.login(&email, &password).await)?;
            out.line(&user, || format!("Logged in as {}", user.full_name()));
        }

        Commands::Logout => {
            state.profile.logout().await.map_err(fail)?;
            out.line(&SessionDto::from(&state.session.session()), || "Logged out".to_string());
        }

        Commands::Whoami => match state.profile.load_profile() {
            Some(profile) => {
                let dto = ProfileDto::from(&profile);
                out.line(&dto, || format!("{} <{}>", dto.full_name, dto.email));
            }
            None => bail!("Not logged in"),
        },

        Commands::Lookup { isbn } => {
            let book = settle(state.book_lookup.load_by_isbn(&isbn).await.map_err(fail)?)?;
            let dto = BookDto::from(&book);
            out.line(&dto, || describe_book(&dto));
        }

        Commands::Library => {
            let books = settle(state.library.load_books().await.map_err(fail)?)?;
            let dtos: Vec<BookDto> = books.iter().map(BookDto::from).collect();
            out.lines(&dtos, describe_book);
        }

        Commands::Feed => {
            let books = settle(state.feed.load_feed().await)?;
            let dtos: Vec<BookDto> = books.iter().map(BookDto::from).collect();
            out.lines(&dtos, describe_book);
        }

        Commands::Conversations { query } => {
            let list = state
                .messages
                .search_conversations(query.as_deref().unwrap_or(""))
                .map_err(fail)?;
            let dtos: Vec<ConversationDto> = list.iter().map(ConversationDto::from).collect();
            out.lines(&dtos, |c| {
                let unread = if c.unread_count > 0 {
                    format!(" [{} unread]", c.unread_count)
                } else {
                    String::new()
                };
                format!("{}  {}{}: {}", c.id, c.participants, unread, c.last_message)
            });
        }

        Commands::Messages { conversation_id } => {
            let list = state.messages.load_messages(&conversation_id).map_err(fail)?;
            let dtos: Vec<MessageDto> = list.iter().map(MessageDto::from).collect();
            out.lines(&dtos, |m| format!("[{}] {}: {}", m.timestamp, m.sender, m.content));
        }

        Commands::Send {
            conversation_id,
            text,
        } => {
            let message = state
                .messages
                .send_message(&conversation_id, &text)
                .map_err(fail)?;
            let dto = MessageDto::from(&message);
            out.line(&dto, || format!("Sent {}", dto.id));
        }

        Commands::Contact {
            user_id,
            user_name,
            title,
            cover_url,
        } => {
            if state.session.current_session().is_none() {
                return Err(fail(AppError::Unauthenticated));
            }
            let id = state
                .messages
                .create_conversation_from_book(&user_id, &user_name, &title, cover_url)
                .map_err(fail)?;
            out.line(&id, || format!("Started conversation {}", id));
        }

        Commands::Doctor => doctor(&state, &config, &out).await?,
    }

    Ok(())
}

struct Output {
    json: bool,
}

impl Output {
    fn line<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) {
        if self.json {
            match serde_json::to_string_pretty(value) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("{}", e),
            }
        } else {
            println!("{}", text());
        }
    }

    fn lines<T: Serialize>(&self, values: &[T], text: impl Fn(&T) -> String) {
        if self.json {
            self.line(&values, String::new);
        } else if values.is_empty() {
            println!("(none)");
        } else {
            for value in values {
                println!("{}", text(value));
            }
        }
    }
}

fn fail(error: AppError) -> anyhow::Error {
    anyhow!(ErrorResponse::from(error).to_display_string())
}

/// Final screen state of an action as a result
fn settle<T>(state: UiState<T>) -> Result<T> {
    match state {
        UiState::Success(value) => Ok(value),
        UiState::Error(message) => Err(anyhow!(message)),
        UiState::Idle | UiState::Loading => bail!("Action did not complete"),
    }
}

fn describe_book(book: &BookDto) -> String {
    let mut text = book.title.clone();
    if !book.authors.is_empty() {
        text.push_str(&format!(" by {}", book.authors));
    }
    if let Some(isbn) = &book.isbn {
        text.push_str(&format!(" (ISBN {})", isbn));
    }
    if let Some(owner) = &book.owner {
        text.push_str(&format!(" [{}]", owner));
    }
    let offers: Vec<&str> = [(book.for_exchange, "exchange"), (book.as_gift, "gift")]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect();
    if !offers.is_empty() {
        text.push_str(&format!(" {{{}}}", offers.join(", ")));
    }
    text
}

#[derive(Serialize)]
struct Check {
    name: String,
    ok: bool,
}

async fn doctor(state: &AppState, config: &AppConfig, out: &Output) -> Result<()> {
    let mut checks = Vec::new();

    let db_ok = get_connection(&state.pool)
        .and_then(|conn| verify_database_integrity(&conn))
        .is_ok();
    checks.push(Check {
        name: "database".to_string(),
        ok: db_ok,
    });

    for (name, url) in [
        ("catalog", &config.catalog.base_url),
        ("openlibrary", &config.open_library.base_url),
    ] {
        let host = reqwest::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string));
        let ok = match host {
            Some(host) => is_host_resolvable(&host).await,
            None => false,
        };
        checks.push(Check {
            name: format!("{} ({})", name, url),
            ok,
        });
    }

    out.lines(&checks, |c| {
        format!("{:<40} {}", c.name, if c.ok { "ok" } else { "FAILED" })
    });

    if checks.iter().all(|c| c.ok) {
        Ok(())
    } else {
        bail!("Some checks failed")
    }
}
