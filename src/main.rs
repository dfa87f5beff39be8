use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use cineflix_client::{
    api::HttpBackend,
    config::Config,
    error::{AppError, AppResult},
    render,
    services::Session,
    shell::{Command, MovieRef, PrefsAction, HELP},
    storage::FileStore,
};

#[derive(Parser, Debug)]
#[command(name = "cineflix", about = "Terminal client for the CineFlix movie service")]
struct Cli {
    /// Backend base URL (overrides API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Local state file (overrides STATE_FILE)
    #[arg(long)]
    state_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cineflix_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }
    if let Some(state_file) = cli.state_file {
        config.state_file = state_file;
    }

    tracing::info!(
        api = %config.api_base_url,
        state_file = %config.state_file.display(),
        "Starting CineFlix client"
    );

    let api = HttpBackend::new(
        &config.api_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let storage = FileStore::new(&config.state_file, config.storage_quota_bytes);

    let mut session = Session::new(Arc::new(api), Arc::new(storage));
    if let Err(e) = session.start().await {
        tracing::error!(error = %e, "Error loading movies");
    }
    print!("{}", render::movies(&session.state().movies));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"cineflix> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        if let Err(e) = dispatch(&mut session, command).await {
            println!("{}", e);
        }
    }

    Ok(())
}

/// Resolves a listing position to the movie's title and genre
fn resolve(session: &Session, target: MovieRef) -> AppResult<(String, String)> {
    match target {
        MovieRef::Title(title) => Ok((title, String::new())),
        MovieRef::Index(index) => session
            .state()
            .movies
            .get(index - 1)
            .map(|movie| (movie.title.clone(), movie.genre.clone()))
            .ok_or_else(|| {
                AppError::InvalidInput(format!("no movie #{} in the current listing", index))
            }),
    }
}

async fn dispatch(session: &mut Session, command: Command) -> AppResult<()> {
    match command {
        Command::Search(text) => print!("{}", render::movies(session.set_search(&text).await?)),
        Command::Genre(genre) => print!("{}", render::movies(session.set_genre(&genre).await?)),
        Command::Ott(ott) => print!("{}", render::movies(session.set_ott(&ott).await?)),
        Command::Similar(target) => {
            let (title, genre) = resolve(session, target)?;
            let movies = session
                .recommendations(&title, Some(genre.as_str()))
                .await?;
            let parallel = session.state().parallel_universe;
            print!("{}", render::recommendations(&title, parallel, &movies));
        }
        Command::Parallel => {
            let (on, movies) = session.toggle_parallel_universe().await?;
            println!(
                "🌌 Parallel Universe {}",
                if on { "ON" } else { "OFF" }
            );
            if let (Some(movies), Some(title)) = (movies, session.state().selected_movie.as_deref()) {
                print!("{}", render::recommendations(title, on, &movies));
            }
        }
        Command::Like(target) => {
            let (title, genre) = resolve(session, target)?;
            session.like(&title, &genre).await?;
            println!("✓ liked {}", title);
        }
        Command::Song(song) => {
            println!("🎵 Analyzing song vibe...");
            print!("{}", render::song_analysis(&session.analyze_song(&song).await?));
        }
        Command::Profile => print!("{}", render::profile(&session.profile().await?)),
        Command::Prefs(PrefsAction::Show) => {
            let genres = session.load_preferences().await?.to_vec();
            if genres.is_empty() {
                println!("No favourite genres yet.");
            } else {
                println!("Favourite genres: {}", genres.join(", "));
            }
        }
        Command::Prefs(PrefsAction::Toggle(genre)) => {
            let on = session.toggle_genre(&genre);
            println!("{} {}", if on { "+" } else { "-" }, genre);
        }
        Command::Prefs(PrefsAction::Save) => {
            session.save_preferences().await?;
            println!("Preferences saved ✅");
            print!("{}", render::movies(&session.state().movies));
        }
        Command::Chat(message) => {
            if let Some(reply) = session.send_chat(&message).await {
                println!("[bot] {}", reply);
            }
        }
        Command::History => print!("{}", render::transcript(session.open_chat())),
        Command::Login { email, password } => {
            let response = session.login(&email, &password).await?;
            println!(
                "{}",
                response.message.as_deref().unwrap_or("Login result.")
            );
            if response.is_success() {
                print!("{}", render::movies(&session.state().movies));
            }
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let response = session.register(&username, &email, &password).await?;
            println!(
                "{}",
                response.message.as_deref().unwrap_or("Registration completed.")
            );
        }
        Command::Logout => {
            session.logout().await;
            println!("Logged out.");
        }
        Command::WhoAmI => match session.state().identity() {
            Some(name) => println!("Logged in as {}", name),
            None => println!("Browsing as guest"),
        },
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }

    Ok(())
}
