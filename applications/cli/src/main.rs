/// Setlist - terminal client for the song/playlist catalog
use clap::{Args, Parser, Subcommand};
use setlist_cli::{App, CliConfig, SongChanges, TerminalNavigator};
use setlist_core::{NewPlaylist, Playlist, PlaylistId, Song, SongId};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "setlist")]
#[command(about = "Manage songs and playlists on a Setlist server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./setlist.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Server URL, overriding the configuration
    #[arg(long, global = true, env = "SETLIST_SERVER")]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and keep the session
    Login {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long, env = "SETLIST_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show server and session state
    Status,
    /// Song catalog
    #[command(subcommand)]
    Songs(SongCommand),
    /// Playlists and their members
    #[command(subcommand)]
    Playlists(PlaylistCommand),
}

#[derive(Subcommand)]
enum SongCommand {
    /// List all songs
    List,
    /// Add a song to the catalog
    Add {
        /// Song title
        title: String,
        #[command(flatten)]
        fields: SongFields,
    },
    /// Change fields of a song
    Edit {
        /// Song ID
        id: SongId,
        /// New title
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: SongFields,
    },
    /// Delete a song
    Delete {
        /// Song ID
        id: SongId,
    },
}

#[derive(Args)]
struct SongFields {
    #[arg(long)]
    artist: Option<String>,
    #[arg(long)]
    album: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    #[arg(long)]
    genre: Option<String>,
}

#[derive(Subcommand)]
enum PlaylistCommand {
    /// List all playlists
    List,
    /// Create an empty playlist
    Create {
        /// Playlist name
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Rename or re-describe a playlist
    Edit {
        /// Playlist ID
        id: PlaylistId,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a playlist
    Delete {
        /// Playlist ID
        id: PlaylistId,
    },
    /// Show members and the songs that can still be added
    Show {
        /// Playlist ID
        id: PlaylistId,
    },
    /// Add a catalog song to a playlist
    AddSong {
        /// Playlist ID
        id: PlaylistId,
        /// Song ID
        song: SongId,
    },
    /// Remove a song from a playlist
    RemoveSong {
        /// Playlist ID
        id: PlaylistId,
        /// Song ID
        song: SongId,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "setlist=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::load_from(cli.config.as_deref())?;
    if let Some(server) = cli.server {
        config.api.base_url = server;
    }
    config.validate()?;

    let app = App::new(
        &config,
        config.token_storage(),
        Arc::new(TerminalNavigator::new()),
    )?;

    match cli.command {
        Commands::Login { username, password } => {
            if app.login(&username, &password).await? {
                println!("Logged in as {}", username);
            } else {
                println!("Logged in as {}, but the session cannot be kept", username);
            }
        }
        Commands::Logout => {
            app.logout()?;
            println!("Logged out");
        }
        Commands::Status => {
            let status = app.status();
            println!("Server:        {}", status.server);
            println!("Logged in:     {}", if status.authenticated { "yes" } else { "no" });
            println!(
                "Session store: {}",
                if status.storage_available { "persistent" } else { "unavailable" }
            );
        }
        Commands::Songs(command) => run_songs(&app, command).await?,
        Commands::Playlists(command) => run_playlists(&app, command).await?,
    }

    Ok(())
}

async fn run_songs(app: &App, command: SongCommand) -> anyhow::Result<()> {
    match command {
        SongCommand::List => {
            let songs = app.songs().await?;
            println!("Songs:");
            for song in &songs {
                print_song(song);
            }
        }
        SongCommand::Add { title, fields } => {
            let mut song = Song::new(title);
            fields.into_changes(None).apply_to(&mut song);
            let created = app.add_song(&song).await?;
            print!("Created ");
            print_song(&created);
        }
        SongCommand::Edit { id, title, fields } => {
            let updated = app.edit_song(id, fields.into_changes(title)).await?;
            print!("Updated ");
            print_song(&updated);
        }
        SongCommand::Delete { id } => {
            app.delete_song(id).await?;
            println!("Deleted song {}", id);
        }
    }

    Ok(())
}

async fn run_playlists(app: &App, command: PlaylistCommand) -> anyhow::Result<()> {
    match command {
        PlaylistCommand::List => {
            let playlists = app.playlists().await?;
            println!("Playlists:");
            for playlist in &playlists {
                println!(
                    "  {} - {} ({} songs)",
                    playlist.id,
                    playlist.name,
                    playlist.songs.len()
                );
            }
        }
        PlaylistCommand::Create { name, description } => {
            let mut playlist = NewPlaylist::new(name);
            playlist.description = description;
            let created = app.create_playlist(&playlist).await?;
            println!("Created playlist {} - {}", created.id, created.name);
        }
        PlaylistCommand::Edit {
            id,
            name,
            description,
        } => {
            let updated = app.edit_playlist(id, name, description).await?;
            println!("Updated playlist {} - {}", updated.id, updated.name);
        }
        PlaylistCommand::Delete { id } => {
            app.delete_playlist(id).await?;
            println!("Deleted playlist {}", id);
        }
        PlaylistCommand::Show { id } => {
            let detail = app.open_playlist(id).await?;
            if let Some(playlist) = detail.playlist().await {
                print_playlist(&playlist);
            }
            println!("Available to add:");
            for song in &detail.complement().await {
                print_song(song);
            }
        }
        PlaylistCommand::AddSong { id, song } => {
            let updated = app.add_to_playlist(id, song).await?;
            print_playlist(&updated);
        }
        PlaylistCommand::RemoveSong { id, song } => {
            let updated = app.remove_from_playlist(id, song).await?;
            print_playlist(&updated);
        }
    }

    Ok(())
}

impl SongFields {
    fn into_changes(self, title: Option<String>) -> SongChanges {
        SongChanges {
            title,
            artist: self.artist,
            album: self.album,
            year: self.year,
            genre: self.genre,
        }
    }
}

fn print_song(song: &Song) {
    let id = song.id.map_or_else(|| "-".to_string(), |id| id.to_string());
    println!(
        "  {} - {} / {} / {} ({}) [{}]",
        id, song.title, song.artist, song.album, song.year, song.genre
    );
}

fn print_playlist(playlist: &Playlist) {
    println!("Playlist {} - {}", playlist.id, playlist.name);
    if let Some(description) = &playlist.description {
        println!("  {}", description);
    }
    println!("Members:");
    for song in &playlist.songs {
        print_song(song);
    }
}
