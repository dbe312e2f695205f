//! End-to-end tests of the gated commands against a mock catalog server.

use setlist_cli::{App, CliConfig, CliError, SongChanges, TerminalNavigator};
use setlist_client::{FileTokenStorage, MemoryTokenStorage, Route, TokenStorage};
use setlist_core::{PlaylistId, SongId};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> CliConfig {
    let mut config = CliConfig::default();
    config.api.base_url = server.uri();
    config
}

fn app_with(
    server: &MockServer,
    storage: Arc<dyn TokenStorage>,
) -> (App, Arc<TerminalNavigator>) {
    let navigator = Arc::new(TerminalNavigator::new());
    let app = App::new(&config_for(server), storage, navigator.clone()).unwrap();
    (app, navigator)
}

fn logged_in() -> Arc<MemoryTokenStorage> {
    let storage = Arc::new(MemoryTokenStorage::new());
    storage.store("tok").unwrap();
    storage
}

fn song_json(id: i64, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "artist": "Artist",
        "album": "Album",
        "year": 1990,
        "genre": "Jazz"
    })
}

#[tokio::test]
async fn anonymous_commands_are_redirected_without_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (app, navigator) = app_with(&mock_server, Arc::new(MemoryTokenStorage::new()));

    match app.songs().await {
        Err(CliError::LoginRequired(route)) => assert_eq!(route, Route::Songs),
        other => panic!("Expected LoginRequired, got: {:?}", other.map(|s| s.len())),
    }
    assert_eq!(navigator.last_redirect(), Some(Route::Login));

    assert!(matches!(
        app.open_playlist(PlaylistId::new(2)).await,
        Err(CliError::LoginRequired(Route::PlaylistDetail(_)))
    ));
}

#[tokio::test]
async fn login_then_list_songs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "token": "fresh" })),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/songs"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([song_json(1, "Blue")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileTokenStorage::new(dir.path().join("session.json")));
    let (app, navigator) = app_with(&mock_server, storage.clone());

    assert!(app.login("ana", "secret").await.unwrap());
    assert!(app.status().authenticated);

    let songs = app.songs().await.unwrap();
    assert_eq!(songs[0].title, "Blue");
    assert!(navigator.last_redirect().is_none());

    // A second process sees the same session.
    let (restarted, _) = app_with(&mock_server, storage);
    assert!(restarted.status().authenticated);
    restarted.logout().unwrap();
    assert!(!restarted.status().authenticated);
}

#[tokio::test]
async fn rejected_login_reports_invalid_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let (app, _) = app_with(&mock_server, Arc::new(MemoryTokenStorage::new()));
    let err = app.login("ana", "wrong").await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(!app.status().authenticated);
}

#[tokio::test]
async fn edit_song_keeps_untouched_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/songs/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(song_json(4, "Old")))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/songs/4"))
        .and(body_json(serde_json::json!({
            "id": 4,
            "title": "Old",
            "artist": "Artist",
            "album": "Album",
            "year": 2020,
            "genre": "Jazz"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(song_json(4, "Old")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (app, _) = app_with(&mock_server, logged_in());
    let changes = SongChanges {
        year: Some(2020),
        ..SongChanges::default()
    };

    app.edit_song(SongId::new(4), changes).await.unwrap();
}

#[tokio::test]
async fn add_to_playlist_submits_whole_membership() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/songs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            song_json(1, "One"),
            song_json(2, "Two")
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/playlists/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 5,
            "name": "Mix",
            "songs": [song_json(1, "One")]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/playlists/5"))
        .and(body_json(serde_json::json!({
            "id": 5,
            "name": "Mix",
            "description": null,
            "songIds": [1, 2]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 5,
            "name": "Mix",
            "songs": [song_json(1, "One"), song_json(2, "Two")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (app, _) = app_with(&mock_server, logged_in());
    let updated = app
        .add_to_playlist(PlaylistId::new(5), SongId::new(2))
        .await
        .unwrap();

    assert_eq!(updated.songs.len(), 2);

    let err = app
        .add_to_playlist(PlaylistId::new(5), SongId::new(9))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CliError::Catalog(setlist_core::SetlistError::UnknownSong(_))
    ));
}
