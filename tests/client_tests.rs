use std::time::Duration;

use chrono::NaiveDate;
use watchlog::clients::ApiClient;
use watchlog::config::Config;
use watchlog::domain::{MediaType, Rating, RecordId, WatchStatus};
use watchlog::models::NewRecord;
use watchlog::services::{RecordError, RecordStore};

async fn spawn_server() -> ApiClient {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let state = watchlog::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let app = watchlog::api::router(state).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ApiClient::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap()
}

fn series(episode: u32) -> NewRecord {
    NewRecord {
        title: "Frieren".to_string(),
        media_type: MediaType::Series,
        release_year: Some(2023),
        rating: Rating::LisanAlGaib,
        status: WatchStatus::Completed,
        date_watched: NaiveDate::from_ymd_opt(2024, 3, 22).unwrap(),
        is_rewatch: false,
        season: Some(1),
        episode: Some(episode),
        total_episodes: Some(28),
        notes: None,
    }
}

#[tokio::test]
async fn test_client_round_trips_through_the_server() {
    let client = spawn_server().await;

    let created = client.create(series(14)).await.unwrap();
    assert_eq!(created.status, WatchStatus::Watching);
    assert_eq!(created.progress(), 50);

    let updated = client.update(created.id, series(28)).await.unwrap();
    assert_eq!(updated.status, WatchStatus::Completed);

    let listed = client.list().await.unwrap();
    assert_eq!(listed, vec![updated.clone()]);

    let found = client.search("frie").await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(client.search("dune").await.unwrap().is_empty());

    client.delete(created.id).await.unwrap();
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_client_maps_missing_ids_to_not_found() {
    let client = spawn_server().await;
    let missing = RecordId::new(41);

    assert!(matches!(
        client.delete(missing).await,
        Err(RecordError::NotFound(id)) if id == missing
    ));
    assert!(matches!(
        client.update(missing, series(1)).await,
        Err(RecordError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_client_validates_before_sending() {
    let client = spawn_server().await;

    let mut blank = series(1);
    blank.title = "  ".to_string();

    assert!(matches!(
        client.create(blank).await,
        Err(RecordError::Validation(_))
    ));
}
