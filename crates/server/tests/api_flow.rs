use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes;
use service::repositories::RepositoryService;

struct TestApp {
    base_url: String,
}

/// Boot the full router on an ephemeral port with a fresh, empty collection.
async fn start_server() -> anyhow::Result<TestApp> {
    let repos = RepositoryService::new();
    let app: Router = routes::build_router(Arc::clone(&repos), CorsLayer::very_permissive());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn create_repo(
    c: &reqwest::Client,
    base_url: &str,
    title: &str,
) -> anyhow::Result<serde_json::Value> {
    let res = c
        .post(format!("{}/repositories", base_url))
        .json(&json!({
            "title": title,
            "url": format!("https://github.com/example/{}", title.to_lowercase()),
            "techs": ["Rust", "axum"],
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    Ok(res.json().await?)
}

#[tokio::test]
async fn health_and_openapi_are_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");

    let res = c
        .get(format!("{}/api-docs/openapi.json", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn create_returns_fresh_v4_id_with_zero_likes() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let created = create_repo(&c, &app.base_url, "Umbriel").await?;
    assert_eq!(created["likes"], 0);
    assert_eq!(created["title"], "Umbriel");
    assert_eq!(created["techs"], json!(["Rust", "axum"]));

    let id = Uuid::try_parse(created["id"].as_str().expect("id string"))?;
    assert_eq!(id.get_version_num(), 4);

    let second = create_repo(&c, &app.base_url, "Proffy").await?;
    assert_ne!(created["id"], second["id"]);
    Ok(())
}

#[tokio::test]
async fn list_preserves_creation_order() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    for title in ["One", "Two", "Three"] {
        create_repo(&c, &app.base_url, title).await?;
    }

    let res = c.get(format!("{}/repositories", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let list = res.json::<Vec<serde_json::Value>>().await?;
    let titles: Vec<_> = list.iter().map(|r| r["title"].as_str().unwrap().to_owned()).collect();
    assert_eq!(titles, vec!["One", "Two", "Three"]);
    Ok(())
}

#[tokio::test]
async fn filter_by_title_is_case_insensitive() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    create_repo(&c, &app.base_url, "Umbriel").await?;
    create_repo(&c, &app.base_url, "Proffy").await?;

    let res = c
        .get(format!("{}/repositories?title=UMBR", app.base_url))
        .send()
        .await?;
    let hits = res.json::<Vec<serde_json::Value>>().await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "Umbriel");

    let res = c
        .get(format!("{}/repositories?title=nothing-here", app.base_url))
        .send()
        .await?;
    let hits = res.json::<Vec<serde_json::Value>>().await?;
    assert!(hits.is_empty());
    Ok(())
}

#[tokio::test]
async fn malformed_id_rejected_on_every_id_scoped_route() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // "abc" is not a UUID; the v1 literal is a UUID but not version 4
    for bad in ["abc", "a8098c1a-f86e-11da-bd1a-00112444be1e"] {
        let expected = json!({"error": "Invalid repository id."});

        let res = c.get(format!("{}/repositories/{bad}", app.base_url)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
        assert_eq!(res.json::<serde_json::Value>().await?, expected);

        let res = c
            .put(format!("{}/repositories/{bad}", app.base_url))
            .json(&json!({"title": "x"}))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
        assert_eq!(res.json::<serde_json::Value>().await?, expected);

        let res = c.delete(format!("{}/repositories/{bad}", app.base_url)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
        assert_eq!(res.json::<serde_json::Value>().await?, expected);

        let res = c
            .post(format!("{}/repositories/{bad}/like", app.base_url))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
        assert_eq!(res.json::<serde_json::Value>().await?, expected);
    }
    Ok(())
}

#[tokio::test]
async fn unknown_id_answers_not_found_on_every_id_scoped_route() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    create_repo(&c, &app.base_url, "Umbriel").await?;
    let unknown = Uuid::new_v4();
    let expected = json!({"error": "Repository not found."});

    let res = c.get(format!("{}/repositories/{unknown}", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<serde_json::Value>().await?, expected);

    let res = c
        .put(format!("{}/repositories/{unknown}", app.base_url))
        .json(&json!({"title": "x"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<serde_json::Value>().await?, expected);

    let res = c.delete(format!("{}/repositories/{unknown}", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<serde_json::Value>().await?, expected);

    let res = c
        .post(format!("{}/repositories/{unknown}/like", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<serde_json::Value>().await?, expected);
    Ok(())
}

#[tokio::test]
async fn create_with_invalid_body_is_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let expected = json!({"message": "Invalid request body"});

    let bad_bodies = [
        json!({"url": "https://x", "techs": ["Rust"]}),
        json!({"title": "", "url": "https://x", "techs": ["Rust"]}),
        json!({"title": "x", "techs": ["Rust"]}),
        json!({"title": "x", "url": "https://x"}),
        json!({"title": "x", "url": "https://x", "techs": []}),
        json!({"title": "x", "url": "https://x", "techs": {}}),
    ];
    for body in bad_bodies {
        let res = c
            .post(format!("{}/repositories", app.base_url))
            .json(&body)
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(res.json::<serde_json::Value>().await?, expected);
    }

    // nothing was stored
    let res = c.get(format!("{}/repositories", app.base_url)).send().await?;
    assert!(res.json::<Vec<serde_json::Value>>().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_with_only_title_changes_only_title() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let created = create_repo(&c, &app.base_url, "Umbriel").await?;
    let id = created["id"].as_str().unwrap();

    let res = c
        .put(format!("{}/repositories/{id}", app.base_url))
        .json(&json!({"title": "Renamed"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;

    assert_eq!(updated["title"], "Renamed");
    assert_eq!(updated["url"], created["url"]);
    assert_eq!(updated["techs"], created["techs"]);
    assert_eq!(updated["likes"], created["likes"]);
    assert_eq!(updated["id"], created["id"]);

    // empty values count as absent and keep the stored data
    let res = c
        .put(format!("{}/repositories/{id}", app.base_url))
        .json(&json!({"title": "", "techs": []}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let unchanged = res.json::<serde_json::Value>().await?;
    assert_eq!(unchanged["title"], "Renamed");
    assert_eq!(unchanged["techs"], created["techs"]);
    Ok(())
}

#[tokio::test]
async fn like_twice_increments_by_exactly_two() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let created = create_repo(&c, &app.base_url, "Umbriel").await?;
    let id = created["id"].as_str().unwrap();

    let res = c
        .post(format!("{}/repositories/{id}/like", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(res.json::<serde_json::Value>().await?["likes"], 1);

    let res = c
        .post(format!("{}/repositories/{id}/like", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let liked = res.json::<serde_json::Value>().await?;
    assert_eq!(liked["likes"], 2);
    assert_eq!(liked["title"], created["title"]);
    assert_eq!(liked["url"], created["url"]);
    assert_eq!(liked["techs"], created["techs"]);
    Ok(())
}

#[tokio::test]
async fn delete_removes_exactly_one_preserving_order() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    create_repo(&c, &app.base_url, "One").await?;
    let middle = create_repo(&c, &app.base_url, "Two").await?;
    create_repo(&c, &app.base_url, "Three").await?;
    let id = middle["id"].as_str().unwrap();

    let res = c.delete(format!("{}/repositories/{id}", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    let res = c.get(format!("{}/repositories", app.base_url)).send().await?;
    let list = res.json::<Vec<serde_json::Value>>().await?;
    let titles: Vec<_> = list.iter().map(|r| r["title"].as_str().unwrap().to_owned()).collect();
    assert_eq!(titles, vec!["One", "Three"]);

    // the id is gone now
    let res = c.delete(format!("{}/repositories/{id}", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn metrics_exposes_collection_counters() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let created = create_repo(&c, &app.base_url, "Umbriel").await?;
    let id = created["id"].as_str().unwrap();
    c.post(format!("{}/repositories/{id}/like", app.base_url)).send().await?;

    let res = c.get(format!("{}/metrics", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.text().await?;
    assert!(body.contains("repo_catalog_repositories_created_total"));
    assert!(body.contains("repo_catalog_repository_likes_total"));
    Ok(())
}
