use std::net::SocketAddr;
use std::path::PathBuf;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    root: PathBuf,
}

impl TestApp {
    fn asset(&self, name: &str) -> PathBuf {
        self.root.join("assets").join(name)
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Use isolated temp dirs for assets/settings per test
    let root = std::env::temp_dir().join(format!("site_customize_e2e_{}", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.storage.assets_dir = root.join("assets").display().to_string();
    cfg.storage.settings_path = root.join("settings.json").display().to_string();
    cfg.normalize_and_validate()?;

    let app = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, root })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}

#[tokio::test]
async fn e2e_form_post_then_load() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    // empty store loads as disabled
    let res = c.get(format!("{}/admin/customize", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["aboutUsEnabled"], false);
    assert_eq!(body["customTerms"], "");
    assert!(body["motto"].is_null());

    // unchecked checkbox is simply absent from the post
    let res = c
        .post(format!("{}/admin/customize", app.base_url))
        .form(&[
            ("motto", "Ride local"),
            ("aboutUsEnabled", "on"),
            ("aboutUs", "Hello"),
            ("customTerms", "ignored while unchecked"),
        ])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let report = res.json::<serde_json::Value>().await?;
    assert_eq!(report["about_us"]["outcome"], "written");
    assert_eq!(report["about_us"]["cache_keys_invalidated"], 2);
    assert_eq!(report["custom_terms"]["outcome"], "absent");
    assert_eq!(report["motto_saved"], true);

    assert_eq!(tokio::fs::read_to_string(app.asset("about_us.md")).await?, "Hello");
    assert!(tokio::fs::metadata(app.asset("custom_terms.md")).await.is_err());

    let body = c
        .get(format!("{}/admin/customize", app.base_url))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert_eq!(body["aboutUs"], "Hello");
    assert_eq!(body["aboutUsEnabled"], true);
    assert_eq!(body["customTermsEnabled"], false);
    assert_eq!(body["motto"], "Ride local");

    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}

#[tokio::test]
async fn e2e_json_submit_blank_text_disables_section() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c
        .put(format!("{}/admin/customize", app.base_url))
        .json(&json!({"customTermsEnabled": true, "customTerms": "Terms v1"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(tokio::fs::read_to_string(app.asset("custom_terms.md")).await?, "Terms v1");

    let res = c
        .put(format!("{}/admin/customize", app.base_url))
        .json(&json!({"customTermsEnabled": true, "customTerms": "   "}))
        .send()
        .await?;
    let report = res.json::<serde_json::Value>().await?;
    assert_eq!(report["custom_terms"]["outcome"], "deleted");
    assert!(tokio::fs::metadata(app.asset("custom_terms.md")).await.is_err());

    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}

#[tokio::test]
async fn e2e_public_content_reflects_submissions() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let body = c
        .get(format!("{}/content/about_us", app.base_url))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert_eq!(body["enabled"], false);
    assert!(body["body"].is_null());

    c.put(format!("{}/admin/customize", app.base_url))
        .json(&json!({"aboutUsEnabled": true, "aboutUs": "# About"}))
        .send()
        .await?;
    let body = c
        .get(format!("{}/content/about_us", app.base_url))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert_eq!(body["enabled"], true);
    assert_eq!(body["body"], "# About");

    // a second submit invalidates what the first read cached
    c.put(format!("{}/admin/customize", app.base_url))
        .json(&json!({"aboutUsEnabled": true, "aboutUs": "# About v2"}))
        .send()
        .await?;
    let body = c
        .get(format!("{}/content/about_us", app.base_url))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert_eq!(body["body"], "# About v2");

    let res = c.get(format!("{}/content/privacy", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}

#[tokio::test]
async fn e2e_metrics_exposed_after_submit() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    c.put(format!("{}/admin/customize", app.base_url))
        .json(&json!({"motto": "Hi"}))
        .send()
        .await?;

    let res = c.get(format!("{}/metrics", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let text = res.text().await?;
    assert!(text.contains("site_customize_submissions_total"));

    let _ = tokio::fs::remove_dir_all(&app.root).await;
    Ok(())
}
