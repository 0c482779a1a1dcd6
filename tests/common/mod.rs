#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

static SERVER: OnceLock<Option<TestServer>> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/qarzdaftar-api");
        cmd.env("QARZ_API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server can see DATABASE_URL and JWT_SECRET
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Consider server ready on any non-404 response
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

/// Spawn (once) and return the shared test server, or None when no
/// database is configured - callers should then skip the test.
pub async fn ensure_server() -> Result<Option<&'static TestServer>> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return Ok(None);
    }

    let server = SERVER.get_or_init(|| TestServer::spawn().ok());
    match server {
        Some(server) => {
            server.wait_ready(Duration::from_secs(15)).await?;
            Ok(Some(server))
        }
        None => anyhow::bail!("failed to spawn server binary"),
    }
}

/// Fresh email per test so runs never collide.
pub fn unique_email(tag: &str) -> String {
    format!("{}+{}@example.com", tag, Uuid::new_v4().simple())
}

/// Sign up a fresh shop; returns (token, user).
pub async fn signup_shop(
    client: &reqwest::Client,
    base_url: &str,
    shop_name: &str,
) -> Result<(String, Value)> {
    let response = client
        .post(format!("{}/api/auth/signup", base_url))
        .json(&json!({
            "email": unique_email("owner"),
            "password": "hunter2-hunter2",
            "shop_name": shop_name,
        }))
        .send()
        .await?;

    anyhow::ensure!(
        response.status() == StatusCode::CREATED,
        "signup failed: {}",
        response.status()
    );

    let body: Value = response.json().await?;
    let token = body["token"]
        .as_str()
        .context("signup response missing token")?
        .to_string();
    Ok((token, body["user"].clone()))
}

pub async fn create_debt(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    payload: Value,
) -> Result<Value> {
    let response = client
        .post(format!("{}/api/debts", base_url))
        .bearer_auth(token)
        .json(&payload)
        .send()
        .await?;

    anyhow::ensure!(
        response.status() == StatusCode::CREATED,
        "create debt failed: {}",
        response.status()
    );
    Ok(response.json().await?)
}

pub async fn list_debts(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    query: &str,
) -> Result<Vec<Value>> {
    let response = client
        .get(format!("{}/api/debts{}", base_url, query))
        .bearer_auth(token)
        .send()
        .await?;

    anyhow::ensure!(
        response.status() == StatusCode::OK,
        "list debts failed: {}",
        response.status()
    );
    Ok(response.json().await?)
}
