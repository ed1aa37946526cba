use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

static SERVER: OnceLock<TestServer> = OnceLock::new();

/// Token accepted by the access middleware (any non-empty bearer is valid).
#[allow(dead_code)]
pub const AUTH: &str = "Bearer test-token";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/blog-api-rust");
        cmd.env("BLOG_API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

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
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Unique suffix so parallel tests never collide on unique user fields.
#[allow(dead_code)]
pub fn unique(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    format!("{}{}{}", prefix, nanos, COUNTER.fetch_add(1, Ordering::Relaxed))
}

#[allow(dead_code)]
pub async fn create_user(client: &reqwest::Client, base_url: &str) -> Result<Value> {
    let tag = unique("user");
    let res = client
        .post(format!("{}/users", base_url))
        .json(&serde_json::json!({
            "email": format!("{}@example.com", tag),
            "username": tag,
            "password": "secret"
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "create user failed: {}", res.status());
    let payload = res.json::<Value>().await?;
    Ok(payload["data"]["user"].clone())
}

#[allow(dead_code)]
pub async fn create_category(
    client: &reqwest::Client,
    base_url: &str,
    user_id: &str,
    title: &str,
) -> Result<Value> {
    let res = client
        .post(format!("{}/categories?userId={}", base_url, user_id))
        .json(&serde_json::json!({ "title": title }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "create category failed: {}", res.status());
    let payload = res.json::<Value>().await?;
    Ok(payload["data"]["category"].clone())
}

#[allow(dead_code)]
pub async fn create_blog(
    client: &reqwest::Client,
    base_url: &str,
    user_id: &str,
    category_id: &str,
    title: &str,
    description: &str,
) -> Result<Value> {
    let res = client
        .post(format!("{}/blogs?userId={}&categoryId={}", base_url, user_id, category_id))
        .header("authorization", AUTH)
        .json(&serde_json::json!({ "title": title, "description": description }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "create blog failed: {}", res.status());
    let payload = res.json::<Value>().await?;
    Ok(payload["data"]["blog"].clone())
}
