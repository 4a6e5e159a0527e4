use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Stats {
    latest_value: u64,
    contrast_total: u64,
    engagement_ratio: f64,
    growth_rate_pct: f64,
}

#[derive(Debug, Deserialize)]
struct Insights {
    peak_date: String,
    peak_value: u64,
    trough_date: String,
    trough_value: u64,
    trend: String,
}

#[derive(Debug, Deserialize)]
struct Point {
    date: String,
    users: u64,
    sessions: u64,
}

#[derive(Debug, Deserialize)]
struct DashboardResponse {
    range: String,
    measure: String,
    stats: Stats,
    insights: Insights,
    points: Vec<Point>,
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    range: String,
    points: Vec<Point>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/dashboard")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_metrics_dashboard"))
        .env("PORT", port.to_string())
        .env("DASHBOARD_DAYS", "120")
        .env("DASHBOARD_SEED", "2024")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn get_json<T: serde::de::DeserializeOwned>(client: &Client, url: String) -> T {
    let response = client.get(url).send().await.unwrap();
    assert!(response.status().is_success(), "status {}", response.status());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_dashboard_defaults_to_30_days_of_users() {
    let server = shared_server().await;
    let client = Client::new();

    let dashboard: DashboardResponse =
        get_json(&client, format!("{}/api/dashboard", server.base_url)).await;

    assert_eq!(dashboard.range, "30d");
    assert_eq!(dashboard.measure, "users");
    assert_eq!(dashboard.points.len(), 30);
    assert!(dashboard.points.windows(2).all(|pair| pair[0].date < pair[1].date));

    let last = dashboard.points.last().unwrap();
    assert_eq!(dashboard.stats.latest_value, last.users);

    let users: u64 = dashboard.points.iter().map(|point| point.users).sum();
    let sessions: u64 = dashboard.points.iter().map(|point| point.sessions).sum();
    assert_eq!(dashboard.stats.contrast_total, sessions);
    let expected_ratio = if users == 0 { 0.0 } else { sessions as f64 / users as f64 };
    assert!((dashboard.stats.engagement_ratio - expected_ratio).abs() < 1e-9);
    assert!(dashboard.stats.growth_rate_pct.is_finite());

    let max = dashboard.points.iter().map(|point| point.users).max().unwrap();
    let min = dashboard.points.iter().map(|point| point.users).min().unwrap();
    assert_eq!(dashboard.insights.peak_value, max);
    assert_eq!(dashboard.insights.trough_value, min);
    assert!(["increasing", "decreasing", "flat"].contains(&dashboard.insights.trend.as_str()));
}

#[tokio::test]
async fn http_sessions_keep_sessions_per_user_ratio() {
    let server = shared_server().await;
    let client = Client::new();

    let users: DashboardResponse = get_json(
        &client,
        format!("{}/api/dashboard?range=7d&measure=users", server.base_url),
    )
    .await;
    let sessions: DashboardResponse = get_json(
        &client,
        format!("{}/api/dashboard?range=7d&measure=sessions", server.base_url),
    )
    .await;

    assert_eq!(sessions.measure, "sessions");
    assert_eq!(sessions.points.len(), 7);
    assert!((users.stats.engagement_ratio - sessions.stats.engagement_ratio).abs() < 1e-9);

    let total_users: u64 = sessions.points.iter().map(|point| point.users).sum();
    assert_eq!(sessions.stats.contrast_total, total_users);
}

#[tokio::test]
async fn http_series_all_returns_every_day() {
    let server = shared_server().await;
    let client = Client::new();

    let series: SeriesResponse =
        get_json(&client, format!("{}/api/series?range=all", server.base_url)).await;

    assert_eq!(series.range, "all");
    assert_eq!(series.points.len(), 121);
}

#[tokio::test]
async fn http_stats_and_insights_match_dashboard() {
    let server = shared_server().await;
    let client = Client::new();
    let query = "range=all&measure=sessions";

    let dashboard: DashboardResponse =
        get_json(&client, format!("{}/api/dashboard?{query}", server.base_url)).await;

    #[derive(Deserialize)]
    struct StatsEnvelope {
        stats: Stats,
    }
    #[derive(Deserialize)]
    struct InsightsEnvelope {
        insights: Insights,
    }

    let stats: StatsEnvelope =
        get_json(&client, format!("{}/api/stats?{query}", server.base_url)).await;
    let insights: InsightsEnvelope =
        get_json(&client, format!("{}/api/insights?{query}", server.base_url)).await;

    assert_eq!(stats.stats.latest_value, dashboard.stats.latest_value);
    assert_eq!(stats.stats.contrast_total, dashboard.stats.contrast_total);
    assert_eq!(stats.stats.growth_rate_pct, dashboard.stats.growth_rate_pct);
    assert_eq!(insights.insights.peak_date, dashboard.insights.peak_date);
    assert_eq!(insights.insights.trough_date, dashboard.insights.trough_date);
    assert_eq!(insights.insights.trend, dashboard.insights.trend);
}

#[tokio::test]
async fn http_rejects_unknown_range() {
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/dashboard?range=90d", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body = response.text().await.unwrap();
    assert!(body.contains("range must be"));
}

#[tokio::test]
async fn http_rejects_unknown_measure() {
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/stats?measure=revenue", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body = response.text().await.unwrap();
    assert!(body.contains("measure must be"));
}

#[tokio::test]
async fn http_index_serves_dashboard_page() {
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/?measure=sessions", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Growth Metrics"));
    assert!(body.contains(r#"data-measure="sessions""#));
}
