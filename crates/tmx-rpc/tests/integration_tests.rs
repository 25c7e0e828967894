//! Integration tests for the tmx-rpc JSON-RPC server.
//!
//! The router runs in-process on an ephemeral port, backed by an
//! orchestrator whose OS-facing components are replaced by recorders.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tmx_core::{
    AcquisitionConfig, DownloadProgress, Fetcher, Handoff, Launcher, Orchestrator, ProcessProbe,
};
use tokio::io::AsyncBufReadExt;

struct StaticFetcher;

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(
        &self,
        _url: &str,
        destination: &Path,
        on_progress: &mut (dyn FnMut(DownloadProgress) + Send),
    ) -> tmx_core::Result<u64> {
        on_progress(DownloadProgress::new(0, Some(4)));
        on_progress(DownloadProgress::new(4, Some(4)));
        std::fs::write(destination, b"GBX!")?;
        Ok(4)
    }
}

/// Takes its time before writing, like a slow mirror.
struct SlowFetcher {
    delay: Duration,
}

#[async_trait]
impl Fetcher for SlowFetcher {
    async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        on_progress: &mut (dyn FnMut(DownloadProgress) + Send),
    ) -> tmx_core::Result<u64> {
        on_progress(DownloadProgress::new(0, Some(4)));
        tokio::time::sleep(self.delay).await;
        StaticFetcher.fetch(url, destination, on_progress).await
    }
}

struct NotRunning;

impl ProcessProbe for NotRunning {
    fn is_running(&self, _process_name: &str) -> bool {
        false
    }
}

struct NoopLauncher;

impl Launcher for NoopLauncher {
    fn launch(&self, _executable: &Path, _args: &[String]) -> tmx_core::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct RecordingHandoff {
    opened: Mutex<Vec<String>>,
}

impl Handoff for RecordingHandoff {
    fn open_path(&self, path: &Path) -> tmx_core::Result<()> {
        self.opened.lock().unwrap().push(path.display().to_string());
        Ok(())
    }

    fn open_uri(&self, uri: &str) -> tmx_core::Result<()> {
        self.opened.lock().unwrap().push(uri.to_string());
        Ok(())
    }
}

struct TestServer {
    addr: SocketAddr,
    handoff: Arc<RecordingHandoff>,
    cache_dir: PathBuf,
    _temp_dir: TempDir,
}

async fn start_test_server() -> TestServer {
    start_test_server_with(Arc::new(StaticFetcher)).await
}

async fn start_test_server_with(fetcher: Arc<dyn Fetcher>) -> TestServer {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let cache_dir = temp_dir.path().join("maps");
    let config = AcquisitionConfig::default()
        .with_cache_dir(&cache_dir)
        // No game installed: acquisition ends with a plain shell open
        .with_executable_path(temp_dir.path().join("missing").join("Trackmania.exe"));

    let handoff = Arc::new(RecordingHandoff::default());
    let orchestrator = Orchestrator::builder()
        .config(config)
        .fetcher(fetcher)
        .probe(Arc::new(NotRunning))
        .launcher(Arc::new(NoopLauncher))
        .handoff(handoff.clone())
        .candidates(Vec::new())
        .build()
        .unwrap();

    let addr = tmx_rpc::start_server(Arc::new(orchestrator), "127.0.0.1", 0)
        .await
        .unwrap();

    TestServer {
        addr,
        handoff,
        cache_dir,
        _temp_dir: temp_dir,
    }
}

/// Make an RPC call and return the full JSON-RPC payload.
async fn rpc_call_raw(addr: SocketAddr, method: &str, params: Value) -> Value {
    reqwest::Client::new()
        .post(format!("http://{}/rpc", addr))
        .json(&json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        }))
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap()
}

/// Make an RPC call and return its result, panicking on a JSON-RPC error.
async fn rpc_call(addr: SocketAddr, method: &str, params: Value) -> Value {
    let response = rpc_call_raw(addr, method, params).await;
    assert!(response.get("error").is_none(), "{response}");
    response["result"].clone()
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = start_test_server().await;
    let body: Value = reqwest::get(format!("http://{}/health", server.addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_builtin_methods() {
    let server = start_test_server().await;
    assert_eq!(
        rpc_call(server.addr, "health_check", json!({})).await,
        json!({"status": "ok"})
    );
    assert_eq!(
        rpc_call(server.addr, "shutdown", json!({})).await,
        json!({"status": "shutting_down"})
    );
}

#[tokio::test]
async fn test_unknown_method() {
    let server = start_test_server().await;
    let response = rpc_call_raw(server.addr, "download_everything", json!({})).await;
    assert_eq!(response["error"]["code"], -32601);
    assert_eq!(response["id"], 1);
}

#[tokio::test]
async fn test_missing_and_invalid_map_id() {
    let server = start_test_server().await;

    for params in [json!({}), json!({"map_id": "../../etc"}), json!({"mapId": ""})] {
        let response = rpc_call_raw(server.addr, "acquire_and_launch", params).await;
        assert_eq!(response["error"]["code"], -32602, "{response}");
    }
    assert!(server.handoff.opened.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_is_app_running() {
    let server = start_test_server().await;
    assert_eq!(rpc_call(server.addr, "is_app_running", json!({})).await, json!(false));
}

#[tokio::test]
async fn test_acquire_and_launch() {
    let server = start_test_server().await;

    let result = rpc_call(server.addr, "acquire_and_launch", json!({"mapId": "123456"})).await;
    assert_eq!(result, json!({"success": true, "method": "shell-open"}));

    let opened = server.handoff.opened.lock().unwrap();
    assert_eq!(opened.len(), 1);
    assert!(opened[0].ends_with("123456.Map.Gbx"), "{:?}", opened);
}

#[tokio::test]
async fn test_launch_direct_protocol_fallback() {
    let server = start_test_server().await;

    let result = rpc_call(server.addr, "launch_direct", json!({"map_id": "123456"})).await;
    assert_eq!(result, json!({"success": true, "method": "protocol"}));
    assert_eq!(
        *server.handoff.opened.lock().unwrap(),
        vec!["trackmania://joinmap/123456".to_string()]
    );
}

#[tokio::test]
async fn test_progress_events_stream() {
    let server = start_test_server().await;

    let mut events = reqwest::Client::new()
        .get(format!("http://{}/events", server.addr))
        .send()
        .await
        .unwrap();
    assert!(events
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/event-stream")));

    rpc_call(server.addr, "acquire_and_launch", json!({"map_id": "42"})).await;

    let mut body = String::new();
    let read_until_complete = async {
        while let Some(chunk) = events.chunk().await.unwrap() {
            body.push_str(&String::from_utf8_lossy(&chunk));
            if body.contains("\"status\":\"complete\"") {
                break;
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(10), read_until_complete)
        .await
        .expect("complete event not received");

    assert!(body.contains("event: download-progress"));
    assert!(body.contains(r#"{"mapId":"42","status":"starting","progress":0}"#));
    assert!(body.contains(r#"{"mapId":"42","status":"downloading","progress":60}"#));
    assert!(body.contains(r#"{"mapId":"42","status":"complete","progress":100}"#));
}

#[tokio::test]
async fn test_is_map_cached() {
    let server = start_test_server().await;

    assert_eq!(
        rpc_call(server.addr, "is_map_cached", json!({"mapId": "123456"})).await,
        json!(false)
    );
    rpc_call(server.addr, "acquire_and_launch", json!({"mapId": "123456"})).await;
    assert_eq!(
        rpc_call(server.addr, "is_map_cached", json!({"map_id": "123456"})).await,
        json!(true)
    );

    let response = rpc_call_raw(server.addr, "is_map_cached", json!({"mapId": "../x"})).await;
    assert_eq!(response["error"]["code"], -32602);
}

/// A client that gives up on the request does not abandon the run.
#[tokio::test]
async fn test_run_completes_after_client_disconnects() {
    let server = start_test_server_with(Arc::new(SlowFetcher {
        delay: Duration::from_millis(800),
    }))
    .await;

    let mut events = reqwest::Client::new()
        .get(format!("http://{}/events", server.addr))
        .send()
        .await
        .unwrap();

    let abandoned = reqwest::Client::new()
        .post(format!("http://{}/rpc", server.addr))
        .json(&json!({
            "jsonrpc": "2.0",
            "method": "acquire_and_launch",
            "params": {"mapId": "31337"},
            "id": 1
        }))
        .timeout(Duration::from_millis(200))
        .send()
        .await;
    assert!(abandoned.is_err_and(|e| e.is_timeout()));

    let mut body = String::new();
    let read_until_terminal = async {
        while let Some(chunk) = events.chunk().await.unwrap() {
            body.push_str(&String::from_utf8_lossy(&chunk));
            if body.contains("\"status\":\"complete\"") || body.contains("\"status\":\"error\"") {
                break;
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(10), read_until_terminal)
        .await
        .expect("no terminal event after the client went away");

    assert!(body.contains(r#"{"mapId":"31337","status":"complete","progress":100}"#), "{body}");
    assert!(server.cache_dir.join("31337.Map.Gbx").is_file());
    assert!(!server.cache_dir.join("31337.Map.Gbx.part").exists());

    let opened = server.handoff.opened.lock().unwrap();
    assert!(opened.iter().any(|p| p.ends_with("31337.Map.Gbx")), "{:?}", opened);
}

/// The binary prints its port on stdout and answers health checks.
#[tokio::test]
async fn test_binary_reports_port() {
    let temp_dir = TempDir::new().unwrap();
    let mut child = tokio::process::Command::new(env!("CARGO_BIN_EXE_tmx-rpc"))
        .arg("--port")
        .arg("0")
        .arg("--cache-dir")
        .arg(temp_dir.path().join("maps"))
        .arg("--log-file")
        .arg(temp_dir.path().join("viewer.log"))
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to start tmx-rpc");

    let stdout = child.stdout.take().unwrap();
    let mut lines = tokio::io::BufReader::new(stdout).lines();
    let port: u16 = tokio::time::timeout(Duration::from_secs(30), async {
        while let Some(line) = lines.next_line().await.unwrap() {
            if let Some(port) = line.strip_prefix("RPC_PORT=") {
                return port.trim().parse().unwrap();
            }
        }
        panic!("tmx-rpc exited without reporting a port");
    })
    .await
    .expect("Timed out waiting for RPC_PORT");

    let body: Value = reqwest::get(format!("http://127.0.0.1:{}/health", port))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");

    child.kill().await.unwrap();
    assert!(temp_dir.path().join("viewer.log").exists());
}
