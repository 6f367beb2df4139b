// ═══════════════════════════════════════════════════════════════════
// API Tests — FifoPlClient against an in-process HTTP responder
// ═══════════════════════════════════════════════════════════════════

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use fifo_pl_dashboard_core::api::client::FifoPlClient;
use fifo_pl_dashboard_core::api::traits::FifoPlApi;
use fifo_pl_dashboard_core::errors::DashboardError;
use fifo_pl_dashboard_core::models::settings::ClientSettings;
use fifo_pl_dashboard_core::models::transaction::{Transaction, TxnType};
use fifo_pl_dashboard_core::render::environment::RenderEnvironment;
use fifo_pl_dashboard_core::{DashboardController, SubmitOutcome};

// ═══════════════════════════════════════════════════════════════════
// Test Helpers — canned HTTP responder
// ═══════════════════════════════════════════════════════════════════

const SUMMARY_JSON: &str = r#"{"totalPnl":150.5,"totalTransactions":4,"totalProducts":2,"profitableProducts":1,"pnlByProduct":{"Widget":150.5,"Gadget":-25}}"#;

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Read one HTTP/1.1 request (head plus Content-Length body).
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = find(&buf, b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .map(|v| v.trim().parse::<usize>().unwrap())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Answer each incoming connection with the next canned response and
/// hand back the raw requests once all responses are used.
async fn spawn_server(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut stream).await);
            let response = format!(
                "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        }
        requests
    });

    (format!("http://{addr}/api/FifoPl"), handle)
}

fn client_for(base_url: &str) -> FifoPlClient {
    let settings = ClientSettings::with_base_url(base_url)
        .unwrap()
        .timeout(Duration::from_secs(5));
    FifoPlClient::new(settings).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Endpoints
// ═══════════════════════════════════════════════════════════════════

mod endpoints {
    use super::*;

    #[tokio::test]
    async fn get_dashboard_summary() {
        let (url, server) = spawn_server(vec![(200, SUMMARY_JSON.to_string())]).await;
        let client = client_for(&url);

        let summary = client.get_dashboard_summary().await.unwrap();

        assert_eq!(summary.total_pnl, 150.5);
        assert_eq!(summary.pnl_by_product.products(), vec!["Widget", "Gadget"]);
        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("GET /api/FifoPl/dashboard-summary HTTP/1.1"));
    }

    #[tokio::test]
    async fn list_transactions() {
        let body = r#"[
            {"id":1,"date":"2025-01-15T10:00:00","product":"Widget","txnType":"Buy","quantity":10,"pricePerUnit":5},
            {"id":2,"date":"2025-01-16T10:00:00","product":"Widget","txnType":"Sell","quantity":4,"pricePerUnit":7.5}
        ]"#;
        let (url, server) = spawn_server(vec![(200, body.to_string())]).await;

        let transactions = client_for(&url).list_transactions().await.unwrap();

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[1].txn_type, TxnType::Sell);
        assert_eq!(transactions[1].price_per_unit, 7.5);
        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("GET /api/FifoPl HTTP/1.1"));
    }

    #[tokio::test]
    async fn add_transaction_posts_json_and_returns_echo() {
        let echo = r#"{"id":17,"date":"2025-01-15T10:00:00.000Z","product":"Widget","txnType":"Buy","quantity":10,"pricePerUnit":5}"#;
        let (url, server) = spawn_server(vec![(201, echo.to_string())]).await;
        let txn = Transaction::new("2025-01-15T10:00:00.000Z", "Widget", TxnType::Buy, 10.0, 5.0);

        let created = client_for(&url).add_transaction(&txn).await.unwrap();

        assert_eq!(created.id, 17);
        assert_eq!(created.product, "Widget");
        let requests = server.await.unwrap();
        let request = &requests[0];
        assert!(request.starts_with("POST /api/FifoPl HTTP/1.1"));
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.contains(r#""txnType":"Buy""#));
        assert!(request.contains(r#""pricePerUnit":5.0"#));
        assert!(request.contains(r#""id":0"#));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Failures
// ═══════════════════════════════════════════════════════════════════

mod failures {
    use super::*;

    #[tokio::test]
    async fn non_success_status_is_http_error() {
        let (url, _server) = spawn_server(vec![(500, "{}".to_string())]).await;

        let err = client_for(&url).get_dashboard_summary().await.unwrap_err();

        match err {
            DashboardError::Http { status, endpoint } => {
                assert_eq!(status, 500);
                assert_eq!(endpoint, "/api/FifoPl/dashboard-summary");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejected_post_is_http_error() {
        let (url, _server) = spawn_server(vec![(400, r#"{"error":"bad"}"#.to_string())]).await;
        let txn = Transaction::new("d", "Widget", TxnType::Sell, 1.0, 1.0);

        let err = client_for(&url).add_transaction(&txn).await.unwrap_err();

        assert!(matches!(err, DashboardError::Http { status: 400, .. }));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn malformed_body_is_deserialization_error() {
        let (url, _server) = spawn_server(vec![(200, r#"{"totalPnl":"lots"}"#.to_string())]).await;

        let err = client_for(&url).get_dashboard_summary().await.unwrap_err();

        assert!(matches!(err, DashboardError::Deserialization(_)));
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{addr}/api/FifoPl"))
            .list_transactions()
            .await
            .unwrap_err();

        assert!(matches!(err, DashboardError::Network(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Controller over HTTP
// ═══════════════════════════════════════════════════════════════════

mod end_to_end {
    use super::*;

    #[tokio::test]
    async fn submit_then_reload_over_http() {
        let echo = r#"{"id":5,"date":"2025-01-15T10:00:00.000Z","product":"Widget","txnType":"Sell","quantity":2,"pricePerUnit":80}"#;
        let (url, server) = spawn_server(vec![
            (200, SUMMARY_JSON.to_string()),
            (200, echo.to_string()),
            (200, SUMMARY_JSON.to_string()),
        ])
        .await;
        let mut dashboard = DashboardController::new(client_for(&url), RenderEnvironment::server());

        dashboard.initialize().await.unwrap();
        let form = dashboard.form_mut();
        form.product = "Widget".into();
        form.txn_type = TxnType::Sell;
        form.quantity = 2.0;
        form.price_per_unit = 80.0;
        let outcome = dashboard.submit_transaction().await;

        assert!(matches!(outcome, SubmitOutcome::Added(ref t) if t.id == 5));
        assert_eq!(dashboard.state().form.product, "");
        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("GET /api/FifoPl/dashboard-summary"));
        assert!(requests[1].starts_with("POST /api/FifoPl "));
        assert!(requests[2].starts_with("GET /api/FifoPl/dashboard-summary"));
    }
}
