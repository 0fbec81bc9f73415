use axum::http::StatusCode;
use bridge_tvl::api::{self, AppState};
use bridge_tvl::db::init_db;
use bridge_tvl::{
    AssetId, EthereumAddress, Granularity, MockReportStore, Observation, ObservationWithBalance,
    Registry, ReportController, ReportStore, Repository, Tolerance, UnixTime,
};
use num_bigint::BigInt;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// 2021-09-07T00:00:00Z
const START: i64 = 1_630_972_800;
const DAY: i64 = 86_400;

const ARBITRUM: &str = "0x011B6E24FfB0B5f5fCc564cf4183C5BBBc96D515";
const OPTIMISM: &str = "0x467194771dAe2967Aef3ECbEDD3Bf9a310C76C65";

const REGISTRY: &str = r#"{
    "tokens": [
        { "id": "dai-dai-stablecoin", "symbol": "DAI", "decimals": 18, "sinceBlock": 1000 },
        { "id": "uni-uniswap", "symbol": "UNI", "decimals": 18, "sinceBlock": 0 }
    ],
    "projects": [
        { "name": "Arbitrum", "bridges": [
            { "address": "0x011B6E24FfB0B5f5fCc564cf4183C5BBBc96D515", "sinceBlock": 0, "tokens": ["dai-dai-stablecoin"] }
        ]},
        { "name": "Optimism", "bridges": [
            { "address": "0x467194771dAe2967Aef3ECbEDD3Bf9a310C76C65", "sinceBlock": 0, "tokens": ["dai-dai-stablecoin", "uni-uniswap"] }
        ]},
        { "name": "Empty", "bridges": [] }
    ]
}"#;

struct TestApp {
    app: axum::Router,
    repo: Repository,
    _temp: TempDir,
}

async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");
    let repo = Repository::new(pool);

    let store: Arc<dyn ReportStore> = Arc::new(repo.clone());
    let registry = Registry::from_json(REGISTRY).unwrap();
    let controller = ReportController::new(
        store,
        Arc::new(registry),
        Tolerance::one(Granularity::Daily),
    );

    TestApp {
        app: api::create_router(AppState::new(Arc::new(controller))),
        repo,
        _temp: temp_dir,
    }
}

fn report(block: u64, timestamp: i64, bridge: &str, asset: &str, usd: u64, eth: u64) -> ObservationWithBalance {
    ObservationWithBalance::new(
        Observation {
            block_number: block,
            timestamp: UnixTime::new(timestamp),
            bridge: bridge.parse::<EthereumAddress>().unwrap(),
            asset: AssetId::new(asset),
            usd_tvl: BigInt::from(usd),
            eth_tvl: BigInt::from(eth),
        },
        BigInt::from(1_000_000_123_456u64) * BigInt::from(10u64).pow(12),
    )
}

async fn get_data(app: axum::Router) -> (StatusCode, serde_json::Value) {
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/data")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_three_daily_snapshots_one_project() {
    let test_app = setup_test_app().await;
    test_app
        .repo
        .add_or_update(&[
            report(1000, START - 2 * DAY, ARBITRUM, "dai-dai-stablecoin", 100_000_000, 100_000),
            report(2000, START - DAY, ARBITRUM, "dai-dai-stablecoin", 100_000_000, 100_000),
            report(3000, START, ARBITRUM, "dai-dai-stablecoin", 100_000_000, 100_000),
        ])
        .await
        .unwrap();

    let (status, body) = get_data(test_app.app).await;
    assert_eq!(status, StatusCode::OK);

    let expected = serde_json::json!([
        ["2021-09-04", 1000000.0, 0.1],
        ["2021-09-05", 1000000.0, 0.1],
        ["2021-09-06", 1000000.0, 0.1]
    ]);
    assert_eq!(body["aggregate"]["data"], expected);
    assert_eq!(body["byProject"]["Arbitrum"]["aggregate"]["data"], expected);
    assert_eq!(
        body["byProject"]["Arbitrum"]["byToken"]["DAI"],
        serde_json::json!({
            "types": ["date", "dai", "usd"],
            "data": [
                ["2021-09-04", 1000000.123456, 1000000.0],
                ["2021-09-05", 1000000.123456, 1000000.0],
                ["2021-09-06", 1000000.123456, 1000000.0]
            ]
        })
    );
    assert_eq!(
        body["byProject"]["Empty"],
        serde_json::json!({
            "aggregate": { "types": ["date", "usd", "eth"], "data": [] },
            "byToken": {}
        })
    );
}

#[tokio::test]
async fn test_lagging_pair_holds_snapshot_back() {
    let test_app = setup_test_app().await;
    test_app
        .repo
        .add_or_update(&[
            report(2000, START - DAY, ARBITRUM, "dai-dai-stablecoin", 100_000_000, 100_000),
            report(2000, START - DAY, OPTIMISM, "uni-uniswap", 200_000_000, 200_000),
            report(3000, START, ARBITRUM, "dai-dai-stablecoin", 100_000_000, 100_000),
        ])
        .await
        .unwrap();

    let (status, body) = get_data(test_app.app).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        body["aggregate"]["data"],
        serde_json::json!([["2021-09-05", 3000000.0, 0.3]])
    );
    assert_eq!(
        body["byProject"]["Optimism"]["aggregate"]["data"],
        serde_json::json!([["2021-09-05", 2000000.0, 0.2]])
    );
}

#[tokio::test]
async fn test_inactive_and_intraday_reports_ignored() {
    let test_app = setup_test_app().await;
    test_app
        .repo
        .add_or_update(&[
            // DAI is only tracked from block 1000.
            report(999, START - DAY, OPTIMISM, "dai-dai-stablecoin", 500_000_000, 500_000),
            report(2000, START - DAY, ARBITRUM, "dai-dai-stablecoin", 100_000_000, 100_000),
            // Not a daily snapshot.
            report(2500, START - DAY / 2, ARBITRUM, "dai-dai-stablecoin", 900_000_000, 900_000),
        ])
        .await
        .unwrap();

    let (_, body) = get_data(test_app.app).await;

    assert_eq!(
        body["aggregate"]["data"],
        serde_json::json!([["2021-09-05", 1000000.0, 0.1]])
    );
    assert_eq!(body["byProject"]["Optimism"]["byToken"], serde_json::json!({}));
}

#[tokio::test]
async fn test_store_failure_is_service_unavailable() {
    let registry = Registry::from_json(REGISTRY).unwrap();
    let controller = ReportController::new(
        Arc::new(MockReportStore::new().failing("connection refused")),
        Arc::new(registry),
        Tolerance::one(Granularity::Daily),
    );
    let app = api::create_router(AppState::new(Arc::new(controller)));

    let (status, body) = get_data(app).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}
