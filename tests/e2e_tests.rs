//! End-to-end integration tests
//!
//! These tests validate the complete enrichment pipeline against a mock carrier
//! API. Each fixture test:
//! 1. Copies input.csv from a fixture directory into a temporary directory
//! 2. Runs the pipeline (load, token exchange, lookups, write-back) on the copy
//! 3. Compares the rewritten file with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - A mixed batch (delivered, missing tracking number, API error, in transit, malformed payload)
//! - Re-running on an already enriched file
//! - A file without any tracking numbers

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use httpmock::{Method, MockServer};
    use rstest::rstest;
    use serde_json::json;
    use shipment_enricher::config::Config;
    use shipment_enricher::types::{
        ARRIVAL_DATE_COLUMN, ARRIVAL_TIME_COLUMN, STATUS_COLUMN,
    };
    use shipment_enricher::{
        BatchEnricher, BearerCredential, EnrichConfig, EnrichError, EnrichmentPipeline,
        EnrichmentResult, LookupClient, LookupError, Record, RecordStore, TrackingQuery,
    };
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use tempfile::TempDir;

    const TOKEN_PATH: &str = "/security/v1/oauth/token";
    const TRACKING_PATH: &str = "/api/track/v1/details";

    /// Start a mock carrier API answering for the fixture tracking numbers
    fn start_carrier_api() -> MockServer {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(Method::POST).path(TOKEN_PATH);
            then.status(200)
                .json_body(json!({ "token_type": "Bearer", "access_token": "e2e-token" }));
        });

        server.mock(|when, then| {
            when.method(Method::GET)
                .path(format!("{}/1ZA", TRACKING_PATH))
                .header("authorization", "Bearer e2e-token");
            then.status(200).json_body(json!({
                "trackResponse": { "shipment": [{ "package": [{
                    "currentStatus": { "description": "Delivered" },
                    "deliveryDate": [{ "type": "DEL", "date": "20240201" }],
                    "deliveryTime": { "type": "DEL", "endTime": "150000" }
                }]}]}
            }));
        });

        server.mock(|when, then| {
            when.method(Method::GET).path(format!("{}/1ZB", TRACKING_PATH));
            then.status(400).json_body(json!({
                "response": { "errors": [{ "code": "151018", "message": "Invalid tracking number" }] }
            }));
        });

        server.mock(|when, then| {
            when.method(Method::GET).path(format!("{}/1ZC", TRACKING_PATH));
            then.status(200).json_body(json!({
                "trackResponse": { "shipment": [{ "package": [{
                    "currentStatus": { "description": "On the Way" },
                    "deliveryDate": [
                        { "type": "SDD", "date": "20240204" },
                        { "type": "DEL", "date": "20240205" }
                    ],
                    "deliveryTime": { "type": "EOD", "endTime": "0900" }
                }]}]}
            }));
        });

        server.mock(|when, then| {
            when.method(Method::GET).path(format!("{}/1ZD", TRACKING_PATH));
            then.status(200)
                .json_body(json!({ "trackResponse": { "shipment": [] } }));
        });

        server
    }

    fn config_for(server: &MockServer) -> Config {
        Config {
            client_id: "e2e-id".to_string(),
            client_secret: "e2e-secret".to_string(),
            token_url: server.url(TOKEN_PATH),
            tracking_url: server.url(TRACKING_PATH),
            trans_id: "e2e".to_string(),
            transaction_src: "tests".to_string(),
        }
    }

    /// Copy a fixture's input.csv into a fresh temporary directory
    fn stage_input(fixture_dir: &Path) -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let staged = dir.path().join("orders.csv");
        fs::copy(fixture_dir.join("input.csv"), &staged)
            .unwrap_or_else(|e| panic!("Failed to stage {}: {}", fixture_dir.display(), e));
        (dir, staged)
    }

    /// Run a fixture through the pipeline and compare with expected.csv
    async fn run_test_fixture(fixture_name: &str, max_concurrent: usize) {
        let fixture_dir = Path::new("tests/fixtures").join(fixture_name);
        let expected_path = fixture_dir.join("expected.csv");
        assert!(
            expected_path.exists(),
            "Expected file not found: {}",
            expected_path.display()
        );

        let server = start_carrier_api();
        let (_dir, staged) = stage_input(&fixture_dir);

        let config = EnrichConfig::new(max_concurrent, std::time::Duration::from_secs(5));
        let pipeline = EnrichmentPipeline::from_config(&config_for(&server), config)
            .expect("Failed to build pipeline");

        pipeline
            .run(&staged)
            .await
            .unwrap_or_else(|e| panic!("Failed to enrich {}: {}", fixture_name, e));

        let actual_output = fs::read_to_string(&staged).expect("Failed to read enriched file");
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file: {}", e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (max_concurrent: {})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, max_concurrent, actual_output, expected_output
        );
    }

    /// End-to-end test for all fixtures, serial and concurrent
    #[rstest]
    #[case("mixed_batch")]
    #[case("already_enriched")]
    #[case("no_tracking_numbers")]
    #[tokio::test]
    async fn test_fixtures(#[case] fixture: &str, #[values(1, 8)] max_concurrent: usize) {
        run_test_fixture(fixture, max_concurrent).await;
    }

    #[tokio::test]
    async fn test_rerun_is_stable() {
        let server = start_carrier_api();
        let (_dir, staged) = stage_input(Path::new("tests/fixtures/mixed_batch"));
        let pipeline = EnrichmentPipeline::from_config(&config_for(&server), EnrichConfig::default())
            .expect("Failed to build pipeline");

        pipeline.run(&staged).await.unwrap();
        let first = fs::read_to_string(&staged).unwrap();
        pipeline.run(&staged).await.unwrap();
        let second = fs::read_to_string(&staged).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_rejected_credentials_leave_file_untouched() {
        let server = MockServer::start();
        let tracking = server.mock(|when, then| {
            when.method(Method::GET);
            then.status(200);
        });
        server.mock(|when, then| {
            when.method(Method::POST).path(TOKEN_PATH);
            then.status(401).json_body(json!({
                "response": { "errors": [{ "code": "10401", "message": "ClientId is Invalid" }] }
            }));
        });

        let (_dir, staged) = stage_input(Path::new("tests/fixtures/mixed_batch"));
        let before = fs::read_to_string(&staged).unwrap();
        let pipeline = EnrichmentPipeline::from_config(&config_for(&server), EnrichConfig::default())
            .expect("Failed to build pipeline");

        let error = pipeline.run(&staged).await.unwrap_err();

        assert!(matches!(error, EnrichError::Auth { .. }));
        assert_eq!(tracking.hits(), 0);
        assert_eq!(fs::read_to_string(&staged).unwrap(), before);
    }

    /// Stub client: success for `A`, transport failure for `B`
    struct ScenarioClient;

    #[async_trait]
    impl LookupClient for ScenarioClient {
        async fn track(
            &self,
            query: &TrackingQuery,
            _credential: &BearerCredential,
        ) -> Result<EnrichmentResult, LookupError> {
            if query.as_str().ends_with('A') {
                Ok(EnrichmentResult::new("Delivered", "02/01", "3:00 pm"))
            } else {
                Err(LookupError::Transport {
                    message: "error sending request: connection refused".to_string(),
                })
            }
        }
    }

    #[tokio::test]
    async fn test_enricher_and_store_scenario() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.csv");
        let store = RecordStore::new(&path);

        let records = vec![
            Record::from_pairs([("TrackingNumber", "1Z...A")]),
            Record::from_pairs([("TrackingNumber", "")]),
            Record::from_pairs([("TrackingNumber", "1Z...B")]),
        ];
        let enricher = BatchEnricher::new(Arc::new(ScenarioClient), 4);
        let enriched = enricher
            .run(records, &BearerCredential::new("token"))
            .await;

        let fields: Vec<(&str, &str, &str)> = enriched
            .iter()
            .map(|r| {
                (
                    r.get(STATUS_COLUMN).unwrap(),
                    r.get(ARRIVAL_DATE_COLUMN).unwrap(),
                    r.get(ARRIVAL_TIME_COLUMN).unwrap(),
                )
            })
            .collect();
        assert_eq!(
            fields,
            vec![
                ("Delivered", "02/01", "3:00 pm"),
                ("", "", ""),
                ("Error: error sending request: connection refused", "", ""),
            ]
        );

        store.save(&enriched).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "TrackingNumber,Status,ArrivalDate,ArrivalTime\n\
             1Z...A,Delivered,02/01,3:00 pm\n\
             ,,,\n\
             1Z...B,Error: error sending request: connection refused,,\n"
        );
    }
}
