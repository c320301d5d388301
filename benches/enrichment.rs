//! Benchmark suite for the enrichment core
//!
//! Measures the delivery field normalizer and the batch enricher with an
//! in-process lookup client, so no network is involved.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use async_trait::async_trait;
use shipment_enricher::api::payload::{DeliveryDate, DeliveryTime, PackageEntry};
use shipment_enricher::core::normalize;
use shipment_enricher::{
    BatchEnricher, BearerCredential, EnrichmentResult, LookupClient, LookupError, Record,
    TrackingQuery,
};
use std::sync::Arc;

fn main() {
    divan::main();
}

/// Lookup client answering immediately
struct InstantClient;

#[async_trait]
impl LookupClient for InstantClient {
    async fn track(
        &self,
        _query: &TrackingQuery,
        _credential: &BearerCredential,
    ) -> Result<EnrichmentResult, LookupError> {
        tokio::task::yield_now().await;
        Ok(EnrichmentResult::new("Delivered", "02/01", "3:00 pm"))
    }
}

fn sample_package() -> PackageEntry {
    PackageEntry {
        current_status: None,
        delivery_date: Some(vec![
            DeliveryDate {
                kind: Some("SDD".to_string()),
                date: Some("20240204".to_string()),
            },
            DeliveryDate {
                kind: Some("DEL".to_string()),
                date: Some("20240205".to_string()),
            },
        ]),
        delivery_time: Some(DeliveryTime {
            end_time: Some("143000".to_string()),
        }),
    }
}

fn sample_records(rows: usize) -> Vec<Record> {
    (0..rows)
        .map(|i| {
            // Every tenth row has no tracking number
            let tracking = if i % 10 == 0 {
                String::new()
            } else {
                format!("1Z{:016}", i)
            };
            Record::from_pairs([("OrderId", i.to_string()), ("TrackingNumber", tracking)])
        })
        .collect()
}

/// Normalize a package entry with a delivery date and an end time
#[divan::bench]
fn normalize_package(bencher: divan::Bencher) {
    let package = sample_package();
    bencher.bench(|| normalize(divan::black_box(&package)));
}

/// Enrich batches of records with bounded concurrency
#[divan::bench(args = [100, 1_000, 10_000])]
fn enrich_batch(bencher: divan::Bencher, rows: usize) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create runtime");
    let enricher = BatchEnricher::new(Arc::new(InstantClient), 32);
    let credential = BearerCredential::new("bench-token");

    bencher
        .with_inputs(|| sample_records(rows))
        .bench_values(|records| runtime.block_on(enricher.run(records, &credential)));
}
