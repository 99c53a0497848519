// src/services/enrichment_service.rs
// DOCUMENTATION: Per-place detail enrichment
// PURPOSE: Turn search summaries into detailed records, one lookup at a time

use crate::models::{PlaceDetail, PlaceSummary};
use crate::services::GoogleMapsClient;

/// Enrichment statistics
/// DOCUMENTATION: Records produced plus what was skipped or failed
#[derive(Debug, Default)]
pub struct EnrichmentOutcome {
    /// Successfully enriched records, in summary order
    pub records: Vec<PlaceDetail>,
    /// Identifiers Google no longer knows about (ZERO_RESULTS / NOT_FOUND)
    pub skipped: Vec<String>,
    /// Identifiers whose lookup failed
    pub failed: Vec<String>,
}

pub struct EnrichmentService;

impl EnrichmentService {
    /// Enrich every summary sequentially
    /// DOCUMENTATION: A failed lookup is logged and skipped. It never aborts
    /// the batch, so the output holds every summary that could be enriched.
    pub async fn enrich_all(
        client: &GoogleMapsClient,
        summaries: &[PlaceSummary],
    ) -> EnrichmentOutcome {
        let mut outcome = EnrichmentOutcome::default();

        for (idx, summary) in summaries.iter().enumerate() {
            log::debug!(
                "Fetching details {}/{}: {}",
                idx + 1,
                summaries.len(),
                summary.id
            );

            match client.place_details(&summary.id).await {
                Ok(Some(details)) => {
                    outcome.records.push(details.into_place_detail(summary));
                }
                Ok(None) => {
                    log::debug!("No details available for {}", summary.id);
                    outcome.skipped.push(summary.id.clone());
                }
                Err(e) => {
                    log::warn!("Could not fetch details for {}: {}", summary.id, e);
                    outcome.failed.push(summary.id.clone());
                }
            }
        }

        log::info!(
            "Enrichment finished: {} enriched, {} skipped, {} failed",
            outcome.records.len(),
            outcome.skipped.len(),
            outcome.failed.len()
        );

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn summary(id: &str) -> PlaceSummary {
        PlaceSummary {
            id: id.to_string(),
            name: format!("Summary {}", id),
            address: format!("{} Main St", id),
        }
    }

    async fn mount_detail(server: &MockServer, id: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/place/details/json"))
            .and(query_param("place_id", id))
            .respond_with(template)
            .mount(server)
            .await;
    }

    fn ok_detail(name: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": { "name": name, "formatted_phone_number": "(555) 010-0000" }
        }))
    }

    #[tokio::test]
    async fn test_single_failure_does_not_abort_batch() {
        let server = MockServer::start().await;
        mount_detail(&server, "p1", ok_detail("One")).await;
        mount_detail(
            &server,
            "p2",
            ResponseTemplate::new(200).set_body_json(json!({
                "status": "OVER_QUERY_LIMIT",
                "error_message": "You have exceeded your daily request quota."
            })),
        )
        .await;
        mount_detail(&server, "p3", ok_detail("Three")).await;

        let client =
            GoogleMapsClient::new("test-key".to_string(), &server.uri(), Duration::from_secs(5))
                .unwrap();
        let summaries = vec![summary("p1"), summary("p2"), summary("p3")];
        let outcome = EnrichmentService::enrich_all(&client, &summaries).await;

        let ids: Vec<&str> = outcome.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
        assert_eq!(outcome.failed, vec!["p2".to_string()]);
        assert!(outcome.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_http_failure_and_not_found_are_isolated() {
        let server = MockServer::start().await;
        mount_detail(&server, "p1", ResponseTemplate::new(500)).await;
        mount_detail(
            &server,
            "p2",
            ResponseTemplate::new(200).set_body_json(json!({ "status": "NOT_FOUND" })),
        )
        .await;
        mount_detail(&server, "p3", ok_detail("Three")).await;

        let client =
            GoogleMapsClient::new("test-key".to_string(), &server.uri(), Duration::from_secs(5))
                .unwrap();
        let summaries = vec![summary("p1"), summary("p2"), summary("p3")];
        let outcome = EnrichmentService::enrich_all(&client, &summaries).await;

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].name, "Three");
        assert_eq!(outcome.failed, vec!["p1".to_string()]);
        assert_eq!(outcome.skipped, vec!["p2".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_name_and_address_fall_back_to_summary() {
        let server = MockServer::start().await;
        mount_detail(
            &server,
            "p1",
            ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "result": { "website": "https://example.com" }
            })),
        )
        .await;

        let client =
            GoogleMapsClient::new("test-key".to_string(), &server.uri(), Duration::from_secs(5))
                .unwrap();
        let outcome = EnrichmentService::enrich_all(&client, &[summary("p1")]).await;

        let record = &outcome.records[0];
        assert_eq!(record.name, "Summary p1");
        assert_eq!(record.address, "p1 Main St");
        assert_eq!(record.website.as_deref(), Some("https://example.com"));
        assert!(record.types.is_empty());
    }
}
