//! REST API integration tests.
//!
//! Exercises the full request path — routing, extractors, resource schema,
//! query engine, storage — against the in-memory backend:
//! - envelope shape on success and failure
//! - slug assignment, id-or-slug lookup, rename regeneration
//! - filtering, search, sorting, pagination metadata
//! - subscriber lifecycle, event registration, dashboard aggregation

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use acacia_persistence::backends::memory::MemoryStore;
use acacia_rest::{AppState, ServerConfig, routing};
use serde_json::{Value, json};

/// Creates a test server plus a handle on its backing store.
fn create_test_server() -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(Arc::clone(&store), ServerConfig::for_testing());
    let app = routing::create_routes(state);
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, store)
}

fn event_payload(title: &str) -> Value {
    json!({
        "title": title,
        "description": "A community event",
        "startDate": "2027-03-01T09:00:00Z",
        "endDate": "2027-03-01T17:00:00Z",
        "status": "upcoming",
        "type": "workshop",
    })
}

async fn create_event(server: &TestServer, title: &str) -> Value {
    let response = server.post("/api/events").json(&event_payload(title)).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["data"].clone()
}

mod envelope {
    use super::*;

    #[tokio::test]
    async fn test_success_envelope_shape() {
        let (server, _store) = create_test_server();
        let response = server.get("/health").await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["success"], true);
        assert!(body["message"].is_string());
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_failure_envelope_shape() {
        let (server, _store) = create_test_server();
        let response = server.get("/api/events/no-such-event").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Event not found");
        assert_eq!(body["data"], Value::Null);
    }

    #[tokio::test]
    async fn test_unknown_resource_is_404() {
        let (server, _store) = create_test_server();
        let response = server.get("/api/wizards").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}

mod slugs {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_slug_from_title() {
        let (server, _store) = create_test_server();
        let created = create_event(&server, "Annual Gala & Fundraiser!").await;
        assert_eq!(created["slug"], "annual-gala-fundraiser");
        assert!(created["id"].is_string());
    }

    #[tokio::test]
    async fn test_duplicate_titles_get_counter_suffix() {
        let (server, _store) = create_test_server();
        let first = create_event(&server, "Annual Report").await;
        let second = create_event(&server, "Annual Report").await;
        let third = create_event(&server, "Annual Report").await;

        assert_eq!(first["slug"], "annual-report");
        assert_eq!(second["slug"], "annual-report-1");
        assert_eq!(third["slug"], "annual-report-2");
    }

    #[tokio::test]
    async fn test_get_by_slug_and_by_id() {
        let (server, _store) = create_test_server();
        let created = create_event(&server, "Water Summit").await;
        let id = created["id"].as_str().unwrap();

        let by_slug = server.get("/api/events/water-summit").await;
        by_slug.assert_status_ok();
        assert_eq!(by_slug.json::<Value>()["data"]["id"], id);

        let by_id = server.get(&format!("/api/events/{}", id)).await;
        by_id.assert_status_ok();
        assert_eq!(by_id.json::<Value>()["data"]["slug"], "water-summit");
    }

    #[tokio::test]
    async fn test_title_change_regenerates_slug() {
        let (server, _store) = create_test_server();
        let created = create_event(&server, "Old Name").await;
        let id = created["id"].as_str().unwrap();

        let response = server
            .put(&format!("/api/events/{}", id))
            .json(&json!({"title": "New Name"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["slug"], "new-name");
    }

    #[tokio::test]
    async fn test_update_without_title_keeps_slug() {
        let (server, _store) = create_test_server();
        let created = create_event(&server, "Stable Event").await;
        let id = created["id"].as_str().unwrap();

        let response = server
            .put(&format!("/api/events/{}", id))
            .json(&json!({"capacity": 50}))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["data"]["slug"], "stable-event");
        assert_eq!(body["data"]["capacity"], 50);
    }

    #[tokio::test]
    async fn test_client_cannot_set_slug_directly() {
        let (server, _store) = create_test_server();
        let created = create_event(&server, "Locked Slug").await;
        let id = created["id"].as_str().unwrap();

        let response = server
            .put(&format!("/api/events/{}", id))
            .json(&json!({"slug": "hijacked"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["slug"], "locked-slug");
    }
}

mod validation {
    use super::*;

    #[tokio::test]
    async fn test_missing_required_fields_listed() {
        let (server, _store) = create_test_server();
        let response = server
            .post("/api/events")
            .json(&json!({"title": "Only a title"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        let details: Vec<&str> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(details.contains(&"description"));
        assert!(details.contains(&"startDate"));
        assert!(details.contains(&"endDate"));
    }

    #[tokio::test]
    async fn test_start_after_end_rejected() {
        let (server, _store) = create_test_server();
        let mut payload = event_payload("Backwards Event");
        payload["startDate"] = json!("2027-03-02T09:00:00Z");
        payload["endDate"] = json!("2027-03-01T09:00:00Z");

        let response = server.post("/api/events").json(&payload).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(
            response.json::<Value>()["message"]
                .as_str()
                .unwrap()
                .contains("before end date")
        );
    }

    #[tokio::test]
    async fn test_stringly_fields_are_coerced() {
        let (server, _store) = create_test_server();
        let mut payload = event_payload("Coerced Event");
        payload["capacity"] = json!("120");
        payload["isFeatured"] = json!("true");
        payload["tags"] = json!("health, water");
        payload["location"] = json!(r#"{"city": "Kisumu", "isOnline": false}"#);

        let response = server.post("/api/events").json(&payload).await;
        response.assert_status(StatusCode::CREATED);

        let data = &response.json::<Value>()["data"];
        assert_eq!(data["capacity"], 120);
        assert_eq!(data["isFeatured"], true);
        assert_eq!(data["tags"], json!(["health", "water"]));
        assert_eq!(data["location"]["city"], "Kisumu");
    }

    #[tokio::test]
    async fn test_unparseable_integer_rejected() {
        let (server, _store) = create_test_server();
        let mut payload = event_payload("Bad Capacity");
        payload["capacity"] = json!("lots");

        let response = server.post("/api/events").json(&payload).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

mod listing {
    use super::*;

    async fn seed_opportunities(server: &TestServer) {
        for (title, kind, status) in [
            ("Field Officer", "job", "active"),
            ("Research Fellow", "fellowship", "active"),
            ("Community Grant", "grant", "closed"),
        ] {
            let response = server
                .post("/api/opportunities")
                .json(&json!({
                    "title": title,
                    "type": kind,
                    "status": status,
                    "description": "An opening",
                    "location": "Nairobi",
                    "applicationDeadline": "2027-06-30",
                    "howToApply": "Send a letter",
                }))
                .await;
            response.assert_status(StatusCode::CREATED);
        }
    }

    #[tokio::test]
    async fn test_filter_by_allowed_field() {
        let (server, _store) = create_test_server();
        seed_opportunities(&server).await;

        let response = server.get("/api/opportunities?status=active").await;
        response.assert_status_ok();

        let data = &response.json::<Value>()["data"];
        assert_eq!(data["total"], 2);
        for item in data["items"].as_array().unwrap() {
            assert_eq!(item["status"], "active");
        }
    }

    #[tokio::test]
    async fn test_comma_value_means_set_membership() {
        let (server, _store) = create_test_server();
        seed_opportunities(&server).await;

        let response = server.get("/api/opportunities?type=job,grant").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["total"], 2);
    }

    #[tokio::test]
    async fn test_disallowed_filter_is_ignored() {
        let (server, _store) = create_test_server();
        seed_opportunities(&server).await;

        // howToApply is not in the opportunities allow-list.
        let response = server.get("/api/opportunities?howToApply=nope").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["total"], 3);
    }

    #[tokio::test]
    async fn test_pagination_metadata() {
        let (server, _store) = create_test_server();
        seed_opportunities(&server).await;

        let response = server.get("/api/opportunities?page=2&limit=2").await;
        response.assert_status_ok();

        let data = &response.json::<Value>()["data"];
        assert_eq!(data["page"], 2);
        assert_eq!(data["limit"], 2);
        assert_eq!(data["total"], 3);
        assert_eq!(data["pages"], 2);
        assert_eq!(data["hasNext"], false);
        assert_eq!(data["hasPrev"], true);
        assert_eq!(data["items"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_term() {
        let (server, _store) = create_test_server();
        seed_opportunities(&server).await;

        let response = server.get("/api/opportunities?search=fellow").await;
        response.assert_status_ok();

        let data = &response.json::<Value>()["data"];
        assert_eq!(data["total"], 1);
        assert_eq!(data["items"][0]["title"], "Research Fellow");
    }

    #[tokio::test]
    async fn test_sort_ascending_by_title() {
        let (server, _store) = create_test_server();
        seed_opportunities(&server).await;

        let response = server.get("/api/opportunities?sort=title").await;
        response.assert_status_ok();

        let titles: Vec<String> = response.json::<Value>()["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            titles,
            vec!["Community Grant", "Field Officer", "Research Fellow"]
        );
    }

    #[tokio::test]
    async fn test_boolean_filter_is_retyped() {
        let (server, _store) = create_test_server();
        let mut featured = event_payload("Featured One");
        featured["isFeatured"] = json!(true);
        server.post("/api/events").json(&featured).await;
        server
            .post("/api/events")
            .json(&event_payload("Plain One"))
            .await;

        let response = server.get("/api/events?isFeatured=true").await;
        response.assert_status_ok();

        let data = &response.json::<Value>()["data"];
        assert_eq!(data["total"], 1);
        assert_eq!(data["items"][0]["title"], "Featured One");
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn test_delete_then_404() {
        let (server, _store) = create_test_server();
        let created = create_event(&server, "Short Lived").await;
        let id = created["id"].as_str().unwrap();

        let response = server.delete(&format!("/api/events/{}", id)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"], Value::Null);

        server
            .get(&format!("/api/events/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server
            .delete(&format!("/api/events/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod events {
    use super::*;

    #[tokio::test]
    async fn test_upcoming_excludes_past_and_non_upcoming() {
        let (server, _store) = create_test_server();

        create_event(&server, "Future Event").await;

        let mut past = event_payload("Past Event");
        past["startDate"] = json!("2020-01-01T09:00:00Z");
        past["endDate"] = json!("2020-01-01T17:00:00Z");
        server.post("/api/events").json(&past).await;

        let mut cancelled = event_payload("Cancelled Event");
        cancelled["status"] = json!("cancelled");
        server.post("/api/events").json(&cancelled).await;

        let response = server.get("/api/events/upcoming").await;
        response.assert_status_ok();

        let items = response.json::<Value>()["data"].clone();
        let titles: Vec<String> = items
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["Future Event"]);
    }

    #[tokio::test]
    async fn test_featured_listing() {
        let (server, _store) = create_test_server();
        let mut featured = event_payload("Big Launch");
        featured["isFeatured"] = json!(true);
        server.post("/api/events").json(&featured).await;
        create_event(&server, "Ordinary Meetup").await;

        let response = server.get("/api/events/featured").await;
        response.assert_status_ok();

        let items = response.json::<Value>()["data"].clone();
        assert_eq!(items.as_array().unwrap().len(), 1);
        assert_eq!(items[0]["title"], "Big Launch");
    }

    #[tokio::test]
    async fn test_register_increments_count() {
        let (server, _store) = create_test_server();
        let created = create_event(&server, "Open Workshop").await;
        let id = created["id"].as_str().unwrap();

        let response = server
            .post(&format!("/api/events/{}/register", id))
            .json(&json!({"name": "Amina", "email": "amina@example.org"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["registeredCount"], 1);

        let response = server
            .post(&format!("/api/events/{}/register", id))
            .json(&json!({}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["registeredCount"], 2);
    }

    #[tokio::test]
    async fn test_register_full_event_rejected() {
        let (server, _store) = create_test_server();
        let mut payload = event_payload("Tiny Venue");
        payload["capacity"] = json!(1);
        let response = server.post("/api/events").json(&payload).await;
        let id = response.json::<Value>()["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        server
            .post(&format!("/api/events/{}/register", id))
            .json(&json!({}))
            .await
            .assert_status_ok();

        let response = server
            .post(&format!("/api/events/{}/register", id))
            .json(&json!({}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "Event is full");
    }

    #[tokio::test]
    async fn test_register_cancelled_event_rejected() {
        let (server, _store) = create_test_server();
        let mut payload = event_payload("Called Off");
        payload["status"] = json!("cancelled");
        let response = server.post("/api/events").json(&payload).await;
        let id = response.json::<Value>()["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        server
            .post(&format!("/api/events/{}/register", id))
            .json(&json!({}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

mod publications {
    use super::*;

    #[tokio::test]
    async fn test_download_increments_counter() {
        let (server, _store) = create_test_server();
        let response = server
            .post("/api/publications")
            .json(&json!({
                "title": "Impact Handbook",
                "type": "handbook",
                "description": "How we measure impact",
                "file": {"url": "https://cdn.example.org/impact.pdf", "format": "pdf"},
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/publications/impact-handbook/download")
            .await;
        response.assert_status_ok();

        let data = &response.json::<Value>()["data"];
        assert_eq!(data["downloadCount"], 1);
        assert_eq!(data["file"]["format"], "pdf");

        let response = server
            .post("/api/publications/impact-handbook/download")
            .await;
        assert_eq!(response.json::<Value>()["data"]["downloadCount"], 2);
    }
}

mod subscribers {
    use super::*;

    #[tokio::test]
    async fn test_subscribe_unsubscribe_resubscribe() {
        let (server, _store) = create_test_server();

        let response = server
            .post("/api/subscribers")
            .json(&json!({"email": "Pat@Example.org", "name": "Pat"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let data = &response.json::<Value>()["data"];
        assert_eq!(data["email"], "pat@example.org");
        assert_eq!(data["isActive"], true);

        // Active duplicate is a conflict, case-insensitively.
        server
            .post("/api/subscribers")
            .json(&json!({"email": "pat@example.org"}))
            .await
            .assert_status(StatusCode::CONFLICT);

        server
            .post("/api/subscribers/unsubscribe")
            .json(&json!({"email": "pat@example.org"}))
            .await
            .assert_status_ok();

        // Re-subscribing reactivates the existing record.
        let response = server
            .post("/api/subscribers")
            .json(&json!({"email": "pat@example.org"}))
            .await;
        response.assert_status_ok();
        let data = &response.json::<Value>()["data"];
        assert_eq!(data["isActive"], true);
        assert!(data.get("unsubscribedAt").is_none());
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let (server, _store) = create_test_server();
        server
            .post("/api/subscribers")
            .json(&json!({"email": "not-an-email"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unsubscribe_unknown_email_404() {
        let (server, _store) = create_test_server();
        server
            .post("/api/subscribers/unsubscribe")
            .json(&json!({"email": "ghost@example.org"}))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_listing_filters_any_field() {
        let (server, _store) = create_test_server();
        for email in ["a@example.org", "b@example.org"] {
            server
                .post("/api/subscribers")
                .json(&json!({"email": email, "source": "footer"}))
                .await
                .assert_status(StatusCode::CREATED);
        }
        server
            .post("/api/subscribers/unsubscribe")
            .json(&json!({"email": "b@example.org"}))
            .await
            .assert_status_ok();

        // Empty allow-list: isActive passes straight through and is retyped.
        let response = server.get("/api/subscribers?isActive=true").await;
        response.assert_status_ok();

        let data = &response.json::<Value>()["data"];
        assert_eq!(data["total"], 1);
        assert_eq!(data["items"][0]["email"], "a@example.org");
    }
}

mod slug_races {
    use super::*;
    use async_trait::async_trait;
    use acacia_persistence::core::DocumentStore;
    use acacia_persistence::error::StorageResult;
    use acacia_persistence::query::{FilterSpec, ListQuery};
    use acacia_persistence::types::{Page, StoredDocument};

    /// Store whose slug probe always reports "free", simulating the window
    /// where a concurrent writer has resolved the same slug but not yet
    /// committed. Writes still hit the real uniqueness check.
    struct BlindProbeStore(MemoryStore);

    #[async_trait]
    impl DocumentStore for BlindProbeStore {
        fn backend_name(&self) -> &'static str {
            "blind-probe"
        }

        async fn insert(&self, collection: &str, content: Value) -> StorageResult<StoredDocument> {
            self.0.insert(collection, content).await
        }

        async fn find_by_id(
            &self,
            collection: &str,
            id: &str,
        ) -> StorageResult<Option<StoredDocument>> {
            self.0.find_by_id(collection, id).await
        }

        async fn find_by_slug(
            &self,
            collection: &str,
            slug: &str,
        ) -> StorageResult<Option<StoredDocument>> {
            self.0.find_by_slug(collection, slug).await
        }

        async fn list(
            &self,
            collection: &str,
            query: &ListQuery,
        ) -> StorageResult<Page<StoredDocument>> {
            self.0.list(collection, query).await
        }

        async fn update(
            &self,
            collection: &str,
            id: &str,
            content: Value,
        ) -> StorageResult<StoredDocument> {
            self.0.update(collection, id, content).await
        }

        async fn delete(&self, collection: &str, id: &str) -> StorageResult<()> {
            self.0.delete(collection, id).await
        }

        async fn count(&self, collection: &str, filter: &FilterSpec) -> StorageResult<u64> {
            self.0.count(collection, filter).await
        }

        async fn slug_exists(&self, _: &str, _: &str, _: Option<&str>) -> StorageResult<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_lost_race_retries_with_suffix() {
        let state = AppState::new(
            Arc::new(BlindProbeStore(MemoryStore::new())),
            ServerConfig::for_testing(),
        );
        let server =
            TestServer::new(routing::create_routes(state)).expect("Failed to create test server");

        let first = server
            .post("/api/events")
            .json(&event_payload("Annual Report"))
            .await;
        first.assert_status(StatusCode::CREATED);
        assert_eq!(first.json::<Value>()["data"]["slug"], "annual-report");

        // The probe claims "annual-report" is free, so the resolver returns
        // the base slug again; the store rejects it and the handler retries
        // with a millis suffix instead of failing the create.
        let second = server
            .post("/api/events")
            .json(&event_payload("Annual Report"))
            .await;
        second.assert_status(StatusCode::CREATED);

        let slug = second.json::<Value>()["data"]["slug"]
            .as_str()
            .unwrap()
            .to_string();
        assert_ne!(slug, "annual-report");
        assert!(slug.starts_with("annual-report-"));
    }
}

mod store_failures {
    use super::*;
    use async_trait::async_trait;
    use acacia_persistence::core::DocumentStore;
    use acacia_persistence::error::{BackendError, StorageError, StorageResult};
    use acacia_persistence::query::{FilterSpec, ListQuery};
    use acacia_persistence::types::{Page, StoredDocument};

    /// Store whose every operation fails, standing in for an unreachable
    /// database.
    struct FailingStore;

    fn unavailable<T>() -> StorageResult<T> {
        Err(StorageError::Backend(BackendError::internal(
            "failing",
            "store unavailable",
        )))
    }

    #[async_trait]
    impl DocumentStore for FailingStore {
        fn backend_name(&self) -> &'static str {
            "failing"
        }

        async fn insert(&self, _: &str, _: Value) -> StorageResult<StoredDocument> {
            unavailable()
        }

        async fn find_by_id(&self, _: &str, _: &str) -> StorageResult<Option<StoredDocument>> {
            unavailable()
        }

        async fn find_by_slug(&self, _: &str, _: &str) -> StorageResult<Option<StoredDocument>> {
            unavailable()
        }

        async fn list(&self, _: &str, _: &ListQuery) -> StorageResult<Page<StoredDocument>> {
            unavailable()
        }

        async fn update(&self, _: &str, _: &str, _: Value) -> StorageResult<StoredDocument> {
            unavailable()
        }

        async fn delete(&self, _: &str, _: &str) -> StorageResult<()> {
            unavailable()
        }

        async fn count(&self, _: &str, _: &FilterSpec) -> StorageResult<u64> {
            unavailable()
        }

        async fn slug_exists(&self, _: &str, _: &str, _: Option<&str>) -> StorageResult<bool> {
            unavailable()
        }
    }

    fn failing_server() -> TestServer {
        let state = AppState::new(Arc::new(FailingStore), ServerConfig::for_testing());
        TestServer::new(routing::create_routes(state)).expect("Failed to create test server")
    }

    #[tokio::test]
    async fn test_list_maps_backend_failure_to_500_envelope() {
        let server = failing_server();
        let response = server.get("/api/events").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        // Backend detail stays out of the client-facing message.
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_create_surfaces_slug_probe_failure() {
        let server = failing_server();
        let response = server
            .post("/api/events")
            .json(&event_payload("Doomed Event"))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}

mod dashboard {
    use super::*;

    #[tokio::test]
    async fn test_stats_counts_and_activity() {
        let (server, _store) = create_test_server();
        create_event(&server, "Counted Event").await;
        server
            .post("/api/subscribers")
            .json(&json!({"email": "count@example.org"}))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.get("/api/dashboard/stats").await;
        response.assert_status_ok();

        let data = &response.json::<Value>()["data"];
        assert_eq!(data["counts"]["events"], 1);
        assert_eq!(data["counts"]["upcomingEvents"], 1);
        assert_eq!(data["counts"]["subscribers"], 1);
        assert_eq!(data["counts"]["reports"], 0);

        let activity = data["recentActivity"].as_array().unwrap();
        assert_eq!(activity.len(), 1);
        assert_eq!(activity[0]["model"], "Event");
        assert_eq!(activity[0]["title"], "Counted Event");
    }
}
