use std::sync::Arc;

use server::config::LinksConfig;

use crate::common::{FailingStore, PanicStore, TestApp, media, routes, seeded_store};

mod lookup {
    use super::*;

    #[tokio::test]
    async fn returns_entry_and_all_media() {
        let app = TestApp::spawn(seeded_store()).await;

        let res = app.get(&routes::lookup("abc123")).await;

        assert_eq!(res.status, 200, "body: {}", res.text);
        assert_eq!(res.body["entry"]["id"], "abc123");
        assert_eq!(res.body["entry"]["title"], "Hofladen Sonnenschein");
        assert_eq!(res.body["entry"]["news"][0]["createdAt"], "2025-03-01T09:00:00Z");
        assert_eq!(res.body["media"].as_array().unwrap().len(), 2);
        assert_eq!(res.body["media"][0]["type"], "image");
    }

    #[tokio::test]
    async fn sets_shared_cache_policy() {
        let app = TestApp::spawn(seeded_store()).await;

        let res = app.get(&routes::lookup("abc123")).await;

        assert_eq!(
            res.cache_control.as_deref(),
            Some("s-maxage=30, stale-while-revalidate=300")
        );
    }

    #[tokio::test]
    async fn entry_without_media_has_empty_list() {
        let app = TestApp::spawn(seeded_store()).await;

        let res = app.get(&routes::lookup("def456")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["media"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn unknown_kinds_are_passed_through() {
        let store = seeded_store().with_media(media("m3", "abc123", "video", "clip.mp4"));
        let app = TestApp::spawn(store).await;

        let res = app.get(&routes::lookup("abc123")).await;

        assert_eq!(res.body["media"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn id_is_used_verbatim() {
        let app = TestApp::spawn(seeded_store()).await;

        let res = app.get(&routes::lookup("qrx:abc123")).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn concurrent_lookups_stay_separate() {
        let app = TestApp::spawn(seeded_store()).await;

        let a_url = routes::lookup("abc123");
        let b_url = routes::lookup("def456");
        let (a, b) = tokio::join!(app.get(&a_url), app.get(&b_url));

        assert_eq!(a.body["entry"]["id"], "abc123");
        assert_eq!(b.body["entry"]["id"], "def456");
        assert_eq!(a.body["media"].as_array().unwrap().len(), 2);
        assert_eq!(b.body["media"].as_array().unwrap().len(), 0);
    }
}

mod errors {
    use super::*;

    #[tokio::test]
    async fn missing_id_is_bad_request() {
        let app = TestApp::spawn(seeded_store()).await;

        let res = app.get("/api/qrx").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body, serde_json::json!({ "error": "Missing id" }));
    }

    #[tokio::test]
    async fn empty_id_is_bad_request() {
        let app = TestApp::spawn(seeded_store()).await;

        let res = app.get(&routes::lookup("")).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "Missing id");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn(seeded_store()).await;

        let res = app.get(&routes::lookup("nope")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body, serde_json::json!({ "error": "QRX_NOT_FOUND" }));
        assert!(res.cache_control.is_none());
    }

    #[tokio::test]
    async fn unconfigured_server_reports_configuration_error() {
        let app = TestApp::spawn_unconfigured().await;

        let res = app.get(&routes::lookup("abc123")).await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body, serde_json::json!({ "error": "Server not configured" }));
    }

    #[tokio::test]
    async fn unconfigured_server_still_checks_input_first() {
        let app = TestApp::spawn_unconfigured().await;

        let res = app.get("/api/qrx").await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn repeated_id_is_bad_request() {
        let app = TestApp::spawn(seeded_store()).await;

        let res = app.get("/api/qrx?id=abc123&id=def456").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body, serde_json::json!({ "error": "Missing id" }));
    }

    #[tokio::test]
    async fn handler_panic_is_masked_server_error() {
        let app = TestApp::spawn_with(Some(Arc::new(PanicStore)), LinksConfig::default()).await;

        let res = app.get(&routes::lookup("abc123")).await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body, serde_json::json!({ "error": "Server error" }));
        assert!(!res.text.contains("store exploded"));
    }

    #[tokio::test]
    async fn entry_lookup_failure_is_bad_gateway() {
        let app = TestApp::spawn(FailingStore::entries_down(seeded_store())).await;

        let res = app.get(&routes::lookup("abc123")).await;

        assert_eq!(res.status, 502);
        assert_eq!(res.body["error"], "Supabase error (entries)");
        assert_eq!(res.body["detail"], "upstream unavailable");
    }

    #[tokio::test]
    async fn media_lookup_failure_is_bad_gateway() {
        let app = TestApp::spawn(FailingStore::media_down(seeded_store())).await;

        let res = app.get(&routes::lookup("abc123")).await;

        assert_eq!(res.status, 502);
        assert_eq!(res.body["error"], "Supabase error (media)");
        assert_eq!(res.body["detail"], "upstream unavailable");
    }
}

mod docs {
    use super::*;

    #[tokio::test]
    async fn openapi_describes_lookup() {
        let app = TestApp::spawn(seeded_store()).await;

        let res = app.get(routes::OPENAPI).await;

        assert_eq!(res.status, 200);
        assert!(res.body["paths"]["/api/qrx"]["get"].is_object());
    }
}
