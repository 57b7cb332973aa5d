//! Behavior tests for both client variants against local HTTP servers.
//!
//! mockito covers the single-response cases (status mapping, query
//! propagation, caching). Retry sequences need a different status per
//! attempt on the same URL, which mockito cannot script, so those use a
//! minimal scripted server that serves canned responses in order.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;
use std::time::Duration;

use mockito::Matcher;

use dpd_client::blocking;
use dpd_client::client::DpdClient;
use dpd_client::error::{DpdError, HttpError};
use dpd_client::http::retry::RetryConfig;
use dpd_client::params::{ActiveIngredientParams, DrugProductParams, Language};

/// Retry config for tests: deterministic and fast.
fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig::new(max_attempts)
        .with_initial_delay(Duration::from_millis(5))
        .without_jitter()
}

fn async_client(base_url: &str) -> DpdClient {
    DpdClient::builder()
        .base_url(base_url)
        .retry(fast_retry(3))
        .build()
        .unwrap()
}

fn blocking_client(base_url: &str) -> blocking::DpdClient {
    blocking::DpdClient::builder()
        .base_url(base_url)
        .retry(fast_retry(3))
        .build_blocking()
        .unwrap()
}

/// Serve the given (status, body) responses in order, one connection per
/// response, then stop. Returns the base URL and a handle yielding the
/// number of requests served.
fn scripted_server(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<usize>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = std::thread::spawn(move || {
        let mut served = 0;
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            // read the full request head before responding
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).unwrap();
                head.extend_from_slice(&buf[..n]);
                if n == 0 || head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let reason = match status {
                200 => "OK",
                429 => "Too Many Requests",
                503 => "Service Unavailable",
                _ => "Error",
            };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            served += 1;
        }
        served
    });
    (format!("http://{addr}"), handle)
}

// =============================================================================
// Async client
// =============================================================================

mod async_client_tests {
    use super::*;

    #[tokio::test]
    async fn test_din_lookup_with_default_lang() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/drugproduct/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("type".into(), "json".into()),
                Matcher::UrlEncoded("lang".into(), "en".into()),
                Matcher::UrlEncoded("din".into(), "00326925".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"drug_code": 2049, "brand_name": "SINEQUAN",
                     "drug_identification_number": "00326925",
                     "new_upstream_field": "kept"}]"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = async_client(&server.url());
        let products = client
            .drug_product(DrugProductParams::new().with_din("00326925"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].brand_name.as_deref(), Some("SINEQUAN"));
        assert_eq!(
            products[0].drug_identification_number.as_deref(),
            Some("00326925")
        );
        // unknown upstream fields pass through unchanged
        assert_eq!(products[0].extra["new_upstream_field"], "kept");
    }

    #[tokio::test]
    async fn test_single_object_body_wraps_into_one_record() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/drugproduct/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"drug_code": 1, "brand_name": "Example"}"#)
            .create_async()
            .await;

        let client = async_client(&server.url());
        let products = client
            .drug_product(DrugProductParams::new().with_din("00000000"))
            .await
            .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].brand_name.as_deref(), Some("Example"));
    }

    #[tokio::test]
    async fn test_empty_array_is_no_matches_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/drugproduct/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = async_client(&server.url());
        let products = client
            .drug_product(DrugProductParams::new().with_brandname("NOSUCH"))
            .await
            .unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_404_fails_after_exactly_one_attempt() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/drugproduct/")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body("not found")
            .expect(1)
            .create_async()
            .await;

        let client = async_client(&server.url());
        let err = client
            .drug_product(DrugProductParams::new().with_din("99999999"))
            .await
            .unwrap_err();

        mock.assert_async().await;
        match err {
            DpdError::Http(HttpError::Status { status, body, .. }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error_with_zero_retries() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/drugproduct/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .expect(1)
            .create_async()
            .await;

        let client = async_client(&server.url());
        let err = client
            .drug_product(DrugProductParams::new().with_din("00326925"))
            .await
            .unwrap_err();

        mock.assert_async().await;
        match err {
            DpdError::Http(HttpError::Decode { snippet, .. }) => {
                assert!(snippet.contains("not json"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_params_fail_before_any_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/drugproduct/")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = async_client(&server.url());
        let err = client
            .drug_product(DrugProductParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DpdError::InvalidParameter(_)));

        let err = client
            .active_ingredient(ActiveIngredientParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DpdError::InvalidParameter(_)));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_retries_on_5xx_then_succeeds() {
        let (url, handle) = scripted_server(vec![
            (503, "err1"),
            (503, "err2"),
            (200, r#"[{"drug_code": 2, "drug_identification_number": "11111111"}]"#),
        ]);

        let client = async_client(&url);
        let products = client
            .drug_product(DrugProductParams::new().with_din("11111111"))
            .await
            .unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(handle.join().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_429_is_retryable() {
        let (url, handle) = scripted_server(vec![
            (429, "slow down"),
            (200, r#"[{"drug_code": 3}]"#),
        ]);

        let client = async_client(&url);
        let products = client
            .drug_product(DrugProductParams::new().with_id(3))
            .await
            .unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(handle.join().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_retries_surface_last_status() {
        let (url, handle) = scripted_server(vec![(503, "a"), (503, "b"), (503, "c")]);

        let client = async_client(&url);
        let err = client
            .drug_product(DrugProductParams::new().with_din("11111111"))
            .await
            .unwrap_err();

        assert_eq!(handle.join().unwrap(), 3);
        match err {
            DpdError::Http(HttpError::Status { status, body, .. }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "c");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_caching_prevents_second_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/drugproduct/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"drug_code": 1, "drug_identification_number": "00000000"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = DpdClient::builder()
            .base_url(server.url())
            .cache_ttl(Duration::from_secs(60))
            .build()
            .unwrap();

        let first = client
            .drug_product(DrugProductParams::new().with_din("00000000"))
            .await
            .unwrap();
        let second = client
            .drug_product(DrugProductParams::new().with_din("00000000"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_expiry_triggers_new_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/company/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"company_code": 101, "company_name": "ACME"}]"#)
            .expect(2)
            .create_async()
            .await;

        let client = DpdClient::builder()
            .base_url(server.url())
            .cache_ttl(Duration::from_millis(40))
            .build()
            .unwrap();

        client.company(101, None).await.unwrap();
        client.company(101, None).await.unwrap(); // cache hit
        tokio::time::sleep(Duration::from_millis(80)).await;
        client.company(101, None).await.unwrap(); // expired, refetch

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_packaging_sends_no_lang() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/packaging/")
            .match_query(Matcher::Regex("^type=json&id=11685$".into()))
            .with_status(200)
            .with_body(r#"{"drug_code": 11685, "package_type": "Blister Pack"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = async_client(&server.url());
        let packaging = client.packaging(11685).await.unwrap();

        mock.assert_async().await;
        assert_eq!(packaging[0].package_type.as_deref(), Some("Blister Pack"));
    }

    #[tokio::test]
    async fn test_form_maps_active_true_to_yes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/form/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("id".into(), "5".into()),
                Matcher::UrlEncoded("active".into(), "yes".into()),
            ]))
            .with_status(200)
            .with_body(r#"[{"drug_code": 5, "pharmaceutical_form_name": "Tablet"}]"#)
            .expect(1)
            .create_async()
            .await;

        let client = async_client(&server.url());
        client.form(5, Some(true), None).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_lang_override_is_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/company/")
            .match_query(Matcher::UrlEncoded("lang".into(), "fr".into()))
            .with_status(200)
            .with_body(r#"[{"company_code": 1, "company_name": "ACME"}]"#)
            .expect(1)
            .create_async()
            .await;

        let client = async_client(&server.url());
        client.company(1, Some(Language::Fr)).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_concurrent_calls_share_one_client() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/company/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"company_code": 1, "company_name": "ACME"}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/schedule/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"drug_code": 9, "schedule_name": "OTC"}]"#)
            .create_async()
            .await;

        let client = DpdClient::builder()
            .base_url(server.url())
            .cache_ttl(Duration::from_secs(60))
            .build()
            .unwrap();

        let (companies, schedules) =
            tokio::join!(client.company(1, None), client.schedule(9, None, None));
        assert_eq!(companies.unwrap().len(), 1);
        assert_eq!(schedules.unwrap().len(), 1);
    }
}

// =============================================================================
// Blocking client
// =============================================================================

mod blocking_client_tests {
    use super::*;

    #[test]
    fn test_basic_company_call() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/company/")
            .match_query(Matcher::UrlEncoded("id".into(), "101".into()))
            .with_status(200)
            .with_body(r#"[{"company_code": 101, "company_name": "ACME"}]"#)
            .expect(1)
            .create();

        let client = blocking_client(&server.url());
        let companies = client.company(101, None).unwrap();

        mock.assert();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].company_name, "ACME");
    }

    #[test]
    fn test_retries_on_5xx_then_succeeds() {
        let (url, handle) = scripted_server(vec![
            (503, "err1"),
            (503, "err2"),
            (200, r#"[{"drug_code": 2, "drug_identification_number": "11111111"}]"#),
        ]);

        let client = blocking_client(&url);
        let products = client
            .drug_product(DrugProductParams::new().with_din("11111111"))
            .unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(handle.join().unwrap(), 3);
    }

    #[test]
    fn test_404_is_immediate_http_error() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/drugproduct/")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body("missing")
            .expect(1)
            .create();

        let client = blocking_client(&server.url());
        let err = client
            .drug_product(DrugProductParams::new().with_din("does-not-exist"))
            .unwrap_err();

        mock.assert();
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/drugproduct/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not-json")
            .create();

        let client = blocking_client(&server.url());
        let err = client
            .drug_product(DrugProductParams::new().with_din("12345678"))
            .unwrap_err();
        assert!(matches!(err, DpdError::Http(HttpError::Decode { .. })));
    }

    #[test]
    fn test_caching_prevents_second_request() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/drugproduct/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"drug_code": 1, "drug_identification_number": "00000000"}"#)
            .expect(1)
            .create();

        let client = blocking::DpdClient::builder()
            .base_url(server.url())
            .cache_ttl(Duration::from_secs(60))
            .build_blocking()
            .unwrap();

        let first = client
            .drug_product(DrugProductParams::new().with_din("00000000"))
            .unwrap();
        let second = client
            .drug_product(DrugProductParams::new().with_din("00000000"))
            .unwrap();

        mock.assert();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_filter_order_does_not_defeat_cache() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/drugproduct/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"drug_code": 1}]"#)
            .expect(1)
            .create();

        let client = blocking::DpdClient::builder()
            .base_url(server.url())
            .cache_ttl(Duration::from_secs(60))
            .build_blocking()
            .unwrap();

        // same logical call, different construction order
        client
            .drug_product(DrugProductParams::new().with_din("1").with_brandname("X"))
            .unwrap();
        client
            .drug_product(DrugProductParams::new().with_brandname("X").with_din("1"))
            .unwrap();

        mock.assert();
    }
}
