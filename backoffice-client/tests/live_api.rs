//! Integration tests against a live admin backend.
//!
//! These tests require a reachable backend and are ignored by default.
//! To run them, create a `.env` file in the backoffice-client directory
//! with:
//!
//! ```env
//! BACKOFFICE_URL=https://api.example.com/admin
//! BACKOFFICE_SESSION_COOKIE=sessionid=...
//! BACKOFFICE_LIST_ENDPOINT=users/
//! ```
//!
//! Then run: `cargo test -p backoffice-client -- --ignored`

use std::env;

use backoffice_client::AdminClient;
use backoffice_client::ListPayload;
use backoffice_client::RemoteSource;
use pagegrid::DataSource;
use pagegrid::PageRequest;

fn load_env() -> Option<(String, Option<String>, String)> {
    let _ = dotenvy::dotenv();

    let url = env::var("BACKOFFICE_URL").ok()?;
    let cookie = env::var("BACKOFFICE_SESSION_COOKIE").ok();
    let endpoint = env::var("BACKOFFICE_LIST_ENDPOINT").ok()?;

    Some((url, cookie, endpoint))
}

fn client(url: String, cookie: Option<String>) -> AdminClient {
    let mut builder = AdminClient::builder().base_url(url);
    if let Some(cookie) = cookie {
        builder = builder.session_cookie(cookie);
    }
    builder.build()
}

#[tokio::test]
#[ignore = "requires a reachable admin backend in .env"]
async fn list_endpoint_answers_a_known_shape() {
    let (url, cookie, endpoint) =
        load_env().expect("Missing required environment variables. See module docs.");

    let body = client(url, cookie)
        .get(&format!("{endpoint}?page=1&page_size=5"))
        .await
        .expect("List request failed");

    let payload = ListPayload::from_value(body.into_json().expect("List response was not JSON"))
        .expect("List response did not match any known shape");

    let (items, total) = payload.into_items_and_total();
    assert!(total >= items.len(), "total should cover at least this page");
    println!("Fetched {} of {} rows", items.len(), total);
}

#[tokio::test]
#[ignore = "requires a reachable admin backend in .env"]
async fn remote_source_fetches_keyed_rows() {
    let (url, cookie, endpoint) =
        load_env().expect("Missing required environment variables. See module docs.");

    let source = RemoteSource::new(client(url, cookie), endpoint);
    let page = source
        .fetch_page(&PageRequest {
            page: 1,
            page_size: 5,
            query: String::new(),
        })
        .await
        .expect("Page fetch failed");

    assert!(page.total >= page.rows.len());
    for row in &page.rows {
        assert!(!row.key().as_str().is_empty(), "rows must be keyed");
    }
    println!("Fetched {} of {} rows", page.rows.len(), page.total);
}
