//! Approves a pending trading account.
//!
//! Run with: cargo run --example approve_account
//!
//! Requires .env file with:
//! - BACKOFFICE_URL
//! - BACKOFFICE_SESSION_COOKIE (optional)
//! - BACKOFFICE_ACCOUNT_ID

use std::env;

use backoffice_client::ActionOutcome;
use backoffice_client::AdminClient;
use serde_json::json;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let url = env::var("BACKOFFICE_URL").expect("BACKOFFICE_URL not set");
    let account_id = env::var("BACKOFFICE_ACCOUNT_ID").expect("BACKOFFICE_ACCOUNT_ID not set");

    let mut builder = AdminClient::builder().base_url(url);
    if let Ok(cookie) = env::var("BACKOFFICE_SESSION_COOKIE") {
        builder = builder.session_cookie(cookie);
    }
    let client = builder.build();

    println!("Approving account {account_id}...");

    let outcome = client
        .post_action(
            &format!("accounts/{account_id}/approve/"),
            &json!({ "reason": "verified by operator" }),
        )
        .await?;

    match outcome {
        ActionOutcome::Message(message) => println!("Backend says: {message}"),
        ActionOutcome::Entity(entity) => {
            println!("Updated account:");
            println!("{}", serde_json::to_string_pretty(&entity)?);
        }
    }

    Ok(())
}
