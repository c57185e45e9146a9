//! Lists support tickets from a live admin backend.
//!
//! Run with: cargo run --example support_tickets
//!
//! Requires .env file with:
//! - BACKOFFICE_URL (e.g. https://api.example.com/admin)
//! - BACKOFFICE_SESSION_COOKIE (optional, e.g. sessionid=...)
//! - BACKOFFICE_QUERY (optional search term)

use std::env;

use backoffice_client::AdminClient;
use backoffice_client::RemoteSource;
use pagegrid::Column;
use pagegrid::Table;
use pagegrid::TableBody;
use simplelog::ColorChoice;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::TermLogger;
use simplelog::TerminalMode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let url = env::var("BACKOFFICE_URL").expect("BACKOFFICE_URL not set");

    let mut builder = AdminClient::builder().base_url(url);
    if let Ok(cookie) = env::var("BACKOFFICE_SESSION_COOKIE") {
        builder = builder.session_cookie(cookie);
    }
    let client = builder
        .on_unauthorized(|| println!("session expired, please sign in again"))
        .build();

    let table = Table::builder()
        .columns(vec![
            Column::new("Id", "id"),
            Column::new("Subject", "subject"),
            Column::new("Status", "status")
                .with_render(|value, _row| match value.and_then(|v| v.as_str()) {
                    Some("open") => "OPEN".to_owned(),
                    Some("closed") => "closed".to_owned(),
                    other => other.unwrap_or("-").to_owned(),
                }),
        ])
        .source(RemoteSource::new(client, "support/tickets/"))
        .build();

    table.idle().await;
    print_table(&table);

    if let Ok(query) = env::var("BACKOFFICE_QUERY") {
        println!("\nSearching for {query:?}...\n");
        table.set_query(query);
        table.idle().await;
        print_table(&table);
    }

    Ok(())
}

fn print_table(table: &Table) {
    let snapshot = table.snapshot();
    println!("{}", snapshot.headers.join(" | "));
    match &snapshot.body {
        TableBody::Rows(rows) => {
            for row in rows {
                println!("{}", row.cells.join(" | "));
            }
        }
        other => println!("{}", other.placeholder_text().unwrap_or_default()),
    }
    println!("{}", snapshot.summary());
}
