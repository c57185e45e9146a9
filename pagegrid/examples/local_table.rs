//! Client-side table over an in-memory row set.
//!
//! Run with: cargo run --example local_table

use pagegrid::Column;
use pagegrid::LocalSource;
use pagegrid::Row;
use pagegrid::RowKey;
use pagegrid::Table;
use pagegrid::TableBody;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let rows: Vec<Row> = [
        ("1", "Alice", "alice@example.com", "active"),
        ("2", "Bob", "bob@example.com", "pending"),
        ("3", "Carol", "carol@example.com", "active"),
        ("4", "Dan", "dan@example.com", "disabled"),
        ("5", "Erin", "erin@example.com", "active"),
    ]
    .into_iter()
    .map(|(id, name, email, status)| {
        Row::new(id)
            .set("name", name)
            .set("email", email)
            .set("status", status)
    })
    .collect();

    let table = Table::builder()
        .columns(vec![
            Column::new("Name", "name"),
            Column::new("Email", "email"),
            Column::new("Status", "status"),
        ])
        .source(LocalSource::new(rows).with_search_fields(["name", "email", "status"]))
        .initial_page_size(3)
        .row_detail(|row| format!("mailto: {}", row.display("email")))
        .build();

    table.idle().await;
    println!("First page:");
    print_table(&table);

    table.next_page();
    table.idle().await;
    println!("Second page:");
    print_table(&table);

    table.set_query("ali");
    table.idle().await;
    println!("Filtered by \"ali\":");
    print_table(&table);

    table.click_row(&RowKey::new("1"));
    println!("With row 1 expanded:");
    print_table(&table);
}

fn print_table(table: &Table) {
    let snapshot = table.snapshot();
    println!("{}", snapshot.headers.join(" | "));
    match &snapshot.body {
        TableBody::Rows(rows) => {
            for row in rows {
                println!("{}", row.cells.join(" | "));
                if let Some(detail) = &row.detail {
                    println!("  > {detail}");
                }
            }
        }
        other => println!("{}", other.placeholder_text().unwrap_or_default()),
    }
    println!("{}\n", snapshot.summary());
}
