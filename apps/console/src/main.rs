mod config;

use std::sync::Arc;

use admin_core::{
    search_fields, EntityPage, SessionContext, SessionUser, SubmitOutcome, TracingNotifier,
    ValidationSchema,
};
use admin_http::HttpEntityGateway;
use anyhow::Result;
use clap::Parser;
use shared::{
    domain::{CourierId, CourierSummary},
    payload::CourierDraft,
};

#[derive(Parser, Debug)]
struct Args {
    /// Backend base URL; overrides console.toml and environment.
    #[arg(long)]
    server_url: Option<String>,
    /// Filter the courier list by name, phone, or city.
    #[arg(long)]
    search: Option<String>,
    /// Page of the courier list to print.
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Create a courier with this name before listing.
    #[arg(long)]
    add_courier: Option<String>,
}

fn courier_schema() -> ValidationSchema<CourierDraft> {
    ValidationSchema::new().rule("full_name", |draft: &CourierDraft| {
        draft
            .full_name
            .trim()
            .is_empty()
            .then(|| "full name is required".to_string())
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(url) = args.server_url {
        settings.server_url = url;
    }

    let session = Arc::new(SessionContext::establish(
        &settings.server_url,
        settings.api_token.clone(),
        SessionUser {
            user_id: 0,
            display_name: "console".to_string(),
        },
    )?);

    let gateway = Arc::new(
        HttpEntityGateway::<CourierSummary, CourierDraft, CourierId>::new(
            Arc::clone(&session),
            "couriers",
        ),
    );
    let couriers = EntityPage::new(
        "courier",
        gateway,
        settings.page_size,
        search_fields(vec![
            Box::new(|row: &CourierSummary| row.full_name.clone()),
            Box::new(|row: &CourierSummary| row.phone.clone()),
            Box::new(|row: &CourierSummary| row.city.clone()),
        ]),
        Arc::new(TracingNotifier),
    );

    if let Some(name) = args.add_courier {
        let mut form = couriers.create_form(
            CourierDraft {
                full_name: name,
                ..CourierDraft::default()
            },
            courier_schema(),
        );
        if form.submit().await == SubmitOutcome::Rejected {
            for (field, message) in form.errors() {
                eprintln!("{field}: {message}");
            }
        }
    }

    let mut collection = couriers.collection().lock().await;
    collection.load().await;
    if let Some(term) = args.search.as_deref() {
        collection.set_search_term(term);
    }
    collection.set_page(args.page);

    if let Some(err) = collection.error() {
        eprintln!("failed to load couriers: {err}");
        return Ok(());
    }

    println!(
        "couriers page {}/{} ({} matching)",
        collection.current_page(),
        collection.total_pages(),
        collection.filtered_len()
    );
    for row in collection.page() {
        println!(
            "#{:<4} {:<24} {:<14} {:<12} {:?}",
            row.courier_id, row.full_name, row.phone, row.city, row.status
        );
    }

    Ok(())
}
