use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    route_guard::{guard, Route},
    CatalogStore, DraftField, EditSession, HttpProductApi,
};
use shared::domain::{ProductId, ProductRecord};
use tracing::info;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(about = "Manage the product catalog")]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    logged_in: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the catalog.
    List,
    /// Add a product.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        quantity: String,
    },
    /// Edit a product, e.g. `edit 3 --set price=2.00 --set quantity=4`.
    Edit {
        id: String,
        #[arg(long = "set", value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,
    },
    /// Delete a product.
    Delete { id: String },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(field, value)| (field.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected field=value, got '{raw}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    if let Route::Redirect(target) = guard(args.logged_in) {
        bail!("not logged in; redirecting to {target}");
    }

    let settings = load_settings(args.server_url);
    info!(server_url = %settings.server_url, "opening product catalog");
    let store = CatalogStore::new(Arc::new(HttpProductApi::new(settings.server_url)));
    store
        .initialize()
        .await
        .context("failed to load products")?;

    let outcome = run(&store, args.command).await;
    print_catalog(&store.products().await);
    store.shutdown().await;
    outcome
}

async fn run(store: &CatalogStore, command: Command) -> Result<()> {
    let mut session = EditSession::new();
    match command {
        Command::List => {}
        Command::Add {
            name,
            description,
            category,
            price,
            quantity,
        } => {
            session.update_field(DraftField::ProductName, name);
            session.update_field(DraftField::Description, description);
            session.update_field(DraftField::Category, category);
            session.update_field(DraftField::Price, price);
            session.update_field(DraftField::Quantity, quantity);
            let created = session
                .submit(store)
                .await
                .context("failed to add product")?;
            println!("Added product {}", created.id);
        }
        Command::Edit { id, assignments } => {
            let id = ProductId::new(id);
            let record = store
                .get(&id)
                .await
                .ok_or_else(|| anyhow!("product {id} not found"))?;
            session.start_edit(&record);
            for (field, value) in assignments {
                session.update_field_by_name(&field, value)?;
            }
            session
                .submit(store)
                .await
                .with_context(|| format!("failed to update product {id}"))?;
            println!("Updated product {id}");
        }
        Command::Delete { id } => {
            let id = ProductId::new(id);
            store
                .delete(&id)
                .await
                .with_context(|| format!("failed to delete product {id}"))?;
            println!("Deleted product {id}");
        }
    }
    Ok(())
}

fn print_catalog(products: &[ProductRecord]) {
    println!(
        "{:<38} {:<20} {:<28} {:<14} {:>10} {:>8}",
        "ID", "Product Name", "Description", "Category", "Price", "Quantity"
    );
    for product in products {
        println!(
            "{:<38} {:<20} {:<28} {:<14} {:>10} {:>8}",
            product.id,
            product.product_name,
            product.description,
            product.category,
            format!("M{:.2}", product.price),
            product.quantity
        );
    }
}
