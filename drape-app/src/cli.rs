use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use uuid::Uuid;
use drape_booking::TimeSlot;
use drape_catalog::{Dimensions, Product, ProductCategory, ProductFilter, SizeCalculator};
use drape_order::{PaymentMethod, PlacedOrder};
use drape_shared::format_amount;
use crate::session::StorefrontSession;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "drape", about = "Made-to-measure curtain storefront", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog products, newest first
    Catalog(CatalogArgs),
    /// Price a product at a custom size
    Quote(QuoteArgs),
    /// Place an order for the items in a cart file
    Checkout(CheckoutArgs),
    /// Request a home consultation
    Book(BookArgs),
    /// Show the consultation time slots
    Slots,
}

#[derive(Debug, Args)]
struct CatalogArgs {
    /// Only featured products (home page selection)
    #[arg(long)]
    featured: bool,

    /// Category tag: manual, motorized or accessories
    #[arg(long, value_parser = parse_category)]
    category: Option<ProductCategory>,

    #[arg(long)]
    limit: Option<u32>,
}

#[derive(Debug, Args)]
struct QuoteArgs {
    #[arg(long)]
    product: Uuid,

    /// Width in metres
    #[arg(long, default_value_t = 2.0)]
    width: f64,

    /// Height in metres
    #[arg(long, default_value_t = 3.0)]
    height: f64,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// JSON array of `{product_id, width, height, quantity}`
    #[arg(long)]
    cart: PathBuf,

    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    address: String,

    /// cash, card, installment or bank_transfer
    #[arg(long, default_value = "cash")]
    payment: String,

    #[arg(long)]
    notes: Option<String>,
}

#[derive(Debug, Args)]
struct BookArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    address: String,

    /// Preferred date, YYYY-MM-DD
    #[arg(long)]
    date: String,

    /// Time slot label, eg. "2:00 PM - 4:00 PM"
    #[arg(long)]
    slot: String,

    #[arg(long)]
    notes: Option<String>,
}

fn parse_category(tag: &str) -> Result<ProductCategory, String> {
    ProductCategory::from_tag(tag).ok_or_else(|| {
        let known: Vec<&str> = ProductCategory::ALL.iter().map(|c| c.tag()).collect();
        format!("unknown category '{}', expected one of {}", tag, known.join(", "))
    })
}

/// One entry of a cart file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartEntry {
    pub product_id: Uuid,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

pub fn read_cart_file(path: &Path) -> anyhow::Result<Vec<CartEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read cart file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse cart file {}", path.display()))
}

/// Add every entry to the session cart, resolving product ids against `catalog`.
pub fn fill_cart(session: &mut StorefrontSession, catalog: &[Product], entries: &[CartEntry]) -> anyhow::Result<()> {
    for entry in entries {
        let product = catalog
            .iter()
            .find(|p| p.id == entry.product_id)
            .ok_or_else(|| anyhow!("Unknown product {}", entry.product_id))?;
        let dimensions = Dimensions::new(entry.width, entry.height)?;
        session
            .add_to_cart(product.clone(), dimensions, entry.quantity)
            .with_context(|| format!("Cart entry for product {}", entry.product_id))?;
    }
    Ok(())
}

impl Cli {
    pub async fn run(self, state: &AppState) -> anyhow::Result<()> {
        match self.command {
            Commands::Catalog(args) => catalog(state, args).await,
            Commands::Quote(args) => quote(state, args).await,
            Commands::Checkout(args) => checkout(state, args).await,
            Commands::Book(args) => book(state, args).await,
            Commands::Slots => {
                for slot in TimeSlot::ALL {
                    println!("{}", slot);
                }
                Ok(())
            }
        }
    }
}

async fn catalog(state: &AppState, args: CatalogArgs) -> anyhow::Result<()> {
    let mut filter = if args.featured {
        ProductFilter::featured(state.storefront.featured_limit)
    } else {
        ProductFilter::all()
    };
    if let Some(category) = args.category {
        filter.category = Some(category.tag().to_string());
    }
    if let Some(limit) = args.limit {
        filter = filter.with_limit(limit);
    }

    let products = state.products.list_products(&filter).await?;
    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    for product in products {
        let category = product
            .known_category()
            .map_or(product.category.as_str(), |c| c.label());
        println!("{}  {}", product.id, product.name);
        println!("    {} | {} | from {} | {}/m²",
            category,
            product.availability().label(),
            format_amount(product.base_price),
            format_amount(product.price_per_sqm),
        );
    }

    Ok(())
}

async fn find_product(state: &AppState, id: Uuid) -> anyhow::Result<Product> {
    state.products
        .list_products(&ProductFilter::all())
        .await?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| anyhow!("Unknown product {}", id))
}

async fn quote(state: &AppState, args: QuoteArgs) -> anyhow::Result<()> {
    let product = find_product(state, args.product).await?;

    let mut calculator = SizeCalculator::new(product);
    calculator.set_width(args.width);
    calculator.set_height(args.height);
    let quote = calculator.quote();

    println!("{}: {} x {} m = {}",
        calculator.product().name,
        quote.dimensions.width,
        quote.dimensions.height,
        quote.display(),
    );
    Ok(())
}

async fn checkout(state: &AppState, args: CheckoutArgs) -> anyhow::Result<()> {
    if PaymentMethod::from_code(&args.payment).is_none() {
        return Err(anyhow!("Unknown payment method '{}'", args.payment));
    }

    let entries = read_cart_file(&args.cart)?;
    let catalog = state.products.list_products(&ProductFilter::all()).await?;

    let mut session = state.session();
    fill_cart(&mut session, &catalog, &entries)?;

    session.open_checkout();
    session.set_checkout_field("customer_name", args.name)?;
    session.set_checkout_field("customer_email", args.email)?;
    session.set_checkout_field("customer_phone", args.phone)?;
    session.set_checkout_field("delivery_address", args.address)?;
    session.set_checkout_field("payment_method", args.payment)?;
    if let Some(notes) = args.notes {
        session.set_checkout_field("notes", notes)?;
    }

    let placed = session.place_order().await?;
    print_order(&placed);
    if let Some(notice) = session.current_notice() {
        println!("{}", notice.message);
    }
    Ok(())
}

fn print_order(placed: &PlacedOrder) {
    let header = &placed.order.header;
    println!("order {}", header.order_number);
    for line in &placed.lines {
        println!("  {} ({} x {} m) x{}  {}",
            line.product_name,
            line.width,
            line.height,
            line.quantity,
            format_amount(line.total_price),
        );
    }
    println!("subtotal {}", format_amount(header.subtotal));
    println!("VAT (5%) {}", format_amount(header.tax));
    println!("total    {}", format_amount(header.total));
    println!("payment  {}", header.payment_method.label());
}

async fn book(state: &AppState, args: BookArgs) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();

    let mut session = state.session();
    session.open_booking();
    session.set_booking_field("customer_name", args.name)?;
    session.set_booking_field("customer_email", args.email)?;
    session.set_booking_field("customer_phone", args.phone)?;
    session.set_booking_field("customer_address", args.address)?;
    session.set_booking_field("preferred_date", args.date)?;
    session.set_booking_field("preferred_time", args.slot)?;
    if let Some(notes) = args.notes {
        session.set_booking_field("notes", notes)?;
    }

    session.book_consultation(today).await?;
    if let Some(notice) = session.current_notice() {
        println!("{}", notice.message);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("motorized"), Ok(ProductCategory::Motorized));
        assert!(parse_category("roman").unwrap_err().contains("manual, motorized, accessories"));
    }

    #[test]
    fn test_cart_entry_quantity_defaults_to_one() {
        let entries: Vec<CartEntry> = serde_json::from_str(
            r#"[{"product_id":"7b0c1c36-5b9e-4c53-9d3e-2a0f3f0e8d11","width":2.0,"height":3.0}]"#,
        )
        .unwrap();

        assert_eq!(entries[0].quantity, 1);
    }

    #[test]
    fn test_quote_defaults() {
        let cli = Cli::try_parse_from([
            "drape", "quote", "--product", "7b0c1c36-5b9e-4c53-9d3e-2a0f3f0e8d11",
        ])
        .unwrap();

        match cli.command {
            Commands::Quote(args) => {
                assert_eq!(args.width, 2.0);
                assert_eq!(args.height, 3.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
