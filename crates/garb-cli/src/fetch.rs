//! Fetch command: one style in, unified product JSON out.
//!
//! Uses the same config and client plumbing as the server, so a style
//! can be checked from a shell before wiring anything to the API.

use clap::Args;

use garb_core::Supplier;
use garb_suppliers::Suppliers;

#[derive(Debug, Args)]
pub(crate) struct FetchArgs {
    /// Product style number to look up (e.g. PC61).
    #[arg(long)]
    pub style: String,

    /// Pin the query to one vendor instead of primary-then-fallback.
    #[arg(long)]
    pub supplier: Option<Supplier>,
}

/// Fetch unified products for the given style and print them as pretty
/// JSON, followed by a count line.
///
/// Without `--supplier` the configured primary vendor is queried first
/// and the secondary once when the primary answers empty. With
/// `--supplier` only that vendor is asked, and an empty answer stays
/// empty.
///
/// # Errors
///
/// Returns an error on a blank style, a config or settings problem, or
/// a queried supplier failure. An empty product list is not an error.
pub(crate) async fn run_fetch(args: FetchArgs) -> anyhow::Result<()> {
    let style = args.style.trim();
    if style.is_empty() {
        anyhow::bail!("--style must be a non-empty product style");
    }

    let config = garb_core::load_app_config()?;
    let settings = garb_core::load_suppliers(&config.suppliers_path)?;
    let suppliers = Suppliers::from_config(&config, &settings)?;

    let (products, supplier) = match args.supplier {
        Some(supplier) => (suppliers.fetch_unified(supplier, style).await?, supplier),
        None => {
            let outcome = suppliers
                .fetch_unified_with_fallback(config.primary_supplier, style)
                .await?;
            (outcome.products, outcome.supplier)
        }
    };

    tracing::debug!(style, supplier = %supplier, count = products.len(), "fetch complete");

    println!("{}", serde_json::to_string_pretty(&products)?);
    println!("{} products from {supplier} for style {style}", products.len());
    Ok(())
}
