use clap::{Parser, Subcommand};
use pazar_search::catalog::{CatalogSource, RestCatalog, StaticCatalog};
use pazar_search::config::ClientConfig;
use pazar_search::mapping::{from_pointer, to_scene, to_screen, Mapped, PixelPoint};
use pazar_search::markers::stall_markers;
use pazar_search::pricing::format_price;
use pazar_search::{GridPosition, MarketSearch, SearchOptions, SearchQuery};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pazar-cli")]
#[command(about = "Pazar product search and stall map CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a product
    Search {
        /// Search query
        query: String,

        /// Catalog JSON file (product array or saved search response)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Also query the market API (PAZAR_API_URL)
        #[arg(long)]
        api: bool,

        /// Maximum results (0 = all)
        #[arg(short, long, default_value = "0")]
        max_results: usize,

        /// Show nothing instead of a placeholder when no product matches
        #[arg(long)]
        no_placeholder: bool,
    },

    /// Print pixel and scene coordinates of a grid cell
    Locate {
        x: i32,
        y: i32,

        /// Floor index
        #[arg(short, long, default_value = "0")]
        floor: i32,
    },

    /// Print the grid cell under a canvas pixel
    Pick {
        #[arg(allow_negative_numbers = true)]
        px: f64,
        #[arg(allow_negative_numbers = true)]
        py: f64,
    },

    /// List markets from the market API
    Markets,

    /// Stall prices for a product in a market
    Prices {
        product_id: String,

        /// Market id (defaults to PAZAR_MARKET_ID)
        #[arg(short, long)]
        market: Option<String>,
    },

    /// Floor plan of a market
    Map {
        /// Market id (defaults to PAZAR_MARKET_ID)
        #[arg(short, long)]
        market: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pazar_search=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();

    match cli.command {
        Commands::Search { query, catalog, api, max_results, no_placeholder } => {
            let mut search = MarketSearch::new(SearchOptions {
                placeholder_enabled: !no_placeholder,
                ..SearchOptions::default()
            });

            if let Some(path) = catalog {
                search.add_source(Arc::new(StaticCatalog::load(&path).await?));
            }
            if api {
                search.add_source(Arc::new(RestCatalog::new(&config)?));
            }
            if search.source_count() == 0 {
                anyhow::bail!("no catalog to search: pass --catalog FILE or --api");
            }

            println!("🔍 Searching for: {}", query);

            let response = search
                .search(SearchQuery { query, max_results })
                .await?;

            println!("\n✅ {} result(s) ({:?}, {:.2}ms)", response.count, response.match_kind, response.latency_ms);

            let markers = stall_markers(&response.results, None, &config.map, &config.scene);
            for product in &response.results {
                let marker = markers.iter().find(|m| m.product_id == product.id);
                println!("   {} - {}", product.display_name(), format_price(product.min_price));
                if let Some(m) = marker {
                    println!(
                        "      cell ({}, {}) floor {} → pixel ({:.0}, {:.0}){}",
                        m.cell.x,
                        m.cell.y,
                        m.cell.z,
                        m.pixel.x,
                        m.pixel.y,
                        if m.cheapest { " 💰 cheapest" } else { "" }
                    );
                }
            }

            if !response.suggestions.is_empty() {
                println!("\n📋 Did you mean:");
                for (i, name) in response.suggestions.iter().enumerate() {
                    println!("   {}. {}", i + 1, name);
                }
            }
        }

        Commands::Locate { x, y, floor } => {
            let cell = GridPosition::new(x, y, floor);
            let pixel = to_screen(cell, &config.map);
            let scene = to_scene(cell, &config.scene);

            println!("📍 Cell ({}, {}) floor {}", x, y, floor);
            println!("   2D pixel: ({:.1}, {:.1})", pixel.x, pixel.y);
            println!("   3D scene: ({:.2}, {:.2}, {:.2})", scene.x, scene.y, scene.z);
            if !config.map.contains(x, y) {
                println!("   ⚠️ outside the {}x{} canvas grid", config.map.columns(), config.map.rows());
            }
        }

        Commands::Pick { px, py } => match from_pointer(PixelPoint::new(px, py), &config.map) {
            Mapped::Cell(cell) => println!("🎯 Cell ({}, {})", cell.x, cell.y),
            Mapped::Unmapped(cell) => println!("❌ Unmapped (would be cell {}, {})", cell.x, cell.y),
        },

        Commands::Markets => {
            let rest = RestCatalog::new(&config)?;
            if !rest.is_available().await {
                anyhow::bail!("market API at {} is not reachable", config.api_base_url);
            }

            let markets = rest.markets().await?;
            println!("🏪 {} market(s):", markets.len());
            for market in markets {
                println!("   {} - {}", market.id, market.display());
            }
        }

        Commands::Prices { product_id, market } => {
            let market_id = market.unwrap_or_else(|| config.market_id.clone());
            let prices = RestCatalog::new(&config)?.prices(&product_id, &market_id).await?;

            println!("💰 {} in {}:", prices.product.name, market_id);
            for listing in &prices.prices {
                println!(
                    "   {} {} - {} at ({}, {}) floor {}",
                    listing.stall_number,
                    listing.vendor_name,
                    format_price(Some(listing.price)),
                    listing.x,
                    listing.y,
                    listing.z
                );
            }
            if prices.prices.is_empty() {
                println!("   not sold in this market");
            }
        }

        Commands::Map { market } => {
            let market_id = market.unwrap_or_else(|| config.market_id.clone());
            let plan = RestCatalog::new(&config)?.market_map(&market_id).await?;
            let map = plan.map_config(&config.map);

            println!(
                "🗺️ {} ({}x{} cells, {} floor(s))",
                plan.market_name,
                map.columns(),
                map.rows(),
                plan.floor_count()
            );
            for cell in plan.stall_cells(&map) {
                println!("   stall at cell ({}, {}) floor {}", cell.x, cell.y, cell.z);
            }
        }
    }

    Ok(())
}
