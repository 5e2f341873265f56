use pazar_search::catalog::{CatalogSource, RestCatalog, StaticCatalog};
use pazar_search::config::ClientConfig;
use pazar_search::mapping::{from_pointer, place_stall, to_screen, Placement, PixelPoint};
use pazar_search::markers::stall_markers;
use pazar_search::pricing::{cheapest, sort_by_price};
use pazar_search::{GridPosition, MarketSearch, MatchKind, PazarError, SearchQuery};
use std::sync::Arc;
use std::time::Duration;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catalog.json");

async fn engine() -> MarketSearch {
    let mut engine = MarketSearch::default();
    engine.add_source(Arc::new(StaticCatalog::load(FIXTURE).await.unwrap()));
    engine
}

#[tokio::test]
async fn test_search_and_map() {
    let config = ClientConfig::default();
    let response = engine().await.search(SearchQuery::new("domates")).await.unwrap();

    assert_eq!(response.match_kind, MatchKind::Exact);
    let ids: Vec<&str> = response.results.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);

    let markers = stall_markers(&response.results, Some("p2"), &config.map, &config.scene);
    assert_eq!(markers[0].pixel, PixelPoint::new(220.0, 220.0));
    assert!(markers[0].cheapest);
    assert!(markers[1].selected);

    // Clicking the drawn stall lands back on its cell
    assert_eq!(from_pointer(markers[1].pixel, &config.map).cell(), Some(GridPosition::flat(6, 5)));
}

#[tokio::test]
async fn test_typo_falls_back_to_fuzzy() {
    let response = engine().await.search(SearchQuery::new("saltalık")).await.unwrap();

    assert_eq!(response.match_kind, MatchKind::Fuzzy);
    assert_eq!(response.results[0].id, "p5");
    assert_eq!(response.results[0].location, Some(GridPosition::new(4, 4, 1)));
}

#[tokio::test]
async fn test_miss_gives_placeholder_and_suggestions() {
    let response = engine().await.search(SearchQuery::new("Patlıcan")).await.unwrap();

    assert_eq!(response.match_kind, MatchKind::Placeholder);
    assert_eq!(response.count, 1);
    assert_eq!(response.results[0].name, "Patlıcan (Buralarda Olabilir)");
    assert!(response.suggestions.contains(&"Patates".to_string()));
}

#[tokio::test]
async fn test_max_results() {
    let response = engine()
        .await
        .search(SearchQuery {
            query: "domates".to_string(),
            max_results: 1,
        })
        .await
        .unwrap();
    assert_eq!(response.count, 1);
    assert_eq!(response.results[0].id, "p1");
}

#[tokio::test]
async fn test_failing_source_is_skipped() {
    let config = ClientConfig {
        api_base_url: "http://127.0.0.1:9".to_string(),
        request_timeout: Duration::from_millis(200),
        ..ClientConfig::default()
    };

    let mut engine = engine().await;
    engine.add_source(Arc::new(RestCatalog::new(&config).unwrap()));

    let response = engine.search(SearchQuery::new("biber")).await.unwrap();
    assert_eq!(response.results[0].id, "p4");
    assert_eq!(response.sources.len(), 1);
}

#[tokio::test]
async fn test_all_sources_failing_is_an_error() {
    let config = ClientConfig {
        api_base_url: "http://127.0.0.1:9".to_string(),
        request_timeout: Duration::from_millis(200),
        ..ClientConfig::default()
    };

    let mut engine = MarketSearch::default();
    engine.add_source(Arc::new(RestCatalog::new(&config).unwrap()));

    let result = engine.search(SearchQuery::new("biber")).await;
    assert!(matches!(result, Err(PazarError::Catalog { .. })));
}

#[tokio::test]
async fn test_seller_places_stall() {
    let config = ClientConfig::default();
    let catalog = StaticCatalog::load(FIXTURE).await.unwrap();
    let products = catalog.products("").await.unwrap();
    let stalls: Vec<GridPosition> = products.iter().filter_map(|p| p.location).collect();

    let taken = to_screen(GridPosition::flat(2, 2), &config.map);
    assert_eq!(
        place_stall(taken, 0, &stalls, &config.map),
        Placement::Occupied(GridPosition::flat(2, 2))
    );

    // p5 sits on floor 1; its ground-floor cell is still free
    let free = to_screen(GridPosition::flat(4, 4), &config.map);
    assert_eq!(
        place_stall(free, 0, &stalls, &config.map),
        Placement::Free(GridPosition::flat(4, 4))
    );
}

#[tokio::test]
async fn test_price_ordering_over_catalog() {
    let catalog = StaticCatalog::load(FIXTURE).await.unwrap();
    let products = catalog.products("").await.unwrap();

    assert_eq!(cheapest(&products).map(|p| p.id.as_str()), Some("p8"));
    let sorted = sort_by_price(&products);
    assert_eq!(sorted.last().map(|p| p.id.as_str()), Some("p9"));
}
