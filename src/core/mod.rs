pub mod listing;
pub mod product;
pub mod search_response;

pub use listing::{CheapestOption, Map2D, Map3D, MapStall, MarketListing, MarketMap, ProductPrices, Route};
pub use product::{GridPosition, Market, Product, StallPrice};
pub use search_response::{MatchKind, SearchResponse};
