//! Price-series providers and ranked-universe sources.

pub mod canonicalize;
pub mod circuit_breaker;
pub mod csv_provider;
pub mod memory;
pub mod provider;
pub mod twse;
pub mod universe;
pub mod yahoo;

pub use canonicalize::{canonicalize, is_canonical};
pub use circuit_breaker::{BreakerState, CircuitBreaker};
pub use csv_provider::CsvProvider;
pub use memory::MemoryProvider;
pub use provider::{DataError, DataProvider, DataSource, FetchResult, LookbackWindow};
pub use twse::{parse_listings, TwseUniverse};
pub use universe::{rank_by_turnover, StaticUniverse, UniverseSource};
pub use yahoo::YahooProvider;
