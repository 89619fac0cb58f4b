pub mod aggregate;
pub mod fetcher;

pub use fetcher::InsightsService;
