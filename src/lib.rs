pub mod cache;
pub mod compare;
pub mod config;
pub mod error;
pub mod github;
pub mod insights;
pub mod meme;
pub mod models;
pub mod narrative;

pub use cache::TtlCache;
pub use config::Config;
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use insights::InsightsService;
pub use meme::{CaptionService, ImgflipClient};
