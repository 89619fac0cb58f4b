pub mod client;
pub mod paginator;

pub use client::GitHubClient;
