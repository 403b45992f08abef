#[allow(clippy::module_inception)]
pub mod fetcher;
pub mod providers;
pub mod scheme;
pub mod strategy;
pub mod url;
