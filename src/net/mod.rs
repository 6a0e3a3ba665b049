pub mod fetcher;
pub mod probe;
