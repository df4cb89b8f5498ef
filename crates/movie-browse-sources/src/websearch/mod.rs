pub mod client;

pub use client::WatchLinkClient;
