//! OpenStreetMap 节点获取实现

mod client;
mod fixture;

pub use client::OsmApiClient;
pub use fixture::StaticOsmNodeFetcher;
