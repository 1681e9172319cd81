pub mod giveaway_api;

#[cfg(feature = "ssr")]
pub mod demo;

#[cfg(feature = "ssr")]
pub mod meta_graph;

#[cfg(feature = "ssr")]
pub mod security;
