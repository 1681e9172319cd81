mod client;

pub use client::GiveawayApiClient;
