//! Service layer: external API clients and the listing pipeline

pub mod chatbot;
pub mod classifier;
pub mod images;
pub mod overpass_client;
pub mod pipeline;
