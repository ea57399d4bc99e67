mod access_lookup;
pub mod configuration;
#[cfg(test)]
mod fixtures;
mod health;
pub mod migrations;
pub mod repository;
mod schema;
mod scores;
