pub mod access;
pub mod locations;
pub mod members;
pub mod schema;
pub mod scores;
pub mod subscriptions;
