pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod graphql;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;
pub mod uploads;
pub mod views;

#[cfg(test)]
pub mod testing;
