pub mod activities;
pub mod app;
pub mod auth;
pub mod budgets;
pub mod config;
pub mod db;
pub mod error;
pub mod sharing;
pub mod state;
pub mod stops;
pub mod trips;
pub mod validation;
