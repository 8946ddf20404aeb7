pub mod chart;
pub mod config;
pub mod fetch;
pub mod forecast;
pub mod infra;
pub mod map;
pub mod output;
pub mod services;
pub mod session;
pub mod weather;
