pub mod cache;
pub mod cities;
pub mod config;
pub mod forecast;
pub mod handlers;
pub mod history;
pub mod openapi;
pub mod rate_limit;
pub mod service;
pub mod text;
pub mod upstream;
