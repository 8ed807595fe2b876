pub mod aggregator;
pub mod api;
pub mod city;
pub mod config;
pub mod error;
pub mod fetch;
pub mod providers;
pub mod telemetry;
pub mod units;
