// Library for tests to access modules

pub mod aggregation;
pub mod cache;
pub mod config;
pub mod export;
pub mod models;
pub mod present;
pub mod snapshot_repo;
