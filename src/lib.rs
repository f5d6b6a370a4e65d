pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod genomes;
pub mod http;
pub mod listing;
pub mod output;
pub mod ucsc;
pub mod wikipathways;
