mod analysis;
mod cache;
mod concurrency;
mod config;
mod identity;
mod sequence;
