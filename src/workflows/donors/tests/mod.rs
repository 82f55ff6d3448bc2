mod common;
mod forecast;
mod repository;
mod stats;
