// src/lib.rs

//! Segment leaderboard client library

pub mod client;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use client::Client;
