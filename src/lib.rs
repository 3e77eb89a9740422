#![doc = include_str!("RUSTDOC.md")]

pub mod app;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod firestore;
pub mod logger;
