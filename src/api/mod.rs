//! バックエンドAPIとの通信

mod client;

pub use client::BackendClient;
