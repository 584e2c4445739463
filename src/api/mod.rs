pub mod client;

pub use client::{FetchError, FetchedResponse, HttpClient, Result};
