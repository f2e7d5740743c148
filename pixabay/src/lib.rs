#![allow(clippy::missing_errors_doc)]

//! Async client for the Pixabay image search API.

pub mod client;
mod endpoint;
mod error;
pub mod model;
pub mod search;

pub use client::Client;
pub use error::{Error, Result};
pub use model::{Hit, PageNum, SearchPage};
pub use reqwest;
pub use search::{ImageType, Orientation, PER_PAGE, SearchQuery};
