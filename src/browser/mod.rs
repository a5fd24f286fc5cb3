//! Browser capability used by the crawlers
//!
//! This module contains:
//! - The [`PageDriver`] trait: navigate, query, wait for a selector, click
//! - [`ElementHandle`], an owned snapshot of a DOM element
//! - [`HttpPageDriver`], a driver that renders the catalog's server-side HTML

mod driver;
mod element;
mod http;

pub use driver::PageDriver;
pub use element::{parse_selector, select_all, ElementHandle};
pub use http::{build_http_client, HttpPageDriver};
