//! Read-only client surface for the remote demo product catalog. The
//! catalog is a collaborator, not something this crate owns: session state
//! gates the views that call it, and this module only mirrors the wire
//! shapes and the limit/skip page window those views request.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";
/// Products shown per catalog page.
pub const PAGE_SIZE: u32 = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub thumbnail: String,
    pub category: String,
    #[serde(default)]
    pub brand: String,
    pub rating: f64,
}

/// One catalog page as returned by the API; `total` drives the pager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: u64,
}

/// limit/skip window for one catalog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub limit: u32,
    pub skip: u32,
}

impl PageQuery {
    /// Window for 1-based page `n`. Page 0 is treated as page 1.
    pub fn page(n: u32) -> Self {
        Self {
            limit: PAGE_SIZE,
            skip: n.saturating_sub(1) * PAGE_SIZE,
        }
    }
}

pub struct CatalogClient {
    base: String,
    client: reqwest::blocking::Client,
}

impl CatalogClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Fetch 1-based page `n` of the catalog.
    pub fn page(&self, n: u32) -> Result<ProductPage> {
        let q = PageQuery::page(n);
        let url = format!("{}/products?limit={}&skip={}", self.base, q.limit, q.skip);
        let resp = self.client.get(&url).send().context("catalog request failed")?;
        if !resp.status().is_success() {
            return Err(anyhow!("catalog request failed: HTTP {}", resp.status()));
        }
        resp.json::<ProductPage>().context("malformed catalog page")
    }

    /// Fetch a single product by id for the detail view.
    pub fn product(&self, id: u64) -> Result<Product> {
        let url = format!("{}/products/{}", self.base, id);
        let resp = self.client.get(&url).send().context("catalog request failed")?;
        if !resp.status().is_success() {
            return Err(anyhow!("catalog request failed: HTTP {}", resp.status()));
        }
        resp.json::<Product>().context("malformed product payload")
    }
}
