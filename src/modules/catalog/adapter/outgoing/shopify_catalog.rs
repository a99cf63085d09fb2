use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, LINK};
use reqwest::StatusCode;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Deserialize;
use tracing::{debug, info};

use super::retry::{with_retry, AttemptError, RetryPolicy};
use super::sea_orm_entity::shops::{Column as ShopColumn, Entity as ShopEntity};
use crate::catalog::application::domain::CatalogSnapshot;
use crate::catalog::application::ports::outgoing::{CatalogSource, CatalogSourceError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const PAGE_LIMIT: u32 = 250;
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

#[derive(Debug, Deserialize)]
struct ProductsPage {
    #[serde(default)]
    products: Vec<ShopifyProduct>,
}

#[derive(Debug, Deserialize)]
struct ShopifyProduct {
    id: i64,
    #[serde(default)]
    variants: Vec<ShopifyVariant>,
}

#[derive(Debug, Deserialize)]
struct ShopifyVariant {
    id: i64,
}

/// Reads a shop's products from the Shopify Admin REST API.
#[derive(Clone)]
pub struct ShopifyCatalogSource {
    db: Arc<DatabaseConnection>,
    client: reqwest::Client,
    api_version: String,
    retry: RetryPolicy,
}

impl std::fmt::Debug for ShopifyCatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyCatalogSource")
            .field("api_version", &self.api_version)
            .field("retry", &self.retry)
            .finish()
    }
}

impl ShopifyCatalogSource {
    pub fn new(
        db: Arc<DatabaseConnection>,
        api_version: String,
        retry: RetryPolicy,
    ) -> Result<Self, CatalogSourceError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CatalogSourceError::Unavailable(e.to_string()))?;

        Ok(Self {
            db,
            client,
            api_version,
            retry,
        })
    }

    async fn load_credentials(&self, shop_id: i32) -> Result<(String, String), CatalogSourceError> {
        let shop = ShopEntity::find_by_id(shop_id)
            .filter(ShopColumn::IsDeleted.eq(false))
            .one(&*self.db)
            .await
            .map_err(|e| CatalogSourceError::DatabaseError(e.to_string()))?
            .ok_or(CatalogSourceError::ShopNotFound(shop_id))?;

        match shop.access_token {
            Some(token) if !token.is_empty() => Ok((shop.shop_url, token)),
            _ => Err(CatalogSourceError::ShopNotFound(shop_id)),
        }
    }

    fn first_page_url(&self, shop_url: &str) -> String {
        let domain = shop_url
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');

        format!(
            "https://{}/admin/api/{}/products.json?fields=id,variants&limit={}",
            domain, self.api_version, PAGE_LIMIT
        )
    }

    async fn fetch_page(
        &self,
        url: &str,
        token: &str,
    ) -> Result<(ProductsPage, Option<String>), AttemptError<CatalogSourceError>> {
        let response = self
            .client
            .get(url)
            .header(ACCESS_TOKEN_HEADER, token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AttemptError::Retryable(CatalogSourceError::Unavailable(e.to_string())))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(AttemptError::Retryable(CatalogSourceError::Unavailable(
                format!("storefront responded with {}", status),
            )));
        }
        if !status.is_success() {
            return Err(AttemptError::Fatal(CatalogSourceError::Rejected(
                status.as_u16(),
            )));
        }

        let next = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_page_url);

        let page = response
            .json::<ProductsPage>()
            .await
            .map_err(|e| AttemptError::Fatal(CatalogSourceError::InvalidPayload(e.to_string())))?;

        Ok((page, next))
    }
}

/// Extracts the `rel="next"` target from a `Link` header.
pub(crate) fn next_page_url(link_header: &str) -> Option<String> {
    link_header.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|param| {
            let param = param.trim();
            param == "rel=\"next\"" || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

#[async_trait]
impl CatalogSource for ShopifyCatalogSource {
    async fn fetch_snapshot(&self, shop_id: i32) -> Result<CatalogSnapshot, CatalogSourceError> {
        let (shop_url, token) = self.load_credentials(shop_id).await?;
        let token = token.as_str();

        let mut snapshot = CatalogSnapshot::default();
        let mut next_url = Some(self.first_page_url(&shop_url));
        let mut pages = 0u32;

        while let Some(url) = next_url.take() {
            let url = url.as_str();
            let (page, next) = with_retry(&self.retry, move |_| self.fetch_page(url, token)).await?;
            pages += 1;

            for product in page.products {
                snapshot.insert_product(
                    product.id,
                    product.variants.into_iter().map(|v| v.id).collect(),
                );
            }

            debug!(shop_id, pages, "Fetched catalog page");
            next_url = next;
        }

        info!(
            shop_id,
            pages,
            products = snapshot.product_count(),
            "Catalog snapshot loaded"
        );
        Ok(snapshot)
    }
}
