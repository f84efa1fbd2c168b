//! Catalog endpoints: user profile, categories and products

use crate::client::{endpoints, ApiClient};
use crate::error::{ApiError, ApiResult};
use crate::payload::{Method, Payload};
use crate::response::{Ack, ApiOutcome, CategoryList, ProductDetail, ProductList, UserInfo};
use shopdesk_core::FormData;

/// `base/<id>` with the id percent-encoded as a single path segment, so
/// `/`, `?` or `#` in an id cannot reach another endpoint.
fn with_id(base: &str, id: &str) -> ApiResult<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::invalid_request("id must not be empty"));
    }
    Ok(format!("{}/{}", base, urlencoding::encode(id)))
}

impl ApiClient {
    pub async fn user_info(&self) -> ApiResult<ApiOutcome<UserInfo>> {
        let body = self.request(endpoints::USER_INFO, Payload::empty(), Method::Get).await?;
        ApiOutcome::decode(body, "Failed to load profile.")
    }

    // -- categories --

    pub async fn list_categories(&self) -> ApiResult<ApiOutcome<CategoryList>> {
        let body = self.request(endpoints::CATEGORY_LIST, Payload::empty(), Method::Get).await?;
        ApiOutcome::decode(body, "Failed to load categories.")
    }

    pub async fn create_category(&self, form: FormData) -> ApiResult<ApiOutcome<Ack>> {
        let body = self.request(endpoints::CATEGORY_CREATE, form, Method::Post).await?;
        ApiOutcome::decode(body, "Failed to add category")
    }

    pub async fn update_category(&self, id: &str, form: FormData) -> ApiResult<ApiOutcome<Ack>> {
        let path = with_id(endpoints::CATEGORY_UPDATE, id)?;
        let body = self.request(&path, form, Method::Put).await?;
        ApiOutcome::decode(body, "Failed to update category.")
    }

    pub async fn delete_category(&self, id: &str) -> ApiResult<ApiOutcome<Ack>> {
        let path = with_id(endpoints::CATEGORY_DELETE, id)?;
        let body = self.request(&path, Payload::empty(), Method::Delete).await?;
        ApiOutcome::decode(body, "Failed to delete category.")
    }

    // -- products --

    pub async fn list_products(&self) -> ApiResult<ApiOutcome<ProductList>> {
        let body = self.request(endpoints::PRODUCT_LIST, Payload::empty(), Method::Get).await?;
        ApiOutcome::decode(body, "Failed to load products.")
    }

    pub async fn get_product(&self, id: &str) -> ApiResult<ApiOutcome<ProductDetail>> {
        let path = with_id(endpoints::PRODUCT_GET, id)?;
        let body = self.request(&path, Payload::empty(), Method::Get).await?;
        ApiOutcome::decode(body, "Product not found.")
    }

    pub async fn create_product(&self, form: FormData) -> ApiResult<ApiOutcome<Ack>> {
        let body = self.request(endpoints::PRODUCT_CREATE, form, Method::Post).await?;
        ApiOutcome::decode(body, "Failed to add product.")
    }

    pub async fn update_product(&self, id: &str, form: FormData) -> ApiResult<ApiOutcome<Ack>> {
        let path = with_id(endpoints::PRODUCT_UPDATE, id)?;
        let body = self.request(&path, form, Method::Put).await?;
        ApiOutcome::decode(body, "Failed to update product.")
    }

    pub async fn delete_product(&self, id: &str) -> ApiResult<ApiOutcome<Ack>> {
        let path = with_id(endpoints::PRODUCT_DELETE, id)?;
        let body = self.request(&path, Payload::empty(), Method::Delete).await?;
        ApiOutcome::decode(body, "Failed to delete product.")
    }
}
