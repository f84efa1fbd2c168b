//! Command implementations over the request gateway
//!
//! Each command returns the text to print. Failures come back as errors
//! carrying the message a user should see; the binary decides the exit code.

use crate::format::{self, FormatOptions};
use anyhow::{anyhow, bail, Result};
use serde_json::json;
use shopdesk_api::{Ack, ApiClient, ApiOutcome, LoginResponse};
use shopdesk_core::{
    filter_categories, Category, CategoryUpdate, Credentials, ImageFile, NewCategory, NewProduct,
    ProductUpdate, Registration, User,
};
use std::path::Path;

const LOGIN_FAILED: &str = "Login failed. Invalid credentials.";

pub async fn login(api: &ApiClient, email: &str, password: &str, opts: &FormatOptions) -> Result<String> {
    let body = api.login(&Credentials::new(email, password)).await?;
    let response = match ApiOutcome::<LoginResponse>::decode(body, LOGIN_FAILED)? {
        ApiOutcome::Ok(r) if r.success && r.token.is_some() => r,
        ApiOutcome::Ok(r) => bail!(r.message.unwrap_or_else(|| LOGIN_FAILED.to_string())),
        ApiOutcome::Failed { message } => bail!(message),
    };
    if opts.json {
        return Ok(format::to_json(&response));
    }
    let who = response
        .user
        .as_ref()
        .map(display_name)
        .unwrap_or_else(|| email.to_string());
    Ok(format!("Login successful! Signed in as {}.\n", who))
}

pub async fn register(api: &ApiClient, registration: Registration, opts: &FormatOptions) -> Result<String> {
    let email = registration.email.clone();
    let body = api.register(&registration).await?;
    let ack = expect_ok(ApiOutcome::<Ack>::decode(body, "Registration failed.")?)?;
    Ok(done(opts, &ack, &format!("Registered {}.", email)))
}

/// Clears the stored session. What happens next is up to the user.
pub fn logout(api: &ApiClient) -> Result<String> {
    api.logout()?;
    Ok("Logged out.\n".to_string())
}

pub fn whoami(api: &ApiClient, opts: &FormatOptions) -> Result<String> {
    if api.current_token().is_none() {
        return Ok("Not logged in.\n".to_string());
    }
    let user = api
        .current_user()
        .and_then(|u| serde_json::from_value::<User>(u).ok());
    match user {
        Some(user) => Ok(format::format_user(&user, opts)),
        None => Ok("Logged in (no stored profile).\n".to_string()),
    }
}

pub async fn profile(api: &ApiClient, opts: &FormatOptions) -> Result<String> {
    let info = expect_ok(api.user_info().await?)?;
    let user = info
        .logged_user
        .ok_or_else(|| anyhow!("Failed to load profile."))?;
    Ok(format::format_user(&user, opts))
}

// -- categories --

pub async fn list_categories(api: &ApiClient, search: Option<&str>, opts: &FormatOptions) -> Result<String> {
    let list = expect_ok(api.list_categories().await?)?;
    let shown = filter_categories(&list.categories, search.unwrap_or(""));
    Ok(format::format_categories(&shown, opts))
}

pub async fn create_category(
    api: &ApiClient,
    name: String,
    image: Option<&Path>,
    opts: &FormatOptions,
) -> Result<String> {
    let form = NewCategory { name, image: load_image(image)? }.into_form()?;
    let ack = expect_ok(api.create_category(form).await?)?;
    Ok(done(opts, &ack, "Category created successfully!"))
}

pub async fn update_category(
    api: &ApiClient,
    id: &str,
    name: String,
    image: Option<&Path>,
    opts: &FormatOptions,
) -> Result<String> {
    let form = CategoryUpdate { name, image: load_image(image)? }.into_form()?;
    let ack = expect_ok(api.update_category(id, form).await?)?;
    Ok(done(opts, &ack, "Category updated successfully!"))
}

pub async fn delete_category(api: &ApiClient, id: &str, opts: &FormatOptions) -> Result<String> {
    let ack = expect_ok(api.delete_category(id).await?)?;
    Ok(done(opts, &ack, "Category deleted successfully!"))
}

// -- products --

/// Product fields as given on the command line.
#[derive(Clone, Debug, Default)]
pub struct ProductArgs {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: String,
    pub quantity: u32,
    pub in_stock: bool,
}

pub async fn list_products(api: &ApiClient, opts: &FormatOptions) -> Result<String> {
    let products = expect_ok(api.list_products().await?)?.products;
    let categories = categories_for_lookup(api).await;
    Ok(format::format_products(&products, &categories, opts))
}

pub async fn show_product(api: &ApiClient, id: &str, opts: &FormatOptions) -> Result<String> {
    let detail = expect_ok(api.get_product(id).await?)?;
    let categories = categories_for_lookup(api).await;
    Ok(format::format_product(&detail.product, &categories, opts))
}

pub async fn create_product(
    api: &ApiClient,
    args: ProductArgs,
    image: Option<&Path>,
    opts: &FormatOptions,
) -> Result<String> {
    let form = NewProduct {
        name: args.name,
        description: args.description,
        price: args.price,
        category_id: args.category_id,
        quantity: args.quantity,
        in_stock: args.in_stock,
        image: load_image(image)?,
    }
    .into_form()?;
    let ack = expect_ok(api.create_product(form).await?)?;
    Ok(done(opts, &ack, "Product added successfully!"))
}

pub async fn update_product(
    api: &ApiClient,
    id: &str,
    args: ProductArgs,
    image: Option<&Path>,
    opts: &FormatOptions,
) -> Result<String> {
    let form = ProductUpdate {
        name: args.name,
        description: args.description,
        price: args.price,
        category_id: args.category_id,
        quantity: args.quantity,
        in_stock: args.in_stock,
        image: load_image(image)?,
    }
    .into_form()?;
    let ack = expect_ok(api.update_product(id, form).await?)?;
    Ok(done(opts, &ack, "Product updated successfully!"))
}

pub async fn delete_product(api: &ApiClient, id: &str, opts: &FormatOptions) -> Result<String> {
    let ack = expect_ok(api.delete_product(id).await?)?;
    Ok(done(opts, &ack, "Product deleted successfully!"))
}

// -- helpers --

fn expect_ok<T>(outcome: ApiOutcome<T>) -> Result<T> {
    outcome.into_result().map_err(|message| anyhow!(message))
}

fn load_image(path: Option<&Path>) -> Result<Option<ImageFile>> {
    path.map(ImageFile::from_path).transpose().map_err(Into::into)
}

/// Category names are a nicety for product output; a failed lookup only
/// degrades to "Unknown Category".
async fn categories_for_lookup(api: &ApiClient) -> Vec<Category> {
    match api.list_categories().await {
        Ok(ApiOutcome::Ok(list)) => list.categories,
        Ok(ApiOutcome::Failed { message }) => {
            tracing::warn!("Failed to fetch categories: {}", message);
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("Failed to fetch categories: {}", e);
            Vec::new()
        }
    }
}

fn done(opts: &FormatOptions, ack: &Ack, default: &str) -> String {
    if opts.json {
        return format::to_json(&json!({
            "success": true,
            "message": ack.message.as_deref().unwrap_or(default),
        }));
    }
    format!("{}\n", ack.message.as_deref().unwrap_or(default))
}

fn display_name(user: &User) -> String {
    if user.name.is_empty() {
        user.email.clone()
    } else {
        user.name.clone()
    }
}
