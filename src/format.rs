//! Human-readable and JSON rendering of catalog data

use serde::Serialize;
use shopdesk_core::{category_name, Category, Product, User};

#[derive(Clone, Copy, Debug, Default)]
pub struct FormatOptions {
    pub json: bool,
}

/// Pretty JSON, or a fallback line if serialization somehow fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}

pub fn format_user(user: &User, opts: &FormatOptions) -> String {
    if opts.json {
        return to_json(user);
    }
    let mut out = String::new();
    out.push_str(&format!("Name:  {}\n", user.name));
    out.push_str(&format!("Email: {}\n", user.email));
    out.push_str(&format!("Admin: {}\n", if user.is_admin { "Yes" } else { "No" }));
    out
}

pub fn format_categories(categories: &[&Category], opts: &FormatOptions) -> String {
    if opts.json {
        return to_json(categories);
    }
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }
    let width = categories.iter().map(|c| c.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for c in categories {
        out.push_str(&format!("{:<width$}  {}", c.id, c.name, width = width));
        if let Some(image) = &c.image {
            out.push_str(&format!("  [{}]", image));
        }
        out.push('\n');
    }
    out
}

pub fn format_products(products: &[Product], categories: &[Category], opts: &FormatOptions) -> String {
    if opts.json {
        return to_json(products);
    }
    if products.is_empty() {
        return "No products found.\n".to_string();
    }
    let width = products.iter().map(|p| p.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for p in products {
        out.push_str(&format!(
            "{:<width$}  {}  {}  ({})\n",
            p.id,
            p.name,
            format_price(p.price),
            category_name(categories, p.category_id.as_deref()),
            width = width
        ));
    }
    out
}

pub fn format_product(product: &Product, categories: &[Category], opts: &FormatOptions) -> String {
    if opts.json {
        return to_json(product);
    }
    let mut out = format!("{} ({})\n", product.name, product.id);
    out.push_str(&format!("Price:    {}\n", format_price(product.price)));
    out.push_str(&format!(
        "Category: {}\n",
        category_name(categories, product.category_id.as_deref())
    ));
    if let Some(quantity) = product.quantity {
        out.push_str(&format!("Quantity: {}\n", quantity));
    }
    if let Some(in_stock) = product.in_stock {
        out.push_str(&format!("In stock: {}\n", if in_stock { "Yes" } else { "No" }));
    }
    if let Some(image) = &product.image {
        out.push_str(&format!("Image:    {}\n", image));
    }
    if !product.description.is_empty() {
        out.push_str(&format!("\n{}\n", product.description));
    }
    out
}

pub fn format_price(price: f64) -> String {
    format!("₹{:.2}", price)
}
