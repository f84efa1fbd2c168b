//! Tests for shopdesk-core: catalog types, form inputs, config, errors

use shopdesk_core::*;
use std::path::Path;

fn png(name: &str) -> ImageFile {
    ImageFile::new(name, vec![0x89, b'P', b'N', b'G'])
}

// ===========================================================================
// Catalog types
// ===========================================================================

#[test]
fn category_deserializes_mongo_id() {
    let c: Category =
        serde_json::from_str(r#"{"_id":"c1","name":"Shoes","image":"uploads/shoes.png"}"#).unwrap();
    assert_eq!(c.id, "c1");
    assert_eq!(c.name, "Shoes");
    assert_eq!(c.image.as_deref(), Some("uploads/shoes.png"));
}

#[test]
fn category_accepts_plain_id() {
    let c: Category = serde_json::from_str(r#"{"id":"c2","name":"Hats"}"#).unwrap();
    assert_eq!(c.id, "c2");
    assert!(c.image.is_none());
}

#[test]
fn product_reads_backend_field_names() {
    let p: Product = serde_json::from_str(
        r#"{"_id":"p1","name":"Boot","description":"Leather","price":49.5,
            "Category_id":"c1","quantity":3,"inStock":true,"image":"boot.jpg"}"#,
    )
    .unwrap();
    assert_eq!(p.id, "p1");
    assert_eq!(p.price, 49.5);
    assert_eq!(p.category_id.as_deref(), Some("c1"));
    assert_eq!(p.quantity, Some(3));
    assert_eq!(p.in_stock, Some(true));
}

#[test]
fn product_accepts_capitalized_quantity() {
    let p: Product =
        serde_json::from_str(r#"{"_id":"p1","name":"Boot","Quantity":7}"#).unwrap();
    assert_eq!(p.quantity, Some(7));
    assert_eq!(p.price, 0.0);
    assert!(p.description.is_empty());
}

#[test]
fn product_with_both_quantity_keys_prefers_lowercase() {
    let p: Product =
        serde_json::from_str(r#"{"_id":"2","name":"Cap","quantity":3,"Quantity":4}"#).unwrap();
    assert_eq!(p.quantity, Some(3));

    let p: Product =
        serde_json::from_str(r#"{"_id":"2","name":"Cap","quantity":null,"Quantity":4}"#).unwrap();
    assert_eq!(p.quantity, Some(4));
}

#[test]
fn product_numbers_sent_as_text_are_read() {
    let p: Product = serde_json::from_str(
        r#"{"_id":"2","name":"Cap","price":"12.5","Quantity":"4","inStock":"false"}"#,
    )
    .unwrap();
    assert_eq!(p.price, 12.5);
    assert_eq!(p.quantity, Some(4));
    assert_eq!(p.in_stock, Some(false));
}

#[test]
fn product_unreadable_numbers_fall_back() {
    let p: Product = serde_json::from_str(
        r#"{"_id":"2","name":"Cap","price":"free","quantity":"-1","Quantity":"many"}"#,
    )
    .unwrap();
    assert_eq!(p.price, 0.0);
    assert!(p.quantity.is_none());
}

#[test]
fn product_serializes_with_backend_names() {
    let p: Product =
        serde_json::from_str(r#"{"_id":"p1","name":"Boot","Quantity":"2","Category_id":"c1"}"#)
            .unwrap();
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json["_id"], "p1");
    assert_eq!(json["quantity"], 2);
    assert_eq!(json["Category_id"], "c1");
    assert!(json.get("inStock").is_none());
}

#[test]
fn user_keeps_unknown_fields() {
    let u: User = serde_json::from_str(
        r#"{"_id":"u1","name":"A","email":"a@b.com","isAdmin":true,"createdAt":"2024-01-01"}"#,
    )
    .unwrap();
    assert_eq!(u.id.as_deref(), Some("u1"));
    assert!(u.is_admin);
    assert_eq!(u.extra["createdAt"], "2024-01-01");
}

#[test]
fn user_defaults_missing_fields() {
    let u: User = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
    assert_eq!(u.name, "A");
    assert!(u.email.is_empty());
    assert!(!u.is_admin);
    assert!(u.id.is_none());
}

#[test]
fn credentials_serialize_as_login_payload() {
    let json = serde_json::to_value(Credentials::new("a@b.com", "x")).unwrap();
    assert_eq!(json, serde_json::json!({"email": "a@b.com", "password": "x"}));
}

#[test]
fn registration_skips_unset_admin_flag() {
    let reg = Registration {
        name: "A".into(),
        email: "a@b.com".into(),
        password: "x".into(),
        is_admin: None,
    };
    let json = serde_json::to_string(&reg).unwrap();
    assert!(!json.contains("isAdmin"));
}

// ===========================================================================
// Category search and lookup
// ===========================================================================

fn categories() -> Vec<Category> {
    vec![
        Category { id: "c1".into(), name: "Running Shoes".into(), image: None },
        Category { id: "c2".into(), name: "Hats".into(), image: None },
    ]
}

#[test]
fn filter_is_case_insensitive() {
    let all = categories();
    let hits = filter_categories(&all, "SHOE");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "c1");
}

#[test]
fn filter_with_empty_term_keeps_all() {
    let all = categories();
    assert_eq!(filter_categories(&all, "  ").len(), 2);
}

#[test]
fn category_name_lookup() {
    let all = categories();
    assert_eq!(category_name(&all, Some("c2")), "Hats");
    assert_eq!(category_name(&all, Some("missing")), UNKNOWN_CATEGORY);
    assert_eq!(category_name(&all, None), UNKNOWN_CATEGORY);
}

// ===========================================================================
// FormData / ImageFile
// ===========================================================================

#[test]
fn image_mime_is_guessed_from_extension() {
    assert_eq!(png("logo.png").mime, "image/png");
    assert_eq!(ImageFile::new("photo.JPG", vec![1]).mime, "image/jpeg");
    assert_eq!(ImageFile::new("blob", vec![1]).mime, "application/octet-stream");
}

#[test]
fn image_from_path_reads_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cat.webp");
    std::fs::write(&path, b"RIFF").unwrap();
    let img = ImageFile::from_path(&path).unwrap();
    assert_eq!(img.file_name, "cat.webp");
    assert_eq!(img.bytes, b"RIFF");
    assert_eq!(img.len(), 4);
}

#[test]
fn image_from_missing_path_is_io_error() {
    let err = ImageFile::from_path(Path::new("/nonexistent/shopdesk/x.png")).unwrap_err();
    assert!(matches!(err, Error::IoError(_)));
}

#[test]
fn form_data_preserves_order_and_kinds() {
    let form = FormData::new()
        .text("name", "Hats")
        .file("image", png("h.png"))
        .text("extra", "1");
    let names: Vec<&str> = form.fields().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["name", "image", "extra"]);
    let texts: Vec<_> = form.text_fields().collect();
    assert_eq!(texts, vec![("name", "Hats"), ("extra", "1")]);
    assert_eq!(form.get_file("image").unwrap().file_name, "h.png");
    assert!(form.get_file("name").is_none());
}

// ===========================================================================
// Category inputs
// ===========================================================================

#[test]
fn new_category_requires_name_and_image() {
    let err = NewCategory { name: "  ".into(), image: Some(png("a.png")) }
        .into_form()
        .unwrap_err();
    assert!(err.is_validation());
    let err = NewCategory { name: "Hats".into(), image: None }.into_form().unwrap_err();
    assert_eq!(err.to_string(), "Please provide both Category name and image.");
}

#[test]
fn new_category_form_fields() {
    let form = NewCategory { name: "  Hats ".into(), image: Some(png("a.png")) }
        .into_form()
        .unwrap();
    assert_eq!(form.get_text("name"), Some("Hats"));
    assert!(form.get_file("image").is_some());
}

#[test]
fn category_update_uses_categoryimage_field() {
    let form = CategoryUpdate { name: "Caps".into(), image: Some(png("c.png")) }
        .into_form()
        .unwrap();
    assert!(form.get_file("categoryimage").is_some());
    assert!(form.get_file("image").is_none());
}

#[test]
fn category_update_image_is_optional() {
    let form = CategoryUpdate { name: "Caps".into(), image: None }.into_form().unwrap();
    assert_eq!(form.len(), 1);
}

#[test]
fn category_update_requires_name() {
    let err = CategoryUpdate { name: "".into(), image: None }.into_form().unwrap_err();
    assert_eq!(err.to_string(), "Category name is required.");
}

// ===========================================================================
// Product inputs
// ===========================================================================

fn new_product() -> NewProduct {
    NewProduct {
        name: " Boot ".into(),
        description: "Leather".into(),
        price: 49.5,
        category_id: "c1".into(),
        quantity: 3,
        in_stock: true,
        image: Some(png("boot.png")),
    }
}

#[test]
fn new_product_form_fields() {
    let form = new_product().into_form().unwrap();
    assert_eq!(form.get_text("name"), Some("Boot"));
    assert_eq!(form.get_text("price"), Some("49.5"));
    assert_eq!(form.get_text("Category_id"), Some("c1"));
    assert_eq!(form.get_text("quantity"), Some("3"));
    assert_eq!(form.get_text("inStock"), Some("true"));
    assert!(form.get_file("image").is_some());
}

#[test]
fn whole_prices_have_no_fraction() {
    let form = NewProduct { price: 12.0, ..new_product() }.into_form().unwrap();
    assert_eq!(form.get_text("price"), Some("12"));
}

#[test]
fn new_product_rejects_bad_values() {
    let cases = vec![
        (NewProduct { price: 0.0, ..new_product() }, "Please enter a valid positive price."),
        (NewProduct { price: f64::NAN, ..new_product() }, "Please enter a valid positive price."),
        (NewProduct { quantity: 0, ..new_product() }, "Please enter a valid positive quantity."),
        (NewProduct { category_id: " ".into(), ..new_product() }, "Please select a category."),
        (NewProduct { description: "".into(), ..new_product() }, "Please fill all fields and upload an image."),
        (NewProduct { image: None, ..new_product() }, "Please fill all fields and upload an image."),
    ];
    for (input, expected) in cases {
        let err = input.into_form().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn product_update_uses_capitalized_quantity() {
    let update = ProductUpdate {
        name: "Boot".into(),
        description: "Leather".into(),
        price: 10.0,
        category_id: "c1".into(),
        quantity: 4,
        in_stock: false,
        image: None,
    };
    let form = update.into_form().unwrap();
    assert_eq!(form.get_text("Quantity"), Some("4"));
    assert!(form.get_text("quantity").is_none());
    assert_eq!(form.get_text("inStock"), Some("false"));
    assert!(form.get_file("image").is_none());
}

// ===========================================================================
// Config
// ===========================================================================

#[test]
fn config_load_missing_file_defaults() {
    let config = ShopdeskConfig::load(Path::new("/nonexistent/shopdesk.json"));
    assert_eq!(config, ShopdeskConfig::default());
}

#[test]
fn config_load_reads_camel_case_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"baseUrl":"http://api.local","sessionFile":"/tmp/s.json"}"#).unwrap();
    let config = ShopdeskConfig::load(&path);
    assert_eq!(config.base_url.as_deref(), Some("http://api.local"));
    assert_eq!(config.session_path(), Path::new("/tmp/s.json"));
}

#[test]
fn config_load_malformed_defaults_but_strict_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{not json").unwrap();
    assert_eq!(ShopdeskConfig::load(&path), ShopdeskConfig::default());
    assert!(matches!(ShopdeskConfig::load_strict(&path), Err(Error::JsonError(_))));
}

#[test]
fn config_strict_missing_is_config_error() {
    let err = ShopdeskConfig::load_strict(Path::new("/nonexistent/shopdesk.json")).unwrap_err();
    assert!(err.to_string().starts_with("config error:"));
}

#[test]
fn default_session_path_is_under_shopdesk_home() {
    let path = ShopdeskConfig::default().session_path();
    assert!(path.ends_with(".shopdesk/session.json"));
}

// ===========================================================================
// Error
// ===========================================================================

#[test]
fn validation_error_displays_message_only() {
    let err = Error::validation("Category name is required.");
    assert_eq!(err.to_string(), "Category name is required.");
}

#[test]
fn io_error_from_conversion() {
    let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(err.to_string().contains("gone"));
    assert!(!err.is_validation());
}
