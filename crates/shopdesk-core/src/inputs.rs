//! Catalog form inputs with client-side validation
//!
//! Each input checks its fields before anything is sent and converts into
//! the multipart field names the backend expects. The names are not uniform
//! across endpoints (`categoryimage`, `Quantity`); keep them as they are.

use crate::error::{Error, Result};
use crate::form::{FormData, ImageFile};

#[derive(Clone, Debug, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub image: Option<ImageFile>,
}

impl NewCategory {
    pub fn into_form(self) -> Result<FormData> {
        let name = self.name.trim();
        match self.image {
            Some(image) if !name.is_empty() => Ok(FormData::new()
                .text("name", name)
                .file("image", image)),
            _ => Err(Error::validation(
                "Please provide both Category name and image.",
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryUpdate {
    pub name: String,
    pub image: Option<ImageFile>,
}

impl CategoryUpdate {
    pub fn into_form(self) -> Result<FormData> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::validation("Category name is required."));
        }
        let mut form = FormData::new().text("name", name);
        if let Some(image) = self.image {
            form.append_file("categoryimage", image);
        }
        Ok(form)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: String,
    pub quantity: u32,
    pub in_stock: bool,
    pub image: Option<ImageFile>,
}

impl NewProduct {
    pub fn into_form(self) -> Result<FormData> {
        let fields = ProductFields::check(
            &self.name,
            &self.description,
            self.price,
            &self.category_id,
            self.quantity,
        )?;
        let image = self
            .image
            .ok_or_else(|| Error::validation("Please fill all fields and upload an image."))?;

        Ok(FormData::new()
            .text("name", fields.name)
            .text("description", fields.description)
            .text("price", self.price.to_string())
            .text("Category_id", fields.category_id)
            .text("quantity", self.quantity.to_string())
            .text("inStock", self.in_stock.to_string())
            .file("image", image))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: String,
    pub quantity: u32,
    pub in_stock: bool,
    pub image: Option<ImageFile>,
}

impl ProductUpdate {
    pub fn into_form(self) -> Result<FormData> {
        let fields = ProductFields::check(
            &self.name,
            &self.description,
            self.price,
            &self.category_id,
            self.quantity,
        )?;

        let mut form = FormData::new()
            .text("name", fields.name)
            .text("description", fields.description)
            .text("price", self.price.to_string())
            .text("Quantity", self.quantity.to_string())
            .text("Category_id", fields.category_id)
            .text("inStock", self.in_stock.to_string());
        if let Some(image) = self.image {
            form.append_file("image", image);
        }
        Ok(form)
    }
}

struct ProductFields<'a> {
    name: &'a str,
    description: &'a str,
    category_id: &'a str,
}

impl<'a> ProductFields<'a> {
    fn check(
        name: &'a str,
        description: &'a str,
        price: f64,
        category_id: &'a str,
        quantity: u32,
    ) -> Result<Self> {
        let name = name.trim();
        let description = description.trim();
        let category_id = category_id.trim();

        if name.is_empty() || description.is_empty() {
            return Err(Error::validation("Please fill all fields and upload an image."));
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(Error::validation("Please enter a valid positive price."));
        }
        if quantity == 0 {
            return Err(Error::validation("Please enter a valid positive quantity."));
        }
        if category_id.is_empty() {
            return Err(Error::validation("Please select a category."));
        }

        Ok(Self {
            name,
            description,
            category_id,
        })
    }
}
