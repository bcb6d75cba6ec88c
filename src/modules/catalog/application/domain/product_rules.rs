use serde::Deserialize;
use utoipa::ToSchema;

pub const NAME_MAX_LEN: usize = 200;
pub const LABEL_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 5000;
pub const MAX_IMAGES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ProductValidationError(pub String);

fn invalid(msg: impl Into<String>) -> ProductValidationError {
    ProductValidationError(msg.into())
}

fn check_name(name: &str) -> Result<String, ProductValidationError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > NAME_MAX_LEN {
        return Err(invalid(format!("Name must be 1-{NAME_MAX_LEN} characters")));
    }
    Ok(name.to_string())
}

fn check_label(field: &str, value: &str) -> Result<String, ProductValidationError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > LABEL_MAX_LEN {
        return Err(invalid(format!("{field} must be 1-{LABEL_MAX_LEN} characters")));
    }
    Ok(value.to_string())
}

fn check_description(description: &str) -> Result<String, ProductValidationError> {
    let description = description.trim();
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(invalid(format!(
            "Description must be at most {DESCRIPTION_MAX_LEN} characters"
        )));
    }
    Ok(description.to_string())
}

fn check_price(price: i64) -> Result<i64, ProductValidationError> {
    if price <= 0 {
        return Err(invalid("Price must be greater than 0"));
    }
    Ok(price)
}

fn check_stock(stock: i32) -> Result<i32, ProductValidationError> {
    if stock < 0 {
        return Err(invalid("Stock cannot be negative"));
    }
    Ok(stock)
}

fn check_images(images: Vec<String>) -> Result<Vec<String>, ProductValidationError> {
    if images.len() > MAX_IMAGES {
        return Err(invalid(format!("At most {MAX_IMAGES} images are allowed")));
    }
    images
        .into_iter()
        .map(|url| {
            let url = url.trim().to_string();
            if url.starts_with("https://") || url.starts_with("http://") {
                Ok(url)
            } else {
                Err(invalid(format!("Image URL must be http(s): {url}")))
            }
        })
        .collect()
}

/// Payload for a new product, normalized by [`NewProduct::validate`].
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    pub category: String,
    pub product_type: String,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub images: Vec<String>,
}

impl NewProduct {
    pub fn validate(self) -> Result<Self, ProductValidationError> {
        Ok(Self {
            name: check_name(&self.name)?,
            description: check_description(&self.description)?,
            price: check_price(self.price)?,
            category: check_label("Category", &self.category)?,
            product_type: check_label("Product type", &self.product_type)?,
            stock: check_stock(self.stock)?,
            images: check_images(self.images)?,
        })
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub category: Option<String>,
    pub product_type: Option<String>,
    pub stock: Option<i32>,
    pub images: Option<Vec<String>>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(self) -> Result<Self, ProductValidationError> {
        if self.is_empty() {
            return Err(invalid("No fields to update"));
        }
        Ok(Self {
            name: self.name.as_deref().map(check_name).transpose()?,
            description: self.description.as_deref().map(check_description).transpose()?,
            price: self.price.map(check_price).transpose()?,
            category: self
                .category
                .as_deref()
                .map(|c| check_label("Category", c))
                .transpose()?,
            product_type: self
                .product_type
                .as_deref()
                .map(|t| check_label("Product type", t))
                .transpose()?,
            stock: self.stock.map(check_stock).transpose()?,
            images: self.images.map(check_images).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product() -> NewProduct {
        NewProduct {
            name: "  Red Roses  ".to_string(),
            description: "Twelve stems".to_string(),
            price: 350_000,
            category: " Bouquet ".to_string(),
            product_type: "Fresh flowers".to_string(),
            stock: 5,
            images: vec![" https://cdn.example.com/roses.jpg ".to_string()],
        }
    }

    #[test]
    fn valid_product_is_trimmed() {
        let product = new_product().validate().unwrap();
        assert_eq!(product.name, "Red Roses");
        assert_eq!(product.category, "Bouquet");
        assert_eq!(product.images, vec!["https://cdn.example.com/roses.jpg"]);
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let mut product = new_product();
        product.price = 0;
        assert!(product.validate().is_err());
    }

    #[test]
    fn negative_stock_is_rejected() {
        let mut product = new_product();
        product.stock = -1;
        assert!(product.validate().is_err());
    }

    #[test]
    fn long_name_is_rejected() {
        let mut product = new_product();
        product.name = "x".repeat(NAME_MAX_LEN + 1);
        assert!(product.validate().is_err());
    }

    #[test]
    fn blank_category_is_rejected() {
        let mut product = new_product();
        product.category = "   ".to_string();
        assert!(product.validate().is_err());
    }

    #[test]
    fn non_http_image_is_rejected() {
        let mut product = new_product();
        product.images = vec!["ftp://x/y.jpg".to_string()];
        assert!(product.validate().is_err());
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert!(ProductPatch::default().validate().is_err());
    }

    #[test]
    fn patch_validates_only_present_fields() {
        let patch = ProductPatch {
            price: Some(120_000),
            name: Some(" Tulips ".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(patch.name.as_deref(), Some("Tulips"));
        assert_eq!(patch.stock, None);

        let bad = ProductPatch {
            price: Some(-5),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
