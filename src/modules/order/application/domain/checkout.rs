use serde::Deserialize;
use std::collections::HashSet;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::catalog::application::domain::entities::Product;
use crate::order::application::domain::entities::{OrderItem, PaymentMethod};

pub const MAX_LINES: usize = 50;
pub const MAX_QUANTITY: i32 = 99;
const NAME_MAX_LEN: usize = 100;
const ADDRESS_MAX_LEN: usize = 500;
const NOTE_MAX_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct NewOrderRequest {
    pub items: Vec<OrderLineRequest>,
    pub payment_method: PaymentMethod,
    pub shipping_name: String,
    pub shipping_phone: String,
    pub shipping_address: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("{0}")]
    Invalid(String),

    #[error("Product {0} not found")]
    ProductNotFound(Uuid),

    #[error("Insufficient stock for product {0}")]
    InsufficientStock(Uuid),
}

fn invalid(msg: impl Into<String>) -> CheckoutError {
    CheckoutError::Invalid(msg.into())
}

fn required(field: &str, value: &str, max: usize) -> Result<String, CheckoutError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(invalid(format!("{field} must be 1-{max} characters")));
    }
    Ok(value.to_string())
}

fn check_phone(phone: &str) -> Result<String, CheckoutError> {
    let phone = phone.trim();
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '.'));
    if !allowed || !(8..=15).contains(&digits) {
        return Err(invalid("Shipping phone must contain 8-15 digits"));
    }
    Ok(phone.to_string())
}

impl NewOrderRequest {
    /// Trims text fields and enforces line and quantity bounds.
    pub fn validate(self) -> Result<Self, CheckoutError> {
        if self.items.is_empty() || self.items.len() > MAX_LINES {
            return Err(invalid(format!("An order must have 1-{MAX_LINES} lines")));
        }

        let mut seen = HashSet::new();
        for line in &self.items {
            if !seen.insert(line.product_id) {
                return Err(invalid(format!(
                    "Product {} appears more than once",
                    line.product_id
                )));
            }
            if !(1..=MAX_QUANTITY).contains(&line.quantity) {
                return Err(invalid(format!(
                    "Quantity must be between 1 and {MAX_QUANTITY}"
                )));
            }
        }

        let note = match self.note.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(note) if note.chars().count() > NOTE_MAX_LEN => {
                return Err(invalid(format!(
                    "Note must be at most {NOTE_MAX_LEN} characters"
                )))
            }
            Some(note) => Some(note.to_string()),
        };

        Ok(Self {
            shipping_name: required("Shipping name", &self.shipping_name, NAME_MAX_LEN)?,
            shipping_phone: check_phone(&self.shipping_phone)?,
            shipping_address: required("Shipping address", &self.shipping_address, ADDRESS_MAX_LEN)?,
            note,
            items: self.items,
            payment_method: self.payment_method,
        })
    }

    pub fn product_ids(&self) -> Vec<Uuid> {
        self.items.iter().map(|line| line.product_id).collect()
    }
}

/// Snapshots current product names and prices onto the requested lines and
/// returns them with the order total.
pub fn price_lines(
    lines: &[OrderLineRequest],
    products: &[Product],
) -> Result<(Vec<OrderItem>, i64), CheckoutError> {
    let mut items = Vec::with_capacity(lines.len());

    for line in lines {
        let product = products
            .iter()
            .find(|p| p.id == line.product_id && !p.is_deleted)
            .ok_or(CheckoutError::ProductNotFound(line.product_id))?;

        if !product.has_stock_for(line.quantity) {
            return Err(CheckoutError::InsufficientStock(product.id));
        }

        items.push(OrderItem {
            product_id: product.id,
            product_name: product.name.clone(),
            unit_price: product.price,
            quantity: line.quantity,
        });
    }

    let total = items.iter().map(OrderItem::line_total).sum();
    Ok((items, total))
}
