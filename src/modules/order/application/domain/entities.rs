use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Draft,
    Pending,
    Confirmed,
    Delivering,
    Delivered,
    Cancelled,
    CancelledByAdmin,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Draft,
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Delivering,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::CancelledByAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::CancelledByAdmin => "cancelled_by_admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Static adjacency of the fulfillment workflow.
    pub fn allowed_next(&self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Draft => &[Pending, Cancelled],
            Pending => &[Confirmed, Cancelled, CancelledByAdmin],
            Confirmed => &[Delivering, CancelledByAdmin],
            Delivering => &[Delivered, CancelledByAdmin],
            Delivered | Cancelled | CancelledByAdmin => &[],
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::CancelledByAdmin)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }

    /// Stock for the order's lines is reserved while it sits in one of these.
    pub fn holds_stock(&self) -> bool {
        matches!(self, OrderStatus::Confirmed | OrderStatus::Delivering)
    }

    /// Customer-facing label used in history entries and emails.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "Awaiting payment",
            OrderStatus::Pending => "Pending confirmation",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Delivering => "Out for delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::CancelledByAdmin => "Cancelled by the shop",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PayingStatus {
    #[default]
    Unpaid,
    Paid,
    Failed,
    Refunded,
}

impl PayingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayingStatus::Unpaid => "unpaid",
            PayingStatus::Paid => "paid",
            PayingStatus::Failed => "failed",
            PayingStatus::Refunded => "refunded",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unpaid" => Some(PayingStatus::Unpaid),
            "paid" => Some(PayingStatus::Paid),
            "failed" => Some(PayingStatus::Failed),
            "refunded" => Some(PayingStatus::Refunded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    #[default]
    None,
    Pending,
    Completed,
}

impl RefundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundStatus::None => "none",
            RefundStatus::Pending => "pending",
            RefundStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(RefundStatus::None),
            "pending" => Some(RefundStatus::Pending),
            "completed" => Some(RefundStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cod,
    Momo,
    Payos,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Momo => "momo",
            PaymentMethod::Payos => "payos",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cod" => Some(PaymentMethod::Cod),
            "momo" => Some(PaymentMethod::Momo),
            "payos" => Some(PaymentMethod::Payos),
            _ => None,
        }
    }

    /// Online methods start as drafts until the gateway confirms payment.
    pub fn is_online(&self) -> bool {
        !matches!(self, PaymentMethod::Cod)
    }

    pub fn initial_status(&self) -> OrderStatus {
        if self.is_online() {
            OrderStatus::Draft
        } else {
            OrderStatus::Pending
        }
    }
}

/// A purchased line with the price snapshotted at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub unit_price: i64,
    pub quantity: i32,
}

impl OrderItem {
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub at: DateTime<Utc>,
    pub message: String,
}

impl HistoryEntry {
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub contact_email: String,
    pub items: Vec<OrderItem>,
    #[schema(example = 700000)]
    pub total: i64,
    pub status: OrderStatus,
    pub paying_status: PayingStatus,
    pub refund_status: RefundStatus,
    pub payment_method: PaymentMethod,
    pub payment_reference: Option<String>,
    pub shipping_name: String,
    pub shipping_phone: String,
    pub shipping_address: String,
    pub note: Option<String>,
    pub history: Vec<HistoryEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    pub fn contains_product(&self, product_id: Uuid) -> bool {
        self.items.iter().any(|item| item.product_id == product_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderListFilter {
    pub status: Option<OrderStatus>,
    pub user_id: Option<Uuid>,
}

#[cfg(test)]
pub(crate) fn sample_order(user_id: Uuid, status: OrderStatus, method: PaymentMethod) -> Order {
    let now = Utc::now();
    let items = vec![OrderItem {
        product_id: Uuid::new_v4(),
        product_name: "Red roses".to_string(),
        unit_price: 350_000,
        quantity: 2,
    }];
    Order {
        id: Uuid::new_v4(),
        user_id,
        contact_email: "buyer@example.com".to_string(),
        total: items.iter().map(OrderItem::line_total).sum(),
        items,
        status,
        paying_status: PayingStatus::Unpaid,
        refund_status: RefundStatus::None,
        payment_method: method,
        payment_reference: None,
        shipping_name: "Nguyen Van A".to_string(),
        shipping_phone: "0901234567".to_string(),
        shipping_address: "1 Le Loi, District 1, HCMC".to_string(),
        note: None,
        history: vec![HistoryEntry::now("Order placed")],
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_matches_workflow() {
        use OrderStatus::*;
        assert!(Draft.can_transition_to(Pending));
        assert!(Draft.can_transition_to(Cancelled));
        assert!(!Draft.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(CancelledByAdmin));
        assert!(!Confirmed.can_transition_to(Cancelled));
        assert!(Delivering.can_transition_to(Delivered));
        assert!(!Delivering.can_transition_to(Pending));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for status in OrderStatus::ALL {
            assert_eq!(
                status.is_terminal(),
                matches!(
                    status,
                    OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::CancelledByAdmin
                )
            );
        }
    }

    #[test]
    fn status_strings_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("shipped"), None);
    }

    #[test]
    fn online_methods_start_as_draft() {
        assert_eq!(PaymentMethod::Cod.initial_status(), OrderStatus::Pending);
        assert_eq!(PaymentMethod::Momo.initial_status(), OrderStatus::Draft);
        assert_eq!(PaymentMethod::Payos.initial_status(), OrderStatus::Draft);
    }

    #[test]
    fn serializes_statuses_in_snake_case() {
        let json = serde_json::to_value(OrderStatus::CancelledByAdmin).unwrap();
        assert_eq!(json, "cancelled_by_admin");
    }

    #[test]
    fn contact_email_is_not_serialized() {
        let order = sample_order(Uuid::new_v4(), OrderStatus::Pending, PaymentMethod::Cod);
        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("contact_email").is_none());
        assert_eq!(json["total"], 700_000);
    }
}
