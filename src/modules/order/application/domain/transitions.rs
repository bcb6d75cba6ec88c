use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::order::application::domain::entities::{
    HistoryEntry, Order, OrderItem, OrderStatus, PayingStatus, RefundStatus,
};

/// Who is asking for a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionActor {
    Customer(UserId),
    Admin(UserId),
    PaymentGateway,
}

impl TransitionActor {
    fn describe(&self) -> &'static str {
        match self {
            TransitionActor::Customer(_) => "customer",
            TransitionActor::Admin(_) => "admin",
            TransitionActor::PaymentGateway => "payment gateway",
        }
    }
}

/// Inventory side effect that has to commit together with the status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockMove {
    None,
    Reserve(Vec<OrderItem>),
    Release(Vec<OrderItem>),
}

/// A validated status change, ready to be applied atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTransition {
    pub order_id: Uuid,
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub stock: StockMove,
    pub paying_status: Option<PayingStatus>,
    pub refund_status: Option<RefundStatus>,
    pub history: HistoryEntry,
}

impl OrderTransition {
    pub fn starts_refund(&self) -> bool {
        self.refund_status == Some(RefundStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Actor is not allowed to move order to {0}")]
    NotAllowed(OrderStatus),
}

fn actor_may(actor: &TransitionActor, order: &Order, from: OrderStatus, to: OrderStatus) -> bool {
    match actor {
        TransitionActor::Customer(user_id) => {
            order.is_owned_by(user_id.value()) && to == OrderStatus::Cancelled
        }
        TransitionActor::Admin(_) => {
            to != OrderStatus::Cancelled && !(from == OrderStatus::Draft && to == OrderStatus::Pending)
        }
        TransitionActor::PaymentGateway => {
            from == OrderStatus::Draft && to == OrderStatus::Pending
        }
    }
}

/// Checks the adjacency table and actor rules, then derives the stock and refund
/// consequences of moving `order` to `next`.
pub fn plan_transition(
    order: &Order,
    actor: &TransitionActor,
    next: OrderStatus,
) -> Result<OrderTransition, TransitionError> {
    let from = order.status;

    if !from.can_transition_to(next) {
        return Err(TransitionError::InvalidTransition { from, to: next });
    }
    if !actor_may(actor, order, from, next) {
        return Err(TransitionError::NotAllowed(next));
    }

    let stock = if next == OrderStatus::Confirmed {
        StockMove::Reserve(order.items.clone())
    } else if next.is_cancelled() && from.holds_stock() {
        StockMove::Release(order.items.clone())
    } else {
        StockMove::None
    };

    let refund_status = (next.is_cancelled() && order.paying_status == PayingStatus::Paid)
        .then_some(RefundStatus::Pending);

    let mut message = format!(
        "Status changed from {} to {} by {}",
        from.as_str(),
        next.as_str(),
        actor.describe()
    );
    if refund_status.is_some() {
        message.push_str("; refund pending");
    }

    Ok(OrderTransition {
        order_id: order.id,
        from,
        to: next,
        stock,
        paying_status: None,
        refund_status,
        history: HistoryEntry::now(message),
    })
}
