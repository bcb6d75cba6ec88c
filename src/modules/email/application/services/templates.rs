use askama::Template;

use crate::email::application::ports::outgoing::EmailSendError;
use crate::order::application::domain::entities::Order;

pub(super) struct Rendered {
    pub subject: String,
    pub html: String,
}

#[derive(Template)]
#[template(path = "email/verification.html")]
struct VerificationMail<'a> {
    name: &'a str,
    link: &'a str,
}

#[derive(Template)]
#[template(path = "email/password_reset.html")]
struct PasswordResetMail<'a> {
    name: &'a str,
    link: &'a str,
}

struct ItemLine {
    name: String,
    quantity: i32,
    amount: String,
}

#[derive(Template)]
#[template(path = "email/order_status.html")]
struct OrderStatusMail<'a> {
    name: &'a str,
    link: &'a str,
    order_no: String,
    status: &'a str,
    lines: Vec<ItemLine>,
    total: String,
}

#[derive(Template)]
#[template(path = "email/refund_pending.html")]
struct RefundPendingMail<'a> {
    name: &'a str,
    link: &'a str,
    order_no: String,
    amount: String,
}

#[derive(Template)]
#[template(path = "email/refund_completed.html")]
struct RefundCompletedMail<'a> {
    name: &'a str,
    link: &'a str,
    order_no: String,
    amount: String,
}

/// `1234567` -> `1.234.567 ₫`
pub(super) fn format_vnd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped} ₫")
}

fn short_id(order: &Order) -> String {
    order.id.simple().to_string()[..8].to_uppercase()
}

fn render(subject: String, template: &impl Template) -> Result<Rendered, EmailSendError> {
    let html = template
        .render()
        .map_err(|e| EmailSendError::Template(e.to_string()))?;
    Ok(Rendered { subject, html })
}

pub(super) fn verification(name: &str, link: &str) -> Result<Rendered, EmailSendError> {
    render(
        "Verify your email address".to_string(),
        &VerificationMail { name, link },
    )
}

pub(super) fn password_reset(name: &str, link: &str) -> Result<Rendered, EmailSendError> {
    render(
        "Reset your password".to_string(),
        &PasswordResetMail { name, link },
    )
}

pub(super) fn status_changed(order: &Order, link: &str) -> Result<Rendered, EmailSendError> {
    let mail = OrderStatusMail {
        name: &order.shipping_name,
        link,
        order_no: short_id(order),
        status: order.status.label(),
        lines: order
            .items
            .iter()
            .map(|item| ItemLine {
                name: item.product_name.clone(),
                quantity: item.quantity,
                amount: format_vnd(item.line_total()),
            })
            .collect(),
        total: format_vnd(order.total),
    };
    render(format!("Order #{}: {}", mail.order_no, mail.status), &mail)
}

pub(super) fn refund_pending(order: &Order, link: &str) -> Result<Rendered, EmailSendError> {
    let mail = RefundPendingMail {
        name: &order.shipping_name,
        link,
        order_no: short_id(order),
        amount: format_vnd(order.total),
    };
    render(format!("Order #{}: refund in progress", mail.order_no), &mail)
}

pub(super) fn refund_completed(order: &Order, link: &str) -> Result<Rendered, EmailSendError> {
    let mail = RefundCompletedMail {
        name: &order.shipping_name,
        link,
        order_no: short_id(order),
        amount: format_vnd(order.total),
    };
    render(format!("Order #{}: refund completed", mail.order_no), &mail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::application::domain::entities::{sample_order, OrderStatus, PaymentMethod};
    use uuid::Uuid;

    #[test]
    fn vnd_is_dot_grouped() {
        assert_eq!(format_vnd(0), "0 ₫");
        assert_eq!(format_vnd(999), "999 ₫");
        assert_eq!(format_vnd(1_000), "1.000 ₫");
        assert_eq!(format_vnd(700_000), "700.000 ₫");
        assert_eq!(format_vnd(12_345_678), "12.345.678 ₫");
        assert_eq!(format_vnd(-5_000), "-5.000 ₫");
    }

    #[test]
    fn user_input_is_escaped() {
        let rendered =
            verification("<script>alert(1)</script>", "https://x.test/v?a=1&b=2").unwrap();
        assert!(!rendered.html.contains("<script>"));
        assert!(rendered.html.contains("&lt;script&gt;"));
        assert!(rendered.html.contains("a=1&amp;b=2"));
    }

    #[test]
    fn verification_mail_uses_layout() {
        let rendered = verification("Lan", "https://api.shop.vn/verify").unwrap();
        assert_eq!(rendered.subject, "Verify your email address");
        assert!(rendered.html.contains("Welcome!"));
        assert!(rendered.html.contains("Hi Lan,"));
        assert!(rendered.html.contains("Verify email"));
        assert!(rendered.html.contains("automated message"));
    }

    #[test]
    fn status_mail_lists_items_and_total() {
        let order = sample_order(Uuid::new_v4(), OrderStatus::Confirmed, PaymentMethod::Cod);
        let rendered = status_changed(&order, "https://shop.vn/orders/1").unwrap();

        assert!(rendered.subject.ends_with("Confirmed"));
        assert!(rendered.html.contains("Red roses"));
        assert!(rendered.html.contains("700.000 ₫"));
        assert!(rendered.html.contains("View order"));
    }

    #[test]
    fn product_names_are_escaped_in_item_table() {
        let mut order = sample_order(Uuid::new_v4(), OrderStatus::Confirmed, PaymentMethod::Cod);
        order.items[0].product_name = "Roses & <b>lilies</b>".to_string();

        let rendered = status_changed(&order, "https://shop.vn/orders/1").unwrap();

        assert!(rendered.html.contains("Roses &amp; &lt;b&gt;lilies&lt;/b&gt;"));
    }

    #[test]
    fn refund_mails_state_the_amount() {
        let order = sample_order(Uuid::new_v4(), OrderStatus::Cancelled, PaymentMethod::Momo);

        let pending = refund_pending(&order, "https://shop.vn/orders/1").unwrap();
        assert!(pending.subject.ends_with("refund in progress"));
        assert!(pending.html.contains("700.000 ₫"));

        let done = refund_completed(&order, "https://shop.vn/orders/1").unwrap();
        assert!(done.subject.ends_with("refund completed"));
        assert!(done.html.contains("We have refunded"));
    }
}
