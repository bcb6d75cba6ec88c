use actix_web::web::Bytes;
use actix_web::{get, web, Error, HttpResponse};
use futures::stream::{self, Stream, StreamExt};
use std::time::Duration;
use tokio::sync::broadcast::{error::RecvError, Receiver};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::order::application::ports::outgoing::OrderEvent;
use crate::AppState;

/// Comment frame sent while no events flow so proxies keep the connection open.
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Which events a subscriber is entitled to see.
#[derive(Debug, Clone, Copy)]
enum Audience {
    Everything,
    Owner(Uuid),
}

impl Audience {
    fn allows(&self, event: &OrderEvent) -> bool {
        match self {
            Audience::Everything => true,
            Audience::Owner(user_id) => event.user_id == *user_id,
        }
    }
}

fn frame(event: &OrderEvent) -> Option<Bytes> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Bytes::from(format!("event: order_status\ndata: {json}\n\n"))),
        Err(e) => {
            error!(order_id = %event.order_id, error = %e, "Failed to encode order event");
            None
        }
    }
}

fn event_stream(
    rx: Receiver<OrderEvent>,
    audience: Audience,
    keep_alive: Duration,
) -> impl Stream<Item = Result<Bytes, Error>> {
    let opening = stream::once(async { Ok(Bytes::from_static(b": connected\n\n")) });

    let mut ticker = time::interval_at(Instant::now() + keep_alive, keep_alive);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let events = stream::unfold((rx, ticker), move |(mut rx, mut ticker)| async move {
        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Ok(event) if audience.allows(&event) => {
                        if let Some(bytes) = frame(&event) {
                            ticker.reset();
                            return Some((Ok(bytes), (rx, ticker)));
                        }
                    }
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Order event subscriber lagged");
                    }
                    Err(RecvError::Closed) => return None,
                },
                _ = ticker.tick() => {
                    return Some((Ok(Bytes::from_static(b": keep-alive\n\n")), (rx, ticker)));
                }
            }
        }
    });

    opening.chain(events)
}

/// Live order status updates as Server-Sent Events. Customers only receive
/// events for their own orders.
#[utoipa::path(
    get,
    path = "/api/orders/events",
    tag = "orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "text/event-stream of order_status events", content_type = "text/event-stream", body = String),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
    )
)]
#[get("/api/orders/events")]
pub async fn order_events_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> HttpResponse {
    let audience = if user.is_admin() {
        Audience::Everything
    } else {
        Audience::Owner(user.user_id.value())
    };
    info!(user_id = %user.user_id, "Order event stream opened");

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .insert_header(("X-Accel-Buffering", "no"))
        .streaming(event_stream(
            data.order_events.subscribe(),
            audience,
            KEEP_ALIVE_INTERVAL,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserRole;
    use crate::order::adapter::outgoing::OrderEventBus;
    use crate::order::application::domain::entities::{sample_order, OrderStatus, PaymentMethod};
    use crate::order::application::ports::outgoing::OrderEventPublisher;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::test_helpers::{bearer, token_provider_data};
    use actix_web::{http::header, test, App};

    fn event_for(user_id: Uuid, status: OrderStatus) -> OrderEvent {
        OrderEvent::from(&sample_order(user_id, status, PaymentMethod::Cod))
    }

    #[tokio::test]
    async fn customers_only_see_their_own_orders() {
        let bus = OrderEventBus::new(8);
        let me = Uuid::new_v4();
        let mut stream = Box::pin(event_stream(
            bus.subscribe(),
            Audience::Owner(me),
            KEEP_ALIVE_INTERVAL,
        ));

        let opening = stream.next().await.unwrap().unwrap();
        assert_eq!(&opening[..], b": connected\n\n");

        bus.publish(event_for(Uuid::new_v4(), OrderStatus::Pending));
        bus.publish(event_for(me, OrderStatus::Confirmed));

        let bytes = stream.next().await.unwrap().unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();
        assert!(text.starts_with("event: order_status\ndata: "));
        assert!(text.contains(&me.to_string()));
        assert!(text.contains("\"confirmed\""));
    }

    #[tokio::test]
    async fn admins_see_everything() {
        let bus = OrderEventBus::new(8);
        let mut stream = Box::pin(event_stream(
            bus.subscribe(),
            Audience::Everything,
            KEEP_ALIVE_INTERVAL,
        ));
        stream.next().await;

        let someone = Uuid::new_v4();
        bus.publish(event_for(someone, OrderStatus::Delivering));

        let bytes = stream.next().await.unwrap().unwrap();
        assert!(std::str::from_utf8(&bytes).unwrap().contains(&someone.to_string()));
    }

    #[tokio::test]
    async fn stream_ends_when_bus_is_dropped() {
        let bus = OrderEventBus::new(8);
        let mut stream = Box::pin(event_stream(
            bus.subscribe(),
            Audience::Everything,
            KEEP_ALIVE_INTERVAL,
        ));
        stream.next().await;

        drop(bus);

        assert!(stream.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_stream_sends_keep_alive_comments() {
        let bus = OrderEventBus::new(8);
        let mut stream = Box::pin(event_stream(
            bus.subscribe(),
            Audience::Everything,
            KEEP_ALIVE_INTERVAL,
        ));
        stream.next().await;

        let started = Instant::now();
        let bytes = stream.next().await.unwrap().unwrap();

        assert_eq!(&bytes[..], b": keep-alive\n\n");
        assert!(started.elapsed() >= KEEP_ALIVE_INTERVAL);

        let someone = Uuid::new_v4();
        bus.publish(event_for(someone, OrderStatus::Delivering));
        let bytes = stream.next().await.unwrap().unwrap();
        assert!(std::str::from_utf8(&bytes).unwrap().starts_with("event: order_status"));
    }

    #[actix_web::test]
    async fn handler_opens_event_stream() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(token_provider_data())
                .service(order_events_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/orders/events")
            .insert_header(("Authorization", bearer(Uuid::new_v4(), false, UserRole::Customer)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/event-stream"
        );
    }

    #[actix_web::test]
    async fn anonymous_callers_are_rejected() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(token_provider_data())
                .service(order_events_handler),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/orders/events").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
    }
}
