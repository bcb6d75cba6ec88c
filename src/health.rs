use actix_web::{get, web, HttpResponse, Responder};
use deadpool_redis::Pool;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use std::time::Duration;
use utoipa::ToSchema;

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessResponse {
    status: &'static str,
    database: &'static str,
    redis: &'static str,
}

/// LIVENESS PROBE
/// - No I/O
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Process is up", body = HealthResponse))
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

async fn database_status(db: &DatabaseConnection) -> &'static str {
    let ping = db.execute(Statement::from_string(db.get_database_backend(), "SELECT 1"));
    match tokio::time::timeout(PROBE_TIMEOUT, ping).await {
        Ok(Ok(_)) => "ok",
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Readiness: database check failed");
            "unhealthy"
        }
        Err(_) => {
            tracing::warn!("Readiness: database check timed out");
            "unhealthy"
        }
    }
}

async fn redis_status(pool: &Pool) -> &'static str {
    let ping = async {
        let mut conn = pool.get().await.map_err(|e| e.to_string())?;
        deadpool_redis::redis::cmd("PING")
            .query_async::<String>(&mut *conn)
            .await
            .map_err(|e| e.to_string())
    };
    match tokio::time::timeout(PROBE_TIMEOUT, ping).await {
        Ok(Ok(_)) => "ok",
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Readiness: redis check failed");
            "unhealthy"
        }
        Err(_) => {
            tracing::warn!("Readiness: redis check timed out");
            "unhealthy"
        }
    }
}

/// READINESS PROBE
/// - Postgres `SELECT 1`
/// - Redis `PING`
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Dependencies reachable", body = ReadinessResponse),
        (status = 503, description = "A dependency is down", body = ReadinessResponse)
    )
)]
#[get("/ready")]
pub async fn readiness(db: web::Data<DatabaseConnection>, redis: web::Data<Pool>) -> HttpResponse {
    let (database, redis) = tokio::join!(database_status(&db), redis_status(&redis));

    if database == "ok" && redis == "ok" {
        return HttpResponse::Ok().json(ReadinessResponse {
            status: "ok",
            database,
            redis,
        });
    }

    tracing::error!(database, redis, "Service not ready");
    HttpResponse::ServiceUnavailable().json(ReadinessResponse {
        status: "unhealthy",
        database,
        redis,
    })
}
