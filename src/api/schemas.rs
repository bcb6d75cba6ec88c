use serde::Serialize;
use utoipa::ToSchema;

/// Envelope around every successful JSON body.
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

/// Envelope around every failed JSON body.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable machine-readable code, e.g. `ORDER_NOT_FOUND` or `INSUFFICIENT_STOCK`.
    #[schema(example = "ORDER_NOT_FOUND")]
    pub code: String,

    #[schema(example = "Order not found")]
    pub message: String,
}
