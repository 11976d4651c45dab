pub mod catalog;
pub mod docs;
pub mod solve;

pub use catalog::*;
pub use docs::*;
pub use solve::*;

use actix_web::HttpResponse;

use crate::api_json::ErrorResponse;
use crate::error::ScheduleError;

/// 422 si no existe horario factible; cualquier otro error del dominio es del cliente (400).
pub fn schedule_error_response(err: &ScheduleError) -> HttpResponse {
    let body = ErrorResponse::from(err);
    match err {
        ScheduleError::Infeasible { .. } => HttpResponse::UnprocessableEntity().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

pub fn internal_error_response(message: impl Into<String>) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new("internal_error", message))
}
