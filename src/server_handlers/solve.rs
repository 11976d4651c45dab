use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use log::{debug, warn};

use crate::api_json::{subjects_from_dtos, ErrorResponse, GenerateRequest, ScheduleResponse};
use crate::server::AppState;
use crate::server_handlers::{internal_error_response, schedule_error_response};

/// POST /api/v1/schedules/generate
///
/// Convierte el cuerpo a entidades de dominio, espera un permiso del semáforo
/// y corre la búsqueda en el pool bloqueante de tokio.
pub async fn generate_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let request: GenerateRequest = match serde_json::from_value(body.into_inner()) {
        Ok(r) => r,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(ErrorResponse::new("invalid_request", format!("failed to parse input: {}", e)));
        }
    };

    let subjects = match request.available_subjects.as_deref().map(subjects_from_dtos).transpose() {
        Ok(s) => s,
        Err(e) => return schedule_error_response(&e),
    };
    let constraints = match request.student_constraints.to_domain() {
        Ok(c) => c,
        Err(e) => return schedule_error_response(&e),
    };
    let codes = request.required_subject_codes;

    let permit = match state.limiter.clone().acquire_owned().await {
        Ok(p) => p,
        Err(_) => return internal_error_response("failed to acquire semaphore"),
    };

    let service = state.service.clone();
    let start = std::time::Instant::now();
    let blocking_handle = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        let available = subjects.as_deref().unwrap_or(service.catalog());
        service
            .generate(Some(available), &constraints, &codes)
            .map(|schedule| ScheduleResponse::from_schedule(&schedule, available, Utc::now()))
    });

    let result = match blocking_handle.await {
        Ok(res) => res,
        Err(e) => return internal_error_response(format!("task join error: {}", e)),
    };
    debug!("generate: {} ms", start.elapsed().as_millis());

    match result {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            warn!("generate rechazado: {}", e);
            schedule_error_response(&e)
        }
    }
}
