use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::api_json::SubjectDto;
use crate::server::AppState;

/// GET /api/v1/schedules/subjects (alias: /subjects/cucei)
/// Devuelve el catálogo configurado en el mismo formato que acepta `available_subjects`.
pub async fn list_subjects_handler(state: web::Data<AppState>) -> impl Responder {
    let subjects: Vec<SubjectDto> = state.service.catalog().iter().map(SubjectDto::from_domain).collect();
    HttpResponse::Ok().json(subjects)
}

pub async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Servicio de horarios funcionando correctamente",
        "data": {"timestamp": Utc::now().to_rfc3339()}
    }))
}
