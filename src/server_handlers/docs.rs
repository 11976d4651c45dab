use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::api_json::{ConstraintsDto, GenerateRequest, TimeSlotDto};
use crate::models::DayOfWeek;

pub async fn help_handler() -> impl Responder {
    let example = GenerateRequest {
        available_subjects: None,
        student_constraints: ConstraintsDto {
            avoid_early_classes: true,
            blocked_time_slots: vec![TimeSlotDto {
                day: DayOfWeek::Friday,
                start_time: "16:00".to_string(),
                end_time: "20:00".to_string(),
            }],
            preferred_days: vec![DayOfWeek::Monday, DayOfWeek::Wednesday],
            ..ConstraintsDto::default()
        },
        required_subject_codes: vec!["CC101".to_string(), "MAT101".to_string(), "FIS101".to_string()],
    };

    let help = json!({
        "description": "API para generar un horario semanal sin choques. POST /generate recibe las materias requeridas y las restricciones del estudiante; si no se envía 'available_subjects' se usa el catálogo del servidor (GET /subjects).",
        "post_example": example,
        "days": ["Lunes", "Monday", "LU"],
        "time_format": "HH:MM",
        "errors": {
            "400": ["invalid_request", "unknown_subject", "empty_selection", "invalid_time_slot", "invalid_time", "invalid_constraint", "invalid_subject"],
            "422": ["infeasible_schedule"],
            "500": ["internal_error"]
        }
    });

    HttpResponse::Ok().json(help)
}
