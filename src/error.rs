// Taxonomía de errores del generador de horarios.
use chrono::NaiveTime;
use thiserror::Error;

use crate::models::DayOfWeek;

/// Errores que puede devolver una ejecución de generación.
///
/// El puntaje nunca falla: los datos malformados se rechazan al construir
/// las entidades (`TimeSlot::new`, `Subject::new`), no durante la búsqueda.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// Algún código requerido no existe en el catálogo entregado.
    #[error("unknown subject code(s): {}", .codes.join(", "))]
    UnknownSubject {
        codes: Vec<String>,
        /// Códigos del catálogo parecidos a los pedidos (mejor primero).
        suggestions: Vec<String>,
    },

    /// Toda combinación de las materias requeridas tiene un choque inevitable.
    #[error("no conflict-free schedule exists for: {}", .subjects.join(", "))]
    Infeasible { subjects: Vec<String> },

    #[error("at least one subject must be selected")]
    EmptySelection,

    #[error("invalid time slot on {day}: start {start} must be before end {end}")]
    InvalidTimeSlot {
        day: DayOfWeek,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("invalid student constraints: {0}")]
    InvalidConstraint(String),

    #[error("invalid subject '{code}': {reason}")]
    InvalidSubject { code: String, reason: String },
}

impl ScheduleError {
    /// Nombre corto y estable del error, usado como `error` en las respuestas JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            ScheduleError::UnknownSubject { .. } => "unknown_subject",
            ScheduleError::Infeasible { .. } => "infeasible_schedule",
            ScheduleError::EmptySelection => "empty_selection",
            ScheduleError::InvalidTimeSlot { .. } => "invalid_time_slot",
            ScheduleError::InvalidTime(_) => "invalid_time",
            ScheduleError::InvalidConstraint(_) => "invalid_constraint",
            ScheduleError::InvalidSubject { .. } => "invalid_subject",
        }
    }
}

/// Errores al cargar un catálogo desde disco.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid catalog entry: {0}")]
    Invalid(#[from] ScheduleError),

    #[error("duplicate subject code '{0}' in catalog")]
    DuplicateCode(String),
}
