use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ScheduleError;
use crate::models::{
    DayOfWeek, ScoredSchedule, SearchStats, Section, StudentConstraints, Subject, SubjectType, TimeSlot, ViolationNote,
};

/// Cuerpo de `POST /api/v1/schedules/generate`.
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "available_subjects": [
///     {
///       "code": "CC101",
///       "name": "Programación I",
///       "credits": 8,
///       "subject_type": "Cátedra",
///       "professor": "Dr. García López",
///       "prerequisites": [],
///       "sections": [
///         {
///           "section_id": "A",
///           "slots": [
///             {"day": "Lunes", "start_time": "08:00", "end_time": "10:00"},
///             {"day": "Miércoles", "start_time": "08:00", "end_time": "10:00"}
///           ]
///         }
///       ]
///     }
///   ],
///   "student_constraints": {
///     "min_break_minutes": 30,
///     "max_daily_hours": 8.0,
///     "avoid_early_classes": true,
///     "avoid_late_classes": false,
///     "blocked_time_slots": [{"day": "VI", "start_time": "14:00", "end_time": "20:00"}],
///     "preferred_days": ["Lunes", "Martes"]
///   },
///   "required_subject_codes": ["CC101"]
/// }
/// ```
///
/// # Campos:
/// - `available_subjects`: catálogo a usar (opcional; si falta se usa el catálogo del servidor)
/// - `student_constraints`: opcional, todos sus campos tienen default
/// - `required_subject_codes`: códigos a inscribir (al menos uno)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_subjects: Option<Vec<SubjectDto>>,
    #[serde(default)]
    pub student_constraints: ConstraintsDto,
    pub required_subject_codes: Vec<String>,
}

pub fn parse_json_input(json_str: &str) -> Result<GenerateRequest, serde_json::Error> {
    serde_json::from_str::<GenerateRequest>(json_str)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotDto {
    pub day: DayOfWeek,
    pub start_time: String,
    pub end_time: String,
}

impl TimeSlotDto {
    pub fn to_domain(&self) -> Result<TimeSlot, ScheduleError> {
        TimeSlot::parse(self.day, &self.start_time, &self.end_time)
    }

    pub fn from_domain(slot: &TimeSlot) -> TimeSlotDto {
        TimeSlotDto {
            day: slot.day(),
            start_time: slot.start().format("%H:%M").to_string(),
            end_time: slot.end().format("%H:%M").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDto {
    pub section_id: String,
    pub slots: Vec<TimeSlotDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectDto {
    pub code: String,
    pub name: String,
    pub credits: u32,
    #[serde(default)]
    pub subject_type: SubjectType,
    /// Profesor por defecto para las secciones que no declaran uno.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor: Option<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub sections: Vec<SectionDto>,
}

impl SubjectDto {
    pub fn to_domain(&self) -> Result<Subject, ScheduleError> {
        let mut sections = Vec::with_capacity(self.sections.len());
        for dto in self.sections.iter() {
            let slots = dto.slots.iter().map(TimeSlotDto::to_domain).collect::<Result<Vec<_>, _>>()?;
            let mut section = Section::new(self.code.clone(), dto.section_id.clone(), slots);
            section.instructor = dto.instructor.clone().or_else(|| self.professor.clone());
            section.room = dto.room.clone();
            sections.push(section);
        }
        let subject = Subject::new(self.code.clone(), self.name.clone(), self.credits, self.subject_type, sections)?;
        Ok(subject.with_prerequisites(self.prerequisites.iter().cloned()))
    }

    pub fn from_domain(subject: &Subject) -> SubjectDto {
        SubjectDto {
            code: subject.code.clone(),
            name: subject.name.clone(),
            credits: subject.credits,
            subject_type: subject.subject_type,
            professor: None,
            prerequisites: subject.prerequisites.iter().cloned().collect(),
            sections: subject
                .sections
                .iter()
                .map(|s| SectionDto {
                    section_id: s.section_id.clone(),
                    slots: s.slots.iter().map(TimeSlotDto::from_domain).collect(),
                    instructor: s.instructor.clone(),
                    room: s.room.clone(),
                })
                .collect(),
        }
    }
}

/// Convierte una lista de DTOs; falla en la primera entrada inválida.
pub fn subjects_from_dtos(dtos: &[SubjectDto]) -> Result<Vec<Subject>, ScheduleError> {
    dtos.iter().map(SubjectDto::to_domain).collect()
}

fn default_min_break() -> u32 {
    30
}

fn default_max_daily_hours() -> f64 {
    8.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintsDto {
    #[serde(default = "default_min_break")]
    pub min_break_minutes: u32,
    #[serde(default = "default_max_daily_hours")]
    pub max_daily_hours: f64,
    #[serde(default)]
    pub avoid_early_classes: bool,
    #[serde(default)]
    pub avoid_late_classes: bool,
    #[serde(default)]
    pub blocked_time_slots: Vec<TimeSlotDto>,
    #[serde(default)]
    pub preferred_days: Vec<DayOfWeek>,
}

impl Default for ConstraintsDto {
    fn default() -> Self {
        ConstraintsDto {
            min_break_minutes: default_min_break(),
            max_daily_hours: default_max_daily_hours(),
            avoid_early_classes: false,
            avoid_late_classes: false,
            blocked_time_slots: Vec::new(),
            preferred_days: Vec::new(),
        }
    }
}

impl ConstraintsDto {
    pub fn to_domain(&self) -> Result<StudentConstraints, ScheduleError> {
        let constraints = StudentConstraints {
            min_break_minutes: self.min_break_minutes,
            max_daily_hours: self.max_daily_hours,
            avoid_early_classes: self.avoid_early_classes,
            avoid_late_classes: self.avoid_late_classes,
            blocked_slots: self.blocked_time_slots.iter().map(TimeSlotDto::to_domain).collect::<Result<_, _>>()?,
            preferred_days: self.preferred_days.iter().copied().collect(),
        };
        constraints.validate()?;
        Ok(constraints)
    }
}

/// Sección elegida, con los datos de la materia para mostrarla sin otra consulta.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledSectionDto {
    pub subject_code: String,
    pub subject_name: String,
    pub credits: u32,
    pub subject_type: SubjectType,
    pub section_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    pub slots: Vec<TimeSlotDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleResponse {
    pub success: bool,
    pub sections: Vec<ScheduledSectionDto>,
    pub score: f64,
    pub total_credits: u32,
    pub daily_hours: BTreeMap<DayOfWeek, f64>,
    pub notes: Vec<ViolationNote>,
    pub stats: SearchStats,
    pub generated_at: DateTime<Utc>,
}

impl ScheduleResponse {
    /// `subjects` es el catálogo usado en la ejecución (de ahí salen nombres y créditos).
    pub fn from_schedule(schedule: &ScoredSchedule, subjects: &[Subject], generated_at: DateTime<Utc>) -> ScheduleResponse {
        let sections = schedule
            .sections
            .iter()
            .map(|section| {
                let subject = subjects.iter().find(|s| s.code == section.subject_code);
                ScheduledSectionDto {
                    subject_code: section.subject_code.clone(),
                    subject_name: subject.map(|s| s.name.clone()).unwrap_or_default(),
                    credits: subject.map_or(0, |s| s.credits),
                    subject_type: subject.map(|s| s.subject_type).unwrap_or_default(),
                    section_id: section.section_id.clone(),
                    instructor: section.instructor.clone(),
                    room: section.room.clone(),
                    slots: section.slots.iter().map(TimeSlotDto::from_domain).collect(),
                }
            })
            .collect();

        ScheduleResponse {
            success: true,
            sections,
            score: schedule.score,
            total_credits: schedule.total_credits,
            daily_hours: schedule.daily_hours.clone(),
            notes: schedule.notes.clone(),
            stats: schedule.stats,
            generated_at,
        }
    }
}

/// Cuerpo de error: `{"error": <tipo>, "message": <texto>, "details": <json|null>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default)]
    pub details: Value,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> ErrorResponse {
        ErrorResponse { error: error.into(), message: message.into(), details: Value::Null }
    }
}

impl From<&ScheduleError> for ErrorResponse {
    fn from(err: &ScheduleError) -> Self {
        let details = match err {
            ScheduleError::UnknownSubject { codes, suggestions } => json!({"codes": codes, "suggestions": suggestions}),
            ScheduleError::Infeasible { subjects } => json!({"subjects": subjects}),
            _ => Value::Null,
        };
        ErrorResponse { error: err.kind().to_string(), message: err.to_string(), details }
    }
}
