// Restricciones del estudiante y horario resultante.
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::ScheduleError;
use crate::models::{DayOfWeek, Section, TimeSlot};

/// Preferencias y restricciones de un estudiante para una ejecución.
///
/// - `min_break_minutes`, `max_daily_hours`, `avoid_early_classes`,
///   `avoid_late_classes` y `preferred_days` son blandas: influyen en el puntaje.
/// - `blocked_slots` es dura: una sección que toca un bloque bloqueado se descarta.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentConstraints {
    pub min_break_minutes: u32,
    pub max_daily_hours: f64,
    pub avoid_early_classes: bool,
    pub avoid_late_classes: bool,
    pub blocked_slots: Vec<TimeSlot>,
    pub preferred_days: BTreeSet<DayOfWeek>,
}

impl Default for StudentConstraints {
    fn default() -> Self {
        StudentConstraints {
            min_break_minutes: 30,
            max_daily_hours: 8.0,
            avoid_early_classes: false,
            avoid_late_classes: false,
            blocked_slots: Vec::new(),
            preferred_days: BTreeSet::new(),
        }
    }
}

impl StudentConstraints {
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if !(self.max_daily_hours.is_finite() && self.max_daily_hours > 0.0) {
            return Err(ScheduleError::InvalidConstraint(format!(
                "max_daily_hours must be a positive number, got {}",
                self.max_daily_hours
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    ShortBreak,
    DailyOverload,
    EarlyClass,
    LateClass,
}

/// Una preferencia blanda no satisfecha y lo que costó en el puntaje.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationNote {
    pub kind: ViolationKind,
    pub day: Option<DayOfWeek>,
    pub section: Option<String>,
    pub penalty: f64,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SearchStats {
    pub candidates_examined: usize,
    /// true si se alcanzó `max_candidates`: el resultado es el mejor visto, no necesariamente el óptimo.
    pub budget_exhausted: bool,
}

/// Horario ganador de una ejecución.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSchedule {
    /// Una sección por materia requerida, en el orden del catálogo.
    pub sections: Vec<Section>,
    pub score: f64,
    pub notes: Vec<ViolationNote>,
    pub total_credits: u32,
    pub daily_hours: BTreeMap<DayOfWeek, f64>,
    pub stats: SearchStats,
}

impl ScoredSchedule {
    pub fn section_for(&self, subject_code: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.subject_code == subject_code)
    }
}
