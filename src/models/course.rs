// Materias y secciones ofertadas.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::TimeSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SubjectType {
    #[default]
    #[serde(rename = "Cátedra", alias = "Lecture", alias = "lecture")]
    Lecture,
    #[serde(rename = "Laboratorio", alias = "Lab", alias = "lab")]
    Lab,
    #[serde(rename = "Seminario", alias = "Seminar", alias = "seminar")]
    Seminar,
    #[serde(rename = "Taller", alias = "Workshop", alias = "workshop")]
    Workshop,
}

/// Una sección: un conjunto de bloques semanales de una materia.
/// Inmutable durante una ejecución de generación.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub subject_code: String,
    pub section_id: String,
    pub slots: Vec<TimeSlot>,
    pub instructor: Option<String>,
    pub room: Option<String>,
}

impl Section {
    pub fn new(subject_code: impl Into<String>, section_id: impl Into<String>, slots: Vec<TimeSlot>) -> Section {
        Section {
            subject_code: subject_code.into(),
            section_id: section_id.into(),
            slots,
            instructor: None,
            room: None,
        }
    }

    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Section {
        self.instructor = Some(instructor.into());
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Section {
        self.room = Some(room.into());
        self
    }

    /// Etiqueta legible "CODIGO-SECCION", usada en logs y notas.
    pub fn label(&self) -> String {
        format!("{}-{}", self.subject_code, self.section_id)
    }

    pub fn total_minutes(&self) -> u32 {
        self.slots.iter().map(|s| s.duration_minutes()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subject {
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub subject_type: SubjectType,
    pub prerequisites: BTreeSet<String>,
    pub sections: Vec<Section>,
}

impl Subject {
    /// Valida código no vacío, créditos > 0 y que todas las secciones
    /// pertenezcan a esta materia. Una materia sin secciones es válida: el
    /// generador la reportará como inviable.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        credits: u32,
        subject_type: SubjectType,
        sections: Vec<Section>,
    ) -> Result<Subject, ScheduleError> {
        let code = code.into();
        let invalid = |reason: String| ScheduleError::InvalidSubject { code: code.clone(), reason };
        if code.trim().is_empty() {
            return Err(invalid("code must not be empty".to_string()));
        }
        if credits == 0 {
            return Err(invalid("credits must be greater than 0".to_string()));
        }
        if let Some(s) = sections.iter().find(|s| s.subject_code != code) {
            return Err(invalid(format!("section {} belongs to another subject", s.label())));
        }
        let mut seen = BTreeSet::new();
        if let Some(s) = sections.iter().find(|s| !seen.insert(s.section_id.as_str())) {
            return Err(invalid(format!("duplicate section id '{}'", s.section_id)));
        }
        Ok(Subject {
            code,
            name: name.into(),
            credits,
            subject_type,
            prerequisites: BTreeSet::new(),
            sections,
        })
    }

    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Subject
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }
}
