//! Fuentes de catálogo de materias.
//!
//! - Archivo JSON en disco (`SCHEDWISE_CATALOG`): arreglo de `SubjectDto`.
//! - Catálogo de ejemplo embebido (CC101, CC102, MAT101, FIS101, LAB101),
//!   usado cuando no se configura ningún archivo.
//!
//! En ambos casos los días aceptan español ("Lunes"), inglés ("Monday") o
//! el código de dos letras ("LU"), y las horas van en "HH:MM".

use std::collections::HashSet;
use std::path::Path;

use log::info;

use crate::api_json::SubjectDto;
use crate::config::ServerConfig;
use crate::error::CatalogError;
use crate::models::Subject;

/// Catálogo de ejemplo embebido en el binario.
pub const SAMPLE_CATALOG_JSON: &str = include_str!("sample_catalog.json");

/// Parsea un catálogo JSON y lo convierte a entidades de dominio.
/// Rechaza códigos repetidos.
pub fn parse_catalog(json_str: &str) -> Result<Vec<Subject>, CatalogError> {
    let dtos: Vec<SubjectDto> = serde_json::from_str(json_str)?;
    let mut seen: HashSet<&str> = HashSet::new();
    for dto in dtos.iter() {
        if !seen.insert(dto.code.as_str()) {
            return Err(CatalogError::DuplicateCode(dto.code.clone()));
        }
    }
    let mut subjects = Vec::with_capacity(dtos.len());
    for dto in dtos.iter() {
        subjects.push(dto.to_domain()?);
    }
    Ok(subjects)
}

pub fn load_catalog(path: &Path) -> Result<Vec<Subject>, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let subjects = parse_catalog(&contents)?;
    info!("📚 catálogo cargado desde {:?}: {} materias", path, subjects.len());
    Ok(subjects)
}

pub fn sample_catalog() -> Result<Vec<Subject>, CatalogError> {
    parse_catalog(SAMPLE_CATALOG_JSON)
}

/// Catálogo configurado: el archivo de `catalog_path` o, si no hay, el de ejemplo.
pub fn catalog_from_config(server: &ServerConfig) -> Result<Vec<Subject>, CatalogError> {
    match server.catalog_path.as_deref() {
        Some(path) => load_catalog(path),
        None => {
            info!("📚 sin SCHEDWISE_CATALOG; usando catálogo de ejemplo");
            sample_catalog()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayOfWeek, SubjectType};

    #[test]
    fn test_sample_catalog_is_valid() {
        let subjects = sample_catalog().expect("el catálogo de ejemplo debe parsear");
        let codes: Vec<&str> = subjects.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["CC101", "CC102", "MAT101", "FIS101", "LAB101"]);

        let lab = &subjects[4];
        assert_eq!(lab.subject_type, SubjectType::Lab);
        assert_eq!(lab.credits, 4);
        assert!(lab.prerequisites.contains("CC101"));
        assert_eq!(lab.sections[0].instructor.as_deref(), Some("Ing. López Morales"));
        assert_eq!(lab.sections[1].slots[0].day(), DayOfWeek::Friday);
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let json = r#"[
            {"code": "X1", "name": "Uno", "credits": 4, "sections": []},
            {"code": "X1", "name": "Otro", "credits": 4, "sections": []}
        ]"#;
        match parse_catalog(json) {
            Err(CatalogError::DuplicateCode(code)) => assert_eq!(code, "X1"),
            other => panic!("se esperaba DuplicateCode, se obtuvo {:?}", other),
        }
    }

    #[test]
    fn test_invalid_slot_rejected() {
        let json = r#"[
            {"code": "X1", "name": "Uno", "credits": 4, "sections": [
                {"section_id": "A", "slots": [{"day": "LU", "start_time": "10:00", "end_time": "09:00"}]}
            ]}
        ]"#;
        assert!(matches!(parse_catalog(json), Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_catalog(Path::new("/no/existe/catalogo.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
