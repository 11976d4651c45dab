// Fachada que usa la capa HTTP: catálogo configurado + optimizador.
use std::sync::Arc;

use crate::catalog::catalog_from_config;
use crate::config::AppConfig;
use crate::error::{CatalogError, ScheduleError};
use crate::models::{ScoredSchedule, StudentConstraints, Subject};
use crate::algorithm::ScheduleOptimizer;

pub struct ScheduleGeneratorService {
    catalog: Arc<Vec<Subject>>,
    optimizer: ScheduleOptimizer,
}

impl ScheduleGeneratorService {
    pub fn new(catalog: Vec<Subject>, optimizer: ScheduleOptimizer) -> ScheduleGeneratorService {
        ScheduleGeneratorService { catalog: Arc::new(catalog), optimizer }
    }

    /// Carga el catálogo configurado y arma el optimizador con la configuración de búsqueda y puntaje.
    pub fn from_config(config: &AppConfig) -> Result<ScheduleGeneratorService, CatalogError> {
        let catalog = catalog_from_config(&config.server)?;
        let optimizer = ScheduleOptimizer::new(config.scoring.clone(), config.search.clone());
        Ok(ScheduleGeneratorService::new(catalog, optimizer))
    }

    pub fn catalog(&self) -> &[Subject] {
        &self.catalog
    }

    /// Genera con `subjects` si se entregan, o con el catálogo configurado.
    pub fn generate<S: AsRef<str>>(
        &self,
        subjects: Option<&[Subject]>,
        constraints: &StudentConstraints,
        required_codes: &[S],
    ) -> Result<ScoredSchedule, ScheduleError> {
        let available = subjects.unwrap_or(self.catalog.as_slice());
        self.optimizer.generate(available, constraints, required_codes)
    }
}
