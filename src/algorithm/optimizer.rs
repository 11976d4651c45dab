// optimizer.rs - Orquestador de una ejecución de generación.
//
// Fases (sin estado entre llamadas):
//   1. Resolver: validar restricciones y códigos requeridos contra el catálogo.
//   2. Filtrar: quitar secciones que tocan bloques bloqueados por el estudiante.
//   3. Buscar: recorrer el CombinationGenerator (sólo combinaciones sin choques).
//   4. Puntuar: evaluar cada candidato y quedarse con el mejor en una pasada.
//   5. Devolver el mejor, o `Infeasible` si no apareció ningún candidato.
use std::collections::HashSet;

use log::{debug, info, warn};

use crate::algorithm::conflict::touches_blocked;
use crate::algorithm::ordering::{ordering_for, SubjectOrdering};
use crate::algorithm::scoring::ConstraintEvaluator;
use crate::algorithm::section_selector::{Candidate, CombinationGenerator};
use crate::config::{ScoringConfig, SearchConfig};
use crate::error::ScheduleError;
use crate::models::{ScoredSchedule, SearchStats, StudentConstraints, Subject};

/// Similitud mínima (Levenshtein normalizado) para sugerir un código del catálogo.
const SUGGESTION_THRESHOLD: f64 = 0.6;
const MAX_SUGGESTIONS: usize = 3;

pub struct ScheduleOptimizer {
    evaluator: ConstraintEvaluator,
    search: SearchConfig,
    ordering: Box<dyn SubjectOrdering>,
}

impl Default for ScheduleOptimizer {
    fn default() -> Self {
        ScheduleOptimizer::new(ScoringConfig::default(), SearchConfig::default())
    }
}

impl ScheduleOptimizer {
    /// Un tope `Some(0)` equivale a no tener tope.
    pub fn new(scoring: ScoringConfig, mut search: SearchConfig) -> ScheduleOptimizer {
        search.max_candidates = search.max_candidates.filter(|&max| max > 0);
        let ordering = ordering_for(search.ordering);
        ScheduleOptimizer { evaluator: ConstraintEvaluator::new(scoring), search, ordering }
    }

    /// Reemplaza la estrategia de orden (p. ej. una heurística propia).
    pub fn with_ordering(mut self, ordering: Box<dyn SubjectOrdering>) -> ScheduleOptimizer {
        self.ordering = ordering;
        self
    }

    pub fn evaluator(&self) -> &ConstraintEvaluator {
        &self.evaluator
    }

    /// Genera el mejor horario sin choques que cubra exactamente una sección
    /// por cada código requerido.
    ///
    /// Errores:
    /// - `EmptySelection` si `required_codes` está vacío.
    /// - `UnknownSubject` si algún código no está en `available`, antes de buscar.
    /// - `Infeasible` si no existe ninguna combinación sin choques.
    /// - `InvalidConstraint` si `max_daily_hours` no es positivo.
    /// - `InvalidSubject` si `available` repite un código de materia.
    pub fn generate<S: AsRef<str>>(
        &self,
        available: &[Subject],
        constraints: &StudentConstraints,
        required_codes: &[S],
    ) -> Result<ScoredSchedule, ScheduleError> {
        constraints.validate()?;
        let targeted = resolve_subjects(available, required_codes)?;

        // Bloques bloqueados: restricción dura aplicada antes de la búsqueda
        let filtered: Vec<Subject> = targeted
            .iter()
            .map(|subject| {
                let mut s = (*subject).clone();
                s.sections.retain(|sec| !touches_blocked(sec, &constraints.blocked_slots));
                if s.sections.len() < subject.sections.len() {
                    debug!(
                        "{}: {} de {} secciones descartadas por bloques bloqueados",
                        s.code,
                        subject.sections.len() - s.sections.len(),
                        subject.sections.len()
                    );
                }
                s
            })
            .collect();
        let refs: Vec<&Subject> = filtered.iter().collect();
        let codes: Vec<String> = refs.iter().map(|s| s.code.clone()).collect();

        let mut generator = CombinationGenerator::new(&refs, self.ordering.as_ref());
        debug!("🧠 orden de búsqueda ({}): {:?}", self.ordering.name(), generator.search_order());

        let mut best: Option<(Candidate, f64)> = None;
        let mut stats = SearchStats::default();
        // el tope se revisa con el siguiente candidato en mano
        while let Some(candidate) = generator.next() {
            if let Some(max) = self.search.max_candidates {
                if stats.candidates_examined >= max {
                    stats.budget_exhausted = true;
                    warn!("tope de {} candidatos alcanzado; se devuelve el mejor encontrado hasta ahora", max);
                    break;
                }
            }
            stats.candidates_examined += 1;
            let score = self.evaluator.score(&candidate, constraints);
            // estrictamente mayor: a igualdad gana el encontrado primero
            if best.as_ref().map_or(true, |(_, b)| score > *b) {
                debug!("   nuevo mejor #{}: {:.2}", stats.candidates_examined, score);
                best = Some((candidate, score));
            }
        }

        let Some((sections, _)) = best else {
            info!(
                "sin horario factible para {:?} ({} secciones podadas por choque)",
                codes,
                generator.pruned()
            );
            return Err(ScheduleError::Infeasible { subjects: codes });
        };

        let evaluation = self.evaluator.evaluate(&sections, constraints);
        let total_credits: u32 = refs.iter().map(|s| s.credits).sum();
        let score = self.evaluator.credit_base(total_credits) + evaluation.score;

        info!(
            "✅ horario generado: {} materias, puntaje {:.2}, {} candidatos examinados",
            refs.len(),
            score,
            stats.candidates_examined
        );

        Ok(ScoredSchedule {
            sections: sections.into_iter().cloned().collect(),
            score,
            notes: evaluation.notes,
            total_credits,
            daily_hours: evaluation.daily_hours,
            stats,
        })
    }
}

/// Resuelve los códigos requeridos en orden de catálogo. Códigos requeridos
/// repetidos cuentan una sola vez; un código repetido en el catálogo es
/// `InvalidSubject`.
pub fn resolve_subjects<'a, S: AsRef<str>>(
    available: &'a [Subject],
    required_codes: &[S],
) -> Result<Vec<&'a Subject>, ScheduleError> {
    let wanted: Vec<&str> = required_codes.iter().map(|c| c.as_ref().trim()).collect();
    if wanted.is_empty() {
        return Err(ScheduleError::EmptySelection);
    }

    let mut known: HashSet<&str> = HashSet::with_capacity(available.len());
    for subject in available.iter() {
        if !known.insert(subject.code.as_str()) {
            return Err(ScheduleError::InvalidSubject {
                code: subject.code.clone(),
                reason: "duplicate subject code in catalog".to_string(),
            });
        }
    }
    let mut unknown: Vec<String> = Vec::new();
    for code in wanted.iter() {
        if !known.contains(code) && !unknown.iter().any(|u| u == code) {
            unknown.push(code.to_string());
        }
    }
    if !unknown.is_empty() {
        let suggestions = suggest_codes(&unknown, available);
        return Err(ScheduleError::UnknownSubject { codes: unknown, suggestions });
    }

    let wanted: HashSet<&str> = wanted.into_iter().collect();
    Ok(available.iter().filter(|s| wanted.contains(s.code.as_str())).collect())
}

/// Códigos del catálogo parecidos a los desconocidos, mejor coincidencia primero.
fn suggest_codes(unknown: &[String], available: &[Subject]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for code in unknown {
        let needle = code.to_uppercase();
        let mut scored: Vec<(f64, &str)> = available
            .iter()
            .map(|s| (strsim::normalized_levenshtein(&needle, &s.code.to_uppercase()), s.code.as_str()))
            .filter(|(sim, _)| *sim >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal).then(a.1.cmp(b.1)));
        for (_, c) in scored.into_iter().take(MAX_SUGGESTIONS) {
            if !out.iter().any(|o| o == c) {
                out.push(c.to_string());
            }
        }
    }
    out
}
