//! Evaluación de preferencias blandas.
//!
//! El puntaje es la suma de términos independientes (mayor es mejor):
//!
//! | término | efecto |
//! |---|---|
//! | descanso | `-(min_break - gap) * break_penalty_per_minute` por cada par de clases consecutivas del mismo día con `gap < min_break` |
//! | carga diaria | `-(horas - max_daily_hours) * overload_penalty_per_hour` por día excedido |
//! | temprano / tarde | `-early_late_penalty` por bloque que empieza antes de `early_cutoff` / empieza después de `late_cutoff` (sólo si el estudiante lo pide) |
//! | balance | `-balance_weight * varianza` de horas por día sobre `week_days` |
//! | días preferidos | `+preferred_day_bonus` por bloque en un día preferido |
//!
//! Determinista y sin efectos secundarios; nunca falla.

use std::collections::BTreeMap;

use crate::config::ScoringConfig;
use crate::models::{DayOfWeek, Section, StudentConstraints, TimeSlot, ViolationKind, ViolationNote};

/// Resultado detallado de evaluar un candidato.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub score: f64,
    pub notes: Vec<ViolationNote>,
    pub daily_hours: BTreeMap<DayOfWeek, f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ConstraintEvaluator {
    config: ScoringConfig,
}

impl ConstraintEvaluator {
    pub fn new(config: ScoringConfig) -> ConstraintEvaluator {
        ConstraintEvaluator { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Puntaje base por créditos; es igual para todos los candidatos de una ejecución.
    pub fn credit_base(&self, total_credits: u32) -> f64 {
        total_credits as f64 * self.config.credit_weight
    }

    /// Puntaje de preferencias blandas de un candidato (sin notas).
    pub fn score(&self, sections: &[&Section], constraints: &StudentConstraints) -> f64 {
        self.run(sections, constraints, None).0
    }

    /// Igual que `score`, más las notas de cada preferencia no cumplida y las horas por día.
    pub fn evaluate(&self, sections: &[&Section], constraints: &StudentConstraints) -> Evaluation {
        let mut notes = Vec::new();
        let (score, daily_hours) = self.run(sections, constraints, Some(&mut notes));
        Evaluation { score, notes, daily_hours }
    }

    fn run(
        &self,
        sections: &[&Section],
        constraints: &StudentConstraints,
        mut notes: Option<&mut Vec<ViolationNote>>,
    ) -> (f64, BTreeMap<DayOfWeek, f64>) {
        let cfg = &self.config;
        let mut score = 0.0;

        // Agrupar bloques por día: (bloque, índice de sección)
        let mut by_day: BTreeMap<DayOfWeek, Vec<(&TimeSlot, usize)>> = BTreeMap::new();
        for (idx, section) in sections.iter().enumerate() {
            for slot in section.slots.iter() {
                by_day.entry(slot.day()).or_default().push((slot, idx));
            }
        }

        let mut daily_hours: BTreeMap<DayOfWeek, f64> = BTreeMap::new();
        for (day, slots) in by_day.iter_mut() {
            slots.sort_by_key(|(s, idx)| (s.start_minute(), s.end_minute(), *idx));

            // Descansos entre clases consecutivas de secciones distintas
            for pair in slots.windows(2) {
                let (cur, cur_idx) = pair[0];
                let (next, next_idx) = pair[1];
                if cur_idx == next_idx {
                    continue;
                }
                let gap = next.start_minute() as i64 - cur.end_minute() as i64;
                let shortfall = constraints.min_break_minutes as i64 - gap;
                if shortfall > 0 {
                    let penalty = shortfall as f64 * cfg.break_penalty_per_minute;
                    score -= penalty;
                    push_note(&mut notes, || ViolationNote {
                        kind: ViolationKind::ShortBreak,
                        day: Some(*day),
                        section: Some(sections[next_idx].label()),
                        penalty,
                        message: format!(
                            "{} min break before {} ({} min required)",
                            gap.max(0),
                            sections[next_idx].label(),
                            constraints.min_break_minutes
                        ),
                    });
                }
            }

            // Carga diaria
            let minutes: u32 = slots.iter().map(|(s, _)| s.duration_minutes()).sum();
            let hours = minutes as f64 / 60.0;
            daily_hours.insert(*day, hours);
            if hours > constraints.max_daily_hours {
                let penalty = (hours - constraints.max_daily_hours) * cfg.overload_penalty_per_hour;
                score -= penalty;
                push_note(&mut notes, || ViolationNote {
                    kind: ViolationKind::DailyOverload,
                    day: Some(*day),
                    section: None,
                    penalty,
                    message: format!("{:.1} h scheduled (max {:.1} h)", hours, constraints.max_daily_hours),
                });
            }

            // Clases tempranas / tardías y días preferidos
            for (slot, idx) in slots.iter() {
                if constraints.avoid_early_classes && slot.start() < cfg.early_cutoff {
                    score -= cfg.early_late_penalty;
                    push_note(&mut notes, || ViolationNote {
                        kind: ViolationKind::EarlyClass,
                        day: Some(*day),
                        section: Some(sections[*idx].label()),
                        penalty: cfg.early_late_penalty,
                        message: format!("{} starts before {}", slot, cfg.early_cutoff.format("%H:%M")),
                    });
                }
                if constraints.avoid_late_classes && slot.start() > cfg.late_cutoff {
                    score -= cfg.early_late_penalty;
                    push_note(&mut notes, || ViolationNote {
                        kind: ViolationKind::LateClass,
                        day: Some(*day),
                        section: Some(sections[*idx].label()),
                        penalty: cfg.early_late_penalty,
                        message: format!("{} starts after {}", slot, cfg.late_cutoff.format("%H:%M")),
                    });
                }
                if constraints.preferred_days.contains(day) {
                    score += cfg.preferred_day_bonus;
                }
            }
        }

        score -= cfg.balance_weight * load_variance(&daily_hours, &cfg.week_days);
        (score, daily_hours)
    }
}

fn push_note<F>(notes: &mut Option<&mut Vec<ViolationNote>>, build: F)
where
    F: FnOnce() -> ViolationNote,
{
    if let Some(n) = notes.as_deref_mut() {
        n.push(build());
    }
}

/// Varianza poblacional de horas por día sobre `week_days` (días sin clases cuentan 0).
pub fn load_variance(daily_hours: &BTreeMap<DayOfWeek, f64>, week_days: &[DayOfWeek]) -> f64 {
    if week_days.is_empty() {
        return 0.0;
    }
    let hours: Vec<f64> = week_days.iter().map(|d| daily_hours.get(d).copied().unwrap_or(0.0)).collect();
    let n = hours.len() as f64;
    let mean = hours.iter().sum::<f64>() / n;
    hours.iter().map(|h| (h - mean).powi(2)).sum::<f64>() / n
}
