//! Configuración centralizada.
//!
//! Tres grupos:
//! - `ScoringConfig`: umbrales y pesos del evaluador (se pasan explícitamente
//!   al `ConstraintEvaluator`; nada se lee de estado global durante el puntaje).
//! - `SearchConfig`: estrategia de orden y tope blando de candidatos.
//! - `ServerConfig`: dirección de escucha, catálogo y concurrencia del servicio.
//!
//! `AppConfig::from_env()` lee `.env` (si existe) y variables `SCHEDWISE_*`.
//! Valores inválidos se reportan con `warn!` y se conserva el default.

use std::path::PathBuf;

use chrono::NaiveTime;
use log::warn;

use crate::models::{parse_hhmm, DayOfWeek};

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Un bloque que empieza antes de esta hora cuenta como clase temprana.
    pub early_cutoff: NaiveTime,
    /// Un bloque que empieza después de esta hora cuenta como clase tardía.
    pub late_cutoff: NaiveTime,
    /// Penalización por cada minuto que falta para llegar a `min_break_minutes`.
    pub break_penalty_per_minute: f64,
    /// Penalización por cada hora sobre `max_daily_hours` en un día.
    pub overload_penalty_per_hour: f64,
    /// Penalización por bloque temprano/tardío cuando el estudiante lo evita.
    pub early_late_penalty: f64,
    /// Peso de la varianza de horas diarias.
    pub balance_weight: f64,
    /// Puntaje base por crédito.
    pub credit_weight: f64,
    /// Bono por bloque en un día preferido.
    pub preferred_day_bonus: f64,
    /// Días sobre los que se mide el balance de carga.
    pub week_days: Vec<DayOfWeek>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            early_cutoff: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            late_cutoff: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
            break_penalty_per_minute: 0.2,
            overload_penalty_per_hour: 5.0,
            early_late_penalty: 5.0,
            balance_weight: 1.0,
            credit_weight: 10.0,
            preferred_day_bonus: 2.0,
            week_days: DayOfWeek::ALL[..6].to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingKind {
    /// Materias con menos secciones primero.
    #[default]
    FewestSections,
    /// Menos secciones primero; a igualdad, más choques primero.
    MostConstrained,
}

impl OrderingKind {
    pub fn parse(s: &str) -> Option<OrderingKind> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "fewest_sections" | "fewest" => Some(OrderingKind::FewestSections),
            "most_constrained" | "conflict_degree" => Some(OrderingKind::MostConstrained),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchConfig {
    /// Tope blando de candidatos examinados. Al alcanzarlo se devuelve el
    /// mejor encontrado hasta ese momento, no necesariamente el óptimo.
    pub max_candidates: Option<usize>,
    pub ordering: OrderingKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    /// Catálogo JSON; si es `None` se usa el catálogo de ejemplo embebido.
    pub catalog_path: Option<PathBuf>,
    pub max_concurrent_generations: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "127.0.0.1:8000".to_string(),
            catalog_path: None,
            max_concurrent_generations: std::cmp::max(1, num_cpus::get()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    /// Carga `.env` si existe y aplica las variables `SCHEDWISE_*` del proceso.
    pub fn from_env() -> AppConfig {
        let _ = dotenv::dotenv();
        AppConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Versión parametrizable para pruebas: recibe la función que resuelve
    /// cada variable, así los tests no tocan el entorno del proceso.
    pub fn from_lookup<F>(lookup: F) -> AppConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = AppConfig::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(bind) = get("SCHEDWISE_BIND") {
            cfg.server.bind = bind;
        }
        if let Some(path) = get("SCHEDWISE_CATALOG") {
            cfg.server.catalog_path = Some(PathBuf::from(path));
        }
        if let Some(v) = get("SCHEDWISE_MAX_CONCURRENT") {
            match v.parse::<usize>() {
                Ok(n) if n > 0 => cfg.server.max_concurrent_generations = n,
                _ => warn!("SCHEDWISE_MAX_CONCURRENT='{}' inválido, se usa {}", v, cfg.server.max_concurrent_generations),
            }
        }

        if let Some(v) = get("SCHEDWISE_MAX_CANDIDATES") {
            match v.parse::<usize>() {
                Ok(0) => cfg.search.max_candidates = None,
                Ok(n) => cfg.search.max_candidates = Some(n),
                Err(_) => warn!("SCHEDWISE_MAX_CANDIDATES='{}' inválido, sin tope", v),
            }
        }
        if let Some(v) = get("SCHEDWISE_ORDERING") {
            match OrderingKind::parse(&v) {
                Some(kind) => cfg.search.ordering = kind,
                None => warn!("SCHEDWISE_ORDERING='{}' desconocido, se usa {:?}", v, cfg.search.ordering),
            }
        }

        let scoring = &mut cfg.scoring;
        read_time(&get, "SCHEDWISE_EARLY_CUTOFF", &mut scoring.early_cutoff);
        read_time(&get, "SCHEDWISE_LATE_CUTOFF", &mut scoring.late_cutoff);
        read_f64(&get, "SCHEDWISE_BREAK_PENALTY", &mut scoring.break_penalty_per_minute);
        read_f64(&get, "SCHEDWISE_OVERLOAD_PENALTY", &mut scoring.overload_penalty_per_hour);
        read_f64(&get, "SCHEDWISE_EARLY_LATE_PENALTY", &mut scoring.early_late_penalty);
        read_f64(&get, "SCHEDWISE_BALANCE_WEIGHT", &mut scoring.balance_weight);
        read_f64(&get, "SCHEDWISE_CREDIT_WEIGHT", &mut scoring.credit_weight);
        read_f64(&get, "SCHEDWISE_PREFERRED_DAY_BONUS", &mut scoring.preferred_day_bonus);
        if let Some(v) = get("SCHEDWISE_WEEK_DAYS") {
            let days: Option<Vec<DayOfWeek>> = v.split(',').map(DayOfWeek::parse).collect();
            match days {
                Some(d) if !d.is_empty() => scoring.week_days = d,
                _ => warn!("SCHEDWISE_WEEK_DAYS='{}' inválido, se usa lunes a sábado", v),
            }
        }

        cfg
    }
}

fn read_time(get: &impl Fn(&str) -> Option<String>, key: &str, value: &mut NaiveTime) {
    if let Some(v) = get(key) {
        match parse_hhmm(&v) {
            Ok(t) => *value = t,
            Err(e) => warn!("{}: {}", key, e),
        }
    }
}

/// Pesos no negativos; un valor negativo invertiría el sentido de la penalización.
fn read_f64(get: &impl Fn(&str) -> Option<String>, key: &str, value: &mut f64) {
    if let Some(v) = get(key) {
        match v.parse::<f64>() {
            Ok(x) if x.is_finite() && x >= 0.0 => *value = x,
            _ => warn!("{}='{}' inválido, se usa {}", key, v, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let cfg = AppConfig::from_lookup(|_| None);
        assert_eq!(cfg.server.bind, "127.0.0.1:8000");
        assert_eq!(cfg.search.max_candidates, None);
        assert_eq!(cfg.search.ordering, OrderingKind::FewestSections);
        assert_eq!(cfg.scoring, ScoringConfig::default());
        assert_eq!(cfg.scoring.week_days.len(), 6);
        assert!(cfg.server.max_concurrent_generations >= 1);
    }

    #[test]
    fn test_overrides_are_applied() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("SCHEDWISE_BIND", "0.0.0.0:9000"),
            ("SCHEDWISE_CATALOG", "data/catalog.json"),
            ("SCHEDWISE_MAX_CANDIDATES", "500"),
            ("SCHEDWISE_ORDERING", "most-constrained"),
            ("SCHEDWISE_EARLY_CUTOFF", "08:00"),
            ("SCHEDWISE_BALANCE_WEIGHT", "2.5"),
            ("SCHEDWISE_WEEK_DAYS", "LU,MA,MI,JU,VI"),
        ]));
        assert_eq!(cfg.server.bind, "0.0.0.0:9000");
        assert_eq!(cfg.server.catalog_path, Some(PathBuf::from("data/catalog.json")));
        assert_eq!(cfg.search.max_candidates, Some(500));
        assert_eq!(cfg.search.ordering, OrderingKind::MostConstrained);
        assert_eq!(cfg.scoring.early_cutoff, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(cfg.scoring.balance_weight, 2.5);
        assert_eq!(cfg.scoring.week_days.len(), 5);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("SCHEDWISE_MAX_CANDIDATES", "many"),
            ("SCHEDWISE_ORDERING", "random"),
            ("SCHEDWISE_LATE_CUTOFF", "6pm"),
            ("SCHEDWISE_BREAK_PENALTY", "-1"),
            ("SCHEDWISE_MAX_CONCURRENT", "0"),
            ("SCHEDWISE_WEEK_DAYS", "LU,XX"),
        ]));
        let defaults = AppConfig::default();
        assert_eq!(cfg.search, defaults.search);
        assert_eq!(cfg.scoring, defaults.scoring);
        assert_eq!(cfg.server.max_concurrent_generations, defaults.server.max_concurrent_generations);
    }
}
