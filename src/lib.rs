// Biblioteca raíz del crate `schedwise`: generador de horarios semanales.
//
// El núcleo (`algorithm`) recibe materias, restricciones y códigos requeridos
// y devuelve el mejor horario sin choques. `server` lo expone por HTTP.
pub mod algorithm;
pub mod api_json;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod server_handlers;
pub mod service;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;

pub use algorithm::{ConstraintEvaluator, ScheduleOptimizer};
pub use config::AppConfig;
pub use error::{CatalogError, ScheduleError};
pub use service::ScheduleGeneratorService;
