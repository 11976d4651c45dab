// Núcleo del generador: choques, orden de búsqueda, generación perezosa,
// puntaje y orquestación.
pub mod conflict;
pub mod optimizer;
pub mod ordering;
pub mod scoring;
pub mod section_selector;

pub use conflict::{conflicting_pairs, conflicts_with_any, has_conflict, is_feasible, touches_blocked};
pub use optimizer::{resolve_subjects, ScheduleOptimizer};
pub use ordering::{ordering_for, FewestSectionsFirst, MostConstrainedFirst, SubjectOrdering};
pub use scoring::{load_variance, ConstraintEvaluator, Evaluation};
pub use section_selector::{Candidate, CombinationGenerator};
