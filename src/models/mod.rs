// Estructuras de datos principales del dominio.
mod course;
mod schedule;
mod time;

pub use course::{Section, Subject, SubjectType};
pub use schedule::{ScoredSchedule, SearchStats, StudentConstraints, ViolationKind, ViolationNote};
pub use time::{minutes_of, parse_hhmm, DayOfWeek, TimeSlot};
