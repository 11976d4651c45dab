// Días de la semana y bloques de tiempo.
use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ScheduleError;

/// Día académico. Se serializa con el nombre en español ("Lunes") y acepta
/// también nombres en inglés y los códigos de dos letras de la oferta ("LU").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Lunes",
            DayOfWeek::Tuesday => "Martes",
            DayOfWeek::Wednesday => "Miércoles",
            DayOfWeek::Thursday => "Jueves",
            DayOfWeek::Friday => "Viernes",
            DayOfWeek::Saturday => "Sábado",
            DayOfWeek::Sunday => "Domingo",
        }
    }

    /// Parsea un día en cualquiera de los formatos aceptados (sin distinguir
    /// mayúsculas ni tildes). Devuelve `None` si no se reconoce.
    pub fn parse(s: &str) -> Option<DayOfWeek> {
        let token: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                'á' => 'a',
                'é' => 'e',
                _ => c,
            })
            .collect();
        let day = match token.as_str() {
            "lunes" | "monday" | "mon" | "lu" | "lun" => DayOfWeek::Monday,
            "martes" | "tuesday" | "tue" | "ma" | "mar" => DayOfWeek::Tuesday,
            "miercoles" | "wednesday" | "wed" | "mi" | "mie" => DayOfWeek::Wednesday,
            "jueves" | "thursday" | "thu" | "ju" | "jue" => DayOfWeek::Thursday,
            "viernes" | "friday" | "fri" | "vi" | "vie" => DayOfWeek::Friday,
            "sabado" | "saturday" | "sat" | "sa" | "sab" => DayOfWeek::Saturday,
            "domingo" | "sunday" | "sun" | "do" | "dom" => DayOfWeek::Sunday,
            _ => return None,
        };
        Some(day)
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for DayOfWeek {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DayOfWeek::parse(&value).ok_or_else(|| format!("unknown day of week '{}'", value))
    }
}

impl Serialize for DayOfWeek {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Convierte "HH:MM" a `NaiveTime`. Tolera "HH.MM" y segundos ("HH:MM:SS").
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, ScheduleError> {
    let tok = s.trim().replace('.', ":");
    NaiveTime::parse_from_str(&tok, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&tok, "%H:%M:%S"))
        .map_err(|_| ScheduleError::InvalidTime(s.to_string()))
}

/// Minutos desde medianoche.
pub fn minutes_of(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

pub(crate) fn serialize_hhmm<S: Serializer>(t: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&t.format("%H:%M").to_string())
}

/// Bloque semanal `[start, end)` en un día. Invariante: `start < end`,
/// garantizado por el constructor (los campos son privados).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeSlot {
    day: DayOfWeek,
    #[serde(serialize_with = "serialize_hhmm")]
    start: NaiveTime,
    #[serde(serialize_with = "serialize_hhmm")]
    end: NaiveTime,
}

impl TimeSlot {
    pub fn new(day: DayOfWeek, start: NaiveTime, end: NaiveTime) -> Result<TimeSlot, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::InvalidTimeSlot { day, start, end });
        }
        Ok(TimeSlot { day, start, end })
    }

    /// Igual que `new` pero con horas en texto "HH:MM".
    pub fn parse(day: DayOfWeek, start: &str, end: &str) -> Result<TimeSlot, ScheduleError> {
        TimeSlot::new(day, parse_hhmm(start)?, parse_hhmm(end)?)
    }

    pub fn day(&self) -> DayOfWeek {
        self.day
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn start_minute(&self) -> u32 {
        minutes_of(self.start)
    }

    pub fn end_minute(&self) -> u32 {
        minutes_of(self.end)
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minute() - self.start_minute()
    }

    /// Mismo día y `s1 < e2 && s2 < e1`. Bloques contiguos (10:00 y 10:00) no chocan.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_slot_rejects_inverted_range() {
        let err = TimeSlot::parse(DayOfWeek::Monday, "10:00", "08:00").unwrap_err();
        assert_eq!(err.kind(), "invalid_time_slot");
        assert!(TimeSlot::parse(DayOfWeek::Monday, "10:00", "10:00").is_err());
    }

    #[test]
    fn test_parse_hhmm_variants() {
        assert_eq!(minutes_of(parse_hhmm("08:30").unwrap()), 510);
        assert_eq!(minutes_of(parse_hhmm("14.00").unwrap()), 840);
        assert_eq!(minutes_of(parse_hhmm("23:59:00").unwrap()), 1439);
        assert!(parse_hhmm("8am").is_err());
    }

    #[test]
    fn test_day_parse_aliases() {
        assert_eq!(DayOfWeek::parse("Miércoles"), Some(DayOfWeek::Wednesday));
        assert_eq!(DayOfWeek::parse("miercoles"), Some(DayOfWeek::Wednesday));
        assert_eq!(DayOfWeek::parse("LU"), Some(DayOfWeek::Monday));
        assert_eq!(DayOfWeek::parse("Friday"), Some(DayOfWeek::Friday));
        assert_eq!(DayOfWeek::parse("funday"), None);
    }

    #[test]
    fn test_adjacent_slots_do_not_overlap() {
        let a = TimeSlot::parse(DayOfWeek::Monday, "08:00", "10:00").unwrap();
        let b = TimeSlot::parse(DayOfWeek::Monday, "10:00", "12:00").unwrap();
        let c = TimeSlot::parse(DayOfWeek::Monday, "09:59", "11:00").unwrap();
        let d = TimeSlot::parse(DayOfWeek::Tuesday, "08:00", "10:00").unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(!a.overlaps(&d));
        assert_eq!(a.duration_minutes(), 120);
    }

    #[test]
    fn test_day_serializes_in_spanish() {
        let json = serde_json::to_string(&DayOfWeek::Saturday).unwrap();
        assert_eq!(json, "\"Sábado\"");
        let back: DayOfWeek = serde_json::from_str("\"SA\"").unwrap();
        assert_eq!(back, DayOfWeek::Saturday);
    }
}
