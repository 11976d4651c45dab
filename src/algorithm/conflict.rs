// Detección de choques de horario entre secciones.
use crate::models::{Section, TimeSlot};

/// True si cualquier bloque de `a` solapa con cualquier bloque de `b`
/// (mismo día y rangos `[s1,e1)`, `[s2,e2)` con `s1 < e2 && s2 < e1`).
pub fn has_conflict(a: &Section, b: &Section) -> bool {
    a.slots.iter().any(|sa| b.slots.iter().any(|sb| sa.overlaps(sb)))
}

/// True si ningún par de secciones del conjunto choca.
pub fn is_feasible(sections: &[Section]) -> bool {
    sections
        .iter()
        .enumerate()
        .all(|(i, a)| sections[i + 1..].iter().all(|b| !has_conflict(a, b)))
}

/// True si `candidate` choca con alguna de las secciones ya elegidas.
pub fn conflicts_with_any(candidate: &Section, chosen: &[&Section]) -> bool {
    chosen.iter().any(|c| has_conflict(c, candidate))
}

/// True si la sección toca alguno de los bloques que el estudiante tiene bloqueados.
pub fn touches_blocked(section: &Section, blocked: &[TimeSlot]) -> bool {
    section.slots.iter().any(|s| blocked.iter().any(|b| s.overlaps(b)))
}

/// Pares `(i, j)` con `i < j` de secciones que chocan. Útil para diagnosticar
/// por qué un conjunto no es factible.
pub fn conflicting_pairs(sections: &[Section]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for i in 0..sections.len() {
        for j in (i + 1)..sections.len() {
            if has_conflict(&sections[i], &sections[j]) {
                out.push((i, j));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayOfWeek;

    fn section(code: &str, id: &str, slots: &[(DayOfWeek, &str, &str)]) -> Section {
        let slots = slots.iter().map(|(d, s, e)| TimeSlot::parse(*d, s, e).unwrap()).collect();
        Section::new(code, id, slots)
    }

    #[test]
    fn test_has_conflict_same_day_overlap() {
        let cc = section("CC101", "A", &[(DayOfWeek::Monday, "08:00", "10:00")]);
        let alt = section("MAT101", "B", &[(DayOfWeek::Monday, "09:00", "11:00")]);
        let ok = section("MAT101", "A", &[(DayOfWeek::Monday, "10:30", "12:00")]);
        assert!(has_conflict(&cc, &alt));
        assert!(has_conflict(&alt, &cc));
        assert!(!has_conflict(&cc, &ok));
    }

    #[test]
    fn test_has_conflict_any_slot_pair() {
        // choque sólo en el segundo bloque (miércoles)
        let a = section("A", "1", &[(DayOfWeek::Monday, "08:00", "10:00"), (DayOfWeek::Wednesday, "08:00", "10:00")]);
        let b = section("B", "1", &[(DayOfWeek::Tuesday, "08:00", "10:00"), (DayOfWeek::Wednesday, "09:30", "11:00")]);
        assert!(has_conflict(&a, &b));
    }

    #[test]
    fn test_is_feasible_and_pairs() {
        let a = section("A", "1", &[(DayOfWeek::Monday, "08:00", "10:00")]);
        let b = section("B", "1", &[(DayOfWeek::Monday, "10:00", "12:00")]);
        let c = section("C", "1", &[(DayOfWeek::Monday, "11:00", "13:00")]);
        assert!(is_feasible(&[a.clone(), b.clone()]));
        assert!(!is_feasible(&[a.clone(), b.clone(), c.clone()]));
        assert_eq!(conflicting_pairs(&[a, b, c]), vec![(1, 2)]);
        assert!(is_feasible(&[]));
    }

    #[test]
    fn test_touches_blocked() {
        let a = section("A", "1", &[(DayOfWeek::Friday, "16:00", "18:00")]);
        let blocked = vec![TimeSlot::parse(DayOfWeek::Friday, "17:00", "20:00").unwrap()];
        assert!(touches_blocked(&a, &blocked));
        assert!(!touches_blocked(&a, &[]));
    }
}
