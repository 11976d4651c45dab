// Generación perezosa de combinaciones sin choques.
use crate::algorithm::conflict::conflicts_with_any;
use crate::algorithm::ordering::SubjectOrdering;
use crate::models::{Section, Subject};

/// Una combinación completa: una sección por materia, en el orden en que
/// se entregaron las materias (no en el orden de búsqueda).
pub type Candidate<'a> = Vec<&'a Section>;

/// Generador perezoso de combinaciones sin choques.
///
/// Estrategia: backtracking iterativo. Las materias se recorren en el orden
/// que dicte la `SubjectOrdering` (por defecto, menos secciones primero) y
/// las secciones de cada materia en el orden del catálogo. Una sección sólo
/// extiende la combinación parcial si no choca con lo ya elegido, así que
/// las ramas inviables se podan al momento y nunca se arma el producto
/// cartesiano completo.
///
/// La secuencia es finita y determinista. Si alguna materia no tiene
/// secciones (o no hay materias) no se produce ningún candidato.
#[derive(Debug, Clone)]
pub struct CombinationGenerator<'a> {
    /// Materias en orden de búsqueda.
    subjects: Vec<&'a Subject>,
    /// `positions[d]` = índice de entrada de la materia en profundidad `d`.
    positions: Vec<usize>,
    /// `cursor[d]` = próxima sección a probar en profundidad `d`.
    cursor: Vec<usize>,
    chosen: Vec<&'a Section>,
    pruned: usize,
    done: bool,
}

impl<'a> CombinationGenerator<'a> {
    pub fn new(subjects: &[&'a Subject], ordering: &dyn SubjectOrdering) -> CombinationGenerator<'a> {
        let positions = ordering.order(subjects);
        let ordered: Vec<&'a Subject> = positions.iter().map(|&i| subjects[i]).collect();
        let mut generator = CombinationGenerator {
            subjects: ordered,
            positions,
            cursor: Vec::new(),
            chosen: Vec::new(),
            pruned: 0,
            done: false,
        };
        generator.restart();
        generator
    }

    /// Vuelve al inicio; la secuencia producida será idéntica a la primera.
    pub fn restart(&mut self) {
        self.cursor.clear();
        self.chosen.clear();
        self.pruned = 0;
        self.done = self.subjects.is_empty() || self.subjects.iter().any(|s| s.sections.is_empty());
        if !self.done {
            self.cursor.push(0);
        }
    }

    /// Códigos de materia en el orden en que se recorren.
    pub fn search_order(&self) -> Vec<&'a str> {
        self.subjects.iter().map(|s| s.code.as_str()).collect()
    }

    /// Secciones descartadas hasta ahora por chocar con la combinación parcial.
    pub fn pruned(&self) -> usize {
        self.pruned
    }

    fn snapshot(&self) -> Candidate<'a> {
        let mut out: Vec<Option<&'a Section>> = vec![None; self.chosen.len()];
        for (depth, section) in self.chosen.iter().enumerate() {
            out[self.positions[depth]] = Some(*section);
        }
        out.into_iter().flatten().collect()
    }
}

impl<'a> Iterator for CombinationGenerator<'a> {
    type Item = Candidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // Invariante al inicio de cada vuelta: chosen.len() == cursor.len() - 1
        while let Some(&next_idx) = self.cursor.last() {
            let depth = self.cursor.len() - 1;
            let subject = self.subjects[depth];

            if next_idx >= subject.sections.len() {
                // profundidad agotada: retroceder
                self.cursor.pop();
                self.chosen.pop();
                continue;
            }
            self.cursor[depth] += 1;

            let section = &subject.sections[next_idx];
            if conflicts_with_any(section, &self.chosen) {
                self.pruned += 1;
                continue;
            }

            self.chosen.push(section);
            if self.chosen.len() == self.subjects.len() {
                let candidate = self.snapshot();
                self.chosen.pop();
                return Some(candidate);
            }
            self.cursor.push(0);
        }

        self.done = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::conflict::is_feasible;
    use crate::algorithm::ordering::FewestSectionsFirst;
    use crate::models::{DayOfWeek, SubjectType, TimeSlot};

    fn subject(code: &str, slots: &[(&str, &str)]) -> Subject {
        let sections = slots
            .iter()
            .enumerate()
            .map(|(i, (s, e))| Section::new(code, format!("{}", i + 1), vec![TimeSlot::parse(DayOfWeek::Monday, s, e).unwrap()]))
            .collect();
        Subject::new(code, code, 4, SubjectType::Lecture, sections).unwrap()
    }

    fn labels(c: &Candidate) -> Vec<String> {
        c.iter().map(|s| s.label()).collect()
    }

    #[test]
    fn test_yields_only_conflict_free_combinations() {
        let a = subject("A", &[("08:00", "10:00"), ("10:00", "12:00")]);
        let b = subject("B", &[("09:00", "11:00"), ("12:00", "13:00")]);
        let all: Vec<Vec<String>> = CombinationGenerator::new(&[&a, &b], &FewestSectionsFirst)
            .map(|c| labels(&c))
            .collect();
        // A-1 choca con B-1, A-2 choca con B-1
        assert_eq!(all, vec![vec!["A-1", "B-2"], vec!["A-2", "B-2"]]);
    }

    #[test]
    fn test_output_keeps_input_subject_order() {
        // B tiene menos secciones y se busca primero, pero la salida sigue el orden de entrada
        let a = subject("A", &[("08:00", "09:00"), ("09:00", "10:00")]);
        let b = subject("B", &[("12:00", "13:00")]);
        let mut generator = CombinationGenerator::new(&[&a, &b], &FewestSectionsFirst);
        assert_eq!(generator.search_order(), vec!["B", "A"]);
        let first = generator.next().unwrap();
        assert_eq!(labels(&first), vec!["A-1", "B-1"]);
    }

    #[test]
    fn test_empty_subject_yields_nothing() {
        let a = subject("A", &[("08:00", "09:00")]);
        let empty = Subject::new("E", "Vacía", 2, SubjectType::Seminar, vec![]).unwrap();
        assert_eq!(CombinationGenerator::new(&[&a, &empty], &FewestSectionsFirst).count(), 0);
        assert_eq!(CombinationGenerator::new(&[], &FewestSectionsFirst).count(), 0);
    }

    #[test]
    fn test_full_conflict_yields_nothing_and_counts_prunes() {
        let a = subject("A", &[("08:00", "10:00")]);
        let b = subject("B", &[("09:00", "11:00")]);
        let mut generator = CombinationGenerator::new(&[&a, &b], &FewestSectionsFirst);
        assert!(generator.next().is_none());
        assert!(generator.next().is_none());
        assert_eq!(generator.pruned(), 1);
    }

    #[test]
    fn test_restart_reproduces_sequence() {
        let a = subject("A", &[("08:00", "09:00"), ("09:00", "10:00"), ("10:00", "11:00")]);
        let b = subject("B", &[("08:30", "09:30"), ("11:00", "12:00")]);
        let c = subject("C", &[("12:00", "13:00"), ("08:00", "08:30")]);
        let mut generator = CombinationGenerator::new(&[&a, &b, &c], &FewestSectionsFirst);
        let first: Vec<Vec<String>> = generator.by_ref().map(|c| labels(&c)).collect();
        generator.restart();
        let second: Vec<Vec<String>> = generator.map(|c| labels(&c)).collect();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_matches_brute_force_count() {
        let a = subject("A", &[("08:00", "09:00"), ("09:00", "10:00"), ("10:00", "11:00")]);
        let b = subject("B", &[("08:30", "09:30"), ("11:00", "12:00"), ("09:00", "10:00")]);
        let c = subject("C", &[("12:00", "13:00"), ("08:00", "08:30"), ("10:30", "11:30")]);
        let generated: Vec<Candidate> = CombinationGenerator::new(&[&a, &b, &c], &FewestSectionsFirst).collect();

        let mut expected = 0;
        for sa in &a.sections {
            for sb in &b.sections {
                for sc in &c.sections {
                    if is_feasible(&[sa.clone(), sb.clone(), sc.clone()]) {
                        expected += 1;
                    }
                }
            }
        }
        assert_eq!(generated.len(), expected);
        for cand in &generated {
            let owned: Vec<Section> = cand.iter().map(|s| (*s).clone()).collect();
            assert!(is_feasible(&owned));
        }
    }
}
