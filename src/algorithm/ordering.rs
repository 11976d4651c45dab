// Estrategias de orden de materias para la búsqueda.
//
// El orden decide qué materia se fija primero en el backtracking. Poner
// primero las materias con menos opciones poda el árbol lo antes posible.
// El orden también es parte del contrato observable: a igualdad de puntaje
// gana el candidato encontrado primero, así que debe ser estable.
use petgraph::graph::{NodeIndex, UnGraph};

use crate::algorithm::conflict::has_conflict;
use crate::config::OrderingKind;
use crate::models::Subject;

/// Estrategia intercambiable que decide el orden de materias.
pub trait SubjectOrdering: Send + Sync {
    /// Devuelve una permutación de `0..subjects.len()`. Debe ser determinista.
    fn order(&self, subjects: &[&Subject]) -> Vec<usize>;

    fn name(&self) -> &'static str;
}

/// Menos secciones primero; a igualdad se respeta la posición de entrada.
#[derive(Debug, Clone, Copy, Default)]
pub struct FewestSectionsFirst;

impl SubjectOrdering for FewestSectionsFirst {
    fn order(&self, subjects: &[&Subject]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..subjects.len()).collect();
        order.sort_by_key(|&i| (subjects[i].sections.len(), i));
        order
    }

    fn name(&self) -> &'static str {
        "fewest_sections"
    }
}

/// Menos secciones primero; a igualdad, la materia cuyas secciones chocan más
/// con las de otras materias va antes (grado en el grafo de conflictos).
#[derive(Debug, Clone, Copy, Default)]
pub struct MostConstrainedFirst;

impl MostConstrainedFirst {
    /// Suma de grados por materia en el grafo de choques entre secciones de
    /// materias distintas.
    pub fn conflict_degrees(subjects: &[&Subject]) -> Vec<usize> {
        let mut graph: UnGraph<usize, ()> = UnGraph::new_undirected();
        let mut nodes: Vec<(NodeIndex, usize, usize)> = Vec::new();
        for (si, subject) in subjects.iter().enumerate() {
            for (ki, _) in subject.sections.iter().enumerate() {
                nodes.push((graph.add_node(si), si, ki));
            }
        }

        for a in 0..nodes.len() {
            for b in (a + 1)..nodes.len() {
                let (na, sa, ka) = nodes[a];
                let (nb, sb, kb) = nodes[b];
                if sa != sb && has_conflict(&subjects[sa].sections[ka], &subjects[sb].sections[kb]) {
                    graph.add_edge(na, nb, ());
                }
            }
        }

        let mut degrees = vec![0usize; subjects.len()];
        for (node, si, _) in nodes.iter() {
            degrees[*si] += graph.neighbors(*node).count();
        }
        degrees
    }
}

impl SubjectOrdering for MostConstrainedFirst {
    fn order(&self, subjects: &[&Subject]) -> Vec<usize> {
        let degrees = MostConstrainedFirst::conflict_degrees(subjects);
        let mut order: Vec<usize> = (0..subjects.len()).collect();
        order.sort_by_key(|&i| (subjects[i].sections.len(), std::cmp::Reverse(degrees[i]), i));
        order
    }

    fn name(&self) -> &'static str {
        "most_constrained"
    }
}

pub fn ordering_for(kind: OrderingKind) -> Box<dyn SubjectOrdering> {
    match kind {
        OrderingKind::FewestSections => Box::new(FewestSectionsFirst),
        OrderingKind::MostConstrained => Box::new(MostConstrainedFirst),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayOfWeek, Section, SubjectType, TimeSlot};

    fn subject(code: &str, slots: &[(&str, &str)]) -> Subject {
        let sections = slots
            .iter()
            .enumerate()
            .map(|(i, (s, e))| Section::new(code, format!("{}", i + 1), vec![TimeSlot::parse(DayOfWeek::Monday, s, e).unwrap()]))
            .collect();
        Subject::new(code, code, 4, SubjectType::Lecture, sections).unwrap()
    }

    #[test]
    fn test_fewest_sections_first_is_stable() {
        let a = subject("A", &[("08:00", "09:00"), ("09:00", "10:00")]);
        let b = subject("B", &[("10:00", "11:00")]);
        let c = subject("C", &[("11:00", "12:00"), ("12:00", "13:00")]);
        let d = subject("D", &[("13:00", "14:00")]);
        let order = FewestSectionsFirst.order(&[&a, &b, &c, &d]);
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_most_constrained_breaks_ties_by_conflict_degree() {
        // B y C tienen una sección cada una; C choca con A, B no choca con nadie.
        let a = subject("A", &[("08:00", "10:00"), ("14:00", "15:00")]);
        let b = subject("B", &[("16:00", "17:00")]);
        let c = subject("C", &[("09:00", "11:00")]);
        let subjects = [&a, &b, &c];
        assert_eq!(MostConstrainedFirst::conflict_degrees(&subjects), vec![1, 0, 1]);
        assert_eq!(MostConstrainedFirst.order(&subjects), vec![2, 1, 0]);
        assert_eq!(FewestSectionsFirst.order(&subjects), vec![1, 2, 0]);
    }

    #[test]
    fn test_ordering_for_kind() {
        assert_eq!(ordering_for(OrderingKind::FewestSections).name(), "fewest_sections");
        assert_eq!(ordering_for(OrderingKind::MostConstrained).name(), "most_constrained");
    }
}
