//! Scope resolution: which elements one property edit applies to.

use std::collections::HashSet;

use glam::DVec3;
use shared::{ActionScope, Element, ElementId, ElementType};

/// Two face normals closer than this are the same face
const NORMAL_TOLERANCE: f64 = 1e-6;

/// Resolve `scope` around `pivot` to the elements an edit should touch.
///
/// The result is always restricted to unlocked elements of the pivot's type
/// and keeps document order. Nothing is mutated.
pub fn resolve<'a>(
    scope: ActionScope,
    pivot: &Element,
    elements: &'a [Element],
    selected: &HashSet<ElementId>,
) -> Vec<&'a Element> {
    let candidates = elements
        .iter()
        .filter(|e| e.kind == pivot.kind && !e.locked);

    match scope {
        ActionScope::OnlyThisObject | ActionScope::OnlyThisSide => {
            candidates.filter(|e| e.id == pivot.id).collect()
        }
        ActionScope::AllSelectedObjectsOfThisType => {
            candidates.filter(|e| selected.contains(&e.id)).collect()
        }
        ActionScope::AllObjectsOfThisTypeOnSurface => {
            let on_cuboid = pivot
                .parent_id
                .as_deref()
                .and_then(|parent| elements.iter().find(|e| e.id == parent))
                .is_some_and(|parent| parent.kind == ElementType::Cuboid);
            candidates
                .filter(|e| e.parent_id == pivot.parent_id)
                .filter(|e| !on_cuboid || same_face(e.normal, pivot.normal))
                .collect()
        }
        ActionScope::AllObjectsOfThisTypeAboveFoundation => match pivot.foundation_id.as_deref() {
            Some(foundation) => candidates
                .filter(|e| e.foundation_id.as_deref() == Some(foundation))
                .collect(),
            None => candidates.filter(|e| e.id == pivot.id).collect(),
        },
        ActionScope::AllObjectsOfThisType => candidates.collect(),
    }
}

fn same_face(a: [f64; 3], b: [f64; 3]) -> bool {
    DVec3::from_array(a).abs_diff_eq(DVec3::from_array(b), NORMAL_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(resolved: &[&Element]) -> Vec<String> {
        resolved.iter().map(|e| e.id.clone()).collect()
    }

    fn scene() -> Vec<Element> {
        vec![
            Element::new("f1", ElementType::Foundation),
            Element::new("f2", ElementType::Foundation),
            Element::new("c1", ElementType::Cuboid).with_parent("f1").with_foundation("f1"),
            Element::new("c2", ElementType::Cuboid).with_parent("f1").with_foundation("f1"),
            Element::new("c3", ElementType::Cuboid).with_parent("f2").with_foundation("f2"),
            Element::new("c4", ElementType::Cuboid).with_parent("f1").with_foundation("f1").locked(),
            Element::new("t1", ElementType::Tree).with_parent("f1").with_foundation("f1"),
        ]
    }

    #[test]
    fn test_only_this_object() {
        let all = scene();
        let r = resolve(ActionScope::OnlyThisObject, &all[2], &all, &HashSet::new());
        assert_eq!(ids(&r), vec!["c1"]);
    }

    #[test]
    fn test_only_this_side_is_pivot() {
        let all = scene();
        let r = resolve(ActionScope::OnlyThisSide, &all[2], &all, &HashSet::new());
        assert_eq!(ids(&r), vec!["c1"]);
    }

    #[test]
    fn test_locked_pivot_resolves_empty() {
        let all = scene();
        let r = resolve(ActionScope::OnlyThisObject, &all[5], &all, &HashSet::new());
        assert!(r.is_empty());
    }

    #[test]
    fn test_on_surface_shares_parent_and_skips_locked() {
        let all = scene();
        let r = resolve(ActionScope::AllObjectsOfThisTypeOnSurface, &all[2], &all, &HashSet::new());
        assert_eq!(ids(&r), vec!["c1", "c2"]);
    }

    #[test]
    fn test_on_cuboid_surface_requires_same_face() {
        let all = vec![
            Element::new("c1", ElementType::Cuboid),
            Element::new("p1", ElementType::SolarPanel).with_parent("c1").with_normal([0.0, 0.0, 1.0]),
            Element::new("p2", ElementType::SolarPanel).with_parent("c1").with_normal([0.0, 0.0, 1.0]),
            Element::new("p3", ElementType::SolarPanel).with_parent("c1").with_normal([1.0, 0.0, 0.0]),
        ];
        let r = resolve(ActionScope::AllObjectsOfThisTypeOnSurface, &all[1], &all, &HashSet::new());
        assert_eq!(ids(&r), vec!["p1", "p2"]);

        let r = resolve(ActionScope::AllObjectsOfThisTypeOnSurface, &all[3], &all, &HashSet::new());
        assert_eq!(ids(&r), vec!["p3"]);
    }

    #[test]
    fn test_on_foundation_surface_ignores_normals() {
        let all = vec![
            Element::new("f1", ElementType::Foundation),
            Element::new("p1", ElementType::SolarPanel).with_parent("f1").with_normal([0.0, 0.0, 1.0]),
            Element::new("p2", ElementType::SolarPanel).with_parent("f1").with_normal([1.0, 0.0, 0.0]),
        ];
        let r = resolve(ActionScope::AllObjectsOfThisTypeOnSurface, &all[1], &all, &HashSet::new());
        assert_eq!(ids(&r), vec!["p1", "p2"]);
    }

    #[test]
    fn test_above_foundation() {
        let all = vec![
            Element::new("f1", ElementType::Foundation),
            Element::new("c1", ElementType::Cuboid).with_parent("f1").with_foundation("f1"),
            Element::new("p1", ElementType::SolarPanel).with_parent("c1").with_foundation("f1"),
            Element::new("p2", ElementType::SolarPanel).with_parent("f1").with_foundation("f1"),
            Element::new("p3", ElementType::SolarPanel).with_parent("f2").with_foundation("f2"),
        ];
        let r = resolve(ActionScope::AllObjectsOfThisTypeAboveFoundation, &all[2], &all, &HashSet::new());
        assert_eq!(ids(&r), vec!["p1", "p2"]);
    }

    #[test]
    fn test_above_foundation_without_foundation_is_pivot_only() {
        let all = vec![
            Element::new("p1", ElementType::SolarPanel),
            Element::new("p2", ElementType::SolarPanel),
        ];
        let r = resolve(ActionScope::AllObjectsOfThisTypeAboveFoundation, &all[0], &all, &HashSet::new());
        assert_eq!(ids(&r), vec!["p1"]);
    }

    #[test]
    fn test_all_selected_filters_type_and_lock() {
        let all = scene();
        let selected: HashSet<ElementId> =
            ["c1", "c3", "c4", "t1"].iter().map(|s| s.to_string()).collect();
        let r = resolve(ActionScope::AllSelectedObjectsOfThisType, &all[2], &all, &selected);
        assert_eq!(ids(&r), vec!["c1", "c3"]);
    }

    #[test]
    fn test_all_of_type_ignores_parentage() {
        let all = scene();
        let r = resolve(ActionScope::AllObjectsOfThisType, &all[2], &all, &HashSet::new());
        assert_eq!(ids(&r), vec!["c1", "c2", "c3"]);
    }
}
