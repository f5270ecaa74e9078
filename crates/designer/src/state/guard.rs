//! No-op elision for property edits.

use shared::{Element, FieldValue};

use super::field::Field;

/// Default tolerance for numeric comparisons
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Whether writing `candidate` would change at least one resolved element.
///
/// Elements that do not carry `field` are ignored. An empty set never needs a
/// change.
pub fn need_change(field: Field, resolved: &[&Element], candidate: &FieldValue, tolerance: f64) -> bool {
    resolved.iter().any(|element| {
        field
            .get(element)
            .is_some_and(|current| differs(field, &current, candidate, tolerance))
    })
}

/// Compare two values of `field`; numeric fields within `tolerance` are equal
pub fn differs(field: Field, current: &FieldValue, candidate: &FieldValue, tolerance: f64) -> bool {
    if !field.is_numeric() {
        return current != candidate;
    }
    match (current, candidate) {
        (FieldValue::Number(a), FieldValue::Number(b)) => (a - b).abs() > tolerance,
        (FieldValue::Triple(a), FieldValue::Triple(b)) => {
            a.iter().zip(b).any(|(x, y)| (x - y).abs() > tolerance)
        }
        _ => true,
    }
}
