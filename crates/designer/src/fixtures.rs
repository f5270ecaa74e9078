//! Factory functions for creating test data.
//!
//! Provides convenient helpers to construct `Element`s, `DesignDocument`s and
//! ready-made sessions used in tests and by scripts.

use shared::*;

use crate::state::{EditorSettings, Session};

/// Normal of a cuboid's top face
pub const TOP: [f64; 3] = [0.0, 0.0, 1.0];

/// Normal of a cuboid's east face
pub const EAST: [f64; 3] = [1.0, 0.0, 0.0];

// ── Element factories ───────────────────────────────────────────

/// Create a foundation.
pub fn foundation(id: &str) -> Element {
    Element::new(id, ElementType::Foundation)
}

/// Create a cuboid standing on `parent` (which is also its foundation).
pub fn cuboid_on(id: &str, parent: &str) -> Element {
    Element::new(id, ElementType::Cuboid)
        .with_parent(parent)
        .with_foundation(parent)
}

/// Create a solar panel on `parent`, on the face with `normal`.
pub fn panel_on(id: &str, parent: &str, foundation: &str, normal: [f64; 3]) -> Element {
    let mut panel = Element::new(id, ElementType::SolarPanel)
        .with_parent(parent)
        .with_foundation(foundation)
        .with_normal(normal);
    panel.model_name = Some("SPR-X21-335-BLK".to_string());
    panel.pole_height = 0.5;
    panel
}

/// Create a tree on the ground.
pub fn tree(id: &str) -> Element {
    Element::new(id, ElementType::Tree)
}

// ── Document / session factories ────────────────────────────────

/// Two foundations: `c1`, `c2` on `f1` and `c3` on `f2`, all `#808080`.
pub fn cuboids_document() -> DesignDocument {
    DesignDocument::new(vec![
        foundation("f1"),
        foundation("f2"),
        cuboid_on("c1", "f1"),
        cuboid_on("c2", "f1"),
        cuboid_on("c3", "f2"),
    ])
}

/// A building `c1` on foundation `f1` with panels on its roof and wall,
/// plus ground-mounted panels on `f1` and on a second foundation `f2`.
///
/// - `p1`, `p2`: on `c1`, top face
/// - `p3`: on `c1`, east face
/// - `p4`: on `f1` directly
/// - `p5`: on `f2`
pub fn roof_array_document() -> DesignDocument {
    DesignDocument::new(vec![
        foundation("f1"),
        cuboid_on("c1", "f1"),
        panel_on("p1", "c1", "f1", TOP),
        panel_on("p2", "c1", "f1", TOP),
        panel_on("p3", "c1", "f1", EAST),
        panel_on("p4", "f1", "f1", TOP),
        foundation("f2"),
        panel_on("p5", "f2", "f2", TOP),
        tree("t1"),
    ])
}

/// Session with [`cuboids_document`] open.
pub fn cuboids_session() -> Session {
    Session::with_document(cuboids_document(), EditorSettings::default())
}

/// Session with [`roof_array_document`] open.
pub fn roof_array_session() -> Session {
    Session::with_document(roof_array_document(), EditorSettings::default())
}
