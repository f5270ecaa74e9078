//! Property edits applied to a scope

use shared::{ActionScope, ElementId, FieldValue, SIDE_FACE_COUNT};

use super::Session;
use crate::state::field::Field;
use crate::state::undo::{Command, Undoable};
use crate::state::{guard, scope};

impl Session {
    /// Apply `value` to `field` of every element `scope` resolves to around
    /// `pivot_id`, and record one undoable command for it.
    ///
    /// Returns false, leaving store and history untouched, when the pivot is
    /// missing or locked, the field does not apply to it, the value has the
    /// wrong shape for the field, or no resolved element would actually
    /// change. A single face under a group scope becomes a write of the four
    /// side faces.
    pub fn set_field(
        &mut self,
        field: Field,
        scope: ActionScope,
        pivot_id: &str,
        value: FieldValue,
    ) -> bool {
        let Some(pivot) = self.store.get(pivot_id) else {
            tracing::debug!("{}: element {pivot_id} not found", field.label());
            return false;
        };
        if pivot.locked {
            tracing::debug!("{}: element {pivot_id} is locked", field.label());
            return false;
        }
        if !field.applies_to(pivot.kind) {
            tracing::debug!(
                "{}: not a field of {}",
                field.label(),
                pivot.kind.display_name()
            );
            return false;
        }

        let scope = field.effective_scope(scope);
        let (field, value) = match (field, value) {
            (Field::FaceColor(_), FieldValue::Text(color)) if scope.is_group() => (
                Field::SideColors,
                FieldValue::List(vec![color; SIDE_FACE_COUNT]),
            ),
            other => other,
        };
        let selected = self.selection.id_set();
        let resolved = scope::resolve(scope, pivot, self.store.elements(), &selected);
        if !guard::need_change(field, &resolved, &value, self.settings.editing.tolerance) {
            return false;
        }

        let captured: Vec<(ElementId, FieldValue)> = resolved
            .iter()
            .filter_map(|e| field.get(e).map(|old| (e.id.clone(), old)))
            .collect();

        let old_values: Vec<(ElementId, FieldValue)> = self.store.transaction(|tx| {
            captured
                .into_iter()
                .filter(|(id, _)| tx.write(id, field, &value))
                .collect()
        });
        if old_values.is_empty() {
            tracing::debug!("{}: value {value:?} does not fit the field", field.label());
            return false;
        }

        let Some(cmd) = Command::field_change(scope, pivot_id, field, old_values, value) else {
            return false;
        };
        tracing::debug!("{}", cmd.description());
        self.history.push(cmd);
        true
    }

    pub fn set_color(&mut self, scope: ActionScope, pivot_id: &str, color: &str) -> bool {
        self.set_field(Field::Color, scope, pivot_id, FieldValue::from(color))
    }

    pub fn set_line_color(&mut self, scope: ActionScope, pivot_id: &str, color: &str) -> bool {
        self.set_field(Field::LineColor, scope, pivot_id, FieldValue::from(color))
    }

    pub fn set_transparency(&mut self, scope: ActionScope, pivot_id: &str, transparency: f64) -> bool {
        self.set_field(Field::Transparency, scope, pivot_id, FieldValue::Number(transparency))
    }

    /// Absolute azimuth (`rotation[2]`)
    pub fn set_azimuth(&mut self, scope: ActionScope, pivot_id: &str, azimuth: f64) -> bool {
        self.set_field(Field::Azimuth, scope, pivot_id, FieldValue::Number(azimuth))
    }

    /// Collector azimuth relative to its parent
    pub fn set_relative_azimuth(&mut self, scope: ActionScope, pivot_id: &str, azimuth: f64) -> bool {
        self.set_field(Field::RelativeAzimuth, scope, pivot_id, FieldValue::Number(azimuth))
    }

    pub fn set_tilt_angle(&mut self, scope: ActionScope, pivot_id: &str, angle: f64) -> bool {
        self.set_field(Field::TiltAngle, scope, pivot_id, FieldValue::Number(angle))
    }

    pub fn set_pole_height(&mut self, scope: ActionScope, pivot_id: &str, height: f64) -> bool {
        self.set_field(Field::PoleHeight, scope, pivot_id, FieldValue::Number(height))
    }

    pub fn set_rotation(&mut self, scope: ActionScope, pivot_id: &str, rotation: [f64; 3]) -> bool {
        self.set_field(Field::Rotation, scope, pivot_id, FieldValue::Triple(rotation))
    }

    pub fn set_model_name(&mut self, scope: ActionScope, pivot_id: &str, model: &str) -> bool {
        self.set_field(Field::ModelName, scope, pivot_id, FieldValue::from(model))
    }

    pub fn set_label(&mut self, scope: ActionScope, pivot_id: &str, label: &str) -> bool {
        self.set_field(Field::Label, scope, pivot_id, FieldValue::from(label))
    }

    /// Color the face `side` of a cuboid.
    ///
    /// `OnlyThisSide` and `OnlyThisObject` write that one face; group scopes
    /// paint the four side faces of each resolved cuboid and leave top and
    /// bottom alone.
    pub fn set_face_color(
        &mut self,
        scope: ActionScope,
        pivot_id: &str,
        side: usize,
        color: &str,
    ) -> bool {
        self.set_field(Field::FaceColor(side), scope, pivot_id, FieldValue::from(color))
    }

    pub fn set_show_label(&mut self, pivot_id: &str, show: bool) -> bool {
        self.toggle(Field::ShowLabel, pivot_id, show)
    }

    /// Lock or unlock an element. Unlike every other edit this is allowed on
    /// a locked element.
    pub fn set_locked(&mut self, pivot_id: &str, locked: bool) -> bool {
        self.toggle(Field::Locked, pivot_id, locked)
    }

    fn toggle(&mut self, field: Field, pivot_id: &str, checked: bool) -> bool {
        let Some(element) = self.store.get(pivot_id) else {
            return false;
        };
        if element.locked && field != Field::Locked {
            tracing::debug!("{}: element {pivot_id} is locked", field.label());
            return false;
        }
        let value = FieldValue::Flag(checked);
        if field.get(element).as_ref() == Some(&value) {
            return false;
        }
        if !self.store.transaction(|tx| tx.write(pivot_id, field, &value)) {
            return false;
        }
        self.history.push(Command::checkbox_toggle(pivot_id, field, checked));
        true
    }
}
