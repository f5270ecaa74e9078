//! Editable field families.
//!
//! A [`Field`] names one property a dialog can edit and knows how to read and
//! write it on an [`Element`]. Everything above this module (guard, applier,
//! commands) works on `(Field, FieldValue)` pairs and never touches element
//! structs directly.

use serde::{Deserialize, Serialize};
use shared::{ActionScope, Element, ElementType, FieldValue, FACE_COUNT, SIDE_FACE_COUNT};

/// One editable field family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Color,
    LineColor,
    Transparency,
    /// `rotation[2]`
    Azimuth,
    RelativeAzimuth,
    TiltAngle,
    PoleHeight,
    Rotation,
    ModelName,
    Label,
    ShowLabel,
    Locked,
    /// A single face of a cuboid (0–3 sides, 4 top, 5 bottom)
    FaceColor(usize),
    /// The four side faces of a cuboid; top and bottom are left alone
    SideColors,
}

impl Field {
    /// Display name used in history descriptions
    pub fn label(&self) -> &'static str {
        match self {
            Field::Color => "Color",
            Field::LineColor => "Line Color",
            Field::Transparency => "Transparency",
            Field::Azimuth => "Azimuth",
            Field::RelativeAzimuth => "Relative Azimuth",
            Field::TiltAngle => "Tilt Angle",
            Field::PoleHeight => "Pole Height",
            Field::Rotation => "Rotation",
            Field::ModelName => "Model",
            Field::Label => "Label",
            Field::ShowLabel => "Show Label",
            Field::Locked => "Lock",
            Field::FaceColor(_) => "Face Color",
            Field::SideColors => "Side Colors",
        }
    }

    /// Whether elements of `kind` carry this field at all
    pub fn applies_to(&self, kind: ElementType) -> bool {
        match self {
            Field::Color
            | Field::LineColor
            | Field::Transparency
            | Field::Label
            | Field::ShowLabel
            | Field::Locked => true,
            Field::Azimuth | Field::Rotation => !matches!(
                kind,
                ElementType::Wall | ElementType::Roof | ElementType::Window | ElementType::Door
            ),
            Field::RelativeAzimuth | Field::TiltAngle | Field::PoleHeight | Field::ModelName => {
                kind.is_solar_collector()
            }
            Field::FaceColor(index) => kind == ElementType::Cuboid && *index < FACE_COUNT,
            Field::SideColors => kind == ElementType::Cuboid,
        }
    }

    /// Whether the field's dialog implements a group mutation for `scope`.
    ///
    /// Only the collector dialogs ever implemented the foundation scope; the
    /// others list it but treat it as a single-object edit.
    pub fn supports_scope(&self, scope: ActionScope) -> bool {
        match scope {
            ActionScope::AllObjectsOfThisTypeAboveFoundation => matches!(
                self,
                Field::RelativeAzimuth | Field::TiltAngle | Field::PoleHeight | Field::ModelName
            ),
            ActionScope::OnlyThisSide => matches!(self, Field::FaceColor(_)),
            _ => !matches!(self, Field::Locked | Field::ShowLabel) || !scope.is_group(),
        }
    }

    /// The scope actually applied when a dialog asks for `scope`
    pub fn effective_scope(&self, scope: ActionScope) -> ActionScope {
        if self.supports_scope(scope) {
            scope
        } else {
            ActionScope::OnlyThisObject
        }
    }

    /// Compared with a tolerance rather than exactly
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Field::Transparency
                | Field::Azimuth
                | Field::RelativeAzimuth
                | Field::TiltAngle
                | Field::PoleHeight
                | Field::Rotation
        )
    }

    /// Read the current value, `None` if the element has no such field
    pub fn get(&self, element: &Element) -> Option<FieldValue> {
        if !self.applies_to(element.kind) {
            return None;
        }
        let value = match self {
            Field::Color => FieldValue::Text(element.color.clone()),
            Field::LineColor => FieldValue::Text(element.line_color.clone()),
            Field::Transparency => FieldValue::Number(element.transparency),
            Field::Azimuth => FieldValue::Number(element.rotation[2]),
            Field::RelativeAzimuth => FieldValue::Number(element.relative_azimuth),
            Field::TiltAngle => FieldValue::Number(element.tilt_angle),
            Field::PoleHeight => FieldValue::Number(element.pole_height),
            Field::Rotation => FieldValue::Triple(element.rotation),
            Field::ModelName => FieldValue::Text(element.model_name.clone().unwrap_or_default()),
            Field::Label => FieldValue::Text(element.label.clone().unwrap_or_default()),
            Field::ShowLabel => FieldValue::Flag(element.show_label),
            Field::Locked => FieldValue::Flag(element.locked),
            Field::FaceColor(index) => {
                FieldValue::Text(element.face_colors.as_ref()?.get(*index)?.clone())
            }
            Field::SideColors => {
                FieldValue::List(element.face_colors.as_ref()?[..SIDE_FACE_COUNT].to_vec())
            }
        };
        Some(value)
    }

    /// Write `value`; returns false (and leaves the element untouched) when
    /// the field does not apply or the value has the wrong shape.
    pub fn set(&self, element: &mut Element, value: &FieldValue) -> bool {
        if !self.applies_to(element.kind) {
            return false;
        }
        match (self, value) {
            (Field::Color, FieldValue::Text(v)) => element.color = v.clone(),
            (Field::LineColor, FieldValue::Text(v)) => element.line_color = v.clone(),
            (Field::Transparency, FieldValue::Number(v)) => element.transparency = *v,
            (Field::Azimuth, FieldValue::Number(v)) => element.rotation[2] = *v,
            (Field::RelativeAzimuth, FieldValue::Number(v)) => element.relative_azimuth = *v,
            (Field::TiltAngle, FieldValue::Number(v)) => element.tilt_angle = *v,
            (Field::PoleHeight, FieldValue::Number(v)) => element.pole_height = *v,
            (Field::Rotation, FieldValue::Triple(v)) => element.rotation = *v,
            (Field::ModelName, FieldValue::Text(v)) => {
                element.model_name = (!v.is_empty()).then(|| v.clone())
            }
            (Field::Label, FieldValue::Text(v)) => element.label = (!v.is_empty()).then(|| v.clone()),
            (Field::ShowLabel, FieldValue::Flag(v)) => element.show_label = *v,
            (Field::Locked, FieldValue::Flag(v)) => element.locked = *v,
            (Field::FaceColor(index), FieldValue::Text(v)) => {
                let Some(slot) = element.face_colors.as_mut().and_then(|f| f.get_mut(*index)) else {
                    return false;
                };
                *slot = v.clone();
            }
            (Field::SideColors, FieldValue::List(v)) if v.len() == SIDE_FACE_COUNT => {
                let Some(faces) = element.face_colors.as_mut() else {
                    return false;
                };
                faces[..SIDE_FACE_COUNT].clone_from_slice(v);
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_color() {
        let mut e = Element::new("c1", ElementType::Cuboid);
        assert_eq!(Field::Color.get(&e), Some(FieldValue::from("#808080")));
        assert!(Field::Color.set(&mut e, &FieldValue::from("#FF0000")));
        assert_eq!(e.color, "#FF0000");
    }

    #[test]
    fn test_set_rejects_wrong_shape() {
        let mut e = Element::new("c1", ElementType::Cuboid);
        assert!(!Field::Color.set(&mut e, &FieldValue::Number(1.0)));
        assert!(!Field::Transparency.set(&mut e, &FieldValue::from("0.5")));
        assert_eq!(e.color, "#808080");
        assert_eq!(e.transparency, 0.0);
    }

    #[test]
    fn test_collector_fields_only_on_collectors() {
        let mut tree = Element::new("t1", ElementType::Tree);
        assert!(Field::TiltAngle.get(&tree).is_none());
        assert!(!Field::TiltAngle.set(&mut tree, &FieldValue::Number(0.3)));

        let mut panel = Element::new("p1", ElementType::SolarPanel);
        assert!(Field::TiltAngle.set(&mut panel, &FieldValue::Number(0.3)));
        assert_eq!(panel.tilt_angle, 0.3);
    }

    #[test]
    fn test_azimuth_is_rotation_z() {
        let mut f = Element::new("f1", ElementType::Foundation);
        assert!(Field::Azimuth.set(&mut f, &FieldValue::Number(1.5)));
        assert_eq!(f.rotation, [0.0, 0.0, 1.5]);
        assert_eq!(Field::Rotation.get(&f), Some(FieldValue::Triple([0.0, 0.0, 1.5])));
    }

    #[test]
    fn test_face_color_single_slot() {
        let mut c = Element::new("c1", ElementType::Cuboid);
        assert!(Field::FaceColor(4).set(&mut c, &FieldValue::from("#0000FF")));
        let faces = c.face_colors.as_ref().unwrap();
        assert_eq!(faces[4], "#0000FF");
        assert_eq!(faces[0], "#808080");
        assert!(!Field::FaceColor(6).set(&mut c, &FieldValue::from("#0000FF")));
    }

    #[test]
    fn test_side_colors_leave_top_and_bottom() {
        let mut c = Element::new("c1", ElementType::Cuboid);
        let sides = FieldValue::List(vec!["#FF0000".to_string(); SIDE_FACE_COUNT]);
        assert!(Field::SideColors.set(&mut c, &sides));
        let faces = c.face_colors.as_ref().unwrap();
        assert!(faces[..4].iter().all(|f| f == "#FF0000"));
        assert_eq!(faces[4], "#808080");
        assert_eq!(faces[5], "#808080");
        assert_eq!(Field::SideColors.get(&c), Some(sides));
    }

    #[test]
    fn test_side_colors_require_four_entries() {
        let mut c = Element::new("c1", ElementType::Cuboid);
        let short = FieldValue::List(vec!["#FF0000".to_string(); 3]);
        assert!(!Field::SideColors.set(&mut c, &short));
    }

    #[test]
    fn test_empty_text_clears_optional_fields() {
        let mut p = Element::new("p1", ElementType::SolarPanel);
        assert!(Field::ModelName.set(&mut p, &FieldValue::from("SPR-X21-345")));
        assert_eq!(p.model_name.as_deref(), Some("SPR-X21-345"));
        assert!(Field::ModelName.set(&mut p, &FieldValue::from("")));
        assert!(p.model_name.is_none());
    }

    #[test]
    fn test_foundation_scope_only_for_collector_fields() {
        let scope = ActionScope::AllObjectsOfThisTypeAboveFoundation;
        assert_eq!(Field::TiltAngle.effective_scope(scope), scope);
        assert_eq!(Field::Color.effective_scope(scope), ActionScope::OnlyThisObject);
        assert_eq!(Field::Transparency.effective_scope(scope), ActionScope::OnlyThisObject);
    }

    #[test]
    fn test_only_this_side_degrades_for_whole_object_fields() {
        assert_eq!(
            Field::Color.effective_scope(ActionScope::OnlyThisSide),
            ActionScope::OnlyThisObject
        );
        assert_eq!(
            Field::FaceColor(2).effective_scope(ActionScope::OnlyThisSide),
            ActionScope::OnlyThisSide
        );
    }

    #[test]
    fn test_checkbox_fields_are_single_object() {
        assert_eq!(
            Field::Locked.effective_scope(ActionScope::AllObjectsOfThisType),
            ActionScope::OnlyThisObject
        );
    }

    #[test]
    fn test_field_serde() {
        assert_eq!(serde_json::to_string(&Field::TiltAngle).unwrap(), r#""tilt_angle""#);
        let f: Field = serde_json::from_str(r#"{"face_color": 3}"#).unwrap();
        assert_eq!(f, Field::FaceColor(3));
    }
}
