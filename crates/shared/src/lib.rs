use serde::{Deserialize, Serialize};

/// Уникальный идентификатор элемента сцены
pub type ElementId = String;

/// Количество граней кубоида (0–3 боковые, 4 верх, 5 низ)
pub const FACE_COUNT: usize = 6;

/// Количество боковых граней кубоида
pub const SIDE_FACE_COUNT: usize = 4;

/// Тип элемента сцены
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Foundation,
    Cuboid,
    Wall,
    Roof,
    Window,
    Door,
    SolarPanel,
    ParabolicTrough,
    ParabolicDish,
    FresnelReflector,
    Heliostat,
    WindTurbine,
    Tree,
    Human,
    Sensor,
    Light,
    Polygon,
}

impl ElementType {
    /// Отображаемое имя типа
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementType::Foundation => "Foundation",
            ElementType::Cuboid => "Cuboid",
            ElementType::Wall => "Wall",
            ElementType::Roof => "Roof",
            ElementType::Window => "Window",
            ElementType::Door => "Door",
            ElementType::SolarPanel => "Solar Panel",
            ElementType::ParabolicTrough => "Parabolic Trough",
            ElementType::ParabolicDish => "Parabolic Dish",
            ElementType::FresnelReflector => "Fresnel Reflector",
            ElementType::Heliostat => "Heliostat",
            ElementType::WindTurbine => "Wind Turbine",
            ElementType::Tree => "Tree",
            ElementType::Human => "Human",
            ElementType::Sensor => "Sensor",
            ElementType::Light => "Light",
            ElementType::Polygon => "Polygon",
        }
    }

    /// Солнечные коллекторы (панели, жёлоба, тарелки, отражатели, гелиостаты)
    pub fn is_solar_collector(&self) -> bool {
        matches!(
            self,
            ElementType::SolarPanel
                | ElementType::ParabolicTrough
                | ElementType::ParabolicDish
                | ElementType::FresnelReflector
                | ElementType::Heliostat
        )
    }
}

/// Область применения изменения свойства
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionScope {
    /// Только этот объект
    #[default]
    OnlyThisObject,
    /// Только эта грань объекта (для многозначных полей, например цвета граней)
    OnlyThisSide,
    /// Все выделенные объекты этого типа
    AllSelectedObjectsOfThisType,
    /// Все объекты этого типа на той же поверхности
    AllObjectsOfThisTypeOnSurface,
    /// Все объекты этого типа на том же фундаменте
    AllObjectsOfThisTypeAboveFoundation,
    /// Все объекты этого типа
    AllObjectsOfThisType,
}

impl ActionScope {
    /// Затрагивает ли область больше одного объекта
    pub fn is_group(&self) -> bool {
        !matches!(self, ActionScope::OnlyThisObject | ActionScope::OnlyThisSide)
    }

    /// Все области применения
    pub fn all() -> &'static [ActionScope] {
        &[
            ActionScope::OnlyThisObject,
            ActionScope::OnlyThisSide,
            ActionScope::AllSelectedObjectsOfThisType,
            ActionScope::AllObjectsOfThisTypeOnSurface,
            ActionScope::AllObjectsOfThisTypeAboveFoundation,
            ActionScope::AllObjectsOfThisType,
        ]
    }
}

fn default_color() -> String {
    "#808080".to_string()
}

fn default_line_color() -> String {
    "#000000".to_string()
}

fn default_size() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

fn default_normal() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

fn default_version() -> u32 {
    1
}

/// Элемент сцены — фундамент, кубоид, солнечная панель, дерево и т.д.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Уникальный идентификатор элемента
    pub id: ElementId,
    /// Тип элемента
    #[serde(rename = "type")]
    pub kind: ElementType,
    /// Родительский элемент (поверхность, на которой стоит элемент)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,
    /// Фундамент, к которому относится элемент
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foundation_id: Option<ElementId>,
    /// Заблокирован ли элемент для редактирования
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_line_color")]
    pub line_color: String,
    /// Прозрачность (0.0 - 1.0)
    #[serde(default)]
    pub transparency: f64,
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default = "default_size")]
    pub size: [f64; 3],
    /// Поворот в радианах; индекс 2 — азимут
    #[serde(default)]
    pub rotation: [f64; 3],
    /// Нормаль грани родителя, на которой стоит элемент
    #[serde(default = "default_normal")]
    pub normal: [f64; 3],
    /// Цвета граней кубоида
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_colors: Option<[String; FACE_COUNT]>,
    /// Угол наклона коллектора (радианы)
    #[serde(default)]
    pub tilt_angle: f64,
    /// Азимут коллектора относительно родителя (радианы)
    #[serde(default)]
    pub relative_azimuth: f64,
    #[serde(default)]
    pub pole_height: f64,
    /// Модель панели / коллектора
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub show_label: bool,
}

impl Element {
    /// Новый элемент с настройками по умолчанию
    pub fn new(id: impl Into<ElementId>, kind: ElementType) -> Self {
        let color = default_color();
        let face_colors = (kind == ElementType::Cuboid).then(|| {
            std::array::from_fn(|_| color.clone())
        });
        Self {
            id: id.into(),
            kind,
            parent_id: None,
            foundation_id: None,
            locked: false,
            color,
            line_color: default_line_color(),
            transparency: 0.0,
            position: [0.0; 3],
            size: default_size(),
            rotation: [0.0; 3],
            normal: default_normal(),
            face_colors,
            tilt_angle: 0.0,
            relative_azimuth: 0.0,
            pole_height: 0.0,
            model_name: None,
            label: None,
            show_label: false,
        }
    }

    /// Установить родителя
    pub fn with_parent(mut self, parent_id: impl Into<ElementId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Установить фундамент
    pub fn with_foundation(mut self, foundation_id: impl Into<ElementId>) -> Self {
        self.foundation_id = Some(foundation_id.into());
        self
    }

    /// Установить нормаль грани родителя
    pub fn with_normal(mut self, normal: [f64; 3]) -> Self {
        self.normal = normal;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Заблокировать элемент
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}

/// Документ проекта — только значения элементов, без истории отмены
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DesignDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl DesignDocument {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            version: default_version(),
            elements,
        }
    }
}

/// Значение одного поля элемента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
    Triple([f64; 3]),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_triple(&self) -> Option<[f64; 3]> {
        match self {
            FieldValue::Triple(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Flag(v)
    }
}

impl From<[f64; 3]> for FieldValue {
    fn from(v: [f64; 3]) -> Self {
        FieldValue::Triple(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        FieldValue::List(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(val: &T) {
        let json = serde_json::to_string(val).expect("serialize");
        let back: T = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(*val, back);
    }

    // --- ElementType / ActionScope ---

    #[test]
    fn test_element_type_serde() {
        let json = serde_json::to_string(&ElementType::SolarPanel).unwrap();
        assert_eq!(json, r#""solar_panel""#);
        roundtrip(&ElementType::ParabolicTrough);
    }

    #[test]
    fn test_action_scope_serde() {
        let json = serde_json::to_string(&ActionScope::AllObjectsOfThisTypeOnSurface).unwrap();
        assert_eq!(json, r#""all_objects_of_this_type_on_surface""#);
        for scope in ActionScope::all() {
            roundtrip(scope);
        }
    }

    #[test]
    fn test_action_scope_is_group() {
        assert!(!ActionScope::OnlyThisObject.is_group());
        assert!(!ActionScope::OnlyThisSide.is_group());
        assert!(ActionScope::AllObjectsOfThisType.is_group());
        assert!(ActionScope::AllSelectedObjectsOfThisType.is_group());
    }

    #[test]
    fn test_collector_types() {
        assert!(ElementType::Heliostat.is_solar_collector());
        assert!(!ElementType::Cuboid.is_solar_collector());
    }

    // --- Element ---

    #[test]
    fn test_new_cuboid_has_face_colors() {
        let c = Element::new("c1", ElementType::Cuboid);
        let faces = c.face_colors.as_ref().unwrap();
        assert!(faces.iter().all(|f| f == "#808080"));

        let p = Element::new("p1", ElementType::SolarPanel);
        assert!(p.face_colors.is_none());
    }

    #[test]
    fn test_element_serde() {
        let e = Element::new("c1", ElementType::Cuboid)
            .with_parent("f1")
            .with_foundation("f1")
            .with_normal([1.0, 0.0, 0.0])
            .locked();
        roundtrip(&e);
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains(r#""type":"cuboid""#));
    }

    #[test]
    fn test_element_defaults_from_minimal_json() {
        let e: Element = serde_json::from_str(r#"{"id": "t1", "type": "tree"}"#).unwrap();
        assert_eq!(e.kind, ElementType::Tree);
        assert_eq!(e.color, "#808080");
        assert_eq!(e.size, [1.0, 1.0, 1.0]);
        assert_eq!(e.normal, [0.0, 0.0, 1.0]);
        assert!(!e.locked);
        assert!(e.parent_id.is_none());
    }

    // --- DesignDocument ---

    #[test]
    fn test_document_serde() {
        let doc = DesignDocument::new(vec![
            Element::new("f1", ElementType::Foundation),
            Element::new("c1", ElementType::Cuboid).with_parent("f1"),
        ]);
        roundtrip(&doc);
    }

    #[test]
    fn test_document_default_version() {
        let doc: DesignDocument = serde_json::from_str(r#"{"elements": []}"#).unwrap();
        assert_eq!(doc.version, 1);
    }

    // --- FieldValue ---

    #[test]
    fn test_field_value_untagged() {
        let v: FieldValue = serde_json::from_str("0.5").unwrap();
        assert_eq!(v, FieldValue::Number(0.5));
        let v: FieldValue = serde_json::from_str(r##""#FF0000""##).unwrap();
        assert_eq!(v, FieldValue::Text("#FF0000".into()));
        let v: FieldValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, FieldValue::Flag(true));
        let v: FieldValue = serde_json::from_str("[0.0, 1.0, 2.0]").unwrap();
        assert_eq!(v, FieldValue::Triple([0.0, 1.0, 2.0]));
        let v: FieldValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(v, FieldValue::List(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::from(2.0).as_number(), Some(2.0));
        assert_eq!(FieldValue::from("x").as_text(), Some("x"));
        assert_eq!(FieldValue::from(false).as_flag(), Some(false));
        assert_eq!(FieldValue::from([1.0, 2.0, 3.0]).as_triple(), Some([1.0, 2.0, 3.0]));
        assert!(FieldValue::from(1.0).as_text().is_none());
    }
}
