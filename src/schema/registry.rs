use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Float,
    Integer,
    Boolean,
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Float | FieldKind::Integer)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Float => "float",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
        };
        write!(f, "{}", name)
    }
}

/// Spec sheet section a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Identification,
    Engine,
    Transmission,
    Hydraulics,
    Pto,
    DimensionsWeight,
    AxlesDrive,
    Electrical,
    HitchDrawbar,
    FuelFluids,
    Mechatronics,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Identification,
        Category::Engine,
        Category::Transmission,
        Category::Hydraulics,
        Category::Pto,
        Category::DimensionsWeight,
        Category::AxlesDrive,
        Category::Electrical,
        Category::HitchDrawbar,
        Category::FuelFluids,
        Category::Mechatronics,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Identification => "identification",
            Category::Engine => "engine",
            Category::Transmission => "transmission",
            Category::Hydraulics => "hydraulics",
            Category::Pto => "pto",
            Category::DimensionsWeight => "dimensions_weight",
            Category::AxlesDrive => "axles_drive",
            Category::Electrical => "electrical",
            Category::HitchDrawbar => "hitch_drawbar",
            Category::FuelFluids => "fuel_fluids",
            Category::Mechatronics => "mechatronics",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Category::ALL
            .iter()
            .find(|c| c.name() == lowered)
            .copied()
            .ok_or_else(|| format!("Unknown category '{}'", s))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub category: Category,
    /// Canonical unit for numeric filter fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
}

const fn text(name: &'static str, category: Category) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::Text,
        category,
        unit: None,
    }
}

const fn float(name: &'static str, category: Category, unit: &'static str) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::Float,
        category,
        unit: Some(unit),
    }
}

const fn integer(name: &'static str, category: Category) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::Integer,
        category,
        unit: None,
    }
}

const fn boolean(name: &'static str, category: Category) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::Boolean,
        category,
        unit: None,
    }
}

use Category::*;

/// Storage columns of a tractor record. Raw text columns sit next to the
/// numeric column their value canonicalizes into.
const TRACTOR_FIELDS: &[FieldDef] = &[
    text("model", Identification),
    text("company", Identification),
    // Engine
    text("marca_motor", Engine),
    text("numero_de_cilindros", Engine),
    integer("numero_de_cilindros_num", Engine),
    text("displacement", Engine),
    float("displacement_l", Engine, "L"),
    text("compression_ratio", Engine),
    float("compression_ratio_num", Engine, ":1"),
    text("emission_control", Engine),
    text("oil_capacity", Engine),
    float("oil_capacity_l", Engine, "L"),
    text("starter_volts", Engine),
    float("starter_volts_v", Engine, "V"),
    text("max_power_gross", Engine),
    float("max_power_gross_kw", Engine, "kW"),
    text("rated_rpm", Engine),
    integer("rated_rpm_num", Engine),
    text("torque", Engine),
    float("torque_nm", Engine, "N·m"),
    text("torque_rpm", Engine),
    integer("torque_rpm_num", Engine),
    text("rated_power_net", Engine),
    float("rated_power_net_kw", Engine, "kW"),
    // Transmission
    text("clutch", Transmission),
    text("gears", Transmission),
    integer("cambios_adelante", Transmission),
    integer("cambios_atras", Transmission),
    // Hydraulics
    text("pump_flow", Hydraulics),
    float("pump_flow_lpm", Hydraulics, "L/min"),
    text("pressure", Hydraulics),
    float("pressure_bar", Hydraulics, "bar"),
    boolean("enganche_delantero", Hydraulics),
    text("rear_scv_flow", Hydraulics),
    float("rear_scv_flow_lpm", Hydraulics, "L/min"),
    integer("rear_valves", Hydraulics),
    integer("front_valves", Hydraulics),
    text("capacity", Hydraulics),
    float("capacity_l", Hydraulics, "L"),
    // PTO
    text("front_pto_type", Pto),
    text("engine_rpm_at_pto", Pto),
    integer("engine_rpm_at_pto_num", Pto),
    text("detalles_velocidades_pto", Pto),
    // Dimensions and weight
    text("length", DimensionsWeight),
    float("length_m", DimensionsWeight, "m"),
    text("width", DimensionsWeight),
    float("width_m", DimensionsWeight, "m"),
    text("height", DimensionsWeight),
    float("height_m", DimensionsWeight, "m"),
    text("height_rops", DimensionsWeight),
    float("height_rops_m", DimensionsWeight, "m"),
    text("wheelbase", DimensionsWeight),
    float("wheelbase_m", DimensionsWeight, "m"),
    text("ground_clearance", DimensionsWeight),
    float("ground_clearance_m", DimensionsWeight, "m"),
    text("shipping_weight", DimensionsWeight),
    float("shipping_weight_kg", DimensionsWeight, "kg"),
    text("ballasted_weight", DimensionsWeight),
    float("ballasted_weight_kg", DimensionsWeight, "kg"),
    text("max_weight", DimensionsWeight),
    float("max_weight_kg", DimensionsWeight, "kg"),
    text("axle_clearance_front", DimensionsWeight),
    float("axle_clearance_front_m", DimensionsWeight, "m"),
    text("axle_clearance_rear", DimensionsWeight),
    float("axle_clearance_rear_m", DimensionsWeight, "m"),
    text("rear_tread", DimensionsWeight),
    text("front_tread", DimensionsWeight),
    text("tire_front", DimensionsWeight),
    text("tire_rear", DimensionsWeight),
    text("peso_delantero", DimensionsWeight),
    float("peso_delantero_kg", DimensionsWeight, "kg"),
    text("peso_trasero", DimensionsWeight),
    float("peso_trasero_kg", DimensionsWeight, "kg"),
    // Axles and drive
    boolean("differential_lock", AxlesDrive),
    text("drive_type", AxlesDrive),
    text("final_drives", AxlesDrive),
    // Electrical
    text("battery_volts", Electrical),
    float("battery_volts_v", Electrical, "V"),
    text("battery_group", Electrical),
    text("battery_AH", Electrical),
    float("battery_AH_num", Electrical, "A·h"),
    // Hitch and drawbar
    text("rear_type", HitchDrawbar),
    text("rear_lift_capacity", HitchDrawbar),
    float("rear_lift_capacity_kg", HitchDrawbar, "kg"),
    // Fuel and fluids
    text("fuel_tank_capacity", FuelFluids),
    float("fuel_tank_capacity_l", FuelFluids, "L"),
    // Mechatronics
    boolean("has_precision_agriculture", Mechatronics),
];

lazy_static! {
    static ref TRACTOR_SCHEMA: SchemaRegistry = SchemaRegistry::from_fields(TRACTOR_FIELDS);
}

/// Explicit lookup table of record fields, replacing runtime attribute checks
pub struct SchemaRegistry {
    fields: &'static [FieldDef],
    by_name: HashMap<&'static str, usize>,
}

impl SchemaRegistry {
    fn from_fields(fields: &'static [FieldDef]) -> Self {
        let by_name = fields
            .iter()
            .enumerate()
            .map(|(idx, f)| (f.name, idx))
            .collect();
        Self { fields, by_name }
    }

    /// The built-in tractor schema
    pub fn tractor() -> &'static SchemaRegistry {
        &TRACTOR_SCHEMA
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// True for columns that hold a raw extracted string
    pub fn is_text(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| f.kind == FieldKind::Text)
    }

    pub fn fields(&self) -> &[FieldDef] {
        self.fields
    }

    pub fn fields_in(&self, category: Category) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(move |f| f.category == category)
    }

    pub fn numeric_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.kind.is_numeric())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{rules, NumberKind};
    use std::collections::HashSet;

    #[test]
    fn test_field_names_are_unique() {
        let names: HashSet<_> = TRACTOR_FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), TRACTOR_FIELDS.len());
    }

    #[test]
    fn test_every_rule_maps_into_schema() {
        let schema = SchemaRegistry::tractor();
        for rule in rules() {
            assert!(schema.is_text(rule.variable), "{} is not a text field", rule.variable);

            let field = schema
                .field(rule.field)
                .unwrap_or_else(|| panic!("{} missing from schema", rule.field));
            let expected = match rule.number_kind() {
                NumberKind::Float => FieldKind::Float,
                NumberKind::Integer => FieldKind::Integer,
            };
            assert_eq!(field.kind, expected, "{}", rule.field);
            assert_eq!(field.category, schema.field(rule.variable).unwrap().category);
        }
    }

    #[test]
    fn test_lookups() {
        let schema = SchemaRegistry::tractor();
        assert!(schema.contains("torque_nm"));
        assert!(!schema.contains("warp_factor"));
        assert!(schema.is_text("torque"));
        assert!(!schema.is_text("torque_nm"));
        assert_eq!(
            schema.field("differential_lock").map(|f| f.kind),
            Some(FieldKind::Boolean)
        );
        assert_eq!(schema.field("rated_power_net_kw").and_then(|f| f.unit), Some("kW"));
    }

    #[test]
    fn test_category_filters() {
        let schema = SchemaRegistry::tractor();
        let electrical: Vec<_> = schema.fields_in(Category::Electrical).map(|f| f.name).collect();
        assert_eq!(
            electrical,
            vec!["battery_volts", "battery_volts_v", "battery_group", "battery_AH", "battery_AH_num"]
        );
        assert!(schema.numeric_fields().all(|f| f.kind.is_numeric()));
        assert!(schema.numeric_fields().any(|f| f.name == "rear_valves"));
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Hydraulics".parse::<Category>(), Ok(Category::Hydraulics));
        assert_eq!("dimensions_weight".parse::<Category>(), Ok(Category::DimensionsWeight));
        assert!("cabin".parse::<Category>().is_err());
    }
}
