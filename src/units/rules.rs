use crate::units::types::NumberKind;
use lazy_static::lazy_static;
use std::collections::HashMap;

// Conversion factors (imperial / alternative unit -> canonical unit)
pub const HP_TO_KW: f64 = 0.7457;
pub const LBS_FT_TO_NM: f64 = 1.35582;
pub const CC_TO_L: f64 = 0.001;
pub const GPM_TO_LPM: f64 = 3.78541;
pub const PSI_TO_BAR: f64 = 0.0689476;
pub const LBS_TO_KG: f64 = 0.453592;
pub const FEET_TO_M: f64 = 0.3048;
pub const GALLON_US_TO_L: f64 = 3.78541;
pub const INCH_TO_M: f64 = 0.0254;

/// A unit recognized by substring inside the lower-cased raw string
#[derive(Debug, Clone, Copy)]
pub struct UnitToken {
    /// Matches when any of these substrings is present...
    pub any_of: &'static [&'static str],
    /// ...and none of these is
    pub none_of: &'static [&'static str],
    /// Multiplier to the canonical unit
    pub factor: f64,
}

impl UnitToken {
    const fn new(any_of: &'static [&'static str], factor: f64) -> Self {
        Self {
            any_of,
            none_of: &[],
            factor,
        }
    }

    pub fn matches(&self, lowered: &str) -> bool {
        self.any_of.iter().any(|t| lowered.contains(t))
            && !self.none_of.iter().any(|t| lowered.contains(t))
    }
}

/// How the extracted number becomes a canonical value
#[derive(Debug, Clone, Copy)]
pub enum UnitPolicy {
    /// No unit ambiguity, the number is already canonical
    PassThrough(NumberKind),
    /// Tested in order, first match wins
    Tokens(&'static [UnitToken]),
}

/// Conversion rule for one variable of the extraction vocabulary
#[derive(Debug, Clone, Copy)]
pub struct ConversionRule {
    pub variable: &'static str,
    pub field: &'static str,
    pub unit: &'static str,
    pub policy: UnitPolicy,
}

impl ConversionRule {
    pub fn number_kind(&self) -> NumberKind {
        match self.policy {
            UnitPolicy::PassThrough(kind) => kind,
            UnitPolicy::Tokens(_) => NumberKind::Float,
        }
    }
}

const POWER: &[UnitToken] = &[UnitToken::new(&["kw"], 1.0), UnitToken::new(&["hp"], HP_TO_KW)];

const TORQUE: &[UnitToken] = &[
    UnitToken::new(&["nm"], 1.0),
    UnitToken::new(&["lbs-ft", "lb-ft"], LBS_FT_TO_NM),
];

const DISPLACEMENT: &[UnitToken] = &[
    UnitToken {
        any_of: &["l"],
        none_of: &["cc"],
        factor: 1.0,
    },
    UnitToken::new(&["cc", "cm³"], CC_TO_L),
];

const VOLUME: &[UnitToken] = &[
    UnitToken::new(&["l"], 1.0),
    UnitToken::new(&["gal"], GALLON_US_TO_L),
];

const FLOW: &[UnitToken] = &[
    UnitToken::new(&["lpm", "l/min"], 1.0),
    UnitToken::new(&["gpm"], GPM_TO_LPM),
];

const PRESSURE: &[UnitToken] = &[
    UnitToken::new(&["bar"], 1.0),
    UnitToken::new(&["psi"], PSI_TO_BAR),
];

const LENGTH: &[UnitToken] = &[
    UnitToken::new(&["m", "metros"], 1.0),
    UnitToken::new(&["ft", "pies"], FEET_TO_M),
    UnitToken::new(&["in", "pulgadas"], INCH_TO_M),
];

const MASS: &[UnitToken] = &[
    UnitToken::new(&["kg"], 1.0),
    UnitToken::new(&["lbs", "libras"], LBS_TO_KG),
];

// Lift capacity never listed the Spanish spelling
const LIFT_MASS: &[UnitToken] = &[UnitToken::new(&["kg"], 1.0), UnitToken::new(&["lbs"], LBS_TO_KG)];

const fn pass(
    variable: &'static str,
    field: &'static str,
    unit: &'static str,
    kind: NumberKind,
) -> ConversionRule {
    ConversionRule {
        variable,
        field,
        unit,
        policy: UnitPolicy::PassThrough(kind),
    }
}

const fn tokens(
    variable: &'static str,
    field: &'static str,
    unit: &'static str,
    tokens: &'static [UnitToken],
) -> ConversionRule {
    ConversionRule {
        variable,
        field,
        unit,
        policy: UnitPolicy::Tokens(tokens),
    }
}

/// Every conversion rule, grouped by spec sheet section
const RULES: &[ConversionRule] = &[
    // Engine
    pass("numero_de_cilindros", "numero_de_cilindros_num", "", NumberKind::Integer),
    tokens("displacement", "displacement_l", "L", DISPLACEMENT),
    pass("compression_ratio", "compression_ratio_num", "", NumberKind::Float),
    tokens("oil_capacity", "oil_capacity_l", "L", VOLUME),
    pass("starter_volts", "starter_volts_v", "V", NumberKind::Float),
    tokens("max_power_gross", "max_power_gross_kw", "kW", POWER),
    tokens("rated_power_net", "rated_power_net_kw", "kW", POWER),
    pass("rated_rpm", "rated_rpm_num", "rpm", NumberKind::Integer),
    tokens("torque", "torque_nm", "N·m", TORQUE),
    pass("torque_rpm", "torque_rpm_num", "rpm", NumberKind::Integer),
    // Hydraulics
    tokens("pump_flow", "pump_flow_lpm", "L/min", FLOW),
    tokens("rear_scv_flow", "rear_scv_flow_lpm", "L/min", FLOW),
    tokens("pressure", "pressure_bar", "bar", PRESSURE),
    tokens("capacity", "capacity_l", "L", VOLUME),
    // PTO
    pass("engine_rpm_at_pto", "engine_rpm_at_pto_num", "rpm", NumberKind::Integer),
    // Dimensions and weight
    tokens("length", "length_m", "m", LENGTH),
    tokens("width", "width_m", "m", LENGTH),
    tokens("height", "height_m", "m", LENGTH),
    tokens("height_rops", "height_rops_m", "m", LENGTH),
    tokens("wheelbase", "wheelbase_m", "m", LENGTH),
    tokens("ground_clearance", "ground_clearance_m", "m", LENGTH),
    tokens("axle_clearance_front", "axle_clearance_front_m", "m", LENGTH),
    tokens("axle_clearance_rear", "axle_clearance_rear_m", "m", LENGTH),
    tokens("shipping_weight", "shipping_weight_kg", "kg", MASS),
    tokens("ballasted_weight", "ballasted_weight_kg", "kg", MASS),
    tokens("max_weight", "max_weight_kg", "kg", MASS),
    tokens("peso_delantero", "peso_delantero_kg", "kg", MASS),
    tokens("peso_trasero", "peso_trasero_kg", "kg", MASS),
    // Electrical
    pass("battery_volts", "battery_volts_v", "V", NumberKind::Float),
    pass("battery_AH", "battery_AH_num", "A·h", NumberKind::Float),
    // Hitch and drawbar
    tokens("rear_lift_capacity", "rear_lift_capacity_kg", "kg", LIFT_MASS),
    // Fuel and fluids
    tokens("fuel_tank_capacity", "fuel_tank_capacity_l", "L", VOLUME),
];

lazy_static! {
    static ref RULES_BY_VARIABLE: HashMap<&'static str, &'static ConversionRule> =
        RULES.iter().map(|r| (r.variable, r)).collect();
}

/// Look up the conversion rule for a variable name
pub fn rule_for(variable_name: &str) -> Option<&'static ConversionRule> {
    RULES_BY_VARIABLE.get(variable_name).copied()
}

/// All conversion rules in declaration order
pub fn rules() -> &'static [ConversionRule] {
    RULES
}

/// Variable names that have a conversion rule
pub fn variables() -> impl Iterator<Item = &'static str> {
    RULES.iter().map(|r| r.variable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_variables_are_unique() {
        let names: HashSet<_> = variables().collect();
        assert_eq!(names.len(), RULES.len());
    }

    #[test]
    fn test_output_fields_are_unique() {
        let fields: HashSet<_> = RULES.iter().map(|r| r.field).collect();
        assert_eq!(fields.len(), RULES.len());
    }

    #[test]
    fn test_output_field_derives_from_variable() {
        for rule in RULES {
            assert!(
                rule.field.starts_with(rule.variable),
                "{} -> {}",
                rule.variable,
                rule.field
            );
        }
    }

    #[test]
    fn test_every_token_list_leads_with_identity() {
        for rule in RULES {
            if let UnitPolicy::Tokens(tokens) = rule.policy {
                assert_eq!(tokens[0].factor, 1.0, "{}", rule.variable);
            }
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(rule_for("torque").map(|r| r.field), Some("torque_nm"));
        assert!(rule_for("warp_factor").is_none());
        // Names are case-sensitive
        assert!(rule_for("battery_ah").is_none());
        assert!(rule_for("battery_AH").is_some());
    }

    #[test]
    fn test_displacement_litre_token_excludes_cc() {
        let litre = &DISPLACEMENT[0];
        assert!(litre.matches("9.0l"));
        assert!(!litre.matches("9000 cc (9.0 l)"));
        assert!(!litre.matches("9000 cm³"));
    }
}
