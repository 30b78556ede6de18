//! Vehicle-type checklist templates.
//!
//! Each vehicle type gets a fixed catalog: a general inspection list plus
//! a tire-position list matching its axle configuration. The two are
//! concatenated to form the full template for a job.

use serde::{Deserialize, Serialize};

/// General inspection points per vehicle type.
const GENERAL_CAR: &[&str] = &[
    "Lights (Head/Tail/Brake)",
    "Wipers & Washers",
    "Horn",
    "Brake Pads/Rotors",
    "Fluid Levels",
    "Battery Health",
    "Belts & Hoses",
    "Suspension Components",
    "Exhaust System",
    "Clutch / Transmission",
    "Dashboard Warning Lights",
];

const GENERAL_HEAVY_TRUCK: &[&str] = &[
    "Air Brake System (Leak Down)",
    "Air Lines / Gladhands",
    "Kingpin / 5th Wheel Lock",
    "Springs / Air Bags",
    "Steering Linkage",
    "Lights & Reflectors",
    "Fluid Levels (Oil/Coolant/DEF)",
    "Clutch / Transmission",
    "Belts & Hoses",
    "Exhaust / DPF",
    "Mudflaps",
    "City Horn / Air Horn",
    "Fire Extinguisher / Triangles",
];

const GENERAL_TRAILER: &[&str] = &[
    "Gladhands / Seals",
    "Landing Gear / Crank",
    "Floor / Decking Condition",
    "Side Panels / Roof",
    "Lights / Markers / ABS Light",
    "Air Lines / Hoses",
    "Brake Shoes / Drums",
    "Slack Adjusters",
    "Springs / Air Bags",
    "Mudflaps",
    "ICC Bar / Bumper",
];

/// Tire positions per axle configuration.
const TIRES_CAR: &[&str] = &[
    "LF (Left Front)",
    "RF (Right Front)",
    "LR (Left Rear)",
    "RR (Right Rear)",
    "Spare",
];

const TIRES_HEAVY_TRUCK: &[&str] = &[
    "LF (Steer)",
    "RF (Steer)",
    "1LRO",
    "1LRI",
    "1RRI",
    "1RRO",
    "2LRO",
    "2LRI",
    "2RRI",
    "2RRO",
    "3LRO",
    "3LRI",
    "3RRI",
    "3RRO",
];

const TIRES_TRAILER: &[&str] = &[
    "1LRO", "1LRI", "1RRI", "1RRO", "2LRO", "2LRI", "2RRI", "2RRO", "3LRO", "3LRI", "3RRI", "3RRO",
];

/// Vehicle type as stored on the vehicle record.
///
/// Unrecognized or missing values fall back to `Car`, matching how the
/// intake screens treat vehicles created before the type field existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    #[default]
    Car,
    HeavyTruck,
    Trailer,
}

impl VehicleType {
    /// Parses the stored string form, defaulting to `Car`.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("heavy_truck") => Self::HeavyTruck,
            Some("trailer") => Self::Trailer,
            Some("car") | Some(_) | None => Self::Car,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::HeavyTruck => "heavy_truck",
            Self::Trailer => "trailer",
        }
    }

    /// General inspection points for this vehicle type.
    pub fn general_points(&self) -> &'static [&'static str] {
        match self {
            Self::Car => GENERAL_CAR,
            Self::HeavyTruck => GENERAL_HEAVY_TRUCK,
            Self::Trailer => GENERAL_TRAILER,
        }
    }

    /// Tire positions for this vehicle type's axle configuration.
    pub fn tire_points(&self) -> &'static [&'static str] {
        match self {
            Self::Car => TIRES_CAR,
            Self::HeavyTruck => TIRES_HEAVY_TRUCK,
            Self::Trailer => TIRES_TRAILER,
        }
    }

    /// The full template: general points followed by tire positions.
    pub fn template_points(&self) -> Vec<&'static str> {
        let mut points = Vec::with_capacity(self.general_points().len() + self.tire_points().len());
        points.extend_from_slice(self.general_points());
        points.extend_from_slice(self.tire_points());
        points
    }
}

/// Whether a point name is a tire position for any vehicle type.
///
/// Report rendering splits tires from general items by name because the
/// stored checklist is a flat map with no per-point kind tag.
pub fn is_tire_point(name: &str) -> bool {
    TIRES_CAR.contains(&name) || TIRES_HEAVY_TRUCK.contains(&name) || TIRES_TRAILER.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stored_known_types() {
        assert_eq!(VehicleType::from_stored(Some("car")), VehicleType::Car);
        assert_eq!(
            VehicleType::from_stored(Some("heavy_truck")),
            VehicleType::HeavyTruck
        );
        assert_eq!(
            VehicleType::from_stored(Some("trailer")),
            VehicleType::Trailer
        );
    }

    #[test]
    fn test_from_stored_defaults_to_car() {
        assert_eq!(VehicleType::from_stored(None), VehicleType::Car);
        assert_eq!(VehicleType::from_stored(Some("")), VehicleType::Car);
        assert_eq!(VehicleType::from_stored(Some("boat")), VehicleType::Car);
    }

    #[test]
    fn test_template_concatenates_general_then_tires() {
        let points = VehicleType::HeavyTruck.template_points();
        assert_eq!(points[0], "Air Brake System (Leak Down)");
        assert_eq!(
            points.len(),
            GENERAL_HEAVY_TRUCK.len() + TIRES_HEAVY_TRUCK.len()
        );
        assert_eq!(points.last(), Some(&"3RRO"));
    }

    #[test]
    fn test_templates_have_no_duplicate_points() {
        for vt in [VehicleType::Car, VehicleType::HeavyTruck, VehicleType::Trailer] {
            let points = vt.template_points();
            let mut seen = std::collections::HashSet::new();
            for p in &points {
                assert!(seen.insert(*p), "duplicate point {p:?} for {vt:?}");
            }
        }
    }

    #[test]
    fn test_is_tire_point() {
        assert!(is_tire_point("Spare"));
        assert!(is_tire_point("1LRO"));
        assert!(is_tire_point("LF (Steer)"));
        assert!(!is_tire_point("Horn"));
        assert!(!is_tire_point("Air Brake System (Leak Down)"));
    }

    #[test]
    fn test_vehicle_type_serde_round_trip() {
        let json = serde_json::to_string(&VehicleType::HeavyTruck).unwrap();
        assert_eq!(json, "\"heavy_truck\"");
        let back: VehicleType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, VehicleType::HeavyTruck);
    }
}
