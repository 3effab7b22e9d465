use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Nutrients tracked for every ingredient and constraint.
///
/// The declaration order is also the storage order of [`NutrientValues`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NutrientKey {
    CrudeProtein,
    MetabolizableEnergy,
    Lysine,
    Methionine,
    Threonine,
    Calcium,
    AvailablePhosphorus,
    Sodium,
    LinoleicAcid,
    VitaminA,
    VitaminD3,
    VitaminE,
    Manganese,
    Zinc,
    Copper,
    Iron,
    Selenium,
}

/// Broad nutrient family, used for grouping in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NutrientGroup {
    Macro,
    Amino,
    Vitamin,
    Mineral,
}

impl NutrientKey {
    pub const COUNT: usize = 17;

    pub const ALL: [NutrientKey; NutrientKey::COUNT] = [
        NutrientKey::CrudeProtein,
        NutrientKey::MetabolizableEnergy,
        NutrientKey::Lysine,
        NutrientKey::Methionine,
        NutrientKey::Threonine,
        NutrientKey::Calcium,
        NutrientKey::AvailablePhosphorus,
        NutrientKey::Sodium,
        NutrientKey::LinoleicAcid,
        NutrientKey::VitaminA,
        NutrientKey::VitaminD3,
        NutrientKey::VitaminE,
        NutrientKey::Manganese,
        NutrientKey::Zinc,
        NutrientKey::Copper,
        NutrientKey::Iron,
        NutrientKey::Selenium,
    ];

    /// Position of this key inside a [`NutrientValues`] array.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn title(self) -> &'static str {
        match self {
            NutrientKey::CrudeProtein => "Crude Protein",
            NutrientKey::MetabolizableEnergy => "Metabolizable Energy",
            NutrientKey::Lysine => "Lysine",
            NutrientKey::Methionine => "Methionine",
            NutrientKey::Threonine => "Threonine",
            NutrientKey::Calcium => "Calcium",
            NutrientKey::AvailablePhosphorus => "Available Phosphorus",
            NutrientKey::Sodium => "Sodium",
            NutrientKey::LinoleicAcid => "Linoleic Acid",
            NutrientKey::VitaminA => "Vitamin A",
            NutrientKey::VitaminD3 => "Vitamin D3",
            NutrientKey::VitaminE => "Vitamin E",
            NutrientKey::Manganese => "Manganese",
            NutrientKey::Zinc => "Zinc",
            NutrientKey::Copper => "Copper",
            NutrientKey::Iron => "Iron",
            NutrientKey::Selenium => "Selenium",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            NutrientKey::CrudeProtein => "CP",
            NutrientKey::MetabolizableEnergy => "ME",
            NutrientKey::Lysine => "Lys",
            NutrientKey::Methionine => "Met",
            NutrientKey::Threonine => "Thr",
            NutrientKey::Calcium => "Ca",
            NutrientKey::AvailablePhosphorus => "AvP",
            NutrientKey::Sodium => "Na",
            NutrientKey::LinoleicAcid => "LinA",
            NutrientKey::VitaminA => "VitA",
            NutrientKey::VitaminD3 => "VitD3",
            NutrientKey::VitaminE => "VitE",
            NutrientKey::Manganese => "Mn",
            NutrientKey::Zinc => "Zn",
            NutrientKey::Copper => "Cu",
            NutrientKey::Iron => "Fe",
            NutrientKey::Selenium => "Se",
        }
    }

    /// Unit of the per-kg value stored for this nutrient.
    pub fn unit(self) -> &'static str {
        match self {
            NutrientKey::MetabolizableEnergy => "kcal/kg",
            NutrientKey::VitaminA | NutrientKey::VitaminD3 | NutrientKey::VitaminE => "IU/kg",
            NutrientKey::Manganese
            | NutrientKey::Zinc
            | NutrientKey::Copper
            | NutrientKey::Iron
            | NutrientKey::Selenium => "mg/kg",
            _ => "%",
        }
    }

    pub fn group(self) -> NutrientGroup {
        match self {
            NutrientKey::CrudeProtein
            | NutrientKey::MetabolizableEnergy
            | NutrientKey::Calcium
            | NutrientKey::AvailablePhosphorus
            | NutrientKey::Sodium
            | NutrientKey::LinoleicAcid => NutrientGroup::Macro,
            NutrientKey::Lysine | NutrientKey::Methionine | NutrientKey::Threonine => {
                NutrientGroup::Amino
            }
            NutrientKey::VitaminA | NutrientKey::VitaminD3 | NutrientKey::VitaminE => {
                NutrientGroup::Vitamin
            }
            NutrientKey::Manganese
            | NutrientKey::Zinc
            | NutrientKey::Copper
            | NutrientKey::Iron
            | NutrientKey::Selenium => NutrientGroup::Mineral,
        }
    }

    /// Display precision for achieved values.
    pub fn decimals(self) -> usize {
        match self.group() {
            NutrientGroup::Vitamin | NutrientGroup::Mineral => 0,
            _ if self == NutrientKey::MetabolizableEnergy => 0,
            _ => 2,
        }
    }
}

/// One value per [`NutrientKey`], stored as a fixed array.
///
/// Serialized as a map keyed by camelCase nutrient name; missing keys read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<NutrientKey, f64>", into = "BTreeMap<NutrientKey, f64>")]
pub struct NutrientValues([f64; NutrientKey::COUNT]);

impl NutrientValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, key: NutrientKey, value: f64) -> Self {
        self[key] = value;
        self
    }

    pub fn get(&self, key: NutrientKey) -> f64 {
        self.0[key.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (NutrientKey, f64)> + '_ {
        NutrientKey::ALL.iter().map(move |&key| (key, self.get(key)))
    }

    /// True when every stored value is a finite number.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Copy with NaN and infinite entries replaced by zero.
    pub fn sanitized(&self) -> Self {
        let mut out = *self;
        for value in out.0.iter_mut() {
            if !value.is_finite() {
                *value = 0.0;
            }
        }
        out
    }

    /// Accumulate `weight * other` into `self`.
    pub fn add_scaled(&mut self, other: &NutrientValues, weight: f64) {
        for (acc, value) in self.0.iter_mut().zip(other.0.iter()) {
            *acc += weight * value;
        }
    }
}

impl Index<NutrientKey> for NutrientValues {
    type Output = f64;

    fn index(&self, key: NutrientKey) -> &f64 {
        &self.0[key.index()]
    }
}

impl IndexMut<NutrientKey> for NutrientValues {
    fn index_mut(&mut self, key: NutrientKey) -> &mut f64 {
        &mut self.0[key.index()]
    }
}

impl From<BTreeMap<NutrientKey, f64>> for NutrientValues {
    fn from(map: BTreeMap<NutrientKey, f64>) -> Self {
        let mut values = NutrientValues::default();
        for (key, value) in map {
            values[key] = value;
        }
        values
    }
}

impl From<NutrientValues> for BTreeMap<NutrientKey, f64> {
    fn from(values: NutrientValues) -> Self {
        values.iter().filter(|(_, v)| *v != 0.0).collect()
    }
}

/// Achieved nutrient levels of a mix.
pub type NutrientProfile = NutrientValues;
