use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Ordinal risk tier assigned to an ingredient by the upstream classifier.
///
/// Ordering matters: `Green < Yellow < Orange < Red`, so `max()` over a
/// list yields the worst ingredient present.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Green,
    Yellow,
    Orange,
    Red,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Green => write!(f, "green"),
            RiskLevel::Yellow => write!(f, "yellow"),
            RiskLevel::Orange => write!(f, "orange"),
            RiskLevel::Red => write!(f, "red"),
        }
    }
}

impl RiskLevel {
    /// Parse a classifier label. Tolerates case and surrounding whitespace
    /// but rejects anything outside the four-value vocabulary -- a bad
    /// label is a contract violation, never silently defaulted.
    pub fn from_label(s: &str) -> Option<RiskLevel> {
        match s.trim().to_lowercase().as_str() {
            "green" => Some(RiskLevel::Green),
            "yellow" => Some(RiskLevel::Yellow),
            "orange" => Some(RiskLevel::Orange),
            "red" => Some(RiskLevel::Red),
            _ => None,
        }
    }
}

/// Why an ingredient carries its risk level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskReason {
    Carcinogen,
    Endocrine,
    Allergen,
    Irritant,
    Pollutant,
}

impl fmt::Display for RiskReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskReason::Carcinogen => write!(f, "carcinogen"),
            RiskReason::Endocrine => write!(f, "endocrine"),
            RiskReason::Allergen => write!(f, "allergen"),
            RiskReason::Irritant => write!(f, "irritant"),
            RiskReason::Pollutant => write!(f, "pollutant"),
        }
    }
}

impl RiskReason {
    pub fn from_label(s: &str) -> Option<RiskReason> {
        match s.trim().to_lowercase().as_str() {
            "carcinogen" => Some(RiskReason::Carcinogen),
            "endocrine" => Some(RiskReason::Endocrine),
            "allergen" => Some(RiskReason::Allergen),
            "irritant" => Some(RiskReason::Irritant),
            "pollutant" => Some(RiskReason::Pollutant),
            _ => None,
        }
    }

    /// Penalty class of this reason. Carcinogenic and endocrine-disrupting
    /// concerns carry the heavier penalty at every risk level.
    pub fn class(&self) -> ReasonClass {
        match self {
            RiskReason::Carcinogen | RiskReason::Endocrine => ReasonClass::Systemic,
            RiskReason::Allergen | RiskReason::Irritant | RiskReason::Pollutant => {
                ReasonClass::Local
            }
        }
    }
}

/// Penalty class: systemic (carcinogen/endocrine) vs local (everything
/// else, including an empty reason set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasonClass {
    Systemic,
    Local,
}

/// Controlled vocabulary for display grouping. Assigned upstream; the
/// scoring arithmetic never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientCategory {
    #[serde(rename = "Moisturizers & Hydrators")]
    MoisturizersHydrators,
    #[serde(rename = "Vitamins & Antioxidants")]
    VitaminsAntioxidants,
    #[serde(rename = "Soothing & Calming Agents")]
    SoothingCalmingAgents,
    #[serde(rename = "Natural Extracts & Oils")]
    NaturalExtractsOils,
    #[serde(rename = "Sun Protection")]
    SunProtection,
    #[serde(rename = "Skin Repair")]
    SkinRepair,
    #[serde(rename = "Fragrances & Scents")]
    FragrancesScents,
    #[serde(rename = "Preservatives & Stabilizers")]
    PreservativesStabilizers,
    #[serde(rename = "Harsh Cleansing Agents (Sulfates)")]
    HarshCleansingAgents,
    #[serde(rename = "Potential Allergens")]
    PotentialAllergens,
    #[serde(rename = "Silicones & Film Formers")]
    SiliconesFilmFormers,
    #[serde(rename = "Colorants & Dyes")]
    ColorantsDyes,
    #[serde(rename = "pH Adjusters & Buffers")]
    PhAdjustersBuffers,
}

impl IngredientCategory {
    /// All categories in fixed display order.
    pub const ALL: &'static [IngredientCategory] = &[
        IngredientCategory::MoisturizersHydrators,
        IngredientCategory::VitaminsAntioxidants,
        IngredientCategory::SoothingCalmingAgents,
        IngredientCategory::NaturalExtractsOils,
        IngredientCategory::SunProtection,
        IngredientCategory::SkinRepair,
        IngredientCategory::FragrancesScents,
        IngredientCategory::PreservativesStabilizers,
        IngredientCategory::HarshCleansingAgents,
        IngredientCategory::PotentialAllergens,
        IngredientCategory::SiliconesFilmFormers,
        IngredientCategory::ColorantsDyes,
        IngredientCategory::PhAdjustersBuffers,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IngredientCategory::MoisturizersHydrators => "Moisturizers & Hydrators",
            IngredientCategory::VitaminsAntioxidants => "Vitamins & Antioxidants",
            IngredientCategory::SoothingCalmingAgents => "Soothing & Calming Agents",
            IngredientCategory::NaturalExtractsOils => "Natural Extracts & Oils",
            IngredientCategory::SunProtection => "Sun Protection",
            IngredientCategory::SkinRepair => "Skin Repair",
            IngredientCategory::FragrancesScents => "Fragrances & Scents",
            IngredientCategory::PreservativesStabilizers => "Preservatives & Stabilizers",
            IngredientCategory::HarshCleansingAgents => "Harsh Cleansing Agents (Sulfates)",
            IngredientCategory::PotentialAllergens => "Potential Allergens",
            IngredientCategory::SiliconesFilmFormers => "Silicones & Film Formers",
            IngredientCategory::ColorantsDyes => "Colorants & Dyes",
            IngredientCategory::PhAdjustersBuffers => "pH Adjusters & Buffers",
        }
    }

    /// Case-insensitive match against the vocabulary. Unknown labels return
    /// `None`: the ingredient still scores, it just has no display group.
    pub fn from_label_loose(s: &str) -> Option<IngredientCategory> {
        let wanted = s.trim().to_lowercase();
        IngredientCategory::ALL
            .iter()
            .find(|c| c.label().to_lowercase() == wanted)
            .copied()
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Normalize an ingredient name for identity comparison: trim, lowercase,
/// collapse internal whitespace.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// One classified ingredient, validated and ready for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Name as delivered by the classifier (INCI or common name).
    pub name: String,
    /// Normalized identity key used for deduplication and ordering.
    pub normalized_name: String,
    pub risk_level: RiskLevel,
    pub risk_reasons: BTreeSet<RiskReason>,
    /// Display grouping category, if the classifier assigned a known one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<IngredientCategory>,
    /// Consumer-facing upside text (positive ingredients).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefit: Option<String>,
    /// Consumer-facing concern text (negative ingredients).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concern: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, risk_level: RiskLevel) -> Ingredient {
        let name = name.into();
        let normalized_name = normalize_name(&name);
        Ingredient {
            name,
            normalized_name,
            risk_level,
            risk_reasons: BTreeSet::new(),
            category: None,
            benefit: None,
            concern: None,
        }
    }

    pub fn with_reasons(mut self, reasons: impl IntoIterator<Item = RiskReason>) -> Ingredient {
        self.risk_reasons = reasons.into_iter().collect();
        self
    }

    pub fn with_category(mut self, category: IngredientCategory) -> Ingredient {
        self.category = Some(category);
        self
    }

    /// The single reason that drives this ingredient's penalty: a systemic
    /// reason wins over a local one, and within a class the enum order
    /// breaks ties deterministically.
    pub fn dominant_reason(&self) -> Option<RiskReason> {
        self.risk_reasons
            .iter()
            .find(|r| r.class() == ReasonClass::Systemic)
            .or_else(|| self.risk_reasons.iter().next())
            .copied()
    }

    /// Penalty class for this ingredient (empty reason set counts as local).
    pub fn reason_class(&self) -> ReasonClass {
        match self.dominant_reason() {
            Some(r) => r.class(),
            None => ReasonClass::Local,
        }
    }
}
