//! # Research Categories — Alias Table
//!
//! Defines the [`Category`] enum with the eight canonical research
//! categories, and the [`AliasTable`] that maps every spelling under which
//! a category may appear as a container key in a research document back to
//! its canonical key.
//!
//! Research documents are LLM-authored. The same category shows up as
//! `basic_info`, `"Basic Info"` or, for some categories, a shorter synonym
//! (`performance`, `market`). The field extractor treats any of these keys
//! at the top level as a transparent container rather than as a field.
//!
//! The table is built once and never mutated.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// A canonical research category.
///
/// Every `match` on this enum must be exhaustive, so adding a category
/// forces its alias list to be declared in [`Category::aliases`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Identity of the researched item (name, vendor, release date).
    BasicInfo,
    /// Architecture and technical characteristics.
    TechnicalFeatures,
    /// Benchmarks and measured performance.
    PerformanceMetrics,
    /// Milestones and historical significance.
    MilestoneSignificance,
    /// Pricing, licensing and commercial information.
    BusinessInfo,
    /// Competitors and surrounding ecosystem.
    CompetitionEcosystem,
    /// Version history.
    History,
    /// Target market and positioning.
    MarketPositioning,
}

impl Category {
    /// All categories, in declaration order.
    pub fn all() -> &'static [Category] {
        &[
            Self::BasicInfo,
            Self::TechnicalFeatures,
            Self::PerformanceMetrics,
            Self::MilestoneSignificance,
            Self::BusinessInfo,
            Self::CompetitionEcosystem,
            Self::History,
            Self::MarketPositioning,
        ]
    }

    /// The number of canonical categories.
    pub const COUNT: usize = 8;

    /// Canonical snake_case key of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BasicInfo => "basic_info",
            Self::TechnicalFeatures => "technical_features",
            Self::PerformanceMetrics => "performance_metrics",
            Self::MilestoneSignificance => "milestone_significance",
            Self::BusinessInfo => "business_info",
            Self::CompetitionEcosystem => "competition_ecosystem",
            Self::History => "history",
            Self::MarketPositioning => "market_positioning",
        }
    }

    /// Every key spelling accepted as a container for this category.
    /// Includes the canonical key itself.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::BasicInfo => &["basic_info", "Basic Info"],
            Self::TechnicalFeatures => &[
                "technical_features",
                "technical_characteristics",
                "Technical Features",
            ],
            Self::PerformanceMetrics => {
                &["performance_metrics", "performance", "Performance Metrics"]
            }
            Self::MilestoneSignificance => &[
                "milestone_significance",
                "milestones",
                "Milestone Significance",
            ],
            Self::BusinessInfo => &["business_info", "commercial_info", "Business Info"],
            Self::CompetitionEcosystem => &[
                "competition_ecosystem",
                "competition",
                "Competition Ecosystem",
            ],
            Self::History => &["history", "History"],
            Self::MarketPositioning => &["market_positioning", "market", "Market Positioning"],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable lookup from container-key spelling to canonical category key.
///
/// The built-in table is derived from [`Category::aliases`]. Callers that
/// work with a different category vocabulary build their own with
/// [`AliasTable::from_groups`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    by_alias: HashMap<String, String>,
}

impl AliasTable {
    /// The built-in table covering every [`Category`].
    pub fn builtin() -> &'static AliasTable {
        static BUILTIN: OnceLock<AliasTable> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            AliasTable::from_groups(
                Category::all()
                    .iter()
                    .map(|c| (c.as_str(), c.aliases().iter().copied())),
            )
        })
    }

    /// Build a table from `(canonical, aliases)` groups.
    ///
    /// If the same alias is listed under two canonical keys, the later
    /// group wins.
    pub fn from_groups<C, A, I>(groups: I) -> Self
    where
        I: IntoIterator<Item = (C, A)>,
        C: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        let mut by_alias = HashMap::new();
        for (canonical, aliases) in groups {
            let canonical = canonical.into();
            for alias in aliases {
                by_alias.insert(alias.into(), canonical.clone());
            }
        }
        Self { by_alias }
    }

    /// Returns true if `key` is a container spelling of some category.
    pub fn is_container(&self, key: &str) -> bool {
        self.by_alias.contains_key(key)
    }

    /// Canonical category key for an alias, if `key` is one.
    pub fn canonical(&self, key: &str) -> Option<&str> {
        self.by_alias.get(key).map(String::as_str)
    }

    /// Number of distinct alias spellings.
    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    /// Returns true if the table has no aliases.
    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }
}
