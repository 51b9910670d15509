//! Name tables shared by the merge steps.
//!
//! The remote service reports positions, regions and skills by localized
//! display name. Every name the merges key off lives here.

use rostersync_model::ArtifactSlot;

/// Artifact position name -> slot.
pub const ARTIFACT_POSITIONS: [(&str, ArtifactSlot); 5] = [
    ("生之花", ArtifactSlot::Flower),
    ("死之羽", ArtifactSlot::Plume),
    ("时之沙", ArtifactSlot::Sands),
    ("空之杯", ArtifactSlot::Goblet),
    ("理之冠", ArtifactSlot::Circlet),
];

/// Suffix stripped from raw stat keys.
pub const STAT_SUFFIX: &str = "_number";

/// Stripped stat key of the abyss counter. It is tracked elsewhere and never stored with stats.
pub const ABYSS_STAT_KEY: &str = "spiral_abyss";

/// How an exploration region name is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionRule {
    /// Bare parent region with no usable percentage.
    Skip,
    /// Sub-region reported under its parent's key.
    Rename(&'static str),
}

/// Region name -> rule. Names not listed map to themselves.
pub const REGION_RULES: [(&str, RegionRule); 2] = [
    ("层岩巨渊", RegionRule::Skip),
    ("层岩巨渊·地下矿区", RegionRule::Rename("层岩巨渊")),
];

/// Display-name fragment identifying the basic attack skill.
pub const BASIC_ATTACK_MARKER: &str = "普通攻击";

/// Skills with a max level at or above this are elemental skill or burst.
pub const UPGRADABLE_SKILL_MAX_LEVEL: u8 = 10;

/// Looks up the slot for an artifact position name.
pub fn artifact_slot(position_name: &str) -> Option<ArtifactSlot> {
    ARTIFACT_POSITIONS
        .iter()
        .find(|(name, _)| *name == position_name)
        .map(|(_, slot)| *slot)
}

/// Looks up the rule for an exploration region name.
pub fn region_rule(region_name: &str) -> Option<RegionRule> {
    REGION_RULES
        .iter()
        .find(|(name, _)| *name == region_name)
        .map(|(_, rule)| *rule)
}
