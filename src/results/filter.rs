use crate::model::RecipeCandidate;
use std::collections::BTreeSet;

/// Inclusive cooking-time bounds, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub min: u32,
    pub max: u32,
}

impl TimeRange {
    pub fn new(min: u32, max: u32) -> Self {
        TimeRange { min, max }
    }

    pub fn contains(&self, minutes: u32) -> bool {
        self.min <= minutes && minutes <= self.max
    }
}

/// Quick cooking-time filters offered next to the results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePreset {
    Under15,
    From15To30,
    From30To60,
    Over60,
}

impl TimePreset {
    pub fn range(&self) -> TimeRange {
        match self {
            TimePreset::Under15 => TimeRange::new(0, 15),
            TimePreset::From15To30 => TimeRange::new(15, 30),
            TimePreset::From30To60 => TimeRange::new(30, 60),
            TimePreset::Over60 => TimeRange::new(60, u32::MAX),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimePreset::Under15 => "Under 15 minutes",
            TimePreset::From15To30 => "15-30 minutes",
            TimePreset::From30To60 => "30-60 minutes",
            TimePreset::Over60 => "Over 60 minutes",
        }
    }

    pub fn all() -> [TimePreset; 4] {
        [
            TimePreset::Under15,
            TimePreset::From15To30,
            TimePreset::From30To60,
            TimePreset::Over60,
        ]
    }
}

/// User-chosen constraints on the fetched candidates.
///
/// Dimensions combine with AND; so do dietary tags (a recipe must carry every
/// requested tag). An absent range or empty tag set constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConstraints {
    pub time_range: Option<TimeRange>,
    pub dietary_tags: BTreeSet<String>,
}

impl FilterConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = Some(range);
        self
    }

    pub fn with_preset(self, preset: TimePreset) -> Self {
        self.with_time_range(preset.range())
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.insert_tag(tag);
        self
    }

    pub fn insert_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        !tag.is_empty() && self.dietary_tags.insert(tag)
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.dietary_tags.remove(&tag.trim().to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.time_range.is_none() && self.dietary_tags.is_empty()
    }

    pub fn matches(&self, recipe: &RecipeCandidate) -> bool {
        if let Some(range) = &self.time_range {
            if !range.contains(recipe.cooking_time_minutes) {
                return false;
            }
        }
        self.dietary_tags.iter().all(|tag| recipe.has_tag(tag))
    }
}

/// Keep the candidates satisfying `constraints`, in their original order.
pub fn apply_filters(
    candidates: &[RecipeCandidate],
    constraints: &FilterConstraints,
) -> Vec<RecipeCandidate> {
    candidates
        .iter()
        .filter(|recipe| constraints.matches(recipe))
        .cloned()
        .collect()
}
