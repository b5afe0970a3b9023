//! Outdoor activities and the scores that rate a location for each of them
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, str::FromStr};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// The fixed set of outdoor activities that a location can be rated for
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Activity {
    Hiking,
    Climbing,
    Biking,
    Skiing,
    Kayaking,
    Fishing,
    Hunting,
    Dogs,
}

impl Activity {
    /// A human-readable label for this activity, prefixed with an icon
    pub fn label(&self) -> &'static str {
        match self {
            Activity::Hiking => "🥾 Hiking",
            Activity::Climbing => "🧗 Climbing",
            Activity::Biking => "🚴 Biking",
            Activity::Skiing => "⛷️ Skiing",
            Activity::Kayaking => "🛶 Kayaking",
            Activity::Fishing => "🎣 Fishing",
            Activity::Hunting => "🏹 Hunting",
            Activity::Dogs => "🐶 Dogs",
        }
    }

    /// The names of all activities, separated by commas
    pub fn known_names() -> String {
        Self::iter()
            .map(|a| a.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// An integer rating from 1 to 5 of how good a location is for an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ActivityScore(u8);

impl ActivityScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a new score, failing if `value` is outside of the range
    /// [ActivityScore::MIN]..=[ActivityScore::MAX]
    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidActivityScore(value.into()))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The width of a score bar as a percentage of the full bar. The score is
    /// scaled linearly, so the maximum score fills the bar completely.
    pub fn bar_width(self) -> u8 {
        (u32::from(self.0) * 100 / u32::from(Self::MAX)) as u8
    }
}

impl TryFrom<u8> for ActivityScore {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActivityScore> for u8 {
    fn from(value: ActivityScore) -> Self {
        value.0
    }
}

impl std::fmt::Display for ActivityScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sparse mapping of activities to scores. An activity that is missing from
/// the map has no score, which is different from a low score.
pub type Activities = BTreeMap<Activity, ActivityScore>;

/// Parse an assignment of the form `hiking=4` into an activity and its score
pub fn parse_assignment(s: &str) -> Result<(Activity, ActivityScore)> {
    let (name, score) = s
        .split_once('=')
        .ok_or_else(|| Error::InvalidActivityAssignment(s.to_string()))?;
    let activity = Activity::from_str(name.trim())
        .map_err(|_| Error::UnknownActivity(name.trim().to_string()))?;
    let score: i64 = score
        .trim()
        .parse()
        .map_err(|_| Error::InvalidActivityAssignment(s.to_string()))?;
    let score = u8::try_from(score)
        .map_err(|_| Error::InvalidActivityScore(score))
        .and_then(ActivityScore::new)?;
    Ok((activity, score))
}
