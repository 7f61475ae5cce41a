use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Coarse classification of the current link, used to scale how much the
/// preloader fetches ahead and at what quality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConnectionClass {
    Slow,
    Medium,
    #[default]
    Fast,
}

impl ConnectionClass {
    pub const ALL: [Self; 3] = [Self::Slow, Self::Medium, Self::Fast];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionClass::Slow => "slow",
            ConnectionClass::Medium => "medium",
            ConnectionClass::Fast => "fast",
        }
    }
}

impl Display for ConnectionClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effective connection type as reported by network information APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectiveType {
    #[cfg_attr(feature = "serde", serde(rename = "slow-2g"))]
    Slow2g,
    #[cfg_attr(feature = "serde", serde(rename = "2g"))]
    TwoG,
    #[cfg_attr(feature = "serde", serde(rename = "3g"))]
    ThreeG,
    #[cfg_attr(feature = "serde", serde(rename = "4g"))]
    FourG,
}

impl EffectiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveType::Slow2g => "slow-2g",
            EffectiveType::TwoG => "2g",
            EffectiveType::ThreeG => "3g",
            EffectiveType::FourG => "4g",
        }
    }
}

impl Display for EffectiveType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectiveType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow-2g" | "slow2g" => Ok(EffectiveType::Slow2g),
            "2g" => Ok(EffectiveType::TwoG),
            "3g" => Ok(EffectiveType::ThreeG),
            "4g" => Ok(EffectiveType::FourG),
            other => Err(ModelError::UnknownEffectiveType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_type_parses_reported_labels() {
        assert_eq!("slow-2g".parse(), Ok(EffectiveType::Slow2g));
        assert_eq!(" 4G ".parse(), Ok(EffectiveType::FourG));
        assert_eq!("3g".parse(), Ok(EffectiveType::ThreeG));
        assert!("5g".parse::<EffectiveType>().is_err());
    }

    #[test]
    fn default_class_is_fast() {
        assert_eq!(ConnectionClass::default(), ConnectionClass::Fast);
    }
}
