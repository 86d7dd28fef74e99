//! Named feature bundles

use super::sources::{keys, ConfigMap, ConfigValue};
use crate::error::ScaffoldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A preset expands to several option values at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Minimal,
    Full,
    Animation,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Minimal, Preset::Full, Preset::Animation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Minimal => "minimal",
            Preset::Full => "full",
            Preset::Animation => "animation",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Preset::Minimal => "Framework + Tailwind only",
            Preset::Full => "TypeScript, Redux Toolkit, router, shadcn/ui, Framer Motion and GSAP",
            Preset::Animation => "Framer Motion and GSAP demos",
        }
    }

    /// Option values this preset implies
    pub fn expand(&self) -> ConfigMap {
        let mut map = ConfigMap::new();
        let mut set = |key: &str, value: ConfigValue| {
            map.insert(key.to_string(), value);
        };
        match self {
            Preset::Minimal => {
                set(keys::STATE_MANAGEMENT, ConfigValue::text("none"));
                set(keys::ROUTER, ConfigValue::Bool(false));
                set(keys::UI, ConfigValue::text("none"));
                set(keys::ANIMATIONS, ConfigValue::List(Vec::new()));
                set(keys::PRETTIER, ConfigValue::Bool(false));
            }
            Preset::Full => {
                set(keys::LANGUAGE, ConfigValue::text("ts"));
                set(keys::REDUX, ConfigValue::Bool(true));
                set(keys::ROUTER, ConfigValue::Bool(true));
                set(keys::UI, ConfigValue::text("shadcn"));
                set(keys::ANIMATIONS, ConfigValue::list(["framer", "gsap"]));
                set(keys::PRETTIER, ConfigValue::Bool(true));
            }
            Preset::Animation => {
                set(keys::ANIMATIONS, ConfigValue::list(["framer", "gsap"]));
            }
        }
        map
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minimal" | "min" => Ok(Preset::Minimal),
            "full" => Ok(Preset::Full),
            "animation" | "animations" => Ok(Preset::Animation),
            other => Err(ScaffoldError::validation(
                "preset",
                format!("unknown preset `{}` (expected minimal, full or animation)", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_implies_redux() {
        let map = Preset::Full.expand();
        assert_eq!(map.get(keys::REDUX), Some(&ConfigValue::Bool(true)));
        assert_eq!(map.get(keys::UI), Some(&ConfigValue::text("shadcn")));
    }

    #[test]
    fn test_minimal_turns_everything_off() {
        let map = Preset::Minimal.expand();
        assert_eq!(
            map.get(keys::STATE_MANAGEMENT),
            Some(&ConfigValue::text("none"))
        );
        assert_eq!(map.get(keys::ANIMATIONS), Some(&ConfigValue::List(vec![])));
    }

    #[test]
    fn test_unknown_preset() {
        let err = "kitchen-sink".parse::<Preset>().unwrap_err();
        assert_eq!(err.field(), Some("preset"));
    }
}
