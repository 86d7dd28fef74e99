//! The canonical feature model
//!
//! [`FeatureSet`] is what the resolver produces and what every later stage reads. It is a flat,
//! serializable record; once built it is only ever handed out by shared reference.

use crate::error::ScaffoldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported frameworks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Next,
    Vue,
}

impl Framework {
    pub const ALL: [Framework; 3] = [Framework::React, Framework::Next, Framework::Vue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Next => "next",
            Framework::Vue => "vue",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::React => "React",
            Framework::Next => "Next.js",
            Framework::Vue => "Vue",
        }
    }

    /// React and Next share the React component model
    pub fn is_react_family(&self) -> bool {
        matches!(self, Framework::React | Framework::Next)
    }
}

impl FromStr for Framework {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "react" | "vite" | "react-vite" => Ok(Framework::React),
            "next" | "nextjs" | "next.js" => Ok(Framework::Next),
            "vue" | "vue3" => Ok(Framework::Vue),
            other => Err(ScaffoldError::validation(
                "framework",
                format!("unsupported framework `{}` (expected react, next or vue)", other),
            )),
        }
    }
}

/// Source language of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ts,
    Js,
}

impl Language {
    /// Extension for plain modules (`ts` / `js`)
    pub fn module_ext(&self) -> &'static str {
        match self {
            Language::Ts => "ts",
            Language::Js => "js",
        }
    }

    /// Extension for component modules (`tsx` / `jsx`)
    pub fn component_ext(&self) -> &'static str {
        match self {
            Language::Ts => "tsx",
            Language::Js => "jsx",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Ts => "TypeScript",
            Language::Js => "JavaScript",
        }
    }
}

impl FromStr for Language {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ts" | "typescript" => Ok(Language::Ts),
            "js" | "javascript" => Ok(Language::Js),
            other => Err(ScaffoldError::validation(
                "language",
                format!("unsupported language `{}` (expected ts or js)", other),
            )),
        }
    }
}

/// Tailwind major version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Styling {
    #[serde(rename = "tailwind-v3")]
    TailwindV3,
    #[serde(rename = "tailwind-v4")]
    TailwindV4,
}

impl fmt::Display for Styling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Styling::TailwindV3 => write!(f, "v3"),
            Styling::TailwindV4 => write!(f, "v4"),
        }
    }
}

impl FromStr for Styling {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v3" | "3" | "tailwind-v3" | "tailwind3" => Ok(Styling::TailwindV3),
            "v4" | "4" | "tailwind-v4" | "tailwind4" => Ok(Styling::TailwindV4),
            other => Err(ScaffoldError::validation(
                "styling",
                format!("unsupported Tailwind version `{}` (expected v3 or v4)", other),
            )),
        }
    }
}

/// State-management library; exactly one is selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateManagement {
    None,
    Zustand,
    Redux,
    RtkQuery,
    ReactQuery,
    Swr,
    Context,
    Pinia,
}

impl StateManagement {
    /// Highest priority first
    pub const PRIORITY: [StateManagement; 8] = [
        StateManagement::Redux,
        StateManagement::RtkQuery,
        StateManagement::ReactQuery,
        StateManagement::Swr,
        StateManagement::Context,
        StateManagement::Zustand,
        StateManagement::Pinia,
        StateManagement::None,
    ];

    /// Config keys that toggle a single library on or off
    pub const FLAG_KEYS: [(&'static str, StateManagement); 7] = [
        ("redux", StateManagement::Redux),
        ("rtkQuery", StateManagement::RtkQuery),
        ("reactQuery", StateManagement::ReactQuery),
        ("swr", StateManagement::Swr),
        ("context", StateManagement::Context),
        ("zustand", StateManagement::Zustand),
        ("pinia", StateManagement::Pinia),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateManagement::None => "none",
            StateManagement::Zustand => "zustand",
            StateManagement::Redux => "redux",
            StateManagement::RtkQuery => "rtkQuery",
            StateManagement::ReactQuery => "reactQuery",
            StateManagement::Swr => "swr",
            StateManagement::Context => "context",
            StateManagement::Pinia => "pinia",
        }
    }

    /// Position in [`Self::PRIORITY`]; lower wins
    pub fn rank(&self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|s| s == self)
            .unwrap_or(Self::PRIORITY.len())
    }

    /// Libraries that only exist for the React component model
    pub fn is_react_only(&self) -> bool {
        !matches!(self, StateManagement::None | StateManagement::Pinia)
    }

    pub fn integration(&self) -> Option<IntegrationId> {
        match self {
            StateManagement::None => None,
            StateManagement::Zustand => Some(IntegrationId::Zustand),
            StateManagement::Redux => Some(IntegrationId::Redux),
            StateManagement::RtkQuery => Some(IntegrationId::RtkQuery),
            StateManagement::ReactQuery => Some(IntegrationId::ReactQuery),
            StateManagement::Swr => Some(IntegrationId::Swr),
            StateManagement::Context => Some(IntegrationId::Context),
            StateManagement::Pinia => Some(IntegrationId::Pinia),
        }
    }
}

impl fmt::Display for StateManagement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateManagement {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "none" | "" => Ok(StateManagement::None),
            "zustand" => Ok(StateManagement::Zustand),
            "redux" | "reduxtoolkit" | "rtk" => Ok(StateManagement::Redux),
            "rtkquery" => Ok(StateManagement::RtkQuery),
            "reactquery" | "tanstackquery" => Ok(StateManagement::ReactQuery),
            "swr" => Ok(StateManagement::Swr),
            "context" | "contextapi" => Ok(StateManagement::Context),
            "pinia" => Ok(StateManagement::Pinia),
            _ => Err(ScaffoldError::validation(
                "stateManagement",
                format!("unknown state-management library `{}`", s.trim()),
            )),
        }
    }
}

/// Component preset layered on top of Tailwind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiPreset {
    None,
    Shadcn,
}

impl FromStr for UiPreset {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(UiPreset::None),
            "shadcn" | "shadcn/ui" | "shadcn-ui" => Ok(UiPreset::Shadcn),
            other => Err(ScaffoldError::validation(
                "ui",
                format!("unknown UI preset `{}` (expected none or shadcn)", other),
            )),
        }
    }
}

/// Animation library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    Framer,
    Gsap,
}

impl Animation {
    pub const ALL: [Animation; 2] = [Animation::Framer, Animation::Gsap];

    pub fn as_str(&self) -> &'static str {
        match self {
            Animation::Framer => "framer",
            Animation::Gsap => "gsap",
        }
    }

    pub fn integration(&self) -> IntegrationId {
        match self {
            Animation::Framer => IntegrationId::Framer,
            Animation::Gsap => IntegrationId::Gsap,
        }
    }
}

impl FromStr for Animation {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "framer" | "framer-motion" | "motion" => Ok(Animation::Framer),
            "gsap" => Ok(Animation::Gsap),
            other => Err(ScaffoldError::validation(
                "animations",
                format!("unknown animation library `{}` (expected framer or gsap)", other),
            )),
        }
    }
}

/// A web font that can be wired into the generated stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSpec {
    pub key: &'static str,
    pub family: &'static str,
    pub weights: &'static [u16],
    pub category: &'static str,
}

pub const FONT_REGISTRY: &[FontSpec] = &[
    FontSpec {
        key: "inter",
        family: "Inter",
        weights: &[400, 500, 600, 700],
        category: "sans",
    },
    FontSpec {
        key: "poppins",
        family: "Poppins",
        weights: &[400, 500, 600, 700],
        category: "sans",
    },
    FontSpec {
        key: "space-grotesk",
        family: "Space Grotesk",
        weights: &[400, 500, 600, 700],
        category: "sans",
    },
    FontSpec {
        key: "dm-sans",
        family: "DM Sans",
        weights: &[400, 500, 700],
        category: "sans",
    },
    FontSpec {
        key: "playfair-display",
        family: "Playfair Display",
        weights: &[400, 500, 600, 700],
        category: "serif",
    },
];

pub fn find_font(key: &str) -> Option<&'static FontSpec> {
    FONT_REGISTRY.iter().find(|f| f.key == key)
}

/// Optional integrations tracked across re-runs against the same target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntegrationId {
    Zustand,
    Redux,
    RtkQuery,
    ReactQuery,
    Swr,
    Context,
    Pinia,
    Router,
    Shadcn,
    Framer,
    Gsap,
    Prettier,
}

impl IntegrationId {
    pub const ALL: [IntegrationId; 12] = [
        IntegrationId::Zustand,
        IntegrationId::Redux,
        IntegrationId::RtkQuery,
        IntegrationId::ReactQuery,
        IntegrationId::Swr,
        IntegrationId::Context,
        IntegrationId::Pinia,
        IntegrationId::Router,
        IntegrationId::Shadcn,
        IntegrationId::Framer,
        IntegrationId::Gsap,
        IntegrationId::Prettier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationId::Zustand => "zustand",
            IntegrationId::Redux => "redux",
            IntegrationId::RtkQuery => "rtkQuery",
            IntegrationId::ReactQuery => "reactQuery",
            IntegrationId::Swr => "swr",
            IntegrationId::Context => "context",
            IntegrationId::Pinia => "pinia",
            IntegrationId::Router => "router",
            IntegrationId::Shadcn => "shadcn",
            IntegrationId::Framer => "framer",
            IntegrationId::Gsap => "gsap",
            IntegrationId::Prettier => "prettier",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            IntegrationId::Zustand => "Zustand",
            IntegrationId::Redux => "Redux Toolkit",
            IntegrationId::RtkQuery => "RTK Query",
            IntegrationId::ReactQuery => "React Query",
            IntegrationId::Swr => "SWR",
            IntegrationId::Context => "Context API",
            IntegrationId::Pinia => "Pinia",
            IntegrationId::Router => "Router",
            IntegrationId::Shadcn => "shadcn/ui",
            IntegrationId::Framer => "Framer Motion",
            IntegrationId::Gsap => "GSAP",
            IntegrationId::Prettier => "Prettier",
        }
    }
}

impl fmt::Display for IntegrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical, validated configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    pub project_name: String,
    pub framework: Framework,
    pub language: Language,
    pub styling: Styling,
    pub state_management: StateManagement,
    pub router: bool,
    pub ui_preset: UiPreset,
    /// Selection order is kept; no duplicates
    pub animations: Vec<Animation>,
    pub prettier: bool,
    pub auto_start: bool,
    pub font: Option<String>,
}

impl FeatureSet {
    pub fn has_animation(&self, animation: Animation) -> bool {
        self.animations.contains(&animation)
    }

    pub fn is_selected(&self, id: IntegrationId) -> bool {
        match id {
            IntegrationId::Router => self.router,
            IntegrationId::Shadcn => self.ui_preset == UiPreset::Shadcn,
            IntegrationId::Framer => self.has_animation(Animation::Framer),
            IntegrationId::Gsap => self.has_animation(Animation::Gsap),
            IntegrationId::Prettier => self.prettier,
            state => self.state_management.integration() == Some(state),
        }
    }

    /// Selected optional integrations, in [`IntegrationId::ALL`] order
    pub fn integrations(&self) -> Vec<IntegrationId> {
        IntegrationId::ALL
            .iter()
            .copied()
            .filter(|id| self.is_selected(*id))
            .collect()
    }

    pub fn font_spec(&self) -> Option<&'static FontSpec> {
        self.font.as_deref().and_then(find_font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_framework_aliases() {
        assert_eq!("Next.js".parse::<Framework>().unwrap(), Framework::Next);
        assert_eq!("vite".parse::<Framework>().unwrap(), Framework::React);
        let err = "svelte".parse::<Framework>().unwrap_err();
        assert_eq!(err.field(), Some("framework"));
    }

    #[test]
    fn test_parse_state_management_spellings() {
        assert_eq!(
            "rtk-query".parse::<StateManagement>().unwrap(),
            StateManagement::RtkQuery
        );
        assert_eq!(
            "react_query".parse::<StateManagement>().unwrap(),
            StateManagement::ReactQuery
        );
        assert_eq!(
            "rtkQuery".parse::<StateManagement>().unwrap(),
            StateManagement::RtkQuery
        );
        assert!("mobx".parse::<StateManagement>().is_err());
    }

    #[test]
    fn test_priority_order() {
        assert!(StateManagement::Redux.rank() < StateManagement::RtkQuery.rank());
        assert!(StateManagement::Context.rank() < StateManagement::Zustand.rank());
        assert!(StateManagement::Zustand.rank() < StateManagement::None.rank());
        assert_eq!(StateManagement::None.rank(), StateManagement::PRIORITY.len() - 1);
    }

    #[test]
    fn test_styling_serializes_with_prefix() {
        let json = serde_json::to_string(&Styling::TailwindV4).unwrap();
        assert_eq!(json, "\"tailwind-v4\"");
    }

    #[test]
    fn test_font_registry_lookup() {
        assert_eq!(find_font("dm-sans").unwrap().family, "DM Sans");
        assert!(find_font("comic-sans").is_none());
    }
}
