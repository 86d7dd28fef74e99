//! Raw configuration sources as handed over by the collector
//!
//! Every source is a map from option name to [`ConfigValue`], using the same names whether
//! the value came from a flag, a prompt, a preset or a defaults file.

use super::preset::Preset;
use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical option names
pub mod keys {
    pub const NAME: &str = "name";
    pub const FRAMEWORK: &str = "framework";
    pub const LANGUAGE: &str = "language";
    pub const STYLING: &str = "styling";
    pub const STATE_MANAGEMENT: &str = "stateManagement";
    pub const ZUSTAND: &str = "zustand";
    pub const REDUX: &str = "redux";
    pub const RTK_QUERY: &str = "rtkQuery";
    pub const REACT_QUERY: &str = "reactQuery";
    pub const SWR: &str = "swr";
    pub const CONTEXT: &str = "context";
    pub const PINIA: &str = "pinia";
    pub const ROUTER: &str = "router";
    pub const UI: &str = "ui";
    pub const ANIMATIONS: &str = "animations";
    pub const FRAMER: &str = "framer";
    pub const GSAP: &str = "gsap";
    pub const AUTO_START: &str = "autoStart";
    pub const FONT: &str = "font";
    pub const PRETTIER: &str = "prettier";
}

/// A single option value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl ConfigValue {
    pub fn text(value: impl Into<String>) -> Self {
        ConfigValue::Text(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConfigValue::List(values.into_iter().map(Into::into).collect())
    }

    /// Interpret as a boolean; text spellings like `yes`/`off` are accepted
    pub fn as_bool(&self, field: &str) -> Result<bool> {
        match self {
            ConfigValue::Bool(b) => Ok(*b),
            ConfigValue::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "y" | "on" | "1" => Ok(true),
                "false" | "no" | "n" | "off" | "0" => Ok(false),
                other => Err(ScaffoldError::validation(
                    field,
                    format!("expected a boolean, got `{}`", other),
                )),
            },
            ConfigValue::List(_) => Err(ScaffoldError::validation(
                field,
                "expected a boolean, got a list",
            )),
        }
    }

    pub fn as_text(&self, field: &str) -> Result<&str> {
        match self {
            ConfigValue::Text(s) => Ok(s.as_str()),
            ConfigValue::Bool(_) => Err(ScaffoldError::validation(
                field,
                "expected a string, got a boolean",
            )),
            ConfigValue::List(_) => Err(ScaffoldError::validation(
                field,
                "expected a string, got a list",
            )),
        }
    }

    /// Interpret as a list; comma-separated text is split
    pub fn as_list(&self, field: &str) -> Result<Vec<String>> {
        match self {
            ConfigValue::List(items) => Ok(items
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()),
            ConfigValue::Text(s) => Ok(s
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect()),
            ConfigValue::Bool(_) => Err(ScaffoldError::validation(
                field,
                "expected a list, got a boolean",
            )),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

/// Option name to value, ordered so iteration never depends on insertion order
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// Everything the collector gathered for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfigSources {
    pub flags: ConfigMap,
    pub preset: Option<Preset>,
    pub interactive_answers: ConfigMap,
    pub defaults: ConfigMap,
}

impl RawConfigSources {
    pub fn with_flag(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.flags.insert(key.to_string(), value.into());
        self
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = Some(preset);
        self
    }

    pub fn with_answer(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.interactive_answers
            .insert(key.to_string(), value.into());
        self
    }

    pub fn with_default(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.defaults.insert(key.to_string(), value.into());
        self
    }

    /// True when the flags already decide `key` (directly or through an alias)
    pub fn flag_is_set(&self, key: &str) -> bool {
        mentions(&self.flags, key)
    }

    /// True when flags or the preset decide `key`; an interactive answer would be ignored
    pub fn is_decided(&self, key: &str) -> bool {
        self.flag_is_set(key)
            || self
                .preset
                .as_ref()
                .is_some_and(|preset| mentions(&preset.expand(), key))
    }
}

fn mentions(map: &ConfigMap, key: &str) -> bool {
    map.keys()
        .any(|k| canonical_key(k).map(|(c, _)| c) == Some(key))
}

/// How an alias value maps onto its canonical key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Alias {
    Same,
    /// `ts: true` → `language: ts`
    TsToggle,
    /// `shadcn: true` → `ui: shadcn`
    ShadcnToggle,
}

/// Resolve spelling variants to a canonical key
pub(crate) fn canonical_key(key: &str) -> Option<(&'static str, Alias)> {
    let key = match key {
        "name" | "projectName" | "project-name" => keys::NAME,
        "framework" => keys::FRAMEWORK,
        "language" | "lang" => keys::LANGUAGE,
        "ts" | "typescript" => return Some((keys::LANGUAGE, Alias::TsToggle)),
        "styling" | "tailwind" => keys::STYLING,
        "stateManagement" | "state-mgmt" | "stateMgmt" | "state" => keys::STATE_MANAGEMENT,
        "zustand" => keys::ZUSTAND,
        "redux" => keys::REDUX,
        "rtkQuery" | "rtk-query" => keys::RTK_QUERY,
        "reactQuery" | "react-query" => keys::REACT_QUERY,
        "swr" => keys::SWR,
        "context" => keys::CONTEXT,
        "pinia" => keys::PINIA,
        "router" => keys::ROUTER,
        "ui" | "uiPreset" | "ui-preset" => keys::UI,
        "shadcn" => return Some((keys::UI, Alias::ShadcnToggle)),
        "animations" | "anim" => keys::ANIMATIONS,
        "framer" => keys::FRAMER,
        "gsap" => keys::GSAP,
        "autoStart" | "auto-start" => keys::AUTO_START,
        "font" => keys::FONT,
        "prettier" | "pt" => keys::PRETTIER,
        _ => return None,
    };
    Some((key, Alias::Same))
}

/// One normalized source: canonical keys only, aliases folded in
#[derive(Debug, Clone, Default)]
pub(crate) struct Layer {
    pub(crate) label: &'static str,
    values: BTreeMap<&'static str, ConfigValue>,
}

impl Layer {
    pub(crate) fn new(label: &'static str, map: &ConfigMap) -> Result<Self> {
        let mut values = BTreeMap::new();
        // Canonical spellings win over aliases within the same source
        let mut aliased = Vec::new();
        for (raw_key, value) in map {
            let (key, alias) = canonical_key(raw_key).ok_or_else(|| {
                ScaffoldError::validation(raw_key.as_str(), "unknown option")
            })?;
            let value = match alias {
                Alias::Same => value.clone(),
                Alias::TsToggle => {
                    let ts = value.as_bool(raw_key)?;
                    ConfigValue::text(if ts { "ts" } else { "js" })
                }
                Alias::ShadcnToggle => {
                    let on = value.as_bool(raw_key)?;
                    ConfigValue::text(if on { "shadcn" } else { "none" })
                }
            };
            if alias == Alias::Same && raw_key == key {
                values.insert(key, value);
            } else {
                aliased.push((key, value));
            }
        }
        for (key, value) in aliased {
            values.entry(key).or_insert(value);
        }
        Ok(Self { label, values })
    }

    pub(crate) fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }
}
