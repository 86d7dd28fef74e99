//! Merge raw sources into a [`FeatureSet`]
//!
//! Precedence per option, highest first: flags, preset, interactive answers, defaults file,
//! built-in defaults. After the merge an invariant pass runs, in this order:
//!
//! 1. state-management exclusivity (fixed priority table)
//! 2. framework-forced overrides (Vue, Next)
//! 3. UI-preset compatibility (shadcn pins Tailwind v3)
//!
//! Resolution is a pure function of its input: no environment, clock or filesystem reads.

use super::sources::{keys, ConfigMap, ConfigValue, Layer, RawConfigSources};
use crate::error::{Result, ScaffoldError, Warning};
use crate::features::{
    find_font, Animation, FeatureSet, Framework, Language, StateManagement, Styling, UiPreset,
    FONT_REGISTRY,
};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Name used when no source provides one
pub const DEFAULT_PROJECT_NAME: &str = "my-frontend-app";

/// npm refuses package names longer than this
const MAX_NAME_LEN: usize = 214;

/// Resolver output: the feature set plus everything that was silently adjusted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub features: FeatureSet,
    pub warnings: Vec<Warning>,
}

fn builtin_defaults() -> ConfigMap {
    let mut map = ConfigMap::new();
    map.insert(keys::NAME.into(), ConfigValue::text(DEFAULT_PROJECT_NAME));
    map.insert(keys::FRAMEWORK.into(), ConfigValue::text("react"));
    map.insert(keys::LANGUAGE.into(), ConfigValue::text("js"));
    map.insert(keys::STYLING.into(), ConfigValue::text("v3"));
    map.insert(keys::ROUTER.into(), ConfigValue::Bool(false));
    map.insert(keys::UI.into(), ConfigValue::text("none"));
    map.insert(keys::ANIMATIONS.into(), ConfigValue::List(Vec::new()));
    map.insert(keys::PRETTIER.into(), ConfigValue::Bool(true));
    map.insert(keys::AUTO_START.into(), ConfigValue::Bool(false));
    map
}

/// Sources in precedence order
struct Layers(Vec<Layer>);

impl Layers {
    fn build(sources: &RawConfigSources) -> Result<Self> {
        let preset = sources.preset.map(|p| p.expand()).unwrap_or_default();
        Ok(Self(vec![
            Layer::new("flags", &sources.flags)?,
            Layer::new("preset", &preset)?,
            Layer::new("interactive", &sources.interactive_answers)?,
            Layer::new("defaults", &sources.defaults)?,
            Layer::new("built-in", &builtin_defaults())?,
        ]))
    }

    /// First value for `key`, with the label of the source it came from
    fn lookup(&self, key: &str) -> Option<(&'static str, &ConfigValue)> {
        self.0
            .iter()
            .find_map(|layer| layer.get(key).map(|v| (layer.label, v)))
    }

    fn text(&self, key: &str) -> Result<Option<String>> {
        match self.lookup(key) {
            Some((source, value)) => {
                let text = value.as_text(key)?.trim().to_string();
                debug!(field = key, source, value = %text, "resolved option");
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    fn flag(&self, key: &str) -> Result<bool> {
        match self.lookup(key) {
            Some((source, value)) => {
                let on = value.as_bool(key)?;
                debug!(field = key, source, value = on, "resolved option");
                Ok(on)
            }
            None => Ok(false),
        }
    }

    fn parsed<T: std::str::FromStr<Err = ScaffoldError>>(&self, key: &str) -> Result<T> {
        let text = self
            .text(key)?
            .ok_or_else(|| ScaffoldError::validation(key, "no value provided"))?;
        text.parse::<T>().map_err(|e| match e {
            // Report under the option name the user actually typed
            ScaffoldError::Validation { message, .. } => ScaffoldError::validation(key, message),
            other => other,
        })
    }
}

/// Merge `sources` into a validated [`FeatureSet`]
pub fn resolve(sources: &RawConfigSources) -> Result<Resolved> {
    let layers = Layers::build(sources)?;
    let mut warnings = Vec::new();

    let project_name = layers
        .text(keys::NAME)?
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());
    validate_project_name(&project_name)?;

    let framework: Framework = layers.parsed(keys::FRAMEWORK)?;
    let language: Language = layers.parsed(keys::LANGUAGE)?;
    let mut styling: Styling = layers.parsed(keys::STYLING)?;
    let mut ui_preset: UiPreset = layers.parsed(keys::UI)?;
    let mut router = layers.flag(keys::ROUTER)?;
    let prettier = layers.flag(keys::PRETTIER)?;
    let auto_start = layers.flag(keys::AUTO_START)?;
    let mut animations = resolve_animations(&layers)?;
    let font = resolve_font(&layers)?;

    // (a) exclusivity
    let mut state_management = resolve_state(&layers, default_state(framework), &mut warnings)?;

    // (b) framework-forced overrides
    match framework {
        Framework::Vue => {
            if state_management.is_react_only() {
                warnings.push(Warning::UnsupportedCombination {
                    feature: state_management.as_str().to_string(),
                    framework,
                });
                state_management = StateManagement::Pinia;
            }
            if animations.contains(&Animation::Framer) {
                warnings.push(Warning::UnsupportedCombination {
                    feature: Animation::Framer.as_str().to_string(),
                    framework,
                });
                animations.retain(|a| *a != Animation::Framer);
            }
            if ui_preset == UiPreset::Shadcn {
                warnings.push(Warning::UnsupportedCombination {
                    feature: "shadcn".to_string(),
                    framework,
                });
                ui_preset = UiPreset::None;
            }
            if styling == Styling::TailwindV4 {
                warnings.push(Warning::StylingDowngraded {
                    requested: styling,
                    reason: "Vue projects are scaffolded with Tailwind v3".to_string(),
                });
                styling = Styling::TailwindV3;
            }
        }
        Framework::React | Framework::Next => {
            if state_management == StateManagement::Pinia {
                warnings.push(Warning::UnsupportedCombination {
                    feature: StateManagement::Pinia.as_str().to_string(),
                    framework,
                });
                state_management = StateManagement::None;
            }
            if framework == Framework::Next && router {
                warnings.push(Warning::UnsupportedCombination {
                    feature: "react-router".to_string(),
                    framework,
                });
                router = false;
            }
        }
    }

    // (c) UI preset compatibility
    if ui_preset == UiPreset::Shadcn && styling == Styling::TailwindV4 {
        warnings.push(Warning::StylingDowngraded {
            requested: styling,
            reason: "shadcn/ui requires Tailwind v3".to_string(),
        });
        styling = Styling::TailwindV3;
    }

    let features = FeatureSet {
        project_name,
        framework,
        language,
        styling,
        state_management,
        router,
        ui_preset,
        animations,
        prettier,
        auto_start,
        font,
    };
    for warning in &warnings {
        warn!(%warning, "configuration adjusted");
    }
    debug!(?features, warnings = warnings.len(), "resolution complete");

    Ok(Resolved { features, warnings })
}

/// Built-in state library when no source picks one
fn default_state(framework: Framework) -> StateManagement {
    match framework {
        Framework::Vue => StateManagement::Pinia,
        Framework::React | Framework::Next => StateManagement::Zustand,
    }
}

/// Walk sources in precedence order; the first one that selects a (non-vetoed) library decides
fn resolve_state(
    layers: &Layers,
    fallback: StateManagement,
    warnings: &mut Vec<Warning>,
) -> Result<StateManagement> {
    let mut vetoed: BTreeSet<StateManagement> = BTreeSet::new();

    for layer in &layers.0 {
        let mut selected: BTreeSet<StateManagement> = BTreeSet::new();
        let mut negated: BTreeSet<StateManagement> = BTreeSet::new();

        if let Some(value) = layer.get(keys::STATE_MANAGEMENT) {
            let choice: StateManagement = value.as_text(keys::STATE_MANAGEMENT)?.parse()?;
            selected.insert(choice);
        }
        for (key, state) in StateManagement::FLAG_KEYS {
            if let Some(value) = layer.get(key) {
                if value.as_bool(key)? {
                    selected.insert(state);
                } else {
                    negated.insert(state);
                }
            }
        }

        let candidates: Vec<StateManagement> = selected
            .into_iter()
            .filter(|s| !vetoed.contains(s))
            .collect();
        if !candidates.is_empty() {
            let winner = pick_by_priority(&candidates)?;
            let discarded: Vec<StateManagement> = candidates
                .iter()
                .copied()
                .filter(|s| *s != winner && *s != StateManagement::None)
                .collect();
            if !discarded.is_empty() {
                warnings.push(Warning::StateConflictResolved {
                    selected: winner,
                    discarded,
                });
            }
            debug!(source = layer.label, state = %winner, "resolved state management");
            return Ok(winner);
        }
        vetoed.extend(negated);
    }

    if vetoed.contains(&fallback) {
        return Ok(StateManagement::None);
    }
    debug!(state = %fallback, "state management from built-in default");
    Ok(fallback)
}

fn pick_by_priority(candidates: &[StateManagement]) -> Result<StateManagement> {
    candidates
        .iter()
        .copied()
        .min_by_key(|s| s.rank())
        .ok_or_else(|| {
            ScaffoldError::conflict(
                keys::STATE_MANAGEMENT,
                "priority table could not choose between the selected libraries",
            )
        })
}

/// Each library is decided independently; order follows the highest-precedence list
fn resolve_animations(layers: &Layers) -> Result<Vec<Animation>> {
    let mut order: Option<Vec<Animation>> = None;
    let mut enabled: BTreeSet<Animation> = BTreeSet::new();

    for animation in Animation::ALL {
        for layer in &layers.0 {
            if let Some(value) = layer.get(animation.as_str()) {
                if value.as_bool(animation.as_str())? {
                    enabled.insert(animation);
                }
                break;
            }
            if let Some(value) = layer.get(keys::ANIMATIONS) {
                let listed = parse_animation_list(value)?;
                if listed.contains(&animation) {
                    enabled.insert(animation);
                }
                break;
            }
        }
    }

    for layer in &layers.0 {
        if let Some(value) = layer.get(keys::ANIMATIONS) {
            order = Some(parse_animation_list(value)?);
            break;
        }
    }

    let mut result: Vec<Animation> = Vec::new();
    for animation in order.unwrap_or_default().into_iter().chain(Animation::ALL) {
        if enabled.contains(&animation) && !result.contains(&animation) {
            result.push(animation);
        }
    }
    Ok(result)
}

fn parse_animation_list(value: &ConfigValue) -> Result<Vec<Animation>> {
    value
        .as_list(keys::ANIMATIONS)?
        .iter()
        .filter(|s| !s.eq_ignore_ascii_case("none"))
        .map(|s| s.parse::<Animation>())
        .collect()
}

fn resolve_font(layers: &Layers) -> Result<Option<String>> {
    let Some(raw) = layers.text(keys::FONT)? else {
        return Ok(None);
    };
    let key = raw.to_lowercase().replace(' ', "-");
    if key.is_empty() || key == "none" {
        return Ok(None);
    }
    if find_font(&key).is_none() {
        let known: Vec<&str> = FONT_REGISTRY.iter().map(|f| f.key).collect();
        return Err(ScaffoldError::validation(
            keys::FONT,
            format!("unknown font `{}` (available: {})", raw, known.join(", ")),
        ));
    }
    Ok(Some(key))
}

/// The project name becomes a directory name and the npm package name
pub fn validate_project_name(name: &str) -> Result<()> {
    let reject = |message: &str| -> Result<()> {
        Err(ScaffoldError::validation(keys::NAME, message))
    };

    if name.trim().is_empty() {
        return reject("project name must not be empty");
    }
    if name == "." || name == ".." {
        return reject("project name must name a new directory, not `.` or `..`");
    }
    if name.len() > MAX_NAME_LEN {
        return reject("project name is longer than 214 characters");
    }
    if name.contains('/') || name.contains('\\') {
        return reject("project name must be a single path segment");
    }
    if name.chars().any(|c| c.is_control()) {
        return reject("project name contains control characters");
    }
    if name.starts_with('-') || name.starts_with('.') {
        return reject("project name must not start with `-` or `.`");
    }
    Ok(())
}
