//! Property-based tests for resolution, planning and composition
//!
//! These tests verify:
//! - Resolution is deterministic down to the serialized bytes
//! - Exactly one state library survives, and it fits the framework
//! - Framework and UI-preset overrides always hold
//! - Plans are sorted and free of duplicates; provider layers never invert

use bawo_core::compose::compose;
use bawo_core::config::{ConfigMap, ConfigValue, Preset, RawConfigSources};
use bawo_core::features::{Framework, IntegrationId, StateManagement, Styling, UiPreset};
use bawo_core::{planner, resolve};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn text(choices: &'static [&'static str]) -> impl Strategy<Value = ConfigValue> {
    prop::sample::select(choices).prop_map(|s| ConfigValue::text(s))
}

fn flag() -> impl Strategy<Value = ConfigValue> {
    any::<bool>().prop_map(ConfigValue::Bool)
}

fn animations() -> impl Strategy<Value = ConfigValue> {
    prop::sample::subsequence(vec!["gsap", "framer"], 0..=2)
        .prop_shuffle()
        .prop_map(|v| ConfigValue::list(v))
}

/// One source with a random subset of options set to valid values
fn layer() -> impl Strategy<Value = ConfigMap> {
    let entries = (
        (
            prop::option::of(text(&["react", "next", "vue"])),
            prop::option::of(text(&["js", "ts"])),
            prop::option::of(text(&["v3", "v4"])),
            prop::option::of(text(&[
                "none",
                "zustand",
                "redux",
                "rtkQuery",
                "reactQuery",
                "swr",
                "context",
                "pinia",
            ])),
            prop::option::of(flag()),
            prop::option::of(flag()),
            prop::option::of(flag()),
        ),
        (
            prop::option::of(flag()),
            prop::option::of(text(&["none", "shadcn"])),
            prop::option::of(animations()),
            prop::option::of(flag()),
            prop::option::of(flag()),
            prop::option::of(text(&["none", "inter", "Playfair Display"])),
            prop::option::of(flag()),
        ),
    );
    entries.prop_map(|(a, b)| {
        let keyed = [
            ("framework", a.0),
            ("language", a.1),
            ("styling", a.2),
            ("stateManagement", a.3),
            ("redux", a.4),
            ("zustand", a.5),
            ("pinia", a.6),
            ("router", b.0),
            ("ui", b.1),
            ("animations", b.2),
            ("gsap", b.3),
            ("framer", b.4),
            ("font", b.5),
            ("prettier", b.6),
        ];
        keyed
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
            .collect()
    })
}

fn preset() -> impl Strategy<Value = Option<Preset>> {
    prop::option::of(prop::sample::select(Preset::ALL.to_vec()))
}

fn sources() -> impl Strategy<Value = RawConfigSources> {
    (layer(), preset(), layer(), layer()).prop_map(|(flags, preset, answers, defaults)| {
        RawConfigSources {
            flags,
            preset,
            interactive_answers: answers,
            defaults,
        }
    })
}

// =============================================================================
// Resolver
// =============================================================================

proptest! {
    /// Resolving the same sources twice gives byte-identical feature sets
    #[test]
    fn resolution_is_deterministic(s in sources()) {
        let first = resolve(&s).expect("valid sources resolve");
        let second = resolve(&s).expect("valid sources resolve");
        prop_assert_eq!(&first.features, &second.features);
        prop_assert_eq!(
            serde_json::to_string(&first.features).unwrap(),
            serde_json::to_string(&second.features).unwrap()
        );
        prop_assert_eq!(first.warnings, second.warnings);
    }

    /// At most one state integration is selected and it can run on the framework
    #[test]
    fn single_compatible_state_library(s in sources()) {
        let features = resolve(&s).unwrap().features;
        let state_integrations = features
            .integrations()
            .into_iter()
            .filter(|id| {
                StateManagement::PRIORITY
                    .iter()
                    .any(|state| state.integration() == Some(*id))
            })
            .count();
        prop_assert!(state_integrations <= 1);

        match features.framework {
            Framework::Vue => prop_assert!(matches!(
                features.state_management,
                StateManagement::Pinia | StateManagement::None
            )),
            Framework::React | Framework::Next => {
                prop_assert_ne!(features.state_management, StateManagement::Pinia)
            }
        }
    }

    /// Framework and UI-preset overrides hold for every input
    #[test]
    fn forced_overrides_hold(s in sources()) {
        let features = resolve(&s).unwrap().features;
        if features.framework == Framework::Vue || features.ui_preset == UiPreset::Shadcn {
            prop_assert_eq!(features.styling, Styling::TailwindV3);
        }
        if features.framework == Framework::Vue {
            prop_assert_eq!(features.ui_preset, UiPreset::None);
            prop_assert!(!features.is_selected(IntegrationId::Framer));
        }
        if features.framework == Framework::Next {
            prop_assert!(!features.router);
        }
    }
}

// =============================================================================
// Planner and composition
// =============================================================================

proptest! {
    /// Plans are sorted by scope then name, with no package listed twice
    #[test]
    fn plan_is_sorted_and_unique(s in sources()) {
        let features = resolve(&s).unwrap().features;
        let plan = planner::plan(&features).expect("built-in table has no conflicts");
        let keys: Vec<_> = plan
            .iter()
            .map(|p| (p.scope, p.package_name.clone()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        sorted.dedup_by(|a, b| a.1 == b.1);
        prop_assert_eq!(keys, sorted);
        prop_assert_eq!(plan.clone(), planner::plan(&features).unwrap());
    }

    /// Provider layers run outer to inner and only selected integrations mount
    #[test]
    fn provider_stack_is_ordered(s in sources()) {
        let features = resolve(&s).unwrap().features;
        let composition = compose(&features);
        let layers: Vec<_> = composition
            .ordered_provider_stack
            .iter()
            .map(|node| node.layer)
            .collect();
        let mut sorted = layers.clone();
        sorted.sort();
        prop_assert_eq!(layers, sorted);
        for node in &composition.ordered_provider_stack {
            prop_assert!(features.is_selected(node.integration));
        }
        prop_assert_eq!(composition, compose(&features));
    }
}
