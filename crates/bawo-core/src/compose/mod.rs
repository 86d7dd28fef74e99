//! Composition of the generated entry point
//!
//! [`compose`] turns a [`FeatureSet`] into a [`CompositionPlan`]: the providers that wrap the
//! application root (outermost first), the imports the entry point needs and the demo
//! components the app shell lists. Nothing here touches the filesystem; [`render`] turns the
//! plan into source text.
//!
//! Provider order is fixed by [`ProviderLayer`]: store providers wrap data-fetching clients,
//! which wrap UI context providers, which wrap the app. Within a layer, nodes follow
//! [`IntegrationId`] order.

pub mod render;

use crate::features::{Animation, FeatureSet, Framework, IntegrationId, Language, UiPreset};
use crate::profile::{profile_for, FrameworkProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use render::{render_app, render_entry};

/// How the entry point hosts providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryShape {
    /// `createRoot(...).render(<Providers><App /></Providers>)`
    ReactRoot,
    /// A `"use client"` component wrapping `{children}`
    NextProviders,
    /// `createApp(App).use(plugin)...mount("#app")`
    VuePlugins,
}

/// Position of a provider in the stack; earlier variants wrap later ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderLayer {
    Store,
    DataClient,
    UiContext,
}

/// JSX attribute value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropValue {
    /// Rendered as `name={expr}`
    Expr(String),
    /// Rendered as `name="text"`
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prop {
    pub name: String,
    pub value: PropValue,
}

impl Prop {
    pub fn expr(name: &str, expr: &str) -> Self {
        Self {
            name: name.to_string(),
            value: PropValue::Expr(expr.to_string()),
        }
    }

    pub fn literal(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            value: PropValue::Literal(text.to_string()),
        }
    }
}

/// How a provider attaches to the app
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mount {
    /// A JSX component wrapping its children
    Wrapper { component: String, props: Vec<Prop> },
    /// A Vue plugin passed to `app.use(...)`
    Plugin { expression: String },
}

/// One entry of the provider stack
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderNode {
    pub layer: ProviderLayer,
    pub integration: IntegrationId,
    pub mount: Mount,
    /// Module-level statement the provider needs, such as a client instance
    pub setup: Option<String>,
}

/// One `import` statement; both name fields empty means a side-effect import
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEntry {
    pub module_path: String,
    pub default_name: Option<String>,
    pub exported_names: Vec<String>,
}

impl ImportEntry {
    pub fn named(module_path: &str, names: &[&str]) -> Self {
        Self {
            module_path: module_path.to_string(),
            default_name: None,
            exported_names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn default_import(module_path: &str, name: &str) -> Self {
        Self {
            module_path: module_path.to_string(),
            default_name: Some(name.to_string()),
            exported_names: Vec::new(),
        }
    }

    pub fn side_effect(module_path: &str) -> Self {
        Self {
            module_path: module_path.to_string(),
            default_name: None,
            exported_names: Vec::new(),
        }
    }

    pub fn is_side_effect(&self) -> bool {
        self.default_name.is_none() && self.exported_names.is_empty()
    }

    fn merge(&mut self, other: ImportEntry) {
        if self.default_name.is_none() {
            self.default_name = other.default_name;
        }
        for name in other.exported_names {
            if !self.exported_names.contains(&name) {
                self.exported_names.push(name);
            }
        }
    }
}

/// A demo component listed in the app shell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoRef {
    /// `None` for the always-present base demo
    pub integration: Option<IntegrationId>,
    pub component: String,
    /// Import path as seen from the app shell
    pub module_path: String,
    /// File path relative to the project root
    pub file_path: String,
}

/// Everything the renderer needs to write the entry point and app shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionPlan {
    pub shape: EntryShape,
    pub language: Language,
    pub heading: String,
    /// Outermost first
    pub ordered_provider_stack: Vec<ProviderNode>,
    /// Deduplicated by module path, first-seen order
    pub import_manifest: Vec<ImportEntry>,
    pub demo_registry: Vec<DemoRef>,
}

impl CompositionPlan {
    /// Module-level statements, in stack order
    pub fn setup_lines(&self) -> impl Iterator<Item = &str> {
        self.ordered_provider_stack
            .iter()
            .filter_map(|node| node.setup.as_deref())
    }

    pub fn has_provider(&self, integration: IntegrationId) -> bool {
        self.ordered_provider_stack
            .iter()
            .any(|node| node.integration == integration)
    }
}

/// Build the composition plan for `features`
pub fn compose(features: &FeatureSet) -> CompositionPlan {
    let profile = profile_for(features.framework);
    let base = profile.import_base();

    let mut stack: Vec<(ProviderNode, Vec<ImportEntry>)> = features
        .integrations()
        .into_iter()
        .filter_map(|id| provider_for(id, features.framework, base))
        .collect();
    stack.sort_by_key(|(node, _)| (node.layer, node.integration));

    let mut imports = ImportManifest::default();
    for entry in base_imports(profile) {
        imports.add(entry);
    }
    for (_, entries) in &stack {
        for entry in entries {
            imports.add(entry.clone());
        }
    }
    if let Some(font) = features.font_spec() {
        imports.add(ImportEntry::side_effect(&format!(
            "{}styles/fonts/{}.css",
            base, font.key
        )));
    }

    let demo_registry = demos(features, profile);
    let ordered_provider_stack: Vec<ProviderNode> =
        stack.into_iter().map(|(node, _)| node).collect();
    debug!(
        providers = ordered_provider_stack.len(),
        demos = demo_registry.len(),
        "composition planned"
    );

    CompositionPlan {
        shape: profile.entry_shape(),
        language: features.language,
        heading: heading(features),
        ordered_provider_stack,
        import_manifest: imports.0,
        demo_registry,
    }
}

#[derive(Default)]
struct ImportManifest(Vec<ImportEntry>);

impl ImportManifest {
    fn add(&mut self, entry: ImportEntry) {
        match self
            .0
            .iter_mut()
            .find(|e| e.module_path == entry.module_path)
        {
            Some(existing) => existing.merge(entry),
            None => self.0.push(entry),
        }
    }
}

fn heading(features: &FeatureSet) -> String {
    let lang = match features.language {
        Language::Ts => "TS",
        Language::Js => "JS",
    };
    match features.framework {
        Framework::Next => format!("Next.js + Tailwind ({})", lang),
        Framework::React => format!("React + Vite + Tailwind ({})", lang),
        Framework::Vue => format!("Vue + Vite + Tailwind ({})", lang),
    }
}

fn base_imports(profile: &dyn FrameworkProfile) -> Vec<ImportEntry> {
    match profile.entry_shape() {
        EntryShape::ReactRoot => vec![
            ImportEntry::default_import("react", "React"),
            ImportEntry::named("react-dom/client", &["createRoot"]),
            ImportEntry::default_import("./App", "App"),
            ImportEntry::side_effect("./styles/index.css"),
        ],
        // The stylesheet is imported by the root layout
        EntryShape::NextProviders => Vec::new(),
        EntryShape::VuePlugins => vec![
            ImportEntry::named("vue", &["createApp"]),
            ImportEntry::default_import("./App.vue", "App"),
            ImportEntry::side_effect("./style.css"),
        ],
    }
}

fn provider_for(
    id: IntegrationId,
    framework: Framework,
    base: &str,
) -> Option<(ProviderNode, Vec<ImportEntry>)> {
    let wrapper = |layer, component: &str, props: Vec<Prop>, setup: Option<&str>| ProviderNode {
        layer,
        integration: id,
        mount: Mount::Wrapper {
            component: component.to_string(),
            props,
        },
        setup: setup.map(str::to_string),
    };
    let plugin = |layer, expression: &str| ProviderNode {
        layer,
        integration: id,
        mount: Mount::Plugin {
            expression: expression.to_string(),
        },
        setup: None,
    };

    if framework == Framework::Vue {
        return match id {
            IntegrationId::Pinia => Some((
                plugin(ProviderLayer::Store, "createPinia()"),
                vec![ImportEntry::named("pinia", &["createPinia"])],
            )),
            IntegrationId::Router => Some((
                plugin(ProviderLayer::UiContext, "router"),
                vec![ImportEntry::default_import(&format!("{}router", base), "router")],
            )),
            _ => None,
        };
    }

    match id {
        IntegrationId::Redux | IntegrationId::RtkQuery => Some((
            wrapper(
                ProviderLayer::Store,
                "Provider",
                vec![Prop::expr("store", "store")],
                None,
            ),
            vec![
                ImportEntry::named("react-redux", &["Provider"]),
                ImportEntry::named(&format!("{}store/store", base), &["store"]),
            ],
        )),
        IntegrationId::ReactQuery => Some((
            wrapper(
                ProviderLayer::DataClient,
                "QueryClientProvider",
                vec![Prop::expr("client", "queryClient")],
                Some("const queryClient = new QueryClient();"),
            ),
            vec![ImportEntry::named(
                "@tanstack/react-query",
                &["QueryClient", "QueryClientProvider"],
            )],
        )),
        IntegrationId::Swr => Some((
            wrapper(
                ProviderLayer::DataClient,
                "SWRConfig",
                vec![Prop::expr("value", "{ fetcher }")],
                None,
            ),
            vec![
                ImportEntry::named("swr", &["SWRConfig"]),
                ImportEntry::named(&format!("{}lib/fetcher", base), &["fetcher"]),
            ],
        )),
        IntegrationId::Context => Some((
            wrapper(ProviderLayer::UiContext, "ThemeProvider", Vec::new(), None),
            vec![ImportEntry::named(
                &format!("{}components/demo/ContextDemo", base),
                &["ThemeProvider"],
            )],
        )),
        IntegrationId::Framer => Some((
            wrapper(
                ProviderLayer::UiContext,
                "MotionConfig",
                vec![Prop::literal("reducedMotion", "user")],
                None,
            ),
            vec![ImportEntry::named("framer-motion", &["MotionConfig"])],
        )),
        _ => None,
    }
}

/// Demo component shown for an integration
pub fn demo_component(id: IntegrationId) -> Option<&'static str> {
    match id {
        IntegrationId::Zustand => Some("ZustandDemo"),
        IntegrationId::Redux => Some("ReduxDemo"),
        IntegrationId::RtkQuery => Some("RTKQueryDemo"),
        IntegrationId::ReactQuery => Some("ReactQueryDemo"),
        IntegrationId::Swr => Some("SWRDemo"),
        IntegrationId::Context => Some("ContextDemo"),
        IntegrationId::Pinia => Some("PiniaDemo"),
        IntegrationId::Router => Some("RouterDemo"),
        IntegrationId::Shadcn => Some("ShadcnDemo"),
        IntegrationId::Framer => Some("FramerDemo"),
        IntegrationId::Gsap => Some("GsapDemo"),
        IntegrationId::Prettier => None,
    }
}

/// Always-present demo that needs no library
pub fn base_demo_component(framework: Framework) -> &'static str {
    match framework {
        Framework::Vue => "RefDemo",
        Framework::React | Framework::Next => "UseStateDemo",
    }
}

fn demo_ref(
    profile: &dyn FrameworkProfile,
    language: Language,
    integration: Option<IntegrationId>,
    component: &str,
) -> DemoRef {
    let ext = profile.component_ext(language);
    let module_path = if profile.imports_with_ext() {
        format!("{}components/demo/{}.{}", profile.import_base(), component, ext)
    } else {
        format!("{}components/demo/{}", profile.import_base(), component)
    };
    DemoRef {
        integration,
        component: component.to_string(),
        module_path,
        file_path: format!("{}/{}.{}", profile.demo_dir(), component, ext),
    }
}

/// State demo, router, UI preset, animations in selection order, then the base demo
fn demos(features: &FeatureSet, profile: &dyn FrameworkProfile) -> Vec<DemoRef> {
    let mut order: Vec<IntegrationId> = Vec::new();
    if let Some(state) = features.state_management.integration() {
        order.push(state);
    }
    if features.router {
        order.push(IntegrationId::Router);
    }
    if features.ui_preset == UiPreset::Shadcn {
        order.push(IntegrationId::Shadcn);
    }
    order.extend(features.animations.iter().map(Animation::integration));

    let mut registry: Vec<DemoRef> = order
        .into_iter()
        .filter_map(|id| demo_component(id).map(|c| (id, c)))
        .map(|(id, component)| demo_ref(profile, features.language, Some(id), component))
        .collect();
    registry.push(demo_ref(
        profile,
        features.language,
        None,
        base_demo_component(features.framework),
    ));
    registry
}
