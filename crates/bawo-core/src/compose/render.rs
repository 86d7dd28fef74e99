//! Render a [`CompositionPlan`] into source text
//!
//! One renderer covers every [`EntryShape`]; the shapes only differ in how the provider stack
//! is attached to the application root.

use super::{CompositionPlan, DemoRef, EntryShape, ImportEntry, Mount, ProviderNode, PropValue};
use crate::features::Language;

const INDENT: &str = "  ";

fn render_import(entry: &ImportEntry) -> String {
    let path = &entry.module_path;
    let names = entry.exported_names.join(", ");
    match (&entry.default_name, entry.exported_names.is_empty()) {
        (None, true) => format!("import \"{}\";", path),
        (Some(default), true) => format!("import {} from \"{}\";", default, path),
        (None, false) => format!("import {{ {} }} from \"{}\";", names, path),
        (Some(default), false) => format!("import {}, {{ {} }} from \"{}\";", default, names, path),
    }
}

fn render_props(mount: &Mount) -> Option<(String, String)> {
    let Mount::Wrapper { component, props } = mount else {
        return None;
    };
    let attrs: String = props
        .iter()
        .map(|p| match &p.value {
            PropValue::Expr(expr) => format!(" {}={{{}}}", p.name, expr),
            PropValue::Literal(text) => format!(" {}=\"{}\"", p.name, text),
        })
        .collect();
    Some((component.clone(), attrs))
}

/// Nest `inner` inside every wrapper of `stack`, starting at `depth` indentation levels
fn wrap(stack: &[ProviderNode], inner: &str, depth: usize) -> Vec<String> {
    let wrappers: Vec<(String, String)> =
        stack.iter().filter_map(|n| render_props(&n.mount)).collect();
    let mut lines = Vec::with_capacity(wrappers.len() * 2 + 1);
    for (i, (component, attrs)) in wrappers.iter().enumerate() {
        lines.push(format!("{}<{}{}>", INDENT.repeat(depth + i), component, attrs));
    }
    lines.push(format!("{}{}", INDENT.repeat(depth + wrappers.len()), inner));
    for (i, (component, _)) in wrappers.iter().enumerate().rev() {
        lines.push(format!("{}</{}>", INDENT.repeat(depth + i), component));
    }
    lines
}

fn header(plan: &CompositionPlan) -> Vec<String> {
    let mut out: Vec<String> = plan.import_manifest.iter().map(render_import).collect();
    let setup: Vec<&str> = plan.setup_lines().collect();
    if !setup.is_empty() {
        out.push(String::new());
        out.extend(setup.into_iter().map(str::to_string));
    }
    out
}

/// Entry point source: `main.jsx`, `app/providers.jsx` or `main.ts`
pub fn render_entry(plan: &CompositionPlan) -> String {
    let mut out: Vec<String> = Vec::new();
    match plan.shape {
        EntryShape::ReactRoot => {
            let root = match plan.language {
                Language::Ts => "document.getElementById(\"root\")!",
                Language::Js => "document.getElementById(\"root\")",
            };
            out.extend(header(plan));
            out.push(String::new());
            out.push(format!("createRoot({}).render(", root));
            out.push(format!("{}<React.StrictMode>", INDENT));
            out.extend(wrap(&plan.ordered_provider_stack, "<App />", 2));
            out.push(format!("{}</React.StrictMode>", INDENT));
            out.push(");".to_string());
        }
        EntryShape::NextProviders => {
            out.push("\"use client\";".to_string());
            out.push(String::new());
            let head = header(plan);
            if !head.is_empty() {
                out.extend(head);
                out.push(String::new());
            }
            let signature = match plan.language {
                Language::Ts => "{ children }: Readonly<{ children: React.ReactNode }>",
                Language::Js => "{ children }",
            };
            let inner = if plan.ordered_provider_stack.is_empty() {
                "<>{children}</>"
            } else {
                "{children}"
            };
            out.push(format!("export default function Providers({}) {{", signature));
            out.push(format!("{}return (", INDENT));
            out.extend(wrap(&plan.ordered_provider_stack, inner, 2));
            out.push(format!("{});", INDENT));
            out.push("}".to_string());
        }
        EntryShape::VuePlugins => {
            out.extend(header(plan));
            out.push(String::new());
            let plugins: String = plan
                .ordered_provider_stack
                .iter()
                .filter_map(|node| match &node.mount {
                    Mount::Plugin { expression } => Some(format!(".use({})", expression)),
                    Mount::Wrapper { .. } => None,
                })
                .collect();
            out.push(format!("createApp(App){}.mount(\"#app\");", plugins));
        }
    }
    out.push(String::new());
    out.join("\n")
}

fn demo_import(demo: &DemoRef) -> String {
    render_import(&ImportEntry::default_import(&demo.module_path, &demo.component))
}

/// App shell source listing every demo in registry order
pub fn render_app(plan: &CompositionPlan) -> String {
    let imports: Vec<String> = plan.demo_registry.iter().map(demo_import).collect();
    let tags: Vec<String> = plan
        .demo_registry
        .iter()
        .map(|d| format!("<{} />", d.component))
        .collect();

    let mut out: Vec<String> = Vec::new();
    match plan.shape {
        EntryShape::VuePlugins => {
            let lang = match plan.language {
                Language::Ts => " lang=\"ts\"",
                Language::Js => "",
            };
            out.push(format!("<script setup{}>", lang));
            out.extend(imports);
            out.push("</script>".to_string());
            out.push(String::new());
            out.push("<template>".to_string());
            out.push(format!("{}<main class=\"mx-auto max-w-4xl p-6\">", INDENT));
            out.push(format!(
                "{}<h1 class=\"text-3xl font-bold\">Hello 👋 {}</h1>",
                INDENT.repeat(2),
                plan.heading
            ));
            out.push(format!("{}<div class=\"mt-6 space-y-4\">", INDENT.repeat(2)));
            out.extend(tags.iter().map(|t| format!("{}{}", INDENT.repeat(3), t)));
            out.push(format!("{}</div>", INDENT.repeat(2)));
            out.push(format!("{}</main>", INDENT));
            out.push("</template>".to_string());
        }
        EntryShape::ReactRoot | EntryShape::NextProviders => {
            let name = if plan.shape == EntryShape::NextProviders {
                "Home"
            } else {
                "App"
            };
            out.extend(imports);
            out.push(String::new());
            out.push(format!("export default function {}() {{", name));
            out.push(format!("{}return (", INDENT));
            out.push(format!("{}<main className=\"mx-auto max-w-4xl p-6\">", INDENT.repeat(2)));
            out.push(format!(
                "{}<h1 className=\"text-3xl font-bold\">Hello 👋 {}</h1>",
                INDENT.repeat(3),
                plan.heading
            ));
            out.push(format!("{}<div className=\"mt-6 space-y-4\">", INDENT.repeat(3)));
            out.extend(tags.iter().map(|t| format!("{}{}", INDENT.repeat(4), t)));
            out.push(format!("{}</div>", INDENT.repeat(3)));
            out.push(format!("{}</main>", INDENT.repeat(2)));
            out.push(format!("{});", INDENT));
            out.push("}".to_string());
        }
    }
    out.push(String::new());
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::config::{resolve, RawConfigSources};

    fn plan_for(sources: RawConfigSources) -> CompositionPlan {
        compose(&resolve(&sources).unwrap().features)
    }

    #[test]
    fn test_react_root_with_redux() {
        let plan = plan_for(RawConfigSources::default().with_flag("redux", true));
        let expected = r#"import React from "react";
import { createRoot } from "react-dom/client";
import App from "./App";
import "./styles/index.css";
import { Provider } from "react-redux";
import { store } from "./store/store";

createRoot(document.getElementById("root")).render(
  <React.StrictMode>
    <Provider store={store}>
      <App />
    </Provider>
  </React.StrictMode>
);
"#;
        assert_eq!(render_entry(&plan), expected);
    }

    #[test]
    fn test_nesting_follows_stack_order() {
        let plan = plan_for(
            RawConfigSources::default()
                .with_flag("react-query", true)
                .with_flag("framer", true)
                .with_flag("ts", true),
        );
        let text = render_entry(&plan);
        let client = text.find("<QueryClientProvider client={queryClient}>").unwrap();
        let motion = text.find("<MotionConfig reducedMotion=\"user\">").unwrap();
        let app = text.find("<App />").unwrap();
        assert!(client < motion && motion < app);
        assert!(text.contains("const queryClient = new QueryClient();"));
        assert!(text.contains("getElementById(\"root\")!"));
    }

    #[test]
    fn test_next_providers_without_stack_uses_fragment() {
        let plan = plan_for(RawConfigSources::default().with_flag("framework", "next"));
        let text = render_entry(&plan);
        assert!(text.starts_with("\"use client\";\n\nexport default function Providers"));
        assert!(text.contains("<>{children}</>"));
    }

    #[test]
    fn test_next_providers_wrap_children() {
        let plan = plan_for(
            RawConfigSources::default()
                .with_flag("framework", "next")
                .with_flag("swr", true)
                .with_flag("ts", true),
        );
        let text = render_entry(&plan);
        assert!(text.contains("import { fetcher } from \"../lib/fetcher\";"));
        assert!(text.contains("<SWRConfig value={{ fetcher }}>"));
        assert!(text.contains("Readonly<{ children: React.ReactNode }>"));
    }

    #[test]
    fn test_vue_plugin_chain() {
        let plan = plan_for(
            RawConfigSources::default()
                .with_flag("framework", "vue")
                .with_flag("stateManagement", "none")
                .with_flag("router", true),
        );
        let text = render_entry(&plan);
        assert!(text.contains("import router from \"./router\";"));
        assert!(text.ends_with("createApp(App).use(router).mount(\"#app\");\n"));
    }

    #[test]
    fn test_app_shell_lists_demos() {
        let plan = plan_for(
            RawConfigSources::default()
                .with_flag("stateManagement", "none")
                .with_flag("gsap", true),
        );
        let text = render_app(&plan);
        assert!(text.starts_with("import GsapDemo from \"./components/demo/GsapDemo\";\n"));
        let gsap = text.find("<GsapDemo />").unwrap();
        let base = text.find("<UseStateDemo />").unwrap();
        assert!(gsap < base);
        assert!(text.contains("export default function App()"));
    }

    #[test]
    fn test_vue_app_shell() {
        let plan = plan_for(
            RawConfigSources::default()
                .with_flag("framework", "vue")
                .with_flag("stateManagement", "none")
                .with_flag("ts", true),
        );
        let text = render_app(&plan);
        assert!(text.starts_with("<script setup lang=\"ts\">\nimport RefDemo from \"./components/demo/RefDemo.vue\";"));
        assert!(text.contains("<template>"));
    }

    #[test]
    fn test_import_forms() {
        assert_eq!(
            render_import(&ImportEntry::side_effect("./a.css")),
            "import \"./a.css\";"
        );
        let mut both = ImportEntry::default_import("react", "React");
        both.exported_names.push("useState".to_string());
        assert_eq!(
            render_import(&both),
            "import React, { useState } from \"react\";"
        );
    }
}
