//! Starter file contents
//!
//! Deliberately small: enough for the dev server to boot and each demo to show its library
//! working. Paths follow the framework profile so the guard can find them again.

use crate::compose::base_demo_component;
use crate::features::{
    FeatureSet, FontSpec, Framework, IntegrationId, Language, Styling, UiPreset,
};
use crate::profile::FrameworkProfile;

/// A file to write, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

impl GeneratedFile {
    fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let mut content: String = content.into();
        if !content.ends_with('\n') {
            content.push('\n');
        }
        Self {
            path: path.into(),
            content,
        }
    }
}

/// Build configuration derived from the whole feature set; rewritten on every run
pub fn config_files(features: &FeatureSet, profile: &dyn FrameworkProfile) -> Vec<GeneratedFile> {
    let mut files = Vec::new();
    if features.framework != Framework::Next {
        files.push(GeneratedFile::new("index.html", index_html(features, profile)));
        files.push(GeneratedFile::new(
            format!("vite.config.{}", features.language.module_ext()),
            vite_config(features),
        ));
    }
    if features.styling == Styling::TailwindV3 {
        files.push(GeneratedFile::new(
            "tailwind.config.js",
            tailwind_config(features),
        ));
    }
    files
}

/// Framework scaffolding written once and then left to the user
pub fn base_files(features: &FeatureSet, profile: &dyn FrameworkProfile) -> Vec<GeneratedFile> {
    let lang = features.language;
    let mut files = vec![
        GeneratedFile::new(".gitignore", GITIGNORE),
        GeneratedFile::new(profile.stylesheet(), stylesheet(features.styling)),
    ];

    if features.framework == Framework::Next {
        files.push(GeneratedFile::new(
            format!("app/layout.{}", lang.component_ext()),
            next_layout(features),
        ));
        files.push(GeneratedFile::new("next.config.mjs", NEXT_CONFIG));
    }

    match features.styling {
        Styling::TailwindV3 => {
            files.push(GeneratedFile::new("postcss.config.js", POSTCSS_V3));
        }
        Styling::TailwindV4 if features.framework == Framework::Next => {
            files.push(GeneratedFile::new("postcss.config.mjs", POSTCSS_V4_NEXT));
        }
        Styling::TailwindV4 => {}
    }

    if lang == Language::Ts {
        files.push(GeneratedFile::new("tsconfig.json", tsconfig(features.framework)));
        if features.framework == Framework::Vue {
            files.push(GeneratedFile::new("src/env.d.ts", VUE_ENV_DTS));
        }
    }

    let base_demo = base_demo_component(features.framework);
    files.push(GeneratedFile::new(
        format!(
            "{}/{}.{}",
            profile.demo_dir(),
            base_demo,
            profile.component_ext(lang)
        ),
        match features.framework {
            Framework::Vue => REF_DEMO_VUE.to_string(),
            Framework::React => use_state_demo(false),
            Framework::Next => use_state_demo(true),
        },
    ));

    files
}

/// Stylesheet for a registry font, imported for its side effect
pub fn font_file(font: &FontSpec, profile: &dyn FrameworkProfile) -> GeneratedFile {
    let weights: Vec<String> = font.weights.iter().map(|w| w.to_string()).collect();
    let fallback = if font.category == "serif" {
        "serif"
    } else {
        "sans-serif"
    };
    GeneratedFile::new(
        format!("{}styles/fonts/{}.css", profile.source_prefix(), font.key),
        format!(
            "@import url(\"https://fonts.googleapis.com/css2?family={}:wght@{}&display=swap\");\n\n\
             :root {{\n  font-family: \"{}\", {};\n}}",
            font.family.replace(' ', "+"),
            weights.join(";"),
            font.family,
            fallback
        ),
    )
}

/// Files owned by one integration
pub fn integration_files(
    id: IntegrationId,
    features: &FeatureSet,
    profile: &dyn FrameworkProfile,
) -> Vec<GeneratedFile> {
    let lang = features.language;
    let src = profile.source_prefix();
    let ext = lang.module_ext();
    let demo = |name: &str, content: String| {
        GeneratedFile::new(
            format!("{}/{}.{}", profile.demo_dir(), name, profile.component_ext(lang)),
            content,
        )
    };
    let client = if features.framework == Framework::Next {
        "\"use client\";\n\n"
    } else {
        ""
    };

    match (id, features.framework) {
        (IntegrationId::Zustand, _) => vec![
            GeneratedFile::new(format!("{}store/useCounterStore.{}", src, ext), ZUSTAND_STORE),
            demo("ZustandDemo", format!("{}{}", client, ZUSTAND_DEMO)),
        ],
        (IntegrationId::Redux, _) => vec![
            GeneratedFile::new(format!("{}store/store.{}", src, ext), redux_store(false)),
            GeneratedFile::new(format!("{}store/counterSlice.{}", src, ext), COUNTER_SLICE),
            demo("ReduxDemo", format!("{}{}", client, REDUX_DEMO)),
        ],
        (IntegrationId::RtkQuery, _) => vec![
            GeneratedFile::new(format!("{}store/store.{}", src, ext), redux_store(true)),
            GeneratedFile::new(format!("{}store/counterSlice.{}", src, ext), COUNTER_SLICE),
            GeneratedFile::new(format!("{}store/api.{}", src, ext), RTK_API),
            demo("RTKQueryDemo", format!("{}{}", client, RTK_QUERY_DEMO)),
        ],
        (IntegrationId::ReactQuery, _) => vec![demo(
            "ReactQueryDemo",
            format!("{}{}", client, REACT_QUERY_DEMO),
        )],
        (IntegrationId::Swr, _) => vec![
            GeneratedFile::new(format!("{}lib/fetcher.{}", src, ext), fetcher(lang)),
            demo("SWRDemo", format!("{}{}", client, SWR_DEMO)),
        ],
        (IntegrationId::Context, _) => {
            vec![demo("ContextDemo", format!("{}{}", client, CONTEXT_DEMO))]
        }
        (IntegrationId::Pinia, _) => vec![
            GeneratedFile::new(format!("{}stores/counter.{}", src, ext), PINIA_STORE),
            demo("PiniaDemo", pinia_demo(lang)),
        ],
        (IntegrationId::Router, Framework::Vue) => vec![
            GeneratedFile::new(format!("{}router/index.{}", src, ext), VUE_ROUTER),
            demo("RouterDemo", VUE_ROUTER_DEMO.to_string()),
        ],
        (IntegrationId::Router, Framework::React) => {
            vec![demo("RouterDemo", REACT_ROUTER_DEMO.to_string())]
        }
        (IntegrationId::Router, Framework::Next) => Vec::new(),
        (IntegrationId::Shadcn, _) if features.ui_preset == UiPreset::Shadcn => vec![
            GeneratedFile::new("components.json", components_json(features, profile)),
            GeneratedFile::new(format!("{}lib/utils.{}", src, ext), shadcn_utils(lang)),
            GeneratedFile::new(
                format!("{}components/ui/button.{}", src, lang.component_ext()),
                format!("{}{}", client, SHADCN_BUTTON),
            ),
            demo("ShadcnDemo", format!("{}{}", client, SHADCN_DEMO)),
        ],
        (IntegrationId::Shadcn, _) => Vec::new(),
        (IntegrationId::Framer, _) => {
            vec![demo("FramerDemo", format!("{}{}", client, FRAMER_DEMO))]
        }
        (IntegrationId::Gsap, Framework::Vue) => vec![demo("GsapDemo", GSAP_DEMO_VUE.to_string())],
        (IntegrationId::Gsap, _) => vec![demo("GsapDemo", format!("{}{}", client, GSAP_DEMO))],
        (IntegrationId::Prettier, _) => vec![
            GeneratedFile::new(".prettierrc", PRETTIERRC),
            GeneratedFile::new(".prettierignore", PRETTIERIGNORE),
        ],
    }
}

const GITIGNORE: &str = "node_modules\ndist\n.next\n.env*.local\n*.log\n.DS_Store";

fn stylesheet(styling: Styling) -> &'static str {
    match styling {
        Styling::TailwindV3 => "@tailwind base;\n@tailwind components;\n@tailwind utilities;",
        Styling::TailwindV4 => "@import \"tailwindcss\";",
    }
}

fn index_html(features: &FeatureSet, profile: &dyn FrameworkProfile) -> String {
    let (mount, entry) = match features.framework {
        Framework::Vue => ("app", profile.entry_file(features.language)),
        _ => ("root", profile.entry_file(features.language)),
    };
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{}</title>
  </head>
  <body>
    <div id="{}"></div>
    <script type="module" src="/{}"></script>
  </body>
</html>"#,
        features.project_name, mount, entry
    )
}

fn vite_config(features: &FeatureSet) -> String {
    let (plugin_import, plugin) = match features.framework {
        Framework::Vue => ("import vue from \"@vitejs/plugin-vue\";", "vue()"),
        _ => ("import react from \"@vitejs/plugin-react\";", "react()"),
    };
    let (tw_import, tw_plugin) = match features.styling {
        Styling::TailwindV4 => ("\nimport tailwindcss from \"@tailwindcss/vite\";", ", tailwindcss()"),
        Styling::TailwindV3 => ("", ""),
    };
    format!(
        "import {{ defineConfig }} from \"vite\";\n{}{}\n\nexport default defineConfig({{\n  plugins: [{}{}],\n}});",
        plugin_import, tw_import, plugin, tw_plugin
    )
}

fn next_layout(features: &FeatureSet) -> String {
    let props = match features.language {
        Language::Ts => "{ children }: Readonly<{ children: React.ReactNode }>",
        Language::Js => "{ children }",
    };
    format!(
        r#"import "./globals.css";
import Providers from "./providers";

export const metadata = {{
  title: "{}",
}};

export default function RootLayout({}) {{
  return (
    <html lang="en">
      <body>
        <Providers>{{children}}</Providers>
      </body>
    </html>
  );
}}"#,
        features.project_name, props
    )
}

const NEXT_CONFIG: &str = "/** @type {import('next').NextConfig} */\nconst nextConfig = {};\n\nexport default nextConfig;";

fn tailwind_config(features: &FeatureSet) -> String {
    let content = match features.framework {
        Framework::Next => {
            "\"./app/**/*.{js,ts,jsx,tsx}\", \"./components/**/*.{js,ts,jsx,tsx}\""
        }
        _ => "\"./index.html\", \"./src/**/*.{vue,js,ts,jsx,tsx}\"",
    };
    let (import, plugins) = if features.ui_preset == UiPreset::Shadcn {
        ("import animate from \"tailwindcss-animate\";\n\n", "animate")
    } else {
        ("", "")
    };
    format!(
        "{}/** @type {{import('tailwindcss').Config}} */\nexport default {{\n  content: [{}],\n  theme: {{\n    extend: {{}},\n  }},\n  plugins: [{}],\n}};",
        import, content, plugins
    )
}

const POSTCSS_V3: &str =
    "export default {\n  plugins: {\n    tailwindcss: {},\n    autoprefixer: {},\n  },\n};";

const POSTCSS_V4_NEXT: &str =
    "export default {\n  plugins: {\n    \"@tailwindcss/postcss\": {},\n  },\n};";

fn tsconfig(framework: Framework) -> String {
    let (jsx, include, extra) = match framework {
        Framework::Next => (
            "preserve",
            "[\"next-env.d.ts\", \"**/*.ts\", \"**/*.tsx\"]",
            ",\n    \"allowJs\": true,\n    \"incremental\": true,\n    \"plugins\": [{ \"name\": \"next\" }]",
        ),
        Framework::Vue => ("preserve", "[\"src/**/*.ts\", \"src/**/*.vue\"]", ""),
        Framework::React => ("react-jsx", "[\"src\"]", ""),
    };
    format!(
        r#"{{
  "compilerOptions": {{
    "target": "ES2022",
    "lib": ["ES2022", "DOM", "DOM.Iterable"],
    "module": "ESNext",
    "moduleResolution": "Bundler",
    "jsx": "{}",
    "strict": false,
    "skipLibCheck": true,
    "esModuleInterop": true,
    "resolveJsonModule": true,
    "isolatedModules": true,
    "noEmit": true{}
  }},
  "include": {}
}}"#,
        jsx, extra, include
    )
}

const VUE_ENV_DTS: &str = "/// <reference types=\"vite/client\" />\n\ndeclare module \"*.vue\" {\n  import type { DefineComponent } from \"vue\";\n  const component: DefineComponent;\n  export default component;\n}";

fn use_state_demo(client: bool) -> String {
    let prefix = if client { "\"use client\";\n\n" } else { "" };
    format!(
        r#"{}import {{ useEffect, useState }} from "react";

export default function UseStateDemo() {{
  const [count, setCount] = useState(0);

  useEffect(() => {{
    document.title = `Clicked ${{count}} times`;
  }}, [count]);

  return (
    <section className="rounded-lg border p-4">
      <h3 className="mb-3 text-lg font-semibold">useState + useEffect</h3>
      <button className="rounded bg-blue-500 px-3 py-1 text-white" onClick={{() => setCount(count + 1)}}>
        Clicked {{count}} times
      </button>
    </section>
  );
}}"#,
        prefix
    )
}

const REF_DEMO_VUE: &str = r#"<script setup>
import { ref } from "vue";

const count = ref(0);
</script>

<template>
  <section class="rounded-lg border p-4">
    <h3 class="mb-3 text-lg font-semibold">ref()</h3>
    <button class="rounded bg-green-600 px-3 py-1 text-white" @click="count++">
      Clicked {{ count }} times
    </button>
  </section>
</template>"#;

const ZUSTAND_STORE: &str = r#"import { create } from "zustand";

export const useCounterStore = create((set) => ({
  count: 0,
  increment: () => set((state) => ({ count: state.count + 1 })),
  reset: () => set({ count: 0 }),
}));"#;

const ZUSTAND_DEMO: &str = r#"import { useCounterStore } from "../../store/useCounterStore";

export default function ZustandDemo() {
  const { count, increment, reset } = useCounterStore();

  return (
    <section className="rounded-lg border p-4">
      <h3 className="mb-3 text-lg font-semibold">Zustand</h3>
      <span className="mr-4 font-mono text-xl">{count}</span>
      <button className="mr-2 rounded bg-blue-500 px-3 py-1 text-white" onClick={increment}>+</button>
      <button className="rounded bg-gray-500 px-3 py-1 text-white" onClick={reset}>Reset</button>
    </section>
  );
}"#;

fn redux_store(with_api: bool) -> String {
    if with_api {
        r#"import { configureStore } from "@reduxjs/toolkit";
import counterReducer from "./counterSlice";
import { api } from "./api";

export const store = configureStore({
  reducer: {
    counter: counterReducer,
    [api.reducerPath]: api.reducer,
  },
  middleware: (getDefaultMiddleware) => getDefaultMiddleware().concat(api.middleware),
});"#
            .to_string()
    } else {
        r#"import { configureStore } from "@reduxjs/toolkit";
import counterReducer from "./counterSlice";

export const store = configureStore({
  reducer: {
    counter: counterReducer,
  },
});"#
            .to_string()
    }
}

const COUNTER_SLICE: &str = r#"import { createSlice } from "@reduxjs/toolkit";

const counterSlice = createSlice({
  name: "counter",
  initialState: { value: 0 },
  reducers: {
    increment: (state) => {
      state.value += 1;
    },
    decrement: (state) => {
      state.value -= 1;
    },
    reset: (state) => {
      state.value = 0;
    },
  },
});

export const { increment, decrement, reset } = counterSlice.actions;
export default counterSlice.reducer;"#;

const RTK_API: &str = r#"import { createApi, fetchBaseQuery } from "@reduxjs/toolkit/query/react";

export const api = createApi({
  reducerPath: "api",
  baseQuery: fetchBaseQuery({ baseUrl: "https://jsonplaceholder.typicode.com" }),
  endpoints: (builder) => ({
    getPosts: builder.query({
      query: () => "/posts?_limit=5",
    }),
  }),
});

export const { useGetPostsQuery } = api;"#;

const REDUX_DEMO: &str = r#"import { useDispatch, useSelector } from "react-redux";
import { decrement, increment, reset } from "../../store/counterSlice";

export default function ReduxDemo() {
  const count = useSelector((state) => state.counter.value);
  const dispatch = useDispatch();

  return (
    <section className="rounded-lg border p-4">
      <h3 className="mb-3 text-lg font-semibold">Redux Toolkit</h3>
      <span className="mr-4 font-mono text-xl">{count}</span>
      <button className="mr-2 rounded bg-blue-500 px-3 py-1 text-white" onClick={() => dispatch(increment())}>+</button>
      <button className="mr-2 rounded bg-red-500 px-3 py-1 text-white" onClick={() => dispatch(decrement())}>-</button>
      <button className="rounded bg-gray-500 px-3 py-1 text-white" onClick={() => dispatch(reset())}>Reset</button>
    </section>
  );
}"#;

const RTK_QUERY_DEMO: &str = r#"import { useGetPostsQuery } from "../../store/api";

export default function RTKQueryDemo() {
  const { data: posts, error, isLoading } = useGetPostsQuery();

  return (
    <section className="rounded-lg border p-4">
      <h3 className="mb-3 text-lg font-semibold">RTK Query</h3>
      {isLoading && <p>Loading posts...</p>}
      {error && <p className="text-red-500">Failed to load posts</p>}
      <ul className="list-disc pl-5">
        {posts?.map((post) => (
          <li key={post.id}>{post.title}</li>
        ))}
      </ul>
    </section>
  );
}"#;

const REACT_QUERY_DEMO: &str = r#"import { useQuery } from "@tanstack/react-query";

export default function ReactQueryDemo() {
  const { data, isPending, error } = useQuery({
    queryKey: ["posts"],
    queryFn: () => fetch("https://jsonplaceholder.typicode.com/posts?_limit=5").then((res) => res.json()),
  });

  return (
    <section className="rounded-lg border p-4">
      <h3 className="mb-3 text-lg font-semibold">React Query</h3>
      {isPending && <p>Loading posts...</p>}
      {error && <p className="text-red-500">Failed to load posts</p>}
      <ul className="list-disc pl-5">
        {data?.map((post) => (
          <li key={post.id}>{post.title}</li>
        ))}
      </ul>
    </section>
  );
}"#;

fn fetcher(language: Language) -> String {
    let param = match language {
        Language::Ts => "url: string",
        Language::Js => "url",
    };
    format!(
        "export const fetcher = ({}) => fetch(url).then((res) => res.json());",
        param
    )
}

const SWR_DEMO: &str = r#"import useSWR from "swr";

export default function SWRDemo() {
  const { data, error, isLoading } = useSWR("https://jsonplaceholder.typicode.com/posts?_limit=5");

  return (
    <section className="rounded-lg border p-4">
      <h3 className="mb-3 text-lg font-semibold">SWR</h3>
      {isLoading && <p>Loading posts...</p>}
      {error && <p className="text-red-500">Failed to load posts</p>}
      <ul className="list-disc pl-5">
        {data?.map((post) => (
          <li key={post.id}>{post.title}</li>
        ))}
      </ul>
    </section>
  );
}"#;

const CONTEXT_DEMO: &str = r#"import { createContext, useContext, useReducer } from "react";

const ThemeContext = createContext(null);

function themeReducer(state, action) {
  switch (action.type) {
    case "toggle":
      return { dark: !state.dark };
    default:
      return state;
  }
}

export function ThemeProvider({ children }) {
  const [state, dispatch] = useReducer(themeReducer, { dark: false });
  return <ThemeContext.Provider value={{ state, dispatch }}>{children}</ThemeContext.Provider>;
}

export default function ContextDemo() {
  const { state, dispatch } = useContext(ThemeContext);

  return (
    <section className={`rounded-lg border p-4 ${state.dark ? "bg-gray-900 text-white" : ""}`}>
      <h3 className="mb-3 text-lg font-semibold">Context API + useReducer</h3>
      <button className="rounded bg-indigo-500 px-3 py-1 text-white" onClick={() => dispatch({ type: "toggle" })}>
        Toggle theme
      </button>
    </section>
  );
}"#;

const PINIA_STORE: &str = r#"import { defineStore } from "pinia";

export const useCounterStore = defineStore("counter", {
  state: () => ({ count: 0 }),
  actions: {
    increment() {
      this.count += 1;
    },
  },
});"#;

fn pinia_demo(language: Language) -> String {
    let lang = match language {
        Language::Ts => " lang=\"ts\"",
        Language::Js => "",
    };
    format!(
        r#"<script setup{}>
import {{ useCounterStore }} from "../../stores/counter";

const counter = useCounterStore();
</script>

<template>
  <section class="rounded-lg border p-4">
    <h3 class="mb-3 text-lg font-semibold">Pinia</h3>
    <span class="mr-4 font-mono text-xl">{{{{ counter.count }}}}</span>
    <button class="rounded bg-green-600 px-3 py-1 text-white" @click="counter.increment()">+</button>
  </section>
</template>"#,
        lang
    )
}

const VUE_ROUTER: &str = r#"import { h } from "vue";
import { createRouter, createWebHistory } from "vue-router";

const Home = { render: () => h("p", "Home page") };
const About = { render: () => h("p", "About page") };

const router = createRouter({
  history: createWebHistory(),
  routes: [
    { path: "/", component: Home },
    { path: "/about", component: About },
  ],
});

export default router;"#;

const VUE_ROUTER_DEMO: &str = r#"<template>
  <section class="rounded-lg border p-4">
    <h3 class="mb-3 text-lg font-semibold">Vue Router</h3>
    <nav class="mb-2 space-x-4">
      <RouterLink to="/">Home</RouterLink>
      <RouterLink to="/about">About</RouterLink>
    </nav>
    <RouterView />
  </section>
</template>"#;

const REACT_ROUTER_DEMO: &str = r#"import { BrowserRouter, Link, Route, Routes } from "react-router-dom";

export default function RouterDemo() {
  return (
    <section className="rounded-lg border p-4">
      <h3 className="mb-3 text-lg font-semibold">React Router</h3>
      <BrowserRouter>
        <nav className="mb-2 space-x-4">
          <Link to="/">Home</Link>
          <Link to="/about">About</Link>
        </nav>
        <Routes>
          <Route path="/" element={<p>Home page</p>} />
          <Route path="/about" element={<p>About page</p>} />
        </Routes>
      </BrowserRouter>
    </section>
  );
}"#;

fn components_json(features: &FeatureSet, profile: &dyn FrameworkProfile) -> String {
    format!(
        r#"{{
  "$schema": "https://ui.shadcn.com/schema.json",
  "style": "default",
  "rsc": {},
  "tsx": {},
  "tailwind": {{
    "config": "tailwind.config.js",
    "css": "{}",
    "baseColor": "slate",
    "cssVariables": false
  }},
  "aliases": {{
    "components": "@/components",
    "utils": "@/lib/utils"
  }}
}}"#,
        features.framework == Framework::Next,
        features.language == Language::Ts,
        profile.stylesheet()
    )
}

fn shadcn_utils(language: Language) -> String {
    let (import, param) = match language {
        Language::Ts => ("import { clsx, type ClassValue } from \"clsx\";", "...inputs: ClassValue[]"),
        Language::Js => ("import { clsx } from \"clsx\";", "...inputs"),
    };
    format!(
        "{}\nimport {{ twMerge }} from \"tailwind-merge\";\n\nexport function cn({}) {{\n  return twMerge(clsx(inputs));\n}}",
        import, param
    )
}

const SHADCN_BUTTON: &str = r#"import { cva } from "class-variance-authority";
import { cn } from "../../lib/utils";

const buttonVariants = cva(
  "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-medium transition-colors",
  {
    variants: {
      variant: {
        default: "bg-slate-900 text-white hover:bg-slate-700",
        outline: "border border-slate-300 hover:bg-slate-100",
      },
    },
    defaultVariants: { variant: "default" },
  },
);

export function Button({ className, variant, ...props }) {
  return <button className={cn(buttonVariants({ variant }), className)} {...props} />;
}"#;

const SHADCN_DEMO: &str = r#"import { Sparkles } from "lucide-react";
import { Button } from "../ui/button";

export default function ShadcnDemo() {
  return (
    <section className="rounded-lg border p-4">
      <h3 className="mb-3 text-lg font-semibold">shadcn/ui</h3>
      <div className="flex gap-2">
        <Button>
          <Sparkles className="mr-2 h-4 w-4" /> Default
        </Button>
        <Button variant="outline">Outline</Button>
      </div>
    </section>
  );
}"#;

const FRAMER_DEMO: &str = r#"import { motion } from "framer-motion";

export default function FramerDemo() {
  return (
    <section className="rounded-lg border p-4">
      <h3 className="mb-3 text-lg font-semibold">Framer Motion</h3>
      <motion.div
        className="h-16 w-16 rounded-lg bg-pink-500"
        animate={{ rotate: 360 }}
        transition={{ repeat: Infinity, duration: 2, ease: "linear" }}
      />
    </section>
  );
}"#;

const GSAP_DEMO: &str = r#"import { useEffect, useRef } from "react";
import gsap from "gsap";

export default function GsapDemo() {
  const box = useRef(null);

  useEffect(() => {
    const tween = gsap.to(box.current, { x: 120, repeat: -1, yoyo: true, duration: 1 });
    return () => {
      tween.kill();
    };
  }, []);

  return (
    <section className="rounded-lg border p-4">
      <h3 className="mb-3 text-lg font-semibold">GSAP</h3>
      <div ref={box} className="h-16 w-16 rounded-lg bg-emerald-500" />
    </section>
  );
}"#;

const GSAP_DEMO_VUE: &str = r#"<script setup>
import { onMounted, onUnmounted, ref } from "vue";
import gsap from "gsap";

const box = ref(null);
let tween;

onMounted(() => {
  tween = gsap.to(box.value, { x: 120, repeat: -1, yoyo: true, duration: 1 });
});

onUnmounted(() => tween?.kill());
</script>

<template>
  <section class="rounded-lg border p-4">
    <h3 class="mb-3 text-lg font-semibold">GSAP</h3>
    <div ref="box" class="h-16 w-16 rounded-lg bg-emerald-500" />
  </section>
</template>"#;

const PRETTIERRC: &str = "{\n  \"semi\": true,\n  \"singleQuote\": false,\n  \"plugins\": [\"prettier-plugin-tailwindcss\"]\n}";

const PRETTIERIGNORE: &str = "node_modules\ndist\n.next";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, RawConfigSources};
    use crate::guard::{ArtifactKind, ArtifactTable};
    use crate::profile::profile_for;

    fn features(sources: RawConfigSources) -> FeatureSet {
        resolve(&sources).unwrap().features
    }

    /// Everything the generator writes for an integration must be removable by the guard
    fn assert_covered(f: &FeatureSet) {
        let profile = profile_for(f.framework);
        let table = ArtifactTable::builtin();
        for id in f.integrations() {
            let artifacts = table.artifacts(id, profile);
            for file in integration_files(id, f, profile) {
                let covered = artifacts.iter().any(|a| match a.kind {
                    ArtifactKind::File => a.path == file.path,
                    ArtifactKind::Dir => file.path.starts_with(&format!("{}/", a.path)),
                });
                assert!(covered, "{} not registered for {}", file.path, id);
            }
        }
    }

    #[test]
    fn test_react_integrations_covered_by_artifacts() {
        for state in ["zustand", "redux", "rtkQuery", "reactQuery", "swr", "context"] {
            assert_covered(&features(
                RawConfigSources::default()
                    .with_flag("stateManagement", state)
                    .with_flag("router", true)
                    .with_flag("ui", "shadcn")
                    .with_flag("animations", "framer,gsap")
                    .with_flag("language", "ts"),
            ));
        }
    }

    #[test]
    fn test_next_and_vue_integrations_covered() {
        assert_covered(&features(
            RawConfigSources::default()
                .with_flag("framework", "next")
                .with_flag("swr", true)
                .with_flag("ui", "shadcn")
                .with_flag("framer", true),
        ));
        assert_covered(&features(
            RawConfigSources::default()
                .with_flag("framework", "vue")
                .with_flag("pinia", true)
                .with_flag("router", true)
                .with_flag("gsap", true),
        ));
    }

    #[test]
    fn test_next_demos_are_client_components() {
        let f = features(
            RawConfigSources::default()
                .with_flag("framework", "next")
                .with_flag("framer", true),
        );
        let files = integration_files(IntegrationId::Framer, &f, profile_for(f.framework));
        assert_eq!(files[0].path, "components/demo/FramerDemo.jsx");
        assert!(files[0].content.starts_with("\"use client\";"));
    }

    #[test]
    fn test_vite_config_for_tailwind_v4() {
        let f = features(RawConfigSources::default().with_flag("styling", "v4"));
        let files = config_files(&f, profile_for(f.framework));
        let vite = files.iter().find(|f| f.path == "vite.config.js").unwrap();
        assert!(vite.content.contains("tailwindcss()"));
        assert!(!files.iter().any(|f| f.path == "tailwind.config.js"));
    }

    #[test]
    fn test_tailwind_config_follows_shadcn() {
        let plain = features(RawConfigSources::default());
        let shadcn = features(RawConfigSources::default().with_flag("ui", "shadcn"));
        let config = |f: &FeatureSet| {
            config_files(f, profile_for(f.framework))
                .into_iter()
                .find(|file| file.path == "tailwind.config.js")
                .unwrap()
                .content
        };
        assert!(!config(&plain).contains("tailwindcss-animate"));
        assert!(config(&shadcn).contains("import animate from \"tailwindcss-animate\";"));
        assert!(config(&shadcn).contains("plugins: [animate],"));
    }

    #[test]
    fn test_index_html_points_at_entry() {
        let f = features(RawConfigSources::default().with_flag("language", "ts"));
        let files = config_files(&f, profile_for(f.framework));
        let html = files.iter().find(|f| f.path == "index.html").unwrap();
        assert!(html.content.contains("src=\"/src/main.tsx\""));
        assert!(files.iter().any(|f| f.path == "vite.config.ts"));
    }

    #[test]
    fn test_font_file() {
        let f = features(RawConfigSources::default().with_flag("font", "dm-sans"));
        let file = font_file(f.font_spec().unwrap(), profile_for(f.framework));
        assert_eq!(file.path, "src/styles/fonts/dm-sans.css");
        assert!(file.content.contains("family=DM+Sans:wght@400;500;700"));
    }
}
