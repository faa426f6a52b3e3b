use crate::router::DASHBOARD_SCRIPT_PATH;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLES)) }
                script src=(CHART_JS_CDN) defer {};
                script src=(DASHBOARD_SCRIPT_PATH) defer {};
            }
            body {
                header class="topbar" {
                    h3 { "Real Estate Dashboard" }
                    nav {
                        ul {
                            li { a href="/" { "Dashboard" } }
                            li { a href="/api/analytics" { "Raw analytics" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f8fafc; color: #0f172a; }
.topbar { display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1.5rem; background: #1e40af; color: #fff; }
.topbar a { color: #fff; }
.topbar ul { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
.container { max-width: 1100px; margin: 2rem auto; padding: 0 1rem; }
.stats { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; }
.card { background: #fff; border-radius: 8px; padding: 1rem 1.25rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); margin-bottom: 1rem; }
.card h2 { font-size: 0.9rem; color: #64748b; margin: 0 0 0.5rem; }
.stat-value { font-size: 1.6rem; font-weight: 600; }
.charts { display: grid; grid-template-columns: 2fr 1fr; gap: 1rem; }
form.predict { display: grid; grid-template-columns: repeat(3, 1fr); gap: 0.75rem; }
form.predict label { display: flex; flex-direction: column; font-size: 0.85rem; gap: 0.25rem; }
.result { margin-top: 1rem; font-size: 1.2rem; }
.error { color: #dc2626; }
"#;
