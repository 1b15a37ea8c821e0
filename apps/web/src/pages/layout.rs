use super::text;

const STYLESHEET: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #020617; color: #e5e7eb; }
nav { display: flex; gap: 1rem; padding: 0.8rem 1.5rem; border-bottom: 1px solid #1e293b; }
nav a { color: #cbd5f5; text-decoration: none; font-size: 0.9rem; }
main { max-width: 72rem; margin: 0 auto; padding: 1.5rem; }
.card { background: rgba(15,23,42,0.9); border: 1px solid #1f2937; border-radius: 0.9rem; padding: 1rem 1.2rem; margin-bottom: 1rem; }
.grid { display: grid; grid-template-columns: minmax(0, 1.1fr) minmax(0, 2fr); gap: 1rem; }
.pill { display: inline-block; padding: 0.15rem 0.5rem; border-radius: 999px; font-size: 0.75rem; border: 1px solid rgba(148,163,184,0.4); margin-right: 0.4rem; }
.accent { color: #38bdf8; }
.muted { color: #9ca3af; font-size: 0.85rem; }
.error { color: #fca5a5; }
.button { display: inline-block; font-size: 0.8rem; padding: 0.35rem 0.8rem; border-radius: 999px; border: 1px solid #38bdf8; color: #e0f2fe; text-decoration: none; }
.bar-track { background: #1e293b; border-radius: 999px; height: 0.6rem; overflow: hidden; }
.bar-fill { background: linear-gradient(90deg, rgba(34,197,94,0.2), rgba(56,189,248,0.9)); height: 100%; }
.chart-row { display: grid; grid-template-columns: 10rem 1fr 2.5rem; gap: 0.6rem; align-items: center; margin: 0.3rem 0; font-size: 0.8rem; }
.donut { width: 8rem; height: 8rem; border-radius: 50%; }
.roadmap h3 { font-size: 0.95rem; color: #bae6fd; border-left: 2px solid rgba(56,189,248,0.7); padding-left: 0.5rem; margin: 0.8rem 0 0.3rem; }
.roadmap p { margin: 0.25rem 0 0.1rem; line-height: 1.5; }
.roadmap ul { margin: 0.3rem 0 0.3rem 1.1rem; padding-left: 0.7rem; }
"#;

/// Wraps page content in the shared document shell.
pub fn page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · CareerGENAI</title>
<style>{STYLESHEET}</style>
</head>
<body>
<nav><a href="/upload">CareerGENAI</a><a href="/upload">Analyze a CV</a></nav>
<main>
{content}
</main>
</body>
</html>"#,
        title = text(title),
    )
}

/// A single card with a heading and a message. Used for error and empty states.
pub fn message_card(heading: Option<&str>, message: &str, class: &str) -> String {
    let heading = heading
        .map(|h| format!("<h1>{}</h1>", text(h)))
        .unwrap_or_default();
    format!(
        r#"<section class="card">{heading}<p class="{class}">{}</p></section>"#,
        text(message)
    )
}
