use crate::models::analysis::AnalysisRun;
use crate::roadmap::{self, DisplayBlock};

use super::layout::{message_card, page};
use super::{attr, text, ViewState};

/// Everything the roadmap page needs once the run is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapPage {
    pub run: AnalysisRun,
    pub report_url: String,
}

pub fn render(state: &ViewState<RoadmapPage>) -> String {
    let content = match state {
        ViewState::Failed(message) => message_card(Some("Could not load roadmap"), message, "error"),
        ViewState::Empty => message_card(None, "No roadmap data found for this run.", "muted"),
        ViewState::Loaded(view) => loaded(view),
    };
    page("Learning roadmap", &content)
}

fn loaded(view: &RoadmapPage) -> String {
    let run = &view.run;
    let counts = run.gap_counts();

    format!(
        r#"<section class="card">
<span class="pill">Learning roadmap</span><span class="pill">Run #{id}</span>
<h1>Roadmap for <span class="accent">{role}</span></h1>
<p>This is your detailed skill development roadmap, generated from your CV and the target role requirements.</p>
<a class="button" href="/results?run_id={id}">Back to results</a>
<a class="button" href="{report_url}" target="_blank" rel="noopener">Download full report</a>
</section>
<div class="grid">
<aside class="card">
<h2>Snapshot</h2>
<p>Strengths <strong>{strengths}</strong></p>
<p>Core gaps <strong>{core}</strong></p>
<p>Nice-to-have <strong>{nice}</strong></p>
</aside>
<section class="card">
<h2>Detailed roadmap</h2>
<div class="roadmap">{blocks}</div>
</section>
</div>"#,
        id = run.id,
        role = text(&run.target_role),
        report_url = attr(&view.report_url),
        strengths = counts.strengths,
        core = counts.core_gaps,
        nice = counts.nice_gaps,
        blocks = render_blocks(&roadmap::render(&run.roadmap_md)),
    )
}

/// HTML for rendered roadmap blocks. Every piece of text is escaped.
pub fn render_blocks(blocks: &[DisplayBlock]) -> String {
    let mut html = String::new();
    for block in blocks {
        match block {
            DisplayBlock::Heading { text: title } => {
                html.push_str(&format!("<h3>{}</h3>", text(title)));
            }
            DisplayBlock::List { items } => {
                html.push_str("<ul>");
                for item in items {
                    html.push_str(&format!("<li>{}</li>", text(item)));
                }
                html.push_str("</ul>");
            }
            DisplayBlock::Paragraph { text: body } => {
                html.push_str(&format!("<p>{}</p>", text(body)));
            }
            DisplayBlock::EmptyState => {
                html.push_str(r#"<p class="empty">No roadmap content available.</p>"#);
            }
        }
    }
    html
}
