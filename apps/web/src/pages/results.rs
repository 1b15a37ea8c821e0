use crate::models::analysis::{AnalysisRun, Project};

use super::charts::{render_bar_chart, render_coverage, skill_chart_data};
use super::layout::{message_card, page};
use super::{attr, item_list, text, ViewState};

const DEFAULT_SUMMARY: &str = "This analysis compares your validated skills against a reference profile for the target role and highlights strengths and learning gaps.";
const MAX_DETECTED_SKILLS: usize = 12;
const MAX_PROJECTS: usize = 6;
const MAX_PROJECT_SKILLS: usize = 5;

pub fn render(state: &ViewState<AnalysisRun>) -> String {
    let content = match state {
        ViewState::Failed(message) => {
            message_card(Some("Could not load analysis"), message, "error")
        }
        ViewState::Empty => message_card(None, "No analysis data found.", "muted"),
        ViewState::Loaded(run) => loaded(run),
    };
    page("Analysis results", &content)
}

fn loaded(run: &AnalysisRun) -> String {
    let counts = run.gap_counts();
    let report = run.gap_report.clone().unwrap_or_default();
    let summary = report
        .summary
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_SUMMARY);
    let match_percent = counts.match_percent();

    format!(
        r#"<section class="card">
<span class="pill">CV Skill Analysis</span><span class="pill">Run #{id}</span>
<h1>Readiness for <span class="accent">{role}</span></h1>
<p>Below is your match against a curated skill profile for this role. You'll see strengths, missing core skills, and nice-to-have areas, plus suggested portfolio projects.</p>
<a class="button" href="/upload">Analyze another CV</a>
<a class="button" href="/roadmap?run_id={id}">View learning roadmap</a>
</section>
<section class="card grid">
<div>
<h2>Summary</h2>
<p>{summary}</p>
{detected}
</div>
<div>
<p><span class="accent" style="font-size: 2rem">{match_percent}%</span> role readiness</p>
<div class="bar-track"><div class="bar-fill" style="width: {match_percent}%"></div></div>
<p class="muted">{strengths} matched skills · {gaps} gaps identified</p>
</div>
</section>
<section class="card">
<h2>Skill match overview</h2>
<p class="muted">How many of the role's reference skills you already cover, versus how many are missing in your current profile.</p>
{bar_chart}
{coverage}
</section>
<div class="grid">
<section class="card">
<h2>Skill breakdown</h2>
<h3>Strengths ({strengths})</h3>
{strength_list}
<h3>Core gaps ({core})</h3>
{core_list}
<h3>Nice-to-have gaps ({nice})</h3>
{nice_list}
</section>
<section class="card">
<h2>Suggested portfolio projects</h2>
{projects}
</section>
</div>"#,
        id = run.id,
        role = text(&run.target_role),
        summary = text(summary),
        detected = detected_skills(&run.skills.validated_skills, &run.skills.inferred_domains),
        strengths = counts.strengths,
        gaps = counts.total_gaps(),
        core = counts.core_gaps,
        nice = counts.nice_gaps,
        bar_chart = render_bar_chart(&skill_chart_data(counts)),
        coverage = render_coverage(counts),
        strength_list = item_list(&report.strengths, "No clear strengths detected yet."),
        core_list = item_list(&report.missing_core, "No core gaps identified."),
        nice_list = item_list(&report.missing_nice_to_have, "No nice-to-have gaps identified."),
        projects = project_cards(&run.projects),
    )
}

fn detected_skills(skills: &[String], domains: &[String]) -> String {
    let domains = if domains.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p class="muted">Inferred domains: {}</p>"#,
            text(&domains.join(", "))
        )
    };
    if skills.is_empty() {
        return domains;
    }
    let shown: Vec<&str> = skills
        .iter()
        .take(MAX_DETECTED_SKILLS)
        .map(String::as_str)
        .collect();
    let ellipsis = if skills.len() > MAX_DETECTED_SKILLS {
        "…"
    } else {
        ""
    };
    format!(
        r#"<p class="muted">Detected skills in your CV: <span>{}{ellipsis}</span></p>{domains}"#,
        text(&shown.join(", "))
    )
}

fn project_cards(projects: &[Project]) -> String {
    if projects.is_empty() {
        return r#"<p class="muted">No project recommendations available for this run.</p>"#
            .to_string();
    }

    projects
        .iter()
        .take(MAX_PROJECTS)
        .enumerate()
        .map(|(idx, project)| {
            let description = project
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .map(|d| format!("<p>{}</p>", text(d)))
                .unwrap_or_default();
            let mut tags: String = project
                .skills
                .iter()
                .take(MAX_PROJECT_SKILLS)
                .map(|s| format!(r#"<span class="pill">{}</span>"#, text(s)))
                .collect();
            if let Some(difficulty) = project.difficulty.as_deref().filter(|d| !d.is_empty()) {
                tags.push_str(&format!(
                    r#"<span class="pill" title="{}">{}</span>"#,
                    attr(difficulty),
                    text(difficulty)
                ));
            }
            format!(
                r#"<article class="card"><h3>{}</h3>{description}<div>{tags}</div></article>"#,
                text(&project.display_title(idx))
            )
        })
        .collect()
}
