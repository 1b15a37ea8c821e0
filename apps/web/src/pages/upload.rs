use super::layout::page;
use super::{attr, text};

/// Roles offered as suggestions; any other role can still be typed.
pub const TARGET_ROLES: &[&str] = &[
    "Machine Learning Engineer",
    "Data Scientist",
    "AI Engineer",
    "MLOps Engineer",
    "Data Analyst",
];

/// Renders the upload page. `target_role` pre-fills the role input so a
/// failed submission does not lose what the user typed.
pub fn render(error: Option<&str>, target_role: &str) -> String {
    let error_banner = error
        .map(|e| format!(r#"<p class="error" role="alert">{}</p>"#, text(e)))
        .unwrap_or_default();

    let options: String = TARGET_ROLES
        .iter()
        .map(|role| format!(r#"<option value="{}"></option>"#, attr(role)))
        .collect();

    let content = format!(
        r#"<section class="grid">
<div>
<span class="pill">Step 1 · Upload your CV and choose a target role</span>
<h1>Upload your CV and <span class="accent">let the AI mentor read it.</span></h1>
<p>The engine extracts your skills, maps them to a role-specific taxonomy, runs gap analysis,
and generates both a learning roadmap and project suggestions.</p>
<ul class="muted">
<li><strong>Skill map</strong>: which skills you already have vs. what the role expects.</li>
<li><strong>Roadmap phases</strong>: a phased plan with concrete topics, tools and milestones.</li>
<li><strong>Portfolio</strong>: project ideas aligned to your gaps.</li>
<li><strong>Export</strong>: a downloadable report for planning or interviews.</li>
</ul>
</div>
<div class="card">
<h2>Upload your CV</h2>
<p class="muted">Supported formats: PDF, DOC, DOCX. Your file is processed on the backend and only used to generate this analysis.</p>
{error_banner}
<form method="post" action="/upload" enctype="multipart/form-data">
<label for="file">CV / Resume file</label>
<input id="file" type="file" name="file" accept=".pdf,.doc,.docx">
<label for="target_role">Target role</label>
<input id="target_role" type="text" name="target_role" list="target-roles" value="{role}" placeholder="e.g. Data Scientist">
<datalist id="target-roles">{options}</datalist>
<button class="button" type="submit">Analyze CV</button>
</form>
</div>
</section>"#,
        role = attr(target_role),
    );

    page("Upload your CV", &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_posts_multipart_to_upload() {
        let html = render(None, "");
        assert!(html.contains(r#"action="/upload""#));
        assert!(html.contains(r#"enctype="multipart/form-data""#));
        assert!(html.contains(r#"accept=".pdf,.doc,.docx""#));
        assert!(!html.contains(r#"role="alert""#));
    }

    #[test]
    fn test_all_suggested_roles_listed() {
        let html = render(None, "");
        for role in TARGET_ROLES {
            assert!(html.contains(&format!(r#"<option value="{role}">"#)), "{role}");
        }
    }

    #[test]
    fn test_error_and_role_are_preserved_and_escaped() {
        let html = render(Some("Please upload <your> CV"), r#"Data "Wizard""#);
        assert!(html.contains("Please upload &lt;your&gt; CV"));
        assert!(html.contains(r#"value="Data &quot;Wizard&quot;""#));
    }
}
