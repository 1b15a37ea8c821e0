use serde::Deserialize;

/// A persisted analysis run as returned by `GET /analysis/{id}`.
///
/// The backend fills absent JSON columns with `{}` / `[]` / `""`, so every
/// collection defaults to empty rather than failing the whole page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisRun {
    pub id: i64,
    pub target_role: String,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub gap_report: Option<GapReport>,
    #[serde(default)]
    pub roadmap_md: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub validated_skills: Vec<String>,
    #[serde(default)]
    pub inferred_domains: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GapReport {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub missing_core: Vec<String>,
    #[serde(default)]
    pub missing_nice_to_have: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// A suggested portfolio project. Older runs use `name` instead of `title`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl Project {
    /// `index` is zero-based; the fallback label is one-based.
    pub fn display_title(&self, index: usize) -> String {
        non_blank(self.title.as_deref())
            .or_else(|| non_blank(self.name.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Project {}", index + 1))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Skill counts shown in snapshots, readiness bars and charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GapCounts {
    pub strengths: usize,
    pub core_gaps: usize,
    pub nice_gaps: usize,
}

impl GapCounts {
    pub fn from_report(report: Option<&GapReport>) -> Self {
        report
            .map(|r| GapCounts {
                strengths: r.strengths.len(),
                core_gaps: r.missing_core.len(),
                nice_gaps: r.missing_nice_to_have.len(),
            })
            .unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.strengths + self.core_gaps + self.nice_gaps
    }

    pub fn total_gaps(&self) -> usize {
        self.core_gaps + self.nice_gaps
    }

    /// Share of role-relevant skills already covered, rounded to a whole percent.
    pub fn match_percent(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (self.strengths as f64 / total as f64 * 100.0).round() as u32
    }
}

impl AnalysisRun {
    pub fn gap_counts(&self) -> GapCounts {
        GapCounts::from_report(self.gap_report.as_ref())
    }
}
