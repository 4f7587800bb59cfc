//! Cross-domain project records, technology adoption trends and team
//! collaboration patterns used by the explore surface.

use super::strings;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainProject {
    pub id: String,
    pub domain: String,
    pub title: String,
    pub team: String,
    pub technologies: Vec<String>,
    pub business_impact: String,
    pub team_size: u32,
    /// Millions of USD.
    pub budget_millions: f64,
    pub status: String,
    pub collaborations: Vec<String>,
    pub challenges: Vec<String>,
    pub solutions: Vec<String>,
}

impl DomainProject {
    /// Lowercased text matched by free-text exploration queries.
    pub fn searchable_text(&self) -> String {
        [
            self.domain.as_str(),
            &self.title,
            &self.team,
            &self.technologies.join(" "),
            &self.business_impact,
            &self.challenges.join(" "),
            &self.solutions.join(" "),
            &self.collaborations.join(" "),
        ]
        .join(" ")
        .to_lowercase()
    }

    pub fn budget_label(&self) -> String {
        format!("${:.1}M", self.budget_millions)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyTrend {
    pub technology: String,
    /// Percent of teams using it.
    pub adoption: u32,
    pub growth: String,
    pub projects: u32,
    pub teams: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCollaboration {
    pub teams: Vec<String>,
    pub projects: u32,
    pub focus: String,
}

#[allow(clippy::too_many_arguments)]
fn project(
    id: &str,
    domain: &str,
    title: &str,
    team: &str,
    technologies: &[&str],
    business_impact: &str,
    team_size: u32,
    budget_millions: f64,
    status: &str,
    collaborations: &[&str],
    challenges: &[&str],
    solutions: &[&str],
) -> DomainProject {
    DomainProject {
        id: id.into(),
        domain: domain.into(),
        title: title.into(),
        team: team.into(),
        technologies: strings(technologies),
        business_impact: business_impact.into(),
        team_size,
        budget_millions,
        status: status.into(),
        collaborations: strings(collaborations),
        challenges: strings(challenges),
        solutions: strings(solutions),
    }
}

pub fn seed_projects() -> Vec<DomainProject> {
    vec![
        project(
            "data-eng-1",
            "Data Engineering",
            "Clinical Data Pipeline Optimization",
            "Data Engineering",
            &["Python", "Apache Spark", "AWS EMR", "Airflow", "Docker"],
            "60% faster clinical trial data processing",
            8,
            2.1,
            "Production",
            &["AI/ML Team", "Clinical Research"],
            &["Data quality", "Scalability", "Compliance"],
            &["Automated validation", "Distributed processing", "Audit trails"],
        ),
        project(
            "ai-ml-1",
            "AI & Machine Learning",
            "Predictive Analytics for Drug Discovery",
            "AI/ML Operations",
            &["TensorFlow", "PyTorch", "Kubernetes", "MLflow", "Python"],
            "40% reduction in drug discovery timeline",
            12,
            3.5,
            "Development",
            &["Data Engineering", "Research & Development"],
            &["Model interpretability", "Data privacy", "Regulatory compliance"],
            &["Explainable AI", "Federated learning", "Compliance frameworks"],
        ),
        project(
            "cloud-1",
            "Cloud Infrastructure",
            "Multi-Cloud Migration Strategy",
            "Platform Engineering",
            &["AWS", "Azure", "Kubernetes", "Terraform", "Docker"],
            "30% cost reduction, improved reliability",
            15,
            4.2,
            "In Progress",
            &["Security Team", "All Development Teams"],
            &["Vendor lock-in", "Data migration", "Security"],
            &["Multi-cloud architecture", "Gradual migration", "Zero-trust security"],
        ),
        project(
            "app-dev-1",
            "Application Development",
            "Patient Portal Modernization",
            "Digital Health",
            &["React", "Node.js", "PostgreSQL", "Redis", "GraphQL"],
            "50% improvement in patient engagement",
            10,
            1.8,
            "Production",
            &["UX Team", "Clinical Operations"],
            &["Legacy integration", "User adoption", "Performance"],
            &["API-first design", "Progressive migration", "Performance optimization"],
        ),
    ]
}

pub fn seed_trends() -> Vec<TechnologyTrend> {
    [
        ("Python", 85, "+15%", 28, 8),
        ("AWS", 72, "+22%", 24, 6),
        ("Kubernetes", 68, "+35%", 22, 7),
        ("React", 45, "+18%", 15, 4),
        ("TensorFlow", 35, "+28%", 12, 3),
        ("Docker", 78, "+12%", 26, 9),
    ]
    .into_iter()
    .map(|(technology, adoption, growth, projects, teams)| TechnologyTrend {
        technology: technology.into(),
        adoption,
        growth: growth.into(),
        projects,
        teams,
    })
    .collect()
}

pub fn seed_collaborations() -> Vec<TeamCollaboration> {
    [
        (["Data Engineering", "AI/ML Operations"], 8, "ML Pipeline Infrastructure"),
        (["Platform Engineering", "Security"], 6, "Secure Cloud Architecture"),
        (["Digital Health", "Clinical Operations"], 5, "Patient-Centric Solutions"),
        (["Analytics", "Business Intelligence"], 4, "Data-Driven Insights"),
    ]
    .into_iter()
    .map(|(teams, projects, focus)| TeamCollaboration {
        teams: strings(&teams),
        projects,
        focus: focus.into(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_label_uses_one_decimal() {
        let projects = seed_projects();
        assert_eq!(projects[0].budget_label(), "$2.1M");
    }

    #[test]
    fn test_searchable_text_covers_solutions_and_collaborations() {
        let text = seed_projects()[0].searchable_text();
        assert!(text.contains("audit trails"));
        assert!(text.contains("clinical research"));
    }
}
