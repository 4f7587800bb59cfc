//! Explore surface: cross-domain analysis of projects, technology adoption and
//! team collaboration.

use crate::dataset::{contains_ci, DomainProject, Repository, TeamCollaboration, TechnologyTrend};
use crate::tools::registry::{ToolError, ToolName, Toolset};
use crate::tools::schema::{InputSchema, ParamSpec, ToolSpecification, ValidatedArguments};
use crate::tools::{search_terms, to_result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const SYSTEM_PROMPT: &str = "You are AskArko, an AI assistant specialized in domain exploration for the Articulus project within Amgen Operations.

Your expertise includes:
- Cross-domain project analysis and insights
- Technology adoption trends and recommendations
- Team collaboration patterns and opportunities
- Business impact assessment across initiatives
- Strategic technology and resource planning

Key capabilities:
- Analyze projects across different domains (Data Engineering, AI/ML, Cloud Infrastructure, Application Development)
- Provide technology adoption insights and trends
- Identify collaboration opportunities between teams
- Suggest best practices based on successful project outcomes
- Offer strategic recommendations for technology choices

Guidelines:
- Always search the knowledge base for relevant domain information
- Provide data-driven insights with specific metrics when available
- Highlight cross-team collaboration opportunities
- Suggest actionable next steps for exploration
- Use visual descriptions for complex relationships (since you can't generate actual charts)
- Be strategic and forward-thinking in your recommendations

Remember: Your goal is to help users discover insights, patterns, and opportunities across the entire Amgen Operations ecosystem.";

const TOP_TECHNOLOGIES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExploreTool {
    ExploreDomain,
    GetTechnologyTrends,
    AnalyzeTeamCollaboration,
    GetDomainSummary,
    IdentifyOpportunities,
}

impl ToolName for ExploreTool {
    const ALL: &'static [Self] = &[
        ExploreTool::ExploreDomain,
        ExploreTool::GetTechnologyTrends,
        ExploreTool::AnalyzeTeamCollaboration,
        ExploreTool::GetDomainSummary,
        ExploreTool::IdentifyOpportunities,
    ];

    fn as_str(self) -> &'static str {
        match self {
            ExploreTool::ExploreDomain => "exploreDomain",
            ExploreTool::GetTechnologyTrends => "getTechnologyTrends",
            ExploreTool::AnalyzeTeamCollaboration => "analyzeTeamCollaboration",
            ExploreTool::GetDomainSummary => "getDomainSummary",
            ExploreTool::IdentifyOpportunities => "identifyOpportunities",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExploreDomainArgs {
    query: String,
    domain: Option<String>,
    include_metrics: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TechnologyTrendsArgs {
    technology: Option<String>,
    include_projects: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamCollaborationArgs {
    team: Option<String>,
    include_metrics: bool,
}

#[derive(Debug, Deserialize)]
struct DomainSummaryArgs {
    domain: String,
}

#[derive(Debug, Deserialize)]
struct OpportunitiesArgs {
    focus: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetrics {
    pub team_size: u32,
    pub budget: String,
    pub business_impact: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExploredProject {
    #[serde(flatten)]
    pub project: DomainProject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ProjectMetrics>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyInsight {
    #[serde(flatten)]
    pub trend: TechnologyTrend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_projects: Option<Vec<DomainProject>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrendReport {
    Single(TechnologyInsight),
    All(Vec<TechnologyTrend>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInsight {
    pub team: String,
    pub projects: Vec<DomainProject>,
    pub collaborations: Vec<TeamCollaboration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_projects: Option<usize>,
    /// Millions of USD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TeamReport {
    Team(TeamInsight),
    All(Vec<TeamCollaboration>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSummary {
    pub domain: String,
    pub project_count: usize,
    pub technologies: Vec<String>,
    pub total_budget: String,
    pub total_team_size: u32,
    pub projects: Vec<DomainProject>,
    pub key_trends: Vec<TechnologyTrend>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adoption: Option<String>,
    pub potential: String,
}

/// Projects matching any query term, optionally restricted to a domain.
pub fn explore_domain(
    projects: &[DomainProject],
    query: &str,
    domain: Option<&str>,
    include_metrics: bool,
) -> Vec<ExploredProject> {
    let terms = search_terms(query);
    projects
        .iter()
        .filter(|p| domain.map_or(true, |d| contains_ci(&p.domain, d)))
        .filter(|p| {
            let text = p.searchable_text();
            terms.iter().any(|term| text.contains(term.as_str()))
        })
        .map(|p| ExploredProject {
            metrics: include_metrics.then(|| ProjectMetrics {
                team_size: p.team_size,
                budget: p.budget_label(),
                business_impact: p.business_impact.clone(),
                status: p.status.clone(),
            }),
            project: p.clone(),
        })
        .collect()
}

/// A single known technology with its projects, or every trend when the
/// technology is absent or unknown.
pub fn technology_trends(
    trends: &[TechnologyTrend],
    projects: &[DomainProject],
    technology: Option<&str>,
    include_projects: bool,
) -> TrendReport {
    let known = technology.and_then(|tech| {
        trends
            .iter()
            .find(|t| t.technology.eq_ignore_ascii_case(tech.trim()))
    });

    match known {
        Some(trend) => TrendReport::Single(TechnologyInsight {
            related_projects: include_projects.then(|| {
                projects
                    .iter()
                    .filter(|p| p.technologies.iter().any(|t| contains_ci(t, &trend.technology)))
                    .cloned()
                    .collect()
            }),
            trend: trend.clone(),
        }),
        None => TrendReport::All(trends.to_vec()),
    }
}

/// Sum of project budgets in millions; zero when `projects` is empty.
fn total_budget_millions(projects: &[DomainProject]) -> f64 {
    // Iterator::sum over f64 starts from -0.0, which would render as "$-0.0M".
    projects.iter().fold(0.0, |acc, p| acc + p.budget_millions)
}

pub fn team_collaboration(
    projects: &dyn Repository<DomainProject>,
    collaborations: &[TeamCollaboration],
    team: Option<&str>,
    include_metrics: bool,
) -> TeamReport {
    let Some(team) = team else {
        return TeamReport::All(collaborations.to_vec());
    };

    let team_projects = projects.lookup(&|p| contains_ci(&p.team, team));
    let team_collaborations = collaborations
        .iter()
        .filter(|c| c.teams.iter().any(|t| contains_ci(t, team)))
        .cloned()
        .collect();

    let (total_projects, total_budget) = if include_metrics {
        (
            Some(team_projects.len()),
            Some(total_budget_millions(&team_projects)),
        )
    } else {
        (None, None)
    };

    TeamReport::Team(TeamInsight {
        team: team.to_string(),
        projects: team_projects,
        collaborations: team_collaborations,
        total_projects,
        total_budget,
    })
}

pub fn domain_summary(
    projects: &dyn Repository<DomainProject>,
    trends: &[TechnologyTrend],
    domain: &str,
) -> DomainSummary {
    let domain_projects = projects.lookup(&|p| contains_ci(&p.domain, domain));

    let mut technologies: Vec<String> = Vec::new();
    for tech in domain_projects.iter().flat_map(|p| &p.technologies) {
        if !technologies.contains(tech) {
            technologies.push(tech.clone());
        }
    }

    let total_budget = total_budget_millions(&domain_projects);
    let key_trends = technologies
        .iter()
        .filter_map(|tech| trends.iter().find(|t| &t.technology == tech))
        .cloned()
        .collect();

    DomainSummary {
        domain: domain.to_string(),
        project_count: domain_projects.len(),
        technologies,
        total_budget: format!("${:.1}M", total_budget),
        total_team_size: domain_projects.iter().map(|p| p.team_size).sum(),
        projects: domain_projects,
        key_trends,
    }
}

/// Collaboration opportunities when the focus mentions collaboration,
/// standardisation on the most adopted technologies when it mentions
/// technology. Both may apply.
pub fn identify_opportunities(
    trends: &[TechnologyTrend],
    collaborations: &[TeamCollaboration],
    focus: &str,
) -> Vec<Opportunity> {
    let mut opportunities = Vec::new();

    if contains_ci(focus, "collaboration") {
        opportunities.extend(collaborations.iter().map(|c| Opportunity {
            kind: "Team Collaboration",
            description: format!("{} collaboration on {}", c.teams.join(" + "), c.focus),
            projects: Some(c.projects),
            adoption: None,
            potential: "High synergy potential for knowledge sharing".to_string(),
        }));
    }

    if contains_ci(focus, "technology") {
        let mut ranked: Vec<&TechnologyTrend> = trends.iter().collect();
        ranked.sort_by(|a, b| b.adoption.cmp(&a.adoption));
        opportunities.extend(ranked.into_iter().take(TOP_TECHNOLOGIES).map(|t| Opportunity {
            kind: "Technology Standardization",
            description: format!("Standardize on {} across teams", t.technology),
            projects: None,
            adoption: Some(format!("{}% current adoption", t.adoption)),
            potential: format!("Could benefit {} teams and {} projects", t.teams, t.projects),
        }));
    }

    opportunities
}

pub struct ExploreToolset {
    projects: Arc<dyn Repository<DomainProject>>,
    trends: Arc<dyn Repository<TechnologyTrend>>,
    collaborations: Arc<dyn Repository<TeamCollaboration>>,
}

impl ExploreToolset {
    pub fn new(
        projects: Arc<dyn Repository<DomainProject>>,
        trends: Arc<dyn Repository<TechnologyTrend>>,
        collaborations: Arc<dyn Repository<TeamCollaboration>>,
    ) -> Self {
        Self {
            projects,
            trends,
            collaborations,
        }
    }
}

#[async_trait]
impl Toolset for ExploreToolset {
    type Tool = ExploreTool;

    fn specification(&self, tool: ExploreTool) -> ToolSpecification {
        match tool {
            ExploreTool::ExploreDomain => ToolSpecification::new(
                tool.as_str(),
                "Search and analyze projects across different domains within Amgen Operations",
                InputSchema::new()
                    .param(ParamSpec::string("query", "Search query for domain exploration"))
                    .param(ParamSpec::string("domain", "Specific domain to focus on").optional())
                    .param(
                        ParamSpec::boolean("includeMetrics", "Include business metrics and impact data")
                            .with_default(true),
                    ),
            ),
            ExploreTool::GetTechnologyTrends => ToolSpecification::new(
                tool.as_str(),
                "Get insights about technology adoption, trends, and usage across teams",
                InputSchema::new()
                    .param(ParamSpec::string("technology", "Specific technology to analyze").optional())
                    .param(
                        ParamSpec::boolean("includeProjects", "Include related projects")
                            .with_default(true),
                    ),
            ),
            ExploreTool::AnalyzeTeamCollaboration => ToolSpecification::new(
                tool.as_str(),
                "Analyze team collaboration patterns and identify opportunities",
                InputSchema::new()
                    .param(ParamSpec::string("team", "Specific team to analyze").optional())
                    .param(
                        ParamSpec::boolean("includeMetrics", "Include collaboration metrics")
                            .with_default(true),
                    ),
            ),
            ExploreTool::GetDomainSummary => ToolSpecification::new(
                tool.as_str(),
                "Get comprehensive summary of a specific domain including projects, technologies, and trends",
                InputSchema::new().param(ParamSpec::string(
                    "domain",
                    "Domain to summarize (e.g., 'Data Engineering', 'AI & Machine Learning')",
                )),
            ),
            ExploreTool::IdentifyOpportunities => ToolSpecification::new(
                tool.as_str(),
                "Identify collaboration opportunities, technology synergies, and strategic recommendations",
                InputSchema::new().param(ParamSpec::string(
                    "focus",
                    "Focus area for opportunity identification (e.g., 'cross-team collaboration', 'technology consolidation')",
                )),
            ),
        }
    }

    async fn execute(&self, tool: ExploreTool, args: ValidatedArguments) -> Result<Value, ToolError> {
        match tool {
            ExploreTool::ExploreDomain => {
                let args: ExploreDomainArgs = args.parse()?;
                to_result(explore_domain(
                    &self.projects.all(),
                    &args.query,
                    args.domain.as_deref(),
                    args.include_metrics,
                ))
            }
            ExploreTool::GetTechnologyTrends => {
                let args: TechnologyTrendsArgs = args.parse()?;
                to_result(technology_trends(
                    &self.trends.all(),
                    &self.projects.all(),
                    args.technology.as_deref(),
                    args.include_projects,
                ))
            }
            ExploreTool::AnalyzeTeamCollaboration => {
                let args: TeamCollaborationArgs = args.parse()?;
                to_result(team_collaboration(
                    self.projects.as_ref(),
                    &self.collaborations.all(),
                    args.team.as_deref(),
                    args.include_metrics,
                ))
            }
            ExploreTool::GetDomainSummary => {
                let args: DomainSummaryArgs = args.parse()?;
                to_result(domain_summary(self.projects.as_ref(), &self.trends.all(), &args.domain))
            }
            ExploreTool::IdentifyOpportunities => {
                let args: OpportunitiesArgs = args.parse()?;
                to_result(identify_opportunities(
                    &self.trends.all(),
                    &self.collaborations.all(),
                    &args.focus,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::explore::{seed_collaborations, seed_projects, seed_trends};
    use crate::dataset::StaticRepository;
    use crate::tools::registry::{ToolRegistry, ToolRouter};
    use serde_json::json;

    fn registry() -> ToolRegistry<ExploreToolset> {
        ToolRegistry::new(ExploreToolset::new(
            Arc::new(StaticRepository::new(seed_projects())),
            Arc::new(StaticRepository::new(seed_trends())),
            Arc::new(StaticRepository::new(seed_collaborations())),
        ))
        .unwrap()
    }

    fn project_repo() -> StaticRepository<DomainProject> {
        StaticRepository::new(seed_projects())
    }

    #[test]
    fn test_explore_domain_matches_terms_and_domain_filter() {
        let projects = seed_projects();

        let hits = explore_domain(&projects, "kubernetes", None, true);
        let ids: Vec<_> = hits.iter().map(|h| h.project.id.as_str()).collect();
        assert_eq!(ids, vec!["ai-ml-1", "cloud-1"]);
        assert_eq!(hits[1].metrics.as_ref().unwrap().budget, "$4.2M");

        let cloud = explore_domain(&projects, "kubernetes", Some("cloud"), false);
        assert_eq!(cloud.len(), 1);
        assert!(cloud[0].metrics.is_none());

        assert!(explore_domain(&projects, "   ", None, true).is_empty());
    }

    #[test]
    fn test_known_technology_lists_its_projects() {
        let report = technology_trends(&seed_trends(), &seed_projects(), Some("KUBERNETES"), true);
        match report {
            TrendReport::Single(insight) => {
                assert_eq!(insight.trend.adoption, 68);
                assert_eq!(insight.related_projects.unwrap().len(), 2);
            }
            TrendReport::All(_) => panic!("expected a single technology"),
        }
    }

    #[test]
    fn test_unknown_technology_falls_back_to_all_trends() {
        let report = technology_trends(&seed_trends(), &seed_projects(), Some("Rust"), true);
        assert_eq!(report, TrendReport::All(seed_trends()));
    }

    #[test]
    fn test_team_collaboration_totals() {
        let report = team_collaboration(
            &project_repo(),
            &seed_collaborations(),
            Some("data engineering"),
            true,
        );
        let TeamReport::Team(insight) = report else {
            panic!("expected a team insight");
        };
        assert_eq!(insight.total_projects, Some(1));
        assert_eq!(insight.total_budget, Some(2.1));
        assert_eq!(insight.collaborations.len(), 1);

        let all = team_collaboration(&project_repo(), &seed_collaborations(), None, true);
        assert_eq!(all, TeamReport::All(seed_collaborations()));
    }

    #[test]
    fn test_unknown_team_reports_zero_totals() {
        let report = team_collaboration(&project_repo(), &seed_collaborations(), Some("Nobody"), true);
        let TeamReport::Team(insight) = report else {
            panic!("expected a team insight");
        };
        assert!(insight.projects.is_empty());
        assert_eq!(insight.total_projects, Some(0));

        let budget = insight.total_budget.unwrap();
        assert_eq!(budget, 0.0);
        assert!(budget.is_sign_positive());

        let value = serde_json::to_value(TeamReport::Team(insight)).unwrap();
        assert_eq!(value["totalBudget"].to_string(), "0.0");
    }

    #[test]
    fn test_domain_summary() {
        let summary = domain_summary(&project_repo(), &seed_trends(), "Data Engineering");
        assert_eq!(summary.project_count, 1);
        assert_eq!(summary.technologies.len(), 5);
        assert_eq!(summary.total_budget, "$2.1M");
        assert_eq!(summary.total_team_size, 8);
        let trends: Vec<_> = summary.key_trends.iter().map(|t| t.technology.as_str()).collect();
        assert_eq!(trends, vec!["Python", "Docker"]);
    }

    #[test]
    fn test_domain_summary_without_matches_is_zeroed() {
        let summary = domain_summary(&project_repo(), &seed_trends(), "Quantum");
        assert_eq!(summary.project_count, 0);
        assert_eq!(summary.total_budget, "$0.0M");
        assert!(summary.key_trends.is_empty());
    }

    #[test]
    fn test_opportunities_by_focus() {
        let both = identify_opportunities(
            &seed_trends(),
            &seed_collaborations(),
            "technology consolidation and cross-team collaboration",
        );
        assert_eq!(both.len(), 7);
        let standardize: Vec<_> = both
            .iter()
            .filter(|o| o.kind == "Technology Standardization")
            .map(|o| o.description.as_str())
            .collect();
        assert_eq!(
            standardize,
            vec![
                "Standardize on Python across teams",
                "Standardize on Docker across teams",
                "Standardize on AWS across teams",
            ]
        );

        assert!(identify_opportunities(&seed_trends(), &seed_collaborations(), "hiring").is_empty());
    }

    #[tokio::test]
    async fn test_trends_without_projects_omits_them() {
        let result = registry()
            .invoke("getTechnologyTrends", &json!({ "technology": "Docker", "includeProjects": false }))
            .await
            .unwrap();

        assert_eq!(result["technology"], "Docker");
        assert_eq!(result["growth"], "+12%");
        assert!(result.get("relatedProjects").is_none());
    }
}
