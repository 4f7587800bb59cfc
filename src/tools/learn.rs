//! Learn surface: conversational walkthroughs of presented projects.

use crate::dataset::{contains_ci, LearningProject, Repository};
use crate::tools::registry::{ToolError, ToolName, Toolset};
use crate::tools::schema::{InputSchema, ParamSpec, ToolSpecification, ValidatedArguments};
use crate::tools::{search_terms, to_result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const SYSTEM_PROMPT: &str = "You are AskArko, an AI assistant for the Articulus project within Amgen Operations. Your role is to help users learn about projects through detailed, conversational explanations.

Key guidelines:
- Always search the knowledge base first before answering project-related questions
- Provide comprehensive answers covering business context, technical details, and outcomes
- Use a conversational, educational tone that encourages learning
- When discussing projects, include relevant stakeholders, technology choices, and lessons learned
- Suggest related projects and next steps for deeper learning
- If information isn't in the knowledge base, clearly state this and offer to help with general guidance
- Present information in a structured, easy-to-understand format
- Encourage follow-up questions and deeper exploration

Remember: Your goal is to facilitate knowledge sharing and help users understand the full context of projects within Amgen Operations.";

const RELEVANCE_SCORE: f64 = 0.9;
const SUMMARY_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LearnTool {
    SearchProjects,
    GetRelatedProjects,
    SuggestNextSteps,
}

impl ToolName for LearnTool {
    const ALL: &'static [Self] = &[
        LearnTool::SearchProjects,
        LearnTool::GetRelatedProjects,
        LearnTool::SuggestNextSteps,
    ];

    fn as_str(self) -> &'static str {
        match self {
            LearnTool::SearchProjects => "searchProjects",
            LearnTool::GetRelatedProjects => "getRelatedProjects",
            LearnTool::SuggestNextSteps => "suggestNextSteps",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchProjectsArgs {
    query: String,
    include_details: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelatedProjectsArgs {
    project_id: String,
    technology: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NextStepsArgs {
    current_topic: String,
    user_role: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMatch {
    #[serde(flatten)]
    pub project: LearningProject,
    pub relevance_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub title: String,
    pub team: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub description: String,
}

/// Projects whose searchable text contains any query term.
pub fn search_projects(projects: &[LearningProject], query: &str) -> Vec<ProjectMatch> {
    let terms = search_terms(query);
    projects
        .iter()
        .filter(|project| {
            let text = project.searchable_text();
            terms.iter().any(|term| text.contains(term.as_str()))
        })
        .map(|project| ProjectMatch {
            project: project.clone(),
            relevance_score: RELEVANCE_SCORE,
        })
        .collect()
}

pub fn summarize(project: &LearningProject) -> ProjectSummary {
    let head: String = project.business_context.chars().take(SUMMARY_CHARS).collect();
    ProjectSummary {
        title: project.title.clone(),
        team: project.team.clone(),
        summary: format!("{}...", head),
    }
}

/// Projects listed as related to `project_id`, plus any using `technology`.
/// An unknown id yields nothing.
pub fn related_projects(
    projects: &[LearningProject],
    project_id: &str,
    technology: Option<&str>,
) -> Vec<LearningProject> {
    let Some(anchor) = projects.iter().find(|p| p.id == project_id) else {
        return Vec::new();
    };

    projects
        .iter()
        .filter(|p| {
            anchor.related_projects.contains(&p.title)
                || technology.map_or(false, |tech| {
                    p.technology_stack.iter().any(|t| contains_ci(t, tech))
                })
        })
        .cloned()
        .collect()
}

pub fn next_steps(topic: &str, role: Option<&str>) -> Vec<Suggestion> {
    let perspective = role
        .map(|r| format!(" from a {} perspective", r))
        .unwrap_or_default();

    vec![
        Suggestion {
            kind: "documentation",
            title: "Technical Documentation",
            description: format!("Deep dive into {} implementation details{}", topic, perspective),
        },
        Suggestion {
            kind: "team",
            title: "Connect with Team",
            description: format!("Reach out to team members working on {}", topic),
        },
        Suggestion {
            kind: "related",
            title: "Explore Related Projects",
            description: format!("Discover projects that complement {}", topic),
        },
    ]
}

pub struct LearnToolset {
    projects: Arc<dyn Repository<LearningProject>>,
}

impl LearnToolset {
    pub fn new(projects: Arc<dyn Repository<LearningProject>>) -> Self {
        Self { projects }
    }
}

#[async_trait]
impl Toolset for LearnToolset {
    type Tool = LearnTool;

    fn specification(&self, tool: LearnTool) -> ToolSpecification {
        match tool {
            LearnTool::SearchProjects => ToolSpecification::new(
                tool.as_str(),
                "Search the Articulus knowledge base for detailed project information including business context, technical details, and outcomes",
                InputSchema::new()
                    .param(ParamSpec::string("query", "Search query for finding relevant projects"))
                    .param(
                        ParamSpec::boolean(
                            "includeDetails",
                            "Whether to include detailed project information",
                        )
                        .with_default(true),
                    ),
            ),
            LearnTool::GetRelatedProjects => ToolSpecification::new(
                tool.as_str(),
                "Find projects related to a specific project or technology",
                InputSchema::new()
                    .param(ParamSpec::string(
                        "projectId",
                        "ID of the project to find related projects for",
                    ))
                    .param(
                        ParamSpec::string("technology", "Technology to find related projects for")
                            .optional(),
                    ),
            ),
            LearnTool::SuggestNextSteps => ToolSpecification::new(
                tool.as_str(),
                "Suggest next learning steps based on user's current interest",
                InputSchema::new()
                    .param(ParamSpec::string(
                        "currentTopic",
                        "The topic or project the user is currently learning about",
                    ))
                    .param(ParamSpec::string("userRole", "User's role or interest area").optional()),
            ),
        }
    }

    async fn execute(&self, tool: LearnTool, args: ValidatedArguments) -> Result<Value, ToolError> {
        match tool {
            LearnTool::SearchProjects => {
                let args: SearchProjectsArgs = args.parse()?;
                let matches = search_projects(&self.projects.all(), &args.query);
                if args.include_details {
                    to_result(matches)
                } else {
                    to_result(matches.iter().map(|m| summarize(&m.project)).collect::<Vec<_>>())
                }
            }
            LearnTool::GetRelatedProjects => {
                let args: RelatedProjectsArgs = args.parse()?;
                to_result(related_projects(
                    &self.projects.all(),
                    &args.project_id,
                    args.technology.as_deref(),
                ))
            }
            LearnTool::SuggestNextSteps => {
                let args: NextStepsArgs = args.parse()?;
                to_result(next_steps(&args.current_topic, args.user_role.as_deref()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::learn::seed_projects;
    use crate::dataset::StaticRepository;
    use crate::tools::registry::{ToolRegistry, ToolRouter};
    use serde_json::json;

    fn registry() -> ToolRegistry<LearnToolset> {
        let repo: Arc<dyn Repository<LearningProject>> =
            Arc::new(StaticRepository::new(seed_projects()));
        ToolRegistry::new(LearnToolset::new(repo)).unwrap()
    }

    #[test]
    fn test_any_term_matches() {
        let hits = search_projects(&seed_projects(), "kafka mlops");
        let titles: Vec<_> = hits.iter().map(|h| h.project.title.as_str()).collect();
        assert_eq!(titles, vec!["ML Model Deployment Platform", "Real-time Analytics Dashboard"]);
        assert!(hits.iter().all(|h| h.relevance_score == 0.9));
    }

    #[test]
    fn test_summary_truncates_business_context() {
        let summary = summarize(&seed_projects()[0]);
        assert!(summary.summary.ends_with("..."));
        assert_eq!(summary.summary.chars().count(), SUMMARY_CHARS + 3);
    }

    #[test]
    fn test_related_projects_by_title_and_technology() {
        let projects = seed_projects();

        let related = related_projects(&projects, "ml-deployment", None);
        let titles: Vec<_> = related.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Data Pipeline Optimization", "Real-time Analytics Dashboard"]);

        let with_tech = related_projects(&projects, "ml-deployment", Some("express"));
        assert_eq!(with_tech.len(), 3);

        assert!(related_projects(&projects, "missing", Some("python")).is_empty());
    }

    #[tokio::test]
    async fn test_search_without_details_returns_summaries() {
        let result = registry()
            .invoke("searchProjects", &json!({ "query": "spark", "includeDetails": false }))
            .await
            .unwrap();

        let first = &result[0];
        assert_eq!(first["title"], "Data Pipeline Optimization");
        assert!(first.get("businessContext").is_none());
        assert!(first["summary"].as_str().unwrap().ends_with("..."));
    }

    #[tokio::test]
    async fn test_search_with_details_flattens_project() {
        let result = registry()
            .invoke("searchProjects", &json!({ "query": "spark" }))
            .await
            .unwrap();

        assert_eq!(result[0]["presenter"], "Sarah Chen");
        assert_eq!(result[0]["relevanceScore"], 0.9);
    }

    #[tokio::test]
    async fn test_next_steps_mention_topic() {
        let result = registry()
            .invoke("suggestNextSteps", &json!({ "currentTopic": "MLOps", "userRole": "data scientist" }))
            .await
            .unwrap();

        let steps = result.as_array().unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0]["type"], "documentation");
        assert!(steps[0]["description"].as_str().unwrap().contains("data scientist"));
        assert!(steps[2]["description"].as_str().unwrap().contains("MLOps"));
    }
}
