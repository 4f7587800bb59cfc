//! General chat surface: search over the presentation knowledge base.

use crate::dataset::{contains_ci, KnowledgeEntry, Repository};
use crate::tools::registry::{ToolError, ToolName, Toolset};
use crate::tools::schema::{InputSchema, ParamSpec, ToolSpecification, ValidatedArguments};
use crate::tools::to_result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const SYSTEM_PROMPT: &str = "You are AskArko, an AI assistant for the Articulus project within Amgen Operations.

Your role is to help team members find information about ongoing projects, their technology stacks, business context, problem definitions, solutions, and outcomes based on the knowledge base of presentations and documentation from Articulus sessions.

Key guidelines:
- Always search the knowledge base before answering questions about specific projects
- Provide detailed, helpful responses about project details, technology choices, and outcomes
- If you don't find relevant information in the knowledge base, clearly state this
- Encourage knowledge sharing and cross-team collaboration
- Be professional but friendly, matching the collaborative spirit of Articulus
- When discussing projects, include context about business impact, technical approach, and lessons learned when available

Remember: Articulus is a Toastmasters-inspired initiative that promotes knowledge sharing and communication skills development within Amgen Operations.";

const RELEVANCE_SCORE: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnowledgeTool {
    SearchKnowledge,
}

impl ToolName for KnowledgeTool {
    const ALL: &'static [Self] = &[KnowledgeTool::SearchKnowledge];

    fn as_str(self) -> &'static str {
        match self {
            KnowledgeTool::SearchKnowledge => "searchKnowledge",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeFilters {
    pub team: Option<String>,
    pub technology: Option<String>,
    pub presenter: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchKnowledgeArgs {
    query: String,
    filters: Option<KnowledgeFilters>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeHit {
    pub title: String,
    pub presenter: String,
    pub team: String,
    pub content: String,
    pub tags: Vec<String>,
    pub relevance_score: f64,
}

/// Entries whose content, title or tags contain the whole query, narrowed by
/// the optional filters. A blank query matches nothing.
pub fn find_relevant_content(
    entries: &[KnowledgeEntry],
    query: &str,
    filters: &KnowledgeFilters,
) -> Vec<KnowledgeHit> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    entries
        .iter()
        .filter(|entry| {
            let matches_query = contains_ci(&entry.content, query)
                || contains_ci(&entry.title, query)
                || entry.tags.iter().any(|tag| contains_ci(tag, query));

            let matches_team = filters
                .team
                .as_deref()
                .map_or(true, |team| contains_ci(&entry.team, team));
            let matches_technology = filters
                .technology
                .as_deref()
                .map_or(true, |tech| entry.tags.iter().any(|tag| contains_ci(tag, tech)));
            let matches_presenter = filters
                .presenter
                .as_deref()
                .map_or(true, |presenter| contains_ci(&entry.presenter, presenter));

            matches_query && matches_team && matches_technology && matches_presenter
        })
        .map(|entry| KnowledgeHit {
            title: entry.title.clone(),
            presenter: entry.presenter.clone(),
            team: entry.team.clone(),
            content: entry.content.clone(),
            tags: entry.tags.clone(),
            relevance_score: RELEVANCE_SCORE,
        })
        .collect()
}

pub struct KnowledgeToolset {
    entries: Arc<dyn Repository<KnowledgeEntry>>,
}

impl KnowledgeToolset {
    pub fn new(entries: Arc<dyn Repository<KnowledgeEntry>>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl Toolset for KnowledgeToolset {
    type Tool = KnowledgeTool;

    fn specification(&self, tool: KnowledgeTool) -> ToolSpecification {
        match tool {
            KnowledgeTool::SearchKnowledge => ToolSpecification::new(
                tool.as_str(),
                "Search the Articulus knowledge base for information about projects, presentations, and documentation",
                InputSchema::new()
                    .param(ParamSpec::string(
                        "query",
                        "The search query to find relevant project information",
                    ))
                    .param(
                        ParamSpec::object(
                            "filters",
                            "Optional filters",
                            InputSchema::new()
                                .param(ParamSpec::string("team", "Filter by team or department").optional())
                                .param(ParamSpec::string("technology", "Filter by technology stack").optional())
                                .param(ParamSpec::string("presenter", "Filter by presenter name").optional()),
                        )
                        .optional(),
                    ),
            ),
        }
    }

    async fn execute(&self, tool: KnowledgeTool, args: ValidatedArguments) -> Result<Value, ToolError> {
        match tool {
            KnowledgeTool::SearchKnowledge => {
                let args: SearchKnowledgeArgs = args.parse()?;
                let filters = args.filters.unwrap_or_default();
                to_result(find_relevant_content(&self.entries.all(), &args.query, &filters))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::KnowledgeStore;
    use crate::tools::registry::{ToolRegistry, ToolRouter};
    use serde_json::json;

    fn entries() -> Arc<[KnowledgeEntry]> {
        KnowledgeStore::seeded().all()
    }

    #[test]
    fn test_query_matches_tags_case_insensitively() {
        let hits = find_relevant_content(&entries(), "kubernetes", &KnowledgeFilters::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "ML Model Deployment Platform");
        assert_eq!(hits[0].relevance_score, 0.8);
    }

    #[test]
    fn test_filters_narrow_results() {
        let all = find_relevant_content(&entries(), "data", &KnowledgeFilters::default());
        assert!(all.len() >= 2);

        let filtered = find_relevant_content(
            &entries(),
            "data",
            &KnowledgeFilters {
                presenter: Some("sarah".into()),
                ..Default::default()
            },
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].presenter, "Sarah Chen");
    }

    #[test]
    fn test_blank_query_and_no_match_are_empty() {
        assert!(find_relevant_content(&entries(), "  ", &KnowledgeFilters::default()).is_empty());
        assert!(find_relevant_content(&entries(), "quantum", &KnowledgeFilters::default()).is_empty());
    }

    #[tokio::test]
    async fn test_search_through_registry() {
        let store: Arc<dyn Repository<KnowledgeEntry>> = Arc::new(KnowledgeStore::seeded());
        let registry = ToolRegistry::new(KnowledgeToolset::new(store)).unwrap();

        let result = registry
            .invoke("searchKnowledge", &json!({ "query": "Kafka", "filters": { "team": "analytics" } }))
            .await
            .unwrap();

        assert_eq!(result.as_array().unwrap().len(), 1);
        assert_eq!(result[0]["title"], "Real-time Analytics Dashboard");
    }
}
