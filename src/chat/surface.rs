//! The four chat surfaces, each a system prompt plus its own tool registry.

use crate::dataset::{business, explore, learn, KnowledgeEntry, KnowledgeStore, Repository, StaticRepository};
use crate::tools::business::BusinessToolset;
use crate::tools::explore::ExploreToolset;
use crate::tools::knowledge::KnowledgeToolset;
use crate::tools::learn::LearnToolset;
use crate::tools::registry::{RegistryError, ToolRegistry, ToolRouter};
use crate::tools::{business as business_tools, explore as explore_tools, knowledge, learn as learn_tools};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatSurface {
    General,
    Learn,
    Explore,
    BusinessDevelopment,
}

impl ChatSurface {
    pub const ALL: [ChatSurface; 4] = [
        ChatSurface::General,
        ChatSurface::Learn,
        ChatSurface::Explore,
        ChatSurface::BusinessDevelopment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChatSurface::General => "general",
            ChatSurface::Learn => "learn",
            ChatSurface::Explore => "explore",
            ChatSurface::BusinessDevelopment => "business_development",
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            ChatSurface::General => knowledge::SYSTEM_PROMPT,
            ChatSurface::Learn => learn_tools::SYSTEM_PROMPT,
            ChatSurface::Explore => explore_tools::SYSTEM_PROMPT,
            ChatSurface::BusinessDevelopment => business_tools::SYSTEM_PROMPT,
        }
    }
}

pub struct ChatEndpoint {
    pub surface: ChatSurface,
    pub system_prompt: &'static str,
    pub router: Arc<dyn ToolRouter>,
}

impl ChatEndpoint {
    pub fn new(surface: ChatSurface, router: Arc<dyn ToolRouter>) -> Self {
        Self {
            surface,
            system_prompt: surface.system_prompt(),
            router,
        }
    }
}

/// Registries for every surface, built once at startup over shared datasets.
pub struct ChatEndpoints {
    general: ChatEndpoint,
    learn: ChatEndpoint,
    explore: ChatEndpoint,
    business: ChatEndpoint,
}

impl ChatEndpoints {
    pub fn build(knowledge: Arc<KnowledgeStore>) -> Result<Self, RegistryError> {
        let knowledge: Arc<dyn Repository<KnowledgeEntry>> = knowledge;

        let general = ToolRegistry::new(KnowledgeToolset::new(knowledge))?;
        let learn = ToolRegistry::new(LearnToolset::new(Arc::new(StaticRepository::new(
            learn::seed_projects(),
        ))))?;
        let explore = ToolRegistry::new(ExploreToolset::new(
            Arc::new(StaticRepository::new(explore::seed_projects())),
            Arc::new(StaticRepository::new(explore::seed_trends())),
            Arc::new(StaticRepository::new(explore::seed_collaborations())),
        ))?;
        let business = ToolRegistry::new(BusinessToolset::new(
            Arc::new(StaticRepository::new(business::seed_projects())),
            Arc::new(StaticRepository::new(business::seed_benchmarks())),
        ))?;

        Ok(Self {
            general: ChatEndpoint::new(ChatSurface::General, Arc::new(general)),
            learn: ChatEndpoint::new(ChatSurface::Learn, Arc::new(learn)),
            explore: ChatEndpoint::new(ChatSurface::Explore, Arc::new(explore)),
            business: ChatEndpoint::new(ChatSurface::BusinessDevelopment, Arc::new(business)),
        })
    }

    pub fn get(&self, surface: ChatSurface) -> &ChatEndpoint {
        match surface {
            ChatSurface::General => &self.general,
            ChatSurface::Learn => &self.learn,
            ChatSurface::Explore => &self.explore,
            ChatSurface::BusinessDevelopment => &self.business,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_surface_exposes_its_tools() {
        let endpoints = ChatEndpoints::build(Arc::new(KnowledgeStore::seeded())).unwrap();

        let names = |surface| -> Vec<&'static str> {
            endpoints
                .get(surface)
                .router
                .specifications()
                .iter()
                .map(|s| s.name)
                .collect()
        };

        assert_eq!(names(ChatSurface::General), vec!["searchKnowledge"]);
        assert_eq!(
            names(ChatSurface::Learn),
            vec!["searchProjects", "getRelatedProjects", "suggestNextSteps"]
        );
        assert_eq!(names(ChatSurface::Explore).len(), 5);
        assert_eq!(names(ChatSurface::BusinessDevelopment).len(), 5);

        for surface in ChatSurface::ALL {
            let endpoint = endpoints.get(surface);
            assert_eq!(endpoint.surface, surface);
            assert!(endpoint.system_prompt.starts_with("You are AskArko"));
        }
    }
}
