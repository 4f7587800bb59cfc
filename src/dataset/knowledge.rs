//! Presentation knowledge base searched by the general chat surface and
//! extended by uploads.
//!
//! Uploads make this the one writable dataset. Writers are serialized by a
//! lock and publish a fresh `Arc` snapshot; readers clone the current `Arc`
//! and never observe a half-applied insert.

use super::{strings, Repository};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Presentation,
    Document,
    Video,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeEntry {
    pub id: String,
    pub title: String,
    pub presenter: String,
    pub team: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Fields supplied by an upload; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewKnowledgeEntry {
    pub title: String,
    pub presenter: String,
    pub team: String,
    pub content: String,
    pub tags: Vec<String>,
    pub kind: EntryKind,
}

pub struct KnowledgeStore {
    entries: RwLock<Arc<[KnowledgeEntry]>>,
}

impl KnowledgeStore {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self {
            entries: RwLock::new(entries.into()),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_entries())
    }

    /// Append an entry and return its generated id.
    pub fn insert(&self, entry: NewKnowledgeEntry) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let record = KnowledgeEntry {
            id: id.clone(),
            title: entry.title,
            presenter: entry.presenter,
            team: entry.team,
            content: entry.content,
            tags: entry.tags,
            kind: entry.kind,
        };

        let mut guard = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let mut next: Vec<KnowledgeEntry> = guard.iter().cloned().collect();
        next.push(record);
        *guard = next.into();

        tracing::info!(id = %id, total = guard.len(), "Knowledge entry stored");
        id
    }

    pub fn len(&self) -> usize {
        self.all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Repository<KnowledgeEntry> for KnowledgeStore {
    fn all(&self) -> Arc<[KnowledgeEntry]> {
        let guard = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }
}

fn seed_entries() -> Vec<KnowledgeEntry> {
    vec![
        KnowledgeEntry {
            id: "1".into(),
            title: "Data Pipeline Optimization".into(),
            presenter: "Sarah Chen".into(),
            team: "Data Engineering".into(),
            content: "Implemented Apache Spark-based data pipeline optimization reducing processing time by 60%. Used Python and AWS EMR for scalable data processing. Key outcomes: improved data freshness, reduced costs, better resource utilization.".into(),
            tags: strings(&["Python", "Apache Spark", "AWS", "Data Engineering", "Performance"]),
            kind: EntryKind::Presentation,
        },
        KnowledgeEntry {
            id: "2".into(),
            title: "ML Model Deployment Platform".into(),
            presenter: "Mike Rodriguez".into(),
            team: "AI/ML".into(),
            content: "Built MLOps platform using TensorFlow Serving and Kubernetes for automated model deployment. Implemented CI/CD pipelines for model versioning and A/B testing. Results: 80% faster model deployment, improved model monitoring.".into(),
            tags: strings(&["TensorFlow", "Kubernetes", "MLOps", "CI/CD", "Model Deployment"]),
            kind: EntryKind::Presentation,
        },
        KnowledgeEntry {
            id: "3".into(),
            title: "API Gateway Migration".into(),
            presenter: "Alex Johnson".into(),
            team: "Platform Engineering".into(),
            content: "Migrated monolithic API to microservices architecture using Node.js and Docker. Implemented API gateway with rate limiting and authentication. Achieved 99.9% uptime and 40% performance improvement.".into(),
            tags: strings(&["Node.js", "Docker", "Microservices", "API Gateway", "Migration"]),
            kind: EntryKind::Presentation,
        },
        KnowledgeEntry {
            id: "4".into(),
            title: "Real-time Analytics Dashboard".into(),
            presenter: "Lisa Wang".into(),
            team: "Analytics".into(),
            content: "Developed real-time analytics dashboard using React and WebSocket connections. Integrated with Kafka for streaming data processing. Business impact: real-time decision making, improved operational visibility.".into(),
            tags: strings(&["React", "WebSocket", "Kafka", "Real-time", "Analytics"]),
            kind: EntryKind::Presentation,
        },
    ]
}
