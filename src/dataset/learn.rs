//! Detailed presentation records used by the learn surface.

use super::strings;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProject {
    pub id: String,
    pub title: String,
    pub presenter: String,
    pub team: String,
    pub business_context: String,
    pub problem_definition: String,
    pub technology_stack: Vec<String>,
    pub solution: String,
    pub outcomes: String,
    pub key_learnings: String,
    pub stakeholders: Vec<String>,
    /// Titles of related projects.
    pub related_projects: Vec<String>,
    pub tags: Vec<String>,
}

impl LearningProject {
    pub fn searchable_text(&self) -> String {
        [
            self.title.as_str(),
            &self.business_context,
            &self.problem_definition,
            &self.solution,
            &self.outcomes,
            &self.technology_stack.join(" "),
            &self.tags.join(" "),
            &self.team,
        ]
        .join(" ")
        .to_lowercase()
    }
}

pub fn seed_projects() -> Vec<LearningProject> {
    vec![
        LearningProject {
            id: "data-pipeline-opt".into(),
            title: "Data Pipeline Optimization".into(),
            presenter: "Sarah Chen".into(),
            team: "Data Engineering".into(),
            business_context: "Clinical trial data processing was taking 8+ hours daily, creating bottlenecks for research teams and delaying critical analysis.".into(),
            problem_definition: "Legacy ETL processes couldn't scale with increasing data volumes from multiple clinical sites. Manual interventions required, high error rates.".into(),
            technology_stack: strings(&["Python", "Apache Spark", "AWS EMR", "S3", "Airflow", "Docker"]),
            solution: "Implemented distributed processing using Apache Spark on AWS EMR with automated orchestration via Airflow. Containerized all components for consistency.".into(),
            outcomes: "60% reduction in processing time, 95% fewer manual interventions, $200K annual cost savings, improved data quality scores from 85% to 98%".into(),
            key_learnings: "Proper data partitioning strategy crucial for Spark performance. Monitoring and alerting essential for production pipelines.".into(),
            stakeholders: strings(&["Clinical Research Teams", "Data Scientists", "Regulatory Affairs", "IT Operations"]),
            related_projects: strings(&["Real-time Analytics Dashboard", "ML Model Training Pipeline"]),
            tags: strings(&["data-engineering", "spark", "aws", "etl", "clinical-data"]),
        },
        LearningProject {
            id: "ml-deployment".into(),
            title: "ML Model Deployment Platform".into(),
            presenter: "Mike Rodriguez".into(),
            team: "AI/ML Operations".into(),
            business_context: "Data scientists were struggling to deploy models to production, taking weeks to months for each deployment with high failure rates.".into(),
            problem_definition: "No standardized deployment process, manual model versioning, lack of monitoring, difficult rollbacks, inconsistent environments.".into(),
            technology_stack: strings(&["TensorFlow", "Kubernetes", "Docker", "MLflow", "Prometheus", "Grafana", "Python", "FastAPI"]),
            solution: "Built MLOps platform with automated CI/CD pipelines, model registry, A/B testing framework, and comprehensive monitoring dashboard.".into(),
            outcomes: "80% faster model deployment (weeks to days), 99.5% uptime, automated rollbacks, 40% increase in model deployment frequency".into(),
            key_learnings: "Model monitoring as important as deployment. Feature drift detection crucial for model performance. Automated testing prevents production issues.".into(),
            stakeholders: strings(&["Data Science Teams", "Product Teams", "DevOps", "Business Stakeholders"]),
            related_projects: strings(&["Data Pipeline Optimization", "Real-time Analytics Dashboard"]),
            tags: strings(&["mlops", "kubernetes", "tensorflow", "deployment", "monitoring"]),
        },
        LearningProject {
            id: "api-migration".into(),
            title: "API Gateway Migration".into(),
            presenter: "Alex Johnson".into(),
            team: "Platform Engineering".into(),
            business_context: "Monolithic API was becoming a bottleneck for development teams, causing deployment delays and scalability issues.".into(),
            problem_definition: "Single point of failure, difficult to scale individual components, technology lock-in, slow development cycles, poor fault isolation.".into(),
            technology_stack: strings(&["Node.js", "Express", "Docker", "Kubernetes", "MongoDB", "Redis", "Kong API Gateway", "Prometheus"]),
            solution: "Migrated to microservices architecture with API gateway for routing, authentication, and rate limiting. Implemented circuit breakers and health checks.".into(),
            outcomes: "99.9% uptime achieved, 40% performance improvement, 60% faster feature delivery, improved developer productivity".into(),
            key_learnings: "Gradual migration strategy essential. Service mesh complexity requires careful planning. Monitoring and observability critical for microservices.".into(),
            stakeholders: strings(&["Development Teams", "Product Teams", "Infrastructure", "Customer Support"]),
            related_projects: strings(&["Container Orchestration Platform", "Monitoring Infrastructure"]),
            tags: strings(&["microservices", "api-gateway", "nodejs", "kubernetes", "migration"]),
        },
        LearningProject {
            id: "analytics-dashboard".into(),
            title: "Real-time Analytics Dashboard".into(),
            presenter: "Lisa Wang".into(),
            team: "Analytics & Insights".into(),
            business_context: "Business stakeholders needed real-time visibility into key metrics for faster decision-making and operational efficiency.".into(),
            problem_definition: "Batch reporting with 24-hour delays, manual report generation, inconsistent metrics across teams, no self-service analytics.".into(),
            technology_stack: strings(&["React", "D3.js", "WebSocket", "Apache Kafka", "ClickHouse", "Node.js", "Docker"]),
            solution: "Built real-time dashboard with streaming data pipeline using Kafka, columnar database for fast queries, and WebSocket for live updates.".into(),
            outcomes: "Real-time decision making enabled, 90% reduction in report generation time, 50% increase in data-driven decisions, improved operational visibility".into(),
            key_learnings: "User experience crucial for adoption. Data freshness vs. system performance trade-offs. Proper caching strategy essential for performance.".into(),
            stakeholders: strings(&["Business Leaders", "Operations Teams", "Data Analysts", "Product Managers"]),
            related_projects: strings(&["Data Pipeline Optimization", "Business Intelligence Platform"]),
            tags: strings(&["analytics", "real-time", "react", "kafka", "dashboard"]),
        },
    ]
}
