//! Business-development surface: similarity search over past projects and
//! the derived planning documents built from it.

use crate::dataset::{contains_ci, BusinessProject, IndustryBenchmark, Repository};
use crate::tools::registry::{ToolError, ToolName, Toolset};
use crate::tools::schema::{InputSchema, ParamSpec, ToolSpecification, ValidatedArguments};
use crate::tools::{search_terms, to_result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const SYSTEM_PROMPT: &str = "You are AskArko, a specialized Business Development AI assistant for the Articulus project within Amgen Operations.

Your expertise includes:
- Finding and analyzing similar projects for business case development
- Generating comprehensive business development materials (presentations, budgets, team structures)
- Providing data-driven insights on project success factors and risks
- Creating financial projections and ROI analysis
- Recommending optimal team structures and resource allocation
- Identifying industry benchmarks and best practices

Key capabilities:
- Search historical project database for similar initiatives
- Generate executive presentations and technical specifications
- Create detailed budget breakdowns and resource plans
- Analyze success patterns and risk factors from past projects
- Provide strategic recommendations based on data insights

Guidelines:
- Always ground recommendations in data from similar projects
- Provide specific, actionable insights with quantified benefits
- Include both optimistic and realistic scenarios in projections
- Highlight key success factors and potential risks
- Suggest concrete next steps for project planning
- Format responses for business stakeholders (clear, concise, data-driven)

Remember: Your goal is to accelerate business development by leveraging insights from Amgen Operations' project history and best practices.";

pub const MIN_SIMILARITY: u32 = 60;
pub const MAX_SIMILARITY: u32 = 95;
pub const TOP_MATCHES: usize = 5;

const TITLE_WEIGHT: u32 = 3;
const DOMAIN_WEIGHT: u32 = 2;
const DRIVER_WEIGHT: u32 = 2;
const TECHNOLOGY_WEIGHT: u32 = 1;

const DEFAULT_OBJECTIVE: &str = "Transform business operations through technology innovation";
const EXPECTED_ROI: u32 = 150;

/// (investment, savings) as fractions of the budget for years one to three.
const PROJECTION_RATIOS: [(f64, f64); 3] = [(0.6, 0.15), (0.4, 0.75), (0.1, 1.0)];

const UTILIZATION_RATE: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessTool {
    FindSimilarProjects,
    GenerateBusinessCase,
    RecommendTeamStructure,
    AnalyzeSuccessFactors,
    GeneratePresentationOutline,
}

impl ToolName for BusinessTool {
    const ALL: &'static [Self] = &[
        BusinessTool::FindSimilarProjects,
        BusinessTool::GenerateBusinessCase,
        BusinessTool::RecommendTeamStructure,
        BusinessTool::AnalyzeSuccessFactors,
        BusinessTool::GeneratePresentationOutline,
    ];

    fn as_str(self) -> &'static str {
        match self {
            BusinessTool::FindSimilarProjects => "findSimilarProjects",
            BusinessTool::GenerateBusinessCase => "generateBusinessCase",
            BusinessTool::RecommendTeamStructure => "recommendTeamStructure",
            BusinessTool::AnalyzeSuccessFactors => "analyzeSuccessFactors",
            BusinessTool::GeneratePresentationOutline => "generatePresentationOutline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub const VALUES: &'static [&'static str] = &["low", "medium", "high"];

    pub fn multiplier(self) -> f64 {
        match self {
            Complexity::Low => 1.0,
            Complexity::Medium => 1.1,
            Complexity::High => 1.3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Executive,
    Technical,
    Financial,
    Team,
}

impl DocumentType {
    pub const VALUES: &'static [&'static str] = &["executive", "technical", "financial", "team"];
}

/// Inclusive USD bounds parsed from text such as `1M-3M` or `$500k - 2,000,000`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

impl BudgetRange {
    pub fn parse(text: &str) -> Option<Self> {
        let (lo, hi) = text.split_once(['-', '–'])?;
        let min = parse_amount(lo)?;
        let max = parse_amount(hi)?;
        (min <= max).then_some(Self { min, max })
    }

    pub fn contains(&self, amount: f64) -> bool {
        (self.min..=self.max).contains(&amount)
    }
}

fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect::<String>()
        .to_lowercase();

    let (digits, scale) = match cleaned.chars().last()? {
        'k' => (&cleaned[..cleaned.len() - 1], 1_000.0),
        'm' => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        _ => (cleaned.as_str(), 1.0),
    };
    let value: f64 = digits.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value * scale)
}

#[derive(Debug, Clone, Default)]
pub struct ProjectFilters {
    pub domain: Option<String>,
    pub technology: Option<String>,
    pub budget_range: Option<String>,
}

impl ProjectFilters {
    fn accepts(&self, project: &BusinessProject) -> bool {
        let domain_ok = self
            .domain
            .as_deref()
            .map_or(true, |d| contains_ci(&project.domain, d));
        let technology_ok = self
            .technology
            .as_deref()
            .map_or(true, |tech| project.technologies.iter().any(|t| contains_ci(t, tech)));
        let budget_ok = self
            .budget_range
            .as_deref()
            .and_then(BudgetRange::parse)
            .map_or(true, |range| range.contains(project.budget as f64));

        domain_ok && technology_ok && budget_ok
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindSimilarArgs {
    description: String,
    domain: Option<String>,
    technology: Option<String>,
    budget_range: Option<String>,
    include_metrics: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BusinessCaseArgs {
    project_title: String,
    objective: String,
    budget: f64,
    timeline: f64,
    domain: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamStructureArgs {
    project_type: String,
    budget: f64,
    duration: f64,
    complexity: Complexity,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuccessFactorsArgs {
    project_domain: String,
    include_risks: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutlineArgs {
    document_type: DocumentType,
    project_title: String,
    audience: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarProject {
    #[serde(flatten)]
    pub project: BusinessProject,
    pub similarity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark_data: Option<IndustryBenchmark>,
}

fn keyword_score(project: &BusinessProject, keywords: &[String]) -> u32 {
    keywords
        .iter()
        .map(|keyword| {
            let mut score = 0;
            if contains_ci(&project.title, keyword) {
                score += TITLE_WEIGHT;
            }
            if contains_ci(&project.domain, keyword) {
                score += DOMAIN_WEIGHT;
            }
            if project.business_drivers.iter().any(|d| contains_ci(d, keyword)) {
                score += DRIVER_WEIGHT;
            }
            if project.technologies.iter().any(|t| contains_ci(t, keyword)) {
                score += TECHNOLOGY_WEIGHT;
            }
            score
        })
        .sum()
}

/// Rank filtered projects by weighted keyword overlap with `description`.
///
/// Similarity is the raw score times ten clamped to
/// [`MIN_SIMILARITY`]..=[`MAX_SIMILARITY`]; equal scores keep dataset order
/// and at most [`TOP_MATCHES`] projects are returned. A blank description
/// matches nothing.
pub fn find_similar_projects(
    projects: &[BusinessProject],
    description: &str,
    filters: &ProjectFilters,
) -> Vec<SimilarProject> {
    let keywords = search_terms(description);
    if keywords.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<SimilarProject> = projects
        .iter()
        .filter(|p| filters.accepts(p))
        .map(|p| SimilarProject {
            similarity: (keyword_score(p, &keywords) * 10).clamp(MIN_SIMILARITY, MAX_SIMILARITY),
            project: p.clone(),
            benchmark_data: None,
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.similarity.cmp(&a.similarity));
    scored.truncate(TOP_MATCHES);
    scored
}

pub fn benchmark_for<'a>(
    benchmarks: &'a [IndustryBenchmark],
    domain: &str,
) -> Option<&'a IndustryBenchmark> {
    benchmarks
        .iter()
        .find(|b| b.domain.eq_ignore_ascii_case(domain.trim()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveSummary {
    pub objective: String,
    pub investment: f64,
    #[serde(rename = "expectedROI")]
    pub expected_roi: u32,
    /// Months.
    pub timeline: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub industry_trends: Vec<&'static str>,
    pub competitive_advantage: &'static str,
    pub market_size: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearProjection {
    pub investment: i64,
    pub savings: i64,
    pub net_benefit: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProjection {
    pub year1: YearProjection,
    pub year2: YearProjection,
    pub year3: YearProjection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub technical: &'static str,
    pub financial: &'static str,
    pub operational: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessCase {
    pub project_title: String,
    pub domain: String,
    pub executive_summary: ExecutiveSummary,
    pub market_analysis: MarketAnalysis,
    pub financial_projection: FinancialProjection,
    pub risk_assessment: RiskAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmarks: Option<IndustryBenchmark>,
    pub similar_projects: Vec<SimilarProject>,
}

pub fn financial_projection(budget: f64) -> FinancialProjection {
    let year = |(investment, savings): (f64, f64)| {
        let investment = (budget * investment).round() as i64;
        let savings = (budget * savings).round() as i64;
        YearProjection {
            investment,
            savings,
            net_benefit: savings - investment,
        }
    };

    FinancialProjection {
        year1: year(PROJECTION_RATIOS[0]),
        year2: year(PROJECTION_RATIOS[1]),
        year3: year(PROJECTION_RATIOS[2]),
    }
}

pub fn generate_business_case(
    projects: &[BusinessProject],
    benchmarks: &[IndustryBenchmark],
    project_title: &str,
    objective: &str,
    budget: f64,
    timeline: f64,
    domain: &str,
) -> BusinessCase {
    let objective = if objective.trim().is_empty() {
        DEFAULT_OBJECTIVE
    } else {
        objective
    };

    BusinessCase {
        project_title: project_title.to_string(),
        domain: domain.to_string(),
        executive_summary: ExecutiveSummary {
            objective: objective.to_string(),
            investment: budget,
            expected_roi: EXPECTED_ROI,
            timeline,
        },
        market_analysis: MarketAnalysis {
            industry_trends: vec!["Digital transformation", "AI/ML adoption", "Cloud migration"],
            competitive_advantage: "First-mover advantage in automated processes",
            market_size: "$2.5B addressable market",
        },
        financial_projection: financial_projection(budget),
        risk_assessment: RiskAssessment {
            technical: "Medium - proven technologies",
            financial: "Low - conservative estimates",
            operational: "Medium - change management required",
        },
        benchmarks: benchmark_for(benchmarks, domain).cloned(),
        similar_projects: find_similar_projects(projects, objective, &ProjectFilters::default()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAllocation {
    pub role: &'static str,
    pub count: u32,
    /// USD per person per month.
    pub monthly_cost: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityAdjustment {
    pub multiplier: f64,
    pub adjusted_cost: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStructure {
    pub roles: Vec<RoleAllocation>,
    pub total_monthly_cost: u64,
    pub total_project_cost: f64,
    pub utilization_rate: f64,
    pub recommendations: Vec<&'static str>,
    pub adjusted_for_complexity: ComplexityAdjustment,
}

fn role(role: &'static str, count: u32, monthly_cost: u64) -> RoleAllocation {
    RoleAllocation {
        role,
        count,
        monthly_cost,
    }
}

pub fn recommend_team_structure(
    project_type: &str,
    budget: f64,
    duration: f64,
    complexity: Complexity,
) -> TeamStructure {
    // Saturating casts: a non-positive budget staffs zero engineers.
    let engineers = (budget / 500_000.0).ceil() as u32;
    let testers = (budget / 1_000_000.0).ceil() as u32;

    let mut roles = vec![
        role("Project Manager", 1, 15_000),
        role("Technical Lead", 1, 18_000),
        role("Software Engineers", engineers, 12_000),
        role("QA Engineers", testers, 10_000),
        role("DevOps Engineer", 1, 14_000),
    ];
    if contains_ci(project_type, "data") || contains_ci(project_type, "analytics") {
        roles.push(role("Data Scientists", 2, 16_000));
        roles.push(role("Data Engineers", 2, 14_000));
    }
    if contains_ci(project_type, "compliance") || contains_ci(project_type, "regulatory") {
        roles.push(role("Compliance Specialists", 2, 13_000));
    }

    let total_monthly_cost: u64 = roles.iter().map(|r| u64::from(r.count) * r.monthly_cost).sum();
    let total_project_cost = total_monthly_cost as f64 * duration;
    let multiplier = complexity.multiplier();

    TeamStructure {
        roles,
        total_monthly_cost,
        total_project_cost,
        utilization_rate: UTILIZATION_RATE,
        recommendations: vec![
            "Consider hybrid team with contractors for specialized skills",
            "Plan for 15% buffer in team size for knowledge transfer",
            "Include change management resources for user adoption",
        ],
        adjusted_for_complexity: ComplexityAdjustment {
            multiplier,
            adjusted_cost: (total_project_cost * multiplier).round(),
            reasoning: format!(
                "{} complexity projects typically require {}% additional resources",
                complexity.as_str(),
                ((multiplier - 1.0) * 100.0).round()
            ),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorFrequency {
    pub factor: String,
    pub frequency: usize,
    pub impact: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFrequency {
    pub risk: String,
    pub frequency: usize,
    pub severity: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleBenchmarks {
    #[serde(rename = "averageROI")]
    pub average_roi: u32,
    pub average_duration: u32,
    pub sample_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoData {
    pub status: &'static str,
    pub sample_size: usize,
}

impl Default for NoData {
    fn default() -> Self {
        Self {
            status: "no data",
            sample_size: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Benchmarks {
    Sample(SampleBenchmarks),
    NoData(NoData),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessAnalysis {
    pub success_factors: Vec<FactorFrequency>,
    pub risks: Vec<RiskFrequency>,
    pub benchmarks: Benchmarks,
}

/// Distinct values in first-seen order, each with the number of records
/// that list it.
fn frequencies<'a>(lists: impl Iterator<Item = &'a Vec<String>> + Clone) -> Vec<(String, usize)> {
    let mut counted: Vec<(String, usize)> = Vec::new();
    for value in lists.clone().flatten() {
        if counted.iter().any(|(seen, _)| seen == value) {
            continue;
        }
        let frequency = lists.clone().filter(|list| list.contains(value)).count();
        counted.push((value.clone(), frequency));
    }
    counted
}

fn rounded_mean(values: impl Iterator<Item = u32>, count: usize) -> u32 {
    let total: u64 = values.map(u64::from).sum();
    (total as f64 / count as f64).round() as u32
}

/// Aggregate success factors, risks and outcome averages for projects whose
/// domain contains `domain`. Zero matches yield [`Benchmarks::NoData`].
pub fn analyze_success_factors(
    projects: &[BusinessProject],
    domain: &str,
    include_risks: bool,
) -> SuccessAnalysis {
    let matching: Vec<&BusinessProject> = projects
        .iter()
        .filter(|p| contains_ci(&p.domain, domain))
        .collect();

    let success_factors = frequencies(matching.iter().map(|p| &p.success_factors))
        .into_iter()
        .map(|(factor, frequency)| FactorFrequency {
            factor,
            frequency,
            impact: "High",
        })
        .collect();

    let risks = if include_risks {
        frequencies(matching.iter().map(|p| &p.risks))
            .into_iter()
            .map(|(risk, frequency)| RiskFrequency {
                risk,
                frequency,
                severity: "Medium",
            })
            .collect()
    } else {
        Vec::new()
    };

    let benchmarks = if matching.is_empty() {
        Benchmarks::NoData(NoData::default())
    } else {
        Benchmarks::Sample(SampleBenchmarks {
            average_roi: rounded_mean(matching.iter().map(|p| p.outcomes.roi), matching.len()),
            average_duration: rounded_mean(matching.iter().map(|p| p.duration), matching.len()),
            sample_size: matching.len(),
        })
    };

    SuccessAnalysis {
        success_factors,
        risks,
        benchmarks,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationOutline {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slides: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<&'static str>>,
    pub audience: String,
    pub estimated_pages: u32,
    pub delivery_format: Vec<&'static str>,
}

pub fn presentation_outline(
    document_type: DocumentType,
    project_title: &str,
    audience: &str,
) -> PresentationOutline {
    let (suffix, items, pages): (&str, &[&'static str], u32) = match document_type {
        DocumentType::Executive => (
            "Executive Summary",
            &[
                "Executive Summary & Key Recommendations",
                "Business Problem & Opportunity",
                "Proposed Solution Overview",
                "Financial Impact & ROI Analysis",
                "Implementation Timeline & Milestones",
                "Team Structure & Resource Requirements",
                "Risk Assessment & Mitigation",
                "Success Metrics & KPIs",
                "Investment Request & Next Steps",
            ],
            12,
        ),
        DocumentType::Technical => (
            "Technical Architecture",
            &[
                "Technical Requirements & Constraints",
                "System Architecture Overview",
                "Technology Stack & Rationale",
                "Data Architecture & Flow",
                "Security & Compliance Considerations",
                "Integration Points & APIs",
                "Scalability & Performance",
                "Development & Deployment Strategy",
                "Testing & Quality Assurance",
                "Monitoring & Maintenance",
            ],
            24,
        ),
        DocumentType::Financial => (
            "Financial Analysis",
            &[
                "Investment Summary",
                "Cost Breakdown Analysis",
                "Revenue/Savings Projections",
                "ROI & Payback Analysis",
                "Sensitivity Analysis",
                "Funding Requirements",
                "Budget Timeline",
                "Cost-Benefit Comparison",
            ],
            8,
        ),
        DocumentType::Team => (
            "Team Structure & RACI",
            &[
                "Organizational Structure",
                "Role Definitions & Responsibilities",
                "RACI Matrix",
                "Reporting Structure",
                "Communication Plan",
                "Resource Allocation",
                "Skills Assessment & Training",
                "Performance Metrics",
            ],
            8,
        ),
    };

    let items = items.to_vec();
    let (slides, sections) = match document_type {
        DocumentType::Executive => (Some(items), None),
        _ => (None, Some(items)),
    };

    PresentationOutline {
        title: format!("{} - {}", project_title, suffix),
        slides,
        sections,
        audience: audience.to_string(),
        estimated_pages: pages,
        delivery_format: vec!["PowerPoint", "PDF", "Interactive Dashboard"],
    }
}

pub struct BusinessToolset {
    projects: Arc<dyn Repository<BusinessProject>>,
    benchmarks: Arc<dyn Repository<IndustryBenchmark>>,
}

impl BusinessToolset {
    pub fn new(
        projects: Arc<dyn Repository<BusinessProject>>,
        benchmarks: Arc<dyn Repository<IndustryBenchmark>>,
    ) -> Self {
        Self {
            projects,
            benchmarks,
        }
    }
}

#[async_trait]
impl Toolset for BusinessToolset {
    type Tool = BusinessTool;

    fn specification(&self, tool: BusinessTool) -> ToolSpecification {
        match tool {
            BusinessTool::FindSimilarProjects => ToolSpecification::new(
                tool.as_str(),
                "Search for projects similar to the proposed initiative to inform business case development",
                InputSchema::new()
                    .param(ParamSpec::string(
                        "description",
                        "Description of the proposed project or initiative",
                    ))
                    .param(
                        ParamSpec::string(
                            "domain",
                            "Business domain (e.g., Clinical Research, Operations, Compliance)",
                        )
                        .optional(),
                    )
                    .param(ParamSpec::string("technology", "Technology the project should use").optional())
                    .param(
                        ParamSpec::string("budgetRange", "Expected budget range (e.g., 1M-3M)").optional(),
                    )
                    .param(
                        ParamSpec::boolean(
                            "includeMetrics",
                            "Include detailed success metrics and outcomes",
                        )
                        .with_default(true),
                    ),
            ),
            BusinessTool::GenerateBusinessCase => ToolSpecification::new(
                tool.as_str(),
                "Generate a comprehensive business case including financial projections and risk analysis",
                InputSchema::new()
                    .param(ParamSpec::string("projectTitle", "Title of the proposed project"))
                    .param(ParamSpec::string("objective", "Primary business objective"))
                    .param(ParamSpec::number("budget", "Proposed budget in USD"))
                    .param(ParamSpec::number("timeline", "Project timeline in months"))
                    .param(ParamSpec::string("domain", "Business domain")),
            ),
            BusinessTool::RecommendTeamStructure => ToolSpecification::new(
                tool.as_str(),
                "Recommend optimal team structure and resource allocation based on project requirements",
                InputSchema::new()
                    .param(ParamSpec::string(
                        "projectType",
                        "Type of project (e.g., data analytics, compliance automation)",
                    ))
                    .param(ParamSpec::number("budget", "Total project budget"))
                    .param(ParamSpec::number("duration", "Project duration in months"))
                    .param(ParamSpec::enumeration(
                        "complexity",
                        "Project complexity level",
                        Complexity::VALUES,
                    )),
            ),
            BusinessTool::AnalyzeSuccessFactors => ToolSpecification::new(
                tool.as_str(),
                "Analyze success factors and risks based on historical project data",
                InputSchema::new()
                    .param(ParamSpec::string("projectDomain", "Project domain to analyze"))
                    .param(ParamSpec::boolean("includeRisks", "Include risk analysis").with_default(true)),
            ),
            BusinessTool::GeneratePresentationOutline => ToolSpecification::new(
                tool.as_str(),
                "Generate outline for executive presentation or technical specification document",
                InputSchema::new()
                    .param(ParamSpec::enumeration(
                        "documentType",
                        "Type of document to generate",
                        DocumentType::VALUES,
                    ))
                    .param(ParamSpec::string("projectTitle", "Project title"))
                    .param(ParamSpec::string(
                        "audience",
                        "Target audience (e.g., executives, technical team, stakeholders)",
                    )),
            ),
        }
    }

    async fn execute(&self, tool: BusinessTool, args: ValidatedArguments) -> Result<Value, ToolError> {
        match tool {
            BusinessTool::FindSimilarProjects => {
                let args: FindSimilarArgs = args.parse()?;
                let filters = ProjectFilters {
                    domain: args.domain,
                    technology: args.technology,
                    budget_range: args.budget_range,
                };
                let mut matches =
                    find_similar_projects(&self.projects.all(), &args.description, &filters);
                if args.include_metrics {
                    let benchmarks = self.benchmarks.all();
                    for hit in &mut matches {
                        hit.benchmark_data = benchmark_for(&benchmarks, &hit.project.domain).cloned();
                    }
                }
                to_result(matches)
            }
            BusinessTool::GenerateBusinessCase => {
                let args: BusinessCaseArgs = args.parse()?;
                to_result(generate_business_case(
                    &self.projects.all(),
                    &self.benchmarks.all(),
                    &args.project_title,
                    &args.objective,
                    args.budget,
                    args.timeline,
                    &args.domain,
                ))
            }
            BusinessTool::RecommendTeamStructure => {
                let args: TeamStructureArgs = args.parse()?;
                to_result(recommend_team_structure(
                    &args.project_type,
                    args.budget,
                    args.duration,
                    args.complexity,
                ))
            }
            BusinessTool::AnalyzeSuccessFactors => {
                let args: SuccessFactorsArgs = args.parse()?;
                to_result(analyze_success_factors(
                    &self.projects.all(),
                    &args.project_domain,
                    args.include_risks,
                ))
            }
            BusinessTool::GeneratePresentationOutline => {
                let args: OutlineArgs = args.parse()?;
                to_result(presentation_outline(
                    args.document_type,
                    &args.project_title,
                    &args.audience,
                ))
            }
        }
    }
}
