//! Historical project records and industry benchmarks used by the
//! business-development surface.

use super::strings;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOutcomes {
    pub cost_savings: u64,
    /// Percent.
    pub time_reduction: u32,
    /// Percent.
    pub efficiency_gain: u32,
    /// Percent.
    pub roi: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCount {
    pub role: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetShare {
    pub category: String,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProject {
    pub id: String,
    pub title: String,
    pub domain: String,
    /// USD.
    pub budget: u64,
    /// Months.
    pub duration: u32,
    pub team_size: u32,
    pub technologies: Vec<String>,
    pub business_drivers: Vec<String>,
    pub outcomes: ProjectOutcomes,
    pub risks: Vec<String>,
    pub success_factors: Vec<String>,
    pub team_structure: Vec<RoleCount>,
    pub budget_breakdown: Vec<BudgetShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryBenchmark {
    pub domain: String,
    pub avg_budget: u64,
    pub avg_duration: u32,
    pub avg_team_size: u32,
    #[serde(rename = "avgROI")]
    pub avg_roi: u32,
    pub common_technologies: Vec<String>,
}

fn roles(items: &[(&str, u32)]) -> Vec<RoleCount> {
    items
        .iter()
        .map(|(role, count)| RoleCount {
            role: role.to_string(),
            count: *count,
        })
        .collect()
}

fn shares(items: &[(&str, u32)]) -> Vec<BudgetShare> {
    items
        .iter()
        .map(|(category, percent)| BudgetShare {
            category: category.to_string(),
            percent: *percent,
        })
        .collect()
}

pub fn seed_projects() -> Vec<BusinessProject> {
    vec![
        BusinessProject {
            id: "bd-1".into(),
            title: "Clinical Data Analytics Platform".into(),
            domain: "Clinical Research".into(),
            budget: 2_300_000,
            duration: 18,
            team_size: 12,
            technologies: strings(&["Python", "AWS", "TensorFlow", "React", "PostgreSQL"]),
            business_drivers: strings(&[
                "Faster clinical trials",
                "Regulatory compliance",
                "Cost reduction",
            ]),
            outcomes: ProjectOutcomes {
                cost_savings: 1_200_000,
                time_reduction: 40,
                efficiency_gain: 35,
                roi: 152,
            },
            risks: strings(&["Data compliance", "Integration complexity", "Regulatory changes"]),
            success_factors: strings(&[
                "Strong stakeholder engagement",
                "Agile methodology",
                "Executive sponsorship",
            ]),
            team_structure: roles(&[
                ("Project Manager", 1),
                ("Data Scientists", 3),
                ("Software Engineers", 4),
                ("DevOps Engineers", 2),
                ("QA Engineers", 2),
            ]),
            budget_breakdown: shares(&[
                ("Personnel", 70),
                ("Infrastructure", 15),
                ("Software Licenses", 10),
                ("Contingency", 5),
            ]),
        },
        BusinessProject {
            id: "bd-2".into(),
            title: "Supply Chain Optimization".into(),
            domain: "Operations".into(),
            budget: 3_100_000,
            duration: 24,
            team_size: 15,
            technologies: strings(&["R", "Tableau", "SAP", "Power BI", "Oracle"]),
            business_drivers: strings(&[
                "Supply chain efficiency",
                "Cost optimization",
                "Risk mitigation",
            ]),
            outcomes: ProjectOutcomes {
                cost_savings: 2_500_000,
                time_reduction: 25,
                efficiency_gain: 30,
                roi: 180,
            },
            risks: strings(&[
                "Vendor dependencies",
                "Change management",
                "Integration challenges",
            ]),
            success_factors: strings(&[
                "Executive sponsorship",
                "Cross-functional team",
                "Change management",
            ]),
            team_structure: roles(&[
                ("Project Manager", 1),
                ("Business Analysts", 4),
                ("Data Analysts", 3),
                ("Software Engineers", 3),
                ("Operations Specialists", 4),
            ]),
            budget_breakdown: shares(&[
                ("Personnel", 65),
                ("Software/Systems", 20),
                ("Training", 10),
                ("Contingency", 5),
            ]),
        },
        BusinessProject {
            id: "bd-3".into(),
            title: "Regulatory Compliance Automation".into(),
            domain: "Compliance".into(),
            budget: 1_800_000,
            duration: 12,
            team_size: 8,
            technologies: strings(&["Java", "Spring Boot", "PostgreSQL", "Angular", "Docker"]),
            business_drivers: strings(&[
                "Compliance efficiency",
                "Risk reduction",
                "Audit readiness",
            ]),
            outcomes: ProjectOutcomes {
                cost_savings: 800_000,
                time_reduction: 60,
                efficiency_gain: 45,
                roi: 144,
            },
            risks: strings(&[
                "Regulatory changes",
                "Legacy system integration",
                "User adoption",
            ]),
            success_factors: strings(&[
                "Regulatory expertise",
                "Iterative development",
                "User training",
            ]),
            team_structure: roles(&[
                ("Project Manager", 1),
                ("Compliance Specialists", 2),
                ("Software Engineers", 3),
                ("QA Engineers", 2),
            ]),
            budget_breakdown: shares(&[
                ("Personnel", 75),
                ("Infrastructure", 12),
                ("Compliance Tools", 8),
                ("Contingency", 5),
            ]),
        },
    ]
}

pub fn seed_benchmarks() -> Vec<IndustryBenchmark> {
    vec![
        IndustryBenchmark {
            domain: "Clinical Research".into(),
            avg_budget: 2_500_000,
            avg_duration: 16,
            avg_team_size: 10,
            avg_roi: 145,
            common_technologies: strings(&["Python", "R", "AWS", "TensorFlow", "React"]),
        },
        IndustryBenchmark {
            domain: "Operations".into(),
            avg_budget: 2_800_000,
            avg_duration: 20,
            avg_team_size: 12,
            avg_roi: 165,
            common_technologies: strings(&["SAP", "Tableau", "Power BI", "Oracle", "Python"]),
        },
        IndustryBenchmark {
            domain: "Compliance".into(),
            avg_budget: 1_600_000,
            avg_duration: 14,
            avg_team_size: 8,
            avg_roi: 135,
            common_technologies: strings(&["Java", "Spring", "Angular", "PostgreSQL", "Docker"]),
        },
    ]
}
