/// Built-in job catalogue
///
/// Served as the job list in demo mode and merged into the aggregated feed
/// as `internal_<id>` listings.

use serde::Serialize;

/// A catalogue listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueJob {
    pub id: &'static str,
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,

    #[serde(rename = "type")]
    pub employment_type: &'static str,

    pub salary: &'static str,
    pub industry: &'static str,
    pub description: &'static str,
    pub requirements: &'static [&'static str],
    pub benefits: &'static [&'static str],

    /// `YYYY-MM-DD`
    pub posted_date: &'static str,

    pub featured: bool,
}

/// Every catalogue listing, in listing order
pub fn all() -> &'static [CatalogueJob] {
    JOBS
}

pub fn find(id: &str) -> Option<&'static CatalogueJob> {
    JOBS.iter().find(|job| job.id == id)
}

static JOBS: &[CatalogueJob] = &[
    CatalogueJob {
        id: "1",
        title: "Senior Software Engineer",
        company: "TechCorp Solutions",
        location: "San Francisco, CA",
        employment_type: "Full-time",
        salary: "$150,000 - $180,000",
        industry: "Technology",
        description: "We are seeking a Senior Software Engineer to join our growing engineering team. You will be responsible for designing, developing, and maintaining scalable software solutions.",
        requirements: &[
            "5+ years of software development experience",
            "Proficiency in Python, Java, or Go",
            "Experience with cloud platforms (AWS, GCP, Azure)",
            "Strong problem-solving skills",
            "Bachelor's degree in Computer Science or related field",
        ],
        benefits: &[
            "Health insurance",
            "401(k) matching",
            "Remote work options",
            "Stock options",
            "Unlimited PTO",
        ],
        posted_date: "2025-01-10",
        featured: true,
    },
    CatalogueJob {
        id: "2",
        title: "Registered Nurse - ICU",
        company: "Mountain View Hospital",
        location: "Denver, CO",
        employment_type: "Full-time",
        salary: "$75,000 - $95,000",
        industry: "Healthcare",
        description: "Join our dedicated ICU team providing exceptional patient care. Looking for compassionate nurses with critical care experience.",
        requirements: &[
            "Active RN license",
            "BLS and ACLS certification",
            "2+ years ICU experience",
            "Strong communication skills",
            "Ability to work 12-hour shifts",
        ],
        benefits: &[
            "Sign-on bonus",
            "Tuition reimbursement",
            "Health benefits",
            "Pension plan",
            "Night shift differential",
        ],
        posted_date: "2025-01-09",
        featured: true,
    },
    CatalogueJob {
        id: "3",
        title: "Financial Analyst",
        company: "Global Finance Partners",
        location: "New York, NY",
        employment_type: "Full-time",
        salary: "$85,000 - $110,000",
        industry: "Finance",
        description: "Seeking a detail-oriented Financial Analyst to support strategic decision-making through data analysis and financial modeling.",
        requirements: &[
            "Bachelor's degree in Finance or Accounting",
            "3+ years financial analysis experience",
            "Advanced Excel and SQL skills",
            "CFA certification preferred",
            "Experience with financial modeling",
        ],
        benefits: &[
            "Competitive salary",
            "Annual bonus",
            "Health benefits",
            "Professional development",
            "Hybrid work",
        ],
        posted_date: "2025-01-08",
        featured: true,
    },
    CatalogueJob {
        id: "4",
        title: "Production Manager",
        company: "Advanced Manufacturing Inc.",
        location: "Detroit, MI",
        employment_type: "Full-time",
        salary: "$90,000 - $115,000",
        industry: "Manufacturing",
        description: "Lead our production team to achieve operational excellence. Oversee daily manufacturing operations and drive continuous improvement.",
        requirements: &[
            "7+ years manufacturing experience",
            "3+ years supervisory experience",
            "Lean Six Sigma certification",
            "Strong leadership skills",
            "Knowledge of ERP systems",
        ],
        benefits: &[
            "Relocation assistance",
            "Health insurance",
            "Profit sharing",
            "Career advancement",
            "Company vehicle",
        ],
        posted_date: "2025-01-07",
        featured: false,
    },
    CatalogueJob {
        id: "5",
        title: "Store Manager",
        company: "Premium Retail Group",
        location: "Chicago, IL",
        employment_type: "Full-time",
        salary: "$55,000 - $70,000",
        industry: "Retail",
        description: "Dynamic Store Manager needed to lead our flagship location. Drive sales, manage staff, and ensure exceptional customer experiences.",
        requirements: &[
            "5+ years retail experience",
            "2+ years management experience",
            "Strong customer service skills",
            "P&L management experience",
            "Flexible schedule availability",
        ],
        benefits: &[
            "Employee discount",
            "Health benefits",
            "Performance bonus",
            "Paid time off",
            "Career growth",
        ],
        posted_date: "2025-01-06",
        featured: false,
    },
    CatalogueJob {
        id: "6",
        title: "Warehouse Operations Supervisor",
        company: "Swift Logistics",
        location: "Atlanta, GA",
        employment_type: "Full-time",
        salary: "$60,000 - $75,000",
        industry: "Logistics",
        description: "Supervise warehouse operations ensuring efficiency, safety, and accuracy. Lead a team of 20+ associates.",
        requirements: &[
            "3+ years warehouse experience",
            "1+ year supervisory experience",
            "Forklift certification",
            "WMS experience",
            "Strong organizational skills",
        ],
        benefits: &[
            "Health insurance",
            "401(k)",
            "Overtime opportunities",
            "Safety bonuses",
            "Advancement opportunities",
        ],
        posted_date: "2025-01-05",
        featured: false,
    },
    CatalogueJob {
        id: "7",
        title: "DevOps Engineer",
        company: "CloudScale Technologies",
        location: "Austin, TX",
        employment_type: "Full-time",
        salary: "$130,000 - $160,000",
        industry: "Technology",
        description: "Build and maintain our cloud infrastructure. Implement CI/CD pipelines and ensure system reliability.",
        requirements: &[
            "4+ years DevOps experience",
            "Kubernetes and Docker expertise",
            "Terraform/CloudFormation experience",
            "Scripting skills (Python, Bash)",
            "AWS or GCP certification",
        ],
        benefits: &[
            "Remote-first",
            "Stock options",
            "Learning budget",
            "Health benefits",
            "Flexible hours",
        ],
        posted_date: "2025-01-10",
        featured: true,
    },
    CatalogueJob {
        id: "8",
        title: "Physical Therapist",
        company: "Wellness Recovery Center",
        location: "Phoenix, AZ",
        employment_type: "Full-time",
        salary: "$80,000 - $100,000",
        industry: "Healthcare",
        description: "Help patients recover and improve mobility. Work in a state-of-the-art rehabilitation facility.",
        requirements: &[
            "Doctor of Physical Therapy degree",
            "Active PT license",
            "Experience with orthopedic patients",
            "Strong interpersonal skills",
            "Manual therapy skills",
        ],
        benefits: &[
            "Continuing education",
            "Health benefits",
            "Retirement plan",
            "Flexible schedule",
            "Loan repayment",
        ],
        posted_date: "2025-01-04",
        featured: false,
    },
    CatalogueJob {
        id: "9",
        title: "Senior Accountant",
        company: "Summit Financial Services",
        location: "Boston, MA",
        employment_type: "Full-time",
        salary: "$75,000 - $95,000",
        industry: "Finance",
        description: "Manage financial reporting and ensure compliance. Work with a team of accounting professionals.",
        requirements: &[
            "CPA certification required",
            "5+ years accounting experience",
            "Public accounting background",
            "Advanced Excel skills",
            "GAAP expertise",
        ],
        benefits: &[
            "CPA exam support",
            "Health benefits",
            "Bonus program",
            "Remote options",
            "Professional development",
        ],
        posted_date: "2025-01-03",
        featured: false,
    },
    CatalogueJob {
        id: "10",
        title: "Quality Control Inspector",
        company: "Precision Parts Manufacturing",
        location: "Cleveland, OH",
        employment_type: "Full-time",
        salary: "$50,000 - $65,000",
        industry: "Manufacturing",
        description: "Ensure product quality through inspection and testing. Document findings and recommend improvements.",
        requirements: &[
            "2+ years QC experience",
            "Blueprint reading skills",
            "CMM experience preferred",
            "ISO 9001 knowledge",
            "Attention to detail",
        ],
        benefits: &[
            "Health insurance",
            "Retirement plan",
            "Overtime available",
            "Training provided",
            "Stable hours",
        ],
        posted_date: "2025-01-02",
        featured: false,
    },
    CatalogueJob {
        id: "11",
        title: "Data Scientist",
        company: "Analytics Pro Inc.",
        location: "Seattle, WA",
        employment_type: "Full-time",
        salary: "$140,000 - $175,000",
        industry: "Technology",
        description: "Drive insights from complex datasets. Build machine learning models and present findings to stakeholders.",
        requirements: &[
            "Master's or PhD in quantitative field",
            "Python and R proficiency",
            "Machine learning experience",
            "SQL expertise",
            "Strong communication skills",
        ],
        benefits: &[
            "Remote work",
            "Stock options",
            "Conference budget",
            "Health benefits",
            "Sabbatical program",
        ],
        posted_date: "2025-01-10",
        featured: true,
    },
    CatalogueJob {
        id: "12",
        title: "Medical Assistant",
        company: "Family Care Clinic",
        location: "Orlando, FL",
        employment_type: "Full-time",
        salary: "$38,000 - $48,000",
        industry: "Healthcare",
        description: "Support physicians with patient care. Handle administrative and clinical duties in a busy clinic.",
        requirements: &[
            "Medical Assistant certification",
            "1+ year clinical experience",
            "EMR proficiency",
            "Phlebotomy skills",
            "Excellent patient care",
        ],
        benefits: &[
            "Health benefits",
            "Paid time off",
            "Continuing education",
            "Scrub allowance",
            "Retirement plan",
        ],
        posted_date: "2025-01-01",
        featured: false,
    },
];
