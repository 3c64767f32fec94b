/// Fixed sample payloads, one builder per resource

use chrono::{DateTime, Duration, Utc};

use crate::dates::{day_anchor, format_posted_date};
use crate::models::analytics::{
    Activity, AdminApplication, Analytics, Changes, MonthlyApplications, NewUser, Overview,
    PendingActions, TopIndustry, TopJob,
};
use crate::models::application::{
    ApplicationSummary, CandidateCard, EmployerApplication, EmployerApplications, JobBrief, JobCard,
};
use crate::models::company::{CompanyDocument, CompanyInput};
use crate::models::dashboard::{Dashboard, DashboardStats, RecentApplication, RecommendedJob};
use crate::models::job::{EmployerJob, EmployerJobs};
use crate::models::notification::NotificationView;
use crate::models::profile::{ProfileDocument, ProfileInput};
use crate::models::saved_job::{
    SavedJobDetails, SavedJobEntry, STATUS_ACTIVE, STATUS_CLOSING_SOON, STATUS_EXPIRED,
};
use crate::models::settings::{
    NotificationPreferences, PrivacySettings, SettingsDocument, SettingsInput, DEFAULT_DATE_FORMAT,
    DEFAULT_JOB_DURATION_DAYS, DEFAULT_LANGUAGE, DEFAULT_TIMEZONE,
};

pub const DASHBOARD_STATS: DashboardStats = DashboardStats {
    applications: 12,
    saved_jobs: 8,
    profile_views: 47,
    interview_invites: 3,
};

pub fn dashboard(now: DateTime<Utc>) -> Dashboard {
    Dashboard {
        stats: DASHBOARD_STATS,
        recent_applications: recent_applications(now),
        recommended_jobs: recommended_jobs(now),
    }
}

pub fn recent_applications(now: DateTime<Utc>) -> Vec<RecentApplication> {
    let rows = [
        ("1", "Senior Software Engineer", "TechCorp Inc.", "San Francisco, CA", 3, "reviewing"),
        ("2", "Full Stack Developer", "StartupXYZ", "Remote", 5, "interviewing"),
        ("3", "Frontend Developer", "DesignHub", "New York, NY", 8, "pending"),
        ("4", "DevOps Engineer", "CloudSystems", "Seattle, WA", 10, "rejected"),
    ];

    rows.into_iter()
        .map(|(id, title, company, location, days, status)| RecentApplication {
            id: id.to_string(),
            job_title: title.to_string(),
            company: company.to_string(),
            location: location.to_string(),
            applied_date: format_posted_date(now - Duration::days(days), now),
            status: status.to_string(),
        })
        .collect()
}

pub fn recommended_jobs(now: DateTime<Utc>) -> Vec<RecommendedJob> {
    let rows = [
        ("1", "Senior React Developer", "InnovateTech", "Austin, TX", "$140,000 - $180,000", 2),
        ("2", "Lead Software Architect", "Enterprise Solutions", "Remote", "$160,000 - $200,000", 3),
        ("3", "Backend Engineer", "DataDriven Co", "Chicago, IL", "$120,000 - $150,000", 4),
    ];

    rows.into_iter()
        .map(|(id, title, company, location, salary, days)| RecommendedJob {
            id: id.to_string(),
            title: title.to_string(),
            company: company.to_string(),
            location: location.to_string(),
            salary: salary.to_string(),
            employment_type: "Full-time".to_string(),
            posted: format_posted_date(now - Duration::days(days), now),
        })
        .collect()
}

pub fn analytics(now: DateTime<Utc>) -> Analytics {
    let anchor = day_anchor(now);
    let minutes_ago = |m: i64| anchor - Duration::minutes(m);
    let hours_ago = |h: i64| anchor - Duration::hours(h);

    Analytics {
        overview: Overview {
            total_users: 2847,
            active_jobs: 156,
            total_applications: 1234,
            total_companies: 89,
            total_candidates: 2758,
            total_placements: 287,
            total_revenue: 284_500,
        },
        changes: Changes {
            users: 12.0,
            jobs: 8.0,
            applications: 23.0,
            companies: 5.0,
            placements: 5.4,
            revenue: 12.5,
        },
        monthly_applications: [
            ("Aug", 2100, 189),
            ("Sep", 2400, 215),
            ("Oct", 2800, 242),
            ("Nov", 3100, 268),
            ("Dec", 2900, 251),
            ("Jan", 3456, 287),
        ]
        .into_iter()
        .map(|(month, applications, placements)| MonthlyApplications {
            month,
            applications,
            placements,
        })
        .collect(),
        top_jobs: [
            ("Senior Software Engineer", 156, 2340, 6.7),
            ("Product Manager", 134, 1890, 7.1),
            ("UX Designer", 98, 1456, 6.7),
            ("Data Analyst", 87, 1234, 7.0),
            ("DevOps Engineer", 76, 987, 7.7),
        ]
        .into_iter()
        .map(|(title, applications, views, conversion)| TopJob {
            title,
            applications,
            views,
            conversion,
        })
        .collect(),
        top_industries: [
            ("Technology", 156, 2340, 35),
            ("Healthcare", 98, 1567, 24),
            ("Finance", 87, 1234, 19),
            ("Manufacturing", 65, 876, 13),
            ("Retail", 45, 543, 9),
        ]
        .into_iter()
        .map(|(name, jobs, applications, percentage)| TopIndustry {
            name,
            jobs,
            applications,
            percentage,
        })
        .collect(),
        recent_activity: vec![
            Activity {
                kind: "employer_registered",
                company: Some("TechStart Inc."),
                candidate: None,
                job: None,
                time: minutes_ago(2),
            },
            Activity {
                kind: "application_submitted",
                company: None,
                candidate: Some("Sarah Johnson"),
                job: Some("Senior Engineer"),
                time: minutes_ago(5),
            },
            Activity {
                kind: "job_approved",
                company: None,
                candidate: None,
                job: Some("Product Manager at StartupXYZ"),
                time: minutes_ago(12),
            },
            Activity {
                kind: "placement_confirmed",
                company: Some("CloudServices"),
                candidate: Some("Michael Chen"),
                job: None,
                time: minutes_ago(28),
            },
            Activity {
                kind: "candidate_registered",
                company: None,
                candidate: Some("Emily Rodriguez"),
                job: None,
                time: minutes_ago(45),
            },
        ],
        recent_applications: [
            ("1", "Sarah Johnson", "photo-1494790108377-be9c29b29330", "Senior Software Engineer", "TechCorp Inc.", 2, "new"),
            ("2", "Michael Chen", "photo-1507003211169-0a1dd7228f2d", "Product Manager", "StartupXYZ", 5, "reviewing"),
            ("3", "Emily Rodriguez", "photo-1438761681033-6461ffad8d80", "UX Designer", "DesignCo", 24, "shortlisted"),
            ("4", "David Kim", "photo-1472099645785-5658abf4ff4e", "Backend Developer", "CloudServices", 24, "interviewed"),
            ("5", "Jennifer Lee", "photo-1534528741775-53994a69daeb", "Data Analyst", "DataDriven", 48, "hired"),
        ]
        .into_iter()
        .map(|(id, candidate, photo, job, company, hours, status)| AdminApplication {
            id,
            candidate,
            avatar: avatar_url(photo),
            job,
            company,
            applied_at: hours_ago(hours),
            status,
        })
        .collect(),
        new_users: [
            ("1", "John Smith", "john.smith@email.com", "photo-1500648767791-00dcc994a43e", "candidate", 1),
            ("2", "Lisa Anderson", "lisa@techcorp.com", "photo-1573497019940-1c28c88b4f3e", "employer", 3),
            ("3", "Robert Wilson", "robert.wilson@email.com", "photo-1507591064344-4c6ce005b128", "candidate", 5),
        ]
        .into_iter()
        .map(|(id, name, email, photo, kind, hours)| NewUser {
            id,
            name,
            email,
            avatar: avatar_url(photo),
            kind,
            joined_at: hours_ago(hours),
        })
        .collect(),
        pending_actions: PendingActions {
            company_verifications: 1,
            job_reviews: 3,
            support_tickets: 5,
        },
    }
}

fn avatar_url(photo: &'static str) -> &'static str {
    match photo {
        "photo-1494790108377-be9c29b29330" => "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=100&h=100&fit=crop",
        "photo-1507003211169-0a1dd7228f2d" => "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=100&h=100&fit=crop",
        "photo-1438761681033-6461ffad8d80" => "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=100&h=100&fit=crop",
        "photo-1472099645785-5658abf4ff4e" => "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100&h=100&fit=crop",
        "photo-1534528741775-53994a69daeb" => "https://images.unsplash.com/photo-1534528741775-53994a69daeb?w=100&h=100&fit=crop",
        "photo-1500648767791-00dcc994a43e" => "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=100&h=100&fit=crop",
        "photo-1573497019940-1c28c88b4f3e" => "https://images.unsplash.com/photo-1573497019940-1c28c88b4f3e?w=100&h=100&fit=crop",
        "photo-1507591064344-4c6ce005b128" => "https://images.unsplash.com/photo-1507591064344-4c6ce005b128?w=100&h=100&fit=crop",
        _ => "",
    }
}

pub fn application_summaries() -> Vec<ApplicationSummary> {
    vec![
        ApplicationSummary {
            id: "app_1".to_string(),
            job_id: "1".to_string(),
            status: "reviewing".to_string(),
            created_at: "2025-01-10".to_string(),
            job: Some(JobBrief {
                title: "Senior Software Engineer".to_string(),
                company: "TechCorp Inc.".to_string(),
                location: "San Francisco, CA".to_string(),
            }),
        },
        ApplicationSummary {
            id: "app_2".to_string(),
            job_id: "2".to_string(),
            status: "interviewing".to_string(),
            created_at: "2025-01-08".to_string(),
            job: Some(JobBrief {
                title: "Full Stack Developer".to_string(),
                company: "StartupXYZ".to_string(),
                location: "Remote".to_string(),
            }),
        },
    ]
}

/// Applications to the demo employer's jobs, optionally for one job
pub fn employer_applications(now: DateTime<Utc>, job_id: Option<&str>) -> EmployerApplications {
    let anchor = day_anchor(now);
    let rows = [
        ("1", "Sarah Johnson", "sarah.johnson@email.com", "(555) 123-4567", "Senior Software Engineer", "8", ("1", "Senior Software Engineer", "Engineering"), 2, "new", 0, ""),
        ("2", "Michael Chen", "michael.chen@email.com", "(555) 234-5678", "Product Manager", "6", ("2", "Product Manager", "Product"), 5, "reviewing", 4, "Strong background in B2B SaaS. Schedule a call."),
        ("3", "Emily Rodriguez", "emily.rodriguez@email.com", "(555) 345-6789", "UX Designer", "5", ("3", "UX Designer", "Design"), 24, "shortlisted", 5, "Excellent portfolio. Moving to final interview round."),
        ("4", "David Kim", "david.kim@email.com", "(555) 456-7890", "Staff Engineer", "10", ("1", "Senior Software Engineer", "Engineering"), 48, "interviewed", 4, "Technical interview completed. Strong systems design skills."),
        ("5", "Jennifer Lee", "jennifer.lee@email.com", "(555) 567-8901", "Marketing Coordinator", "3", ("2", "Product Manager", "Product"), 72, "rejected", 2, "Does not meet minimum experience requirements."),
    ];

    let applications: Vec<EmployerApplication> = rows
        .into_iter()
        .filter(|(_, _, _, _, _, _, (job, _, _), ..)| job_id.map_or(true, |id| id == *job))
        .map(
            |(id, name, email, phone, title, years, (job, job_title, department), hours, status, rating, notes)| {
                let slug = name.to_lowercase().replace(' ', "");
                EmployerApplication {
                    id: id.to_string(),
                    candidate: CandidateCard {
                        name: name.to_string(),
                        email: email.to_string(),
                        phone: phone.to_string(),
                        current_title: title.to_string(),
                        experience: format!("{} years", years),
                        linkedin: Some(format!("https://linkedin.com/in/{}", slug)),
                        portfolio: None,
                    },
                    job: JobCard {
                        id: job.to_string(),
                        title: job_title.to_string(),
                        department: department.to_string(),
                    },
                    applied_at: (anchor - Duration::hours(hours)).to_rfc3339(),
                    status: status.to_string(),
                    rating,
                    notes: notes.to_string(),
                    cover_letter: format!("I would like to be considered for the {} role.", job_title),
                    resume_url: format!("/resumes/{}.pdf", name.to_lowercase().replace(' ', "-")),
                }
            },
        )
        .collect();

    EmployerApplications::from(applications)
}

/// The demo employer's postings
pub fn employer_jobs(now: DateTime<Utc>) -> EmployerJobs {
    let anchor = day_anchor(now);
    let rows = [
        ("1", "Senior Software Engineer", "Engineering", "San Francisco, CA", "$150k - $200k", 45, 892, 8, 22, "active"),
        ("2", "Product Manager", "Product", "Remote", "$130k - $170k", 38, 654, 5, 25, "active"),
        ("3", "UX Designer", "Design", "New York, NY", "$100k - $140k", 29, 521, 3, 27, "active"),
        ("4", "DevOps Engineer", "Engineering", "Austin, TX", "$120k - $160k", 22, 389, 20, -5, "paused"),
        ("5", "Marketing Manager", "Marketing", "Remote", "$90k - $120k", 56, 743, 45, -15, "closed"),
    ];

    let jobs: Vec<EmployerJob> = rows
        .into_iter()
        .map(|(id, title, department, location, salary, applications, views, posted, expires, status)| EmployerJob {
            id: id.to_string(),
            title: title.to_string(),
            department: department.to_string(),
            location: location.to_string(),
            employment_type: "Full-time".to_string(),
            salary: salary.to_string(),
            applications,
            views,
            posted_at: (anchor - Duration::days(posted)).to_rfc3339(),
            expires_at: Some((anchor + Duration::days(expires)).to_rfc3339()),
            status: status.to_string(),
            description: format!("We are looking for a {} to join our team.", title),
        })
        .collect();

    EmployerJobs::from(jobs)
}

pub fn saved_jobs(now: DateTime<Utc>) -> Vec<SavedJobEntry> {
    let anchor = day_anchor(now);
    let days = |d: i64| anchor + Duration::days(d);

    let rows = [
        ("saved_1", "1", "Senior Software Engineer", "TechCorp Inc.", "San Francisco, CA", "$150k - $200k",
         "photo-1549924231-f129b911e442", -1, -3, 30, STATUS_ACTIVE),
        ("saved_2", "2", "Product Manager", "StartupXYZ", "Remote", "$130k - $170k",
         "photo-1560179707-f14e90ef3623", -2, -5, 25, STATUS_ACTIVE),
        ("saved_3", "3", "UX Designer", "DesignCo", "New York, NY", "$100k - $140k",
         "photo-1572044162444-ad60f128bdea", -7, -14, 5, STATUS_CLOSING_SOON),
        ("saved_4", "4", "Marketing Manager", "BrandBoost", "Chicago, IL", "$90k - $120k",
         "photo-1454165804606-c3d57bc86b40", -25, -30, -5, STATUS_EXPIRED),
    ];

    rows.into_iter()
        .map(
            |(id, job_id, title, company, location, salary, photo, saved, posted, deadline, status)| {
                SavedJobEntry {
                    id: id.to_string(),
                    job_id: job_id.to_string(),
                    saved_at: days(saved),
                    job: SavedJobDetails {
                        id: job_id.to_string(),
                        title: title.to_string(),
                        company: company.to_string(),
                        location: location.to_string(),
                        employment_type: "Full-time".to_string(),
                        salary: salary.to_string(),
                        logo: format!(
                            "https://images.unsplash.com/{}?w=100&h=100&fit=crop",
                            photo
                        ),
                        posted_at: days(posted),
                        deadline: days(deadline),
                        status: status.to_string(),
                    },
                }
            },
        )
        .collect()
}

pub fn notifications(user_id: &str, now: DateTime<Utc>) -> Vec<NotificationView> {
    let anchor = day_anchor(now);

    vec![
        NotificationView {
            id: "1".to_string(),
            user_id: user_id.to_string(),
            kind: "application".to_string(),
            title: "Application Received".to_string(),
            message: "You received a new application for Senior Software Engineer".to_string(),
            read: false,
            created_at: anchor,
            link: Some("/employer/applications".to_string()),
        },
        NotificationView {
            id: "2".to_string(),
            user_id: user_id.to_string(),
            kind: "job".to_string(),
            title: "Job Posted".to_string(),
            message: "Your job 'Product Manager' is now live".to_string(),
            read: false,
            created_at: anchor - Duration::hours(1),
            link: Some("/employer/jobs".to_string()),
        },
    ]
}

/// Blank profile for a caller without one
pub fn profile(user_id: &str) -> ProfileDocument {
    ProfileDocument::unsaved(user_id, ProfileInput::default())
}

/// Blank company for a caller without one
pub fn company(user_id: &str) -> CompanyDocument {
    CompanyDocument::unsaved(user_id, CompanyInput::default())
}

/// Default settings for a caller without saved settings
pub fn settings(user_id: &str) -> SettingsDocument {
    SettingsDocument::unsaved(
        user_id,
        SettingsInput {
            language: Some(DEFAULT_LANGUAGE.to_string()),
            timezone: Some(DEFAULT_TIMEZONE.to_string()),
            date_format: Some(DEFAULT_DATE_FORMAT.to_string()),
            default_job_duration: Some(DEFAULT_JOB_DURATION_DAYS),
            notifications: Some(NotificationPreferences {
                application_status_updates: Some(true),
                new_job_recommendations: Some(true),
                weekly_job_digest: Some(false),
                interview_reminders: Some(true),
                marketing_emails: Some(false),
                new_applications: Some(true),
                application_status_changes: Some(true),
                job_expiration_reminders: Some(true),
                weekly_summary_reports: Some(false),
                platform_updates: Some(false),
            }),
            privacy: Some(PrivacySettings {
                profile_visibility: Some("public".to_string()),
                resume_visibility: Some("applied".to_string()),
            }),
            two_factor_enabled: Some(false),
        },
    )
}
