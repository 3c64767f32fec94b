/// HTML email templates
///
/// All templates share one layout: logo header, a coloured banner, the body,
/// and a footer. Caller-supplied values are HTML-escaped.

use chrono::{DateTime, Utc};

use super::Email;

pub const DEFAULT_APP_URL: &str = "https://humanlystaffing.com";

const PRIMARY_GRADIENT: &str = "linear-gradient(135deg, #1E40AF 0%, #3B82F6 100%)";
const SUCCESS: &str = "#10B981";
const INFO: &str = "#3B82F6";

const COMPANY_FOOTER: &str = r#"Humanly Staffing Inc.<br>
            1501 South Greeley Highway, Suite C, Cheyenne, WY 82007<br>
            <a href="tel:8888048424" style="color: #9CA3AF;">(888) 804-8424</a> |
            <a href="mailto:contact@humanlystaffing.com" style="color: #9CA3AF;">contact@humanlystaffing.com</a>"#;

/// Subject and body, not yet addressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

impl EmailContent {
    pub fn to(self, recipient: &str) -> Email {
        Email {
            to: recipient.to_string(),
            subject: self.subject,
            html: self.html,
        }
    }
}

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, banner: &str, body: &str, footer: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
  </head>
  <body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    <div style="text-align: center; margin-bottom: 30px;">
      <h1 style="color: #1E40AF; margin: 0; font-size: 24px;">Humanly<span style="color: #1F2937;">Staffing</span></h1>
    </div>
    {banner}
    {body}
    <hr style="border: none; border-top: 1px solid #E5E7EB; margin: 30px 0;">
    <p style="font-size: 12px; color: #9CA3AF; text-align: center;">
      {footer}
    </p>
  </body>
</html>
"#
    )
}

fn banner(background: &str, heading: &str, subheading: Option<&str>) -> String {
    let sub = subheading
        .map(|s| format!(r#"<p style="margin: 10px 0 0 0; opacity: 0.9;">{s}</p>"#))
        .unwrap_or_default();
    format!(
        r#"<div style="background: {background}; border-radius: 12px; padding: 30px; color: white; margin-bottom: 30px;">
      <h2 style="margin: 0; font-size: 20px;">{heading}</h2>{sub}
    </div>"#
    )
}

fn button(href: &str, label: &str) -> String {
    format!(
        r#"<div style="text-align: center; margin: 30px 0;">
      <a href="{href}" style="display: inline-block; background: {PRIMARY_GRADIENT}; color: white; text-decoration: none; padding: 14px 28px; border-radius: 8px; font-weight: 600;">{label}</a>
    </div>"#
    )
}

/// Label/value rows; values must already be escaped
fn details(rows: &[(&str, String)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(label, value)| {
            format!(
                r#"
        <tr>
          <td style="padding: 8px 0; color: #6B7280; width: 140px;">{label}:</td>
          <td style="padding: 8px 0; font-weight: 600;">{value}</td>
        </tr>"#
            )
        })
        .collect();
    format!(
        r#"<div style="background: #F3F4F6; border-radius: 8px; padding: 20px; margin: 20px 0;">
      <table style="width: 100%; border-collapse: collapse;">{rows}
      </table>
    </div>"#
    )
}

fn mailto(address: &str) -> String {
    let address = escape(address);
    format!(r#"<a href="mailto:{address}" style="color: #3B82F6;">{address}</a>"#)
}

const SIGN_OFF: &str = r#"<p>Best regards,<br>
    <strong>The Humanly Staffing Team</strong></p>"#;

/// Sent to a candidate after submitting an application
pub fn application_confirmation(
    app_url: &str,
    first_name: &str,
    job_title: &str,
    company: &str,
) -> EmailContent {
    let first_name = escape(first_name);
    let job_title = escape(job_title);
    let company = escape(company);

    let body = format!(
        r#"<p>Hi {first_name},</p>
    <p>Thank you for your interest in the <strong>{job_title}</strong> position at <strong>{company}</strong>. We've successfully received your application.</p>
    <div style="background: #F3F4F6; border-radius: 8px; padding: 20px; margin: 20px 0;">
      <h3 style="margin: 0 0 15px 0; color: #1F2937;">What happens next?</h3>
      <ul style="margin: 0; padding-left: 20px; color: #4B5563;">
        <li style="margin-bottom: 10px;">Our recruitment team will review your application</li>
        <li style="margin-bottom: 10px;">If your qualifications match, we'll contact you within 3-5 business days</li>
        <li style="margin-bottom: 10px;">You can track your application status in your dashboard</li>
      </ul>
    </div>
    <p>In the meantime, feel free to browse other opportunities on our <a href="{app_url}/jobs" style="color: #3B82F6;">job board</a>.</p>
    {SIGN_OFF}"#
    );

    EmailContent {
        subject: format!("Application Received - {} at {}", job_title, company),
        html: layout(
            "Application Received",
            &banner(
                PRIMARY_GRADIENT,
                "Application Received!",
                Some(&format!("Thank you for applying, {}", first_name)),
            ),
            &body,
            COMPANY_FOOTER,
        ),
    }
}

/// Sent to the site inbox for every new application
pub fn new_application_admin(
    app_url: &str,
    candidate_name: &str,
    candidate_email: &str,
    job_title: &str,
    application_id: &str,
    submitted: DateTime<Utc>,
) -> EmailContent {
    let body = format!(
        "<p>A new application has been submitted:</p>\n    {}\n    {}",
        details(&[
            ("Position", escape(job_title)),
            ("Candidate", escape(candidate_name)),
            ("Email", mailto(candidate_email)),
            ("Application ID", escape(application_id)),
            ("Submitted", submitted.format("%A, %B %-d, %Y").to_string()),
        ]),
        button(&format!("{}/admin/applications", app_url), "View Application"),
    );

    EmailContent {
        subject: format!("New Application: {} - {}", job_title, candidate_name),
        html: layout(
            "New Application Received",
            &banner(SUCCESS, "New Application Received", None),
            &body,
            "This is an automated notification from Humanly Staffing",
        ),
    }
}

/// Sent to a candidate when an application's status changes
pub fn application_status_change(app_url: &str, first_name: &str, status: &str) -> EmailContent {
    let first_name = escape(first_name);
    let status = escape(status);

    let body = format!(
        r#"<p>Hi {first_name},</p>
    <p>Your application status has been updated to: <strong>{status}</strong></p>
    {}
    {SIGN_OFF}"#,
        button(&format!("{}/dashboard/applications", app_url), "View My Applications"),
    );

    EmailContent {
        subject: format!("Application Update: {}", status),
        html: layout(
            "Application Status Updated",
            &banner(PRIMARY_GRADIENT, "Application Status Updated", None),
            &body,
            COMPANY_FOOTER,
        ),
    }
}

/// Sent to the site inbox for a contact-form submission
pub fn contact_form(name: &str, email: &str, phone: &str, subject: &str, message: &str) -> EmailContent {
    let phone = if phone.is_empty() { "Not provided" } else { phone };

    let body = format!(
        r#"{}
    <div style="background: white; border: 1px solid #E5E7EB; border-radius: 8px; padding: 20px; margin: 20px 0;">
      <h3 style="margin: 0 0 10px 0; color: #1F2937; font-size: 14px;">Message:</h3>
      <p style="margin: 0; color: #4B5563; white-space: pre-wrap;">{}</p>
    </div>"#,
        details(&[
            ("Name", escape(name)),
            ("Email", mailto(email)),
            ("Phone", escape(phone)),
            ("Subject", escape(subject)),
        ]),
        escape(message),
    );

    EmailContent {
        subject: format!("Contact Form: {}", subject),
        html: layout(
            "New Contact Form Submission",
            &banner(INFO, "New Contact Form Submission", None),
            &body,
            "This message was sent from the Humanly Staffing website contact form",
        ),
    }
}

/// Fields of a talent request shown to the team
#[derive(Debug, Clone, Copy)]
pub struct TalentRequestSummary<'a> {
    pub company_name: &'a str,
    pub contact_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub position_title: &'a str,
    pub number_of_positions: i32,
    pub location: &'a str,
    pub hiring_timeline: &'a str,
}

/// Sent to the site inbox for a new talent request
pub fn talent_request(app_url: &str, request: TalentRequestSummary<'_>) -> EmailContent {
    let body = format!(
        "<p>A new talent request has been submitted:</p>\n    {}\n    {}",
        details(&[
            ("Company", escape(request.company_name)),
            ("Contact", escape(request.contact_name)),
            ("Email", mailto(request.email)),
            ("Phone", escape(request.phone)),
            ("Position", escape(request.position_title)),
            ("Openings", request.number_of_positions.to_string()),
            ("Location", escape(request.location)),
            ("Timeline", escape(request.hiring_timeline)),
        ]),
        button(&format!("{}/admin/talent-requests", app_url), "Review Request"),
    );

    EmailContent {
        subject: format!(
            "Talent Request: {} at {}",
            request.position_title, request.company_name
        ),
        html: layout(
            "New Talent Request",
            &banner(SUCCESS, "New Talent Request", None),
            &body,
            "This is an automated notification from Humanly Staffing",
        ),
    }
}
