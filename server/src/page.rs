//! HTML for the single search page.

use crate::form::SearchForm;
use common::{ShapedJobs, Site};

/// What to show below the form.
#[derive(Debug)]
pub enum Outcome<'a> {
    Blank,
    Error(&'a str),
    Results { jobs: &'a ShapedJobs, csv: &'a str },
}

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;}\
label{display:block;margin:.4rem 0;}\
table{border-collapse:collapse;margin-top:1rem;}\
th,td{border:1px solid #ccc;padding:.3rem .5rem;text-align:left;}\
.error{color:#a00;font-weight:bold;}\
textarea{width:100%;height:10rem;font-family:monospace;}";

const TABLE_HEADERS: [&str; 8] = [
    "Title", "Company", "Location", "Date", "Job Type", "Remote", "Link", "Salary",
];

pub fn render_index(form: &SearchForm, default_country: &str, outcome: &Outcome<'_>) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>Job Search</title>\n");
    html.push_str(&format!("<style>{STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n<h1>Job Search</h1>\n");
    html.push_str(&render_form(form, default_country));

    match outcome {
        Outcome::Blank => {}
        Outcome::Error(message) => {
            html.push_str(&format!("<p class=\"error\">{}</p>\n", escape(message)));
        }
        Outcome::Results { jobs, csv } => {
            html.push_str(&render_results(jobs));
            html.push_str(&render_csv(csv));
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_form(form: &SearchForm, default_country: &str) -> String {
    let value = |field: &Option<String>, fallback: &str| {
        escape(field.as_deref().unwrap_or(fallback))
    };

    let mut html = String::from("<form method=\"post\" action=\"/\">\n");
    html.push_str(&format!(
        "<label>Job title <input type=\"text\" name=\"search_term\" required value=\"{}\"></label>\n",
        value(&form.search_term, "")
    ));
    html.push_str(&format!(
        "<label>Location <input type=\"text\" name=\"location\" required value=\"{}\"></label>\n",
        value(&form.location, "")
    ));

    html.push_str("<fieldset><legend>Sites</legend>\n");
    for site in Site::ALL {
        let checked = if is_ticked(form, site) { " checked" } else { "" };
        html.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"site_name\" value=\"{site}\"{checked}> {site}</label>\n"
        ));
    }
    html.push_str("</fieldset>\n");

    html.push_str(&format!(
        "<label>Results per site <input type=\"number\" name=\"results_wanted\" min=\"1\" value=\"{}\"></label>\n",
        value(&form.results_wanted, &common::DEFAULT_RESULTS_WANTED.to_string())
    ));
    html.push_str(&format!(
        "<label>Posted within (hours) <input type=\"number\" name=\"hours_old\" min=\"1\" value=\"{}\"></label>\n",
        value(&form.hours_old, &common::DEFAULT_HOURS_OLD.to_string())
    ));
    html.push_str(&format!(
        "<label>Indeed country <input type=\"text\" name=\"country_indeed\" value=\"{}\"></label>\n",
        value(&form.country_indeed, default_country)
    ));
    html.push_str("<button type=\"submit\">Search</button>\n</form>\n");
    html
}

fn is_ticked(form: &SearchForm, site: Site) -> bool {
    if form.site_name.iter().all(|s| s.trim().is_empty()) {
        return common::DEFAULT_SITES.contains(&site);
    }
    form.site_name
        .iter()
        .any(|name| name.parse::<Site>().is_ok_and(|s| s == site))
}

fn render_results(jobs: &ShapedJobs) -> String {
    let mut html = format!("<h2>Found {} jobs</h2>\n<table>\n<thead><tr>", jobs.len());
    for header in TABLE_HEADERS {
        html.push_str(&format!("<th>{header}</th>"));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for job in jobs {
        html.push_str("<tr>");
        for cell in [
            &job.title,
            &job.company,
            &job.location,
            &job.date,
            &job.job_type,
            &job.remote,
        ] {
            html.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        html.push_str(&format!(
            "<td><a href=\"{}\" target=\"_blank\" rel=\"noopener\">View</a></td><td>{}</td></tr>\n",
            escape(&job.job_url),
            escape(&job.salary)
        ));
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

fn render_csv(csv: &str) -> String {
    format!(
        "<h2>CSV export</h2>\n\
         <p><a download=\"jobs.csv\" href=\"data:text/csv;charset=utf-8,{}\">Download CSV</a></p>\n\
         <textarea readonly>{}</textarea>\n",
        urlencoding::encode(csv),
        escape(csv)
    )
}

/// Escapes text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
