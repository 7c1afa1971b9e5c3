//! Static HTML report pages.
//!
//! Every module page shares one template: a header with navigation, the
//! module's body inside a card, and a "last updated" footer in UTC. Pages are
//! written to `<base>/<module>/docs/index.html`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::error::Result;
use super::filings::FilingMeta;
use super::sections::Section;

const SITE_NAME: &str = "FinOps Platform";

const STYLE: &str = r#"    :root { --bg:#fff; --fg:#111; --muted:#666; --border:#eee; --link:#0b5bd3; }
    * { box-sizing: border-box; }
    body { background:var(--bg); color:var(--fg); font-family: system-ui, Arial, sans-serif; margin: 2rem; line-height:1.5; }
    header, footer { color:var(--muted); }
    a { color:var(--link); text-decoration:none; }
    a:hover { text-decoration:underline; }
    .card { border:1px solid var(--border); border-radius:12px; padding:1rem; box-shadow:0 1px 2px rgba(0,0,0,.04); }
    table { border-collapse: collapse; width:100%; }
    td, th { border: 1px solid var(--border); padding: .6rem .8rem; text-align:left; }
    .kpi { display:flex; gap:1rem; flex-wrap:wrap; }
    .kpi > div { border:1px solid var(--border); border-radius:10px; padding:.6rem .8rem; min-width: 160px; }"#;

/// Escapes the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Full HTML document for a module page. `body_html` is inserted as is.
pub fn page_html<S: AsRef<str>>(title: &str, body_html: &str, nav_modules: &[S]) -> String {
    let nav_links = nav_modules
        .iter()
        .map(|m| {
            let m = m.as_ref();
            format!(
                r#"<a href="../{}/">{}</a>"#,
                escape_html(m),
                escape_html(&capitalize(m))
            )
        })
        .collect::<Vec<_>>()
        .join(" | ");
    let updated = Utc::now().format("%Y-%m-%d %H:%M UTC");

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>{title} · {SITE_NAME}</title>
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <style>
{STYLE}
  </style>
</head>
<body>
  <header>
    <h1>{SITE_NAME}</h1>
    <nav style="margin-bottom:1rem;"><a href="../">Home</a> | {nav_links}</nav>
  </header>

  <main class="card">
    {body_html}
  </main>

  <footer>
    <p style="margin-top:1rem;">Last updated: {updated}</p>
  </footer>
</body>
</html>"#,
        title = escape_html(title),
    )
}

/// Writes a page to `<base>/<module>/docs/index.html`, creating directories,
/// and returns the written path.
pub fn render_page<S: AsRef<str>>(
    module: &str,
    title: &str,
    body_html: &str,
    nav_modules: &[S],
    base: &Path,
) -> Result<PathBuf> {
    let out_dir = base.join(module).join("docs");
    fs::create_dir_all(&out_dir)?;
    let path = out_dir.join("index.html");
    fs::write(&path, page_html(title, body_html, nav_modules))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(path)
}

fn highlight_list(items: &[String]) -> String {
    if items.is_empty() {
        return "<em>No highlights found.</em>".to_string();
    }
    let mut out = String::from("<ul>");
    for item in items {
        out.push_str(&format!("<li>{}</li>", escape_html(item)));
    }
    out.push_str("</ul>");
    out
}

/// Highlights per section, in the order they appear on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights {
    pub mdna: Vec<String>,
    pub risk: Vec<String>,
}

impl Highlights {
    pub fn get(&self, section: Section) -> &[String] {
        match section {
            Section::Mdna => &self.mdna,
            Section::Risk => &self.risk,
        }
    }

    pub fn set(&mut self, section: Section, items: Vec<String>) {
        match section {
            Section::Mdna => self.mdna = items,
            Section::Risk => self.risk = items,
        }
    }
}

/// Analyst page body: filing KPIs, SEC link, highlights and cache location.
pub fn analyst_body(meta: &FilingMeta, highlights: &Highlights, local_path: &Path) -> String {
    let field = |v: &Option<String>| escape_html(v.as_deref().unwrap_or(""));
    let mut sections = String::new();
    for section in Section::ALL {
        sections.push_str(&format!(
            "\n      <h3 style=\"margin-top:1.25rem;\">{} · Highlights</h3>\n      {}\n",
            escape_html(section.title()),
            highlight_list(highlights.get(section))
        ));
    }

    format!(
        r#"
      <h2>Analyst · {ticker}</h2>
      <div class="kpi">
        <div><strong>Form:</strong> {form}</div>
        <div><strong>Filing Date:</strong> {filing_date}</div>
        <div><strong>Report Date:</strong> {report_date}</div>
        <div><strong>Accession:</strong> {accession}</div>
      </div>
      <p style="margin-top:1rem;">
        <a href="{detail_url}" target="_blank" rel="noopener">View filing on SEC</a>
      </p>
{sections}
      <details style="margin-top:1rem;">
        <summary>Local cache</summary>
        <p>Saved primary document: <code>{local_path}</code></p>
      </details>
    "#,
        ticker = escape_html(&meta.ticker),
        form = escape_html(&meta.form),
        filing_date = field(&meta.filing_date),
        report_date = field(&meta.report_date),
        accession = field(&meta.accession_number),
        detail_url = escape_html(&meta.filing_detail_url),
        local_path = escape_html(&local_path.display().to_string()),
    )
}

/// Body for a ticker with no filing of the requested forms.
pub fn not_found_body(ticker: &str) -> String {
    format!(
        r#"
      <h2>Analyst Module</h2>
      <p>Could not find SEC filings for <strong>{}</strong>.</p>
    "#,
        escape_html(&ticker.to_uppercase())
    )
}

/// Page title for the analyst report of `ticker`.
pub fn analyst_title(ticker: &str) -> String {
    format!("Analyst Report · {}", ticker.to_uppercase())
}
