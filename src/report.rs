//! Static HTML report of a run's matches.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::data::Match;
use crate::error::ReconError;

/// Format of the "Last Updated" footer timestamp.
pub const LAST_UPDATED_FORMAT: &str = "%a, %d %b %Y, %H:%M:%S +0000";

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Git Recon</title>
<link href="https://cdn.jsdelivr.net/npm/bootstrap@5.0.0-beta1/dist/css/bootstrap.min.css" rel="stylesheet" integrity="sha384-giJF6kkoqNQ00vy+HMDP7azOuL0xtbfIcaT9wjKHr8RbDVddVHyTfAAsrekwKmP1" crossorigin="anonymous">
</head>
<body>
<div class="container-fluid">
<h1>Git Recon</h1>
"#;

const TABLE_HEAD: &str = r#"<table class="table table-hover" style="width:100%">
<tr>
<th scope="col">Summary</th>
<th scope="col">Project</th>
<th scope="col">Triggered Keyword</th>
<th scope="col">Author</th>
<th scope="col">Date</th>
</tr>
"#;

/// Renders the report page.
pub fn render_html(matches: &[Match], last_updated: DateTime<Utc>) -> String {
    let mut html = String::from(PAGE_HEAD);

    html.push_str("<div class=\"alert alert-info\" role=\"alert\">\n");
    html.push_str(&format!("Found {} keyword matches!\n", matches.len()));
    html.push_str("</div>\n");

    html.push_str(TABLE_HEAD);
    for m in matches {
        html.push_str("<tr>\n");
        html.push_str(&format!(
            "<td><a href=\"{}\">{}</a></td>\n",
            escape_html(&m.url),
            escape_html(&m.summary)
        ));
        html.push_str(&format!("<td>{}</td>\n", escape_html(&m.project_name)));
        html.push_str(&format!("<td>{}</td>\n", escape_html(&m.triggered_keyword)));
        html.push_str(&format!("<td>{}</td>\n", escape_html(&m.author)));
        html.push_str(&format!("<td>{}</td>\n", escape_html(&m.formatted_date)));
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n</div>\n");

    html.push_str("<footer>\n<div class=\"container\">\n<span class=\"text-muted\">\n");
    html.push_str(&format!(
        "<strong>Last Updated:</strong> {};\n",
        last_updated.format(LAST_UPDATED_FORMAT)
    ));
    html.push_str(
        "Generated using <a href=\"https://github.com/sgmenda/git-recon\">sgmenda/git-recon</a>\n",
    );
    html.push_str("</span>\n</div>\n</footer>\n</body>\n</html>\n");

    html
}

/// Renders the report and writes it to `path`, replacing any existing file.
pub fn write_report(
    path: &Path,
    matches: &[Match],
    last_updated: DateTime<Utc>,
) -> Result<(), ReconError> {
    let render_error = |source| ReconError::Render {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(render_error)?;
    }
    fs::write(path, render_html(matches, last_updated)).map_err(render_error)?;

    info!(path = %path.display(), matches = matches.len(), "Wrote report");
    Ok(())
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
