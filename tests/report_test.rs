use chrono::{TimeZone, Utc};
use git_recon::data::Match;
use git_recon::report::render_html;

fn found(project: &str, keyword: &str, hash: &str, summary: &str, author: &str) -> Match {
    Match {
        project_name: project.to_string(),
        triggered_keyword: keyword.to_string(),
        url: format!("https://github.com/{project}/{project}/commit/{hash}"),
        summary: summary.to_string(),
        author: author.to_string(),
        formatted_date: "Mon, 04 Jan 2021".to_string(),
        full_message: format!("{summary}\n"),
    }
}

#[test]
fn rendered_report_golden() {
    let matches = vec![
        found(
            "curl",
            "openssl",
            "1f2e3d4c",
            "vtls: drop <openssl> 1.0 support",
            "Daniel Stenberg",
        ),
        found("zlib", "cve", "9a8b7c6d", "Fix CVE-2018-25032 & friends", "Mark Adler"),
    ];
    let updated = Utc.with_ymd_and_hms(2021, 1, 5, 13, 4, 5).unwrap();

    let html = render_html(&matches, updated);

    insta::assert_snapshot!("rendered_report", html);
}
