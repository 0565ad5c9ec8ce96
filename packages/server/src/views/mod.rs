//! Server-rendered HTML pages.

mod entry;
mod get_app;
mod home;
mod script;

pub use entry::{EntryPage, entry_page};
pub use get_app::{get_app_page, sanitize_from};
pub use home::home_page;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

const STYLE: &str = r#"
*{box-sizing:border-box}
body{margin:0;min-height:100vh;background:#0f0f10;color:#fff;font-family:system-ui,-apple-system,sans-serif;line-height:1.5}
main{max-width:720px;margin:0 auto;padding:24px}
a{color:inherit}
.card{border-radius:16px;border:1px solid rgba(255,255,255,.14);background:rgba(255,255,255,.06);padding:18px}
.header{display:flex;gap:16px;justify-content:space-between;align-items:flex-start;flex-wrap:wrap}
.title{margin:0;font-size:26px;font-weight:800}
.sub{margin:6px 0 0;color:rgba(255,255,255,.75)}
.cta{display:grid;gap:10px;min-width:220px}
.btn{display:inline-block;padding:12px 14px;border-radius:12px;border:1px solid rgba(255,255,255,.15);background:rgba(255,255,255,.08);color:#fff;font-weight:700;text-decoration:none;text-align:center;cursor:pointer;font-size:15px}
.btn.primary{background:#fff;color:#111;font-weight:800}
.btn.ghost{background:transparent;border-style:dashed}
.btn.small{padding:10px 12px;font-weight:600;font-size:14px}
.row{display:flex;gap:8px;flex-wrap:wrap}
.hint{color:rgba(255,255,255,.8);font-size:13px;min-height:18px}
.note{color:rgba(255,255,255,.6);font-size:12px}
.section{margin-top:24px}
.h2{font-size:18px;margin:0 0 8px}
.muted{color:rgba(255,255,255,.6)}
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(160px,1fr));gap:12px}
.img-card{display:block;text-decoration:none;border-radius:12px;overflow:hidden;border:1px solid rgba(255,255,255,.12)}
.img-card img{display:block;width:100%;height:140px;object-fit:cover}
.caption{padding:6px 8px;font-size:12px;color:rgba(255,255,255,.8);word-break:break-all}
.file-row{display:flex;gap:8px;padding:8px 0;text-decoration:none;border-bottom:1px solid rgba(255,255,255,.08)}
.logo{max-width:160px;max-height:160px;border-radius:12px;margin-top:16px}
.news-row{padding:10px 0;border-bottom:1px solid rgba(255,255,255,.08)}
.news-date{font-size:12px;color:rgba(255,255,255,.6)}
.debug{white-space:pre-wrap;font-size:12px;background:rgba(255,255,255,.06);padding:12px;border-radius:12px;overflow:auto}
.footer{margin-top:32px;font-size:12px;color:rgba(255,255,255,.5);text-align:center}
"#;

/// Full HTML document around `body`.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"de\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape_html(title)
    )
}

/// Minimal page for failures that are not part of the normal flow.
pub fn error_page(status: StatusCode, message: &str) -> Response {
    let body = format!(
        "<main><div class=\"card\"><h1 class=\"title\">{}</h1><p class=\"sub\">{}</p></div></main>",
        status.as_u16(),
        escape_html(message)
    );
    (status, Html(layout(message, &body))).into_response()
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Externally hosted URL for `href`/`src`, restricted to http(s).
///
/// Anything else (`javascript:`, `data:`, garbage) becomes `#`.
pub fn external_url(url: &str) -> String {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        escape_html(trimmed)
    } else {
        "#".to_string()
    }
}
