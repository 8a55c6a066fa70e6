//! HTML templates for the web interface.
//!
//! Every page carries the fixed `star-field` container; population
//! happens in the handlers so each response gets its own layout.

use chrono::{Datelike, Utc};

use crate::config::SiteConfig;

use super::assets;

/// Escape config-sourced text before embedding it in page markup. The
/// site title and tagline are the only free-form strings that reach
/// the templates.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Base HTML template with the starfield background container.
pub fn base_template(site: &SiteConfig, content: &str) -> String {
    let title = escape(&site.title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <div id="star-field" class="star-field" aria-hidden="true"></div>
    <header id="main-header">
        <nav>
            <a href="/" class="logo">{}</a>
        </nav>
    </header>
    <main>
        {}
    </main>
    <footer>
        <p>&copy; {} {}</p>
    </footer>
</body>
</html>"#,
        title,
        title,
        content,
        Utc::now().year(),
        title
    )
}

/// Render the landing page.
pub fn index_page(site: &SiteConfig) -> String {
    let content = format!(
        r#"
        <section class="hero">
            <h1>{}</h1>
            <p class="tagline">{}</p>
        </section>
        "#,
        escape(&site.title),
        escape(&site.tagline)
    );

    base_template(site, &content)
}

/// Self-contained page with the stylesheet inlined, for file output.
pub fn standalone_page(site: &SiteConfig) -> String {
    index_page(site).replace(
        r#"<link rel="stylesheet" href="/static/style.css">"#,
        &format!("<style>\n{}</style>", assets::CSS),
    )
}
