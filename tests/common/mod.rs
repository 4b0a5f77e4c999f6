// tests/common/mod.rs

#![allow(dead_code)]

use learn_dl::{MirrorContext, config::AppConfig};
use mockito::{Matcher, Mock, ServerGuard};
use std::sync::Arc;
use url::Url;

pub const HTML: &str = "text/html; charset=utf-8";
pub const SESSION_COOKIE: &str = "MoodleSession=s3ss10n";

pub const LOGIN_PAGE: &str = r#"<html><body>
<div class="card-body">
<form class="m-t-1" action="/login/index.php" method="post" id="login">
    <input id="anchor" type="hidden" name="anchor" value="">
    <input type="hidden" name="logintoken" value="abc123">
    <input type="text" name="username" id="username" class="form-control">
    <input type="password" name="password" id="password" class="form-control">
</form>
</div>
</body></html>"#;

pub const REJECTED_PAGE: &str = r##"<html><body>
<div class="loginerrors mt-3"><a href="#" id="loginerrormessage" class="accesshide">Invalid login, please try again</a></div>
<form class="m-t-1" action="/login/index.php" method="post" id="login">
    <input type="hidden" name="logintoken" value="def456">
</form>
</body></html>"##;

pub const DASHBOARD_PAGE: &str = r##"<html><body>
<nav><ul class="navbar-nav">
<li class="dropdown nav-item">
    <a class="dropdown-toggle nav-link" id="drop-down-1" data-toggle="dropdown" href="#" title="My Courses">
        My Courses
    </a>
    <div class="dropdown-menu" role="menu">
        <a class="dropdown-item" role="menuitem" href="/course/view.php?id=1234" title="COSC121-20S1 Introduction to Programming">COSC121: Introduction to Programming</a>
        <a class="dropdown-item" role="menuitem" href="/course/view.php?id=42" title="MATH102-20S1 Calculus">MATH102 Calculus</a>
    </div>
</li>
</ul></nav>
<div role="main">Welcome back</div>
</body></html>"##;

pub fn resource_row(href: &str, icon: &str, alt: &str, name: &str) -> String {
    format!(
        r#"<tr class=""><td class="cell c0" style="text-align:center;">1</td><td class="cell c1" style="text-align:left;"><a href="{href}"><img src="/theme/image.php/boost/{icon}" class="iconlarge activityicon" alt="{alt}" /> {name}</a></td><td class="cell c2"></td></tr>"#
    )
}

pub fn resource_page(rows: &[String]) -> String {
    format!(
        "<html><body>\n<div role=\"main\"><span id=\"maincontent\"></span><table class=\"generaltable mod_index\">\n\
         <thead><tr><th class=\"header c0\">Topic</th><th class=\"header c1\">Name</th></tr></thead>\n<tbody>\n{}\n</tbody>\n</table>\n</div>\n</body></html>",
        rows.join("\n")
    )
}

pub fn context_for(base_url: &str, dry_run: bool) -> MirrorContext {
    let config = AppConfig {
        base_url: Url::parse(base_url).unwrap(),
        dry_run,
        ..AppConfig::default()
    };
    MirrorContext::new(Arc::new(config)).unwrap()
}

/// A path matcher that ignores the query string.
pub fn path(prefix: &str) -> Matcher {
    Matcher::Regex(format!("^{}", regex::escape(prefix)))
}

/// Landing page, login form post and the logged-in landing page.
pub async fn mock_login(server: &mut ServerGuard, username: &str, password: &str) -> Vec<Mock> {
    let login_form = server
        .mock("GET", "/")
        .match_header("cookie", Matcher::Missing)
        .with_header("content-type", HTML)
        .with_body(LOGIN_PAGE)
        .create_async()
        .await;
    let login_post = server
        .mock("POST", "/login/index.php")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("username".into(), username.into()),
            Matcher::UrlEncoded("password".into(), password.into()),
            Matcher::UrlEncoded("logintoken".into(), "abc123".into()),
        ]))
        .with_header("content-type", HTML)
        .with_header("set-cookie", &format!("{}; path=/; HttpOnly", SESSION_COOKIE))
        .with_body(DASHBOARD_PAGE)
        .create_async()
        .await;
    let dashboard = server
        .mock("GET", "/")
        .match_header("cookie", Matcher::Regex(SESSION_COOKIE.into()))
        .with_header("content-type", HTML)
        .with_body(DASHBOARD_PAGE)
        .create_async()
        .await;
    vec![login_form, login_post, dashboard]
}
