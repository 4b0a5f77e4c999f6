// src/extractor/courses.rs

use super::PageSchema;
use crate::{error::*, models::Course, ui};
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// Anti-forgery token of the login form on the landing page.
pub fn parse_login_token(page: &str) -> AppResult<String> {
    let caps = PageSchema::LoginForm.capture(page).map_err(|e| {
        debug!("Login token lookup failed: {}", e);
        AppError::Authentication("the login form token could not be found on the portal page".into())
    })?;
    Ok(caps[1].to_string())
}

/// A page still showing the login form or its error block means the
/// credentials were not accepted.
pub fn login_rejected(page: &str) -> bool {
    PageSchema::LoginErrors.is_present(page) || PageSchema::LoginForm.is_present(page)
}

/// Course code -> course, from the "My Courses" menu of the landing page.
///
/// A code seen twice keeps the later entry; the collision is reported.
pub fn parse_courses(page: &str) -> AppResult<BTreeMap<String, Course>> {
    let mut courses = BTreeMap::new();
    for caps in PageSchema::CourseNav.capture_all(page)? {
        let course = Course {
            id: caps[1].to_string(),
            code: caps[2].to_string(),
            name: caps[3].trim().to_string(),
        };
        debug!("Found course {} (id {}): {}", course.code, course.id, course.name);
        if let Some(previous) = courses.insert(course.code.clone(), course) {
            let current = &courses[&previous.code];
            warn!(
                "Duplicate course code {}: id {} replaced by id {}",
                previous.code, previous.id, current.id
            );
            ui::warn(&format!(
                "Course code {} appears more than once; keeping '{}' (id {}) over '{}' (id {}).",
                previous.code, current.name, current.id, previous.name, previous.id
            ));
        }
    }
    info!("Parsed {} course(s) from the landing page", courses.len());
    Ok(courses)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_PAGE: &str = r#"<html><body>
<form class="m-t-1" action="https://learn.canterbury.ac.nz/login/index.php" method="post" id="login">
    <input id="anchor" type="hidden" name="anchor" value="">
    <input type="hidden" name="logintoken" value="abc123">
    <input type="text" name="username" id="username">
</form>
</body></html>"#;

    const LANDING_PAGE: &str = r##"<ul class="navbar-nav">
<li class="dropdown nav-item">
    <a class="dropdown-toggle nav-link" id="drop-down-1" data-toggle="dropdown" href="#" title="My Courses">
        My Courses
    </a>
    <div class="dropdown-menu" role="menu">
        <a class="dropdown-item" role="menuitem" href="https://learn.canterbury.ac.nz/course/view.php?id=1234" title="COSC121-20S1 Introduction to Computer Programming">COSC121-20S1 Introduction to Computer Programming</a>
        <a class="dropdown-item" role="menuitem" href="https://learn.canterbury.ac.nz/course/view.php?id=5678" title="ENGR101-ENGR102-20S1 Foundations">ENGR101-ENGR102-20S1 Foundations</a>
        <a class="dropdown-item" role="menuitem" href="https://learn.canterbury.ac.nz/my/" title="Dashboard">Dashboard</a>
    </div>
</li>
<li class="nav-item"><a class="dropdown-item" role="menuitem" href="/course/view.php?id=9" title="MATH999-20S1 Outside">Outside</a></li>
</ul>"##;

    #[test]
    fn test_parse_login_token() {
        assert_eq!(parse_login_token(LOGIN_PAGE).unwrap(), "abc123");
    }

    #[test]
    fn test_missing_login_token_is_authentication_error() {
        let page = r#"<form class="m-t-1"><input type="text" name="username"></form>"#;
        assert!(matches!(parse_login_token(page), Err(AppError::Authentication(_))));
        assert!(matches!(parse_login_token("<html></html>"), Err(AppError::Authentication(_))));
    }

    #[test]
    fn test_login_rejected() {
        assert!(login_rejected(LOGIN_PAGE));
        assert!(login_rejected(r#"<div class="loginerrors"><a id="loginerrormessage">Invalid login</a></div>"#));
        assert!(!login_rejected(LANDING_PAGE));
    }

    #[test]
    fn test_parse_courses() {
        let courses = parse_courses(LANDING_PAGE).unwrap();
        assert_eq!(courses.len(), 2);

        let cosc = &courses["COSC121"];
        assert_eq!(cosc.id, "1234");
        assert_eq!(cosc.name, "COSC121-20S1 Introduction to Computer Programming");

        let engr = &courses["ENGR101-ENGR102"];
        assert_eq!(engr.id, "5678");

        // the link after the closing </li> is outside the menu
        assert!(!courses.contains_key("MATH999"));
        // sorted by code
        assert_eq!(courses.keys().collect::<Vec<_>>(), vec!["COSC121", "ENGR101-ENGR102"]);
    }

    #[test]
    fn test_duplicate_course_code_keeps_last() {
        let page = r##"<li class="dropdown nav-item"><a href="#">My Courses</a>
<a class="dropdown-item" role="menuitem" href="/course/view.php?id=1" title="COSC121-19S1 Old">Old</a>
<a class="dropdown-item" role="menuitem" href="/course/view.php?id=2" title="COSC121-20S1 New">New</a>
</li>"##;
        let courses = parse_courses(page).unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses["COSC121"].id, "2");
        assert_eq!(courses["COSC121"].name, "New");
    }

    #[test]
    fn test_missing_course_menu_is_parse_failure() {
        assert!(matches!(
            parse_courses("<html>maintenance</html>"),
            Err(AppError::ParseFailure { schema: PageSchema::CourseNav, .. })
        ));
    }
}
