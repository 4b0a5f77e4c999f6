// tests/mirror_workflow_test.rs

mod common;

use common::*;
use learn_dl::{
    error::AppError,
    extractor::PageSchema,
    models::Course,
    workflows::{fetch_courses, mirror_course},
};
use mockito::Matcher;
use std::fs;
use tempfile::tempdir;

fn cosc121() -> Course {
    Course {
        id: "1234".into(),
        code: "COSC121".into(),
        name: "COSC121 Introduction to Programming".into(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_mirror_course_processes_every_resource_in_order() {
    let mut server = mockito::Server::new_async().await;
    mock_login(&mut server, "alice", "s3cret").await;

    let rows = vec![
        resource_row("/mod/resource/view.php?id=5", "core/1/f/pdf-24", "File", "Syllabus"),
        resource_row("/mod/url/view.php?id=6", "url/1/icon", "URL", "Course Blog"),
        resource_row("/mod/quiz/view.php?id=7", "quiz/1/icon", "Quiz", "Weekly Quiz"),
        resource_row("/mod/page/view.php?id=8", "page/1/icon", "Page", "Tips &amp; Tricks"),
    ];
    let resources = server
        .mock("GET", path("/course/resources.php"))
        .match_query(Matcher::UrlEncoded("id".into(), "1234".into()))
        .with_header("content-type", HTML)
        .with_body(resource_page(&rows))
        .create_async()
        .await;
    server
        .mock("GET", path("/mod/resource/view.php"))
        .with_header("content-type", "application/pdf")
        .with_body("%PDF-1.4")
        .create_async()
        .await;
    server
        .mock("GET", path("/mod/url/view.php"))
        .with_header("content-type", HTML)
        .with_body(r#"<div role="main"><h2>Course Blog</h2><a href="https://blog.example.com/cosc121">open</a></div>"#)
        .create_async()
        .await;
    let quiz = server
        .mock("GET", path("/mod/quiz/view.php"))
        .expect(0)
        .create_async()
        .await;
    server
        .mock("GET", path("/mod/page/view.php"))
        .with_header("content-type", "text/plain")
        .with_body("tips")
        .create_async()
        .await;

    let context = context_for(&server.url(), false);
    context.session.login("alice", "s3cret").await.unwrap();

    let dir = tempdir().unwrap();
    let course_dest = dir.path().join("COSC121 Introduction to Programming");
    let count = mirror_course(&context, &cosc121(), &course_dest).await.unwrap();
    assert_eq!(count, 4);

    let single = course_dest.join("Single Files");
    assert_eq!(fs::read_to_string(single.join("Syllabus").join("Syllabus.pdf")).unwrap(), "%PDF-1.4");
    assert!(fs::read_to_string(single.join("Course Blog.url"))
        .unwrap()
        .contains("URL=https://blog.example.com/cosc121"));
    assert_eq!(fs::read_to_string(single.join("Tips & Tricks.txt")).unwrap(), "tips");

    let stats = context.manager.get_stats();
    assert_eq!((stats.total, stats.success, stats.skipped, stats.failed), (4, 3, 1, 0));
    resources.assert_async().await;
    quiz.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_resource_does_not_stop_the_course() {
    let mut server = mockito::Server::new_async().await;
    let rows = vec![
        resource_row("/mod/folder/view.php?id=1", "folder/1/icon", "Folder", "Broken Folder"),
        resource_row("/mod/resource/view.php?id=2", "core/1/f/pdf-24", "File", "Notes"),
    ];
    server
        .mock("GET", path("/course/resources.php"))
        .with_header("content-type", HTML)
        .with_body(resource_page(&rows))
        .create_async()
        .await;
    server
        .mock("GET", path("/mod/folder/view.php"))
        .with_status(500)
        .create_async()
        .await;
    server
        .mock("GET", path("/mod/resource/view.php"))
        .with_header("content-type", "application/pdf")
        .with_body("%PDF")
        .create_async()
        .await;

    let context = context_for(&server.url(), false);
    let dir = tempdir().unwrap();
    let count = mirror_course(&context, &cosc121(), dir.path()).await.unwrap();

    assert_eq!(count, 2);
    assert!(dir.path().join("Single Files").join("Notes").join("Notes.pdf").exists());
    let stats = context.manager.get_stats();
    assert_eq!((stats.success, stats.failed), (1, 1));
    assert!(!context.manager.did_all_succeed());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_changed_resource_page_fails_course_with_fragment() {
    let mut server = mockito::Server::new_async().await;
    let broken_cell = r#"<a href="/mod/resource/view.php?id=5"><span class="instancename">Syllabus</span></a>"#;
    let page = resource_page(&[format!(
        r#"<tr><td class="cell c1" style="text-align:left;">{}</td></tr>"#,
        broken_cell
    )]);
    server
        .mock("GET", path("/course/resources.php"))
        .with_header("content-type", HTML)
        .with_body(page)
        .create_async()
        .await;
    let downloads = server
        .mock("GET", path("/mod/"))
        .expect(0)
        .create_async()
        .await;

    let context = context_for(&server.url(), false);
    let dir = tempdir().unwrap();
    match mirror_course(&context, &cosc121(), dir.path()).await {
        Err(AppError::ParseFailure { schema, fragment }) => {
            assert_eq!(schema, PageSchema::ResourceEntry);
            assert_eq!(fragment, broken_cell);
        }
        other => panic!("expected ParseFailure, got {:?}", other),
    }
    downloads.assert_async().await;
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_course_without_resources() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", path("/course/resources.php"))
        .with_header("content-type", HTML)
        .with_body(r#"<div role="main"><div class="alert">There are no resources</div></div>"#)
        .create_async()
        .await;

    let context = context_for(&server.url(), false);
    let dir = tempdir().unwrap();
    assert_eq!(mirror_course(&context, &cosc121(), dir.path()).await.unwrap(), 0);
    assert_eq!(context.manager.get_stats().total, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_landing_page_without_course_menu_is_parse_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .with_header("content-type", HTML)
        .with_body("<html><body>Site is under maintenance</body></html>")
        .create_async()
        .await;

    let context = context_for(&server.url(), false);
    assert!(matches!(
        fetch_courses(&context).await,
        Err(AppError::ParseFailure { schema: PageSchema::CourseNav, .. })
    ));
}
