//! End-to-end browsing against the in-memory drive.
//!
//! Run with `cargo test -p netdisk-core --features mock`.

use netdisk_core::mock::{MockCall, MockFile, MockFileService, PresenterEvent, RecordingPresenter};
use netdisk_core::{
    BrowseError, BrowserConfig, BrowserSession, DenialSource, ScrollOutcome, SessionState,
    VirtualPath,
};

type Session = BrowserSession<MockFileService, RecordingPresenter>;

fn session(service: MockFileService) -> Session {
    BrowserSession::new(service, RecordingPresenter::default(), BrowserConfig::default())
}

fn path(s: &str) -> VirtualPath {
    VirtualPath::parse(s)
}

#[tokio::test]
async fn revisiting_a_folder_is_served_from_cache() {
    let drive = MockFileService::new();
    drive.add_file(&path("/docs"), "a.txt", Some(1));
    drive.add_file(&path("/docs"), "b.txt", Some(2));
    let session = session(drive);

    session.start(VirtualPath::root()).await.unwrap();
    session.open_folder("docs").await.unwrap();
    session.navigate_up().await.unwrap();
    session.open_folder("docs").await.unwrap();

    let docs_lists = session
        .service()
        .calls()
        .iter()
        .filter(|c| matches!(c, MockCall::List { path, .. } if path.as_str() == "/docs"))
        .count();
    assert_eq!(docs_lists, 1);
    assert_eq!(session.listing().unwrap().len(), 2);

    let crumbs = session.presenter().last_breadcrumb().unwrap().to_vec();
    let names: Vec<_> = crumbs.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["root", "docs"]);
}

#[tokio::test]
async fn infinite_scroll_pages_through_a_large_folder() {
    let drive = MockFileService::new();
    drive.add_files(&path("/big"), 120);
    let session = session(drive);

    let first = session.navigate(path("/big")).await.unwrap();
    assert_eq!(first.len(), 50);
    assert_eq!(first.total, Some(120));

    assert_eq!(
        session.scroll_more().await.unwrap(),
        ScrollOutcome::Appended { received: 50 }
    );
    assert_eq!(
        session.scroll_more().await.unwrap(),
        ScrollOutcome::Appended { received: 20 }
    );
    assert_eq!(session.scroll_more().await.unwrap(), ScrollOutcome::NoOp);

    let state = session.pagination_state().unwrap();
    assert_eq!((state.page, state.loaded_count, state.total_items), (3, 120, 120));
    assert!(!state.has_more());

    let listing = session.listing().unwrap();
    assert_eq!(listing.len(), 120);
    assert_eq!(listing.files[0].name, "file-000.txt");
    assert_eq!(listing.files[119].name, "file-119.txt");

    let pages: Vec<_> = session
        .service()
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            MockCall::List { page, page_size, .. } => Some((page, page_size)),
            _ => None,
        })
        .collect();
    assert_eq!(pages, vec![(1, 50), (2, 50), (3, 50)]);

    let appends = session
        .presenter()
        .events
        .iter()
        .filter(|e| matches!(e, PresenterEvent::Listing { append: true, .. }))
        .count();
    assert_eq!(appends, 2);
}

#[tokio::test]
async fn creating_a_folder_invalidates_every_cached_listing() {
    let drive = MockFileService::new();
    drive.add_folder(&path("/docs"));
    drive.add_folder(&path("/music"));
    let session = session(drive);

    session.navigate(path("/music")).await.unwrap();
    session.navigate(path("/docs")).await.unwrap();
    assert!(session.is_cached(&path("/music")));

    session.create_folder("  reports ").await.unwrap();

    assert!(!session.is_cached(&path("/music")));
    assert!(session.is_cached(&path("/docs")));
    assert!(session.listing().unwrap().find("reports").is_some());
    assert!(session.service().calls().contains(&MockCall::CreateFolder {
        parent: path("/docs"),
        name: "reports".to_string(),
    }));
}

#[tokio::test]
async fn depth_limit_blocks_descend_but_not_ascend() {
    let drive = MockFileService::new();
    drive.add_folder(&path("/a/b/c/d"));
    drive.set_max_depth(3);
    let session = session(drive);

    session.start(path("/a/b/c")).await.unwrap();
    assert!(session.depth_indicator().at_limit());

    let err = session.open_folder("d").await.unwrap_err();
    let BrowseError::DepthDenied(denial) = err else {
        panic!("expected a depth denial");
    };
    assert_eq!(denial.source, DenialSource::Local);
    assert_eq!(denial.target, path("/a/b/c/d"));
    assert_eq!(session.current_path(), path("/a/b/c"));
    assert!(!session.service().calls().iter().any(
        |c| matches!(c, MockCall::List { path, .. } if path.as_str() == "/a/b/c/d")
    ));

    session.navigate_up().await.unwrap();
    assert_eq!(session.state(), SessionState::Loaded);
    assert_eq!(session.current_path(), path("/a/b"));
}

#[tokio::test]
async fn jumping_past_the_limit_is_refused_by_the_server() {
    let drive = MockFileService::new();
    drive.add_folder(&path("/a/b/c"));
    drive.set_max_depth(2);
    let session = session(drive);
    session.start(path("/a")).await.unwrap();

    // a breadcrumb jump deeper than the limit is still a descend from "/"
    session.navigate(path("/")).await.unwrap();
    let err = session.navigate(path("/a/b/c")).await.unwrap_err();
    let BrowseError::DepthDenied(denial) = err else {
        panic!("expected a depth denial");
    };
    assert_eq!(denial.source, DenialSource::Local);

    let err = session.start(path("/a/b/c")).await.unwrap_err();
    let BrowseError::DepthDenied(denial) = err else {
        panic!("expected a depth denial");
    };
    assert_eq!(denial.source, DenialSource::Server);
    assert_eq!(session.state(), SessionState::DepthDenied);
}

#[tokio::test]
async fn upload_then_reload_shows_new_files() {
    let drive = MockFileService::new();
    drive.add_folder(&path("/inbox"));
    drive.fail_upload("huge.iso");
    let session = session(drive);
    session.navigate(path("/inbox")).await.unwrap();

    let files = vec![
        MockFile::new("a.txt", 3),
        MockFile::new("huge.iso", 1 << 40),
        MockFile::new("b.txt", 5),
    ];
    let mut finished = Vec::new();
    let report = session
        .upload_files(&files, |index, event| {
            if event == netdisk_core::UploadEvent::Finished {
                finished.push(index);
            }
        })
        .await;

    assert_eq!(finished, vec![0, 2]);
    assert_eq!((report.succeeded(), report.failed()), (2, 1));

    let listing = session.reload().await.unwrap();
    let names: Vec<_> = listing.entries().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
}

#[tokio::test]
async fn search_results_replace_the_listing_until_cleared() {
    let drive = MockFileService::new();
    drive.add_folder(&path("/photos/2023"));
    drive.add_file(&path("/photos"), "beach.jpg", Some(10));
    drive.add_file(&path("/photos"), "city.jpg", Some(10));
    let session = session(drive);
    session.navigate(path("/photos")).await.unwrap();

    let found = session.search("BEACH").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(session.listing().unwrap().files[0].name, "beach.jpg");
    assert!(session.is_cached(&path("/photos")));

    let restored = session.search("   ").await.unwrap();
    assert_eq!(restored.len(), 3);
    assert_eq!(restored.folders[0].name, "2023");
}
