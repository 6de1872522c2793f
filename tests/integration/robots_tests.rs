//! Integration tests for robots.txt sessions
//!
//! Fixture-backed tests serve real-world style robots.txt files from
//! `tests/fixtures`; the HTTP tests use wiremock to exercise the reqwest
//! fetcher end-to-end.

use robots_etiquette::config::parse_config;
use robots_etiquette::{RobotsDocument, RobotsFetcher, RobotsOptions, RobotsSession};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_AGENT: &str = "Ruby-Robot.txt Parser Test Script";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Serves `tests/fixtures/<name>.txt` for `www.<name>.com`
struct FixtureFetcher;

impl FixtureFetcher {
    fn fixture(name: &str) -> Option<&'static str> {
        match name {
            "emptyish" => Some(include_str!("../fixtures/emptyish.txt")),
            "eventbrite" => Some(include_str!("../fixtures/eventbrite.txt")),
            "extended" => Some(include_str!("../fixtures/extended.txt")),
            "google" => Some(include_str!("../fixtures/google.txt")),
            "reddit" => Some(include_str!("../fixtures/reddit.txt")),
            "yelp" => Some(include_str!("../fixtures/yelp.txt")),
            _ => None,
        }
    }
}

impl RobotsFetcher for FixtureFetcher {
    async fn fetch(&self, robots_url: &Url) -> Option<RobotsDocument> {
        assert_eq!(robots_url.path(), "/robots.txt");
        let host = robots_url.host_str()?;
        let name = host.split('.').rev().nth(1)?;
        Self::fixture(name).map(RobotsDocument::plain_text)
    }
}

/// Never has a document
struct AbsentFetcher;

impl RobotsFetcher for AbsentFetcher {
    async fn fetch(&self, _robots_url: &Url) -> Option<RobotsDocument> {
        None
    }
}

fn fixture_session(agent: &str) -> RobotsSession<FixtureFetcher> {
    init_tracing();
    RobotsSession::with_fetcher(agent, RobotsOptions::non_blocking(), FixtureFetcher)
}

fn uri_for_name(name: &str, path: &str) -> Url {
    Url::parse(&format!("http://www.{}.com{}", name, path)).expect("valid fixture URL")
}

async fn assert_allowed(session: &RobotsSession<FixtureFetcher>, name: &str, path: &str) {
    assert!(
        session.allowed(&uri_for_name(name, path)).await,
        "{} should be allowed on {}",
        path,
        name
    );
}

async fn assert_disallowed(session: &RobotsSession<FixtureFetcher>, name: &str, path: &str) {
    assert!(
        !session.allowed(&uri_for_name(name, path)).await,
        "{} should be disallowed on {}",
        path,
        name
    );
}

async fn clean(session: &RobotsSession<FixtureFetcher>, url: &str) -> String {
    let url = Url::parse(url).expect("valid test URL");
    session.clean_url(&url).await.to_string()
}

#[tokio::test]
async fn test_allowed_if_no_robots() {
    init_tracing();
    let session = RobotsSession::with_fetcher(TEST_AGENT, RobotsOptions::default(), AbsentFetcher);

    let url = uri_for_name("somesite", "/");
    assert!(session.allowed(&url).await);
    assert_eq!(session.crawl_delay(&url).await, 0.0);
    assert!(session.other_values(&url).await.is_empty());
}

#[tokio::test]
async fn test_disallow_nothing() {
    let session = fixture_session(TEST_AGENT);
    assert_allowed(&session, "emptyish", "/").await;
    assert_allowed(&session, "emptyish", "/foo").await;
}

#[tokio::test]
async fn test_reddit() {
    let session = fixture_session(TEST_AGENT);
    assert_allowed(&session, "reddit", "/").await;
    // Disallow: /api, but the group's `Allow: /` overrides any disallow
    assert_allowed(&session, "reddit", "/api").await;
}

#[tokio::test]
async fn test_reddit_named_agent() {
    let session = fixture_session("bender");
    assert_allowed(&session, "reddit", "/my_shiny_metal_ass").await;

    let session = fixture_session("008");
    assert_allowed(&session, "reddit", "/anything").await;
}

#[tokio::test]
async fn test_other() {
    let session = fixture_session(TEST_AGENT);
    assert_allowed(&session, "yelp", "/foo").await;
    assert_disallowed(&session, "yelp", "/mail?foo=bar").await;
    assert_disallowed(&session, "yelp", "/advertise?x=1").await;
    assert_allowed(&session, "yelp", "/advertise").await;
}

#[tokio::test]
async fn test_site_with_disallowed() {
    let session = fixture_session(TEST_AGENT);
    assert_allowed(&session, "google", "/").await;
    assert_disallowed(&session, "google", "/search").await;
    assert_allowed(&session, "google", "/search/about").await;
    assert_allowed(&session, "google", "/m/finance").await;
    assert_disallowed(&session, "google", "/m/other").await;
}

#[tokio::test]
async fn test_google_agent_specific_allow() {
    let session = fixture_session(TEST_AGENT);
    assert_disallowed(&session, "google", "/imgres?imgurl=x").await;

    let session = fixture_session("Twitterbot/1.0");
    assert_allowed(&session, "google", "/imgres?imgurl=x").await;
}

#[tokio::test]
async fn test_other_values() {
    let session = fixture_session(TEST_AGENT);
    let sitemap = HashMap::from([(
        "sitemap".to_string(),
        vec![
            "http://www.eventbrite.com/sitemap_index.xml".to_string(),
            "http://www.eventbrite.com/sitemap_index.xml".to_string(),
        ],
    )]);
    assert_eq!(
        session.other_values(&uri_for_name("eventbrite", "/")).await,
        sitemap
    );
}

#[tokio::test]
async fn test_crawl_delay() {
    let robots = fixture_session(TEST_AGENT);
    let mobot = fixture_session("Mobot");

    assert_eq!(robots.crawl_delay(&uri_for_name("extended", "/")).await, 1.0);
    assert_eq!(mobot.crawl_delay(&uri_for_name("extended", "/")).await, 0.5);
    assert_eq!(robots.crawl_delay(&uri_for_name("emptyish", "/")).await, 0.0);
}

#[tokio::test]
async fn test_clean_url() {
    let robots = fixture_session(TEST_AGENT);
    let mobot = fixture_session("Mobot");
    let h = "http://www.extended.com";

    assert_eq!(clean(&robots, &format!("{h}/")).await, format!("{h}/"));
    assert_eq!(clean(&robots, &format!("{h}/test")).await, format!("{h}/test"));

    assert_eq!(clean(&robots, &format!("{h}/?term1=test")).await, format!("{h}/"));
    assert_eq!(
        clean(&robots, &format!("{h}/?term1=test&tt=qq")).await,
        format!("{h}/?tt=qq")
    );
    assert_eq!(
        clean(&robots, &format!("{h}/?tt=qq&term1=test&term1=test2")).await,
        format!("{h}/?tt=qq")
    );
    assert_eq!(
        clean(&robots, &format!("{h}/aaa/zzz?term1=test")).await,
        format!("{h}/aaa/zzz")
    );
    assert_eq!(
        clean(&robots, &format!("{h}/path1/?term2=test")).await,
        format!("{h}/path1/")
    );

    assert_eq!(clean(&mobot, &format!("{h}/?term1=test")).await, format!("{h}/"));
    assert_eq!(
        clean(&mobot, &format!("{h}/?term1=test&tt=qq")).await,
        format!("{h}/?tt=qq")
    );
    assert_eq!(
        clean(&mobot, &format!("{h}/?tt=qq&term1=test&term1=test2")).await,
        format!("{h}/?tt=qq")
    );
    assert_eq!(
        clean(&mobot, &format!("{h}/aaa/zzz?term1=test")).await,
        format!("{h}/aaa/zzz")
    );
    assert_eq!(
        clean(&mobot, &format!("{h}/path1?term2=test")).await,
        format!("{h}/path1")
    );

    assert_eq!(clean(&mobot, &format!("{h}/?term5=test")).await, format!("{h}/"));
    assert_eq!(
        clean(&mobot, &format!("{h}/?term3=test&term4=test")).await,
        format!("{h}/?term3=test&term4=test")
    );
    assert_eq!(
        clean(&mobot, &format!("{h}/path2?term3=test&term4=test")).await,
        format!("{h}/path2")
    );

    assert_eq!(
        clean(
            &robots,
            &format!("{h}/forum_old/showthread.php?s=681498605&t=8243&ref=1311")
        )
        .await,
        format!("{h}/forum_old/showthread.php?t=8243")
    );

    let h = "http://www.emptyish.com";
    assert_eq!(
        clean(&robots, &format!("{h}/qwerty?t=asd")).await,
        format!("{h}/qwerty?t=asd")
    );
}

#[tokio::test]
async fn test_clean_url_twice_is_stable() {
    let mobot = fixture_session("Mobot");
    let url = Url::parse("http://www.extended.com/path1?tt=qq&term2=x&term1=y&term5").unwrap();

    let once = mobot.clean_url(&url).await;
    let twice = mobot.clean_url(&once).await;
    assert_eq!(once.as_str(), "http://www.extended.com/path1?tt=qq");
    assert_eq!(once, twice);
}

#[tokio::test]
async fn test_extended_other_values() {
    let session = fixture_session(TEST_AGENT);
    let other = session.other_values(&uri_for_name("extended", "/")).await;
    assert_eq!(other.get("host"), Some(&vec!["www.extended.com".to_string()]));
}

#[tokio::test]
async fn test_crawl_delay_enforced_between_requests() {
    init_tracing();
    let session = RobotsSession::with_fetcher("Mobot", RobotsOptions::default(), FixtureFetcher);
    let page = uri_for_name("extended", "/page");

    let start = Instant::now();
    assert!(session.allowed(&page).await);
    assert!(session.allowed(&page).await);
    // Mobot's effective delay is 0.5s
    assert!(start.elapsed() >= Duration::from_millis(450));

    // Disallowed requests neither wait nor count as an access
    let before = Instant::now();
    assert!(!session.allowed(&uri_for_name("extended", "/mobot-only")).await);
    assert!(before.elapsed() < Duration::from_millis(400));
}

#[tokio::test]
async fn test_http_fetch_and_match() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "User-agent: *\nDisallow: /private\nCrawl-delay: 2\nSitemap: http://example.com/map.xml\n",
            "text/plain",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = RobotsSession::new("TestBot/1.0", RobotsOptions::non_blocking())
        .expect("Failed to create session");
    let base = Url::parse(&mock_server.uri()).expect("Failed to parse base URL");

    assert!(!session.allowed(&base.join("/private/x").unwrap()).await);
    assert!(session.allowed(&base.join("/public").unwrap()).await);
    assert_eq!(session.crawl_delay(&base).await, 2.0);
    assert_eq!(
        session.other_values(&base).await.get("sitemap"),
        Some(&vec!["http://example.com/map.xml".to_string()])
    );
}

#[tokio::test]
async fn test_http_non_plain_text_is_permissive() {
    init_tracing();
    let mock_server = MockServer::start().await;

    let body = "User-agent: *\nDisallow: /";
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(&mock_server)
        .await;

    let session = RobotsSession::new("TestBot", RobotsOptions::non_blocking()).unwrap();
    let base = Url::parse(&mock_server.uri()).unwrap();

    assert!(session.allowed(&base.join("/anything").unwrap()).await);
    assert!(session.rules_for(&base).await.is_fallback());
}

#[tokio::test]
async fn test_http_not_found_is_permissive() {
    init_tracing();
    let mock_server = MockServer::start().await;

    let body = "User-agent: *\nDisallow: /";
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(body, "text/plain"))
        .mount(&mock_server)
        .await;

    let session = RobotsSession::new("TestBot", RobotsOptions::non_blocking()).unwrap();
    let base = Url::parse(&mock_server.uri()).unwrap();

    assert!(session.allowed(&base.join("/admin").unwrap()).await);
    assert_eq!(session.crawl_delay(&base).await, 0.0);
}

#[tokio::test]
async fn test_http_timeout_is_permissive() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("User-agent: *\nDisallow: /", "text/plain")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = parse_config(
        r#"
user-agent = "TestBot"
[robots]
skip-delay = true
timeout-seconds = 0.2
"#,
    )
    .unwrap();
    let session = RobotsSession::from_config(&config).unwrap();
    let base = Url::parse(&mock_server.uri()).unwrap();

    let start = Instant::now();
    assert!(session.allowed(&base.join("/private").unwrap()).await);
    assert!(start.elapsed() < Duration::from_secs(2));
    assert!(session.rules_for(&base).await.is_fallback());
}

#[tokio::test]
async fn test_http_rules_cached_per_host() {
    init_tracing();
    let mock_server = MockServer::start().await;

    let body = "User-agent: *\nDisallow: /x";
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/plain"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = RobotsSession::new("TestBot", RobotsOptions::non_blocking()).unwrap();
    let base = Url::parse(&mock_server.uri()).unwrap();

    for page in ["/a", "/b", "/x", "/c?d=e"] {
        session.allowed(&base.join(page).unwrap()).await;
    }
    session.clean_url(&base.join("/?q=1").unwrap()).await;
    // MockServer verifies `expect(1)` on drop
}

/// Serves one raw HTTP/1.1 response with a custom status line
async fn serve_raw_robots(status_line: &'static str, body: &'static str) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "{}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    Url::parse(&format!("http://{}/", addr)).unwrap()
}

#[tokio::test]
async fn test_http_non_ok_reason_phrase_is_permissive() {
    init_tracing();
    let base = serve_raw_robots("HTTP/1.1 200 Fine", "User-agent: *\nDisallow: /").await;

    let session = RobotsSession::new("TestBot", RobotsOptions::non_blocking()).unwrap();
    assert!(session.allowed(&base.join("/private").unwrap()).await);
    assert!(session.rules_for(&base).await.is_fallback());
}

#[tokio::test]
async fn test_http_ok_reason_phrase_any_case() {
    init_tracing();
    let base = serve_raw_robots("HTTP/1.1 200 ok", "User-agent: *\nDisallow: /").await;

    let session = RobotsSession::new("TestBot", RobotsOptions::non_blocking()).unwrap();
    assert!(!session.allowed(&base.join("/private").unwrap()).await);
    assert!(!session.rules_for(&base).await.is_fallback());
}
