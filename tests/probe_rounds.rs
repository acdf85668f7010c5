use std::sync::Arc;
use std::time::Duration;

use uptime_monitor::{
    CheckStatus, Config, HealthChecker, HttpProbe, Probe, ProbeOutcome, Target, TimeSeriesStore,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

fn target(server: &MockServer, name: &str) -> Target {
    let host = format!("{}.test", name);
    Target::new(&host, &host, "mock endpoint", &format!("{}/{}", server.uri(), name))
}

#[tokio::test]
async fn http_probe_reports_status_codes() {
    let server = MockServer::start().await;
    mount(&server, "/ok", ResponseTemplate::new(200)).await;
    mount(&server, "/forbidden", ResponseTemplate::new(403)).await;
    mount(&server, "/broken", ResponseTemplate::new(502)).await;

    let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();

    let ok = probe.probe(&target(&server, "ok")).await;
    assert_eq!(ok.outcome, ProbeOutcome::Responded(200));

    let forbidden = probe.probe(&target(&server, "forbidden")).await;
    assert_eq!(forbidden.outcome, ProbeOutcome::Responded(403));

    let broken = probe.probe(&target(&server, "broken")).await;
    assert_eq!(broken.outcome, ProbeOutcome::Responded(502));

    // wiremock answers unmatched requests with 404
    let missing = probe.probe(&target(&server, "missing")).await;
    assert_eq!(missing.outcome, ProbeOutcome::Responded(404));
}

#[tokio::test]
async fn http_probe_times_out() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/slow",
        ResponseTemplate::new(200).set_delay(Duration::from_secs(3)),
    )
    .await;

    let probe = HttpProbe::new(Duration::from_millis(200)).unwrap();
    let result = probe.probe(&target(&server, "slow")).await;

    assert_eq!(result.outcome, ProbeOutcome::Failed);
    assert!(result.elapsed >= Duration::from_millis(200));
    assert!(result.elapsed < Duration::from_secs(3));
}

#[tokio::test]
async fn round_classifies_every_target_independently() {
    let server = MockServer::start().await;
    mount(&server, "/fast", ResponseTemplate::new(200)).await;
    mount(
        &server,
        "/sluggish",
        ResponseTemplate::new(200).set_delay(Duration::from_millis(300)),
    )
    .await;
    mount(&server, "/teapot", ResponseTemplate::new(418)).await;
    mount(&server, "/error", ResponseTemplate::new(500)).await;
    mount(&server, "/gone", ResponseTemplate::new(404)).await;
    mount(
        &server,
        "/hung",
        ResponseTemplate::new(200).set_delay(Duration::from_secs(10)),
    )
    .await;

    let names = ["fast", "sluggish", "teapot", "error", "gone", "hung"];
    let targets: Vec<Target> = names.iter().map(|n| target(&server, n)).collect();

    let config = Config {
        probe_timeout: Duration::from_secs(1),
        degraded_threshold: Duration::from_millis(150),
        ..Config::default()
    };
    let store = Arc::new(TimeSeriesStore::new(config.retention));
    let probe = Arc::new(HttpProbe::new(config.probe_timeout).unwrap());
    let checker = HealthChecker::new(&config, Arc::new(targets.clone()), Arc::clone(&store), probe);

    tokio::time::timeout(Duration::from_secs(5), checker.run_round())
        .await
        .expect("round should be bounded by the probe timeout");

    assert_eq!(store.len().await, 6);

    let latest = store.latest_per_target().await;
    let expected = [
        CheckStatus::Online,
        CheckStatus::Degraded,
        CheckStatus::Degraded,
        CheckStatus::Down,
        CheckStatus::Online,
        CheckStatus::Down,
    ];
    for (target, status) in targets.iter().zip(expected) {
        assert_eq!(latest[&target.url].status, status, "status of {}", target.name);
    }

    assert!(latest[&targets[5].url].response_time_ms >= 1000);
    assert_eq!(store.uptime(&targets[1].url, 24).await, 100.0);
    assert_eq!(store.uptime(&targets[5].url, 24).await, 0.0);
}
