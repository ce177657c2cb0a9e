//! BDD step definitions for the polling loop feature

use cucumber::{given, then, when};
use serde_json::json;

use review_watcher::engine::{CycleOutcome, FAULT_PREFIX, NO_NEW_STATUS_MESSAGE};
use review_watcher::io::HttpResponse;
use review_watcher::review::Verdict;
use review_watcher::state::WatcherState;
use review_watcher::WatcherError;

use crate::world::WatcherWorld;

fn ok_json(body: serde_json::Value) -> review_watcher::Result<HttpResponse> {
    Ok(HttpResponse {
        status: 200,
        body: body.to_string(),
    })
}

#[given(expr = "a watcher starting at cursor {int}")]
fn watcher_at_cursor(world: &mut WatcherWorld, cursor: i64) {
    world.config = WatcherWorld::test_config();
    world.state = Some(WatcherState::new(cursor));
}

#[given(expr = "the API reports homework {string} with status {string} at {int}")]
fn api_reports_homework(world: &mut WatcherWorld, name: String, status: String, date: i64) {
    world.http.push_get(ok_json(json!({
        "homeworks": [{"homework_name": name, "status": status}],
        "current_date": date
    })));
}

#[given(expr = "the API reports homework {string} with status {string} without a date")]
fn api_reports_homework_without_date(world: &mut WatcherWorld, name: String, status: String) {
    world.http.push_get(ok_json(json!({
        "homeworks": [{"homework_name": name, "status": status}]
    })));
}

#[given(expr = "the API reports no homeworks at {int}")]
fn api_reports_empty(world: &mut WatcherWorld, date: i64) {
    world.http.push_get(ok_json(json!({
        "homeworks": [],
        "current_date": date
    })));
}

#[given(expr = "the API reports fault code {string}")]
fn api_reports_code(world: &mut WatcherWorld, code: String) {
    world.http.push_get(ok_json(json!({
        "homeworks": [],
        "code": code,
        "current_date": 9999
    })));
}

#[given(expr = "the API responds with HTTP status {int}")]
fn api_responds_status(world: &mut WatcherWorld, status: u16) {
    world.http.push_get(Ok(HttpResponse {
        status,
        body: String::new(),
    }));
}

#[given(expr = "the API responds with body {string}")]
fn api_responds_body(world: &mut WatcherWorld, body: String) {
    world.http.push_get(Ok(HttpResponse { status: 200, body }));
}

#[given("the API responds without a homeworks key")]
fn api_without_homeworks(world: &mut WatcherWorld) {
    world.http.push_get(ok_json(json!({"current_date": 1000})));
}

#[given("the API is unreachable")]
fn api_unreachable(world: &mut WatcherWorld) {
    world
        .http
        .push_get(Err(WatcherError::Api("connection refused".to_string())));
}

#[given("the chat channel is down")]
fn chat_down(world: &mut WatcherWorld) {
    world.http.set_telegram_down(true);
}

#[when("a cycle runs")]
async fn cycle_runs(world: &mut WatcherWorld) {
    run_cycles(world, 1).await;
}

#[when(expr = "{int} cycles run")]
async fn cycles_run(world: &mut WatcherWorld, count: usize) {
    run_cycles(world, count).await;
}

async fn run_cycles(world: &mut WatcherWorld, count: usize) {
    let engine = world.build_engine();
    let mut state = world.state.take().expect("watcher not set");
    for _ in 0..count {
        let report = engine.run_cycle(&mut state).await;
        world.reports.push(report);
    }
    world.state = Some(state);
}

#[then(expr = "the chat should receive the {string} verdict for {string}")]
fn chat_receives_verdict(world: &mut WatcherWorld, status: String, name: String) {
    let verdict: Verdict = status.parse().expect("unknown verdict in feature file");
    let expected = format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        verdict.text()
    );
    let sent = world.http.sent_texts();
    assert_eq!(sent.last(), Some(&expected), "sent: {sent:?}");
}

#[then("the chat should receive the no-new-status message")]
fn chat_receives_no_new_status(world: &mut WatcherWorld) {
    let sent = world.http.sent_texts();
    assert_eq!(
        sent.last().map(String::as_str),
        Some(NO_NEW_STATUS_MESSAGE),
        "sent: {sent:?}"
    );
}

#[then(expr = "the chat should receive a fault message mentioning {string}")]
fn chat_receives_fault(world: &mut WatcherWorld, fragment: String) {
    let sent = world.http.sent_texts();
    let last = sent.last().expect("nothing was sent");
    assert!(last.starts_with(FAULT_PREFIX), "{last}");
    assert!(last.contains(&fragment), "{last}");
}

#[then(expr = "the chat should have received {int} message(s)")]
fn chat_message_count(world: &mut WatcherWorld, count: usize) {
    let sent = world.http.sent_texts();
    assert_eq!(sent.len(), count, "sent: {sent:?}");
}

#[then(expr = "the cursor should be {int}")]
fn cursor_is(world: &mut WatcherWorld, cursor: i64) {
    let state = world.state.as_ref().expect("watcher not set");
    assert_eq!(state.cursor, cursor);
}

#[then(expr = "every request should use from_date {string}")]
fn every_request_from(world: &mut WatcherWorld, from_date: String) {
    let dates = world.http.from_dates();
    assert!(!dates.is_empty(), "no requests were made");
    assert!(dates.iter().all(|d| *d == from_date), "from_dates: {dates:?}");
}

#[then(expr = "the last cycle should end as {string}")]
fn last_cycle_outcome(world: &mut WatcherWorld, outcome: String) {
    let expected = match outcome.as_str() {
        "status changed" => CycleOutcome::StatusChanged,
        "no new status" => CycleOutcome::NoNewStatus,
        "fault" => CycleOutcome::Fault,
        other => panic!("Unknown outcome: {}", other),
    };
    assert_eq!(world.last_report().outcome, expected);
}

#[then("the last message should not have been delivered")]
fn last_not_delivered(world: &mut WatcherWorld) {
    let report = world.last_report();
    assert!(report.notified);
    assert!(!report.delivered);
}

#[then("the last message should be remembered")]
fn last_message_remembered(world: &mut WatcherWorld) {
    let state = world.state.as_ref().expect("watcher not set");
    assert_eq!(state.last_message, world.last_report().message);
}
