//! BDD step definitions for the startup guard feature

use cucumber::{given, then, when};

use review_watcher::config::{ensure_tokens, Config};
use review_watcher::WatcherError;

use crate::world::WatcherWorld;

#[given("all required environment variables are set")]
fn all_env_set(world: &mut WatcherWorld) {
    world.env = vec![
        ("PRACTICUM_TOKEN".to_string(), "p-token".to_string()),
        ("TELEGRAM_TOKEN".to_string(), "123:ABC".to_string()),
        ("TELEGRAM_CHAT_ID".to_string(), "442825837".to_string()),
        (
            "ENDPOINT".to_string(),
            "https://practicum.test/api/".to_string(),
        ),
    ];
}

#[given(expr = "the environment variable {string} is empty")]
fn env_var_empty(world: &mut WatcherWorld, name: String) {
    world.env.retain(|(key, _)| *key != name);
    world.env.push((name, String::new()));
}

#[given(expr = "the environment variable {string} is not set")]
fn env_var_unset(world: &mut WatcherWorld, name: String) {
    world.env.retain(|(key, _)| *key != name);
}

#[when("the startup guard runs")]
fn guard_runs(world: &mut WatcherWorld) {
    let env = world.env.clone();
    let mut config = Config::default();
    let result = config
        .apply_env_with(|key| {
            env.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
        .and_then(|_| ensure_tokens(&config));
    world.guard_result = Some(result);
}

#[then("startup should be allowed")]
fn startup_allowed(world: &mut WatcherWorld) {
    let result = world.guard_result.as_ref().expect("guard did not run");
    assert!(result.is_ok(), "{result:?}");
}

#[then(expr = "startup should fail with a token error naming {string}")]
fn startup_fails(world: &mut WatcherWorld, name: String) {
    match world.guard_result.as_ref().expect("guard did not run") {
        Err(WatcherError::Token(missing)) => {
            assert!(missing.contains(&name), "missing: {missing}");
        }
        other => panic!("expected token error, got {other:?}"),
    }
}
