use super::fake_backend::spawn_fake_backend;
use chrono::{TimeZone, Utc};
use chrono_tz::UTC;
use std::sync::Arc;
use timemesh_cache::EventCache;
use timemesh_domain::{Calendar, ID};
use timemesh_infra::{
    create_session, Config, InMemoryBackend, Session, StaticTimeSys, TimeMeshContext,
};

pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB_TOKEN: &str = "bob-token";

/// Calendar every test starts with, owned by alice
pub const ALICE_CALENDAR: i64 = 7;

pub struct TestApp {
    pub backend: Arc<InMemoryBackend>,
    pub alice: Session,
    pub bob: Session,
    /// Address of the fake REST api, only set by `spawn_app`
    pub address: Option<String>,
}

impl TestApp {
    /// Cache of `session` talking to the backend over http when the fake
    /// api is running and in memory otherwise
    pub fn cache(&self, session: &Session) -> EventCache {
        let ctx = match &self.address {
            Some(address) => {
                let config = Config {
                    backend_url: address.clone(),
                    timezone: session.timezone,
                    ..Default::default()
                };
                TimeMeshContext::create(config, session.clone())
            }
            None => TimeMeshContext::create_inmemory(
                &self.backend,
                Arc::new(StaticTimeSys {
                    timestamp_millis: now_millis(),
                }),
                session.clone(),
            ),
        };
        EventCache::new(ctx)
    }

    pub async fn login(&self, token: &str) -> Session {
        let config = Config {
            backend_url: self.address.clone().unwrap_or_default(),
            ..Default::default()
        };
        create_session(&config, token.to_string())
            .await
            .expect("Expected to log in")
    }
}

fn now_millis() -> i64 {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
        .unwrap()
        .timestamp_millis()
}

/// Backend with two users. Alice owns calendar 7 and bob owns calendar 8.
pub fn setup_backend() -> TestApp {
    let backend = InMemoryBackend::new(Arc::new(StaticTimeSys {
        timestamp_millis: now_millis(),
    }));
    let alice = backend.register_user("alice@example.com", "alice");
    let bob = backend.register_user("bob@example.com", "bob");
    backend.insert_calendar(Calendar::new(ID::new(ALICE_CALENDAR), alice.id, "Alice"));
    backend.insert_calendar(Calendar::new(ID::new(8), bob.id, "Bob"));

    TestApp {
        alice: Session::new(ALICE_TOKEN, alice.id, alice.email, UTC),
        bob: Session::new(BOB_TOKEN, bob.id, bob.email, UTC),
        backend,
        address: None,
    }
}

// Launch the fake backend as a background task
pub fn spawn_app() -> TestApp {
    let mut app = setup_backend();
    let address = spawn_fake_backend(
        app.backend.clone(),
        vec![app.alice.clone(), app.bob.clone()],
    );
    app.address = Some(address);
    app
}
