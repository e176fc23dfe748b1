mod helpers;

use helpers::setup::{spawn_app, ALICE_CALENDAR, ALICE_TOKEN};
use timemesh_cache::CacheError;
use timemesh_domain::{CalendarInput, EventDraft, EventFields, InvitationAction, Recurrence, ID};
use timemesh_sdk::{APIError, TimeMeshSDK};

fn standup() -> EventFields {
    EventFields {
        calendar_id: ID::new(ALICE_CALENDAR),
        title: "Standup".into(),
        start: "2024-03-04T09:00".into(),
        end: "2024-03-04T09:15".into(),
        recurrence: Recurrence::Weekly,
        recurrence_end: Some("2024-03-18".into()),
        ..Default::default()
    }
}

#[actix_web::test]
async fn logs_in_with_a_token() {
    let app = spawn_app();
    let session = app.login(ALICE_TOKEN).await;
    assert_eq!(session.user_id, app.alice.user_id);
    assert_eq!(session.email, app.alice.email);

    let sdk = TimeMeshSDK::new(app.address.clone().unwrap(), "not-a-token");
    assert!(matches!(sdk.user.me().await, Err(APIError::Unauthorized)));
}

#[actix_web::test]
async fn syncs_events_over_http() {
    let app = spawn_app();
    let cache = app.cache(&app.alice);
    cache.load().await.unwrap();
    assert_eq!(cache.calendars().len(), 1);
    // The backend answers 404 instead of an empty list
    assert!(cache.invitations().is_empty());

    let anchor = cache.add_event(EventDraft::New(standup())).await.unwrap();
    assert_eq!(cache.occurrences_of(&anchor.base_id).len(), 3);

    let draft = EventDraft::Edit {
        id: anchor.base_id,
        fields: EventFields {
            recurrence: Recurrence::None,
            ..standup()
        },
    };
    cache.update_event(draft).await.unwrap();
    assert_eq!(cache.events().len(), 1);

    // A fresh cache sees the same state
    let other = app.cache(&app.alice);
    other.load().await.unwrap();
    assert_eq!(other.events(), cache.events());

    cache.delete_event(&anchor.base_id).await.unwrap();
    assert!(cache.events().is_empty());
    assert!(matches!(
        cache.delete_event(&anchor.base_id).await,
        Err(CacheError::NotFound(_))
    ));
}

#[actix_web::test]
async fn keeps_the_last_calendar_over_http() {
    let app = spawn_app();
    let cache = app.cache(&app.alice);
    cache.load().await.unwrap();

    assert_eq!(
        cache.delete_calendar(&ID::new(ALICE_CALENDAR)).await,
        Err(CacheError::InvariantViolation(
            "Cannot delete the last calendar".into()
        ))
    );
    assert_eq!(cache.calendars().len(), 1);

    let work = cache
        .add_calendar(CalendarInput::new("Work", ""))
        .await
        .unwrap();
    let renamed = cache
        .update_calendar(&work.id, CalendarInput::new("Office", "Desk 4"))
        .await
        .unwrap();
    assert_eq!(renamed.description, "Desk 4");
    assert!(cache.calendars().contains(&renamed));

    cache.delete_calendar(&work.id).await.unwrap();
    assert_eq!(cache.calendars().len(), 1);
}

#[actix_web::test]
async fn shares_calendars_over_http() {
    let app = spawn_app();
    let alice = app.cache(&app.alice);
    let bob = app.cache(&app.bob);
    alice.add_event(EventDraft::New(standup())).await.unwrap();
    alice
        .share_calendar(&ID::new(ALICE_CALENDAR), &app.bob.email)
        .await
        .unwrap();
    assert!(matches!(
        alice
            .share_calendar(&ID::new(ALICE_CALENDAR), &app.bob.email)
            .await,
        Err(CacheError::Remote(_))
    ));

    bob.load().await.unwrap();
    let invitation = bob.pending_invitations().pop().unwrap();
    assert_eq!(invitation.token.len(), 32);
    bob.respond_to_invitation(&invitation.token, InvitationAction::Accept)
        .await
        .unwrap();
    assert_eq!(bob.shared_calendars().len(), 1);
    assert_eq!(bob.events().len(), 3);

    alice.load().await.unwrap();
    assert!(alice.calendars()[0].is_shared_with(&app.bob.email));
}

#[actix_web::test]
async fn imports_and_exports_calendars() {
    let app = spawn_app();
    let cache = app.cache(&app.alice);
    cache.add_event(EventDraft::New(standup())).await.unwrap();

    let ics = cache
        .export_calendar(&[ID::new(ALICE_CALENDAR)])
        .await
        .unwrap();
    let ics = String::from_utf8(ics).unwrap();
    assert!(ics.contains("SUMMARY:Standup"));

    cache
        .import_calendar("standup.ics", ics.clone().into_bytes())
        .await
        .unwrap();
    let imported = app.backend.imported_files();
    assert_eq!(imported.len(), 1);
    // The fake backend keeps the raw multipart body
    assert!(String::from_utf8_lossy(&imported[0].content).contains("SUMMARY:Standup"));
}

#[actix_web::test]
async fn asks_the_assistant_over_http() {
    let app = spawn_app();
    let cache = app.cache(&app.alice);
    cache.load().await.unwrap();

    cache
        .send_assistant_message("generate events please")
        .await
        .unwrap();
    assert_eq!(cache.calendars().len(), 2);
    assert_eq!(cache.events().len(), 1);
    assert_eq!(cache.transcript().len(), 2);
}
