mod helpers;

use chrono::{Duration, TimeZone, Utc, Weekday};
use helpers::setup::{setup_backend, ALICE_CALENDAR};
use timemesh_cache::{CacheChange, CacheError};
use timemesh_domain::{
    CalendarEvent, CalendarInput, ChatRole, EventDraft, EventFields, InvitationAction, Recurrence,
    WeekdaySet, ID,
};
use timemesh_infra::GatewayError;

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

#[tokio::test]
async fn standup_expands_into_three_occurrences() {
    let app = setup_backend();
    let cache = app.cache(&app.alice);

    let anchor = cache.add_event(EventDraft::New(standup())).await.unwrap();
    let starts = cache
        .occurrences_of(&anchor.base_id)
        .into_iter()
        .map(|o| (o.start, o.is_recurring_instance))
        .collect::<Vec<_>>();
    let monday = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
    assert_eq!(
        starts,
        vec![
            (monday, false),
            (monday + Duration::weeks(1), true),
            (monday + Duration::weeks(2), true),
        ]
    );
    for occurrence in cache.events() {
        assert_eq!(occurrence.end - occurrence.start, Duration::minutes(15));
        assert_eq!(occurrence.origin_start, monday);
    }
}

#[tokio::test]
async fn update_replaces_the_whole_series() {
    let app = setup_backend();
    let cache = app.cache(&app.alice);
    let anchor = cache.add_event(EventDraft::New(standup())).await.unwrap();
    assert_eq!(cache.events().len(), 3);

    // Editing the last instance reopens the series
    let instance = cache.occurrences_of(&anchor.base_id).pop().unwrap();
    let mut draft = cache.edit_draft(&instance).unwrap();
    if let EventDraft::Edit { fields, .. } = &mut draft {
        fields.recurrence = Recurrence::None;
    }
    let updated = cache.update_event(draft).await.unwrap();

    assert_eq!(updated.base_id, anchor.base_id);
    assert_eq!(cache.events(), vec![updated]);
    assert_eq!(cache.base_events()[0].recurrence_end(), None);
}

#[tokio::test]
async fn delete_removes_every_occurrence() {
    let app = setup_backend();
    let cache = app.cache(&app.alice);
    let anchor = cache.add_event(EventDraft::New(standup())).await.unwrap();
    let lunch = cache
        .add_event(EventDraft::New(EventFields {
            calendar_id: ID::new(ALICE_CALENDAR),
            title: "Lunch".into(),
            start: "2024-03-05T12:00".into(),
            end: "2024-03-05T13:00".into(),
            ..Default::default()
        }))
        .await
        .unwrap();

    cache.delete_event(&anchor.base_id).await.unwrap();
    assert_eq!(cache.events(), vec![lunch]);
    assert!(cache.occurrences_of(&anchor.base_id).is_empty());
}

#[tokio::test]
async fn weekly_events_include_their_own_weekday() {
    let app = setup_backend();
    let cache = app.cache(&app.alice);
    let mut fields = standup();
    fields.active_weekdays = WeekdaySet::single(Weekday::Wed);

    let anchor = cache.add_event(EventDraft::New(fields)).await.unwrap();
    let base = cache.base_event(&anchor.base_id).unwrap();
    assert!(base.active_weekdays().contains(Weekday::Mon));
    assert!(base.active_weekdays().contains(Weekday::Wed));

    let weekdays = cache
        .occurrences_of(&anchor.base_id)
        .iter()
        .map(|o| o.start.format("%a %d").to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        weekdays,
        vec!["Mon 04", "Wed 06", "Mon 11", "Wed 13", "Mon 18"]
    );
}

#[tokio::test]
async fn the_last_calendar_can_not_be_deleted() {
    let app = setup_backend();
    let cache = app.cache(&app.alice);
    cache.load().await.unwrap();
    let calendars = cache.calendars();

    let res = cache.delete_calendar(&ID::new(ALICE_CALENDAR)).await;
    assert_eq!(
        res,
        Err(CacheError::InvariantViolation(
            "Cannot delete the last calendar".into()
        ))
    );
    assert_eq!(cache.calendars(), calendars);
}

#[tokio::test]
async fn deleting_a_calendar_removes_its_events() {
    let app = setup_backend();
    let cache = app.cache(&app.alice);
    let work = cache
        .add_calendar(CalendarInput::new("Work", "9 to 5"))
        .await
        .unwrap();
    let mut fields = standup();
    fields.calendar_id = work.id;
    cache.add_event(EventDraft::New(fields)).await.unwrap();
    cache.add_event(EventDraft::New(standup())).await.unwrap();
    assert_eq!(cache.events().len(), 6);

    cache.delete_calendar(&work.id).await.unwrap();
    assert_eq!(cache.events().len(), 3);
    assert!(cache
        .events()
        .iter()
        .all(|o| o.calendar_id == ID::new(ALICE_CALENDAR)));
}

#[tokio::test]
async fn failed_mutations_leave_the_cache_untouched() {
    let app = setup_backend();
    let cache = app.cache(&app.alice);
    let anchor = cache.add_event(EventDraft::New(standup())).await.unwrap();
    let events = cache.events();

    app.backend
        .fail_next(GatewayError::Network("connection reset".into()));
    let draft = EventDraft::Edit {
        id: anchor.base_id,
        fields: EventFields {
            recurrence: Recurrence::None,
            ..standup()
        },
    };
    assert!(matches!(
        cache.update_event(draft).await,
        Err(CacheError::Remote(_))
    ));
    assert_eq!(cache.events(), events);

    // Validation happens before the backend is asked
    let invalid = EventFields {
        end: "2024-03-04T08:00".into(),
        ..standup()
    };
    assert!(matches!(
        cache.add_event(EventDraft::New(invalid)).await,
        Err(CacheError::Validation(_))
    ));
    assert_eq!(cache.events(), events);
}

#[tokio::test]
async fn accepting_an_invitation_surfaces_shared_events() {
    let app = setup_backend();
    let alice = app.cache(&app.alice);
    let bob = app.cache(&app.bob);
    alice.add_event(EventDraft::New(standup())).await.unwrap();
    alice
        .share_calendar(&ID::new(ALICE_CALENDAR), &app.bob.email)
        .await
        .unwrap();

    bob.load().await.unwrap();
    assert!(bob.events().is_empty());
    let invitation = bob.pending_invitations().pop().unwrap();
    assert_eq!(invitation.invited_by.email, app.alice.email);

    let mut changes = bob.subscribe();
    bob.respond_to_invitation(&invitation.token, InvitationAction::Accept)
        .await
        .unwrap();
    assert!(bob.invitations().is_empty());
    assert_eq!(bob.shared_calendars()[0].id, ID::new(ALICE_CALENDAR));
    assert_eq!(bob.events().len(), 3);
    assert_eq!(changes.try_recv().unwrap(), CacheChange::InvitationsChanged);

    // Answering twice is refused by the backend
    assert!(bob
        .respond_to_invitation(&invitation.token, InvitationAction::Decline)
        .await
        .is_err());
}

#[tokio::test]
async fn accepted_invitation_reports_a_failed_refresh() {
    let app = setup_backend();
    let alice = app.cache(&app.alice);
    let bob = app.cache(&app.bob);
    alice.add_event(EventDraft::New(standup())).await.unwrap();
    alice
        .share_calendar(&ID::new(ALICE_CALENDAR), &app.bob.email)
        .await
        .unwrap();
    bob.load().await.unwrap();
    let invitation = bob.pending_invitations().pop().unwrap();

    let mut changes = bob.subscribe();
    app.backend.fail_after(1, GatewayError::Network("offline".into()));
    let res = bob
        .respond_to_invitation(&invitation.token, InvitationAction::Accept)
        .await;
    assert!(matches!(res, Err(CacheError::Remote(_))));
    assert!(bob.invitations().is_empty());
    assert!(bob.events().is_empty());
    assert_eq!(changes.try_recv().unwrap(), CacheChange::InvitationsChanged);
    assert!(matches!(changes.try_recv().unwrap(), CacheChange::ReloadFailed(_)));

    bob.load().await.unwrap();
    assert_eq!(bob.events().len(), 3);
}

#[tokio::test]
async fn assistant_updates_reload_the_collections() {
    let app = setup_backend();
    let cache = app.cache(&app.alice);
    cache.load().await.unwrap();

    let reply = cache
        .send_assistant_message("Can you plan events for my week?")
        .await
        .unwrap();
    assert_eq!(
        reply,
        "Your events have been successfully generated please check the calendar named \"SMART\""
    );
    assert!(cache.calendars().iter().any(|c| c.title == "SMART"));
    assert_eq!(cache.events().len(), 1);
    assert_eq!(
        cache
            .transcript()
            .iter()
            .map(|m| m.role)
            .collect::<Vec<_>>(),
        vec![ChatRole::User, ChatRole::Assistant]
    );
}

#[tokio::test]
async fn transcript_drops_the_oldest_messages() {
    let app = setup_backend();
    let cache = app.cache(&app.alice);
    let long = "a".repeat(6_000);
    for _ in 0..3 {
        cache.send_assistant_message(&long).await.unwrap();
    }

    let transcript = cache.transcript();
    let total = transcript.iter().map(|m| m.content.len()).sum::<usize>();
    assert!(total <= 15_000);
    assert_eq!(transcript.last().unwrap().role, ChatRole::Assistant);
    assert_eq!(transcript[transcript.len() - 2].content, long);
}

#[tokio::test]
async fn events_ending_before_they_start_are_expanded() {
    let app = setup_backend();
    let start = Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap();
    app.backend.insert_event(CalendarEvent::new(
        ID::new(100),
        ID::new(ALICE_CALENDAR),
        "Broken",
        start,
        start - Duration::hours(1),
    ));

    let cache = app.cache(&app.alice);
    cache.load().await.unwrap();
    let events = cache.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].end - events[0].start, Duration::hours(-1));
}
