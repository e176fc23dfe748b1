use actix_web::{
    http::StatusCode, web, App, HttpRequest, HttpResponse, HttpResponseBuilder, HttpServer,
};
use serde::Serialize;
use std::{net::TcpListener, sync::Arc};
use timemesh_api_structs::{
    create_calendar, create_invitation, delete_calendar, delete_calendar::LAST_CALENDAR_ERROR,
    delete_event, dtos::*, export_calendar, get_invitations::NO_INVITATIONS_MESSAGE,
    respond_invitation, send_message, update_calendar, update_event, CalendarResponse, ErrorBody,
    MessageResponse,
};
use timemesh_domain::{CalendarInput, InvitationAction, ID};
use timemesh_infra::{GatewayError, ISyncGateway, InMemoryBackend, InMemorySyncGateway, Session};

/// Serves the REST api of the backend on top of an `InMemoryBackend`
struct FakeBackend {
    backend: Arc<InMemoryBackend>,
    sessions: Vec<Session>,
}

impl FakeBackend {
    fn gateway(&self, req: &HttpRequest) -> Option<(InMemorySyncGateway, &Session)> {
        let token = req
            .headers()
            .get("Authorization")?
            .to_str()
            .ok()?
            .strip_prefix("Token ")?;
        let session = self.sessions.iter().find(|s| s.token == token)?;
        Some((self.backend.gateway(session), session))
    }
}

type State = web::Data<FakeBackend>;

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorBody {
        error: None,
        message: Some("Invalid token.".into()),
    })
}

fn error_response(e: GatewayError) -> HttpResponse {
    match e {
        GatewayError::NotFound(message) => {
            HttpResponse::NotFound().json(ErrorBody::error(message))
        }
        GatewayError::LastCalendar => {
            HttpResponse::BadRequest().json(ErrorBody::error(LAST_CALENDAR_ERROR))
        }
        GatewayError::Rejected { status, message } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST);
            HttpResponse::build(status).json(ErrorBody::error(message))
        }
        e => HttpResponse::InternalServerError().json(ErrorBody::error(e.to_string())),
    }
}

fn respond<T: Serialize>(
    res: Result<T, GatewayError>,
    ok: fn() -> HttpResponseBuilder,
) -> HttpResponse {
    match res {
        Ok(body) => ok().json(body),
        Err(e) => error_response(e),
    }
}

macro_rules! gateway {
    ($state:expr, $req:expr) => {
        match $state.gateway(&$req) {
            Some(gateway) => gateway,
            None => return unauthorized(),
        }
    };
}

async fn me(req: HttpRequest, state: State) -> HttpResponse {
    let (_, session) = gateway!(state, req);
    HttpResponse::Ok().json(serde_json::json!({
        "pk": session.user_id,
        "username": session.email.split('@').next().unwrap_or_default(),
        "email": session.email,
    }))
}

async fn get_events(req: HttpRequest, state: State) -> HttpResponse {
    let (gateway, _) = gateway!(state, req);
    let res = gateway
        .get_events()
        .await
        .map(|events| events.into_iter().map(CalendarEventDTO::new).collect::<Vec<_>>());
    respond(res, HttpResponse::Ok)
}

async fn create_event(req: HttpRequest, state: State, body: web::Json<EventBodyDTO>) -> HttpResponse {
    let (gateway, _) = gateway!(state, req);
    let definition = match body.into_inner().into_domain() {
        Some(definition) => definition,
        None => return HttpResponse::BadRequest().json(ErrorBody::error("Invalid date")),
    };
    let res = gateway
        .create_event(&definition)
        .await
        .map(CalendarEventDTO::new);
    respond(res, HttpResponse::Created)
}

async fn update_event(
    req: HttpRequest,
    state: State,
    path: web::Path<update_event::PathParams>,
    body: web::Json<update_event::RequestBody>,
) -> HttpResponse {
    let (gateway, _) = gateway!(state, req);
    let definition = match body.into_inner().into_domain() {
        Some(definition) => definition,
        None => return HttpResponse::BadRequest().json(ErrorBody::error("Invalid date")),
    };
    let res = gateway
        .update_event(&path.event_id, &definition)
        .await
        .map(CalendarEventDTO::new);
    respond(res, HttpResponse::Ok)
}

async fn delete_event(
    req: HttpRequest,
    state: State,
    path: web::Path<delete_event::PathParams>,
) -> HttpResponse {
    let (gateway, _) = gateway!(state, req);
    match gateway.delete_event(&path.event_id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

async fn get_calendars(req: HttpRequest, state: State) -> HttpResponse {
    let (gateway, _) = gateway!(state, req);
    let res = gateway
        .get_calendars()
        .await
        .map(|calendars| calendars.into_iter().map(CalendarDTO::new).collect::<Vec<_>>());
    respond(res, HttpResponse::Ok)
}

async fn get_shared_calendars(req: HttpRequest, state: State) -> HttpResponse {
    let (gateway, _) = gateway!(state, req);
    let res = gateway
        .get_shared_calendars()
        .await
        .map(|calendars| calendars.into_iter().map(CalendarDTO::new).collect::<Vec<_>>());
    respond(res, HttpResponse::Ok)
}

async fn create_calendar(
    req: HttpRequest,
    state: State,
    body: web::Json<create_calendar::RequestBody>,
) -> HttpResponse {
    let (gateway, _) = gateway!(state, req);
    let body = body.into_inner();
    let input = CalendarInput::new(body.title, body.description);
    let res = gateway
        .create_calendar(&input)
        .await
        .map(CalendarResponse::new);
    respond(res, HttpResponse::Created)
}

async fn update_calendar(
    req: HttpRequest,
    state: State,
    path: web::Path<update_calendar::PathParams>,
    body: web::Json<update_calendar::RequestBody>,
) -> HttpResponse {
    let (gateway, _) = gateway!(state, req);
    let body = body.into_inner();
    let input = CalendarInput::new(body.title, body.description);
    let res = gateway
        .update_calendar(&path.cal_id, &input)
        .await
        .map(CalendarResponse::new);
    respond(res, HttpResponse::Ok)
}

async fn delete_calendar(
    req: HttpRequest,
    state: State,
    path: web::Path<delete_calendar::PathParams>,
) -> HttpResponse {
    let (gateway, _) = gateway!(state, req);
    match gateway.delete_calendar(&path.cal_id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

/// The multipart body is stored as is
async fn import_calendar(req: HttpRequest, state: State, body: web::Bytes) -> HttpResponse {
    let (gateway, _) = gateway!(state, req);
    match gateway.import_calendar("upload", body.to_vec()).await {
        Ok(()) => HttpResponse::Created().json(MessageResponse {
            message: "Calendar imported successfully".into(),
        }),
        Err(e) => error_response(e),
    }
}

async fn export_calendar(
    req: HttpRequest,
    state: State,
    body: web::Json<export_calendar::RequestBody>,
) -> HttpResponse {
    let (gateway, _) = gateway!(state, req);
    match gateway.export_calendar(&body.into_inner().cal_ids).await {
        Ok(ics) => HttpResponse::Ok().content_type("text/calendar").body(ics),
        Err(e) => error_response(e),
    }
}

async fn get_invitations(req: HttpRequest, state: State) -> HttpResponse {
    let (gateway, _) = gateway!(state, req);
    match gateway.get_invitations().await {
        Ok(invitations) if invitations.is_empty() => HttpResponse::NotFound().json(ErrorBody {
            error: None,
            message: Some(NO_INVITATIONS_MESSAGE.into()),
        }),
        res => respond(
            res.map(|invitations| {
                invitations
                    .into_iter()
                    .map(InvitationDTO::new)
                    .collect::<Vec<_>>()
            }),
            HttpResponse::Ok,
        ),
    }
}

async fn create_invitation(
    req: HttpRequest,
    state: State,
    body: web::Json<create_invitation::RequestBody>,
) -> HttpResponse {
    let (gateway, session) = gateway!(state, req);
    let body = body.into_inner();
    if let Err(e) = gateway.invite(&body.cal_id, &body.email).await {
        return error_response(e);
    }
    let invitation = state
        .backend
        .gateway(&Session::new("", ID::default(), body.email.clone(), session.timezone))
        .get_invitations()
        .await
        .ok()
        .and_then(|invitations| {
            invitations
                .into_iter()
                .find(|i| i.calendar.id == body.cal_id)
        });
    match invitation {
        Some(invitation) => {
            let (accepted, declined) = invitation.status.to_flags();
            HttpResponse::Created().json(create_invitation::APIResponse {
                calendar: invitation.calendar.id,
                email: invitation.email,
                invited_by: invitation.invited_by.id,
                token: invitation.token,
                accepted,
                declined,
                created_at: invitation.created_at,
            })
        }
        None => HttpResponse::InternalServerError().finish(),
    }
}

async fn respond_invitation(
    req: HttpRequest,
    state: State,
    body: web::Json<respond_invitation::RequestBody>,
) -> HttpResponse {
    let (gateway, _) = gateway!(state, req);
    let body = body.into_inner();
    let res = gateway
        .respond_to_invitation(&body.token, body.action)
        .await
        .map(|_| MessageResponse {
            message: match body.action {
                InvitationAction::Accept => "Invitation accepted successfully".into(),
                InvitationAction::Decline => "Invitation declined successfully".into(),
            },
        });
    respond(res, HttpResponse::Ok)
}

async fn send_message(
    req: HttpRequest,
    state: State,
    body: web::Json<send_message::RequestBody>,
) -> HttpResponse {
    let (gateway, _) = gateway!(state, req);
    let transcript = body
        .into_inner()
        .messages
        .into_iter()
        .map(ChatMessageDTO::into_domain)
        .collect::<Vec<_>>();
    let res = gateway
        .send_assistant_message(&transcript)
        .await
        .map(|reply| send_message::APIResponse {
            message: reply.message,
            update: reply.update.iter().map(|c| c.to_string()).collect(),
        });
    respond(res, HttpResponse::Ok)
}

/// Launches the fake backend as a background task on a random port and
/// returns its api address
pub fn spawn_fake_backend(backend: Arc<InMemoryBackend>, sessions: Vec<Session>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let state = web::Data::new(FakeBackend { backend, sessions });

    let server = HttpServer::new(move || {
        App::new().app_data(state.clone()).service(
            web::scope("/api")
                .route("/auth/user/", web::get().to(me))
                .route("/events/", web::get().to(get_events))
                .route("/events/", web::post().to(create_event))
                .route("/events/{event_id}/", web::put().to(update_event))
                .route("/events/{event_id}/", web::delete().to(delete_event))
                .route("/calendars/", web::get().to(get_calendars))
                .route("/calendars/", web::post().to(create_calendar))
                .route("/calendars/shared/", web::get().to(get_shared_calendars))
                .route("/calendars/import/", web::post().to(import_calendar))
                .route("/calendars/export/", web::post().to(export_calendar))
                .route("/calendars/{cal_id}/", web::put().to(update_calendar))
                .route("/calendars/{cal_id}/", web::delete().to(delete_calendar))
                .route("/invitations/", web::get().to(get_invitations))
                .route("/invitations/", web::post().to(create_invitation))
                .route("/invitations/accept/", web::post().to(respond_invitation))
                .route("/ai/", web::post().to(send_message)),
        )
    })
    .listen(listener)
    .expect("Failed to listen")
    .workers(1)
    .run();
    actix_web::rt::spawn(server);

    format!("http://127.0.0.1:{}/api", port)
}
