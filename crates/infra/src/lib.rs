mod config;
mod gateway;
mod session;
mod system;

pub use config::Config;
pub use gateway::{
    AssistantReply, GatewayError, HttpSyncGateway, ISyncGateway, ImportedFile, InMemoryBackend,
    InMemorySyncGateway,
};
pub use session::Session;
use std::sync::Arc;
use timemesh_sdk::TimeMeshSDK;
use tracing::info;
pub use system::{ISys, RealSys, StaticTimeSys};

#[derive(Clone)]
pub struct TimeMeshContext {
    pub gateway: Arc<dyn ISyncGateway>,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub session: Session,
}

impl TimeMeshContext {
    /// Context talking to the backend at `config.backend_url`
    pub fn create(config: Config, session: Session) -> Self {
        let gateway = HttpSyncGateway::new(config.backend_url.clone(), &session);
        Self {
            gateway: Arc::new(gateway),
            config,
            sys: Arc::new(RealSys {}),
            session,
        }
    }

    /// Context backed by the in-memory backend simulator, acting as the
    /// session user
    pub fn create_inmemory(
        backend: &Arc<InMemoryBackend>,
        sys: Arc<dyn ISys>,
        session: Session,
    ) -> Self {
        let config = Config {
            timezone: session.timezone,
            ..Default::default()
        };
        Self {
            gateway: Arc::new(backend.gateway(&session)),
            config,
            sys,
            session,
        }
    }
}

/// Resolves the user the token belongs to
pub async fn create_session(config: &Config, token: String) -> Result<Session, GatewayError> {
    let sdk = TimeMeshSDK::new(config.backend_url.clone(), token.clone());
    let user = sdk.user.me().await?;
    info!("Logged in as {}", user.username);
    Ok(Session::new(token, user.id, user.email, config.timezone))
}
