mod telemetry;

use anyhow::Context;
use chrono::{Duration, Utc};
use telemetry::{get_subscriber, init_subscriber};
use timemesh_cache::EventCache;
use timemesh_infra::{create_session, Config, TimeMeshContext};

/// Prints the merged agenda of the user the configured token belongs to
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("timemesh".into(), "info".into());
    init_subscriber(subscriber)?;

    let config = Config::new();
    let token = config
        .token
        .clone()
        .context("TIMEMESH_TOKEN env var to be present")?;
    let session = create_session(&config, token)
        .await
        .context("Unable to resolve the user of TIMEMESH_TOKEN")?;

    let agenda_days = config.agenda_days;
    let cache = EventCache::new(TimeMeshContext::create(config, session));
    cache.load().await?;

    let normalizer = cache.normalizer();
    let calendars = cache
        .calendars()
        .into_iter()
        .chain(cache.shared_calendars())
        .collect::<Vec<_>>();
    let from = Utc::now();
    let to = from + Duration::days(agenda_days);
    for occurrence in cache.agenda(&from, &to) {
        let calendar = calendars
            .iter()
            .find(|c| c.id == occurrence.calendar_id)
            .map(|c| c.title.as_str())
            .unwrap_or("-");
        println!(
            "{} - {}  {} [{}]",
            normalizer.format_for_display(&occurrence.start),
            normalizer.format_for_display(&occurrence.end),
            occurrence.title,
            calendar
        );
    }

    let pending = cache.pending_invitations();
    if !pending.is_empty() {
        println!();
        for invitation in pending {
            println!(
                "{} invited you to \"{}\"",
                invitation.invited_by.username, invitation.calendar.title
            );
        }
    }

    Ok(())
}
