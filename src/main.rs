use pokedex_lookup::{
    Aggregator, CatalogConfig, HttpCatalogClient, QueryController, SessionState, SessionStatus,
};
use std::env;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const LOG_ENV: &str = "POKEDEX_LOG";

fn log_level() -> Level {
    env::var(LOG_ENV)
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(Level::INFO)
}

/// Prints the loading line while pending and returns the first settled state.
async fn render_until_settled(
    state: &mut watch::Receiver<SessionState>,
) -> Result<SessionState, watch::error::RecvError> {
    loop {
        let snapshot = state.borrow_and_update().clone();
        match snapshot.status() {
            SessionStatus::Idle => {}
            SessionStatus::Pending => println!("Loading..."),
            SessionStatus::Settled => return Ok(snapshot),
        }
        state.changed().await?;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let query = env::args().skip(1).collect::<Vec<_>>().join(" ");
    let query = if query.trim().is_empty() {
        "pikachu".to_string()
    } else {
        query
    };

    let config = CatalogConfig::from_env();
    let client = Arc::new(HttpCatalogClient::new(config.clone())?);
    let controller = QueryController::new(Aggregator::with_language(client, config.language));

    let mut state = controller.subscribe();
    let mut lookup = controller.submit_query(&query)?;

    // Render transitions, but stop waiting if the lookup task itself dies.
    tokio::select! {
        rendered = render_until_settled(&mut state) => {
            rendered?;
        }
        joined = &mut lookup => {
            // The outcome is already in the session state; only a JoinError matters here.
            let _outcome = joined?;
        }
    }

    let settled = render_until_settled(&mut state).await?;
    if let Some(entry) = &settled.result {
        println!("{}", entry);
    }
    if let Some(message) = &settled.error_message {
        println!("Error: {}", message);
    }

    // The sprite arrives on its own, if at all; give it one more transition.
    if controller.snapshot().result.is_some() {
        let sprite = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            state.wait_for(|s| s.image_url.is_some()),
        )
        .await;
        if let Ok(Ok(snapshot)) = sprite {
            if let Some(url) = &snapshot.image_url {
                println!("{:<12} : {}", "Sprite", url);
            }
        }
    }

    Ok(())
}
