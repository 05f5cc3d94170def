use clap::Parser;
use gamepicker::config::{cli::Args, Config};
use gamepicker::domain::{CollectionItem, LastPlayed};
use gamepicker::error::Result;
use gamepicker::infrastructure::BggClient;
use gamepicker::services::{PickerEvent, PickerService};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let level = args.log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = Config::from_args(args)?;
    let client = Arc::new(BggClient::new(config.http_client.clone(), &config.settings));
    let service = PickerService::new(Arc::clone(&client), client, &config.settings);

    let mut events = service.subscribe();
    let notifier = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => notify(event),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    });

    let result = service
        .request_collection(&config.args.usernames, &config.filters)
        .await;

    let mut picks = Vec::new();
    if result.is_ok() {
        let snapshot = service.snapshot();
        println!(
            "{} collection ({})",
            snapshot.active_owners.as_deref().unwrap_or(""),
            snapshot.active_collection.len()
        );
        if config.args.list {
            for item in &snapshot.active_collection {
                println!("  {}", describe(item));
            }
        }

        picks.extend(snapshot.chosen_game);
        for _ in 0..config.args.rerolls {
            picks.extend(service.reroll(config.filters.non_recency_bias));
        }
    }

    drop(service);
    finish_notifier(notifier).await;
    result?;

    if config.args.json {
        println!("{}", serde_json::to_string_pretty(&picks)?);
    } else {
        for pick in &picks {
            println!("Play: {}", describe(pick));
        }
    }

    info!("Done");
    Ok(())
}

/// Waits for the event logger to drain. Returns false if it died.
async fn finish_notifier(notifier: JoinHandle<()>) -> bool {
    match notifier.await {
        Ok(()) => true,
        Err(e) => {
            warn!("Event notifier stopped: {}", e);
            false
        }
    }
}

fn notify(event: PickerEvent) {
    match event {
        PickerEvent::FetchStarted { owners } => info!(
            "Fetching collection for {}. This might take a couple of seconds if the collection is big",
            owners.join(", ")
        ),
        PickerEvent::Fetched { count } => info!("Collection fetched: {} games", count),
        PickerEvent::NoMatches => warn!("No games matched your criteria. Try adjusting your filters"),
        PickerEvent::Failed { attempts } => warn!(
            "Not found or took too long after {} attempts. Either the username does not exist, \
             or BGG took too long to generate the collection. Try again.",
            attempts
        ),
    }
}

fn describe(item: &CollectionItem) -> String {
    let played = match item.stats.last_played {
        Some(LastPlayed::On(date)) => format!("last played {}", date),
        Some(LastPlayed::Never) => "never played".to_string(),
        None => "play history unknown".to_string(),
    };
    let kind = if item.is_expansion() { "expansion, " } else { "" };
    format!(
        "{} [{}{}-{} players, {}, owner {}]",
        item.display_title(),
        kind,
        item.min_players,
        item.max_players,
        played,
        item.owner
    )
}
