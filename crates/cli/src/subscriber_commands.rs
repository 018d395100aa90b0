use std::sync::Arc;

use clap::Subcommand;

use {
    courier_config::CourierConfig,
    courier_dispatch::{Dispatcher, Transport},
    courier_line::LineTransport,
    courier_subscribers::SubscriberStore,
};

#[derive(Subcommand)]
pub enum SubscriberAction {
    /// List all known subscriber identifiers.
    List,
    /// Print the subscriber count.
    Count,
    /// Remove a subscriber by identifier.
    Remove { id: String },
}

pub async fn handle_subscribers(
    action: SubscriberAction,
    store: &dyn SubscriberStore,
) -> anyhow::Result<()> {
    match action {
        SubscriberAction::List => {
            let subscribers = store.list().await;
            if subscribers.is_empty() {
                println!("No subscribers.");
            } else {
                for id in &subscribers {
                    println!("{id}");
                }
            }
        },
        SubscriberAction::Count => {
            println!("{}", store.count().await);
        },
        SubscriberAction::Remove { id } => {
            if store.remove(&id).await {
                println!("Removed subscriber {id}.");
            } else {
                anyhow::bail!("subscriber {id} not found");
            }
        },
    }
    Ok(())
}

pub async fn broadcast(
    config: &CourierConfig,
    store: Arc<dyn SubscriberStore>,
    message: &str,
) -> anyhow::Result<()> {
    let transport: Arc<dyn Transport> = Arc::new(LineTransport::with_base(
        config.channel_access_token.clone(),
        config.api_base.clone(),
    ));
    let dispatcher =
        Dispatcher::new(store, transport).with_parallelism(config.broadcast_parallelism);

    let report = dispatcher.broadcast(message).await?;
    println!(
        "Broadcast finished: {}/{} delivered.",
        report.success, report.total
    );
    for id in &report.failed {
        println!("  failed: {id}");
    }
    Ok(())
}
