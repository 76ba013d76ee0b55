//! Todo list demo binary
//!
//! With no arguments, runs a scripted session while a listener task prints
//! every broadcast transition. With a path, replays that newline-delimited
//! JSON action log and prints the resulting state. An optional second
//! argument (`all`, `active` or `complete`) selects the filter afterwards.

use anyhow::Context;
use statecraft_runtime::{metrics::register_metrics, StoreConfig};
use std::fs::File;
use std::io::BufReader;
use todo::view::{todo_class, TodoView};
use todo::{wire, Filter, TodoId, TodoService, TodoState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=debug,statecraft_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Descriptions only; a recorder must be installed for values to go anywhere
    register_metrics();

    let config = StoreConfig::from_env().context("loading store configuration")?;
    tracing::info!(broadcast_capacity = config.broadcast_capacity, "Configuration loaded");
    let service = TodoService::with_config(&config)?;

    let mut args = std::env::args().skip(1);
    match args.next() {
        Some(path) => {
            let filter = args
                .next()
                .map(|name| name.parse::<Filter>())
                .transpose()
                .context("parsing filter argument")?;
            replay_log(&service, &path, filter).await
        }
        None => run_demo(service).await,
    }
}

async fn replay_log(
    service: &TodoService,
    path: &str,
    filter: Option<Filter>,
) -> anyhow::Result<()> {
    let file = File::open(path).with_context(|| format!("opening action log {path}"))?;
    let actions = wire::decode_action_log(BufReader::new(file))
        .with_context(|| format!("decoding action log {path}"))?;
    tracing::info!(count = actions.len(), path, "Replaying action log");

    let mut state = service.store().send_all(actions).await?;
    if let Some(filter) = filter {
        state = service.filter_todos(filter).await?;
    }
    println!("{}", wire::encode_state(&state)?);
    print_list(&state);
    Ok(())
}

async fn run_demo(service: TodoService) -> anyhow::Result<()> {
    println!("=== Todo Example ===\n");

    let mut changes = service.state_changed();
    let listener = tokio::spawn(async move {
        while let Ok(transition) = changes.recv().await {
            println!(
                "  [listener] #{} {} -> {} todos, filter {}",
                transition.revision,
                transition.action,
                transition.state.count(),
                transition.state.filter
            );
        }
    });

    println!("Creating todos...");
    service.add_todo("Buy milk").await?;
    service.add_todo("Write documentation").await?;
    service.add_todo("Deploy to production").await?;

    println!("\nCompleting 'Buy milk'...");
    service.toggle_todo(TodoId::new(1)).await?;

    println!("\nShowing active todos...");
    let state = service.filter_todos(Filter::Active).await?;
    print_list(&state);

    println!("\nDeleting 'Deploy to production'...");
    service.delete_todo(TodoId::new(3)).await?;

    println!("\nShowing complete todos, then adding one more...");
    service.filter_todos(Filter::Complete).await?;
    let state = service.add_todo("Celebrate").await?;
    print_list(&state);

    // Dropping the last store handle closes the channel once the listener has drained it
    service.store().shutdown();
    drop(service);
    listener.await?;

    println!("\n=== Demo Complete ===");
    Ok(())
}

fn print_list(state: &TodoState) {
    let view = TodoView::new(state);
    println!(
        "Filter {}: {} active, {} completed",
        view.filter, view.active_count, view.completed_count
    );
    for todo in &view.visible {
        let status = if todo.done { "✓" } else { " " };
        println!("  [{status}] #{} {} ({})", todo.id, todo.description, todo_class(todo));
    }
}
