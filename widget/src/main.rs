//! Terminal driver for the todo widget.
//!
//! Reads one command per line from stdin, dispatches it against the mounted
//! widget, waits for the view to update, and prints the view to stdout.
//! Logs go to stderr.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use todo_widget::command::{Command, HELP};
use todo_widget::config::{Config, RenderMode};
use todo_widget::{TodoEnvironment, TodoStore, mount, render};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("loading configuration")?;
    init_tracing(&config.log_level);

    tracing::info!(
        id_strategy = ?config.id_strategy,
        render = ?config.render,
        seeded = config.seed.len(),
        "Starting todo widget"
    );

    let store = mount(TodoEnvironment::from_config(&config), config.seed.clone())
        .await
        .context("mounting widget")?;

    println!("{HELP}\n");
    show(&store, config.render).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(error) => {
                eprintln!("{error}");
                continue;
            },
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            },
            _ => {},
        }

        let view = render(&store).await;
        let actions = match command.actions(&view) {
            Ok(actions) => actions,
            Err(error) => {
                eprintln!("{error}");
                continue;
            },
        };

        for action in actions {
            let before = store.revision();
            tracing::debug!(?action, "Dispatching");
            store.send(action).await.context("dispatching action")?;
            store.rendered(before).await;
        }

        show(&store, config.render).await?;
    }

    store.unmount();
    tracing::info!("Todo widget unmounted");
    Ok(())
}

async fn show(store: &TodoStore, mode: RenderMode) -> anyhow::Result<()> {
    let view = render(store).await;
    match mode {
        RenderMode::Text => println!("{}", view.render_text()),
        RenderMode::Html => println!("{view}"),
        RenderMode::Json => println!(
            "{}",
            serde_json::to_string_pretty(&view).context("serializing view")?
        ),
    }
    Ok(())
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("todo_widget={log_level},todo_widget_runtime={log_level}"))
        }))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
