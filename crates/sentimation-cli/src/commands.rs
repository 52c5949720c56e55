use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, anyhow};
use chrono::Utc;
use sentimation_core::api::{TaskClient, Transport};
use sentimation_core::form::ScheduleForm;
use sentimation_core::notify::{Notification, Operation};
use sentimation_core::view::{DashboardStats, project_detail, project_table};
use tracing::{debug, info, instrument, warn};

use crate::cli::Command;
use crate::config::Config;
use crate::render::Renderer;

#[instrument(skip(client, cfg, renderer))]
pub async fn dispatch<T: Transport>(
    client: &TaskClient<T>,
    cfg: &Config,
    renderer: &mut Renderer,
    command: Command,
) -> anyhow::Result<()> {
    debug!(api_url = %cfg.api_url, "dispatching command");

    match command {
        Command::List => cmd_list(client, renderer).await,
        Command::Show { id } => cmd_show(client, renderer, &id).await,
        Command::Cancel { id, yes } => {
            if !yes && !confirm_cancel(&id)? {
                println!("Cancel aborted.");
                return Ok(());
            }
            cmd_cancel(client, renderer, &id).await
        }
        Command::RunNow { id } => cmd_run_now(client, renderer, &id).await,
        Command::Schedule {
            generator,
            prompt,
            at,
        } => {
            let form = ScheduleForm {
                generator_type: generator,
                prompt,
                scheduled_time: at,
            };
            cmd_schedule(client, renderer, &form).await
        }
        Command::Generators => cmd_generators(client).await,
        Command::Watch { interval_ms } => {
            let interval_ms = interval_ms.unwrap_or(cfg.refresh_interval_ms);
            cmd_watch(client, renderer, interval_ms).await
        }
    }
}

#[instrument(skip(client, renderer))]
async fn cmd_list<T: Transport>(
    client: &TaskClient<T>,
    renderer: &mut Renderer,
) -> anyhow::Result<()> {
    info!("command list");

    let tasks = client
        .list_tasks()
        .await
        .context(Operation::LoadTasks.failure_message())?;

    renderer.print_dashboard(
        &DashboardStats::from_tasks(&tasks),
        &project_table(&tasks, Utc::now()),
    )
}

#[instrument(skip(client, renderer))]
async fn cmd_show<T: Transport>(
    client: &TaskClient<T>,
    renderer: &mut Renderer,
    id: &str,
) -> anyhow::Result<()> {
    info!(task_id = %id, "command show");

    let task = client
        .get_task(id)
        .await
        .context(Operation::LoadTask.failure_message())?;

    renderer.print_task_detail(&project_detail(&task))
}

#[instrument(skip(client, renderer))]
async fn cmd_cancel<T: Transport>(
    client: &TaskClient<T>,
    renderer: &mut Renderer,
    id: &str,
) -> anyhow::Result<()> {
    info!(task_id = %id, "command cancel");

    let ack = client
        .cancel_task(id)
        .await
        .context(Operation::Cancel.failure_message())?;
    debug!(message = %ack.message, "backend acknowledged cancel");

    announce_success(renderer, Operation::Cancel);
    Ok(())
}

#[instrument(skip(client, renderer))]
async fn cmd_run_now<T: Transport>(
    client: &TaskClient<T>,
    renderer: &mut Renderer,
    id: &str,
) -> anyhow::Result<()> {
    info!(task_id = %id, "command run-now");

    let ack = client
        .run_now(id)
        .await
        .context(Operation::RunNow.failure_message())?;
    debug!(message = %ack.message, "backend acknowledged run-now");

    announce_success(renderer, Operation::RunNow);
    Ok(())
}

#[instrument(skip(client, renderer, form))]
async fn cmd_schedule<T: Transport>(
    client: &TaskClient<T>,
    renderer: &mut Renderer,
    form: &ScheduleForm,
) -> anyhow::Result<()> {
    info!(generator = %form.generator_type, "command schedule");

    let request = form.validate(Utc::now())?;
    let ack = client
        .schedule(&request)
        .await
        .context(Operation::Schedule.failure_message())?;

    println!("{}", ack.task_id);
    announce_success(renderer, Operation::Schedule);
    Ok(())
}

#[instrument(skip(client))]
async fn cmd_generators<T: Transport>(client: &TaskClient<T>) -> anyhow::Result<()> {
    info!("command generators");

    let generators = client
        .generators()
        .await
        .context(Operation::LoadGenerators.failure_message())?;

    if generators.is_empty() {
        println!("No generators available.");
    }
    for name in generators {
        println!("{name}");
    }
    Ok(())
}

/// Redraws the dashboard every `interval_ms` until Ctrl-C. A failed poll
/// leaves the last frame on screen and reports below it.
#[instrument(skip(client, renderer))]
async fn cmd_watch<T: Transport>(
    client: &TaskClient<T>,
    renderer: &mut Renderer,
    interval_ms: u32,
) -> anyhow::Result<()> {
    if interval_ms == 0 {
        return Err(anyhow!("watch interval must be greater than zero"));
    }
    info!(interval_ms, "command watch");

    let mut ticker = tokio::time::interval(Duration::from_millis(u64::from(interval_ms)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match client.list_tasks().await {
                    Ok(tasks) => {
                        renderer.clear_screen()?;
                        renderer.print_dashboard(
                            &DashboardStats::from_tasks(&tasks),
                            &project_table(&tasks, Utc::now()),
                        )?;
                    }
                    Err(err) => {
                        let notice = Notification::request_failed(Operation::LoadTasks, &err);
                        renderer.print_notification(&notice);
                    }
                }
            }
            signal = &mut shutdown => {
                if let Err(err) = signal {
                    warn!(error = %err, "failed listening for Ctrl-C");
                }
                info!("watch stopped");
                return Ok(());
            }
        }
    }
}

fn announce_success(renderer: &mut Renderer, operation: Operation) {
    if let Some(notice) = Notification::succeeded(operation) {
        renderer.print_notification(&notice);
    }
}

fn confirm_cancel(id: &str) -> anyhow::Result<bool> {
    print!("Are you sure you want to cancel task {id}? [y/N] ");
    io::stdout().flush().context("failed flushing stdout")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed reading stdin")?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use sentimation_core::api::{RequestError, RequestOptions, TaskClient, Transport};
    use serde_json::{Value, json};

    use super::{cmd_schedule, cmd_watch, is_affirmative};
    use crate::render::Renderer;
    use sentimation_core::form::ScheduleForm;

    #[derive(Default)]
    struct RecordingTransport {
        calls: RefCell<Vec<String>>,
    }

    impl Transport for RecordingTransport {
        async fn call(&self, path: &str, _options: RequestOptions) -> Result<Value, RequestError> {
            self.calls.borrow_mut().push(path.to_string());
            Ok(json!({ "task_id": "task_9", "message": "ok" }))
        }
    }

    fn renderer() -> Renderer {
        Renderer::new(&crate::config::Config {
            color: false,
            ..Default::default()
        })
    }

    #[test]
    fn only_yes_confirms() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("nope"));
    }

    #[tokio::test]
    async fn invalid_schedule_never_reaches_backend() {
        let client = TaskClient::new(RecordingTransport::default());
        let form = ScheduleForm {
            generator_type: "piano".to_string(),
            prompt: "   ".to_string(),
            scheduled_time: "2999-01-01T10:00".to_string(),
        };

        let err = cmd_schedule(&client, &mut renderer(), &form)
            .await
            .expect_err("blank prompt rejected");
        assert_eq!(err.to_string(), "Please fill in all required fields");
        assert!(client.transport().calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn valid_schedule_posts_once() {
        let client = TaskClient::new(RecordingTransport::default());
        let form = ScheduleForm {
            generator_type: "piano".to_string(),
            prompt: "rain on a tin roof".to_string(),
            scheduled_time: "2999-01-01T10:00".to_string(),
        };

        cmd_schedule(&client, &mut renderer(), &form)
            .await
            .expect("scheduled");
        assert_eq!(*client.transport().calls.borrow(), vec!["/schedule".to_string()]);
    }

    #[tokio::test]
    async fn watch_rejects_zero_interval() {
        let client = TaskClient::new(RecordingTransport::default());
        assert!(cmd_watch(&client, &mut renderer(), 0).await.is_err());
        assert!(client.transport().calls.borrow().is_empty());
    }
}
