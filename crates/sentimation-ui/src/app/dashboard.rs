use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use gloo::events::EventListener;
use sentimation_core::{
  TaskDto,
  TaskStatus
};
use sentimation_core::api::TaskClient;
use sentimation_core::notify::{
  Notification,
  Operation,
  Severity
};
use sentimation_core::refresh::{
  DEFAULT_REFRESH_INTERVAL_MS,
  RefreshController,
  auto_refresh_applies
};
use sentimation_core::view::{
  DashboardStats,
  apply,
  project_detail,
  project_table
};
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_context,
  use_effect_with,
  use_memo,
  use_state
};
use yew_router::prelude::use_location;

use super::{
  Notifier,
  ui_debug
};
use crate::api::FetchTransport;
use crate::components::{
  TaskList,
  TaskModal
};
use crate::download::trigger_download;
use crate::surface::DocumentSurface;
use crate::timer::GlooTimer;

const CANCEL_PROMPT: &str =
  "Are you sure you want to cancel this \
   task?";

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
  let notify = use_context::<Notifier>()
    .unwrap_or_default();
  let client = use_memo((), |_| {
    TaskClient::new(
      FetchTransport::default()
    )
  });
  let tasks =
    use_state(|| None::<Vec<TaskDto>>);
  let opened = use_state(|| None::<TaskDto>);
  let path = use_location()
    .map(|location| {
      location.path().to_string()
    })
    .unwrap_or_default();

  let load_tasks = {
    let client = client.clone();
    let tasks = tasks.clone();
    let notify = notify.clone();
    Callback::from(move |()| {
      let client = client.clone();
      let tasks = tasks.clone();
      let notify = notify.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          match client.list_tasks().await {
            | Ok(list) => {
              tracing::debug!(
                count = list.len(),
                "tasks loaded"
              );
              tasks.set(Some(list));
            }
            | Err(err) => {
              notify.emit(
                Notification::request_failed(
                  Operation::LoadTasks,
                  &err
                )
              );
            }
          }
        }
      );
    })
  };

  {
    use_effect_with(
      (*tasks).clone(),
      move |tasks| {
        let Some(stats) =
          DashboardStats::from_snapshot(
            tasks.as_deref()
          )
        else {
          return;
        };
        let applied = apply(
          &mut DocumentSurface::current(),
          &stats.instructions()
        );
        tracing::trace!(
          applied,
          "stats written to page"
        );
      }
    );
  }

  {
    let load_tasks = load_tasks.clone();
    use_effect_with(path, move |path| {
      load_tasks.emit(());

      let on_tick = load_tasks.clone();
      let controller =
        Rc::new(RefCell::new(
          RefreshController::new(
            GlooTimer,
            move || on_tick.emit(())
          )
        ));
      if auto_refresh_applies(path) {
        controller
          .borrow_mut()
          .start(DEFAULT_REFRESH_INTERVAL_MS);
      }

      let unload =
        web_sys::window().map(|window| {
          let controller =
            controller.clone();
          EventListener::new(
            &window,
            "beforeunload",
            move |_| {
              controller.borrow_mut().stop();
            }
          )
        });

      move || {
        drop(unload);
        controller.borrow_mut().stop();
      }
    });
  }

  let on_view = {
    let client = client.clone();
    let opened = opened.clone();
    let notify = notify.clone();
    Callback::from(move |id: String| {
      ui_debug("task.view.click", &id);
      let client = client.clone();
      let opened = opened.clone();
      let notify = notify.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          match client.get_task(&id).await {
            | Ok(task) => opened.set(Some(task)),
            | Err(err) => notify.emit(
              Notification::request_failed(
                Operation::LoadTask,
                &err
              )
            )
          }
        }
      );
    })
  };

  let on_cancel = {
    let client = client.clone();
    let opened = opened.clone();
    let notify = notify.clone();
    let load_tasks = load_tasks.clone();
    Callback::from(move |id: String| {
      ui_debug("task.cancel.click", &id);
      if !gloo::dialogs::confirm(
        CANCEL_PROMPT
      ) {
        return;
      }
      let client = client.clone();
      let opened = opened.clone();
      let notify = notify.clone();
      let load_tasks = load_tasks.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          match client.cancel_task(&id).await
          {
            | Ok(_) => {
              opened.set(None);
              notify.emit_success(
                Operation::Cancel
              );
              load_tasks.emit(());
            }
            | Err(err) => notify.emit(
              Notification::request_failed(
                Operation::Cancel,
                &err
              )
            )
          }
        }
      );
    })
  };

  let on_run_now = {
    let client = client.clone();
    let notify = notify.clone();
    let load_tasks = load_tasks.clone();
    Callback::from(move |id: String| {
      ui_debug("task.run_now.click", &id);
      let client = client.clone();
      let notify = notify.clone();
      let load_tasks = load_tasks.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          match client.run_now(&id).await {
            | Ok(_) => {
              notify.emit_success(
                Operation::RunNow
              );
              load_tasks.emit(());
            }
            | Err(err) => notify.emit(
              Notification::request_failed(
                Operation::RunNow,
                &err
              )
            )
          }
        }
      );
    })
  };

  let on_download = {
    let notify = notify.clone();
    Callback::from(
      move |(href, file_name): (
        String,
        String
      )| {
        match trigger_download(
          &href, &file_name
        ) {
          | Ok(()) => notify
            .emit_success(Operation::Download),
          | Err(err) => {
            tracing::error!(
              href = %href,
              error = ?err,
              "download failed"
            );
            notify.emit(Notification::new(
              Operation::Download
                .failure_message(),
              Severity::Danger
            ));
          }
        }
      }
    )
  };

  let on_close = {
    let opened = opened.clone();
    Callback::from(move |()| opened.set(None))
  };

  let table = project_table(
    tasks.as_deref().unwrap_or_default(),
    Utc::now()
  );

  html! {
      <>
          <TaskList
              table={table}
              on_view={on_view}
              on_cancel={on_cancel.clone()}
              on_run_now={on_run_now}
              on_download={on_download.clone()}
          />
          {
              if let Some(task) = &*opened {
                  html! {
                      <TaskModal
                          detail={project_detail(task)}
                          can_cancel={task.status == TaskStatus::Pending}
                          on_close={on_close}
                          on_cancel={on_cancel}
                          on_download={on_download}
                      />
                  }
              } else {
                  html! {}
              }
          }
      </>
  }
}

trait EmitSuccess {
  fn emit_success(&self, operation: Operation);
}

impl EmitSuccess for Notifier {
  fn emit_success(&self, operation: Operation) {
    if let Some(notice) =
      Notification::succeeded(operation)
    {
      self.emit(notice);
    }
  }
}
