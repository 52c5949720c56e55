use chrono::Utc;
use sentimation_core::api::TaskClient;
use sentimation_core::form::ScheduleForm;
use sentimation_core::notify::{
  Notification,
  Operation
};
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement
};
use yew::{
  Callback,
  Html,
  SubmitEvent,
  TargetCast,
  function_component,
  html,
  use_context,
  use_effect_with,
  use_memo,
  use_state
};
use yew_router::prelude::use_navigator;

use super::{
  Notifier,
  Route,
  ui_debug
};
use crate::api::FetchTransport;

#[function_component(SchedulePage)]
pub fn schedule_page() -> Html {
  let notify = use_context::<Notifier>()
    .unwrap_or_default();
  let navigator = use_navigator();
  let client = use_memo((), |_| {
    TaskClient::new(
      FetchTransport::default()
    )
  });
  let generators =
    use_state(Vec::<String>::new);
  let form = use_state(ScheduleForm::default);
  let busy = use_state(|| false);

  {
    let client = client.clone();
    let generators = generators.clone();
    let notify = notify.clone();
    use_effect_with((), move |_| {
      wasm_bindgen_futures::spawn_local(
        async move {
          match client.generators().await {
            | Ok(names) => generators.set(names),
            | Err(err) => notify.emit(
              Notification::request_failed(
                Operation::LoadGenerators,
                &err
              )
            )
          }
        }
      );
      || ()
    });
  }

  let on_generator = {
    let form = form.clone();
    Callback::from(move |e: yew::Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      let mut next = (*form).clone();
      next.generator_type = select.value();
      form.set(next);
    })
  };

  let on_prompt = {
    let form = form.clone();
    Callback::from(move |e: yew::InputEvent| {
      let area: HtmlTextAreaElement =
        e.target_unchecked_into();
      let mut next = (*form).clone();
      next.prompt = area.value();
      form.set(next);
    })
  };

  let on_time = {
    let form = form.clone();
    Callback::from(move |e: yew::InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      let mut next = (*form).clone();
      next.scheduled_time = input.value();
      form.set(next);
    })
  };

  let on_submit = {
    let form = form.clone();
    let busy = busy.clone();
    let notify = notify.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      ui_debug(
        "schedule.submit",
        "submit fired"
      );
      if *busy {
        return;
      }

      let request =
        match form.validate(Utc::now()) {
          | Ok(request) => request,
          | Err(err) => {
            tracing::debug!(
              error = %err,
              "schedule form rejected"
            );
            notify.emit(err.notification());
            return;
          }
        };

      busy.set(true);
      let client = client.clone();
      let busy = busy.clone();
      let notify = notify.clone();
      let navigator = navigator.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          let result =
            client.schedule(&request).await;
          busy.set(false);
          match result {
            | Ok(ack) => {
              tracing::info!(
                task_id = %ack.task_id,
                "task scheduled"
              );
              if let Some(notice) =
                Notification::succeeded(
                  Operation::Schedule
                )
              {
                notify.emit(notice);
              }
              if let Some(navigator) =
                navigator
              {
                navigator.push(&Route::Dashboard);
              }
            }
            | Err(err) => notify.emit(
              Notification::request_failed(
                Operation::Schedule,
                &err
              )
            )
          }
        }
      );
    })
  };

  html! {
      <form class="card card-body" onsubmit={on_submit}>
          <h4 class="mb-3">{ "Schedule a generation" }</h4>

          <label class="form-label" for="generator_type">{ "Generator" }</label>
          <select
              id="generator_type"
              class="form-select mb-3"
              onchange={on_generator}
          >
              <option value="" selected={form.generator_type.is_empty()}>{ "Choose a generator" }</option>
              {
                  for generators.iter().map(|name| html! {
                      <option
                          value={name.clone()}
                          selected={*name == form.generator_type}
                      >
                          { name }
                      </option>
                  })
              }
          </select>

          <label class="form-label" for="prompt">{ "Prompt" }</label>
          <textarea
              id="prompt"
              class="form-control mb-3"
              rows="4"
              value={form.prompt.clone()}
              oninput={on_prompt}
          />

          <label class="form-label" for="scheduled_time">{ "Scheduled time" }</label>
          <input
              id="scheduled_time"
              type="datetime-local"
              class="form-control mb-3"
              value={form.scheduled_time.clone()}
              oninput={on_time}
          />

          <button class="btn btn-primary" type="submit" disabled={*busy}>
              { if *busy { "Scheduling..." } else { "Schedule" } }
          </button>
      </form>
  }
}
