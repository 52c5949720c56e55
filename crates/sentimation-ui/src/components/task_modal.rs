use sentimation_core::view::TaskDetail;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

use super::TaskStatusBadge;

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
  pub detail:      TaskDetail,
  pub can_cancel:  bool,
  pub on_close:    Callback<()>,
  pub on_cancel:   Callback<String>,
  pub on_download:
    Callback<(String, String)>
}

#[function_component(TaskModal)]
pub fn task_modal(
  props: &TaskModalProps
) -> Html {
  let detail = &props.detail;
  let close = {
    let on_close = props.on_close.clone();
    Callback::from(move |_: MouseEvent| {
      on_close.emit(());
    })
  };

  let error_panel = match &detail.error {
    | Some(message) => html! {
        <div class="alert alert-danger mt-3">
            <strong>{ "Error: " }</strong>{ message }
        </div>
    },
    | None => html! {}
  };

  let video_panel = match &detail.video {
    | Some(video) => {
      let on_download =
        props.on_download.clone();
      let target = (
        video.src.clone(),
        video.file_name.clone()
      );
      html! {
          <div class="mt-3">
              <video class="w-100" controls={true} src={video.src.clone()}></video>
              <button
                  class="btn btn-outline-secondary btn-sm mt-2"
                  onclick={move |_| on_download.emit(target.clone())}
              >
                  <i class="fas fa-download me-1"></i>
                  { format!("Download {}", video.file_name) }
              </button>
          </div>
      }
    }
    | None => html! {}
  };

  let cancel_button = if props.can_cancel {
    let on_cancel = props.on_cancel.clone();
    let id = detail.task_id.clone();
    html! {
        <button
            class="btn btn-danger"
            onclick={move |_| on_cancel.emit(id.clone())}
        >
            { "Cancel task" }
        </button>
    }
  } else {
    html! {}
  };

  html! {
      <div
          class="task-modal"
          style="position: fixed; inset: 0; background: rgba(0, 0, 0, 0.5); z-index: 1050; overflow-y: auto;"
          onclick={close.clone()}
      >
          <div
              class="modal-dialog modal-lg"
              onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
          >
              <div class="modal-content">
                  <div class="modal-header">
                      <h5 class="modal-title">{ format!("Task {}", detail.task_id) }</h5>
                      <button class="btn-close" onclick={close.clone()}></button>
                  </div>
                  <div class="modal-body">
                      <dl class="row mb-0">
                          <dt class="col-sm-3">{ "Generator" }</dt>
                          <dd class="col-sm-9">{ &detail.generator_type }</dd>
                          <dt class="col-sm-3">{ "Status" }</dt>
                          <dd class="col-sm-9"><TaskStatusBadge badge={detail.status.clone()} /></dd>
                          <dt class="col-sm-3">{ "Scheduled" }</dt>
                          <dd class="col-sm-9">{ &detail.scheduled }</dd>
                          <dt class="col-sm-3">{ "Created" }</dt>
                          <dd class="col-sm-9">{ &detail.created }</dd>
                          {
                              if let Some(recurrence) = &detail.recurrence {
                                  html! {
                                      <>
                                          <dt class="col-sm-3">{ "Repeats" }</dt>
                                          <dd class="col-sm-9">{ recurrence }</dd>
                                      </>
                                  }
                              } else {
                                  html! {}
                              }
                          }
                      </dl>
                      <h6 class="mt-3">{ "Prompt" }</h6>
                      <p class="mb-0" style="white-space: pre-wrap;">{ &detail.prompt }</p>
                      { error_panel }
                      { video_panel }
                  </div>
                  <div class="modal-footer">
                      { cancel_button }
                      <button class="btn btn-secondary" onclick={close}>{ "Close" }</button>
                  </div>
              </div>
          </div>
      </div>
  }
}
