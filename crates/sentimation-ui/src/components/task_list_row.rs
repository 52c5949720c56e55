use sentimation_core::view::{
  RowAction,
  TaskRow
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskStatusBadge;

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub row:         TaskRow,
  pub on_view:     Callback<String>,
  pub on_cancel:   Callback<String>,
  pub on_run_now:  Callback<String>,
  pub on_download:
    Callback<(String, String)>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let row = &props.row;

  let actions = row.actions.iter().map(|action| {
    let id = row.task_id.clone();
    match action {
      | RowAction::View => {
        let on_view = props.on_view.clone();
        html! {
            <button
                class="btn btn-sm btn-outline-primary me-1"
                title="View details"
                onclick={move |_| on_view.emit(id.clone())}
            >
                <i class="fas fa-eye"></i>
            </button>
        }
      }
      | RowAction::Cancel => {
        let on_cancel =
          props.on_cancel.clone();
        html! {
            <button
                class="btn btn-sm btn-outline-danger me-1"
                title="Cancel task"
                onclick={move |_| on_cancel.emit(id.clone())}
            >
                <i class="fas fa-times"></i>
            </button>
        }
      }
      | RowAction::RunNow => {
        let on_run_now =
          props.on_run_now.clone();
        html! {
            <button
                class="btn btn-sm btn-outline-success me-1"
                title="Run now"
                onclick={move |_| on_run_now.emit(id.clone())}
            >
                <i class="fas fa-play"></i>
            </button>
        }
      }
      | RowAction::Download {
        href,
        file_name
      } => {
        let on_download =
          props.on_download.clone();
        let target =
          (href.clone(), file_name.clone());
        html! {
            <button
                class="btn btn-sm btn-outline-secondary me-1"
                title="Download video"
                onclick={move |_| on_download.emit(target.clone())}
            >
                <i class="fas fa-download"></i>
            </button>
        }
      }
    }
  });

  html! {
      <tr>
          <td><code>{ &row.task_id }</code></td>
          <td>{ &row.generator_type }</td>
          <td title={row.prompt_full.clone()}>{ &row.prompt_preview }</td>
          <td title={row.scheduled.absolute.clone()}>{ &row.scheduled.relative }</td>
          <td><TaskStatusBadge badge={row.status.clone()} /></td>
          <td title={row.created.absolute.clone()}>{ &row.created.relative }</td>
          <td>{ for actions }</td>
      </tr>
  }
}
