use sentimation_core::view::TaskTable;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub table:       TaskTable,
  pub on_view:     Callback<String>,
  pub on_cancel:   Callback<String>,
  pub on_run_now:  Callback<String>,
  pub on_download:
    Callback<(String, String)>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  html! {
      <div class="card">
          <div class="card-header">{ "Tasks" }</div>
          <table class="table table-hover mb-0">
              <thead>
                  <tr>
                      <th>{ "ID" }</th>
                      <th>{ "Generator" }</th>
                      <th>{ "Prompt" }</th>
                      <th>{ "Scheduled" }</th>
                      <th>{ "Status" }</th>
                      <th>{ "Created" }</th>
                      <th>{ "Actions" }</th>
                  </tr>
              </thead>
              <tbody id="tasks-table-body">
                  {
                      for props.table.rows.iter().cloned().map(|row| html! {
                          <TaskListRow
                              key={row.task_id.clone()}
                              row={row.clone()}
                              on_view={props.on_view.clone()}
                              on_cancel={props.on_cancel.clone()}
                              on_run_now={props.on_run_now.clone()}
                              on_download={props.on_download.clone()}
                          />
                      })
                  }
              </tbody>
          </table>
          <div
              id="no-tasks-message"
              class="text-center text-muted py-4"
              hidden={!props.table.show_placeholder}
          >
              { "No tasks scheduled yet." }
          </div>
      </div>
  }
}
