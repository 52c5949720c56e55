use sentimation_core::badge::StatusBadge;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskStatusBadgeProps {
  pub badge: StatusBadge
}

#[function_component(TaskStatusBadge)]
pub fn task_status_badge(
  props: &TaskStatusBadgeProps
) -> Html {
  let badge = &props.badge;
  html! {
      <span class={badge.css_class()}>
          {
              if let Some(icon) = badge.icon_class() {
                  html! { <i class={icon}></i> }
              } else {
                  html! {}
              }
          }
          { &badge.label }
      </span>
  }
}
