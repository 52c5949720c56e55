mod notification_toasts;
mod task_list;
mod task_list_row;
mod task_modal;
mod task_status_badge;

pub use notification_toasts::NotificationToasts;
pub use task_list::TaskList;
use task_list_row::TaskListRow;
pub use task_modal::TaskModal;
use task_status_badge::TaskStatusBadge;
