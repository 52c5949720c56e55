use std::io::{self, IsTerminal, Write};

use sentimation_core::badge::StatusBadge;
use sentimation_core::notify::{Notification, Severity};
use sentimation_core::view::{DashboardStats, RowAction, TaskDetail, TaskTable};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

const NO_TASKS: &str = "No tasks scheduled yet.";

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> Self {
        Self {
            color: cfg.color && io::stdout().is_terminal(),
        }
    }

    #[tracing::instrument(skip_all)]
    pub fn print_dashboard(
        &mut self,
        stats: &DashboardStats,
        table: &TaskTable,
    ) -> anyhow::Result<()> {
        let out = io::stdout().lock();
        self.write_dashboard(out, stats, table)
    }

    #[tracing::instrument(skip_all)]
    pub fn print_task_detail(&mut self, detail: &TaskDetail) -> anyhow::Result<()> {
        let out = io::stdout().lock();
        self.write_task_detail(out, detail)
    }

    pub fn print_notification(&mut self, notification: &Notification) {
        let code = match notification.severity {
            Severity::Info => "36",
            Severity::Success => "32",
            Severity::Warning => "33",
            Severity::Danger => "31",
        };
        let tag = self.paint(&format!("[{}]", notification.severity.as_key()), code);
        eprintln!("{tag} {}", notification.message);
    }

    pub fn clear_screen(&mut self) -> anyhow::Result<()> {
        if self.color {
            let mut out = io::stdout().lock();
            write!(out, "\x1b[2J\x1b[H")?;
            out.flush()?;
        }
        Ok(())
    }

    pub fn write_dashboard<W: Write>(
        &self,
        mut out: W,
        stats: &DashboardStats,
        table: &TaskTable,
    ) -> anyhow::Result<()> {
        write!(
            out,
            "total {}  pending {}  completed {}  failed {}",
            stats.total, stats.pending, stats.completed, stats.failed
        )?;
        if stats.running_visible() {
            write!(out, "  {}", self.paint(&format!("running {}", stats.running), "36"))?;
        }
        writeln!(out)?;
        writeln!(out)?;

        if table.show_placeholder {
            writeln!(out, "{NO_TASKS}")?;
            return Ok(());
        }

        let headers = vec![
            "ID".to_string(),
            "Generator".to_string(),
            "Prompt".to_string(),
            "Scheduled".to_string(),
            "Status".to_string(),
            "Created".to_string(),
            "Actions".to_string(),
        ];

        let rows = table
            .rows
            .iter()
            .map(|row| {
                vec![
                    self.paint(&row.task_id, "33"),
                    row.generator_type.clone(),
                    row.prompt_preview.clone(),
                    row.scheduled.relative.clone(),
                    self.paint_badge(&row.status),
                    row.created.relative.clone(),
                    describe_actions(&row.actions),
                ]
            })
            .collect();

        write_table(&mut out, headers, rows)
    }

    pub fn write_task_detail<W: Write>(
        &self,
        mut out: W,
        detail: &TaskDetail,
    ) -> anyhow::Result<()> {
        writeln!(out, "id         {}", detail.task_id)?;
        writeln!(out, "generator  {}", detail.generator_type)?;
        writeln!(out, "status     {}", self.paint_badge(&detail.status))?;
        writeln!(out, "scheduled  {}", detail.scheduled)?;
        writeln!(out, "created    {}", detail.created)?;
        if let Some(recurrence) = &detail.recurrence {
            writeln!(out, "recurring  {recurrence}")?;
        }
        writeln!(out)?;
        writeln!(out, "prompt")?;
        writeln!(out, "  {}", detail.prompt)?;

        if let Some(error) = &detail.error {
            writeln!(out)?;
            writeln!(out, "{}", self.paint("error", "31"))?;
            writeln!(out, "  {error}")?;
        }

        if let Some(video) = &detail.video {
            writeln!(out)?;
            writeln!(out, "video      {}", video.src)?;
            writeln!(out, "result     {}", video.result_path)?;
        }

        Ok(())
    }

    fn paint_badge(&self, badge: &StatusBadge) -> String {
        let code = match badge.class {
            "bg-warning" => "33",
            "bg-info" => "36",
            "bg-success" => "32",
            "bg-danger" => "31",
            _ => "90",
        };
        self.paint(&badge.label, code)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn describe_actions(actions: &[RowAction]) -> String {
    actions
        .iter()
        .filter_map(|action| match action {
            RowAction::View => None,
            RowAction::Cancel => Some("cancel".to_string()),
            RowAction::RunNow => Some("run-now".to_string()),
            RowAction::Download { href, .. } => Some(format!("download {href}")),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
