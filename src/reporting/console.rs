//! # Console Reporting Module / 控制台报告模块
//!
//! This module owns all mutable render state for a benchmark run: the live
//! status matrix, the rolling log tail and the redraw loop, plus the colored
//! summary printed after the run.
//!
//! Every mutation goes through one synchronized entry point and redraws
//! inside the same critical section, so two redraws can never interleave
//! even though many execution units complete concurrently.
//!
//! 此模块持有基准测试运行的全部可变渲染状态：实时状态矩阵、滚动日志尾部和
//! 重绘循环，以及运行结束后打印的彩色摘要。
//! 所有修改都通过同一个同步入口点进行，并在同一临界区内重绘，
//! 因此即使许多执行单元并发完成，两次重绘也绝不会交错。

use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use colored::*;

use crate::core::models::{LogRecord, Status};
use crate::infra::{t, term};

/// Rolling log cap; the oldest entry is evicted on overflow.
/// 滚动日志上限；溢出时最旧的条目被淘汰。
const MAX_LOGS: usize = 1000;

/// Widest a test-case label may render in the table and summary.
const MAX_NAME_WIDTH: usize = 40;

/// All mutable render state for one run. Owned exclusively by the
/// [`RunContext`] lock for the duration of the run.
struct RunDisplay {
    session_id: String,
    log_path: PathBuf,
    case_names: Vec<String>,
    model_names: Vec<String>,
    grid: Vec<Vec<Status>>,
    logs: VecDeque<String>,
    /// `false` in headless mode: state is tracked but nothing is drawn.
    render: bool,
}

/// The single synchronized entry point for the shared status grid, the
/// rolling log and the terminal.
///
/// The scheduler initializes every cell to [`Status::Waiting`] at
/// construction time, before any unit runs.
pub struct RunContext {
    display: Mutex<RunDisplay>,
}

impl RunContext {
    /// Creates the context with every (test case, model) cell `Waiting` and
    /// live rendering enabled.
    pub fn new(
        session_id: String,
        log_path: PathBuf,
        case_names: Vec<String>,
        model_names: Vec<String>,
    ) -> Self {
        Self::with_render(session_id, log_path, case_names, model_names, true)
    }

    /// Same as [`new`](Self::new) but with rendering disabled: state is
    /// tracked and inspectable, the terminal is never touched.
    pub fn headless(
        session_id: String,
        log_path: PathBuf,
        case_names: Vec<String>,
        model_names: Vec<String>,
    ) -> Self {
        Self::with_render(session_id, log_path, case_names, model_names, false)
    }

    fn with_render(
        session_id: String,
        log_path: PathBuf,
        case_names: Vec<String>,
        model_names: Vec<String>,
        render: bool,
    ) -> Self {
        let grid = vec![vec![Status::Waiting; model_names.len()]; case_names.len()];
        Self {
            display: Mutex::new(RunDisplay {
                session_id,
                log_path,
                case_names,
                model_names,
                grid,
                logs: VecDeque::new(),
                render,
            }),
        }
    }

    /// Updates one cell and redraws, as one atomic critical section.
    /// 更新一个单元格并重绘，作为一个原子临界区。
    pub fn set_status(&self, row: usize, col: usize, status: Status) {
        let mut display = self.display.lock().expect("render state poisoned");
        display.grid[row][col] = status;
        render(&display);
    }

    /// Appends a timestamped line to the rolling log and redraws.
    /// 向滚动日志追加一行带时间戳的记录并重绘。
    pub fn log(&self, message: impl Into<String>) {
        let mut display = self.display.lock().expect("render state poisoned");
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        display.logs.push_back(format!("{timestamp}: {}", message.into()));
        if display.logs.len() > MAX_LOGS {
            display.logs.pop_front();
        }
        render(&display);
    }

    /// Paints the initial (all-waiting) view.
    pub fn render_now(&self) {
        let display = self.display.lock().expect("render state poisoned");
        render(&display);
    }

    /// A copy of the current status grid, rows = test cases, columns =
    /// models.
    pub fn snapshot(&self) -> Vec<Vec<Status>> {
        self.display
            .lock()
            .expect("render state poisoned")
            .grid
            .clone()
    }

    /// The row and column labels, in grid order.
    pub fn labels(&self) -> (Vec<String>, Vec<String>) {
        let display = self.display.lock().expect("render state poisoned");
        (display.case_names.clone(), display.model_names.clone())
    }

    /// The most recent `n` rolling-log lines, oldest first.
    pub fn recent_logs(&self, n: usize) -> Vec<String> {
        let display = self.display.lock().expect("render state poisoned");
        let skip = display.logs.len().saturating_sub(n);
        display.logs.iter().skip(skip).cloned().collect()
    }
}

/// Full clear-then-reprint redraw. Must only be called with the display
/// lock held.
///
/// Layout, top to bottom: session id, log file path, rule, status table,
/// rule, log header, then as many of the most recent rolling-log lines as
/// fit the remaining terminal rows.
fn render(display: &RunDisplay) {
    if !display.render {
        return;
    }

    let (columns, total_rows) = term::size();

    let mut lines: Vec<String> = Vec::new();
    lines.push(t!("display.session", id = display.session_id).to_string());
    lines.push(t!("display.log_file", path = display.log_path.display()).to_string());
    lines.push(String::new());
    lines.push("─".repeat(columns));
    lines.extend(render_table(display));
    lines.push(String::new());
    lines.push("─".repeat(columns));
    lines.push(t!("display.recent_logs").to_string());

    // Only the newest log lines that still fit below the table are shown;
    // older ones are dropped first.
    let remaining = total_rows.saturating_sub(lines.len() + 1);
    let skip = display.logs.len().saturating_sub(remaining);
    for line in display.logs.iter().skip(skip) {
        lines.push(line.clone());
    }

    term::clear();
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", lines.join("\n"));
    let _ = stdout.flush();
}

/// Formats the status table: a header row of model identifiers, then one
/// row per test case with a status glyph per model column.
fn render_table(display: &RunDisplay) -> Vec<String> {
    let header_label = t!("display.test_case_header").to_string();
    let name_width = display
        .case_names
        .iter()
        .map(|name| name.chars().count())
        .chain([header_label.chars().count()])
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_WIDTH);

    let mut rows = Vec::with_capacity(display.case_names.len() + 1);

    let mut header = format!("{:<width$}", header_label, width = name_width);
    for model in &display.model_names {
        header.push_str(" | ");
        header.push_str(model);
    }
    rows.push(header);

    for (i, name) in display.case_names.iter().enumerate() {
        let mut row = format!("{:<width$}", clip(name, name_width), width = name_width);
        for (j, model) in display.model_names.iter().enumerate() {
            let col_width = model.chars().count().max(2);
            row.push_str(" | ");
            row.push_str(&format!(
                "{:^width$}",
                display.grid[i][j].glyph(),
                width = col_width
            ));
        }
        rows.push(row);
    }

    rows
}

/// Truncates a label to `width` characters, marking the cut with an
/// ellipsis.
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

/// Prints a formatted summary of the finished run to the console: one glyph
/// row per test case, then pass/failure totals.
///
/// 在控制台打印已完成运行的格式化摘要：每个测试用例一行符号，
/// 然后是通过/失败的总数。
pub fn print_summary(
    case_names: &[String],
    model_names: &[String],
    grid: &[Vec<Status>],
    locale: &str,
) {
    println!("\n{}", t!("summary.banner", locale = locale).bold());

    let mut header = format!("  - {:<width$}", "", width = MAX_NAME_WIDTH);
    for model in model_names {
        header.push_str(" | ");
        header.push_str(model);
    }
    println!("{}", header.dimmed());

    let mut passed = 0usize;
    let mut test_failures = 0usize;
    let mut generation_failures = 0usize;

    for (i, name) in case_names.iter().enumerate() {
        let mut row = format!("  - {:<width$}", clip(name, MAX_NAME_WIDTH), width = MAX_NAME_WIDTH);
        for (j, model) in model_names.iter().enumerate() {
            let status = grid[i][j];
            match status {
                Status::Success => passed += 1,
                Status::TestFailure => test_failures += 1,
                Status::GenerationFailure => generation_failures += 1,
                Status::Waiting | Status::Running => {}
            }
            row.push_str(" | ");
            row.push_str(&format!(
                "{:^width$}",
                status.glyph(),
                width = model.chars().count().max(2)
            ));
        }
        println!("{row}");
    }

    let totals = t!(
        "summary.totals",
        locale = locale,
        passed = passed,
        test_failures = test_failures,
        generation_failures = generation_failures
    );
    let totals = if test_failures + generation_failures > 0 {
        totals.red()
    } else {
        totals.green()
    };
    println!("\n{}", totals.bold());
}

/// Prints the raw error text for every failed pair. Returns early when
/// nothing failed.
///
/// 打印每个失败组合的原始错误文本。没有失败时提前返回。
pub fn print_failure_details(records: &[LogRecord], locale: &str) {
    let failures: Vec<&LogRecord> = records.iter().filter(|r| !r.result.is_success()).collect();
    if failures.is_empty() {
        return;
    }

    println!(
        "\n{}",
        t!("summary.failure_banner", locale = locale).red().bold()
    );
    println!("{}", "-".repeat(80));

    for (i, record) in failures.iter().enumerate() {
        println!(
            "[{}/{}] {} '{}' × '{}'",
            i + 1,
            failures.len(),
            t!("summary.failure_header", locale = locale).red(),
            record.test_case.cyan(),
            record.model
        );
        if let Some(error) = record.result.error_text() {
            println!("\n{error}\n");
            println!("{}", "-".repeat(80));
        }
    }
}
