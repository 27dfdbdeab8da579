use chrono::Weekday;
use crew_schedule::tabular::frames::{
    enriched_frame, matrix_frame, pivot_frame, planned_tasks_frame,
};
use crew_schedule::{
    CsvTotalsSource, EnrichedSchedule, PlanSelection, PlannerConfig, Schedule, ScheduleResult,
    TaskSpec, TotalsSource, TotalsTable, WorkItem, append_totals, load_work_items_from_csv,
    load_work_items_from_json, parse_iso_date, plan_tasks, save_json, save_matrix_to_csv,
    save_pivot_to_csv, save_planned_tasks_to_csv, save_schedule_to_csv,
};
use polars::prelude::{AnyValue, DataFrame};
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let cell_text = |av: &AnyValue| match av {
        AnyValue::Null => String::new(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        _ => av.to_string(),
    };

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for (ci, col) in columns.iter().enumerate() {
        for row_idx in 0..df.height() {
            if let Ok(ref av) = col.get(row_idx) {
                widths[ci] = widths[ci].max(cell_text(av).len());
            }
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    out.push('|');
    for (i, name) in col_names.iter().enumerate() {
        out.push_str(&format!(" {:<width$} |", name, width = widths[i]));
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    for row_idx in 0..df.height() {
        out.push('|');
        for (ci, col) in columns.iter().enumerate() {
            let s = col
                .get(row_idx)
                .map(|av| cell_text(&av))
                .unwrap_or_default();
            out.push_str(&format!(" {:<width$} |", s, width = widths[ci]));
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                                      Show this help\n  load items <csv|json> <path>              Load work items (Team, Constituency, Scheme Name, Status / Duration (Days))\n  load totals <path>                        Use a CSV stay-totals source (SCHEME NAME + stay columns)\n  start <YYYY-MM-DD>                        Set the schedule start date\n  restday <weekday>                         Set the weekly non-working day\n  duration <status...> <days>               Set the duration for a status\n  priority constituency <csv>               Set constituency priority (top first)\n  priority status <csv>                     Set status priority (top first)\n  priority reset                            Use observed values in ascending order\n  config show                               Show the run configuration\n  config load <json_path>                   Load configuration from JSON\n  config save <json_path>                   Save configuration to JSON\n  generate                                  Generate the schedule and append stay totals\n  show <schedule|calendar|matrix>           Show a view of the last schedule\n  export <schedule|calendar|matrix|plan> <csv|json> <path>\n                                            Write a view to disk\n  plan tasks <name:days,...>                Set the planner task list\n  plan add <team> <YYYY-MM-DD> <constituency> <scheme...>\n                                            Select a scheme for the planner\n  plan show                                 Show planned tasks, shutdown dates and matrix\n  plan clear                                Remove all planner selections\n  quit|exit                                 Exit"
    );
}

#[derive(Default)]
struct Session {
    items: Vec<WorkItem>,
    config: PlannerConfig,
    totals_path: Option<PathBuf>,
    schedule: Option<(Schedule, EnrichedSchedule)>,
    tasks: Vec<TaskSpec>,
    selections: Vec<PlanSelection>,
}

impl Session {
    fn generate(&mut self) -> ScheduleResult<String> {
        let schedule = Schedule::generate(&self.items, &self.config)?;
        // Built per run so a later `config load` changes the columns read.
        let totals = match &self.totals_path {
            Some(path) => {
                CsvTotalsSource::new(path.clone(), self.config.totals.clone()).fetch()?
            }
            None => TotalsTable::empty(self.config.totals.columns.clone()),
        };
        let enriched = append_totals(schedule.items(), &totals);
        let summary = schedule.summary().to_cli_summary();
        let table = render_df_as_text_table(&enriched_frame(&enriched)?);
        self.schedule = Some((schedule, enriched));
        Ok(format!("Generated ({summary})\n{table}"))
    }

    fn show(&self, view: &str) -> ScheduleResult<String> {
        let Some((schedule, enriched)) = &self.schedule else {
            return Ok("No schedule generated yet. Run 'generate' first.".to_string());
        };
        let df = match view {
            "schedule" => enriched_frame(enriched)?,
            "calendar" => pivot_frame(&schedule.team_pivot())?,
            "matrix" => matrix_frame(&schedule.matrix(), "Scheme")?,
            _ => return Ok("Usage: show <schedule|calendar|matrix>".to_string()),
        };
        Ok(render_df_as_text_table(&df))
    }

    fn export(&self, view: &str, format: &str, path: &str) -> ScheduleResult<String> {
        if view == "plan" {
            let plan = plan_tasks(&self.tasks, &self.selections, &self.config.calendar())?;
            match format {
                "csv" => save_planned_tasks_to_csv(&plan.tasks, path)?,
                _ => save_json(&plan, path)?,
            }
            return Ok(format!("Exported plan to {path}."));
        }
        let Some((schedule, enriched)) = &self.schedule else {
            return Ok("No schedule generated yet. Run 'generate' first.".to_string());
        };
        match (view, format) {
            ("schedule", "csv") => save_schedule_to_csv(enriched, path)?,
            ("schedule", _) => save_json(enriched, path)?,
            ("calendar", "csv") => save_pivot_to_csv(&schedule.team_pivot(), path)?,
            ("calendar", _) => save_json(&schedule.team_pivot(), path)?,
            ("matrix", "csv") => save_matrix_to_csv(&schedule.matrix(), "Scheme", path)?,
            ("matrix", _) => save_json(&schedule.matrix(), path)?,
            _ => {
                return Ok(
                    "Usage: export <schedule|calendar|matrix|plan> <csv|json> <path>".to_string(),
                );
            }
        }
        Ok(format!("Exported {view} to {path}."))
    }

    fn show_plan(&self) -> ScheduleResult<String> {
        let plan = plan_tasks(&self.tasks, &self.selections, &self.config.calendar())?;
        let mut out = render_df_as_text_table(&planned_tasks_frame(&plan.tasks)?);
        for (category, date) in plan.shutdown_dates() {
            out.push_str(&format!("Shutdown {category}: {date}\n"));
        }
        out.push_str(&render_df_as_text_table(&matrix_frame(&plan.matrix(), "Task")?));
        Ok(out)
    }
}

fn parse_task_list(input: &str) -> Option<Vec<TaskSpec>> {
    input
        .split(',')
        .map(|entry| {
            let (name, days) = entry.rsplit_once(':')?;
            let days = days.trim().parse::<u32>().ok()?;
            Some(TaskSpec::new(name.trim(), days))
        })
        .collect()
}

/// The raw text after the first `tokens` whitespace-separated words.
fn args_after(input: &str, tokens: usize) -> &str {
    let mut rest = input.trim_start();
    for _ in 0..tokens {
        let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest[word_end..].trim_start();
    }
    rest
}

fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn report(result: ScheduleResult<String>) {
    match result {
        Ok(text) => println!("{text}"),
        Err(e) => println!("Error: {e}"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut session = Session::default();
    println!("Crew Schedule (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "load" => match (parts.next(), parts.next(), parts.next()) {
                (Some("items"), Some(format), Some(path)) => {
                    let loaded = match format {
                        "csv" => load_work_items_from_csv(path),
                        "json" => load_work_items_from_json(path),
                        _ => {
                            println!("Usage: load items <csv|json> <path>");
                            continue;
                        }
                    };
                    match loaded {
                        Ok(items) => {
                            println!("Loaded {} work items from {path}.", items.len());
                            session.items = items;
                            session.schedule = None;
                        }
                        Err(e) => println!("Error: {e}"),
                    }
                }
                (Some("totals"), Some(path), None) => {
                    session.totals_path = Some(PathBuf::from(path));
                    println!("Totals source set to {path}.");
                }
                _ => println!("Usage: load items <csv|json> <path> | load totals <path>"),
            },
            "start" => match parts.next().map(parse_iso_date) {
                Some(Ok(date)) => {
                    session.config.start_date = date.format("%Y-%m-%d").to_string();
                    println!("Start date set to {date}.");
                }
                Some(Err(_)) => println!("Invalid date (YYYY-MM-DD)"),
                None => println!("Usage: start <YYYY-MM-DD>"),
            },
            "restday" => match parts.next().map(Weekday::from_str) {
                Some(Ok(day)) => {
                    session.config.rest_day = day;
                    println!("Rest day set to {day}.");
                }
                Some(Err(_)) => println!("Invalid weekday"),
                None => println!("Usage: restday <weekday>"),
            },
            "duration" => {
                let words: Vec<&str> = parts.collect();
                match words.split_last() {
                    Some((days, status)) if !status.is_empty() => match days.parse::<u32>() {
                        Ok(days) if days > 0 => {
                            let status = status.join(" ");
                            session.config.status_durations.set(status.as_str(), days);
                            println!("Duration for '{status}' set to {days} days.");
                        }
                        _ => println!("Duration must be a positive whole number of days"),
                    },
                    _ => println!("Usage: duration <status...> <days>"),
                }
            }
            "priority" => match (parts.next(), parts.next()) {
                (Some("constituency"), Some(_)) => {
                    let list = parse_list(args_after(input, 2));
                    println!("Constituency priority: {}", list.join(" > "));
                    session.config.priority.constituency = Some(list);
                }
                (Some("status"), Some(_)) => {
                    let list = parse_list(args_after(input, 2));
                    println!("Status priority: {}", list.join(" > "));
                    session.config.priority.status = Some(list);
                }
                (Some("reset"), None) => {
                    session.config.priority = Default::default();
                    println!("Priority reset to observed order.");
                }
                _ => println!("Usage: priority <constituency|status> <csv> | priority reset"),
            },
            "config" => match (parts.next(), parts.next()) {
                (Some("show"), None) => match serde_json::to_string_pretty(&session.config) {
                    Ok(json) => println!("{json}"),
                    Err(e) => println!("Error: {e}"),
                },
                (Some("load"), Some(path)) => match PlannerConfig::load(path) {
                    Ok(config) => {
                        session.config = config;
                        println!("Configuration loaded from {path}.");
                    }
                    Err(e) => println!("Error: {e}"),
                },
                (Some("save"), Some(path)) => match session.config.save(path) {
                    Ok(()) => println!("Configuration saved to {path}."),
                    Err(e) => println!("Error: {e}"),
                },
                _ => println!("Usage: config <show|load <path>|save <path>>"),
            },
            "generate" => report(session.generate()),
            "show" => match parts.next() {
                Some(view) => report(session.show(view)),
                None => println!("Usage: show <schedule|calendar|matrix>"),
            },
            "export" => match (parts.next(), parts.next(), parts.next()) {
                (Some(view), Some(format @ ("csv" | "json")), Some(path)) => {
                    report(session.export(view, format, path))
                }
                _ => println!("Usage: export <schedule|calendar|matrix|plan> <csv|json> <path>"),
            },
            "plan" => match parts.next() {
                Some("tasks") => {
                    let rest = args_after(input, 2);
                    match parse_task_list(rest) {
                        Some(tasks) if !tasks.is_empty() => {
                            let listed = tasks
                                .iter()
                                .map(|t| format!("{} ({}d)", t.name, t.duration_days))
                                .collect::<Vec<_>>()
                                .join(", ");
                            println!("Planner tasks: {listed}");
                            session.tasks = tasks;
                        }
                        _ => println!("Usage: plan tasks <name:days,...>"),
                    }
                }
                Some("add") => {
                    let team = parts.next();
                    let date = parts.next().map(parse_iso_date);
                    let category = parts.next();
                    let name = parts.collect::<Vec<_>>().join(" ");
                    match (team, date, category) {
                        (Some(team), Some(Ok(start_date)), Some(category)) if !name.is_empty() => {
                            println!("Added scheme {name} for team {team}.");
                            session.selections.push(PlanSelection {
                                category: category.to_string(),
                                name,
                                team: team.to_string(),
                                start_date,
                            });
                        }
                        (_, Some(Err(_)), _) => println!("Invalid date (YYYY-MM-DD)"),
                        _ => println!(
                            "Usage: plan add <team> <YYYY-MM-DD> <constituency> <scheme...>"
                        ),
                    }
                }
                Some("show") => report(session.show_plan()),
                Some("clear") => {
                    session.selections.clear();
                    println!("Planner selections cleared.");
                }
                _ => println!("Usage: plan <tasks|add|show|clear>"),
            },
            _ => println!("Unknown command '{cmd}'. Type 'help' for commands."),
        }
    }
}
