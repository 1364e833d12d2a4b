//! `showlog` -- personal series tracker over a REST store.
//!
//! Probes the series store once at startup: if it answers, the store
//! stays authoritative for every change; if not, the session runs on
//! an in-memory collection and says so. Commands are line-oriented:
//! `list`, `search`, `filter`, `clear`, `add`, `edit`, `delete`,
//! `reload`, `status`, `quit`.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                 | Description                    |
//! |------------------------|----------|-------------------------|--------------------------------|
//! | `STORE_URL`            | no       | `http://localhost:3001` | Base URL of the series store   |
//! | `REQUEST_TIMEOUT_SECS` | no       | `10`                    | HTTP timeout per request       |

use std::io::{self, Write};

use chrono::NaiveDate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use showlog_app::config::AppConfig;
use showlog_app::shell::AppShell;
use showlog_client::{SeriesService, StoreTransport};
use showlog_core::form::{FormMode, FormOutput, SeriesForm};
use showlog_core::listing::SeriesList;
use showlog_core::notice::Severity;
use showlog_core::validation::Field;
use showlog_core::{Category, Series, SeriesId};

type InputLines = io::Lines<io::StdinLock<'static>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "showlog_app=info,showlog_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        url = %config.store_url,
        timeout_secs = config.request_timeout_secs,
        "Starting showlog"
    );

    let transport =
        StoreTransport::with_timeout(config.store_url.clone(), config.request_timeout());
    let mut shell = AppShell::start(SeriesService::new(transport)).await;
    let mut list = SeriesList::new();

    println!("showlog ({})", shell.mode().label());
    println!("Type 'help' for commands.");
    print_notices(&mut shell);

    let mut lines = io::stdin().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "list" => render_list(&shell, &list),
            "search" => {
                list.set_query(rest);
                render_list(&shell, &list);
            }
            "filter" => {
                if rest.is_empty() {
                    list.set_category(None);
                    render_list(&shell, &list);
                } else {
                    match Category::from_label(rest) {
                        Ok(category) => {
                            list.set_category(Some(category));
                            render_list(&shell, &list);
                        }
                        Err(error) => println!("{error}"),
                    }
                }
            }
            "clear" => {
                list.clear_filters();
                render_list(&shell, &list);
            }
            "add" => add_series(&mut shell, &mut lines).await?,
            "edit" => match rest.parse::<SeriesId>() {
                Ok(id) => edit_series(&mut shell, id, &mut lines).await?,
                Err(_) => println!("Usage: edit <id>"),
            },
            "delete" => match rest.parse::<SeriesId>() {
                Ok(id) => delete_series(&mut shell, &mut list, id, &mut lines).await?,
                Err(_) => println!("Usage: delete <id>"),
            },
            "reload" => {
                if let Ok(count) = shell.reload().await {
                    println!("{count} series loaded ({}).", shell.mode().label());
                }
                print_notices(&mut shell);
            }
            "status" => render_status(&shell, &list),
            "help" => print_help(),
            "quit" | "exit" => break,
            _ => println!("Unknown command '{command}'. Type 'help' for commands."),
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

async fn add_series(shell: &mut AppShell, lines: &mut InputLines) -> anyhow::Result<()> {
    let mut form = SeriesForm::create();
    fill_form(&mut form, lines)?;
    submit_form(shell, &mut form).await;
    print_notices(shell);
    Ok(())
}

async fn edit_series(
    shell: &mut AppShell,
    id: SeriesId,
    lines: &mut InputLines,
) -> anyhow::Result<()> {
    let series = match shell.fetch_for_edit(id).await {
        Ok(series) => series,
        Err(_) => {
            print_notices(shell);
            return Ok(());
        }
    };

    let mut form = SeriesForm::edit(&series);
    fill_form(&mut form, lines)?;
    submit_form(shell, &mut form).await;
    print_notices(shell);
    Ok(())
}

async fn delete_series(
    shell: &mut AppShell,
    list: &mut SeriesList,
    id: SeriesId,
    lines: &mut InputLines,
) -> anyhow::Result<()> {
    let staged = list
        .request_delete(shell.records(), id)
        .map(|series| series.title.clone());

    let Some(title) = staged else {
        println!("No series with id {id}.");
        return Ok(());
    };

    print!("Delete \"{title}\"? [y/N]: ");
    io::stdout().flush()?;
    let answer = lines.next().transpose()?.unwrap_or_default();

    if answer.trim().eq_ignore_ascii_case("y") {
        if let Some(id) = list.confirm_delete() {
            let _ = shell.delete(id).await;
        }
    } else {
        list.cancel_delete();
        println!("Deletion cancelled.");
    }
    print_notices(shell);
    Ok(())
}

// ---------------------------------------------------------------------------
// Form entry
// ---------------------------------------------------------------------------

/// Walk the fields in order, validating each entry as the field loses
/// focus. Empty input keeps the value already in the form.
fn fill_form(form: &mut SeriesForm, lines: &mut InputLines) -> anyhow::Result<()> {
    match form.mode() {
        FormMode::Create => println!("New series:"),
        FormMode::Edit { .. } => println!(
            "Editing \"{}\" (press Enter to keep the shown value)",
            form.value(Field::Title)
        ),
    }

    let today = today();

    for field in Field::ALL {
        match field {
            Field::Category => {
                println!("  (one of: {})", Category::ALL.map(|c| c.label()).join(", "));
            }
            Field::ReleaseDate | Field::WatchedDate => {
                println!("  (format: YYYY-MM-DD, not in the future)");
            }
            _ => {}
        }

        let current = form.value(field);
        if current.is_empty() {
            print!("{}: ", field.label());
        } else {
            print!("{} [{}]: ", field.label(), current);
        }
        io::stdout().flush()?;

        let Some(line) = lines.next() else { return Ok(()) };
        let entry = line?;
        let entry = entry.trim();
        if !entry.is_empty() {
            form.set_value(field, entry, today);
        }
        form.touch(field, today);

        if let Some(message) = form.error(field) {
            println!("  {message}");
        }
    }
    Ok(())
}

async fn submit_form(shell: &mut AppShell, form: &mut SeriesForm) {
    match form.submit(today()) {
        Some(FormOutput::Create(draft)) => match shell.create(draft).await {
            Ok(_) => form.complete_submit(),
            Err(_) => form.fail_submit(),
        },
        Some(FormOutput::Update(series)) => match shell.update(series).await {
            Ok(()) => form.complete_submit(),
            Err(_) => form.fail_submit(),
        },
        None => print_form_errors(form),
    }
}

fn print_form_errors(form: &SeriesForm) {
    if !form.has_errors() {
        return;
    }
    println!("Not saved:");
    for field in Field::ALL {
        if let Some(message) = form.error(field) {
            println!("  - {message}");
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render_list(shell: &AppShell, list: &SeriesList) {
    let all = shell.records();
    let visible = list.visible(all);

    if visible.is_empty() {
        println!("No series match the current filters.");
    } else {
        for series in &visible {
            print_series(series);
        }
    }

    let (shown, total) = list.counts(all);
    println!("{shown} of {total} series");
}

fn print_series(series: &Series) {
    println!(
        "#{} {} ({} seasons, {}) - {} / {} - released {}, watched {}",
        series.id,
        series.title,
        series.season_count,
        series.category,
        series.director,
        series.production_company,
        series.release_date,
        series.watched_date,
    );
}

fn render_status(shell: &AppShell, list: &SeriesList) {
    println!("Mode:   {}", shell.mode().label());
    println!("Store:  {}", shell.base_url());
    let (shown, total) = list.counts(shell.records());
    println!("Series: {total} ({shown} visible with current filters)");
    if !list.query().is_empty() {
        println!("Search: \"{}\"", list.query());
    }
    if let Some(category) = list.category() {
        println!("Category: {category}");
    }
}

fn print_notices(shell: &mut AppShell) {
    for notice in shell.notices() {
        let tag = match notice.severity {
            Severity::Success => "ok",
            Severity::Error => "error",
        };
        println!("[{tag}] {}", notice.message);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  list                show series matching the current filters");
    println!("  search <text>       match against title, director, or production company");
    println!("  filter <category>   keep one category ('filter' alone clears it)");
    println!("  clear               reset search and category");
    println!("  add                 create a series");
    println!("  edit <id>           edit a series");
    println!("  delete <id>         delete a series, after confirmation");
    println!("  reload              refresh the collection from the store");
    println!("  status              connection mode and counts");
    println!("  quit                exit");
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
