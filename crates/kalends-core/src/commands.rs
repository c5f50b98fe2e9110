use anyhow::Context;
use chrono::{Datelike, NaiveDate, Weekday};
use tracing::{debug, instrument};

use crate::config::CalendarConfig;
use crate::grid::CellDate;
use crate::hooks::CalendarHooks;
use crate::locale::LocaleTable;
use crate::paint::Painter;
use crate::view::{ContainerKind, Role, ViewTree};
use crate::widget::Calendar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Show,
    Pick(NaiveDate),
    Goto(i32),
    Langs,
    Help,
    Version,
}

pub fn known_command_names() -> &'static [&'static str] {
    &["show", "pick", "goto", "langs", "help", "version"]
}

pub fn expand_command_abbrev(word: &str) -> Option<&'static str> {
    let lowered = word.to_ascii_lowercase();
    let mut matched = None;
    for name in known_command_names() {
        if *name == lowered {
            return Some(name);
        }
        if name.starts_with(&lowered) {
            if matched.is_some() {
                return None;
            }
            matched = Some(*name);
        }
    }
    matched
}

pub fn parse_command(words: &[String]) -> anyhow::Result<Command> {
    let Some(first) = words.first() else {
        return Ok(Command::Show);
    };
    let Some(name) = expand_command_abbrev(first) else {
        anyhow::bail!("unknown command: {first} (try help)");
    };
    let rest = &words[1..];
    match name {
        "show" => {
            no_args(name, rest)?;
            Ok(Command::Show)
        }
        "pick" => {
            let raw = one_arg(name, rest)?;
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("pick wants YYYY-MM-DD, got {raw:?}"))?;
            Ok(Command::Pick(date))
        }
        "goto" => {
            let raw = one_arg(name, rest)?;
            let year = raw
                .parse()
                .with_context(|| format!("goto wants a year, got {raw:?}"))?;
            Ok(Command::Goto(year))
        }
        "langs" => {
            no_args(name, rest)?;
            Ok(Command::Langs)
        }
        "help" => Ok(Command::Help),
        "version" => {
            no_args(name, rest)?;
            Ok(Command::Version)
        }
        other => anyhow::bail!("unhandled command: {other}"),
    }
}

fn no_args(name: &str, rest: &[String]) -> anyhow::Result<()> {
    if rest.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{name} takes no arguments")
    }
}

fn one_arg<'a>(name: &str, rest: &'a [String]) -> anyhow::Result<&'a str> {
    match rest {
        [only] => Ok(only.as_str()),
        _ => anyhow::bail!("{name} wants exactly one argument"),
    }
}

#[instrument(skip(config))]
pub fn run_command(
    command: Command,
    config: &CalendarConfig,
) -> anyhow::Result<()> {
    match command {
        Command::Show => {
            let calendar = mount_host(config)?;
            paint(config, &calendar);
            Ok(())
        }
        Command::Pick(date) => {
            let mut calendar = mount_host(config)?;
            if date.year() != calendar.current_year() {
                let marker =
                    calendar.year_marker(date.year()).ok_or_else(|| {
                        let (min, max) = calendar.year_range();
                        anyhow::anyhow!(
                            "{} is outside the year range {min}..{max}",
                            date.year()
                        )
                    })?;
                calendar.click(marker);
            }
            let cell = calendar
                .date_cell(CellDate::new(
                    date.year(),
                    date.month(),
                    date.day(),
                ))
                .ok_or_else(|| anyhow::anyhow!("no day cell for {date}"))?;
            calendar.click(cell);
            paint(config, &calendar);
            Ok(())
        }
        Command::Goto(year) => {
            let mut calendar = mount_host(config)?;
            let marker = calendar.year_marker(year).ok_or_else(|| {
                let (min, max) = calendar.year_range();
                anyhow::anyhow!("{year} is outside the year range {min}..{max}")
            })?;
            calendar.click(marker);
            paint(config, &calendar);
            Ok(())
        }
        Command::Langs => {
            for tag in LocaleTable::builtin().tags() {
                println!("{tag}");
            }
            Ok(())
        }
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            println!("kalends {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn mount_host(config: &CalendarConfig) -> anyhow::Result<Calendar> {
    debug!(container = %config.container_id, "building host page");
    let mut page = ViewTree::new();
    let body = page.insert(None, Role::Container(ContainerKind::Generic));
    let container =
        page.insert(Some(body), Role::Container(ContainerKind::Generic));
    page.set_element_id(container, &config.container_id);
    let calendar =
        Calendar::mount(page, config, &LocaleTable::builtin(), demo_hooks())
            .context("mounting the calendar")?;
    Ok(calendar)
}

fn demo_hooks() -> CalendarHooks {
    let mut hooks = CalendarHooks::new();
    hooks.on_render_day = Some(Box::new(|presentation, stamp| {
        if matches!(stamp.weekday(), Weekday::Sat | Weekday::Sun) {
            presentation.color = Some("cyan".to_string());
        }
    }));
    hooks.on_render_day_label = Some(Box::new(|presentation, weekday| {
        if weekday == 0 || weekday == 6 {
            presentation.color = Some("cyan".to_string());
        }
    }));
    hooks.on_day_click = Some(Box::new(|presentation, stamp| {
        if !presentation.marks.remove("holiday") {
            presentation.mark("holiday");
        }
        println!("picked {}", stamp.format("%Y-%m-%d %H:%M:%S"));
    }));
    hooks.on_year_changed = Some(Box::new(|previous, current| {
        println!("year changed: {previous} -> {current}");
    }));
    hooks
}

fn paint(config: &CalendarConfig, calendar: &Calendar) {
    let painter = Painter::new(config.color);
    print!("{}", painter.paint_page(calendar.page(), calendar.root()));
}

fn print_help() {
    println!("kalends - multi-month calendar widget");
    println!();
    println!("usage: kalends [flags] [command]");
    println!();
    println!("commands:");
    println!("  show                 paint the current year (default)");
    println!("  pick YYYY-MM-DD      click a day cell and report it");
    println!("  goto YEAR            select another year marker");
    println!("  langs                list built-in locales");
    println!("  help                 this text");
    println!("  version              print the version");
    println!();
    println!("flags:");
    println!("  -v / -q              more / less logging");
    println!("  --config FILE        explicit config file");
    println!("  --set KEY=VALUE      override a config key");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|word| word.to_string()).collect()
    }

    fn test_config() -> CalendarConfig {
        CalendarConfig {
            container_id: "calendar".to_string(),
            language: "es".to_string(),
            min_year: 2023,
            max_year: 2025,
            current_year: 2024,
            week_start: "sunday".to_string(),
            color: false,
        }
    }

    #[test]
    fn abbreviations_expand_uniquely() {
        assert_eq!(expand_command_abbrev("s"), Some("show"));
        assert_eq!(expand_command_abbrev("pi"), Some("pick"));
        assert_eq!(expand_command_abbrev("GOTO"), Some("goto"));
        assert_eq!(expand_command_abbrev("ver"), Some("version"));
        assert_eq!(expand_command_abbrev("zz"), None);
        assert_eq!(expand_command_abbrev(""), None);
    }

    #[test]
    fn empty_words_default_to_show() {
        let command = parse_command(&[]).expect("command");
        assert_eq!(command, Command::Show);
    }

    #[test]
    fn pick_wants_a_strict_date() {
        let command = parse_command(&words(&["pick", "2024-03-15"]))
            .expect("command");
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).expect("date");
        assert_eq!(command, Command::Pick(expected));
        assert!(parse_command(&words(&["pick", "15/03/2024"])).is_err());
        assert!(parse_command(&words(&["pick"])).is_err());
    }

    #[test]
    fn goto_wants_a_year() {
        let command =
            parse_command(&words(&["goto", "2025"])).expect("command");
        assert_eq!(command, Command::Goto(2025));
        assert!(parse_command(&words(&["goto", "soon"])).is_err());
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert!(parse_command(&words(&["show", "now"])).is_err());
        assert!(parse_command(&words(&["langs", "all"])).is_err());
    }

    #[test]
    fn unknown_commands_are_errors() {
        assert!(parse_command(&words(&["paint"])).is_err());
    }

    #[test]
    fn show_paints_without_error() {
        run_command(Command::Show, &test_config()).expect("show");
    }

    #[test]
    fn pick_navigates_to_another_year() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).expect("date");
        run_command(Command::Pick(date), &test_config()).expect("pick");
    }

    #[test]
    fn pick_outside_the_range_fails() {
        let date = NaiveDate::from_ymd_opt(1999, 1, 1).expect("date");
        assert!(run_command(Command::Pick(date), &test_config()).is_err());
    }

    #[test]
    fn goto_outside_the_range_fails() {
        assert!(run_command(Command::Goto(1999), &test_config()).is_err());
    }

    #[test]
    fn version_and_langs_run() {
        run_command(Command::Version, &test_config()).expect("version");
        run_command(Command::Langs, &test_config()).expect("langs");
        run_command(Command::Help, &test_config()).expect("help");
    }
}
