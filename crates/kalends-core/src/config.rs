use std::env;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::Context;
use chrono::{Datelike, Weekday};
use serde::Deserialize;
use tracing::{debug, info, warn};

pub const CONFIG_ENV: &str =
  "KALENDS_CONFIG";
pub const CONFIG_FILE: &str =
  "kalends.toml";

#[derive(
  Debug,
  Clone,
  PartialEq,
  Deserialize
)]
pub struct CalendarConfig {
  #[serde(
    default = "default_container_id"
  )]
  pub container_id: String,
  #[serde(
    default = "default_language"
  )]
  pub language:     String,
  #[serde(
    default = "default_min_year"
  )]
  pub min_year:     i32,
  #[serde(
    default = "default_max_year"
  )]
  pub max_year:     i32,
  #[serde(
    default = "default_current_year"
  )]
  pub current_year: i32,
  #[serde(
    default = "default_week_start"
  )]
  pub week_start:   String,
  #[serde(default = "default_color")]
  pub color:        bool
}

fn default_container_id() -> String {
  "calendar".to_string()
}

fn default_language() -> String {
  "es".to_string()
}

fn this_year() -> i32 {
  chrono::Local::now().year()
}

fn default_min_year() -> i32 {
  this_year() - 5
}

fn default_max_year() -> i32 {
  this_year() + 5
}

fn default_current_year() -> i32 {
  this_year()
}

fn default_week_start() -> String {
  "sunday".to_string()
}

fn default_color() -> bool {
  true
}

impl Default for CalendarConfig {
  fn default() -> Self {
    Self {
      container_id:
        default_container_id(),
      language: default_language(),
      min_year: default_min_year(),
      max_year: default_max_year(),
      current_year:
        default_current_year(),
      week_start:
        default_week_start(),
      color:    default_color()
    }
  }
}

impl CalendarConfig {
  #[tracing::instrument(skip(
    cli_override
  ))]
  pub fn load(
    cli_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let Some(path) =
      resolve_config_path(
        cli_override
      )
    else {
      warn!(
        "no config file found; \
         using defaults"
      );
      return Ok(Self::default());
    };
    info!(
      config = %path.display(),
      "loading config"
    );
    let raw = fs::read_to_string(
      &path
    )
    .with_context(|| {
      format!(
        "reading {}",
        path.display()
      )
    })?;
    toml::from_str(&raw)
      .with_context(|| {
        format!(
          "parsing {}",
          path.display()
        )
      })
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      debug!(
        key = %key,
        value = %value,
        "applying override"
      );
      match key.as_str() {
        | "container_id" => {
          self.container_id = value;
        },
        | "language" => {
          self.language = value;
        },
        | "min_year" => {
          set_year(
            &mut self.min_year,
            &key,
            &value
          );
        },
        | "max_year" => {
          set_year(
            &mut self.max_year,
            &key,
            &value
          );
        },
        | "current_year" => {
          set_year(
            &mut self.current_year,
            &key,
            &value
          );
        },
        | "week_start" => {
          self.week_start = value;
        },
        | "color" => {
          self.color = matches!(
            value.as_str(),
            "true" | "on" | "1"
          );
        },
        | other => {
          warn!(
            key = other,
            "unknown config key \
             ignored"
          );
        }
      }
    }
  }

  pub fn week_start_day(
    &self
  ) -> Weekday {
    parse_week_start(
      &self.week_start
    )
    .unwrap_or(Weekday::Sun)
  }

  pub fn sanitize(mut self) -> Self {
    if self.min_year > self.max_year
    {
      warn!(
        min = self.min_year,
        max = self.max_year,
        "year range inverted, \
         swapping"
      );
      std::mem::swap(
        &mut self.min_year,
        &mut self.max_year
      );
    }
    if self.current_year
      < self.min_year
    {
      warn!(
        year = self.current_year,
        min = self.min_year,
        "current year below range, \
         clamping"
      );
      self.current_year =
        self.min_year;
    }
    if self.current_year
      > self.max_year
    {
      warn!(
        year = self.current_year,
        max = self.max_year,
        "current year above range, \
         clamping"
      );
      self.current_year =
        self.max_year;
    }
    if parse_week_start(
      &self.week_start
    )
    .is_none()
    {
      warn!(
        week_start =
          %self.week_start,
        "unrecognized week start, \
         using sunday"
      );
      self.week_start =
        default_week_start();
    }
    if self.container_id.is_empty()
    {
      warn!(
        "empty container id, using \
         default"
      );
      self.container_id =
        default_container_id();
    }
    self
  }
}

fn set_year(
  slot: &mut i32,
  key: &str,
  value: &str
) {
  match value.parse() {
    | Ok(parsed) => *slot = parsed,
    | Err(_) => {
      warn!(
        key = %key,
        value = %value,
        "not a year, ignored"
      );
    }
  }
}

pub fn parse_week_start(
  raw: &str
) -> Option<Weekday> {
  match raw
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "sun" | "sunday" => {
      Some(Weekday::Sun)
    },
    | "mon" | "monday" => {
      Some(Weekday::Mon)
    },
    | "tue" | "tuesday" => {
      Some(Weekday::Tue)
    },
    | "wed" | "wednesday" => {
      Some(Weekday::Wed)
    },
    | "thu" | "thursday" => {
      Some(Weekday::Thu)
    },
    | "fri" | "friday" => {
      Some(Weekday::Fri)
    },
    | "sat" | "saturday" => {
      Some(Weekday::Sat)
    },
    | _ => None
  }
}

pub fn resolve_config_path(
  cli_override: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = cli_override {
    return Some(path.to_path_buf());
  }
  if let Ok(raw) =
    env::var(CONFIG_ENV)
    && !raw.is_empty()
  {
    return Some(PathBuf::from(raw));
  }
  let local =
    PathBuf::from(CONFIG_FILE);
  if local.is_file() {
    return Some(local);
  }
  let fallback =
    dirs::config_dir()?
      .join("kalends")
      .join(CONFIG_FILE);
  if fallback.is_file() {
    return Some(fallback);
  }
  None
}
