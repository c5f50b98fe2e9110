use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
  #[error("unsupported language: {0}")]
  UnsupportedLanguage(String)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
  months:   [String; 12],
  weekdays: [String; 7]
}

impl Locale {
  pub fn new(
    months: [&str; 12],
    weekdays: [&str; 7]
  ) -> Self {
    Self {
      months:   months
        .map(str::to_string),
      weekdays: weekdays
        .map(str::to_string)
    }
  }

  pub fn month_name(
    &self,
    month: u32
  ) -> &str {
    let idx =
      month.saturating_sub(1) as usize;
    self
      .months
      .get(idx)
      .map(String::as_str)
      .unwrap_or("")
  }

  pub fn weekday_name(
    &self,
    weekday: u32
  ) -> &str {
    self
      .weekdays
      .get(weekday as usize % 7)
      .map(String::as_str)
      .unwrap_or("")
  }
}

#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
  map: BTreeMap<String, Locale>
}

impl LocaleTable {
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn builtin() -> Self {
    let mut table = Self::empty();
    table.insert("es", spanish());
    table.insert("en", english());
    table
  }

  pub fn insert(
    &mut self,
    tag: &str,
    locale: Locale
  ) {
    self
      .map
      .insert(tag.to_string(), locale);
  }

  pub fn get(
    &self,
    tag: &str
  ) -> Result<&Locale, LocaleError> {
    self.map.get(tag).ok_or_else(|| {
      LocaleError::UnsupportedLanguage(
        tag.to_string()
      )
    })
  }

  pub fn tags(
    &self
  ) -> impl Iterator<Item = &str> {
    self.map.keys().map(String::as_str)
  }
}

fn spanish() -> Locale {
  Locale::new(
    [
      "Enero",
      "Febrero",
      "Marzo",
      "Abril",
      "Mayo",
      "Junio",
      "Julio",
      "Agosto",
      "Septiembre",
      "Octubre",
      "Noviembre",
      "Diciembre",
    ],
    [
      "Dom", "Lun", "Mar", "Mie",
      "Jue", "Vie", "Sab",
    ]
  )
}

fn english() -> Locale {
  Locale::new(
    [
      "January",
      "February",
      "March",
      "April",
      "May",
      "June",
      "July",
      "August",
      "September",
      "October",
      "November",
      "December",
    ],
    [
      "Sun", "Mon", "Tue", "Wed",
      "Thu", "Fri", "Sat",
    ]
  )
}
