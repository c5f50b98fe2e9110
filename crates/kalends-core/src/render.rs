use chrono::Weekday;

use crate::grid::{
  DayCell,
  MonthGrid,
  build_month_grid,
  label_order
};
use crate::hooks::CalendarHooks;
use crate::locale::{
  Locale,
  LocaleError,
  LocaleTable
};
use crate::view::{
  ContainerKind,
  NodeId,
  Role,
  ViewTree
};

pub struct Renderer {
  locale:     Locale,
  week_start: Weekday
}

impl Renderer {
  pub fn new(
    locales: &LocaleTable,
    language: &str,
    week_start: Weekday
  ) -> Result<Self, LocaleError> {
    let locale =
      locales.get(language)?.clone();
    Ok(Self {
      locale,
      week_start
    })
  }

  pub fn week_start(&self) -> Weekday {
    self.week_start
  }

  pub fn locale(&self) -> &Locale {
    &self.locale
  }

  pub fn render_month(
    &self,
    view: &mut ViewTree,
    parent: NodeId,
    grid: &MonthGrid,
    hooks: &mut CalendarHooks
  ) -> NodeId {
    let month = view.insert(
      Some(parent),
      Role::Container(
        ContainerKind::Month
      )
    );

    let header = view.insert(
      Some(month),
      Role::Container(
        ContainerKind::MonthHeader
      )
    );
    let title = view.insert(
      Some(header),
      Role::MonthTitle
    );
    view.set_text(
      title,
      self
        .locale
        .month_name(grid.month)
    );

    let labels = view.insert(
      Some(month),
      Role::Container(
        ContainerKind::LabelRow
      )
    );
    for weekday in
      label_order(self.week_start)
    {
      let label = view.insert(
        Some(labels),
        Role::DayLabel { weekday }
      );
      view.set_text(
        label,
        self
          .locale
          .weekday_name(weekday)
      );
      if let Some(entry) =
        view.get_mut(label)
      {
        hooks.fire_render_day_label(
          &mut entry.presentation,
          weekday
        );
      }
    }

    let days = view.insert(
      Some(month),
      Role::Container(
        ContainerKind::DayGrid
      )
    );
    for cell in &grid.cells {
      match cell {
        | DayCell::Padding => {
          view.insert(
            Some(days),
            Role::Padding
          );
        },
        | DayCell::Date(date) => {
          let node = view.insert(
            Some(days),
            Role::DateCell {
              date: *date
            }
          );
          view.set_text(
            node,
            &date.day.to_string()
          );
          if let Some(stamp) =
            date.to_datetime()
            && let Some(entry) =
              view.get_mut(node)
          {
            hooks.fire_render_day(
              &mut entry.presentation,
              stamp
            );
          }
        }
      }
    }

    month
  }

  pub fn render_months(
    &self,
    view: &mut ViewTree,
    parent: NodeId,
    year: i32,
    hooks: &mut CalendarHooks
  ) -> Option<NodeId> {
    let mut grids =
      Vec::with_capacity(12);
    for month in 1..=12 {
      grids.push(build_month_grid(
        year,
        month,
        self.week_start
      )?);
    }

    let months = view.insert(
      Some(parent),
      Role::Container(
        ContainerKind::Months
      )
    );
    for grid in &grids {
      self.render_month(
        view, months, grid, hooks
      );
    }
    Some(months)
  }

  pub fn render_year_header(
    &self,
    view: &mut ViewTree,
    parent: NodeId,
    from: i32,
    to: i32,
    current: i32
  ) -> NodeId {
    let header = view.insert(
      Some(parent),
      Role::Container(
        ContainerKind::Header
      )
    );
    for year in from..=to {
      let marker = view.insert(
        Some(header),
        Role::YearMarker { year }
      );
      view.set_text(
        marker,
        &year.to_string()
      );
      if year == current
        && let Some(entry) =
          view.get_mut(marker)
      {
        entry.presentation.selected =
          true;
      }
    }
    header
  }
}
