use chrono::{
  Datelike,
  NaiveDate,
  NaiveDateTime,
  Weekday
};

pub const DAYS_PER_WEEK: usize = 7;
pub const GRID_ROWS: usize = 6;
pub const GRID_CELLS: usize =
  DAYS_PER_WEEK * GRID_ROWS;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord
)]
pub struct CellDate {
  pub year:  i32,
  pub month: u32,
  pub day:   u32
}

impl CellDate {
  pub fn new(
    year: i32,
    month: u32,
    day: u32
  ) -> Self {
    Self { year, month, day }
  }

  pub fn to_date(
    self
  ) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
      self.year, self.month, self.day
    )
  }

  pub fn to_datetime(
    self
  ) -> Option<NaiveDateTime> {
    self
      .to_date()?
      .and_hms_opt(0, 0, 0)
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq
)]
pub enum DayCell {
  Padding,
  Date(CellDate)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
  pub year:  i32,
  pub month: u32,
  pub cells: Vec<DayCell>
}

impl MonthGrid {
  pub fn rows(
    &self
  ) -> impl Iterator<Item = &[DayCell]>
  {
    self.cells.chunks(DAYS_PER_WEEK)
  }

  pub fn leading_padding(&self) -> usize {
    self
      .cells
      .iter()
      .take_while(|cell| {
        **cell == DayCell::Padding
      })
      .count()
  }

  pub fn date_count(&self) -> usize {
    self
      .cells
      .iter()
      .filter(|cell| {
        matches!(
          cell,
          DayCell::Date(_)
        )
      })
      .count()
  }
}

pub fn first_of_month(
  year: i32,
  month: u32
) -> Option<NaiveDate> {
  NaiveDate::from_ymd_opt(
    year, month, 1
  )
}

pub fn days_in_month(
  year: i32,
  month: u32
) -> Option<u32> {
  let (next_y, next_m) =
    shift_months(year, month, 1)?;
  let last = first_of_month(
    next_y, next_m
  )?
  .pred_opt()?;
  Some(last.day())
}

pub fn shift_months(
  year: i32,
  month: u32,
  delta: i32
) -> Option<(i32, u32)> {
  let zero = i64::from(year) * 12
    + (i64::from(month) - 1)
    + i64::from(delta);
  let shifted_year = i32::try_from(
    zero.div_euclid(12)
  )
  .ok()?;
  let shifted_month =
    zero.rem_euclid(12) as u32 + 1;
  Some((
    shifted_year,
    shifted_month
  ))
}

#[must_use]
pub fn weekday_index(
  weekday: Weekday
) -> u32 {
  weekday.num_days_from_sunday()
}

#[must_use]
pub fn leading_offset(
  first: Weekday,
  week_start: Weekday
) -> u32 {
  (weekday_index(first) + 7
    - weekday_index(week_start))
    % 7
}

pub fn label_order(
  week_start: Weekday
) -> [u32; 7] {
  let start =
    weekday_index(week_start);
  let mut order = [0_u32; 7];
  for (slot, idx) in
    order.iter_mut().enumerate()
  {
    *idx =
      (start + slot as u32) % 7;
  }
  order
}

pub fn build_month_grid(
  year: i32,
  month: u32,
  week_start: Weekday
) -> Option<MonthGrid> {
  let first =
    first_of_month(year, month)?;
  let lead = leading_offset(
    first.weekday(),
    week_start
  );

  let mut cells =
    Vec::with_capacity(GRID_CELLS);
  for _ in 0..lead {
    cells.push(DayCell::Padding);
  }

  let mut cursor = first;
  while cursor.month() == month {
    cells.push(DayCell::Date(
      CellDate::new(
        cursor.year(),
        cursor.month(),
        cursor.day()
      )
    ));
    cursor = match cursor.succ_opt()
    {
      | Some(next) => next,
      | None => break
    };
  }

  while cells.len() < GRID_CELLS {
    cells.push(DayCell::Padding);
  }

  Some(MonthGrid {
    year,
    month,
    cells
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn january_2024_sunday_start() {
    let grid = build_month_grid(
      2024,
      1,
      Weekday::Sun
    )
    .expect("grid");
    assert_eq!(
      grid.leading_padding(),
      1
    );
    assert_eq!(grid.date_count(), 31);
    assert_eq!(
      grid.cells.len(),
      GRID_CELLS
    );
    assert_eq!(
      grid.cells[1],
      DayCell::Date(CellDate::new(
        2024, 1, 1
      ))
    );
  }

  #[test]
  fn february_2024_sunday_start() {
    let grid = build_month_grid(
      2024,
      2,
      Weekday::Sun
    )
    .expect("grid");
    assert_eq!(
      grid.leading_padding(),
      4
    );
    assert_eq!(grid.date_count(), 29);
    assert_eq!(
      grid.cells.len(),
      GRID_CELLS
    );
  }

  #[test]
  fn sunday_first_monday_start_pads_six(
  ) {
    let grid = build_month_grid(
      2026,
      2,
      Weekday::Mon
    )
    .expect("grid");
    assert_eq!(
      grid.leading_padding(),
      6
    );
    assert_eq!(grid.date_count(), 28);
  }

  #[test]
  fn grid_is_always_six_rows() {
    for year in [2023, 2024] {
      for month in 1..=12 {
        let grid = build_month_grid(
          year,
          month,
          Weekday::Mon
        )
        .expect("grid");
        assert_eq!(
          grid.cells.len(),
          GRID_CELLS
        );
        assert_eq!(
          grid.rows().count(),
          GRID_ROWS
        );
        assert_eq!(
          grid.date_count() as u32,
          days_in_month(year, month)
            .expect("length")
        );
      }
    }
  }

  #[test]
  fn first_date_follows_leading_offset(
  ) {
    for month in 1..=12 {
      let first =
        first_of_month(2024, month)
          .expect("first");
      let grid = build_month_grid(
        2024,
        month,
        Weekday::Sun
      )
      .expect("grid");
      assert_eq!(
        grid.leading_padding() as u32,
        leading_offset(
          first.weekday(),
          Weekday::Sun
        )
      );
    }
  }

  #[test]
  fn label_order_monday_first() {
    assert_eq!(
      label_order(Weekday::Mon),
      [1, 2, 3, 4, 5, 6, 0]
    );
    assert_eq!(
      label_order(Weekday::Sun),
      [0, 1, 2, 3, 4, 5, 6]
    );
  }

  #[test]
  fn cell_date_hits_midnight() {
    let stamp =
      CellDate::new(2024, 3, 15)
        .to_datetime()
        .expect("valid date");
    assert_eq!(
      stamp.to_string(),
      "2024-03-15 00:00:00"
    );
  }

  #[test]
  fn invalid_cell_date_is_none() {
    assert!(
      CellDate::new(2023, 2, 29)
        .to_datetime()
        .is_none()
    );
  }

  #[test]
  fn month_shift_wraps_years() {
    assert_eq!(
      shift_months(2024, 12, 1),
      Some((2025, 1))
    );
    assert_eq!(
      shift_months(2024, 1, -1),
      Some((2023, 12))
    );
    assert_eq!(
      shift_months(2024, 1, -13),
      Some((2022, 12))
    );
  }

  #[test]
  fn extreme_years_shift_to_none() {
    assert_eq!(
      shift_months(i32::MAX, 12, 1),
      None
    );
    assert_eq!(
      shift_months(i32::MIN, 1, -1),
      None
    );
    assert!(
      days_in_month(i32::MAX, 12)
        .is_none()
    );
  }

  #[test]
  fn identical_inputs_build_identical_grids(
  ) {
    let once = build_month_grid(
      2024,
      7,
      Weekday::Sun
    );
    let twice = build_month_grid(
      2024,
      7,
      Weekday::Sun
    );
    assert_eq!(once, twice);
  }
}
