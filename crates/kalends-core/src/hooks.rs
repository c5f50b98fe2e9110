use chrono::NaiveDateTime;

use crate::view::Presentation;

pub type RenderDayHook = Box<dyn FnMut(&mut Presentation, NaiveDateTime)>;
pub type RenderDayLabelHook = Box<dyn FnMut(&mut Presentation, u32)>;
pub type DayClickHook = Box<dyn FnMut(&mut Presentation, NaiveDateTime)>;
pub type YearChangedHook = Box<dyn FnMut(i32, i32)>;

#[derive(Default)]
pub struct CalendarHooks {
    pub on_render_day: Option<RenderDayHook>,
    pub on_render_day_label: Option<RenderDayLabelHook>,
    pub on_day_click: Option<DayClickHook>,
    pub on_year_changed: Option<YearChangedHook>,
}

impl CalendarHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fire_render_day(
        &mut self,
        presentation: &mut Presentation,
        stamp: NaiveDateTime,
    ) {
        if let Some(hook) = self.on_render_day.as_mut() {
            hook(presentation, stamp);
        }
    }

    pub fn fire_render_day_label(
        &mut self,
        presentation: &mut Presentation,
        weekday: u32,
    ) {
        if let Some(hook) = self.on_render_day_label.as_mut() {
            hook(presentation, weekday);
        }
    }

    pub fn fire_day_click(
        &mut self,
        presentation: &mut Presentation,
        stamp: NaiveDateTime,
    ) {
        if let Some(hook) = self.on_day_click.as_mut() {
            hook(presentation, stamp);
        }
    }

    pub fn fire_year_changed(&mut self, previous: i32, current: i32) {
        if let Some(hook) = self.on_year_changed.as_mut() {
            hook(previous, current);
        }
    }
}
