use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::CalendarConfig;
use crate::grid::CellDate;
use crate::hooks::CalendarHooks;
use crate::locale::{LocaleError, LocaleTable};
use crate::render::Renderer;
use crate::view::{ContainerKind, NodeId, Role, ViewTree};

#[derive(Debug, Error)]
pub enum MountError {
    #[error("container not found: {0}")]
    ContainerNotFound(String),
    #[error("year range inverted: {min}..{max}")]
    YearRangeInverted { min: i32, max: i32 },
    #[error("year {year} outside {min}..{max}")]
    CurrentYearOutOfRange { year: i32, min: i32, max: i32 },
    #[error(transparent)]
    Locale(#[from] LocaleError),
}

pub struct Calendar {
    page: ViewTree,
    root: NodeId,
    header: NodeId,
    months: Option<NodeId>,
    renderer: Renderer,
    hooks: CalendarHooks,
    min_year: i32,
    max_year: i32,
    current_year: i32,
}

impl Calendar {
    #[instrument(skip(page, locales, hooks))]
    pub fn mount(
        mut page: ViewTree,
        config: &CalendarConfig,
        locales: &LocaleTable,
        mut hooks: CalendarHooks,
    ) -> Result<Self, MountError> {
        let root = page.by_element_id(&config.container_id).ok_or_else(|| {
            MountError::ContainerNotFound(config.container_id.clone())
        })?;
        if config.min_year > config.max_year {
            return Err(MountError::YearRangeInverted {
                min: config.min_year,
                max: config.max_year,
            });
        }
        if !(config.min_year..=config.max_year).contains(&config.current_year) {
            return Err(MountError::CurrentYearOutOfRange {
                year: config.current_year,
                min: config.min_year,
                max: config.max_year,
            });
        }
        let renderer =
            Renderer::new(locales, &config.language, config.week_start_day())?;

        page.remove_children(root);
        if let Some(entry) = page.get_mut(root) {
            entry.role = Role::Container(ContainerKind::Widget);
        }
        let header = renderer.render_year_header(
            &mut page,
            root,
            config.min_year,
            config.max_year,
            config.current_year,
        );
        let months = renderer.render_months(
            &mut page,
            root,
            config.current_year,
            &mut hooks,
        );
        if months.is_none() {
            warn!(year = config.current_year, "month grids failed to build");
        }
        info!(
            container = %config.container_id,
            year = config.current_year,
            "calendar mounted"
        );

        Ok(Self {
            page,
            root,
            header,
            months,
            renderer,
            hooks,
            min_year: config.min_year,
            max_year: config.max_year,
            current_year: config.current_year,
        })
    }

    #[instrument(skip(self))]
    pub fn click(&mut self, target: NodeId) {
        if !self.page.is_within(self.root, target) {
            debug!(%target, "ignoring click outside the widget");
            return;
        }
        let Some((node, role)) = self.delegated(target) else {
            debug!(%target, "click resolved to nothing interactive");
            return;
        };
        match role {
            Role::DateCell { date } => self.day_clicked(node, date),
            Role::YearMarker { year } => self.year_clicked(year),
            _ => {}
        }
    }

    // the one delegated handler: walk from the target up to the widget
    // root and stop at the nearest interactive role
    fn delegated(&self, target: NodeId) -> Option<(NodeId, Role)> {
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            if let Some(entry) = self.page.get(node) {
                match entry.role {
                    Role::DateCell { .. } | Role::YearMarker { .. } => {
                        return Some((node, entry.role));
                    }
                    _ => {}
                }
            }
            if node == self.root {
                return None;
            }
            cursor = self.page.parent(node);
        }
        None
    }

    fn day_clicked(&mut self, node: NodeId, date: CellDate) {
        let Some(stamp) = date.to_datetime() else {
            warn!(?date, "date cell holds no representable date");
            return;
        };
        debug!(%stamp, "day clicked");
        if let Some(entry) = self.page.get_mut(node) {
            self.hooks.fire_day_click(&mut entry.presentation, stamp);
        }
    }

    fn year_clicked(&mut self, year: i32) {
        let previous = self.current_year;
        // no equality guard: reselecting the current year rebuilds the
        // months and refires with previous == year
        self.current_year = year;
        self.move_selected_mark(year);
        self.rebuild_months();
        self.hooks.fire_year_changed(previous, year);
        info!(previous, year, "year selected");
    }

    fn move_selected_mark(&mut self, year: i32) {
        for marker in self.page.children(self.header).to_vec() {
            if let Some(entry) = self.page.get_mut(marker) {
                entry.presentation.selected =
                    entry.role == (Role::YearMarker { year });
            }
        }
    }

    fn rebuild_months(&mut self) {
        if let Some(months) = self.months.take() {
            self.page.remove_subtree(months);
        }
        self.months = self.renderer.render_months(
            &mut self.page,
            self.root,
            self.current_year,
            &mut self.hooks,
        );
        if self.months.is_none() {
            warn!(year = self.current_year, "month grids failed to build");
        }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn year_range(&self) -> (i32, i32) {
        (self.min_year, self.max_year)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn page(&self) -> &ViewTree {
        &self.page
    }

    pub fn date_cell(&self, date: CellDate) -> Option<NodeId> {
        self.page.descendants(self.root).into_iter().find(|node| {
            self.page.get(*node).map(|entry| entry.role)
                == Some(Role::DateCell { date })
        })
    }

    pub fn year_marker(&self, year: i32) -> Option<NodeId> {
        self.page.children(self.header).iter().copied().find(|node| {
            self.page.get(*node).map(|entry| entry.role)
                == Some(Role::YearMarker { year })
        })
    }
}
