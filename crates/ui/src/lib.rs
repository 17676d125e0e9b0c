//! ratatui-based UI.

use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use atelier_application::{AppContext, LoadState};
use atelier_core::Style as DesignStyle;
use atelier_core::{Category, CollectionTag, Project, Theme};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Clear, HighlightSpacing, List, ListItem, ListState, Paragraph, Wrap,
};
use ratatui_image::picker::Picker;
use ratatui_image::protocol::Protocol as ImageProtocol;
use ratatui_image::{Image as ImageWidget, Resize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiExit {
    Quit,
    Refresh,
}

#[derive(Debug, Clone)]
pub struct UiOutcome {
    pub ctx: AppContext,
    pub exit: UiExit,
}

pub struct Ui {
    ctx: AppContext,
    filters_panel: FiltersPanel,
    collections_panel: CollectionsPanel,
    detail: DetailView,
    lightbox_view: LightboxView,
    image_picker: Picker,
}

impl Ui {
    pub fn new(mut ctx: AppContext) -> Self {
        ctx.settings.normalize();
        Self {
            ctx,
            filters_panel: FiltersPanel::default(),
            collections_panel: CollectionsPanel::default(),
            detail: DetailView::default(),
            lightbox_view: LightboxView::default(),
            image_picker: Picker::halfblocks(),
        }
    }

    pub fn run(&mut self) -> anyhow::Result<UiOutcome> {
        let mut terminal = setup_terminal()?;
        self.image_picker = Picker::from_query_stdio().unwrap_or_else(|_| Picker::halfblocks());
        self.image_picker
            .set_background_color(image::Rgba([255u8, 255u8, 255u8, 255u8]));
        terminal.clear().ok();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.event_loop(&mut terminal)
        }));
        let restore_result = restore_terminal(&mut terminal);

        match (result, restore_result) {
            (Ok(Ok(outcome)), Ok(())) => Ok(outcome),
            (Ok(Ok(_)), Err(err)) => Err(err),
            (Ok(Err(err)), Ok(())) => Err(err),
            (Ok(_), Err(err)) => Err(err),
            (Err(panic), Ok(())) => Err(anyhow::anyhow!(panic_to_string(panic))),
            (Err(panic), Err(err)) => Err(anyhow::anyhow!(
                "{}\n(additionally failed to restore terminal: {err})",
                panic_to_string(panic)
            )),
        }
    }

    fn accent_color(&self) -> Color {
        match self.ctx.settings.theme {
            Theme::Light => Color::Blue,
            Theme::Dark => Color::Yellow,
        }
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<UiOutcome> {
        let tick_rate = Duration::from_millis(250);
        let mut needs_redraw = true;

        loop {
            if needs_redraw {
                terminal.draw(|frame| self.draw(frame.area(), frame))?;
                needs_redraw = false;
            }

            if !event::poll(tick_rate)? {
                continue;
            }

            match event::read()? {
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }

                    needs_redraw = true;

                    if self.ctx.lightbox.is_open() {
                        if let Some(exit) = self.handle_lightbox_key(key)? {
                            return Ok(UiOutcome {
                                ctx: self.ctx.clone(),
                                exit,
                            });
                        }
                    } else if self.ctx.active.is_some() {
                        if let Some(exit) = self.handle_detail_key(key)? {
                            return Ok(UiOutcome {
                                ctx: self.ctx.clone(),
                                exit,
                            });
                        }
                    } else if self.filters_panel.open {
                        if let Some(exit) = self.handle_filters_panel_key(key)? {
                            return Ok(UiOutcome {
                                ctx: self.ctx.clone(),
                                exit,
                            });
                        }
                    } else if self.collections_panel.open {
                        if let Some(exit) = self.handle_collections_panel_key(key)? {
                            return Ok(UiOutcome {
                                ctx: self.ctx.clone(),
                                exit,
                            });
                        }
                    } else if let Some(exit) = self.handle_main_key(key)? {
                        return Ok(UiOutcome {
                            ctx: self.ctx.clone(),
                            exit,
                        });
                    }
                }
                _ => {}
            }
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) -> anyhow::Result<Option<UiExit>> {
        match key.code {
            KeyCode::Esc => Ok(Some(UiExit::Quit)),
            KeyCode::Char('/') => {
                self.open_filters_panel();
                Ok(None)
            }
            KeyCode::Char('c') => {
                self.open_collections_panel();
                Ok(None)
            }
            KeyCode::Char('r') => Ok(Some(UiExit::Refresh)),
            KeyCode::Char('t') => {
                self.ctx.settings.cycle_theme();
                Ok(None)
            }
            KeyCode::Char('d') => {
                self.ctx.settings.cycle_density();
                Ok(None)
            }
            KeyCode::Enter => {
                if let Some(idx) = self.selected_visible_index() {
                    self.open_detail(idx);
                }
                Ok(None)
            }
            KeyCode::Down => {
                self.select_next_visible();
                Ok(None)
            }
            KeyCode::Up => {
                self.select_prev_visible();
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn open_detail(&mut self, idx: usize) {
        self.ctx.select_project(idx);
        self.detail = DetailView::default();
        self.lightbox_view.invalidate();
    }

    fn open_filters_panel(&mut self) {
        self.filters_panel.open = true;
        self.filters_panel.focus = FilterFocus::Query;
        self.filters_panel.category_cursor = 0;
        self.filters_panel.style_cursor = 0;
        self.filters_panel.snapshot = Some(FilterSnapshot {
            query: self.ctx.query.clone(),
            categories: self.ctx.categories.clone(),
            styles: self.ctx.styles.clone(),
            selected_id: self
                .ctx
                .projects
                .get(self.ctx.selected)
                .map(|p| p.id.clone()),
        });
        self.collections_panel.open = false;
        self.normalize_selection_to_visible();
    }

    fn close_filters_panel(&mut self) {
        self.filters_panel.open = false;
        self.filters_panel.snapshot = None;
    }

    /// Esc restores the criteria captured when the panel opened.
    fn cancel_filters_panel(&mut self) {
        if let Some(snapshot) = self.filters_panel.snapshot.take() {
            self.ctx.query = snapshot.query;
            self.ctx.categories = snapshot.categories;
            self.ctx.styles = snapshot.styles;

            if let Some(id) = snapshot.selected_id
                && let Some(idx) = self.ctx.projects.iter().position(|p| p.id == id)
            {
                self.ctx.selected = idx;
            }
            self.normalize_selection_to_visible();
        }
        self.filters_panel.open = false;
    }

    fn handle_filters_panel_key(&mut self, key: KeyEvent) -> anyhow::Result<Option<UiExit>> {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && let KeyCode::Char('u') = key.code
        {
            self.ctx.clear_filters();
            self.normalize_selection_to_visible();
            return Ok(None);
        }

        match key.code {
            KeyCode::Esc => {
                self.cancel_filters_panel();
                Ok(None)
            }
            KeyCode::Enter => {
                self.close_filters_panel();
                Ok(None)
            }
            KeyCode::Tab => {
                self.filters_panel.focus = self.filters_panel.focus.next();
                Ok(None)
            }
            KeyCode::BackTab => {
                self.filters_panel.focus = self.filters_panel.focus.prev();
                Ok(None)
            }
            KeyCode::Up => {
                match self.filters_panel.focus {
                    FilterFocus::Query => {}
                    FilterFocus::Categories => {
                        self.filters_panel.category_cursor =
                            self.filters_panel.category_cursor.saturating_sub(1);
                    }
                    FilterFocus::Styles => {
                        self.filters_panel.style_cursor =
                            self.filters_panel.style_cursor.saturating_sub(1);
                    }
                }
                Ok(None)
            }
            KeyCode::Down => {
                match self.filters_panel.focus {
                    FilterFocus::Query => {}
                    FilterFocus::Categories => {
                        self.filters_panel.category_cursor = self
                            .filters_panel
                            .category_cursor
                            .saturating_add(1)
                            .min(Category::ALL.len() - 1);
                    }
                    FilterFocus::Styles => {
                        self.filters_panel.style_cursor = self
                            .filters_panel
                            .style_cursor
                            .saturating_add(1)
                            .min(DesignStyle::ALL.len() - 1);
                    }
                }
                Ok(None)
            }
            KeyCode::Char(' ') => {
                match self.filters_panel.focus {
                    FilterFocus::Query => {
                        self.ctx.push_query_char(' ');
                    }
                    FilterFocus::Categories => {
                        let category = Category::ALL[self.filters_panel.category_cursor];
                        self.ctx.toggle_category(category);
                    }
                    FilterFocus::Styles => {
                        let style = DesignStyle::ALL[self.filters_panel.style_cursor];
                        self.ctx.toggle_style(style);
                    }
                }
                self.normalize_selection_to_visible();
                Ok(None)
            }
            KeyCode::Backspace => {
                if self.filters_panel.focus == FilterFocus::Query {
                    self.ctx.pop_query_char();
                    self.normalize_selection_to_visible();
                }
                Ok(None)
            }
            KeyCode::Char(ch) => {
                if self.filters_panel.focus == FilterFocus::Query && !ch.is_control() {
                    self.ctx.push_query_char(ch);
                    self.normalize_selection_to_visible();
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn open_collections_panel(&mut self) {
        self.collections_panel.open = true;
        self.collections_panel.focus = CollectionsFocus::Buckets;
        self.collections_panel.category_cursor = 0;
        self.collections_panel.grid_cursor = 0;
        self.filters_panel.open = false;
    }

    /// The bucket contents the grid shows, narrowed and sorted.
    fn bucket_entries(&self) -> Vec<&Project> {
        let browse = &self.ctx.collection;
        let bucket = atelier_engine::bucket(&self.ctx.projects, browse.tag, browse.category);
        atelier_engine::sorted(&bucket, browse.sort)
    }

    fn handle_collections_panel_key(&mut self, key: KeyEvent) -> anyhow::Result<Option<UiExit>> {
        let columns = self.ctx.settings.grid_columns.columns();

        match key.code {
            KeyCode::Esc => {
                self.collections_panel.open = false;
                Ok(None)
            }
            KeyCode::Tab => {
                self.collections_panel.focus = self.collections_panel.focus.next();
                Ok(None)
            }
            KeyCode::BackTab => {
                self.collections_panel.focus = self.collections_panel.focus.prev();
                Ok(None)
            }
            KeyCode::Char('s') => {
                self.ctx.collection.cycle_sort();
                Ok(None)
            }
            KeyCode::Char('d') => {
                self.ctx.settings.cycle_density();
                self.collections_panel.grid_cursor = 0;
                Ok(None)
            }
            KeyCode::Up => {
                match self.collections_panel.focus {
                    CollectionsFocus::Buckets => {
                        self.select_bucket_offset(-1);
                    }
                    CollectionsFocus::Categories => {
                        self.collections_panel.category_cursor =
                            self.collections_panel.category_cursor.saturating_sub(1);
                    }
                    CollectionsFocus::Grid => {
                        self.collections_panel.grid_cursor =
                            self.collections_panel.grid_cursor.saturating_sub(columns);
                    }
                }
                Ok(None)
            }
            KeyCode::Down => {
                match self.collections_panel.focus {
                    CollectionsFocus::Buckets => {
                        self.select_bucket_offset(1);
                    }
                    CollectionsFocus::Categories => {
                        // Slot 0 is "All"; the categories follow.
                        self.collections_panel.category_cursor = self
                            .collections_panel
                            .category_cursor
                            .saturating_add(1)
                            .min(Category::ALL.len());
                    }
                    CollectionsFocus::Grid => {
                        let len = self.bucket_entries().len();
                        if len > 0 {
                            self.collections_panel.grid_cursor = self
                                .collections_panel
                                .grid_cursor
                                .saturating_add(columns)
                                .min(len - 1);
                        }
                    }
                }
                Ok(None)
            }
            KeyCode::Left => {
                if self.collections_panel.focus == CollectionsFocus::Grid {
                    self.collections_panel.grid_cursor =
                        self.collections_panel.grid_cursor.saturating_sub(1);
                }
                Ok(None)
            }
            KeyCode::Right => {
                if self.collections_panel.focus == CollectionsFocus::Grid {
                    let len = self.bucket_entries().len();
                    if len > 0 {
                        self.collections_panel.grid_cursor = self
                            .collections_panel
                            .grid_cursor
                            .saturating_add(1)
                            .min(len - 1);
                    }
                }
                Ok(None)
            }
            KeyCode::Char(' ') => {
                if self.collections_panel.focus == CollectionsFocus::Categories {
                    let category = if self.collections_panel.category_cursor == 0 {
                        None
                    } else {
                        Category::ALL
                            .get(self.collections_panel.category_cursor - 1)
                            .copied()
                    };
                    self.ctx.collection.set_category(category);
                    self.collections_panel.grid_cursor = 0;
                }
                Ok(None)
            }
            KeyCode::Enter => {
                if self.collections_panel.focus == CollectionsFocus::Grid {
                    let id = self
                        .bucket_entries()
                        .get(self.collections_panel.grid_cursor)
                        .map(|p| p.id.clone());
                    if let Some(id) = id
                        && let Some(idx) = self.ctx.projects.iter().position(|p| p.id == id)
                    {
                        self.collections_panel.open = false;
                        self.open_detail(idx);
                    }
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn select_bucket_offset(&mut self, offset: isize) {
        let tags = CollectionTag::ALL;
        let pos = tags
            .iter()
            .position(|t| *t == self.ctx.collection.tag)
            .unwrap_or(0);
        let next = pos.saturating_add_signed(offset).min(tags.len() - 1);
        if next != pos {
            self.ctx.collection.select_tag(tags[next]);
            self.collections_panel.category_cursor = 0;
            self.collections_panel.grid_cursor = 0;
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> anyhow::Result<Option<UiExit>> {
        let images = self
            .ctx
            .active_project()
            .map(|p| p.images.len())
            .unwrap_or(0);

        match key.code {
            KeyCode::Esc => {
                self.ctx.close_detail();
                self.lightbox_view.invalidate();
                Ok(None)
            }
            KeyCode::Left => {
                self.detail.thumb = self.detail.thumb.saturating_sub(1);
                Ok(None)
            }
            KeyCode::Right => {
                if images > 0 {
                    self.detail.thumb = self.detail.thumb.saturating_add(1).min(images - 1);
                }
                Ok(None)
            }
            KeyCode::Up => {
                self.detail.scroll = self.detail.scroll.saturating_sub(1);
                Ok(None)
            }
            KeyCode::Down => {
                self.detail.scroll = self.detail.scroll.saturating_add(1);
                Ok(None)
            }
            KeyCode::Enter => {
                // A gallery with no images refuses to open; nothing to show.
                if self.ctx.open_lightbox(self.detail.thumb).is_ok() {
                    self.lightbox_view.invalidate();
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn handle_lightbox_key(&mut self, key: KeyEvent) -> anyhow::Result<Option<UiExit>> {
        match key.code {
            KeyCode::Esc => {
                self.ctx.lightbox.close();
                self.lightbox_view.invalidate();
                Ok(None)
            }
            KeyCode::Left => {
                self.ctx.lightbox.previous();
                Ok(None)
            }
            KeyCode::Right => {
                self.ctx.lightbox.next();
                Ok(None)
            }
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                if let Some(target) = ch.to_digit(10).and_then(|d| (d as usize).checked_sub(1)) {
                    // Out-of-range digits leave the position alone.
                    let _ = self.ctx.lightbox.jump_to(target);
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn visible_indices(&self) -> Vec<usize> {
        self.ctx.visible_indices()
    }

    fn normalize_selection_to_visible(&mut self) {
        if self.ctx.projects.is_empty() {
            self.ctx.selected = 0;
            return;
        }

        if self.ctx.selected >= self.ctx.projects.len() {
            self.ctx.selected = 0;
        }

        let visible = self.visible_indices();
        if visible.is_empty() {
            self.ctx.selected = 0;
            return;
        }

        if !visible.contains(&self.ctx.selected) {
            self.ctx.selected = visible[0];
        }
    }

    fn selected_visible_index(&self) -> Option<usize> {
        let visible = self.visible_indices();
        if visible.is_empty() {
            return None;
        }

        let selected = self
            .ctx
            .selected
            .min(self.ctx.projects.len().saturating_sub(1));
        if visible.contains(&selected) {
            Some(selected)
        } else {
            Some(visible[0])
        }
    }

    fn select_next_visible(&mut self) {
        let visible = self.visible_indices();
        if visible.is_empty() {
            return;
        }

        let Some(pos) = visible.iter().position(|idx| *idx == self.ctx.selected) else {
            self.ctx.selected = visible[0];
            return;
        };
        if pos + 1 < visible.len() {
            self.ctx.selected = visible[pos + 1];
        }
    }

    fn select_prev_visible(&mut self) {
        let visible = self.visible_indices();
        if visible.is_empty() {
            return;
        }

        let Some(pos) = visible.iter().position(|idx| *idx == self.ctx.selected) else {
            self.ctx.selected = visible[0];
            return;
        };
        if pos > 0 {
            self.ctx.selected = visible[pos - 1];
        }
    }

    fn main_header_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(vec![
            Span::styled("Atelier", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" — portfolio"),
        ])];

        if let Some(status_line) = self.active_filter_status_line() {
            lines.push(status_line);
        } else if self.ctx.load.is_ready() {
            // The idle header doubles as the featured strip.
            let featured = atelier_engine::featured(&self.ctx.projects, 6);
            if !featured.is_empty() {
                let titles: Vec<&str> = featured.iter().map(|p| p.title.as_str()).collect();
                lines.push(Line::styled(
                    format!("Featured: {}", titles.join(" · ")),
                    Style::default().fg(Color::Gray),
                ));
            }
        }

        lines
    }

    fn active_filter_status_line(&self) -> Option<Line<'static>> {
        if self.filters_panel.open {
            return None;
        }

        let mut parts: Vec<Span<'static>> = Vec::new();
        let style = Style::default().fg(Color::Cyan);

        let query = self.ctx.query.trim();
        if !query.is_empty() {
            parts.push(Span::styled(format!("search: {query}"), style));
        }

        if !self.ctx.categories.is_empty() {
            let labels: Vec<&str> = self.ctx.categories.iter().map(|c| c.label()).collect();
            parts.push(Span::styled(
                format!("categories: {}", labels.join(", ")),
                style,
            ));
        }

        if !self.ctx.styles.is_empty() {
            let labels: Vec<&str> = self.ctx.styles.iter().map(|s| s.label()).collect();
            parts.push(Span::styled(
                format!("styles: {}", labels.join(", ")),
                style,
            ));
        }

        if parts.is_empty() {
            None
        } else {
            let mut spans = Vec::with_capacity(parts.len() * 2 - 1);
            for (idx, part) in parts.into_iter().enumerate() {
                if idx > 0 {
                    spans.push(Span::raw("  |  "));
                }
                spans.push(part);
            }
            Some(Line::from(spans))
        }
    }

    fn main_footer_lines(&self) -> Vec<Line<'static>> {
        if self.filters_panel.open {
            return vec![Line::from(vec![
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" cancel  "),
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" apply"),
            ])];
        }

        if self.collections_panel.open {
            return vec![Line::from(vec![
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" close  "),
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" open project"),
            ])];
        }

        vec![
            Line::from(vec![
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" quit  "),
                Span::styled("↑/↓", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" move  "),
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" open"),
            ]),
            Line::from(vec![
                Span::styled("/", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" filters  "),
                Span::styled("c", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" collections  "),
                Span::styled("r", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" refresh  "),
                Span::styled("t", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" theme  "),
                Span::styled("d", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" columns"),
            ]),
        ]
    }

    fn draw(&mut self, area: Rect, frame: &mut ratatui::Frame) {
        frame.render_widget(Clear, area);
        if self.ctx.active.is_some() {
            self.draw_detail(area, frame);
            if self.ctx.lightbox.is_open() {
                self.draw_lightbox(area, frame);
            }
            return;
        }

        self.normalize_selection_to_visible();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new(Text::from(self.main_header_lines()))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(title, layout[0]);

        let body_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(layout[1]);

        self.draw_catalog_list(frame, body_layout[0]);
        frame.render_widget(self.draw_catalog_details(), body_layout[1]);

        let footer = Paragraph::new(Text::from(self.main_footer_lines()))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(footer, layout[2]);

        if self.filters_panel.open {
            self.draw_filters_panel(area, frame);
        }

        if self.collections_panel.open {
            self.draw_collections_panel(area, frame);
        }
    }

    fn draw_catalog_list(&self, frame: &mut ratatui::Frame, area: Rect) {
        let visible = self.visible_indices();
        let title = if self.ctx.has_filters() {
            format!(
                "Projects — {}/{} matches",
                visible.len(),
                self.ctx.projects.len()
            )
        } else {
            "Projects".to_string()
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        match &self.ctx.load {
            LoadState::Loading => {
                let paragraph = Paragraph::new(Text::from(vec![Line::raw("Loading catalog...")]))
                    .block(block)
                    .wrap(Wrap { trim: true });
                frame.render_widget(paragraph, area);
                return;
            }
            LoadState::Failed { reason } => {
                let lines = vec![
                    Line::styled(
                        "Couldn't load the catalog.",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Line::raw(""),
                    Line::raw(reason.clone()),
                    Line::raw(""),
                    Line::raw("Press r to try again."),
                ];
                let paragraph = Paragraph::new(Text::from(lines))
                    .block(block)
                    .wrap(Wrap { trim: true });
                frame.render_widget(paragraph, area);
                return;
            }
            LoadState::Ready => {}
        }

        if self.ctx.projects.is_empty() {
            let paragraph = Paragraph::new(Text::from(vec![Line::raw("No projects yet.")]))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        if visible.is_empty() {
            let mut lines = Vec::new();
            lines.push(Line::raw("No matches."));
            let query = self.ctx.query.trim();
            if !query.is_empty() {
                lines.push(Line::raw(""));
                lines.push(Line::raw(format!("Search: {query}")));
                lines.push(Line::raw("Tip: press / to edit filters, Ctrl+u to clear."));
            }
            let paragraph = Paragraph::new(Text::from(lines))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let max_title_width = area.width.saturating_sub(6) as usize;
        let items: Vec<ListItem> = visible
            .iter()
            .filter_map(|idx| self.ctx.projects.get(*idx))
            .map(|project| {
                let label = if project.featured {
                    format!("★ {}", project.title)
                } else {
                    format!("  {}", project.title)
                };
                let wrapped = wrap_text(&label, max_title_width.max(8));
                let lines = wrapped.into_iter().map(Line::raw).collect::<Vec<_>>();
                ListItem::new(Text::from(lines))
            })
            .collect();

        let highlight_style = Style::default()
            .fg(Color::Black)
            .bg(self.accent_color())
            .add_modifier(Modifier::BOLD);

        let list = List::new(items)
            .block(block)
            .highlight_style(highlight_style)
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);

        let mut state = ListState::default();
        let visible_pos = visible.iter().position(|idx| *idx == self.ctx.selected);
        state.select(visible_pos);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_catalog_details(&self) -> Paragraph<'static> {
        let mut lines = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("Theme: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(self.ctx.settings.theme.to_string()),
            Span::raw("  "),
            Span::styled("Columns: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(self.ctx.settings.grid_columns.to_string()),
            Span::raw("  "),
            Span::styled("API: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(self.ctx.settings.api_url.clone()),
        ]));
        lines.push(Line::raw(""));

        if let Some(project) = self.ctx.projects.get(self.ctx.selected) {
            lines.push(Line::from(vec![
                Span::styled("Selected: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(project.title.clone()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Category: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(project.category.label()),
                Span::raw("  "),
                Span::styled("Style: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(project.style.label()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Location: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(project.location.clone()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Area: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(project.area.clone()),
                Span::raw("  "),
                Span::styled("Year: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(project.year.clone()),
            ]));

            let collection = project
                .collection
                .map(|tag| tag.label().to_string())
                .unwrap_or_else(|| "-".to_string());
            lines.push(Line::from(vec![
                Span::styled(
                    "Collection: ",
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(collection),
                Span::raw("  "),
                Span::styled("Images: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(project.images.len().to_string()),
            ]));
            lines.push(Line::raw(""));
            lines.push(Line::raw(project.description.clone()));
            lines.push(Line::raw(""));

            let related = atelier_engine::related(&self.ctx.projects, project, 3);
            if !related.is_empty() {
                lines.push(Line::styled(
                    "Related",
                    Style::default().add_modifier(Modifier::BOLD),
                ));
                for other in related {
                    lines.push(Line::raw(format!(
                        "- {} ({})",
                        other.title,
                        other.category.label()
                    )));
                }
            }
        } else {
            lines.push(Line::raw("No selection."));
        }

        Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: true })
    }

    fn draw_filters_panel(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(90, 78, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title(Span::styled(
            "Filters",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(block.clone(), popup_area);

        let inner = block.inner(popup_area);
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(4),
            ])
            .split(inner);

        let header = Paragraph::new(Text::from(self.filters_summary_lines()))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left);
        frame.render_widget(header, sections[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(sections[1]);

        self.draw_filter_category_list(body[0], frame);
        self.draw_filter_style_list(body[1], frame);

        let help_lines = vec![
            Line::from(vec![
                Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" focus  "),
                Span::styled("↑/↓", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" move  "),
                Span::styled("Space", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" toggle  "),
                Span::styled("Ctrl+u", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" clear all"),
            ]),
            Line::from(vec![
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" cancel  "),
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" apply"),
            ]),
        ];
        let help = Paragraph::new(Text::from(help_lines))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left);
        frame.render_widget(help, sections[2]);
    }

    fn filters_summary_lines(&self) -> Vec<Line<'static>> {
        let focus = self.filters_panel.focus;
        let base_label_style = Style::default().add_modifier(Modifier::BOLD);
        let focus_style = Style::default()
            .fg(self.accent_color())
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

        let query_label_style = if focus == FilterFocus::Query {
            focus_style
        } else {
            base_label_style
        };
        let query_value_style = if focus == FilterFocus::Query {
            focus_style
        } else {
            Style::default()
        };

        let categories = if self.ctx.categories.is_empty() {
            "(any)".to_string()
        } else {
            self.ctx
                .categories
                .iter()
                .map(|c| c.label())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let styles = if self.ctx.styles.is_empty() {
            "(any)".to_string()
        } else {
            self.ctx
                .styles
                .iter()
                .map(|s| s.label())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let visible = self.visible_indices().len();

        vec![
            Line::from(vec![
                Span::styled("Search: ", query_label_style),
                Span::styled(self.ctx.query.clone(), query_value_style),
            ]),
            Line::from(vec![
                Span::styled("Categories: ", base_label_style),
                Span::raw(categories),
            ]),
            Line::from(vec![
                Span::styled("Styles: ", base_label_style),
                Span::raw(styles),
            ]),
            Line::from(vec![
                Span::styled("Matches: ", base_label_style),
                Span::raw(format!("{visible}/{}", self.ctx.projects.len())),
            ]),
        ]
    }

    /// Match count a category would have, holding the other two dimensions.
    fn category_count(&self, category: Category) -> usize {
        atelier_engine::filter(
            &self.ctx.projects,
            &self.ctx.query,
            &[category],
            &self.ctx.styles,
        )
        .len()
    }

    fn style_count(&self, style: DesignStyle) -> usize {
        atelier_engine::filter(
            &self.ctx.projects,
            &self.ctx.query,
            &self.ctx.categories,
            &[style],
        )
        .len()
    }

    fn draw_filter_category_list(&self, area: Rect, frame: &mut ratatui::Frame) {
        let focus = self.filters_panel.focus == FilterFocus::Categories;
        let title_style = if focus {
            Style::default()
                .fg(self.accent_color())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default()
        };

        let items: Vec<ListItem> = Category::ALL
            .iter()
            .map(|category| {
                let selected = self.ctx.categories.contains(category);
                let prefix = if selected { "[x]" } else { "[ ]" };
                let count = self.category_count(*category);
                ListItem::new(Line::raw(format!(
                    "{prefix} {} ({count})",
                    category.label()
                )))
            })
            .collect();

        let focused_list_style = Style::default()
            .fg(Color::Black)
            .bg(self.accent_color())
            .add_modifier(Modifier::BOLD);
        let unfocused_list_style = Style::default().fg(Color::White).bg(Color::Gray);

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(if focus {
                        Style::default().fg(self.accent_color())
                    } else {
                        Style::default()
                    })
                    .title(Span::styled("Categories", title_style)),
            )
            .highlight_style(if focus {
                focused_list_style
            } else {
                unfocused_list_style
            })
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);
        let mut state = ListState::default();
        state.select(Some(
            self.filters_panel
                .category_cursor
                .min(Category::ALL.len() - 1),
        ));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_filter_style_list(&self, area: Rect, frame: &mut ratatui::Frame) {
        let focus = self.filters_panel.focus == FilterFocus::Styles;
        let title_style = if focus {
            Style::default()
                .fg(self.accent_color())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default()
        };

        let items: Vec<ListItem> = DesignStyle::ALL
            .iter()
            .map(|style| {
                let selected = self.ctx.styles.contains(style);
                let prefix = if selected { "[x]" } else { "[ ]" };
                let count = self.style_count(*style);
                ListItem::new(Line::raw(format!("{prefix} {} ({count})", style.label())))
            })
            .collect();

        let focused_list_style = Style::default()
            .fg(Color::Black)
            .bg(self.accent_color())
            .add_modifier(Modifier::BOLD);
        let unfocused_list_style = Style::default().fg(Color::White).bg(Color::Gray);

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(if focus {
                        Style::default().fg(self.accent_color())
                    } else {
                        Style::default()
                    })
                    .title(Span::styled("Styles", title_style)),
            )
            .highlight_style(if focus {
                focused_list_style
            } else {
                unfocused_list_style
            })
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);
        let mut state = ListState::default();
        state.select(Some(
            self.filters_panel
                .style_cursor
                .min(DesignStyle::ALL.len() - 1),
        ));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_collections_panel(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(90, 80, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title(Span::styled(
            "Collections",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(block.clone(), popup_area);

        let inner = block.inner(popup_area);
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(inner);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(26), Constraint::Min(0)])
            .split(sections[0]);

        self.draw_collection_buckets(body[0], frame);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(body[1]);

        self.draw_collection_category_row(right[0], frame);
        self.draw_collection_grid(right[1], frame);

        let sort = self.ctx.collection.sort;
        let columns = self.ctx.settings.grid_columns.columns();
        let help_lines = vec![
            Line::from(vec![
                Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" focus  "),
                Span::styled("↑/↓/←/→", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" move  "),
                Span::styled("Space", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" narrow  "),
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" open"),
            ]),
            Line::from(vec![
                Span::styled("s", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(" sort: {sort}  ")),
                Span::styled("d", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(" columns: {columns}  ")),
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" close"),
            ]),
        ];
        let help = Paragraph::new(Text::from(help_lines))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left);
        frame.render_widget(help, sections[1]);
    }

    fn draw_collection_buckets(&self, area: Rect, frame: &mut ratatui::Frame) {
        let focus = self.collections_panel.focus == CollectionsFocus::Buckets;
        let buckets = atelier_engine::group_by_collection(&self.ctx.projects);
        let title_style = if focus {
            Style::default()
                .fg(self.accent_color())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default()
        };

        let items: Vec<ListItem> = CollectionTag::ALL
            .iter()
            .map(|tag| {
                let count = buckets.get(tag).map(Vec::len).unwrap_or(0);
                let selected = self.ctx.collection.tag == *tag;
                let prefix = if selected { "●" } else { " " };
                ListItem::new(Line::raw(format!("{prefix} {} ({count})", tag.label())))
            })
            .collect();

        let focused_list_style = Style::default()
            .fg(Color::Black)
            .bg(self.accent_color())
            .add_modifier(Modifier::BOLD);
        let unfocused_list_style = Style::default().fg(Color::White).bg(Color::Gray);

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(if focus {
                        Style::default().fg(self.accent_color())
                    } else {
                        Style::default()
                    })
                    .title(Span::styled("Buckets", title_style)),
            )
            .highlight_style(if focus {
                focused_list_style
            } else {
                unfocused_list_style
            })
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);
        let mut state = ListState::default();
        let pos = CollectionTag::ALL
            .iter()
            .position(|t| *t == self.ctx.collection.tag);
        state.select(pos);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_collection_category_row(&self, area: Rect, frame: &mut ratatui::Frame) {
        let focus = self.collections_panel.focus == CollectionsFocus::Categories;
        let cursor = self.collections_panel.category_cursor;

        let mut spans = vec![Span::styled(
            "Narrow: ",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        spans.push(option_chip(
            "All",
            self.ctx.collection.category.is_none(),
            focus && cursor == 0,
        ));
        for (idx, category) in Category::ALL.iter().enumerate() {
            spans.push(Span::raw(" "));
            spans.push(option_chip(
                category.label(),
                self.ctx.collection.category == Some(*category),
                focus && cursor == idx + 1,
            ));
        }

        let row = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true });
        frame.render_widget(row, area);
    }

    fn draw_collection_grid(&self, area: Rect, frame: &mut ratatui::Frame) {
        let focus = self.collections_panel.focus == CollectionsFocus::Grid;
        let entries = self.bucket_entries();
        let title_style = if focus {
            Style::default()
                .fg(self.accent_color())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default()
        };
        let title = format!("{} ({})", self.ctx.collection.tag.label(), entries.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focus {
                Style::default().fg(self.accent_color())
            } else {
                Style::default()
            })
            .title(Span::styled(title, title_style));

        if entries.is_empty() {
            let paragraph = Paragraph::new(Text::from(vec![Line::raw("(empty)")]))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let inner_width = area.width.saturating_sub(2).max(4) as usize;
        let columns = self.ctx.settings.grid_columns.columns();
        let cell_width = (inner_width / columns).max(4);
        let cursor = self.collections_panel.grid_cursor.min(entries.len() - 1);

        let cursor_style = Style::default()
            .fg(Color::Black)
            .bg(self.accent_color())
            .add_modifier(Modifier::BOLD);

        let mut lines = Vec::new();
        for (row_idx, row) in entries.chunks(columns).enumerate() {
            let mut spans = Vec::new();
            for (col_idx, project) in row.iter().enumerate() {
                let idx = row_idx * columns + col_idx;
                let label = pad_to_width(&project.title, cell_width.saturating_sub(1));
                let style = if focus && idx == cursor {
                    cursor_style
                } else if project.featured {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(label, style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
            lines.push(Line::raw(""));
        }

        let paragraph = Paragraph::new(Text::from(lines)).block(block);
        frame.render_widget(paragraph, area);
    }

    fn draw_detail(&mut self, area: Rect, frame: &mut ratatui::Frame) {
        let Some(project) = self.ctx.active_project().cloned() else {
            self.ctx.close_detail();
            return;
        };
        self.detail.thumb = self
            .detail
            .thumb
            .min(project.images.len().saturating_sub(1));

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(area);

        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                project.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                " — {} · {}",
                project.category.label(),
                project.style.label()
            )),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, layout[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(layout[1]);

        let mut lines = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("Location: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(project.location.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Area: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(project.area.clone()),
            Span::raw("  "),
            Span::styled("Year: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(project.year.clone()),
        ]));
        let collection = project
            .collection
            .map(|tag| tag.label().to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(vec![
            Span::styled(
                "Collection: ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(collection),
            Span::raw("  "),
            Span::styled("Featured: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(if project.featured { "yes" } else { "no" }),
        ]));
        lines.push(Line::raw(""));
        lines.push(Line::raw(project.description.clone()));

        let about = Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL).title("About"))
            .wrap(Wrap { trim: true })
            .scroll((self.detail.scroll, 0));
        frame.render_widget(about, body[0]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(body[1]);

        self.draw_detail_gallery(&project, side[0], frame);
        self.draw_detail_related(&project, side[1], frame);

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" back  "),
            Span::styled("←/→", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" image  "),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" view  "),
            Span::styled("↑/↓", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" scroll"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
        frame.render_widget(footer, layout[2]);
    }

    fn draw_detail_gallery(&self, project: &Project, area: Rect, frame: &mut ratatui::Frame) {
        let title = format!("Gallery ({} images)", project.images.len());
        let items: Vec<ListItem> = project
            .images
            .iter()
            .map(|path| ListItem::new(Line::raw(asset_name(path))))
            .collect();

        let highlight_style = Style::default()
            .fg(Color::Black)
            .bg(self.accent_color())
            .add_modifier(Modifier::BOLD);

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(highlight_style)
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);

        let mut state = ListState::default();
        if !project.images.is_empty() {
            state.select(Some(self.detail.thumb.min(project.images.len() - 1)));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_detail_related(&self, project: &Project, area: Rect, frame: &mut ratatui::Frame) {
        let related = atelier_engine::related(&self.ctx.projects, project, 3);
        let items: Vec<ListItem> = if related.is_empty() {
            vec![ListItem::new(Line::raw("(none)"))]
        } else {
            related
                .iter()
                .map(|other| {
                    ListItem::new(Line::raw(format!(
                        "{} — {}",
                        other.title,
                        other.style.label()
                    )))
                })
                .collect()
        };

        let list =
            List::new(items).block(Block::default().borders(Borders::ALL).title("Related"));
        frame.render_widget(list, area);
    }

    fn draw_lightbox(&mut self, area: Rect, frame: &mut ratatui::Frame) {
        let Some(project) = self.ctx.active_project() else {
            return;
        };
        let Some(index) = self.ctx.lightbox.index() else {
            return;
        };
        let len = project.images.len();
        let Some(web_path) = project.images.get(index).cloned() else {
            return;
        };
        let title = format!("{} — image {}/{}", project.title, index + 1, len);

        frame.render_widget(Clear, area);
        let block = Block::default().borders(Borders::ALL).title(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(block.clone(), area);

        let inner = block.inner(area);
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(inner);

        let image_area = sections[0];
        let disk = resolve_asset(&self.ctx.settings.assets_root, &web_path);
        self.lightbox_view.ensure_rendered(
            &self.image_picker,
            disk,
            &web_path,
            image_area.width,
            image_area.height,
        );

        if let Some(protocol) = self.lightbox_view.current.as_ref() {
            let proto_area = protocol.area();
            let draw_width = proto_area.width.min(image_area.width);
            let draw_height = proto_area.height.min(image_area.height);
            let draw_area = Rect::new(
                image_area.x + image_area.width.saturating_sub(draw_width) / 2,
                image_area.y + image_area.height.saturating_sub(draw_height) / 2,
                draw_width,
                draw_height,
            );
            frame.render_widget(ImageWidget::new(protocol), draw_area);
        } else {
            let label = self
                .lightbox_view
                .last_error
                .clone()
                .unwrap_or_else(|| asset_name(&web_path));
            let placeholder = gallery_placeholder(image_area.width, image_area.height, &label);
            frame.render_widget(Paragraph::new(placeholder), image_area);
        }

        let footer_lines = vec![
            Line::raw(position_dots(index, len)),
            Line::from(vec![
                Span::styled("←/→", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" navigate  "),
                Span::styled("1-9", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" jump  "),
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" close"),
            ]),
        ];
        let footer = Paragraph::new(Text::from(footer_lines)).alignment(Alignment::Center);
        frame.render_widget(footer, sections[1]);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterFocus {
    Query,
    Categories,
    Styles,
}

impl FilterFocus {
    fn next(self) -> Self {
        match self {
            FilterFocus::Query => FilterFocus::Categories,
            FilterFocus::Categories => FilterFocus::Styles,
            FilterFocus::Styles => FilterFocus::Query,
        }
    }

    fn prev(self) -> Self {
        match self {
            FilterFocus::Query => FilterFocus::Styles,
            FilterFocus::Categories => FilterFocus::Query,
            FilterFocus::Styles => FilterFocus::Categories,
        }
    }
}

#[derive(Debug, Clone)]
struct FilterSnapshot {
    query: String,
    categories: Vec<Category>,
    styles: Vec<DesignStyle>,
    selected_id: Option<String>,
}

#[derive(Debug, Clone)]
struct FiltersPanel {
    open: bool,
    focus: FilterFocus,
    category_cursor: usize,
    style_cursor: usize,
    snapshot: Option<FilterSnapshot>,
}

impl Default for FiltersPanel {
    fn default() -> Self {
        Self {
            open: false,
            focus: FilterFocus::Query,
            category_cursor: 0,
            style_cursor: 0,
            snapshot: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CollectionsFocus {
    Buckets,
    Categories,
    Grid,
}

impl CollectionsFocus {
    fn next(self) -> Self {
        match self {
            CollectionsFocus::Buckets => CollectionsFocus::Categories,
            CollectionsFocus::Categories => CollectionsFocus::Grid,
            CollectionsFocus::Grid => CollectionsFocus::Buckets,
        }
    }

    fn prev(self) -> Self {
        match self {
            CollectionsFocus::Buckets => CollectionsFocus::Grid,
            CollectionsFocus::Categories => CollectionsFocus::Buckets,
            CollectionsFocus::Grid => CollectionsFocus::Categories,
        }
    }
}

#[derive(Debug, Clone)]
struct CollectionsPanel {
    open: bool,
    focus: CollectionsFocus,
    category_cursor: usize,
    grid_cursor: usize,
}

impl Default for CollectionsPanel {
    fn default() -> Self {
        Self {
            open: false,
            focus: CollectionsFocus::Buckets,
            category_cursor: 0,
            grid_cursor: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct DetailView {
    thumb: usize,
    scroll: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LightboxRenderKey {
    path: String,
    width: u16,
    height: u16,
}

#[derive(Clone)]
struct CachedGalleryImage {
    path: String,
    image: Arc<image::DynamicImage>,
}

#[derive(Default)]
struct LightboxView {
    current: Option<ImageProtocol>,
    render_key: Option<LightboxRenderKey>,
    decoded: VecDeque<CachedGalleryImage>,
    last_error: Option<String>,
}

impl LightboxView {
    fn invalidate(&mut self) {
        self.current = None;
        self.render_key = None;
        self.last_error = None;
    }

    fn ensure_rendered(
        &mut self,
        picker: &Picker,
        disk: Option<PathBuf>,
        web_path: &str,
        width: u16,
        height: u16,
    ) {
        let width = width.max(1);
        let height = height.max(1);
        let key = LightboxRenderKey {
            path: web_path.to_string(),
            width,
            height,
        };

        if self.current.is_some() && self.render_key.as_ref() == Some(&key) {
            return;
        }

        self.current = None;
        self.last_error = None;
        self.render_key = Some(key);

        let Some(path) = disk else {
            self.last_error = Some(format!(
                "{} (set assets_root to render)",
                asset_name(web_path)
            ));
            return;
        };

        let decoded = match self.decode(web_path, &path) {
            Ok(image) => image,
            Err(err) => {
                self.last_error = Some(format!("{err:#}"));
                return;
            }
        };

        let size = Rect::new(0, 0, width, height);
        match picker.new_protocol(
            (*decoded).clone(),
            size,
            Resize::Fit(Some(image::imageops::FilterType::Triangle)),
        ) {
            Ok(protocol) => self.current = Some(protocol),
            Err(err) => self.last_error = Some(err.to_string()),
        }
    }

    fn decode(&mut self, web_path: &str, path: &Path) -> anyhow::Result<Arc<image::DynamicImage>> {
        const MAX: usize = 4;
        if let Some(pos) = self.decoded.iter().position(|c| c.path == web_path)
            && let Some(cached) = self.decoded.remove(pos)
        {
            self.decoded.push_front(cached.clone());
            return Ok(cached.image);
        }

        let image = image::open(path).with_context(|| format!("decode {}", path.display()))?;
        let cached = CachedGalleryImage {
            path: web_path.to_string(),
            image: Arc::new(image),
        };
        self.decoded.push_front(cached.clone());
        while self.decoded.len() > MAX {
            self.decoded.pop_back();
        }
        Ok(cached.image)
    }
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    terminal::enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen).context("enter alt screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    terminal::disable_raw_mode().context("disable raw mode")?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("leave alt screen")?;
    Ok(())
}

fn panic_to_string(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic: (unknown payload)".to_string()
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn option_chip(label: &str, selected: bool, on_cursor: bool) -> Span<'static> {
    let base = if selected && on_cursor {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if on_cursor {
        Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    Span::styled(label.to_string(), base)
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);
        let sep_width = if current.is_empty() { 0 } else { 1 };

        if current_width + sep_width + word_width <= max_width {
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= max_width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        let mut chunk = String::new();
        let mut chunk_width = 0usize;
        for ch in word.chars() {
            let mut buf = [0u8; 4];
            let s = ch.encode_utf8(&mut buf);
            let w = UnicodeWidthStr::width(s);
            if chunk_width + w > max_width && !chunk.is_empty() {
                lines.push(std::mem::take(&mut chunk));
                chunk_width = 0;
            }
            chunk.push(ch);
            chunk_width += w;
        }
        if !chunk.is_empty() {
            lines.push(std::mem::take(&mut chunk));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

/// Truncates or pads to an exact display width for grid cells.
fn pad_to_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let mut buf = [0u8; 4];
        let s = ch.encode_utf8(&mut buf);
        let w = UnicodeWidthStr::width(s);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    while used < width {
        out.push(' ');
        used += 1;
    }
    out
}

/// Web paths in the data look like `/images/foo.png`; the client resolves
/// them under the configured assets root.
fn resolve_asset(assets_root: &str, web_path: &str) -> Option<PathBuf> {
    let assets_root = assets_root.trim();
    if assets_root.is_empty() {
        return None;
    }
    let relative = web_path.trim_start_matches('/');
    Some(Path::new(assets_root).join(relative))
}

fn asset_name(web_path: &str) -> String {
    web_path.rsplit('/').next().unwrap_or(web_path).to_string()
}

fn position_dots(index: usize, len: usize) -> String {
    let mut out = String::new();
    for i in 0..len {
        if i > 0 {
            out.push(' ');
        }
        out.push(if i == index { '●' } else { '○' });
    }
    out
}

fn gallery_placeholder(width: u16, height: u16, label: &str) -> Text<'static> {
    let width = width.max(10);
    let height = height.max(5);
    let inner_w = (width - 2) as usize;
    let inner_h = (height - 2) as usize;

    let label = label.trim();
    let label = if label.is_empty() { "image" } else { label };

    let mut lines = Vec::new();
    lines.push(Line::raw(format!("┌{}┐", "─".repeat(inner_w))));
    for y in 0..inner_h {
        if y == inner_h / 2 {
            let mut label = label.to_string();
            if label.chars().count() > inner_w {
                label = label.chars().take(inner_w).collect();
            }
            let label_len = label.chars().count();
            let pad_left = inner_w.saturating_sub(label_len) / 2;
            let pad_right = inner_w.saturating_sub(label_len).saturating_sub(pad_left);
            lines.push(Line::raw(format!(
                "│{}{}{}│",
                "░".repeat(pad_left),
                label,
                "░".repeat(pad_right)
            )));
        } else {
            lines.push(Line::raw(format!("│{}│", "░".repeat(inner_w))));
        }
    }
    lines.push(Line::raw(format!("└{}┘", "─".repeat(inner_w))));
    Text::from(lines)
}
