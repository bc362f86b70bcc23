use std::{
    fs,
    io::{self, IsTerminal, Stderr, Write},
    path::{Path, PathBuf},
    thread,
};

use color_eyre::eyre::{bail, Result, WrapErr};
use crossterm::{
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    Terminal,
};

use crate::{
    cli::Config,
    constant::{
        DIR_COLORS, DIR_PREFIX, FILE_COLORS, FRAME_INTERVAL, GRID_COLOR, LABEL_INDENT,
        SELECTED_COLORS,
    },
    explorer::{self, Entry, FilterSet},
    key_events::handle_events,
    navigator::{Motion, Viewport},
};

pub type Tui = Terminal<CrosstermBackend<Stderr>>;

/// How the picker ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selected(PathBuf),
    Cancelled,
}

impl Outcome {
    pub fn exit_status(&self) -> u8 {
        match self {
            Outcome::Selected(_) => 0,
            Outcome::Cancelled => 1,
        }
    }

    /// Writes the chosen path, if any, and returns the process exit status.
    pub fn report(&self, out: &mut impl Write) -> io::Result<u8> {
        if let Outcome::Selected(path) = self {
            writeln!(out, "{}", path.display())?;
            out.flush()?;
        }
        Ok(self.exit_status())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub height: u16,
    pub row_height: u16,
}

impl DisplayConfig {
    pub fn visible_rows(&self) -> usize {
        usize::from(self.height / self.row_height.max(1)).max(1)
    }
}

/// Everything the picker mutates while it runs. Only the event loop thread
/// touches it.
pub struct FileSelector {
    pub cwd: PathBuf,
    pub entries: Vec<Entry>,
    pub viewport: Viewport,
    pub filters: FilterSet,
    pub show_hidden: bool,
    pub filter_active: bool,
    pub display: DisplayConfig,
    pub dirty: bool,
    pub outcome: Option<Outcome>,
}

impl FileSelector {
    pub fn new(config: Config) -> Result<Self> {
        let filter_active = !config.filters.is_empty();
        let filter = filter_active.then_some(&config.filters);
        let entries = explorer::list(&config.start_dir, false, filter)
            .wrap_err("failed to list the starting directory")?;

        Ok(Self {
            cwd: config.start_dir,
            entries,
            viewport: Viewport::default(),
            filters: config.filters,
            show_hidden: false,
            filter_active,
            display: DisplayConfig {
                height: 0,
                row_height: config.row_height,
            },
            dirty: true,
            outcome: None,
        })
    }

    /// Rescans with new settings and commits them only if the scan works, so
    /// a failed scan leaves the previous listing on screen.
    fn reload(&mut self, dir: PathBuf, show_hidden: bool, filter_active: bool) -> bool {
        let filter = filter_active.then_some(&self.filters);
        match explorer::list(&dir, show_hidden, filter) {
            Ok(entries) => {
                if dir != self.cwd {
                    tracing::info!(dir = %dir.display(), entries = entries.len(), "changed directory");
                }
                self.cwd = dir;
                self.entries = entries;
                self.show_hidden = show_hidden;
                self.filter_active = filter_active;
                self.viewport.reset();
                self.dirty = true;
                true
            }
            Err(error) => {
                tracing::warn!(%error, "keeping previous listing");
                false
            }
        }
    }

    pub fn navigate(&mut self, motion: Motion) {
        self.viewport
            .apply(motion, self.entries.len(), self.display.visible_rows());
        tracing::trace!(
            ?motion,
            selected = self.viewport.selected(),
            offset = self.viewport.offset(),
            "moved"
        );
        self.dirty = true;
    }

    pub fn enter(&mut self) {
        let Some(entry) = self.entries.get(self.viewport.selected()) else {
            return;
        };
        let path = self.cwd.join(entry.name());
        if entry.is_dir() {
            match fs::canonicalize(&path) {
                Ok(dir) => {
                    self.reload(dir, self.show_hidden, self.filter_active);
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "keeping previous listing");
                }
            }
        } else {
            tracing::info!(path = %path.display(), kind = ?entry.kind(), "selected");
            self.outcome = Some(Outcome::Selected(path));
        }
    }

    pub fn parent(&mut self) {
        if let Some(parent) = self.cwd.parent().map(Path::to_path_buf) {
            self.reload(parent, self.show_hidden, self.filter_active);
        }
    }

    pub fn toggle_hidden(&mut self) {
        self.reload(self.cwd.clone(), !self.show_hidden, self.filter_active);
    }

    pub fn toggle_filter(&mut self) {
        if self.filters.is_empty() {
            return;
        }
        self.reload(self.cwd.clone(), self.show_hidden, !self.filter_active);
    }

    pub fn cancel(&mut self) {
        tracing::info!("cancelled");
        self.outcome = Some(Outcome::Cancelled);
    }

    pub fn resize(&mut self, height: u16) {
        self.display.height = height;
        self.viewport.fit(self.display.visible_rows());
        self.dirty = true;
    }

    pub fn run(mut self, terminal: &mut Tui) -> Result<Outcome> {
        let size = terminal.size()?;
        self.resize(size.height);
        let mut caption = PathBuf::new();

        loop {
            handle_events(&mut self)?;
            if let Some(outcome) = self.outcome.take() {
                return Ok(outcome);
            }

            thread::sleep(FRAME_INTERVAL);

            if caption != self.cwd {
                execute!(io::stderr(), SetTitle(self.cwd.display()))?;
                caption.clone_from(&self.cwd);
            }
            if self.dirty {
                terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
                self.dirty = false;
            }
        }
    }
}

impl Widget for &FileSelector {
    fn render(self, area: Rect, buf: &mut Buffer) {
        EntryList {
            entries: &self.entries,
            viewport: &self.viewport,
            row_height: self.display.row_height,
        }
        .render(area, buf);
    }
}

/// Grid of row bands with the visible slice of entries drawn over it.
pub struct EntryList<'a> {
    pub entries: &'a [Entry],
    pub viewport: &'a Viewport,
    pub row_height: u16,
}

impl Widget for EntryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::new().bg(GRID_COLOR));

        let row_height = self.row_height.max(1);
        let band_height = if row_height > 1 { row_height - 1 } else { 1 };
        let rows = usize::from(area.height / row_height).max(1);
        let shown = &self.entries[self.viewport.visible_range(self.entries.len(), rows)];

        for row in 0..rows {
            let y = area.y + row as u16 * row_height;
            if y >= area.bottom() {
                break;
            }
            let band = Rect::new(area.x, y, area.width, band_height.min(area.bottom() - y));
            let highlighted = row == self.viewport.highlighted_row();
            let (_, band_bg) = if highlighted { SELECTED_COLORS } else { FILE_COLORS };
            buf.set_style(band, Style::new().bg(band_bg));

            let Some(entry) = shown.get(row) else {
                continue;
            };
            let (fg, bg) = match (highlighted, entry.is_dir()) {
                (true, _) => SELECTED_COLORS,
                (false, true) => DIR_COLORS,
                (false, false) => FILE_COLORS,
            };
            let style = Style::new().fg(fg).bg(bg);
            let mut spans = Vec::with_capacity(2);
            if entry.is_dir() {
                spans.push(Span::styled(DIR_PREFIX, style));
            }
            spans.push(Span::styled(entry.label(), style));

            let label_area = Rect::new(
                band.x.saturating_add(LABEL_INDENT).min(band.right()),
                band.y,
                band.width.saturating_sub(LABEL_INDENT),
                1,
            );
            Line::from(spans).render(label_area, buf);
        }
    }
}

/// Raw mode on the alternate screen of stderr, leaving stdout for the result.
pub fn init_terminal() -> Result<Tui> {
    if !io::stderr().is_terminal() {
        bail!("no terminal to draw on: standard error is not a terminal");
    }
    enable_raw_mode().wrap_err("failed to enable raw mode")?;
    execute!(io::stderr(), EnterAlternateScreen)?;
    set_panic_hook();
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stderr(),
        LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    Ok(())
}

fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        hook(info);
    }));
}
