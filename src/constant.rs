use std::time::Duration;

use ratatui::style::Color;

pub const BLACK: Color = Color::Rgb(0, 0, 0);
pub const BLUE: Color = Color::Rgb(114, 159, 207);
pub const DARK_GRAY: Color = Color::Rgb(60, 60, 60);
pub const LIGHT_GRAY: Color = Color::Rgb(211, 215, 207);

/// (foreground, background) pairs for the three kinds of row.
pub const FILE_COLORS: (Color, Color) = (LIGHT_GRAY, BLACK);
pub const DIR_COLORS: (Color, Color) = (BLUE, BLACK);
pub const SELECTED_COLORS: (Color, Color) = (BLACK, LIGHT_GRAY);

pub const GRID_COLOR: Color = DARK_GRAY;

pub const DIR_PREFIX: &str = "[DIR] ";
pub const LABEL_INDENT: u16 = 2;

/// Terminal cells per list row, gap line included.
pub const ROW_HEIGHT: u16 = 2;
pub const PAGE_STEP: usize = 10;
pub const FRAME_INTERVAL: Duration = Duration::from_millis(60);

pub const LOG_ENV: &str = "FILESELECTOR_LOG";
