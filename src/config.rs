use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::style::Color;

use crate::grid::Grid;
use crate::render::Palette;
use crate::TermInt;

#[derive(Parser, Debug)]
#[command(name = "grid-snake")]
#[command(version, about = "Classic snake on a fixed grid, in the terminal")]
pub struct Cli {
    /// Milliseconds between two snake moves
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(10..))]
    pub tick_ms: u64,

    /// Color of the snake's head, as #RRGGBB or a color name
    #[arg(long, default_value = "#00FF00", value_parser = parse_color)]
    pub head_color: Color,

    /// Color of the rest of the snake, as #RRGGBB or a color name
    #[arg(long, default_value = "dark_green", value_parser = parse_color)]
    pub tail_color: Color,

    /// Board width in cells
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    pub columns: TermInt,

    /// Board height in cells
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    pub rows: TermInt,

    /// Where the high score is kept
    #[arg(long, default_value = ".snake_high_score")]
    pub high_score_file: PathBuf,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Everything a game needs from the outside, already validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub tick_interval: Duration,
    pub palette: Palette,
    pub grid: Grid,
}

impl From<&Cli> for Settings {
    fn from(cli: &Cli) -> Self {
        Settings {
            tick_interval: Duration::from_millis(cli.tick_ms),
            palette: Palette { head: cli.head_color, tail: cli.tail_color },
            grid: Grid::new(cli.columns, cli.rows),
        }
    }
}

pub fn parse_color(s: &str) -> Result<Color, String> {
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("expected #RRGGBB, got \"{}\"", s));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        return Ok(Color::Rgb { r: channel(0)?, g: channel(2)?, b: channel(4)? });
    }

    let color = match s.to_ascii_lowercase().replace('-', "_").as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "dark_red" => Color::DarkRed,
        "green" => Color::Green,
        "dark_green" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "dark_yellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "dark_blue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "dark_magenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "dark_cyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "dark_grey" | "dark_gray" => Color::DarkGrey,
        _ => return Err(format!("unknown color \"{}\"", s)),
    };

    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["grid-snake"]).unwrap();
        let settings = Settings::from(&cli);

        assert_eq!(settings.tick_interval, Duration::from_millis(100));
        assert_eq!(settings.grid, Grid::new(20, 20));
        assert_eq!(settings.palette.head, Color::Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(settings.palette.tail, Color::DarkGreen);
        assert_eq!(cli.high_score_file, PathBuf::from(".snake_high_score"));
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_custom_flags() {
        let cli = Cli::try_parse_from([
            "grid-snake",
            "--tick-ms",
            "250",
            "--head-color",
            "#ff8000",
            "--tail-color",
            "Blue",
            "--columns",
            "30",
            "--rows",
            "15",
        ])
        .unwrap();
        let settings = Settings::from(&cli);

        assert_eq!(settings.tick_interval, Duration::from_millis(250));
        assert_eq!(settings.grid, Grid::new(30, 15));
        assert_eq!(settings.palette.head, Color::Rgb { r: 255, g: 128, b: 0 });
        assert_eq!(settings.palette.tail, Color::Blue);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["grid-snake", "--tick-ms", "5"]).is_err());
        assert!(Cli::try_parse_from(["grid-snake", "--columns", "0"]).is_err());
        assert!(Cli::try_parse_from(["grid-snake", "--head-color", "#12345"]).is_err());
        assert!(Cli::try_parse_from(["grid-snake", "--tail-color", "chartreuse"]).is_err());
    }

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(parse_color("#000000"), Ok(Color::Rgb { r: 0, g: 0, b: 0 }));
        assert_eq!(parse_color("#A0b0C0"), Ok(Color::Rgb { r: 0xa0, g: 0xb0, b: 0xc0 }));
        assert_eq!(parse_color("dark-grey"), Ok(Color::DarkGrey));
        assert_eq!(parse_color("GRAY"), Ok(Color::Grey));
        assert!(parse_color("#gg0000").is_err());
        assert!(parse_color("").is_err());
    }
}
