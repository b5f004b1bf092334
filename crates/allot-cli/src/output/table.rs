use std::io::IsTerminal;

const MIN_COLUMN: usize = 6;
const GAP: &str = "  ";

#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

impl TableOptions {
    /// Color headers only on an interactive stdout without `NO_COLOR`; fit
    /// to `COLUMNS` when it is set to something usable.
    #[must_use]
    pub fn detect() -> Self {
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        let max_width = std::env::var("COLUMNS")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|width| *width >= 40);
        Self { max_width, color }
    }
}

/// Render rows as an aligned, left-padded text table.
///
/// Numeric cells are right-aligned. When `max_width` is set, the widest
/// columns give up space first (never below their header width).
#[must_use]
pub fn render_rows(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(column, header)| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_COLUMN])
                .max()
                .unwrap_or(MIN_COLUMN)
        })
        .collect();
    shrink_to_fit(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&clip(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(GAP);
    let rule = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(rule);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(column, width)| {
                let cell = clip(row.get(column).map_or("-", String::as_str), *width);
                let padded = pad(&cell, *width, is_numeric(&cell));
                if options.color {
                    highlight(&cell, padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(line);
    }
    lines.join("\n")
}

fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let gaps = widths.len().saturating_sub(1) * GAP.len();

    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(column, width)| **width > headers[*column].chars().count().max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(column, _)| column);
        let Some(column) = widest else {
            break;
        };
        widths[column] -= 1;
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Wrap a padded cell in an ANSI color when its text is a known status word.
fn highlight(cell: &str, padded: String) -> String {
    let code = match cell.to_ascii_lowercase().as_str() {
        "true" => "32",
        "unassigned" | "skipped" | "0" => "33",
        "false" | "validation" | "lookup" | "capacity_exhausted" | "persistence" => "31",
        _ => return padded,
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{TableOptions, clip, render_rows};

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn columns_align_across_rows() {
        let rows = vec![
            vec!["UP1".to_string(), "A. Smith".to_string(), "3".to_string()],
            vec!["UP200".to_string(), "Unassigned".to_string(), "12".to_string()],
        ];
        let table = render_rows(&["student", "supervisor", "load"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[0].len(), lines[2].len());
        assert_eq!(lines[2].len(), lines[3].len());
        assert!(lines[2].ends_with("     3"));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let rows = vec![vec!["UP1".to_string()]];
        let table = render_rows(&["student", "moderator"], &rows, PLAIN);
        assert!(table.lines().nth(2).is_some_and(|line| line.trim_end().ends_with('-')));
    }

    #[test]
    fn narrow_terminal_clips_the_widest_column() {
        let rows = vec![vec![
            "UP1".to_string(),
            "Computing and Information Systems with Placement".to_string(),
        ]];
        let options = TableOptions {
            max_width: Some(40),
            color: false,
        };
        let table = render_rows(&["student", "course"], &rows, options);
        let row = table.lines().nth(2).expect("data row");
        assert!(row.chars().count() <= 40);
        assert!(row.contains('…'));
    }

    #[test]
    fn clip_keeps_short_values() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("abcdefgh", 4), "abc…");
    }

    #[test]
    fn color_wraps_status_words_only() {
        let rows = vec![vec!["Unassigned".to_string(), "A. Smith".to_string()]];
        let options = TableOptions {
            max_width: None,
            color: true,
        };
        let table = render_rows(&["supervisor", "moderator"], &rows, options);
        let row = table.lines().nth(2).expect("data row");
        assert!(row.starts_with("\u{1b}[33mUnassigned"));
        assert!(row.contains("A. Smith"));
        assert_eq!(row.matches('\u{1b}').count(), 2);
    }
}
