use std::io::{self, Write};

const BAR_WIDTH: usize = 50;
const FILL: char = '█';

/// Renders the fill portion of the bar: `floor(width * current / total)`
/// filled cells, dashes for the rest. `current > total` overfills the bar
/// rather than panicking.
pub fn render_bar(current: usize, total: usize) -> String {
    let total = total.max(1);
    let filled = BAR_WIDTH * current / total;
    let mut bar = String::with_capacity(BAR_WIDTH);
    for _ in 0..filled {
        bar.push(FILL);
    }
    for _ in filled..BAR_WIDTH {
        bar.push('-');
    }
    bar
}

pub fn render_percent(current: usize, total: usize) -> String {
    let total = total.max(1);
    format!("{:.1}", 100.0 * current as f64 / total as f64)
}

/// Prints a carriage-return overwritten progress line and finalizes it with
/// a newline once `current` reaches `total`. Output errors are ignored; a
/// broken console must not abort the crawl.
pub fn report(current: usize, total: usize, prefix: &str, suffix: &str) {
    print!(
        "\r{} |{}| {}% {}",
        prefix,
        render_bar(current, total),
        render_percent(current, total),
        suffix
    );
    io::stdout().flush().ok();
    if current >= total {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fill_is_floor_of_proportional_width() {
        assert_eq!(render_bar(0, 10).chars().filter(|&c| c == FILL).count(), 0);
        assert_eq!(render_bar(1, 3).chars().filter(|&c| c == FILL).count(), 16);
        assert_eq!(render_bar(5, 10).chars().filter(|&c| c == FILL).count(), 25);
        assert_eq!(render_bar(10, 10).chars().filter(|&c| c == FILL).count(), 50);
    }

    #[test]
    fn bar_is_always_full_width() {
        for current in 0..=10 {
            assert_eq!(render_bar(current, 10).chars().count(), BAR_WIDTH);
        }
    }

    #[test]
    fn percent_has_one_decimal_place() {
        assert_eq!(render_percent(0, 8), "0.0");
        assert_eq!(render_percent(3, 8), "37.5");
        assert_eq!(render_percent(1, 3), "33.3");
        assert_eq!(render_percent(2, 3), "66.7");
        assert_eq!(render_percent(8, 8), "100.0");
    }

    #[test]
    fn empty_iteration_renders_as_complete() {
        assert_eq!(render_percent(0, 0), "0.0");
        assert_eq!(render_bar(0, 0).chars().filter(|&c| c == FILL).count(), 0);
    }
}
