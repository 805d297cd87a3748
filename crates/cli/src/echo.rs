use kotoba_core::{AnnotatedWord, Candidate};
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Kotoba".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Kanji word frequency lists from Japanese pages\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print a labelled detail line under the current step
pub fn print_detail(label: &str, value: &str) {
    eprintln!("  {} {}", format!("{}:", label).dimmed(), value.bright_white());
}

/// Print timing information with color coding
///
/// Dictionary lookups dominate a run, so the thresholds are in seconds
/// rather than the milliseconds used for parsing.
pub fn print_timing(label: &str, duration: std::time::Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    let label = format!("{}:", label);

    if ms < 500.0 {
        eprintln!("  {} {:>10.2}ms ({})", label.dimmed(), ms, "fast".dimmed());
    } else if ms < 5000.0 {
        eprintln!("  {} {:>10.2}ms ({})", label.dimmed(), ms, "moderate".bright_yellow());
    } else {
        eprintln!("  {} {:>10.2}ms ({})", label.dimmed(), ms, "slow".bright_red());
    }
}

/// Print timing summary
pub fn print_timing_summary(total: std::time::Duration, timings: &[(&str, std::time::Duration)]) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Timing Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());

    for (label, duration) in timings {
        print_timing(label, *duration);
    }

    eprintln!(
        "  {} {:>10.2}ms\n",
        format!("{}:", "Total").bold().dimmed(),
        total.as_secs_f64() * 1000.0
    );
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Render words as colored cards
pub fn render_cards(words: &[AnnotatedWord]) -> String {
    let mut output = String::new();

    for (index, word) in words.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let extra = match word.extra_reading_count {
            0 => String::new(),
            n => format!(" +{} more", n),
        };

        output.push_str(&format!(
            "{} {} {}{}\n",
            word.surface.bold().bright_white(),
            format!("({})", word.reading).bright_cyan(),
            format!("x{}", word.count).dimmed(),
            extra.dimmed()
        ));
        output.push_str(&format!("  {}\n", word.part_of_speech.italic().yellow()));
        output.push_str(&format!("  {}\n", word.definition));
    }

    output
}

/// Render the ranked pool, one candidate per line
pub fn render_candidates(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(rank, candidate)| {
            let reading = candidate.reading.as_deref().unwrap_or("-");
            format!("{:>3}. {}\t{}\t{}\n", rank + 1, candidate.surface, candidate.count, reading)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_render_candidates() {
        let candidates = vec![
            Candidate { surface: "東京".to_string(), count: 3, reading: Some("トウキョウ".to_string()) },
            Candidate::new("天気", 2),
        ];

        assert_eq!(render_candidates(&candidates), "  1. 東京\t3\tトウキョウ\n  2. 天気\t2\t-\n");
    }
}
