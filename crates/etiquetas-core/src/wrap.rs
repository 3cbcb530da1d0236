//! # Word Wrap
//!
//! Greedy line filling for the product name block.
//!
//! The measurement function is injected so this stays free of fonts: the
//! renderer passes a closure over its text painter, tests pass character
//! counts.
//!
//! ```text
//!   max_width = 10 (1 unit per char)
//!
//!   "LECHE ENTERA LARGA VIDA"
//!        │
//!        ▼
//!   ┌──────────┐
//!   │LECHE     │  "LECHE ENTERA" = 12 > 10 → flush
//!   │ENTERA    │  "ENTERA LARGA" = 12 > 10 → flush
//!   │LARGA VIDA│  "LARGA VIDA"   = 10 ≤ 10 → keep
//!   └──────────┘
//! ```

/// Splits `text` into lines no wider than `max_width` where possible.
///
/// Words are separated by whitespace and never split; a word wider than
/// `max_width` gets a line of its own. Empty lines are never produced, so
/// joining the result with single spaces gives back the word sequence.
///
/// ## Example
/// ```rust
/// use etiquetas_core::wrap::wrap_text;
///
/// let lines = wrap_text("LECHE ENTERA LARGA VIDA", 10.0, |s| s.chars().count() as f32);
/// assert_eq!(lines, vec!["LECHE", "ENTERA", "LARGA VIDA"]);
/// ```
pub fn wrap_text<F>(text: &str, max_width: f32, mut measure: F) -> Vec<String>
where
    F: FnMut(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let tentative = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if current.is_empty() || measure(&tentative) <= max_width {
            current = tentative;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> f32 {
        s.chars().count() as f32
    }

    #[test]
    fn test_empty_text() {
        assert!(wrap_text("", 100.0, chars).is_empty());
        assert!(wrap_text("   \t ", 100.0, chars).is_empty());
    }

    #[test]
    fn test_single_line_fits() {
        assert_eq!(wrap_text("ARROZ LARGO FINO", 100.0, chars), vec!["ARROZ LARGO FINO"]);
    }

    #[test]
    fn test_exact_fit_stays_on_line() {
        assert_eq!(wrap_text("AB CD", 5.0, chars), vec!["AB CD"]);
    }

    #[test]
    fn test_greedy_fill() {
        let lines = wrap_text("A B C D E F", 3.0, chars);
        assert_eq!(lines, vec!["A B", "C D", "E F"]);
    }

    #[test]
    fn test_overlong_word_alone() {
        let lines = wrap_text("SUPERCALIFRAGILISTICO", 5.0, chars);
        assert_eq!(lines, vec!["SUPERCALIFRAGILISTICO"]);

        let lines = wrap_text("AZUCAR IMPALPABLEMENTE X", 8.0, chars);
        assert_eq!(lines, vec!["AZUCAR", "IMPALPABLEMENTE", "X"]);
    }

    #[test]
    fn test_no_empty_lines_and_tokens_preserved() {
        let text = "  YERBA   MATE  CON    PALO  ";
        let lines = wrap_text(text, 6.0, chars);
        assert!(lines.iter().all(|l| !l.is_empty()));
        assert_eq!(lines.join(" "), "YERBA MATE CON PALO");
    }

    #[test]
    fn test_measure_called_with_tentative_line() {
        let mut seen = Vec::new();
        wrap_text("UNO DOS", 100.0, |s| {
            seen.push(s.to_string());
            0.0
        });
        assert_eq!(seen, vec!["UNO DOS"]);
    }
}
