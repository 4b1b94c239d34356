//! Static font-metric tables for the PDF exporter's built-in fonts.
//!
//! Character widths are in em units (relative to font size), taken from the
//! standard Helvetica AFM tables (width/1000). Only the ASCII printable range
//! 0x20..=0x7E is tabulated; everything else falls back to an average width.
//! That is enough for word-wrap decisions — sanitization has already reduced
//! the text to the Latin-1 repertoire, and the residual error on accented
//! characters is within a character width per line.
//!
//! Index = (char as usize) - 32. Helvetica-Oblique shares the regular table.

/// Points to millimetres.
pub const PT_TO_MM: f32 = 0.352_778;

/// Static character-width table for one font face.
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for characters outside 0x20..=0x7E.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Measures the rendered width of a string in millimetres at `size_pt`.
    pub fn measure_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt * PT_TO_MM
    }

    /// Greedy word-wrap at `max_width_em`. A word wider than the line gets a
    /// line of its own rather than being split. Never returns empty lines;
    /// empty input wraps to no lines at all.
    pub fn wrap(&self, s: &str, max_width_em: f32) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in s.split_whitespace() {
            let word_width = self.measure_str(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + self.space_width + word_width > max_width_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += self.space_width + word_width;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Wrap against a width given in millimetres at `size_pt`.
    pub fn wrap_mm(&self, s: &str, max_width_mm: f32, size_pt: f32) -> Vec<String> {
        self.wrap(s, max_width_mm / (size_pt * PT_TO_MM))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica regular (shared by Helvetica-Oblique).
pub static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.55,
    space_width: 0.278,
};

/// Helvetica-Bold.
pub static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.58,
    space_width: 0.278,
};

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_is_zero() {
        assert_eq!(HELVETICA.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_space_width() {
        assert!((HELVETICA.measure_str(" ") - 0.278).abs() < 1e-4);
    }

    #[test]
    fn test_measure_str_known_word() {
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        assert!((HELVETICA.measure_str("Rust") - 2.056).abs() < 1e-3);
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        assert!((HELVETICA.measure_str("é") - HELVETICA.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Professional Summary";
        assert!(HELVETICA_BOLD.measure_str(text) > HELVETICA.measure_str(text));
    }

    #[test]
    fn test_wrap_empty_text_yields_no_lines() {
        assert!(HELVETICA.wrap("", 40.0).is_empty());
        assert!(HELVETICA.wrap("   ", 40.0).is_empty());
    }

    #[test]
    fn test_wrap_short_text_is_single_line() {
        let lines = HELVETICA.wrap("Built things", 40.0);
        assert_eq!(lines, vec!["Built things"]);
    }

    #[test]
    fn test_wrap_respects_max_width() {
        let text = "word ".repeat(40);
        let lines = HELVETICA.wrap(&text, 10.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(!line.is_empty());
            assert!(
                HELVETICA.measure_str(line) <= 10.0 + 1e-3,
                "line {line:?} exceeds the max width"
            );
        }
    }

    #[test]
    fn test_wrap_preserves_all_words_in_order() {
        let text = "alpha beta gamma delta epsilon zeta eta theta";
        let lines = HELVETICA.wrap(text, 6.0);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_wrap_overlong_word_gets_its_own_line() {
        let lines = HELVETICA.wrap("a hyperextraordinarily b", 3.0);
        assert!(lines.contains(&"hyperextraordinarily".to_string()));
    }

    #[test]
    fn test_measure_mm_scales_with_size() {
        let at_ten = HELVETICA.measure_mm("Rust", 10.0);
        let at_twenty = HELVETICA.measure_mm("Rust", 20.0);
        assert!((at_twenty - 2.0 * at_ten).abs() < 1e-3);
    }
}
