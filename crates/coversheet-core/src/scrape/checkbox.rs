use crate::model::CheckboxGlyph;

/// A checkbox glyph and the column title that followed it in its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckboxPair<'a> {
    pub glyph: CheckboxGlyph,
    pub title: &'a str,
}

/// Pair every checkbox glyph in a flattened row with the text after it.
///
/// Each step looks at the first remaining checked glyph and the first
/// remaining unchecked glyph and takes whichever sits later in the row. That
/// glyph and the next remaining element (its title) are consumed. Consumed
/// titles are never glyphs again, even if their text is one. Steps repeat
/// until no glyph remains; pairs come out in step order.
///
/// A glyph with nothing after it has no title and is dropped.
pub fn checkbox_pairs<'a>(row: &[&'a str]) -> Vec<CheckboxPair<'a>> {
    let mut consumed = vec![false; row.len()];
    let mut pairs = Vec::new();
    let mut checked = next_glyph(row, &consumed, CheckboxGlyph::Checked, 0);
    let mut unchecked = next_glyph(row, &consumed, CheckboxGlyph::Unchecked, 0);

    loop {
        let (index, glyph) = match (checked, unchecked) {
            (None, None) => break,
            (Some(c), None) => (c, CheckboxGlyph::Checked),
            (None, Some(u)) => (u, CheckboxGlyph::Unchecked),
            (Some(c), Some(u)) if c > u => (c, CheckboxGlyph::Checked),
            (Some(_), Some(u)) => (u, CheckboxGlyph::Unchecked),
        };
        consumed[index] = true;

        match (index + 1..row.len()).find(|&i| !consumed[i]) {
            Some(title) => {
                consumed[title] = true;
                pairs.push(CheckboxPair {
                    glyph,
                    title: row[title],
                });
            }
            None => tracing::warn!(position = index, "checkbox glyph has no title after it"),
        }

        // Cursors only move forward: consumed positions never come back.
        if let Some(c) = checked {
            checked = next_glyph(row, &consumed, CheckboxGlyph::Checked, c);
        }
        if let Some(u) = unchecked {
            unchecked = next_glyph(row, &consumed, CheckboxGlyph::Unchecked, u);
        }
    }

    pairs
}

fn next_glyph(row: &[&str], consumed: &[bool], glyph: CheckboxGlyph, from: usize) -> Option<usize> {
    (from..row.len()).find(|&i| !consumed[i] && CheckboxGlyph::from_text(row[i]) == Some(glyph))
}
