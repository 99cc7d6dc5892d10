//! Split the text of the CEVS bands document into one section per band.
//!
//! A band label follows a closing parenthesis, e.g. `...(Cat A) B Honda Jazz`.
//! The first pass finds every anchor, the second pass slices the text between
//! consecutive anchors.

/// A closing parenthesis followed by a band code such as `A1` or `B`.
#[derive(Debug, PartialEq, Clone)]
pub struct Anchor {
    /// Byte offset of the `)`
    pub start: usize,
    /// Byte offset just past the band code
    pub end: usize,
    pub band: String,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Section {
    pub band: String,
    pub content: String,
}

/// Find all the anchors `)\s*[A-Z]\d?` in the text, left to right,
/// without overlaps.
pub fn find_anchors(text: &str) -> Vec<Anchor> {
    let mut anchors: Vec<Anchor> = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != ')' {
            continue;
        }
        while let Some(&(_, w)) = chars.peek() {
            if !w.is_whitespace() {
                break;
            }
            chars.next();
        }
        let (j, letter) = match chars.peek() {
            Some(&(j, l)) if l.is_ascii_uppercase() => (j, l),
            _ => continue,
        };
        chars.next();
        let mut band = letter.to_string();
        let mut end = j + 1;
        if let Some(&(k, d)) = chars.peek() {
            if d.is_ascii_digit() {
                band.push(d);
                end = k + 1;
                chars.next();
            }
        }
        anchors.push(Anchor { start: i, end, band });
    }
    anchors
}

/// Partition the text into band sections.  A section starts right after its
/// band code and ends one character past the `)` of the next anchor, so the
/// parenthesis closing the last entry of a band stays with that band.
/// Anything before the first anchor is not part of any section.
pub fn split_sections(text: &str) -> Vec<Section> {
    let anchors = find_anchors(text);
    let mut sections: Vec<Section> = Vec::with_capacity(anchors.len());
    for (i, anchor) in anchors.iter().enumerate() {
        let end = match anchors.get(i + 1) {
            Some(next) => next.start + 1,
            None => text.len(),
        };
        let content = if anchor.end <= end {
            text[anchor.end..end].trim()
        } else {
            ""
        };
        sections.push(Section {
            band: anchor.band.clone(),
            content: content.to_string(),
        });
    }
    sections
}

/// Split a section on the commas that are not inside parentheses, so that
/// `Model Z (Cat A, 2.0L)` stays in one piece.  Empty entries are dropped.
pub fn split_entries(content: &str) -> Vec<String> {
    let mut entries: Vec<String> = Vec::new();
    let mut depth: usize = 0;
    let mut current = String::new();
    for c in content.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                entries.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    entries.push(current);

    entries
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}
