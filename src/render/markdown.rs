//! Minimal Markdown transform.
//!
//! Supports exactly three constructs: `#`/`##`/`###` headings, `* ` (or
//! `- `) unordered list items, and blank-line-delimited paragraphs. Inline
//! text is emitted verbatim, so embedded HTML passes through unchanged.

/// Converts Markdown text to HTML. Blocks are separated by newlines.
#[must_use]
pub fn to_html(markdown: &str) -> String {
    let mut blocks = Blocks::default();

    for line in markdown.lines() {
        let line = line.trim_end();

        if line.trim().is_empty() {
            blocks.flush();
        } else if let Some((level, text)) = heading(line) {
            blocks.flush();
            blocks.out.push(format!("<h{level}>{text}</h{level}>"));
        } else if let Some(item) = list_item(line) {
            blocks.flush_paragraph();
            blocks.list.push(item);
        } else {
            blocks.flush_list();
            blocks.paragraph.push(line);
        }
    }

    blocks.flush();
    blocks.out.join("\n")
}

#[derive(Default)]
struct Blocks<'a> {
    out: Vec<String>,
    paragraph: Vec<&'a str>,
    list: Vec<&'a str>,
}

impl Blocks<'_> {
    fn flush(&mut self) {
        self.flush_paragraph();
        self.flush_list();
    }

    fn flush_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            self.out.push(format!("<p>{}</p>", self.paragraph.join("\n")));
            self.paragraph.clear();
        }
    }

    fn flush_list(&mut self) {
        if !self.list.is_empty() {
            let items: String = self
                .list
                .iter()
                .map(|item| format!("<li>{item}</li>"))
                .collect();
            self.out.push(format!("<ul>{items}</ul>"));
            self.list.clear();
        }
    }
}

/// Returns the level and text of a level 1-3 ATX heading.
fn heading(line: &str) -> Option<(usize, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    line[hashes..].strip_prefix(' ').map(|text| (hashes, text.trim()))
}

fn list_item(line: &str) -> Option<&str> {
    line.strip_prefix("* ")
        .or_else(|| line.strip_prefix("- "))
        .map(str::trim)
}
