//! Sectioning of model reply Markdown.
//!
//! The reviewer model answers in freeform Markdown. Two pieces of it feed
//! dedicated UI surfaces: the first fenced code block (the proposed
//! refactor, also used for the ghost preview and "Apply suggestion") and
//! the bullet list under a tests heading (the console panel).
//!
//! Parsing walks `pulldown-cmark` events rather than matching text, so a
//! bullet inside a fenced code block is never mistaken for a proposed test
//! case. Malformed or unexpected Markdown degrades to "nothing extracted",
//! never to an error.

#[cfg(test)]
#[path = "markdown_test.rs"]
mod tests;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// Default cap on extracted test cases.
pub const MAX_TEST_CASES: usize = 10;

/// Return the contents of the first fenced code block, if any.
///
/// The info string (language tag) is ignored; the fence may be tagged
/// with any language or none at all.
#[must_use]
pub fn extract_code_block(md: &str) -> Option<String> {
    let mut in_fence = false;
    let mut captured = String::new();
    for event in Parser::new_ext(md, parse_options()) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_))) => in_fence = true,
            Event::End(TagEnd::CodeBlock) if in_fence => return Some(captured),
            Event::Text(text) if in_fence => captured.push_str(&text),
            _ => {}
        }
    }
    None
}

/// Extract proposed test cases from reply Markdown.
///
/// Strategy mirrors how reviewers actually format answers:
/// 1. Find a heading that names tests ("Proposed Test Cases", "Test
///    Cases", "Tests", "Proposed Tests" — case-insensitive).
/// 2. Collect list items from there until the next heading.
/// 3. If no such section exists, fall back to any list item anywhere in
///    the document that mentions the word "test".
///
/// At most `max` items are returned.
#[must_use]
pub fn extract_test_cases(md: &str, max: usize) -> Vec<String> {
    let mut tests = collect_section_items(md, max);
    if tests.is_empty() {
        tests = collect_fallback_items(md, max);
    }
    tests
}

fn parse_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Does this heading introduce the proposed-tests section?
fn is_tests_heading(heading: &str) -> bool {
    let normalized = heading.trim().trim_end_matches(':').to_lowercase();
    const KEYWORDS: [&str; 4] = ["proposed test cases", "proposed tests", "test cases", "tests"];
    KEYWORDS
        .iter()
        .any(|kw| normalized == *kw || normalized.starts_with(&format!("{kw} ")))
}

/// List items between a tests heading and the next heading.
fn collect_section_items(md: &str, max: usize) -> Vec<String> {
    let mut items = Vec::new();
    let mut heading_buf: Option<String> = None;
    let mut in_section = false;
    let mut in_code = false;
    let mut item = ItemCollector::new();

    for event in Parser::new_ext(md, parse_options()) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                if in_section {
                    // Next heading closes the section.
                    break;
                }
                heading_buf = Some(String::new());
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(text) = heading_buf.take() {
                    in_section = is_tests_heading(&text);
                }
            }
            Event::Start(Tag::CodeBlock(_)) => in_code = true,
            Event::End(TagEnd::CodeBlock) => in_code = false,
            Event::Text(text) | Event::Code(text) => {
                if let Some(buf) = heading_buf.as_mut() {
                    buf.push_str(&text);
                } else if in_section && !in_code {
                    item.push_text(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak if in_section => item.push_break(),
            Event::Start(Tag::Item) if in_section => item.enter(),
            Event::End(TagEnd::Item) if in_section => {
                if let Some(done) = item.exit() {
                    items.push(done);
                    if items.len() >= max {
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    items
}

/// Fallback: any list item in the document mentioning "test".
fn collect_fallback_items(md: &str, max: usize) -> Vec<String> {
    let mut items = Vec::new();
    let mut in_code = false;
    let mut item = ItemCollector::new();

    for event in Parser::new_ext(md, parse_options()) {
        match event {
            Event::Start(Tag::Item) => item.enter(),
            Event::End(TagEnd::Item) => {
                if let Some(done) = item.exit() {
                    if done.to_lowercase().contains("test") {
                        items.push(done);
                        if items.len() >= max {
                            break;
                        }
                    }
                }
            }
            Event::Start(Tag::CodeBlock(_)) => in_code = true,
            Event::End(TagEnd::CodeBlock) => in_code = false,
            Event::Text(text) | Event::Code(text) if !in_code => item.push_text(&text),
            Event::SoftBreak | Event::HardBreak => item.push_break(),
            _ => {}
        }
    }
    items
}

/// Accumulates the visible text of a (possibly nested) list item.
///
/// Nested bullets fold into their parent entry; an item only completes
/// when the outermost `Item` tag closes.
struct ItemCollector {
    depth: usize,
    buf: String,
}

impl ItemCollector {
    fn new() -> Self {
        Self { depth: 0, buf: String::new() }
    }

    fn enter(&mut self) {
        if self.depth == 0 {
            self.buf.clear();
        } else {
            // Separate nested content from the parent text.
            self.push_break();
        }
        self.depth += 1;
    }

    fn push_text(&mut self, text: &str) {
        if self.depth > 0 {
            self.buf.push_str(text);
        }
    }

    fn push_break(&mut self) {
        if self.depth > 0 && !self.buf.ends_with(' ') {
            self.buf.push(' ');
        }
    }

    fn exit(&mut self) -> Option<String> {
        if self.depth == 0 {
            return None;
        }
        self.depth -= 1;
        if self.depth > 0 {
            self.push_break();
            return None;
        }
        let text = self.buf.trim().to_owned();
        (!text.is_empty()).then_some(text)
    }
}
