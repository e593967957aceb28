//! Expansion of template tags inside page source.
//!
//! The renderer scans a page for `{% name arguments %}` tags, builds each
//! registered one from the registry and splices its output into the page.
//! Tags are rendered one after another in document order.

use regex::Regex;
use tracing::{debug, info, instrument};

use crate::errors::Error;
use crate::tag::{TagContext, TagRegistry};

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;

/// Matches `{% name arguments %}`; the arguments may span lines but never
/// contain another `{%`, so an unclosed tag cannot swallow the next one.
const TAG_PATTERN: &str = r"(?s)\{%\s*([A-Za-z_][A-Za-z0-9_-]*)((?:[^{]|\{+[^{%])*?\{*)%\}";

/// Position and parts of one `{% ... %}` tag in the page source.
struct TagOccurrence<'a> {
    start: usize,
    end: usize,
    name: &'a str,
    arguments: &'a str,
}

/// Renders pages by expanding the tags a [`TagRegistry`] knows about.
#[derive(Debug)]
pub struct PageRenderer {
    registry: TagRegistry,
    tag_pattern: Regex,
}

impl PageRenderer {
    /// Creates a renderer over the given registry.
    pub fn new(registry: TagRegistry) -> Self {
        let tag_pattern = Regex::new(TAG_PATTERN).expect("tag pattern is a valid regex");
        Self {
            registry,
            tag_pattern,
        }
    }

    /// Expands every registered tag in `source`.
    ///
    /// Tags whose name is not registered are copied to the output unchanged so a
    /// later pass of another engine can handle them. Each occurrence of a tag is
    /// constructed and rendered on its own; nothing is shared or cached between
    /// occurrences.
    ///
    /// # Errors
    ///
    /// The first error raised while constructing or rendering a tag is returned
    /// and no output is produced for the page.
    #[instrument(skip(self, source, context), fields(source_len = source.len()))]
    pub async fn render_page(&self, source: &str, context: &TagContext) -> Result<String, Error> {
        let mut output = String::with_capacity(source.len());
        let mut last_end = 0;
        let mut expanded = 0;

        let occurrences: Vec<TagOccurrence<'_>> = self
            .tag_pattern
            .captures_iter(source)
            .filter_map(|captures| {
                let whole = captures.get(0)?;
                Some(TagOccurrence {
                    start: whole.start(),
                    end: whole.end(),
                    name: captures.get(1)?.as_str(),
                    arguments: captures.get(2).map_or("", |m| m.as_str()),
                })
            })
            .collect();

        for occurrence in occurrences {
            if !self.registry.contains(occurrence.name) {
                debug!(tag = occurrence.name, "Leaving unregistered tag in place");
                continue;
            }

            let tag = self.registry.create(occurrence.name, occurrence.arguments)?;
            let rendered = tag.render(context).await?;

            output.push_str(&source[last_end..occurrence.start]);
            output.push_str(&rendered);
            last_end = occurrence.end;
            expanded += 1;
        }

        output.push_str(&source[last_end..]);

        info!(tags = expanded, "Rendered page");
        Ok(output)
    }
}
