#![forbid(unsafe_code)]

//! Markdown-to-fragment conversion.
//!
//! [`render_markup`] converts a Markdown source string into a [`Fragment`]
//! of sanitized HTML. Raw HTML blocks and inline HTML in the source are
//! escaped to visible text instead of being passed through, so a mirrored
//! property can never inject markup into the host's subtree.

use std::fmt;

use pulldown_cmark::{Event, Options, Parser, html};

/// A rendered markup fragment: the cached output of converting a source
/// string into displayable HTML.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Fragment {
    html: String,
}

impl Fragment {
    /// The empty fragment, rendered before any value has ever been set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The rendered HTML.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Whether the fragment renders nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// Convert a Markdown source string into a sanitized HTML fragment.
///
/// Raw HTML events are demoted to text so the serializer escapes them. The
/// newline emitted after the final block is trimmed, so `"foo"` renders as
/// exactly `<p>foo</p>`.
#[must_use]
pub fn render_markup(source: &str) -> Fragment {
    let parser = Parser::new_ext(
        source,
        Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES,
    );
    let sanitized = parser.map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 2);
    html::push_html(&mut out, sanitized);
    while out.ends_with('\n') {
        out.pop();
    }
    Fragment { html: out }
}
