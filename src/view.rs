//! Renders search results for output.

use crate::post::Post;
use crate::report::ReportBundle;
use crate::request::SearchRequest;
use crate::text;
use clap::ValueEnum;
use itertools::Itertools;

/// Default number of posts shown per keyword in a digest.
pub const DIGEST_LIMIT: usize = 10;

/// Default maximum length of a post's text in a digest.
pub const SNIPPET_WIDTH: usize = 180;

/// How results are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// A short, human-readable summary of each keyword's posts.
    #[default]
    Digest,

    /// Every result, in full, as JSON.
    Json,
}

/// View renderer options.
#[derive(Debug)]
pub struct ViewOptions {
    limit: usize,
    width: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            limit: DIGEST_LIMIT,
            width: SNIPPET_WIDTH,
        }
    }
}

impl ViewOptions {
    /// Sets the number of posts shown per keyword.
    pub fn limit(self, limit: usize) -> Self {
        Self { limit, ..self }
    }

    /// Sets the maximum length of a post's text.
    pub fn width(self, width: usize) -> Self {
        Self { width, ..self }
    }
}

/// Marks an item that can be converted into a string for display on a terminal.
pub trait Viewable {
    /// Converts the item into a string for display on a terminal.
    fn view(&self, opts: &ViewOptions) -> String;
}

impl Viewable for Post {
    fn view(&self, opts: &ViewOptions) -> String {
        let who = match self.handle() {
            Some(handle) => format!("@{handle}"),
            None => String::from("(unknown)"),
        };
        let snippet = text::snippet(&self.text, opts.width);
        let line = if snippet.is_empty() {
            format!("{who} ({})", self.url)
        } else {
            format!("{who} — {snippet} ({})", self.url)
        };
        match &self.created_at {
            Some(created_at) => format!("{line} — {created_at}"),
            None => line,
        }
    }
}

impl Viewable for ReportBundle {
    fn view(&self, opts: &ViewOptions) -> String {
        self.results()
            .map(|(keyword, result)| {
                let body = if result.is_empty() {
                    no_results(self.request())
                } else {
                    result
                        .posts
                        .iter()
                        .take(opts.limit)
                        .map(|post| post.view(opts))
                        .join("\n")
                };
                format!("== {keyword} ==\n{body}")
            })
            .join("\n\n")
    }
}

fn no_results(request: &SearchRequest) -> String {
    let options = request.options();
    let lang = options.language().unwrap_or("any");
    let retweets = if options.includes_retweets() {
        "included"
    } else {
        "excluded"
    };
    format!(
        "(no results in last {}; lang={lang}, retweets={retweets})",
        request.window()
    )
}

/// Renders `bundle` in the given `format`.
///
/// JSON output contains everything in the bundle; digests show at most
/// [`DIGEST_LIMIT`] posts per keyword.
pub fn render(bundle: &ReportBundle, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Digest => Ok(bundle.view(&ViewOptions::default())),
        OutputFormat::Json => serde_json::to_string_pretty(bundle),
    }
}
