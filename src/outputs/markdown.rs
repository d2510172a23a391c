//! Markdown rendering of a collection run.

use crate::models::{Collection, SourceReport};
use crate::utils::{slugify_title, upcase};
use std::error::Error;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Render the whole collection: header, source index, one section per source.
pub fn collection_to_markdown(collection: &Collection) -> String {
    let mut md = String::new();

    writeln!(
        md,
        "# AI News Collection: {} {} Edition\n",
        collection.local_date,
        upcase(&collection.time_of_day)
    )
    .unwrap();
    writeln!(
        md,
        "Collected {} articles from {} sources at {}.\n",
        collection.article_count(),
        collection.sources.len(),
        collection.local_time
    )
    .unwrap();

    writeln!(md, "## Sources\n").unwrap();
    for source in &collection.sources {
        writeln!(
            md,
            "- [{}](#{}) ({})",
            source.name,
            slugify_title(&source.name),
            source.articles.len()
        )
        .unwrap();
    }
    md.push('\n');

    for source in &collection.sources {
        md.push_str(&source_to_markdown(source));
    }
    md
}

fn source_to_markdown(source: &SourceReport) -> String {
    let mut md = String::new();
    writeln!(md, "## {}\n", source.name).unwrap();
    match source.source_tag() {
        Some(tag) => writeln!(md, "<small>`{}`</small> <{}>\n", tag, source.url).unwrap(),
        None => writeln!(md, "<{}>\n", source.url).unwrap(),
    }

    if let Some(error) = &source.error {
        writeln!(md, "> {}\n", error).unwrap();
    }

    for (i, article) in source.articles.iter().enumerate() {
        let escaped = escape_markdown(&article.title);
        let title = match &article.url {
            Some(url) => format!("[{}](<{}>)", escaped, url.replace('>', "%3E")),
            None => escaped,
        };
        writeln!(
            md,
            "{}. **{}** ({})",
            i + 1,
            title,
            escape_markdown(&article.date)
        )
        .unwrap();
        if let Some(description) = &article.description {
            writeln!(md, "   {}", escape_markdown(description)).unwrap();
        }
    }
    if !source.articles.is_empty() {
        md.push('\n');
    }
    md
}

/// Backslash-escape characters that would change inline Markdown structure.
fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Write the rendered collection to `{output_dir}/{date}_{time_of_day}.md`.
#[instrument(level = "info", skip_all, fields(%output_dir))]
pub async fn write_markdown(
    collection: &Collection,
    output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = Path::new(output_dir).join(format!(
        "{}_{}.md",
        collection.local_date, collection.time_of_day
    ));
    fs::write(&path, collection_to_markdown(collection)).await?;
    info!(path = %path.display(), "Wrote Markdown collection");
    Ok(path)
}
