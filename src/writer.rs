use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::post::BlogPost;

const MAX_TITLE_CHARS: usize = 60;

/// Convert a post title to a filesystem-safe filename stem.
pub fn sanitize_filename(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|&c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    kept.trim_end().replace(' ', "_")
}

/// `YYYY-MM-DD_<sanitized title prefix>.md`
pub fn post_filename(title: &str, date: NaiveDate) -> String {
    let stem: String = sanitize_filename(title)
        .chars()
        .take(MAX_TITLE_CHARS)
        .collect();
    format!("{}_{}.md", date.format("%Y-%m-%d"), stem)
}

pub fn render_markdown(post: &BlogPost) -> String {
    format!("# {}\n\n{}\n", post.title, post.body)
}

/// Writes blog posts as Markdown files into a single directory.
///
/// Two posts from the same day whose titles share a sanitized prefix map to
/// the same file; the later one replaces the earlier.
pub struct PostWriter {
    posts_dir: PathBuf,
}

impl PostWriter {
    pub fn new<P: Into<PathBuf>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.into(),
        }
    }

    pub fn save(&self, post: &BlogPost) -> anyhow::Result<PathBuf> {
        self.save_dated(post, Local::now().date_naive())
    }

    pub fn save_dated(&self, post: &BlogPost, date: NaiveDate) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(&self.posts_dir)?;

        let path = self.posts_dir.join(post_filename(&post.title, date));
        std::fs::write(&path, render_markdown(post))?;

        info!("Saved post: {}", path.display());
        Ok(path)
    }
}
