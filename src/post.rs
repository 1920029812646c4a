use crate::fetcher::Article;

const BOLD: &str = "**";
const TITLE_MARKER: &str = "Title:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub title: String,
    pub body: String,
}

impl BlogPost {
    /// Interpret model output as a blog post.
    ///
    /// Output shaped like `**Title: Some Title** rest` yields its own title;
    /// both the leading `**` and a `Title:` marker are required. Anything
    /// else keeps the article's title and uses the whole output as the body.
    pub fn from_response(summary: &str, article: &Article) -> Self {
        if summary.starts_with(BOLD) {
            if let Some(marker) = summary.find(TITLE_MARKER) {
                return Self::from_structured(summary, marker + TITLE_MARKER.len(), article);
            }
        }

        Self {
            title: article.title.clone(),
            body: summary.to_string(),
        }
    }

    fn from_structured(summary: &str, title_start: usize, article: &Article) -> Self {
        let Some(offset) = summary[title_start..].find(BOLD) else {
            return Self {
                title: article.title.clone(),
                body: summary.to_string(),
            };
        };
        let title_end = title_start + offset;

        // `**Title:**` has nothing between the markers
        let title = if title_end > title_start {
            summary[title_start..title_end].trim().to_string()
        } else {
            article.title.clone()
        };
        let body = summary[title_end + BOLD.len()..].trim().to_string();

        Self { title, body }
    }
}
