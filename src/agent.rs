use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::fetcher::Fetcher;
use crate::llm::Summarizer;
use crate::post::BlogPost;
use crate::writer::PostWriter;

/// Counters for a single run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub articles: usize,
    pub published: usize,
    pub skipped: usize,
    pub failed_writes: usize,
}

pub struct Agent {
    fetcher: Fetcher,
    summarizer: Summarizer,
    writer: PostWriter,
    feeds: Vec<String>,
    item_delay: Duration,
}

impl Agent {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);

        Ok(Self {
            fetcher: Fetcher::new(timeout)?,
            summarizer: Summarizer::new(config.llm.clone(), timeout)?,
            writer: PostWriter::new(&config.posts_dir),
            feeds: config.feeds.clone(),
            item_delay: Duration::from_secs(config.item_delay_secs),
        })
    }

    /// Fetch, summarize and publish every article once.
    ///
    /// Articles are handled one at a time. A failed summary or write only
    /// skips that article.
    pub async fn run_once(&self) -> RunReport {
        info!("AI News Agent started");
        let articles = self.fetcher.fetch_articles(&self.feeds).await;
        let mut report = RunReport {
            articles: articles.len(),
            ..Default::default()
        };

        for article in &articles {
            info!("Processing: {}", article.title);
            let summary = self.summarizer.summarize(&article.content).await;
            if summary.is_empty() {
                warn!("Empty summary for: {}", article.title);
                report.skipped += 1;
                continue;
            }

            let post = BlogPost::from_response(&summary, article);
            match self.writer.save(&post) {
                Ok(_) => report.published += 1,
                Err(e) => {
                    error!("Failed to save post '{}': {}", post.title, e);
                    report.failed_writes += 1;
                }
            }

            tokio::time::sleep(self.item_delay).await;
        }

        info!(
            "AI News Agent run finished. {} articles, {} published, {} skipped",
            report.articles, report.published, report.skipped
        );
        report
    }
}

fn run_interval(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

pub async fn start_scheduled_runs(agent: Arc<Agent>, interval_minutes: u64) {
    let interval = run_interval(interval_minutes);

    loop {
        agent.run_once().await;
        info!("Sleeping for {} minutes...", interval_minutes);
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_interval_in_minutes() {
        assert_eq!(run_interval(60), Duration::from_secs(3600));
        assert_eq!(run_interval(0), Duration::ZERO);
    }

    #[test]
    fn test_huge_run_interval_saturates() {
        assert_eq!(run_interval(u64::MAX), Duration::from_secs(u64::MAX));
    }
}
