//! Crawl coordination - the main orchestration logic
//!
//! This module owns the whole crawl: claiming URLs exactly once, bounding
//! concurrency with a fixed worker pool, limiting recursion depth, and
//! detecting termination once every claimed branch has finished.
//!
//! Instead of spawning one task per discovered URL, a fixed pool of
//! `max_concurrent` workers consumes a shared queue. Workers enqueue newly
//! discovered URLs themselves; an atomic in-flight counter tracks claimed but
//! unfinished tasks, and the crawl is over when it reaches zero.

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{build_http_client, fetch_url};
use crate::crawler::limiter::RateLimiter;
use crate::crawler::parser::{extract_links, same_origin};
use crate::robots::RobotsRuleSet;
use crate::storage::{local_path, persist};
use crate::{ConfigError, Result};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use url::Url;

/// One unit of crawl work: a claimed URL and its distance from the seed
#[derive(Debug)]
struct CrawlTask {
    url: Url,
    depth: u32,
}

/// The crawl controller
///
/// Owns all shared crawl state explicitly: the visited set, the pacing gate,
/// the robots rules, and the HTTP client. `run` blocks until every reachable,
/// in-scope, depth-eligible URL has been processed.
pub struct Crawler {
    config: CrawlConfig,
    origin: Url,
    client: Client,
    robots: Option<RobotsRuleSet>,
    limiter: RateLimiter,
    visited: Mutex<HashSet<String>>,
    in_flight: AtomicUsize,
    mirrored: AtomicUsize,
    failed: AtomicUsize,
}

impl Crawler {
    /// Creates a new crawler for the given seed URL
    ///
    /// An unparsable or host-less seed is fatal. When robots compliance is
    /// enabled, robots.txt is fetched here, before any crawling; a failed or
    /// missing robots.txt only disables compliance for this crawl.
    pub async fn new(config: CrawlConfig, seed: &str) -> Result<Self> {
        config.validate()?;

        let origin = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidSeed(format!("{}: {}", seed, e)))?;
        if origin.host_str().is_none() {
            return Err(ConfigError::InvalidSeed(format!("{}: no host", seed)).into());
        }

        let client = build_http_client(&config.user_agent, config.timeout)?;

        let robots = if config.respect_robots {
            load_robots(&client, &origin).await
        } else {
            None
        };

        let delay = robots
            .as_ref()
            .map(|rules| rules.crawl_delay(&config.user_agent))
            .unwrap_or(Duration::ZERO);
        if !delay.is_zero() {
            tracing::info!("Honoring crawl-delay of {:?} between requests", delay);
        }

        Ok(Self {
            config,
            origin,
            client,
            robots,
            limiter: RateLimiter::new(delay),
            visited: Mutex::new(HashSet::new()),
            in_flight: AtomicUsize::new(0),
            mirrored: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        })
    }

    /// Runs the crawl to completion
    ///
    /// Blocks until every claimed branch has been processed, successfully or
    /// not. Only an unusable output directory fails the crawl as a whole;
    /// every other failure is contained to its branch.
    pub async fn run(self) -> Result<()> {
        tokio::fs::create_dir_all(&self.config.output_dir).await?;

        tracing::info!("Starting crawl of {}", self.origin);
        tracing::info!("Output directory: {}", self.config.output_dir.display());
        tracing::info!(
            "Max depth: {}, max concurrent fetches: {}",
            self.config.max_depth,
            self.config.max_concurrent
        );

        let start = std::time::Instant::now();
        let crawler = Arc::new(self);

        let (task_tx, task_rx) = mpsc::unbounded_channel::<CrawlTask>();
        let task_rx = Arc::new(tokio::sync::Mutex::new(task_rx));
        let (done_tx, done_rx) = watch::channel(false);
        let done_tx = Arc::new(done_tx);

        // Claim the seed before any worker starts
        crawler.try_claim(&crawler.origin);
        crawler.in_flight.store(1, Ordering::SeqCst);
        let _ = task_tx.send(CrawlTask {
            url: crawler.origin.clone(),
            depth: 0,
        });

        let mut workers = Vec::with_capacity(crawler.config.max_concurrent);
        for _ in 0..crawler.config.max_concurrent {
            let crawler = Arc::clone(&crawler);
            let task_tx = task_tx.clone();
            let task_rx = Arc::clone(&task_rx);
            let done_tx = Arc::clone(&done_tx);
            let done_rx = done_rx.clone();
            workers.push(tokio::spawn(async move {
                worker_loop(crawler, task_tx, task_rx, done_tx, done_rx).await;
            }));
        }
        drop(task_tx);

        for worker in workers {
            if let Err(e) = worker.await {
                tracing::error!("Worker task panicked: {}", e);
            }
        }

        tracing::info!(
            "Crawl finished in {:?}: {} pages mirrored, {} failed",
            start.elapsed(),
            crawler.mirrored.load(Ordering::SeqCst),
            crawler.failed.load(Ordering::SeqCst)
        );

        Ok(())
    }

    /// Atomically claims a URL for processing
    ///
    /// Returns true if this caller won the claim. The test-and-insert is a
    /// single step under the mutex, so two branches can never both launch
    /// work for the same URL.
    fn try_claim(&self, url: &Url) -> bool {
        let mut visited = self.visited.lock().unwrap();
        visited.insert(url.to_string())
    }

    /// Claims a child URL and enqueues it, unless it is depth-ineligible or
    /// already claimed
    fn enqueue_child(&self, url: Url, depth: u32, task_tx: &mpsc::UnboundedSender<CrawlTask>) {
        if depth > self.config.max_depth {
            return;
        }

        if !self.try_claim(&url) {
            return;
        }

        // Count the task before it becomes visible to other workers
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        if task_tx.send(CrawlTask { url, depth }).is_err() {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }

    /// Processes a single claimed URL
    ///
    /// Any failure here terminates only this branch; the error is logged and
    /// the crawl continues elsewhere.
    async fn process(&self, task: &CrawlTask, task_tx: &mpsc::UnboundedSender<CrawlTask>) {
        // Same-origin guard; link extraction already filters, but the seed
        // path and any future enqueue site go through here too
        if !same_origin(&task.url, &self.origin) {
            tracing::debug!("Skipping off-origin URL: {}", task.url);
            return;
        }

        if let Some(robots) = &self.robots {
            if !robots.is_allowed(task.url.path(), &self.config.user_agent) {
                tracing::info!(
                    "[depth {}] Disallowed by robots.txt: {}",
                    task.depth,
                    task.url
                );
                return;
            }
        }

        tracing::info!("[depth {}] Fetching: {}", task.depth, task.url);

        self.limiter.wait().await;

        let fetched = match fetch_url(&self.client, &task.url).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Fetch failed for {}: {}", task.url, e);
                self.failed.fetch_add(1, Ordering::SeqCst);
                return;
            }
        };

        tracing::debug!(
            "Got {} ({} bytes, {})",
            fetched.status,
            fetched.body.len(),
            if fetched.content_type.is_empty() {
                "no content type"
            } else {
                &fetched.content_type
            }
        );

        let target = local_path(&task.url, &self.config.output_dir);
        if let Err(e) = persist(&target, &fetched.body).await {
            tracing::warn!("Failed to write {}: {}", target.display(), e);
            self.failed.fetch_add(1, Ordering::SeqCst);
            return;
        }
        self.mirrored.fetch_add(1, Ordering::SeqCst);

        if fetched.is_html() {
            let html = String::from_utf8_lossy(&fetched.body);
            let links = extract_links(&html, &task.url, &self.origin);
            tracing::debug!("Extracted {} links from {}", links.len(), task.url);

            for link in links {
                self.enqueue_child(link, task.depth + 1, task_tx);
            }
        }
    }
}

/// Worker loop: pull tasks from the shared queue until the crawl drains
///
/// Each worker processes one task at a time, so the pool size is the hard
/// bound on concurrent fetches. The worker that finishes the last in-flight
/// task flips the done signal, which releases every worker blocked on an
/// empty queue.
async fn worker_loop(
    crawler: Arc<Crawler>,
    task_tx: mpsc::UnboundedSender<CrawlTask>,
    task_rx: Arc<tokio::sync::Mutex<mpsc::UnboundedReceiver<CrawlTask>>>,
    done_tx: Arc<watch::Sender<bool>>,
    mut done_rx: watch::Receiver<bool>,
) {
    loop {
        let task = {
            let mut rx = task_rx.lock().await;
            tokio::select! {
                task = rx.recv() => task,
                _ = done_rx.changed() => None,
            }
        };

        let Some(task) = task else {
            break;
        };

        crawler.process(&task, &task_tx).await;

        if crawler.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Last outstanding branch finished
            let _ = done_tx.send(true);
        }
    }
}

/// Fetches and parses robots.txt for the seed origin
///
/// Returns None on any failure (including 404), which disables robots
/// compliance for this crawl with a warning.
async fn load_robots(client: &Client, origin: &Url) -> Option<RobotsRuleSet> {
    let robots_url = origin.join("/robots.txt").ok()?;
    tracing::info!("Loading robots.txt from {}", robots_url);

    match fetch_url(client, &robots_url).await {
        Ok(result) => {
            let text = String::from_utf8_lossy(&result.body);
            let rules = RobotsRuleSet::parse(&text);
            tracing::info!("Parsed {} robots.txt rule group(s)", rules.len());
            Some(rules)
        }
        Err(e) => {
            tracing::warn!(
                "Could not load robots.txt ({}); crawling without restrictions",
                e
            );
            None
        }
    }
}
