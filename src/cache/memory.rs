use std::sync::RwLock;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::future::try_join_all;
use serde::Serialize;

use super::CacheStorage;

#[derive(Debug, Clone, PartialEq)]
pub struct CachedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl CachedResponse {
    fn placeholder() -> Self {
        Self {
            status: 200,
            content_type: None,
            body: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CacheSummary {
    pub name: String,
    pub urls: Vec<String>,
}

type Bucket = Vec<(String, CachedResponse)>;

/// Cache storage held in memory. With an origin, `add_all` fetches each
/// URL relative to it; without one it stores empty 200 responses.
pub struct MemoryCacheStorage {
    origin: Option<String>,
    client: reqwest::Client,
    buckets: RwLock<Vec<(String, Bucket)>>,
}

impl MemoryCacheStorage {
    pub fn new(origin: Option<String>) -> Self {
        Self {
            origin,
            client: reqwest::Client::new(),
            buckets: RwLock::new(Vec::new()),
        }
    }

    /// URLs stored in a bucket, in insertion order
    pub fn entries(&self, cache_name: &str) -> Option<Vec<String>> {
        let buckets = self.buckets.read().expect("Cache storage lock poisoned");
        buckets
            .iter()
            .find(|(name, _)| name == cache_name)
            .map(|(_, bucket)| bucket.iter().map(|(url, _)| url.clone()).collect())
    }

    pub fn response(&self, cache_name: &str, url: &str) -> Option<CachedResponse> {
        let buckets = self.buckets.read().expect("Cache storage lock poisoned");
        buckets
            .iter()
            .find(|(name, _)| name == cache_name)
            .and_then(|(_, bucket)| bucket.iter().find(|(u, _)| u == url))
            .map(|(_, response)| response.clone())
    }

    pub fn summaries(&self) -> Vec<CacheSummary> {
        let buckets = self.buckets.read().expect("Cache storage lock poisoned");
        buckets
            .iter()
            .map(|(name, bucket)| CacheSummary {
                name: name.clone(),
                urls: bucket.iter().map(|(url, _)| url.clone()).collect(),
            })
            .collect()
    }

    async fn fetch(&self, url: &str) -> Result<CachedResponse> {
        let Some(origin) = &self.origin else {
            return Ok(CachedResponse::placeholder());
        };

        let full_url = format!("{}{}", origin.trim_end_matches('/'), url);
        let resp = self.client.get(&full_url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("Request for {} failed with status {}", full_url, status));
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = resp.bytes().await?.to_vec();

        Ok(CachedResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

#[async_trait]
impl CacheStorage for MemoryCacheStorage {
    async fn add_all(&self, cache_name: &str, urls: &[String]) -> Result<()> {
        // Fetch everything before touching the bucket so a single
        // failure leaves it as it was
        let responses = try_join_all(urls.iter().map(|url| self.fetch(url))).await?;

        let mut buckets = self.buckets.write().expect("Cache storage lock poisoned");
        let index = match buckets.iter().position(|(name, _)| name == cache_name) {
            Some(index) => index,
            None => {
                buckets.push((cache_name.to_string(), Vec::new()));
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[index].1;
        for (url, response) in urls.iter().zip(responses) {
            match bucket.iter_mut().find(|(u, _)| u == url) {
                Some(entry) => entry.1 = response,
                None => bucket.push((url.clone(), response)),
            }
        }
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let buckets = self.buckets.read().expect("Cache storage lock poisoned");
        Ok(buckets.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn delete(&self, cache_name: &str) -> Result<bool> {
        let mut buckets = self.buckets.write().expect("Cache storage lock poisoned");
        let before = buckets.len();
        buckets.retain(|(name, _)| name != cache_name);
        Ok(buckets.len() != before)
    }
}
