use anyhow::Context;
use std::ops::Deref;
use std::time::Duration;

use crate::cache::Producer;

pub struct HttpClient(reqwest::Client);

impl Default for HttpClient {
    fn default() -> Self {
        Self(
            reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap(),
        )
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl HttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn inner(&self) -> &reqwest::Client {
        &self.0
    }
}

#[async_trait::async_trait]
impl Producer for HttpClient {
    async fn fetch(&self, url: &str) -> anyhow::Result<String> {
        self.0
            .get(url)
            .send()
            .await
            .with_context(|| format!("fail to send GET request to url: `{url}`"))?
            .text()
            .await
            .with_context(|| format!("fail to read response body from url: `{url}`"))
    }
}
