use crate::endpoint::{ApiEndpoint, Endpoint};
use crate::error::Result;
use reqwest::{Client as Http, Proxy, RequestBuilder};
use std::time::Duration;

#[derive(Clone)]
pub struct Client {
    http: Http,
    pub(crate) api: ApiEndpoint,
    key: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new<T: Into<String>>(key: T) -> Result<Self> {
        Self::with_options(key, None, None)
    }

    pub fn with_options<T: Into<String>>(
        key: T,
        host: Option<&str>,
        proxy: Option<&str>,
    ) -> Result<Self> {
        let mut http = Http::builder()
            .connect_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(60));
        if let Some(proxy) = proxy {
            http = http.proxy(Proxy::all(proxy)?);
        }
        Ok(Self {
            http: http.build()?,
            api: ApiEndpoint::with_host(host)?,
            key: key.into(),
        })
    }

    pub(crate) fn call(&self, endpoint: &impl Endpoint) -> RequestBuilder {
        endpoint
            .request(&self.http)
            .query(&[("key", &self.key)])
    }
}
