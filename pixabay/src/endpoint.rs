use reqwest::{Client, Method, RequestBuilder, Url};

type Result<T> = std::result::Result<T, url::ParseError>;
pub(crate) type SimpleEndpoint = (Method, Url);

pub(crate) const DEFAULT_HOST: &str = "https://pixabay.com";

struct Version {
    prefix: String,
}

impl Version {
    fn new<T: Into<String>>(prefix: T) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn get(&self, path: &str) -> Result<SimpleEndpoint> {
        let url = format!("{}/{}", self.prefix, path);
        Ok((Method::GET, Url::parse(&url)?))
    }
}

pub trait Endpoint {
    fn request(&self, client: &Client) -> RequestBuilder;
}

impl Endpoint for SimpleEndpoint {
    fn request(&self, client: &Client) -> RequestBuilder {
        client.request(self.0.clone(), self.1.clone())
    }
}

#[derive(Debug, Clone)]
pub struct ApiEndpoint {
    pub search: SimpleEndpoint,
}

impl ApiEndpoint {
    pub fn with_host(host: Option<&str>) -> Result<Self> {
        let host = host.unwrap_or(DEFAULT_HOST).trim_end_matches('/');
        let api = Version::new(format!("{host}/api"));
        // The image endpoint is the bare version root; videos live under "videos/".
        Ok(Self {
            search: api.get("")?,
        })
    }
}
