use crate::client::Client;
use crate::error::{Error, Result};
use crate::model::{PageNum, SearchPage};
use log::{debug, error};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use strum_macros::IntoStaticStr;

/// Items requested per page. The API defaults to 20 and accepts up to 200.
pub const PER_PAGE: u32 = 40;

async fn finalize<T: DeserializeOwned>(req: RequestBuilder) -> Result<T> {
    let r = req.send().await?;
    let st = r.status();
    if st.is_success() || st.is_redirection() {
        debug!("{} from {}", st, r.url().path());
        let body = r.text().await?;
        Ok(serde_json::from_str(&body)?)
    } else {
        // The url carries the api key, only the path is logged.
        error!("{} from {}", st, r.url().path());
        Err(Error::Api(st.as_u16(), r.text().await?))
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ImageType {
    All,
    #[default]
    Photo,
    Illustration,
    Vector,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    All,
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: String,
    pub image_type: ImageType,
    pub orientation: Orientation,
    pub safesearch: bool,
    pub page: PageNum,
    pub per_page: u32,
}

impl SearchQuery {
    /// Photos in landscape orientation with safe search on, `PER_PAGE` at a time.
    pub fn new<T: Into<String>>(q: T, page: PageNum) -> Self {
        Self {
            q: q.into(),
            image_type: ImageType::default(),
            orientation: Orientation::default(),
            safesearch: true,
            page,
            per_page: PER_PAGE,
        }
    }

    fn pairs(&self) -> [(&'static str, String); 6] {
        [
            ("q", self.q.clone()),
            ("image_type", Into::<&str>::into(self.image_type).to_owned()),
            ("orientation", Into::<&str>::into(self.orientation).to_owned()),
            ("safesearch", self.safesearch.to_string()),
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

impl Client {
    pub(crate) fn search_request(&self, query: &SearchQuery) -> RequestBuilder {
        self.call(&self.api.search).query(&query.pairs())
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        finalize(self.search_request(query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn params(client: &Client, query: &SearchQuery) -> HashMap<String, String> {
        let req = client.search_request(query).build().unwrap();
        assert_eq!(req.method(), reqwest::Method::GET);
        assert_eq!(req.url().path(), "/api/");
        req.url().query_pairs().into_owned().collect()
    }

    #[test]
    fn default_query() {
        let q = SearchQuery::new("yellow flowers", 1);
        assert_eq!(q.image_type, ImageType::Photo);
        assert_eq!(q.orientation, Orientation::Horizontal);
        assert!(q.safesearch);
        assert_eq!(q.per_page, 40);
    }

    #[test]
    fn request_parameters() {
        let client = Client::new("secret").unwrap();
        let p = params(&client, &SearchQuery::new("yellow flowers", 3));
        assert_eq!(p["key"], "secret");
        assert_eq!(p["q"], "yellow flowers");
        assert_eq!(p["image_type"], "photo");
        assert_eq!(p["orientation"], "horizontal");
        assert_eq!(p["safesearch"], "true");
        assert_eq!(p["page"], "3");
        assert_eq!(p["per_page"], "40");
        assert_eq!(p.len(), 7);
    }

    #[test]
    fn request_custom_filters() {
        let client = Client::with_options("k", Some("http://localhost:9000"), None).unwrap();
        let mut q = SearchQuery::new("a&b=c", 1);
        q.image_type = ImageType::Vector;
        q.orientation = Orientation::All;
        q.safesearch = false;
        let p = params(&client, &q);
        assert_eq!(p["q"], "a&b=c");
        assert_eq!(p["image_type"], "vector");
        assert_eq!(p["orientation"], "all");
        assert_eq!(p["safesearch"], "false");
    }

    #[tokio::test]
    #[ignore = "hits the live api, needs PIXABAY_KEY"]
    async fn test_live() {
        let _ = pretty_env_logger::formatted_timed_builder()
            .parse_filters("debug")
            .try_init();
        let key = std::env::var("PIXABAY_KEY").unwrap();
        let client = Client::new(key).unwrap();
        let page = client.search(&SearchQuery::new("cat", 1)).await.unwrap();
        log::info!("got {} of {} hits", page.hits.len(), page.total_hits);
        assert!(page.hits.len() <= PER_PAGE as usize);
    }
}
