use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;

pub type ImageId = u64;
pub type PageNum = u32;

/// One image of a search result, reduced to the fields a gallery card shows.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Hit {
    pub id: ImageId,
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,
    #[serde(default)]
    pub tags: String,
    pub likes: u64,
    pub views: u64,
    pub comments: u64,
    pub downloads: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub total: u64,
    // Number of hits reachable through the API, capped below `total` for free keys.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub total_hits: u32,
    pub hits: Vec<Hit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "total": 4692,
        "totalHits": 500,
        "hits": [
            {
                "id": 195893,
                "pageURL": "https://pixabay.com/en/blossom-bloom-flower-195893/",
                "type": "photo",
                "tags": "blossom, bloom, flower",
                "previewURL": "https://cdn.pixabay.com/photo/2013/10/15/09/12/flower-195893_150.jpg",
                "webformatURL": "https://pixabay.com/get/35bbf209e13e39d2_640.jpg",
                "webformatWidth": 640,
                "webformatHeight": 360,
                "largeImageURL": "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg",
                "imageWidth": 4000,
                "imageHeight": 2250,
                "views": 7671,
                "downloads": 6439,
                "likes": 5,
                "comments": 2,
                "user_id": 48777,
                "user": "Josch13"
            }
        ]
    }"#;

    #[test]
    fn decode_page() {
        let page: SearchPage = serde_json::from_str(PAGE).unwrap();
        assert_eq!(page.total, 4692);
        assert_eq!(page.total_hits, 500);
        assert_eq!(page.hits.len(), 1);
        let hit = &page.hits[0];
        assert_eq!(hit.id, 195893);
        assert_eq!(hit.tags, "blossom, bloom, flower");
        assert!(hit.webformat_url.ends_with("_640.jpg"));
        assert!(hit.large_image_url.ends_with("_1280.jpg"));
        assert_eq!(
            (hit.likes, hit.views, hit.comments, hit.downloads),
            (5, 7671, 2, 6439)
        );
    }

    #[test]
    fn decode_empty_page() {
        let page: SearchPage =
            serde_json::from_str(r#"{"total": 0, "totalHits": "0", "hits": []}"#).unwrap();
        assert_eq!(page.total_hits, 0);
        assert!(page.hits.is_empty());
    }

    #[test]
    fn missing_hits_is_an_error() {
        assert!(serde_json::from_str::<SearchPage>(r#"{"total": 1, "totalHits": 1}"#).is_err());
    }
}
