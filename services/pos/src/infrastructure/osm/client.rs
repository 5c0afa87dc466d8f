//! OpenStreetMap API 0.6 客户端

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use campus_config::OsmConfig;
use campus_errors::{AppError, AppResult};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{OsmAmenity, OsmNode, OsmNodeFetcher};
use crate::error::{ServiceError, ServiceResult};

/// `GET /node/{id}.json` 的响应体
#[derive(Debug, Deserialize)]
struct OsmResponse {
    #[serde(default)]
    elements: Vec<OsmElement>,
}

#[derive(Debug, Deserialize)]
struct OsmElement {
    #[serde(rename = "type")]
    kind: String,
    id: i64,
    #[serde(default)]
    tags: HashMap<String, String>,
}

pub struct OsmApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl OsmApiClient {
    pub fn new(config: &OsmConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build OSM HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn node_url(&self, node_id: i64) -> String {
        format!("{}/node/{}.json", self.base_url, node_id)
    }
}

#[async_trait]
impl OsmNodeFetcher for OsmApiClient {
    async fn fetch_node(&self, node_id: i64) -> ServiceResult<OsmNode> {
        let url = self.node_url(node_id);
        debug!(%url, "Fetching OSM node");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(node_id, error = %e, "OSM request failed");
            ServiceError::OsmNodeNotFound(node_id)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(node_id, %status, "OSM API returned non-success status");
            return Err(ServiceError::OsmNodeNotFound(node_id));
        }

        let body: OsmResponse = response.json().await.map_err(|e| {
            warn!(node_id, error = %e, "Failed to decode OSM response");
            ServiceError::OsmNodeNotFound(node_id)
        })?;

        node_from_response(node_id, body)
    }
}

fn node_from_response(node_id: i64, response: OsmResponse) -> ServiceResult<OsmNode> {
    let element = response
        .elements
        .into_iter()
        .find(|e| e.kind == "node" && e.id == node_id)
        .ok_or(ServiceError::OsmNodeNotFound(node_id))?;

    node_from_tags(node_id, element.tags)
}

fn node_from_tags(node_id: i64, mut tags: HashMap<String, String>) -> ServiceResult<OsmNode> {
    let mut required = |tag: &str| {
        tags.remove(tag)
            .ok_or_else(|| ServiceError::missing_field(node_id, tag))
    };

    let name = required("name")?;
    let amenity_tag = required("amenity")?;
    let street = required("addr:street")?;
    let house_number = required("addr:housenumber")?;
    let postcode = required("addr:postcode")?;
    let city = required("addr:city")?;

    let amenity = OsmAmenity::from_tag(&amenity_tag).ok_or_else(|| {
        warn!(node_id, amenity = %amenity_tag, "Unsupported OSM amenity");
        ServiceError::missing_field(node_id, "amenity")
    })?;

    Ok(OsmNode {
        node_id,
        name,
        description: tags.remove("description").unwrap_or_default(),
        amenity,
        street,
        house_number,
        postcode,
        city,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADA_JSON: &str = r#"{
        "version": "0.6",
        "generator": "openstreetmap-cgimap",
        "elements": [{
            "type": "node",
            "id": 5589879349,
            "lat": 49.4122362,
            "lon": 8.7077883,
            "tags": {
                "addr:city": "Heidelberg",
                "addr:country": "DE",
                "addr:housenumber": "21",
                "addr:postcode": "69117",
                "addr:street": "Untere Straße",
                "amenity": "cafe",
                "description": "Caffè und Rösterei",
                "name": "Rada"
            }
        }]
    }"#;

    fn parse(json: &str, node_id: i64) -> ServiceResult<OsmNode> {
        let response: OsmResponse = serde_json::from_str(json).unwrap();
        node_from_response(node_id, response)
    }

    #[test]
    fn test_parse_complete_node() {
        let node = parse(RADA_JSON, 5589879349).unwrap();

        assert_eq!(node.name, "Rada");
        assert_eq!(node.amenity, OsmAmenity::Cafe);
        assert_eq!(node.street, "Untere Straße");
        assert_eq!(node.house_number, "21");
        assert_eq!(node.postcode, "69117");
        assert_eq!(node.description, "Caffè und Rösterei");
    }

    #[test]
    fn test_other_element_id_is_not_found() {
        let err = parse(RADA_JSON, 1).unwrap_err();
        assert!(matches!(err, ServiceError::OsmNodeNotFound(1)));
    }

    #[test]
    fn test_missing_description_defaults_to_empty() {
        let json = RADA_JSON.replace(r#""description": "Caffè und Rösterei","#, "");
        let node = parse(&json, 5589879349).unwrap();
        assert_eq!(node.description, "");
    }

    #[test]
    fn test_missing_required_tag() {
        let json = RADA_JSON.replace(r#""addr:street": "Untere Straße","#, "");
        let err = parse(&json, 5589879349).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::OsmNodeMissingFields { ref field, .. } if field == "addr:street"
        ));
    }

    #[test]
    fn test_unsupported_amenity() {
        let json = RADA_JSON.replace(r#""amenity": "cafe""#, r#""amenity": "parking""#);
        let err = parse(&json, 5589879349).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::OsmNodeMissingFields { ref field, .. } if field == "amenity"
        ));
    }

    #[test]
    fn test_node_url() {
        let config = OsmConfig {
            base_url: "http://localhost:8081/api/0.6/".to_string(),
            ..OsmConfig::default()
        };
        let client = OsmApiClient::new(&config).unwrap();
        assert_eq!(
            client.node_url(42),
            "http://localhost:8081/api/0.6/node/42.json"
        );
    }

    #[tokio::test]
    async fn test_unreachable_api_is_node_not_found() {
        let config = OsmConfig {
            base_url: "http://127.0.0.1:9/api/0.6".to_string(),
            timeout_secs: 1,
            ..OsmConfig::default()
        };
        let client = OsmApiClient::new(&config).unwrap();

        let err = client.fetch_node(5589879349).await.unwrap_err();
        assert!(matches!(err, ServiceError::OsmNodeNotFound(5589879349)));
    }
}
