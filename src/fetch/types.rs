//! Wire types for the gateway status document.
//!
//! Mirrors `GET <base>/v1/metadata/status`. Every field except `name` has a
//! default because the gateway omits instance counts for services it cannot
//! resolve through discovery, or sends them as `null`.

use serde::{Deserialize, Deserializer, Serialize};

/// Health of a service as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceHealth {
    Healthy,
    Unhealthy,
    /// Also used for any status string this build does not recognise.
    #[default]
    Unknown,
}

impl ServiceHealth {
    /// Map a raw status string, degrading unrecognised values to `Unknown`.
    pub fn from_status(raw: &str) -> Self {
        match raw {
            "HEALTHY" => ServiceHealth::Healthy,
            "UNHEALTHY" => ServiceHealth::Unhealthy,
            _ => ServiceHealth::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceHealth::Healthy => "HEALTHY",
            ServiceHealth::Unhealthy => "UNHEALTHY",
            ServiceHealth::Unknown => "UNKNOWN",
        }
    }
}

impl<'de> Deserialize<'de> for ServiceHealth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Non-string values (numbers, objects) degrade instead of failing the snapshot.
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(raw
            .as_str()
            .map(ServiceHealth::from_status)
            .unwrap_or_default())
    }
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One full status document fetched from the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub services: Vec<ServiceStatus>,
}

/// Status of a single upstream service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceStatus {
    /// Unique key of the service on the board.
    pub name: String,

    #[serde(default)]
    pub status: ServiceHealth,

    /// Registered instances. `healthy + unhealthy <= instances` is trusted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub instances: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub healthy: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub unhealthy: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub apis: Vec<ApiDescriptor>,
}

/// An API exposed by a service through the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiDescriptor {
    pub path: String,

    /// HTTP verbs accepted on `path`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub methods: Vec<String>,

    #[serde(default)]
    pub secured: bool,

    #[serde(default, rename = "async")]
    pub is_async: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gateway_document() {
        let body = r#"{
            "clientId": "c1",
            "services": [
                {
                    "name": "svc-a",
                    "type": "http",
                    "status": "HEALTHY",
                    "instances": 3,
                    "healthy": 3,
                    "unhealthy": 0,
                    "apis": [
                        { "name": "get", "path": "v1/items", "methods": ["GET", "POST"], "secured": true, "async": false }
                    ]
                }
            ]
        }"#;

        let snapshot: Snapshot = serde_json::from_str(body).unwrap();
        assert_eq!(snapshot.client_id, "c1");
        assert_eq!(snapshot.services.len(), 1);

        let svc = &snapshot.services[0];
        assert_eq!(svc.status, ServiceHealth::Healthy);
        assert_eq!(svc.instances, 3);
        assert_eq!(svc.apis[0].methods, vec!["GET", "POST"]);
        assert!(svc.apis[0].secured);
        assert!(!svc.apis[0].is_async);
    }

    #[test]
    fn test_unresolved_service_defaults() {
        let body = r#"{ "clientId": "c1", "services": [ { "name": "svc-x", "status": "UNKNOWN" } ] }"#;
        let snapshot: Snapshot = serde_json::from_str(body).unwrap();

        let svc = &snapshot.services[0];
        assert_eq!(svc.status, ServiceHealth::Unknown);
        assert_eq!((svc.instances, svc.healthy, svc.unhealthy), (0, 0, 0));
        assert!(svc.apis.is_empty());
    }

    #[test]
    fn test_unrecognised_status_degrades_to_unknown() {
        let body = r#"{ "services": [
            { "name": "a", "status": "DEGRADED" },
            { "name": "b", "status": null },
            { "name": "c" },
            { "name": "d", "status": 3 },
            { "name": "e", "status": { "code": "HEALTHY" } }
        ] }"#;
        let snapshot: Snapshot = serde_json::from_str(body).unwrap();

        assert!(snapshot
            .services
            .iter()
            .all(|s| s.status == ServiceHealth::Unknown));
        assert_eq!(snapshot.client_id, "");
    }

    #[test]
    fn test_null_fields_do_not_reject_snapshot() {
        let body = r#"{ "clientId": "c1", "services": [
            { "name": "ok", "status": "HEALTHY", "instances": 2, "healthy": 2, "unhealthy": 0,
              "apis": [ { "path": "v1/items", "methods": null, "secured": true } ] },
            { "name": "unresolved", "status": null, "instances": null, "healthy": null,
              "unhealthy": null, "apis": null }
        ] }"#;
        let snapshot: Snapshot = serde_json::from_str(body).unwrap();
        assert_eq!(snapshot.services.len(), 2);

        let ok = &snapshot.services[0];
        assert_eq!((ok.status, ok.instances, ok.healthy), (ServiceHealth::Healthy, 2, 2));
        assert!(ok.apis[0].methods.is_empty());

        let unresolved = &snapshot.services[1];
        assert_eq!(unresolved.status, ServiceHealth::Unknown);
        assert_eq!((unresolved.instances, unresolved.healthy, unresolved.unhealthy), (0, 0, 0));
        assert!(unresolved.apis.is_empty());
    }

    #[test]
    fn test_status_serializes_upper_case() {
        let json = serde_json::to_string(&ServiceHealth::Unhealthy).unwrap();
        assert_eq!(json, "\"UNHEALTHY\"");
        assert_eq!(ServiceHealth::Healthy.as_str(), "HEALTHY");
    }
}
