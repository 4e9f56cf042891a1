//! Tenant-scoped record handlers.
//!
//! These are the client, property and building listing endpoints that sit
//! behind the access gate. They take a [`ScopedRequest`], so they can only be
//! called after the gate admitted the request, and they filter by
//! [`ScopedRequest::client_filter`] without re-checking roles.
//!
//! Records live in an in-memory [`RecordStore`]; the document database the
//! portal uses in production is an external collaborator.

use serde::Serialize;

use crate::error::ErrorBody;
use crate::gate::ScopedRequest;

use super::HttpResponse;

/// Page size used when `limit` is absent or invalid.
pub const DEFAULT_LIMIT: usize = 10;
/// Largest page size a caller may request.
pub const MAX_LIMIT: usize = 100;

/// A client organization (tenant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    /// Tenant identifier
    pub id: String,
    /// Display name
    pub name: String,
}

/// A managed property owned by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    /// Property identifier
    pub id: String,
    /// Owning tenant
    pub client_id: String,
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
}

/// A building on a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingRecord {
    /// Building identifier
    pub id: String,
    /// Owning tenant
    pub client_id: String,
    /// Property the building stands on
    pub property_id: String,
    /// Display name
    pub name: String,
    /// Number of floors
    pub floors: u32,
}

/// Page position and size parsed from `page` and `limit` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// One-based page number
    pub page: usize,
    /// Page size
    pub limit: usize,
    /// Number of matching records across all pages
    pub total: usize,
}

impl Pagination {
    /// Reads `page` and `limit` from the scoped query.
    ///
    /// Missing, non-numeric or zero values fall back to page 1 and
    /// [`DEFAULT_LIMIT`]; `limit` is capped at [`MAX_LIMIT`].
    pub fn from_request(scoped: &ScopedRequest, total: usize) -> Self {
        let parse = |key: &str| {
            scoped
                .query()
                .get(key)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
        };

        Self {
            page: parse("page").unwrap_or(1),
            limit: parse("limit").unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
            total,
        }
    }

    fn window<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let start = (self.page - 1).saturating_mul(self.limit);
        items.iter().skip(start).take(self.limit).cloned().collect()
    }
}

#[derive(Serialize)]
struct ListBody<T: Serialize> {
    success: bool,
    data: Vec<T>,
    pagination: Pagination,
}

#[derive(Serialize)]
struct ItemBody<'a, T: Serialize> {
    success: bool,
    data: &'a T,
}

/// In-memory collection of client, property and building records.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    clients: Vec<ClientRecord>,
    properties: Vec<PropertyRecord>,
    buildings: Vec<BuildingRecord>,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A small two-tenant data set (`acme` and `globex`).
    pub fn sample() -> Self {
        let mut store = Self::new();
        store.add_client("acme", "Acme Estates");
        store.add_client("globex", "Globex Holdings");

        store.add_property("prop-1", "acme", "Harbour View", "1 Quay Street");
        store.add_property("prop-2", "acme", "Elm Court", "22 Elm Road");
        store.add_property("prop-3", "globex", "Globex Tower", "100 Main Avenue");

        store.add_building("bld-1", "acme", "prop-1", "North Block", 6);
        store.add_building("bld-2", "acme", "prop-1", "South Block", 4);
        store.add_building("bld-3", "acme", "prop-2", "Court House", 3);
        store.add_building("bld-4", "globex", "prop-3", "Tower", 32);
        store
    }

    /// Adds a client record.
    pub fn add_client(&mut self, id: &str, name: &str) {
        self.clients.push(ClientRecord {
            id: id.to_string(),
            name: name.to_string(),
        });
    }

    /// Adds a property record.
    pub fn add_property(&mut self, id: &str, client_id: &str, name: &str, address: &str) {
        self.properties.push(PropertyRecord {
            id: id.to_string(),
            client_id: client_id.to_string(),
            name: name.to_string(),
            address: address.to_string(),
        });
    }

    /// Adds a building record.
    pub fn add_building(
        &mut self,
        id: &str,
        client_id: &str,
        property_id: &str,
        name: &str,
        floors: u32,
    ) {
        self.buildings.push(BuildingRecord {
            id: id.to_string(),
            client_id: client_id.to_string(),
            property_id: property_id.to_string(),
            name: name.to_string(),
            floors,
        });
    }

    /// `GET /clients`: client records visible to the caller.
    pub fn list_clients(&self, scoped: &ScopedRequest) -> HttpResponse {
        let filter = scoped.client_filter();
        let matching: Vec<ClientRecord> = self
            .clients
            .iter()
            .filter(|c| filter.map_or(true, |id| c.id == id))
            .cloned()
            .collect();
        list_response(scoped, "clients", matching)
    }

    /// `GET /properties`: property records visible to the caller.
    pub fn list_properties(&self, scoped: &ScopedRequest) -> HttpResponse {
        let filter = scoped.client_filter();
        let matching: Vec<PropertyRecord> = self
            .properties
            .iter()
            .filter(|p| filter.map_or(true, |id| p.client_id == id))
            .cloned()
            .collect();
        list_response(scoped, "properties", matching)
    }

    /// `GET /buildings`: building records visible to the caller, optionally
    /// narrowed by a `propertyId` query parameter.
    pub fn list_buildings(&self, scoped: &ScopedRequest) -> HttpResponse {
        let filter = scoped.client_filter();
        let property = scoped.query().get("propertyId");
        let matching: Vec<BuildingRecord> = self
            .buildings
            .iter()
            .filter(|b| filter.map_or(true, |id| b.client_id == id))
            .filter(|b| property.map_or(true, |id| b.property_id == id))
            .cloned()
            .collect();
        list_response(scoped, "buildings", matching)
    }

    /// `GET /properties/:id`: a single property.
    ///
    /// A property outside the caller's tenant answers `404`, the same as a
    /// property that does not exist.
    pub fn get_property(&self, scoped: &ScopedRequest, property_id: &str) -> HttpResponse {
        let filter = scoped.client_filter();
        let found = self
            .properties
            .iter()
            .find(|p| p.id == property_id && filter.map_or(true, |id| p.client_id == id));

        match found {
            Some(property) => HttpResponse::json(
                200,
                &ItemBody {
                    success: true,
                    data: property,
                },
            ),
            None => {
                scoped
                    .context()
                    .log()
                    .debug(format_args!("property {} not visible", property_id));
                HttpResponse::json(
                    404,
                    &ErrorBody {
                        success: false,
                        error: "Property not found".to_string(),
                    },
                )
            }
        }
    }
}

fn list_response<T: Serialize + Clone>(
    scoped: &ScopedRequest,
    resource: &str,
    matching: Vec<T>,
) -> HttpResponse {
    let pagination = Pagination::from_request(scoped, matching.len());
    let data = pagination.window(&matching);

    scoped.context().log().info(format_args!(
        "listing {}: {} of {} (page {})",
        resource,
        data.len(),
        pagination.total,
        pagination.page
    ));

    HttpResponse::json(
        200,
        &ListBody {
            success: true,
            data,
            pagination,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AccessGate, Principal, QueryParams, RequestMeta};

    fn scoped(principal: Principal, query: &[(&str, &str)]) -> ScopedRequest {
        let meta = RequestMeta {
            request_id: "req-h".to_string(),
            principal: Some(principal),
        };
        let query: QueryParams = query.iter().copied().collect();
        AccessGate::new()
            .evaluate(meta, query)
            .into_result()
            .expect("admitted")
    }

    fn ids(response: &HttpResponse) -> Vec<String> {
        let body = response.body_value().unwrap();
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn standard_user_sees_only_own_properties() {
        let store = RecordStore::sample();
        let req = scoped(Principal::standard_user("acme"), &[]);

        let response = store.list_properties(&req);
        assert_eq!(response.status, 200);
        assert_eq!(ids(&response), ["prop-1", "prop-2"]);
    }

    #[test]
    fn forged_client_id_does_not_widen_results() {
        let store = RecordStore::sample();
        let req = scoped(Principal::standard_user("acme"), &[("clientId", "globex")]);

        assert_eq!(ids(&store.list_properties(&req)), ["prop-1", "prop-2"]);
        assert_eq!(ids(&store.list_clients(&req)), ["acme"]);
    }

    #[test]
    fn admin_sees_everything_or_filters() {
        let store = RecordStore::sample();

        let all = scoped(Principal::admin(), &[]);
        assert_eq!(ids(&store.list_properties(&all)), ["prop-1", "prop-2", "prop-3"]);

        let filtered = scoped(Principal::admin(), &[("clientId", "globex")]);
        assert_eq!(ids(&store.list_properties(&filtered)), ["prop-3"]);
    }

    #[test]
    fn buildings_filter_by_property() {
        let store = RecordStore::sample();
        let req = scoped(Principal::standard_user("acme"), &[("propertyId", "prop-1")]);

        assert_eq!(ids(&store.list_buildings(&req)), ["bld-1", "bld-2"]);
    }

    #[test]
    fn buildings_of_other_tenant_are_hidden() {
        let store = RecordStore::sample();
        let req = scoped(Principal::standard_user("acme"), &[("propertyId", "prop-3")]);

        assert!(ids(&store.list_buildings(&req)).is_empty());
    }

    #[test]
    fn pagination_windows_results() {
        let store = RecordStore::sample();
        let req = scoped(Principal::admin(), &[("page", "2"), ("limit", "2")]);

        let response = store.list_properties(&req);
        assert_eq!(ids(&response), ["prop-3"]);

        let body = response.body_value().unwrap();
        assert_eq!(body["pagination"]["page"], 2);
        assert_eq!(body["pagination"]["limit"], 2);
        assert_eq!(body["pagination"]["total"], 3);
    }

    #[test]
    fn invalid_pagination_falls_back() {
        let req = scoped(Principal::admin(), &[("page", "zero"), ("limit", "100000")]);
        let pagination = Pagination::from_request(&req, 0);

        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, MAX_LIMIT);
    }

    #[test]
    fn page_past_end_is_empty() {
        let store = RecordStore::sample();
        let req = scoped(Principal::admin(), &[("page", "50")]);

        assert!(ids(&store.list_properties(&req)).is_empty());
    }

    #[test]
    fn other_tenant_property_is_not_found() {
        let store = RecordStore::sample();
        let req = scoped(Principal::standard_user("acme"), &[]);

        assert_eq!(store.get_property(&req, "prop-1").status, 200);

        let hidden = store.get_property(&req, "prop-3");
        assert_eq!(hidden.status, 404);
        assert_eq!(
            hidden.body,
            r#"{"success":false,"error":"Property not found"}"#
        );
    }
}
