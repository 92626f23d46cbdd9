//! Static OpenAPI 3 document served at `/v3/api-docs`.

use serde_json::{json, Value};

const FACILITY_FIELDS: [&str; 41] = [
    "siteNumber",
    "type",
    "facilityName",
    "faaIdent",
    "icaoIdent",
    "region",
    "districtOffice",
    "state",
    "stateFull",
    "county",
    "city",
    "ownership",
    "use",
    "manager",
    "managerPhone",
    "latitude",
    "latitudeSec",
    "longitude",
    "longitudeSec",
    "elevation",
    "magneticVariation",
    "tpa",
    "vfrSectional",
    "boundaryArtcc",
    "boundaryArtccName",
    "responsibleArtcc",
    "responsibleArtccName",
    "fssPhoneNumber",
    "fssPhoneNumberTollfree",
    "notamFacilityIdent",
    "status",
    "certificationTypeDate",
    "customsAirportOfEntry",
    "militaryJointUse",
    "militaryLanding",
    "lightingSchedule",
    "beaconSchedule",
    "controlTower",
    "unicom",
    "ctaf",
    "effectiveDate",
];

fn problem_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/problem+json": {
                "schema": { "$ref": "#/components/schemas/Problem" }
            }
        }
    })
}

/// Builds the API description for the lookup routes.
pub fn document() -> Value {
    let properties: serde_json::Map<String, Value> = FACILITY_FIELDS
        .iter()
        .map(|field| ((*field).to_owned(), json!({ "type": "string", "nullable": true })))
        .collect();

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Aerodex Airport Lookup API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Airport details by ICAO code, backed by aviationapi.com with caching, retries and a circuit breaker."
        },
        "paths": {
            "/api/v1/airports/{icao}": {
                "get": {
                    "summary": "Get airport by ICAO code",
                    "operationId": "getAirportByIcao",
                    "tags": ["Airports"],
                    "parameters": [{
                        "name": "icao",
                        "in": "path",
                        "required": true,
                        "description": "4-letter ICAO code, case-insensitive (e.g. SBSP, KSPG)",
                        "schema": { "type": "string", "pattern": "^[A-Za-z]{4}$" }
                    }],
                    "responses": {
                        "200": {
                            "description": "Airport found",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Airport" }
                                }
                            }
                        },
                        "400": problem_response("Invalid ICAO code"),
                        "404": problem_response("Airport not found"),
                        "503": problem_response("Upstream provider unavailable")
                    }
                }
            },
            "/actuator/health": {
                "get": {
                    "summary": "Service health",
                    "operationId": "health",
                    "tags": ["Operations"],
                    "responses": { "200": { "description": "Service is up" } }
                }
            }
        },
        "components": {
            "schemas": {
                "Airport": { "type": "object", "properties": properties },
                "Problem": {
                    "type": "object",
                    "properties": {
                        "type": { "type": "string" },
                        "title": { "type": "string" },
                        "status": { "type": "integer" },
                        "detail": { "type": "string" }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_lookup_route_and_every_field() {
        let doc = document();

        assert!(doc["paths"]["/api/v1/airports/{icao}"]["get"].is_object());
        let properties = doc["components"]["schemas"]["Airport"]["properties"]
            .as_object()
            .expect("airport properties");
        assert_eq!(properties.len(), 41);
        assert!(properties.contains_key("fssPhoneNumberTollfree"));
    }
}
