//! Digitransit API response DTOs.
//!
//! These types map directly to the GraphQL JSON responses. Itineraries are
//! carried as raw `serde_json::Value`s at the plan level so that one
//! malformed itinerary can be rejected during normalization without losing
//! the rest of the batch.

use serde::{Deserialize, Serialize};

/// Request envelope for a GraphQL POST: query text plus variables.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

/// Generic GraphQL response envelope.
///
/// A non-empty `errors` array means the query failed, regardless of the
/// HTTP status the upstream chose to send with it.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,

    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

/// A single GraphQL-level error.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: Option<String>,
}

/// `data` payload of the stop search query.
#[derive(Debug, Deserialize)]
pub struct StopsData {
    #[serde(default)]
    pub stops: Option<Vec<RawStop>>,
}

/// A stop record from the name search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStop {
    pub gtfs_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// `data` payload of the planning query.
#[derive(Debug, Deserialize)]
pub struct PlanData {
    pub plan: Option<RawPlan>,
}

/// The plan result: an ordered list of itineraries, kept raw until
/// normalization so failures stay per-itinerary.
#[derive(Debug, Deserialize)]
pub struct RawPlan {
    #[serde(default)]
    pub itineraries: Vec<serde_json::Value>,
}

/// One itinerary as the upstream shapes it.
///
/// The itinerary-level timestamps and duration are required: an itinerary
/// missing any of them is rejected whole during normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItinerary {
    /// Overall departure, epoch milliseconds.
    pub start_time: i64,

    /// Overall arrival, epoch milliseconds.
    pub end_time: i64,

    /// Total duration in seconds.
    pub duration: i64,

    /// Legs in travel order.
    pub legs: Vec<RawLeg>,
}

/// One leg of an itinerary.
///
/// Mode, timestamps and duration are required; everything else is optional
/// because the upstream omits fields rather than sending nulls in several
/// places, and walking legs have no route at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLeg {
    pub mode: String,
    pub start_time: i64,
    pub end_time: i64,
    pub duration: i64,
    pub from: Option<RawPlace>,
    pub to: Option<RawPlace>,
    pub route: Option<RawRoute>,
    pub trip: Option<RawTrip>,
}

/// Boarding or alighting place of a leg. The nested stop may be absent
/// for non-stop places (e.g. walk origins).
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlace {
    pub stop: Option<RawStopRef>,
}

/// Stop reference nested inside a leg place.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStopRef {
    pub gtfs_id: Option<String>,
    pub name: Option<String>,
}

/// Route metadata, reachable directly on a leg or via its trip.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRoute {
    pub short_name: Option<String>,
    pub long_name: Option<String>,
}

/// Trip metadata; only its route is of interest here.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrip {
    pub route: Option<RawRoute>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_stops_response() {
        let json = r#"{
            "data": {
                "stops": [
                    {"gtfsId": "HSL:1010101", "name": "Aalto Yliopisto", "lat": 60.18456, "lon": 24.82928},
                    {"gtfsId": "HSL:1010102", "name": "Aalto-yliopiston metroasema", "lat": 60.18445, "lon": 24.82632}
                ]
            }
        }"#;

        let response: GraphQlResponse<StopsData> = serde_json::from_str(json).unwrap();
        assert!(response.errors.is_none());

        let stops = response.data.unwrap().stops.unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].gtfs_id, "HSL:1010101");
        assert_eq!(stops[0].name, "Aalto Yliopisto");
        assert_eq!(stops[1].name, "Aalto-yliopiston metroasema");
    }

    #[test]
    fn deserialize_plan_response() {
        let json = r#"{
            "data": {
                "plan": {
                    "itineraries": [
                        {
                            "startTime": 1701411600000,
                            "endTime": 1701412920000,
                            "duration": 1320,
                            "legs": [
                                {
                                    "mode": "BUS",
                                    "startTime": 1701411600000,
                                    "endTime": 1701412920000,
                                    "duration": 1320,
                                    "from": {"stop": {"gtfsId": "HSL:1010101", "name": "Aalto Yliopisto"}},
                                    "to": {"stop": {"gtfsId": "HSL:2020201", "name": "Keilaniemi"}},
                                    "route": {"shortName": "550", "longName": "Bus 550"},
                                    "trip": {"route": {"shortName": "550"}}
                                }
                            ]
                        }
                    ]
                }
            }
        }"#;

        let response: GraphQlResponse<PlanData> = serde_json::from_str(json).unwrap();
        let plan = response.data.unwrap().plan.unwrap();
        assert_eq!(plan.itineraries.len(), 1);

        let itinerary: RawItinerary = serde_json::from_value(plan.itineraries[0].clone()).unwrap();
        assert_eq!(itinerary.duration, 1320);
        assert_eq!(itinerary.legs.len(), 1);

        let leg = &itinerary.legs[0];
        assert_eq!(leg.mode, "BUS");
        assert_eq!(
            leg.route.as_ref().unwrap().short_name.as_deref(),
            Some("550")
        );
        assert_eq!(
            leg.from
                .as_ref()
                .unwrap()
                .stop
                .as_ref()
                .unwrap()
                .name
                .as_deref(),
            Some("Aalto Yliopisto")
        );
    }

    #[test]
    fn deserialize_walking_leg_without_route() {
        let json = r#"{
            "mode": "WALK",
            "startTime": 1701411600000,
            "endTime": 1701411780000,
            "duration": 180,
            "from": {"stop": null},
            "to": {"stop": {"gtfsId": "HSL:1010101", "name": "Aalto Yliopisto"}}
        }"#;

        let leg: RawLeg = serde_json::from_str(json).unwrap();
        assert_eq!(leg.mode, "WALK");
        assert!(leg.route.is_none());
        assert!(leg.trip.is_none());
        assert!(leg.from.unwrap().stop.is_none());
    }

    #[test]
    fn itinerary_missing_duration_fails_typed_parse() {
        let json = r#"{
            "startTime": 1701411600000,
            "endTime": 1701412920000,
            "legs": []
        }"#;

        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert!(serde_json::from_value::<RawItinerary>(value).is_err());
    }

    #[test]
    fn deserialize_graphql_errors() {
        let json = r#"{
            "errors": [
                {"message": "Validation error of type FieldUndefined: Field 'plan' is undefined"}
            ]
        }"#;

        let response: GraphQlResponse<PlanData> = serde_json::from_str(json).unwrap();
        assert!(response.data.is_none());

        let errors = response.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.as_deref().unwrap().contains("plan"));
    }

    #[test]
    fn deserialize_empty_plan() {
        let json = r#"{"data": {"plan": {"itineraries": []}}}"#;

        let response: GraphQlResponse<PlanData> = serde_json::from_str(json).unwrap();
        let plan = response.data.unwrap().plan.unwrap();
        assert!(plan.itineraries.is_empty());
    }
}
