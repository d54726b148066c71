//! GraphQL query texts for the Digitransit API.

/// Format for the arrive-by timestamp sent to the planner, rendered in the
/// transit network's local time.
pub const PLAN_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Name-search for stops. The upstream treats matching semantics
/// (substring/fuzzy) as its own concern; we pass the text through verbatim.
pub const FIND_STOPS_QUERY: &str = r#"
query FindStops($name: String!) {
  stops(name: $name) {
    gtfsId
    name
    lat
    lon
  }
}
"#;

/// Arrive-by journey planning between two resolved stops.
///
/// The mode filter is fixed: scheduled transit modes only, with walking
/// between them left to the upstream's discretion. `date` and `time` both
/// take the same local timestamp string; the upstream reads the component
/// it needs from each.
pub const PLAN_JOURNEY_QUERY: &str = r#"
query PlanJourney($from: String!, $to: String!, $time: String!, $arriveBy: Boolean!, $numItineraries: Int!) {
  plan(
    from: {stop: $from}
    to: {stop: $to}
    date: $time
    time: $time
    arriveBy: $arriveBy
    numItineraries: $numItineraries
    transportModes: [
      {mode: BUS}
      {mode: RAIL}
      {mode: TRAM}
      {mode: SUBWAY}
      {mode: FERRY}
    ]
  ) {
    itineraries {
      startTime
      endTime
      duration
      legs {
        mode
        startTime
        endTime
        duration
        from {
          stop {
            gtfsId
            name
          }
        }
        to {
          stop {
            gtfsId
            name
          }
        }
        route {
          shortName
          longName
        }
        trip {
          route {
            shortName
          }
        }
      }
    }
  }
}
"#;
