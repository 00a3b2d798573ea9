use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use timeline_chart::core::{Datum, nearest_index_by_date};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("base date")
}

proptest! {
    #[test]
    fn resolved_point_minimizes_time_distance(
        offsets in prop::collection::btree_set(0i64..10_000, 1..64),
        candidate in -1_000i64..11_000,
    ) {
        let offsets: Vec<i64> = offsets.into_iter().collect();
        let data: Vec<Datum> = offsets
            .iter()
            .map(|m| Datum::new(base() + TimeDelta::minutes(*m)))
            .collect();
        let candidate = base() + TimeDelta::minutes(candidate);

        let index = nearest_index_by_date(&data, candidate).expect("non-empty data resolves");
        let delta = |i: usize| (data[i].date - candidate).num_milliseconds().abs();
        let best = delta(index);

        for i in 0..data.len() {
            prop_assert!(best <= delta(i));
            if i < index {
                // Ties resolve to the earliest equidistant point.
                prop_assert!(delta(i) > best);
            }
        }
    }
}
