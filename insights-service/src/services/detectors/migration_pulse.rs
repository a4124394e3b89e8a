//! Ranks districts by adult demographic update volume, a proxy for inbound
//! migration.

use crate::config::DEFAULT_MIGRATION_TOP_N;
use crate::models::{DemographicUpdateRecord, TrendHub};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub struct MigrationPulseRanker {
    limit: usize,
}

impl Default for MigrationPulseRanker {
    fn default() -> Self {
        Self::new(DEFAULT_MIGRATION_TOP_N)
    }
}

impl MigrationPulseRanker {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Sums updates per district and returns the busiest `limit` districts.
    ///
    /// Ordered by sum descending, then district name ascending. District
    /// names group by exact, case-sensitive match.
    pub fn rank(&self, records: &[DemographicUpdateRecord]) -> Vec<TrendHub> {
        let mut totals: HashMap<&str, u64> = HashMap::new();
        for record in records {
            let sum = totals.entry(record.district.as_str()).or_insert(0);
            *sum = sum.saturating_add(record.demo_age_18_greater);
        }

        let mut hubs: Vec<TrendHub> = totals
            .into_iter()
            .map(|(district, demo_age_18_greater)| TrendHub {
                district: district.to_string(),
                demo_age_18_greater,
            })
            .collect();

        hubs.sort_unstable_by(|a, b| {
            b.demo_age_18_greater
                .cmp(&a.demo_age_18_greater)
                .then_with(|| a.district.cmp(&b.district))
        });
        hubs.truncate(self.limit);
        hubs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn update(district: &str, count: u64) -> DemographicUpdateRecord {
        DemographicUpdateRecord {
            district: district.to_string(),
            demo_age_18_greater: count,
        }
    }

    #[test]
    fn test_sums_within_district() {
        let hubs = MigrationPulseRanker::default().rank(&[
            update("Pune", 10),
            update("Thane", 7),
            update("Pune", 5),
        ]);

        assert_eq!(
            hubs,
            vec![
                TrendHub {
                    district: "Pune".to_string(),
                    demo_age_18_greater: 15,
                },
                TrendHub {
                    district: "Thane".to_string(),
                    demo_age_18_greater: 7,
                },
            ]
        );
    }

    #[test]
    fn test_truncates_to_ten_busiest() {
        let records: Vec<_> = (1..=12)
            .map(|i| update(&format!("District-{i:02}"), i * 100))
            .collect();

        let hubs = MigrationPulseRanker::default().rank(&records);

        assert_eq!(hubs.len(), 10);
        assert_eq!(hubs[0].district, "District-12");
        assert_eq!(hubs[0].demo_age_18_greater, 1200);
        assert_eq!(hubs[9].district, "District-03");
    }

    #[test]
    fn test_ties_break_by_district_name() {
        let hubs = MigrationPulseRanker::default().rank(&[
            update("Beta", 20),
            update("Alpha", 50),
            update("Beta", 30),
        ]);

        let districts: Vec<_> = hubs.iter().map(|h| h.district.as_str()).collect();
        assert_eq!(districts, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_district_names_are_case_sensitive() {
        let hubs = MigrationPulseRanker::default().rank(&[update("pune", 1), update("Pune", 1)]);
        assert_eq!(hubs.len(), 2);
    }

    #[test]
    fn test_empty_input_yields_no_hubs() {
        assert!(MigrationPulseRanker::default().rank(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_length_and_order(
            records in prop::collection::vec(("[a-e]{1,2}", 0u64..1_000), 0..128),
            limit in 1usize..16,
        ) {
            let records: Vec<_> = records.iter().map(|(d, c)| update(d, *c)).collect();
            let distinct: HashSet<_> = records.iter().map(|r| r.district.as_str()).collect();

            let ranker = MigrationPulseRanker::new(limit);
            let hubs = ranker.rank(&records);

            prop_assert_eq!(hubs.len(), limit.min(distinct.len()));
            for pair in hubs.windows(2) {
                let ordered = pair[0].demo_age_18_greater > pair[1].demo_age_18_greater
                    || (pair[0].demo_age_18_greater == pair[1].demo_age_18_greater
                        && pair[0].district < pair[1].district);
                prop_assert!(ordered);
            }
            prop_assert_eq!(ranker.rank(&records), hubs);
        }
    }
}
