/// Analysis layer: pure view computations over a loaded dataset.
///
/// Every view is a plain function from the dataset to a data structure;
/// nothing here renders or mutates. [`AnalysisReport::compute`]
/// evaluates all eleven views once per loaded file, in the fixed order
/// the UI presents them.
pub mod correlation;
pub mod distribution;
pub mod frequency;
pub mod ztest;

use thiserror::Error;

use crate::data::model::{
    CategoryColumn, NumericColumn, VehicleDataset, BEV_LABEL, PHEV_LABEL,
};

use correlation::{CategoryScatter, CorrelationMatrix, PairPlot};
use distribution::{GroupStats, Histogram};
use frequency::ValueCounts;
use ztest::ZTestReport;

/// A derived view that cannot be computed from the current dataset.
/// Confined to the failing view; the others render regardless.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("the '{group}' group has no rows with a usable Electric Range")]
    EmptySubgroup { group: String },
}

/// Number of Makes shown in the frequency and box-plot views.
pub const TOP_MAKES: usize = 10;

/// Histogram bin count for the Electric Range distribution view.
pub const RANGE_BINS: usize = 30;

// ---------------------------------------------------------------------------
// The full report, one computation per loaded file
// ---------------------------------------------------------------------------

/// All eleven derived views, in presentation order.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// 1. Most frequent Makes.
    pub top_makes: ValueCounts,
    /// 2. Electric Range distribution.
    pub range_histogram: Histogram,
    /// 3. Pairwise numeric relationships (row-wise complete).
    pub pair_plot: PairPlot,
    /// 4. Electric Range by vehicle type.
    pub range_by_type: Vec<GroupStats>,
    /// 5. Pearson matrix (pairwise complete).
    pub correlation: CorrelationMatrix,
    /// 6. Model Year vs Electric Range, colored by vehicle type.
    pub range_vs_year: CategoryScatter,
    /// 7. BEV vs PHEV mean-range Z-test.
    pub range_test: Result<ZTestReport, AnalysisError>,
    /// 8. Vehicle count per Model Year, ascending.
    pub year_counts: Vec<(f64, usize)>,
    /// 9. Electric Range by the same top Makes as view 1.
    pub range_by_top_makes: Vec<GroupStats>,
    /// 10. CAFV eligibility counts.
    pub cafv_counts: ValueCounts,
}

impl AnalysisReport {
    pub fn compute(dataset: &VehicleDataset) -> Self {
        let top_makes =
            frequency::value_counts(dataset.labels(CategoryColumn::Make)).top(TOP_MAKES);

        let range: Vec<f64> = dataset
            .numbers(NumericColumn::ElectricRange)
            .flatten()
            .collect();
        let range_histogram = distribution::histogram(&range, RANGE_BINS);

        let range_by_type = distribution::grouped_box_stats(
            dataset
                .labels(CategoryColumn::VehicleType)
                .zip(dataset.numbers(NumericColumn::ElectricRange)),
        );

        let range_by_top_makes = distribution::grouped_box_stats(
            dataset
                .labels(CategoryColumn::Make)
                .zip(dataset.numbers(NumericColumn::ElectricRange))
                .filter(|(make, _)| match make {
                    Some(make) => top_makes.entries.iter().any(|(l, _)| l == make),
                    None => false,
                }),
        );

        let range_test = ztest::two_sample_z_test(
            "BEV",
            &type_subgroup(dataset, BEV_LABEL),
            "PHEV",
            &type_subgroup(dataset, PHEV_LABEL),
        );

        AnalysisReport {
            top_makes,
            range_histogram,
            pair_plot: correlation::pair_plot(dataset),
            range_by_type,
            correlation: correlation::matrix(dataset),
            range_vs_year: correlation::category_scatter(dataset),
            range_test,
            year_counts: frequency::year_counts(dataset.numbers(NumericColumn::ModelYear)),
            range_by_top_makes,
            cafv_counts: frequency::value_counts(dataset.labels(CategoryColumn::CafvEligibility)),
        }
    }
}

/// Electric Range values of one exact vehicle-type category, missing
/// values dropped.
fn type_subgroup(dataset: &VehicleDataset, type_label: &str) -> Vec<f64> {
    dataset
        .labels(CategoryColumn::VehicleType)
        .zip(dataset.numbers(NumericColumn::ElectricRange))
        .filter(|(label, _)| label.as_deref() == Some(type_label))
        .filter_map(|(_, value)| value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{
        CellValue, COL_BASE_MSRP, COL_CAFV, COL_ELECTRIC_RANGE, COL_MAKE, COL_MODEL_YEAR,
        COL_VEHICLE_TYPE,
    };

    fn dataset(rows: Vec<(&str, &str, CellValue)>) -> VehicleDataset {
        let columns = vec![
            COL_MAKE.to_string(),
            COL_VEHICLE_TYPE.to_string(),
            COL_ELECTRIC_RANGE.to_string(),
            COL_BASE_MSRP.to_string(),
            COL_MODEL_YEAR.to_string(),
            COL_CAFV.to_string(),
        ];
        let table = rows
            .into_iter()
            .map(|(make, ty, range)| {
                vec![
                    CellValue::Text(make.to_string()),
                    CellValue::Text(ty.to_string()),
                    range,
                    CellValue::Number(40000.0),
                    CellValue::Number(2020.0),
                    CellValue::Text("Eligible".to_string()),
                ]
            })
            .collect();
        VehicleDataset::from_table(columns, table).unwrap()
    }

    #[test]
    fn end_to_end_counts_and_histogram() {
        let ds = dataset(vec![
            ("Tesla", BEV_LABEL, CellValue::Number(250.0)),
            ("Tesla", BEV_LABEL, CellValue::Number(260.0)),
            ("Nissan", BEV_LABEL, CellValue::Number(150.0)),
        ]);
        let report = AnalysisReport::compute(&ds);

        assert_eq!(
            report.top_makes.entries,
            vec![("Tesla".to_string(), 2), ("Nissan".to_string(), 1)]
        );
        assert_eq!(report.range_histogram.n, 3);
        assert_eq!(report.range_histogram.counts.iter().sum::<usize>(), 3);
    }

    #[test]
    fn missing_phev_subgroup_fails_only_the_ztest_view() {
        let ds = dataset(vec![
            ("Tesla", BEV_LABEL, CellValue::Number(250.0)),
            ("Tesla", BEV_LABEL, CellValue::Number(260.0)),
        ]);
        let report = AnalysisReport::compute(&ds);

        assert_eq!(
            report.range_test,
            Err(AnalysisError::EmptySubgroup {
                group: "PHEV".to_string()
            })
        );
        // The other views are unaffected.
        assert!(!report.top_makes.is_empty());
        assert_eq!(report.range_histogram.n, 2);
        assert_eq!(report.year_counts, vec![(2020.0, 2)]);
    }

    #[test]
    fn ztest_subgroups_match_exact_labels_and_drop_missing() {
        let ds = dataset(vec![
            ("Tesla", BEV_LABEL, CellValue::Number(100.0)),
            ("Tesla", BEV_LABEL, CellValue::Number(110.0)),
            ("Tesla", BEV_LABEL, CellValue::Number(120.0)),
            ("Tesla", BEV_LABEL, CellValue::Text("N/A".to_string())),
            ("Kia", PHEV_LABEL, CellValue::Number(50.0)),
            ("Kia", PHEV_LABEL, CellValue::Number(60.0)),
            ("Kia", PHEV_LABEL, CellValue::Number(55.0)),
            // Near-miss label must not be matched.
            ("Kia", "Plug-in Hybrid", CellValue::Number(999.0)),
        ]);
        let report = AnalysisReport::compute(&ds);

        let test = report.range_test.unwrap();
        assert_eq!(test.first.n, 3);
        assert_eq!(test.second.n, 3);
        assert!((test.first.mean - 110.0).abs() < 1e-12);
        assert!((test.second.mean - 55.0).abs() < 1e-12);
        assert!(test.significant());
    }

    #[test]
    fn top_make_box_view_is_restricted_to_the_top_set() {
        let mut rows = Vec::new();
        // 12 distinct makes; the two rarest must not get a box.
        for (i, make) in [
            "Tesla", "Nissan", "Chevrolet", "Ford", "Kia", "BMW", "Toyota", "Volvo", "Audi",
            "Hyundai",
        ]
        .iter()
        .enumerate()
        {
            for _ in 0..(12 - i) {
                rows.push((*make, BEV_LABEL, CellValue::Number(200.0 + i as f64)));
            }
        }
        rows.push(("Rivian", BEV_LABEL, CellValue::Number(300.0)));
        rows.push(("Jeep", PHEV_LABEL, CellValue::Number(25.0)));

        let report = AnalysisReport::compute(&dataset(rows));

        assert_eq!(report.top_makes.len(), TOP_MAKES);
        assert_eq!(report.range_by_top_makes.len(), TOP_MAKES);
        assert!(report
            .range_by_top_makes
            .iter()
            .all(|g| g.label != "Rivian" && g.label != "Jeep"));
    }
}
