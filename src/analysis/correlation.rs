use crate::data::model::{CategoryColumn, NumericColumn, VehicleDataset};

use super::distribution::{histogram, Histogram};

// ---------------------------------------------------------------------------
// Pearson correlation
// ---------------------------------------------------------------------------

/// Pearson correlation coefficient of the given pairs.
///
/// `None` when the coefficient is undefined: fewer than two pairs, or
/// zero variance on either side.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len();
    if n < 2 {
        return None;
    }

    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    Some((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

/// Pairwise Pearson matrix over the three numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: [&'static str; 3],
    /// `coefficients[i][j]` correlates column `i` with column `j`;
    /// `None` renders as a blank cell.
    pub coefficients: [[Option<f64>; 3]; 3],
}

/// Compute the matrix on pairwise-complete observations: each entry
/// uses every row where both of *that pair's* values are present,
/// independently per pair.
pub fn matrix(dataset: &VehicleDataset) -> CorrelationMatrix {
    let series: Vec<Vec<Option<f64>>> = NumericColumn::ALL
        .iter()
        .map(|&col| dataset.numbers(col).collect())
        .collect();

    let mut coefficients = [[None; 3]; 3];
    for (i, row) in coefficients.iter_mut().enumerate() {
        for (j, slot) in row.iter_mut().enumerate() {
            let pairs: Vec<(f64, f64)> = series[i]
                .iter()
                .zip(&series[j])
                .filter_map(|(&a, &b)| Some((a?, b?)))
                .collect();
            *slot = pearson(&pairs);
        }
    }

    CorrelationMatrix {
        labels: NumericColumn::ALL.map(NumericColumn::name),
        coefficients,
    }
}

// ---------------------------------------------------------------------------
// Pair plot (row-wise complete subset)
// ---------------------------------------------------------------------------

/// Scatter-grid data over the three numeric columns, restricted to rows
/// where all three values are present (row-wise drop — a stricter
/// subset than the pairwise-complete correlation matrix).
#[derive(Debug, Clone, PartialEq)]
pub struct PairPlot {
    pub labels: [&'static str; 3],
    /// One `[range, msrp, year]` triple per complete row.
    pub rows: Vec<[f64; 3]>,
    /// Per-variable distributions for the grid diagonal.
    pub histograms: [Histogram; 3],
}

pub fn pair_plot(dataset: &VehicleDataset) -> PairPlot {
    let [c0, c1, c2] = NumericColumn::ALL;
    let rows: Vec<[f64; 3]> = dataset
        .numbers(c0)
        .zip(dataset.numbers(c1).zip(dataset.numbers(c2)))
        .filter_map(|(a, (b, c))| Some([a?, b?, c?]))
        .collect();

    let histograms = [0, 1, 2].map(|i| {
        let values: Vec<f64> = rows.iter().map(|r| r[i]).collect();
        histogram(&values, 10)
    });

    PairPlot {
        labels: NumericColumn::ALL.map(NumericColumn::name),
        rows,
        histograms,
    }
}

// ---------------------------------------------------------------------------
// Category-colored bivariate scatter
// ---------------------------------------------------------------------------

/// Model Year (x) vs Electric Range (y), split by vehicle type.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScatter {
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// `(category, points)` in first-seen order.
    pub groups: Vec<(String, Vec<[f64; 2]>)>,
}

/// Rows missing either coordinate or the category are excluded.
pub fn category_scatter(dataset: &VehicleDataset) -> CategoryScatter {
    let mut groups: Vec<(String, Vec<[f64; 2]>)> = Vec::new();

    let coords = dataset
        .numbers(NumericColumn::ModelYear)
        .zip(dataset.numbers(NumericColumn::ElectricRange));
    for (category, (x, y)) in dataset.labels(CategoryColumn::VehicleType).zip(coords) {
        let (Some(category), Some(x), Some(y)) = (category, x, y) else {
            continue;
        };
        let idx = match groups.iter().position(|(l, _)| *l == category) {
            Some(i) => i,
            None => {
                groups.push((category, Vec::new()));
                groups.len() - 1
            }
        };
        groups[idx].1.push([x, y]);
    }

    CategoryScatter {
        x_label: NumericColumn::ModelYear.name(),
        y_label: NumericColumn::ElectricRange.name(),
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{
        CellValue, COL_BASE_MSRP, COL_CAFV, COL_ELECTRIC_RANGE, COL_MAKE, COL_MODEL_YEAR,
        COL_VEHICLE_TYPE,
    };

    fn dataset(rows: Vec<(Option<f64>, Option<f64>, Option<f64>)>) -> VehicleDataset {
        let columns = vec![
            COL_MAKE.to_string(),
            COL_VEHICLE_TYPE.to_string(),
            COL_ELECTRIC_RANGE.to_string(),
            COL_BASE_MSRP.to_string(),
            COL_MODEL_YEAR.to_string(),
            COL_CAFV.to_string(),
        ];
        let cell = |v: Option<f64>| v.map(CellValue::Number).unwrap_or(CellValue::Empty);
        let table = rows
            .into_iter()
            .map(|(range, msrp, year)| {
                vec![
                    CellValue::Text("Tesla".to_string()),
                    CellValue::Text("Battery Electric Vehicle (BEV)".to_string()),
                    cell(range),
                    cell(msrp),
                    cell(year),
                    CellValue::Text("Eligible".to_string()),
                ]
            })
            .collect();
        VehicleDataset::from_table(columns, table).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn perfectly_linear_pairs_correlate_to_one() {
        let pairs: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 2.0 * i as f64 + 1.0)).collect();
        assert!(close(pearson(&pairs).unwrap(), 1.0));

        let inverse: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, -(i as f64))).collect();
        assert!(close(pearson(&inverse).unwrap(), -1.0));
    }

    #[test]
    fn degenerate_pairs_are_undefined() {
        assert_eq!(pearson(&[]), None);
        assert_eq!(pearson(&[(1.0, 2.0)]), None);
        // Zero variance on one side.
        assert_eq!(pearson(&[(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)]), None);
    }

    #[test]
    fn matrix_has_unit_diagonal_and_is_symmetric() {
        let ds = dataset(vec![
            (Some(250.0), Some(69900.0), Some(2020.0)),
            (Some(260.0), Some(79900.0), Some(2021.0)),
            (Some(150.0), Some(32000.0), Some(2019.0)),
            (Some(30.0), Some(41000.0), Some(2018.0)),
        ]);
        let m = matrix(&ds);

        for i in 0..3 {
            assert!(close(m.coefficients[i][i].unwrap(), 1.0));
            for j in 0..3 {
                assert!(close(
                    m.coefficients[i][j].unwrap(),
                    m.coefficients[j][i].unwrap()
                ));
            }
        }
    }

    #[test]
    fn matrix_uses_pairwise_complete_rows() {
        // Row 3 is missing Model Year only: it must still contribute to
        // the range/MSRP entry but not to any year entry.
        let ds = dataset(vec![
            (Some(250.0), Some(69900.0), Some(2020.0)),
            (Some(260.0), Some(79900.0), Some(2021.0)),
            (Some(150.0), Some(32000.0), None),
        ]);
        let m = matrix(&ds);

        // range vs msrp uses all 3 rows; recompute directly.
        let full = pearson(&[(250.0, 69900.0), (260.0, 79900.0), (150.0, 32000.0)]).unwrap();
        assert!(close(m.coefficients[0][1].unwrap(), full));

        // range vs year falls back to the 2 complete rows.
        let partial = pearson(&[(250.0, 2020.0), (260.0, 2021.0)]).unwrap();
        assert!(close(m.coefficients[0][2].unwrap(), partial));
    }

    #[test]
    fn pair_plot_drops_rows_with_any_missing_value() {
        let ds = dataset(vec![
            (Some(250.0), Some(69900.0), Some(2020.0)),
            (Some(260.0), None, Some(2021.0)),
            (None, Some(32000.0), Some(2019.0)),
        ]);
        let pp = pair_plot(&ds);

        assert_eq!(pp.rows, vec![[250.0, 69900.0, 2020.0]]);
        assert_eq!(pp.histograms[0].n, 1);
    }

    #[test]
    fn scatter_groups_by_category_in_first_seen_order() {
        let ds = dataset(vec![
            (Some(250.0), Some(69900.0), Some(2020.0)),
            (Some(260.0), Some(79900.0), None),
        ]);
        let scatter = category_scatter(&ds);

        assert_eq!(scatter.groups.len(), 1);
        let (label, points) = &scatter.groups[0];
        assert_eq!(label, "Battery Electric Vehicle (BEV)");
        // The row missing Model Year is excluded.
        assert_eq!(points, &vec![[2020.0, 250.0]]);
    }
}
