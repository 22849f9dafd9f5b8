//! Writes a deterministic sample EV dataset to `sample_data.csv`,
//! including deliberately non-numeric cells so the coercion path can be
//! exercised by hand.

struct Model {
    make: &'static str,
    model: &'static str,
    vehicle_type: &'static str,
    base_range: f64,
    base_msrp: f64,
    cafv: &'static str,
}

const BEV: &str = "Battery Electric Vehicle (BEV)";
const PHEV: &str = "Plug-in Hybrid Electric Vehicle (PHEV)";

const ELIGIBLE: &str = "Clean Alternative Fuel Vehicle Eligible";
const LOW_RANGE: &str = "Not eligible due to low battery range";
const UNKNOWN: &str = "Eligibility unknown as battery range has not been researched";

const MODELS: &[Model] = &[
    Model { make: "Tesla", model: "Model 3", vehicle_type: BEV, base_range: 250.0, base_msrp: 42000.0, cafv: ELIGIBLE },
    Model { make: "Tesla", model: "Model Y", vehicle_type: BEV, base_range: 280.0, base_msrp: 52000.0, cafv: ELIGIBLE },
    Model { make: "Nissan", model: "Leaf", vehicle_type: BEV, base_range: 150.0, base_msrp: 29000.0, cafv: ELIGIBLE },
    Model { make: "Chevrolet", model: "Bolt EV", vehicle_type: BEV, base_range: 238.0, base_msrp: 36000.0, cafv: ELIGIBLE },
    Model { make: "Chevrolet", model: "Volt", vehicle_type: PHEV, base_range: 53.0, base_msrp: 33000.0, cafv: ELIGIBLE },
    Model { make: "Ford", model: "Mustang Mach-E", vehicle_type: BEV, base_range: 230.0, base_msrp: 43000.0, cafv: UNKNOWN },
    Model { make: "Ford", model: "Fusion Energi", vehicle_type: PHEV, base_range: 21.0, base_msrp: 34000.0, cafv: LOW_RANGE },
    Model { make: "Kia", model: "Niro", vehicle_type: PHEV, base_range: 26.0, base_msrp: 29000.0, cafv: LOW_RANGE },
    Model { make: "BMW", model: "i3", vehicle_type: BEV, base_range: 153.0, base_msrp: 44000.0, cafv: ELIGIBLE },
    Model { make: "BMW", model: "X5 xDrive45e", vehicle_type: PHEV, base_range: 30.0, base_msrp: 65000.0, cafv: ELIGIBLE },
    Model { make: "Toyota", model: "Prius Prime", vehicle_type: PHEV, base_range: 25.0, base_msrp: 28000.0, cafv: LOW_RANGE },
    Model { make: "Volvo", model: "XC60 Recharge", vehicle_type: PHEV, base_range: 18.0, base_msrp: 54000.0, cafv: LOW_RANGE },
    Model { make: "Audi", model: "e-tron", vehicle_type: BEV, base_range: 204.0, base_msrp: 66000.0, cafv: ELIGIBLE },
    Model { make: "Hyundai", model: "Kona Electric", vehicle_type: BEV, base_range: 258.0, base_msrp: 34000.0, cafv: ELIGIBLE },
    Model { make: "Rivian", model: "R1T", vehicle_type: BEV, base_range: 314.0, base_msrp: 73000.0, cafv: UNKNOWN },
    Model { make: "Jeep", model: "Wrangler 4xe", vehicle_type: PHEV, base_range: 21.0, base_msrp: 54000.0, cafv: LOW_RANGE },
];

const YEARS: std::ops::RangeInclusive<i32> = 2016..=2024;

/// Small deterministic jitter so repeated rows aren't identical.
fn jitter(seed: usize, spread: f64) -> f64 {
    ((seed * 37 + 11) % 23) as f64 / 22.0 * spread - spread / 2.0
}

fn main() {
    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    writer
        .write_record([
            "County",
            "City",
            "Make",
            "Model",
            "Model Year",
            "Electric Vehicle Type",
            "Clean Alternative Fuel Vehicle (CAFV) Eligibility",
            "Electric Range",
            "Base MSRP",
        ])
        .expect("Failed to write header");

    let cities = [("King", "Seattle"), ("Pierce", "Tacoma"), ("Clark", "Vancouver")];

    let mut row_id = 0usize;
    for model in MODELS {
        for year in YEARS {
            // Newer model years get a gentle range bump plus jitter.
            let range = model.base_range + (year - 2016) as f64 * 3.0 + jitter(row_id, 10.0);
            let msrp = model.base_msrp + jitter(row_id, 2000.0);
            let (county, city) = cities[row_id % cities.len()];

            // Every 11th range cell and most MSRP cells are dirty or
            // blank, as in the public registration data.
            let range_cell = if row_id % 11 == 5 {
                "N/A".to_string()
            } else {
                format!("{range:.0}")
            };
            let msrp_cell = if row_id % 4 == 0 {
                format!("{msrp:.0}")
            } else {
                String::new()
            };

            let year_cell = year.to_string();
            writer
                .write_record([
                    county,
                    city,
                    model.make,
                    model.model,
                    year_cell.as_str(),
                    model.vehicle_type,
                    model.cafv,
                    range_cell.as_str(),
                    msrp_cell.as_str(),
                ])
                .expect("Failed to write record");
            row_id += 1;
        }
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {row_id} vehicles to {output_path}");
}
