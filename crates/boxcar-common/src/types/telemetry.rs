//! Per-candidate telemetry export
//!
//! Fixed-width CSV schema written once per evaluated car. Repeated
//! components (wheels, chassis vertices) get [`MAX_COMPONENT_SLOTS`]
//! indexed columns each; unused slots are left empty and extra components
//! are dropped.

use serde::{Deserialize, Serialize};

use crate::MAX_COMPONENT_SLOTS;

/// Scalar columns preceding the first repeated block
const LEADING_COLUMNS: [&str; 5] = ["generation", "id", "fitness", "max_position", "chassis_mass"];

/// Scalar columns between the wheel masses and the geometry blocks
const MIDDLE_COLUMNS: [&str; 3] = ["frames", "is_winner", "cumulative_stall_time"];

/// Repeated geometry blocks, in column order
const GEOMETRY_BLOCKS: [&str; 7] = [
    "chassis_vertices_x",
    "chassis_vertices_y",
    "chassis_densities",
    "wheel_radii",
    "wheel_densities",
    "wheels_vertices_r",
    "wheels_vertices_theta",
];

fn indexed(prefix: &str) -> impl Iterator<Item = String> + '_ {
    (0..MAX_COMPONENT_SLOTS).map(move |i| format!("{}_{}", prefix, i))
}

/// Column names of the population log, in order
pub fn population_columns() -> Vec<String> {
    let mut columns: Vec<String> = LEADING_COLUMNS.iter().map(|c| c.to_string()).collect();
    columns.extend(indexed("wheels_mass"));
    columns.extend(MIDDLE_COLUMNS.iter().map(|c| c.to_string()));
    for block in GEOMETRY_BLOCKS {
        columns.extend(indexed(block));
    }
    columns
}

/// Header line of the population log (newline terminated)
pub fn population_headers() -> String {
    let mut header = population_columns().join(",");
    header.push('\n');
    header
}

/// One row of the population log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateTelemetry {
    pub generation: u32,
    pub id: u32,
    pub fitness: f64,
    pub max_position: f64,
    pub chassis_mass: f64,
    pub wheels_mass: Vec<f64>,
    pub frames: u64,
    pub is_winner: bool,
    pub cumulative_stall_time: f64,
    pub chassis_vertices_x: Vec<f64>,
    pub chassis_vertices_y: Vec<f64>,
    pub chassis_densities: Vec<f64>,
    pub wheel_radii: Vec<f64>,
    pub wheel_densities: Vec<f64>,
    pub wheels_vertices_r: Vec<f64>,
    pub wheels_vertices_theta: Vec<f64>,
}

impl CandidateTelemetry {
    /// Render as a CSV line matching [`population_headers`], rounding
    /// floating-point cells to `digits` decimals (at most [`MAX_ROUND_DIGITS`])
    pub fn to_csv_row(&self, digits: u32) -> String {
        let round = |x: f64| round_cell(x, digits);
        let slots = |values: &[f64], cells: &mut Vec<String>| {
            for i in 0..MAX_COMPONENT_SLOTS {
                cells.push(values.get(i).map(|v| round_cell(*v, digits)).unwrap_or_default());
            }
        };

        let mut cells = vec![
            self.generation.to_string(),
            self.id.to_string(),
            round(self.fitness),
            round(self.max_position),
            round(self.chassis_mass),
        ];
        slots(self.wheels_mass.as_slice(), &mut cells);
        cells.push(self.frames.to_string());
        cells.push(u8::from(self.is_winner).to_string());
        cells.push(round(self.cumulative_stall_time));
        for block in [
            self.chassis_vertices_x.as_slice(),
            self.chassis_vertices_y.as_slice(),
            self.chassis_densities.as_slice(),
            self.wheel_radii.as_slice(),
            self.wheel_densities.as_slice(),
            self.wheels_vertices_r.as_slice(),
            self.wheels_vertices_theta.as_slice(),
        ] {
            slots(block, &mut cells);
        }

        let mut row = cells.join(",");
        row.push('\n');
        row
    }
}

/// Decimal places beyond this exceed `f64` precision
pub const MAX_ROUND_DIGITS: u32 = 15;

fn round_cell(x: f64, digits: u32) -> String {
    let scale = 10f64.powi(digits.min(MAX_ROUND_DIGITS) as i32);
    format!("{}", (x * scale).round() / scale)
}
