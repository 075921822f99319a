//! Tabular display of physical data for logging and post-processing.

use super::physical_data::PhysicalData;
use prettytable::{Cell, Row, Table};
use std::fmt;

impl PhysicalData {
    /// Renders the fixed-slot physical data (plus the extra post-processing
    /// quantities rho, H and the Mach number M) as a table.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(Row::new(vec![Cell::new("quantity"), Cell::new("value")]));

        let ys = self
            .ys
            .iter()
            .map(|y| format!("{:.6e}", y))
            .collect::<Vec<_>>()
            .join(", ");

        let mach = if self.a > 0.0 { self.v / self.a } else { f64::NAN };

        let rows: Vec<(&str, String)> = vec![
            ("rho", format!("{:.6e}", self.rho)),
            ("mass fractions", ys),
            ("vx", format!("{:.6e}", self.vx)),
            ("vy", format!("{:.6e}", self.vy)),
            ("|V|", format!("{:.6e}", self.v)),
            ("T", format!("{:.6e}", self.t)),
            ("p", format!("{:.6e}", self.p)),
            ("H", format!("{:.6e}", self.h)),
            ("a", format!("{:.6e}", self.a)),
            ("E", format!("{:.6e}", self.e)),
            ("Ev", format!("{:.6e}", self.ev)),
            ("M", format!("{:.6e}", mach)),
        ];
        for (name, value) in rows {
            table.add_row(Row::new(vec![Cell::new(name), Cell::new(&value)]));
        }
        table
    }

    pub fn pretty_print(&self) {
        self.to_table().printstd();
    }
}

impl fmt::Display for PhysicalData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_table())
    }
}

#[cfg(test)]
mod tests {
    use crate::NEQEuler::physical_data::PhysicalData;

    #[test]
    fn table_lists_all_slots() {
        let mut data = PhysicalData::new(2);
        data.rho = 1.0;
        data.t = 300.0;
        data.p = 101325.0;
        data.a = 340.0;
        let rendered = data.to_table().to_string();
        assert!(rendered.contains("rho"));
        assert!(rendered.contains("mass fractions"));
        // values render in scientific notation
        assert!(rendered.contains("1.013250e5"));
        assert!(rendered.contains("3.400000e2"));
    }
}
