//! CSV export of forwarding tables.

use std::io::Write;

use routesim_topology::Topology;
use serde::Serialize;

use crate::{all_forwarding_tables, Algorithm, ForwardingTable, Result, RoutingError};

/// Column headers of the export.
pub const CSV_HEADERS: [&str; 5] = ["Router", "Destination", "Next Hop", "Cost", "Path"];

/// Cost written for unreachable destinations.
pub const CSV_INFINITE_COST: &str = "inf";

#[derive(Serialize)]
struct CsvRow<'a> {
    router: &'a str,
    destination: &'a str,
    next_hop: &'a str,
    cost: String,
    path: String,
}

/// Write every `(router, destination)` row of `tables` as CSV.
pub fn write_csv<W: Write>(tables: &[ForwardingTable], writer: W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(CSV_HEADERS)?;

    for table in tables {
        for entry in &table.entries {
            csv.serialize(CsvRow {
                router: &table.router,
                destination: &entry.destination,
                next_hop: entry.next_hop_label(),
                cost: entry
                    .cost
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| CSV_INFINITE_COST.to_string()),
                path: entry.path_label(),
            })?;
        }
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// All forwarding tables of `topology` as a CSV document.
pub fn export_csv(topology: &Topology, algorithm: Algorithm) -> Result<String> {
    let tables = all_forwarding_tables(topology, algorithm, false)?;
    let mut buf = Vec::new();
    write_csv(&tables, &mut buf)?;
    String::from_utf8(buf).map_err(|e| RoutingError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_export_has_all_rows() {
        let csv = export_csv(&Topology::sample(), Algorithm::LeastCost).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "Router,Destination,Next Hop,Cost,Path");
        // 4 routers x 3 destinations
        assert_eq!(lines.len(), 1 + 12);
        assert!(lines.contains(&"A,D,B,4,A ➔ B ➔ D"));
        assert!(lines.contains(&"D,A,-,inf,No path"));
    }

    #[test]
    fn empty_topology_exports_header_only() {
        let csv = export_csv(&Topology::new(), Algorithm::LeastCost).unwrap();
        assert_eq!(csv.trim_end(), "Router,Destination,Next Hop,Cost,Path");
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let mut t = Topology::new();
        t.add_router("core,1").unwrap();
        t.add_router("edge").unwrap();
        t.add_link("core,1", "edge", 3).unwrap();

        let csv = export_csv(&t, Algorithm::NegativeTolerant).unwrap();
        assert!(csv.contains("\"core,1\",edge,edge,3,\"core,1 ➔ edge\""));
    }
}
