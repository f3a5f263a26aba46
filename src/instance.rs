//! Module for building, loading and querying TSP instances.
//!
//! An instance is a complete directed graph given as a square distance matrix.
//! Entry `[i][j]` is the cost of travelling from city `i` to city `j`; the matrix
//! does not have to be symmetric. Instances can be built in memory or loaded from
//! TSP-LIB files (explicit full matrices or Euclidean 2D coordinates) and from a
//! small JSON format.

use crate::error::TspError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A TSP instance: an immutable, validated distance matrix.
#[derive(Debug, Clone)]
pub struct TspInstance {
    /// Name of the instance
    pub name: String,
    distance_matrix: Vec<Vec<f64>>,
}

/// On-disk JSON layout: `{"name": "...", "distances": [[...], ...]}`
#[derive(Debug, Serialize, Deserialize)]
struct MatrixFile {
    #[serde(default)]
    name: Option<String>,
    distances: Vec<Vec<f64>>,
}

impl TspInstance {
    /// Build an instance from a row-major distance matrix.
    pub fn new(distance_matrix: Vec<Vec<f64>>) -> Result<Self, TspError> {
        Self::with_name("unnamed", distance_matrix)
    }

    /// Build a named instance, validating the matrix.
    ///
    /// Fails with [`TspError::InvalidModel`] when the matrix is empty, not square,
    /// or holds a negative or non-finite entry.
    pub fn with_name(name: &str, distance_matrix: Vec<Vec<f64>>) -> Result<Self, TspError> {
        let n = distance_matrix.len();
        if n == 0 {
            return Err(TspError::invalid_model("an instance needs at least one city"));
        }

        for (i, row) in distance_matrix.iter().enumerate() {
            if row.len() != n {
                return Err(TspError::invalid_model(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            if let Some(j) = row.iter().position(|d| !d.is_finite() || *d < 0.0) {
                return Err(TspError::invalid_model(format!(
                    "distance [{}][{}] = {} is not a non-negative finite number",
                    i, j, row[j]
                )));
            }
        }

        Ok(TspInstance {
            name: name.to_string(),
            distance_matrix,
        })
    }

    /// Load an instance from disk. Files ending in `.json` are read as
    /// `{"name", "distances"}` documents, everything else as TSP-LIB.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TspError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let fallback_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "unnamed".to_string());

        if is_json {
            let file = File::open(path)?;
            let doc: MatrixFile = serde_json::from_reader(BufReader::new(file))?;
            let name = doc.name.unwrap_or(fallback_name);
            return Self::with_name(&name, doc.distances);
        }

        let file = File::open(path)?;
        let mut instance = Self::from_tsplib(BufReader::new(file))?;
        if instance.name.is_empty() {
            instance.name = fallback_name;
        }
        Ok(instance)
    }

    /// Parse a TSP-LIB document.
    ///
    /// Supports `EDGE_WEIGHT_TYPE: EXPLICIT` with `EDGE_WEIGHT_FORMAT: FULL_MATRIX`
    /// (an `EDGE_WEIGHT_SECTION` that may wrap across lines) and `EUC_2D`
    /// coordinates in a `NODE_COORD_SECTION`.
    pub fn from_tsplib<R: BufRead>(reader: R) -> Result<Self, TspError> {
        let mut name = String::new();
        let mut dimension = 0usize;
        let mut weight_type = String::new();
        let mut weight_format = String::from("FULL_MATRIX");
        let mut coords: Vec<(f64, f64)> = Vec::new();
        let mut weights: Vec<f64> = Vec::new();

        let mut section = String::new();

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line == "EOF" {
                continue;
            }

            if let Some((key, value)) = line.split_once(':') {
                let value = value.trim();
                match key.trim() {
                    "NAME" => {
                        name = value.to_string();
                        continue;
                    }
                    "DIMENSION" => {
                        dimension = value
                            .parse()
                            .map_err(|_| TspError::parse(line_no, "invalid dimension"))?;
                        continue;
                    }
                    "EDGE_WEIGHT_TYPE" => {
                        weight_type = value.to_uppercase();
                        continue;
                    }
                    "EDGE_WEIGHT_FORMAT" => {
                        weight_format = value.to_uppercase();
                        continue;
                    }
                    "TYPE" | "COMMENT" => continue,
                    _ => {}
                }
            }

            if line.starts_with("NODE_COORD_SECTION") {
                section = "coords".to_string();
                continue;
            }
            if line.starts_with("EDGE_WEIGHT_SECTION") {
                section = "weights".to_string();
                continue;
            }
            if line.ends_with("_SECTION") {
                section.clear();
                continue;
            }

            match section.as_str() {
                "coords" => {
                    let parts: Vec<&str> = line.split_whitespace().collect();
                    if parts.len() < 3 {
                        return Err(TspError::parse(line_no, "expected `id x y`"));
                    }
                    let x: f64 = parts[1]
                        .parse()
                        .map_err(|_| TspError::parse(line_no, "invalid x coordinate"))?;
                    let y: f64 = parts[2]
                        .parse()
                        .map_err(|_| TspError::parse(line_no, "invalid y coordinate"))?;
                    coords.push((x, y));
                }
                "weights" => {
                    for token in line.split_whitespace() {
                        let w: f64 = token.parse().map_err(|_| {
                            TspError::parse(line_no, format!("invalid edge weight `{}`", token))
                        })?;
                        weights.push(w);
                    }
                }
                _ => {}
            }
        }

        let matrix = match weight_type.as_str() {
            "EXPLICIT" => {
                if weight_format != "FULL_MATRIX" {
                    return Err(TspError::invalid_model(format!(
                        "unsupported EDGE_WEIGHT_FORMAT {}",
                        weight_format
                    )));
                }
                let expected = dimension.checked_mul(dimension).ok_or_else(|| {
                    TspError::invalid_model(format!("DIMENSION {} is too large", dimension))
                })?;
                if dimension == 0 || weights.len() != expected {
                    return Err(TspError::invalid_model(format!(
                        "expected {} edge weights for dimension {}, found {}",
                        expected,
                        dimension,
                        weights.len()
                    )));
                }
                weights.chunks(dimension).map(|row| row.to_vec()).collect()
            }
            "EUC_2D" | "" if !coords.is_empty() => {
                if dimension != 0 && coords.len() != dimension {
                    return Err(TspError::invalid_model(format!(
                        "DIMENSION is {} but {} coordinates were given",
                        dimension,
                        coords.len()
                    )));
                }
                Self::euclidean_matrix(&coords)
            }
            other => {
                return Err(TspError::invalid_model(format!(
                    "unsupported or missing EDGE_WEIGHT_TYPE `{}`",
                    other
                )))
            }
        };

        Self::with_name(&name, matrix)
    }

    /// Compute Euclidean distance matrix
    fn euclidean_matrix(coords: &[(f64, f64)]) -> Vec<Vec<f64>> {
        let n = coords.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let dx = coords[i].0 - coords[j].0;
                    let dy = coords[i].1 - coords[j].1;
                    matrix[i][j] = (dx * dx + dy * dy).sqrt();
                }
            }
        }

        matrix
    }

    /// Number of cities in the instance (always at least one)
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.distance_matrix.len()
    }

    /// Borrow the underlying matrix.
    pub fn distance_matrix(&self) -> &[Vec<f64>] {
        &self.distance_matrix
    }

    /// Checked distance lookup from city `i` to city `j`.
    pub fn distance(&self, i: usize, j: usize) -> Result<f64, TspError> {
        self.check_index(i)?;
        self.check_index(j)?;
        Ok(self.distance_matrix[i][j])
    }

    /// Unchecked distance lookup for hot loops whose indices are valid by
    /// construction. Panics on an out-of-range index.
    #[inline]
    pub fn edge(&self, i: usize, j: usize) -> f64 {
        self.distance_matrix[i][j]
    }

    fn check_index(&self, index: usize) -> Result<(), TspError> {
        if index < self.num_cities() {
            Ok(())
        } else {
            Err(TspError::IndexOutOfRange {
                index,
                num_cities: self.num_cities(),
            })
        }
    }

    /// Cost of a closed tour: every consecutive edge plus the edge from the
    /// last city back to the first. An explicitly closed route (`[0, .., 0]`)
    /// gets the conventional zero-length `d[0][0]` closing edge.
    pub fn route_cost(&self, route: &[usize]) -> Result<f64, TspError> {
        let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
            return Ok(0.0);
        };
        Ok(self.path_cost(route)? + self.distance(last, first)?)
    }

    /// Cost of an open path: consecutive edges only, no closing edge.
    pub fn path_cost(&self, route: &[usize]) -> Result<f64, TspError> {
        for &city in route {
            self.check_index(city)?;
        }
        Ok(route.windows(2).map(|w| self.edge(w[0], w[1])).sum())
    }

    /// Whether `d[i][j] == d[j][i]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        let n = self.num_cities();
        (0..n).all(|i| (i + 1..n).all(|j| self.edge(i, j) == self.edge(j, i)))
    }

    /// Get statistics about the instance
    pub fn statistics(&self) -> InstanceStatistics {
        let n = self.num_cities();
        let mut distances: Vec<f64> = Vec::with_capacity(n * n.saturating_sub(1));
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    distances.push(self.edge(i, j));
                }
            }
        }

        let (min_distance, avg_distance, max_distance) = if distances.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                distances.iter().cloned().fold(f64::INFINITY, f64::min),
                distances.iter().sum::<f64>() / distances.len() as f64,
                distances.iter().cloned().fold(0.0, f64::max),
            )
        };

        InstanceStatistics {
            name: self.name.clone(),
            num_cities: n,
            symmetric: self.is_symmetric(),
            min_distance,
            avg_distance,
            max_distance,
        }
    }
}

/// Statistics about a TSP instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceStatistics {
    pub name: String,
    pub num_cities: usize,
    pub symmetric: bool,
    pub min_distance: f64,
    pub avg_distance: f64,
    pub max_distance: f64,
}

impl std::fmt::Display for InstanceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Instance: {}", self.name)?;
        writeln!(f, "  Cities: {}", self.num_cities)?;
        writeln!(f, "  Symmetric: {}", self.symmetric)?;
        writeln!(f, "  Min distance: {:.2}", self.min_distance)?;
        writeln!(f, "  Avg distance: {:.2}", self.avg_distance)?;
        writeln!(f, "  Max distance: {:.2}", self.max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_instance() -> TspInstance {
        TspInstance::new(vec![
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_matrices() {
        assert!(matches!(TspInstance::new(vec![]), Err(TspError::InvalidModel { .. })));
        assert!(matches!(
            TspInstance::new(vec![vec![0.0, 1.0], vec![1.0]]),
            Err(TspError::InvalidModel { .. })
        ));
        assert!(matches!(
            TspInstance::new(vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 2.0]]),
            Err(TspError::InvalidModel { .. })
        ));
        assert!(matches!(
            TspInstance::new(vec![vec![0.0, -1.0], vec![1.0, 0.0]]),
            Err(TspError::InvalidModel { .. })
        ));
        assert!(matches!(
            TspInstance::new(vec![vec![0.0, f64::NAN], vec![1.0, 0.0]]),
            Err(TspError::InvalidModel { .. })
        ));
    }

    #[test]
    fn test_distance_lookup() {
        let instance = create_test_instance();
        assert_eq!(instance.distance(1, 3).unwrap(), 25.0);
        assert!(matches!(
            instance.distance(4, 0),
            Err(TspError::IndexOutOfRange { index: 4, num_cities: 4 })
        ));
        assert!(instance.distance(0, 9).is_err());
    }

    #[test]
    fn test_route_cost_open_and_closed() {
        let instance = create_test_instance();
        assert_eq!(instance.route_cost(&[0, 1, 3, 2]).unwrap(), 80.0);
        assert_eq!(instance.route_cost(&[0, 1, 3, 2, 0]).unwrap(), 80.0);
        assert_eq!(instance.path_cost(&[0, 1, 3]).unwrap(), 35.0);
        assert_eq!(instance.route_cost(&[]).unwrap(), 0.0);
        assert!(instance.route_cost(&[0, 5, 1]).is_err());
    }

    #[test]
    fn test_asymmetric_route_cost() {
        let instance = TspInstance::new(vec![
            vec![0.0, 1.0, 9.0],
            vec![9.0, 0.0, 1.0],
            vec![1.0, 9.0, 0.0],
        ])
        .unwrap();
        assert!(!instance.is_symmetric());
        assert_eq!(instance.route_cost(&[0, 1, 2]).unwrap(), 3.0);
        assert_eq!(instance.route_cost(&[0, 2, 1]).unwrap(), 27.0);
    }

    #[test]
    fn test_parse_explicit_matrix() {
        let text = "NAME: small\n\
                    TYPE: TSP\n\
                    DIMENSION: 3\n\
                    EDGE_WEIGHT_TYPE: EXPLICIT\n\
                    EDGE_WEIGHT_FORMAT: FULL_MATRIX\n\
                    EDGE_WEIGHT_SECTION\n\
                    0 2 9\n\
                    1 0 6\n\
                    15 7\n\
                    0\n\
                    EOF\n";
        let instance = TspInstance::from_tsplib(text.as_bytes()).unwrap();
        assert_eq!(instance.name, "small");
        assert_eq!(instance.num_cities(), 3);
        assert_eq!(instance.distance(2, 1).unwrap(), 7.0);
    }

    #[test]
    fn test_parse_euclidean_coordinates() {
        let text = "NAME: tri\n\
                    DIMENSION: 2\n\
                    EDGE_WEIGHT_TYPE: EUC_2D\n\
                    NODE_COORD_SECTION\n\
                    1 0.0 0.0\n\
                    2 3.0 4.0\n\
                    EOF\n";
        let instance = TspInstance::from_tsplib(text.as_bytes()).unwrap();
        assert!((instance.distance(0, 1).unwrap() - 5.0).abs() < 1e-10);
        assert!((instance.distance(1, 0).unwrap() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_parse_rejects_short_weight_section() {
        let text = "DIMENSION: 2\nEDGE_WEIGHT_TYPE: EXPLICIT\nEDGE_WEIGHT_SECTION\n0 1 1\nEOF\n";
        assert!(matches!(
            TspInstance::from_tsplib(text.as_bytes()),
            Err(TspError::InvalidModel { .. })
        ));

        let text = "DIMENSION: 2\nEDGE_WEIGHT_TYPE: EXPLICIT\nEDGE_WEIGHT_SECTION\n0 x\n1 0\n";
        assert!(matches!(
            TspInstance::from_tsplib(text.as_bytes()),
            Err(TspError::Parse { line: 4, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_oversized_dimension() {
        let text = "DIMENSION: 5000000000\nEDGE_WEIGHT_TYPE: EXPLICIT\nEDGE_WEIGHT_SECTION\n0 1\n1 0\nEOF\n";
        assert!(matches!(
            TspInstance::from_tsplib(text.as_bytes()),
            Err(TspError::InvalidModel { .. })
        ));
    }

    #[test]
    fn test_statistics() {
        let stats = create_test_instance().statistics();
        assert_eq!(stats.num_cities, 4);
        assert!(stats.symmetric);
        assert_eq!(stats.min_distance, 10.0);
        assert_eq!(stats.max_distance, 35.0);
        assert!((stats.avg_distance - 22.5).abs() < 1e-10);
    }
}
