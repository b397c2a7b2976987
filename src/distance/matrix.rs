//! Dense city-to-city kilometer matrix.

use std::collections::HashSet;
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::{FreightError, FreightResult};

const FIELD_SEPARATOR: char = ';';

/// A dense n×n kilometer matrix stored in row-major order, addressed by
/// city name through its header.
///
/// Row `i` holds the distances *from* `cities[i]`; lookups are directional
/// and no symmetry is enforced.
///
/// # Examples
///
/// ```
/// use u_freight::distance::DistanceMatrix;
///
/// let table = "A;B;C\n0;100;250\n100;0;150\n250;150;0\n";
/// let dm = DistanceMatrix::from_table_str(table).unwrap();
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.distance_between("A", "C").unwrap(), 250);
/// assert!(dm.distance_between("A", "Z").is_err());
/// ```
///
/// Deserialization goes through [`from_parts`](Self::from_parts), so a
/// cached payload with the wrong grid length or repeated names is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct DistanceMatrix {
    cities: Vec<String>,
    data: Vec<u32>,
}

/// Unchecked wire form of [`DistanceMatrix`].
#[derive(Deserialize)]
struct RawMatrix {
    cities: Vec<String>,
    data: Vec<u32>,
}

impl TryFrom<RawMatrix> for DistanceMatrix {
    type Error = FreightError;

    fn try_from(raw: RawMatrix) -> FreightResult<Self> {
        Self::from_parts(raw.cities, raw.data)
    }
}

impl DistanceMatrix {
    /// Creates a matrix over the given cities, every distance set to zero.
    pub fn new(cities: Vec<String>) -> Self {
        let size = cities.len();
        Self {
            cities,
            data: vec![0; size * size],
        }
    }

    /// Creates a matrix from a header and an explicit row-major grid.
    ///
    /// Fails if the grid is not `cities.len()²` long or a city repeats.
    pub fn from_parts(cities: Vec<String>, data: Vec<u32>) -> FreightResult<Self> {
        let size = cities.len();
        if data.len() != size * size {
            return Err(FreightError::MalformedTable {
                line: 1,
                reason: format!(
                    "expected {} distances for {} cities, got {}",
                    size * size,
                    size,
                    data.len()
                ),
            });
        }
        check_unique(&cities)?;
        Ok(Self { cities, data })
    }

    /// Parses a semicolon-delimited table: the first line lists the city
    /// names, line `i + 1` the distances from city `i` in header order.
    ///
    /// Blank lines are skipped, fields are trimmed.
    pub fn from_table_str(text: &str) -> FreightResult<Self> {
        Self::from_lines(text.lines().map(|l| Ok(l.to_string())))
    }

    /// Same as [`from_table_str`](Self::from_table_str), reading line by line.
    pub fn from_reader<R: BufRead>(reader: R) -> FreightResult<Self> {
        Self::from_lines(reader.lines().map(|l| l.map_err(FreightError::from)))
    }

    fn from_lines<I>(lines: I) -> FreightResult<Self>
    where
        I: Iterator<Item = FreightResult<String>>,
    {
        let mut cities: Option<Vec<String>> = None;
        let mut data = Vec::new();
        let mut rows = 0usize;

        for (idx, line) in lines.enumerate() {
            let line_no = idx + 1;
            let line = line?;
            let line = line.trim_start_matches('\u{feff}').trim_end();
            if line.trim().is_empty() {
                continue;
            }

            let fields = line.split(FIELD_SEPARATOR).map(str::trim);

            let Some(header) = cities.as_ref() else {
                let header: Vec<String> = fields.map(str::to_string).collect();
                if header.iter().any(|c| c.is_empty()) {
                    return Err(FreightError::MalformedTable {
                        line: line_no,
                        reason: "empty city name in header".into(),
                    });
                }
                check_unique(&header).map_err(|_| FreightError::MalformedTable {
                    line: line_no,
                    reason: "duplicate city name in header".into(),
                })?;
                cities = Some(header);
                continue;
            };

            if rows == header.len() {
                return Err(FreightError::MalformedTable {
                    line: line_no,
                    reason: format!("more than {} distance rows", header.len()),
                });
            }

            let start = data.len();
            for field in fields {
                let km = field.parse::<u32>().map_err(|_| FreightError::MalformedTable {
                    line: line_no,
                    reason: format!("not a kilometer value: {field:?}"),
                })?;
                data.push(km);
            }
            let width = data.len() - start;
            if width != header.len() {
                return Err(FreightError::MalformedTable {
                    line: line_no,
                    reason: format!("expected {} columns, got {width}", header.len()),
                });
            }
            rows += 1;
        }

        let cities = cities.ok_or_else(|| FreightError::MalformedTable {
            line: 1,
            reason: "missing header row".into(),
        })?;
        if rows != cities.len() {
            return Err(FreightError::MalformedTable {
                line: rows + 1,
                reason: format!("expected {} distance rows, got {rows}", cities.len()),
            });
        }

        Ok(Self { cities, data })
    }

    /// City names in header order.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Position of `city` in the header, if present.
    pub fn city_index(&self, city: &str) -> Option<usize> {
        self.cities.iter().position(|c| c == city)
    }

    /// Kilometers from `origin` to `destination`.
    ///
    /// Fails with [`FreightError::CityNotFound`] if either name is absent.
    pub fn distance_between(&self, origin: &str, destination: &str) -> FreightResult<u32> {
        let from = self
            .city_index(origin)
            .ok_or_else(|| FreightError::CityNotFound(origin.to_string()))?;
        let to = self
            .city_index(destination)
            .ok_or_else(|| FreightError::CityNotFound(destination.to_string()))?;
        Ok(self.get(from, to))
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> u32 {
        self.data[from * self.size() + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, km: u32) {
        let size = self.size();
        self.data[from * size + to] = km;
    }

    /// Number of cities in this matrix.
    pub fn size(&self) -> usize {
        self.cities.len()
    }

    /// Returns `true` if `get(i, j) == get(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.get(i, j) != self.get(j, i) {
                    return false;
                }
            }
        }
        true
    }
}

fn check_unique(cities: &[String]) -> FreightResult<()> {
    let mut seen = HashSet::with_capacity(cities.len());
    for city in cities {
        if !seen.insert(city.as_str()) {
            return Err(FreightError::MalformedTable {
                line: 1,
                reason: format!("duplicate city name: {city}"),
            });
        }
    }
    Ok(())
}
