use chrono::prelude::*;
use plotters::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod figure;
pub mod filter;
pub mod plot;

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

pub const COL_TIMESTAMP: &str = "TIMESTAMP";
pub const COL_AREAS: &str = "AREAS";
pub const COL_CONSUMPTION: &str = "areaConsumption";
pub const COL_TECHNOLOGIES: &str = "TECHNOLOGIES";
pub const COL_FACTOR: &str = "availabilityFactor";

pub const DEFAULT_TECHNOLOGIES: [&str; 2] = ["Thermal", "OldNuke"];

#[derive(Error, Debug)]
pub enum Error {
    #[error("input file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },
    #[error("parse error in {} at line {}: {}", .path.display(), .line, .reason)]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("render error: {0}")]
    Render(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Field conventions of one delimited table.
///
/// The time series tables use comma fields with point decimals, the
/// technology parameter table uses semicolon fields with comma decimals.
/// Each table keeps its own convention, they are never unified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableFormat {
    pub delimiter: char,
    pub decimal: char,
}

impl TableFormat {
    pub const fn comma_point() -> TableFormat {
        TableFormat {
            delimiter: ',',
            decimal: '.',
        }
    }

    pub const fn semicolon_comma() -> TableFormat {
        TableFormat {
            delimiter: ';',
            decimal: ',',
        }
    }

    /// parse a numeric field honoring the decimal convention
    pub fn parse_f64(&self, field: &str) -> Result<f64, std::num::ParseFloatError> {
        if self.decimal == '.' {
            field.trim().parse()
        } else {
            field.trim().replace(self.decimal, ".").parse()
        }
    }

    /// format a number back out with the decimal convention
    pub fn format_f64(&self, value: f64) -> String {
        let field = format!("{}", value);
        if self.decimal == '.' {
            field
        } else {
            field.replace('.', &self.decimal.to_string())
        }
    }
}

/// Locates the input tables of one run.
///
/// The filename templates carry `{year}` and `{zone}` placeholders and
/// are joined onto `input_dir`, so the path convention is data rather
/// than logic spread over the callers.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSpec {
    pub input_dir: PathBuf,
    pub zone: String,
    pub year: i32,
    pub consumption_template: String,
    pub availability_template: String,
    pub parameters_template: String,
}

impl DataSpec {
    pub fn new(input_dir: PathBuf, zone: &str, year: i32) -> DataSpec {
        DataSpec {
            input_dir,
            zone: String::from(zone),
            year,
            consumption_template: String::from("areaConsumption{year}_{zone}.csv"),
            availability_template: String::from("availabilityFactor{year}_{zone}.csv"),
            parameters_template: String::from("Gestion-Simple_TECHNOLOGIES.csv"),
        }
    }

    fn fill(&self, template: &str) -> PathBuf {
        let name = template
            .replace("{year}", &self.year.to_string())
            .replace("{zone}", &self.zone);
        self.input_dir.join(name)
    }

    pub fn consumption_path(&self) -> PathBuf {
        self.fill(&self.consumption_template)
    }

    pub fn availability_path(&self) -> PathBuf {
        self.fill(&self.availability_template)
    }

    pub fn parameters_path(&self) -> PathBuf {
        self.fill(&self.parameters_template)
    }
}

fn open_table(path: &Path) -> Result<BufReader<File>, Error> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

fn parse_err<S: Into<String>>(path: &Path, line: usize, reason: S) -> Error {
    Error::Parse {
        path: path.to_path_buf(),
        line,
        reason: reason.into(),
    }
}

fn column_index(header: &[&str], name: &str, path: &Path) -> Result<usize, Error> {
    header
        .iter()
        .position(|c| *c == name)
        .ok_or_else(|| parse_err(path, 1, format!("missing column {}", name)))
}

fn parse_timestamp(field: &str, path: &Path, line: usize) -> Result<i64, Error> {
    field
        .trim()
        .parse::<i64>()
        .map_err(|e| parse_err(path, line, format!("bad {} {:?}: {}", COL_TIMESTAMP, field, e)))
}

/// Hourly consumption per zone.
///
/// Part of the input interface of every run; nothing downstream of the
/// loader consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaConsumption {
    pub timestamp: Vec<i64>,
    pub area: Vec<String>,
    pub consumption: Vec<f64>,
}

impl AreaConsumption {
    pub fn new(capacity: usize) -> AreaConsumption {
        AreaConsumption {
            timestamp: Vec::with_capacity(capacity),
            area: Vec::with_capacity(capacity),
            consumption: Vec::with_capacity(capacity),
        }
    }

    pub fn from_csv(fin: &Path, format: &TableFormat) -> Result<AreaConsumption, Error> {
        let buf = open_table(fin)?;
        let mut lines = buf.lines();
        let header_line = match lines.next() {
            Some(l) => l?,
            None => return Err(parse_err(fin, 1, "empty file, expected a header row")),
        };
        let header: Vec<&str> = header_line.split(format.delimiter).map(str::trim).collect();
        let icol_ts = column_index(&header, COL_TIMESTAMP, fin)?;
        let icol_area = column_index(&header, COL_AREAS, fin)?;
        let icol_cons = column_index(&header, COL_CONSUMPTION, fin)?;
        let ncol = header.len();
        let mut table = AreaConsumption::new(10000);
        for (i, l) in lines.enumerate() {
            let line = l?;
            if line.trim().is_empty() {
                continue;
            }
            let nline = i + 2;
            let fields: Vec<&str> = line.split(format.delimiter).collect();
            if fields.len() != ncol {
                return Err(parse_err(
                    fin,
                    nline,
                    format!("expected {} fields, found {}", ncol, fields.len()),
                ));
            }
            let timestamp = parse_timestamp(fields[icol_ts], fin, nline)?;
            let consumption = format.parse_f64(fields[icol_cons]).map_err(|e| {
                parse_err(
                    fin,
                    nline,
                    format!("bad {} {:?}: {}", COL_CONSUMPTION, fields[icol_cons], e),
                )
            })?;
            table.timestamp.push(timestamp);
            table.area.push(String::from(fields[icol_area].trim()));
            table.consumption.push(consumption);
        }
        log::debug!(
            "loaded {} consumption rows from {}",
            table.len(),
            fin.display()
        );
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.timestamp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamp.is_empty()
    }
}

/// Hourly availability factor per technology.
///
/// The factor is conventionally a fraction of nameplate capacity in
/// [0, 1]; the range is not enforced, exploratory datasets may step
/// outside it.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityFactor {
    pub timestamp: Vec<i64>,
    pub technology: Vec<String>,
    pub factor: Vec<f64>,
}

impl AvailabilityFactor {
    pub fn new(capacity: usize) -> AvailabilityFactor {
        AvailabilityFactor {
            timestamp: Vec::with_capacity(capacity),
            technology: Vec::with_capacity(capacity),
            factor: Vec::with_capacity(capacity),
        }
    }

    pub fn from_csv(fin: &Path, format: &TableFormat) -> Result<AvailabilityFactor, Error> {
        let buf = open_table(fin)?;
        let mut lines = buf.lines();
        let header_line = match lines.next() {
            Some(l) => l?,
            None => return Err(parse_err(fin, 1, "empty file, expected a header row")),
        };
        let header: Vec<&str> = header_line.split(format.delimiter).map(str::trim).collect();
        let icol_ts = column_index(&header, COL_TIMESTAMP, fin)?;
        let icol_tech = column_index(&header, COL_TECHNOLOGIES, fin)?;
        let icol_af = column_index(&header, COL_FACTOR, fin)?;
        let ncol = header.len();
        let mut table = AvailabilityFactor::new(10000);
        for (i, l) in lines.enumerate() {
            let line = l?;
            if line.trim().is_empty() {
                continue;
            }
            let nline = i + 2;
            let fields: Vec<&str> = line.split(format.delimiter).collect();
            if fields.len() != ncol {
                return Err(parse_err(
                    fin,
                    nline,
                    format!("expected {} fields, found {}", ncol, fields.len()),
                ));
            }
            let timestamp = parse_timestamp(fields[icol_ts], fin, nline)?;
            let factor = format.parse_f64(fields[icol_af]).map_err(|e| {
                parse_err(
                    fin,
                    nline,
                    format!("bad {} {:?}: {}", COL_FACTOR, fields[icol_af], e),
                )
            })?;
            table.timestamp.push(timestamp);
            table.technology.push(String::from(fields[icol_tech].trim()));
            table.factor.push(factor);
        }
        log::debug!(
            "loaded {} availability rows from {}",
            table.len(),
            fin.display()
        );
        Ok(table)
    }

    /// Keeps the rows whose technology belongs to the selection.
    /// Stable: the result is a subsequence of the source rows. An empty
    /// or disjoint selection yields an empty table, not an error.
    pub fn filter_technologies(&self, selection: &HashSet<String>) -> AvailabilityFactor {
        let mut table = AvailabilityFactor::new(self.len());
        for i in 0..self.len() {
            if selection.contains(&self.technology[i]) {
                table.timestamp.push(self.timestamp[i]);
                table.technology.push(self.technology[i].clone());
                table.factor.push(self.factor[i]);
            }
        }
        table
    }

    /// Narrows to a single technology, the series that gets charted.
    pub fn technology_series(&self, technology: &str) -> TimeSeries {
        let mut series = TimeSeries::new(self.len());
        for i in 0..self.len() {
            if self.technology[i] == technology {
                series.timestamp.push(self.timestamp[i]);
                series.value.push(self.factor[i]);
            }
        }
        series
    }

    /// writes the table back out with the field conventions it was read with
    pub fn to_csv(&self, fout: &Path, format: &TableFormat) -> Result<(), Error> {
        let file = File::create(fout)?;
        let mut buf = BufWriter::new(file);
        let sep = format.delimiter.to_string();
        writeln!(
            buf,
            "{}",
            [COL_TIMESTAMP, COL_TECHNOLOGIES, COL_FACTOR].join(&sep)
        )?;
        for i in 0..self.len() {
            let row = [
                self.timestamp[i].to_string(),
                self.technology[i].clone(),
                format.format_f64(self.factor[i]),
            ];
            writeln!(buf, "{}", row.join(&sep))?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.timestamp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamp.is_empty()
    }
}

/// Static parameters per technology: the identifier column plus
/// whatever numeric attribute columns the file carries (capacities,
/// costs, ramp limits, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct TechnologyParameters {
    pub technology: Vec<String>,
    pub attributes: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl TechnologyParameters {
    pub fn from_csv(fin: &Path, format: &TableFormat) -> Result<TechnologyParameters, Error> {
        let buf = open_table(fin)?;
        let mut lines = buf.lines();
        let header_line = match lines.next() {
            Some(l) => l?,
            None => return Err(parse_err(fin, 1, "empty file, expected a header row")),
        };
        let header: Vec<&str> = header_line.split(format.delimiter).map(str::trim).collect();
        let icol_tech = column_index(&header, COL_TECHNOLOGIES, fin)?;
        let ncol = header.len();
        let attributes: Vec<String> = header
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != icol_tech)
            .map(|(_, c)| String::from(*c))
            .collect();
        let mut table = TechnologyParameters {
            technology: Vec::new(),
            attributes,
            values: Vec::new(),
        };
        for (i, l) in lines.enumerate() {
            let line = l?;
            if line.trim().is_empty() {
                continue;
            }
            let nline = i + 2;
            let fields: Vec<&str> = line.split(format.delimiter).collect();
            if fields.len() != ncol {
                return Err(parse_err(
                    fin,
                    nline,
                    format!("expected {} fields, found {}", ncol, fields.len()),
                ));
            }
            let mut row: Vec<f64> = Vec::with_capacity(ncol - 1);
            for (j, field) in fields.iter().enumerate() {
                if j == icol_tech {
                    continue;
                }
                let value = format.parse_f64(field).map_err(|e| {
                    parse_err(fin, nline, format!("bad {} {:?}: {}", header[j], field, e))
                })?;
                row.push(value);
            }
            table.technology.push(String::from(fields[icol_tech].trim()));
            table.values.push(row);
        }
        log::debug!("loaded {} technologies from {}", table.len(), fin.display());
        Ok(table)
    }

    /// Keeps the technologies that belong to the selection, in source
    /// row order.
    pub fn filter_technologies(&self, selection: &HashSet<String>) -> TechnologyParameters {
        let mut table = TechnologyParameters {
            technology: Vec::with_capacity(self.len()),
            attributes: self.attributes.clone(),
            values: Vec::with_capacity(self.len()),
        };
        for i in 0..self.len() {
            if selection.contains(&self.technology[i]) {
                table.technology.push(self.technology[i].clone());
                table.values.push(self.values[i].clone());
            }
        }
        table
    }

    /// writes the table back out with the field conventions it was read with
    pub fn to_csv(&self, fout: &Path, format: &TableFormat) -> Result<(), Error> {
        let file = File::create(fout)?;
        let mut buf = BufWriter::new(file);
        let sep = format.delimiter.to_string();
        let mut header = vec![String::from(COL_TECHNOLOGIES)];
        header.extend(self.attributes.iter().cloned());
        writeln!(buf, "{}", header.join(&sep))?;
        for (technology, row) in self.technology.iter().zip(self.values.iter()) {
            let mut fields = vec![technology.clone()];
            fields.extend(row.iter().map(|v| format.format_f64(*v)));
            writeln!(buf, "{}", fields.join(&sep))?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.technology.len()
    }

    pub fn is_empty(&self) -> bool {
        self.technology.is_empty()
    }
}

/// A single technology's hourly series, ready for charting.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub timestamp: Vec<i64>,
    pub value: Vec<f64>,
}

impl TimeSeries {
    pub fn new(capacity: usize) -> TimeSeries {
        TimeSeries {
            timestamp: Vec::with_capacity(capacity),
            value: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.timestamp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamp.is_empty()
    }

    /// true when the timestamps strictly increase
    pub fn is_ordered(&self) -> bool {
        self.timestamp.windows(2).all(|w| w[0] < w[1])
    }

    /// plots the series to svg, hour indices mapped onto the year's datetimes
    pub fn plot_datetime(&self, fout: &Path, year: i32) -> Result<(), Box<dyn std::error::Error>> {
        if self.timestamp.is_empty() {
            return Err("empty series, nothing to plot".into());
        }
        let time: Vec<NaiveDateTime> = self
            .timestamp
            .iter()
            .map(|&h| hour_to_datetime(year, h))
            .collect();
        let (xmindt, xmaxdt): (NaiveDateTime, NaiveDateTime) = min_and_max(&time[..]);
        let xspan: chrono::Duration = xmaxdt - xmindt;
        let xmargin: chrono::Duration = xspan / 20;
        let xmindt = xmindt - xmargin;
        let xmaxdt = xmaxdt + xmargin;
        let xminlocal = TimeZone::from_utc_datetime(&Utc, &xmindt);
        let xmaxlocal = TimeZone::from_utc_datetime(&Utc, &xmaxdt);
        let xfmt = suitable_xfmt(xspan);
        let (ymin, ymax) = min_and_max(&self.value[..]);
        let yspan = (ymax - ymin) / 10f64;
        let ymin = ymin - yspan;
        let ymax = ymax + yspan;
        let root = SVGBackend::new(fout, (1600, 800)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(xminlocal..xmaxlocal, ymin..ymax)?;
        chart
            .configure_mesh()
            .light_line_style(&TRANSPARENT)
            .bold_line_style(RGBColor(150, 150, 150).stroke_width(2))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 24))
            .y_desc("availability factor")
            .x_labels(14) // max number of labels
            .x_label_formatter(&|x: &DateTime<Utc>| x.format(xfmt).to_string())
            .y_label_formatter(&|y: &f64| format!("{:.2}", y))
            .x_desc(format!("datetime [{}]", xfmt.replace("%", "")))
            .draw()?;
        let line = LineSeries::new(
            time.iter()
                .zip(self.value.iter())
                .map(|(x, y)| (TimeZone::from_utc_datetime(&Utc, x), *y)),
            RGBColor(0, 100, 180).stroke_width(2),
        );
        chart.draw_series(line)?;
        Ok(())
    }
}

impl std::fmt::Display for TimeSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},value\n", COL_TIMESTAMP)?;
        for (t, v) in self.timestamp.iter().zip(self.value.iter()) {
            write!(f, "{},{}\n", t, v)?
        }
        Ok(())
    }
}

/// maps an hour-of-year index onto the matching datetime of the year
pub fn hour_to_datetime(year: i32, hour: i64) -> NaiveDateTime {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    start + chrono::Duration::hours(hour)
}

pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> (T, T) {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => panic!("could not iterate over slice"),
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    return (min, max);
}

pub fn suitable_xfmt(d: chrono::Duration) -> &'static str {
    let xfmt = if d > chrono::Duration::weeks(1) {
        "%y-%m-%d"
    } else if d > chrono::Duration::days(1) {
        "%m-%d %H"
    } else {
        "%d %H:%M"
    };
    return xfmt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const AVAILABILITY_CSV: &str = "\
TIMESTAMP,TECHNOLOGIES,availabilityFactor
0,Thermal,0.95
0,OldNuke,0.80
0,HydroReservoir,0.50
1,Thermal,0.94
1,OldNuke,0.81
1,HydroReservoir,0.60
2,Thermal,0.93
2,OldNuke,0.82
2,HydroReservoir,0.70
";

    const CONSUMPTION_CSV: &str = "\
TIMESTAMP,AREAS,areaConsumption
0,FR,61000.5
1,FR,60250.0
2,FR,59800.25
";

    const PARAMETERS_CSV: &str = "\
TECHNOLOGIES;capacity;energyCost
Thermal;15000;30,5
OldNuke;63000;10,2
HydroReservoir;8000;0,0
";

    fn write_table(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn selection(techs: &[&str]) -> HashSet<String> {
        techs.iter().map(|t| String::from(*t)).collect()
    }

    fn load_availability(dir: &Path) -> AvailabilityFactor {
        let path = write_table(dir, "availabilityFactor2013_FR.csv", AVAILABILITY_CSV);
        AvailabilityFactor::from_csv(&path, &TableFormat::comma_point()).unwrap()
    }

    #[test]
    fn loads_availability_table() {
        let dir = tempdir().unwrap();
        let table = load_availability(dir.path());
        assert_eq!(table.len(), 9);
        assert_eq!(table.technology[1], "OldNuke");
        assert_eq!(table.factor[1], 0.80);
        assert_eq!(table.timestamp[8], 2);
    }

    #[test]
    fn loads_consumption_table() {
        let dir = tempdir().unwrap();
        let path = write_table(dir.path(), "areaConsumption2013_FR.csv", CONSUMPTION_CSV);
        let table = AreaConsumption::from_csv(&path, &TableFormat::comma_point()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.area[0], "FR");
        assert_eq!(table.consumption[2], 59800.25);
    }

    #[test]
    fn loads_parameters_with_semicolon_and_decimal_comma() {
        let dir = tempdir().unwrap();
        let path = write_table(dir.path(), "Gestion-Simple_TECHNOLOGIES.csv", PARAMETERS_CSV);
        let table = TechnologyParameters::from_csv(&path, &TableFormat::semicolon_comma()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.attributes, vec!["capacity", "energyCost"]);
        assert_eq!(table.technology[0], "Thermal");
        assert_eq!(table.values[0], vec![15000.0, 30.5]);
        assert_eq!(table.values[1], vec![63000.0, 10.2]);
    }

    #[test]
    fn loading_twice_yields_identical_tables() {
        let dir = tempdir().unwrap();
        let path = write_table(dir.path(), "availabilityFactor2013_FR.csv", AVAILABILITY_CSV);
        let once = AvailabilityFactor::from_csv(&path, &TableFormat::comma_point()).unwrap();
        let twice = AvailabilityFactor::from_csv(&path, &TableFormat::comma_point()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let err = AvailabilityFactor::from_csv(
            Path::new("no/such/availabilityFactor.csv"),
            &TableFormat::comma_point(),
        )
        .unwrap_err();
        match err {
            Error::FileNotFound { .. } => {}
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn short_row_is_a_parse_error_with_its_line() {
        let dir = tempdir().unwrap();
        let path = write_table(
            dir.path(),
            "short.csv",
            "TIMESTAMP,TECHNOLOGIES,availabilityFactor\n0,Thermal,0.9\n1,Thermal\n",
        );
        let err = AvailabilityFactor::from_csv(&path, &TableFormat::comma_point()).unwrap_err();
        match err {
            Error::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn bad_number_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = write_table(
            dir.path(),
            "bad.csv",
            "TIMESTAMP,TECHNOLOGIES,availabilityFactor\n0,Thermal,high\n",
        );
        let err = AvailabilityFactor::from_csv(&path, &TableFormat::comma_point()).unwrap_err();
        match err {
            Error::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn missing_column_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = write_table(
            dir.path(),
            "headers.csv",
            "TIMESTAMP,TECHNOLOGIES\n0,Thermal\n",
        );
        let err = AvailabilityFactor::from_csv(&path, &TableFormat::comma_point()).unwrap_err();
        match err {
            Error::Parse { line, reason, .. } => {
                assert_eq!(line, 1);
                assert!(reason.contains(COL_FACTOR), "reason: {}", reason);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn filtering_keeps_selected_technologies_in_order() {
        let dir = tempdir().unwrap();
        let table = load_availability(dir.path());
        let sel = selection(&["Thermal", "OldNuke"]);
        let filtered = table.filter_technologies(&sel);
        assert_eq!(filtered.len(), 6);
        assert!(filtered.technology.iter().all(|t| sel.contains(t)));
        let rows: Vec<(i64, &str)> = filtered
            .timestamp
            .iter()
            .zip(filtered.technology.iter())
            .map(|(&t, n)| (t, n.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (0, "Thermal"),
                (0, "OldNuke"),
                (1, "Thermal"),
                (1, "OldNuke"),
                (2, "Thermal"),
                (2, "OldNuke"),
            ]
        );
        // source table untouched
        assert_eq!(table.len(), 9);
    }

    #[test]
    fn filtering_with_empty_selection_yields_empty_table() {
        let dir = tempdir().unwrap();
        let table = load_availability(dir.path());
        let filtered = table.filter_technologies(&HashSet::new());
        assert!(filtered.is_empty());
    }

    #[test]
    fn filtering_with_unknown_technologies_yields_empty_table() {
        let dir = tempdir().unwrap();
        let table = load_availability(dir.path());
        let filtered = table.filter_technologies(&selection(&["Coal", "Wind"]));
        assert!(filtered.is_empty());
    }

    #[test]
    fn parameters_filter_matches_selection() {
        let dir = tempdir().unwrap();
        let path = write_table(dir.path(), "Gestion-Simple_TECHNOLOGIES.csv", PARAMETERS_CSV);
        let table = TechnologyParameters::from_csv(&path, &TableFormat::semicolon_comma()).unwrap();
        let filtered = table.filter_technologies(&selection(&["Thermal", "OldNuke"]));
        assert_eq!(filtered.technology, vec!["Thermal", "OldNuke"]);
        assert_eq!(filtered.attributes, table.attributes);
        assert_eq!(filtered.values[1], vec![63000.0, 10.2]);
    }

    #[test]
    fn narrows_to_a_single_technology_series() {
        let dir = tempdir().unwrap();
        let table = load_availability(dir.path());
        let filtered = table.filter_technologies(&selection(&["Thermal", "OldNuke"]));
        let series = filtered.technology_series("OldNuke");
        assert_eq!(series.timestamp, vec![0, 1, 2]);
        assert_eq!(series.value, vec![0.80, 0.81, 0.82]);
        assert!(series.is_ordered());
    }

    #[test]
    fn a_full_year_series_keeps_all_hours() {
        let mut table = AvailabilityFactor::new(8760 * 2);
        for h in 0..8760 {
            table.timestamp.push(h);
            table.technology.push(String::from("OldNuke"));
            table.factor.push(0.75);
            table.timestamp.push(h);
            table.technology.push(String::from("Thermal"));
            table.factor.push(0.9);
        }
        let filtered = table.filter_technologies(&selection(&["Thermal", "OldNuke"]));
        let series = filtered.technology_series("OldNuke");
        assert_eq!(series.len(), 8760);
        assert!(series.is_ordered());
        assert_eq!(series.timestamp[0], 0);
        assert_eq!(series.timestamp[8759], 8759);
    }

    #[test]
    fn narrowing_to_missing_technology_is_empty() {
        let dir = tempdir().unwrap();
        let table = load_availability(dir.path());
        let series = table.technology_series("Geothermal");
        assert!(series.is_empty());
    }

    #[test]
    fn paths_follow_the_input_convention() {
        let spec = DataSpec::new(PathBuf::from("CSV/input"), "FR", 2013);
        assert_eq!(
            spec.consumption_path(),
            PathBuf::from("CSV/input/areaConsumption2013_FR.csv")
        );
        assert_eq!(
            spec.availability_path(),
            PathBuf::from("CSV/input/availabilityFactor2013_FR.csv")
        );
        assert_eq!(
            spec.parameters_path(),
            PathBuf::from("CSV/input/Gestion-Simple_TECHNOLOGIES.csv")
        );
    }

    #[test]
    fn templates_are_data_not_convention() {
        let mut spec = DataSpec::new(PathBuf::from("in"), "DE", 2020);
        spec.availability_template = String::from("af_{zone}_{year}.csv");
        assert_eq!(spec.availability_path(), PathBuf::from("in/af_DE_2020.csv"));
    }

    #[test]
    fn written_tables_keep_their_field_conventions() {
        let dir = tempdir().unwrap();
        let path = write_table(dir.path(), "Gestion-Simple_TECHNOLOGIES.csv", PARAMETERS_CSV);
        let table = TechnologyParameters::from_csv(&path, &TableFormat::semicolon_comma()).unwrap();
        let out = dir.path().join("TECHNOLOGIES_filtered.csv");
        table.to_csv(&out, &TableFormat::semicolon_comma()).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "TECHNOLOGIES;capacity;energyCost");
        assert_eq!(lines[1], "Thermal;15000;30,5");
    }

    #[test]
    fn hour_indices_map_onto_the_year() {
        assert_eq!(
            hour_to_datetime(2013, 0),
            NaiveDate::from_ymd_opt(2013, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(
            hour_to_datetime(2013, 25),
            NaiveDate::from_ymd_opt(2013, 1, 2)
                .unwrap()
                .and_hms_opt(1, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn display_prints_header_and_rows() {
        let mut series = TimeSeries::new(2);
        series.timestamp.push(0);
        series.value.push(0.5);
        series.timestamp.push(1);
        series.value.push(0.6);
        assert_eq!(format!("{}", series), "TIMESTAMP,value\n0,0.5\n1,0.6\n");
    }

    #[test]
    fn min_and_max_span_the_slice() {
        assert_eq!(min_and_max(&[3., 1., 2.]), (1., 3.));
        assert_eq!(min_and_max(&[5]), (5, 5));
    }

    #[test]
    fn xfmt_widens_with_the_span() {
        assert_eq!(suitable_xfmt(chrono::Duration::weeks(2)), "%y-%m-%d");
        assert_eq!(suitable_xfmt(chrono::Duration::hours(30)), "%m-%d %H");
        assert_eq!(suitable_xfmt(chrono::Duration::hours(5)), "%d %H:%M");
    }
}
