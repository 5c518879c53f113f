// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! Calculate the rhumb line and great circle between two positions.
//!
//! Positions may be given in decimal degrees, e.g. `45.5361`, or as degrees,
//! minutes and seconds with a hemisphere letter, e.g. `"45 32 10 N"`.
//! Set `RUST_LOG=debug` to log the calculations.

use chrono::Local;
use clap::Parser;
use geocalc::coordinate::format_degrees;
use geocalc::trace::trace_file_name;
use geocalc::{calculate_routes, Coordinate, EllipsoidModel, Routes, Trace, Validate};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// The name of the built-in home position.
const HOME_NAME: &str = "Home";
/// The latitude of the built-in home position.
const HOME_LAT: &str = "45.5361";
/// The longitude of the built-in home position.
const HOME_LON: &str = "-122.8092";

#[derive(Parser)]
#[command(name = "geocalc", version)]
#[command(about = "Rhumb line and great circle distances and bearings")]
struct Cli {
    /// Model of the Earth: "WGS-84" or "Sphere", any other name selects the Sphere
    #[arg(long, default_value = "WGS-84")]
    model: String,

    /// Start latitude (decimal degrees or DMS e.g. "45 32 10 N")
    #[arg(long, allow_hyphen_values = true, required_unless_present = "home")]
    from_lat: Option<String>,

    /// Start longitude (decimal degrees or DMS e.g. "122 48 33 W")
    #[arg(long, allow_hyphen_values = true, required_unless_present = "home")]
    from_lon: Option<String>,

    /// Finish latitude
    #[arg(long, allow_hyphen_values = true)]
    to_lat: String,

    /// Finish longitude
    #[arg(long, allow_hyphen_values = true)]
    to_lon: String,

    /// Name of the start position
    #[arg(long, default_value = "From")]
    from_name: String,

    /// Name of the finish position
    #[arg(long, default_value = "To")]
    to_name: String,

    /// Start from the home position
    #[arg(long, conflicts_with_all = ["from_lat", "from_lon"])]
    home: bool,

    /// Write the trace to "{from}2{to}.log"
    #[arg(long)]
    save: bool,

    /// Write the trace to a file
    #[arg(long, conflicts_with = "save")]
    trace: Option<PathBuf>,
}

impl Cli {
    /// The name and position of the start.
    fn start(&self) -> geocalc::Result<(&str, Coordinate)> {
        if self.home {
            let home = Coordinate::parse_decimal_degrees(HOME_LAT, HOME_LON)?;
            Ok((HOME_NAME, home))
        } else {
            let lat = self.from_lat.as_deref().unwrap_or_default();
            let lon = self.from_lon.as_deref().unwrap_or_default();
            Ok((self.from_name.as_str(), Coordinate::parse_dms(lat, lon)?))
        }
    }

    /// The trace file path, if any.
    fn trace_path(&self, from_name: &str) -> Option<PathBuf> {
        if self.save {
            Some(PathBuf::from(trace_file_name(from_name, &self.to_name)))
        } else {
            self.trace.clone()
        }
    }
}

/// The format of the time a trace was written.
const WHEN_FORMAT: &str = "%m-%d %H:%M";

/// Write the trace of a calculation, preceded by the time and the named
/// positions.
fn write_trace(
    path: &Path,
    names: (&str, &str),
    positions: (&Coordinate, &Coordinate),
    routes: &Routes,
) -> geocalc::Result<()> {
    let mut trace = Trace::new();
    trace
        .record("when", Local::now().format(WHEN_FORMAT).to_string())
        .record("from", names.0)
        .record("from.lat", format_degrees(positions.0.lat()))
        .record("from.lon", format_degrees(positions.0.lon()))
        .record("to", names.1)
        .record("to.lat", format_degrees(positions.1.lat()))
        .record("to.lon", format_degrees(positions.1.lon()));
    trace.append(routes.trace.clone());

    let file = File::create(path)?;
    trace.write_to(BufWriter::new(file))?;
    log::info!("trace written to {}", path.display());
    Ok(())
}

fn run(cli: &Cli) -> geocalc::Result<()> {
    let model = EllipsoidModel::select(&cli.model);
    let (from_name, from) = cli.start()?;
    let to = Coordinate::parse_dms(&cli.to_lat, &cli.to_lon)?;

    for (name, position) in [(from_name, &from), (cli.to_name.as_str(), &to)] {
        if !position.is_valid() {
            log::warn!(
                "{name} position is out of range: {}, {}",
                format_degrees(position.lat()),
                format_degrees(position.lon())
            );
        }
    }

    let routes = calculate_routes(&from, &to, &model)?;

    println!("{from_name} to {} ({})", cli.to_name, model.name());
    println!(
        "Rhumb Line Distance/Bearing: {} / {}",
        routes.rhumb.distance_text(),
        routes.rhumb.bearing_text()
    );
    println!("Great Circle Distance: {}", routes.great_circle.distance_text());
    println!("GC Initial Course: {}", routes.great_circle.bearing_text());

    if let Some(path) = cli.trace_path(from_name) {
        write_trace(&path, (from_name, &cli.to_name), (&from, &to), &routes)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("geocalc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_home_position() {
        let cli = parse(&["--home", "--to-lat", "45 33 36 N", "--to-lon", "122 12 W"]);
        let (name, home) = cli.start().unwrap();
        assert_eq!(HOME_NAME, name);
        assert_eq!(45.5361, home.lat().0);
        assert_eq!(-122.8092, home.lon().0);
        assert_eq!("WGS-84", cli.model);
        assert_eq!(None, cli.trace_path(name));
    }

    #[test]
    fn test_named_positions() {
        let cli = parse(&[
            "--from-lat",
            "42 N",
            "--from-lon",
            "29 E",
            "--from-name",
            "Istanbul",
            "--to-lat",
            "39",
            "--to-lon",
            "-77",
            "--to-name",
            "Washington",
            "--model",
            "Sphere",
        ]);
        let (name, from) = cli.start().unwrap();
        assert_eq!("Istanbul", name);
        assert_eq!(42.0, from.lat().0);
        assert_eq!(29.0, from.lon().0);
        assert_eq!("Sphere", cli.model);
    }

    #[test]
    fn test_invalid_arguments() {
        let args = ["geocalc", "--to-lat", "39", "--to-lon", "-77"];
        assert!(Cli::try_parse_from(args).is_err());

        let args = [
            "geocalc",
            "--home",
            "--from-lat",
            "42",
            "--to-lat",
            "39",
            "--to-lon",
            "-77",
        ];
        assert!(Cli::try_parse_from(args).is_err());

        let args = [
            "geocalc", "--home", "--to-lat", "39", "--to-lon", "-77", "--save", "--trace", "a.log",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_trace_path() {
        let cli = parse(&["--home", "--to-lat", "39", "--to-lon", "-77", "--to-name", "Office"]);
        assert_eq!(None, cli.trace_path(HOME_NAME));

        let cli = parse(&[
            "--home",
            "--to-lat",
            "39",
            "--to-lon",
            "-77",
            "--to-name",
            "Office",
            "--save",
        ]);
        assert_eq!(
            Some(PathBuf::from("Home2Office.log")),
            cli.trace_path(HOME_NAME)
        );

        let cli = parse(&["--home", "--to-lat", "39", "--to-lon", "-77", "--trace", "run.log"]);
        assert_eq!(Some(PathBuf::from("run.log")), cli.trace_path(HOME_NAME));
    }

    #[test]
    fn test_write_trace() {
        let cli = parse(&["--home", "--to-lat", "45 33 36 N", "--to-lon", "122 12 W"]);
        let (name, from) = cli.start().unwrap();
        let to = Coordinate::parse_dms(&cli.to_lat, &cli.to_lon).unwrap();
        let routes = calculate_routes(&from, &to, &EllipsoidModel::select(&cli.model)).unwrap();

        let path = std::env::temp_dir().join(trace_file_name("geocalc_Home", "Office"));
        write_trace(&path, (name, "Office"), (&from, &to), &routes).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(routes.trace.len() + 7, lines.len());
        assert!(lines[0].starts_with("when: "));
        assert_eq!("when: 01-01 00:00".len(), lines[0].len());
        assert_eq!(
            vec![
                "from: Home",
                "from.lat: 45.5361",
                "from.lon: -122.8092",
                "to: Office",
                "to.lat: 45.5600",
                "to.lon: -122.2000"
            ],
            lines[1..7].to_vec()
        );
        assert!(lines[7].starts_with("geocalc: "));
        assert_eq!("gc.dist: 29.61 miles", lines[lines.len() - 2]);
    }
}
