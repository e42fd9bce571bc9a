use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Args;
use fresq_core::{
    order::{Order, Vehicle},
    stop::{LocationLookup, Stop},
};
use fresq_dispatch::{resolver::resolve_path, route_service::OsrmGeometryService};
use geojson::Value::LineString;
use geojson::{Feature, GeoJson, Geometry};
use serde::Deserialize;
use tracing::info;

#[derive(Args)]
pub struct ResolveArgs {
    /// Mission file: vehicle, orders and the optimizer's stop sequence
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Where to write the GeoJSON path (stdout when omitted)
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

#[derive(Deserialize)]
struct MissionFile {
    vehicle: Vehicle,
    orders: Vec<Order>,
    route: Vec<Stop>,
}

pub async fn run(args: ResolveArgs) -> anyhow::Result<()> {
    let f = File::open(&args.input)?;
    let mission: MissionFile = serde_json::from_reader(BufReader::new(f))?;

    let lookup = LocationLookup::build(&mission.vehicle, &mission.orders);
    let service = OsrmGeometryService::from_env();

    let path = resolve_path(&service, &mission.route, &lookup).await;
    info!(
        "resolved {} points ({:?} fidelity)",
        path.len(),
        path.fidelity()
    );

    let coordinates: Vec<Vec<f64>> = path
        .points()
        .iter()
        .map(|point| vec![point.lon, point.lat])
        .collect();
    let feature = Feature {
        geometry: Some(Geometry::new(LineString(coordinates))),
        ..Default::default()
    };
    let geojson = serde_json::to_string_pretty(&GeoJson::Feature(feature))?;

    match args.out {
        Some(out) => std::fs::write(out, geojson)?,
        None => println!("{geojson}"),
    }

    Ok(())
}
