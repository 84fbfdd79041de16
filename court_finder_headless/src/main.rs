use catalog::{CatalogSource, CatalogStore};
use clap::Parser;
use common::{
    criteria::{Mode, SportFilter},
    position::Position,
};
use location::{
    LocationServices, constant_location::ConstantGeolocation, mapbox::MapboxGeocoder,
    static_geocoder::StaticGeocoder,
};
use map_view::{MapView, tracing_adapter::TracingMapAdapter};
use module_core::{EventBus, Module};
use scripted_user::{Script, ScriptedUser};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use view_state::{ViewState, config::ViewConfig};

mod scripted_user;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Look for tournaments or for courts to play on.
    #[arg(short, long, default_value_t = Mode::Play)]
    mode: Mode,
    #[arg(short, long, default_value_t = SportFilter::All)]
    sport: SportFilter,
    /// Search radius in miles.
    #[arg(short, long)]
    radius: Option<f64>,
    /// Place to search around. The first geocoding result is used.
    #[arg(short, long, conflicts_with = "current_location")]
    location: Option<String>,
    /// Search around the device position.
    #[arg(short = 'c', long)]
    current_location: bool,
    /// Device position as `lat,lng`.
    #[arg(long, value_parser = parse_position)]
    device_position: Option<Position>,
    /// Folder with courts.json and tournaments.json instead of the built-in catalog.
    #[arg(long)]
    catalog_dir: Option<PathBuf>,
    /// Mapbox access token. Without a token an offline gazetteer is used.
    #[arg(long, env = "MAPBOX_TOKEN")]
    mapbox_token: Option<String>,
    /// Id of the court or tournament to select.
    #[arg(long)]
    select: Option<String>,
}

fn parse_position(value: &str) -> Result<Position, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected 'lat,lng', got '{value}'"))?;
    let position = Position::new(
        lat.trim().parse().map_err(|e| format!("invalid latitude: {e}"))?,
        lng.trim().parse().map_err(|e| format!("invalid longitude: {e}"))?,
    );
    if !position.is_valid() {
        return Err(format!("position {value} is out of range"));
    }
    Ok(position)
}

fn create_location_module(eb: &EventBus, cli: &Cli) -> Result<Box<dyn Module>, ()> {
    let geolocation = ConstantGeolocation::new(cli.device_position);
    match &cli.mapbox_token {
        Some(token) => {
            let geocoder = MapboxGeocoder::new(token).map_err(|e| {
                error!("Failed to create Mapbox geocoder. Error: {}", e);
            })?;
            info!("Using Mapbox geocoding");
            Ok(Box::new(LocationServices::new(
                eb.context(),
                geocoder,
                geolocation,
            )))
        }
        None => {
            info!("No Mapbox token, using offline gazetteer");
            Ok(Box::new(LocationServices::new(
                eb.context(),
                StaticGeocoder::new_york(),
                geolocation,
            )))
        }
    }
}

fn create_script(cli: &Cli, config: &ViewConfig) -> Result<Script, ()> {
    let radius_miles = cli.radius.unwrap_or(config.default_radius_miles);
    if !config.is_radius_in_bounds(radius_miles) {
        error!(
            "Radius {} is outside of {} to {} miles",
            radius_miles, config.min_radius_miles, config.max_radius_miles
        );
        return Err(());
    }
    Ok(Script {
        mode: cli.mode,
        sport_filter: cli.sport,
        radius_miles,
        location: cli.location.clone(),
        current_location: cli.current_location,
        select: cli.select.clone(),
    })
}

#[tokio::main]
async fn main() -> Result<(), ()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ViewConfig::default();
    let script = create_script(&cli, &config)?;
    let source = match &cli.catalog_dir {
        Some(dir) => CatalogSource::Directory(dir.clone()),
        None => CatalogSource::Builtin,
    };

    let eb = EventBus::default();
    let mut location = create_location_module(&eb, &cli)?;
    let mut catalog = CatalogStore::new(source, eb.context());
    let mut map_view = MapView::new(eb.context(), TracingMapAdapter::new());
    let mut user = ScriptedUser::new(eb.context(), script, config.clone());
    let mut view_state = ViewState::new(eb.context(), config);

    info!("Starting modules...");
    let (view_state, catalog, location, map_view, user) = tokio::join!(
        view_state.run(),
        catalog.run(),
        location.run(),
        map_view.run(),
        user.run()
    );
    view_state.and(catalog).and(location).and(map_view).and(user)
}

#[cfg(test)]
mod tests;
