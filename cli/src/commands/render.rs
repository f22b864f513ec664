use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail, ensure};
use geo::{Coord, Rect};
use sf1map::{
    Choropleth, ChoroplethOptions, Config, DataDictionary, DataSource, StateData,
    VmaxRule, VminRule, ZeroPopulationPolicy,
};
use tracing::info;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::RenderArgs) -> Result<()> {
    let config = Config::from_path(&args.config)?;
    let out_path = args.output.clone().unwrap_or_else(|| PathBuf::from(format!("./{}.csv", args.field)));

    let dictionary = Arc::new(DataDictionary::from_path(&config.descriptor_path)
        .with_context(|| format!("[render] Failed to load descriptors from {}", config.descriptor_path.display()))?);
    ensure!(dictionary.contains(&args.field), "[render] Unknown field code {:?}", args.field);
    if let Some(label) = dictionary.label(&args.field) {
        info!("[render] {}: {label}", args.field);
    }

    let selected = if args.state.is_empty() {
        config.states.iter().collect::<Vec<_>>()
    } else {
        args.state.iter()
            .map(|abbr| config.state(abbr).with_context(|| format!("[render] State {abbr:?} is not configured")))
            .collect::<Result<Vec<_>>>()?
    };

    let states = selected.into_iter()
        .map(|state| {
            StateData::load(dictionary.clone(), state, &config.geometry, config.collision_policy)
                .with_context(|| format!("[render] Failed to load state {}", state.state))
        })
        .collect::<Result<Vec<_>>>()?;

    let options = ChoroplethOptions {
        bbox: args.bbox.as_deref().map(parse_bbox).transpose()?,
        density: args.density,
        percentage: args.percentage,
        zero_population: if args.strict { ZeroPopulationPolicy::Error } else { ZeroPopulationPolicy::Zero },
    };

    let choropleth = Choropleth::assemble(&states, DataSource::Field(&args.field), &options)?;
    info!("[render] {} polygons across {} states", choropleth.len(), states.len());

    let vmax = match (args.vmax, args.top) {
        (Some(v), _) => VmaxRule::Fixed(v),
        (None, Some(fraction)) => VmaxRule::TopFraction(fraction),
        (None, None) => VmaxRule::default(),
    };
    let vmin = if args.vmin_auto { VminRule::BottomFraction(1.0) } else { VminRule::Zero };
    match choropleth.bounds(vmax, vmin) {
        Some(bounds) => println!("vmin={} vmax={}", bounds.vmin, bounds.vmax),
        None => println!("vmin=? vmax=? (not enough values for the requested rule)"),
    }

    println!("[render] writing {} rows to {}", choropleth.len(), out_path.display());
    choropleth.write_csv(&out_path)?;

    Ok(())
}

fn parse_bbox(values: &[f64]) -> Result<Rect<f64>> {
    let [lon_min, lon_max, lat_min, lat_max] = values else {
        bail!("[render] --bbox takes exactly 4 values, got {}", values.len());
    };
    ensure!(lon_min <= lon_max && lat_min <= lat_max, "[render] --bbox minimums must not exceed maximums");
    Ok(Rect::new(Coord { x: *lon_min, y: *lat_min }, Coord { x: *lon_max, y: *lat_max }))
}
