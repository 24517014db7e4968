use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use outbreak_cli::config::{OptionOverrides, resolve_options};
use outbreak_cli::output::write_csv;
use outbreak_cli::summary::{LocationSummary, summarize};
use outbreak_core::LoadPipeline;
use outbreak_ingest::DirectorySource;
use outbreak_model::MetricKind;
use outbreak_transform::{final_rows_to_frame, observations_to_frame};

use crate::cli::{AlignArgs, ReshapeArgs};

pub fn run_align(args: &AlignArgs) -> Result<Vec<LocationSummary>> {
    let overrides = OptionOverrides {
        drop_states: args.drop_states,
        p_crit: args.p_crit,
        min_days_since_threshold: args.min_days,
        threshold: args.threshold,
    };
    let options = resolve_options(args.config.as_deref(), &overrides)?;
    let align_span = info_span!("align", data_dir = %args.data_dir.display());
    let _align_guard = align_span.enter();
    let start = Instant::now();

    let source = DirectorySource::new(&args.data_dir)
        .with_context(|| format!("open data directory {}", args.data_dir.display()))?;
    let rows = LoadPipeline::new(source)
        .run(&options)
        .context("load snapshots")?;
    let mut df = final_rows_to_frame(&rows).context("build output frame")?;
    write_csv(&mut df, args.output.as_deref())?;

    info!(
        rows = rows.len(),
        duration_ms = start.elapsed().as_millis(),
        "align complete"
    );
    Ok(summarize(&rows))
}

pub fn run_reshape(args: &ReshapeArgs) -> Result<()> {
    let options = resolve_options(args.config.as_deref(), &OptionOverrides::default())?;
    let metric = MetricKind::from(args.metric);
    let reshape_span = info_span!("reshape", metric = %metric);
    let _reshape_guard = reshape_span.enter();

    let source = DirectorySource::new(&args.data_dir)
        .with_context(|| format!("open data directory {}", args.data_dir.display()))?;
    let rows = LoadPipeline::new(source)
        .load_metric(metric, &options)
        .with_context(|| format!("reshape {metric}"))?;
    let mut df = observations_to_frame(&rows).context("build output frame")?;
    write_csv(&mut df, args.output.as_deref())?;

    info!(rows = rows.len(), "reshape complete");
    Ok(())
}
