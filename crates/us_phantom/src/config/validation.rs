//! Aggregating configuration validation.
//!
//! Missing keys are reported first and on their own. Everything else (unsupported names,
//! ranges, unsupported combinations, region geometry) is collected into one
//! [`ValidationReport`] so that a configuration can be fixed in a single pass. Nothing is
//! generated before validation succeeded.
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::document::{PhantomDocument, RegionDocument};
use crate::config::types::{
    Configuration, PhantomFormat, DEFAULT_DENSITY_KG_M3, DEFAULT_SOUND_SPEED_M_S,
};
use crate::error::{Error, IssueKind, Result, ValidationIssue, ValidationReport};
use crate::geometry::{Point, Point3};
use crate::region::{Extent, RegionKind, RegionSpec};
use crate::sampling::Distribution;

/// A configuration that passed validation, with the warnings raised on the way.
#[derive(Clone, Debug, PartialEq)]
pub struct Validated {
    pub config: Configuration,
    pub warnings: Vec<String>,
}

/// Validate a raw document and build the typed [`Configuration`].
///
/// # Errors
/// - [`Error::MissingParameters`] when required top-level keys are absent (all of them listed).
/// - [`Error::ResourceNotFound`] when the image path does not exist.
/// - [`Error::InvalidConfig`] with every other finding.
pub fn validate_configuration(doc: &PhantomDocument) -> Result<Validated> {
    let image_path = doc.image_path().map(PathBuf::from);
    let is_image = image_path.is_some();

    let mut missing = ValidationReport::new();
    if !is_image {
        require_key(&doc.rows_y, "rows_y", "", &mut missing);
        require_key(&doc.cols_x, "cols_x", "", &mut missing);
    }
    require_key(&doc.distribution, "distribution", "", &mut missing);
    require_key(&doc.perc_of_scatterers, "perc_of_scatterers", "", &mut missing);
    require_key(&doc.phantom_format, "phantom_format", "", &mut missing);
    if !missing.is_empty() {
        return Err(Error::MissingParameters(missing));
    }

    if let Some(path) = &image_path {
        if !path.exists() {
            return Err(Error::ResourceNotFound { path: path.clone() });
        }
    }

    let mut report = ValidationReport::new();
    let mut warnings = Vec::new();

    let distribution = doc
        .distribution
        .as_deref()
        .and_then(|name| parse_or_report::<Distribution>(name, "distribution", &mut report));
    let format = doc
        .phantom_format
        .as_deref()
        .and_then(|name| parse_or_report::<PhantomFormat>(name, "phantom_format", &mut report));
    let density_percent = doc.perc_of_scatterers.unwrap_or_default();
    check_density(density_percent, &mut report, &mut warnings);

    let depth = doc.depth_z.unwrap_or(1);
    let (cols, rows) = if is_image {
        (0, 0)
    } else {
        (doc.cols_x.unwrap_or_default(), doc.rows_y.unwrap_or_default())
    };
    let dims_valid = check_dimensions(cols, rows, depth, is_image, &mut report);
    let extent = dims_valid.then(|| Extent::new(cols as usize, rows as usize, depth as usize));

    if let Some(format) = format {
        check_combination(format, depth, is_image, &mut report);
    }

    let mut regions = Vec::new();
    if is_image {
        if !doc.structures.is_empty() {
            let message = format!(
                "{} structure(s) ignored: image-based phantoms take no structures",
                doc.structures.len()
            );
            warn!("{}", message);
            warnings.push(message);
        }
    } else {
        for (i, region_doc) in doc.structures.iter().enumerate() {
            if let Some(spec) = region_from_document(i, region_doc, &mut report) {
                regions.push(spec);
            }
        }
        if let Some(extent) = extent {
            check_regions(regions.iter().map(|(i, spec)| (*i, spec)), &extent, &mut report);
        }
    }

    let (Some(distribution), Some(format)) = (distribution, format) else {
        return Err(Error::InvalidConfig(report));
    };
    if !report.is_empty() {
        return Err(Error::InvalidConfig(report));
    }

    let mut config = Configuration::new(
        cols as usize,
        rows as usize,
        distribution,
        density_percent,
        format,
    )
    .with_depth(depth as usize)
    .with_sound_speed(doc.sound_speed_c0_m_per_s.unwrap_or(DEFAULT_SOUND_SPEED_M_S))
    .with_density(doc.density_rho0_kg_per_m3.unwrap_or(DEFAULT_DENSITY_KG_M3))
    .with_regions(regions.into_iter().map(|(_, spec)| spec))
    .with_verbose(doc.verbose.unwrap_or(false));
    if let Some(path) = image_path {
        config = config.with_image_path(path);
    }

    debug!(
        "Configuration validated: {}x{}x{}, {} region(s), {} warning(s).",
        config.cols,
        config.rows,
        config.depth,
        config.regions.len(),
        warnings.len()
    );
    Ok(Validated { config, warnings })
}

/// Typed checks shared with [`Configuration::validate`].
pub(crate) fn check_typed(
    config: &Configuration,
    report: &mut ValidationReport,
    warnings: &mut Vec<String>,
) {
    let is_image = config.is_image_based();
    check_density(config.density_percent, report, warnings);
    let dims_valid = check_dimensions(
        config.cols as i64,
        config.rows as i64,
        config.depth as i64,
        is_image,
        report,
    );
    check_combination(config.format, config.depth as i64, is_image, report);

    if let Some(path) = &config.image_path {
        if !path.exists() {
            report.push(ValidationIssue::new(
                IssueKind::ResourceNotFound,
                "image_path",
                format!("input image '{}' was not found", path.display()),
            ));
        }
        if !config.regions.is_empty() {
            let message = format!(
                "{} structure(s) ignored: image-based phantoms take no structures",
                config.regions.len()
            );
            warn!("{}", message);
            warnings.push(message);
        }
    } else if dims_valid {
        check_regions(config.regions.iter().enumerate(), &Extent::of(config), report);
    }
}

fn check_density(density_percent: f64, report: &mut ValidationReport, warnings: &mut Vec<String>) {
    if !(density_percent > 0.0 && density_percent <= 100.0) {
        report.push(ValidationIssue::new(
            IssueKind::InvalidValue,
            "perc_of_scatterers",
            "percentage of scatterers should be > 0 and <= 100 %",
        ));
    } else if density_percent == 100.0 {
        let message =
            "percentage of scatterers is set to 100 %, please check your configuration".to_owned();
        warn!("{}", message);
        warnings.push(message);
    }
}

/// Returns `true` when the dimensions can be used for bounds checks.
fn check_dimensions(
    cols: i64,
    rows: i64,
    depth: i64,
    is_image: bool,
    report: &mut ValidationReport,
) -> bool {
    // Image-based phantoms take their size from the image.
    let axes = [
        ("cols_x", cols, !is_image),
        ("rows_y", rows, !is_image),
        ("depth_z", depth, true),
    ];
    let mut valid = true;
    for (key, value, checked) in axes {
        if checked && value < 1 {
            report.push(ValidationIssue::new(
                IssueKind::InvalidValue,
                key,
                format!("must be >= 1, got {value}"),
            ));
            valid = false;
        }
    }
    valid
}

fn check_combination(
    format: PhantomFormat,
    depth: i64,
    is_image: bool,
    report: &mut ValidationReport,
) {
    if depth > 1 && !format.has_physical_maps() {
        report.push(ValidationIssue::new(
            IssueKind::UnsupportedCombination,
            "depth_z",
            format!("{format} only supports 2-D phantoms"),
        ));
    }
    if is_image && format != PhantomFormat::EffectiveScatterers {
        report.push(ValidationIssue::new(
            IssueKind::UnsupportedCombination,
            "image_path",
            format!(
                "using an image as input is supported only with {} format",
                PhantomFormat::EffectiveScatterers
            ),
        ));
    }
}

fn check_regions<'r>(
    regions: impl Iterator<Item = (usize, &'r RegionSpec)>,
    extent: &Extent,
    report: &mut ValidationReport,
) {
    for (i, spec) in regions {
        let context = region_context(i, Some(spec.kind()));
        push_with_context(report, &context, spec.issues(extent));
    }
}

fn push_with_context(
    report: &mut ValidationReport,
    context: &str,
    issues: impl IntoIterator<Item = ValidationIssue>,
) {
    report.extend(issues.into_iter().map(|issue| ValidationIssue {
        context: context.to_owned(),
        ..issue
    }));
}

fn region_context(index: usize, kind: Option<RegionKind>) -> String {
    match kind {
        Some(kind) => format!("structure #{index} ({kind})"),
        None => format!("structure #{index}"),
    }
}

fn missing_message(key: &str) -> String {
    format!("parameter \"{key}\" is missing")
}

fn require_key<T: Clone>(
    value: &Option<T>,
    key: &str,
    context: &str,
    report: &mut ValidationReport,
) -> Option<T> {
    if value.is_none() {
        report.push(ValidationIssue::new(
            IssueKind::MissingParameter,
            context,
            missing_message(key),
        ));
    }
    value.clone()
}

fn parse_or_report<T>(name: &str, key: &str, report: &mut ValidationReport) -> Option<T>
where
    T: std::str::FromStr<Err = Error>,
{
    match name.parse::<T>() {
        Ok(value) => Some(value),
        Err(err) => {
            report.push(ValidationIssue::new(IssueKind::InvalidValue, key, err.to_string()));
            None
        }
    }
}

fn point([x, y]: [i32; 2]) -> Point {
    Point::new(x, y)
}

/// Convert one region document, reporting missing keys. Returns `None` when the region cannot
/// be built; an unsupported type skips all further checks for that entry.
fn region_from_document(
    index: usize,
    doc: &RegionDocument,
    report: &mut ValidationReport,
) -> Option<(usize, RegionSpec)> {
    let Some(name) = doc.kind.as_deref() else {
        report.push(ValidationIssue::new(
            IssueKind::MissingParameter,
            region_context(index, None),
            missing_message("type"),
        ));
        return None;
    };
    let kind = parse_or_report::<RegionKind>(name, &region_context(index, None), report)?;

    let ctx = region_context(index, Some(kind));
    let gain = require_key(&doc.scat_gain, "scat_gain", &ctx, report);
    let spec = match kind {
        RegionKind::Circle => {
            let center = require_key(&doc.center_xy, "center_xy", &ctx, report);
            let radius = require_key(&doc.radius, "radius", &ctx, report);
            RegionSpec::circle(point(center?), radius?, gain?)
        }
        RegionKind::Rectangle => {
            let top_left = require_key(&doc.top_left_corner_xy, "top_left_corner_xy", &ctx, report);
            let width = require_key(&doc.length_x, "length_x", &ctx, report);
            let height = require_key(&doc.length_y, "length_y", &ctx, report);
            RegionSpec::rectangle(point(top_left?), width?, height?, gain?)
        }
        RegionKind::FreePolygon => {
            let vertices = require_key(&doc.vertices_xy, "vertices_xy", &ctx, report);
            RegionSpec::polygon(vertices?.into_iter().map(point).collect(), gain?)
        }
        RegionKind::Points => {
            let coords = require_key(&doc.coordinates_xy, "coordinates_xy", &ctx, report);
            RegionSpec::points(coords?.into_iter().map(point).collect(), gain?)
        }
        RegionKind::Sphere => {
            let center = require_key(&doc.center_xyz, "center_xyz", &ctx, report);
            let radius = require_key(&doc.radius, "radius", &ctx, report);
            let [x, y, z] = center?;
            RegionSpec::sphere(Point3::new(x, y, z), radius?, gain?)
        }
    };
    Some((index, spec))
}
