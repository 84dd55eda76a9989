use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::SeedableRng;
use us_phantom::prelude::*;

fn ones(config: &Configuration) -> PhantomSlice {
    let field = Grid::filled(config.cols, config.rows, Complex64::new(1.0, 0.0));
    PhantomSlice::with_field(0, field, config)
}

fn count_re(slice: &PhantomSlice, value: f64) -> usize {
    slice.field.iter().filter(|v| v.re == value).count()
}

fn volume_document() -> PhantomDocument {
    PhantomDocument::new()
        .with_size(32, 24)
        .with_depth(5)
        .with_distribution("Rayleigh")
        .with_perc_of_scatterers(25.0)
        .with_phantom_format("k_wave")
        .with_structure(RegionDocument::circle([12, 10], 5, 0.5))
        .with_structure(RegionDocument::rectangle([20, 2], 6, 8, 0.0))
        .with_structure(RegionDocument::free_polygon(
            vec![[2, 14], [10, 14], [6, 22]],
            3.0,
        ))
        .with_structure(RegionDocument::points(vec![[30, 20], [31, 23]], 2.0))
        .with_structure(RegionDocument::sphere([16, 12, 2], 2, 4.0))
}

#[test]
fn documented_fill_counts() {
    let config =
        Configuration::new(20, 20, Distribution::Uniform, 50.0, PhantomFormat::EffectiveScatterers);

    let mut slice = ones(&config);
    let circle = RegionSpec::circle(Point::new(10, 8), 5, 2.0);
    assert_eq!(circle.fill(&mut slice, &config), 79);
    assert_eq!(count_re(&slice, 2.0), 79);

    let mut slice = ones(&config);
    let rectangle = RegionSpec::rectangle(Point::new(5, 5), 4, 3, 2.0);
    assert_eq!(rectangle.fill(&mut slice, &config), 12);
    assert_eq!(count_re(&slice, 2.0), 12);

    let mut slice = ones(&config);
    let triangle = RegionSpec::polygon(
        vec![Point::new(5, 0), Point::new(9, 4), Point::new(0, 4)],
        2.0,
    );
    assert_eq!(triangle.fill(&mut slice, &config), 12);
    assert_eq!(count_re(&slice, 2.0), 12);

    // A right triangle with legs 5 and 4 at the origin covers 14 cells under the same scan,
    // not the 12 of the skewed triangle above.
    let mut slice = ones(&config);
    let right = RegionSpec::polygon(
        vec![Point::new(0, 0), Point::new(5, 0), Point::new(0, 4)],
        2.0,
    );
    assert_eq!(right.fill(&mut slice, &config), 14);
    assert_eq!(count_re(&slice, 2.0), 14);
}

#[test]
fn k_wave_baselines_use_defaults() {
    let config = Configuration::new(4, 3, Distribution::Uniform, 10.0, PhantomFormat::KWave);
    let slice = PhantomSlice::baseline(0, &config);
    let speed = slice.sound_speed().unwrap();
    let density = slice.density().unwrap();
    assert!(speed.iter().all(|c| *c == DEFAULT_SOUND_SPEED_M_S));
    assert!(density.iter().all(|rho| *rho == DEFAULT_DENSITY_KG_M3));
}

#[test]
fn convex_polygon_containment() {
    let square = [
        Point::new(0, 0),
        Point::new(10, 0),
        Point::new(10, 10),
        Point::new(0, 10),
    ];

    for inside in [Point::new(5, 5), Point::new(1, 1), Point::new(9, 9)] {
        assert!(inside.in_polygon(&square), "{inside:?}");
    }
    for outside in [Point::new(-1, 5), Point::new(11, 5), Point::new(5, -1), Point::new(5, 11)] {
        assert!(!outside.in_polygon(&square), "{outside:?}");
    }

    // Edge points follow the crossing rule: the left edge counts, the right edge does not.
    assert!(Point::new(0, 5).in_polygon(&square));
    assert!(!Point::new(10, 5).in_polygon(&square));
}

#[test]
fn empty_document_names_all_required_keys() {
    let err = validate_configuration(&PhantomDocument::new()).unwrap_err();
    let Error::MissingParameters(report) = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(report.len(), 5);
    assert!(report.iter().all(|i| i.kind == IssueKind::MissingParameter));

    let text = err.to_string();
    for key in ["rows_y", "cols_x", "distribution", "perc_of_scatterers", "phantom_format"] {
        assert!(text.contains(key), "{key} missing from:\n{text}");
    }
}

#[test]
fn density_bounds() {
    let base = PhantomDocument::new()
        .with_size(16, 16)
        .with_distribution("uniform")
        .with_phantom_format("effec_scatterers");

    let validated = validate_configuration(&base.clone().with_perc_of_scatterers(100.0)).unwrap();
    assert_eq!(validated.warnings.len(), 1);
    assert_eq!(validated.config.density_percent, 100.0);

    for perc in [0.0, -3.0, 100.5] {
        let err = validate_configuration(&base.clone().with_perc_of_scatterers(perc)).unwrap_err();
        match err {
            Error::InvalidConfig(report) => {
                assert!(report.contains_kind(IssueKind::InvalidValue), "{perc}");
            }
            other => panic!("unexpected error for {perc}: {other}"),
        }
    }
}

#[test]
fn volume_needs_k_wave_format() {
    let doc = volume_document().with_phantom_format("effec_scatterers");
    let err = validate_configuration(&doc).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert!(err.to_string().contains("only supports 2-D phantoms"));
}

#[test]
fn composed_volume_matches_independent_slices() {
    let validated = validate_configuration(&volume_document()).unwrap();
    assert!(validated.warnings.is_empty());
    let config = validated.config;

    let runner = PhantomRunner::try_new(config.clone(), RunOptions::new()).unwrap();
    let mut store = MemorySliceStore::new();
    let result = runner.run(&mut store, &mut StdRng::seed_from_u64(2024)).unwrap();

    assert_eq!(result.slices_written(), 5);
    let volume = result.volume.as_ref().unwrap();
    assert_eq!(volume.dims(), (24, 32, 5));
    assert_eq!(
        volume.names(),
        vec![
            PhantomVolume::FIELD_NAME,
            PhantomVolume::SOUND_SPEED_NAME,
            PhantomVolume::DENSITY_NAME
        ]
    );
    assert_eq!(store.volume(DEFAULT_OUTPUT_PREFIX), Some(volume));

    let assembler = PhantomAssembler::new(&config);
    let mut rng = StdRng::seed_from_u64(2024);
    for z in 0..config.depth {
        let slice = assembler.assemble_slice(z, &mut rng).unwrap();
        let maps = slice.maps.as_ref().unwrap();

        assert_eq!(volume.field.slice_grid(z).as_ref(), Some(&slice.field), "slice {z}");
        assert_eq!(
            volume.sound_speed.as_ref().and_then(|v| v.slice_grid(z)).as_ref(),
            Some(&maps.sound_speed)
        );
        assert_eq!(
            volume.density.as_ref().and_then(|v| v.slice_grid(z)).as_ref(),
            Some(&maps.density)
        );
        assert_eq!(volume.field.get(7, 3, z), slice.field.get(3, 7));

        let key = format!("{DEFAULT_OUTPUT_PREFIX}_slice_{z}");
        assert_eq!(store.get(&key), Some(&slice));
    }
}

#[test]
fn in_memory_composition_matches_streaming() {
    let config = validate_configuration(&volume_document()).unwrap().config;

    let streamed = PhantomRunner::try_new(config.clone(), RunOptions::new())
        .unwrap()
        .run(&mut MemorySliceStore::new(), &mut StdRng::seed_from_u64(5))
        .unwrap();
    let held = PhantomRunner::try_new(config, RunOptions::new().with_stream_slices(false))
        .unwrap()
        .run(&mut MemorySliceStore::new(), &mut StdRng::seed_from_u64(5))
        .unwrap();

    assert_eq!(streamed.keys, held.keys);
    assert_eq!(streamed.volume, held.volume);
}

#[test]
fn sphere_only_reaches_nearby_slices() {
    let config = validate_configuration(&volume_document()).unwrap().config;
    let sphere = RegionSpec::sphere(Point3::new(16, 12, 2), 2, 4.0);

    let touched: Vec<usize> = (0..config.depth)
        .map(|z| {
            let mut slice = PhantomSlice::baseline(z, &config);
            sphere.fill(&mut slice, &config)
        })
        .collect();
    assert_eq!(touched, vec![1, 9, 11, 9, 1]);
}

#[test]
fn repeated_fill_compounds_gain() {
    let config = Configuration::new(16, 16, Distribution::Uniform, 10.0, PhantomFormat::KWave)
        .with_sound_speed(1400.0);
    let rectangle = RegionSpec::rectangle(Point::new(2, 2), 5, 5, 0.5);
    let mut slice = ones(&config);

    rectangle.fill(&mut slice, &config);
    let once = slice.clone();
    rectangle.fill(&mut slice, &config);

    assert_ne!(slice, once);
    assert_eq!(once.field[(4, 4)], Complex64::new(0.5, 0.0));
    assert_eq!(slice.field[(4, 4)], Complex64::new(0.25, 0.0));
    assert_eq!(slice.field[(10, 10)], Complex64::new(1.0, 0.0));

    let speed = slice.sound_speed().unwrap();
    let density = slice.density().unwrap();
    assert!((once.sound_speed().unwrap()[(4, 4)] - 1462.5).abs() < 1e-9);
    assert!((speed[(4, 4)] - 1443.75).abs() < 1e-9);
    assert!((density[(4, 4)] - 1443.75 / 1.5).abs() < 1e-9);
    assert_eq!(speed[(10, 10)], 1400.0);
}

#[test]
fn infinite_gain_never_reaches_the_maps() {
    let config = Configuration::new(8, 8, Distribution::Uniform, 50.0, PhantomFormat::KWave)
        .with_region(RegionSpec::rectangle(Point::new(1, 1), 4, 4, f64::INFINITY));

    let err = PhantomRunner::try_new(config, RunOptions::new())
        .err()
        .expect("infinite gain must fail validation");
    match err {
        Error::InvalidConfig(report) => {
            assert!(report.contains_kind(IssueKind::InvalidGeometry), "{report}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn image_document_runs_single_slice() {
    let manifest = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");
    let doc = PhantomDocument::new()
        .with_image_path(manifest)
        .with_distribution("gaussian")
        .with_perc_of_scatterers(10.0)
        .with_phantom_format("effective_scatterers")
        .with_structure(RegionDocument::circle([4, 4], 2, 2.0));

    let validated = validate_configuration(&doc).unwrap();
    assert_eq!(validated.warnings.len(), 1);
    assert!(validated.config.regions.is_empty());

    let image = Grid::from_vec(4, 2, vec![0.0, 0.25, 0.5, 1.0, 1.0, 0.5, 0.25, 0.0]).unwrap();
    let runner = PhantomRunner::try_new(
        validated.config,
        RunOptions::new()
            .with_image_policy(ImageSeedPolicy::Retain)
            .with_output_prefix("us"),
    )
    .unwrap()
    .with_image_source(&image);

    let mut store = MemorySliceStore::new();
    let result = runner.run(&mut store, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(result.keys, vec!["us".to_string()]);
    assert!(result.volume.is_none());

    let slice = store.get("us").unwrap();
    assert!(slice.maps.is_none());
    assert_eq!(slice.field, image.map(|v| Complex64::new(*v, 0.0)));
}

#[test]
fn missing_image_is_reported_before_other_checks() {
    let doc = PhantomDocument::new()
        .with_image_path("/definitely/not/here.png")
        .with_distribution("nope")
        .with_perc_of_scatterers(500.0)
        .with_phantom_format("k_wave");

    let err = validate_configuration(&doc).unwrap_err();
    assert!(matches!(err, Error::ResourceNotFound { .. }), "{err}");
}
