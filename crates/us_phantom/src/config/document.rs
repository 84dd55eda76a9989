//! Raw configuration documents as handed over by a configuration source.
//!
//! Every key is optional so that the validator can report all missing keys at once. Key names
//! follow the phantom JSON format (`rows_y`, `cols_x`, `perc_of_scatterers`, ...). With the
//! `serde` feature enabled the documents can be deserialized directly from that format.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One entry of the `structures` list.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionDocument {
    /// Region type name: `circle`, `rectangle`, `free_polygon`, `points` or `sphere`.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: Option<String>,
    pub center_xy: Option<[i32; 2]>,
    pub center_xyz: Option<[i32; 3]>,
    pub radius: Option<i32>,
    pub top_left_corner_xy: Option<[i32; 2]>,
    pub length_x: Option<i32>,
    pub length_y: Option<i32>,
    pub vertices_xy: Option<Vec<[i32; 2]>>,
    pub coordinates_xy: Option<Vec<[i32; 2]>>,
    /// Relative amplitude applied to scatterers inside the region.
    pub scat_gain: Option<f64>,
}

impl RegionDocument {
    pub fn circle(center_xy: [i32; 2], radius: i32, scat_gain: f64) -> Self {
        Self {
            kind: Some("circle".into()),
            center_xy: Some(center_xy),
            radius: Some(radius),
            scat_gain: Some(scat_gain),
            ..Default::default()
        }
    }

    pub fn rectangle(
        top_left_corner_xy: [i32; 2],
        length_x: i32,
        length_y: i32,
        scat_gain: f64,
    ) -> Self {
        Self {
            kind: Some("rectangle".into()),
            top_left_corner_xy: Some(top_left_corner_xy),
            length_x: Some(length_x),
            length_y: Some(length_y),
            scat_gain: Some(scat_gain),
            ..Default::default()
        }
    }

    pub fn free_polygon(vertices_xy: Vec<[i32; 2]>, scat_gain: f64) -> Self {
        Self {
            kind: Some("free_polygon".into()),
            vertices_xy: Some(vertices_xy),
            scat_gain: Some(scat_gain),
            ..Default::default()
        }
    }

    pub fn points(coordinates_xy: Vec<[i32; 2]>, scat_gain: f64) -> Self {
        Self {
            kind: Some("points".into()),
            coordinates_xy: Some(coordinates_xy),
            scat_gain: Some(scat_gain),
            ..Default::default()
        }
    }

    pub fn sphere(center_xyz: [i32; 3], radius: i32, scat_gain: f64) -> Self {
        Self {
            kind: Some("sphere".into()),
            center_xyz: Some(center_xyz),
            radius: Some(radius),
            scat_gain: Some(scat_gain),
            ..Default::default()
        }
    }

    /// A region document with only a type name, e.g. to exercise unsupported types.
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Default::default()
        }
    }

    pub fn with_scat_gain(mut self, scat_gain: f64) -> Self {
        self.scat_gain = Some(scat_gain);
        self
    }
}

/// Top-level phantom configuration document.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhantomDocument {
    pub rows_y: Option<i64>,
    pub cols_x: Option<i64>,
    pub depth_z: Option<i64>,
    pub distribution: Option<String>,
    pub perc_of_scatterers: Option<f64>,
    pub phantom_format: Option<String>,
    pub sound_speed_c0_m_per_s: Option<f64>,
    pub density_rho0_kg_per_m3: Option<f64>,
    pub image_path: Option<String>,
    pub verbose: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub structures: Vec<RegionDocument>,
}

impl PhantomDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `cols_x` and `rows_y`.
    pub fn with_size(mut self, cols_x: i64, rows_y: i64) -> Self {
        self.cols_x = Some(cols_x);
        self.rows_y = Some(rows_y);
        self
    }

    pub fn with_depth(mut self, depth_z: i64) -> Self {
        self.depth_z = Some(depth_z);
        self
    }

    pub fn with_distribution(mut self, distribution: impl Into<String>) -> Self {
        self.distribution = Some(distribution.into());
        self
    }

    pub fn with_perc_of_scatterers(mut self, perc: f64) -> Self {
        self.perc_of_scatterers = Some(perc);
        self
    }

    pub fn with_phantom_format(mut self, format: impl Into<String>) -> Self {
        self.phantom_format = Some(format.into());
        self
    }

    pub fn with_sound_speed(mut self, c0_m_per_s: f64) -> Self {
        self.sound_speed_c0_m_per_s = Some(c0_m_per_s);
        self
    }

    pub fn with_density(mut self, rho0_kg_per_m3: f64) -> Self {
        self.density_rho0_kg_per_m3 = Some(rho0_kg_per_m3);
        self
    }

    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    pub fn with_structure(mut self, region: RegionDocument) -> Self {
        self.structures.push(region);
        self
    }

    /// The image path, treating an empty string as absent.
    pub fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn deserializes_phantom_json() {
        let json = r#"{
            "rows_y": 512,
            "cols_x": 256,
            "distribution": "uniform",
            "perc_of_scatterers": 80,
            "phantom_format": "k_wave",
            "structures": [
                { "type": "circle", "center_xy": [300, 300], "radius": 50, "scat_gain": 3 },
                { "type": "rectangle", "top_left_corner_xy": [50, 60], "length_x": 20, "length_y": 30, "scat_gain": 4 },
                { "type": "free_polygon", "vertices_xy": [[100, 100], [200, 100], [200, 200]], "scat_gain": 0 },
                { "type": "points", "coordinates_xy": [[80, 90], [85, 85]], "scat_gain": 2 }
            ]
        }"#;

        let doc: PhantomDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.rows_y, Some(512));
        assert_eq!(doc.cols_x, Some(256));
        assert_eq!(doc.depth_z, None);
        assert_eq!(doc.perc_of_scatterers, Some(80.0));
        assert_eq!(doc.structures.len(), 4);
        assert_eq!(doc.structures[0], RegionDocument::circle([300, 300], 50, 3.0));
        assert_eq!(
            doc.structures[2].vertices_xy.as_deref(),
            Some(&[[100, 100], [200, 100], [200, 200]][..])
        );
    }

    #[test]
    fn missing_structures_default_to_empty() {
        let json = r#"{ "distribution": "rayleigh", "perc_of_scatterers": 60,
                        "phantom_format": "effec_scatterers", "image_path": "input.bmp" }"#;
        let doc: PhantomDocument = serde_json::from_str(json).unwrap();
        assert!(doc.structures.is_empty());
        assert_eq!(doc.image_path(), Some("input.bmp"));
    }
}
