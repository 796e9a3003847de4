use std::{fs::File, io::BufReader, path::Path};

use glam::{DMat3, DVec3};
use regi_lie::se3::SE3;
use regi_perturb::{CameraModel, PerturbationScene};
use serde::{Deserialize, Serialize};

use crate::error::IoError;

/// Camera section of a scene file. Matrices are row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDesc {
    /// 3x3 intrinsic projection matrix.
    pub intrinsic: [[f64; 3]; 3],
    /// 4x4 world (extrinsic) frame to camera projective frame transform.
    pub extrinsic: [[f64; 4]; 4],
    /// Number of detector rows.
    pub num_rows: usize,
    /// Number of detector columns.
    pub num_cols: usize,
    /// Physical spacing between detector rows.
    pub pixel_row_spacing: f64,
    /// Physical spacing between detector columns.
    pub pixel_col_spacing: f64,
}

/// Where the perturbation anchor comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnchorDesc {
    /// An explicit point in volume coordinates.
    Point {
        /// The anchor point.
        point: [f64; 3],
    },
    /// The physical centre of a voxel grid.
    Volume {
        /// Number of voxels along each axis.
        size: [usize; 3],
        /// Voxel spacing along each axis.
        spacing: [f64; 3],
        /// Physical position of the first voxel.
        origin: [f64; 3],
        /// Row-major direction cosines; identity when absent.
        #[serde(default)]
        direction: Option<[[f64; 3]; 3]>,
    },
}

impl AnchorDesc {
    /// The anchor point in volume coordinates.
    ///
    /// For a voxel grid this is `origin + D * diag(spacing) * (size - 1) / 2`, the physical
    /// position of the continuous centre index.
    pub fn anchor_point(&self) -> Result<DVec3, IoError> {
        let point = match self {
            AnchorDesc::Point { point } => DVec3::from_array(*point),
            AnchorDesc::Volume {
                size,
                spacing,
                origin,
                direction,
            } => {
                if size.iter().any(|&n| n == 0) {
                    return Err(IoError::InvalidScene(format!(
                        "volume size must be positive along every axis, got {:?}",
                        size
                    )));
                }
                if spacing.iter().any(|&s| !s.is_finite() || s <= 0.0) {
                    return Err(IoError::InvalidScene(format!(
                        "volume spacing must be positive, got {:?}",
                        spacing
                    )));
                }

                let direction = direction
                    .map(|rows| DMat3::from_cols_array_2d(&rows).transpose())
                    .unwrap_or(DMat3::IDENTITY);

                let center_index = DVec3::new(
                    (size[0] - 1) as f64,
                    (size[1] - 1) as f64,
                    (size[2] - 1) as f64,
                ) * 0.5;

                DVec3::from_array(*origin)
                    + direction * (DVec3::from_array(*spacing) * center_index)
            }
        };

        if !point.is_finite() {
            return Err(IoError::InvalidScene(
                "anchor point is not finite".to_string(),
            ));
        }

        Ok(point)
    }
}

/// A scene file: everything a perturbation run needs besides its configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDesc {
    /// The camera model.
    pub camera: CameraDesc,
    /// Row-major 4x4 ground-truth pose from the camera extrinsic frame to the volume.
    pub gt_cam_extrins_to_vol: [[f64; 4]; 4],
    /// The perturbation anchor.
    pub anchor: AnchorDesc,
}

impl SceneDesc {
    /// Validate the description and build the core scene.
    pub fn to_scene(&self) -> Result<PerturbationScene, IoError> {
        let extrinsic =
            SE3::from_rows(&self.camera.extrinsic).map_err(|source| IoError::InvalidTransform {
                name: "camera extrinsic",
                source,
            })?;

        let gt_cam_extrins_to_vol = SE3::from_rows(&self.gt_cam_extrins_to_vol).map_err(
            |source| IoError::InvalidTransform {
                name: "ground truth",
                source,
            },
        )?;

        let camera = CameraModel::new(
            DMat3::from_cols_array_2d(&self.camera.intrinsic).transpose(),
            extrinsic,
            self.camera.num_rows,
            self.camera.num_cols,
            self.camera.pixel_row_spacing,
            self.camera.pixel_col_spacing,
        )?;

        let anchor_wrt_vol = self.anchor.anchor_point()?;

        Ok(PerturbationScene {
            gt_cam_extrins_to_vol,
            camera,
            anchor_wrt_vol,
        })
    }
}

/// Parse a scene from a JSON string.
pub fn parse_scene_json(json: &str) -> Result<PerturbationScene, IoError> {
    let desc: SceneDesc = serde_json::from_str(json)?;
    desc.to_scene()
}

/// Read a scene from a JSON file.
///
/// # Arguments
///
/// * `file_path` - The path to the JSON scene file.
///
/// # Returns
///
/// The validated scene: camera model, ground-truth pose and anchor point.
pub fn read_scene_json(file_path: impl AsRef<Path>) -> Result<PerturbationScene, IoError> {
    let file_path = file_path.as_ref();
    log::info!("reading scene from: {}", file_path.display());

    let reader = BufReader::new(File::open(file_path)?);
    let desc: SceneDesc = serde_json::from_reader(reader)?;
    let scene = desc.to_scene()?;

    log::info!("center of rot wrt vol: {:?}", scene.anchor_wrt_vol);

    Ok(scene)
}
